// zxcalc - Rust library for quantum circuit rewriting and optimisation
//          using the ZX-calculus
// Copyright (C) 2021 - Aleks Kissinger
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Graph-based intermediate representation for quantum circuits.
//!
//! Circuits are turned into ZX-diagrams ([diagram::ZXDiagram]), optionally
//! converted to graph-like form ([zx_graph::ZXGraph]), rewritten with the
//! rules in [rules], and turned back into circuits by [extract].

pub mod error;
pub mod phase;
pub mod multigraph;
pub mod graph;
pub mod diagram;
pub mod zx_graph;
pub mod gate;
pub mod circuit;
pub mod linalg;
pub mod rules;
pub mod basic_rules;
pub mod graph_rules;
pub mod simplify;
pub mod extract;
pub mod generate;
pub mod cli;

pub use error::ZXError;
pub use phase::{Angle, Phase};
pub use graph::{EType, SpiderType, ZXLike, V};
pub use diagram::ZXDiagram;
pub use zx_graph::ZXGraph;
pub use rules::{DiagramRule, GraphRule, Match, Rule};
pub use simplify::{clifford_simplification, phase_teleportation, replace, rewrite, simplify};
pub use extract::{circuit_extraction, ExtractError};
