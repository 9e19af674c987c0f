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

use crate::phase::Phase;
use num::Zero;
use std::fmt;

/// The gate vocabulary shared by diagram construction and extraction.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum GType {
    ZPhase,
    XPhase,
    HAD,
    CNOT,
    CZ,
    SWAP,
}

pub use GType::*;

impl GType {
    /// Short lowercase name, as used in gate listings.
    pub fn name(&self) -> &'static str {
        match self {
            ZPhase => "rz",
            XPhase => "rx",
            HAD => "h",
            CNOT => "cx",
            CZ => "cz",
            SWAP => "swap",
        }
    }

    pub fn num_qubits(&self) -> usize {
        match self {
            CNOT | CZ | SWAP => 2,
            _ => 1,
        }
    }

    pub fn has_phase(&self) -> bool {
        matches!(self, ZPhase | XPhase)
    }
}

/// A single gate. For [CNOT], `qs` is `[control, target]`.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Gate {
    pub t: GType,
    pub qs: Vec<usize>,
    pub phase: Phase,
}

impl Gate {
    pub fn new(t: GType, qs: Vec<usize>) -> Gate {
        Gate {
            t,
            qs,
            phase: Phase::zero(),
        }
    }

    pub fn new_with_phase(t: GType, qs: Vec<usize>, phase: impl Into<Phase>) -> Gate {
        Gate {
            t,
            qs,
            phase: phase.into(),
        }
    }

    /// A phase gate whose phase is not a multiple of pi/2.
    pub fn is_non_clifford(&self) -> bool {
        self.t.has_phase() && !self.phase.is_clifford()
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.t.name())?;
        if self.t.has_phase() {
            write!(f, "({}*pi)", self.phase)?;
        }
        let qs: Vec<String> = self.qs.iter().map(|i| format!("q[{i}]")).collect();
        write!(f, " {}", qs.join(", "))
    }
}
