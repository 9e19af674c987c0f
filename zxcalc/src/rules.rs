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

//! Rule tags, matches, and the interface the simplification drivers use.
//!
//! Each rule is a variant of [DiagramRule] or [GraphRule], and the variant
//! fixes the kind of diagram it rewrites. A rule finds [Match]es with a
//! read-only scan and applies them one by one, re-checking each first.

use crate::basic_rules::*;
use crate::diagram::ZXDiagram;
use crate::graph::{ZXLike, V};
use crate::graph_rules::*;
use crate::zx_graph::ZXGraph;
use derive_more::Display;

/// Define a checked rule that takes 1 vertex
macro_rules! checked_rule1 {
    ( $g:ty, $check:ident, $unchecked:ident, $name:ident ) => {
        /// A checked implementation of the rule
        pub fn $name(g: &mut $g, v: V) -> bool {
            if $check(g, v) {
                $unchecked(g, v);
                true
            } else {
                false
            }
        }
    };
}

/// Define a checked rule that takes 2 vertices
macro_rules! checked_rule2 {
    ( $g:ty, $check:ident, $unchecked:ident, $name:ident ) => {
        /// A checked implementation of the rule
        pub fn $name(g: &mut $g, v0: V, v1: V) -> bool {
            if $check(g, v0, v1) {
                $unchecked(g, v0, v1);
                true
            } else {
                false
            }
        }
    };
}

pub(crate) use checked_rule1;
pub(crate) use checked_rule2;

/// One place a rule can be applied.
///
/// The first one or two vertices are the ones the rule is applied at. Any
/// further vertices are the rest of the pattern, so that matches touching
/// the same spiders can be told apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Match {
    vertices: Vec<V>,
}

impl Match {
    pub(crate) fn new(vertices: Vec<V>) -> Match {
        Match { vertices }
    }

    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }
}

/// A rewrite rule on diagrams of type `D`.
pub trait Rule<D> {
    /// All places the rule applies, in ascending order of their first
    /// vertex. No two matches share a vertex.
    fn find_matches(&self, d: &D) -> Vec<Match>;

    /// Whether the match still applies to `d`.
    fn check(&self, d: &D, m: &Match) -> bool;

    /// Rewrites `d` at the match without checking it first.
    fn apply_unchecked(&self, d: &mut D, m: &Match);
}

/// Rules rewriting circuit-form diagrams.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagramRule {
    /// Fuse two adjacent spiders of the same colour.
    #[display("f")]
    Fusion,
    /// Turn an X spider into a Z spider surrounded by Hadamard boxes.
    #[display("h")]
    Hadamard,
    /// Remove a phase-free spider of degree 2.
    #[display("i1")]
    Identity1,
    /// Cancel pairs of wires between a Z and an X spider, or two Hadamard
    /// boxes in a row.
    #[display("i2")]
    Identity2,
    /// Copy a pi phase through a Pauli spider of the other colour.
    #[display("pi")]
    PiCopy,
    /// Change the colour of a spider whose wires all pass through
    /// Hadamard boxes.
    #[display("c")]
    ColorChange,
}

/// Rules rewriting graph-like diagrams.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphRule {
    #[display("lc")]
    LocalComp,
    #[display("p1")]
    Pivot,
    /// Pivot an interior Pauli spider with a Pauli spider on the boundary.
    #[display("pab")]
    PivotBoundary,
    /// Pivot an interior Pauli spider with an interior non-Clifford one,
    /// leaving the phase behind as a gadget.
    #[display("p2")]
    PivotGadget,
    /// Pivot an interior Pauli spider with a non-Pauli boundary spider.
    #[display("p3")]
    PivotBoundaryGadget,
    /// Remove a Pauli spider of degree 2 and fuse its neighbours.
    #[display("id")]
    Identity,
    /// Fuse two phase gadgets on the same set of spiders.
    #[display("gf")]
    GadgetFusion,
}

fn all_present(d: &impl ZXLike, m: &Match, arity: usize) -> bool {
    m.vertices.len() == arity && m.vertices.iter().all(|&v| d.contains_spider(v))
}

impl Rule<ZXDiagram> for DiagramRule {
    fn find_matches(&self, zxd: &ZXDiagram) -> Vec<Match> {
        match self {
            DiagramRule::Fusion => match_fusion(zxd),
            DiagramRule::Hadamard => match_hadamard(zxd),
            DiagramRule::Identity1 => match_identity1(zxd),
            DiagramRule::Identity2 => match_identity2(zxd),
            DiagramRule::PiCopy => match_pi_copy(zxd),
            DiagramRule::ColorChange => match_color_change(zxd),
        }
    }

    fn check(&self, zxd: &ZXDiagram, m: &Match) -> bool {
        let vs = m.vertices();
        match self {
            DiagramRule::Fusion => all_present(zxd, m, 2) && check_fusion(zxd, vs[0], vs[1]),
            DiagramRule::Hadamard => all_present(zxd, m, 1) && check_hadamard(zxd, vs[0]),
            DiagramRule::Identity1 => all_present(zxd, m, 1) && check_identity1(zxd, vs[0]),
            DiagramRule::Identity2 => all_present(zxd, m, 2) && check_identity2(zxd, vs[0], vs[1]),
            DiagramRule::PiCopy => all_present(zxd, m, 2) && check_pi_copy(zxd, vs[0], vs[1]),
            DiagramRule::ColorChange => {
                all_present(zxd, m, vs.len())
                    && !vs.is_empty()
                    && check_color_change(zxd, vs[0])
                    && color_change_boxes(zxd, vs[0]) == vs[1..]
            }
        }
    }

    fn apply_unchecked(&self, zxd: &mut ZXDiagram, m: &Match) {
        let vs = m.vertices();
        match self {
            DiagramRule::Fusion => fusion_unchecked(zxd, vs[0], vs[1]),
            DiagramRule::Hadamard => hadamard_unchecked(zxd, vs[0]),
            DiagramRule::Identity1 => identity1_unchecked(zxd, vs[0]),
            DiagramRule::Identity2 => identity2_unchecked(zxd, vs[0], vs[1]),
            DiagramRule::PiCopy => pi_copy_unchecked(zxd, vs[0], vs[1]),
            DiagramRule::ColorChange => color_change_unchecked(zxd, vs[0]),
        }
    }
}

impl Rule<ZXGraph> for GraphRule {
    fn find_matches(&self, zxg: &ZXGraph) -> Vec<Match> {
        match self {
            GraphRule::LocalComp => match_local_comp(zxg),
            GraphRule::Pivot => match_pivot(zxg),
            GraphRule::PivotBoundary => match_pivot_boundary(zxg),
            GraphRule::PivotGadget => match_pivot_gadget(zxg),
            GraphRule::PivotBoundaryGadget => match_pivot_boundary_gadget(zxg),
            GraphRule::Identity => match_identity(zxg),
            GraphRule::GadgetFusion => match_gadget_fusion(zxg),
        }
    }

    fn check(&self, zxg: &ZXGraph, m: &Match) -> bool {
        let vs = m.vertices();
        match self {
            GraphRule::LocalComp => all_present(zxg, m, 1) && check_local_comp(zxg, vs[0]),
            GraphRule::Pivot => all_present(zxg, m, 2) && check_pivot(zxg, vs[0], vs[1]),
            GraphRule::PivotBoundary => {
                all_present(zxg, m, 3)
                    && check_pivot_boundary(zxg, vs[0], vs[1])
                    && zxg.boundary_neighbors(vs[1]) == vs[2..]
            }
            GraphRule::PivotGadget => {
                all_present(zxg, m, 2) && check_pivot_gadget(zxg, vs[0], vs[1])
            }
            GraphRule::PivotBoundaryGadget => {
                all_present(zxg, m, 3)
                    && check_pivot_boundary_gadget(zxg, vs[0], vs[1])
                    && zxg.boundary_neighbors(vs[1]) == vs[2..]
            }
            GraphRule::Identity => {
                all_present(zxg, m, 3)
                    && check_identity(zxg, vs[0])
                    && identity_ends(zxg, vs[0]) == Some((vs[1], vs[2]))
            }
            GraphRule::GadgetFusion => {
                all_present(zxg, m, 4)
                    && check_gadget_fusion(zxg, vs[0], vs[1])
                    && gadget_leaf(zxg, vs[0]) == Some(vs[2])
                    && gadget_leaf(zxg, vs[1]) == Some(vs[3])
            }
        }
    }

    fn apply_unchecked(&self, zxg: &mut ZXGraph, m: &Match) {
        let vs = m.vertices();
        match self {
            GraphRule::LocalComp => local_comp_unchecked(zxg, vs[0]),
            GraphRule::Pivot => pivot_unchecked(zxg, vs[0], vs[1]),
            GraphRule::PivotBoundary => pivot_boundary_unchecked(zxg, vs[0], vs[1]),
            GraphRule::PivotGadget => pivot_gadget_unchecked(zxg, vs[0], vs[1]),
            GraphRule::PivotBoundaryGadget => pivot_boundary_gadget_unchecked(zxg, vs[0], vs[1]),
            GraphRule::Identity => identity_unchecked(zxg, vs[0]),
            GraphRule::GadgetFusion => gadget_fusion_unchecked(zxg, vs[0], vs[1]),
        }
    }
}
