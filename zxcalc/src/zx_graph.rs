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

//! Graph-like ZX-diagrams.
//!
//! A [ZXGraph] only has Z spiders in its interior. Edges between Z spiders
//! are Hadamard edges of multiplicity one, and boundary spiders keep a single
//! edge of either kind. The graph remembers the [ZXDiagram] it was built from
//! as its `master`, so phase fusions found on the graph can be replayed on
//! the circuit.

use crate::diagram::ZXDiagram;
use crate::graph::*;
use crate::multigraph::Multigraph;
use crate::phase::Phase;
use num::Zero;
use rustc_hash::FxHashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct ZXGraph {
    mg: Multigraph,
    st: FxHashMap<V, SpiderType>,
    ps: FxHashMap<V, Phase>,
    layout: ZXLayout,
    inputs: Vec<V>,
    outputs: Vec<V>,
    phase_ids: FxHashMap<V, (V, i8)>,
    master: ZXDiagram,
}

impl ZXGraph {
    /// Converts a circuit-form diagram to graph-like form.
    ///
    /// Hadamard boxes become Hadamard edges, X spiders are colour-changed
    /// to Z, and Z spiders joined by plain edges are fused. Spider ids of the
    /// diagram are kept for the spiders that survive.
    pub fn from_diagram(zxd: &ZXDiagram) -> ZXGraph {
        let mut zxg = ZXGraph {
            mg: zxd.multigraph().clone(),
            st: FxHashMap::default(),
            ps: FxHashMap::default(),
            layout: zxd.layout().clone(),
            inputs: zxd.inputs().to_vec(),
            outputs: zxd.outputs().to_vec(),
            phase_ids: FxHashMap::default(),
            master: zxd.clone(),
        };
        for v in zxd.spiders() {
            let ty = zxd.spider_type(v);
            zxg.st.insert(v, ty);
            zxg.ps.insert(v, zxd.phase(v));
            if ty.is_phased() {
                zxg.phase_ids.insert(v, (v, 1));
            }
        }

        zxg.remove_hboxes();
        zxg.colour_change_x();
        zxg.fuse_plain_edges();
        zxg.reduce_hadamard_edges();
        zxg
    }

    /// Replaces every Hadamard box by edges and Z spiders.
    ///
    /// A box of degree two becomes a Hadamard edge. A box of degree one is
    /// the state Z(pi), and a box of degree zero is a non-zero scalar. A box
    /// of degree n > 2 is the diagonal map with a -1 on the all-ones input,
    /// written as one Z spider per wire plus a phase gadget of
    /// +-pi/2^(n-1) for every subset of wires, so its cost is exponential
    /// in n.
    fn remove_hboxes(&mut self) {
        let hs: Vec<V> = self
            .mg
            .vertices()
            .filter(|&v| self.st[&v] == SpiderType::H)
            .collect();
        for h in hs {
            let es: Vec<(V, EType)> = self
                .mg
                .incident_edges(h)
                .flat_map(|(w, et, m)| std::iter::repeat((w, et)).take(m))
                .collect();
            match es.len() {
                0 => self.rem_spider(h),
                1 => {
                    self.st.insert(h, SpiderType::Z);
                    self.set_phase(h, Phase::pi());
                }
                2 => {
                    let et = EType::merge(es[0].1, es[1].1).opposite();
                    let (a, b) = (es[0].0, es[1].0);
                    self.rem_spider(h);
                    if a == b {
                        if et == EType::H {
                            self.add_to_phase(a, Phase::pi());
                        }
                    } else {
                        self.mg.add_edge(a, b, et);
                    }
                }
                _ => self.expand_hbox(h, &es),
            }
        }
    }

    fn expand_hbox(&mut self, h: V, es: &[(V, EType)]) {
        let (qubit, column) = (self.qubit_loc(h), self.column_loc(h));
        self.rem_spider(h);
        let legs: Vec<V> = es
            .iter()
            .map(|&(w, et)| {
                let z = self.add_spider(Phase::zero(), qubit, column);
                self.mg.add_edge(z, w, et);
                z
            })
            .collect();

        let n = legs.len();
        let denom = 1i64 << (n - 1);
        for subset in 1usize..(1 << n) {
            let sign = if subset.count_ones() % 2 == 1 { 1 } else { -1 };
            let phase = Phase::from((sign, denom));
            let members: Vec<V> = (0..n)
                .filter(|&i| subset & (1 << i) != 0)
                .map(|i| legs[i])
                .collect();
            if let [z] = members.as_slice() {
                self.add_to_phase(*z, phase);
            } else {
                let axle = self.add_spider(Phase::zero(), qubit, column);
                let leaf = self.add_spider(phase, qubit, column);
                self.mg.add_edge(axle, leaf, EType::H);
                for z in members {
                    self.mg.add_edge(z, axle, EType::H);
                }
            }
        }
    }

    fn colour_change_x(&mut self) {
        for v in self.mg.vertices().collect::<Vec<_>>() {
            if self.st[&v] != SpiderType::X {
                continue;
            }
            self.st.insert(v, SpiderType::Z);
            let es: Vec<(V, EType, usize)> = self.mg.incident_edges(v).collect();
            for &(w, et, m) in &es {
                self.mg.rem_edge_mul(v, w, et, m);
            }
            for &(w, et, m) in &es {
                self.mg.add_edge_mul(v, w, et.opposite(), m);
            }
        }
    }

    /// Fuses every plain edge between Z spiders into the lower id.
    fn fuse_plain_edges(&mut self) {
        for v in self.mg.vertices().collect::<Vec<_>>() {
            if !self.mg.contains_vertex(v) || self.st[&v] != SpiderType::Z {
                continue;
            }
            loop {
                let next = self
                    .mg
                    .incident_edges(v)
                    .find(|&(w, et, _)| et == EType::N && self.st[&w] == SpiderType::Z);
                let Some((w, _, _)) = next else {
                    break;
                };
                let p = self.phase(w);
                self.add_to_phase(v, p);
                for (x, et, m) in self.mg.incident_edges(w).collect::<Vec<_>>() {
                    if x != v {
                        self.mg.add_edge_mul(v, x, et, m);
                    } else if et == EType::H && m % 2 == 1 {
                        self.add_to_phase(v, Phase::pi());
                    }
                }
                self.merge_phase_ids(v, w);
                self.rem_spider(w);
            }
        }
    }

    /// Parallel Hadamard edges between Z spiders cancel in pairs.
    fn reduce_hadamard_edges(&mut self) {
        let es: Vec<(V, V, EType, usize)> = self.mg.edges().collect();
        for (s, t, et, m) in es {
            if et == EType::H && m > 1 {
                self.mg.rem_edge_mul(s, t, et, m - m % 2);
            }
        }
    }

    pub fn master(&self) -> &ZXDiagram {
        &self.master
    }

    /// Gives up the graph, returning the circuit it was built from along
    /// with any phase fusions replayed on it.
    pub fn into_master(self) -> ZXDiagram {
        self.master
    }

    /// Maps each tracked spider to a spider of the master circuit and the
    /// sign its phase is carried with.
    pub fn phase_ids(&self) -> &FxHashMap<V, (V, i8)> {
        &self.phase_ids
    }

    /// Moves the phase tracking of `rem` onto `keep` after their phases
    /// were added together.
    ///
    /// If both are tracked, the master phase of `rem` is fused into the one
    /// of `keep`. If only `rem` is tracked, `keep` takes over its entry.
    pub(crate) fn merge_phase_ids(&mut self, keep: V, rem: V) {
        let Some((mr, sr)) = self.phase_ids.remove(&rem) else {
            return;
        };
        match self.phase_ids.get(&keep) {
            Some(&(mk, sk)) if mk != mr => self.master.fuse_phase_into(mr, mk, sk * sr),
            Some(_) => {}
            None => {
                self.phase_ids.insert(keep, (mr, sr));
            }
        }
    }

    /// Moves the phase tracking of `from` onto the fresh spider `to`.
    pub(crate) fn move_phase_id(&mut self, from: V, to: V) {
        if let Some(e) = self.phase_ids.remove(&from) {
            self.phase_ids.insert(to, e);
        }
    }

    /// Negates the phase of `v`, flipping the sign it is tracked with.
    pub(crate) fn negate_phase(&mut self, v: V) {
        let p = -self.phase(v);
        self.set_phase(v, p);
        if let Some(e) = self.phase_ids.get_mut(&v) {
            e.1 = -e.1;
        }
    }

    /// Adds an unconnected Z spider at the given location.
    pub fn add_spider(
        &mut self,
        phase: impl Into<Phase>,
        qubit: Option<usize>,
        column: Option<f64>,
    ) -> V {
        let v = self.mg.add_vertex();
        self.st.insert(v, SpiderType::Z);
        self.ps.insert(v, phase.into());
        self.layout.set_loc(v, qubit, column);
        v
    }

    pub fn rem_spider(&mut self, v: V) {
        self.mg.remove_vertex(v);
        self.st.remove(&v);
        self.ps.remove(&v);
        self.phase_ids.remove(&v);
        self.layout.remove(v);
    }

    pub fn rem_spiders(&mut self, vs: &[V]) {
        for &v in vs {
            self.rem_spider(v);
        }
    }

    pub fn set_phase(&mut self, v: V, phase: impl Into<Phase>) {
        self.ps.insert(v, phase.into());
    }

    pub fn add_to_phase(&mut self, v: V, phase: impl Into<Phase>) {
        let p = self.phase(v) + phase.into();
        self.set_phase(v, p);
    }

    pub fn is_boundary(&self, v: V) -> bool {
        self.spider_type(v).is_boundary()
    }

    pub fn connected(&self, s: V, t: V) -> bool {
        self.mg.connected(s, t)
    }

    /// Number of edges between two spiders, of either type.
    pub fn edge_mul(&self, s: V, t: V) -> usize {
        self.mg.total_mul(s, t)
    }

    pub fn edge_type(&self, s: V, t: V) -> Option<EType> {
        self.mg.edge_type(s, t)
    }

    pub fn add_edge(&mut self, s: V, t: V, et: EType) {
        self.mg.add_edge(s, t, et);
    }

    pub fn remove_edge(&mut self, s: V, t: V) {
        self.mg.remove_edges(s, t);
    }

    pub fn set_edge_type(&mut self, s: V, t: V, et: EType) {
        self.mg.set_edge_type(s, t, et);
    }

    /// Adds an edge, simplifying parallel edges and self-loops away.
    ///
    /// A Hadamard self-loop adds pi to the spider and a plain one vanishes.
    /// Between two Z spiders a second Hadamard edge cancels the first.
    ///
    /// # Panics
    ///
    /// Panics when doubling an edge at a boundary.
    pub fn add_edge_smart(&mut self, s: V, t: V, et: EType) {
        if s == t {
            if et == EType::H {
                self.add_to_phase(s, Phase::pi());
            }
            return;
        }
        let Some(et0) = self.mg.edge_type(s, t) else {
            self.mg.add_edge(s, t, et);
            return;
        };
        if self.is_boundary(s) || self.is_boundary(t) {
            panic!("Parallel edges at a boundary ({} -- {})", s, t);
        }
        match (et0, et) {
            (EType::N, EType::N) => {}
            (EType::H, EType::H) => {
                self.mg.remove_edges(s, t);
            }
            (EType::H, EType::N) => {
                self.mg.set_edge_type(s, t, EType::N);
                self.add_to_phase(s, Phase::pi());
            }
            (EType::N, EType::H) => {
                self.add_to_phase(s, Phase::pi());
            }
        }
    }

    /// Distinct neighbours with the type of the edge to them.
    pub fn incident_edges(&self, v: V) -> Vec<(V, EType)> {
        let mut es: Vec<(V, EType)> = self.mg.incident_edges(v).map(|(w, et, _)| (w, et)).collect();
        es.sort_unstable();
        es
    }

    /// Distinct neighbours in ascending order.
    pub fn neighbor_set(&self, v: V) -> Vec<V> {
        self.mg.neighbor_set(v)
    }

    pub fn boundary_neighbors(&self, v: V) -> Vec<V> {
        self.neighbor_set(v)
            .into_iter()
            .filter(|&w| self.is_boundary(w))
            .collect()
    }

    /// A Z spider with at most one edge to a boundary.
    pub fn is_interior(&self, v: V) -> bool {
        self.spider_type(v) == SpiderType::Z
            && self
                .mg
                .incident_edges(v)
                .filter(|&(w, _, _)| self.is_boundary(w))
                .map(|(_, _, m)| m)
                .sum::<usize>()
                <= 1
    }

    /// An interior spider away from the boundary that isn't part of a phase
    /// gadget.
    ///
    /// None of its neighbours are boundaries or degree-1 leaves, and all of
    /// its edges are Hadamard edges to other Z spiders.
    pub fn is_inner(&self, v: V) -> bool {
        self.spider_type(v) == SpiderType::Z
            && self.mg.degree(v) > 1
            && self.mg.incident_edges(v).all(|(w, et, m)| {
                m == 1
                    && et == EType::H
                    && self.spider_type(w) == SpiderType::Z
                    && self.mg.degree(w) > 1
            })
    }

    /// A degree-1 Z spider hanging off a Z spider by a Hadamard edge.
    pub fn is_leaf(&self, v: V) -> bool {
        self.spider_type(v) == SpiderType::Z
            && self.mg.degree(v) == 1
            && self
                .mg
                .incident_edges(v)
                .all(|(w, et, _)| et == EType::H && self.spider_type(w) == SpiderType::Z)
    }

    pub fn set_loc(&mut self, v: V, qubit: Option<usize>, column: Option<f64>) {
        self.layout.set_loc(v, qubit, column);
    }
}

impl From<&ZXDiagram> for ZXGraph {
    fn from(zxd: &ZXDiagram) -> ZXGraph {
        ZXGraph::from_diagram(zxd)
    }
}

impl ZXLike for ZXGraph {
    fn spiders(&self) -> Vec<V> {
        self.mg.vertices().collect()
    }

    fn spider_type(&self, v: V) -> SpiderType {
        *self
            .st
            .get(&v)
            .unwrap_or_else(|| panic!("Spider not found: {}", v))
    }

    fn phase(&self, v: V) -> Phase {
        self.ps.get(&v).copied().unwrap_or_else(Phase::zero)
    }

    fn neighbors(&self, v: V) -> Vec<V> {
        self.mg.neighbors(v).collect()
    }

    fn degree(&self, v: V) -> usize {
        self.mg.degree(v)
    }

    fn contains_spider(&self, v: V) -> bool {
        self.mg.contains_vertex(v)
    }

    fn num_vertices(&self) -> usize {
        self.mg.num_vertices()
    }

    fn num_edges(&self) -> usize {
        self.mg.num_edges()
    }

    fn layout(&self) -> &ZXLayout {
        &self.layout
    }

    fn inputs(&self) -> &[V] {
        &self.inputs
    }

    fn outputs(&self) -> &[V] {
        &self.outputs
    }
}

impl fmt::Display for ZXGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "ZX-graph with {} spiders and {} edges:",
            self.num_vertices(),
            self.num_edges()
        )?;
        for v in self.mg.vertices() {
            let ty = self.spider_type(v);
            write!(f, "  S_{}: {}", v, ty)?;
            if ty.is_phased() {
                write!(f, "({}*pi)", self.phase(v))?;
            }
            let es: Vec<String> = self
                .incident_edges(v)
                .into_iter()
                .map(|(w, et)| match et {
                    EType::N => format!("{}", w),
                    EType::H => format!("{}h", w),
                })
                .collect();
            writeln!(f, " -> [{}]", es.join(", "))?;
        }
        Ok(())
    }
}
