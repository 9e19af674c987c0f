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

//! Circuit-form ZX-diagrams.
//!
//! A [ZXDiagram] is built by pushing gates onto the ends of its qubit wires.
//! Every edge is a plain wire; Hadamards are explicit [SpiderType::H] boxes.

use crate::circuit::Circuit;
use crate::error::ZXError;
use crate::gate::*;
use crate::graph::*;
use crate::multigraph::Multigraph;
use crate::phase::{Angle, Phase};
use num::Zero;
use rustc_hash::FxHashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct ZXDiagram {
    mg: Multigraph,
    st: FxHashMap<V, SpiderType>,
    ps: FxHashMap<V, Phase>,
    layout: ZXLayout,
    inputs: Vec<V>,
    outputs: Vec<V>,
    phase_ids: FxHashMap<V, (V, i8)>,
}

/// Which end of the circuit a gate is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum End {
    Front,
    Back,
}

impl ZXDiagram {
    /// The identity circuit on `nqubits` qubits.
    ///
    /// Qubit `q` gets input spider `2q` and output spider `2q + 1`.
    pub fn new(nqubits: usize) -> ZXDiagram {
        let mut zxd = ZXDiagram {
            mg: Multigraph::new(),
            st: FxHashMap::default(),
            ps: FxHashMap::default(),
            layout: ZXLayout::new(nqubits),
            inputs: Vec::with_capacity(nqubits),
            outputs: Vec::with_capacity(nqubits),
            phase_ids: FxHashMap::default(),
        };
        for q in 0..nqubits {
            let i = zxd.add_spider(SpiderType::In, Phase::zero(), &[]);
            let o = zxd.add_spider(SpiderType::Out, Phase::zero(), &[i]);
            zxd.layout.set_loc(i, Some(q), None);
            zxd.layout.set_loc(o, Some(q), None);
            zxd.inputs.push(i);
            zxd.outputs.push(o);
        }
        zxd
    }

    /// Builds a diagram from raw storage.
    ///
    /// Inputs and outputs are the [SpiderType::In] and [SpiderType::Out]
    /// spiders in ascending id order, and the n-th of each sits on qubit n.
    /// A Hadamard box must have exactly two wires, otherwise this is a
    /// [ZXError::InvalidHBox].
    ///
    /// # Panics
    ///
    /// Panics if a vertex of `mg` has no entry in `kinds`.
    pub fn from_parts(
        mg: Multigraph,
        kinds: FxHashMap<V, SpiderType>,
        phases: FxHashMap<V, Phase>,
    ) -> Result<ZXDiagram, ZXError> {
        let mut st = FxHashMap::default();
        let mut ps = FxHashMap::default();
        let mut phase_ids = FxHashMap::default();
        let mut inputs = Vec::new();
        let mut outputs = Vec::new();
        for v in mg.vertices() {
            let ty = *kinds
                .get(&v)
                .unwrap_or_else(|| panic!("No spider type given for vertex {}", v));
            match ty {
                SpiderType::In => inputs.push(v),
                SpiderType::Out => outputs.push(v),
                SpiderType::H if mg.degree(v) != 2 => {
                    return Err(ZXError::InvalidHBox {
                        spider: v,
                        degree: mg.degree(v),
                    });
                }
                _ => {}
            }
            if ty.is_phased() {
                ps.insert(v, phases.get(&v).copied().unwrap_or_else(Phase::zero));
                phase_ids.insert(v, (v, 1));
            } else {
                ps.insert(v, Phase::zero());
            }
            st.insert(v, ty);
        }

        let mut layout = ZXLayout::new(inputs.len());
        for (q, &v) in inputs.iter().enumerate() {
            layout.set_loc(v, Some(q), None);
        }
        for (q, &v) in outputs.iter().enumerate() {
            layout.set_loc(v, Some(q), None);
        }

        Ok(ZXDiagram {
            mg,
            st,
            ps,
            layout,
            inputs,
            outputs,
            phase_ids,
        })
    }

    /// Builds the diagram of a whole gate stream.
    pub fn from_circuit(c: &Circuit) -> Result<ZXDiagram, ZXError> {
        let mut zxd = ZXDiagram::new(c.num_qubits());
        for g in &c.gates {
            zxd.push(g)?;
        }
        Ok(zxd)
    }

    pub fn nqubits(&self) -> usize {
        self.layout.nbits()
    }

    pub fn multigraph(&self) -> &Multigraph {
        &self.mg
    }

    /// Maps each Z or X spider to the spider whose phase it carries, and the
    /// sign it carries it with. Only phase teleportation changes this.
    pub fn phase_ids(&self) -> &FxHashMap<V, (V, i8)> {
        &self.phase_ids
    }

    /// Moves the phase of spider `from` onto spider `to`, multiplied by
    /// `sign`, and records the fusion in [ZXDiagram::phase_ids].
    pub(crate) fn fuse_phase_into(&mut self, from: V, to: V, sign: i8) {
        let p = self.phase(from) * i64::from(sign);
        self.add_to_phase(to, p);
        self.set_phase(from, Phase::zero());
        for e in self.phase_ids.values_mut() {
            if e.0 == from {
                *e = (to, e.1 * sign);
            }
        }
        self.phase_ids.insert(from, (to, sign));
    }

    pub fn set_phase(&mut self, v: V, phase: impl Into<Phase>) {
        self.ps.insert(v, phase.into());
    }

    pub fn add_to_phase(&mut self, v: V, phase: impl Into<Phase>) {
        let p = self.phase(v) + phase.into();
        self.set_phase(v, p);
    }

    pub fn set_spider_type(&mut self, v: V, ty: SpiderType) {
        if ty.is_phased() {
            self.phase_ids.entry(v).or_insert((v, 1));
        } else {
            self.ps.insert(v, Phase::zero());
            self.phase_ids.remove(&v);
        }
        self.st.insert(v, ty);
    }

    pub fn set_loc(&mut self, v: V, qubit: Option<usize>, column: Option<f64>) {
        self.layout.set_loc(v, qubit, column);
    }

    /// Number of wires between `s` and `t`.
    pub fn edge_mul(&self, s: V, t: V) -> usize {
        self.mg.mul(s, t, EType::N)
    }

    pub fn connected(&self, s: V, t: V) -> bool {
        self.mg.connected(s, t)
    }

    pub fn add_edge(&mut self, s: V, t: V) {
        self.mg.add_edge(s, t, EType::N);
    }

    /// Removes up to `m` wires between `s` and `t`.
    pub fn rem_edge(&mut self, s: V, t: V, m: usize) -> usize {
        self.mg.rem_edge_mul(s, t, EType::N, m)
    }

    /// Distinct neighbours in ascending order.
    pub fn neighbor_set(&self, v: V) -> Vec<V> {
        self.mg.neighbor_set(v)
    }

    /// Adds a spider wired once to each spider in `connect`.
    pub fn add_spider(&mut self, ty: SpiderType, phase: impl Into<Phase>, connect: &[V]) -> V {
        let v = self.mg.add_vertex();
        self.st.insert(v, ty);
        if ty.is_phased() {
            self.ps.insert(v, phase.into());
            self.phase_ids.insert(v, (v, 1));
        } else {
            self.ps.insert(v, Phase::zero());
        }
        for &w in connect {
            self.mg.add_edge(v, w, EType::N);
        }
        v
    }

    /// Splits every wire between `v1` and `v2` with a new spider.
    ///
    /// The new spiders sit between the two endpoints in the layout.
    pub fn insert_spider(
        &mut self,
        v1: V,
        v2: V,
        ty: SpiderType,
        phase: impl Into<Phase>,
    ) -> Vec<V> {
        let phase = phase.into();
        let m = self.mg.remove_edge(v1, v2, EType::N);
        let qubit = self.qubit_loc(v1).or(self.qubit_loc(v2));
        let column = match (self.column_loc(v1), self.column_loc(v2)) {
            (Some(c1), Some(c2)) => Some((c1 + c2) / 2.0),
            (c1, c2) => c1.or(c2),
        };

        let mut vs = Vec::with_capacity(m);
        for _ in 0..m {
            let v = self.add_spider(ty, phase, &[v1, v2]);
            self.layout.set_loc(v, qubit, column);
            vs.push(v);
        }
        vs
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

    /// Appends a gate, converting floating-point phases.
    pub fn push_gate(
        &mut self,
        t: GType,
        locs: &[usize],
        phase: impl Into<Angle>,
    ) -> Result<(), ZXError> {
        self.push_gate_with_options(t, locs, phase, true)
    }

    /// Prepends a gate, converting floating-point phases.
    pub fn pushfirst_gate(
        &mut self,
        t: GType,
        locs: &[usize],
        phase: impl Into<Angle>,
    ) -> Result<(), ZXError> {
        self.pushfirst_gate_with_options(t, locs, phase, true)
    }

    /// Appends a gate to the output end of the given wires.
    ///
    /// With `autoconvert` off, a floating-point phase is an
    /// [ZXError::InvalidPhase], and `locs` without one entry per qubit of
    /// `t` is a [ZXError::InvalidArity]. On error the diagram is unchanged.
    pub fn push_gate_with_options(
        &mut self,
        t: GType,
        locs: &[usize],
        phase: impl Into<Angle>,
        autoconvert: bool,
    ) -> Result<(), ZXError> {
        self.attach_gate(End::Back, t, locs, phase.into(), autoconvert)
    }

    /// Prepends a gate to the input end of the given wires.
    pub fn pushfirst_gate_with_options(
        &mut self,
        t: GType,
        locs: &[usize],
        phase: impl Into<Angle>,
        autoconvert: bool,
    ) -> Result<(), ZXError> {
        self.attach_gate(End::Front, t, locs, phase.into(), autoconvert)
    }

    pub fn push(&mut self, g: &Gate) -> Result<(), ZXError> {
        self.push_gate(g.t, &g.qs, g.phase)
    }

    pub fn pushfirst(&mut self, g: &Gate) -> Result<(), ZXError> {
        self.pushfirst_gate(g.t, &g.qs, g.phase)
    }

    fn check_locs(&self, t: GType, locs: &[usize]) -> Result<(), ZXError> {
        if locs.len() != t.num_qubits() {
            return Err(ZXError::InvalidArity {
                gate: t.name(),
                expected: t.num_qubits(),
                got: locs.len(),
            });
        }
        let nqubits = self.nqubits();
        for (i, &q) in locs.iter().enumerate() {
            if q >= nqubits || locs[..i].contains(&q) {
                return Err(ZXError::InvalidLocation { qubit: q, nqubits });
            }
        }
        for &q in locs {
            let b = self.boundary(End::Back, q);
            let b1 = self.boundary(End::Front, q);
            if self.mg.degree(b) != 1 || self.mg.degree(b1) != 1 {
                return Err(ZXError::NotCircuitLike(b));
            }
        }
        Ok(())
    }

    fn boundary(&self, end: End, q: usize) -> V {
        match end {
            End::Front => self.inputs[q],
            End::Back => self.outputs[q],
        }
    }

    fn fresh_column(&self, end: End) -> f64 {
        match end {
            End::Front => self.layout.prev_column(),
            End::Back => self.layout.next_column(),
        }
    }

    /// Splits the wire at the given end of qubit `q` with a new spider.
    fn splice(&mut self, end: End, q: usize, ty: SpiderType, phase: Phase, column: f64) -> V {
        let b = self.boundary(end, q);
        let w = self
            .mg
            .neighbors(b)
            .next()
            .unwrap_or_else(|| panic!("Boundary {} is disconnected", b));
        self.mg.rem_edge_mul(b, w, EType::N, 1);
        let v = self.add_spider(ty, phase, &[w, b]);
        self.layout.set_loc(v, Some(q), Some(column));
        v
    }

    fn attach_gate(
        &mut self,
        end: End,
        t: GType,
        locs: &[usize],
        phase: Angle,
        autoconvert: bool,
    ) -> Result<(), ZXError> {
        self.check_locs(t, locs)?;
        let phase = if t.has_phase() {
            phase.to_phase(autoconvert)?
        } else {
            Phase::zero()
        };

        let col = self.fresh_column(end);
        match t {
            ZPhase => {
                self.splice(end, locs[0], SpiderType::Z, phase, col);
            }
            XPhase => {
                self.splice(end, locs[0], SpiderType::X, phase, col);
            }
            HAD => {
                self.splice(end, locs[0], SpiderType::H, phase, col);
            }
            CNOT => {
                let c = self.splice(end, locs[0], SpiderType::Z, phase, col);
                let t = self.splice(end, locs[1], SpiderType::X, phase, col);
                self.mg.add_edge(c, t, EType::N);
            }
            CZ => {
                let a = self.splice(end, locs[0], SpiderType::Z, phase, col);
                let b = self.splice(end, locs[1], SpiderType::Z, phase, col);
                let h = self.add_spider(SpiderType::H, Phase::zero(), &[a, b]);
                self.layout.set_loc(h, None, Some(col));
            }
            SWAP => {
                let (ba, bb) = (self.boundary(end, locs[0]), self.boundary(end, locs[1]));
                let wa = self.mg.neighbors(ba).next().unwrap_or(ba);
                let wb = self.mg.neighbors(bb).next().unwrap_or(bb);
                self.mg.rem_edge_mul(ba, wa, EType::N, 1);
                self.mg.rem_edge_mul(bb, wb, EType::N, 1);
                self.mg.add_edge(ba, wb, EType::N);
                self.mg.add_edge(bb, wa, EType::N);
            }
        }
        Ok(())
    }

    /// Reads a circuit-form diagram back as a gate stream.
    ///
    /// Spiders are visited in column order. Gates are placed on the wire
    /// they are found on, counted from the inputs, and any permutation of
    /// the wires left at the outputs becomes trailing SWAPs.
    pub fn to_circuit(&self) -> Result<Circuit, ZXError> {
        let n = self.nqubits();
        let mut c = Circuit::new(n);

        // last spider seen on each wire
        let mut front: FxHashMap<V, usize> =
            self.inputs.iter().enumerate().map(|(q, &i)| (i, q)).collect();

        let mut interior = Vec::new();
        for v in self.mg.vertices() {
            if self.spider_type(v).is_boundary() {
                continue;
            }
            let col = self.column_loc(v).ok_or(ZXError::NotCircuitLike(v))?;
            interior.push((col, v));
        }
        interior.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        let mut done = rustc_hash::FxHashSet::default();
        for &(col, v) in &interior {
            if done.contains(&v) {
                continue;
            }

            let (q, u) = self.wire_predecessor(v, &front)?;
            match self.mg.degree(v) {
                2 => {
                    match self.spider_type(v) {
                        SpiderType::H => c.push(Gate::new(HAD, vec![q])),
                        _ => self.push_phase_gate(&mut c, v, q),
                    }
                    front.remove(&u);
                    front.insert(v, q);
                    done.insert(v);
                }
                3 => {
                    let partner = self
                        .mg
                        .neighbor_set(v)
                        .into_iter()
                        .filter(|&w| {
                            w != u && self.column_loc(w) == Some(col) && !done.contains(&w)
                        })
                        .exactly_one_or(v)?;
                    let (gate, vs) = self.two_qubit_gate(v, partner)?;
                    let preds = vs
                        .iter()
                        .map(|&w| self.wire_predecessor(w, &front))
                        .collect::<Result<Vec<_>, _>>()?;
                    let mut qs = Vec::with_capacity(2);
                    for (&w, &(qw, uw)) in vs.iter().zip(&preds) {
                        front.remove(&uw);
                        front.insert(w, qw);
                        qs.push(qw);
                    }
                    c.push(Gate::new(gate, qs.clone()));
                    for (&w, &qw) in vs.iter().zip(&qs) {
                        self.push_phase_gate(&mut c, w, qw);
                        done.insert(w);
                    }
                    done.insert(partner);
                }
                _ => return Err(ZXError::NotCircuitLike(v)),
            }
        }

        // wire arriving at each output
        let mut perm = Vec::with_capacity(n);
        for &o in &self.outputs {
            let w = self.mg.neighbors(o).next().ok_or(ZXError::NotCircuitLike(o))?;
            let q = *front.get(&w).ok_or(ZXError::NotCircuitLike(o))?;
            perm.push(q);
        }

        let mut at: Vec<usize> = (0..n).collect();
        for j in 0..n {
            let k = at
                .iter()
                .position(|&q| q == perm[j])
                .ok_or(ZXError::NotCircuitLike(self.outputs[j]))?;
            if k != j {
                c.push(Gate::new(SWAP, vec![j, k]));
                at.swap(j, k);
            }
        }

        Ok(c)
    }

    /// The wire (and its last spider) that `v` continues.
    fn wire_predecessor(&self, v: V, front: &FxHashMap<V, usize>) -> Result<(usize, V), ZXError> {
        self.mg
            .neighbor_set(v)
            .into_iter()
            .filter_map(|u| front.get(&u).map(|&q| (q, u)))
            .exactly_one_or(v)
    }

    /// The gate type and the wire spiders of the two-qubit gate `v` is part of.
    fn two_qubit_gate(&self, v: V, partner: V) -> Result<(GType, Vec<V>), ZXError> {
        let err = ZXError::NotCircuitLike(v);
        match (self.spider_type(v), self.spider_type(partner)) {
            (SpiderType::Z, SpiderType::X) => Ok((CNOT, vec![v, partner])),
            (SpiderType::X, SpiderType::Z) => Ok((CNOT, vec![partner, v])),
            (SpiderType::Z, SpiderType::H) if self.mg.degree(partner) == 2 => {
                let other = self
                    .mg
                    .neighbors(partner)
                    .find(|&w| w != v)
                    .ok_or(err.clone())?;
                if self.spider_type(other) == SpiderType::Z && self.mg.degree(other) == 3 {
                    Ok((CZ, vec![v, other]))
                } else {
                    Err(err)
                }
            }
            _ => Err(err),
        }
    }

    fn push_phase_gate(&self, c: &mut Circuit, v: V, q: usize) {
        let p = self.phase(v);
        if p.is_zero() {
            return;
        }
        match self.spider_type(v) {
            SpiderType::Z => c.push(Gate::new_with_phase(ZPhase, vec![q], p)),
            SpiderType::X => c.push(Gate::new_with_phase(XPhase, vec![q], p)),
            _ => {}
        }
    }
}

/// Exactly one element, or a [ZXError::NotCircuitLike] at the given spider.
trait ExactlyOneOr: Iterator + Sized {
    fn exactly_one_or(self, v: V) -> Result<Self::Item, ZXError> {
        itertools::Itertools::exactly_one(self).map_err(|_| ZXError::NotCircuitLike(v))
    }
}

impl<I: Iterator> ExactlyOneOr for I {}

impl ZXLike for ZXDiagram {
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

impl fmt::Display for ZXDiagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "ZX-diagram with {} spiders and {} edges:",
            self.num_vertices(),
            self.num_edges()
        )?;
        for v in self.mg.vertices() {
            let ty = self.spider_type(v);
            write!(f, "  S_{}: {}", v, ty)?;
            if ty.is_phased() {
                write!(f, "({}*pi)", self.phase(v))?;
            }
            writeln!(f, " -> {:?}", self.neighbors(v))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn zxd3() -> ZXDiagram {
        ZXDiagram::new(3)
    }

    #[rstest]
    fn empty_circuit(zxd3: ZXDiagram) {
        assert_eq!(zxd3.num_vertices(), 6);
        assert_eq!(zxd3.num_edges(), 3);
        assert_eq!(zxd3.inputs(), &[0, 2, 4]);
        assert_eq!(zxd3.outputs(), &[1, 3, 5]);
        for q in 0..3 {
            assert_eq!(zxd3.neighbors(2 * q), vec![2 * q + 1]);
        }
        assert_eq!(zxd3.tcount(), 0);
    }

    #[rstest]
    fn display(mut zxd3: ZXDiagram) {
        zxd3.push_gate(ZPhase, &[1], (1, 4)).unwrap();
        assert!(zxd3.ne(&ZXDiagram::new(3)));
        let s = zxd3.to_string();
        assert!(s.starts_with("ZX-diagram with 7 spiders and 4 edges:\n"));
        assert!(s.contains("  S_6: Z(1/4*pi) -> [2, 3]\n"));
    }

    #[rstest]
    fn push_cnot(mut zxd3: ZXDiagram) {
        zxd3.push_gate(CNOT, &[2, 1], 0).unwrap();
        assert_eq!(zxd3.num_vertices(), 8);
        assert_eq!(zxd3.num_edges(), 6);
        let (c, t) = (6, 7);
        assert_eq!(zxd3.spider_type(c), SpiderType::Z);
        assert_eq!(zxd3.spider_type(t), SpiderType::X);
        assert!(zxd3.connected(c, t));
        assert!(zxd3.connected(c, 5));
        assert!(zxd3.connected(t, 3));
        assert_eq!(zxd3.column_loc(c), zxd3.column_loc(t));
        assert_eq!(zxd3.qubit_loc(c), Some(2));
    }

    #[rstest]
    fn push_and_pushfirst(mut zxd3: ZXDiagram) {
        zxd3.push_gate(ZPhase, &[0], (1, 4)).unwrap();
        zxd3.pushfirst_gate(HAD, &[0], 0).unwrap();
        let z = 6;
        let h = 7;
        assert!(zxd3.connected(0, h));
        assert!(zxd3.connected(h, z));
        assert!(zxd3.connected(z, 1));
        assert!(zxd3.column_loc(h) < zxd3.column_loc(z));
        assert_eq!(zxd3.tcount(), 1);
    }

    #[rstest]
    fn invalid_location(mut zxd3: ZXDiagram) {
        let before = zxd3.clone();
        assert_eq!(
            zxd3.push_gate(ZPhase, &[3], (1, 2)),
            Err(ZXError::InvalidLocation { qubit: 3, nqubits: 3 })
        );
        assert_eq!(
            zxd3.push_gate(CNOT, &[1, 1], 0),
            Err(ZXError::InvalidLocation { qubit: 1, nqubits: 3 })
        );
        assert_eq!(zxd3, before);
    }

    #[rstest]
    fn wrong_arity(mut zxd3: ZXDiagram) {
        let before = zxd3.clone();
        assert_eq!(
            zxd3.push_gate(CNOT, &[0], 0),
            Err(ZXError::InvalidArity { gate: "cx", expected: 2, got: 1 })
        );
        assert_eq!(
            zxd3.pushfirst_gate(HAD, &[0, 1], 0),
            Err(ZXError::InvalidArity { gate: "h", expected: 1, got: 2 })
        );
        assert_eq!(zxd3, before);
    }

    #[rstest]
    fn autoconvert(mut zxd3: ZXDiagram) {
        let before = zxd3.clone();
        assert_eq!(
            zxd3.push_gate_with_options(ZPhase, &[0], 0.25, false),
            Err(ZXError::InvalidPhase(0.25))
        );
        assert_eq!(zxd3, before);

        zxd3.push_gate(ZPhase, &[0], 0.25).unwrap();
        assert_eq!(zxd3.phase(6), Phase::from((1, 4)));
    }

    #[rstest]
    fn insert_spider_per_wire(mut zxd3: ZXDiagram) {
        zxd3.add_edge(0, 1);
        let vs = zxd3.insert_spider(0, 1, SpiderType::Z, (1, 2));
        assert_eq!(vs.len(), 2);
        assert!(!zxd3.connected(0, 1));
        for v in vs {
            assert_eq!(zxd3.neighbors(v), vec![0, 1]);
            assert_eq!(zxd3.phase(v), Phase::from((1, 2)));
        }
        assert_eq!(zxd3.degree(0), 2);
    }

    #[rstest]
    fn rem_spiders(mut zxd3: ZXDiagram) {
        zxd3.push_gate(CZ, &[0, 1], 0).unwrap();
        assert_eq!(zxd3.num_vertices(), 9);
        zxd3.rem_spiders(&[6, 7, 8]);
        assert_eq!(zxd3.num_vertices(), 6);
        assert_eq!(zxd3.num_edges(), 1);
        assert!(!zxd3.contains_spider(8));
    }

    #[test]
    fn from_parts_finds_boundaries() {
        let mut mg = Multigraph::with_vertices(3);
        mg.add_edge(0, 2, EType::N);
        mg.add_edge(2, 1, EType::N);
        let kinds = FxHashMap::from_iter([
            (0, SpiderType::In),
            (1, SpiderType::Out),
            (2, SpiderType::X),
        ]);
        let phases = FxHashMap::from_iter([(2, Phase::pi())]);
        let zxd = ZXDiagram::from_parts(mg, kinds, phases).unwrap();
        assert_eq!(zxd.inputs(), &[0]);
        assert_eq!(zxd.outputs(), &[1]);
        assert_eq!(zxd.phase(2), Phase::pi());
        assert_eq!(zxd.phase_ids()[&2], (2, 1));
    }

    #[test]
    fn from_parts_rejects_dangling_hbox() {
        let mut mg = Multigraph::with_vertices(4);
        mg.add_edge(0, 2, EType::N);
        mg.add_edge(2, 1, EType::N);
        mg.add_edge(2, 3, EType::N);
        let kinds = FxHashMap::from_iter([
            (0, SpiderType::In),
            (1, SpiderType::Out),
            (2, SpiderType::H),
            (3, SpiderType::Z),
        ]);
        let res = ZXDiagram::from_parts(mg, kinds, FxHashMap::default());
        assert_eq!(res.err(), Some(ZXError::InvalidHBox { spider: 2, degree: 3 }));
    }

    #[test]
    fn read_back() {
        let mut c = Circuit::new(3);
        c.push(Gate::new(HAD, vec![0]));
        c.push(Gate::new(CNOT, vec![0, 1]));
        c.push(Gate::new_with_phase(ZPhase, vec![1], (1, 4)));
        c.push(Gate::new(CZ, vec![1, 2]));
        c.push(Gate::new(SWAP, vec![0, 2]));
        c.push(Gate::new_with_phase(XPhase, vec![0], (1, 2)));

        let zxd = ZXDiagram::from_circuit(&c).unwrap();
        let c1 = zxd.to_circuit().unwrap();

        let expected = vec![
            Gate::new(HAD, vec![0]),
            Gate::new(CNOT, vec![0, 1]),
            Gate::new_with_phase(ZPhase, vec![1], (1, 4)),
            Gate::new(CZ, vec![1, 2]),
            Gate::new_with_phase(XPhase, vec![2], (1, 2)),
            Gate::new(SWAP, vec![0, 2]),
        ];
        assert_eq!(c1.gates.into_iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn read_back_pushfirst() {
        let mut zxd = ZXDiagram::new(2);
        zxd.push_gate(CNOT, &[1, 0], 0).unwrap();
        zxd.pushfirst_gate(XPhase, &[1], (3, 4)).unwrap();
        let c = zxd.to_circuit().unwrap();
        assert_eq!(c.gates[0], Gate::new_with_phase(XPhase, vec![1], (3, 4)));
        assert_eq!(c.gates[1], Gate::new(CNOT, vec![1, 0]));
    }

    #[test]
    fn not_circuit_like() {
        let mut zxd = ZXDiagram::new(1);
        let v = zxd.add_spider(SpiderType::Z, 0, &[0, 1]);
        assert_eq!(zxd.to_circuit(), Err(ZXError::NotCircuitLike(v)));
    }
}
