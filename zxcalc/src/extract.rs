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

//! Circuit extraction from graph-like diagrams.
//!
//! The extractor works backwards from the outputs. It keeps a frontier of
//! spiders next to the outputs, pulls phases, Hadamards and CZs off the
//! frontier into the circuit, and uses Gaussian elimination over the
//! frontier's neighbourhood to find spiders it can move past.

use crate::circuit::*;
use crate::gate::*;
use crate::graph::*;
use crate::graph_rules::{boundary_pivot, remove_id};
use crate::linalg::*;
use crate::phase::Phase;
use crate::zx_graph::ZXGraph;
use num::Zero;
use rustc_hash::FxHashSet;
use std::fmt;

/// Extraction couldn't finish. Returns a message, a
/// partially-extracted circuit, and the remainder of
/// the graph.
pub struct ExtractError(pub String, pub Circuit, pub ZXGraph);

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ExtractError {}

/// Extracts a circuit from a copy of the graph.
pub fn circuit_extraction(zxg: &ZXGraph) -> Result<Circuit, ExtractError> {
    let mut g = zxg.clone();
    Extractor::new(&mut g).extract()
}

pub struct Extractor<'a> {
    g: &'a mut ZXGraph,
    frontier: Vec<(usize, V)>,
    up_to_perm: bool,
    gaussf: fn(&mut Extractor<'a>, &mut Circuit),
}

impl<'a> Extractor<'a> {
    pub fn new(g: &'a mut ZXGraph) -> Extractor<'a> {
        Extractor {
            g,
            frontier: Vec::new(),
            up_to_perm: false,
            gaussf: Extractor::single_sln_set,
        }
    }

    pub fn with_gaussf(&mut self, f: fn(&mut Extractor<'a>, &mut Circuit)) -> &mut Self {
        self.gaussf = f;
        self
    }

    /// Skip the final permutation of the outputs.
    pub fn up_to_perm(&mut self) -> &mut Self {
        self.up_to_perm = true;
        self
    }

    pub fn flow(&mut self) -> &mut Self {
        self.with_gaussf(Extractor::no_gauss)
    }

    pub fn gflow(&mut self) -> &mut Self {
        self.with_gaussf(Extractor::single_sln_set)
    }

    /// Build a biadjacency matrix of frontier with its neighbors
    ///
    /// Frontier elements are rows and neighbors are columns, in ascending
    /// order. The neighbors and the matrix are returned.
    fn frontier_biadj(&self) -> (Vec<V>, Mat2) {
        let mut neighbor_set = FxHashSet::default();
        for &(_, v) in &self.frontier {
            for n in self.g.neighbor_set(v) {
                if self.g.spider_type(n) == SpiderType::Z {
                    neighbor_set.insert(n);
                }
            }
        }

        let mut neighbors: Vec<_> = neighbor_set.into_iter().collect();
        neighbors.sort_unstable();

        let m = Mat2::build(self.frontier.len(), neighbors.len(), |i, j| {
            self.g.connected(self.frontier[i].1, neighbors[j])
        });

        (neighbors, m)
    }

    /// Set edges between frontier and given neighbors to match biadj. matrix
    fn update_frontier_biadj(&mut self, neighbors: &[V], m: Mat2) {
        for (i, &(_, v)) in self.frontier.iter().enumerate() {
            for (j, &w) in neighbors.iter().enumerate() {
                if m[(i, j)] == 1 {
                    if !self.g.connected(v, w) {
                        self.g.add_edge(v, w, EType::H);
                    }
                } else if self.g.connected(v, w) {
                    self.g.remove_edge(v, w);
                }
            }
        }
    }

    /// Push the gates in `c1` on to the front of `c`
    ///
    /// Since c1 only refers to frontier rows, qubit indexes are lifted to
    /// the qubits of the frontier spiders.
    fn update_frontier_circuit(&self, c1: &Circuit, c: &mut Circuit) {
        for gate in &c1.gates {
            let mut gate = gate.clone();
            for q in gate.qs.iter_mut() {
                *q = self.frontier[*q].0;
            }
            c.push_front(gate);
        }
    }

    /// Don't do gaussian elimination on frontier
    ///
    /// This is intended for extracting graphs that already have a causal
    /// flow.
    pub fn no_gauss(_: &mut Extractor, _: &mut Circuit) {}

    /// Perform row operations to free a single spider with the smallest
    /// solution set
    pub fn single_sln_set(e: &mut Extractor, c: &mut Circuit) {
        let (neighbors, mut m) = e.frontier_biadj();
        let mut row_ops = Mat2::id(m.num_rows());
        let mut m1 = m.clone();
        m1.gauss_x(true, &mut row_ops);

        // the reduced row with a single 1 that needs the fewest rows added,
        // then the lowest frontier spider
        let best = (0..m1.num_rows())
            .filter(|&i| m1.row_weight(i) == 1)
            .min_by_key(|&i| (row_ops.row_weight(i), e.frontier[i].1));
        let Some(best) = best else {
            return;
        };

        let sln_set: Vec<_> = (0..row_ops.num_cols())
            .filter(|&i| row_ops[(best, i)] == 1)
            .collect();
        if sln_set.len() < 2 {
            return;
        }

        // any row of the solution set can collect the others
        let target = sln_set[0];
        let mut c1 = Circuit::new(c.num_qubits());
        for &i in &sln_set[1..] {
            m.row_add(i, target);
            c1.row_add(i, target);
        }

        e.update_frontier_circuit(&c1, c);
        e.update_frontier_biadj(&neighbors, m);
    }

    /// Converts the final permutation of the graph into SWAP gates
    ///
    /// By now every output is wired straight to an input.
    fn perm_to_swaps(&mut self, c: &mut Circuit) -> Result<(), ExtractError> {
        let n = self.g.outputs().len();
        let mut perm = Vec::with_capacity(n);
        for &o in self.g.outputs() {
            let src = self
                .g
                .neighbor_set(o)
                .first()
                .and_then(|i| self.g.inputs().iter().position(|j| j == i));
            match src {
                Some(j) => perm.push(j),
                None => {
                    return Err(ExtractError(
                        format!("Output {} is not wired to an input", o),
                        c.clone(),
                        self.g.clone(),
                    ))
                }
            }
        }

        // at[k] is the input whose state sits on wire k
        let mut at: Vec<usize> = (0..n).collect();
        let mut swaps = Vec::new();
        for q in 0..n {
            if let Some(k) = (q..n).find(|&k| at[k] == perm[q]) {
                if k != q {
                    swaps.push(Gate::new(SWAP, vec![q, k]));
                    at.swap(q, k);
                }
            }
        }
        for g in swaps.into_iter().rev() {
            c.push_front(g);
        }
        Ok(())
    }

    /// Prepare the frontier for circuit extraction
    ///
    /// Identifies the frontier, and pulls Hadamards, phases, and CZ
    /// gates into the circuit. The frontier is a Vec of pairs
    /// (qubit, frontier spider).
    fn prepare_frontier(&mut self, c: &mut Circuit) -> Result<(), ExtractError> {
        self.frontier = Vec::new();

        for q in 0..self.g.outputs().len() {
            let o = self.g.outputs()[q];
            let Some(&(v, et)) = self.g.incident_edges(o).first() else {
                // an output not connected to anything is a mal-formed graph
                return Err(ExtractError(
                    format!("Bad output spider {}", o),
                    c.clone(),
                    self.g.clone(),
                ));
            };

            // replace a Hadamard edge from the output with a Hadamard gate
            if et == EType::H {
                c.push_front(Gate::new(HAD, vec![q]));
                self.g.set_edge_type(v, o, EType::N);
            }

            // output connects to an input, so skip. When the main phase of
            // extraction is done, all spiders will be skipped this way.
            if self.g.is_boundary(v) {
                continue;
            }

            self.frontier.push((q, v));

            // replace a non-zero phase on the frontier with a phase gate
            let p = self.g.phase(v);
            if !p.is_zero() {
                c.push_front(Gate::new_with_phase(ZPhase, vec![q], p));
                self.g.set_phase(v, Phase::zero());
            }

            for n in self.g.neighbor_set(v) {
                if n == o {
                    continue;
                } else if self.g.is_boundary(n) {
                    // for unitary circuits, an additional boundary must be an input
                    if !self.g.inputs().contains(&n) {
                        return Err(ExtractError(
                            format!("Two outputs connected to a single spider {}", v),
                            c.clone(),
                            self.g.clone(),
                        ));
                    }

                    // if a spider is connected to more than just an input, pad the input
                    // with a dummy identity spider
                    if self.g.degree(v) > 2 {
                        let et = self.g.edge_type(n, v).unwrap_or_default();
                        let column = self.g.column_loc(n).map(|r| r + 1.0);
                        let n1 = self.g.add_spider(Phase::zero(), self.g.qubit_loc(n), column);
                        self.g.add_edge(n, n1, et.opposite());
                        self.g.add_edge(n1, v, EType::H);
                        self.g.remove_edge(n, v);
                    }
                } else if let Some(&(r, _)) = self.frontier.iter().find(|&&(_, n1)| n == n1) {
                    // an edge between frontier spiders is a CZ gate
                    self.g.remove_edge(v, n);
                    c.push_front(Gate::new(CZ, vec![q, r]));
                } else if self.g.spider_type(n) != SpiderType::Z {
                    return Err(ExtractError(
                        format!("Bad neighbour: {}", n),
                        c.clone(),
                        self.g.clone(),
                    ));
                }
            }
        }

        Ok(())
    }

    /// Pivot to remove gadgets adjacent to the frontier
    fn fix_gadgets(
        &mut self,
        c: &Circuit,
        gadgets: &mut FxHashSet<V>,
    ) -> Result<bool, ExtractError> {
        for &(_, v) in &self.frontier {
            for n in self.g.neighbor_set(v) {
                if gadgets.contains(&n) {
                    if boundary_pivot(self.g, v, n) {
                        gadgets.remove(&n);
                        return Ok(true);
                    } else {
                        return Err(ExtractError(
                            format!("Could not remove gadget by pivoting: ({}, {})", v, n),
                            c.clone(),
                            self.g.clone(),
                        ));
                    }
                }
            }
        }
        Ok(false)
    }

    /// Extract spiders from the frontier
    ///
    /// Look for frontier elements that are phase-free and degree 2, and
    /// replace them with a wire. Returns true if we got any.
    fn extract_from_frontier(&mut self) -> bool {
        let mut found = false;
        for &(_, v) in &self.frontier {
            if remove_id(self.g, v) {
                found = true;
            }
        }
        found
    }

    pub fn extract(&mut self) -> Result<Circuit, ExtractError> {
        let mut c = Circuit::new(self.g.outputs().len());

        // Pre-generate a set of all the phase gadgets. The extraction should
        // only ever eliminate phase gadgets, never create new ones.
        let mut gadgets = FxHashSet::default();
        for v in self.g.spiders() {
            if self.g.is_leaf(v) {
                gadgets.extend(self.g.neighbor_set(v));
            }
        }

        loop {
            // PREPROCESSING PHASE
            //
            // Remove any phases, Hadamards, or CZs from the output and generate
            // a list of frontier spiders. If the frontier is empty after
            // pre-processing, we are done.
            self.prepare_frontier(&mut c)?;
            if self.frontier.is_empty() {
                break;
            }
            log::trace!("frontier: {:?}", self.frontier);

            // GADGET PHASE
            //
            // If any gadgets are adjacent to the frontier, do a generalised pivot to remove
            // them. In that case, some edges will change, so we need to re-generate the frontier.
            if self.fix_gadgets(&c, &mut gadgets)? {
                continue;
            }

            // MAIN PHASE
            //
            // Look for extractible spiders. If we found some, loop. If not, try gaussian
            // elimination via CNOTs and look again.
            if self.extract_from_frontier() {
                continue;
            }

            let gaussf = self.gaussf;
            gaussf(self, &mut c);

            if self.extract_from_frontier() {
                continue;
            }

            // If we didn't make progress, terminate with an error. This prevents infinite loops
            // in the case where a graph is not extractible.
            return Err(ExtractError(
                "No extractible spider found.".into(),
                c,
                self.g.clone(),
            ));
        }

        // FINAL PERMUTATION PHASE
        if !self.up_to_perm {
            self.perm_to_swaps(&mut c)?;
        }

        Ok(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::ZXDiagram;
    use crate::rules::{GraphRule, Rule};
    use rstest::rstest;

    fn graph_of(nqubits: usize, gates: &[Gate]) -> ZXGraph {
        let mut zxd = ZXDiagram::new(nqubits);
        for g in gates {
            zxd.push(g).unwrap();
        }
        ZXGraph::from_diagram(&zxd)
    }

    #[test]
    fn identity_extracts_to_nothing() {
        let zxg = graph_of(3, &[]);
        let c = circuit_extraction(&zxg).unwrap();
        assert_eq!(c.num_qubits(), 3);
        assert_eq!(c.num_gates(), 0);
    }

    #[test]
    fn crossed_wires_become_swaps() {
        let zxg = graph_of(3, &[Gate::new(SWAP, vec![0, 2])]);
        let c = circuit_extraction(&zxg).unwrap();
        assert_eq!(c.num_gates(), 1);
        assert_eq!(c.gates[0], Gate::new(SWAP, vec![0, 2]));

        let mut g = zxg.clone();
        let c = Extractor::new(&mut g).up_to_perm().extract().unwrap();
        assert_eq!(c.num_gates(), 0);
    }

    #[test]
    fn phases_and_hadamards() {
        let zxg = graph_of(
            1,
            &[
                Gate::new(HAD, vec![0]),
                Gate::new_with_phase(ZPhase, vec![0], (1, 4)),
            ],
        );
        let c = circuit_extraction(&zxg).unwrap();
        assert_eq!(
            c.gates.iter().cloned().collect::<Vec<_>>(),
            vec![
                Gate::new(HAD, vec![0]),
                Gate::new_with_phase(ZPhase, vec![0], (1, 4)),
            ]
        );
    }

    #[test]
    fn flow_graphs_need_no_elimination() {
        let zxg = graph_of(
            2,
            &[
                Gate::new_with_phase(ZPhase, vec![0], (1, 4)),
                Gate::new(HAD, vec![1]),
                Gate::new_with_phase(XPhase, vec![1], (1, 2)),
            ],
        );
        let mut g = zxg.clone();
        let c = Extractor::new(&mut g).flow().extract().unwrap();
        assert_eq!(c.tcount(), 1);
        assert_eq!(c.num_gates_of_type(CNOT), 0);

        let mut g = zxg.clone();
        let c1 = Extractor::new(&mut g).gflow().extract().unwrap();
        assert_eq!(c, c1);
    }

    #[test]
    fn solution_set_ties_go_to_lowest_spider() {
        let mut g = graph_of(3, &[]);
        // spider ids run against qubit order
        let fc = g.add_spider(0, None, None);
        let fb = g.add_spider(0, None, None);
        let fa = g.add_spider(0, None, None);
        let ns: Vec<V> = (0..3).map(|_| g.add_spider(0, None, None)).collect();
        for (f, js) in [(fa, vec![0, 1]), (fb, vec![1, 2]), (fc, vec![0, 1, 2])] {
            for j in js {
                g.add_edge(f, ns[j], EType::H);
            }
        }

        let mut e = Extractor::new(&mut g);
        e.frontier = vec![(0, fa), (1, fb), (2, fc)];
        let mut c = Circuit::new(3);
        Extractor::single_sln_set(&mut e, &mut c);
        assert_eq!(c.gates, vec![Gate::new(CNOT, vec![0, 2])]);
        assert_eq!(e.g.neighbor_set(fa), vec![ns[2]]);
        assert_eq!(e.g.neighbor_set(fb), vec![ns[1], ns[2]]);
    }

    #[rstest]
    #[case(vec![Gate::new(CNOT, vec![0, 1])])]
    #[case(vec![Gate::new(CZ, vec![0, 1]), Gate::new(HAD, vec![1])])]
    #[case(vec![
        Gate::new(CNOT, vec![0, 1]),
        Gate::new(CNOT, vec![1, 0]),
        Gate::new(CNOT, vec![0, 1]),
    ])]
    fn two_qubit_circuits_extract(#[case] gates: Vec<Gate>) {
        let mut zxg = graph_of(2, &gates);
        let ms = GraphRule::LocalComp.find_matches(&zxg);
        for m in &ms {
            GraphRule::LocalComp.apply_unchecked(&mut zxg, m);
        }
        let c = circuit_extraction(&zxg).unwrap();
        assert_eq!(c.num_qubits(), 2);
        assert_eq!(c.tcount(), 0);
    }

    #[test]
    fn unextractable_graph_fails() {
        // the wire spider can't be freed from the triangle it sits in
        let mut zxg = graph_of(1, &[Gate::new(ZPhase, vec![0])]);
        let b = 2;
        let x = zxg.add_spider((1, 4), None, None);
        let y = zxg.add_spider((1, 4), None, None);
        zxg.add_edge(b, x, EType::H);
        zxg.add_edge(b, y, EType::H);
        zxg.add_edge(x, y, EType::H);
        let err = circuit_extraction(&zxg).unwrap_err();
        assert_eq!(err.0, "No extractible spider found.");
        assert_eq!(err.1.num_qubits(), 1);
    }
}
