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

//! Arena-backed multigraph storage for spiders.
//!
//! Every adjacency entry is a neighbour, an edge type, and a multiplicity.
//! Removed slots stay empty, so a vertex id is never handed out twice.

pub use crate::graph::{EType, V};

pub type VTab<T> = Vec<Option<T>>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Multigraph {
    edata: VTab<Vec<(V, EType, usize)>>,
    numv: usize,
    nume: usize,
}

impl Multigraph {
    pub fn new() -> Multigraph {
        Multigraph::default()
    }

    /// A graph with vertices `0..n` and no edges.
    pub fn with_vertices(n: usize) -> Multigraph {
        let mut mg = Multigraph::new();
        for _ in 0..n {
            mg.add_vertex();
        }
        mg
    }

    /// The id the next added vertex will get.
    pub fn vindex(&self) -> V {
        self.edata.len()
    }

    pub fn num_vertices(&self) -> usize {
        self.numv
    }

    /// Number of edges, counting multiplicity.
    pub fn num_edges(&self) -> usize {
        self.nume
    }

    pub fn contains_vertex(&self, v: V) -> bool {
        matches!(self.edata.get(v), Some(Some(_)))
    }

    /// Vertex ids in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = V> + '_ {
        self.edata
            .iter()
            .enumerate()
            .filter_map(|(v, d)| d.as_ref().map(|_| v))
    }

    /// Edges as `(s, t, type, multiplicity)` with `s < t`.
    pub fn edges(&self) -> impl Iterator<Item = (V, V, EType, usize)> + '_ {
        self.edata.iter().enumerate().flat_map(|(s, d)| {
            d.iter()
                .flatten()
                .filter(move |&&(t, _, _)| s < t)
                .map(move |&(t, et, m)| (s, t, et, m))
        })
    }

    fn nhd(&self, v: V) -> &Vec<(V, EType, usize)> {
        match self.edata.get(v) {
            Some(Some(d)) => d,
            _ => panic!("Vertex not found: {}", v),
        }
    }

    fn nhd_mut(&mut self, v: V) -> &mut Vec<(V, EType, usize)> {
        match self.edata.get_mut(v) {
            Some(Some(d)) => d,
            _ => panic!("Vertex not found: {}", v),
        }
    }

    pub fn add_vertex(&mut self) -> V {
        self.numv += 1;
        self.edata.push(Some(Vec::new()));
        self.edata.len() - 1
    }

    /// Removes a vertex together with all of its edges.
    pub fn remove_vertex(&mut self, v: V) {
        let nhd = self
            .edata
            .get_mut(v)
            .and_then(Option::take)
            .unwrap_or_else(|| panic!("Vertex not found: {}", v));
        self.numv -= 1;
        for (w, et, m) in nhd {
            self.nume -= m;
            self.nhd_mut(w).retain(|&(u, et1, _)| !(u == v && et1 == et));
        }
    }

    pub fn add_edge(&mut self, s: V, t: V, et: EType) {
        self.add_edge_mul(s, t, et, 1);
    }

    /// Adds `m` parallel edges of type `et` between `s` and `t`.
    ///
    /// # Panics
    ///
    /// Panics on self-loops or missing vertices.
    pub fn add_edge_mul(&mut self, s: V, t: V, et: EType, m: usize) {
        if s == t {
            panic!("Self-loops are not supported: {}", s);
        }
        if m == 0 {
            return;
        }
        for (a, b) in [(s, t), (t, s)] {
            let nhd = self.nhd_mut(a);
            match nhd.iter_mut().find(|(w, et1, _)| *w == b && *et1 == et) {
                Some(e) => e.2 += m,
                None => nhd.push((b, et, m)),
            }
        }
        self.nume += m;
    }

    /// Removes up to `m` parallel edges of type `et`, returning how many were removed.
    pub fn rem_edge_mul(&mut self, s: V, t: V, et: EType, m: usize) -> usize {
        let removed = self.mul(s, t, et).min(m);
        if removed == 0 {
            return 0;
        }
        for (a, b) in [(s, t), (t, s)] {
            let nhd = self.nhd_mut(a);
            if let Some(i) = nhd.iter().position(|&(w, et1, _)| w == b && et1 == et) {
                nhd[i].2 -= removed;
                if nhd[i].2 == 0 {
                    nhd.swap_remove(i);
                }
            }
        }
        self.nume -= removed;
        removed
    }

    /// Removes every edge of type `et` between `s` and `t`.
    pub fn remove_edge(&mut self, s: V, t: V, et: EType) -> usize {
        self.rem_edge_mul(s, t, et, usize::MAX)
    }

    /// Removes every edge between `s` and `t`, of any type.
    pub fn remove_edges(&mut self, s: V, t: V) -> usize {
        self.remove_edge(s, t, EType::N) + self.remove_edge(s, t, EType::H)
    }

    /// Number of parallel edges of type `et` between `s` and `t`.
    pub fn mul(&self, s: V, t: V, et: EType) -> usize {
        self.nhd(s)
            .iter()
            .find(|&&(w, et1, _)| w == t && et1 == et)
            .map_or(0, |e| e.2)
    }

    /// Number of edges of any type between `s` and `t`.
    pub fn total_mul(&self, s: V, t: V) -> usize {
        self.nhd(s)
            .iter()
            .filter(|&&(w, _, _)| w == t)
            .map(|e| e.2)
            .sum()
    }

    pub fn connected(&self, s: V, t: V) -> bool {
        self.nhd(s).iter().any(|&(w, _, _)| w == t)
    }

    /// The type of some edge between `s` and `t`, preferring plain edges.
    pub fn edge_type(&self, s: V, t: V) -> Option<EType> {
        let mut found = None;
        for &(w, et, _) in self.nhd(s) {
            if w == t {
                if et == EType::N {
                    return Some(EType::N);
                }
                found = Some(et);
            }
        }
        found
    }

    /// Replaces every edge between `s` and `t` by edges of type `et`,
    /// keeping the total multiplicity.
    pub fn set_edge_type(&mut self, s: V, t: V, et: EType) {
        let m = self.remove_edges(s, t);
        self.add_edge_mul(s, t, et, m);
    }

    /// Neighbours of `v`, repeated once per parallel edge.
    pub fn neighbors(&self, v: V) -> impl Iterator<Item = V> + '_ {
        self.nhd(v)
            .iter()
            .flat_map(|&(w, _, m)| std::iter::repeat(w).take(m))
    }

    /// Distinct neighbours of `v` in ascending order.
    pub fn neighbor_set(&self, v: V) -> Vec<V> {
        let mut ns: Vec<V> = self.nhd(v).iter().map(|e| e.0).collect();
        ns.sort_unstable();
        ns.dedup();
        ns
    }

    /// Incident edges as `(neighbour, type, multiplicity)`.
    pub fn incident_edges(&self, v: V) -> impl Iterator<Item = (V, EType, usize)> + '_ {
        self.nhd(v).iter().copied()
    }

    pub fn degree(&self, v: V) -> usize {
        self.nhd(v).iter().map(|e| e.2).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn triangle() -> Multigraph {
        let mut mg = Multigraph::with_vertices(3);
        mg.add_edge(0, 1, EType::N);
        mg.add_edge(1, 2, EType::N);
        mg.add_edge(0, 2, EType::H);
        mg
    }

    #[rstest]
    fn counts(triangle: Multigraph) {
        assert_eq!(triangle.num_vertices(), 3);
        assert_eq!(triangle.num_edges(), 3);
        assert_eq!(triangle.degree(0), 2);
        assert_eq!(triangle.edge_type(0, 2), Some(EType::H));
        assert_eq!(triangle.edge_type(0, 1), Some(EType::N));
    }

    #[rstest]
    fn multiplicity(mut triangle: Multigraph) {
        triangle.add_edge(0, 1, EType::N);
        assert_eq!(triangle.mul(0, 1, EType::N), 2);
        assert_eq!(triangle.mul(1, 0, EType::N), 2);
        assert_eq!(triangle.degree(0), 3);
        assert_eq!(triangle.num_edges(), 4);
        assert_eq!(triangle.neighbors(0).filter(|&w| w == 1).count(), 2);
        assert_eq!(triangle.neighbor_set(0), vec![1, 2]);

        assert_eq!(triangle.rem_edge_mul(0, 1, EType::N, 1), 1);
        assert_eq!(triangle.mul(0, 1, EType::N), 1);
        assert_eq!(triangle.num_edges(), 3);
        assert_eq!(triangle.remove_edges(0, 1), 1);
        assert!(!triangle.connected(0, 1));
        assert!(!triangle.connected(1, 0));
    }

    #[rstest]
    fn remove_vertex(mut triangle: Multigraph) {
        triangle.remove_vertex(1);
        assert!(!triangle.contains_vertex(1));
        assert_eq!(triangle.num_vertices(), 2);
        assert_eq!(triangle.num_edges(), 1);
        assert_eq!(triangle.vertices().collect::<Vec<_>>(), vec![0, 2]);

        // ids are not recycled
        let v = triangle.add_vertex();
        assert_eq!(v, 3);
    }

    #[rstest]
    fn retype(mut triangle: Multigraph) {
        triangle.add_edge(0, 2, EType::N);
        triangle.set_edge_type(0, 2, EType::H);
        assert_eq!(triangle.mul(0, 2, EType::H), 2);
        assert_eq!(triangle.mul(2, 0, EType::N), 0);
        assert_eq!(triangle.edges().count(), 3);
    }

    #[test]
    #[should_panic]
    fn no_self_loops() {
        let mut mg = Multigraph::with_vertices(1);
        mg.add_edge(0, 0, EType::N);
    }
}
