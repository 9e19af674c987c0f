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

//! # Rules for graph-like diagrams
//!
//! Same conventions as [crate::basic_rules]: `check_X`, `X_unchecked`,
//! `X` and `match_X` for each rule X. The matchers return matches that
//! don't share any spiders, scanning spiders in ascending order.
//!
//! Rules that merge two phases keep the phase tracking of the
//! [ZXGraph] up to date, so phase teleportation can replay the merges on
//! the original circuit.

use crate::graph::*;
use crate::phase::Phase;
use crate::rules::{checked_rule1, checked_rule2, Match};
use crate::zx_graph::ZXGraph;
use itertools::Itertools;
use num::Zero;
use rustc_hash::FxHashSet;

/// Check [local_comp_unchecked] applies
///
/// The spider must be inner (see [ZXGraph::is_inner]) with phase pi/2 or
/// 3pi/2. A boundary wire on it would be cut off by the complementation.
pub fn check_local_comp(zxg: &ZXGraph, v: V) -> bool {
    zxg.phase(v).is_proper_clifford() && zxg.is_inner(v)
}

/// Apply a local complementation
///
/// This is the version that deletes the targeted spider. In other words,
/// it is an N-ary generalization of the Euler decomposition rule.
pub fn local_comp_unchecked(zxg: &mut ZXGraph, v: V) {
    let p = zxg.phase(v);

    // add a totally connected graph of the nhd of v
    let ns = zxg.neighbor_set(v);
    for i in 0..ns.len() {
        zxg.add_to_phase(ns[i], -p);
        for j in (i + 1)..ns.len() {
            zxg.add_edge_smart(ns[i], ns[j], EType::H);
        }
    }
    zxg.rem_spider(v);
}

checked_rule1!(ZXGraph, check_local_comp, local_comp_unchecked, local_comp);

pub fn match_local_comp(zxg: &ZXGraph) -> Vec<Match> {
    let mut matches = Vec::new();
    let mut taken = FxHashSet::default();
    for v in zxg.spiders() {
        if taken.contains(&v) || !check_local_comp(zxg, v) {
            continue;
        }
        taken.insert(v);
        taken.extend(zxg.neighbor_set(v));
        matches.push(Match::new(vec![v]));
    }
    matches
}

fn is_inner_pauli(zxg: &ZXGraph, v: V) -> bool {
    zxg.phase(v).is_pauli() && zxg.is_inner(v)
}

/// Check [pivot_unchecked] applies
///
/// Both spiders must be inner, have a phase 0 or pi, and share a
/// Hadamard edge.
pub fn check_pivot(zxg: &ZXGraph, v0: V, v1: V) -> bool {
    v0 != v1
        && zxg.edge_type(v0, v1) == Some(EType::H)
        && is_inner_pauli(zxg, v0)
        && is_inner_pauli(zxg, v1)
}

/// Apply pivoting to a pair of spiders
///
/// This is the version that deletes both spiders, so it is effectively a
/// generalised version of the strong complementarity rule.
pub fn pivot_unchecked(zxg: &mut ZXGraph, v0: V, v1: V) {
    let p0 = zxg.phase(v0);
    let p1 = zxg.phase(v1);

    // add a complete bipartite graph between the neighbors of v0
    // and the neighbors of v1
    let ns0 = zxg.neighbor_set(v0);
    let ns1 = zxg.neighbor_set(v1);
    for &n0 in &ns0 {
        zxg.add_to_phase(n0, p1);
        for &n1 in &ns1 {
            if n0 != v1 && n1 != v0 {
                // shared neighbours get a self-loop, which is a pi phase
                zxg.add_edge_smart(n0, n1, EType::H);
            }
        }
    }

    for &n1 in &ns1 {
        zxg.add_to_phase(n1, p0);
    }

    zxg.rem_spider(v0);
    zxg.rem_spider(v1);
}

checked_rule2!(ZXGraph, check_pivot, pivot_unchecked, pivot);

/// Scans the Hadamard edges out of every spider passing `first`, in
/// ascending order, for a neighbour passing `check`. Matched spiders and
/// their neighbourhoods are taken.
fn match_edges(
    zxg: &ZXGraph,
    first: impl Fn(V) -> bool,
    check: impl Fn(V, V) -> bool,
    extra: impl Fn(V) -> Vec<V>,
) -> Vec<Match> {
    let mut matches = Vec::new();
    let mut taken = FxHashSet::default();
    for v in zxg.spiders() {
        if taken.contains(&v) || !first(v) {
            continue;
        }
        let ns = zxg.neighbor_set(v);
        if ns.iter().any(|n| taken.contains(n)) {
            continue;
        }
        let Some(w) = ns.iter().copied().find(|&w| check(v, w)) else {
            continue;
        };
        let nw = zxg.neighbor_set(w);
        if nw.iter().any(|n| taken.contains(n)) {
            continue;
        }
        taken.insert(v);
        taken.extend(ns);
        taken.extend(nw);
        let mut vs = vec![v, w];
        vs.extend(extra(w));
        matches.push(Match::new(vs));
    }
    matches
}

pub fn match_pivot(zxg: &ZXGraph) -> Vec<Match> {
    match_edges(
        zxg,
        |v| is_inner_pauli(zxg, v),
        |v, w| w > v && check_pivot(zxg, v, w),
        |_| Vec::new(),
    )
}

/// Insert an identity spider so `v` is no longer adjacent to boundary `b`
///
/// If `b` is not a boundary, this is a noop. The new spider will be
/// connected to `v` by a Hadamard edge.
fn unfuse_boundary(zxg: &mut ZXGraph, v: V, b: V) {
    if !zxg.is_boundary(b) {
        return;
    }
    let Some(et) = zxg.edge_type(v, b) else {
        return;
    };
    let n = zxg.add_spider(Phase::zero(), zxg.qubit_loc(v), zxg.column_loc(v));
    zxg.add_edge(v, n, EType::H);
    zxg.add_edge(n, b, et.opposite());
    zxg.remove_edge(v, b);
}

/// Unfuse a non-Pauli phase as a degree-1 phase gadget
///
/// If the spider already has a Pauli phase, this is a noop. The gadget
/// leaf takes over the phase tracking of `v`.
fn unfuse_gadget(zxg: &mut ZXGraph, v: V) {
    let p = zxg.phase(v);
    if p.is_pauli() {
        return;
    }
    let column = zxg.column_loc(v);
    let c = zxg.add_spider(Phase::zero(), None, column);
    let l = zxg.add_spider(p, None, column);
    zxg.set_phase(v, Phase::zero());
    zxg.add_edge(v, c, EType::H);
    zxg.add_edge(c, l, EType::H);
    zxg.move_phase_id(v, l);
}

/// A Z spider wired to exactly one boundary, with every other edge a
/// single Hadamard edge to a Z spider that is not a leaf.
fn is_boundary_adjacent(zxg: &ZXGraph, w: V) -> bool {
    let bs = zxg.boundary_neighbors(w);
    zxg.spider_type(w) == SpiderType::Z
        && bs.len() == 1
        && zxg.edge_mul(w, bs[0]) == 1
        && zxg.incident_edges(w).into_iter().all(|(n, et)| {
            zxg.is_boundary(n)
                || (et == EType::H
                    && zxg.spider_type(n) == SpiderType::Z
                    && zxg.edge_mul(w, n) == 1
                    && zxg.degree(n) > 1)
        })
}

/// Check [pivot_boundary_unchecked] applies
///
/// `v` is an inner Pauli spider and `w` a Pauli neighbour wired to
/// exactly one boundary.
pub fn check_pivot_boundary(zxg: &ZXGraph, v: V, w: V) -> bool {
    v != w
        && zxg.edge_type(v, w) == Some(EType::H)
        && is_inner_pauli(zxg, v)
        && zxg.phase(w).is_pauli()
        && is_boundary_adjacent(zxg, w)
}

/// Move the boundary of `w` onto a fresh spider, then pivot
pub fn pivot_boundary_unchecked(zxg: &mut ZXGraph, v: V, w: V) {
    for b in zxg.boundary_neighbors(w) {
        unfuse_boundary(zxg, w, b);
    }
    pivot_unchecked(zxg, v, w);
}

checked_rule2!(ZXGraph, check_pivot_boundary, pivot_boundary_unchecked, pivot_boundary);

pub fn match_pivot_boundary(zxg: &ZXGraph) -> Vec<Match> {
    match_edges(
        zxg,
        |v| is_inner_pauli(zxg, v),
        |v, w| check_pivot_boundary(zxg, v, w),
        |w| zxg.boundary_neighbors(w),
    )
}

/// Check [pivot_gadget_unchecked] applies
///
/// `v` is an inner Pauli spider and `w` an inner neighbour with a
/// non-Clifford phase.
pub fn check_pivot_gadget(zxg: &ZXGraph, v: V, w: V) -> bool {
    v != w
        && zxg.edge_type(v, w) == Some(EType::H)
        && is_inner_pauli(zxg, v)
        && !zxg.phase(w).is_clifford()
        && zxg.is_inner(w)
}

/// Move the phase of `w` onto a phase gadget, then pivot
pub fn pivot_gadget_unchecked(zxg: &mut ZXGraph, v: V, w: V) {
    unfuse_gadget(zxg, w);
    pivot_unchecked(zxg, v, w);
}

checked_rule2!(ZXGraph, check_pivot_gadget, pivot_gadget_unchecked, pivot_gadget);

pub fn match_pivot_gadget(zxg: &ZXGraph) -> Vec<Match> {
    match_edges(
        zxg,
        |v| is_inner_pauli(zxg, v),
        |v, w| check_pivot_gadget(zxg, v, w),
        |_| Vec::new(),
    )
}

/// Check [pivot_boundary_gadget_unchecked] applies
///
/// As [check_pivot_boundary], except `w` has a non-Pauli phase.
pub fn check_pivot_boundary_gadget(zxg: &ZXGraph, v: V, w: V) -> bool {
    v != w
        && zxg.edge_type(v, w) == Some(EType::H)
        && is_inner_pauli(zxg, v)
        && !zxg.phase(w).is_pauli()
        && is_boundary_adjacent(zxg, w)
}

/// Move the boundary and the phase of `w` away, then pivot
pub fn pivot_boundary_gadget_unchecked(zxg: &mut ZXGraph, v: V, w: V) {
    for b in zxg.boundary_neighbors(w) {
        unfuse_boundary(zxg, w, b);
    }
    unfuse_gadget(zxg, w);
    pivot_unchecked(zxg, v, w);
}

checked_rule2!(
    ZXGraph,
    check_pivot_boundary_gadget,
    pivot_boundary_gadget_unchecked,
    pivot_boundary_gadget
);

pub fn match_pivot_boundary_gadget(zxg: &ZXGraph) -> Vec<Match> {
    match_edges(
        zxg,
        |v| is_inner_pauli(zxg, v),
        |v, w| check_pivot_boundary_gadget(zxg, v, w),
        |w| zxg.boundary_neighbors(w),
    )
}

/// Check two adjacent Z spiders can be pivoted once non-Pauli phases are
/// moved to gadgets and boundary wires get identities.
fn check_gen_pivot(zxg: &ZXGraph, v0: V, v1: V) -> bool {
    if v0 == v1 || zxg.edge_type(v0, v1) != Some(EType::H) {
        return false;
    }

    for &v in &[v0, v1] {
        if zxg.spider_type(v) != SpiderType::Z {
            return false;
        }
        for (w, et) in zxg.incident_edges(v) {
            let t = zxg.spider_type(w);
            if !((t == SpiderType::Z && et == EType::H) || t.is_boundary()) {
                return false;
            }
        }
    }

    true
}

fn is_boundary_pauli(zxg: &ZXGraph, v: V) -> bool {
    zxg.phase(v).is_pauli() && !zxg.boundary_neighbors(v).is_empty()
}

pub fn check_boundary_pivot(zxg: &ZXGraph, v0: V, v1: V) -> bool {
    check_gen_pivot(zxg, v0, v1) && is_boundary_pauli(zxg, v0)
}

/// Generic version of the pivot rule
///
/// Either spider may have a non-Pauli phase and/or be connected to
/// boundaries. Interior non-Pauli spiders produce phase gadgets and
/// boundary wires get a fresh spider first.
pub fn gen_pivot_unchecked(zxg: &mut ZXGraph, v0: V, v1: V) {
    for v in [v0, v1] {
        unfuse_gadget(zxg, v);
        for b in zxg.boundary_neighbors(v) {
            unfuse_boundary(zxg, v, b);
        }
    }
    pivot_unchecked(zxg, v0, v1);
}

checked_rule2!(ZXGraph, check_boundary_pivot, gen_pivot_unchecked, boundary_pivot);

/// Check [remove_id_unchecked] applies
pub fn check_remove_id(zxg: &ZXGraph, v: V) -> bool {
    zxg.spider_type(v) == SpiderType::Z
        && zxg.phase(v).is_zero()
        && zxg.degree(v) == 2
        && zxg.neighbor_set(v).len() == 2
}

/// Remove a phase-free spider of degree 2, joining its neighbours with
/// the combined edge type.
pub fn remove_id_unchecked(zxg: &mut ZXGraph, v: V) {
    let es = zxg.incident_edges(v);
    let (n0, et0) = es[0];
    let (n1, et1) = es[1];
    zxg.rem_spider(v);
    zxg.add_edge_smart(n0, n1, EType::merge(et0, et1));
}

checked_rule1!(ZXGraph, check_remove_id, remove_id_unchecked, remove_id);

/// The two ends of a removable identity `v2`, as `(keep, rem)`.
///
/// `rem` is the end that gets merged into `keep`. It may not touch a
/// boundary, and when neither end does, the higher id is removed.
pub fn identity_ends(zxg: &ZXGraph, v2: V) -> Option<(V, V)> {
    let ns = zxg.neighbor_set(v2);
    if ns.len() != 2 {
        return None;
    }
    let (v1, v3) = (ns[0], ns[1]);
    match (
        zxg.boundary_neighbors(v1).is_empty(),
        zxg.boundary_neighbors(v3).is_empty(),
    ) {
        (_, true) => Some((v1, v3)),
        (true, false) => Some((v3, v1)),
        (false, false) => None,
    }
}

/// Check [identity_unchecked] applies
///
/// `v2` is a Pauli spider with two single Hadamard edges to Z spiders,
/// at least one of which has no boundary neighbours.
pub fn check_identity(zxg: &ZXGraph, v2: V) -> bool {
    zxg.spider_type(v2) == SpiderType::Z
        && zxg.phase(v2).is_pauli()
        && zxg.degree(v2) == 2
        && zxg.incident_edges(v2).into_iter().all(|(n, et)| {
            et == EType::H && zxg.spider_type(n) == SpiderType::Z && zxg.edge_mul(v2, n) == 1
        })
        && identity_ends(zxg, v2).is_some()
}

/// Remove `v2` and merge its two neighbours
///
/// A pi on `v2` is pushed through the removed end first, negating its
/// phase and adding pi to each of its other neighbours.
pub fn identity_unchecked(zxg: &mut ZXGraph, v2: V) {
    let Some((keep, rem)) = identity_ends(zxg, v2) else {
        return;
    };
    if zxg.phase(v2).is_pi() {
        zxg.negate_phase(rem);
        for n in zxg.neighbor_set(rem) {
            if n != v2 {
                zxg.add_to_phase(n, Phase::pi());
            }
        }
    }

    zxg.add_to_phase(keep, zxg.phase(rem));
    for (n, et) in zxg.incident_edges(rem) {
        if n != v2 {
            zxg.add_edge_smart(keep, n, et);
        }
    }
    zxg.merge_phase_ids(keep, rem);
    zxg.rem_spider(v2);
    zxg.rem_spider(rem);
}

checked_rule1!(ZXGraph, check_identity, identity_unchecked, identity);

pub fn match_identity(zxg: &ZXGraph) -> Vec<Match> {
    let mut matches = Vec::new();
    let mut taken = FxHashSet::default();
    for v2 in zxg.spiders() {
        if taken.contains(&v2) || !check_identity(zxg, v2) {
            continue;
        }
        let Some((keep, rem)) = identity_ends(zxg, v2) else {
            continue;
        };
        if taken.contains(&keep) || taken.contains(&rem) {
            continue;
        }
        taken.extend([v2, keep, rem]);
        matches.push(Match::new(vec![v2, keep, rem]));
    }
    matches
}

/// The leaf of the phase gadget centred on `c`.
///
/// `c` must be a Pauli Z spider away from the boundary with exactly one
/// leaf, and its other edges Hadamard edges to spiders that are not
/// leaves.
pub fn gadget_leaf(zxg: &ZXGraph, c: V) -> Option<V> {
    if zxg.spider_type(c) != SpiderType::Z || !zxg.phase(c).is_pauli() {
        return None;
    }
    let mut leaf = None;
    let mut others = 0;
    for (n, et) in zxg.incident_edges(c) {
        if et != EType::H || zxg.spider_type(n) != SpiderType::Z || zxg.edge_mul(c, n) != 1 {
            return None;
        }
        if zxg.is_leaf(n) {
            if leaf.is_some() {
                return None;
            }
            leaf = Some(n);
        } else {
            others += 1;
        }
    }
    if others == 0 {
        None
    } else {
        leaf
    }
}

/// Neighbours of a gadget centre other than its leaf.
fn gadget_support(zxg: &ZXGraph, c: V, leaf: V) -> Vec<V> {
    zxg.neighbor_set(c).into_iter().filter(|&n| n != leaf).collect()
}

/// Check [gadget_fusion_unchecked] applies
///
/// Both spiders are gadget centres on the same set of spiders.
pub fn check_gadget_fusion(zxg: &ZXGraph, c0: V, c1: V) -> bool {
    if c0 == c1 {
        return false;
    }
    match (gadget_leaf(zxg, c0), gadget_leaf(zxg, c1)) {
        (Some(l0), Some(l1)) => gadget_support(zxg, c0, l0) == gadget_support(zxg, c1, l1),
        _ => false,
    }
}

/// Fuse the gadget on `c1` into the one on `c0`
///
/// A pi on either centre is cleared by negating its leaf. The leaf
/// phases then add, and the merge is recorded in the phase tracking.
pub fn gadget_fusion_unchecked(zxg: &mut ZXGraph, c0: V, c1: V) {
    let (Some(l0), Some(l1)) = (gadget_leaf(zxg, c0), gadget_leaf(zxg, c1)) else {
        return;
    };
    for (c, l) in [(c0, l0), (c1, l1)] {
        if zxg.phase(c).is_pi() {
            zxg.set_phase(c, Phase::zero());
            zxg.negate_phase(l);
        }
    }
    zxg.add_to_phase(l0, zxg.phase(l1));
    zxg.merge_phase_ids(l0, l1);
    zxg.rem_spider(l1);
    zxg.rem_spider(c1);
}

checked_rule2!(ZXGraph, check_gadget_fusion, gadget_fusion_unchecked, gadget_fusion);

pub fn match_gadget_fusion(zxg: &ZXGraph) -> Vec<Match> {
    let gadgets: Vec<(Vec<V>, V, V)> = zxg
        .spiders()
        .into_iter()
        .filter_map(|c| gadget_leaf(zxg, c).map(|l| (gadget_support(zxg, c, l), c, l)))
        .sorted()
        .collect();

    let mut matches = Vec::new();
    for (_, group) in &gadgets.iter().chunk_by(|g| g.0.clone()) {
        let group: Vec<_> = group.collect();
        for pair in group.chunks_exact(2) {
            let &(_, c0, l0) = pair[0];
            let &(_, c1, l1) = pair[1];
            matches.push(Match::new(vec![c0, c1, l0, l1]));
        }
    }
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::ZXDiagram;
    use crate::gate::*;
    use crate::rules::{GraphRule, Rule};
    use rstest::{fixture, rstest};

    /// A single-qubit graph `in -- b -- out` to hang spiders off.
    #[fixture]
    fn wire() -> ZXGraph {
        let mut zxd = ZXDiagram::new(1);
        zxd.push_gate(ZPhase, &[0], 0).unwrap();
        ZXGraph::from_diagram(&zxd)
    }

    fn connect(zxg: &mut ZXGraph, es: &[(V, V)]) {
        for &(s, t) in es {
            zxg.add_edge(s, t, EType::H);
        }
    }

    #[rstest]
    fn local_comp_complements(mut wire: ZXGraph) {
        let b = 2;
        let v = zxg_spider(&mut wire, (1, 2));
        let x = zxg_spider(&mut wire, (1, 4));
        let y = zxg_spider(&mut wire, 0);
        connect(&mut wire, &[(b, v), (v, x), (v, y), (x, y), (b, x)]);
        assert!(!check_local_comp(&wire, b));
        assert_eq!(match_local_comp(&wire), vec![Match::new(vec![v])]);

        assert!(local_comp(&mut wire, v));
        assert!(!wire.contains_spider(v));
        // existing edges toggle off, missing ones appear
        assert!(!wire.connected(x, y));
        assert!(!wire.connected(b, x));
        assert_eq!(wire.edge_type(b, y), Some(EType::H));
        assert_eq!(wire.phase(x), Phase::from((-1, 4)));
        assert_eq!(wire.phase(b), Phase::from((3, 2)));
    }

    #[test]
    fn local_comp_skips_boundary_spiders() {
        let mut zxd = ZXDiagram::new(1);
        zxd.push_gate(ZPhase, &[0], (1, 2)).unwrap();
        zxd.push_gate(HAD, &[0], 0).unwrap();
        zxd.push_gate(ZPhase, &[0], 0).unwrap();
        let zxg = ZXGraph::from_diagram(&zxd);
        assert!(zxg.is_interior(2));
        assert!(!check_local_comp(&zxg, 2));
        assert!(match_local_comp(&zxg).is_empty());
    }

    fn zxg_spider(zxg: &mut ZXGraph, phase: impl Into<Phase>) -> V {
        zxg.add_spider(phase, None, None)
    }

    #[rstest]
    fn pivot_removes_pair(mut wire: ZXGraph) {
        let b = 2;
        let u = zxg_spider(&mut wire, 1);
        let v = zxg_spider(&mut wire, 0);
        let x = zxg_spider(&mut wire, (1, 4));
        let y = zxg_spider(&mut wire, (1, 4));
        connect(&mut wire, &[(b, u), (u, v), (v, x), (u, y), (v, y), (x, b)]);

        assert_eq!(match_pivot(&wire), vec![Match::new(vec![u, v])]);
        assert!(pivot(&mut wire, u, v));
        assert!(!wire.contains_spider(u));
        assert!(!wire.contains_spider(v));
        // b ~ x already: toggled off; y is shared: self-loop plus both phases
        assert!(!wire.connected(b, x));
        assert_eq!(wire.phase(b), Phase::zero());
        assert_eq!(wire.phase(x), Phase::from((5, 4)));
        assert_eq!(wire.phase(y), Phase::from((1, 4)) + Phase::pi() + Phase::pi());
        assert_eq!(wire.edge_type(b, y), Some(EType::H));
    }

    #[rstest]
    fn pivot_gadget_leaves_gadget(mut wire: ZXGraph) {
        let b = 2;
        let u = zxg_spider(&mut wire, 0);
        let w = zxg_spider(&mut wire, (1, 4));
        let x = zxg_spider(&mut wire, 0);
        connect(&mut wire, &[(b, u), (u, w), (w, x), (x, b)]);

        assert!(!check_pivot(&wire, u, w));
        assert_eq!(match_pivot_gadget(&wire), vec![Match::new(vec![u, w])]);
        assert!(pivot_gadget(&mut wire, u, w));
        assert_eq!(wire.tcount(), 1);
        let leaf = wire.spiders().into_iter().find(|&s| wire.is_leaf(s)).unwrap();
        assert_eq!(wire.phase(leaf), Phase::from((1, 4)));
        let c = wire.neighbor_set(leaf)[0];
        assert_eq!(gadget_leaf(&wire, c), Some(leaf));
    }

    #[test]
    fn pivot_boundary_unfuses_input() {
        let mut zxd = ZXDiagram::new(1);
        zxd.push_gate(ZPhase, &[0], 0).unwrap();
        zxd.push_gate(HAD, &[0], 0).unwrap();
        zxd.push_gate(ZPhase, &[0], 0).unwrap();
        let mut zxg = ZXGraph::from_diagram(&zxd);
        let (a, c) = (2, 4);
        let v = zxg_spider(&mut zxg, 0);
        connect(&mut zxg, &[(v, a), (v, c)]);

        assert!(!check_pivot(&zxg, v, a));
        let ms = match_pivot_boundary(&zxg);
        assert_eq!(ms, vec![Match::new(vec![v, a, 0])]);
        assert!(GraphRule::PivotBoundary.check(&zxg, &ms[0]));
        GraphRule::PivotBoundary.apply_unchecked(&mut zxg, &ms[0]);

        let n = v + 1;
        assert_eq!(zxg.spiders(), vec![0, 1, c, n]);
        assert_eq!(zxg.edge_type(0, n), Some(EType::H));
        assert_eq!(zxg.edge_type(n, c), Some(EType::H));
        assert!(zxg.phase(c).is_pi());
    }

    #[rstest]
    fn identity_merges_neighbours(mut wire: ZXGraph) {
        let b = 2;
        let v2 = zxg_spider(&mut wire, 1);
        let rem = zxg_spider(&mut wire, (1, 4));
        let x = zxg_spider(&mut wire, 0);
        connect(&mut wire, &[(b, v2), (v2, rem), (rem, x), (x, b)]);

        assert_eq!(identity_ends(&wire, v2), Some((b, rem)));
        assert_eq!(match_identity(&wire), vec![Match::new(vec![v2, b, rem])]);
        assert!(identity(&mut wire, v2));
        assert!(!wire.contains_spider(v2));
        assert!(!wire.contains_spider(rem));
        // rem's phase is negated by the pi; x picks up that pi
        assert_eq!(wire.phase(b), Phase::from((-1, 4)));
        assert!(wire.phase(x).is_pi());
        assert!(!wire.connected(b, x));
    }

    #[rstest]
    fn identity_needs_a_free_end(mut wire: ZXGraph) {
        let v2 = zxg_spider(&mut wire, 0);
        connect(&mut wire, &[(2, v2)]);
        assert!(!check_identity(&wire, v2));
        assert!(!check_identity(&wire, 2));
        assert_eq!(identity_ends(&wire, 2), None);
    }

    #[rstest]
    fn gadgets_fuse(mut wire: ZXGraph) {
        let b = 2;
        let x = zxg_spider(&mut wire, 0);
        connect(&mut wire, &[(b, x)]);
        let gadget = |zxg: &mut ZXGraph, cp: i64, lp: (i64, i64)| {
            let c = zxg_spider(zxg, cp);
            let l = zxg_spider(zxg, lp);
            connect(zxg, &[(c, l), (c, b), (c, x)]);
            (c, l)
        };
        let (c0, l0) = gadget(&mut wire, 0, (1, 4));
        let (c1, l1) = gadget(&mut wire, 1, (1, 4));
        let (c2, _) = gadget(&mut wire, 0, (1, 8));

        assert_eq!(gadget_leaf(&wire, c1), Some(l1));
        assert_eq!(gadget_leaf(&wire, x), None);
        assert_eq!(match_gadget_fusion(&wire), vec![Match::new(vec![c0, c1, l0, l1])]);
        assert!(gadget_fusion(&mut wire, c0, c1));
        assert!(!wire.contains_spider(c1));
        assert!(!wire.contains_spider(l1));
        // the pi centre negates its leaf before the phases add
        assert_eq!(wire.phase(l0), Phase::zero());
        assert!(check_gadget_fusion(&wire, c0, c2));
        assert_eq!(wire.tcount(), 1);
    }

    #[rstest]
    fn remove_id_joins_edge_types(mut wire: ZXGraph) {
        let v = zxg_spider(&mut wire, 0);
        let x = zxg_spider(&mut wire, (1, 4));
        connect(&mut wire, &[(2, v), (v, x)]);
        assert!(remove_id(&mut wire, v));
        assert_eq!(wire.edge_type(2, x), Some(EType::N));
    }
}
