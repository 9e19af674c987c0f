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

//! # Rules for circuit-form diagrams
//!
//! These rules come in groups of functions. For a rule X, there is a
//! function `check_X(&zxd, ...) -> bool` which checks whether the rule
//! applies at the given spiders, `X_unchecked(&mut zxd, ...)` which applies
//! it without checking, `X(&mut zxd, ...) -> bool` which is the composition
//! of the two, and `match_X(&zxd)` which finds every place it applies.
//!
//! Calling `X_unchecked` is allowed to produce an unsound diagram, or even
//! panic, if `check_X` doesn't return true.

use crate::diagram::ZXDiagram;
use crate::graph::*;
use crate::phase::Phase;
use crate::rules::{checked_rule1, checked_rule2, Match};
use num::Zero;
use rustc_hash::FxHashSet;

fn is_zx(ty: SpiderType) -> bool {
    matches!(ty, SpiderType::Z | SpiderType::X)
}

/// Check [fusion_unchecked] applies
///
/// Both spiders must be Z, or both X, and share at least one wire.
pub fn check_fusion(zxd: &ZXDiagram, v0: V, v1: V) -> bool {
    v0 != v1
        && is_zx(zxd.spider_type(v0))
        && zxd.spider_type(v0) == zxd.spider_type(v1)
        && zxd.connected(v0, v1)
}

/// Fuse `v1` into `v0`
///
/// Phases add, wires of `v1` move to `v0`, and wires between the two
/// become self-loops, which are dropped.
pub fn fusion_unchecked(zxd: &mut ZXDiagram, v0: V, v1: V) {
    for w in zxd.neighbors(v1) {
        if w != v0 {
            zxd.add_edge(v0, w);
        }
    }
    zxd.add_to_phase(v0, zxd.phase(v1));
    zxd.rem_spider(v1);
}

checked_rule2!(ZXDiagram, check_fusion, fusion_unchecked, fusion);

pub fn match_fusion(zxd: &ZXDiagram) -> Vec<Match> {
    let mut matches = Vec::new();
    let mut taken = FxHashSet::default();
    for v in zxd.spiders() {
        if taken.contains(&v) || !is_zx(zxd.spider_type(v)) {
            continue;
        }
        if let Some(w) = zxd
            .neighbor_set(v)
            .into_iter()
            .find(|&w| w > v && !taken.contains(&w) && check_fusion(zxd, v, w))
        {
            taken.insert(v);
            taken.insert(w);
            matches.push(Match::new(vec![v, w]));
        }
    }
    matches
}

/// Check [hadamard_unchecked] applies
pub fn check_hadamard(zxd: &ZXDiagram, v: V) -> bool {
    zxd.spider_type(v) == SpiderType::X
}

/// Turn an X spider into a Z spider with a Hadamard box on every wire
pub fn hadamard_unchecked(zxd: &mut ZXDiagram, v: V) {
    for w in zxd.neighbor_set(v) {
        zxd.insert_spider(v, w, SpiderType::H, Phase::zero());
    }
    zxd.set_spider_type(v, SpiderType::Z);
}

checked_rule1!(ZXDiagram, check_hadamard, hadamard_unchecked, hadamard);

pub fn match_hadamard(zxd: &ZXDiagram) -> Vec<Match> {
    zxd.spiders()
        .into_iter()
        .filter(|&v| check_hadamard(zxd, v))
        .map(|v| Match::new(vec![v]))
        .collect()
}

/// Check [identity1_unchecked] applies
///
/// The spider must be a phase-free Z or X spider wired to two distinct
/// spiders.
pub fn check_identity1(zxd: &ZXDiagram, v: V) -> bool {
    is_zx(zxd.spider_type(v))
        && zxd.phase(v).is_zero()
        && zxd.degree(v) == 2
        && zxd.neighbor_set(v).len() == 2
}

/// Remove a phase-free spider of degree 2, joining its neighbours
pub fn identity1_unchecked(zxd: &mut ZXDiagram, v: V) {
    let ns = zxd.neighbor_set(v);
    zxd.rem_spider(v);
    zxd.add_edge(ns[0], ns[1]);
}

checked_rule1!(ZXDiagram, check_identity1, identity1_unchecked, identity1);

pub fn match_identity1(zxd: &ZXDiagram) -> Vec<Match> {
    zxd.spiders()
        .into_iter()
        .filter(|&v| check_identity1(zxd, v))
        .map(|v| Match::new(vec![v]))
        .collect()
}

fn is_wire_hbox(zxd: &ZXDiagram, h: V) -> bool {
    zxd.spider_type(h) == SpiderType::H && zxd.degree(h) == 2 && zxd.neighbor_set(h).len() == 2
}

/// Check [identity2_unchecked] applies
///
/// Either a Z and an X spider share two or more wires, or two Hadamard
/// boxes sit next to each other on a wire.
pub fn check_identity2(zxd: &ZXDiagram, v0: V, v1: V) -> bool {
    if v0 == v1 {
        return false;
    }
    let (t0, t1) = (zxd.spider_type(v0), zxd.spider_type(v1));
    if is_zx(t0) && t1 == t0.opposite() {
        zxd.edge_mul(v0, v1) >= 2
    } else {
        is_wire_hbox(zxd, v0) && is_wire_hbox(zxd, v1) && zxd.edge_mul(v0, v1) == 1
    }
}

/// Cancel parallel wires mod 2, or a pair of Hadamard boxes
pub fn identity2_unchecked(zxd: &mut ZXDiagram, v0: V, v1: V) {
    if zxd.spider_type(v0) == SpiderType::H {
        let a = zxd.neighbor_set(v0).into_iter().find(|&w| w != v1);
        let b = zxd.neighbor_set(v1).into_iter().find(|&w| w != v0);
        zxd.rem_spiders(&[v0, v1]);
        if let (Some(a), Some(b)) = (a, b) {
            if a != b {
                zxd.add_edge(a, b);
            }
        }
    } else {
        let m = zxd.edge_mul(v0, v1);
        zxd.rem_edge(v0, v1, m - m % 2);
    }
}

checked_rule2!(ZXDiagram, check_identity2, identity2_unchecked, identity2);

pub fn match_identity2(zxd: &ZXDiagram) -> Vec<Match> {
    let mut matches = Vec::new();
    let mut taken = FxHashSet::default();
    for v in zxd.spiders() {
        if taken.contains(&v) {
            continue;
        }
        if let Some(w) = zxd
            .neighbor_set(v)
            .into_iter()
            .find(|&w| w > v && !taken.contains(&w) && check_identity2(zxd, v, w))
        {
            taken.insert(v);
            taken.insert(w);
            matches.push(Match::new(vec![v, w]));
        }
    }
    matches
}

/// Whether `v0` comes before `v1` in the circuit: by column when both
/// have one, else by id.
fn precedes(zxd: &ZXDiagram, v0: V, v1: V) -> bool {
    match (zxd.column_loc(v0), zxd.column_loc(v1)) {
        (Some(c0), Some(c1)) => c0 < c1,
        _ => v0 < v1,
    }
}

/// Check [pi_copy_unchecked] applies
///
/// `v0` is a degree-2 spider with phase pi, wired once to `v1`, a Pauli
/// spider of the other colour further along the circuit.
pub fn check_pi_copy(zxd: &ZXDiagram, v0: V, v1: V) -> bool {
    let t0 = zxd.spider_type(v0);
    is_zx(t0)
        && zxd.phase(v0).is_pi()
        && zxd.degree(v0) == 2
        && zxd.neighbor_set(v0).len() == 2
        && zxd.edge_mul(v0, v1) == 1
        && zxd.spider_type(v1) == t0.opposite()
        && zxd.phase(v1).is_pauli()
        && precedes(zxd, v0, v1)
}

/// Push the pi phase of `v0` through `v1`
///
/// A copy of `v0` lands on every other wire of `v1`, and `v0` is removed.
/// Since `v1` is Pauli its phase is unchanged.
pub fn pi_copy_unchecked(zxd: &mut ZXDiagram, v0: V, v1: V) {
    let t0 = zxd.spider_type(v0);
    let u = zxd.neighbor_set(v0).into_iter().find(|&w| w != v1);
    for w in zxd.neighbor_set(v1) {
        if w != v0 {
            zxd.insert_spider(v1, w, t0, Phase::pi());
        }
    }
    zxd.rem_spider(v0);
    if let Some(u) = u {
        zxd.add_edge(u, v1);
    }
}

checked_rule2!(ZXDiagram, check_pi_copy, pi_copy_unchecked, pi_copy);

pub fn match_pi_copy(zxd: &ZXDiagram) -> Vec<Match> {
    let mut matches = Vec::new();
    let mut taken = FxHashSet::default();
    for v in zxd.spiders() {
        if taken.contains(&v) {
            continue;
        }
        if let Some(w) = zxd
            .neighbor_set(v)
            .into_iter()
            .find(|&w| !taken.contains(&w) && check_pi_copy(zxd, v, w))
        {
            taken.insert(v);
            taken.insert(w);
            matches.push(Match::new(vec![v, w]));
        }
    }
    matches
}

/// The Hadamard boxes around `v`, in ascending order.
pub fn color_change_boxes(zxd: &ZXDiagram, v: V) -> Vec<V> {
    zxd.neighbor_set(v)
        .into_iter()
        .filter(|&h| zxd.spider_type(h) == SpiderType::H)
        .collect()
}

/// Check [color_change_unchecked] applies
///
/// Every wire of the spider must lead into its own Hadamard box.
pub fn check_color_change(zxd: &ZXDiagram, v: V) -> bool {
    is_zx(zxd.spider_type(v))
        && zxd.degree(v) > 0
        && zxd
            .neighbor_set(v)
            .into_iter()
            .all(|h| is_wire_hbox(zxd, h) && zxd.edge_mul(v, h) == 1)
}

/// Flip the colour of `v`, absorbing the Hadamard boxes around it
pub fn color_change_unchecked(zxd: &mut ZXDiagram, v: V) {
    for h in color_change_boxes(zxd, v) {
        let w = zxd.neighbor_set(h).into_iter().find(|&w| w != v);
        zxd.rem_spider(h);
        if let Some(w) = w {
            zxd.add_edge(v, w);
        }
    }
    let t = zxd.spider_type(v).opposite();
    zxd.set_spider_type(v, t);
}

checked_rule1!(ZXDiagram, check_color_change, color_change_unchecked, color_change);

pub fn match_color_change(zxd: &ZXDiagram) -> Vec<Match> {
    let mut matches = Vec::new();
    let mut taken = FxHashSet::default();
    for v in zxd.spiders() {
        if taken.contains(&v) || !check_color_change(zxd, v) {
            continue;
        }
        let hs = color_change_boxes(zxd, v);
        if hs.iter().any(|h| taken.contains(h)) {
            continue;
        }
        taken.insert(v);
        taken.extend(hs.iter().copied());
        let mut vs = vec![v];
        vs.extend(hs);
        matches.push(Match::new(vs));
    }
    matches
}
