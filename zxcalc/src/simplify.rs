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

//! Drivers that apply rules to a diagram, and the two fixed pipelines
//! built from them.

use crate::circuit::Circuit;
use crate::diagram::ZXDiagram;
use crate::error::ZXError;
use crate::extract::{circuit_extraction, ExtractError};
use crate::graph::*;
use crate::rules::*;
use crate::zx_graph::ZXGraph;
use rustc_hash::FxHashSet;
use std::fmt::Display;

/// All non-overlapping places `rule` applies, in a deterministic order.
pub fn matches<D, R: Rule<D>>(rule: &R, d: &D) -> Vec<Match> {
    rule.find_matches(d)
}

/// Applies every match in `ms` that is still valid and returns how many
/// were applied.
///
/// A match is skipped when one of its spiders was already touched by an
/// earlier match of the batch, or when it no longer applies.
pub fn rewrite<D, R: Rule<D> + Display>(rule: &R, d: &mut D, ms: &[Match]) -> usize {
    let mut touched = FxHashSet::default();
    let mut count = 0;
    for m in ms {
        if m.vertices().iter().any(|v| touched.contains(v)) || !rule.check(d, m) {
            continue;
        }
        rule.apply_unchecked(d, m);
        touched.extend(m.vertices().iter().copied());
        count += 1;
    }
    log::debug!("rewrite {}: applied {} of {} matches", rule, count, ms.len());
    count
}

/// Applies a single match, failing if it no longer applies.
pub fn rewrite_one<D, R: Rule<D> + Display>(rule: &R, d: &mut D, m: &Match) -> Result<(), ZXError> {
    if !rule.check(d, m) {
        return Err(ZXError::StaleMatch {
            rule: rule.to_string(),
            vertices: m.vertices().to_vec(),
        });
    }
    rule.apply_unchecked(d, m);
    Ok(())
}

/// One round of matching and rewriting. Returns the number of rewrites.
pub fn replace<D, R: Rule<D> + Display>(rule: &R, d: &mut D) -> usize {
    let ms = matches(rule, d);
    rewrite(rule, d, &ms)
}

/// Matches and rewrites until `rule` no longer applies anywhere. Returns
/// the total number of rewrites.
pub fn simplify<D, R: Rule<D> + Display>(rule: &R, d: &mut D) -> usize {
    let mut total = 0;
    loop {
        let ms = matches(rule, d);
        if ms.is_empty() {
            break;
        }
        let n = rewrite(rule, d, &ms);
        if n == 0 {
            log::warn!("simplify {}: {} matches found but none applied", rule, ms.len());
            break;
        }
        total += n;
    }
    log::debug!("simplify {}: {} rewrites", rule, total);
    total
}

/// Simplifies the Clifford part of a circuit and extracts a new circuit
/// implementing the same map up to a global phase.
///
/// On failure the caller still has the untouched input to fall back on.
pub fn clifford_simplification(zxd: &ZXDiagram) -> Result<Circuit, ExtractError> {
    let mut zxg = ZXGraph::from_diagram(zxd);
    simplify(&GraphRule::LocalComp, &mut zxg);
    simplify(&GraphRule::Pivot, &mut zxg);
    replace(&GraphRule::PivotBoundary, &mut zxg);
    let c = circuit_extraction(&zxg)?;
    log::debug!(
        "clifford simplification: {} gates, T-count {} -> {}",
        c.num_gates(),
        zxd.tcount(),
        c.tcount()
    );
    Ok(c)
}

/// Reduces the T-count of a circuit while keeping its wires and gates.
///
/// Phases are merged on a graph-like copy, and each merge is replayed on
/// the original diagram. Spiders left with a zero phase are then removed.
pub fn phase_teleportation(zxd: &ZXDiagram) -> ZXDiagram {
    let mut zxg = ZXGraph::from_diagram(zxd);
    loop {
        simplify(&GraphRule::LocalComp, &mut zxg);
        simplify(&GraphRule::Pivot, &mut zxg);
        simplify(&GraphRule::PivotGadget, &mut zxg);
        simplify(&GraphRule::PivotBoundaryGadget, &mut zxg);
        let n = replace(&GraphRule::Identity, &mut zxg)
            + replace(&GraphRule::GadgetFusion, &mut zxg);
        if n == 0 {
            break;
        }
    }

    let mut master = zxg.into_master();
    simplify(&DiagramRule::Identity1, &mut master);
    simplify(&DiagramRule::Identity2, &mut master);
    log::debug!("phase teleportation: T-count {} -> {}", zxd.tcount(), master.tcount());
    master
}
