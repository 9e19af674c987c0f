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

use crate::graph::V;

/// Errors raised while building or rewriting a diagram.
///
/// Operations returning one of these leave the diagram untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ZXError {
    /// A gate referred to a qubit the diagram doesn't have.
    #[error("Invalid qubit location {qubit} (diagram has {nqubits} qubits)")]
    InvalidLocation { qubit: usize, nqubits: usize },
    /// A gate was given the wrong number of qubits.
    #[error("Gate {gate} acts on {expected} qubits, got {got}")]
    InvalidArity {
        gate: &'static str,
        expected: usize,
        got: usize,
    },
    /// A floating-point phase was given with autoconvert disabled, or it
    /// could not be turned into a rational.
    #[error("Invalid phase {0}: expected an exact rational multiple of pi")]
    InvalidPhase(f64),
    /// A match no longer applies to the diagram it is rewriting.
    #[error("Stale match for rule {rule} on spiders {vertices:?}")]
    StaleMatch { rule: String, vertices: Vec<V> },
    /// Reading a gate stream back failed at the given spider.
    #[error("Diagram is not circuit-like at spider {0}")]
    NotCircuitLike(V),
    /// A Hadamard box without exactly two wires.
    #[error("Hadamard box {spider} has degree {degree}, expected 2")]
    InvalidHBox { spider: V, degree: usize },
}
