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

//! Circuit generators: a seeded random Clifford+T builder, and two fixed
//! example circuits used by the tests and the command line tool.

use crate::circuit::*;
use crate::gate::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct RandomCircuitBuilder {
    pub rng: StdRng,
    pub qubits: usize,
    pub depth: usize,
    pub p_cnot: f32,
    pub p_cz: f32,
    pub p_h: f32,
    pub p_s: f32,
    pub p_t: f32,
}

impl Circuit {
    pub fn random() -> RandomCircuitBuilder {
        RandomCircuitBuilder {
            rng: StdRng::from_os_rng(),
            qubits: 0,
            depth: 0,
            p_cnot: 0.0,
            p_cz: 0.0,
            p_h: 0.0,
            p_s: 0.0,
            p_t: 0.0,
        }
    }
}

impl RandomCircuitBuilder {
    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn qubits(&mut self, qubits: usize) -> &mut Self {
        self.qubits = qubits;
        self
    }

    pub fn depth(&mut self, depth: usize) -> &mut Self {
        self.depth = depth;
        self
    }

    pub fn p_cnot(&mut self, p_cnot: f32) -> &mut Self {
        self.p_cnot = p_cnot;
        self
    }

    pub fn p_cz(&mut self, p_cz: f32) -> &mut Self {
        self.p_cz = p_cz;
        self
    }

    pub fn p_h(&mut self, p_h: f32) -> &mut Self {
        self.p_h = p_h;
        self
    }

    pub fn p_s(&mut self, p_s: f32) -> &mut Self {
        self.p_s = p_s;
        self
    }

    pub fn p_t(&mut self, p_t: f32) -> &mut Self {
        self.p_t = p_t;
        self
    }

    /// Distribute the remaining probability evenly among Clifford (CNOT, H, S) gates
    pub fn with_cliffords(&mut self) -> &mut Self {
        let p = (1.0 - self.p_t - self.p_cz) / 3.0;
        self.p_cnot = p;
        self.p_h = p;
        self.p_s = p;
        self
    }

    /// Convenience method for generating Clifford+T circuits
    ///
    /// Takes a probability of T gates, then distributes the rest
    /// of the probability evenly among CNOT, H, and S.
    pub fn clifford_t(&mut self, p_t: f32) -> &mut Self {
        self.p_t(p_t).with_cliffords()
    }

    pub fn uniform(&mut self) -> &mut Self {
        self.p_cnot = 0.2;
        self.p_cz = 0.2;
        self.p_h = 0.2;
        self.p_s = 0.2;
        self.p_t = 0.2;
        self
    }

    /// Draws `depth` gates. S and T come out as Z phases of pi/2 and pi/4.
    /// On a single qubit, draws that land on a two-qubit gate are dropped.
    pub fn build(&mut self) -> Circuit {
        let mut c = Circuit::new(self.qubits);
        if self.qubits == 0 {
            return c;
        }

        for _ in 0..self.depth {
            let p: f32 = self.rng.random();
            let q0 = self.rng.random_range(0..self.qubits);
            let q1 = if self.qubits > 1 {
                let q1 = self.rng.random_range(0..self.qubits - 1);
                Some(if q1 >= q0 { q1 + 1 } else { q1 })
            } else {
                None
            };

            let mut p0 = self.p_cnot;
            if p < p0 {
                if let Some(q1) = q1 {
                    c.push(Gate::new(CNOT, vec![q0, q1]));
                }
                continue;
            }

            p0 += self.p_cz;
            if p < p0 {
                if let Some(q1) = q1 {
                    c.push(Gate::new(CZ, vec![q0, q1]));
                }
                continue;
            }

            p0 += self.p_h;
            if p < p0 {
                c.push(Gate::new(HAD, vec![q0]));
                continue;
            }

            p0 += self.p_s;
            if p < p0 {
                c.push(Gate::new_with_phase(ZPhase, vec![q0], (1, 2)));
                continue;
            }

            p0 += self.p_t;
            if p < p0 {
                c.push(Gate::new_with_phase(ZPhase, vec![q0], (1, 4)));
            }
        }

        c
    }
}

/// Gates as `(type, qubits, phase in quarters of pi)`.
type GateTable = [(GType, &'static [usize], i64)];

fn from_table(nqubits: usize, table: &GateTable) -> Circuit {
    let mut c = Circuit::new(nqubits);
    for &(t, qs, k) in table {
        if t.has_phase() {
            c.push(Gate::new_with_phase(t, qs.to_vec(), (k, 4)));
        } else {
            c.push(Gate::new(t, qs.to_vec()));
        }
    }
    c
}

#[rustfmt::skip]
const CLIFFORD: &GateTable = &[
    (ZPhase, &[0], 6),
    (HAD, &[0], 0),
    (ZPhase, &[0], 2),
    (HAD, &[3], 0),
    (CZ, &[3, 0], 0),
    (CNOT, &[3, 0], 0),
    (HAD, &[0], 0),
    (HAD, &[3], 0),
    (ZPhase, &[0], 1),
    (ZPhase, &[3], 6),
    (XPhase, &[3], 4),
    (HAD, &[0], 0),
    (ZPhase, &[3], 2),
    (XPhase, &[3], 4),
    (ZPhase, &[1], 2),
    (CNOT, &[1, 2], 0),
    (HAD, &[1], 0),
    (CNOT, &[1, 2], 0),
    (ZPhase, &[1], 1),
    (ZPhase, &[2], 2),
    (HAD, &[1], 0),
    (HAD, &[2], 0),
    (ZPhase, &[2], 2),
    (CNOT, &[1, 2], 0),
];

#[rustfmt::skip]
const ARITHMETIC: &GateTable = &[
    (XPhase, &[4], 4),
    (HAD, &[4], 0),
    (ZPhase, &[4], 0),
    (CNOT, &[3, 4], 0),
    (ZPhase, &[4], 7),
    (CNOT, &[0, 4], 0),
    (ZPhase, &[4], 1),
    (CNOT, &[3, 4], 0),
    (ZPhase, &[3], 1),
    (ZPhase, &[4], 7),
    (CNOT, &[0, 4], 0),
    (CNOT, &[0, 3], 0),
    (ZPhase, &[4], 1),
    (ZPhase, &[0], 1),
    (ZPhase, &[3], 7),
    (CNOT, &[0, 3], 0),
    (CNOT, &[3, 4], 0),
    (ZPhase, &[4], 7),
    (CNOT, &[2, 4], 0),
    (ZPhase, &[4], 1),
    (CNOT, &[3, 4], 0),
    (ZPhase, &[3], 1),
    (ZPhase, &[4], 7),
    (CNOT, &[2, 4], 0),
    (CNOT, &[2, 3], 0),
    (ZPhase, &[4], 1),
    (ZPhase, &[2], 1),
    (ZPhase, &[3], 7),
    (HAD, &[4], 0),
    (ZPhase, &[4], 0),
    (CNOT, &[2, 3], 0),
    (CNOT, &[3, 4], 0),
    (HAD, &[4], 0),
    (ZPhase, &[4], 0),
    (CNOT, &[2, 4], 0),
    (ZPhase, &[4], 7),
    (CNOT, &[1, 4], 0),
    (ZPhase, &[4], 1),
    (CNOT, &[2, 4], 0),
    (ZPhase, &[2], 1),
    (ZPhase, &[4], 7),
    (CNOT, &[1, 4], 0),
    (CNOT, &[1, 2], 0),
    (ZPhase, &[4], 1),
    (HAD, &[4], 0),
    (ZPhase, &[1], 1),
    (ZPhase, &[2], 7),
    (ZPhase, &[4], 0),
    (CNOT, &[1, 2], 0),
    (CNOT, &[2, 4], 0),
    (HAD, &[4], 0),
    (ZPhase, &[4], 0),
    (CNOT, &[1, 4], 0),
    (ZPhase, &[4], 7),
    (CNOT, &[0, 4], 0),
    (ZPhase, &[4], 1),
    (CNOT, &[1, 4], 0),
    (ZPhase, &[1], 1),
    (ZPhase, &[4], 7),
    (CNOT, &[0, 4], 0),
    (CNOT, &[0, 1], 0),
    (ZPhase, &[4], 1),
    (ZPhase, &[0], 1),
    (ZPhase, &[1], 7),
    (HAD, &[4], 0),
    (ZPhase, &[4], 0),
    (CNOT, &[0, 1], 0),
    (CNOT, &[1, 4], 0),
    (CNOT, &[0, 4], 0),
];

/// A 4-qubit Clifford+T circuit with two T gates.
pub fn clifford_example() -> Circuit {
    from_table(4, CLIFFORD)
}

/// A 5-qubit reversible arithmetic circuit with 28 T gates, written with
/// Hadamards, CNOTs and pi/4 rotations.
pub fn arithmetic_example() -> Circuit {
    from_table(5, ARITHMETIC)
}
