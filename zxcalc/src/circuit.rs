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

use crate::gate::*;
use crate::linalg::RowOps;
use std::collections::VecDeque;
use std::fmt;

/// A quantum circuit: a qubit count and an ordered gate stream
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Circuit {
    nqubits: usize,
    pub gates: VecDeque<Gate>,
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct CircuitStats {
    pub qubits: usize,
    pub total: usize,
    pub oneq: usize,
    pub twoq: usize,
    pub cliff: usize,
    pub non_cliff: usize,
}

impl CircuitStats {
    pub fn make(c: &Circuit) -> Self {
        let mut s = CircuitStats {
            qubits: c.num_qubits(),
            total: c.num_gates(),
            oneq: 0,
            twoq: 0,
            cliff: 0,
            non_cliff: 0,
        };
        for g in &c.gates {
            if g.qs.len() == 1 {
                s.oneq += 1;
            } else {
                s.twoq += 1;
            }

            if g.is_non_clifford() {
                s.non_cliff += 1;
            } else {
                s.cliff += 1;
            }
        }
        s
    }
}

impl fmt::Display for CircuitStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Circuit with {} qubits, {} gates\n  1-qubit: {}\n  2-qubit: {}\n  clifford: {}\n  non-clifford: {}",
            self.qubits, self.total, self.oneq, self.twoq, self.cliff, self.non_cliff
        )
    }
}

impl Circuit {
    pub fn new(nqubits: usize) -> Circuit {
        Circuit {
            gates: VecDeque::new(),
            nqubits,
        }
    }

    pub fn num_qubits(&self) -> usize {
        self.nqubits
    }

    pub fn num_gates(&self) -> usize {
        self.gates.len()
    }

    pub fn num_gates_of_type(&self, t: GType) -> usize {
        self.gates.iter().filter(|g| g.t == t).count()
    }

    pub fn push(&mut self, g: Gate) {
        self.gates.push_back(g);
    }

    pub fn push_front(&mut self, g: Gate) {
        self.gates.push_front(g);
    }

    /// Number of phase gates that are not Clifford.
    pub fn tcount(&self) -> usize {
        self.gates.iter().filter(|g| g.is_non_clifford()).count()
    }

    pub fn stats(&self) -> CircuitStats {
        CircuitStats::make(self)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "qreg q[{}];", self.num_qubits())?;

        for g in &self.gates {
            writeln!(f, "{};", g)?;
        }

        Ok(())
    }
}

/// A circuit can pretend to be a matrix, where adding row r0 to row r1
/// appends a CNOT with control r1 and target r0.
impl RowOps for Circuit {
    fn row_add(&mut self, r0: usize, r1: usize) {
        self.push(Gate::new(CNOT, vec![r1, r0]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::Mat2;

    #[test]
    fn stats() {
        let mut c = Circuit::new(2);
        c.push(Gate::new(HAD, vec![0]));
        c.push(Gate::new(CNOT, vec![0, 1]));
        c.push(Gate::new_with_phase(ZPhase, vec![1], (1, 4)));
        c.push_front(Gate::new_with_phase(XPhase, vec![0], (1, 2)));

        let s = c.stats();
        assert_eq!(s.total, 4);
        assert_eq!(s.oneq, 3);
        assert_eq!(s.twoq, 1);
        assert_eq!(s.non_cliff, 1);
        assert_eq!(c.tcount(), 1);
        assert_eq!(c.gates[0].t, XPhase);
        assert_eq!(c.num_gates_of_type(CNOT), 1);
    }

    #[test]
    fn row_ops_become_cnots() {
        let mut c = Circuit::new(2);
        let mut m = Mat2::new(vec![vec![1, 1], vec![0, 1]]);
        m.gauss_x(true, &mut c);
        assert_eq!(c.gates.len(), 1);
        assert_eq!(c.gates[0], Gate::new(CNOT, vec![0, 1]));
    }

    #[test]
    fn display() {
        let mut c = Circuit::new(1);
        c.push(Gate::new(HAD, vec![0]));
        assert_eq!(c.to_string(), "qreg q[1];\nh q[0];\n");
    }
}
