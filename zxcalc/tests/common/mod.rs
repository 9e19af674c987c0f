#![allow(dead_code)]

//! A dense state-vector simulator for checking that two circuits
//! implement the same linear map.

use approx::abs_diff_eq;
use num::Complex;
use std::f64::consts::{FRAC_1_SQRT_2, PI};
use zxcalc::circuit::Circuit;
use zxcalc::gate::*;

pub type C64 = Complex<f64>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Applies every gate of `c` to `state`. Qubit 0 is the most significant
/// bit of a basis index.
pub fn apply(c: &Circuit, state: &mut Vec<C64>) {
    let n = c.num_qubits();
    let mask = |q: usize| 1usize << (n - 1 - q);
    for g in &c.gates {
        let mut next = vec![C64::new(0.0, 0.0); state.len()];
        let rot = C64::from_polar(1.0, PI * g.phase.to_f64());
        for (b, &a) in state.iter().enumerate() {
            if a == C64::new(0.0, 0.0) {
                continue;
            }
            match g.t {
                ZPhase => next[b] += if b & mask(g.qs[0]) != 0 { a * rot } else { a },
                XPhase => {
                    let one = C64::new(1.0, 0.0);
                    next[b] += a * (one + rot) * 0.5;
                    next[b ^ mask(g.qs[0])] += a * (one - rot) * 0.5;
                }
                HAD => {
                    let m = mask(g.qs[0]);
                    let a = a * FRAC_1_SQRT_2;
                    next[b & !m] += a;
                    next[b | m] += if b & m != 0 { -a } else { a };
                }
                CNOT => {
                    let b1 = if b & mask(g.qs[0]) != 0 { b ^ mask(g.qs[1]) } else { b };
                    next[b1] += a;
                }
                CZ => {
                    let both = b & mask(g.qs[0]) != 0 && b & mask(g.qs[1]) != 0;
                    next[b] += if both { -a } else { a };
                }
                SWAP => {
                    let (m0, m1) = (mask(g.qs[0]), mask(g.qs[1]));
                    let b1 = if (b & m0 != 0) != (b & m1 != 0) { b ^ m0 ^ m1 } else { b };
                    next[b1] += a;
                }
            }
        }
        *state = next;
    }
}

/// The matrix of `c`, as the list of images of the basis states.
pub fn unitary(c: &Circuit) -> Vec<Vec<C64>> {
    let dim = 1 << c.num_qubits();
    (0..dim)
        .map(|b| {
            let mut state = vec![C64::new(0.0, 0.0); dim];
            state[b] = C64::new(1.0, 0.0);
            apply(c, &mut state);
            state
        })
        .collect()
}

/// Whether two circuits implement the same map up to a global phase.
pub fn equal_up_to_phase(c0: &Circuit, c1: &Circuit) -> bool {
    if c0.num_qubits() != c1.num_qubits() {
        return false;
    }
    let (u0, u1) = (unitary(c0), unitary(c1));
    let pairs: Vec<(C64, C64)> = u0
        .iter()
        .flatten()
        .copied()
        .zip(u1.iter().flatten().copied())
        .collect();

    let Some(&(a, b)) = pairs.iter().find(|(a, _)| a.norm() > 1e-6) else {
        return false;
    };
    let phase = b / a;
    pairs.iter().all(|&(a, b)| {
        let d = a * phase;
        abs_diff_eq!(d.re, b.re, epsilon = 1e-9) && abs_diff_eq!(d.im, b.im, epsilon = 1e-9)
    })
}
