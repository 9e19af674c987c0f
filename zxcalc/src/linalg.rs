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

//! Matrices and Gaussian elimination over F2

use std::fmt;

/// A dense matrix over F2
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Mat2 {
    d: Vec<Vec<u8>>,
}

/// Anything that can record elementary row operations.
pub trait RowOps {
    /// Add r0 to r1
    fn row_add(&mut self, r0: usize, r1: usize);
}

/// Make unit implement RowOps to allow optional args
impl RowOps for () {
    fn row_add(&mut self, _: usize, _: usize) {}
}

impl Mat2 {
    pub fn new(d: Vec<Vec<u8>>) -> Mat2 {
        Mat2 { d }
    }

    /// Build a matrix with the given number of rows and columns. Place a 1
    /// wherever f(i,j) is true.
    pub fn build(rows: usize, cols: usize, f: impl Fn(usize, usize) -> bool) -> Mat2 {
        Mat2 {
            d: (0..rows)
                .map(|i| (0..cols).map(|j| u8::from(f(i, j))).collect())
                .collect(),
        }
    }

    pub fn id(dim: usize) -> Mat2 {
        Mat2::build(dim, dim, |i, j| i == j)
    }

    pub fn num_rows(&self) -> usize {
        self.d.len()
    }

    pub fn num_cols(&self) -> usize {
        self.d.first().map_or(0, |r| r.len())
    }

    /// Row-reduces the matrix and returns its rank.
    ///
    /// Only row additions are used, never swaps, and each one is mirrored
    /// into `x`. If `g * m` is the reduced form, `x` becomes `g * x`.
    /// With `full_reduce`, entries above each pivot are cleared too.
    pub fn gauss_x(&mut self, full_reduce: bool, x: &mut impl RowOps) -> usize {
        let rows = self.num_rows();
        let mut pivot_row = 0;

        for p in 0..self.num_cols() {
            if pivot_row == rows {
                break;
            }
            let Some(r0) = (pivot_row..rows).find(|&r| self.d[r][p] != 0) else {
                continue;
            };
            if r0 != pivot_row {
                self.row_add(r0, pivot_row);
                x.row_add(r0, pivot_row);
            }
            let start = if full_reduce { 0 } else { pivot_row + 1 };
            for r1 in start..rows {
                if r1 != pivot_row && self.d[r1][p] != 0 {
                    self.row_add(pivot_row, r1);
                    x.row_add(pivot_row, r1);
                }
            }
            pivot_row += 1;
        }

        pivot_row
    }

    pub fn gauss(&mut self, full_reduce: bool) -> usize {
        self.gauss_x(full_reduce, &mut ())
    }

    pub fn rank(&self) -> usize {
        self.clone().gauss(false)
    }

    /// Hamming weight of the given row
    pub fn row_weight(&self, i: usize) -> usize {
        self.d[i].iter().filter(|&&b| b != 0).count()
    }
}

impl RowOps for Mat2 {
    fn row_add(&mut self, r0: usize, r1: usize) {
        for i in 0..self.num_cols() {
            self.d[r1][i] ^= self.d[r0][i];
        }
    }
}

impl fmt::Display for Mat2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.d {
            write!(f, "[ ")?;
            for x in row {
                write!(f, "{} ", x)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

impl std::ops::Index<(usize, usize)> for Mat2 {
    type Output = u8;
    fn index(&self, idx: (usize, usize)) -> &Self::Output {
        &self.d[idx.0][idx.1]
    }
}

impl std::ops::Index<usize> for Mat2 {
    type Output = Vec<u8>;
    fn index(&self, idx: usize) -> &Self::Output {
        &self.d[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn records_inverse() {
        let mut m = Mat2::new(vec![vec![1, 1, 1], vec![0, 1, 1], vec![0, 0, 1]]);
        let mut x = Mat2::id(3);
        assert_eq!(m.gauss_x(true, &mut x), 3);
        assert_eq!(m, Mat2::id(3));
        assert_eq!(
            x,
            Mat2::new(vec![vec![1, 1, 0], vec![0, 1, 1], vec![0, 0, 1]])
        );
    }

    #[rstest]
    #[case(vec![vec![1, 0], vec![0, 1]], 2)]
    #[case(vec![vec![1, 1], vec![1, 1]], 1)]
    #[case(vec![vec![0, 0, 0], vec![0, 0, 0]], 0)]
    #[case(vec![vec![1, 1, 0], vec![0, 1, 1], vec![1, 0, 1]], 2)]
    fn rank(#[case] d: Vec<Vec<u8>>, #[case] expected: usize) {
        assert_eq!(Mat2::new(d).rank(), expected);
    }

    #[test]
    fn partial_reduce_keeps_upper_entries() {
        let mut m = Mat2::new(vec![vec![1, 1], vec![0, 1]]);
        m.gauss(false);
        assert_eq!(m[(0, 1)], 1);
        m.gauss(true);
        assert_eq!(m, Mat2::id(2));
        assert_eq!(m.row_weight(0), 1);
    }
}
