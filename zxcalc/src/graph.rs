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

use crate::phase::Phase;
use derive_more::Display;
use rustc_hash::FxHashMap;

pub type V = usize;

/// The kind of a spider.
#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpiderType {
    #[display("input")]
    In,
    #[display("output")]
    Out,
    #[display("Z")]
    Z,
    #[display("X")]
    X,
    /// Degree-2 Hadamard box.
    #[display("H")]
    H,
}

impl SpiderType {
    pub fn is_boundary(&self) -> bool {
        matches!(self, SpiderType::In | SpiderType::Out)
    }

    /// Z and X spiders are the only ones carrying a phase.
    pub fn is_phased(&self) -> bool {
        matches!(self, SpiderType::Z | SpiderType::X)
    }

    /// Swaps Z and X, leaving other kinds alone.
    pub fn opposite(&self) -> SpiderType {
        match self {
            SpiderType::Z => SpiderType::X,
            SpiderType::X => SpiderType::Z,
            t => *t,
        }
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EType {
    /// Plain edge.
    #[default]
    N,
    /// Hadamard edge.
    H,
}

impl EType {
    pub fn opposite(&self) -> EType {
        match self {
            EType::N => EType::H,
            EType::H => EType::N,
        }
    }

    /// Type of the edge left behind when a wire through a phase-free
    /// spider is contracted.
    pub fn merge(et0: EType, et1: EType) -> EType {
        if et0 == EType::N {
            et1
        } else {
            et1.opposite()
        }
    }
}

/// Qubit and column coordinates of the spiders of a circuit-like diagram.
///
/// Columns only need to be ordered consistently with the gates they came
/// from, so new gates take a column past the current extremes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZXLayout {
    nbits: usize,
    qubit: FxHashMap<V, usize>,
    column: FxHashMap<V, f64>,
    min_col: f64,
    max_col: f64,
}

impl ZXLayout {
    pub fn new(nbits: usize) -> Self {
        ZXLayout {
            nbits,
            ..Default::default()
        }
    }

    pub fn nbits(&self) -> usize {
        self.nbits
    }

    pub fn qubit_loc(&self, v: V) -> Option<usize> {
        self.qubit.get(&v).copied()
    }

    pub fn column_loc(&self, v: V) -> Option<f64> {
        self.column.get(&v).copied()
    }

    pub fn set_loc(&mut self, v: V, qubit: Option<usize>, column: Option<f64>) {
        match qubit {
            Some(q) => self.qubit.insert(v, q),
            None => self.qubit.remove(&v),
        };
        if let Some(c) = column {
            self.min_col = self.min_col.min(c);
            self.max_col = self.max_col.max(c);
            self.column.insert(v, c);
        } else {
            self.column.remove(&v);
        }
    }

    /// A column after every column used so far.
    pub fn next_column(&self) -> f64 {
        self.max_col + 1.0
    }

    /// A column before every column used so far.
    pub fn prev_column(&self) -> f64 {
        self.min_col - 1.0
    }

    pub fn remove(&mut self, v: V) {
        self.qubit.remove(&v);
        self.column.remove(&v);
    }
}

/// Read access shared by circuit-form and graph-like diagrams.
pub trait ZXLike {
    /// Spider ids in ascending order.
    fn spiders(&self) -> Vec<V>;
    fn spider_type(&self, v: V) -> SpiderType;
    /// Phase of a spider. Zero for anything that isn't a Z or X spider.
    fn phase(&self, v: V) -> Phase;
    /// Neighbours of a spider, repeated once per parallel edge.
    fn neighbors(&self, v: V) -> Vec<V>;
    fn degree(&self, v: V) -> usize;
    fn contains_spider(&self, v: V) -> bool;
    /// Number of spiders.
    fn num_vertices(&self) -> usize;
    /// Number of edges, counting multiplicity.
    fn num_edges(&self) -> usize;
    fn layout(&self) -> &ZXLayout;
    fn inputs(&self) -> &[V];
    fn outputs(&self) -> &[V];

    fn qubit_loc(&self, v: V) -> Option<usize> {
        self.layout().qubit_loc(v)
    }

    fn column_loc(&self, v: V) -> Option<f64> {
        self.layout().column_loc(v)
    }

    /// Number of Z or X spiders whose phase is not a multiple of pi/2.
    fn tcount(&self) -> usize {
        self.spiders()
            .into_iter()
            .filter(|&v| self.spider_type(v).is_phased() && !self.phase(v).is_clifford())
            .count()
    }
}
