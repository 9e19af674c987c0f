//! The `opt` CLI subcommand.

use clap::{Args, Parser, ValueEnum};
use std::fs;
use std::path::PathBuf;

use crate::circuit::Circuit;
use crate::diagram::ZXDiagram;
use crate::generate::{arithmetic_example, clifford_example};
use crate::simplify::{clifford_simplification, phase_teleportation};

use super::CliError;

/// Run the circuit optimizer.
#[derive(Parser, Debug)]
pub struct OptArgs {
    /// Circuit to optimize.
    #[command(flatten)]
    source: Source,

    /// Number of qubits of a random circuit.
    #[arg(long, default_value_t = 4)]
    qubits: usize,

    /// Number of gates drawn for a random circuit.
    #[arg(long, default_value_t = 40)]
    depth: usize,

    /// Probability of drawing a T gate for a random circuit.
    #[arg(long, default_value_t = 0.1)]
    p_t: f32,

    /// Seed for a random circuit. Drawn from the OS if not given.
    #[arg(long)]
    seed: Option<u64>,

    /// Switch to select the optimization method. Defaults to `--clifford`.
    #[command(flatten)]
    method: Option<OptMethod>,

    /// Print the optimized gates instead of circuit statistics.
    #[arg(long)]
    print: bool,

    /// Output to a file instead of printing the result.
    #[arg(long, short)]
    out: Option<PathBuf>,
}

/// One of the built-in example circuits.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Example {
    Clifford,
    Arithmetic,
}

/// Where the input circuit comes from.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct Source {
    /// Optimize a built-in example circuit.
    #[arg(long, value_enum)]
    example: Option<Example>,

    /// Optimize a random Clifford+T circuit.
    #[arg(long)]
    random: bool,
}

impl OptArgs {
    fn input(&self) -> Circuit {
        match self.source.example {
            Some(Example::Clifford) => clifford_example(),
            Some(Example::Arithmetic) => arithmetic_example(),
            None => {
                let mut builder = Circuit::random();
                if let Some(seed) = self.seed {
                    builder.seed(seed);
                }
                builder
                    .qubits(self.qubits)
                    .depth(self.depth)
                    .clifford_t(self.p_t)
                    .build()
            }
        }
    }

    /// Run the `opt` command using the provided arguments.
    pub fn run(self) -> Result<(), CliError> {
        let circ = self.input();
        let zxd = ZXDiagram::from_circuit(&circ)?;
        let result = self.method.as_ref().unwrap_or(&OptMethod::default()).optimize(&zxd)?;
        log::info!("T-count {} -> {}", circ.tcount(), result.tcount());

        let text = if self.print {
            result.to_string()
        } else {
            format!("Input: {}\nOutput: {}\n", circ.stats(), result.stats())
        };
        if let Some(out_path) = self.out {
            fs::write(out_path, text)?;
        } else {
            print!("{text}");
        }
        Ok(())
    }
}

/// Optimization method.
#[derive(Args, Debug)]
#[group(multiple = false)]
// clap has no enum arg groups, so at most one of these flags is set.
pub struct OptMethod {
    /// Simplify the Clifford part and extract a new circuit (default).
    #[arg(long)]
    clifford: bool,

    /// Reduce the T-count while keeping the circuit structure.
    #[arg(long)]
    teleport: bool,
}

impl Default for OptMethod {
    fn default() -> Self {
        OptMethod {
            clifford: true,
            teleport: false,
        }
    }
}

impl OptMethod {
    fn optimize(&self, zxd: &ZXDiagram) -> Result<Circuit, CliError> {
        if self.teleport {
            Ok(phase_teleportation(zxd).to_circuit()?)
        } else {
            Ok(clifford_simplification(zxd)?)
        }
    }
}
