mod common;

use common::{equal_up_to_phase, init_logger};
use rstest::rstest;
use zxcalc::circuit::Circuit;
use zxcalc::gate::*;
use zxcalc::generate::{arithmetic_example, clifford_example};
use zxcalc::*;

fn random_circuit(seed: u64, qubits: usize, uniform: bool) -> Circuit {
    let mut builder = Circuit::random();
    builder.seed(seed).qubits(qubits).depth(30);
    if uniform {
        builder.uniform();
    } else {
        builder.clifford_t(0.2);
    }
    builder.build()
}

#[rstest]
#[case(1, 2, false)]
#[case(2, 3, false)]
#[case(3, 4, false)]
#[case(4, 3, true)]
#[case(5, 4, true)]
fn read_back_is_exact(#[case] seed: u64, #[case] qubits: usize, #[case] uniform: bool) {
    let c = random_circuit(seed, qubits, uniform);
    let zxd = ZXDiagram::from_circuit(&c).unwrap();
    let c1 = zxd.to_circuit().unwrap();
    assert_eq!(c1, c);
}

#[rstest]
#[case(1, 2, false)]
#[case(2, 3, false)]
#[case(3, 4, false)]
#[case(4, 3, true)]
#[case(5, 4, true)]
fn extraction_preserves_the_map(#[case] seed: u64, #[case] qubits: usize, #[case] uniform: bool) {
    init_logger();
    let c = random_circuit(seed, qubits, uniform);
    let zxd = ZXDiagram::from_circuit(&c).unwrap();
    let zxg = ZXGraph::from_diagram(&zxd);
    let c1 = circuit_extraction(&zxg).unwrap();
    assert!(equal_up_to_phase(&c, &c1));
}

#[rstest]
#[case(11, 3, false)]
#[case(12, 4, false)]
#[case(13, 4, true)]
fn clifford_simplification_preserves_the_map(
    #[case] seed: u64,
    #[case] qubits: usize,
    #[case] uniform: bool,
) {
    init_logger();
    let c = random_circuit(seed, qubits, uniform);
    let zxd = ZXDiagram::from_circuit(&c).unwrap();
    let c1 = clifford_simplification(&zxd).unwrap();
    assert!(equal_up_to_phase(&c, &c1));
    assert!(c1.tcount() <= c.tcount());
}

#[rstest]
#[case(21, 3, false)]
#[case(22, 4, false)]
#[case(23, 4, true)]
fn teleportation_preserves_the_map(
    #[case] seed: u64,
    #[case] qubits: usize,
    #[case] uniform: bool,
) {
    init_logger();
    let c = random_circuit(seed, qubits, uniform);
    let zxd = ZXDiagram::from_circuit(&c).unwrap();
    let out = phase_teleportation(&zxd);
    assert!(out.tcount() <= zxd.tcount());
    let c1 = out.to_circuit().unwrap();
    assert!(equal_up_to_phase(&c, &c1));
}

#[test]
fn arithmetic_teleports_to_tcount_8() {
    init_logger();
    let c = arithmetic_example();
    let zxd = ZXDiagram::from_circuit(&c).unwrap();
    assert_eq!(zxd.tcount(), 28);

    let out = phase_teleportation(&zxd);
    assert_eq!(out.tcount(), 8);

    // gates are only ever removed, and every wire keeps its CNOTs
    let c1 = out.to_circuit().unwrap();
    assert_eq!(c1.tcount(), 8);
    assert_eq!(c1.num_gates_of_type(CNOT), c.num_gates_of_type(CNOT));
    assert!(equal_up_to_phase(&c, &c1));
}

#[test]
fn examples_survive_clifford_simplification() {
    init_logger();
    for c in [clifford_example(), arithmetic_example()] {
        let zxd = ZXDiagram::from_circuit(&c).unwrap();
        let c1 = clifford_simplification(&zxd).unwrap();
        assert!(c1.tcount() <= c.tcount());
        assert!(equal_up_to_phase(&c, &c1));
    }
}

#[test]
fn clifford_example_keeps_its_t_gates() {
    let zxd = ZXDiagram::from_circuit(&clifford_example()).unwrap();
    let out = phase_teleportation(&zxd);
    assert_eq!(out.tcount(), 2);
}
