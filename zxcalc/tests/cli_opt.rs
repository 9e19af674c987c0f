#[cfg(test)]
mod test {
    use assert_cmd::Command;
    use predicates::str::contains;
    use rstest::{fixture, rstest};

    #[fixture]
    fn cmd() -> Command {
        let mut cmd = Command::cargo_bin("zxcalc").unwrap();
        cmd.arg("opt");
        cmd
    }

    #[rstest]
    fn default(mut cmd: Command) {
        cmd.args(["--example", "clifford"])
            .assert()
            .success()
            .stdout(contains("Input: Circuit with 4 qubits, 24 gates"))
            .stdout(contains("Output: Circuit with 4 qubits"));
    }

    #[rstest]
    fn clifford(mut cmd: Command) {
        cmd.args(["--example", "arithmetic", "--clifford"])
            .assert()
            .success();
    }

    #[rstest]
    fn teleport(mut cmd: Command) {
        cmd.args(["--example", "arithmetic", "--teleport"])
            .assert()
            .success()
            .stdout(contains("non-clifford: 28"))
            .stdout(contains("non-clifford: 8"));
    }

    #[rstest]
    fn print_gates(mut cmd: Command) {
        cmd.args(["--example", "clifford", "--teleport", "--print"])
            .assert()
            .success()
            .stdout(contains("qreg q[4];"))
            .stdout(contains("cx q[1], q[2];"));
    }

    #[rstest]
    fn random(mut cmd: Command) {
        cmd.args(["--random", "--qubits", "3", "--depth", "20", "--p-t", "0.3", "--seed", "5"])
            .assert()
            .success()
            .stdout(contains("Input: Circuit with 3 qubits"));
    }

    #[rstest]
    fn needs_a_source(mut cmd: Command) {
        cmd.arg("--teleport").assert().failure();
    }

    #[rstest]
    fn unknown_example(mut cmd: Command) {
        cmd.args(["--example", "adder"]).assert().failure();
    }

    #[rstest]
    fn multiple_methods(mut cmd: Command) {
        cmd.args(["--example", "clifford", "--clifford", "--teleport"])
            .assert()
            .failure()
            .stderr(contains(
                "the argument '--clifford' cannot be used with '--teleport'",
            ));
    }

    #[rstest]
    fn multiple_sources(mut cmd: Command) {
        cmd.args(["--example", "clifford", "--random"])
            .assert()
            .failure();
    }
}
