use assert_cmd::Command;
use predicates::prelude::predicate::str;

#[test]
fn part2_output_right_answer() {
    let mut cmd = Command::cargo_bin("part2").unwrap();
    cmd.arg("tests/data/example.txt");

    cmd.assert()
        .success()
        .stdout(str::contains(
            "(6, 3)\n(7, 6)\n(7, 7)\n(8, 1)\n(8, 3)\n(9, 7)\n",
        ))
        .stdout(str::contains("There is(are) 6 location(s)"));
}

#[test]
fn part2_fail_on_ragged_map() {
    let mut cmd = Command::cargo_bin("part2").unwrap();
    cmd.arg("tests/data/ragged.txt");

    cmd.assert()
        .failure()
        .stderr(str::contains("Expect 4 columns in this row, given 3."));
}
