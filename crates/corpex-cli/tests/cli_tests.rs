#![allow(clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;

const CMDI: &str = "<CMD><Header><MdCreator>erwin</MdCreator></Header></CMD>";
const PSDX: &str =
    "<forestGrp><forest><eTree><eLeaf Text=\"Hello,\"/><eLeaf Text=\"world!\"/></eTree></forest></forestGrp>";

fn corpex() -> Command {
    Command::cargo_bin("corpex").unwrap()
}

#[test]
fn test_single_file_csv_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("demo.cmdi");
    std::fs::write(&input, CMDI).unwrap();

    corpex()
        .arg(&input)
        .args(["--to", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("file,path,value"))
        .stdout(predicate::str::contains(
            "demo.cmdi,CMD.Header.MdCreator,erwin",
        ));
}

#[test]
fn test_single_file_text_with_strip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("demo.psdx");
    std::fs::write(&input, PSDX).unwrap();

    corpex()
        .arg(&input)
        .args(["--to", "text", "--strip", ",!"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Hello world\n"));
}

#[test]
fn test_stamp_to_xml() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("demo.cmdi");
    let output = dir.path().join("stamped.cmdi");
    std::fs::write(&input, CMDI).unwrap();

    corpex()
        .arg(&input)
        .args(["--to", "xml", "--stamp", "MdCreationDate=2019-05-01"])
        .args(["--output", output.to_str().unwrap()])
        .assert()
        .success();

    let stamped = std::fs::read_to_string(&output).unwrap();
    assert!(stamped.contains("<MdCreationDate>2019-05-01</MdCreationDate>"));
}

#[test]
fn test_batch_skips_malformed_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.cmdi"), CMDI).unwrap();
    std::fs::write(dir.path().join("b.cmdi"), "<CMD><broken></CMD>").unwrap();
    std::fs::write(dir.path().join("c.psdx"), PSDX).unwrap();
    let output = dir.path().join("rows.csv");

    corpex()
        .arg(dir.path())
        .args(["--to", "csv", "--output", output.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("skipping"))
        .stderr(predicate::str::contains("b.cmdi"));

    let rows = std::fs::read_to_string(&output).unwrap();
    assert!(rows.contains("a.cmdi,CMD.Header.MdCreator,erwin"));
    assert!(rows.contains("c.psdx,"));
    assert!(!rows.contains("b.cmdi"));
}

#[test]
fn test_batch_requires_output() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.cmdi"), CMDI).unwrap();

    corpex()
        .arg(dir.path())
        .args(["--to", "csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--output is required"));
}

#[test]
fn test_unwritable_output_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("demo.cmdi");
    std::fs::write(&input, CMDI).unwrap();
    let output = dir.path().join("no-such-dir").join("out.csv");

    corpex()
        .arg(&input)
        .args(["--to", "csv", "--output", output.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to write output file"));
}

#[test]
fn test_missing_input_is_fatal() {
    corpex()
        .args(["no-such-file.cmdi", "--to", "csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn test_malformed_single_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("demo.cmdi");
    std::fs::write(&input, "<CMD><broken></CMD>").unwrap();

    corpex()
        .arg(&input)
        .args(["--to", "csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to convert"));
}
