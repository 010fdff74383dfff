use assert_cmd::prelude::*;
use assert_fs::{
    fixture::{ChildPath, FileWriteStr, PathChild},
    TempDir,
};
use std::process::{Command, Output};

const LAB_BIB: &str = include_str!("data/lab.bib");
const DUPLICATES_BIB: &str = include_str!("data/duplicates.bib");
const MALFORMED_AUTHOR_BIB: &str = include_str!("data/malformed_author.bib");

// We check the --help output in order to confirm that the clap cli is setup correctly.
// Any arguments that are incorrectly will cause clap to panic regardless of the arguments or
// options provided.
// Calling help does not require any application logic so if this tests fails then we know it
// is to do with the clap cli setup code.
#[test]
fn check_clap_cli_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("labbib")?;

    cmd.arg("--help");
    cmd.assert().success();

    for sub in ["merge", "harmonize", "export", "fetch"] {
        Command::cargo_bin("labbib")?
            .args([sub, "--help"])
            .assert()
            .success();
    }

    Ok(())
}

fn fixture(dir: &TempDir, name: &str, content: &str) -> ChildPath {
    let child = dir.child(name);
    child.write_str(content).expect("Cannot write fixture");
    child
}

fn labbib(args: &[&std::ffi::OsStr]) -> Output {
    Command::cargo_bin("labbib")
        .expect("labbib binary is built")
        .args(args)
        .output()
        .expect("labbib runs")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_owned()
}

fn entry_count(path: &ChildPath) -> usize {
    std::fs::read_to_string(path.path())
        .expect("Output file is written")
        .lines()
        .filter(|line| line.starts_with('@'))
        .count()
}

#[test]
fn merge_removes_duplicates() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir, "duplicates.bib", DUPLICATES_BIB);
    let out = dir.child("out.bib");

    let output = labbib(&["merge".as_ref(), input.path().as_os_str(), out.path().as_os_str()]);

    assert!(output.status.success());
    assert_eq!("Final file has 2 entries.", stdout(&output));
    assert_eq!(2, entry_count(&out));
}

#[test]
fn merge_file_with_itself_adds_nothing() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir, "lab.bib", LAB_BIB);
    let out = dir.child("out.bib");

    let output = labbib(&[
        "merge".as_ref(),
        input.path().as_os_str(),
        input.path().as_os_str(),
        out.path().as_os_str(),
    ]);

    assert!(output.status.success());
    assert_eq!(4, entry_count(&out));
}

#[test]
fn harmonize_rekeys_and_drops_entries_without_year() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir, "lab.bib", LAB_BIB);
    let out = dir.child("out.bib");

    let output = labbib(&["harmonize".as_ref(), input.path().as_os_str(), out.path().as_os_str()]);

    assert!(output.status.success());
    assert_eq!("3 entries in total.", stdout(&output));
    let content = std::fs::read_to_string(out.path()).unwrap();
    assert!(content.contains("@article{rheault2022influence,"));
    assert!(content.contains("@article{garyfallidis2014dipy,"));
    assert!(content.contains("@inproceedings{theberge2020tractoflow,"));
    assert!(!content.contains("smith_notes"));
    assert_eq!(3, entry_count(&out));
}

#[test]
fn harmonize_with_custom_stop_words() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir, "lab.bib", LAB_BIB);
    let words = fixture(&dir, "stop.txt", "# nothing is a stop word but 'dipy'\ndipy\n");
    let out = dir.child("out.bib");

    let output = labbib(&[
        "harmonize".as_ref(),
        input.path().as_os_str(),
        out.path().as_os_str(),
        "--stop-words".as_ref(),
        words.path().as_os_str(),
    ]);

    assert!(output.status.success());
    let content = std::fs::read_to_string(out.path()).unwrap();
    assert!(content.contains("@article{garyfallidis2014a,"));
    assert!(content.contains("@article{rheault2022the,"));
}

#[test]
fn export_writes_website_json() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir, "lab.bib", LAB_BIB);
    let out = dir.child("publications.json");

    let output = labbib(&["export".as_ref(), input.path().as_os_str(), out.path().as_os_str()]);

    assert!(output.status.success());
    assert_eq!("3 entries in total.", stdout(&output));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.path()).unwrap()).unwrap();
    let entries = json.as_array().unwrap();
    assert_eq!(3, entries.len());
    assert_eq!("rheault_influence_2022.png", entries[0]["image"]);
    assert_eq!("Rhéault", entries[0]["author"][0]["family"]);
    assert_eq!(2, entries[0]["author"].as_array().unwrap().len());
    assert_eq!("Proceedings of ISMRM", entries[2]["container-title"]);
    assert_eq!(
        serde_json::json!([["2020", 2]]),
        entries[2]["issued"]["date-parts"]
    );
}

#[test]
fn export_with_malformed_author_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir, "bad.bib", MALFORMED_AUTHOR_BIB);
    let out = dir.child("publications.json");

    let output = labbib(&["export".as_ref(), input.path().as_os_str(), out.path().as_os_str()]);

    assert_eq!(Some(2), output.status.code());
    assert!(!out.path().exists());
}

#[test]
fn missing_input_is_an_error() {
    let dir = TempDir::new().unwrap();
    let input = dir.child("missing.bib");
    let out = dir.child("out.bib");

    let output = labbib(&["merge".as_ref(), input.path().as_os_str(), out.path().as_os_str()]);

    assert_eq!(Some(2), output.status.code());
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not exist!"));
    assert!(!out.path().exists());
}

#[test]
fn existing_output_needs_force_overwrite() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir, "lab.bib", LAB_BIB);
    let out = fixture(&dir, "out.bib", "keep me");

    let output = labbib(&["merge".as_ref(), input.path().as_os_str(), out.path().as_os_str()]);

    assert_eq!(Some(2), output.status.code());
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("exists, delete it first or use -f to overwrite."));
    assert_eq!("keep me", std::fs::read_to_string(out.path()).unwrap());

    let output = labbib(&[
        "merge".as_ref(),
        input.path().as_os_str(),
        out.path().as_os_str(),
        "-f".as_ref(),
    ]);

    assert!(output.status.success());
    assert_eq!(4, entry_count(&out));
}

#[test]
fn fetch_without_any_doi_fetched_fails() {
    let dir = TempDir::new().unwrap();
    let out = dir.child("fetched.bib");

    let output = labbib(&["fetch".as_ref(), " ".as_ref(), out.path().as_os_str()]);

    assert_eq!(Some(2), output.status.code());
    assert!(!out.path().exists());
}

#[test]
fn quiet_prints_nothing() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir, "lab.bib", LAB_BIB);
    let out = dir.child("out.bib");

    let output = labbib(&[
        "-q".as_ref(),
        "merge".as_ref(),
        input.path().as_os_str(),
        out.path().as_os_str(),
    ]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}
