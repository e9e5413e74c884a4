//! End-to-end scenarios matching two whole programs and inspecting the
//! resulting edit script, plus a smoke test of the CLI binary.
//!
//! Grounded on `mergiraf`'s integration-test style (`assert_cmd` driving
//! the built binary, `tempfile` for scratch input files) and on spec §8's
//! worked examples (rename, insert, constant change, operator change,
//! reorder, disjoint trees).

use std::io::Write;

use assert_cmd::Command;
use astdiff::{
    config::MatchConfig,
    edit_script::{build_edit_script, Edit},
    matcher::match_trees,
    parse,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::NamedTempFile;

fn diff_rust(src: &str, dst: &str) -> Vec<Edit> {
    let src_tree = parse(tree_sitter_rust_orchard::LANGUAGE.into(), src).unwrap();
    let dst_tree = parse(tree_sitter_rust_orchard::LANGUAGE.into(), dst).unwrap();
    let matching = match_trees(&src_tree, &dst_tree, &MatchConfig::default());
    build_edit_script(&src_tree, &dst_tree, &matching.mappings)
}

#[test]
fn renaming_a_function_produces_a_single_update() {
    let edits = diff_rust("fn add(a: i32, b: i32) -> i32 { a + b }", "fn sum(a: i32, b: i32) -> i32 { a + b }");
    let updates: Vec<_> = edits.iter().filter(|e| matches!(e, Edit::Update { .. })).collect();
    assert_eq!(updates.len(), 1, "expected exactly one update, got {edits:?}");
}

#[test]
fn inserting_a_statement_produces_an_insert_and_nothing_else() {
    let edits = diff_rust(
        "fn f() { let a = 1; a }",
        "fn f() { let a = 1; let b = 2; a + b }",
    );
    assert!(edits.iter().any(|e| matches!(e, Edit::Insert { .. })));
    assert!(!edits.iter().any(|e| matches!(e, Edit::Delete { .. })));
}

#[test]
fn changing_a_constant_produces_a_single_update() {
    let edits = diff_rust("fn limit() -> i32 { 100 }", "fn limit() -> i32 { 200 }");
    assert_eq!(edits.len(), 1);
    assert!(matches!(edits[0], Edit::Update { .. }));
}

#[test]
fn changing_an_operator_produces_a_single_update() {
    let edits = diff_rust("fn f(a: i32, b: i32) -> i32 { a + b }", "fn f(a: i32, b: i32) -> i32 { a - b }");
    assert_eq!(edits.len(), 1);
    assert!(matches!(edits[0], Edit::Update { .. }));
}

#[test]
fn reordering_statements_produces_moves() {
    let edits = diff_rust(
        "fn f() { let a = 1; let b = 2; a + b }",
        "fn f() { let b = 2; let a = 1; a + b }",
    );
    assert!(edits.iter().any(|e| matches!(e, Edit::Move { .. })));
}

#[test]
fn disjoint_programs_delete_and_insert_everything() {
    let edits = diff_rust("fn f() { 1 }", "struct S { field: i32 }");
    assert!(edits.iter().any(|e| matches!(e, Edit::Delete { .. })));
    assert!(edits.iter().any(|e| matches!(e, Edit::Insert { .. })));
}

#[rstest]
#[case("fn f() {}", "fn f() {}", 0)]
#[case("fn f() { 1 }", "fn f() { 2 }", 1)]
fn edit_count_matches_expectation(#[case] src: &str, #[case] dst: &str, #[case] expected_edits: usize) {
    assert_eq!(diff_rust(src, dst).len(), expected_edits);
}

fn write_temp_rust_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".rs").expect("failed to create temp file");
    write!(file, "{contents}").expect("failed to write temp file");
    file
}

#[test]
fn cli_diff_prints_one_update_for_a_renamed_constant() {
    let src = write_temp_rust_file("fn limit() -> i32 { 100 }");
    let dst = write_temp_rust_file("fn limit() -> i32 { 200 }");

    let output = Command::cargo_bin("astdiff")
        .expect("binary should build")
        .arg("diff")
        .arg(src.path())
        .arg(dst.path())
        .arg("--color")
        .arg("never")
        .output()
        .expect("failed to run astdiff");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("update"));
}

#[test]
fn cli_diff_json_format_emits_an_update_record() {
    let src = write_temp_rust_file("fn limit() -> i32 { 100 }");
    let dst = write_temp_rust_file("fn limit() -> i32 { 200 }");

    let output = Command::cargo_bin("astdiff")
        .expect("binary should build")
        .arg("diff")
        .arg(src.path())
        .arg(dst.path())
        .arg("--format")
        .arg("json")
        .output()
        .expect("failed to run astdiff");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.trim_end().starts_with('[') && stdout.trim_end().ends_with(']'));
    assert!(stdout.contains(r#""kind":"update""#));
}

#[test]
fn cli_languages_lists_rust() {
    let output = Command::cargo_bin("astdiff")
        .expect("binary should build")
        .arg("languages")
        .output()
        .expect("failed to run astdiff");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("rust"));
}

#[test]
fn cli_rejects_unsupported_extensions() {
    let src = NamedTempFile::with_suffix(".xyz").expect("failed to create temp file");
    let dst = NamedTempFile::with_suffix(".xyz").expect("failed to create temp file");

    let output = Command::cargo_bin("astdiff")
        .expect("binary should build")
        .arg("diff")
        .arg(src.path())
        .arg(dst.path())
        .output()
        .expect("failed to run astdiff");

    assert!(!output.status.success());
}
