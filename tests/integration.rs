//! Integration tests for both pipelines.
//!
//! These write real rule files to a temp directory, then drive either the
//! library entry points or the built binaries and inspect stdout, stderr
//! and exit codes.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use relex_rules::check::registry::CheckRegistry;
use relex_rules::check::{select_checks, validate_source};
use relex_rules::compile::{DEFAULT_MARKER, compile_source, write_blocks};
use relex_rules::config::load_config;
use relex_rules::formatter::create_formatter;
use relex_rules::parse::source::SourceFile;

const BE_LINE: &str = "[BE] {3} <SVO, SV> _subj(be, $subj) & _obj(be, $obj) => (be-inheritance-rule $subj (get-instance-name $subj word_index sentence_index) $obj (get-instance-name $obj word_index sentence_index))";

const MAPPING_RULES: &str = "\
; relex2frame mapping rules
# IF _subj(be,$a) ^ _obj(be,$b) THEN ^1_Identity:Entity($a,$b)
# IF _subj(be,$a) THEN ^1_Identity:Entity($a,$b)
# IF _subj(be,$a) ^ _obj(be,$b) THEN ^1_A:B(x,$a) ^ ^1_A:C(y,$b)

#IF not a rule
";

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn compile_text(text: &str) -> String {
    let source = SourceFile::from_string(PathBuf::from("rules.txt"), text.to_string());
    let result = compile_source(&source, &[DEFAULT_MARKER.to_string()]);
    let mut buf = Vec::new();
    write_blocks(&result.blocks, &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

fn check_text(text: &str, line_numbers: bool) -> String {
    let source = SourceFile::from_string(PathBuf::from("mapping_rules.txt"), text.to_string());
    let registry = CheckRegistry::default_registry();
    let config = load_config(None).unwrap();
    let checks = select_checks(&registry, &config, &[], &[], false).unwrap();
    let result = validate_source(&source, &checks);
    let mut buf = Vec::new();
    create_formatter("annotate", line_numbers)
        .format_to(&result, &mut buf)
        .unwrap();
    String::from_utf8(buf).unwrap()
}

fn run_bin(bin: &str, dir: &Path, args: &[&str]) -> Output {
    Command::new(bin)
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

const COMPILE_BIN: &str = env!("CARGO_BIN_EXE_r2l-compile");
const CHECK_BIN: &str = env!("CARGO_BIN_EXE_relex2frame-check");

// ---------- compiler ----------

#[test]
fn be_line_end_to_end() {
    let out = compile_text(BE_LINE);
    assert!(out.starts_with("(define be-inheritance\n"));
    assert!(out.contains("(DefinedLinguisticRelationshipNode \"_subj\")"));
    assert!(out.contains("(DefinedLinguisticRelationshipNode \"_obj\")"));
    assert!(out.contains("(WordNode \"be-inheritance\")"));
    assert!(out.contains("(GroundedSchemaNode \"scm: pre-inheritance\")"));
    assert!(out.contains("(ConceptNode \"BE-Rule\")"));
    assert!(out.contains("(define (pre-be-inheritance-rule subj obj)"));
    assert!(out.ends_with(")\n\n"));
}

#[test]
fn generated_block_is_balanced() {
    let out = compile_text(BE_LINE);
    let mut depth: i64 = 0;
    for c in out.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        assert!(depth >= 0);
    }
    assert_eq!(depth, 0);
}

#[test]
fn non_be_lines_emit_nothing() {
    let text = "; comment\n[POSS] {2} <SVO, SV> _poss(a, $a) & _x(b, $b) => (poss-rule $a\n\n";
    assert_eq!(compile_text(text), "");
}

#[test]
fn compiler_is_deterministic() {
    let text = format!("{BE_LINE}\n; c\n{}\n", BE_LINE.replace("be-inheritance", "be-identity"));
    assert_eq!(compile_text(&text), compile_text(&text));
}

#[test]
fn compile_binary_reads_default_file() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "RuleImplicationToRelEx2Logic.txt", &format!("{BE_LINE}\n"));
    let output = run_bin(COMPILE_BIN, dir.path(), &[]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), compile_text(BE_LINE));
}

#[test]
fn compile_binary_warns_on_incomplete_line() {
    let dir = tempfile::tempdir().unwrap();
    let text = format!("{BE_LINE}\n[BE] {{3}} <SVO, SV> _subj(be,\n");
    write_file(dir.path(), "rules.txt", &text);
    let output = run_bin(COMPILE_BIN, dir.path(), &["rules.txt"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), compile_text(BE_LINE));
    let err = stderr(&output);
    assert!(err.contains("warning: rules.txt:2: [BE] rule is missing"));
    assert!(err.contains("skipped"));
}

#[test]
fn compile_binary_marker_flag() {
    let dir = tempfile::tempdir().unwrap();
    let poss = "[POSS] {2} <SVO, SV> _poss(a, $a) & _x(b, $b) => (poss-rule $a";
    write_file(dir.path(), "rules.txt", &format!("{BE_LINE}\n{poss}\n"));
    let output = run_bin(COMPILE_BIN, dir.path(), &["rules.txt", "--marker", "[POSS]"]);
    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("(ConceptNode \"POSS-Rule\")"));
    assert!(!out.contains("BE-Rule"));
}

#[test]
fn compile_binary_reads_markers_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let poss = "[POSS] {2} <SVO, SV> _poss(a, $a) & _x(b, $b) => (poss-rule $a";
    write_file(dir.path(), "rules.txt", &format!("{BE_LINE}\n{poss}\n"));
    write_file(
        dir.path(),
        ".relex-rules.yml",
        "Compile:\n  Markers: ['[BE]', '[POSS]']\n",
    );
    let output = run_bin(COMPILE_BIN, dir.path(), &["rules.txt"]);
    let out = stdout(&output);
    assert!(out.contains("BE-Rule"));
    assert!(out.contains("POSS-Rule"));
}

#[test]
fn compile_binary_missing_input_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_bin(COMPILE_BIN, dir.path(), &["nope.txt"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("error: failed to read nope.txt"));
    assert_eq!(stdout(&output), "");
}

#[test]
fn compile_binary_debug_goes_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "rules.txt", BE_LINE);
    let output = run_bin(COMPILE_BIN, dir.path(), &["rules.txt", "--debug"]);
    assert_eq!(stdout(&output), compile_text(BE_LINE));
    let err = stderr(&output);
    assert!(err.contains("debug: no config file found"));
    assert!(err.contains("debug: 1 lines read, 1 blocks emitted, 0 lines skipped"));
}

// ---------- validator ----------

#[test]
fn bound_rule_gets_no_warning() {
    let line = "# IF _subj(be,$a) ^ _obj(be,$b) THEN ^1_Identity:Entity($a,$b)\n";
    assert_eq!(check_text(line, false), line);
}

#[test]
fn wildcards_need_no_binding() {
    let line = "# IF _subj(be,$a) THEN ^1_Identity:Entity($a,$Wild)\n";
    assert_eq!(check_text(line, false), line);
}

#[test]
fn disjunct_frames_property() {
    let disjunct = check_text("# IF r($x,$y) THEN ^1_A:B(frameA,$x) ^ ^1_A:C(frameB,$y)", false);
    assert!(disjunct.starts_with(";; warning: ==has disjunct frames==!\n"));
    let same = check_text("# IF r($x,$y) THEN ^1_A:B(frameA,$x) ^ ^1_A:C(frameA,$y)", false);
    assert!(!same.contains(";; warning"));
}

#[test]
fn loose_dollar_sign_property() {
    let loose = check_text("# IF r($x) THEN f($x) ^ g($ foo)", false);
    assert!(loose.contains("has loose dollar sign"));
    let tight = check_text("# IF r($x,$foo) THEN f($x) ^ g($foo)", false);
    assert!(!tight.contains("has loose dollar sign"));
}

#[test]
fn annotated_file_matches_expected() {
    let expected = "\
; relex2frame mapping rules
# IF _subj(be,$a) ^ _obj(be,$b) THEN ^1_Identity:Entity($a,$b)
;; warning: missing RHS var $b from LHS;
# IF _subj(be,$a) THEN ^1_Identity:Entity($a,$b)
;; warning: ==has disjunct frames==!
# IF _subj(be,$a) ^ _obj(be,$b) THEN ^1_A:B(x,$a) ^ ^1_A:C(y,$b)

#IF not a rule
";
    assert_eq!(check_text(MAPPING_RULES, false), expected);
}

#[test]
fn check_binary_without_file_prints_usage() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_bin(CHECK_BIN, dir.path(), &[]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "Usage: relex2frame-check [name of mapping rules file]\n"
    );
}

#[test]
fn check_binary_with_two_files_prints_usage() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_bin(CHECK_BIN, dir.path(), &["a.txt", "b.txt"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).starts_with("Usage: relex2frame-check"));
}

#[test]
fn check_binary_annotates_file() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "mapping_rules.txt", MAPPING_RULES);
    let output = run_bin(CHECK_BIN, dir.path(), &["mapping_rules.txt", "--summary"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), check_text(MAPPING_RULES, false));
    assert!(stderr(&output).contains("Warnings: 2"));
}

#[test]
fn check_binary_line_numbers() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "mapping_rules.txt", MAPPING_RULES);
    let output = run_bin(CHECK_BIN, dir.path(), &["mapping_rules.txt", "--line-numbers"]);
    let out = stdout(&output);
    assert!(out.contains(";; warning: line 3: missing RHS var $b from LHS;\n"));
    assert!(out.contains(";; warning: line 4: ==has disjunct frames==!\n"));
}

#[test]
fn check_binary_strict_reports_unused_lhs_vars() {
    let dir = tempfile::tempdir().unwrap();
    write_file(
        dir.path(),
        "mapping_rules.txt",
        "# IF _subj(be,$a) ^ _obj(be,$b) THEN ^1_Identity:Entity($a)\n",
    );
    let relaxed = run_bin(CHECK_BIN, dir.path(), &["mapping_rules.txt"]);
    assert!(!stdout(&relaxed).contains(";; warning"));
    let strict = run_bin(CHECK_BIN, dir.path(), &["mapping_rules.txt", "--strict"]);
    assert!(stdout(&strict).contains(";; warning: missing LHS var $b from RHS;\n"));
}

#[test]
fn check_binary_except_from_cli() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "mapping_rules.txt", MAPPING_RULES);
    let output = run_bin(
        CHECK_BIN,
        dir.path(),
        &["mapping_rules.txt", "--except", "Binding,DisjunctFrames"],
    );
    assert_eq!(output.status.code(), Some(0));
    assert!(!stdout(&output).contains(";; warning"));
}

#[test]
fn check_binary_unknown_check_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "mapping_rules.txt", MAPPING_RULES);
    let output = run_bin(CHECK_BIN, dir.path(), &["mapping_rules.txt", "--only", "Nope"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("error: unknown check: Nope"));
}

#[test]
fn check_binary_config_disables_check() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "mapping_rules.txt", MAPPING_RULES);
    write_file(
        dir.path(),
        ".relex-rules.yml",
        "Check:\n  LineNumbers: true\n  DisjunctFrames:\n    Enabled: false\n",
    );
    let output = run_bin(CHECK_BIN, dir.path(), &["mapping_rules.txt"]);
    let out = stdout(&output);
    assert!(out.contains(";; warning: line 3: missing RHS var $b from LHS;"));
    assert!(!out.contains("disjunct"));
}

#[test]
fn check_binary_json_report() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "mapping_rules.txt", MAPPING_RULES);
    let output = run_bin(CHECK_BIN, dir.path(), &["mapping_rules.txt", "-f", "json"]);
    assert_eq!(output.status.code(), Some(0));
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["metadata"]["file"], "mapping_rules.txt");
    assert_eq!(parsed["metadata"]["lines_inspected"], 6);
    assert_eq!(parsed["metadata"]["rules_inspected"], 3);
    assert_eq!(parsed["metadata"]["warning_count"], 2);
    assert_eq!(parsed["warnings"][0]["line"], 3);
    assert_eq!(parsed["warnings"][1]["checks"][0], "DisjunctFrames");
}

#[test]
fn check_binary_missing_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_bin(CHECK_BIN, dir.path(), &["missing.txt"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("error: failed to read missing.txt"));
}

#[test]
fn check_binary_rule_without_vars_is_clean() {
    let dir = tempfile::tempdir().unwrap();
    let text = "# IF _subj(be,thing) THEN ^1_A:B(thing)\n";
    write_file(dir.path(), "mapping_rules.txt", text);
    let output = run_bin(CHECK_BIN, dir.path(), &["mapping_rules.txt", "--summary"]);
    assert_eq!(stdout(&output), text);
    assert!(stderr(&output).contains("Warnings: 0"));
}

#[cfg(target_os = "linux")]
fn run_bin_to_full_disk(bin: &str, dir: &Path, args: &[&str]) -> Output {
    let full = fs::OpenOptions::new().write(true).open("/dev/full").unwrap();
    Command::new(bin)
        .args(args)
        .current_dir(dir)
        .stdout(full)
        .output()
        .unwrap()
}

#[cfg(target_os = "linux")]
#[test]
fn check_binary_write_failure_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "mapping_rules.txt", MAPPING_RULES);
    for format in ["annotate", "json"] {
        let output = run_bin_to_full_disk(CHECK_BIN, dir.path(), &["mapping_rules.txt", "-f", format]);
        assert_eq!(output.status.code(), Some(2), "format {format}");
        assert!(stderr(&output).contains("error: failed to write output"));
    }
}

#[cfg(target_os = "linux")]
#[test]
fn compile_binary_write_failure_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "rules.txt", BE_LINE);
    let output = run_bin_to_full_disk(COMPILE_BIN, dir.path(), &["rules.txt"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("error: failed to write output"));
}

#[test]
fn check_binary_list_checks() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_bin(CHECK_BIN, dir.path(), &["--list-checks"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "Binding\nUnusedLhsVar (disabled by default)\nLooseDollarSign\nDisjunctFrames\n"
    );
}

#[test]
fn check_binary_handles_invalid_utf8() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mapping_rules.txt");
    fs::write(&path, b"; caf\xe9\n# IF r($a) THEN f($a)\n").unwrap();
    let output = run_bin(CHECK_BIN, dir.path(), &["mapping_rules.txt"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).ends_with("# IF r($a) THEN f($a)\n"));
}
