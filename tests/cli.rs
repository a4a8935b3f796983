use auto_wrapper::*;
use std::process::Command;

const DESCRIPTORS: &str = "tests/fixtures/manual_test.json";
const CONFIG: &str = "tests/fixtures/config.json";

fn setup() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn from_files(config: Option<&str>) -> MyResult<GenerationReport> {
    let provider = JsonProvider::from_path(DESCRIPTORS)?;
    let config = match config {
        Some(path) => GeneratorConfig::from_path(path)?,
        None => GeneratorConfig::default(),
    };
    generate(&provider, config)
}

#[test]
fn fixture_document_generates_two_wrappers() {
    setup();
    let report = from_files(None).expect("Should generate concrete output");
    let ids = report.artifacts.iter().map(|a| a.file_id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["ClockWrapper.g", "IClockWrapper.g", "ITest.g", "Test.g"]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].wrapper, "Orphan");

    let class = &report.artifact("Test.g").unwrap().source;
    assert!(class.contains("_ToWrap.TestFunction(ab, test);"));
    assert!(!class.contains("_ToWrap.TestFunction(ab, test, number);"));
    assert!(class.contains("return _ToWrap.Count();"));
}

#[test]
fn fixture_config_renames_files() {
    setup();
    let report = from_files(Some(CONFIG)).expect("Should generate concrete output");
    assert!(report.artifact("Test.g.cs").is_some());
    assert!(report.artifact("IClockWrapper.g.cs").is_some());
    let marker = report.artifact(MARKER_FILE_ID).expect("marker enabled in config");
    assert!(marker.source.contains("namespace ThopDev.AutoWrapper {"));
}

#[test]
fn missing_descriptor_file_is_an_error() {
    setup();
    let err = JsonProvider::from_path("tests/fixtures/nope.json").expect_err("file does not exist");
    assert!(err.to_string().contains("nope.json"));
}

#[test]
fn binary_prints_artifacts() {
    let output = Command::new(env!("CARGO_BIN_EXE_auto_wrapper"))
        .args(["--descriptors", DESCRIPTORS, "--config", CONFIG])
        .output()
        .expect("binary should run");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("// ITest.g.cs\n"));
    assert!(stdout.contains("// WrapAttribute.g\n"));
    assert!(stdout.contains("public interface ITest {"));
    assert!(!stdout.contains("Orphan"));
}

#[test]
fn binary_fails_on_bad_config() {
    let output = Command::new(env!("CARGO_BIN_EXE_auto_wrapper"))
        .args(["--descriptors", DESCRIPTORS, "--config", "tests/fixtures/missing.json"])
        .output()
        .expect("binary should run");
    assert!(!output.status.success());
}

#[test]
fn binary_json_output() {
    let output = Command::new(env!("CARGO_BIN_EXE_auto_wrapper"))
        .args(["--descriptors", DESCRIPTORS, "--json"])
        .output()
        .expect("binary should run");
    assert!(output.status.success());
    let artifacts: serde_json::Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    let artifacts = artifacts.as_array().expect("array of artifacts");
    assert_eq!(artifacts.len(), 4);
    assert_eq!(artifacts[2]["file_id"], "ITest.g");
    assert_eq!(artifacts[2]["kind"], "interface");
}
