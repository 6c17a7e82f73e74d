//! Integration tests for the full pipeline

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;
use sdk_codegen::config::{Config, InputConfig, OutputConfig, RenderConfig};
use sdk_codegen::pipeline::Pipeline;

use super::fixture;

/// Create a test config reading a fixture and writing into `output_dir`
fn create_test_config(api_fixture: &str, output_dir: PathBuf, backends: &[&str]) -> Config {
    Config {
        input: InputConfig {
            api_file: fixture(api_fixture),
        },
        output: OutputConfig {
            dir: output_dir,
            backends: backends.iter().map(|b| b.to_string()).collect(),
        },
        render: RenderConfig::default(),
    }
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

#[test]
fn test_full_pipeline() {
    let temp = tempdir().unwrap();
    let output_dir = temp.path().join("generated");

    let config = create_test_config("api.json", output_dir.clone(), &["ts", "docs"]);
    let pipeline = Pipeline::new(false);

    let result = pipeline.run(&config);
    assert!(result.is_ok(), "Pipeline should succeed: {:?}", result.err());

    assert_eq!(
        file_names(&output_dir),
        vec![
            "mod_client.md",
            "mod_foo.md",
            "mod_geo.md",
            "mod_net.md",
            "modules.md",
            "modules.ts"
        ]
    );

    let ts = fs::read_to_string(output_dir.join("modules.ts")).unwrap();
    assert!(ts.starts_with("export interface ResponseHandler {"));
    assert!(ts.contains("export class NetModule {"));
}

#[test]
fn test_pipeline_from_config_file() {
    let temp = tempdir().unwrap();
    let output_dir = temp.path().join("out");

    let config_content = format!(
        r#"
[input]
api_file = "{}"

[output]
dir = "{}"
backends = ["ts"]

[render]
include_doc = true
module_class_suffix = "Api"
"#,
        fixture("api.json").display(),
        output_dir.display()
    );
    let config_path = temp.path().join("sdk-codegen.toml");
    fs::write(&config_path, config_content).unwrap();

    let config = Config::load(&config_path).unwrap();
    let written = Pipeline::new(true).run(&config).unwrap();

    assert_eq!(written, vec![output_dir.join("modules.ts")]);

    let ts = fs::read_to_string(output_dir.join("modules.ts")).unwrap();
    assert!(ts.contains("export class ClientApi {"));
    assert!(ts.contains("/**\n * Subscription events\n */\nexport type ParamsOfSubscribe ="));
}

#[test]
fn test_pipeline_overwrites_previous_output() {
    let temp = tempdir().unwrap();
    let output_dir = temp.path().join("generated");
    fs::create_dir_all(&output_dir).unwrap();
    fs::write(output_dir.join("modules.ts"), "stale").unwrap();

    let config = create_test_config("api.json", output_dir.clone(), &["ts"]);
    Pipeline::new(false).run(&config).unwrap();

    let ts = fs::read_to_string(output_dir.join("modules.ts")).unwrap();
    assert_ne!(ts, "stale");
}

#[test]
fn test_pipeline_unresolved_reference_writes_nothing() {
    let temp = tempdir().unwrap();
    let output_dir = temp.path().join("generated");
    fs::create_dir_all(&output_dir).unwrap();

    let config = create_test_config("unresolved.json", output_dir.clone(), &["ts", "docs"]);
    let result = Pipeline::new(false).run(&config);

    let err = result.unwrap_err();
    assert!(format!("{:#}", err).contains("Unresolved type reference `Undefined`"));
    assert!(file_names(&output_dir).is_empty());
}

#[test]
fn test_pipeline_unknown_backend() {
    let temp = tempdir().unwrap();
    let output_dir = temp.path().join("generated");

    let config = create_test_config("api.json", output_dir.clone(), &["ts", "python"]);
    let result = Pipeline::new(false).run(&config);

    let err = result.unwrap_err();
    assert!(err.to_string().contains("Unsupported backend: python"));
    assert!(!output_dir.exists());
}

#[test]
fn test_loaded_config_failed_run_leaves_no_output_dir() {
    let temp = tempdir().unwrap();
    let output_dir = temp.path().join("never-created");

    let config_content = format!(
        r#"
[input]
api_file = "{}"

[output]
dir = "{}"
"#,
        fixture("unresolved.json").display(),
        output_dir.display()
    );
    let config_path = temp.path().join("sdk-codegen.toml");
    fs::write(&config_path, config_content).unwrap();

    let config = Config::load(&config_path).unwrap();
    assert!(!output_dir.exists());

    let result = Pipeline::new(false).run(&config);

    assert!(result.is_err());
    assert!(!output_dir.exists());
}
