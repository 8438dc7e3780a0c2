use std::io::Write;
use std::path::Path;

use serial_test::serial;

use super::*;

const ENV_KEYS: [&str; 7] = [
    "SKILLSEED_BASE_URL",
    "SKILLSEED_ENDPOINT_PATH",
    "SKILLSEED_CATALOG_PATH",
    "SKILLSEED_ASSIGN_ORDER",
    "SKILLSEED_FAIL_ON_ERROR",
    "SKILLSEED_TIMEOUT_CONNECT",
    "SKILLSEED_TIMEOUT_REQUEST",
];

fn clear_env() {
    for key in ENV_KEYS {
        unsafe { std::env::remove_var(key) };
    }
}

#[test]
fn defaults_when_file_missing() {
    let config = Config::default();
    assert_eq!(config.target.base_url, "http://localhost:3000");
    assert_eq!(config.target.path, "/api/skills");
    assert!(config.catalog.path.is_none());
    assert!(!config.catalog.assign_order);
    assert!(config.submit.fail_on_error);
    assert_eq!(config.timeouts.connect_seconds, 30);
    assert_eq!(config.timeouts.request_seconds, 60);
}

#[test]
#[serial]
fn load_nonexistent_uses_defaults() {
    clear_env();
    let config = Config::load(Path::new("/nonexistent/skillseed.toml")).unwrap();
    assert_eq!(config.target.base_url, "http://localhost:3000");
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn parse_valid_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.toml");
    let mut f = std::fs::File::create(&path).unwrap();
    write!(
        f,
        r#"
[target]
base_url = "https://portfolio.example.com"
path = "/api/v2/skills"

[catalog]
path = "./skills.toml"
assign_order = true

[submit]
fail_on_error = false

[timeouts]
request_seconds = 5
"#
    )
    .unwrap();

    clear_env();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.target.base_url, "https://portfolio.example.com");
    assert_eq!(config.target.path, "/api/v2/skills");
    assert_eq!(config.catalog.path.as_deref(), Some("./skills.toml"));
    assert!(config.catalog.assign_order);
    assert!(!config.submit.fail_on_error);
    assert_eq!(config.timeouts.request_seconds, 5);
    assert_eq!(config.timeouts.connect_seconds, 30);
}

#[test]
#[serial]
fn partial_toml_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.toml");
    std::fs::write(&path, "[target]\nbase_url = \"http://10.0.0.2:8080\"\n").unwrap();

    clear_env();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.target.base_url, "http://10.0.0.2:8080");
    assert_eq!(config.target.path, "/api/skills");
    assert!(config.submit.fail_on_error);
}

#[test]
#[serial]
fn malformed_toml_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[target\nbase_url = ").unwrap();

    clear_env();

    let err = Config::load(&path).unwrap_err();
    assert!(err.to_string().contains("failed to parse config file"));
}

#[test]
#[serial]
fn env_overrides_file_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("env.toml");
    std::fs::write(&path, "[target]\nbase_url = \"http://from-file:1\"\n").unwrap();

    clear_env();
    unsafe {
        std::env::set_var("SKILLSEED_BASE_URL", "http://from-env:2");
        std::env::set_var("SKILLSEED_ENDPOINT_PATH", "/seed");
        std::env::set_var("SKILLSEED_CATALOG_PATH", "/tmp/skills.toml");
        std::env::set_var("SKILLSEED_ASSIGN_ORDER", "true");
        std::env::set_var("SKILLSEED_FAIL_ON_ERROR", "false");
        std::env::set_var("SKILLSEED_TIMEOUT_CONNECT", "3");
        std::env::set_var("SKILLSEED_TIMEOUT_REQUEST", "7");
    }

    let config = Config::load(&path).unwrap();
    clear_env();

    assert_eq!(config.target.base_url, "http://from-env:2");
    assert_eq!(config.target.path, "/seed");
    assert_eq!(config.catalog.path.as_deref(), Some("/tmp/skills.toml"));
    assert!(config.catalog.assign_order);
    assert!(!config.submit.fail_on_error);
    assert_eq!(config.timeouts.connect_seconds, 3);
    assert_eq!(config.timeouts.request_seconds, 7);
}

#[test]
#[serial]
fn invalid_env_values_ignored() {
    clear_env();
    unsafe {
        std::env::set_var("SKILLSEED_FAIL_ON_ERROR", "maybe");
        std::env::set_var("SKILLSEED_TIMEOUT_REQUEST", "soon");
    }

    let config = Config::load(Path::new("/nonexistent")).unwrap();
    clear_env();

    assert!(config.submit.fail_on_error);
    assert_eq!(config.timeouts.request_seconds, 60);
}

#[test]
#[serial]
fn empty_catalog_env_clears_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cat.toml");
    std::fs::write(&path, "[catalog]\npath = \"custom.toml\"\n").unwrap();

    clear_env();
    unsafe { std::env::set_var("SKILLSEED_CATALOG_PATH", "") };

    let config = Config::load(&path).unwrap();
    clear_env();

    assert!(config.catalog.path.is_none());
}

#[test]
fn endpoint_joins_base_and_path() {
    let mut config = Config::default();
    assert_eq!(
        config.endpoint().unwrap().as_str(),
        "http://localhost:3000/api/skills"
    );

    config.target.base_url = "https://example.com/".into();
    assert_eq!(
        config.endpoint().unwrap().as_str(),
        "https://example.com/api/skills"
    );
}

#[test]
fn endpoint_rejects_non_http_scheme() {
    let mut config = Config::default();
    config.target.base_url = "ftp://example.com".into();
    let err = config.endpoint().unwrap_err();
    assert!(err.to_string().contains("unsupported endpoint scheme"));
}

#[test]
fn endpoint_rejects_garbage() {
    let mut config = Config::default();
    config.target.base_url = "not a url".into();
    assert!(config.endpoint().is_err());
}

#[test]
fn validate_rejects_bad_values() {
    let mut config = Config::default();
    config.target.base_url = "  ".into();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.target.path = "api/skills".into();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("must start with '/'"));

    let mut config = Config::default();
    config.timeouts.request_seconds = 0;
    assert!(config.validate().is_err());
}

#[test]
fn catalog_defaults_to_builtin() {
    let config = Config::default();
    let catalog = config.catalog().unwrap();
    assert_eq!(catalog.len(), 24);
    assert!(catalog.records().iter().all(|r| r.order.is_none()));
}

#[test]
fn catalog_from_path_with_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("skills.toml");
    std::fs::write(
        &path,
        r#"
[[skills]]
name = "Low"
category = "X"
proficiency = 10

[[skills]]
name = "High"
category = "X"
proficiency = 90
"#,
    )
    .unwrap();

    let mut config = Config::default();
    config.catalog.path = Some(path.to_string_lossy().into_owned());
    config.catalog.assign_order = true;

    let catalog = config.catalog().unwrap();
    assert_eq!(catalog.records()[0].order, Some(1));
    assert_eq!(catalog.records()[1].order, Some(0));
}

#[test]
fn catalog_missing_file_errors_with_context() {
    let mut config = Config::default();
    config.catalog.path = Some("/nonexistent/skills.toml".into());
    let err = config.catalog().unwrap_err();
    assert!(format!("{err:#}").contains("failed to load catalog"));
}

#[test]
fn timeout_durations() {
    let config = Config::default();
    assert_eq!(config.connect_timeout().as_secs(), 30);
    assert_eq!(config.request_timeout().as_secs(), 60);
}
