//! Runtime configuration files drive the frontend

use arith_frontend::config::compile_time::syntax::MAX_PARSE_DEPTH;
use arith_frontend::{ConfigError, Frontend, FrontendError, RuntimeConfig, SyntaxError};
use assert_matches::assert_matches;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn lowered_depth_limit_applies_to_parsing() {
    let file = write_config(
        r#"
[syntax]
max_parse_depth = 4
"#,
    );

    let config = RuntimeConfig::load(file.path()).unwrap();
    let frontend = Frontend::with_config(&config).unwrap();

    assert!(frontend.parse("1.0*2.0").is_ok());
    assert!(frontend.parse("(((1.0)))+(1.0)").is_ok());
    assert_matches!(
        frontend.parse("(((((1.0)))))"),
        Err(FrontendError::Syntax(SyntaxError::NestingTooDeep { max_depth: 4, .. }))
    );
}

#[test]
fn detailed_metrics_can_be_switched_off() {
    let file = write_config(
        r#"
[lexical]
collect_detailed_metrics = false
"#,
    );

    let config = RuntimeConfig::load(file.path()).unwrap();
    let report = Frontend::with_config(&config)
        .unwrap()
        .parse_with_report("1.0+2.0")
        .unwrap();

    assert_eq!(report.token_count, 3);
    assert!(report.metrics.tokens_by_kind.is_empty());
}

#[test]
fn raising_the_depth_limit_is_rejected() {
    let file = write_config(&format!("[syntax]\nmax_parse_depth = {}\n", MAX_PARSE_DEPTH + 1));
    assert_matches!(
        RuntimeConfig::load(file.path()),
        Err(ConfigError::LimitExceeded { .. })
    );
}

#[test]
fn malformed_and_missing_files_are_reported() {
    let file = write_config("[syntax\nmax_parse_depth = ");
    assert_matches!(RuntimeConfig::load(file.path()), Err(ConfigError::Parse { .. }));

    let dir = tempfile::tempdir().unwrap();
    assert_matches!(
        RuntimeConfig::load(dir.path().join("absent.toml")),
        Err(ConfigError::Io { .. })
    );
}
