//! depcheck.toml 통합 설정 테스트
//!
//! - depcheck.toml.example 파싱 테스트
//! - 부분 설정 로딩 테스트
//! - 환경변수 우선순위 테스트
//! - 파일 로딩 / 잘못된 형식 에러 테스트

use depcheck_core::config::DepCheckConfig;
use depcheck_core::error::{ConfigError, DepCheckError};

/// 환경변수를 설정한 상태로 `f`를 실행하고 원래 값으로 되돌립니다.
fn with_env<T>(key: &str, value: &str, f: impl FnOnce() -> T) -> T {
    let original = std::env::var(key).ok();
    // SAFETY: 환경변수를 만지는 테스트는 모두 #[serial]로 직렬화됩니다.
    unsafe {
        std::env::set_var(key, value);
    }

    let result = f();

    // SAFETY: 테스트 정리
    unsafe {
        match original {
            Some(val) => std::env::set_var(key, val),
            None => std::env::remove_var(key),
        }
    }
    result
}

// =============================================================================
// depcheck.toml.example 파싱 테스트
// =============================================================================

#[test]
fn example_config_parses_successfully() {
    let content = include_str!("../../../depcheck.toml.example");
    let config = DepCheckConfig::parse(content).expect("example config should parse");

    assert_eq!(config.general.log_level, "info");
    assert_eq!(config.general.log_format, "pretty");
    assert_eq!(config.report.report_path, "dependency-check-report.xml");
    assert_eq!(config.report.html_report_path, "dependency-check-report.html");
}

#[test]
fn example_config_passes_validation() {
    let content = include_str!("../../../depcheck.toml.example");
    let config = DepCheckConfig::parse(content).expect("should parse");
    config
        .validate()
        .expect("example config should pass validation");
}

#[test]
fn example_config_matches_code_defaults() {
    let content = include_str!("../../../depcheck.toml.example");
    let example = DepCheckConfig::parse(content).expect("should parse");
    let defaults = DepCheckConfig::default();

    assert_eq!(example.general.log_level, defaults.general.log_level);
    assert_eq!(example.general.log_format, defaults.general.log_format);
    assert_eq!(example.report.base_dir, defaults.report.base_dir);
    assert_eq!(example.report.report_path, defaults.report.report_path);
    assert_eq!(
        example.report.html_report_path,
        defaults.report.html_report_path
    );
    assert_eq!(
        example.report.severity_critical,
        defaults.report.severity_critical
    );
    assert_eq!(example.report.severity_major, defaults.report.severity_major);
    assert_eq!(
        example.report.max_report_size,
        defaults.report.max_report_size
    );
}

// =============================================================================
// 부분 설정 테스트
// =============================================================================

#[test]
fn partial_config_general_only() {
    let toml = r#"
[general]
log_level = "debug"
log_format = "json"
"#;
    let config = DepCheckConfig::parse(toml).expect("should parse");
    assert_eq!(config.general.log_level, "debug");
    assert_eq!(config.general.log_format, "json");
    assert_eq!(config.report.severity_critical, 7.0);
}

#[test]
fn partial_config_report_only() {
    let toml = r#"
[report]
base_dir = "/work/app"
report_path = "target/dependency-check-report.json"
html_report_path = ""
"#;
    let config = DepCheckConfig::parse(toml).expect("should parse");
    config.validate().expect("should validate");
    assert_eq!(config.report.base_dir, "/work/app");
    assert_eq!(
        config.report.report_path,
        "target/dependency-check-report.json"
    );
    assert!(config.report.html_report_path.is_empty());
    assert_eq!(config.report.severity_major, 4.0);
    assert_eq!(config.general.log_level, "info");
}

// =============================================================================
// 환경변수 우선순위 테스트
// =============================================================================

#[test]
#[serial_test::serial]
fn env_override_takes_precedence_over_toml() {
    let toml = r#"
[report]
severity_critical = 9.0
"#;
    let critical = with_env("DEPCHECK_REPORT_SEVERITY_CRITICAL", "8.5", || {
        let mut config = DepCheckConfig::parse(toml).expect("should parse");
        config.apply_env_overrides();
        config.report.severity_critical
    });
    assert_eq!(critical, 8.5);
}

#[test]
#[serial_test::serial]
fn env_override_takes_precedence_over_defaults() {
    let report_path = with_env(
        "DEPCHECK_REPORT_REPORT_PATH",
        "build/dependency-check-report.json",
        || {
            let mut config = DepCheckConfig::default();
            config.apply_env_overrides();
            config.report.report_path
        },
    );
    assert_eq!(report_path, "build/dependency-check-report.json");
}

#[test]
#[serial_test::serial]
fn env_override_unparsable_number_keeps_toml_value() {
    let toml = r#"
[report]
severity_major = 5.0
max_report_size = 1024
"#;
    let (major, size) = with_env("DEPCHECK_REPORT_SEVERITY_MAJOR", "medium", || {
        with_env("DEPCHECK_REPORT_MAX_REPORT_SIZE", "-1", || {
            let mut config = DepCheckConfig::parse(toml).expect("should parse");
            config.apply_env_overrides();
            (config.report.severity_major, config.report.max_report_size)
        })
    });
    assert_eq!(major, 5.0);
    assert_eq!(size, 1024);
}

#[test]
#[serial_test::serial]
fn env_override_can_disable_html_report() {
    let html = with_env("DEPCHECK_REPORT_HTML_REPORT_PATH", "", || {
        let mut config = DepCheckConfig::default();
        config.apply_env_overrides();
        config.report.html_report_path
    });
    assert!(html.is_empty());
}

#[tokio::test]
#[serial_test::serial]
async fn load_rejects_invalid_env_override() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let path = dir.path().join("depcheck.toml");
    std::fs::write(&path, "[report]\nseverity_critical = 8.0\n").expect("should write config");

    let original = std::env::var("DEPCHECK_REPORT_SEVERITY_CRITICAL").ok();
    // SAFETY: #[serial]로 직렬화됨
    unsafe {
        std::env::set_var("DEPCHECK_REPORT_SEVERITY_CRITICAL", "12.0");
    }

    let result = DepCheckConfig::load(&path).await;

    // SAFETY: 테스트 정리
    unsafe {
        match original {
            Some(val) => std::env::set_var("DEPCHECK_REPORT_SEVERITY_CRITICAL", val),
            None => std::env::remove_var("DEPCHECK_REPORT_SEVERITY_CRITICAL"),
        }
    }

    let err = result.expect_err("out-of-range override should fail validation");
    assert!(err.to_string().contains("report.severity_critical"));
}

#[tokio::test]
#[serial_test::serial]
async fn load_accepts_file_value_corrected_by_env_override() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let path = dir.path().join("depcheck.toml");
    std::fs::write(&path, "[report]\nseverity_critical = 12.0\n").expect("should write config");

    let original = std::env::var("DEPCHECK_REPORT_SEVERITY_CRITICAL").ok();
    // SAFETY: #[serial]로 직렬화됨
    unsafe {
        std::env::set_var("DEPCHECK_REPORT_SEVERITY_CRITICAL", "8.0");
    }

    let loaded = DepCheckConfig::load(&path).await;
    let loaded_or_default = DepCheckConfig::load_or_default(&path).await;

    // SAFETY: 테스트 정리
    unsafe {
        match original {
            Some(val) => std::env::set_var("DEPCHECK_REPORT_SEVERITY_CRITICAL", val),
            None => std::env::remove_var("DEPCHECK_REPORT_SEVERITY_CRITICAL"),
        }
    }

    let config = loaded.expect("env override should repair the file value");
    assert_eq!(config.report.severity_critical, 8.0);
    let config = loaded_or_default.expect("env override should repair the file value");
    assert_eq!(config.report.severity_critical, 8.0);
}

// =============================================================================
// 에러 케이스
// =============================================================================

#[test]
fn empty_string_parses_with_defaults() {
    let config = DepCheckConfig::parse("").expect("empty string should parse");
    assert_eq!(config.report.report_path, "dependency-check-report.xml");
}

#[test]
fn comments_only_parses_with_defaults() {
    let config = DepCheckConfig::parse("# nothing here\n# still nothing\n")
        .expect("comments-only should parse");
    assert_eq!(config.general.log_level, "info");
}

#[test]
fn malformed_toml_returns_parse_error() {
    let err = DepCheckConfig::parse("[report\nreport_path = 'x'").expect_err("should fail");
    assert!(matches!(
        err,
        DepCheckError::Config(ConfigError::ParseFailed { .. })
    ));
}

#[test]
fn wrong_type_for_numeric_field() {
    let err = DepCheckConfig::parse("[report]\nseverity_critical = \"high\"\n")
        .expect_err("string threshold should fail");
    assert!(matches!(
        err,
        DepCheckError::Config(ConfigError::ParseFailed { .. })
    ));
}

#[test]
fn unknown_section_is_ignored() {
    let toml = r#"
[report]
severity_major = 5.0

[sonar]
host = "http://localhost:9000"
"#;
    let config = DepCheckConfig::parse(toml).expect("unknown section should be ignored");
    assert_eq!(config.report.severity_major, 5.0);
}

#[tokio::test]
async fn from_file_nonexistent_returns_file_not_found() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let result = DepCheckConfig::from_file(dir.path().join("missing.toml")).await;
    assert!(matches!(
        result,
        Err(DepCheckError::Config(ConfigError::FileNotFound { .. }))
    ));
}

#[tokio::test]
#[serial_test::serial]
async fn load_or_default_without_file_uses_defaults() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let config = DepCheckConfig::load_or_default(dir.path().join("missing.toml"))
        .await
        .expect("missing file should fall back to defaults");
    assert_eq!(config.report.severity_critical, 7.0);
}

#[tokio::test]
async fn load_or_default_still_reports_malformed_file() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let path = dir.path().join("depcheck.toml");
    std::fs::write(&path, "[report\n").expect("should write config");

    let result = DepCheckConfig::load_or_default(&path).await;
    assert!(matches!(
        result,
        Err(DepCheckError::Config(ConfigError::ParseFailed { .. }))
    ));
}

#[tokio::test]
async fn from_file_leaves_validation_to_caller() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let path = dir.path().join("depcheck.toml");
    std::fs::write(&path, "[report]\nseverity_major = -1.0\n").expect("should write config");

    let config = DepCheckConfig::from_file(&path)
        .await
        .expect("from_file only parses");
    assert_eq!(config.report.severity_major, -1.0);

    let err = config.validate().expect_err("negative threshold is invalid");
    assert!(err.to_string().contains("report.severity_major"));
}

#[tokio::test]
async fn load_accepts_parent_relative_report_path() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let path = dir.path().join("depcheck.toml");
    std::fs::write(
        &path,
        "[report]\nreport_path = \"../target/dependency-check-report.xml\"\n",
    )
    .expect("should write config");

    let config = DepCheckConfig::load(&path)
        .await
        .expect("report outside the project directory is allowed");
    assert_eq!(
        config.report.report_path,
        "../target/dependency-check-report.xml"
    );
}

// =============================================================================
// 직렬화 라운드트립 테스트
// =============================================================================

#[test]
fn serialize_and_reparse_roundtrip() {
    let original = DepCheckConfig::default();
    let toml_str = toml::to_string_pretty(&original).expect("should serialize");
    let parsed = DepCheckConfig::parse(&toml_str).expect("should reparse");
    parsed.validate().expect("reparsed should validate");

    assert_eq!(original.general.log_level, parsed.general.log_level);
    assert_eq!(original.report.report_path, parsed.report.report_path);
    assert_eq!(
        original.report.severity_critical,
        parsed.report.severity_critical
    );
}
