use crate::{ConfigError, SetupConfig};

use googletest::assert_that;
use googletest::prelude::{anything, err};

fn with_dbhost(dbhost: &str) -> SetupConfig {
    SetupConfig {
        dbhost: Some(dbhost.to_string()),
        ..SetupConfig::default()
    }
}

#[test]
fn given_bare_host_when_base_url_then_protocol_prefixed() {
    let config = with_dbhost("setup.example.com:8443");

    assert_eq!(config.base_url().unwrap(), "https://setup.example.com:8443");
}

#[test]
fn given_host_with_scheme_when_base_url_then_used_verbatim() {
    let config = with_dbhost("http://127.0.0.1:9000/");

    assert_eq!(config.base_url().unwrap(), "http://127.0.0.1:9000");
}

#[test]
fn given_blank_dbhost_when_base_url_then_missing_option() {
    let config = with_dbhost("   ");

    assert!(matches!(
        config.base_url(),
        Err(ConfigError::MissingOption { .. })
    ));
}

#[test]
fn given_unknown_protocol_when_validate_then_error() {
    let config = SetupConfig {
        protocol: String::from("ftp"),
        ..with_dbhost("setup:21")
    };

    assert_that!(config.validate(), err(anything()));
}

#[test]
fn given_path_without_leading_slash_when_validate_then_error() {
    let config = SetupConfig {
        demozone_path: String::from("ords/zone"),
        ..with_dbhost("setup:443")
    };

    assert_that!(config.validate(), err(anything()));
}
