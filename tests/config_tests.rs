// Config parsing and validation tests

use std::io::Write;

use metricgate::config::AppConfig;

const VALID_CONFIG: &str = r#"
[server]
port = 8080
host = "0.0.0.0"

[database]
host = "db.internal"
port = 3306
database = "zabbix"
user = "zabbix_ro"
password = "secret"
max_pool_size = 5

[query]
crosshost_concurrency = 4
default_window_secs = 1800
"#;

#[test]
fn valid_config_parses() {
    let config = AppConfig::load_from_str(VALID_CONFIG).unwrap();
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.database.database, "zabbix");
    assert_eq!(config.database.max_pool_size, 5);
    assert_eq!(config.query.crosshost_concurrency, 4);
    assert_eq!(config.query.default_window_secs, 1800);
}

#[test]
fn query_section_is_optional_with_defaults() {
    let trimmed = VALID_CONFIG.split("[query]").next().unwrap();
    let config = AppConfig::load_from_str(trimmed).unwrap();
    assert_eq!(config.query.crosshost_concurrency, 8);
    assert_eq!(config.query.default_window_secs, 3600);
}

#[test]
fn max_pool_size_defaults_when_omitted() {
    let trimmed = VALID_CONFIG.replace("max_pool_size = 5\n", "");
    let config = AppConfig::load_from_str(&trimmed).unwrap();
    assert_eq!(config.database.max_pool_size, 10);
}

#[test]
fn zero_server_port_is_rejected() {
    let bad = VALID_CONFIG.replace("port = 8080", "port = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.port"));
}

#[test]
fn empty_database_host_is_rejected() {
    let bad = VALID_CONFIG.replace("host = \"db.internal\"", "host = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("database.host"));
}

#[test]
fn empty_database_name_is_rejected() {
    let bad = VALID_CONFIG.replace("database = \"zabbix\"", "database = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("database.database"));
}

#[test]
fn empty_database_user_is_rejected() {
    let bad = VALID_CONFIG.replace("user = \"zabbix_ro\"", "user = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("database.user"));
}

#[test]
fn zero_pool_size_is_rejected() {
    let bad = VALID_CONFIG.replace("max_pool_size = 5", "max_pool_size = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("max_pool_size"));
}

#[test]
fn zero_crosshost_concurrency_is_rejected() {
    let bad = VALID_CONFIG.replace("crosshost_concurrency = 4", "crosshost_concurrency = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("crosshost_concurrency"));
}

#[test]
fn zero_default_window_is_rejected() {
    let bad = VALID_CONFIG.replace("default_window_secs = 1800", "default_window_secs = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("default_window_secs"));
}

#[test]
fn malformed_toml_is_rejected() {
    assert!(AppConfig::load_from_str("this is not toml [").is_err());
}

#[test]
fn load_reads_the_file_named_by_env() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(VALID_CONFIG.as_bytes()).unwrap();
    // Env var writes race across tests in the same binary; this is the
    // only test here that touches CONFIG_FILE.
    unsafe { std::env::set_var("CONFIG_FILE", file.path()) };
    let config = AppConfig::load().unwrap();
    assert_eq!(config.server.port, 8080);
    unsafe { std::env::remove_var("CONFIG_FILE") };
}
