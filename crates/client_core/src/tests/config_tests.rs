use super::{read_file_api_base, ApiConfig, ConfigSources, DEFAULT_API_BASE};

use shared::domain::EventId;
use std::{
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

fn sources(
    explicit: Option<&str>,
    build_time: Option<&str>,
    runtime_env: Option<&str>,
    file: Option<&str>,
) -> ConfigSources {
    ConfigSources {
        explicit: explicit.map(str::to_string),
        build_time: build_time.map(str::to_string),
        runtime_env: runtime_env.map(str::to_string),
        file: file.map(str::to_string),
    }
}

#[test]
fn falls_back_to_local_default() {
    let config = sources(None, None, None, None).resolve().expect("resolve");
    assert_eq!(config.base_url(), DEFAULT_API_BASE);
    assert_eq!(config, ApiConfig::default());
}

#[test]
fn build_time_value_beats_runtime_override() {
    let config = sources(
        None,
        Some("https://build.example/api"),
        Some("https://runtime.example/api"),
        Some("https://file.example/api"),
    )
    .resolve()
    .expect("resolve");
    assert_eq!(config.base_url(), "https://build.example/api");
}

#[test]
fn runtime_override_beats_file_and_default() {
    let config = sources(
        None,
        None,
        Some("https://runtime.example/api"),
        Some("https://file.example/api"),
    )
    .resolve()
    .expect("resolve");
    assert_eq!(config.base_url(), "https://runtime.example/api");
}

#[test]
fn explicit_value_wins_and_blank_values_are_skipped() {
    let config = sources(
        Some("http://127.0.0.1:9000/api/"),
        Some("https://build.example/api"),
        None,
        None,
    )
    .resolve()
    .expect("resolve");
    assert_eq!(config.base_url(), "http://127.0.0.1:9000/api");

    let config = sources(Some("   "), Some(""), None, Some("http://file.example/api"))
        .resolve()
        .expect("resolve");
    assert_eq!(config.base_url(), "http://file.example/api");
}

#[test]
fn rejects_unusable_base_urls() {
    assert!(ApiConfig::new("not a url").is_err());
    assert!(ApiConfig::new("ftp://example.org/api").is_err());
}

#[test]
fn builds_resource_paths_from_base() {
    let config = ApiConfig::new("http://localhost:5000/api/").expect("config");
    assert_eq!(config.orgs_url(), "http://localhost:5000/api/orgs");
    assert_eq!(config.events_url(), "http://localhost:5000/api/events");
    assert_eq!(
        config.event_url(EventId(7)),
        "http://localhost:5000/api/events/7"
    );
}

#[test]
fn reads_api_base_from_toml_file() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("events_client_config_test_{suffix}.toml"));

    fs::write(&path, "api_base = \"http://10.0.0.5:5000/api\"\n").expect("write");
    assert_eq!(
        read_file_api_base(&path).as_deref(),
        Some("http://10.0.0.5:5000/api")
    );

    fs::write(&path, "api_base = [").expect("write");
    assert!(read_file_api_base(&path).is_none());

    fs::remove_file(&path).expect("cleanup");
    assert!(read_file_api_base(&path).is_none());
}
