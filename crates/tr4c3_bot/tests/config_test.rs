//! Tests for configuration loading.

use std::collections::HashMap;
use tr4c3_bot::{ApiEndpoints, BotConfig, Credentials, ScheduleType};
use tr4c3_models::LengthPolicy;

fn full_env() -> HashMap<&'static str, String> {
    HashMap::from([
        ("OPENAI_API_KEY", "sk-test".to_string()),
        ("TWITTER_API_KEY", "ck".to_string()),
        ("TWITTER_API_SECRET", "cs".to_string()),
        ("TWITTER_ACCESS_TOKEN", "at".to_string()),
        ("TWITTER_ACCESS_SECRET", "as".to_string()),
    ])
}

#[test]
fn test_credentials_from_complete_env() {
    let env = full_env();
    let creds = Credentials::from_lookup(|name| env.get(name).cloned()).expect("All set");

    assert_eq!(creds.openai_api_key(), "sk-test");
    assert_eq!(creds.twitter().consumer_key(), "ck");
    assert_eq!(creds.twitter().access_secret(), "as");
}

#[test]
fn test_missing_secret_is_config_error() {
    let mut env = full_env();
    env.remove("TWITTER_ACCESS_SECRET");

    let err = Credentials::from_lookup(|name| env.get(name).cloned()).unwrap_err();

    assert!(err.message.contains("TWITTER_ACCESS_SECRET"));
    assert!(err.to_string().starts_with("Configuration Error"));
}

#[test]
fn test_blank_secret_is_config_error() {
    let mut env = full_env();
    env.insert("OPENAI_API_KEY", "   ".to_string());

    let err = Credentials::from_lookup(|name| env.get(name).cloned()).unwrap_err();

    assert!(err.message.contains("OPENAI_API_KEY"));
}

#[test]
fn test_credentials_debug_hides_secrets() {
    let env = full_env();
    let creds = Credentials::from_lookup(|name| env.get(name).cloned()).expect("All set");
    let debug = format!("{:?}", creds);

    assert!(!debug.contains("sk-test"));
    assert!(!debug.contains("\"cs\""));
    assert!(!debug.contains("\"as\""));
}

#[test]
fn test_endpoints_default_and_override() {
    let defaults = ApiEndpoints::from_lookup(|_| None);
    assert_eq!(defaults.twitter_base_url, "https://api.twitter.com");
    assert_eq!(defaults.openai_base_url, "https://api.openai.com");

    let overridden = ApiEndpoints::from_lookup(|name| {
        (name == "TWITTER_API_BASE_URL").then(|| "http://localhost:9000".to_string())
    });
    assert_eq!(overridden.twitter_base_url, "http://localhost:9000");
    assert_eq!(overridden.openai_base_url, "https://api.openai.com");
}

#[test]
fn test_empty_toml_uses_defaults() {
    let config = BotConfig::from_toml("").expect("Empty config is valid");

    assert_eq!(
        config.schedule,
        ScheduleType::RandomInterval {
            min_minutes: 5,
            max_minutes: 10
        }
    );
    assert!(config.run_on_start);
    assert_eq!(config.since_id, None);
    assert!(config.replies.enabled);
    assert_eq!(config.replies.max_per_cycle, 3);
    assert_eq!(config.replies.delay_seconds, 2);
    assert_eq!(config.generation.model(), "gpt-4-turbo-preview");
    assert_eq!(config.generation.max_tokens(), &100);
    assert_eq!(config.generation.length_policy(), &LengthPolicy::Truncate);
}

#[test]
fn test_toml_overrides() {
    let config = BotConfig::from_toml(
        r#"
run_on_start = false
since_id = "1700"

[schedule]
type = "Cron"
expression = "0 0 */6 * * * *"

[replies]
max_per_cycle = 1
delay_seconds = 0

[generation]
temperature = 0.9
length_policy = "reject"

[server]
bind_addr = "0.0.0.0:9999"
"#,
    )
    .expect("Config should parse");

    assert!(!config.run_on_start);
    assert_eq!(config.since_id.as_deref(), Some("1700"));
    assert!(matches!(config.schedule, ScheduleType::Cron { .. }));
    assert_eq!(config.replies.max_per_cycle, 1);
    assert_eq!(config.replies.page_size, 10);
    assert_eq!(config.generation.temperature(), &0.9);
    assert_eq!(config.generation.length_policy(), &LengthPolicy::Reject);
    assert_eq!(config.server.bind_addr, "0.0.0.0:9999");
}

#[test]
fn test_invalid_schedule_is_rejected() {
    let err = BotConfig::from_toml(
        r#"
[schedule]
type = "RandomInterval"
min_minutes = 10
max_minutes = 5
"#,
    )
    .unwrap_err();

    assert!(err.to_string().contains("min_minutes"));
}

#[test]
fn test_malformed_toml_is_config_error() {
    let err = BotConfig::from_toml("schedule = [").unwrap_err();
    assert!(err.to_string().contains("Failed to parse config"));
}

#[test]
fn test_missing_file_is_config_error() {
    let err = BotConfig::from_file("/nonexistent/tr4c3.toml").unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}
