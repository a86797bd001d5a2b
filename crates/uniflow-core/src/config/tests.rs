use super::*;
use std::io::Write;

#[test]
fn test_defaults_when_file_missing() {
    let cfg = load("/nonexistent/__uniflow_config__.toml").unwrap();
    assert_eq!(cfg.uniflow.name, "UniFlow");
    assert_eq!(cfg.uniflow.language, "English");
    assert_eq!(cfg.storage.db_path, "~/.uniflow/uniflow.db");
    assert_eq!(cfg.session.ttl_minutes, 30);
    assert_eq!(cfg.bot.default_context_color, "#3B82F6");
}

#[test]
fn test_parse_full_config() {
    let toml_str = r##"
        [uniflow]
        language = "Russian"
        log_to_file = true

        [channel.telegram]
        bot_token = "123:abc"
        allowed_users = [42, 43]

        [storage]
        db_path = "/tmp/uniflow.db"

        [session]
        ttl_minutes = 5

        [bot]
        default_context_color = "#000000"
    "##;
    let cfg: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(cfg.uniflow.language, "Russian");
    assert!(cfg.uniflow.log_to_file);
    assert_eq!(cfg.uniflow.log_level, "info");

    let tg = cfg.channel.telegram.unwrap();
    assert!(tg.enabled, "telegram section present means enabled by default");
    assert_eq!(tg.bot_token, "123:abc");
    assert_eq!(tg.allowed_users, vec![42, 43]);

    assert_eq!(cfg.storage.db_path, "/tmp/uniflow.db");
    assert_eq!(cfg.session.ttl_minutes, 5);
    assert_eq!(cfg.session.sweep_interval_secs, 60);
    assert_eq!(cfg.bot.default_context_color, "#000000");
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[session]\nttl_minutes = 12").unwrap();
    let cfg = load(file.path().to_str().unwrap()).unwrap();
    assert_eq!(cfg.session.ttl_minutes, 12);
}

#[test]
fn test_load_rejects_malformed_toml() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[session\nttl_minutes = ").unwrap();
    let err = load(file.path().to_str().unwrap()).unwrap_err();
    assert!(matches!(err, UniflowError::Config(_)));
}

#[test]
fn test_env_token_fills_empty_token_only() {
    let mut cfg = Config::default();
    apply_env_overrides(&mut cfg, Some("from-env".into()));
    assert_eq!(cfg.channel.telegram.as_ref().unwrap().bot_token, "from-env");

    apply_env_overrides(&mut cfg, Some("other".into()));
    assert_eq!(
        cfg.channel.telegram.as_ref().unwrap().bot_token,
        "from-env",
        "an explicit token wins over the environment"
    );

    let mut cfg = Config::default();
    apply_env_overrides(&mut cfg, Some("   ".into()));
    assert!(cfg.channel.telegram.is_none());
}

#[test]
fn test_shellexpand_home() {
    if let Some(home) = std::env::var_os("HOME") {
        assert_eq!(
            shellexpand("~/x.db"),
            format!("{}/x.db", home.to_string_lossy())
        );
    }
    assert_eq!(shellexpand("/abs/x.db"), "/abs/x.db");
}
