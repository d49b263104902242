//! Handles settings for the application.
//!
//! Values are read from `settings.toml` in the working directory (optional)
//! and then from `LOCANDA__<SECTION>__<KEY>` environment variables, which
//! win. See `settings.example.toml`.
use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;

const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub database: Database,
    pub bind: Option<String>,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct Auth {
    pub secret: String,
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
}

fn default_token_ttl_hours() -> i64 {
    DEFAULT_TOKEN_TTL_HOURS
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Option<Server>,
    pub auth: Auth,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::build(
            Config::builder()
                .add_source(File::with_name("settings").required(false))
                .add_source(
                    Environment::with_prefix("LOCANDA")
                        .prefix_separator("__")
                        .separator("__"),
                ),
        )
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder
            .set_default("app.level", "info")?
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn parse(toml: &str) -> Result<Settings, ConfigError> {
        Settings::build(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    #[test]
    fn reads_full_file() {
        let settings = parse(
            r#"
            [app]
            level = "debug"

            [server]
            database = { sqlite = "locanda.db" }
            bind = "0.0.0.0"
            port = 5000

            [auth]
            secret = "change-me"
            token_ttl_hours = 8
            "#,
        )
        .unwrap();

        assert_eq!(settings.app.level, "debug");
        let server = settings.server.unwrap();
        assert_eq!(server.database, Database::Sqlite("locanda.db".to_string()));
        assert_eq!(server.port, 5000);
        assert_eq!(settings.auth.token_ttl_hours, 8);
    }

    #[test]
    fn fills_defaults() {
        let settings = parse(
            r#"
            [server]
            database = "memory"
            port = 5000

            [auth]
            secret = "change-me"
            "#,
        )
        .unwrap();

        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.server.unwrap().database, Database::Memory);
        assert_eq!(settings.auth.token_ttl_hours, DEFAULT_TOKEN_TTL_HOURS);
    }

    #[test]
    fn secret_is_required() {
        assert!(parse("[app]\nlevel = \"info\"\n").is_err());
    }
}
