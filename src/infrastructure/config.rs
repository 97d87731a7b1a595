use crate::domain::comparison::ScoringConfig;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub api: ApiSettings,
    #[serde(default)]
    pub scoring: ScoringConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub timeout_secs: u64,
}

/// Load `config/analytics.*` (optional) overridden by `ANALYTICS__*` environment variables
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name("config/analytics").required(false))
        .add_source(config::Environment::with_prefix("ANALYTICS").separator("__"));

    build_app_config(builder)
}

fn build_app_config(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> anyhow::Result<AppConfig> {
    let settings = builder
        .set_default("server.bind", "0.0.0.0:8080")?
        .set_default("api.base_url", "http://localhost:8000/api")?
        .set_default("api.username", "")?
        .set_default("api.password", "")?
        .set_default("api.timeout_secs", 30)?
        .build()?;

    let app_config: AppConfig = settings.try_deserialize()?;

    let invalid = app_config.scoring.invalid_ceilings();
    if !invalid.is_empty() {
        anyhow::bail!("scoring ceilings must be positive numbers: {}", invalid.join(", "));
    }

    Ok(app_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(toml: &str) -> anyhow::Result<AppConfig> {
        let builder = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml));
        build_app_config(builder)
    }

    #[test]
    fn test_defaults() {
        let app_config = from_toml("").unwrap();

        assert_eq!(app_config.server.bind, "0.0.0.0:8080");
        assert_eq!(app_config.api.timeout_secs, 30);
        assert_eq!(app_config.scoring, ScoringConfig::default());
    }

    #[test]
    fn test_partial_scoring_override() {
        let app_config = from_toml(
            r#"
            [api]
            base_url = "http://equipment.internal/api"
            username = "analyst"
            password = "secret"

            [scoring]
            flowrate_ceiling = 500.0
            "#,
        )
        .unwrap();

        assert_eq!(app_config.api.base_url, "http://equipment.internal/api");
        assert_eq!(app_config.scoring.flowrate_ceiling, 500.0);
        assert_eq!(app_config.scoring.pressure_ceiling, 50.0);
    }

    #[test]
    fn test_rejects_zero_ceiling() {
        let err = from_toml("[scoring]\npressure_ceiling = 0.0\n").unwrap_err();

        assert!(err.to_string().contains("pressure_ceiling"));
    }
}
