use std::{path::PathBuf, str::FromStr};

use buildtrack_core::domain::TransitionPolicy;
use serde::Deserialize;
use serde_with::serde_as;
use strum::{Display, EnumString};
use time::UtcOffset;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub assistant: AssistantSettings,
    #[serde(default)]
    pub qaqc: QaqcSettings,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    pub host: String,
    pub app_url: String,
    /// Offset used for "today" in calendar and notification logic.
    #[serde_as(as = "serde_with::DisplayFromStr")]
    #[serde(default)]
    pub utc_offset_hours: i8,
}

impl ApplicationSettings {
    pub fn utc_offset(&self) -> Result<UtcOffset, time::error::ComponentRange> {
        UtcOffset::from_hms(self.utc_offset_hours, 0, 0)
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct StoreSettings {
    pub seed_demo_data: bool,
    /// JSON file keyed by collection name, loaded at startup.
    pub snapshot_path: Option<PathBuf>,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            seed_demo_data: true,
            snapshot_path: None,
        }
    }
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct AssistantSettings {
    pub enabled: bool,
    pub model: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct QaqcSettings {
    #[serde(default)]
    pub transition_policy: TransitionPolicy,
}

pub fn read_config() -> Result<Settings, config::ConfigError> {
    let base_path =
        std::env::current_dir().map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;
    let config_directory = base_path.join("config");

    let environment = Environment::from_str(
        std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .as_str(),
    )
    .map_err(|e| config::ConfigError::Message(format!("Failed to parse APP_ENVIRONMENT: {e}")))?;
    let environment_filename = format!("{}.yaml", environment);

    let settings = config::Config::builder()
        .add_source(config::File::from(config_directory.join("base.yaml")))
        .add_source(config::File::from(
            config_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("BUILDTRACK")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[derive(Display, Debug, EnumString)]
pub enum Environment {
    #[strum(ascii_case_insensitive, serialize = "local")]
    Local,
    #[strum(ascii_case_insensitive, serialize = "production")]
    Production,
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    fn settings_from(sources: &[&str]) -> Settings {
        sources
            .iter()
            .fold(config::Config::builder(), |builder, source| {
                builder.add_source(File::from_str(source, FileFormat::Yaml))
            })
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn base_and_local_files_deserialize() {
        let settings = settings_from(&[
            include_str!("../config/base.yaml"),
            include_str!("../config/local.yaml"),
        ]);

        assert_eq!(settings.application.port, 8080);
        assert!(settings.store.seed_demo_data);
        assert_eq!(settings.qaqc.transition_policy, TransitionPolicy::Unrestricted);
    }

    #[test]
    fn production_overrides_policy_and_seeding() {
        let settings = settings_from(&[
            include_str!("../config/base.yaml"),
            include_str!("../config/production.yaml"),
        ]);

        assert!(!settings.store.seed_demo_data);
        assert_eq!(settings.qaqc.transition_policy, TransitionPolicy::Workflow);
        assert_eq!(settings.application.utc_offset().unwrap().whole_hours(), 7);
    }

    #[test]
    fn environment_names_are_case_insensitive() {
        assert!(matches!(
            Environment::from_str("Production"),
            Ok(Environment::Production)
        ));
        assert!(Environment::from_str("staging").is_err());
    }
}
