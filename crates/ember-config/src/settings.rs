use config::{Config, ConfigError, File};
use ember_curve::CurveParams;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BackendConfig {
    /// Base URL of the backend fronting the storage endpoints and the
    /// creation service.
    pub base_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TimingConfig {
    /// Milliseconds each cosmetic progress stage stays active.
    pub progress_step_ms: u64,
    /// Milliseconds between creation success and the redirect event.
    pub redirect_delay_ms: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LaunchConfig {
    pub backend: BackendConfig,
    /// Curve constants must match the receiving service's economics model.
    pub curve: CurveParams,
    pub timing: TimingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LaunchSettings {
    pub config: LaunchConfig,
}

impl TryFrom<Config> for LaunchSettings {
    type Error = ConfigError;

    fn try_from(config: Config) -> Result<Self, Self::Error> {
        let backend = BackendConfig {
            base_url: config.get_string("backend.base_url")?,
        };

        let curve = CurveParams {
            fee_bps: config.get_int("curve.fee_bps")?.try_into().map_err(|_| {
                ConfigError::Message("curve.fee_bps out of range".to_string())
            })?,
            virtual_base_reserve: config
                .get_int("curve.virtual_base_reserve")?
                .try_into()
                .map_err(|_| {
                    ConfigError::Message("curve.virtual_base_reserve out of range".to_string())
                })?,
            virtual_token_reserve: config
                .get_int("curve.virtual_token_reserve")?
                .try_into()
                .map_err(|_| {
                    ConfigError::Message("curve.virtual_token_reserve out of range".to_string())
                })?,
            unit_scale: config.get_int("curve.unit_scale")?.try_into().map_err(|_| {
                ConfigError::Message("curve.unit_scale out of range".to_string())
            })?,
        };

        let timing = TimingConfig {
            progress_step_ms: config
                .get_int("timing.progress_step_ms")?
                .try_into()
                .unwrap_or(800),
            redirect_delay_ms: config
                .get_int("timing.redirect_delay_ms")?
                .try_into()
                .unwrap_or(5_000),
        };

        Ok(LaunchSettings {
            config: LaunchConfig {
                backend,
                curve,
                timing,
            },
        })
    }
}

impl Default for LaunchSettings {
    fn default() -> Self {
        LaunchSettings {
            config: LaunchConfig {
                backend: BackendConfig {
                    base_url: "http://127.0.0.1:8080".to_string(),
                },
                curve: CurveParams::default(),
                timing: TimingConfig {
                    progress_step_ms: 800,
                    redirect_delay_ms: 5_000,
                },
            },
        }
    }
}

impl LaunchSettings {
    /// Builds the settings from the TOML file named by `EMBER_CONFIG`.
    pub fn new() -> Result<Self, ConfigError> {
        let config_path = env::var("EMBER_CONFIG").map_err(|_| {
            ConfigError::Message("EMBER_CONFIG environment variable must be set".to_string())
        })?;

        Config::builder()
            .add_source(File::with_name(&config_path).required(true))
            .build()?
            .try_into()
    }

    /// Loads the configuration from a TOML file, overriding current
    /// settings.
    pub fn load(&mut self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let loaded: Self = toml::from_str(&contents)?;
        *self = loaded;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_carry_protocol_constants() {
        let settings = LaunchSettings::default();
        assert_eq!(settings.config.curve.fee_bps, 345);
        assert_eq!(settings.config.curve.virtual_base_reserve, 30_000_000_001);
        assert_eq!(settings.config.timing.progress_step_ms, 800);
    }

    #[test]
    fn settings_round_trip_through_toml() {
        let settings = LaunchSettings::default();
        let serialized = toml::to_string(&settings).unwrap();

        let parsed: LaunchSettings = toml::from_str(&serialized).unwrap();
        assert_eq!(
            parsed.config.backend.base_url,
            settings.config.backend.base_url
        );
        assert_eq!(parsed.config.curve, settings.config.curve);
    }
}
