use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PlacegridError, Result};
use crate::models::SearchProfile;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Scope of the planner's exact-coordinate deduplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DedupScope {
    /// First-seen-wins across all profiles: a later profile reusing an
    /// earlier profile's exact point issues no second query.
    #[default]
    Global,
    /// Unique per (coordinate, profile): each category queries its own set.
    PerProfile,
}

impl std::str::FromStr for DedupScope {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "global" => Ok(DedupScope::Global),
            "per-profile" => Ok(DedupScope::PerProfile),
            other => Err(format!("unknown dedup scope '{other}': expected 'global' or 'per-profile'")),
        }
    }
}

/// Validated planner settings consumed by the coverage planner.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub overlap_factor: f64,
    pub circle_vertices: u32,
    pub gap_fill: bool,
    pub max_gap_passes: u32,
    pub gap_epsilon: f64,
    pub dedup_scope: DedupScope,
}

/// Layered configuration for placegrid
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub overlap_factor: ConfigValue<f64>,
    pub circle_vertices: ConfigValue<u32>,
    pub gap_fill: ConfigValue<bool>,
    pub max_gap_passes: ConfigValue<u32>,
    pub gap_epsilon: ConfigValue<f64>,
    pub dedup_scope: ConfigValue<DedupScope>,
    pub request_timeout_secs: ConfigValue<u64>,
    pub max_retries: ConfigValue<u32>,
    pub profiles: ConfigValue<Vec<SearchProfile>>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            overlap_factor: ConfigValue::new(1.4, ConfigSource::Default),
            circle_vertices: ConfigValue::new(32, ConfigSource::Default),
            gap_fill: ConfigValue::new(true, ConfigSource::Default),
            max_gap_passes: ConfigValue::new(1, ConfigSource::Default),
            gap_epsilon: ConfigValue::new(0.01, ConfigSource::Default),
            dedup_scope: ConfigValue::new(DedupScope::Global, ConfigSource::Default),
            request_timeout_secs: ConfigValue::new(30, ConfigSource::Default),
            max_retries: ConfigValue::new(3, ConfigSource::Default),
            profiles: ConfigValue::new(Vec::new(), ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| PlacegridError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| PlacegridError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        // Update values from file
        if let Some(overlap_factor) = file_config.overlap_factor {
            self.overlap_factor.update(overlap_factor, ConfigSource::File);
        }
        if let Some(circle_vertices) = file_config.circle_vertices {
            self.circle_vertices.update(circle_vertices, ConfigSource::File);
        }
        if let Some(gap_fill) = file_config.gap_fill {
            self.gap_fill.update(gap_fill, ConfigSource::File);
        }
        if let Some(max_gap_passes) = file_config.max_gap_passes {
            self.max_gap_passes.update(max_gap_passes, ConfigSource::File);
        }
        if let Some(gap_epsilon) = file_config.gap_epsilon {
            self.gap_epsilon.update(gap_epsilon, ConfigSource::File);
        }
        if let Some(dedup_scope) = file_config.dedup_scope {
            self.dedup_scope.update(dedup_scope, ConfigSource::File);
        }
        if let Some(request_timeout_secs) = file_config.request_timeout_secs {
            self.request_timeout_secs.update(request_timeout_secs, ConfigSource::File);
        }
        if let Some(max_retries) = file_config.max_retries {
            self.max_retries.update(max_retries, ConfigSource::File);
        }
        if let Some(profiles) = file_config.profiles {
            let profiles = profiles
                .into_iter()
                .map(|entry| SearchProfile::new(entry.category, entry.radius_m))
                .collect();
            self.profiles.update(profiles, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        if let Ok(raw) = env::var("PLACEGRID_OVERLAP_FACTOR") {
            match raw.parse::<f64>() {
                Ok(value) => self.overlap_factor.update(value, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid PLACEGRID_OVERLAP_FACTOR value '{}': expected float",
                    raw
                ),
            }
        }

        if let Ok(raw) = env::var("PLACEGRID_CIRCLE_VERTICES") {
            match raw.parse::<u32>() {
                Ok(value) => self.circle_vertices.update(value, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid PLACEGRID_CIRCLE_VERTICES value '{}': expected integer",
                    raw
                ),
            }
        }

        if let Ok(raw) = env::var("PLACEGRID_GAP_FILL") {
            match raw.parse::<bool>() {
                Ok(value) => self.gap_fill.update(value, ConfigSource::Environment),
                Err(_) => {
                    tracing::warn!("Invalid PLACEGRID_GAP_FILL value '{}': expected bool", raw)
                }
            }
        }

        if let Ok(raw) = env::var("PLACEGRID_MAX_GAP_PASSES") {
            match raw.parse::<u32>() {
                Ok(value) => self.max_gap_passes.update(value, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid PLACEGRID_MAX_GAP_PASSES value '{}': expected integer",
                    raw
                ),
            }
        }

        if let Ok(raw) = env::var("PLACEGRID_GAP_EPSILON") {
            match raw.parse::<f64>() {
                Ok(value) => self.gap_epsilon.update(value, ConfigSource::Environment),
                Err(_) => {
                    tracing::warn!("Invalid PLACEGRID_GAP_EPSILON value '{}': expected float", raw)
                }
            }
        }

        if let Ok(raw) = env::var("PLACEGRID_DEDUP_SCOPE") {
            match raw.parse::<DedupScope>() {
                Ok(value) => self.dedup_scope.update(value, ConfigSource::Environment),
                Err(reason) => tracing::warn!("Invalid PLACEGRID_DEDUP_SCOPE: {}", reason),
            }
        }

        if let Ok(raw) = env::var("PLACEGRID_REQUEST_TIMEOUT_SECS") {
            match raw.parse::<u64>() {
                Ok(value) => self.request_timeout_secs.update(value, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid PLACEGRID_REQUEST_TIMEOUT_SECS value '{}': expected integer",
                    raw
                ),
            }
        }

        if let Ok(raw) = env::var("PLACEGRID_MAX_RETRIES") {
            match raw.parse::<u32>() {
                Ok(value) => self.max_retries.update(value, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid PLACEGRID_MAX_RETRIES value '{}': expected integer",
                    raw
                ),
            }
        }

        self
    }

    /// Apply CLI argument overrides (highest precedence)
    pub fn apply_cli(mut self, overrides: CliConfigOverrides) -> Self {
        if let Some(overlap_factor) = overrides.overlap_factor {
            self.overlap_factor.update(overlap_factor, ConfigSource::Cli);
        }
        if let Some(circle_vertices) = overrides.circle_vertices {
            self.circle_vertices.update(circle_vertices, ConfigSource::Cli);
        }
        if let Some(gap_fill) = overrides.gap_fill {
            self.gap_fill.update(gap_fill, ConfigSource::Cli);
        }
        if let Some(max_gap_passes) = overrides.max_gap_passes {
            self.max_gap_passes.update(max_gap_passes, ConfigSource::Cli);
        }
        if let Some(dedup_scope) = overrides.dedup_scope {
            self.dedup_scope.update(dedup_scope, ConfigSource::Cli);
        }
        if let Some(profiles) = overrides.profiles {
            self.profiles.update(profiles, ConfigSource::Cli);
        }
        self
    }

    /// Validate and extract the planner settings.
    pub fn planner_config(&self) -> Result<PlannerConfig> {
        let overlap_factor = self.overlap_factor.value;
        if !(overlap_factor > 1.0) {
            return Err(PlacegridError::ConfigInvalid {
                key: "overlap_factor".to_string(),
                reason: "must be greater than 1.0 so adjacent circles overlap".to_string(),
            });
        }
        if overlap_factor > std::f64::consts::SQRT_2 {
            tracing::warn!(
                overlap_factor,
                "overlap factor above sqrt(2) leaves lattice seams; gap filling will compensate"
            );
        }

        let circle_vertices = self.circle_vertices.value;
        if circle_vertices < 8 {
            return Err(PlacegridError::ConfigInvalid {
                key: "circle_vertices".to_string(),
                reason: "at least 8 vertices are required for a usable disc approximation"
                    .to_string(),
            });
        }
        if circle_vertices < 32 {
            tracing::warn!(
                circle_vertices,
                "fewer than 32 circle vertices; the approximation error may exceed the overlap margin"
            );
        }

        let gap_epsilon = self.gap_epsilon.value;
        if !(gap_epsilon > 0.0 && gap_epsilon < 1.0) {
            return Err(PlacegridError::ConfigInvalid {
                key: "gap_epsilon".to_string(),
                reason: "must be a fraction strictly between 0 and 1".to_string(),
            });
        }

        let max_gap_passes = self.max_gap_passes.value;
        if max_gap_passes == 0 {
            return Err(PlacegridError::ConfigInvalid {
                key: "max_gap_passes".to_string(),
                reason: "must be at least 1; disable gap filling with gap_fill = false".to_string(),
            });
        }

        Ok(PlannerConfig {
            overlap_factor,
            circle_vertices,
            gap_fill: self.gap_fill.value,
            max_gap_passes,
            gap_epsilon,
            dedup_scope: self.dedup_scope.value,
        })
    }
}

/// CLI argument overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct CliConfigOverrides {
    pub overlap_factor: Option<f64>,
    pub circle_vertices: Option<u32>,
    pub gap_fill: Option<bool>,
    pub max_gap_passes: Option<u32>,
    pub dedup_scope: Option<DedupScope>,
    pub profiles: Option<Vec<SearchProfile>>,
}

/// TOML file representation of configuration
#[derive(Debug, Deserialize)]
struct FileConfig {
    overlap_factor: Option<f64>,
    circle_vertices: Option<u32>,
    gap_fill: Option<bool>,
    max_gap_passes: Option<u32>,
    gap_epsilon: Option<f64>,
    dedup_scope: Option<DedupScope>,
    request_timeout_secs: Option<u64>,
    max_retries: Option<u32>,
    profiles: Option<Vec<ProfileEntry>>,
}

#[derive(Debug, Deserialize)]
struct ProfileEntry {
    category: String,
    radius_m: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_validate() {
        let config = LayeredConfig::with_defaults();
        let planner = config.planner_config().unwrap();
        assert_eq!(planner.overlap_factor, 1.4);
        assert_eq!(planner.circle_vertices, 32);
        assert!(planner.gap_fill);
        assert_eq!(planner.max_gap_passes, 1);
        assert_eq!(planner.dedup_scope, DedupScope::Global);
    }

    #[test]
    fn test_file_values_override_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
overlap_factor = 1.2
circle_vertices = 64
dedup_scope = "per-profile"

[[profiles]]
category = "hospital"
radius_m = 2000

[[profiles]]
category = "pharmacy"
radius_m = 1500.5
"#
        )
        .unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();
        assert_eq!(config.overlap_factor.value, 1.2);
        assert_eq!(config.overlap_factor.source, ConfigSource::File);
        assert_eq!(config.circle_vertices.value, 64);
        assert_eq!(config.dedup_scope.value, DedupScope::PerProfile);
        assert_eq!(config.profiles.value.len(), 2);
        assert_eq!(config.profiles.value[0].category, "hospital");
        assert_eq!(config.profiles.value[1].radius_m, 1500.5);
    }

    #[test]
    fn test_cli_outranks_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "overlap_factor = 1.2").unwrap();

        let config = LayeredConfig::with_defaults()
            .load_from_file(file.path())
            .unwrap()
            .apply_cli(CliConfigOverrides { overlap_factor: Some(1.3), ..Default::default() });

        assert_eq!(config.overlap_factor.value, 1.3);
        assert_eq!(config.overlap_factor.source, ConfigSource::Cli);
    }

    #[test]
    fn test_overlap_factor_must_exceed_one() {
        let mut config = LayeredConfig::with_defaults();
        config.overlap_factor.update(1.0, ConfigSource::Cli);
        assert!(matches!(
            config.planner_config(),
            Err(PlacegridError::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn test_too_few_circle_vertices_rejected() {
        let mut config = LayeredConfig::with_defaults();
        config.circle_vertices.update(6, ConfigSource::Cli);
        assert!(config.planner_config().is_err());
    }

    #[test]
    fn test_gap_epsilon_range() {
        let mut config = LayeredConfig::with_defaults();
        config.gap_epsilon.update(0.0, ConfigSource::Cli);
        assert!(config.planner_config().is_err());

        let mut config = LayeredConfig::with_defaults();
        config.gap_epsilon.update(1.5, ConfigSource::Cli);
        assert!(config.planner_config().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "overlap_factor = ][").unwrap();

        let err = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, PlacegridError::ConfigInvalid { .. }));
    }

    #[test]
    fn test_dedup_scope_parsing() {
        assert_eq!("global".parse::<DedupScope>().unwrap(), DedupScope::Global);
        assert_eq!("per-profile".parse::<DedupScope>().unwrap(), DedupScope::PerProfile);
        assert!("both".parse::<DedupScope>().is_err());
    }
}
