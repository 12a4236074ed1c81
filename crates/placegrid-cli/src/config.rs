//! Config file discovery and CLI-override assembly.

use std::path::Path;

use placegrid_core::config::{CliConfigOverrides, LayeredConfig};
use placegrid_core::models::SearchProfile;
use placegrid_core::Result;

const DEFAULT_CONFIG_FILE: &str = "placegrid.toml";

/// Build the layered configuration: defaults, then the config file (explicit
/// path or `./placegrid.toml` when present), then environment variables,
/// then CLI overrides.
pub fn load_config(explicit: Option<&Path>, overrides: CliConfigOverrides) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();

    if let Some(path) = explicit {
        config = config.load_from_file(path)?;
    } else if Path::new(DEFAULT_CONFIG_FILE).exists() {
        config = config.load_from_file(DEFAULT_CONFIG_FILE)?;
    }

    Ok(config.load_from_env().apply_cli(overrides))
}

/// Assemble planner overrides from the shared plan/scrape flags.
pub fn planner_overrides(
    categories: &[String],
    radius_m: f64,
    overlap_factor: Option<f64>,
    circle_vertices: Option<u32>,
    no_gap_fill: bool,
    max_gap_passes: Option<u32>,
) -> CliConfigOverrides {
    CliConfigOverrides {
        overlap_factor,
        circle_vertices,
        gap_fill: no_gap_fill.then_some(false),
        max_gap_passes,
        dedup_scope: None,
        profiles: (!categories.is_empty()).then(|| {
            categories
                .iter()
                .map(|category| SearchProfile::new(category.clone(), radius_m))
                .collect()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_categories_become_profiles() {
        let overrides = planner_overrides(
            &["hospital".to_string(), "pharmacy".to_string()],
            2000.0,
            None,
            None,
            false,
            None,
        );
        let profiles = overrides.profiles.unwrap();
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].category, "hospital");
        assert_eq!(profiles[1].radius_m, 2000.0);
        assert!(overrides.gap_fill.is_none());
    }

    #[test]
    fn test_no_categories_leaves_config_profiles() {
        let overrides = planner_overrides(&[], 2000.0, None, None, true, None);
        assert!(overrides.profiles.is_none());
        assert_eq!(overrides.gap_fill, Some(false));
    }
}
