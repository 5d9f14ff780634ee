use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::profile::SubmissionProfile;
use super::PolecalcConfig;

pub const CONFIG_FILE_NAME: &str = ".polecalc.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Read a config file's contents
pub(crate) fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse and validate config from a TOML string.
///
/// An invalid `[profile]` section is dropped with a warning rather than
/// failing the whole file.
pub fn parse_and_validate_config(contents: &str) -> Result<PolecalcConfig, String> {
    let mut config = toml::from_str::<PolecalcConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))?;

    if let Some(ref profile) = config.profile {
        if let Err(e) = profile.validate() {
            warn!("Invalid submission profile in config: {}. Ignoring it.", e);
            config.profile = None;
        }
    }

    if let Some(wind) = config.defaults.wind_speed {
        if !wind.is_finite() || wind < 0.0 {
            warn!("Invalid default wind speed {}. Ignoring it.", wind);
            config.defaults.wind_speed = None;
        }
    }
    if let Some(ice) = config.defaults.ice_thickness {
        if !ice.is_finite() || ice < 0.0 {
            warn!("Invalid default ice thickness {}. Ignoring it.", ice);
            config.defaults.ice_thickness = None;
        }
    }

    Ok(config)
}

/// Parse a standalone submission profile from TOML.
pub fn parse_profile(contents: &str) -> Result<SubmissionProfile, String> {
    let profile = toml::from_str::<SubmissionProfile>(contents)
        .map_err(|e| format!("Failed to parse submission profile: {}", e))?;
    profile
        .validate()
        .map_err(|e| format!("Invalid submission profile: {}", e))?;
    Ok(profile)
}

/// Try loading config from a specific path
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<PolecalcConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Directory ancestors of `start`, nearest first, up to `max_depth` entries
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Find the nearest config file walking up from `start`.
pub fn load_config_from(start: PathBuf) -> PolecalcConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            PolecalcConfig::default()
        })
}

pub fn load_config() -> PolecalcConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(dir),
        Err(e) => {
            warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            PolecalcConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SpanEnvironment;
    use indoc::indoc;

    #[test]
    fn parses_defaults_and_profile() {
        let config = parse_and_validate_config(indoc! {r#"
            [defaults]
            preset = "firstEnergy"
            wind_speed = 100.0
            span_environment = "residential"

            [profile]
            name = "WV permit"
            min_comm_attach_ft = 18.0

            [profile.ground_targets]
            railroad = 23.5
        "#})
        .unwrap();

        assert_eq!(config.defaults.preset.as_deref(), Some("firstEnergy"));
        assert_eq!(config.defaults.wind_speed, Some(100.0));
        assert_eq!(
            config.defaults.span_environment,
            Some(SpanEnvironment::Residential)
        );
        let profile = config.profile.unwrap();
        assert_eq!(profile.min_comm_attach_ft, Some(18.0));
        assert_eq!(
            profile.ground_target_for(SpanEnvironment::Railroad),
            Some(23.5)
        );
    }

    #[test]
    fn invalid_profile_is_dropped_not_fatal() {
        let config = parse_and_validate_config(indoc! {r#"
            [profile]
            min_top_space_ft = -3.0
        "#})
        .unwrap();
        assert!(config.profile.is_none());
    }

    #[test]
    fn negative_default_wind_is_dropped() {
        let config = parse_and_validate_config("[defaults]\nwind_speed = -5.0\n").unwrap();
        assert!(config.defaults.wind_speed.is_none());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(parse_and_validate_config("[defaults\n").is_err());
    }

    #[test]
    fn parse_profile_validates() {
        assert!(parse_profile("comm_to_power_in = 44.0\n").is_ok());
        assert!(parse_profile("comm_to_power_in = -1.0\n").is_err());
    }

    #[test]
    fn ancestors_are_bounded() {
        let dirs: Vec<PathBuf> = directory_ancestors(PathBuf::from("/a/b/c/d"), 2).collect();
        assert_eq!(dirs, vec![PathBuf::from("/a/b/c/d"), PathBuf::from("/a/b/c")]);
    }

    #[test]
    fn finds_config_in_parent_directory() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("jobs").join("pole-17");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            root.path().join(CONFIG_FILE_NAME),
            "[defaults]\nice_thickness = 0.5\n",
        )
        .unwrap();

        let config = load_config_from(nested);
        assert_eq!(config.defaults.ice_thickness, Some(0.5));
    }

    #[test]
    fn missing_config_yields_default() {
        let root = tempfile::tempdir().unwrap();
        let config = try_load_config_from_path(&root.path().join(CONFIG_FILE_NAME));
        assert!(config.is_none());
    }
}
