// netlytics-core/src/infrastructure/config/project.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, instrument};
use validator::Validate;

use crate::domain::project::PipelineConfig;
use crate::infrastructure::error::InfrastructureError;

const CONFIG_CANDIDATES: [&str; 2] = ["netlytics.yaml", "netlytics.yml"];

/// Environment variables that override paths from the project file.
pub const ENV_RAW_PATH: &str = "NETLYTICS_RAW_PATH";
pub const ENV_CLEANED_PATH: &str = "NETLYTICS_CLEANED_PATH";
pub const ENV_REPORT_PATH: &str = "NETLYTICS_REPORT_PATH";

/// Loads `netlytics.yaml` from the project directory.
///
/// The file is optional: an export directory with no config runs on the
/// defaults. Whatever is loaded is layered with env overrides, then validated.
#[instrument(skip(project_dir), fields(project = %project_dir.display()))]
pub fn load_pipeline_config(project_dir: &Path) -> Result<PipelineConfig, InfrastructureError> {
    let mut config = match find_config_file(project_dir) {
        Some(path) => {
            info!(path = %path.display(), "Loading pipeline config");
            let content = fs::read_to_string(&path)?;
            parse_config(&content)?
        }
        None => {
            info!("No netlytics.yaml found, using defaults");
            PipelineConfig::default()
        }
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    config.validate()?;
    Ok(config)
}

pub fn find_config_file(project_dir: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|p| p.is_file())
}

fn parse_config(content: &str) -> Result<PipelineConfig, InfrastructureError> {
    // An empty file deserializes as YAML null.
    if content.trim().is_empty() {
        return Ok(PipelineConfig::default());
    }
    Ok(serde_yaml::from_str(content)?)
}

fn apply_env_overrides<F>(config: &mut PipelineConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let targets = [
        (ENV_RAW_PATH, &mut config.raw_path),
        (ENV_CLEANED_PATH, &mut config.cleaned_path),
        (ENV_REPORT_PATH, &mut config.report_path),
    ];
    for (key, slot) in targets {
        if let Some(val) = lookup(key).filter(|v| !v.trim().is_empty()) {
            info!(var = key, old = %slot, new = %val, "Overriding path via ENV");
            *slot = val;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_uses_defaults() -> Result<()> {
        let dir = tempdir()?;
        assert!(find_config_file(dir.path()).is_none());
        let config = load_pipeline_config(dir.path())?;
        assert_eq!(config.digest_length, 8);
        Ok(())
    }

    #[test]
    fn test_yml_extension_found() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("netlytics.yml"), "name: mine\nskip-missing: true\n")?;
        let config = load_pipeline_config(dir.path())?;
        assert_eq!(config.name, "mine");
        assert!(config.skip_missing);
        Ok(())
    }

    #[test]
    fn test_empty_file_is_default() -> Result<()> {
        assert_eq!(parse_config("\n")?, PipelineConfig::default());
        Ok(())
    }

    #[test]
    fn test_invalid_values_rejected() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("netlytics.yaml"), "digest-length: 2\n")?;
        let res = load_pipeline_config(dir.path());
        assert!(matches!(res, Err(InfrastructureError::InvalidConfig(_))));
        Ok(())
    }

    #[test]
    fn test_env_overrides() {
        let mut config = PipelineConfig::default();
        apply_env_overrides(&mut config, |key| match key {
            ENV_CLEANED_PATH => Some("/tmp/out".to_string()),
            ENV_REPORT_PATH => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(config.cleaned_path, "/tmp/out");
        assert_eq!(config.raw_path, "data/raw");
        assert_eq!(config.report_path, "outputs/pipeline_report.json");
    }
}
