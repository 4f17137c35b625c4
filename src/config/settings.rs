//! Configuration for one configuration run

use crate::desktop::DesktopEnvironment;
use crate::utils::error::{ConfigureError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where the build driver mounts the target image
pub const DEFAULT_TARGET_ROOT: &str = "/mnt/eupnea";

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigureConfig {
    pub target: TargetConfig,
    pub desktop: DesktopConfig,
    #[serde(default)]
    pub options: RunOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Mounted root of the system being configured
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Fedora release (e.g. "39"), used for repository URLs
    pub distro_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesktopConfig {
    /// Desktop environment selector tag
    pub environment: DesktopEnvironment,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RunOptions {
    /// Show output of chroot commands
    #[serde(default)]
    pub verbose: bool,
    /// Print commands instead of running them
    #[serde(default)]
    pub dry_run: bool,
}

fn default_root() -> PathBuf {
    PathBuf::from(DEFAULT_TARGET_ROOT)
}

impl ConfigureConfig {
    pub fn new(desktop: DesktopEnvironment, distro_version: &str) -> Self {
        Self {
            target: TargetConfig {
                root: default_root(),
                distro_version: distro_version.to_string(),
            },
            desktop: DesktopConfig {
                environment: desktop,
            },
            options: RunOptions::default(),
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse TOML text. A rejected desktop tag surfaces as its own error,
    /// not as a generic parse failure.
    pub fn from_toml(content: &str) -> Result<Self> {
        let value: toml::Value = toml::from_str(content)?;
        if let Some(tag) = value
            .get("desktop")
            .and_then(|d| d.get("environment"))
            .and_then(toml::Value::as_str)
        {
            tag.parse::<DesktopEnvironment>()?;
        }
        let config: ConfigureConfig = value.try_into()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Sample configuration for `generate-config`
    pub fn sample() -> Self {
        Self::new(DesktopEnvironment::Gnome, "39")
    }

    /// Validate the configuration.
    ///
    /// Only the distro version is checked here; the target root is checked
    /// right before commands run so that plans can be printed anywhere.
    pub fn validate(&self) -> Result<()> {
        validate_distro_version(&self.target.distro_version)
    }

    /// Check that the target root exists and is a directory
    pub fn validate_target(&self) -> Result<()> {
        if !self.target.root.is_dir() {
            return Err(ConfigureError::TargetRootMissing(
                self.target.root.display().to_string(),
            ));
        }
        Ok(())
    }
}

/// The version is embedded in a URL path segment, so keep it to URL-safe characters
fn validate_distro_version(version: &str) -> Result<()> {
    let valid = !version.is_empty()
        && version
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
    if !valid {
        return Err(ConfigureError::InvalidDistroVersion(version.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn sample_is_valid() {
        let cfg = ConfigureConfig::sample();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.target.root, PathBuf::from(DEFAULT_TARGET_ROOT));
    }

    #[test]
    fn rejects_bad_versions() {
        for version in ["", "39 40", "39\"; reboot", "../39", "39/x"] {
            let cfg = ConfigureConfig::new(DesktopEnvironment::Cli, version);
            assert!(
                matches!(cfg.validate(), Err(ConfigureError::InvalidDistroVersion(_))),
                "{version:?}"
            );
        }
    }

    #[test]
    fn accepts_release_style_versions() {
        for version in ["39", "40", "rawhide", "41_beta", "1.2-3"] {
            assert!(ConfigureConfig::new(DesktopEnvironment::Cli, version)
                .validate()
                .is_ok());
        }
    }

    #[test]
    fn target_must_exist() {
        let mut cfg = ConfigureConfig::sample();
        cfg.target.root = PathBuf::from("/definitely/not/a/target/root");
        assert!(matches!(
            cfg.validate_target(),
            Err(ConfigureError::TargetRootMissing(_))
        ));

        let dir = tempfile::tempdir().unwrap();
        cfg.target.root = dir.path().to_path_buf();
        assert!(cfg.validate_target().is_ok());
    }

    #[test]
    fn loads_toml_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[target]\ndistro_version = \"40\"\n\n[desktop]\nenvironment = \"minimal\"\n"
        )
        .unwrap();

        let cfg = ConfigureConfig::from_file(file.path()).unwrap();
        assert_eq!(cfg.target.distro_version, "40");
        assert_eq!(cfg.target.root, PathBuf::from(DEFAULT_TARGET_ROOT));
        assert_eq!(cfg.desktop.environment, DesktopEnvironment::Xfce);
        assert!(!cfg.options.verbose);
        assert!(!cfg.options.dry_run);
    }

    #[test]
    fn unsupported_desktop_in_file_fails_to_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[target]\ndistro_version = \"40\"\n\n[desktop]\nenvironment = \"budgie\"\n"
        )
        .unwrap();

        let err = ConfigureConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigureError::UnsupportedDesktop(ref name) if name == "Budgie"));
        assert!(err.is_desktop_selection());
    }

    #[test]
    fn unknown_desktop_in_file_is_a_desktop_error() {
        let err = ConfigureConfig::from_toml(
            "[target]\ndistro_version = \"40\"\n\n[desktop]\nenvironment = \"Gnome\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigureError::UnknownDesktop(ref tag) if tag == "Gnome"));
    }

    #[test]
    fn missing_version_is_a_parse_error() {
        let err = ConfigureConfig::from_toml("[desktop]\nenvironment = \"kde\"\n").unwrap_err();
        assert!(matches!(err, ConfigureError::TomlParse(_)));
    }

    #[test]
    fn sample_round_trips_through_toml() {
        let text = ConfigureConfig::sample().to_toml().unwrap();
        assert!(text.contains("environment = \"gnome\""));
        let back = ConfigureConfig::from_toml(&text).unwrap();
        assert_eq!(back.desktop.environment, DesktopEnvironment::Gnome);
    }
}
