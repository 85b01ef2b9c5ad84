//! Fixture catalog configuration
//!
//! The catalog lists the folders, add-ons, repositories and host state that
//! fixture archives describe. The built-in defaults are what most tests want;
//! a YAML file can override any part of it.

use backsync_core::{Error, Result};
use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::debug;

/// Default padding written into fixture archives, in bytes.
pub const DEFAULT_PADDING: usize = 20_000;

/// Description of one add-on embedded in archive metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddonInfo {
    pub name: String,
    pub slug: String,
    pub description: String,
    /// Free-form; catalog add-ons are not required to carry a parseable version
    pub version: String,
    pub size: f64,
}

impl AddonInfo {
    pub fn new(
        name: impl Into<String>,
        slug: impl Into<String>,
        description: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
            description: description.into(),
            version: version.into(),
            size: 0.0,
        }
    }
}

/// Synthetic host-state descriptor embedded in every archive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostState {
    pub ssl: bool,
    pub watchdog: bool,
    pub port: u16,
    pub wait_boot: u32,
    pub boot: bool,
    pub version: String,
    pub refresh_token: String,
}

impl Default for HostState {
    fn default() -> Self {
        Self {
            ssl: true,
            watchdog: true,
            port: 8123,
            wait_boot: 600,
            boot: true,
            version: "0.92.2".to_string(),
            refresh_token: "fake_token".to_string(),
        }
    }
}

/// Catalog used when building fixture archives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureConfig {
    /// Folders a full archive includes
    pub folders: Vec<String>,

    /// Add-ons a full archive includes
    pub addons: Vec<AddonInfo>,

    /// Repository URLs listed in every archive
    pub repositories: Vec<String>,

    /// Host state descriptor
    pub host: HostState,

    /// Padding size used when a test doesn't ask for one
    pub default_padding: usize,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            folders: vec![
                "share".to_string(),
                "ssl".to_string(),
                "addons/local".to_string(),
                "homeassistant".to_string(),
            ],
            addons: vec![
                AddonInfo::new(
                    "Sexy Robots",
                    "sexy_robots",
                    "The robots you already know, but sexier. See what they don't want you to see.",
                    "0.69",
                ),
                AddonInfo::new(
                    "Particle Accelerator",
                    "particla_accel",
                    "What CAN'T you do with Home Assistant?",
                    "0.5",
                ),
                AddonInfo::new(
                    "Empty Addon",
                    "addon_empty",
                    "Explore the meaning of the universe by contemplating whats missing.",
                    "0.-1",
                ),
            ],
            repositories: vec!["https://github.com/hassio-addons/repository".to_string()],
            host: HostState::default(),
            default_padding: DEFAULT_PADDING,
        }
    }
}

impl FixtureConfig {
    /// Parses a catalog from YAML; omitted fields keep their defaults.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: FixtureConfig = serde_yaml_ng::from_str(content)?;
        Ok(config)
    }

    /// Loads a catalog from a YAML file.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::configuration(format!("Fixture config not found: {}", path))
            } else {
                Error::Io(e)
            }
        })?;

        debug!("Loaded fixture config from {}", path);
        Self::from_yaml(&content)
    }

    /// Looks up a catalog add-on by slug.
    pub fn addon(&self, slug: &str) -> Option<&AddonInfo> {
        self.addons.iter().find(|addon| addon.slug == slug)
    }
}
