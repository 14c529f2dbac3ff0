use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::flags::{self, FlagStore, PolicyFlag};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub concealment: ConcealmentConfig,
    pub reporting: ReportConfig,
}

/// The six preference-store keys. Partial files are fine: any key missing
/// from the TOML reads as its documented default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcealmentConfig {
    pub hide_debug_properties: bool,
    pub hide_debug_properties_in_native: bool,
    pub hide_developer_mode: bool,
    pub hide_usb_debug: bool,
    pub hide_wireless_debug: bool,
    pub spoof_work_profile: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub store_reports: bool,
    pub human_summary: bool,
    pub structured_json: bool,
}

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub config_path: PathBuf,
    pub data_dir: PathBuf,
    pub report_dir: PathBuf,
}

impl Default for ConcealmentConfig {
    fn default() -> Self {
        Self {
            hide_debug_properties: true,
            hide_debug_properties_in_native: true,
            hide_developer_mode: true,
            hide_usb_debug: true,
            hide_wireless_debug: true,
            spoof_work_profile: false,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            store_reports: true,
            human_summary: true,
            structured_json: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn default_config() -> Self {
        Self {
            concealment: ConcealmentConfig::default(),
            reporting: ReportConfig::default(),
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("parse config TOML")?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        let output = toml::to_string_pretty(self).context("render config TOML")?;
        Ok(output)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("read config at {}", path.display()))?;
        Self::from_toml_str(&contents)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create config dir {}", parent.display()))?;
        }
        let contents = self.to_toml_string()?;
        fs::write(path, contents).with_context(|| format!("write config at {}", path.display()))?;
        Ok(())
    }

    pub fn set_key(&mut self, key: &str, value: bool) -> Result<()> {
        let slot = match key {
            _ if key == PolicyFlag::HideDebugProperties.key() => {
                &mut self.concealment.hide_debug_properties
            }
            flags::HIDE_DEBUG_PROPERTIES_IN_NATIVE => {
                &mut self.concealment.hide_debug_properties_in_native
            }
            _ if key == PolicyFlag::HideDeveloperMode.key() => {
                &mut self.concealment.hide_developer_mode
            }
            _ if key == PolicyFlag::HideUsbDebug.key() => &mut self.concealment.hide_usb_debug,
            _ if key == PolicyFlag::HideWirelessDebug.key() => {
                &mut self.concealment.hide_wireless_debug
            }
            _ if key == PolicyFlag::SpoofWorkProfile.key() => {
                &mut self.concealment.spoof_work_profile
            }
            _ => bail!("unknown preference key: {key}"),
        };
        *slot = value;
        Ok(())
    }
}

impl FlagStore for Config {
    fn get(&self, key: &str) -> Option<bool> {
        let value = match key {
            _ if key == PolicyFlag::HideDebugProperties.key() => {
                self.concealment.hide_debug_properties
            }
            flags::HIDE_DEBUG_PROPERTIES_IN_NATIVE => {
                self.concealment.hide_debug_properties_in_native
            }
            _ if key == PolicyFlag::HideDeveloperMode.key() => {
                self.concealment.hide_developer_mode
            }
            _ if key == PolicyFlag::HideUsbDebug.key() => self.concealment.hide_usb_debug,
            _ if key == PolicyFlag::HideWirelessDebug.key() => {
                self.concealment.hide_wireless_debug
            }
            _ if key == PolicyFlag::SpoofWorkProfile.key() => self.concealment.spoof_work_profile,
            _ => return None,
        };
        Some(value)
    }
}

/// Preference store backed by a TOML file that an outside process may
/// rewrite at any time. Every `get` re-reads the file, so each snapshot
/// resolution observes the store as it currently is; an unreadable or
/// unparseable file reads as "no entry" and the defaults apply.
#[derive(Debug, Clone)]
pub struct FileFlagStore {
    path: PathBuf,
}

impl FileFlagStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn default_location() -> Result<Self> {
        let paths = ConfigPaths::resolve()?;
        Ok(Self::new(paths.config_path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FlagStore for FileFlagStore {
    fn get(&self, key: &str) -> Option<bool> {
        let contents = fs::read_to_string(&self.path).ok()?;
        let config = Config::from_toml_str(&contents).ok()?;
        config.get(key)
    }
}

impl ConfigPaths {
    pub fn resolve() -> Result<Self> {
        let project_dirs = ProjectDirs::from("io", "devcloak", "devcloak")
            .ok_or_else(|| anyhow::anyhow!("unable to determine project directories"))?;
        let config_dir = project_dirs.config_dir();
        let data_dir = project_dirs.data_dir();
        let report_dir = data_dir.join("reports");
        Ok(Self {
            config_path: config_dir.join("config.toml"),
            data_dir: data_dir.to_path_buf(),
            report_dir,
        })
    }
}
