//! Persistent settings of the command line tool.
//!
//! Stored as pretty printed JSON in `~/.config/gd-storage/config.json`:
//!
//! ```json
//! {
//!   "gd_path": "/home/me/.steam/steam/steamapps/compatdata/322170/pfx/drive_c/users/steamuser/AppData/Local/GeometryDash",
//!   "format": "windows"
//! }
//! ```

use crate::save::{SaveFormat, SaveManager};
use crate::{Error, ErrorKind};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for locating and decoding the game's save folder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Save folder, the platform default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gd_path: Option<PathBuf>,

    /// Container format of the save files
    #[serde(default)]
    pub format: SaveFormat,
}

/// The user's home directory
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|x| !x.is_empty())
        .map(PathBuf::from)
}

/// Location of the config file
pub fn config_path() -> Option<PathBuf> {
    home_dir().map(|home| home.join(".config").join("gd-storage").join("config.json"))
}

/// Where the game keeps its save folder on this platform. Linux has no
/// default since the game runs through Proton in a per-install prefix.
pub fn default_gd_path() -> Option<PathBuf> {
    if cfg!(target_os = "windows") {
        std::env::var_os("LOCALAPPDATA").map(|x| PathBuf::from(x).join("GeometryDash"))
    } else if cfg!(target_os = "macos") {
        home_dir().map(|x| x.join("Library/Application Support/GeometryDash"))
    } else {
        None
    }
}

impl Config {
    /// Load the config from its default location
    pub fn load() -> Config {
        config_path()
            .map(|path| Config::load_from(&path))
            .unwrap_or_default()
    }

    /// Load a config file. A missing or unreadable file yields the defaults.
    pub fn load_from(path: &Path) -> Config {
        let data = match fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                log::debug!("no config at {}: {}", path.display(), e);
                return Config::default();
            }
        };

        serde_json::from_slice(&data).unwrap_or_else(|e| {
            log::warn!("ignoring unreadable config {}: {}", path.display(), e);
            Config::default()
        })
    }

    /// Write the config to its default location and return that location
    pub fn save(&self) -> Result<PathBuf, Error> {
        let path = config_path().ok_or_else(|| ErrorKind::NotFound {
            what: String::from("home directory"),
        })?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Write the config as pretty JSON, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)?;
        log::info!("saved config to {}", path.display());
        Ok(())
    }

    /// The configured save folder or the platform default
    pub fn resolved_gd_path(&self) -> Option<PathBuf> {
        self.gd_path.clone().or_else(default_gd_path)
    }

    /// Open the save folder this config points to
    pub fn open_save(&self) -> Result<SaveManager, Error> {
        let path = self.resolved_gd_path().ok_or_else(|| ErrorKind::NotFound {
            what: String::from("GD save folder (run: gd-storage --config)"),
        })?;

        Ok(SaveManager::open(path, self.format)?)
    }
}
