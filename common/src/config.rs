//! Configuration management and loading.
//!
//! The configuration is a plain JSON file shared with the other fcbox tools.  Each
//! top-level section matches one operation (`open_file`, `find_rc_switch_times`,
//! `find_static_position_times`) so the file reads like the menu of the tool.
//!
//! If no file exists at the default location, one is created with the documented
//! defaults.  The tools rewrite the file on exit so `open_file.path` tracks the
//! last log dump analysed.
//!

use std::fs;
use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use eyre::{eyre, Result};
#[cfg(unix)]
use home::home_dir;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::makepath;

/// Default configuration filename
const CONFIG: &str = "config.json";

/// Main name for the directory base
const TAG: &str = "fcbox";

#[cfg(unix)]
const BASEDIR: &str = ".config";

/// Default list of message types asked from the log parser.
///
const DEF_TYPES: [&str; 7] = ["XKF1", "POS", "ATT", "GPS", "GPA", "MAG", "RCIN"];

/// Main configuration, mirrors the JSON file section by section.
///
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Config {
    /// Log opening parameters.
    pub open_file: OpenFile,
    /// RC switch detection parameters.
    pub find_rc_switch_times: RcSwitch,
    /// Stationary period detection parameters.
    pub find_static_position_times: StaticPositions,
}

/// `open_file` section.
///
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct OpenFile {
    /// Directory the last log dump was loaded from.
    pub path: String,
    /// Name of the last log dump itself, informational.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Message types to look for when loading a dump.
    pub message_types: Vec<String>,
}

/// `find_rc_switch_times` section.
///
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct RcSwitch {
    /// RC input channel carrying the measurement switch, 0 disables detection.
    pub rc_switch_channel: u8,
}

/// `find_static_position_times` section.
///
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct StaticPositions {
    /// Width of the sliding window in seconds.
    pub window_secs: f64,
    /// Maximum motion between window edges to count as stationary.
    pub tolerance_metres: f64,
    /// Multiplier on the tolerance for leaving the hysteresis state.
    pub hysteresis: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            open_file: OpenFile {
                path: String::new(),
                file: None,
                message_types: DEF_TYPES.iter().map(|s| s.to_string()).collect(),
            },
            find_rc_switch_times: RcSwitch { rc_switch_channel: 0 },
            find_static_position_times: StaticPositions {
                window_secs: 8.0,
                tolerance_metres: 1.0,
                hysteresis: 3.0,
            },
        }
    }
}

impl Config {
    /// Returns the path of the default config file
    ///
    #[cfg(unix)]
    pub fn default_file() -> Result<PathBuf> {
        let homedir = home_dir().ok_or_else(|| eyre!("no home directory"))?;
        let def: PathBuf = makepath!(homedir, BASEDIR, TAG, CONFIG);
        trace!("Default file: {:?}", def);
        Ok(def)
    }

    /// Returns the path of the default config file
    ///
    #[cfg(windows)]
    pub fn default_file() -> Result<PathBuf> {
        let homedir = env!("LOCALAPPDATA");

        let def: PathBuf = makepath!(homedir, TAG, CONFIG);
        Ok(def)
    }

    /// Install a default configuration file in place.
    ///
    #[tracing::instrument]
    pub fn install_defaults(fname: &Path) -> Result<()> {
        // Create config directory if needed
        //
        if let Some(dir) = fname.parent() {
            if !dir.exists() {
                create_dir_all(dir)?;
            }
        }

        let content = serde_json::to_string_pretty(&Config::default())?;
        fs::write(fname, content)?;
        Ok(())
    }

    /// Load the configuration from either the specified file or the default one.
    ///
    /// An explicit file must exist.  A missing default file is created with the
    /// documented defaults first, so a fresh install works out of the box.
    ///
    #[tracing::instrument]
    pub fn load(fname: Option<&Path>) -> Result<Config> {
        let cnf = match fname {
            // We have a configuration file
            //
            Some(cnf) => {
                trace!("Loading from {:?}", cnf);
                if !cnf.exists() {
                    return Err(eyre!("Unknown config file {:?}", cnf));
                }
                cnf.to_path_buf()
            }
            // Need to load our own
            //
            _ => {
                let cnf = Config::default_file()?;
                trace!("Loading from {:?}", cnf);
                if !cnf.exists() {
                    debug!("No config file yet, installing defaults in {:?}", cnf);
                    Config::install_defaults(&cnf)?;
                }
                cnf
            }
        };

        let data = fs::read_to_string(&cnf)?;
        let data: Config = serde_json::from_str(&data)?;
        debug!("config = {:?}", data);

        Ok(data)
    }

    /// Write the configuration back, pretty-printed.
    ///
    #[tracing::instrument(skip(self))]
    pub fn save(&self, fname: Option<&Path>) -> Result<()> {
        let cnf = match fname {
            Some(cnf) => cnf.to_path_buf(),
            _ => Config::default_file()?,
        };
        trace!("Saving to {:?}", cnf);

        let content = serde_json::to_string_pretty(self)?;
        fs::write(&cnf, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let cfg = Config::default();

        assert_eq!(0, cfg.find_rc_switch_times.rc_switch_channel);
        assert_eq!(8.0, cfg.find_static_position_times.window_secs);
        assert_eq!(1.0, cfg.find_static_position_times.tolerance_metres);
        assert_eq!(3.0, cfg.find_static_position_times.hysteresis);
        assert_eq!(7, cfg.open_file.message_types.len());
        assert!(cfg.open_file.message_types.contains(&"RCIN".to_string()));
        assert!(cfg.open_file.file.is_none());
    }

    #[test]
    fn test_config_load_missing_explicit() {
        let cfg = Config::load(Some(Path::new("/nonexistent/config.json")));
        assert!(cfg.is_err());
    }

    #[test]
    fn test_config_install_and_load() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let fname = tmp.path().join(CONFIG);

        Config::install_defaults(&fname)?;
        assert!(fname.exists());

        let cfg = Config::load(Some(&fname))?;
        assert_eq!(Config::default(), cfg);
        Ok(())
    }

    #[test]
    fn test_config_save_roundtrip() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let fname = tmp.path().join(CONFIG);

        let mut cfg = Config::default();
        cfg.find_rc_switch_times.rc_switch_channel = 7;
        cfg.open_file.path = "/var/log/dumps".to_string();
        cfg.open_file.file = Some("flight-42".to_string());
        cfg.save(Some(&fname))?;

        let back = Config::load(Some(&fname))?;
        assert_eq!(cfg, back);
        Ok(())
    }

    #[test]
    fn test_config_accepts_integer_hysteresis() -> Result<()> {
        // Files written by earlier versions store `hysteresis` as an integer.
        //
        let data = r#"{
            "open_file": { "path": "", "message_types": ["POS", "RCIN"] },
            "find_rc_switch_times": { "rc_switch_channel": 6 },
            "find_static_position_times": {
                "window_secs": 8.0,
                "tolerance_metres": 1.0,
                "hysteresis": 3
            }
        }"#;
        let cfg: Config = serde_json::from_str(data)?;
        assert_eq!(3.0, cfg.find_static_position_times.hysteresis);
        assert_eq!(6, cfg.find_rc_switch_times.rc_switch_channel);
        Ok(())
    }
}
