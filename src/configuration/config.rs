#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::env;
use std::path;
use std::time::Duration;

use anyhow::anyhow;
use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

use crate::domain::models::CaptureName;
use crate::domain::models::PlaybackName;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    Apology,
    BackendHealthCheckTimeout,
    BackendTimeout,
    #[strum(serialize = "backend-url")]
    BackendURL,
    Capture,
    CaptureCommand,
    CaptureTimeout,
    ConfigFile,
    Farewell,
    Greeting,
    Playback,
    PlaybackCommand,
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    /// Reads a millisecond value.
    pub fn get_duration(key: ConfigKey) -> Result<Duration> {
        let val = Config::get(key);
        let millis = val
            .parse::<u64>()
            .map_err(|_| return anyhow!("Config key '{key}' must be a number of milliseconds, got '{val}'"))?;

        return Ok(Duration::from_millis(millis));
    }

    pub fn default(key: ConfigKey) -> String {
        let default_capture = CaptureName::Command.to_string();
        let default_playback = PlaybackName::Command.to_string();

        #[cfg(not(target_os = "macos"))]
        let config_path = dirs::cache_dir()
            .unwrap_or_else(env::temp_dir)
            .join("callbot/config.toml");
        #[cfg(target_os = "macos")]
        let config_path = path::PathBuf::from(env::var("HOME").unwrap_or_default())
            .join(".config/callbot/config.toml");

        #[cfg(not(target_os = "macos"))]
        let default_playback_command = "espeak";
        #[cfg(target_os = "macos")]
        let default_playback_command = "say";

        let res = match key {
            ConfigKey::Apology => "Sorry, something went wrong!",
            ConfigKey::BackendHealthCheckTimeout => "1000",
            ConfigKey::BackendTimeout => "30000",
            ConfigKey::BackendURL => "http://localhost:8000/transcribe_and_chat",
            ConfigKey::Capture => default_capture.as_str(),
            ConfigKey::CaptureCommand => "arecord -q -f S16_LE -r 16000 -c 1 -t wav -",
            ConfigKey::CaptureTimeout => "8000",
            ConfigKey::Farewell => "Thanks for calling Callbot.",
            ConfigKey::Greeting => "Hi, I'm Callbot. How can I assist you?",
            ConfigKey::Playback => default_playback.as_str(),
            ConfigKey::PlaybackCommand => default_playback_command,

            // Special
            ConfigKey::ConfigFile => return config_path.to_string_lossy().to_string(),
        };

        return res.to_string();
    }

    pub async fn load(cmd: Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if let Some(val) = doc.get(&key.to_string()) {
                    // Use clap value parsers to do validation.
                    let mut possible_values = vec![];
                    if let Some(arg) = cmd
                        .get_arguments()
                        .find(|e| return e.get_long() == Some(key.to_string().as_str()))
                    {
                        possible_values = arg
                            .get_possible_values()
                            .iter()
                            .map(|e| return e.get_name().to_string())
                            .collect::<Vec<String>>();
                    }

                    if let Some(val_int) = val.as_integer() {
                        Config::set(key, &val_int.to_string());
                    } else if let Some(val_str) = val.as_str() {
                        if val_str.is_empty() {
                            continue;
                        }
                        if !possible_values.is_empty()
                            && !possible_values.contains(&val_str.to_string())
                        {
                            bail!(format!("config.toml has an invalid value for key '{key}': {val_str}\nPossible values are: {}", possible_values.join(", ")));
                        }
                        Config::set(key, val_str);
                    } else {
                        bail!(format!(
                            "config.toml has an unsupported value type for key '{key}'"
                        ));
                    }
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }

        tracing::debug!(
            backend_url = Config::get(ConfigKey::BackendURL),
            capture = Config::get(ConfigKey::Capture),
            capture_command = Config::get(ConfigKey::CaptureCommand),
            capture_timeout = Config::get(ConfigKey::CaptureTimeout),
            playback = Config::get(ConfigKey::Playback),
            playback_command = Config::get(ConfigKey::PlaybackCommand),
            "config"
        );

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let mut description = arg
                    .get_help()
                    .map(|help| return help.to_string())
                    .unwrap_or_default();

                description = description
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                if !arg.get_possible_values().is_empty() {
                    let possible_values = arg
                        .get_possible_values()
                        .iter()
                        .map(|e| return e.get_name())
                        .collect::<Vec<_>>()
                        .join(", ");
                    description = format!("{description} [possible values: {}]", possible_values);
                }

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if val.parse::<i64>().is_ok() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
