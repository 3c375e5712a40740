use config::{Config, ConfigError, File, FileFormat};
use extractors::{NamePolicy, SuspicionThresholds};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SiftConfig {
    pub classifier: ClassifierConfig,
    pub rules: SuspicionThresholds,
    pub dedup: DedupConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ClassifierConfig {
    pub enabled: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct DedupConfig {
    pub name_policy: NamePolicy,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("output_csv"),
        }
    }
}

impl SiftConfig {
    /// Loads `explicit` if given, else the per-user config file if present,
    /// else built-in defaults. Returns the file that was read, if any.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        let source = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Some(get_config_path()).filter(|path| path.exists()),
        };

        let mut builder = Config::builder();
        if let Some(path) = &source {
            builder = builder.add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(true),
            );
        }

        let config: SiftConfig = builder.build()?.try_deserialize()?;

        config
            .rules
            .validate()
            .map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok((config, source))
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("contact-sift").join("sift.toml")
    } else {
        PathBuf::from("sift.toml")
    }
}
