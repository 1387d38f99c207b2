use crate::Result;
use camino::Utf8Path;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// Summary statistic picked from measurements that expose a statistic set.
fn default_statistic() -> String {
    "avg".to_string()
}

/// Results categories that do not hold measurements:
/// - `AFFINITY`: thread/rank placement, not a measurement
/// - `app_data`: user-defined structure
/// - `gpu_data`: written by an external program
fn default_excluded_categories() -> Vec<String> {
    vec!["AFFINITY".to_string(), "app_data".to_string(), "gpu_data".to_string()]
}

const fn default_follow_links() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Statistic to report for measurements carrying min/max/avg style values
    #[serde(default = "default_statistic")]
    pub statistic: String,

    /// Results categories left out of metric aggregation
    #[serde(default = "default_excluded_categories")]
    pub excluded_categories: Vec<String>,

    /// Whether run discovery follows symbolic links
    #[serde(default = "default_follow_links")]
    pub follow_links: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            statistic: default_statistic(),
            excluded_categories: default_excluded_categories(),
            follow_links: default_follow_links(),
        }
    }
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, the first of `spotdb.toml`, `spotdb.yml`, `spotdb.yaml` and
    /// `spotdb.json` found in `base_dir` is used.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8Path>) -> Result<(Self, Vec<String>)> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading spotdb configuration from {path}"))?;
            (path.to_path_buf(), text)
        } else {
            let candidates = [
                base_dir.join("spotdb.toml"),
                base_dir.join("spotdb.yml"),
                base_dir.join("spotdb.yaml"),
                base_dir.join("spotdb.json"),
            ];

            let mut found = None;
            for path in candidates {
                match fs::read_to_string(&path) {
                    Ok(text) => {
                        found = Some((path, text));
                        break;
                    }
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e).into_app_err_with(|| format!("reading spotdb configuration from {path}")),
                }
            }

            let Some(result) = found else {
                return Ok((Self::default(), Vec::new()));
            };
            result
        };

        let config = Self::parse(&final_path, &text)?;

        let mut warnings = Vec::new();
        config.validate(&mut warnings);
        Ok((config, warnings))
    }

    fn parse(path: &Utf8Path, text: &str) -> Result<Self> {
        let extension = path.extension().unwrap_or_default();
        match extension {
            "toml" => toml::from_str(text).into_app_err_with(|| format!("parsing TOML configuration from {path}")),
            "yml" | "yaml" => serde_yaml::from_str(text).into_app_err_with(|| format!("parsing YAML configuration from {path}")),
            "json" => serde_json::from_str(text).into_app_err_with(|| format!("parsing JSON configuration from {path}")),
            _ => Err(app_err!("unsupported configuration file extension: {extension}")),
        }
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save(&self, output_path: &Utf8Path) -> Result<()> {
        let extension = output_path.extension().unwrap_or_default();
        let text = match extension {
            "toml" => toml::to_string_pretty(self)
                .into_app_err_with(|| format!("serializing configuration to TOML for saving to {output_path}"))?,
            "yml" | "yaml" => serde_yaml::to_string(self)
                .into_app_err_with(|| format!("serializing configuration to YAML for saving to {output_path}"))?,
            "json" => serde_json::to_string_pretty(self)
                .into_app_err_with(|| format!("serializing configuration to JSON for saving to {output_path}"))?,
            _ => return Err(app_err!("unsupported configuration file extension: {extension}")),
        };

        fs::write(output_path, text).into_app_err_with(|| format!("writing configuration to {output_path}"))?;
        Ok(())
    }

    /// Collect warnings about settings that are legal but probably unintended
    pub fn validate(&self, warnings: &mut Vec<String>) {
        if self.statistic.trim().is_empty() {
            warnings.push("statistic is empty, only measurements with a single 'value' will be reported".to_string());
        }

        for (i, category) in self.excluded_categories.iter().enumerate() {
            if self.excluded_categories.iter().take(i).any(|c| c == category) {
                warnings.push(format!("excluded category '{category}' is listed more than once"));
            }
        }
    }
}
