//! Configuration loading and config file resolution
//!
//! Configuration is a single TOML file. Every table and field is optional;
//! anything left out falls back to the compiled defaults below.
//!
//! # Resolution order
//!
//! 1. Command-line argument (highest priority)
//! 2. `SCHED_EXPORT_CONFIG` environment variable
//! 3. `<user config dir>/sched-export/config.toml`
//! 4. Compiled defaults (fallback)
//!
//! A file named explicitly (tiers 1 and 2) must exist and parse. The
//! per-user file is only read when present.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "SCHED_EXPORT_CONFIG";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Date formats and category labels
    pub schedule: ScheduleConfig,

    /// Identifier allocation
    pub ids: IdConfig,

    /// Hyperlink templates for anthology, TACL and video fragments
    pub links: LinkConfig,

    /// Fixed descriptions for social events and business meetings
    pub events: EventText,

    /// Pre-authored keynote content, keyed by speaker
    pub keynotes: Vec<KeynoteEntry>,

    /// Output table handling
    pub output: OutputConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Date formats and category labels used when rendering rows
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// `chrono` format of the text after a day marker
    pub day_format: String,

    /// `chrono` format of the date column in output rows
    pub date_format: String,

    /// Category label for every session row
    pub session_category: String,

    /// Category label for every paper row
    pub paper_category: String,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            day_format: "%A, %d %B %Y".to_string(),
            date_format: "%m/%d/%y".to_string(),
            session_category: "Conference Sessions".to_string(),
            paper_category: "Main Papers & Posters".to_string(),
        }
    }
}

/// Identifier allocation settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IdConfig {
    /// Lowest ID the allocator may issue, even if the seed export is empty
    pub first_id: Option<u64>,
}

/// Hyperlink templates
///
/// `{id}` in a URL template is replaced by the anthology table entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    pub anthology_url: String,
    pub tacl_url: String,
    pub pdf_label: String,
    pub video_label: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            anthology_url: "https://aclanthology.org/{id}".to_string(),
            tacl_url: "https://transacl.org/ojs/index.php/tacl/article/view/{id}".to_string(),
            pdf_label: "PDF".to_string(),
            video_label: "Video".to_string(),
        }
    }
}

/// Conference-specific text for sessions whose content is not in the order file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EventText {
    /// Description of the social event session
    pub social_description: String,

    /// Replaces the location given in the social event header
    pub social_location: Option<String>,

    /// Description of the business meeting session
    pub business_description: String,
}

impl Default for EventText {
    fn default() -> Self {
        Self {
            social_description: String::new(),
            social_location: None,
            business_description:
                "All attendees are strongly encouraged to participate in the business meeting."
                    .to_string(),
        }
    }
}

/// One keynote speaker's pre-authored content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeynoteEntry {
    /// Full speaker name, stripped from the displayed title
    pub speaker: String,

    /// Affiliation shown after the speaker name
    pub affiliation: String,

    /// Substring identifying this speaker in a header (defaults to `speaker`)
    #[serde(default, rename = "match")]
    pub match_key: Option<String>,

    #[serde(default, rename = "abstract")]
    pub abstract_text: String,

    #[serde(default)]
    pub slides_url: Option<String>,

    #[serde(default)]
    pub video_url: Option<String>,
}

impl KeynoteEntry {
    /// Text searched for in the keynote title
    pub fn match_key(&self) -> &str {
        self.match_key.as_deref().unwrap_or(&self.speaker)
    }
}

/// How output tables are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Every table is rewritten from scratch with a header row
    #[default]
    Replace,
    /// Sessions, authors and linking rows are appended to existing tables
    Append,
}

/// Output table settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub mode: OutputMode,
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    CommandLine(PathBuf),
    Environment(PathBuf),
    UserFile(PathBuf),
    Defaults,
}

/// Resolve which config file to read, without reading it
pub fn resolve_config_source(cli_arg: Option<&Path>) -> ConfigSource {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return ConfigSource::CommandLine(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return ConfigSource::Environment(PathBuf::from(path));
        }
    }

    // Priority 3: Per-user config file, only when it exists
    if let Some(path) = default_config_path() {
        if path.exists() {
            return ConfigSource::UserFile(path);
        }
    }

    // Priority 4: Compiled defaults
    ConfigSource::Defaults
}

/// Resolve and load configuration
pub fn load_config(cli_arg: Option<&Path>) -> Result<TomlConfig> {
    match resolve_config_source(cli_arg) {
        ConfigSource::CommandLine(path)
        | ConfigSource::Environment(path)
        | ConfigSource::UserFile(path) => {
            info!("Loading configuration from {}", path.display());
            load_toml_config(&path)
        }
        ConfigSource::Defaults => {
            debug!("No configuration file found, using compiled defaults");
            Ok(TomlConfig::default())
        }
    }
}

/// Read and parse one TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    parse_toml_config(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Parse TOML text into a config, then validate it
pub fn parse_toml_config(content: &str) -> Result<TomlConfig> {
    let config: TomlConfig =
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

impl TomlConfig {
    /// Reject settings that would only fail later, mid-run
    pub fn validate(&self) -> Result<()> {
        for (name, template) in [
            ("links.anthology_url", &self.links.anthology_url),
            ("links.tacl_url", &self.links.tacl_url),
        ] {
            if !template.contains("{id}") {
                return Err(Error::Config(format!(
                    "{} must contain an {{id}} placeholder: {:?}",
                    name, template
                )));
            }
        }

        for keynote in &self.keynotes {
            if keynote.match_key().trim().is_empty() {
                return Err(Error::Config(
                    "keynote entry has an empty speaker/match key".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Default per-user config file path for the platform
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("sched-export").join("config.toml"))
}
