//! Configuration management for vernote.
//!
//! Parses `vernote.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! Every key is optional; omitted keys fall back to the built-in
//! defaults. Rendering templates are validated at load time (non-empty
//! labels, title templates carrying the version placeholder) — the
//! rewriting engine itself performs no validation.
//!
//! ```toml
//! [docs]
//! source_dir = "docs"
//! out_dir = "build/docs"
//!
//! [annotations]
//! tag = "!!!"
//!
//! [annotations.added]
//! admonition = "version-added"
//! title = 'Added in version \1'
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

use vernote_annotations::{AnnotationKind, AnnotationTemplates, VERSION_PLACEHOLDER};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override output directory.
    pub out_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "vernote.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Annotation rendering configuration.
    annotations: AnnotationsConfigRaw,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved rendering templates (set after loading).
    #[serde(skip)]
    pub templates_resolved: AnnotationTemplates,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    out_dir: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DocsConfig {
    /// Source directory for markdown files.
    pub source_dir: PathBuf,
    /// Output directory for rewritten markdown files.
    pub out_dir: PathBuf,
}

/// Raw annotation configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct AnnotationsConfigRaw {
    tag: Option<String>,
    added: KindConfigRaw,
    changed: KindConfigRaw,
    removed: KindConfigRaw,
}

/// Raw per-kind annotation configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct KindConfigRaw {
    admonition: Option<String>,
    title: Option<String>,
}

impl AnnotationsConfigRaw {
    /// Build rendering templates, falling back to defaults per field.
    fn to_templates(&self) -> AnnotationTemplates {
        let mut templates = AnnotationTemplates::default();
        if let Some(tag) = &self.tag {
            templates.tag.clone_from(tag);
        }
        for (raw, resolved) in [
            (&self.added, &mut templates.added),
            (&self.changed, &mut templates.changed),
            (&self.removed, &mut templates.removed),
        ] {
            if let Some(admonition) = &raw.admonition {
                resolved.admonition.clone_from(admonition);
            }
            if let Some(title) = &raw.title {
                resolved.title.clone_from(title);
            }
        }
        templates
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `vernote.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the annotation templates fail validation.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(out_dir) = &settings.out_dir {
            self.docs_resolved.out_dir.clone_from(out_dir);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfigRaw::default(),
            annotations: AnnotationsConfigRaw::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                out_dir: base.join("build/docs"),
            },
            templates_resolved: AnnotationTemplates::default(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir);
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and resolution
        config.validate()?;

        Ok(config)
    }

    /// Resolve relative paths and raw annotation settings.
    fn resolve(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsConfig {
            source_dir: resolve(self.docs.source_dir.as_deref(), "docs"),
            out_dir: resolve(self.docs.out_dir.as_deref(), "build/docs"),
        };
        self.templates_resolved = self.annotations.to_templates();
    }

    /// Validate configuration values.
    ///
    /// Checks the resolved rendering templates: the admonition tag and
    /// per-kind labels must be non-empty, and every title template must
    /// contain the version placeholder. Called automatically after
    /// loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.templates_resolved.tag, "annotations.tag")?;

        for kind in AnnotationKind::ALL {
            let template = self.templates_resolved.template(kind);
            let field = match kind {
                AnnotationKind::Added => "annotations.added",
                AnnotationKind::Changed => "annotations.changed",
                AnnotationKind::Removed => "annotations.removed",
            };
            require_non_empty(&template.admonition, &format!("{field}.admonition"))?;
            require_non_empty(&template.title, &format!("{field}.title"))?;
            if !template.title.contains(VERSION_PLACEHOLDER) {
                return Err(ConfigError::Validation(format!(
                    "{field}.title must contain the {VERSION_PLACEHOLDER} version placeholder"
                )));
            }
        }

        Ok(())
    }
}
