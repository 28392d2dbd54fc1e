//! Run configuration (`nswrap.toml`).
//!
//! Every field has a default, so an empty or missing file is valid:
//!
//! ```toml
//! [wrap]
//! namespace = "clips"
//! header_mode = "guard"   # or "source"
//!
//! [files]
//! headers = ["h"]
//! sources = ["c"]
//! ```

use crate::wrap::{DEFAULT_NAMESPACE, Namespace, WrapStyle};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "nswrap.toml";

#[derive(Deserialize, Debug, Default)]
#[serde(default, deny_unknown_fields)]
pub struct NswrapConfig {
    pub wrap: WrapConfig,
    pub files: FilesConfig,
}

#[derive(Deserialize, Debug)]
#[serde(default, deny_unknown_fields)]
pub struct WrapConfig {
    pub namespace: String,
    pub header_mode: HeaderMode,
}

impl Default for WrapConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            header_mode: HeaderMode::default(),
        }
    }
}

/// How header files are wrapped.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HeaderMode {
    /// Wrap only inside the include guard.
    #[default]
    Guard,
    /// Wrap headers the same way as sources.
    Source,
}

#[derive(Deserialize, Debug)]
#[serde(default, deny_unknown_fields)]
pub struct FilesConfig {
    pub headers: Vec<String>,
    pub sources: Vec<String>,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            headers: vec!["h".to_string()],
            sources: vec!["c".to_string()],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Header,
    Source,
}

impl FilesConfig {
    /// Classify a file by the suffix of its name. Headers win when an
    /// extension is listed in both tables.
    pub fn classify(&self, file_name: &str) -> Option<FileKind> {
        let matches = |exts: &[String]| {
            exts.iter().any(|ext| {
                let ext = ext.trim_start_matches('.');
                !ext.is_empty()
                    && file_name
                        .strip_suffix(ext)
                        .is_some_and(|stem| stem.ends_with('.'))
            })
        };

        if matches(&self.headers) {
            Some(FileKind::Header)
        } else if matches(&self.sources) {
            Some(FileKind::Source)
        } else {
            None
        }
    }
}

impl NswrapConfig {
    pub fn namespace(&self) -> Namespace {
        Namespace::new(self.wrap.namespace.clone())
    }

    pub fn style_for(&self, kind: FileKind) -> WrapStyle {
        match (kind, self.wrap.header_mode) {
            (FileKind::Header, HeaderMode::Guard) => WrapStyle::Header,
            (FileKind::Header, HeaderMode::Source) | (FileKind::Source, _) => WrapStyle::Source,
        }
    }
}

pub fn parse_config(content: &str) -> Result<NswrapConfig> {
    toml::from_str(content).context(
        "Failed to parse config - check for syntax errors (missing quotes, brackets) or unknown keys",
    )
}

/// Load configuration from `explicit` if given, else from `nswrap.toml`
/// in the current directory if it exists, else defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<NswrapConfig> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!(
                    "Config file {} not found.\n\n\
                    💡 Tip: Drop --config to use defaults, or create the file.",
                    path.display()
                );
            }
            path
        }
        None => {
            let default = Path::new(CONFIG_FILE);
            if !default.exists() {
                return Ok(NswrapConfig::default());
            }
            default
        }
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} - check file permissions", path.display()))?;
    parse_config(&content).with_context(|| format!("Invalid config in {}", path.display()))
}
