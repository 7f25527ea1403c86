use miette::Diagnostic;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "themepath.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    /// Longest string value shown verbatim in an inline annotation.
    pub max_label_width: usize,
    /// Lines searched on each side of the cursor by the inferred hover tier.
    pub hover_line_window: usize,
    /// Key whose function-valued leaf is kept as a descriptive marker.
    pub callable_key: String,
    pub label_prefix: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_label_width: 32,
            hover_line_window: 3,
            callable_key: "spacing".into(),
            label_prefix: "= ".into(),
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read {}", path.display())]
    #[diagnostic(code(themepath::config::io))]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },
    #[error("invalid configuration in {}: {message}", path.display())]
    #[diagnostic(
        code(themepath::config::parse),
        help("known keys: max_label_width, hover_line_window, callable_key, label_prefix")
    )]
    Parse { path: PathBuf, message: String },
}

impl ResolverConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|error| ConfigError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        Self::parse(&content).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|error| error.message().to_string())
    }

    /// Walks up from `start` looking for `themepath.toml`.
    pub fn discover(start: &Path) -> Result<Option<Self>, ConfigError> {
        let mut dir = if start.is_dir() {
            Some(start)
        } else {
            start.parent()
        };
        while let Some(current) = dir {
            let candidate = current.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                return Self::load(&candidate).map(Some);
            }
            dir = current.parent();
        }
        Ok(None)
    }
}
