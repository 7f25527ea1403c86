use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ThemeError {
    #[error("malformed theme tree at `{path}`: {reason}")]
    #[diagnostic(
        code(themepath::theme::malformed),
        help("the previously published table stays active until the theme is fixed")
    )]
    MalformedTree { path: String, reason: MalformedReason },

    #[error("failed to read theme {}", path.display())]
    #[diagnostic(code(themepath::theme::io))]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    #[error("theme {} is not valid JSON", path.display())]
    #[diagnostic(code(themepath::theme::json))]
    Json {
        path: PathBuf,
        #[source]
        error: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    Cycle,
    DanglingNode,
    EmptyKey,
    DuplicatePath,
    RootNotComposite,
}

impl std::fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            MalformedReason::Cycle => "node refers back to one of its ancestors",
            MalformedReason::DanglingNode => "reference to a node that does not exist",
            MalformedReason::EmptyKey => "empty key",
            MalformedReason::DuplicatePath => "two leaves flatten to the same path",
            MalformedReason::RootNotComposite => "theme root must be an object",
        };
        f.write_str(text)
    }
}

impl ThemeError {
    pub(crate) fn malformed(path: impl Into<String>, reason: MalformedReason) -> Self {
        ThemeError::MalformedTree {
            path: path.into(),
            reason,
        }
    }
}
