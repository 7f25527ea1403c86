use crate::span::Span;
use miette::{Diagnostic, NamedSource, Report, SourceSpan};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic, Clone)]
#[error("{message}")]
#[diagnostic(code(themepath::query))]
pub struct QueryDiagnostic {
    #[source_code]
    src: NamedSource<String>,
    #[label("{label}")]
    span: SourceSpan,
    #[help]
    help: Option<String>,
    message: String,
    label: String,
}

impl QueryDiagnostic {
    pub fn new(
        name: impl AsRef<str>,
        source: &str,
        span: Span,
        message: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            src: NamedSource::new(name, source.to_string()),
            span: span.clamp_to(source.len()).into(),
            help: None,
            message: message.into(),
            label: label.into(),
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

pub fn emit_warning(diagnostic: QueryDiagnostic) {
    eprintln!("{:?}", Report::new(diagnostic));
}
