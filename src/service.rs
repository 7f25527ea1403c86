use crate::{
    cancel::Cancel,
    completion::{completion_at, CompletionContext},
    config::ResolverConfig,
    hover::{hover, HoverResult},
    inlay::{annotate, Annotation},
    snapshot::{Snapshot, ThemeProvider},
    span::Span,
    theme::{ThemeError, ThemeTree},
};
use std::sync::Arc;

/// Outcome of a point query against the provider's current table.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<T> {
    /// Nothing has been published yet.
    MissingTable,
    NoMatch,
    Found(T),
}

impl<T> Resolution<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Resolution::Found(value) => Some(value),
            Resolution::MissingTable | Resolution::NoMatch => None,
        }
    }

    fn from_option(value: Option<T>) -> Self {
        match value {
            Some(value) => Resolution::Found(value),
            None => Resolution::NoMatch,
        }
    }
}

/// Provider plus configuration; each query reads exactly one snapshot.
#[derive(Debug, Default)]
pub struct ThemeService {
    provider: ThemeProvider,
    config: ResolverConfig,
}

impl ThemeService {
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            provider: ThemeProvider::new(),
            config,
        }
    }

    pub fn provider(&self) -> &ThemeProvider {
        &self.provider
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn reload(&self, tree: &ThemeTree) -> Result<Arc<Snapshot>, ThemeError> {
        self.provider.rebuild(tree, &self.config.callable_key)
    }

    pub fn complete(
        &self,
        text: &str,
        offset: usize,
        cancel: &impl Cancel,
    ) -> Resolution<CompletionContext> {
        let Some(snapshot) = self.provider.current() else {
            return Resolution::MissingTable;
        };
        Resolution::from_option(completion_at(text, offset, snapshot.table(), cancel))
    }

    pub fn hover(&self, text: &str, offset: usize) -> Resolution<HoverResult> {
        let Some(snapshot) = self.provider.current() else {
            return Resolution::MissingTable;
        };
        Resolution::from_option(hover(text, offset, snapshot.table(), &self.config))
    }

    pub fn annotate(&self, text: &str, range: Span, cancel: &impl Cancel) -> Vec<Annotation> {
        match self.provider.current() {
            Some(snapshot) => annotate(text, range, snapshot.table(), &self.config, cancel),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cancel::Uncancellable, hover::Confidence, theme::ThemeNode};

    const SOURCE: &str = "${({theme}) => theme.typography.fontSize}";

    fn typography_tree(size: i32) -> ThemeTree {
        let mut tree = ThemeTree::new();
        let root = tree.root();
        let typography = tree.insert(root, "typography", ThemeNode::composite());
        tree.insert(typography, "fontSize", ThemeNode::number(size));
        tree
    }

    #[test]
    fn queries_before_first_publish_report_missing_table() {
        let service = ThemeService::default();
        let offset = SOURCE.find("fontSize").expect("token");
        assert_eq!(service.hover(SOURCE, offset), Resolution::MissingTable);
        assert_eq!(
            service.complete(SOURCE, offset, &Uncancellable),
            Resolution::MissingTable
        );
        assert!(service
            .annotate(SOURCE, Span::new(0, SOURCE.len()), &Uncancellable)
            .is_empty());
    }

    #[test]
    fn no_match_is_distinct_from_missing_table() {
        let service = ThemeService::default();
        service.reload(&typography_tree(14)).expect("reload");
        assert_eq!(service.hover("plain text", 3), Resolution::NoMatch);
    }

    #[test]
    fn queries_follow_the_latest_snapshot() {
        let service = ThemeService::default();
        let offset = SOURCE.find("fontSize").expect("token") + 2;
        service.reload(&typography_tree(14)).expect("first reload");
        let first = service.hover(SOURCE, offset).found().expect("hover");
        assert_eq!(first.confidence, Confidence::High);
        assert_eq!(first.value.to_string(), "14");

        service.reload(&typography_tree(16)).expect("second reload");
        let second = service.hover(SOURCE, offset).found().expect("hover");
        assert_eq!(second.value.to_string(), "16");

        let labels: Vec<String> = service
            .annotate(SOURCE, Span::new(0, SOURCE.len()), &Uncancellable)
            .into_iter()
            .map(|annotation| annotation.label)
            .collect();
        assert_eq!(labels, vec!["= 16"]);
    }
}
