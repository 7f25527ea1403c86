use super::value::ThemeValue;
use indexmap::IndexMap;
use serde::Serialize;

/// Dotted path to leaf value, in theme declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FlatThemeTable {
    entries: IndexMap<String, ThemeValue>,
}

impl FlatThemeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the previous value when `path` was already present.
    pub(crate) fn insert(&mut self, path: String, value: ThemeValue) -> Option<ThemeValue> {
        self.entries.insert(path, value)
    }

    pub fn get(&self, path: &str) -> Option<&ThemeValue> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ThemeValue)> {
        self.entries
            .iter()
            .map(|(path, value)| (path.as_str(), value))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// True when some path continues below `path` (i.e. `path` is an inner node).
    pub fn has_children(&self, path: &str) -> bool {
        self.paths().any(|candidate| {
            candidate.len() > path.len()
                && candidate.starts_with(path)
                && candidate.as_bytes()[path.len()] == b'.'
        })
    }
}

impl<K, V> FromIterator<(K, V)> for FlatThemeTable
where
    K: Into<String>,
    V: Into<ThemeValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(path, value)| (path.into(), value.into()))
                .collect(),
        }
    }
}
