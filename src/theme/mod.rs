//! Theme trees and their flattened lookup tables.
//!
//! A theme arrives as a tree of design tokens. Nodes live in an arena so a
//! tree produced by an external build step can share subtrees, or even loop
//! back on itself, without the Rust side needing reference-counted cells;
//! [`flatten`] rejects the loops.

use indexmap::IndexMap;
use serde_json::Value;
use std::{fs, path::Path};

mod errors;
mod flatten;
mod table;
mod value;

pub use errors::{MalformedReason, ThemeError};
pub use flatten::{flatten, flatten_with};
pub use table::FlatThemeTable;
pub use value::{Scalar, ThemeValue};

/// JSON marker for a function-valued leaf: `{"$callable": ["factor"]}`.
pub const CALLABLE_MARKER: &str = "$callable";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq)]
pub enum ThemeNode {
    Scalar(Scalar),
    /// An empty map is the empty composite and is dropped when flattening.
    Composite(IndexMap<String, NodeId>),
    Callable { params: Vec<String> },
    List(Vec<Value>),
    Null,
}

impl ThemeNode {
    pub fn composite() -> Self {
        ThemeNode::Composite(IndexMap::new())
    }

    pub fn string(value: impl Into<String>) -> Self {
        ThemeNode::Scalar(Scalar::String(value.into()))
    }

    pub fn number(value: impl Into<serde_json::Number>) -> Self {
        ThemeNode::Scalar(Scalar::Number(value.into()))
    }

    pub fn bool(value: bool) -> Self {
        ThemeNode::Scalar(Scalar::Bool(value))
    }

    pub fn is_empty_composite(&self) -> bool {
        matches!(self, ThemeNode::Composite(children) if children.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThemeTree {
    nodes: Vec<ThemeNode>,
    root: NodeId,
}

impl Default for ThemeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeTree {
    /// A tree holding only an empty root object.
    pub fn new() -> Self {
        Self {
            nodes: vec![ThemeNode::composite()],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&ThemeNode> {
        self.nodes.get(id.0)
    }

    pub fn add(&mut self, node: ThemeNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Links `child` under `parent` as `key`. Returns false when `parent`
    /// is not a composite node.
    pub fn link(&mut self, parent: NodeId, key: impl Into<String>, child: NodeId) -> bool {
        match self.nodes.get_mut(parent.0) {
            Some(ThemeNode::Composite(children)) => {
                children.insert(key.into(), child);
                true
            }
            _ => false,
        }
    }

    /// Adds `node` and links it under `parent` in one step.
    pub fn insert(&mut self, parent: NodeId, key: impl Into<String>, node: ThemeNode) -> NodeId {
        let id = self.add(node);
        self.link(parent, key, id);
        id
    }

    pub fn from_json(value: &Value) -> Result<Self, ThemeError> {
        let Value::Object(_) = value else {
            return Err(ThemeError::malformed("", MalformedReason::RootNotComposite));
        };
        let mut tree = Self {
            nodes: Vec::new(),
            root: NodeId(0),
        };
        tree.root = tree.add_json(value);
        Ok(tree)
    }

    pub fn load(path: &Path) -> Result<Self, ThemeError> {
        let content = fs::read_to_string(path).map_err(|error| ThemeError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        let value: Value = serde_json::from_str(&content).map_err(|error| ThemeError::Json {
            path: path.to_path_buf(),
            error,
        })?;
        Self::from_json(&value)
    }

    /// Single-level tree keyed by the table's dotted paths.
    pub fn from_table(table: &FlatThemeTable) -> Self {
        let mut tree = Self::new();
        let root = tree.root();
        for (path, value) in table.iter() {
            let node = match value {
                ThemeValue::String(value) => ThemeNode::string(value.clone()),
                ThemeValue::Number(value) => ThemeNode::Scalar(Scalar::Number(value.clone())),
                ThemeValue::Bool(value) => ThemeNode::bool(*value),
                ThemeValue::List(items) => ThemeNode::List(items.clone()),
                ThemeValue::Function { params } => ThemeNode::Callable {
                    params: params.clone(),
                },
            };
            tree.insert(root, path, node);
        }
        tree
    }

    fn add_json(&mut self, value: &Value) -> NodeId {
        let node = match value {
            Value::Null => ThemeNode::Null,
            Value::Bool(value) => ThemeNode::bool(*value),
            Value::Number(value) => ThemeNode::Scalar(Scalar::Number(value.clone())),
            Value::String(value) => ThemeNode::string(value.clone()),
            Value::Array(items) => ThemeNode::List(items.clone()),
            Value::Object(map) => {
                if let Some(params) = callable_params(map) {
                    ThemeNode::Callable { params }
                } else {
                    let id = self.add(ThemeNode::composite());
                    for (key, child) in map {
                        let child = self.add_json(child);
                        self.link(id, key.clone(), child);
                    }
                    return id;
                }
            }
        };
        self.add(node)
    }
}

fn callable_params(map: &serde_json::Map<String, Value>) -> Option<Vec<String>> {
    if map.len() != 1 {
        return None;
    }
    match map.get(CALLABLE_MARKER)? {
        Value::Array(params) => params
            .iter()
            .map(|param| param.as_str().map(str::to_string))
            .collect(),
        Value::Null => Some(Vec::new()),
        _ => None,
    }
}
