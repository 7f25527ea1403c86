use super::{
    FlatThemeTable, MalformedReason, NodeId, ThemeError, ThemeNode, ThemeTree, ThemeValue,
};
use crate::config::ResolverConfig;
use std::collections::HashSet;

pub fn flatten(tree: &ThemeTree) -> Result<FlatThemeTable, ThemeError> {
    flatten_with(tree, &ResolverConfig::default().callable_key)
}

/// Depth-first flattening. Function leaves survive only when their own key
/// (the last path segment) equals `callable_key`.
pub fn flatten_with(tree: &ThemeTree, callable_key: &str) -> Result<FlatThemeTable, ThemeError> {
    let mut flattener = Flattener {
        tree,
        callable_key,
        ancestors: HashSet::new(),
        out: FlatThemeTable::new(),
    };
    match tree.get(tree.root()) {
        Some(ThemeNode::Composite(_)) => flattener.visit(tree.root(), "")?,
        Some(_) => return Err(ThemeError::malformed("", MalformedReason::RootNotComposite)),
        None => return Err(ThemeError::malformed("", MalformedReason::DanglingNode)),
    }
    tracing::debug!(paths = flattener.out.len(), "flattened theme tree");
    Ok(flattener.out)
}

struct Flattener<'a> {
    tree: &'a ThemeTree,
    callable_key: &'a str,
    ancestors: HashSet<NodeId>,
    out: FlatThemeTable,
}

impl Flattener<'_> {
    fn visit(&mut self, id: NodeId, prefix: &str) -> Result<(), ThemeError> {
        if !self.ancestors.insert(id) {
            return Err(ThemeError::malformed(prefix, MalformedReason::Cycle));
        }
        let tree = self.tree;
        let Some(ThemeNode::Composite(children)) = tree.get(id) else {
            return Err(ThemeError::malformed(prefix, MalformedReason::DanglingNode));
        };
        for (key, child) in children {
            let path = join_path(prefix, key);
            if key.is_empty() {
                return Err(ThemeError::malformed(path, MalformedReason::EmptyKey));
            }
            let Some(node) = tree.get(*child) else {
                return Err(ThemeError::malformed(path, MalformedReason::DanglingNode));
            };
            match node {
                ThemeNode::Scalar(scalar) => self.emit(path, scalar.clone().into())?,
                ThemeNode::List(items) => self.emit(path, ThemeValue::List(items.clone()))?,
                ThemeNode::Callable { params } => {
                    if last_segment(key) == self.callable_key {
                        let value = ThemeValue::Function {
                            params: params.clone(),
                        };
                        self.emit(path, value)?;
                    }
                }
                ThemeNode::Composite(_) if node.is_empty_composite() => {}
                ThemeNode::Composite(_) => self.visit(*child, &path)?,
                ThemeNode::Null => {}
            }
        }
        self.ancestors.remove(&id);
        Ok(())
    }

    fn emit(&mut self, path: String, value: ThemeValue) -> Result<(), ThemeError> {
        // A path may not be both a leaf and the parent of another leaf.
        let shadows_leaf = path
            .match_indices('.')
            .any(|(idx, _)| self.out.contains(&path[..idx]));
        if self.out.contains(&path) || shadows_leaf || self.out.has_children(&path) {
            return Err(ThemeError::malformed(path, MalformedReason::DuplicatePath));
        }
        self.out.insert(path, value);
        Ok(())
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

fn last_segment(key: &str) -> &str {
    key.rsplit('.').next().unwrap_or(key)
}
