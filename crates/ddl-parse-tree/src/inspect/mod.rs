//! Read-only traversal of decoded trees.
//!
//! Nothing here touches the wire format; these helpers only walk the value
//! graph produced by the decoders.

use rustc_hash::FxHashMap;

use crate::model::{Element, ElementKind, Namespace, Tree};

/// Visits every element under `namespace` depth-first, in wire order.
///
/// `visit` receives each element with the depth of the namespace that holds
/// it (0 for `namespace` itself). Elements are visited before the
/// namespaces they own.
pub fn walk<'t, 'a, F>(namespace: &'t Namespace<'a>, visit: &mut F)
where
    F: FnMut(&'t Element<'a>, usize),
{
    walk_at(namespace, 0, visit);
}

fn walk_at<'t, 'a, F>(namespace: &'t Namespace<'a>, depth: usize, visit: &mut F)
where
    F: FnMut(&'t Element<'a>, usize),
{
    for element in namespace {
        visit(element, depth);
        for nested in element.nested_namespaces() {
            walk_at(nested, depth + 1, visit);
        }
    }
}

/// Element statistics for one tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeSummary {
    counts: FxHashMap<ElementKind, usize>,
    /// Number of elements at any depth.
    pub total_elements: usize,
    /// Deepest namespace holding at least one element (root is 0).
    pub max_depth: usize,
}

impl TreeSummary {
    /// Builds a summary by walking the whole tree.
    pub fn of(tree: &Tree<'_>) -> Self {
        let mut summary = Self::default();
        walk(&tree.root, &mut |element, depth| {
            *summary.counts.entry(element.kind()).or_insert(0) += 1;
            summary.total_elements += 1;
            summary.max_depth = summary.max_depth.max(depth);
        });
        summary
    }

    /// Number of elements of the given kind.
    pub fn count(&self, kind: ElementKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Non-zero counts in tag order.
    pub fn counts(&self) -> Vec<(ElementKind, usize)> {
        let mut counts: Vec<_> = self.counts.iter().map(|(k, v)| (*k, *v)).collect();
        counts.sort_unstable();
        counts
    }
}

/// Collects display names of every element of `kind`, in walk order.
pub fn names_of_kind(tree: &Tree<'_>, kind: ElementKind) -> Vec<String> {
    let mut names = Vec::new();
    walk(&tree.root, &mut |element, _| {
        if element.kind() == kind {
            names.push(element.name());
        }
    });
    names
}
