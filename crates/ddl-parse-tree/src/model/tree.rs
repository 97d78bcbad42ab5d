//! Top-level tree and namespace types.

use crate::model::Element;

/// Ordered sequence of elements, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct Namespace<'a> {
    pub elements: Vec<Element<'a>>,
}

impl<'a> Namespace<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Element<'a>> {
        self.elements.iter()
    }

    pub fn into_owned(self) -> Namespace<'static> {
        Namespace {
            elements: self.elements.into_iter().map(Element::into_owned).collect(),
        }
    }
}

impl<'n, 'a> IntoIterator for &'n Namespace<'a> {
    type Item = &'n Element<'a>;
    type IntoIter = std::slice::Iter<'n, Element<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

/// One decoded parse tree: a version quad and a root namespace.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Tree<'a> {
    pub major: u32,
    pub minor: u32,
    pub micro: u32,
    pub build: u32,
    pub root: Namespace<'a>,
}

impl Tree<'_> {
    /// Formats the version quad as `major.minor.micro.build`.
    pub fn version(&self) -> String {
        format!("{}.{}.{}.{}", self.major, self.minor, self.micro, self.build)
    }

    /// Detaches the tree from the input buffer.
    pub fn into_owned(self) -> Tree<'static> {
        Tree {
            major: self.major,
            minor: self.minor,
            micro: self.micro,
            build: self.build,
            root: self.root.into_owned(),
        }
    }
}
