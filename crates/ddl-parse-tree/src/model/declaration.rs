//! Shared substructures used by most element variants.

use crate::model::{DdlString, Namespace};

/// Single name component of a [`NamespaceItem`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParseTreeItem<'a> {
    pub name: DdlString<'a>,
}

impl ParseTreeItem<'_> {
    pub fn into_owned(self) -> ParseTreeItem<'static> {
        ParseTreeItem {
            name: self.name.into_owned(),
        }
    }
}

/// Two-part identifier of a declared entity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NamespaceItem<'a> {
    pub first: ParseTreeItem<'a>,
    pub second: ParseTreeItem<'a>,
}

impl NamespaceItem<'_> {
    /// Joins the non-empty components with `::`.
    pub fn display_name(&self) -> String {
        let first = self.first.name.to_string_lossy();
        let second = self.second.name.to_string_lossy();
        match (first.is_empty(), second.is_empty()) {
            (false, false) => format!("{first}::{second}"),
            (false, true) => first.into_owned(),
            (true, _) => second.into_owned(),
        }
    }

    pub fn into_owned(self) -> NamespaceItem<'static> {
        NamespaceItem {
            first: self.first.into_owned(),
            second: self.second.into_owned(),
        }
    }
}

/// Common header: identity, owning unit and property elements.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Declaration<'a> {
    pub namespace_item: NamespaceItem<'a>,
    pub unit_name: DdlString<'a>,
    pub properties: Namespace<'a>,
}

impl Declaration<'_> {
    pub fn into_owned(self) -> Declaration<'static> {
        Declaration {
            namespace_item: self.namespace_item.into_owned(),
            unit_name: self.unit_name.into_owned(),
            properties: self.properties.into_owned(),
        }
    }
}

/// Header of type-like declarations. Same wire shape as [`Declaration`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TypeDeclaration<'a> {
    pub declaration: Declaration<'a>,
}

impl TypeDeclaration<'_> {
    pub fn into_owned(self) -> TypeDeclaration<'static> {
        TypeDeclaration {
            declaration: self.declaration.into_owned(),
        }
    }
}

/// Reference to a type, possibly a template instantiation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DeclarationUse<'a> {
    /// Element tag of the referenced declaration.
    pub tag: u8,
    pub name: DdlString<'a>,
    /// Present only when `tag` is the template instance tag.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub template: Option<TemplateUse<'a>>,
}

impl<'a> DeclarationUse<'a> {
    /// Returns the template arguments, empty for non-template references.
    pub fn arguments(&self) -> &[DeclarationUse<'a>] {
        match &self.template {
            Some(template) => &template.arguments,
            None => &[],
        }
    }

    /// Nesting depth of template arguments (0 for a plain reference).
    pub fn depth(&self) -> usize {
        self.arguments()
            .iter()
            .map(|arg| arg.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn into_owned(self) -> DeclarationUse<'static> {
        DeclarationUse {
            tag: self.tag,
            name: self.name.into_owned(),
            template: self.template.map(TemplateUse::into_owned),
        }
    }
}

/// Template instantiation details of a [`DeclarationUse`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TemplateUse<'a> {
    pub base_type_name: DdlString<'a>,
    pub arguments: Vec<DeclarationUse<'a>>,
}

impl TemplateUse<'_> {
    pub fn into_owned(self) -> TemplateUse<'static> {
        TemplateUse {
            base_type_name: self.base_type_name.into_owned(),
            arguments: self.arguments.into_iter().map(DeclarationUse::into_owned).collect(),
        }
    }
}
