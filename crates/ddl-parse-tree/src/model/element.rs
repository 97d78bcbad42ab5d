//! Element variants of a parse tree namespace.
//!
//! Each element is a tag byte followed by a body whose layout is fixed by
//! the tag. The set of tags is closed; there is no length prefix that would
//! allow skipping an unrecognized body.

use crate::model::{
    DdlString, Declaration, DeclarationUse, Namespace, NamespaceItem, TypeDeclaration,
};

/// Wire tag of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(u8)]
pub enum ElementKind {
    NamespaceItem = 1,
    Declaration = 2,
    #[cfg_attr(feature = "serde", serde(rename = "DOClassDeclaration"))]
    DoClassDeclaration = 3,
    DatasetDeclaration = 4,
    TypeDeclaration = 5,
    Variable = 6,
    #[cfg_attr(feature = "serde", serde(rename = "RMC"))]
    Rmc = 8,
    Action = 9,
    AdapterDeclaration = 10,
    PropertyDeclaration = 11,
    ProtocolDeclaration = 12,
    Parameter = 13,
    ReturnValue = 14,
    ClassDeclaration = 15,
    TemplateDeclaration = 16,
    SimpleTypeDeclaration = 17,
    TemplateInstance = 18,
    UnitDeclaration = 19,
    DupSpaceDeclaration = 20,
}

impl ElementKind {
    /// All kinds in tag order.
    pub const ALL: [ElementKind; 19] = [
        ElementKind::NamespaceItem,
        ElementKind::Declaration,
        ElementKind::DoClassDeclaration,
        ElementKind::DatasetDeclaration,
        ElementKind::TypeDeclaration,
        ElementKind::Variable,
        ElementKind::Rmc,
        ElementKind::Action,
        ElementKind::AdapterDeclaration,
        ElementKind::PropertyDeclaration,
        ElementKind::ProtocolDeclaration,
        ElementKind::Parameter,
        ElementKind::ReturnValue,
        ElementKind::ClassDeclaration,
        ElementKind::TemplateDeclaration,
        ElementKind::SimpleTypeDeclaration,
        ElementKind::TemplateInstance,
        ElementKind::UnitDeclaration,
        ElementKind::DupSpaceDeclaration,
    ];

    /// Creates an ElementKind from its wire representation.
    ///
    /// Tag 7 is reserved and, like anything outside 1..=20, yields `None`.
    pub fn from_u8(v: u8) -> Option<ElementKind> {
        match v {
            1 => Some(ElementKind::NamespaceItem),
            2 => Some(ElementKind::Declaration),
            3 => Some(ElementKind::DoClassDeclaration),
            4 => Some(ElementKind::DatasetDeclaration),
            5 => Some(ElementKind::TypeDeclaration),
            6 => Some(ElementKind::Variable),
            8 => Some(ElementKind::Rmc),
            9 => Some(ElementKind::Action),
            10 => Some(ElementKind::AdapterDeclaration),
            11 => Some(ElementKind::PropertyDeclaration),
            12 => Some(ElementKind::ProtocolDeclaration),
            13 => Some(ElementKind::Parameter),
            14 => Some(ElementKind::ReturnValue),
            15 => Some(ElementKind::ClassDeclaration),
            16 => Some(ElementKind::TemplateDeclaration),
            17 => Some(ElementKind::SimpleTypeDeclaration),
            18 => Some(ElementKind::TemplateInstance),
            19 => Some(ElementKind::UnitDeclaration),
            20 => Some(ElementKind::DupSpaceDeclaration),
            _ => None,
        }
    }

    /// Returns the wire tag.
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Returns the format's name for this kind.
    pub fn name(self) -> &'static str {
        match self {
            ElementKind::NamespaceItem => "NamespaceItem",
            ElementKind::Declaration => "Declaration",
            ElementKind::DoClassDeclaration => "DOClassDeclaration",
            ElementKind::DatasetDeclaration => "DatasetDeclaration",
            ElementKind::TypeDeclaration => "TypeDeclaration",
            ElementKind::Variable => "Variable",
            ElementKind::Rmc => "RMC",
            ElementKind::Action => "Action",
            ElementKind::AdapterDeclaration => "AdapterDeclaration",
            ElementKind::PropertyDeclaration => "PropertyDeclaration",
            ElementKind::ProtocolDeclaration => "ProtocolDeclaration",
            ElementKind::Parameter => "Parameter",
            ElementKind::ReturnValue => "ReturnValue",
            ElementKind::ClassDeclaration => "ClassDeclaration",
            ElementKind::TemplateDeclaration => "TemplateDeclaration",
            ElementKind::SimpleTypeDeclaration => "SimpleTypeDeclaration",
            ElementKind::TemplateInstance => "TemplateInstance",
            ElementKind::UnitDeclaration => "UnitDeclaration",
            ElementKind::DupSpaceDeclaration => "DupSpaceDeclaration",
        }
    }
}

/// A decoded namespace element.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "kind"))]
pub enum Element<'a> {
    NamespaceItem(NamespaceItem<'a>),
    Declaration(Declaration<'a>),
    #[cfg_attr(feature = "serde", serde(rename = "DOClassDeclaration"))]
    DoClassDeclaration(DoClassDeclaration<'a>),
    DatasetDeclaration(DatasetDeclaration<'a>),
    TypeDeclaration(TypeDeclaration<'a>),
    Variable(Variable<'a>),
    #[cfg_attr(feature = "serde", serde(rename = "RMC"))]
    Rmc(Rmc<'a>),
    Action(Action<'a>),
    AdapterDeclaration(AdapterDeclaration<'a>),
    PropertyDeclaration(PropertyDeclaration<'a>),
    ProtocolDeclaration(ProtocolDeclaration<'a>),
    Parameter(Parameter<'a>),
    ReturnValue(ReturnValue<'a>),
    ClassDeclaration(ClassDeclaration<'a>),
    TemplateDeclaration(TemplateDeclaration<'a>),
    SimpleTypeDeclaration(SimpleTypeDeclaration<'a>),
    TemplateInstance(TemplateInstance<'a>),
    UnitDeclaration(UnitDeclaration<'a>),
    DupSpaceDeclaration(DupSpaceDeclaration<'a>),
}

impl<'a> Element<'a> {
    /// Returns the kind (and thus wire tag) of this element.
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::NamespaceItem(_) => ElementKind::NamespaceItem,
            Element::Declaration(_) => ElementKind::Declaration,
            Element::DoClassDeclaration(_) => ElementKind::DoClassDeclaration,
            Element::DatasetDeclaration(_) => ElementKind::DatasetDeclaration,
            Element::TypeDeclaration(_) => ElementKind::TypeDeclaration,
            Element::Variable(_) => ElementKind::Variable,
            Element::Rmc(_) => ElementKind::Rmc,
            Element::Action(_) => ElementKind::Action,
            Element::AdapterDeclaration(_) => ElementKind::AdapterDeclaration,
            Element::PropertyDeclaration(_) => ElementKind::PropertyDeclaration,
            Element::ProtocolDeclaration(_) => ElementKind::ProtocolDeclaration,
            Element::Parameter(_) => ElementKind::Parameter,
            Element::ReturnValue(_) => ElementKind::ReturnValue,
            Element::ClassDeclaration(_) => ElementKind::ClassDeclaration,
            Element::TemplateDeclaration(_) => ElementKind::TemplateDeclaration,
            Element::SimpleTypeDeclaration(_) => ElementKind::SimpleTypeDeclaration,
            Element::TemplateInstance(_) => ElementKind::TemplateInstance,
            Element::UnitDeclaration(_) => ElementKind::UnitDeclaration,
            Element::DupSpaceDeclaration(_) => ElementKind::DupSpaceDeclaration,
        }
    }

    /// Returns the common declaration header, if this variant has one.
    pub fn declaration(&self) -> Option<&Declaration<'a>> {
        match self {
            Element::NamespaceItem(_)
            | Element::Variable(_)
            | Element::Parameter(_)
            | Element::ReturnValue(_) => None,
            Element::Declaration(d) => Some(d),
            Element::DoClassDeclaration(d) => Some(&d.declaration),
            Element::DatasetDeclaration(d) => Some(&d.declaration),
            Element::TypeDeclaration(d) => Some(&d.declaration),
            Element::Rmc(d) => Some(&d.method.declaration),
            Element::Action(d) => Some(&d.method.declaration),
            Element::AdapterDeclaration(d) => Some(&d.declaration),
            Element::PropertyDeclaration(d) => Some(&d.declaration),
            Element::ProtocolDeclaration(d) => Some(&d.declaration),
            Element::ClassDeclaration(d) => Some(&d.type_declaration.declaration),
            Element::TemplateDeclaration(d) => Some(&d.type_declaration.declaration),
            Element::SimpleTypeDeclaration(d) => Some(&d.type_declaration.declaration),
            Element::TemplateInstance(d) => Some(&d.type_declaration.declaration),
            Element::UnitDeclaration(d) => Some(&d.declaration),
            Element::DupSpaceDeclaration(d) => Some(&d.declaration),
        }
    }

    /// Returns the identity of this element.
    pub fn namespace_item(&self) -> &NamespaceItem<'a> {
        match self {
            Element::NamespaceItem(item) => item,
            Element::Variable(v) => &v.namespace_item,
            Element::Parameter(p) => &p.variable.namespace_item,
            Element::ReturnValue(r) => &r.variable.namespace_item,
            Element::Declaration(d) => &d.namespace_item,
            Element::DoClassDeclaration(d) => &d.declaration.namespace_item,
            Element::DatasetDeclaration(d) => &d.declaration.namespace_item,
            Element::TypeDeclaration(d) => &d.declaration.namespace_item,
            Element::Rmc(d) => &d.method.declaration.namespace_item,
            Element::Action(d) => &d.method.declaration.namespace_item,
            Element::AdapterDeclaration(d) => &d.declaration.namespace_item,
            Element::PropertyDeclaration(d) => &d.declaration.namespace_item,
            Element::ProtocolDeclaration(d) => &d.declaration.namespace_item,
            Element::ClassDeclaration(d) => &d.type_declaration.declaration.namespace_item,
            Element::TemplateDeclaration(d) => &d.type_declaration.declaration.namespace_item,
            Element::SimpleTypeDeclaration(d) => &d.type_declaration.declaration.namespace_item,
            Element::TemplateInstance(d) => &d.type_declaration.declaration.namespace_item,
            Element::UnitDeclaration(d) => &d.declaration.namespace_item,
            Element::DupSpaceDeclaration(d) => &d.declaration.namespace_item,
        }
    }

    /// Display name built from the element's identity.
    pub fn name(&self) -> String {
        self.namespace_item().display_name()
    }

    /// Namespaces owned directly by this element, in wire order.
    pub fn nested_namespaces(&self) -> Vec<&Namespace<'a>> {
        let mut out = Vec::new();
        if let Some(declaration) = self.declaration() {
            out.push(&declaration.properties);
        }
        match self {
            Element::DoClassDeclaration(d) => out.push(&d.members),
            Element::DatasetDeclaration(d) => out.push(&d.variables),
            Element::Rmc(d) => {
                out.push(&d.method.members);
                out.push(&d.parameters);
            }
            Element::Action(d) => {
                out.push(&d.method.members);
                out.push(&d.parameters);
            }
            Element::ProtocolDeclaration(d) => out.push(&d.methods),
            Element::ClassDeclaration(d) => out.push(&d.members),
            _ => {}
        }
        out
    }

    /// Detaches the element from the input buffer.
    pub fn into_owned(self) -> Element<'static> {
        match self {
            Element::NamespaceItem(v) => Element::NamespaceItem(v.into_owned()),
            Element::Declaration(v) => Element::Declaration(v.into_owned()),
            Element::DoClassDeclaration(v) => Element::DoClassDeclaration(v.into_owned()),
            Element::DatasetDeclaration(v) => Element::DatasetDeclaration(v.into_owned()),
            Element::TypeDeclaration(v) => Element::TypeDeclaration(v.into_owned()),
            Element::Variable(v) => Element::Variable(v.into_owned()),
            Element::Rmc(v) => Element::Rmc(v.into_owned()),
            Element::Action(v) => Element::Action(v.into_owned()),
            Element::AdapterDeclaration(v) => Element::AdapterDeclaration(v.into_owned()),
            Element::PropertyDeclaration(v) => Element::PropertyDeclaration(v.into_owned()),
            Element::ProtocolDeclaration(v) => Element::ProtocolDeclaration(v.into_owned()),
            Element::Parameter(v) => Element::Parameter(v.into_owned()),
            Element::ReturnValue(v) => Element::ReturnValue(v.into_owned()),
            Element::ClassDeclaration(v) => Element::ClassDeclaration(v.into_owned()),
            Element::TemplateDeclaration(v) => Element::TemplateDeclaration(v.into_owned()),
            Element::SimpleTypeDeclaration(v) => Element::SimpleTypeDeclaration(v.into_owned()),
            Element::TemplateInstance(v) => Element::TemplateInstance(v.into_owned()),
            Element::UnitDeclaration(v) => Element::UnitDeclaration(v.into_owned()),
            Element::DupSpaceDeclaration(v) => Element::DupSpaceDeclaration(v.into_owned()),
        }
    }
}

/// Distributed-object class (tag 3).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DoClassDeclaration<'a> {
    pub declaration: Declaration<'a>,
    pub parent_class_name: DdlString<'a>,
    pub class_id: u32,
    pub members: Namespace<'a>,
}

impl DoClassDeclaration<'_> {
    pub fn into_owned(self) -> DoClassDeclaration<'static> {
        DoClassDeclaration {
            declaration: self.declaration.into_owned(),
            parent_class_name: self.parent_class_name.into_owned(),
            class_id: self.class_id,
            members: self.members.into_owned(),
        }
    }
}

/// Dataset (tag 4).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DatasetDeclaration<'a> {
    pub declaration: Declaration<'a>,
    pub variables: Namespace<'a>,
}

impl DatasetDeclaration<'_> {
    pub fn into_owned(self) -> DatasetDeclaration<'static> {
        DatasetDeclaration {
            declaration: self.declaration.into_owned(),
            variables: self.variables.into_owned(),
        }
    }
}

/// Typed variable (tag 6).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Variable<'a> {
    pub namespace_item: NamespaceItem<'a>,
    pub declaration_use: DeclarationUse<'a>,
    pub array_size: u32,
}

impl Variable<'_> {
    pub fn into_owned(self) -> Variable<'static> {
        Variable {
            namespace_item: self.namespace_item.into_owned(),
            declaration_use: self.declaration_use.into_owned(),
            array_size: self.array_size,
        }
    }
}

/// Method header shared by RMCs and actions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MethodDeclaration<'a> {
    pub declaration: Declaration<'a>,
    pub members: Namespace<'a>,
}

impl MethodDeclaration<'_> {
    pub fn into_owned(self) -> MethodDeclaration<'static> {
        MethodDeclaration {
            declaration: self.declaration.into_owned(),
            members: self.members.into_owned(),
        }
    }
}

/// Remote method call (tag 8).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Rmc<'a> {
    pub method: MethodDeclaration<'a>,
    pub parameters: Namespace<'a>,
}

impl Rmc<'_> {
    pub fn into_owned(self) -> Rmc<'static> {
        Rmc {
            method: self.method.into_owned(),
            parameters: self.parameters.into_owned(),
        }
    }
}

/// Action (tag 9). Same layout as [`Rmc`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Action<'a> {
    pub method: MethodDeclaration<'a>,
    pub parameters: Namespace<'a>,
}

impl Action<'_> {
    pub fn into_owned(self) -> Action<'static> {
        Action {
            method: self.method.into_owned(),
            parameters: self.parameters.into_owned(),
        }
    }
}

/// Adapter (tag 10).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AdapterDeclaration<'a> {
    pub declaration: Declaration<'a>,
}

impl AdapterDeclaration<'_> {
    pub fn into_owned(self) -> AdapterDeclaration<'static> {
        AdapterDeclaration {
            declaration: self.declaration.into_owned(),
        }
    }
}

/// Property (tag 11).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PropertyDeclaration<'a> {
    pub declaration: Declaration<'a>,
    pub category_mask: u32,
    pub allowed_target_mask: u32,
}

impl PropertyDeclaration<'_> {
    pub fn into_owned(self) -> PropertyDeclaration<'static> {
        PropertyDeclaration {
            declaration: self.declaration.into_owned(),
            category_mask: self.category_mask,
            allowed_target_mask: self.allowed_target_mask,
        }
    }
}

/// Protocol (tag 12).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProtocolDeclaration<'a> {
    pub declaration: Declaration<'a>,
    pub methods: Namespace<'a>,
}

impl ProtocolDeclaration<'_> {
    pub fn into_owned(self) -> ProtocolDeclaration<'static> {
        ProtocolDeclaration {
            declaration: self.declaration.into_owned(),
            methods: self.methods.into_owned(),
        }
    }
}

/// Method parameter (tag 13).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Parameter<'a> {
    pub variable: Variable<'a>,
    pub declaration_use: DeclarationUse<'a>,
    pub array_size: u32,
    /// Raw parameter type byte.
    pub parameter_type: u8,
}

impl Parameter<'_> {
    pub fn into_owned(self) -> Parameter<'static> {
        Parameter {
            variable: self.variable.into_owned(),
            declaration_use: self.declaration_use.into_owned(),
            array_size: self.array_size,
            parameter_type: self.parameter_type,
        }
    }
}

/// Method return value (tag 14).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReturnValue<'a> {
    pub variable: Variable<'a>,
    pub declaration_use: DeclarationUse<'a>,
    pub array_size: u32,
}

impl ReturnValue<'_> {
    pub fn into_owned(self) -> ReturnValue<'static> {
        ReturnValue {
            variable: self.variable.into_owned(),
            declaration_use: self.declaration_use.into_owned(),
            array_size: self.array_size,
        }
    }
}

/// Class (tag 15).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ClassDeclaration<'a> {
    pub type_declaration: TypeDeclaration<'a>,
    pub parent_class_name: DdlString<'a>,
    pub members: Namespace<'a>,
}

impl ClassDeclaration<'_> {
    pub fn into_owned(self) -> ClassDeclaration<'static> {
        ClassDeclaration {
            type_declaration: self.type_declaration.into_owned(),
            parent_class_name: self.parent_class_name.into_owned(),
            members: self.members.into_owned(),
        }
    }
}

/// Template (tag 16).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TemplateDeclaration<'a> {
    pub type_declaration: TypeDeclaration<'a>,
    pub template_argument_count: u32,
}

impl TemplateDeclaration<'_> {
    pub fn into_owned(self) -> TemplateDeclaration<'static> {
        TemplateDeclaration {
            type_declaration: self.type_declaration.into_owned(),
            template_argument_count: self.template_argument_count,
        }
    }
}

/// Simple (built-in) type (tag 17).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SimpleTypeDeclaration<'a> {
    pub type_declaration: TypeDeclaration<'a>,
}

impl SimpleTypeDeclaration<'_> {
    pub fn into_owned(self) -> SimpleTypeDeclaration<'static> {
        SimpleTypeDeclaration {
            type_declaration: self.type_declaration.into_owned(),
        }
    }
}

/// Template instantiation (tag 18).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TemplateInstance<'a> {
    pub type_declaration: TypeDeclaration<'a>,
    pub base_type_name: DdlString<'a>,
    pub template_arguments: Vec<DdlString<'a>>,
}

impl TemplateInstance<'_> {
    pub fn into_owned(self) -> TemplateInstance<'static> {
        TemplateInstance {
            type_declaration: self.type_declaration.into_owned(),
            base_type_name: self.base_type_name.into_owned(),
            template_arguments: self
                .template_arguments
                .into_iter()
                .map(DdlString::into_owned)
                .collect(),
        }
    }
}

/// Compilation unit (tag 19).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UnitDeclaration<'a> {
    pub declaration: Declaration<'a>,
    pub unit_name: DdlString<'a>,
    pub unit_directory: DdlString<'a>,
}

impl UnitDeclaration<'_> {
    pub fn into_owned(self) -> UnitDeclaration<'static> {
        UnitDeclaration {
            declaration: self.declaration.into_owned(),
            unit_name: self.unit_name.into_owned(),
            unit_directory: self.unit_directory.into_owned(),
        }
    }
}

/// Duplication space (tag 20).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DupSpaceDeclaration<'a> {
    pub declaration: Declaration<'a>,
}

impl DupSpaceDeclaration<'_> {
    pub fn into_owned(self) -> DupSpaceDeclaration<'static> {
        DupSpaceDeclaration {
            declaration: self.declaration.into_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tag_roundtrip() {
        for kind in ElementKind::ALL {
            assert_eq!(ElementKind::from_u8(kind.tag()), Some(kind));
        }
    }

    #[test]
    fn test_reserved_and_out_of_set_tags() {
        assert_eq!(ElementKind::from_u8(0), None);
        assert_eq!(ElementKind::from_u8(7), None);
        assert_eq!(ElementKind::from_u8(21), None);
        assert_eq!(ElementKind::from_u8(255), None);
    }

    #[test]
    fn test_nested_namespaces_of_rmc() {
        let rmc = Element::Rmc(Rmc::default());
        // properties, method members, parameters
        assert_eq!(rmc.nested_namespaces().len(), 3);

        let variable = Element::Variable(Variable::default());
        assert!(variable.nested_namespaces().is_empty());
        assert!(variable.declaration().is_none());
    }
}
