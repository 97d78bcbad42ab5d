//! Data model for decoded parse trees.
//!
//! Every structure is owned by its parent; strings borrow from the scanned
//! input until detached with `into_owned`.

pub mod declaration;
pub mod element;
pub mod string;
pub mod tree;

pub use declaration::{
    Declaration, DeclarationUse, NamespaceItem, ParseTreeItem, TemplateUse, TypeDeclaration,
};
pub use element::{
    Action, AdapterDeclaration, ClassDeclaration, DatasetDeclaration, DoClassDeclaration,
    DupSpaceDeclaration, Element, ElementKind, MethodDeclaration, Parameter, PropertyDeclaration,
    ProtocolDeclaration, ReturnValue, Rmc, SimpleTypeDeclaration, TemplateDeclaration,
    TemplateInstance, UnitDeclaration, Variable,
};
pub use string::DdlString;
pub use tree::{Namespace, Tree};
