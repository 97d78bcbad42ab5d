//! DDL parse tree decoder: recovers protocol definitions embedded in binary
//! program images.
//!
//! Programs built with the DDL toolchain carry a serialized parse tree of
//! their protocol declarations. Each tree starts with a four-byte signature,
//! followed by a version header and a recursive namespace of declarations.
//! This crate locates every signature in an arbitrary byte buffer and decodes
//! the trees that follow.
//!
//! # Quick Start
//!
//! ```rust
//! use ddl_parse_tree::{scan, ElementKind, TreeSummary, MAGIC};
//!
//! // signature, reserved byte, version 3.5.1.0, empty root namespace
//! let mut image = vec![0u8; 8];
//! image.extend_from_slice(&MAGIC);
//! image.push(0);
//! for field in [3u32, 5, 1, 0, 0] {
//!     image.extend_from_slice(&field.to_be_bytes());
//! }
//!
//! let attempts = scan(&image);
//! assert_eq!(attempts.len(), 1);
//!
//! let found = &attempts[0];
//! assert_eq!(found.signature_offset, 8);
//! assert!(found.is_ok());
//! assert_eq!(found.tree.version(), "3.5.1.0");
//!
//! let summary = TreeSummary::of(&found.tree);
//! assert_eq!(summary.count(ElementKind::ClassDeclaration), 0);
//! ```
//!
//! # Modules
//!
//! - [`model`]: Decoded value types (Tree, Namespace, Element, declarations)
//! - [`codec`]: Big-endian wire decoding
//! - [`scan`]: Signature search over whole images
//! - [`inspect`]: Traversal and statistics over decoded trees
//! - [`error`]: Error types
//! - [`limits`]: Wire constants and decoding bounds
//!
//! # Untrusted Input
//!
//! Images are arbitrary binaries, so the decoder never trusts a length or
//! count field:
//! - Every read is bounds-checked and reports the absolute offset on failure
//! - Up-front allocations are capped regardless of declared counts
//! - Recursion depth is bounded for both namespaces and template arguments
//!
//! A failed decode still returns everything read before the failure.

pub mod codec;
pub mod error;
pub mod inspect;
pub mod limits;
pub mod model;
pub mod scan;

pub use codec::{decode_tree, decode_tree_at, decode_tree_into, DecodeOptions};
pub use error::{DecodeError, ErrorKind};
pub use inspect::{names_of_kind, walk, TreeSummary};
pub use limits::MAGIC;
pub use model::{
    DdlString, Declaration, DeclarationUse, Element, ElementKind, Namespace, NamespaceItem,
    ParseTreeItem, TemplateUse, Tree, TypeDeclaration,
};
pub use scan::{find_signatures, scan, scan_with_options, ScannedTree, Scanner};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
