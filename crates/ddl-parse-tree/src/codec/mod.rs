//! Binary decoding for DDL parse trees.
//!
//! Decoders take an explicit [`Reader`] so every nested structure advances
//! the same cursor by exactly the bytes it declares.

pub mod declaration;
pub mod element;
pub mod namespace;
pub mod primitives;
pub mod tree;

pub use declaration::{decode_declaration_use, decode_namespace_item};
pub use element::decode_element;
pub use namespace::{decode_namespace, decode_namespace_into};
pub use primitives::Reader;
pub use tree::{decode_tree, decode_tree_at, decode_tree_into, DecodeOptions};
