//! Tree decoding for the parse tree wire format.
//!
//! A tree body follows its signature: one reserved byte, the four
//! big-endian version fields, then the root namespace.

use crate::codec::namespace::decode_namespace_into;
use crate::codec::primitives::Reader;
use crate::error::DecodeError;
use crate::limits::{
    DEFAULT_MAX_DECLARATION_USE_DEPTH, DEFAULT_MAX_NAMESPACE_DEPTH, TREE_RESERVED_LEN,
};
use crate::model::Tree;

/// Options for decoding trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum nesting of template arguments inside one declaration use.
    pub max_declaration_use_depth: usize,
    /// Maximum nesting of namespaces below the root namespace.
    pub max_namespace_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_declaration_use_depth: DEFAULT_MAX_DECLARATION_USE_DEPTH,
            max_namespace_depth: DEFAULT_MAX_NAMESPACE_DEPTH,
        }
    }
}

impl DecodeOptions {
    /// Creates default decoding options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_declaration_use_depth(mut self, depth: usize) -> Self {
        self.max_declaration_use_depth = depth;
        self
    }

    pub fn with_max_namespace_depth(mut self, depth: usize) -> Self {
        self.max_namespace_depth = depth;
        self
    }
}

/// Decodes a tree body into `tree`, field by field.
///
/// Whatever was decoded before an error stays in `tree`: the version fields
/// read so far and the fully decoded prefix of the root namespace.
pub fn decode_tree_into<'a>(
    reader: &mut Reader<'a>,
    options: &DecodeOptions,
    tree: &mut Tree<'a>,
) -> Result<(), DecodeError> {
    reader.read_bytes(TREE_RESERVED_LEN, "tree.reserved")?;
    tree.major = reader.read_u32("tree.major")?;
    tree.minor = reader.read_u32("tree.minor")?;
    tree.micro = reader.read_u32("tree.micro")?;
    tree.build = reader.read_u32("tree.build")?;
    log::trace!("tree version {} at offset {:#x}", tree.version(), reader.position());

    decode_namespace_into(reader, options, 0, &mut tree.root)
}

/// Decodes a single tree body that starts at the beginning of `input`
/// (no signature).
pub fn decode_tree(input: &[u8]) -> Result<Tree<'_>, DecodeError> {
    decode_tree_at(input, 0, &DecodeOptions::default())
}

/// Decodes a tree body starting at an absolute offset in `input`.
pub fn decode_tree_at<'a>(
    input: &'a [u8],
    offset: usize,
    options: &DecodeOptions,
) -> Result<Tree<'a>, DecodeError> {
    let mut reader = Reader::at(input, offset)?;
    let mut tree = Tree::default();
    decode_tree_into(&mut reader, options, &mut tree)?;
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::element::tests::write_declaration;
    use crate::codec::primitives::Writer;
    use crate::error::ErrorKind;
    use crate::model::{Element, ElementKind};

    fn write_header(w: &mut Writer, version: [u32; 4]) {
        w.write_u8(0);
        for v in version {
            w.write_u32(v);
        }
    }

    #[test]
    fn test_empty_tree() {
        let mut w = Writer::new();
        write_header(&mut w, [1, 2, 3, 4]);
        w.write_u32(0);

        let tree = decode_tree(w.as_bytes()).unwrap();
        assert_eq!(tree.version(), "1.2.3.4");
        assert!(tree.root.is_empty());
    }

    #[test]
    fn test_tree_with_protocol() {
        let mut w = Writer::new();
        write_header(&mut w, [3, 0, 0, 1]);
        w.write_u32(2);
        w.write_u8(19);
        write_declaration(&mut w, "", "Friends");
        w.write_string("Friends").write_string("nex/friends");
        w.write_u8(12);
        write_declaration(&mut w, "", "FriendsProtocol");
        w.write_u32(1).write_u8(8);
        write_declaration(&mut w, "", "GetFriends");
        w.write_u32(0).write_u32(0);

        let tree = decode_tree(w.as_bytes()).unwrap();
        assert_eq!(tree.major, 3);
        assert_eq!(tree.build, 1);
        assert_eq!(tree.root.elements[0].kind(), ElementKind::UnitDeclaration);
        let Element::ProtocolDeclaration(protocol) = &tree.root.elements[1] else {
            panic!("expected ProtocolDeclaration");
        };
        assert_eq!(protocol.methods.elements[0].name(), "GetFriends");
    }

    #[test]
    fn test_partial_tree_keeps_prefix() {
        let mut w = Writer::new();
        write_header(&mut w, [1, 0, 0, 7]);
        w.write_u32(2);
        w.write_u8(1).write_string("a").write_string("b");
        // Second element: string length runs past the end.
        w.write_u8(1).write_u32(100).write_bytes(b"short");

        let mut reader = Reader::new(w.as_bytes());
        let mut tree = Tree::default();
        let err = decode_tree_into(&mut reader, &DecodeOptions::default(), &mut tree).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Truncated);
        assert_eq!(tree.build, 7);
        assert_eq!(tree.root.len(), 1);
    }

    #[test]
    fn test_truncated_header() {
        let data = [0u8, 0, 0, 0, 1, 0, 0];
        let err = decode_tree(&data).unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { context: "tree.minor", offset: 5, .. }));
    }

    #[test]
    fn test_decode_at_out_of_range() {
        let data = [0u8; 8];
        let err = decode_tree_at(&data, 9, &DecodeOptions::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn test_options_builders() {
        let options = DecodeOptions::new()
            .with_max_declaration_use_depth(4)
            .with_max_namespace_depth(8);
        assert_eq!(options.max_declaration_use_depth, 4);
        assert_eq!(options.max_namespace_depth, 8);
        assert_eq!(DecodeOptions::new(), DecodeOptions::default());
    }
}
