//! Decoding of the shared declaration substructures.

use crate::codec::namespace::decode_namespace;
use crate::codec::primitives::Reader;
use crate::codec::tree::DecodeOptions;
use crate::error::DecodeError;
use crate::limits::{MAX_PREALLOCATION, TEMPLATE_INSTANCE_TAG};
use crate::model::{
    Declaration, DeclarationUse, NamespaceItem, ParseTreeItem, TemplateUse, TypeDeclaration,
};

pub fn decode_parse_tree_item<'a>(reader: &mut Reader<'a>) -> Result<ParseTreeItem<'a>, DecodeError> {
    let name = reader.read_string("parse_tree_item")?;
    Ok(ParseTreeItem { name })
}

pub fn decode_namespace_item<'a>(reader: &mut Reader<'a>) -> Result<NamespaceItem<'a>, DecodeError> {
    let first = decode_parse_tree_item(reader)?;
    let second = decode_parse_tree_item(reader)?;
    Ok(NamespaceItem { first, second })
}

/// Decodes a declaration header. `depth` is the nesting depth of the
/// namespace that owns the declaring element.
pub fn decode_declaration<'a>(
    reader: &mut Reader<'a>,
    options: &DecodeOptions,
    depth: usize,
) -> Result<Declaration<'a>, DecodeError> {
    let namespace_item = decode_namespace_item(reader)?;
    let unit_name = reader.read_string("unit_name")?;
    let properties = decode_namespace(reader, options, depth + 1)?;
    Ok(Declaration {
        namespace_item,
        unit_name,
        properties,
    })
}

pub fn decode_type_declaration<'a>(
    reader: &mut Reader<'a>,
    options: &DecodeOptions,
    depth: usize,
) -> Result<TypeDeclaration<'a>, DecodeError> {
    let declaration = decode_declaration(reader, options, depth)?;
    Ok(TypeDeclaration { declaration })
}

/// Decodes a type reference, recursing into template arguments.
pub fn decode_declaration_use<'a>(
    reader: &mut Reader<'a>,
    options: &DecodeOptions,
) -> Result<DeclarationUse<'a>, DecodeError> {
    decode_declaration_use_at_depth(reader, options, 0)
}

fn decode_declaration_use_at_depth<'a>(
    reader: &mut Reader<'a>,
    options: &DecodeOptions,
    depth: usize,
) -> Result<DeclarationUse<'a>, DecodeError> {
    if depth > options.max_declaration_use_depth {
        return Err(DecodeError::DepthExceeded {
            context: "declaration_use",
            offset: reader.position(),
            max: options.max_declaration_use_depth,
        });
    }

    let tag = reader.read_u8("declaration_use.tag")?;
    let name = reader.read_string("declaration_use.name")?;

    let template = if tag == TEMPLATE_INSTANCE_TAG {
        let base_type_name = reader.read_string("declaration_use.base_type_name")?;
        let count = reader.read_u8("declaration_use.argument_count")? as usize;
        let mut arguments = Vec::with_capacity(count);
        for _ in 0..count {
            arguments.push(decode_declaration_use_at_depth(reader, options, depth + 1)?);
        }
        Some(TemplateUse {
            base_type_name,
            arguments,
        })
    } else {
        None
    };

    Ok(DeclarationUse {
        tag,
        name,
        template,
    })
}

/// Reads `count` strings, reserving at most [`MAX_PREALLOCATION`] up front.
pub(crate) fn decode_string_list<'a>(
    reader: &mut Reader<'a>,
    count: usize,
    context: &'static str,
) -> Result<Vec<crate::model::DdlString<'a>>, DecodeError> {
    let mut strings = Vec::with_capacity(count.min(MAX_PREALLOCATION));
    for _ in 0..count {
        strings.push(reader.read_string(context)?);
    }
    Ok(strings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::primitives::Writer;
    use crate::error::ErrorKind;
    use proptest::prelude::*;

    fn write_plain_use(w: &mut Writer, tag: u8, name: &str) {
        w.write_u8(tag).write_string(name);
    }

    #[test]
    fn test_plain_declaration_use() {
        let mut w = Writer::new();
        write_plain_use(&mut w, 17, "uint32");

        let mut reader = Reader::new(w.as_bytes());
        let du = decode_declaration_use(&mut reader, &DecodeOptions::default()).unwrap();
        assert_eq!(du.tag, 17);
        assert_eq!(du.name, "uint32");
        assert!(du.template.is_none());
        assert_eq!(reader.position(), 1 + 4 + 6);
    }

    #[test]
    fn test_template_declaration_use() {
        // std_map<string, std_list<uint32>>
        let mut w = Writer::new();
        w.write_u8(18)
            .write_string("std_map<string,std_list<uint32>>")
            .write_string("std_map")
            .write_u8(2);
        write_plain_use(&mut w, 17, "string");
        w.write_u8(18)
            .write_string("std_list<uint32>")
            .write_string("std_list")
            .write_u8(1);
        write_plain_use(&mut w, 17, "uint32");

        let mut reader = Reader::new(w.as_bytes());
        let du = decode_declaration_use(&mut reader, &DecodeOptions::default()).unwrap();
        assert!(reader.is_empty());

        let template = du.template.as_ref().unwrap();
        assert_eq!(template.base_type_name, "std_map");
        assert_eq!(du.arguments().len(), 2);
        assert_eq!(du.arguments()[0].name, "string");
        assert_eq!(du.arguments()[1].arguments()[0].name, "uint32");
        assert_eq!(du.depth(), 2);
    }

    #[test]
    fn test_template_with_zero_arguments() {
        let mut w = Writer::new();
        w.write_u8(18).write_string("buffer<>").write_string("buffer").write_u8(0);

        let mut reader = Reader::new(w.as_bytes());
        let du = decode_declaration_use(&mut reader, &DecodeOptions::default()).unwrap();
        assert!(du.arguments().is_empty());
        assert!(du.template.is_some());
        assert!(reader.is_empty());
    }

    #[test]
    fn test_declaration_use_depth_guard() {
        let mut w = Writer::new();
        for _ in 0..4 {
            w.write_u8(18).write_string("t").write_string("t").write_u8(1);
        }
        write_plain_use(&mut w, 17, "leaf");

        let options = DecodeOptions::new().with_max_declaration_use_depth(2);
        let mut reader = Reader::new(w.as_bytes());
        let err = decode_declaration_use(&mut reader, &options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DepthExceeded);

        let mut reader = Reader::new(w.as_bytes());
        assert!(decode_declaration_use(&mut reader, &DecodeOptions::default()).is_ok());
    }

    #[test]
    fn test_declaration_with_empty_properties() {
        let mut w = Writer::new();
        w.write_string("Game")
            .write_string("Player")
            .write_string("game_unit")
            .write_u32(0);

        let mut reader = Reader::new(w.as_bytes());
        let decl = decode_declaration(&mut reader, &DecodeOptions::default(), 0).unwrap();
        assert_eq!(decl.namespace_item.display_name(), "Game::Player");
        assert_eq!(decl.unit_name, "game_unit");
        assert!(decl.properties.is_empty());
        assert!(reader.is_empty());
    }

    fn plain_use() -> impl Strategy<Value = (u8, String)> {
        (any::<u8>().prop_filter("not a template", |t| *t != TEMPLATE_INSTANCE_TAG), "[a-z_]{0,12}")
    }

    /// Shape of an encoded declaration use, nested templates included.
    #[derive(Debug, Clone)]
    enum UseShape {
        Plain(u8, String),
        Template(String, String, Vec<UseShape>),
    }

    impl UseShape {
        fn write(&self, w: &mut Writer) {
            match self {
                UseShape::Plain(tag, name) => write_plain_use(w, *tag, name),
                UseShape::Template(name, base, args) => {
                    w.write_u8(TEMPLATE_INSTANCE_TAG)
                        .write_string(name)
                        .write_string(base)
                        .write_u8(args.len() as u8);
                    for arg in args {
                        arg.write(w);
                    }
                }
            }
        }

        fn encoded_len(&self) -> usize {
            match self {
                UseShape::Plain(_, name) => 1 + 4 + name.len(),
                UseShape::Template(name, base, args) => {
                    1 + (4 + name.len())
                        + (4 + base.len())
                        + 1
                        + args.iter().map(UseShape::encoded_len).sum::<usize>()
                }
            }
        }

        fn depth(&self) -> usize {
            match self {
                UseShape::Plain(..) => 0,
                UseShape::Template(_, _, args) => {
                    args.iter().map(|a| a.depth() + 1).max().unwrap_or(0)
                }
            }
        }

        fn check(&self, du: &DeclarationUse<'_>) -> Result<(), TestCaseError> {
            match self {
                UseShape::Plain(tag, name) => {
                    prop_assert_eq!(du.tag, *tag);
                    prop_assert_eq!(du.name.as_bytes(), name.as_bytes());
                    prop_assert!(du.template.is_none());
                }
                UseShape::Template(name, base, args) => {
                    prop_assert_eq!(du.tag, TEMPLATE_INSTANCE_TAG);
                    prop_assert_eq!(du.name.as_bytes(), name.as_bytes());
                    let template = du.template.as_ref();
                    prop_assert!(template.is_some());
                    if let Some(template) = template {
                        prop_assert_eq!(template.base_type_name.as_bytes(), base.as_bytes());
                    }
                    prop_assert_eq!(du.arguments().len(), args.len());
                    for (decoded, shape) in du.arguments().iter().zip(args) {
                        shape.check(decoded)?;
                    }
                }
            }
            Ok(())
        }
    }

    fn use_shape() -> impl Strategy<Value = UseShape> {
        let leaf = plain_use().prop_map(|(tag, name)| UseShape::Plain(tag, name));
        leaf.prop_recursive(4, 32, 4, |inner| {
            ("[a-z_]{0,12}", "[a-z_]{0,12}", proptest::collection::vec(inner, 0..4))
                .prop_map(|(name, base, args)| UseShape::Template(name, base, args))
        })
    }

    proptest! {
        #[test]
        fn prop_declaration_use_consumes_declared_size(shape in use_shape()) {
            let mut w = Writer::new();
            shape.write(&mut w);
            // Trailing byte must not be consumed.
            w.write_u8(0xEE);

            let mut reader = Reader::new(w.as_bytes());
            let du = decode_declaration_use(&mut reader, &DecodeOptions::default()).unwrap();
            prop_assert_eq!(reader.position(), shape.encoded_len());
            prop_assert_eq!(du.depth(), shape.depth());
            shape.check(&du)?;
        }

        #[test]
        fn prop_plain_use_consumes_tag_and_name((tag, name) in plain_use()) {
            let mut w = Writer::new();
            write_plain_use(&mut w, tag, &name);

            let mut reader = Reader::new(w.as_bytes());
            let du = decode_declaration_use(&mut reader, &DecodeOptions::default()).unwrap();
            prop_assert_eq!(reader.position(), 1 + 4 + name.len());
            prop_assert!(du.arguments().is_empty());
        }
    }
}
