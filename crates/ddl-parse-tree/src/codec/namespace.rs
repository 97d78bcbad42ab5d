//! Namespace decoding.

use crate::codec::element::decode_element;
use crate::codec::primitives::Reader;
use crate::codec::tree::DecodeOptions;
use crate::error::DecodeError;
use crate::limits::MAX_PREALLOCATION;
use crate::model::Namespace;

/// Decodes a namespace nested `depth` levels below the root.
pub fn decode_namespace<'a>(
    reader: &mut Reader<'a>,
    options: &DecodeOptions,
    depth: usize,
) -> Result<Namespace<'a>, DecodeError> {
    let mut namespace = Namespace::new();
    decode_namespace_into(reader, options, depth, &mut namespace)?;
    Ok(namespace)
}

/// Decodes a namespace into `namespace`, pushing each element once it is
/// complete. On error, the elements decoded so far stay in `namespace`.
pub fn decode_namespace_into<'a>(
    reader: &mut Reader<'a>,
    options: &DecodeOptions,
    depth: usize,
    namespace: &mut Namespace<'a>,
) -> Result<(), DecodeError> {
    if depth > options.max_namespace_depth {
        return Err(DecodeError::DepthExceeded {
            context: "namespace",
            offset: reader.position(),
            max: options.max_namespace_depth,
        });
    }

    let count = reader.read_count("namespace.element_count")?;
    namespace.elements.reserve(count.min(MAX_PREALLOCATION));
    for _ in 0..count {
        let element = decode_element(reader, options, depth)?;
        namespace.elements.push(element);
    }
    Ok(())
}
