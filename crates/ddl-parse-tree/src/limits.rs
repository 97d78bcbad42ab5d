//! Wire constants and decoding guards.

/// Signature preceding every parse tree (big-endian `0xCD652312`).
pub const MAGIC: [u8; 4] = [0xCD, 0x65, 0x23, 0x12];

/// Declaration-use tag that carries template arguments.
pub const TEMPLATE_INSTANCE_TAG: u8 = 18;

/// Reserved bytes between the signature and the version quad.
pub const TREE_RESERVED_LEN: usize = 1;

/// Default bound on nested template arguments in a declaration use.
pub const DEFAULT_MAX_DECLARATION_USE_DEPTH: usize = 32;

/// Default bound on namespaces nested through elements.
pub const DEFAULT_MAX_NAMESPACE_DEPTH: usize = 64;

/// Upper bound on capacity reserved up front from an untrusted count.
pub const MAX_PREALLOCATION: usize = 1024;
