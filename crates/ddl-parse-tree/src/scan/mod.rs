//! Signature scanning over opaque binary blobs.
//!
//! Candidates are found byte by byte, not on aligned boundaries, and every
//! match gets its own decode attempt. A failed attempt never stops the scan;
//! it is recorded with whatever prefix of the tree was decoded.
//!
//! Scanning resumes right after each matched signature rather than after
//! the decoded tree, so a signature that happens to occur inside a tree's
//! string payload produces an extra (usually failing) attempt.

use sha2::{Digest, Sha256};

use crate::codec::{decode_tree_into, DecodeOptions, Reader};
use crate::error::DecodeError;
use crate::limits::MAGIC;
use crate::model::Tree;

/// Outcome of decoding the tree that follows one signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedTree<'a> {
    /// Offset of the signature in the scanned input.
    pub signature_offset: usize,
    /// Offset one past the last byte consumed by the attempt.
    pub end_offset: usize,
    /// The tree, fully or partially populated.
    pub tree: Tree<'a>,
    /// Why decoding stopped, if it did not complete.
    pub error: Option<DecodeError>,
    bytes: &'a [u8],
}

impl<'a> ScannedTree<'a> {
    /// Returns true if the tree decoded completely.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Offset of the first byte after the signature.
    pub fn body_offset(&self) -> usize {
        self.signature_offset + MAGIC.len()
    }

    /// Signature plus every byte the decode consumed.
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// SHA-256 over [`bytes`](Self::bytes), for spotting the same tree
    /// embedded more than once.
    pub fn fingerprint(&self) -> [u8; 32] {
        Sha256::digest(self.bytes).into()
    }

    /// Converts into a plain result, dropping any partial tree on failure.
    pub fn into_result(self) -> Result<Tree<'a>, DecodeError> {
        match self.error {
            None => Ok(self.tree),
            Some(err) => Err(err),
        }
    }
}

/// Returns every offset where the signature occurs, in ascending order.
///
/// No decoding happens here; the offsets can be handed to independent
/// decoders.
pub fn find_signatures(input: &[u8]) -> Vec<usize> {
    input
        .windows(MAGIC.len())
        .enumerate()
        .filter(|(_, window)| *window == MAGIC)
        .map(|(offset, _)| offset)
        .collect()
}

/// Lazily scans `input`, yielding one [`ScannedTree`] per signature.
///
/// Stopping iteration cancels the scan between candidates; a single tree
/// decode is never interrupted.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    input: &'a [u8],
    options: DecodeOptions,
    next: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner with default decode options.
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_options(input, DecodeOptions::default())
    }

    pub fn with_options(input: &'a [u8], options: DecodeOptions) -> Self {
        Self {
            input,
            options,
            next: 0,
        }
    }

    /// Offset the next candidate search starts from.
    pub fn position(&self) -> usize {
        self.next
    }

    fn find_next(&self) -> Option<usize> {
        let rest = self.input.get(self.next..)?;
        rest.windows(MAGIC.len())
            .position(|window| window == MAGIC)
            .map(|pos| self.next + pos)
    }

    fn attempt(&self, signature_offset: usize) -> ScannedTree<'a> {
        let body_offset = signature_offset + MAGIC.len();
        let mut tree = Tree::default();

        let (result, end_offset) = match Reader::at(self.input, body_offset) {
            Ok(mut reader) => {
                let result = decode_tree_into(&mut reader, &self.options, &mut tree);
                (result, reader.position())
            }
            Err(err) => (Err(err), body_offset),
        };

        match &result {
            Ok(()) => log::debug!(
                "decoded tree {} at {:#x}..{:#x} ({} root elements)",
                tree.version(),
                signature_offset,
                end_offset,
                tree.root.len()
            ),
            Err(err) => log::warn!("candidate tree at {:#x} rejected: {}", signature_offset, err),
        }

        ScannedTree {
            signature_offset,
            end_offset,
            tree,
            error: result.err(),
            bytes: &self.input[signature_offset..end_offset],
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = ScannedTree<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let signature_offset = self.find_next()?;
        log::debug!("signature at {:#x}", signature_offset);
        self.next = signature_offset + MAGIC.len();
        Some(self.attempt(signature_offset))
    }
}

/// Scans `input` with default options and collects every attempt.
pub fn scan(input: &[u8]) -> Vec<ScannedTree<'_>> {
    scan_with_options(input, DecodeOptions::default())
}

/// Scans `input` and collects every attempt, successful or not.
pub fn scan_with_options(input: &[u8], options: DecodeOptions) -> Vec<ScannedTree<'_>> {
    let attempts: Vec<_> = Scanner::with_options(input, options).collect();
    let decoded = attempts.iter().filter(|a| a.is_ok()).count();
    log::info!(
        "scanned {} bytes: {} candidates, {} decoded, {} failed",
        input.len(),
        attempts.len(),
        decoded,
        attempts.len() - decoded
    );
    attempts
}
