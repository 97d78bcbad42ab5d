//! Lists the DDL parse trees found in a binary image.

use std::fs;

use ddl_parse_tree::{names_of_kind, scan, ElementKind, TreeSummary};

fn main() {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: decode_file <image>");
        std::process::exit(2);
    };

    let data = match fs::read(&path) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("failed to read {path}: {e}");
            std::process::exit(1);
        }
    };
    println!("Reading: {path} ({} bytes)", data.len());

    for (i, found) in scan(&data).iter().enumerate() {
        println!("\n=== Tree {i} at {:#x} ===", found.signature_offset);
        println!("Version: {}", found.tree.version());
        println!("Bytes: {}", found.end_offset - found.signature_offset);
        if let Some(err) = &found.error {
            println!("Stopped: {err}");
        }

        let summary = TreeSummary::of(&found.tree);
        println!("Elements: {} (max depth {})", summary.total_elements, summary.max_depth);
        for (kind, count) in summary.counts() {
            println!("  {:<24} {count}", kind.name());
        }

        for protocol in names_of_kind(&found.tree, ElementKind::ProtocolDeclaration) {
            println!("Protocol: {protocol}");
        }
    }
}
