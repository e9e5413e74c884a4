//! Parsing helpers shared by every module's unit tests.
//!
//! Grounded on `mergiraf`'s `test_utils.rs`, which likewise centralizes
//! "parse this source string with this grammar" so individual test modules
//! don't each reimplement a `tree_sitter::Parser` dance.

use tree_sitter::Parser;

use crate::{ast_adapter::tree_sitter_adapter::TreeSitterAdapter, tree::Tree, tree_builder};

/// Parses `source` as Rust and builds a [`Tree`] from it.
pub fn parse_rust(source: &str) -> Tree {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_rust_orchard::LANGUAGE.into())
        .expect("the rust grammar should load");
    let parsed = parser.parse(source, None).expect("parsing should not time out");
    let adapter = TreeSitterAdapter::new(&parsed, source);
    tree_builder::build(&adapter)
}

/// Parses `source` as C and builds a [`Tree`] from it.
pub fn parse_c(source: &str) -> Tree {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_c::LANGUAGE.into())
        .expect("the c grammar should load");
    let parsed = parser.parse(source, None).expect("parsing should not time out");
    let adapter = TreeSitterAdapter::new(&parsed, source);
    tree_builder::build(&adapter)
}

/// Parses `source` as JSON and builds a [`Tree`] from it.
pub fn parse_json(source: &str) -> Tree {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_json::LANGUAGE.into())
        .expect("the json grammar should load");
    let parsed = parser.parse(source, None).expect("parsing should not time out");
    let adapter = TreeSitterAdapter::new(&parsed, source);
    tree_builder::build(&adapter)
}
