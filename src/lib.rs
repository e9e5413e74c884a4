//! Matches and diffs abstract syntax trees across two versions of a source
//! file.
//!
//! ## Overview
//!
//! This crate builds a [`tree::Tree`] from each of two ASTs, computes a
//! one-to-one node [`mappings::Mappings`] between them with a two-phase
//! GumTree-style algorithm (top-down isomorphic-subtree matching, then
//! bottom-up container matching refined by an exact Zhang-Shasha
//! tree-edit-distance search), and turns that mapping into an
//! [`edit_script::Edit`] script of updates, inserts, moves and deletes.
//!
//! AST production is abstracted behind [`ast_adapter::AstAdapter`]; the
//! bundled [`ast_adapter::tree_sitter_adapter::TreeSitterAdapter`] is the
//! only producer this crate ships, but the matching core never depends on
//! `tree-sitter` directly.
//!
//! ## Using as a library
//!
//! The matching core is usable independently of the bundled CLI: build two
//! trees with [`tree_builder::build`], match them with
//! [`matcher::match_trees`], and render the result with
//! [`edit_script::build_edit_script`].

pub mod ast_adapter;
pub mod bottom_up_matcher;
pub mod config;
pub mod edit_script;
pub mod error;
pub mod mappings;
pub mod matcher;
pub mod matching_rules;
pub mod node;
pub mod priority_list;
pub mod subtree_view;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod top_down_matcher;
pub mod tree;
pub mod tree_builder;
pub mod zhang_shasha;

use ast_adapter::tree_sitter_adapter::TreeSitterAdapter;
use config::MatchConfig;
use edit_script::Edit;
use error::{Error, Result};
use tree::Tree;
use tree_sitter::{Language, Parser};

/// Parses `source` with `language` and builds a [`Tree`] from it.
///
/// Returns [`Error::Input`] if the parser fails to produce a tree, or if
/// the resulting parse contains an error-recovery node (spec §4.1's "a
/// parse with syntax errors is rejected rather than matched").
pub fn parse(language: Language, source: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| Error::Input(format!("unsupported grammar: {e}")))?;
    let parsed = parser
        .parse(source, None)
        .ok_or_else(|| Error::Input("parser produced no tree".to_string()))?;
    let adapter = TreeSitterAdapter::new(&parsed, source);
    if adapter.has_error() {
        return Err(Error::Input("source has a syntax error".to_string()));
    }
    Ok(tree_builder::build(&adapter))
}

/// Matches `src` against `dst` and returns the edit script transforming
/// one into the other: the convenience entry point most callers want
/// instead of driving [`matcher::match_trees`] and
/// [`edit_script::build_edit_script`] by hand.
pub fn diff(src: &Tree, dst: &Tree, config: &MatchConfig) -> Vec<Edit> {
    let matching = matcher::match_trees(src, dst, config);
    edit_script::build_edit_script(src, dst, &matching.mappings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_syntax_errors() {
        let result = parse(tree_sitter_rust_orchard::LANGUAGE.into(), "fn f( {");
        assert!(result.is_err());
    }

    #[test]
    fn parse_and_diff_round_trip() {
        let src = parse(tree_sitter_rust_orchard::LANGUAGE.into(), "fn f() { 1 + 2 }").unwrap();
        let dst = parse(tree_sitter_rust_orchard::LANGUAGE.into(), "fn f() { 1 + 3 }").unwrap();
        let edits = diff(&src, &dst, &MatchConfig::default());
        assert_eq!(edits.len(), 1);
    }
}
