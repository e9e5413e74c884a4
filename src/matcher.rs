//! The top-level entry point: runs the top-down then bottom-up phases over
//! a pair of trees and returns the resulting mapping (spec §4).
//!
//! Grounded on `mergiraf`'s `tree_matcher.rs`, which drives its own
//! top-down/bottom-up passes back to back and logs phase timings with
//! `log::debug!` — the idiom this module borrows, since spec.md has no
//! observability requirements of its own but SPEC_FULL.md's ambient-stack
//! section asks for the same logging texture throughout.

use std::time::Instant;

use crate::{bottom_up_matcher::bottom_up_match, config::MatchConfig, mappings::Mappings, top_down_matcher::top_down_match, tree::Tree};

/// The result of matching two trees: the mapping itself, plus the counts
/// needed to report a match rate without re-walking both trees.
#[derive(Debug)]
pub struct Matching {
    pub mappings: Mappings,
    pub src_size: usize,
    pub dst_size: usize,
}

impl Matching {
    /// The fraction of `src` nodes that ended up mapped, in `[0, 1]`. `0`
    /// for an empty source tree rather than a division by zero.
    pub fn match_rate(&self) -> f64 {
        if self.src_size == 0 {
            0.0
        } else {
            self.mappings.len() as f64 / self.src_size as f64
        }
    }
}

/// Matches `src` against `dst`, running the top-down phase followed by the
/// bottom-up phase, under `config`.
pub fn match_trees(src: &Tree, dst: &Tree, config: &MatchConfig) -> Matching {
    let mut mappings = Mappings::new(src.size(), dst.size());

    if src.size() == 0 || dst.size() == 0 {
        return Matching {
            mappings,
            src_size: src.size(),
            dst_size: dst.size(),
        };
    }

    let top_down_start = Instant::now();
    top_down_match(src, dst, &mut mappings, config.min_height);
    log::debug!(
        "top-down matching: {} pairs in {:?}",
        mappings.len(),
        top_down_start.elapsed()
    );

    let bottom_up_start = Instant::now();
    bottom_up_match(src, dst, &mut mappings, config);
    log::debug!(
        "bottom-up matching: {} total pairs after {:?}",
        mappings.len(),
        bottom_up_start.elapsed()
    );

    Matching {
        mappings,
        src_size: src.size(),
        dst_size: dst.size(),
    }
}
