/// Tuning knobs for the matcher, threaded through every phase instead of
/// being read from globals (see spec §6.3).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchConfig {
    /// The top-down matcher stops descending once both priority-list
    /// heights are at or below this value.
    pub min_height: i32,
    /// A bottom-up candidate is only linked if its dice coefficient with
    /// the node being matched is strictly greater than this.
    pub min_dice: f64,
    /// Zhang-Shasha is only invoked when both subtrees have fewer than
    /// this many descendants.
    pub max_size: i32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            min_height: 2,
            min_dice: 0.2,
            max_size: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let config = MatchConfig::default();
        assert_eq!(config.min_height, 2);
        assert_eq!(config.min_dice, 0.2);
        assert_eq!(config.max_size, 100);
    }
}
