use thiserror::Error;

/// The three error kinds the core can surface.
///
/// `InvariantViolation` indicates a bug in this crate (a broken postorder,
/// parent or mapping invariant) rather than anything wrong with the input;
/// it is kept distinct from `Input` so that callers can tell "your files are
/// fine, we have a bug" apart from "fix your input".
#[derive(Debug, Error)]
pub enum Error {
    /// The ASTs could not be produced: wrong number of inputs, a file could
    /// not be read, or the parser failed to produce a tree without errors.
    #[error("input error: {0}")]
    Input(String),

    /// An internal consistency check about postorder numbering, parent
    /// links or the one-to-one mapping invariant failed.
    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),

    /// A label lookup encountered an adapter-reported kind that the label
    /// strategy does not cover.
    #[error("unhandled node kind: {0}")]
    UnhandledKind(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
