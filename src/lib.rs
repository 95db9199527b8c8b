pub mod cascade;
pub mod chunk;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod normalize;

pub use cascade::Cascade;
pub use config::Config;
pub use error::Error;

/// One confirmed misspelling with ranked suggested corrections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypoFinding {
    pub original: String,
    pub possible_options: Vec<String>,
}

/// Outcome of a full cascade run over the candidate set.
#[derive(Debug, Clone, Default)]
pub struct TypoReport {
    pub typos: Vec<TypoFinding>,
    /// Words no oracle could resolve (e.g. the spelling service was down).
    pub unresolved: Vec<String>,
}
