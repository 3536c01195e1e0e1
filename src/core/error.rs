//! Error types for the match engine.

use thiserror::Error;

use super::entity::CardHandle;

/// A visual sub-part a card instance needs before it can be shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisualPart {
    Front,
    Back,
}

impl std::fmt::Display for VisualPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VisualPart::Front => write!(f, "front"),
            VisualPart::Back => write!(f, "back"),
        }
    }
}

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Invalid grid size: {rows}x{cols}")]
    InvalidGrid { rows: u32, cols: u32 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{card} is missing its {part} visual")]
    MissingVisual { card: CardHandle, part: VisualPart },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MatchError>;
