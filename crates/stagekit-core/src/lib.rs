//! Core identifiers and geometry shared by the stagekit crates.

mod geometry;

pub use geometry::{Axes, Axis, Point, Size};

/// Identifier of an actor slot in a stage arena.
pub type NodeId = usize;

/// Failure to address an actor in a stage arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageError {
    Missing { id: NodeId },
}

impl std::fmt::Display for StageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageError::Missing { id } => write!(f, "actor {id} missing"),
        }
    }
}

impl std::error::Error for StageError {}
