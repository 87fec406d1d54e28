use stagekit_core::NodeId;

/// Recoverable conditions detected during a negotiation pass.
///
/// None of these abort the pass; the offending actor degrades (natural-size
/// fallback or zero) and the condition is reported as a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Both axes of one actor derive from each other, or a content-fitting
    /// axis reached back into an axis that waits on the same ancestor's
    /// allocation.
    CyclicDependency { id: NodeId },
    /// A policy asked for a content-intrinsic size the actor cannot supply.
    MissingNaturalSize { id: NodeId },
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutError::CyclicDependency { id } => {
                write!(f, "actor {id}: cyclic size dependency, using natural size")
            }
            LayoutError::MissingNaturalSize { id } => {
                write!(f, "actor {id}: no natural size available, using 0")
            }
        }
    }
}

impl std::error::Error for LayoutError {}
