/// Per-axis rule describing how an actor's size for that axis is derived.
///
/// The set is closed; negotiation dispatches over it with a plain `match`
/// rather than virtual calls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResizePolicy {
    /// The last explicitly assigned size; negotiation never changes it.
    Fixed,
    /// The actor's content-intrinsic size.
    #[default]
    UseNaturalSize,
    /// Exactly the parent's allocation for this axis.
    FillToParent,
    /// The parent's allocation multiplied by a per-axis factor.
    SizeRelativeToParent,
    /// The parent's allocation plus a per-axis offset.
    SizeFixedOffsetFromParent,
    /// The union extent of the children along this axis.
    FitToChildren,
    /// Derived from the resolved value of the actor's other axis.
    DimensionDependency,
}

impl ResizePolicy {
    /// True if this axis cannot be resolved before the parent's allocation
    /// is final.
    #[inline]
    pub fn depends_on_parent(self) -> bool {
        matches!(
            self,
            ResizePolicy::FillToParent
                | ResizePolicy::SizeRelativeToParent
                | ResizePolicy::SizeFixedOffsetFromParent
        )
    }

    /// True if this axis is computed from content (the measure pass handles
    /// it before allocation is known).
    #[inline]
    pub fn is_content_driven(self) -> bool {
        matches!(
            self,
            ResizePolicy::UseNaturalSize | ResizePolicy::FitToChildren
        )
    }

    /// True if this axis reads the resolved children extents.
    #[inline]
    pub fn depends_on_children(self) -> bool {
        matches!(self, ResizePolicy::FitToChildren)
    }

    /// True if this axis resolves from the actor's other axis.
    #[inline]
    pub fn derives_from_other_axis(self) -> bool {
        matches!(self, ResizePolicy::DimensionDependency)
    }
}
