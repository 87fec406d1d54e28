//! Negotiable axes and the 2D size/point types they index.

/// One of the two negotiable spatial dimensions. Depth is never negotiated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Width,
    Height,
}

impl Axis {
    /// Both axes, in the default resolution order.
    pub const BOTH: [Axis; 2] = [Axis::Width, Axis::Height];

    /// Returns the other axis.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Axis::Width => Axis::Height,
            Axis::Height => Axis::Width,
        }
    }

    /// Index of this axis into per-axis arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::Width => 0,
            Axis::Height => 1,
        }
    }
}

/// Set of axes a property setter applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Axes(u8);

impl Axes {
    pub const WIDTH: Axes = Axes(0b01);
    pub const HEIGHT: Axes = Axes(0b10);
    pub const ALL: Axes = Axes(0b11);

    /// Returns true if `axis` is part of this set.
    #[inline]
    pub fn contains(self, axis: Axis) -> bool {
        self.0 & Axes::from(axis).0 != 0
    }

    /// Iterates the axes in this set in canonical order.
    pub fn iter(self) -> impl Iterator<Item = Axis> {
        Axis::BOTH.into_iter().filter(move |axis| self.contains(*axis))
    }
}

impl From<Axis> for Axes {
    fn from(axis: Axis) -> Self {
        match axis {
            Axis::Width => Axes::WIDTH,
            Axis::Height => Axes::HEIGHT,
        }
    }
}

impl std::ops::BitOr for Axes {
    type Output = Axes;

    fn bitor(self, rhs: Axes) -> Axes {
        Axes(self.0 | rhs.0)
    }
}

/// A width/height pair.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Component for the given axis.
    #[inline]
    pub fn get(self, axis: Axis) -> f32 {
        match axis {
            Axis::Width => self.width,
            Axis::Height => self.height,
        }
    }

    /// Sets the component for the given axis.
    #[inline]
    pub fn set(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::Width => self.width = value,
            Axis::Height => self.height = value,
        }
    }
}

/// A 2D position, used for a child's offset within its parent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component along the given axis (x for width, y for height).
    #[inline]
    pub fn get(self, axis: Axis) -> f32 {
        match axis {
            Axis::Width => self.x,
            Axis::Height => self.y,
        }
    }
}

#[cfg(test)]
#[path = "tests/geometry_tests.rs"]
mod tests;
