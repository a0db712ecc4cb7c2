use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in either design space or render space.
///
/// Missing input fields default to zero, so an absent rectangle is a zero-area
/// box at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// True when the rectangle covers no area.
    pub fn is_empty(&self) -> bool {
        self.area() <= 0.0
    }

    /// Euclidean distance between the top-left corners of two rectangles.
    pub fn corner_distance(&self, other: &Bounds) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Edge-to-edge distance; zero when the rectangles touch or overlap.
    pub fn gap_to(&self, other: &Bounds) -> f64 {
        let dx = (other.x - self.right()).max(self.x - other.right()).max(0.0);
        let dy = (other.y - self.bottom()).max(self.y - other.bottom()).max(0.0);
        dx.hypot(dy)
    }

    pub fn intersects(&self, other: &Bounds) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Bounds) -> Bounds {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Bounds::new(x, y, self.right().max(other.right()) - x, self.bottom().max(other.bottom()) - y)
    }

    /// Bounding box of a set of rectangles, `None` for an empty set.
    pub fn enclosing<'a, I>(items: I) -> Option<Bounds>
    where
        I: IntoIterator<Item = &'a Bounds>,
    {
        items.into_iter().fold(None, |acc, b| match acc {
            None => Some(*b),
            Some(current) => Some(current.union(b)),
        })
    }
}

/// Coordinate axis used by alignment bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Bucket on `x` (columns); members are ordered by `y`.
    X,
    /// Bucket on `y` (rows); members are ordered by `x`.
    Y,
}

impl Axis {
    pub fn coordinate(self, bounds: &Bounds) -> f64 {
        match self {
            Axis::X => bounds.x,
            Axis::Y => bounds.y,
        }
    }

    pub fn orthogonal(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// Anything the spatial primitives can reason about.
pub trait HasBounds {
    fn bounds(&self) -> &Bounds;
}

impl HasBounds for Bounds {
    fn bounds(&self) -> &Bounds {
        self
    }
}

impl<T: HasBounds + ?Sized> HasBounds for &T {
    fn bounds(&self) -> &Bounds {
        (**self).bounds()
    }
}
