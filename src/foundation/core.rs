pub use kurbo::{Point, Vec2};

/// Integer coordinate on an abstract unit grid.
///
/// Grid points become surface coordinates only once multiplied by a class cell size, so the
/// same point type serves every trace class.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbor one unit away in `dir`. Not bounds-checked.
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Surface position of this point on a grid with the given cell size.
    pub fn to_surface(self, cell_size: f64) -> Point {
        Point::new(f64::from(self.x) * cell_size, f64::from(self.y) * cell_size)
    }
}

/// One of the four orthogonal compass directions, encoded as ordinals `0..=3`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Direction {
    /// All directions in ordinal order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(usize::from(ordinal)).copied()
    }

    /// `(d + 2) mod 4`.
    pub fn reverse(self) -> Self {
        Self::ALL[usize::from((self.ordinal() + 2) % 4)]
    }

    /// Unit step in grid space. North is `-y` (surface rows grow downward).
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// Direction of travel from `from` to `to`, or `None` if the points coincide.
    ///
    /// For non-adjacent points the vertical component wins when moving north, matching the
    /// check order N, E, S, W.
    pub fn between(from: GridPoint, to: GridPoint) -> Option<Self> {
        if to.y < from.y {
            Some(Direction::North)
        } else if to.x > from.x {
            Some(Direction::East)
        } else if to.y > from.y {
            Some(Direction::South)
        } else if to.x < from.x {
            Some(Direction::West)
        } else {
            None
        }
    }
}

/// Measured drawing-surface size in device pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Extents {
    pub width: u32,
    pub height: u32,
}

impl Extents {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A surface with either dimension at zero cannot host a grid yet.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Inclusive grid bounds: valid points satisfy `0 <= x <= columns` and `0 <= y <= rows`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GridBounds {
    pub columns: u32,
    pub rows: u32,
}

impl GridBounds {
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Grid laid over a surface with the given cell size; at least one cell per axis.
    pub fn for_surface(extents: Extents, cell_size: f64) -> Self {
        let fit = |px: u32| -> u32 {
            if cell_size <= 0.0 || !cell_size.is_finite() {
                return 1;
            }
            ((f64::from(px) / cell_size).floor() as u32).max(1)
        };
        Self {
            columns: fit(extents.width),
            rows: fit(extents.height),
        }
    }

    pub fn contains(self, p: GridPoint) -> bool {
        p.x >= 0
            && p.y >= 0
            && i64::from(p.x) <= i64::from(self.columns)
            && i64::from(p.y) <= i64::from(self.rows)
    }

    /// Clamp a point into the bounds.
    pub fn clamp(self, p: GridPoint) -> GridPoint {
        let max_x = i32::try_from(self.columns).unwrap_or(i32::MAX);
        let max_y = i32::try_from(self.rows).unwrap_or(i32::MAX);
        GridPoint {
            x: p.x.clamp(0, max_x),
            y: p.y.clamp(0, max_y),
        }
    }
}

/// Straight (non-premultiplied) sRGB color with 8-bit channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    pub fn from_array([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }

    /// Premultiplied channel bytes (r,g,b multiplied by a).
    pub fn to_premul(self) -> [u8; 4] {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        [
            premul(self.r, self.a),
            premul(self.g, self.a),
            premul(self.b, self.a),
            self.a,
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
