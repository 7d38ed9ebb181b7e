use crate::{
    foundation::color::wrap_hue,
    foundation::core::{Direction, GridBounds, GridPoint},
    walk::entropy::Entropy,
};

/// Upper bound on the number of steps a single walk requests.
pub const MAX_WALK_STEPS: usize = 30;

/// Per-direction branch probability every built-in class profile starts with.
pub const DEFAULT_BRANCH_PROBABILITY: f64 = 0.2;

/// Hue assigned to root lineages ("amber").
pub const BASE_HUE: f64 = 38.0;

/// Maximum hue drift applied by [`evolve_hue`], in degrees either way.
pub const HUE_DRIFT: f64 = 15.0;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Result of a random walk.
pub struct Walk {
    /// Visited points, origin first. Always non-empty.
    pub path: Vec<GridPoint>,
    /// Direction of the final step, `None` if no step was taken.
    pub last_direction: Option<Direction>,
}

impl Walk {
    /// A walk is usable as a trace only if it moved at least once.
    pub fn is_usable(&self) -> bool {
        self.path.len() >= 2
    }
}

/// Generate a randomized orthogonal walk on the inclusive grid `[0, columns] x [0, rows]`.
///
/// The walk requests `1..=30` steps, never reverses the previous step and never leaves the
/// grid. It ends early when no move remains. A `forced_first` step that would leave the grid
/// yields the bare origin, which callers must discard.
pub fn generate_path<E: Entropy + ?Sized>(
    origin: GridPoint,
    bounds: GridBounds,
    forced_first: Option<Direction>,
    rng: &mut E,
) -> Walk {
    let mut cursor = bounds.clamp(origin);
    let mut path = Vec::with_capacity(MAX_WALK_STEPS + 1);
    path.push(cursor);

    let steps = 1 + rng.index(MAX_WALK_STEPS);
    let mut heading = None;

    if let Some(dir) = forced_first {
        let next = cursor.step(dir);
        if !bounds.contains(next) {
            return Walk {
                path,
                last_direction: None,
            };
        }
        cursor = next;
        path.push(cursor);
        heading = Some(dir);
    }

    let taken = path.len() - 1;
    for _ in taken..steps {
        let moves: Vec<Direction> = valid_directions(heading)
            .into_iter()
            .filter(|&d| bounds.contains(cursor.step(d)))
            .collect();
        if moves.is_empty() {
            break;
        }

        let dir = moves[rng.index(moves.len())];
        cursor = cursor.step(dir);
        path.push(cursor);
        heading = Some(dir);
    }

    Walk {
        path,
        last_direction: heading,
    }
}

/// All four directions minus the reverse of `arrival`.
pub fn valid_directions(arrival: Option<Direction>) -> Vec<Direction> {
    let forbidden = arrival.map(Direction::reverse);
    Direction::ALL
        .into_iter()
        .filter(|&d| Some(d) != forbidden)
        .collect()
}

/// Each valid direction kept independently with `probability`.
pub fn branch_directions<E: Entropy + ?Sized>(
    arrival: Option<Direction>,
    probability: f64,
    rng: &mut E,
) -> Vec<Direction> {
    valid_directions(arrival)
        .into_iter()
        .filter(|_| rng.chance(probability))
        .collect()
}

/// Root lineages start at [`BASE_HUE`]; children drift by up to [`HUE_DRIFT`] degrees.
pub fn evolve_hue<E: Entropy + ?Sized>(parent_hue: Option<f64>, rng: &mut E) -> f64 {
    match parent_hue {
        None => BASE_HUE,
        Some(hue) => wrap_hue(hue + rng.jitter(HUE_DRIFT)),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/walk/generator.rs"]
mod tests;
