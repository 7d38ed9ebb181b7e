use super::*;
use crate::test_support::ScriptedEntropy;
use rand::{SeedableRng, rngs::SmallRng};

fn assert_walk_is_well_formed(walk: &Walk, bounds: GridBounds) {
    assert!(!walk.path.is_empty());
    let mut prev_dir: Option<Direction> = None;
    for pair in walk.path.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let dx = (b.x - a.x).abs();
        let dy = (b.y - a.y).abs();
        assert_eq!(dx + dy, 1, "non-orthogonal or non-unit step {a:?} -> {b:?}");

        let dir = Direction::between(a, b).unwrap();
        if let Some(p) = prev_dir {
            assert_ne!(dir, p.reverse(), "walk reversed at {a:?}");
        }
        prev_dir = Some(dir);
    }
    for p in &walk.path {
        assert!(bounds.contains(*p), "{p:?} escaped {bounds:?}");
    }
    assert_eq!(walk.last_direction, prev_dir);
}

#[test]
fn random_walks_are_orthogonal_non_reversing_and_bounded() {
    let mut rng = SmallRng::seed_from_u64(0xC0FFEE);
    for (cols, rows) in [(10, 10), (1, 1), (3, 40), (64, 2), (0, 5)] {
        let bounds = GridBounds::new(cols, rows);
        for _ in 0..500 {
            let origin = GridPoint::new(
                rng.index(cols as usize + 3) as i32 - 1,
                rng.index(rows as usize + 3) as i32 - 1,
            );
            let forced = if rng.chance(0.5) {
                Some(Direction::ALL[rng.index(4)])
            } else {
                None
            };
            let walk = generate_path(origin, bounds, forced, &mut rng);
            assert_walk_is_well_formed(&walk, bounds);
            assert!(walk.path.len() <= MAX_WALK_STEPS + 1);
        }
    }
}

#[test]
fn origin_is_clamped_into_the_grid() {
    let mut rng = ScriptedEntropy::always().with_indices([0]);
    let walk = generate_path(
        GridPoint::new(50, -3),
        GridBounds::new(10, 10),
        None,
        &mut rng,
    );
    assert_eq!(walk.path[0], GridPoint::new(10, 0));
}

#[test]
fn forced_first_step_out_of_bounds_yields_unusable_walk() {
    let mut rng = ScriptedEntropy::always();
    let walk = generate_path(
        GridPoint::new(0, 0),
        GridBounds::new(10, 10),
        Some(Direction::West),
        &mut rng,
    );
    assert_eq!(walk.path, vec![GridPoint::new(0, 0)]);
    assert_eq!(walk.last_direction, None);
    assert!(!walk.is_usable());
}

#[test]
fn forced_east_walk_runs_straight_to_the_edge() {
    // Ten requested steps, and every pick takes the first valid direction (East before South).
    let mut rng = ScriptedEntropy::always().with_indices([9]);
    let walk = generate_path(
        GridPoint::new(0, 0),
        GridBounds::new(10, 10),
        Some(Direction::East),
        &mut rng,
    );
    let expected: Vec<GridPoint> = (0..=10).map(|x| GridPoint::new(x, 0)).collect();
    assert_eq!(walk.path, expected);
    assert_eq!(walk.last_direction, Some(Direction::East));
}

#[test]
fn walk_stops_early_when_no_move_remains() {
    // A single-row grid: once the walker reaches the east edge only West (a reversal) is left.
    let mut rng = ScriptedEntropy::always().with_indices([MAX_WALK_STEPS - 1]);
    let walk = generate_path(
        GridPoint::new(0, 0),
        GridBounds::new(10, 0),
        Some(Direction::East),
        &mut rng,
    );
    assert_eq!(walk.path.len(), 11);
    assert_eq!(*walk.path.last().unwrap(), GridPoint::new(10, 0));
}

#[test]
fn single_cell_grid_without_moves_is_a_bare_origin() {
    let mut rng = ScriptedEntropy::always();
    let walk = generate_path(GridPoint::new(0, 0), GridBounds::new(0, 0), None, &mut rng);
    assert_eq!(walk.path.len(), 1);
    assert!(!walk.is_usable());
}

#[test]
fn valid_directions_drop_only_the_reverse() {
    assert_eq!(valid_directions(None), Direction::ALL.to_vec());
    assert_eq!(
        valid_directions(Some(Direction::North)),
        vec![Direction::North, Direction::East, Direction::West]
    );
    assert_eq!(
        valid_directions(Some(Direction::West)),
        vec![Direction::North, Direction::South, Direction::West]
    );
}

#[test]
fn branch_directions_respect_probability_extremes() {
    let mut rng = SmallRng::seed_from_u64(3);
    assert!(branch_directions(Some(Direction::East), 0.0, &mut rng).is_empty());
    assert_eq!(
        branch_directions(Some(Direction::East), 1.0, &mut rng),
        valid_directions(Some(Direction::East))
    );
}

#[test]
fn branch_directions_sample_each_candidate_independently() {
    let mut rng = ScriptedEntropy::never().with_units([0.1, 0.9, 0.15]);
    let dirs = branch_directions(Some(Direction::South), DEFAULT_BRANCH_PROBABILITY, &mut rng);
    // Candidates are East, South, West; only the first and third rolls pass.
    assert_eq!(dirs, vec![Direction::East, Direction::West]);
}

#[test]
fn evolve_hue_starts_amber_and_drifts_within_bounds() {
    let mut rng = SmallRng::seed_from_u64(11);
    assert_eq!(evolve_hue(None, &mut rng), BASE_HUE);
    for _ in 0..1000 {
        let parent = rng.unit() * 360.0;
        let child = evolve_hue(Some(parent), &mut rng);
        assert!((0.0..360.0).contains(&child));
        let diff = (child - parent + 540.0).rem_euclid(360.0) - 180.0;
        assert!(diff.abs() <= HUE_DRIFT + 1e-9, "drift {diff} too large");
    }
}

#[test]
fn evolve_hue_wraps_below_zero() {
    let mut rng = ScriptedEntropy::always().with_units([0.0]);
    let child = evolve_hue(Some(5.0), &mut rng);
    assert!((child - 350.0).abs() < 1e-9);
}
