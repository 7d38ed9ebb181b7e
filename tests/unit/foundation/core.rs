use super::*;

#[test]
fn reverse_is_two_steps_around_the_compass() {
    assert_eq!(Direction::North.reverse(), Direction::South);
    assert_eq!(Direction::East.reverse(), Direction::West);
    assert_eq!(Direction::South.reverse(), Direction::North);
    assert_eq!(Direction::West.reverse(), Direction::East);
    for d in Direction::ALL {
        assert_eq!(d.reverse().reverse(), d);
    }
}

#[test]
fn ordinals_roundtrip_and_reject_out_of_range() {
    for d in Direction::ALL {
        assert_eq!(Direction::from_ordinal(d.ordinal()), Some(d));
    }
    assert_eq!(Direction::from_ordinal(4), None);
}

#[test]
fn between_recovers_the_step_direction() {
    let origin = GridPoint::new(3, 3);
    for d in Direction::ALL {
        assert_eq!(Direction::between(origin, origin.step(d)), Some(d));
    }
    assert_eq!(Direction::between(origin, origin), None);
}

#[test]
fn bounds_are_inclusive_on_both_ends() {
    let b = GridBounds::new(10, 5);
    assert!(b.contains(GridPoint::new(0, 0)));
    assert!(b.contains(GridPoint::new(10, 5)));
    assert!(!b.contains(GridPoint::new(11, 5)));
    assert!(!b.contains(GridPoint::new(-1, 0)));
    assert_eq!(b.clamp(GridPoint::new(-4, 9)), GridPoint::new(0, 5));
}

#[test]
fn grid_for_surface_floors_and_keeps_one_cell() {
    let b = GridBounds::for_surface(Extents::new(410, 95), 40.0);
    assert_eq!(b, GridBounds::new(10, 2));

    let tiny = GridBounds::for_surface(Extents::new(5, 5), 40.0);
    assert_eq!(tiny, GridBounds::new(1, 1));
}

#[test]
fn empty_extents() {
    assert!(Extents::new(0, 0).is_empty());
    assert!(Extents::new(100, 0).is_empty());
    assert!(!Extents::new(1, 1).is_empty());
}

#[test]
fn premul_scales_color_channels() {
    assert_eq!(Rgba8::new(255, 128, 0, 255).to_premul(), [255, 128, 0, 255]);
    assert_eq!(Rgba8::new(255, 255, 255, 0).to_premul(), [0, 0, 0, 0]);
    assert_eq!(Rgba8::new(200, 100, 50, 128).to_premul(), [100, 50, 25, 128]);
}
