use super::*;
use crate::test_support::ScriptedEntropy;
use crate::walk::generator::{BASE_HUE, DEFAULT_BRANCH_PROBABILITY};

#[test]
fn table_resolves_each_class_to_its_own_profile() {
    let table = ClassTable::default();
    assert_eq!(table.profile(TraceClass::Standard).cell_size, 40.0);
    assert_eq!(table.profile(TraceClass::Meta).cell_size, 120.0);
    assert_eq!(table.profile(TraceClass::Micro).cell_size, 10.0);
    assert!(table.profile(TraceClass::Micro).root_spawn.is_none());
    table.validate().unwrap();
}

#[test]
fn built_in_profiles_share_the_default_branch_probability() {
    let table = ClassTable::default();
    for class in TraceClass::ALL {
        assert_eq!(
            table.profile(class).branch_probability,
            DEFAULT_BRANCH_PROBABILITY
        );
    }
    assert_eq!(DEFAULT_BRANCH_PROBABILITY, 0.2);
}

#[test]
fn only_standard_and_meta_seed_micro() {
    assert!(TraceClass::Standard.seeds_micro());
    assert!(TraceClass::Meta.seeds_micro());
    assert!(!TraceClass::Micro.seeds_micro());
}

#[test]
fn zoom_scales_geometry_only() {
    let p = ClassProfile::standard().scaled(2.0);
    assert_eq!(p.cell_size, 80.0);
    assert_eq!(p.tail_length, 320.0);
    assert_eq!(p.head_radius, 3.0);
    assert_eq!(p.speed, ClassProfile::standard().speed);
    assert_eq!(p.fade_out_ms, ClassProfile::standard().fade_out_ms);
}

#[test]
fn hue_policies_are_per_class() {
    let mut rng = ScriptedEntropy::always().with_units([0.5, 0.5, 0.5]);
    assert_eq!(TraceClass::Standard.pick_hue(None, &mut rng), BASE_HUE);
    // jitter(0.5) is zero, so band centres come through unchanged.
    assert_eq!(TraceClass::Meta.pick_hue(Some(10.0), &mut rng), META_HUE);
    assert_eq!(TraceClass::Micro.pick_hue(None, &mut rng), MICRO_FALLBACK_HUE);
    assert_eq!(TraceClass::Micro.pick_hue(Some(100.0), &mut rng), 100.0);
}

#[test]
fn micro_hue_wraps_around_zero() {
    let mut rng = ScriptedEntropy::always().with_units([0.0]);
    let hue = TraceClass::Micro.pick_hue(Some(4.0), &mut rng);
    assert!((hue - 354.0).abs() < 1e-9);
}

#[test]
fn validation_rejects_bad_profiles() {
    let mut table = ClassTable::default();
    table.meta.speed = 0.0;
    let err = table.validate().unwrap_err().to_string();
    assert!(err.contains("meta.speed"), "{err}");

    let mut table = ClassTable::default();
    table.micro.branch_probability = 1.5;
    assert!(table.validate().is_err());

    let mut table = ClassTable::default();
    table.standard.root_spawn = Some(RootSpawn {
        period_ms: f64::NAN,
        chance: 0.5,
    });
    assert!(table.validate().is_err());
}

#[test]
fn class_names_serialize_in_snake_case() {
    let json = serde_json::to_string(&TraceClass::Micro).unwrap();
    assert_eq!(json, "\"micro\"");
    assert_eq!(TraceClass::Meta.to_string(), "meta");
}
