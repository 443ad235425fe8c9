use crate::common::health::{DamageOutcome, HealthPool};
use crate::common::test_utils::TestRng;

#[test]
fn sequential_damage_clamps_and_freezes() {
    let mut hp = HealthPool::full(100.0);
    assert_eq!(hp.take(30.0), DamageOutcome::Damaged);
    assert_eq!(hp.current(), 70.0);
    assert_eq!(hp.take(200.0), DamageOutcome::Destroyed);
    assert_eq!(hp.current(), 0.0);
    assert_eq!(hp.take(5.0), DamageOutcome::AlreadyDestroyed);
    assert_eq!(hp.current(), 0.0);
    assert!(hp.is_depleted());
}

#[test]
fn exact_zero_is_destruction() {
    let mut hp = HealthPool::full(50.0);
    assert_eq!(hp.take(50.0), DamageOutcome::Destroyed);
    assert!(DamageOutcome::Destroyed.is_terminal());
    assert!(DamageOutcome::AlreadyDestroyed.is_terminal());
    assert!(!DamageOutcome::Damaged.is_terminal());
}

#[test]
fn deplete_is_idempotent() {
    let mut hp = HealthPool::full(10.0);
    assert_eq!(hp.deplete(), DamageOutcome::Destroyed);
    assert_eq!(hp.deplete(), DamageOutcome::AlreadyDestroyed);
    assert_eq!(hp.fraction(), 0.0);
}

#[test]
fn negative_damage_never_heals() {
    let mut hp = HealthPool::full(10.0);
    assert_eq!(hp.take(-5.0), DamageOutcome::Damaged);
    assert_eq!(hp.current(), 10.0);
}

#[test]
fn health_follows_clamped_subtraction() {
    let mut rng = TestRng::new(0x5EED);

    for _ in 0..100 {
        let max = rng.range_f32(10.0, 300.0);
        let mut hp = HealthPool::full(max);
        let mut expected = max;
        let mut destroyed_seen = 0;

        for _ in 0..20 {
            let amount = rng.range_f32(0.0, 60.0);
            let outcome = hp.take(amount);

            if expected > 0.0 {
                expected = (expected - amount).max(0.0);
            }
            assert!((hp.current() - expected).abs() < 1e-3);
            assert!(hp.current() >= 0.0 && hp.current() <= hp.max());

            if outcome == DamageOutcome::Destroyed {
                destroyed_seen += 1;
            }
            if expected == 0.0 {
                assert!(outcome.is_terminal());
            }
        }
        assert!(destroyed_seen <= 1);
    }
}

#[test]
fn inert_layers_are_recognised() {
    use crate::common::layers::{inert_layers, is_inert, live_layers, Layer};

    assert!(is_inert(&inert_layers(Layer::Target)));
    assert!(!is_inert(&live_layers(Layer::Target)));
}
