//! Property tests for the trust estimator.

use proptest::prelude::*;
use utm_core::{TrustEstimator, TrustParams};

fn non_zero_reward() -> impl Strategy<Value = f64> {
    (-1.0f64..=1.0).prop_filter("reward must be non-zero", |r| *r != 0.0)
}

fn params() -> impl Strategy<Value = TrustParams> {
    (0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=2.0)
        .prop_map(|(theta, ap, an, delta)| TrustParams::new(theta, ap, an, delta))
}

proptest! {
    #[test]
    fn trust_stays_bounded(
        p in params(),
        events in prop::collection::vec((non_zero_reward(), 0.0f64..=3.0), 0..200),
    ) {
        let mut est = TrustEstimator::new(p).unwrap();
        for (reward, severity) in events {
            est.update_with_severity(reward, severity).unwrap();
            let t = est.value();
            prop_assert!((0.0..=1.0).contains(&t), "trust escaped bounds: {}", t);
        }
    }

    #[test]
    fn betrayal_counter_tracks_negative_surprises(
        p in params(),
        rewards in prop::collection::vec(non_zero_reward(), 0..100),
    ) {
        let mut est = TrustEstimator::new(p).unwrap();
        for reward in rewards {
            let before_trust = est.value();
            let before_count = est.betrayals();
            est.update(reward).unwrap();
            let expected = if reward < before_trust { before_count + 1 } else { before_count };
            prop_assert_eq!(est.betrayals(), expected);
        }
    }

    #[test]
    fn zero_reward_always_rejected(
        p in params(),
        rewards in prop::collection::vec(non_zero_reward(), 0..50),
    ) {
        let mut est = TrustEstimator::new(p).unwrap();
        for reward in rewards {
            est.update(reward).unwrap();
        }
        let snapshot = est.clone();
        prop_assert!(est.update(0.0).is_err());
        prop_assert_eq!(est, snapshot);
    }

    #[test]
    fn reset_is_idempotent(
        p in params(),
        rewards in prop::collection::vec(non_zero_reward(), 0..50),
    ) {
        let mut est = TrustEstimator::new(p).unwrap();
        for reward in rewards {
            est.update(reward).unwrap();
        }
        est.reset();
        let once = est.clone();
        est.reset();
        prop_assert_eq!(&est, &once);
        prop_assert_eq!(est.value(), p.theta);
        prop_assert_eq!(est.betrayals(), 0);
    }

    /// Region where neither update clamps and the betrayal ramp outpaces
    /// the shrinking gap between trust and reward.
    #[test]
    fn successive_betrayals_escalate(
        theta in 0.6f64..=1.0,
        reward in 0.1f64..=0.5,
        alpha_neg in 0.01f64..=0.1,
        delta in 0.5f64..=1.0,
        severity in 0.5f64..=1.0,
    ) {
        let mut est = TrustEstimator::new(TrustParams::new(theta, 0.05, alpha_neg, delta)).unwrap();
        let t0 = est.value();
        est.update_with_severity(reward, severity).unwrap();
        let t1 = est.value();
        est.update_with_severity(reward, severity).unwrap();
        let t2 = est.value();
        prop_assert!(t1 < t0);
        prop_assert!(t0 - t1 < t1 - t2, "first drop {} second drop {}", t0 - t1, t1 - t2);
    }
}

#[test]
fn test_escalation_fixed_example() {
    let mut est = TrustEstimator::new(TrustParams::new(1.0, 0.05, 0.1, 0.6)).unwrap();
    est.update(0.5).unwrap();
    // 1.0 - 0.1 * 1.6 * 0.5
    assert!((est.value() - 0.92).abs() < 1e-12);
    est.update(0.5).unwrap();
    // 0.92 - 0.1 * 2.2 * 0.42
    assert!((est.value() - 0.8276).abs() < 1e-12);
    assert_eq!(est.betrayals(), 2);
}

#[test]
fn test_directionality_from_midpoint() {
    let mut up = TrustEstimator::new(TrustParams { theta: 0.5, ..TrustParams::default() }).unwrap();
    up.update(1.0).unwrap();
    assert!(up.value() > 0.5);

    let mut down = TrustEstimator::new(TrustParams { theta: 0.5, ..TrustParams::default() }).unwrap();
    down.update(-1.0).unwrap();
    assert!(down.value() < 0.5);
}
