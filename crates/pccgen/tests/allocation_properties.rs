//! Property tests for bucket allocation and PCC partitioning

use pccgen::{allocate, generate_script, LinkDescriptor};
use pccgen_test::{link_fixtures, ScriptVerifier};
use proptest::prelude::*;

fn any_speed() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), -100.0f64..0.0, 1.0f64..500.0]
}

proptest! {
    #[test]
    fn prop_bucket_counts_follow_speed_ratio(
        speeds in prop::collection::vec(1.0f64..1000.0, 1..6)
    ) {
        let links = link_fixtures::links_with_speeds(&speeds);
        let allocation = allocate(&links);
        let min = speeds.iter().copied().fold(f64::INFINITY, f64::min);

        for (speed, &buckets) in speeds.iter().zip(allocation.bucket_counts()) {
            prop_assert_eq!(buckets, ((speed / min).ceil() as u32).max(1));
        }
        prop_assert_eq!(
            allocation.total_buckets(),
            allocation.bucket_counts().iter().map(|&b| u64::from(b)).sum::<u64>()
        );
    }

    #[test]
    fn prop_every_link_gets_a_bucket(speeds in prop::collection::vec(any_speed(), 0..6)) {
        let allocation = allocate(&link_fixtures::links_with_speeds(&speeds));

        prop_assert_eq!(allocation.bucket_counts().len(), speeds.len());
        prop_assert!(allocation.bucket_counts().iter().all(|&b| b >= 1));
    }

    #[test]
    fn prop_classifier_partition_is_contiguous(
        speeds in prop::collection::vec(any_speed(), 0..5)
    ) {
        let (allocation, script) = generate_script(&link_fixtures::links_with_speeds(&speeds));
        let verifier = ScriptVerifier::new(&script);

        prop_assert!(verifier.assert_partition(allocation.total_buckets()).is_ok());
        prop_assert!(verifier.assert_tables_precede_use().is_ok());

        for (i, &buckets) in allocation.bucket_counts().iter().enumerate() {
            let name = format!("LINK{}", i + 1);
            prop_assert_eq!(verifier.bucket_count(&name).unwrap(), buckets as usize);
        }
    }

    #[test]
    fn prop_disabled_state_follows_active_flag(
        actives in prop::collection::vec(any::<bool>(), 1..5)
    ) {
        let links: Vec<LinkDescriptor> = actives
            .iter()
            .enumerate()
            .map(|(i, &active)| {
                link_fixtures::link(&format!("LINK{}", i + 1), 100.0).with_active(active)
            })
            .collect();
        let (_, script) = generate_script(&links);
        let verifier = ScriptVerifier::new(&script);

        for link in &links {
            prop_assert!(verifier.assert_link_disabled_state(&link.name, link.active).is_ok());
        }
    }

    #[test]
    fn prop_generation_is_deterministic(speeds in prop::collection::vec(any_speed(), 0..4)) {
        let links = link_fixtures::links_with_speeds(&speeds);

        prop_assert_eq!(
            generate_script(&links).1.render(),
            generate_script(&links).1.render()
        );
    }
}
