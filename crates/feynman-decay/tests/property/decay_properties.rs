use std::sync::Arc;

use feynman_core::config::DecayConfig;
use feynman_core::models::NewKnowledgeNode;
use feynman_core::traits::IKnowledgeStore;
use feynman_decay::formula;
use feynman_decay::DecayScheduler;
use proptest::prelude::*;
use test_fixtures::MemoryKnowledgeStore;

proptest! {
    #[test]
    fn water_then_n_ticks_leaves_expected_health(n in 0u32..30) {
        let store = Arc::new(MemoryKnowledgeStore::new());
        let scheduler = DecayScheduler::new(store.clone(), DecayConfig::default());
        let id = store.save(&NewKnowledgeNode::default()).unwrap();
        scheduler.tick().unwrap();

        scheduler.water(&id).unwrap();
        for _ in 0..n {
            scheduler.tick().unwrap();
        }

        let expected = 100i64 - 5 * i64::from(n);
        let health = store.get(&id).unwrap().unwrap().health;
        prop_assert_eq!(i64::from(health), expected.max(0));
    }

    #[test]
    fn batched_steps_match_single_ticks(health in 0u8..=100, step in 0u8..=20, ticks in 0u32..40) {
        let mut single = health;
        for _ in 0..ticks {
            single = formula::decayed(single, step, 1);
        }
        prop_assert_eq!(formula::decayed(health, step, ticks), single);
    }

    #[test]
    fn decayed_health_never_increases(health in any::<u8>(), step in any::<u8>(), ticks in any::<u32>()) {
        prop_assert!(formula::decayed(health, step, ticks) <= health);
    }
}
