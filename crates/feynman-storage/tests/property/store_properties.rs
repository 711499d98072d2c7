use std::collections::BTreeSet;

use feynman_core::models::{NewKnowledgeNode, NodeFilter, NodeStatus};
use feynman_core::traits::IKnowledgeStore;
use feynman_storage::SqliteKnowledgeStore;
use proptest::prelude::*;

const TAGS: [&str; 3] = ["physics", "math", "biology"];

fn node_strategy() -> impl Strategy<Value = (u8, Vec<bool>, bool)> {
    (0u8..=100, prop::collection::vec(any::<bool>(), TAGS.len()), any::<bool>())
}

fn filter_strategy() -> impl Strategy<Value = NodeFilter> {
    (
        prop::option::of(prop_oneof![Just(NodeStatus::Active), Just(NodeStatus::Archived)]),
        prop::option::of(prop::sample::select(TAGS.to_vec())),
        prop::option::of(0u8..=100),
    )
        .prop_map(|(status, tag, max_health)| NodeFilter {
            status,
            tag: tag.map(str::to_string),
            max_health,
        })
}

proptest! {
    #[test]
    fn stored_health_reads_back_unchanged(health in 0u8..=100) {
        let store = SqliteKnowledgeStore::open_in_memory().unwrap();
        let id = store.save(&NewKnowledgeNode::default()).unwrap();
        store.update_health(&id, health, None).unwrap();
        prop_assert_eq!(store.get(&id).unwrap().unwrap().health, health);
    }

    #[test]
    fn sql_filter_agrees_with_in_memory_matching(
        nodes in prop::collection::vec(node_strategy(), 0..12),
        filter in filter_strategy(),
    ) {
        let store = SqliteKnowledgeStore::open_in_memory().unwrap();
        for (i, (health, tagged, archived)) in nodes.iter().enumerate() {
            let tags = TAGS
                .iter()
                .zip(tagged)
                .filter(|(_, on)| **on)
                .map(|(t, _)| t.to_string())
                .collect();
            let id = store
                .save(&NewKnowledgeNode {
                    concept: format!("concept-{i}"),
                    tags,
                    ..NewKnowledgeNode::default()
                })
                .unwrap();
            store.update_health(&id, *health, None).unwrap();
            if *archived {
                store.set_status(&id, NodeStatus::Archived).unwrap();
            }
        }

        let everything = store.list(&NodeFilter::default()).unwrap();
        prop_assert_eq!(everything.len(), nodes.len());

        let expected: BTreeSet<_> = everything
            .iter()
            .filter(|n| filter.matches(n))
            .map(|n| n.id.clone())
            .collect();
        let listed: BTreeSet<_> = store
            .list(&filter)
            .unwrap()
            .into_iter()
            .map(|n| n.id)
            .collect();
        prop_assert_eq!(listed, expected);
    }
}
