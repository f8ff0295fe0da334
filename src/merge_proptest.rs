//! Property-based tests for the merge and extension functions.
//!
//! These tests use proptest to generate random option mappings and extension
//! lists and verify that the precedence and ordering rules hold for all of
//! them.

#[cfg(test)]
mod proptest_tests {
    use crate::config::MdxConfigs;
    use crate::extensions::{
        default_extensions, merge_default_extensions, redistribute_extra_configs,
        EXTRA_EXTENSIONS, EXTRA_NAMESPACE,
    };
    use crate::merge::merge_leaf_override;
    use proptest::prelude::*;
    use serde_yaml::{Mapping, Value};
    use std::collections::BTreeMap;

    fn to_mapping(map: &BTreeMap<String, i64>) -> Mapping {
        map.iter()
            .map(|(k, v)| (Value::from(k.as_str()), Value::from(*v)))
            .collect()
    }

    // ============================================================================
    // merge_leaf_override property tests
    // ============================================================================

    proptest! {
        /// Property: every core leaf appears unchanged in the result
        #[test]
        fn core_leaves_always_win(
            core in prop::collection::btree_map("[a-e]", any::<i64>(), 0..5),
            user in prop::collection::btree_map("[a-e]", any::<i64>(), 0..5),
        ) {
            let merged = merge_leaf_override(&to_mapping(&core), &to_mapping(&user));
            for (key, value) in &core {
                prop_assert_eq!(merged.get(key.as_str()), Some(&Value::from(*value)));
            }
        }

        /// Property: user keys the core does not mention survive untouched
        #[test]
        fn user_only_keys_survive(
            core in prop::collection::btree_map("[a-e]", any::<i64>(), 0..5),
            user in prop::collection::btree_map("[a-e]", any::<i64>(), 0..5),
        ) {
            let merged = merge_leaf_override(&to_mapping(&core), &to_mapping(&user));
            for (key, value) in user.iter().filter(|(k, _)| !core.contains_key(*k)) {
                prop_assert_eq!(merged.get(key.as_str()), Some(&Value::from(*value)));
            }
            let expected_len = core.keys().chain(user.keys()).collect::<std::collections::BTreeSet<_>>().len();
            prop_assert_eq!(merged.len(), expected_len);
        }

        /// Property: merging the same core twice changes nothing the second time
        #[test]
        fn merge_is_idempotent(
            core in prop::collection::btree_map("[a-e]", any::<i64>(), 0..5),
            user in prop::collection::btree_map("[a-e]", any::<i64>(), 0..5),
        ) {
            let core = to_mapping(&core);
            let once = merge_leaf_override(&core, &to_mapping(&user));
            let twice = merge_leaf_override(&core, &once);
            prop_assert_eq!(once, twice);
        }
    }

    // ============================================================================
    // extension merge property tests
    // ============================================================================

    proptest! {
        /// Property: repeated default merges never duplicate an identifier
        #[test]
        fn extension_order_is_idempotent(
            user in prop::collection::vec("[a-z]{1,8}", 0..6),
        ) {
            let mut extensions = Vec::new();
            for name in user {
                if !extensions.contains(&name) {
                    extensions.push(name);
                }
            }
            let mut mdx = MdxConfigs::new();

            merge_default_extensions(&mut extensions, &mut mdx);
            let once = extensions.clone();
            merge_default_extensions(&mut extensions, &mut mdx);
            prop_assert_eq!(&once, &extensions);

            let unique = extensions.iter().collect::<std::collections::BTreeSet<_>>();
            prop_assert_eq!(unique.len(), extensions.len());
            for (name, _) in default_extensions() {
                prop_assert!(extensions.iter().any(|e| e == name));
            }
        }

        /// Property: no sub-extension options remain at the top level
        #[test]
        fn redistribution_clears_top_level(
            present in prop::collection::vec(any::<bool>(), EXTRA_EXTENSIONS.len()),
            value in any::<i64>(),
        ) {
            let mut mdx = MdxConfigs::new();
            for (name, keep) in EXTRA_EXTENSIONS.iter().zip(&present) {
                if *keep {
                    let mut options = Mapping::new();
                    options.insert(Value::from("value"), Value::from(value));
                    mdx.insert(name.to_string(), options);
                }
            }

            redistribute_extra_configs(&mut mdx);

            let extra = &mdx[EXTRA_NAMESPACE];
            for (name, keep) in EXTRA_EXTENSIONS.iter().zip(&present) {
                prop_assert!(!mdx.contains_key(*name));
                prop_assert_eq!(extra.contains_key(*name), *keep);
            }
        }
    }
}
