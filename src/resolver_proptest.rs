//! Property-based tests for module resolution.
//!
//! These tests use proptest to generate random common and page-scoped module
//! lists and verify that the resolution invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::config::{BuildTarget, Module, Page};
    use crate::plan::ExternalsPlan;
    use crate::resolver::resolve;
    use indexmap::IndexMap;
    use proptest::prelude::*;
    use std::collections::HashSet;

    // A small id alphabet forces plenty of collisions between lists.
    fn module_strategy() -> impl Strategy<Value = Module> {
        ("[a-e]", "[a-z]{1,6}\\.js", proptest::option::of("[A-Z][a-z]{0,4}")).prop_map(
            |(id, asset, global)| Module {
                id,
                assets: asset.as_str().into(),
                global,
            },
        )
    }

    fn modules_strategy() -> impl Strategy<Value = Vec<Module>> {
        proptest::collection::vec(module_strategy(), 0..6)
    }

    fn pages_strategy() -> impl Strategy<Value = IndexMap<String, Vec<Module>>> {
        proptest::collection::vec(("p[0-3]", modules_strategy()), 0..4)
            .prop_map(|entries| entries.into_iter().collect())
    }

    fn registry_strategy() -> impl Strategy<Value = BuildTarget> {
        proptest::collection::vec("p[0-3]", 0..4).prop_map(|names| {
            BuildTarget::from_pages(
                names
                    .into_iter()
                    .map(|name| {
                        let page = Page::new(format!("./src/{}.js", name));
                        (name, page)
                    })
                    .collect(),
            )
        })
    }

    proptest! {
        /// Property: an id declared in common resolves to the last common declaration
        #[test]
        fn common_always_wins(
            common in modules_strategy(),
            pages in pages_strategy(),
            target in registry_strategy(),
        ) {
            let resolution = resolve(&common, &pages, &target);
            for module in &common {
                let last = common.iter().rev().find(|m| m.id == module.id).unwrap();
                prop_assert_eq!(resolution.merged.get(&module.id), Some(last));
            }
        }

        /// Property: no page set contains an id from the common set
        #[test]
        fn page_sets_disjoint_from_common(
            common in modules_strategy(),
            pages in pages_strategy(),
            target in registry_strategy(),
        ) {
            let resolution = resolve(&common, &pages, &target);
            for set in resolution.pages.values() {
                prop_assert!(!set.is_empty());
                for id in set.keys() {
                    prop_assert!(!resolution.common.contains_key(id));
                }
            }
        }

        /// Property: the merged map holds exactly the ids of the common and page sets
        #[test]
        fn merged_is_union_of_sets(
            common in modules_strategy(),
            pages in pages_strategy(),
            target in registry_strategy(),
        ) {
            let resolution = resolve(&common, &pages, &target);
            let mut expected: HashSet<&String> = resolution.common.keys().collect();
            for set in resolution.pages.values() {
                expected.extend(set.keys());
            }
            let merged: HashSet<&String> = resolution.merged.keys().collect();
            prop_assert_eq!(merged, expected);
        }

        /// Property: only registered pages appear in the output
        #[test]
        fn only_registered_pages_resolved(
            pages in pages_strategy(),
            target in registry_strategy(),
        ) {
            let resolution = resolve(&[], &pages, &target);
            for name in resolution.pages.keys() {
                prop_assert!(target.is_registered(name));
            }
        }

        /// Property: resolving twice yields the same result
        #[test]
        fn resolve_is_deterministic(
            common in modules_strategy(),
            pages in pages_strategy(),
            target in registry_strategy(),
        ) {
            prop_assert_eq!(
                resolve(&common, &pages, &target),
                resolve(&common, &pages, &target)
            );
        }

        /// Property: one directive for common (if any) plus one per resolved page
        #[test]
        fn directive_count_matches_resolution(
            common in modules_strategy(),
            pages in pages_strategy(),
            target in registry_strategy(),
        ) {
            let resolution = resolve(&common, &pages, &target);
            let plan = ExternalsPlan::from_resolution(&resolution, &target);
            let expected = usize::from(!resolution.common.is_empty()) + resolution.pages.len();
            prop_assert_eq!(plan.injections.len(), expected);
            prop_assert_eq!(plan.is_empty(), resolution.is_empty());
        }
    }
}
