//! Property-based tests for the extraction pipeline.
//!
//! Random lock graphs mix forge, indirect and placeholder nodes, some of
//! which are not linked from root. The properties checked:
//! - The root node never appears in the output
//! - Indirect, placeholder and unlinked nodes never appear in the output
//! - Forge inputs without `host` use the canonical host
//! - Extraction is deterministic

use flakedeps_flake::{ExtractConfig, NoopObserver, extract_value};
use proptest::prelude::*;
use serde_json::{Map, Value, json};

// =============================================================================
// Strategies for generating test data
// =============================================================================

#[derive(Debug, Clone)]
enum Shape {
    Forge(&'static str),
    Indirect,
    Placeholder,
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    prop_oneof![
        Just(Shape::Forge("github")),
        Just(Shape::Forge("gitlab")),
        Just(Shape::Forge("sourcehut")),
        Just(Shape::Indirect),
        Just(Shape::Placeholder),
    ]
}

/// (node name, shape, linked from root)
fn nodes_strategy() -> impl Strategy<Value = Vec<(String, Shape, bool)>> {
    prop::collection::btree_map("[a-z][a-z0-9-]{0,10}", (shape_strategy(), any::<bool>()), 0..8)
        .prop_map(|nodes| {
            nodes
                .into_iter()
                .filter(|(name, _)| name != "root")
                .map(|(name, (shape, linked))| (name, shape, linked))
                .collect()
        })
}

fn locked(input_type: &str, rev: &str) -> Value {
    json!({
        "type": input_type,
        "owner": "owner",
        "repo": "repo",
        "rev": rev,
        "narHash": "sha256-AAAA",
        "revCount": 0,
        "lastModified": 1_700_000_000
    })
}

fn build_lock(nodes: &[(String, Shape, bool)]) -> Value {
    let mut all = Map::new();
    let mut root_inputs = Map::new();

    for (name, shape, linked) in nodes {
        let node = match shape {
            Shape::Forge(kind) => json!({
                "locked": locked(kind, &format!("rev-{name}")),
                "original": { "type": kind, "owner": "owner", "repo": "repo", "ref": "main" }
            }),
            Shape::Indirect => json!({
                "locked": locked("github", &format!("rev-{name}")),
                "original": { "type": "indirect", "id": name }
            }),
            Shape::Placeholder => json!({}),
        };
        all.insert(name.clone(), node);
        if *linked {
            root_inputs.insert(name.clone(), Value::String(name.clone()));
        }
    }

    all.insert("root".to_string(), json!({ "inputs": root_inputs }));
    json!({ "nodes": all, "root": "root", "version": 7 })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_only_linked_forge_nodes_are_emitted(nodes in nodes_strategy()) {
        let lock = build_lock(&nodes);
        let result = extract_value(lock, &ExtractConfig::sibling_file(), &NoopObserver);
        let deps = result.map(|c| c.deps).unwrap_or_default();

        let expected: Vec<&str> = nodes
            .iter()
            .filter(|(_, shape, linked)| *linked && matches!(shape, Shape::Forge(_)))
            .map(|(name, _, _)| name.as_str())
            .collect();
        let emitted: Vec<&str> = deps.iter().map(|d| d.dep_name.as_str()).collect();

        prop_assert_eq!(emitted, expected);
        prop_assert!(deps.iter().all(|d| d.dep_name != "root"));
    }

    #[test]
    fn prop_default_hosts_are_exact(nodes in nodes_strategy()) {
        let lock = build_lock(&nodes);
        let deps = extract_value(lock, &ExtractConfig::sibling_file(), &NoopObserver)
            .map(|c| c.deps)
            .unwrap_or_default();

        for dep in &deps {
            let kind = nodes
                .iter()
                .find_map(|(name, shape, _)| match shape {
                    Shape::Forge(kind) if *name == dep.dep_name => Some(*kind),
                    _ => None,
                });
            let host = match kind {
                Some("github") => "github.com",
                Some("gitlab") => "gitlab.com",
                _ => "git.sr.ht",
            };
            prop_assert_eq!(&dep.package_name, &format!("https://{host}/owner/repo"));
            prop_assert_eq!(&dep.current_digest, &format!("rev-{}", dep.dep_name));
            prop_assert_eq!(&dep.replace_string, &dep.current_digest);
        }
    }

    #[test]
    fn prop_extraction_is_deterministic(nodes in nodes_strategy()) {
        let lock = build_lock(&nodes);
        let first = extract_value(lock.clone(), &ExtractConfig::inline(), &NoopObserver);
        let second = extract_value(lock, &ExtractConfig::inline(), &NoopObserver);
        prop_assert_eq!(first, second);
    }
}
