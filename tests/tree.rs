//! Replays a declared entity tree against the factory.
//!
//! `tests/fixtures/tree.json` holds a sequence of steps. A `declare` step
//! creates an entity and compares it with `expect`; a `drop` step drops that
//! many entities. Expected names, classes and ids use `{es}` and `{ms}` for the
//! element and modifier separators so the same tree runs under any separators.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use bemify::{EntityKind, Factory, Options, OptionsBuilder, RawAttributes};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct Declare {
    #[serde(rename = "type")]
    kind: String,
    attributes: Value,
}

#[derive(Debug, Deserialize)]
struct Expect {
    #[serde(rename = "type")]
    kind: EntityKind,
    name: String,
    tag: String,
    attributes: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Step {
    Declare { declare: Declare, expect: Expect },
    Drop { drop: usize },
}

fn load_tree() -> Vec<Step> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("tree.json");
    let content =
        fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to read {}", path.display()));
    serde_json::from_str(&content).expect("tree.json is not a valid step list")
}

fn replace_separators(options: &Options, text: &str) -> String {
    text.replace("{es}", &options.separators.element)
        .replace("{ms}", &options.separators.modifier)
}

fn run_tree(options: Options) {
    let mut factory = Factory::from_options(options.clone());

    for (i, step) in load_tree().into_iter().enumerate() {
        match step {
            Step::Declare { declare, expect } => {
                let attrs = RawAttributes::from_json(&declare.attributes).unwrap();
                let entity = factory
                    .create(&declare.kind, attrs)
                    .unwrap_or_else(|e| panic!("step {}: {}", i, e));
                let object = entity.to_object();

                let expected_attributes: BTreeMap<String, String> = expect
                    .attributes
                    .iter()
                    .map(|(k, v)| (k.clone(), replace_separators(&options, v)))
                    .collect();

                assert_eq!(object.kind, expect.kind, "type at step {}", i);
                assert_eq!(
                    object.name,
                    replace_separators(&options, &expect.name),
                    "name at step {}",
                    i
                );
                assert_eq!(object.tag, expect.tag, "tag at step {}", i);
                similar_asserts::assert_eq!(
                    object.attributes,
                    expected_attributes,
                    "attributes at step {}",
                    i
                );
            }
            Step::Drop { drop } => {
                for _ in 0..drop {
                    assert!(factory.drop_entity().is_some(), "drop at step {}", i);
                }
            }
        }
    }
}

#[test]
fn tree_with_default_separators() {
    run_tree(Options::default());
}

#[test]
fn tree_with_custom_separators() {
    run_tree(
        OptionsBuilder::default()
            .element_separator("-")
            .modifier_separator("--")
            .build(),
    );
}

#[test]
fn tree_with_unusual_separators() {
    run_tree(
        OptionsBuilder::default()
            .element_separator("~")
            .modifier_separator(":")
            .build(),
    );
}
