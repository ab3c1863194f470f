//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use holo_models::sanity::{self, one_list, three};
use holo_northbound::codec::{
    self, EditOperation, EncodeMode, Pair, PairValue, display_path,
};
use holo_northbound::encoder::{self, Rpc};
use holo_northbound::xml_tree::XmlElement;
use holo_northbound::{Datastore, EntityList, ValidationLevel, json};
use holo_yang::NETCONF_BASE_NS;
use serde_json::json;

//
// Helper functions.
//

fn encode(entity: &sanity::Runner, mode: EncodeMode) -> Vec<Pair> {
    codec::encode(entity, mode, ValidationLevel::None).unwrap()
}

// Renders pairs as (path, value, operation) tuples.
fn summary(pairs: &[Pair]) -> Vec<(String, PairValue, Option<EditOperation>)> {
    pairs
        .iter()
        .map(|pair| {
            (display_path(&pair.path), pair.value.clone(), pair.operation)
        })
        .collect()
}

fn value(text: &str) -> PairValue {
    PairValue::Value(text.to_owned())
}

// Encodes a tree as a <data> document and decodes it back.
fn round_trip(runner: &sanity::Runner) -> sanity::Runner {
    let pairs = encode(runner, EncodeMode::Data);
    let text = encoder::encode_data(&pairs).unwrap();
    let data = XmlElement::parse(&text).unwrap();
    let pairs = holo_northbound::decoder::decode_data(&data, &sanity::RUNNER)
        .unwrap();

    let mut output = sanity::Runner::default();
    codec::decode(&pairs, &mut output).unwrap();
    output
}

//
// Tests.
//

#[test]
fn edit_pairs_in_preorder() {
    let mut runner = sanity::Runner::default();
    runner.two.sub1.number.set(21);
    runner.two.number.set(2);
    let mut entry = one_list::ldata::Ldata::default();
    entry.name.set("foo");
    entry.number.set(1);
    runner.one_list.ldata.push(entry);

    let pairs = encode(&runner, EncodeMode::Edit(EditOperation::Merge));
    assert_eq!(
        summary(&pairs),
        vec![
            (
                "/holo-sanity:runner".to_owned(),
                PairValue::Marker,
                Some(EditOperation::Merge)
            ),
            ("/holo-sanity:runner/two".to_owned(), PairValue::Marker, None),
            ("/holo-sanity:runner/two/number".to_owned(), value("2"), None),
            (
                "/holo-sanity:runner/two/sub1".to_owned(),
                PairValue::Marker,
                None
            ),
            (
                "/holo-sanity:runner/two/sub1/number".to_owned(),
                value("21"),
                None
            ),
            (
                "/holo-sanity:runner/one-list".to_owned(),
                PairValue::Marker,
                None
            ),
            (
                "/holo-sanity:runner/one-list/ldata[number='1']".to_owned(),
                PairValue::Marker,
                None
            ),
            (
                "/holo-sanity:runner/one-list/ldata[number='1']/number"
                    .to_owned(),
                value("1"),
                None
            ),
            (
                "/holo-sanity:runner/one-list/ldata[number='1']/name"
                    .to_owned(),
                value("foo"),
                None
            ),
        ]
    );
}

#[test]
fn reference_uses_latest_target_value() {
    let mut runner = sanity::Runner::default();
    runner.ytypes.built_in_t.number8.set(1i8);
    runner
        .ytypes
        .built_in_t
        .leaf_ref
        .set_reference("../number8")
        .unwrap();
    runner.ytypes.built_in_t.number8.set(42i8);

    let pairs = encode(&runner, EncodeMode::Edit(EditOperation::Create));
    let leaf_ref = pairs
        .iter()
        .find(|pair| {
            display_path(&pair.path)
                == "/holo-sanity:runner/ytypes/built-in-t/leaf-ref"
        })
        .unwrap();
    assert_eq!(leaf_ref.value, value("42"));
}

#[test]
fn augmentation_is_qualified() {
    let mut runner = sanity::Runner::default();
    runner.one.one_aug.number.set(7);

    let pairs = encode(&runner, EncodeMode::Data);
    let paths: Vec<_> =
        pairs.iter().map(|pair| display_path(&pair.path)).collect();
    assert!(paths.contains(
        &"/holo-sanity:runner/one/holo-sanity-augm:one-aug/number".to_owned()
    ));

    let text = encoder::encode_data(&pairs).unwrap();
    let data = XmlElement::parse(&text).unwrap();
    let one_aug = data
        .child("runner")
        .and_then(|runner| runner.child("one"))
        .and_then(|one| one.child("one-aug"))
        .unwrap();
    assert_eq!(
        one_aug.namespace.as_deref(),
        Some("http://holo-routing.org/yang/holo-sanity-augm")
    );
    assert_eq!(one_aug.child("number").unwrap().text, "7");
}

#[test]
fn delete_pairs() {
    // Whole tree.
    let runner = sanity::Runner::default();
    let pairs = encode(&runner, EncodeMode::Edit(EditOperation::Delete));
    assert_eq!(
        summary(&pairs),
        vec![(
            "/holo-sanity:runner".to_owned(),
            PairValue::Marker,
            Some(EditOperation::Delete)
        )]
    );

    // Single leaf.
    let mut runner = sanity::Runner::default();
    runner.one.name.read();
    let pairs = encode(&runner, EncodeMode::Edit(EditOperation::Remove));
    assert_eq!(
        summary(&pairs),
        vec![
            ("/holo-sanity:runner".to_owned(), PairValue::Marker, None),
            ("/holo-sanity:runner/one".to_owned(), PairValue::Marker, None),
            (
                "/holo-sanity:runner/one/name".to_owned(),
                PairValue::Select,
                Some(EditOperation::Remove)
            ),
        ]
    );

    // List entry identified by its key.
    let mut runner = sanity::Runner::default();
    let mut entry = one_list::ldata::Ldata::default();
    entry.number.set(3);
    runner.one_list.ldata.push(entry);
    let pairs = encode(&runner, EncodeMode::Edit(EditOperation::Delete));
    let summary = summary(&pairs);
    assert_eq!(
        summary[2],
        (
            "/holo-sanity:runner/one-list/ldata[number='3']".to_owned(),
            PairValue::Marker,
            Some(EditOperation::Delete)
        )
    );
    assert_eq!(
        summary[3],
        (
            "/holo-sanity:runner/one-list/ldata[number='3']/number".to_owned(),
            value("3"),
            None
        )
    );
}

#[test]
fn delete_whole_list_pairs() {
    let mut runner = sanity::Runner::default();
    runner.one_list.ldata.read();
    let pairs = encode(&runner, EncodeMode::Edit(EditOperation::Delete));
    assert_eq!(
        summary(&pairs),
        vec![
            ("/holo-sanity:runner".to_owned(), PairValue::Marker, None),
            (
                "/holo-sanity:runner/one-list".to_owned(),
                PairValue::Marker,
                None
            ),
            (
                "/holo-sanity:runner/one-list/ldata".to_owned(),
                PairValue::Marker,
                Some(EditOperation::Delete)
            ),
        ]
    );

    let text = encoder::encode_data(&pairs).unwrap();
    assert!(text.contains("operation=\"delete\""));
}

#[test]
fn reply_entries_numbered_by_keys() {
    let text = format!(
        "<data xmlns=\"{NETCONF_BASE_NS}\">\
         <runner xmlns=\"http://holo-routing.org/yang/holo-sanity\">\
         <one-list>\
         <ldata><number>1</number><name>a</name></ldata>\
         <ldata><number>2</number><name>b</name></ldata>\
         <ldata><number>1</number><name>c</name></ldata>\
         </one-list></runner></data>"
    );
    let data = XmlElement::parse(&text).unwrap();
    let pairs =
        holo_northbound::decoder::decode_data(&data, &sanity::RUNNER).unwrap();
    let instances: Vec<_> = pairs
        .iter()
        .filter(|pair| pair.value == PairValue::Marker && pair.path.len() == 3)
        .map(|pair| (display_path(&pair.path), pair.path[2].instance))
        .collect();
    assert_eq!(
        instances,
        vec![
            ("/holo-sanity:runner/one-list/ldata[number='1']".to_owned(), 0),
            ("/holo-sanity:runner/one-list/ldata[number='2']".to_owned(), 0),
            ("/holo-sanity:runner/one-list/ldata[number='1']".to_owned(), 1),
        ]
    );
}

#[test]
fn read_filter_of_nested_entity() {
    let mut filter = three::sub1::Sub1::default();
    filter.sub2.number.read();

    let pairs =
        codec::encode(&filter, EncodeMode::Read, ValidationLevel::None)
            .unwrap();
    assert_eq!(
        summary(&pairs),
        vec![
            ("/holo-sanity:runner".to_owned(), PairValue::Marker, None),
            ("/holo-sanity:runner/three".to_owned(), PairValue::Marker, None),
            (
                "/holo-sanity:runner/three/sub1".to_owned(),
                PairValue::Marker,
                None
            ),
            (
                "/holo-sanity:runner/three/sub1/sub2".to_owned(),
                PairValue::Marker,
                None
            ),
            (
                "/holo-sanity:runner/three/sub1/sub2/number".to_owned(),
                PairValue::Select,
                None
            ),
        ]
    );
}

#[test]
fn data_round_trip() {
    let mut runner = sanity::Runner::default();
    runner.ytypes.enabled.set_presence();
    runner.ytypes.built_in_t.number64.set(i64::MAX);
    runner.ytypes.built_in_t.u_number32.set(7u32);
    runner.ytypes.built_in_t.bool_value.set(true);
    runner.ytypes.built_in_t.bincoded.set(vec![1u8, 2, 3]);
    runner.ytypes.built_in_t.llstring.extend(["x", "y"]);
    runner.three.sub1.sub2.number.set(311);
    for number in [1, 2] {
        let mut entry = one_list::ldata::Ldata::default();
        entry.number.set(number);
        entry.name.set(format!("entry {number}"));
        runner.one_list.ldata.push(entry);
    }

    assert_eq!(round_trip(&runner), runner);
}

#[test]
fn duplicate_entries_kept_apart() {
    let mut runner = sanity::Runner::default();
    for name in ["first", "second"] {
        let mut entry = one_list::ldata::Ldata::default();
        entry.number.set(1);
        entry.name.set(name);
        runner.one_list.ldata.push(entry);
    }

    let pairs = encode(&runner, EncodeMode::Data);
    let instances: Vec<_> = pairs
        .iter()
        .filter(|pair| pair.value == PairValue::Marker && pair.path.len() == 3)
        .map(|pair| pair.path[2].instance)
        .collect();
    assert_eq!(instances, vec![0, 1]);

    let output = round_trip(&runner);
    assert_eq!(output.one_list.ldata.len(), 2);
    assert_eq!(output.one_list.ldata[1].name.as_str(), Some("second"));
}

#[test]
fn decode_ignores_pairs_out_of_scope() {
    let mut runner = sanity::Runner::default();
    runner.one.number.set(1);
    runner.three.number.set(3);
    runner.three.sub1.number.set(31);
    let pairs = encode(&runner, EncodeMode::Data);

    let mut output = three::Three::default();
    codec::decode(&pairs, &mut output).unwrap();
    assert_eq!(output, runner.three);

    let mut output = one_list::ldata::Ldata::default();
    codec::decode(&pairs, &mut output).unwrap();
    assert_eq!(output, one_list::ldata::Ldata::default());
}

#[test]
fn encoding_is_repeatable() {
    let mut runner = sanity::Runner::default();
    runner.two.sub1.number.set(21);
    runner
        .leaf_ref
        .ref_two_sub1_number
        .set_reference("/holo-sanity:runner/two/sub1/number")
        .unwrap();

    let pairs = encode(&runner, EncodeMode::Edit(EditOperation::Create));
    assert_eq!(pairs, encode(&runner, EncodeMode::Edit(EditOperation::Create)));

    let rpc = Rpc::EditConfig {
        target: Datastore::Running,
        config: &pairs,
    };
    assert_eq!(
        encoder::encode_rpc(5, &rpc).unwrap(),
        encoder::encode_rpc(5, &rpc).unwrap()
    );
}

#[test]
fn edit_config_document() {
    let mut runner = sanity::Runner::default();
    runner.one.number.set(1);
    let pairs = encode(&runner, EncodeMode::Edit(EditOperation::Replace));
    let rpc = Rpc::EditConfig {
        target: Datastore::Candidate,
        config: &pairs,
    };
    let text = encoder::encode_rpc(7, &rpc).unwrap();

    let root = XmlElement::parse(&text).unwrap();
    assert_eq!(root.name, "rpc");
    assert_eq!(root.namespace.as_deref(), Some(NETCONF_BASE_NS));
    assert_eq!(root.attribute("message-id"), Some("7"));
    let edit = root.child("edit-config").unwrap();
    assert!(edit.child("target").unwrap().child("candidate").is_some());
    let runner = edit.child("config").unwrap().child("runner").unwrap();
    assert_eq!(runner.namespace.as_deref(), Some(sanity::MODULE.namespace));
    let operation = runner
        .attributes
        .iter()
        .find(|attr| attr.name == "operation")
        .unwrap();
    assert_eq!(operation.namespace.as_deref(), Some(NETCONF_BASE_NS));
    assert_eq!(operation.value, "replace");
    assert_eq!(runner.child("one").unwrap().child("number").unwrap().text, "1");
}

#[test]
fn get_config_document() {
    let mut filter = sanity::Runner::default();
    filter.one.name.read();
    let pairs = encode(&filter, EncodeMode::Read);
    let rpc = Rpc::GetConfig {
        source: Datastore::Running,
        filter: &pairs,
    };
    let text = encoder::encode_rpc(1, &rpc).unwrap();

    let root = XmlElement::parse(&text).unwrap();
    let get_config = root.child("get-config").unwrap();
    assert!(get_config.child("source").unwrap().child("running").is_some());
    let filter = get_config.child("filter").unwrap();
    assert_eq!(filter.attribute("type"), Some("subtree"));
    let name = filter
        .child("runner")
        .and_then(|runner| runner.child("one"))
        .and_then(|one| one.child("name"))
        .unwrap();
    assert!(name.is_empty());
}

#[test]
fn json_rendering() {
    let mut runner = sanity::Runner::default();
    runner.ytypes.enabled.set_presence();
    runner.ytypes.built_in_t.number64.set(5i64);
    runner.ytypes.built_in_t.u_number8.set(3u8);
    runner.ytypes.built_in_t.bool_value.set(true);
    runner.one.number.set(1);
    runner.one.one_aug.name.set("aug");
    let mut entry = one_list::ldata::Ldata::default();
    entry.number.set(10);
    runner.one_list.ldata.push(entry);

    assert_eq!(
        json::to_json(&runner),
        json!({
            "holo-sanity:runner": {
                "ytypes": {
                    "enabled": [null],
                    "built-in-t": {
                        "number64": "5",
                        "u_number8": 3,
                        "bool-value": true,
                    },
                },
                "one": {
                    "number": 1,
                    "holo-sanity-augm:one-aug": {
                        "name": "aug",
                    },
                },
                "one-list": {
                    "ldata": [
                        { "number": 10 },
                    ],
                },
            },
        })
    );
}
