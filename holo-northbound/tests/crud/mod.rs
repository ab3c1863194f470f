//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use holo_models::sanity::{
    self, inbtw_list, one_list, three, three_list, two_list,
};
use holo_models::sanity_augm::one_aug_list;
use holo_northbound::{
    Config, CrudService, Datastore, EditOperation, Entity, EntityList,
};

use super::{delete_runner, read_runner, service, stub};

//
// Helper functions.
//

fn one_list_entry(number: i32, name: &str) -> one_list::ldata::Ldata {
    let mut entry = one_list::ldata::Ldata::default();
    entry.number.set(number);
    entry.name.set(name);
    entry
}

fn two_list_entry(number: i32, prefix: &str) -> two_list::ldata::Ldata {
    let mut entry = two_list::ldata::Ldata::default();
    entry.number.set(number);
    entry.name.set(format!("{prefix}ldata[{number}]:name"));
    for sub in [1, 2] {
        let sub_number = number * 10 + sub;
        let mut subl1 = two_list::ldata::subl1::Subl1::default();
        subl1.number.set(sub_number);
        subl1.name.set(format!(
            "{prefix}ldata[{number}]:subl1[{sub_number}]:name"
        ));
        entry.subl1.push(subl1);
    }
    entry
}

fn three_list_entry(number: i32, prefix: &str) -> three_list::ldata::Ldata {
    use three_list::ldata::subl1::{self, sub_subl1};

    let mut entry = three_list::ldata::Ldata::default();
    entry.number.set(number);
    entry.name.set(format!("{prefix}ldata[{number}]:name"));
    for sub in [1, 2] {
        let sub_number = number * 10 + sub;
        let mut subl1 = subl1::Subl1::default();
        subl1.number.set(sub_number);
        subl1.name.set(format!("{prefix}subl1[{sub_number}]:name"));
        for subsub in [1, 2] {
            let subsub_number = sub_number * 10 + subsub;
            let mut sub_subl1 = sub_subl1::SubSubl1::default();
            sub_subl1.number.set(subsub_number);
            sub_subl1
                .name
                .set(format!("{prefix}subsubl1[{subsub_number}]:name"));
            subl1.sub_subl1.push(sub_subl1);
        }
        entry.subl1.push(subl1);
    }
    entry
}

fn inbtw_list_entry(
    number: i32,
    subl1_numbers: [i32; 2],
    prefix: &str,
) -> inbtw_list::ldata::Ldata {
    use inbtw_list::ldata::subc::subc_subl1;

    let mut entry = inbtw_list::ldata::Ldata::default();
    entry.number.set(number);
    entry.name.set(format!("{prefix}inbtwlist[{number}]:name"));
    entry.subc.number.set(number * 10 + 1);
    entry.subc.name.set(format!("{prefix}inbtwlist[{number}]:subc:name"));
    for sub_number in subl1_numbers {
        let mut subl1 = subc_subl1::SubcSubl1::default();
        subl1.number.set(sub_number);
        subl1.name.set(format!(
            "{prefix}inbtwlist[{number}]:subc:subcsubl1[{sub_number}]:name"
        ));
        entry.subc.subc_subl1.push(subl1);
    }
    entry
}

//
// Tests.
//

#[test]
fn one_level_pos() {
    let service = service();
    let mut stub = stub();

    // Create.
    let mut r_1 = sanity::Runner::default();
    r_1.one.number.set(1);
    r_1.one.name.set("runner:one:name");
    service.create(&mut stub, &r_1).unwrap();
    let r_2 = read_runner(&service, &mut stub).unwrap();
    assert_eq!(r_2.one.number.as_i64(), Some(1));
    assert_eq!(r_2.one.name.as_str(), Some("runner:one:name"));
    assert_eq!(r_1, r_2);

    // Update.
    let mut r_1 = sanity::Runner::default();
    r_1.one.number.set(10);
    r_1.one.name.set("runner/one/name");
    service.update(&mut stub, &r_1).unwrap();
    let r_2 = read_runner(&service, &mut stub).unwrap();
    assert_eq!(r_1, r_2);

    // Delete.
    delete_runner(&service, &mut stub);
}

#[test]
fn two_level_pos() {
    let service = service();
    let mut stub = stub();

    let mut r_1 = sanity::Runner::default();
    r_1.two.number.set(2);
    r_1.two.name.set("runner:two:name");
    r_1.two.sub1.number.set(21);
    service.create(&mut stub, &r_1).unwrap();
    let r_2 = read_runner(&service, &mut stub).unwrap();
    assert_eq!(r_1.two, r_2.two);

    let mut r_1 = sanity::Runner::default();
    r_1.two.number.set(20);
    r_1.two.name.set("runner/two/name");
    r_1.two.sub1.number.set(210);
    service.update(&mut stub, &r_1).unwrap();
    let r_2 = read_runner(&service, &mut stub).unwrap();
    assert_eq!(r_1.two, r_2.two);

    delete_runner(&service, &mut stub);
}

#[test]
fn nested_container_crud() {
    let service = service();
    let mut stub = stub();

    let mut r_1 = sanity::Runner::default();
    r_1.three.number.set(3);
    r_1.three.sub1.number.set(31);
    r_1.three.sub1.sub2.number.set(311);
    service.create(&mut stub, &r_1).unwrap();

    let r_2 = read_runner(&service, &mut stub).unwrap();
    assert_eq!(r_2.three.number.as_i64(), Some(3));
    assert_eq!(r_2.three.sub1.number.as_i64(), Some(31));
    assert_eq!(r_2.three.sub1.sub2.number.as_i64(), Some(311));
    assert!(!r_2.three.name.has_data());

    delete_runner(&service, &mut stub);
}

#[test]
fn three_level_update() {
    let service = service();
    let mut stub = stub();

    let mut r_1 = sanity::Runner::default();
    r_1.three.number.set(3);
    r_1.three.name.set("runner:three:name");
    r_1.three.sub1.number.set(31);
    r_1.three.sub1.sub2.number.set(311);
    service.create(&mut stub, &r_1).unwrap();

    let mut r_1 = sanity::Runner::default();
    r_1.three.number.set(30);
    r_1.three.name.set("runner/three/name");
    r_1.three.sub1.number.set(310);
    r_1.three.sub1.sub2.number.set(3110);
    service.update(&mut stub, &r_1).unwrap();
    let r_2 = read_runner(&service, &mut stub).unwrap();
    assert_eq!(r_1, r_2);

    delete_runner(&service, &mut stub);
}

#[test]
fn onelist_pos() {
    let service = service();
    let mut stub = stub();

    let mut r_1 = sanity::Runner::default();
    r_1.one_list.ldata.push(one_list_entry(1, "runner:onelist:ldata[1]:name"));
    r_1.one_list.ldata.push(one_list_entry(2, "runner:onelist:ldata[2]:name"));
    service.create(&mut stub, &r_1).unwrap();
    let r_2 = read_runner(&service, &mut stub).unwrap();
    assert_eq!(r_2.one_list.ldata.len(), 2);
    assert_eq!(r_1.one_list.ldata, r_2.one_list.ldata);

    let mut r_1 = sanity::Runner::default();
    r_1.one_list.ldata.extend([
        one_list_entry(1, "runner/onelist/ldata[1]/name"),
        one_list_entry(2, "runner/onelist/ldata[2]/name"),
    ]);
    service.update(&mut stub, &r_1).unwrap();
    let r_2 = read_runner(&service, &mut stub).unwrap();
    assert_eq!(r_1.one_list.ldata, r_2.one_list.ldata);

    delete_runner(&service, &mut stub);
}

#[test]
fn onelist_order_preserved() {
    let service = service();
    let mut stub = stub();

    let mut r_1 = sanity::Runner::default();
    for number in [5, 1, 3] {
        r_1.one_list.ldata.push(one_list_entry(number, "entry"));
    }
    service.create(&mut stub, &r_1).unwrap();

    let r_2 = read_runner(&service, &mut stub).unwrap();
    let numbers: Vec<_> = r_2
        .one_list
        .ldata
        .iter()
        .filter_map(|entry| entry.number.as_i64())
        .collect();
    assert_eq!(numbers, vec![5, 1, 3]);
}

#[test]
fn onelist_neg_dupkey() {
    let service = service();
    let mut stub = stub();

    // Duplicate keys are passed through unchanged and the server merges
    // them into a single entry.
    let mut r_1 = sanity::Runner::default();
    let mut e_1 = one_list::ldata::Ldata::default();
    e_1.number.set(1);
    let e_2 = one_list_entry(1, "bar");
    r_1.one_list.ldata.extend([e_1, e_2]);
    service.create(&mut stub, &r_1).unwrap();

    let request = stub.last_request().unwrap();
    assert_eq!(request.matches("<number>1</number>").count(), 2);

    let r_2 = read_runner(&service, &mut stub).unwrap();
    assert_eq!(r_2.one_list.ldata.len(), 1);
    assert_eq!(r_2.one_list.ldata[0].name.as_str(), Some("bar"));
}

#[test]
fn twolist_pos() {
    let service = service();
    let mut stub = stub();

    let mut r_1 = sanity::Runner::default();
    r_1.two_list.ldata.push(two_list_entry(21, "runner:twolist:"));
    r_1.two_list.ldata.push(two_list_entry(22, "runner:twolist:"));
    service.create(&mut stub, &r_1).unwrap();
    let r_2 = read_runner(&service, &mut stub).unwrap();
    assert_eq!(r_2.two_list.ldata[1].subl1[0].number.as_i64(), Some(221));
    assert_eq!(r_1.two_list, r_2.two_list);

    let mut r_1 = sanity::Runner::default();
    r_1.two_list.ldata.push(two_list_entry(21, "runner/twolist/"));
    r_1.two_list.ldata.push(two_list_entry(22, "runner/twolist/"));
    service.update(&mut stub, &r_1).unwrap();
    let r_2 = read_runner(&service, &mut stub).unwrap();
    assert_eq!(r_1.two_list, r_2.two_list);

    delete_runner(&service, &mut stub);
}

#[test]
fn threelist_pos() {
    let service = service();
    let mut stub = stub();

    let mut r_1 = sanity::Runner::default();
    r_1.three_list.ldata.push(three_list_entry(31, "runner:threelist:"));
    r_1.three_list.ldata.push(three_list_entry(32, "runner:threelist:"));
    service.create(&mut stub, &r_1).unwrap();
    let r_2 = read_runner(&service, &mut stub).unwrap();
    assert_eq!(
        r_2.three_list.ldata[1].subl1[1].sub_subl1[0].number.as_i64(),
        Some(3221)
    );
    assert_eq!(r_1.three_list, r_2.three_list);

    let mut r_1 = sanity::Runner::default();
    r_1.three_list.ldata.push(three_list_entry(31, "runner/threelist/"));
    r_1.three_list.ldata.push(three_list_entry(32, "runner/threelist/"));
    service.update(&mut stub, &r_1).unwrap();
    let r_2 = read_runner(&service, &mut stub).unwrap();
    assert_eq!(r_1.three_list, r_2.three_list);

    delete_runner(&service, &mut stub);
}

#[test]
fn inbtw_list_pos() {
    let service = service();
    let mut stub = stub();

    let mut r_1 = sanity::Runner::default();
    r_1.inbtw_list.ldata.extend([
        inbtw_list_entry(11, [111, 112], "runner:"),
        inbtw_list_entry(12, [121, 122], "runner:"),
    ]);
    service.create(&mut stub, &r_1).unwrap();
    let r_2 = read_runner(&service, &mut stub).unwrap();
    assert_eq!(r_2.inbtw_list.ldata[0].subc.number.as_i64(), Some(111));
    assert_eq!(r_1.inbtw_list, r_2.inbtw_list);

    let mut r_1 = sanity::Runner::default();
    r_1.inbtw_list.ldata.extend([
        inbtw_list_entry(11, [111, 112], "runner/"),
        inbtw_list_entry(12, [121, 122], "runner/"),
    ]);
    service.update(&mut stub, &r_1).unwrap();
    let r_2 = read_runner(&service, &mut stub).unwrap();
    assert_eq!(r_1.inbtw_list, r_2.inbtw_list);

    delete_runner(&service, &mut stub);
}

#[test]
fn leafref_simple_pos() {
    let service = service();
    let mut stub = stub();

    let mut r_1 = sanity::Runner::default();
    let built_in_t = &mut r_1.ytypes.built_in_t;
    built_in_t.number8.set(100i8);
    built_in_t.leaf_ref.set_reference("../number8").unwrap();
    service.create(&mut stub, &r_1).unwrap();
    let r_2 = read_runner(&service, &mut stub).unwrap();
    assert_eq!(r_2.ytypes.built_in_t.number8.as_i64(), Some(100));
    assert_eq!(r_2.ytypes.built_in_t.leaf_ref.as_i64(), Some(100));

    let mut r_1 = sanity::Runner::default();
    let built_in_t = &mut r_1.ytypes.built_in_t;
    built_in_t.leaf_ref.set_reference("../number8").unwrap();
    built_in_t.number8.set(110i8);
    service.update(&mut stub, &r_1).unwrap();
    let r_2 = read_runner(&service, &mut stub).unwrap();
    assert_eq!(r_2.ytypes.built_in_t.number8.as_i64(), Some(110));
    assert_eq!(r_2.ytypes.built_in_t.leaf_ref.as_i64(), Some(110));

    delete_runner(&service, &mut stub);
}

#[test]
fn leafref_pos() {
    let service = service();
    let mut stub = stub();

    for prefix in ["runner:", "runner/"] {
        let mut r_1 = sanity::Runner::default();
        r_1.one.name.set(format!("{prefix}one:name"));
        r_1.two.sub1.number.set(21);
        r_1.three.sub1.sub2.number.set(311);
        r_1.inbtw_list.ldata.extend([
            inbtw_list_entry(11, [111, 112], prefix),
            inbtw_list_entry(21, [311, 122], prefix),
        ]);

        let leaf_ref = &mut r_1.leaf_ref;
        leaf_ref
            .ref_one_name
            .set_reference("/holo-sanity:runner/one/name")
            .unwrap();
        leaf_ref
            .ref_two_sub1_number
            .set_reference("/holo-sanity:runner/two/sub1/number")
            .unwrap();
        leaf_ref
            .ref_three_sub1_sub2_number
            .set_reference("/holo-sanity:runner/three/sub1/sub2/number")
            .unwrap();
        leaf_ref
            .ref_inbtw
            .set_reference(
                "/holo-sanity:runner/inbtw-list/ldata[number='21']/subc/\
                 subc-subl1[number='311']/name",
            )
            .unwrap();
        leaf_ref.one.name.set(format!("{prefix}leaf-ref:one:name"));
        leaf_ref
            .one
            .two
            .self_ref_one_name
            .set_reference("../../../ref-one-name")
            .unwrap();

        match prefix {
            "runner:" => service.create(&mut stub, &r_1).unwrap(),
            _ => service.update(&mut stub, &r_1).unwrap(),
        }
        let r_2 = read_runner(&service, &mut stub).unwrap();

        let one_name = format!("{prefix}one:name");
        let leaf_ref = &r_2.leaf_ref;
        assert_eq!(leaf_ref.ref_one_name.as_str(), Some(one_name.as_str()));
        assert_eq!(leaf_ref.ref_two_sub1_number, r_1.two.sub1.number);
        assert_eq!(
            leaf_ref.ref_three_sub1_sub2_number,
            r_1.three.sub1.sub2.number
        );
        assert_eq!(
            leaf_ref.ref_inbtw,
            r_1.inbtw_list.ldata[1].subc.subc_subl1[0].name
        );
        assert_eq!(
            leaf_ref.one.two.self_ref_one_name.as_str(),
            Some(one_name.as_str())
        );
    }

    delete_runner(&service, &mut stub);
}

#[test]
fn aug_one_pos() {
    let service = service();
    let mut stub = stub();

    let mut r_1 = sanity::Runner::default();
    r_1.one.number.set(1);
    r_1.one.name.set("runner:one:name");
    r_1.one.one_aug.number.set(1);
    r_1.one.one_aug.name.set("r_1.one.one_aug.name");
    service.create(&mut stub, &r_1).unwrap();

    let request = stub.last_request().unwrap();
    assert!(request.contains("<one-aug"));
    assert!(request.contains("http://holo-routing.org/yang/holo-sanity-augm"));

    let r_2 = read_runner(&service, &mut stub).unwrap();
    assert_eq!(r_2.one.one_aug.number.as_i64(), Some(1));
    assert_eq!(r_1.one, r_2.one);

    let mut r_1 = sanity::Runner::default();
    r_1.one.one_aug.number.set(10);
    r_1.one.one_aug.name.set("r_1:one:one_aug:name");
    service.update(&mut stub, &r_1).unwrap();
    let r_2 = read_runner(&service, &mut stub).unwrap();
    assert_eq!(r_1.one.one_aug, r_2.one.one_aug);
    // Base container fields survive the augmentation update.
    assert_eq!(r_2.one.number.as_i64(), Some(1));

    delete_runner(&service, &mut stub);
}

#[test]
fn aug_onelist_pos() {
    let service = service();
    let mut stub = stub();

    let mut r_1 = sanity::Runner::default();
    let aug = &mut r_1.one_list.one_aug_list;
    aug.enabled.set(true);
    for number in [1, 2] {
        let mut entry = one_aug_list::ldata::Ldata::default();
        entry.number.set(number);
        entry.name.set(format!("one_aug_list.ldata[{number}].name"));
        aug.ldata.push(entry);
    }
    service.create(&mut stub, &r_1).unwrap();
    let r_2 = read_runner(&service, &mut stub).unwrap();
    assert_eq!(r_2.one_list.one_aug_list.enabled.as_bool(), Some(true));
    assert_eq!(r_1.one_list, r_2.one_list);

    delete_runner(&service, &mut stub);
}

#[test]
fn parent_empty() {
    let service = service();
    let mut stub = stub();

    let mut r_1 = sanity::Runner::default();
    r_1.ytypes.enabled.set_presence();
    r_1.ytypes.built_in_t.emptee.set_presence();
    service.create(&mut stub, &r_1).unwrap();

    let r_2 = read_runner(&service, &mut stub).unwrap();
    assert!(r_2.ytypes.enabled.is_present());
    assert!(r_2.ytypes.built_in_t.emptee.is_present());
    assert_eq!(r_1.ytypes, r_2.ytypes);

    delete_runner(&service, &mut stub);
}

#[test]
fn built_in_types() {
    let service = service();
    let mut stub = stub();

    let mut r_1 = sanity::Runner::default();
    let built_in_t = &mut r_1.ytypes.built_in_t;
    built_in_t.number8.set(-8i8);
    built_in_t.number16.set(-16i16);
    built_in_t.number32.set(-32i32);
    built_in_t.number64.set(i64::MIN);
    built_in_t.u_number8.set(u8::MAX);
    built_in_t.u_number16.set(16u16);
    built_in_t.u_number32.set(32u32);
    built_in_t.u_number64.set(u64::MAX);
    built_in_t.emptee.set_presence();
    built_in_t.bool_value.set(false);
    built_in_t.deci64.set("3.14");
    built_in_t.enum_value.set("local");
    built_in_t.identity_ref_value.set("hs:child-identity");
    built_in_t.llstring.extend(["c", "a", "b"]);
    built_in_t.bincoded.set(b"\x00holo\xff".as_slice());
    built_in_t.name.set("built-in name");
    service.create(&mut stub, &r_1).unwrap();

    let r_2 = read_runner(&service, &mut stub).unwrap();
    assert_eq!(r_1.ytypes.built_in_t, r_2.ytypes.built_in_t);
    assert_eq!(r_2.ytypes.built_in_t.u_number64.as_u64(), Some(u64::MAX));
    assert_eq!(r_2.ytypes.built_in_t.llstring.values().len(), 3);
}

#[test]
fn read_single_list_entry() {
    let service = service();
    let mut stub = stub();

    let mut r_1 = sanity::Runner::default();
    r_1.one.number.set(1);
    r_1.one_list.ldata.push(one_list_entry(1, "first"));
    r_1.one_list.ldata.push(one_list_entry(2, "second"));
    service.create(&mut stub, &r_1).unwrap();

    // Key values act as content-match nodes.
    let mut filter = sanity::Runner::default();
    let mut entry = one_list::ldata::Ldata::default();
    entry.number.set(2);
    filter.one_list.ldata.push(entry);
    let r_2 = service.read(&mut stub, &filter).unwrap().unwrap();
    assert_eq!(r_2.one_list.ldata.len(), 1);
    assert_eq!(r_2.one_list.ldata[0].name.as_str(), Some("second"));
    assert!(!r_2.one.has_data());

    // The same entry read directly as a list entry entity.
    let mut filter = one_list::ldata::Ldata::default();
    filter.number.set(1);
    let entry = service.read(&mut stub, &filter).unwrap().unwrap();
    assert_eq!(entry, one_list_entry(1, "first"));
}

#[test]
fn read_nested_container() {
    let service = service();
    let mut stub = stub();

    let mut r_1 = sanity::Runner::default();
    r_1.one.number.set(1);
    r_1.three.number.set(3);
    r_1.three.sub1.sub2.number.set(311);
    service.create(&mut stub, &r_1).unwrap();

    let r_2 = service
        .read(&mut stub, &three::Three::default())
        .unwrap()
        .unwrap();
    assert_eq!(r_2, r_1.three);

    // Selected leaves only.
    let mut filter = sanity::Runner::default();
    filter.three.sub1.sub2.number.read();
    let r_2 = service.read(&mut stub, &filter).unwrap().unwrap();
    assert_eq!(r_2.three.sub1.sub2.number.as_i64(), Some(311));
    assert!(!r_2.three.number.has_data());
    assert!(!r_2.one.has_data());
}

#[test]
fn read_not_found() {
    let service = service();
    let mut stub = stub();

    // Nothing on the server at all.
    assert!(read_runner(&service, &mut stub).is_none());

    let mut r_1 = sanity::Runner::default();
    r_1.one_list.ldata.push(one_list_entry(1, "first"));
    service.create(&mut stub, &r_1).unwrap();

    // Data exists, but not the requested entry.
    let mut filter = one_list::ldata::Ldata::default();
    filter.number.set(99);
    assert_eq!(service.read(&mut stub, &filter).unwrap(), None);

    // Data exists, but not the requested container.
    let filter = three::Three::default();
    assert_eq!(service.read(&mut stub, &filter).unwrap(), None);
}

#[test]
fn read_all_includes_running_data() {
    let service = service();
    let mut stub = stub();

    let mut r_1 = sanity::Runner::default();
    r_1.two.number.set(2);
    service.create(&mut stub, &r_1).unwrap();

    let r_2 = service
        .read_all(&mut stub, &sanity::Runner::default())
        .unwrap()
        .unwrap();
    assert_eq!(r_1, r_2);
    assert!(stub.last_request().unwrap().contains("<get>"));
}

#[test]
fn delete_single_leaf() {
    let service = service();
    let mut stub = stub();

    let mut r_1 = sanity::Runner::default();
    r_1.one.number.set(1);
    r_1.one.name.set("name");
    service.create(&mut stub, &r_1).unwrap();

    let mut r_1 = sanity::Runner::default();
    r_1.one.name.read();
    service.delete(&mut stub, &r_1).unwrap();

    let r_2 = read_runner(&service, &mut stub).unwrap();
    assert_eq!(r_2.one.number.as_i64(), Some(1));
    assert!(!r_2.one.name.has_data());
}

#[test]
fn delete_list_entry() {
    let service = service();
    let mut stub = stub();

    let mut r_1 = sanity::Runner::default();
    r_1.one_list.ldata.push(one_list_entry(1, "first"));
    r_1.one_list.ldata.push(one_list_entry(2, "second"));
    service.create(&mut stub, &r_1).unwrap();

    // Entries carrying nothing but their keys are deleted whole.
    let mut r_1 = sanity::Runner::default();
    let mut entry = one_list::ldata::Ldata::default();
    entry.number.set(1);
    r_1.one_list.ldata.push(entry);
    service.delete(&mut stub, &r_1).unwrap();

    let r_2 = read_runner(&service, &mut stub).unwrap();
    assert_eq!(r_2.one_list.ldata.len(), 1);
    assert_eq!(r_2.one_list.ldata[0], one_list_entry(2, "second"));
}

#[test]
fn delete_whole_list() {
    let service = service();
    let mut stub = stub();

    let mut r_1 = sanity::Runner::default();
    r_1.one.number.set(1);
    r_1.one_list.ldata.push(one_list_entry(1, "first"));
    r_1.one_list.ldata.push(one_list_entry(2, "second"));
    service.create(&mut stub, &r_1).unwrap();

    // A list requested as a whole loses all of its entries.
    let mut r_1 = sanity::Runner::default();
    r_1.one_list.ldata.read();
    service.delete(&mut stub, &r_1).unwrap();

    let r_2 = read_runner(&service, &mut stub).unwrap();
    assert!(r_2.one_list.ldata.is_empty());
    assert_eq!(r_2.one.number.as_i64(), Some(1));

    // Deleting it again reports the missing data.
    let result = service.delete(&mut stub, &r_1);
    assert!(matches!(result, Err(error) if error.has_rpc_tag("data-missing")));

    // Nothing is left once the list was the only content.
    let mut r_1 = sanity::Runner::default();
    r_1.one_list.ldata.push(one_list_entry(3, "third"));
    service.create(&mut stub, &r_1).unwrap();
    let mut r_1 = sanity::Runner::default();
    r_1.one.number.read();
    r_1.one_list.ldata.read();
    service.delete(&mut stub, &r_1).unwrap();
    assert!(read_runner(&service, &mut stub).is_none());
}

#[test]
fn replace_merges_duplicate_entries() {
    let service = service();
    let mut stub = stub();

    let mut r_1 = sanity::Runner::default();
    r_1.one_list.ldata.push(one_list_entry(1, "foo"));
    service.create(&mut stub, &r_1).unwrap();

    let mut r_1 = sanity::Runner::default();
    r_1.one_list.ldata.push(one_list_entry(2, "bar"));
    r_1.one_list.ldata.push(one_list_entry(2, "baz"));
    service
        .edit(&mut stub, &r_1, EditOperation::Replace)
        .unwrap();

    let r_2 = read_runner(&service, &mut stub).unwrap();
    assert_eq!(r_2.one_list.ldata.len(), 1);
    assert_eq!(r_2.one_list.ldata[0], one_list_entry(2, "baz"));
}

#[test]
fn delete_leaf_list_value() {
    let service = service();
    let mut stub = stub();

    let mut r_1 = sanity::Runner::default();
    r_1.ytypes.built_in_t.llstring.extend(["a", "b", "c"]);
    service.create(&mut stub, &r_1).unwrap();

    let mut r_1 = sanity::Runner::default();
    r_1.ytypes.built_in_t.llstring.push("b");
    service.delete(&mut stub, &r_1).unwrap();

    let r_2 = read_runner(&service, &mut stub).unwrap();
    let values: Vec<_> = r_2
        .ytypes
        .built_in_t
        .llstring
        .values()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(values, vec!["a", "c"]);
}

#[test]
fn candidate_datastore() {
    let service = CrudService::new(Config {
        target: Datastore::Candidate,
        source: Datastore::Candidate,
        ..Default::default()
    });
    let mut stub = stub();

    let mut r_1 = sanity::Runner::default();
    r_1.one.number.set(1);
    service.create(&mut stub, &r_1).unwrap();

    assert!(stub.datastore(Datastore::Running).unwrap().is_empty());
    assert!(!stub.datastore(Datastore::Candidate).unwrap().is_empty());
    assert!(stub.last_request().unwrap().contains("<candidate"));

    let r_2 = service.read(&mut stub, &sanity::Runner::default()).unwrap();
    assert_eq!(r_2, Some(r_1));
    let running = super::service()
        .read(&mut stub, &sanity::Runner::default())
        .unwrap();
    assert!(running.is_none());
}

#[test]
fn entity_tree_has_data() {
    let mut runner = sanity::Runner::default();
    assert!(!runner.has_data());
    assert!(!runner.is_touched());

    runner.two.sub1.number.read();
    assert!(!runner.has_data());
    assert!(runner.is_touched());

    runner.two.sub1.number.set(1);
    assert!(runner.has_data());

    runner.clear();
    assert!(!runner.is_touched());
    assert_eq!(runner, sanity::Runner::default());
}
