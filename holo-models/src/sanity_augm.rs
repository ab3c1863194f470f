//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! Bindings for the `holo-sanity-augm` module, which augments
//! `holo-sanity`.

use holo_northbound::entity;
use holo_yang::{
    LeafType, SchemaModule, SchemaNode, schema_container, schema_leaf,
    schema_list,
};

use crate::sanity;

pub static MODULE: SchemaModule = SchemaModule {
    name: "holo-sanity-augm",
    prefix: "hsa",
    namespace: "http://holo-routing.org/yang/holo-sanity-augm",
    revision: Some("2025-06-10"),
};

pub mod one_aug {
    use super::*;

    pub static ONE_AUG: SchemaNode = schema_container!(
        "one-aug",
        MODULE,
        Some(&sanity::one::ONE),
        [NUMBER, NAME]
    );
    pub static NUMBER: SchemaNode =
        schema_leaf!("number", MODULE, ONE_AUG, LeafType::Int32);
    pub static NAME: SchemaNode =
        schema_leaf!("name", MODULE, ONE_AUG, LeafType::String);

    entity! {
        pub struct OneAug: ONE_AUG {
            number: leaf NUMBER,
            name: leaf NAME,
        }
    }
}

pub mod one_aug_list {
    use super::*;

    pub static ONE_AUG_LIST: SchemaNode = schema_container!(
        "one-aug-list",
        MODULE,
        Some(&sanity::one_list::ONE_LIST),
        [ENABLED, ldata::LDATA]
    );
    pub static ENABLED: SchemaNode =
        schema_leaf!("enabled", MODULE, ONE_AUG_LIST, LeafType::Bool);

    entity! {
        pub struct OneAugList: ONE_AUG_LIST {
            enabled: leaf ENABLED,
            ldata: list ldata::Ldata,
        }
    }

    pub mod ldata {
        use super::*;

        pub static LDATA: SchemaNode = schema_list!(
            "ldata",
            MODULE,
            ONE_AUG_LIST,
            keys ["number"],
            [NUMBER, NAME]
        );
        pub static NUMBER: SchemaNode =
            schema_leaf!("number", MODULE, LDATA, LeafType::Int32);
        pub static NAME: SchemaNode =
            schema_leaf!("name", MODULE, LDATA, LeafType::String);

        entity! {
            pub struct Ldata: LDATA {
                number: leaf NUMBER,
                name: leaf NAME,
            }
        }
    }
}
