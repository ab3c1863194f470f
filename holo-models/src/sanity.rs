//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! Bindings for the `holo-sanity` module.

use holo_northbound::entity;
use holo_yang::{
    LeafType, SchemaModule, SchemaNode, schema_container, schema_leaf,
    schema_leaf_list, schema_list,
};

use crate::sanity_augm;

pub static MODULE: SchemaModule = SchemaModule {
    name: "holo-sanity",
    prefix: "hs",
    namespace: "http://holo-routing.org/yang/holo-sanity",
    revision: Some("2025-06-10"),
};

pub static RUNNER: SchemaNode = schema_container!(
    "runner",
    MODULE,
    None,
    [
        ytypes::YTYPES,
        one::ONE,
        two::TWO,
        three::THREE,
        one_list::ONE_LIST,
        two_list::TWO_LIST,
        three_list::THREE_LIST,
        inbtw_list::INBTW_LIST,
        leaf_ref::LEAF_REF,
    ]
);

entity! {
    pub struct Runner: RUNNER {
        ytypes: container ytypes::Ytypes,
        one: container one::One,
        two: container two::Two,
        three: container three::Three,
        one_list: container one_list::OneList,
        two_list: container two_list::TwoList,
        three_list: container three_list::ThreeList,
        inbtw_list: container inbtw_list::InbtwList,
        leaf_ref: container leaf_ref::LeafRef,
    }
}

pub mod ytypes {
    use super::*;

    pub static YTYPES: SchemaNode = schema_container!(
        "ytypes",
        MODULE,
        Some(&RUNNER),
        [ENABLED, built_in_t::BUILT_IN_T]
    );
    pub static ENABLED: SchemaNode =
        schema_leaf!("enabled", MODULE, YTYPES, LeafType::Empty);

    entity! {
        pub struct Ytypes: YTYPES {
            enabled: leaf ENABLED,
            built_in_t: container built_in_t::BuiltInT,
        }
    }

    pub mod built_in_t {
        use super::*;

        pub static BUILT_IN_T: SchemaNode = schema_container!(
            "built-in-t",
            MODULE,
            Some(&YTYPES),
            [
                NUMBER8,
                NUMBER16,
                NUMBER32,
                NUMBER64,
                U_NUMBER8,
                U_NUMBER16,
                U_NUMBER32,
                U_NUMBER64,
                LEAF_REF,
                EMPTEE,
                BOOL_VALUE,
                DECI64,
                ENUM_VALUE,
                IDENTITY_REF_VALUE,
                LLSTRING,
                BINCODED,
                NAME,
            ]
        );
        pub static NUMBER8: SchemaNode =
            schema_leaf!("number8", MODULE, BUILT_IN_T, LeafType::Int8);
        pub static NUMBER16: SchemaNode =
            schema_leaf!("number16", MODULE, BUILT_IN_T, LeafType::Int16);
        pub static NUMBER32: SchemaNode =
            schema_leaf!("number32", MODULE, BUILT_IN_T, LeafType::Int32);
        pub static NUMBER64: SchemaNode =
            schema_leaf!("number64", MODULE, BUILT_IN_T, LeafType::Int64);
        pub static U_NUMBER8: SchemaNode =
            schema_leaf!("u_number8", MODULE, BUILT_IN_T, LeafType::Uint8);
        pub static U_NUMBER16: SchemaNode =
            schema_leaf!("u_number16", MODULE, BUILT_IN_T, LeafType::Uint16);
        pub static U_NUMBER32: SchemaNode =
            schema_leaf!("u_number32", MODULE, BUILT_IN_T, LeafType::Uint32);
        pub static U_NUMBER64: SchemaNode =
            schema_leaf!("u_number64", MODULE, BUILT_IN_T, LeafType::Uint64);
        pub static LEAF_REF: SchemaNode = schema_leaf!(
            "leaf-ref",
            MODULE,
            BUILT_IN_T,
            LeafType::LeafRef("../number8", &LeafType::Int8)
        );
        pub static EMPTEE: SchemaNode =
            schema_leaf!("emptee", MODULE, BUILT_IN_T, LeafType::Empty);
        pub static BOOL_VALUE: SchemaNode =
            schema_leaf!("bool-value", MODULE, BUILT_IN_T, LeafType::Bool);
        pub static DECI64: SchemaNode =
            schema_leaf!("deci64", MODULE, BUILT_IN_T, LeafType::Decimal64(2));
        pub static ENUM_VALUE: SchemaNode = schema_leaf!(
            "enum-value",
            MODULE,
            BUILT_IN_T,
            LeafType::Enumeration(&["none", "local", "remote"])
        );
        pub static IDENTITY_REF_VALUE: SchemaNode = schema_leaf!(
            "identity-ref-value",
            MODULE,
            BUILT_IN_T,
            LeafType::IdentityRef
        );
        pub static LLSTRING: SchemaNode = schema_leaf_list!(
            "llstring",
            MODULE,
            BUILT_IN_T,
            LeafType::String
        );
        pub static BINCODED: SchemaNode =
            schema_leaf!("bincoded", MODULE, BUILT_IN_T, LeafType::Binary);
        pub static NAME: SchemaNode =
            schema_leaf!("name", MODULE, BUILT_IN_T, LeafType::String);

        entity! {
            pub struct BuiltInT: BUILT_IN_T {
                number8: leaf NUMBER8,
                number16: leaf NUMBER16,
                number32: leaf NUMBER32,
                number64: leaf NUMBER64,
                u_number8: leaf U_NUMBER8,
                u_number16: leaf U_NUMBER16,
                u_number32: leaf U_NUMBER32,
                u_number64: leaf U_NUMBER64,
                leaf_ref: leaf LEAF_REF,
                emptee: leaf EMPTEE,
                bool_value: leaf BOOL_VALUE,
                deci64: leaf DECI64,
                enum_value: leaf ENUM_VALUE,
                identity_ref_value: leaf IDENTITY_REF_VALUE,
                llstring: leaf_list LLSTRING,
                bincoded: leaf BINCODED,
                name: leaf NAME,
            }
        }
    }
}

pub mod one {
    use super::*;

    pub static ONE: SchemaNode = schema_container!(
        "one",
        MODULE,
        Some(&RUNNER),
        [NUMBER, NAME, sanity_augm::one_aug::ONE_AUG]
    );
    pub static NUMBER: SchemaNode =
        schema_leaf!("number", MODULE, ONE, LeafType::Int32);
    pub static NAME: SchemaNode =
        schema_leaf!("name", MODULE, ONE, LeafType::String);

    entity! {
        pub struct One: ONE {
            number: leaf NUMBER,
            name: leaf NAME,
            one_aug: container sanity_augm::one_aug::OneAug,
        }
    }
}

pub mod two {
    use super::*;

    pub static TWO: SchemaNode = schema_container!(
        "two",
        MODULE,
        Some(&RUNNER),
        [NUMBER, NAME, sub1::SUB1]
    );
    pub static NUMBER: SchemaNode =
        schema_leaf!("number", MODULE, TWO, LeafType::Int32);
    pub static NAME: SchemaNode =
        schema_leaf!("name", MODULE, TWO, LeafType::String);

    entity! {
        pub struct Two: TWO {
            number: leaf NUMBER,
            name: leaf NAME,
            sub1: container sub1::Sub1,
        }
    }

    pub mod sub1 {
        use super::*;

        pub static SUB1: SchemaNode =
            schema_container!("sub1", MODULE, Some(&TWO), [NUMBER]);
        pub static NUMBER: SchemaNode =
            schema_leaf!("number", MODULE, SUB1, LeafType::Int32);

        entity! {
            pub struct Sub1: SUB1 {
                number: leaf NUMBER,
            }
        }
    }
}

pub mod three {
    use super::*;

    pub static THREE: SchemaNode = schema_container!(
        "three",
        MODULE,
        Some(&RUNNER),
        [NUMBER, NAME, sub1::SUB1]
    );
    pub static NUMBER: SchemaNode =
        schema_leaf!("number", MODULE, THREE, LeafType::Int32);
    pub static NAME: SchemaNode =
        schema_leaf!("name", MODULE, THREE, LeafType::String);

    entity! {
        pub struct Three: THREE {
            number: leaf NUMBER,
            name: leaf NAME,
            sub1: container sub1::Sub1,
        }
    }

    pub mod sub1 {
        use super::*;

        pub static SUB1: SchemaNode = schema_container!(
            "sub1",
            MODULE,
            Some(&THREE),
            [NUMBER, sub2::SUB2]
        );
        pub static NUMBER: SchemaNode =
            schema_leaf!("number", MODULE, SUB1, LeafType::Int32);

        entity! {
            pub struct Sub1: SUB1 {
                number: leaf NUMBER,
                sub2: container sub2::Sub2,
            }
        }

        pub mod sub2 {
            use super::*;

            pub static SUB2: SchemaNode =
                schema_container!("sub2", MODULE, Some(&SUB1), [NUMBER]);
            pub static NUMBER: SchemaNode =
                schema_leaf!("number", MODULE, SUB2, LeafType::Int32);

            entity! {
                pub struct Sub2: SUB2 {
                    number: leaf NUMBER,
                }
            }
        }
    }
}

pub mod one_list {
    use super::*;

    pub static ONE_LIST: SchemaNode = schema_container!(
        "one-list",
        MODULE,
        Some(&RUNNER),
        [ldata::LDATA, sanity_augm::one_aug_list::ONE_AUG_LIST]
    );

    entity! {
        pub struct OneList: ONE_LIST {
            ldata: list ldata::Ldata,
            one_aug_list: container sanity_augm::one_aug_list::OneAugList,
        }
    }

    pub mod ldata {
        use super::*;

        pub static LDATA: SchemaNode = schema_list!(
            "ldata",
            MODULE,
            ONE_LIST,
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

pub mod two_list {
    use super::*;

    pub static TWO_LIST: SchemaNode = schema_container!(
        "two-list",
        MODULE,
        Some(&RUNNER),
        [ldata::LDATA]
    );

    entity! {
        pub struct TwoList: TWO_LIST {
            ldata: list ldata::Ldata,
        }
    }

    pub mod ldata {
        use super::*;

        pub static LDATA: SchemaNode = schema_list!(
            "ldata",
            MODULE,
            TWO_LIST,
            keys ["number"],
            [NUMBER, NAME, subl1::SUBL1]
        );
        pub static NUMBER: SchemaNode =
            schema_leaf!("number", MODULE, LDATA, LeafType::Int32);
        pub static NAME: SchemaNode =
            schema_leaf!("name", MODULE, LDATA, LeafType::String);

        entity! {
            pub struct Ldata: LDATA {
                number: leaf NUMBER,
                name: leaf NAME,
                subl1: list subl1::Subl1,
            }
        }

        pub mod subl1 {
            use super::*;

            pub static SUBL1: SchemaNode = schema_list!(
                "subl1",
                MODULE,
                LDATA,
                keys ["number"],
                [NUMBER, NAME]
            );
            pub static NUMBER: SchemaNode =
                schema_leaf!("number", MODULE, SUBL1, LeafType::Int32);
            pub static NAME: SchemaNode =
                schema_leaf!("name", MODULE, SUBL1, LeafType::String);

            entity! {
                pub struct Subl1: SUBL1 {
                    number: leaf NUMBER,
                    name: leaf NAME,
                }
            }
        }
    }
}

pub mod three_list {
    use super::*;

    pub static THREE_LIST: SchemaNode = schema_container!(
        "three-list",
        MODULE,
        Some(&RUNNER),
        [ldata::LDATA]
    );

    entity! {
        pub struct ThreeList: THREE_LIST {
            ldata: list ldata::Ldata,
        }
    }

    pub mod ldata {
        use super::*;

        pub static LDATA: SchemaNode = schema_list!(
            "ldata",
            MODULE,
            THREE_LIST,
            keys ["number"],
            [NUMBER, NAME, subl1::SUBL1]
        );
        pub static NUMBER: SchemaNode =
            schema_leaf!("number", MODULE, LDATA, LeafType::Int32);
        pub static NAME: SchemaNode =
            schema_leaf!("name", MODULE, LDATA, LeafType::String);

        entity! {
            pub struct Ldata: LDATA {
                number: leaf NUMBER,
                name: leaf NAME,
                subl1: list subl1::Subl1,
            }
        }

        pub mod subl1 {
            use super::*;

            pub static SUBL1: SchemaNode = schema_list!(
                "subl1",
                MODULE,
                LDATA,
                keys ["number"],
                [NUMBER, NAME, sub_subl1::SUB_SUBL1]
            );
            pub static NUMBER: SchemaNode =
                schema_leaf!("number", MODULE, SUBL1, LeafType::Int32);
            pub static NAME: SchemaNode =
                schema_leaf!("name", MODULE, SUBL1, LeafType::String);

            entity! {
                pub struct Subl1: SUBL1 {
                    number: leaf NUMBER,
                    name: leaf NAME,
                    sub_subl1: list sub_subl1::SubSubl1,
                }
            }

            pub mod sub_subl1 {
                use super::*;

                pub static SUB_SUBL1: SchemaNode = schema_list!(
                    "sub-subl1",
                    MODULE,
                    SUBL1,
                    keys ["number"],
                    [NUMBER, NAME]
                );
                pub static NUMBER: SchemaNode =
                    schema_leaf!("number", MODULE, SUB_SUBL1, LeafType::Int32);
                pub static NAME: SchemaNode =
                    schema_leaf!("name", MODULE, SUB_SUBL1, LeafType::String);

                entity! {
                    pub struct SubSubl1: SUB_SUBL1 {
                        number: leaf NUMBER,
                        name: leaf NAME,
                    }
                }
            }
        }
    }
}

pub mod inbtw_list {
    use super::*;

    pub static INBTW_LIST: SchemaNode = schema_container!(
        "inbtw-list",
        MODULE,
        Some(&RUNNER),
        [ldata::LDATA]
    );

    entity! {
        pub struct InbtwList: INBTW_LIST {
            ldata: list ldata::Ldata,
        }
    }

    pub mod ldata {
        use super::*;

        pub static LDATA: SchemaNode = schema_list!(
            "ldata",
            MODULE,
            INBTW_LIST,
            keys ["number"],
            [NUMBER, NAME, subc::SUBC]
        );
        pub static NUMBER: SchemaNode =
            schema_leaf!("number", MODULE, LDATA, LeafType::Int32);
        pub static NAME: SchemaNode =
            schema_leaf!("name", MODULE, LDATA, LeafType::String);

        entity! {
            pub struct Ldata: LDATA {
                number: leaf NUMBER,
                name: leaf NAME,
                subc: container subc::Subc,
            }
        }

        pub mod subc {
            use super::*;

            pub static SUBC: SchemaNode = schema_container!(
                "subc",
                MODULE,
                Some(&LDATA),
                [NUMBER, NAME, subc_subl1::SUBC_SUBL1]
            );
            pub static NUMBER: SchemaNode =
                schema_leaf!("number", MODULE, SUBC, LeafType::Int32);
            pub static NAME: SchemaNode =
                schema_leaf!("name", MODULE, SUBC, LeafType::String);

            entity! {
                pub struct Subc: SUBC {
                    number: leaf NUMBER,
                    name: leaf NAME,
                    subc_subl1: list subc_subl1::SubcSubl1,
                }
            }

            pub mod subc_subl1 {
                use super::*;

                pub static SUBC_SUBL1: SchemaNode = schema_list!(
                    "subc-subl1",
                    MODULE,
                    SUBC,
                    keys ["number"],
                    [NUMBER, NAME]
                );
                pub static NUMBER: SchemaNode =
                    schema_leaf!("number", MODULE, SUBC_SUBL1, LeafType::Int32);
                pub static NAME: SchemaNode =
                    schema_leaf!("name", MODULE, SUBC_SUBL1, LeafType::String);

                entity! {
                    pub struct SubcSubl1: SUBC_SUBL1 {
                        number: leaf NUMBER,
                        name: leaf NAME,
                    }
                }
            }
        }
    }
}

pub mod leaf_ref {
    use super::*;

    pub static LEAF_REF: SchemaNode = schema_container!(
        "leaf-ref",
        MODULE,
        Some(&RUNNER),
        [
            REF_ONE_NAME,
            REF_TWO_SUB1_NUMBER,
            REF_THREE_SUB1_SUB2_NUMBER,
            REF_INBTW,
            one::ONE,
        ]
    );
    pub static REF_ONE_NAME: SchemaNode = schema_leaf!(
        "ref-one-name",
        MODULE,
        LEAF_REF,
        LeafType::LeafRef("/runner/one/name", &LeafType::String)
    );
    pub static REF_TWO_SUB1_NUMBER: SchemaNode = schema_leaf!(
        "ref-two-sub1-number",
        MODULE,
        LEAF_REF,
        LeafType::LeafRef("/runner/two/sub1/number", &LeafType::Int32)
    );
    pub static REF_THREE_SUB1_SUB2_NUMBER: SchemaNode = schema_leaf!(
        "ref-three-sub1-sub2-number",
        MODULE,
        LEAF_REF,
        LeafType::LeafRef("/runner/three/sub1/sub2/number", &LeafType::Int32)
    );
    pub static REF_INBTW: SchemaNode = schema_leaf!(
        "ref-inbtw",
        MODULE,
        LEAF_REF,
        LeafType::LeafRef(
            "/runner/inbtw-list/ldata/subc/subc-subl1/name",
            &LeafType::String
        )
    );

    entity! {
        pub struct LeafRef: LEAF_REF {
            ref_one_name: leaf REF_ONE_NAME,
            ref_two_sub1_number: leaf REF_TWO_SUB1_NUMBER,
            ref_three_sub1_sub2_number: leaf REF_THREE_SUB1_SUB2_NUMBER,
            ref_inbtw: leaf REF_INBTW,
            one: container one::One,
        }
    }

    pub mod one {
        use super::*;

        pub static ONE: SchemaNode = schema_container!(
            "one",
            MODULE,
            Some(&LEAF_REF),
            [NAME, two::TWO]
        );
        pub static NAME: SchemaNode =
            schema_leaf!("name", MODULE, ONE, LeafType::String);

        entity! {
            pub struct One: ONE {
                name: leaf NAME,
                two: container two::Two,
            }
        }

        pub mod two {
            use super::*;

            pub static TWO: SchemaNode = schema_container!(
                "two",
                MODULE,
                Some(&ONE),
                [SELF_REF_ONE_NAME]
            );
            pub static SELF_REF_ONE_NAME: SchemaNode = schema_leaf!(
                "self-ref-one-name",
                MODULE,
                TWO,
                LeafType::LeafRef("../../../ref-one-name", &LeafType::String)
            );

            entity! {
                pub struct Two: TWO {
                    self_ref_one_name: leaf SELF_REF_ONE_NAME,
                }
            }
        }
    }
}
