//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

pub mod schema;

use std::borrow::Cow;

pub use crate::schema::{
    LeafType, SchemaError, SchemaModule, SchemaNode, SchemaNodeKind,
};

// Namespace of the NETCONF base protocol.
pub const NETCONF_BASE_NS: &str = "urn:ietf:params:xml:ns:netconf:base:1.0";

//
// YANG conversion traits.
//

pub trait ToYang {
    // Return YANG textual representation of the value.
    fn to_yang(&self) -> Cow<'static, str>;
}

pub trait TryFromYang: Sized {
    // Construct value from its YANG textual representation.
    fn try_from_yang(value: &str) -> Option<Self>;
}

// ===== primitive conversions =====

macro_rules! impl_yang_integer {
    ($($ty:ty),*) => {
        $(
            impl ToYang for $ty {
                fn to_yang(&self) -> Cow<'static, str> {
                    self.to_string().into()
                }
            }

            impl TryFromYang for $ty {
                fn try_from_yang(value: &str) -> Option<Self> {
                    value.trim().parse().ok()
                }
            }
        )*
    };
}

impl_yang_integer!(i8, i16, i32, i64, u8, u16, u32, u64);

impl ToYang for bool {
    fn to_yang(&self) -> Cow<'static, str> {
        match self {
            true => "true".into(),
            false => "false".into(),
        }
    }
}

impl TryFromYang for bool {
    fn try_from_yang(value: &str) -> Option<Self> {
        match value.trim() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }
}
