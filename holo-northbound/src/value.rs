//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use holo_yang::{LeafType, ToYang, TryFromYang};

use crate::entity::Value;

// Converts a scalar value into its canonical textual form according to the
// given leaf type.
pub(crate) fn to_text(
    value: &Value,
    ltype: &LeafType,
) -> Result<String, String> {
    let mismatch = || format!("{value} is not a valid {}", ltype.name());

    match ltype {
        LeafType::LeafRef(_, real) => to_text(value, real),
        LeafType::Int8 => int_to_text::<i8>(value).ok_or_else(mismatch),
        LeafType::Int16 => int_to_text::<i16>(value).ok_or_else(mismatch),
        LeafType::Int32 => int_to_text::<i32>(value).ok_or_else(mismatch),
        LeafType::Int64 => int_to_text::<i64>(value).ok_or_else(mismatch),
        LeafType::Uint8 => int_to_text::<u8>(value).ok_or_else(mismatch),
        LeafType::Uint16 => int_to_text::<u16>(value).ok_or_else(mismatch),
        LeafType::Uint32 => int_to_text::<u32>(value).ok_or_else(mismatch),
        LeafType::Uint64 => int_to_text::<u64>(value).ok_or_else(mismatch),
        LeafType::Bool => match value {
            Value::Bool(value) => Ok(value.to_yang().into_owned()),
            _ => Err(mismatch()),
        },
        LeafType::Binary => match value {
            Value::Binary(value) => Ok(BASE64.encode(value)),
            _ => Err(mismatch()),
        },
        LeafType::Decimal64(digits) => match value {
            Value::Int(value) => Ok(format!("{value}.0")),
            Value::Uint(value) => Ok(format!("{value}.0")),
            Value::String(value) if is_decimal64(value, *digits) => {
                Ok(value.clone())
            }
            _ => Err(mismatch()),
        },
        LeafType::Enumeration(names) => match value {
            Value::String(value)
                if names.iter().any(|name| *name == value.as_str()) =>
            {
                Ok(value.clone())
            }
            _ => Err(mismatch()),
        },
        LeafType::String | LeafType::IdentityRef => match value {
            Value::String(value) => Ok(value.clone()),
            _ => Err(mismatch()),
        },
        LeafType::Empty => Err(mismatch()),
    }
}

// Converts text received from the device into a scalar value according to the
// given leaf type.
pub(crate) fn from_text(text: &str, ltype: &LeafType) -> Option<Value> {
    match ltype {
        LeafType::LeafRef(_, real) => from_text(text, real),
        LeafType::Int8 => i8::try_from_yang(text).map(Value::from),
        LeafType::Int16 => i16::try_from_yang(text).map(Value::from),
        LeafType::Int32 => i32::try_from_yang(text).map(Value::from),
        LeafType::Int64 => i64::try_from_yang(text).map(Value::from),
        LeafType::Uint8 => u8::try_from_yang(text).map(Value::from),
        LeafType::Uint16 => u16::try_from_yang(text).map(Value::from),
        LeafType::Uint32 => u32::try_from_yang(text).map(Value::from),
        LeafType::Uint64 => u64::try_from_yang(text).map(Value::from),
        LeafType::Bool => bool::try_from_yang(text).map(Value::Bool),
        LeafType::Binary => {
            let text: String =
                text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
            BASE64.decode(text).ok().map(Value::Binary)
        }
        LeafType::Decimal64(digits) => is_decimal64(text.trim(), *digits)
            .then(|| Value::String(text.trim().to_owned())),
        LeafType::Enumeration(names) => names
            .iter()
            .any(|name| *name == text.trim())
            .then(|| Value::String(text.trim().to_owned())),
        LeafType::String => Some(Value::String(text.to_owned())),
        LeafType::IdentityRef => Some(Value::String(text.trim().to_owned())),
        LeafType::Empty => None,
    }
}

// ===== helper functions =====

fn int_to_text<T>(value: &Value) -> Option<String>
where
    T: ToYang + TryFrom<i64> + TryFrom<u64>,
{
    let value = match value {
        Value::Int(value) => <T as TryFrom<i64>>::try_from(*value).ok(),
        Value::Uint(value) => <T as TryFrom<u64>>::try_from(*value).ok(),
        _ => None,
    };
    value.map(|value| value.to_yang().into_owned())
}

fn is_decimal64(text: &str, digits: u8) -> bool {
    let text = text.strip_prefix('-').unwrap_or(text);
    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, fraction),
        None => (text, ""),
    };
    !integer.is_empty()
        && integer.chars().all(|c| c.is_ascii_digit())
        && fraction.chars().all(|c| c.is_ascii_digit())
        && fraction.len() <= digits as usize
}
