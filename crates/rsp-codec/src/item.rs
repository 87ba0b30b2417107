use std::fmt;

use rsp_pricing::ItemPricingInput;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One stored inventory row: bookkeeping columns plus the pricing input.
///
/// On the wire the pricing fields sit next to the bookkeeping ones in a
/// single flat object.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub name: String,
    pub category: String,
    pub repair: bool,
    pub repair_note: String,
    #[serde(flatten)]
    pub pricing: ItemPricingInput,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct ItemMeta {
    #[serde(deserialize_with = "loose_text")]
    name: String,
    #[serde(deserialize_with = "loose_text")]
    category: String,
    #[serde(deserialize_with = "loose_bool")]
    repair: bool,
    #[serde(deserialize_with = "loose_text")]
    repair_note: String,
}

// Decoded in two passes over one buffered object so the pricing fields keep
// their legacy aliases.
impl<'de> Deserialize<'de> for InventoryItem {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(d)?;
        if !raw.is_object() {
            return Err(de::Error::custom("inventory item must be an object"));
        }
        let meta = ItemMeta::deserialize(&raw).map_err(de::Error::custom)?;
        let pricing = ItemPricingInput::deserialize(&raw).map_err(de::Error::custom)?;
        Ok(InventoryItem {
            name: meta.name,
            category: meta.category,
            repair: meta.repair,
            repair_note: meta.repair_note,
            pricing,
        })
    }
}

/// `true`, or a case-insensitive `"true"` string; anything else is false.
pub(crate) fn parse_repair_flag(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("true")
}

struct LooseBool;

impl<'de> Visitor<'de> for LooseBool {
    type Value = bool;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a boolean or a boolean-like string")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
        Ok(v)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
        Ok(parse_repair_flag(v))
    }

    fn visit_i64<E: de::Error>(self, _v: i64) -> Result<bool, E> {
        Ok(false)
    }

    fn visit_u64<E: de::Error>(self, _v: u64) -> Result<bool, E> {
        Ok(false)
    }

    fn visit_f64<E: de::Error>(self, _v: f64) -> Result<bool, E> {
        Ok(false)
    }

    fn visit_unit<E: de::Error>(self) -> Result<bool, E> {
        Ok(false)
    }
}

fn loose_bool<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    d.deserialize_any(LooseBool)
}

fn loose_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}
