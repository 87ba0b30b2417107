//! Tabular (CSV) item rows.
//!
//! ## Column contract (case-insensitive, order-independent on read)
//!
//! | Column                | Notes                                        |
//! |-----------------------|----------------------------------------------|
//! | `name`                |                                              |
//! | `category`            |                                              |
//! | `purchaseDate`        | `YYYY-MM-DD`                                 |
//! | `recycleDate`         | legacy header `date` accepted                |
//! | `cost`                | empty cell or missing column reads as 0      |
//! | `margin`              | empty cell = unset                           |
//! | `market`              | empty cell = unset                           |
//! | `marketAdj`           | empty cell = unset                           |
//! | `repair`              | true only for case-insensitive `true`        |
//! | `repairNote`          |                                              |
//! | `monthlyCoefficients` | comma-joined row; legacy `monthlyCoeffs`     |
//!
//! Writing always emits every column in the order above, quoting only cells
//! that contain a delimiter, a quote or a line break.

use std::collections::HashMap;

use csv::{QuoteStyle, ReaderBuilder, StringRecord, WriterBuilder};
use rsp_pricing::{parse_coefficient_row, parse_numberish, ItemPricingInput};

use crate::error::CodecError;
use crate::item::{parse_repair_flag, InventoryItem};

pub const COLUMNS: [&str; 11] = [
    "name",
    "category",
    "purchaseDate",
    "recycleDate",
    "cost",
    "margin",
    "market",
    "marketAdj",
    "repair",
    "repairNote",
    "monthlyCoefficients",
];

/// Legacy header → current column.
const HEADER_ALIASES: [(&str, &str); 2] = [
    ("date", "recycleDate"),
    ("monthlyCoeffs", "monthlyCoefficients"),
];

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

/// Parse CSV text into items. Empty input yields no items.
///
/// Only malformed CSV fails; malformed or missing cells are coerced the same
/// way the pricing normalizer would.
pub fn read_items_csv(src: &str) -> Result<Vec<InventoryItem>, CodecError> {
    if src.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .from_reader(src.as_bytes());

    let col_idx = build_col_index(rdr.headers()?);
    if !col_idx.contains_key("cost") {
        tracing::warn!("csv has no cost column; every row reads cost as 0");
    }

    let mut out = Vec::new();
    for (i, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let row = i + 2;
        let cell = |name: &str| field(&rec, &col_idx, name);
        let text = |name: &str| -> Option<String> {
            let t = cell(name).trim();
            (!t.is_empty()).then(|| t.to_string())
        };

        let coeff_raw = cell("monthlyCoefficients").trim();
        let monthly_coefficients = if coeff_raw.is_empty() {
            None
        } else {
            let parsed = parse_coefficient_row(coeff_raw);
            if parsed.is_none() {
                tracing::warn!(row, raw = coeff_raw, "ignoring unparseable coefficient row");
            }
            parsed
        };

        out.push(InventoryItem {
            name: cell("name").to_string(),
            category: cell("category").to_string(),
            repair: parse_repair_flag(cell("repair")),
            repair_note: cell("repairNote").to_string(),
            pricing: ItemPricingInput {
                cost: parse_numberish(cell("cost")).unwrap_or(0.0),
                margin: parse_numberish(cell("margin")),
                market: parse_numberish(cell("market")),
                market_adj: parse_numberish(cell("marketAdj")),
                recycle_date: text("recycleDate"),
                purchase_date: text("purchaseDate"),
                monthly_coefficients,
            },
        });
    }

    Ok(out)
}

fn field<'r>(rec: &'r StringRecord, col_idx: &HashMap<String, usize>, name: &str) -> &'r str {
    col_idx
        .get(&name.to_ascii_lowercase())
        .and_then(|&at| rec.get(at))
        .unwrap_or("")
}

/// Case-insensitive column-name → index map, with legacy aliases folded in.
/// A current header wins over its legacy alias when both are present.
fn build_col_index(headers: &StringRecord) -> HashMap<String, usize> {
    let mut idx: HashMap<String, usize> = HashMap::new();
    for (i, col) in headers.iter().enumerate() {
        idx.entry(col.trim().to_ascii_lowercase()).or_insert(i);
    }

    for (legacy, current) in HEADER_ALIASES {
        let current = current.to_ascii_lowercase();
        if let Some(&i) = idx.get(&legacy.to_ascii_lowercase()) {
            idx.entry(current).or_insert(i);
        }
    }

    idx
}

// ---------------------------------------------------------------------------
// Write
// ---------------------------------------------------------------------------

pub fn write_items_csv(items: &[InventoryItem]) -> Result<String, CodecError> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());

    wtr.write_record(COLUMNS)?;
    for item in items {
        wtr.write_record(row_cells(item))?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| CodecError::Io(format!("flush csv: {e}")))?;
    String::from_utf8(bytes).map_err(|e| CodecError::Csv(format!("non-utf8 output: {e}")))
}

fn row_cells(item: &InventoryItem) -> [String; 11] {
    let p = &item.pricing;
    let opt = |v: Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();
    [
        item.name.clone(),
        item.category.clone(),
        p.purchase_date.clone().unwrap_or_default(),
        p.recycle_date.clone().unwrap_or_default(),
        p.cost.to_string(),
        opt(p.margin),
        opt(p.market),
        opt(p.market_adj),
        item.repair.to_string(),
        item.repair_note.clone(),
        p.monthly_coefficients
            .map(|t| t.to_text())
            .unwrap_or_default(),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
