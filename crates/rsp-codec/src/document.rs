use std::fs;
use std::path::Path;

use rsp_pricing::GlobalPricingConfig;
use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::item::InventoryItem;
use crate::tabular::{read_items_csv, write_items_csv};

/// Full stored state: one globals block plus the item list.
///
/// A partial `globals` object overlays the seed defaults; a missing one
/// means defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingDocument {
    pub globals: GlobalPricingConfig,
    pub items: Vec<InventoryItem>,
}

impl PricingDocument {
    pub fn from_json_str(src: &str) -> Result<Self, CodecError> {
        Ok(serde_json::from_str(src)?)
    }

    pub fn to_json_string(&self) -> Result<String, CodecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Csv,
}

impl DocumentFormat {
    /// By file extension, case-insensitive.
    pub fn from_path(path: &Path) -> Result<Self, CodecError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") => Ok(DocumentFormat::Json),
            Some("csv") => Ok(DocumentFormat::Csv),
            _ => Err(CodecError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Read a JSON document or a CSV item list. CSV carries no globals, so the
/// seed defaults apply.
pub fn load_document(path: &Path) -> Result<PricingDocument, CodecError> {
    let format = DocumentFormat::from_path(path)?;
    let src = fs::read_to_string(path)
        .map_err(|e| CodecError::Io(format!("read '{}': {e}", path.display())))?;

    let doc = match format {
        DocumentFormat::Json => PricingDocument::from_json_str(&src)?,
        DocumentFormat::Csv => PricingDocument {
            globals: GlobalPricingConfig::default(),
            items: read_items_csv(&src)?,
        },
    };
    tracing::debug!(path = %path.display(), items = doc.items.len(), "document loaded");
    Ok(doc)
}

/// Write by extension. Globals are dropped when writing CSV.
pub fn save_document(path: &Path, doc: &PricingDocument) -> Result<(), CodecError> {
    let body = match DocumentFormat::from_path(path)? {
        DocumentFormat::Json => doc.to_json_string()?,
        DocumentFormat::Csv => {
            if doc.globals != GlobalPricingConfig::default() {
                tracing::warn!(path = %path.display(), "csv output does not carry globals");
            }
            write_items_csv(&doc.items)?
        }
    };
    fs::write(path, body).map_err(|e| CodecError::Io(format!("write '{}': {e}", path.display())))
}
