//! rsp-codec
//!
//! Boundary between stored inventory and the pricing library:
//! - JSON documents `{ "globals": ..., "items": [...] }`
//! - tabular rows (CSV) with a fixed column set and legacy header aliases
//!
//! Nothing here prices anything; decoded items are handed to
//! `rsp_pricing::compute_price` by the caller.

mod document;
mod error;
mod item;
pub mod tabular;

pub use document::{load_document, save_document, DocumentFormat, PricingDocument};
pub use error::CodecError;
pub use item::InventoryItem;
pub use tabular::{read_items_csv, write_items_csv, COLUMNS};
