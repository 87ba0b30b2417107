//! `rsp convert`: JSON document <-> CSV rows.

use anyhow::{Context, Result};
use std::path::Path;

pub fn run(input: &str, output: &str) -> Result<()> {
    let doc = rsp_codec::load_document(Path::new(input))
        .with_context(|| format!("load document failed: {input}"))?;
    rsp_codec::save_document(Path::new(output), &doc)
        .with_context(|| format!("write document failed: {output}"))?;

    println!("convert_ok=true items={} output={}", doc.items.len(), output);
    Ok(())
}
