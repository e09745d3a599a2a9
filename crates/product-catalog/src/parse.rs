//! Line-oriented parser for the product CSV.
//!
//! Fields are split on a bare comma. There is no quoting, so a comma inside a
//! product name splits the field; exports must avoid it.

use std::collections::HashMap;
use std::io::BufRead;

use tracing::debug;

use crate::{CatalogLoadError, LoadStats, Product};

/// Field separator for catalog records.
pub const DELIMITER: char = ',';

type Parsed = (HashMap<String, Product>, LoadStats);

/// Read records from a reader, failing on the first I/O error.
pub(crate) fn read_records(reader: impl BufRead) -> Result<Parsed, CatalogLoadError> {
    let mut lines = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| CatalogLoadError::Read {
            path: None,
            line: idx + 1,
            source,
        })?;
        lines.push(line);
    }
    Ok(parse_lines(lines.iter().map(String::as_str)))
}

/// Parse already-decoded lines. The first line is the header and is discarded.
pub(crate) fn parse_lines<'a>(lines: impl Iterator<Item = &'a str>) -> Parsed {
    let mut products = HashMap::new();
    let mut stats = LoadStats::default();

    // Line numbers are 1-based and include the header.
    for (idx, line) in lines.enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        match parse_record(line) {
            Some(product) => {
                products.insert(product.code.clone(), product);
            }
            None => {
                debug!(line = idx + 1, "Skipping malformed product record");
                stats.skipped += 1;
            }
        }
    }

    stats.loaded = products.len();
    (products, stats)
}

fn parse_record(line: &str) -> Option<Product> {
    let mut fields = line.split(DELIMITER).map(str::trim);
    let code = fields.next()?;
    let name = fields.next()?;
    let price = fields.next().unwrap_or_default();

    if code.is_empty() {
        return None;
    }

    Some(Product {
        code: code.to_string(),
        name: name.to_string(),
        price: price.to_string(),
    })
}
