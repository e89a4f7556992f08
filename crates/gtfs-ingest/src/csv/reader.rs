//! Raw CSV access for GTFS files.

use std::io::Read;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Read a whole table into memory.
pub fn read_all(mut source: impl Read) -> std::io::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    source.read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// Strip a leading UTF-8 byte order mark.
pub fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

/// Whether the content has no header line at all.
pub fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}

/// Build a CSV reader over in-memory content.
///
/// Rows may differ in length from the header; the loader reports those
/// itself instead of failing the whole file.
pub fn csv_reader(bytes: &[u8], trim_fields: bool) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(if trim_fields {
            csv::Trim::All
        } else {
            csv::Trim::None
        })
        .from_reader(bytes)
}
