//! Census export loader with encoding and delimiter auto-detection.
//!
//! Reads the wide export verbatim into a [`RawTable`]: header text and cell
//! text are kept as-is apart from surrounding whitespace. No census-specific
//! logic here.

use std::path::Path;

use crate::error::{LoadError, LoadResult};
use crate::logs::log_warning;

/// Delimited file loaded into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// Column headers in file order
    pub headers: Vec<String>,
    /// Data rows, each padded to `headers.len()`
    pub rows: Vec<Vec<String>>,
    /// Detected or used encoding
    pub encoding: String,
    /// Detected or used delimiter
    pub delimiter: char,
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes to string using the specified encoding.
///
/// Malformed input for a known encoding is an error. An encoding label
/// `encoding_rs` does not know falls back to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> LoadResult<String> {
    let label = match encoding.to_lowercase().as_str() {
        "ascii" | "utf8" => "utf-8".to_string(),
        "latin1" | "latin-1" => "iso-8859-1".to_string(),
        other => other.to_string(),
    };

    match encoding_rs::Encoding::for_label(label.as_bytes()) {
        Some(codec) => codec
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| text.into_owned())
            .ok_or_else(|| LoadError::Encoding(format!("content is not valid {}", codec.name()))),
        None => {
            log_warning(format!("Unknown encoding '{}', decoding as UTF-8", encoding));
            Ok(String::from_utf8_lossy(bytes).to_string())
        }
    }
}

/// Detect the delimiter by counting occurrences in the first line
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Load a census export from disk with auto-detection.
///
/// # Example
/// ```ignore
/// let raw = load_census_file("NYC Census Jan-09-2020.csv")?;
/// println!("{} columns, {} rows", raw.headers.len(), raw.rows.len());
/// ```
pub fn load_census_file<P: AsRef<Path>>(path: P) -> LoadResult<RawTable> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => LoadError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io(e),
    })?;

    parse_bytes_auto(&bytes)
}

/// Parse raw bytes with auto-detection of encoding and delimiter.
pub fn parse_bytes_auto(bytes: &[u8]) -> LoadResult<RawTable> {
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(LoadError::EmptyFile);
    }

    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let delimiter = detect_delimiter(&content);

    parse_str(&content, delimiter, encoding)
}

/// Parse decoded text with an explicit delimiter.
///
/// Records shorter than the header are padded with empty cells; records
/// with extra non-empty fields are rejected. Blank records are skipped.
pub fn parse_str(
    content: &str,
    delimiter: char,
    encoding: impl Into<String>,
) -> LoadResult<RawTable> {
    let content = content.trim_start_matches('\u{feff}');
    if content.trim().is_empty() {
        return Err(LoadError::EmptyFile);
    }

    let delimiter_byte = u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| LoadError::ParseError {
            line: 1,
            message: format!("delimiter '{}' is not ASCII", delimiter),
        })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter_byte)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::NoHeaders);
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(csv_error)?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let mut row: Vec<String> = record.iter().map(|f| f.trim().to_string()).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }

        if row.len() > headers.len() {
            if row[headers.len()..].iter().any(|f| !f.is_empty()) {
                return Err(LoadError::ParseError {
                    line,
                    message: format!("{} fields but the header has {}", row.len(), headers.len()),
                });
            }
            row.truncate(headers.len());
        }
        row.resize(headers.len(), String::new());
        rows.push(row);
    }

    Ok(RawTable {
        headers,
        rows,
        encoding: encoding.into(),
        delimiter,
    })
}

fn csv_error(err: csv::Error) -> LoadError {
    let line = err.position().map(|p| p.line()).unwrap_or_default();
    LoadError::ParseError {
        line,
        message: err.to_string(),
    }
}
