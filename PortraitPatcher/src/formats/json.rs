//! JSON5 document reading and JSON writing
//!
//! Content Patcher and SMAPI accept JSON5 (comments, trailing commas,
//! unquoted keys), so every input goes through `json5`. Output is plain JSON
//! with quoted keys and 4-space indentation, which both loaders also accept.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Read and parse a JSON5 file into any deserializable type
///
/// # Errors
/// Returns an error if the file cannot be read or is not valid JSON5.
pub fn read_json5<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| Error::file_io("read", path, e))?;
    parse_json5(&content, path)
}

/// Parse JSON5 text; `origin` is only used for error context
///
/// # Errors
/// Returns an error if the text is not valid JSON5.
pub fn parse_json5<T: DeserializeOwned>(content: &str, origin: &Path) -> Result<T> {
    // Some editors save mod files with a UTF-8 BOM
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    json5::from_str(content).map_err(|e| Error::Json5Parse {
        path: origin.to_path_buf(),
        message: e.to_string(),
    })
}

/// Read a JSON5 file whose top level must be an object
///
/// # Errors
/// Returns an error if the file cannot be parsed or is not an object.
pub fn read_json5_object<P: AsRef<Path>>(path: P) -> Result<Map<String, Value>> {
    let path = path.as_ref();
    match read_json5::<Value, _>(path)? {
        Value::Object(map) => Ok(map),
        _ => Err(Error::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

/// Serialize a value as pretty JSON with 4-space indentation and a trailing newline
///
/// # Errors
/// Returns an error if serialization fails.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    buffer.push(b'\n');

    Ok(String::from_utf8(buffer)?)
}

/// Write a value to disk as pretty JSON
///
/// # Errors
/// Returns an error if serialization or file writing fails.
pub fn write_json<T: Serialize + ?Sized, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let path = path.as_ref();
    let json = to_pretty_json(value)?;
    fs::write(path, json).map_err(|e| Error::file_io("write", path, e))
}
