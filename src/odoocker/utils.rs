// Process boundary helpers: JSON in on stdin, JSON or text out on stdout.

use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use super::error::Error;

pub fn read_json<T: DeserializeOwned>(mut reader: impl Read) -> Result<T> {
    let mut raw = String::new();
    reader.read_to_string(&mut raw)?;
    let value = serde_json::from_str(&raw).context("Failed to parse JSON context")?;
    Ok(value)
}

pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open context file {}", path.display()))?;
    read_json(file)
}

/// Writes `data` as compact JSON, without a trailing newline.
pub fn write_json<T: Serialize>(mut writer: impl Write, data: &T) -> Result<()> {
    serde_json::to_writer(&mut writer, data)?;
    writer.flush()?;
    Ok(())
}

pub fn write_text(mut writer: impl Write, text: &str) -> Result<()> {
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// JSON payload describing a failure.
pub fn error_payload(err: &anyhow::Error) -> serde_json::Value {
    let kind = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<Error>())
        .map(|e| e.kind())
        .unwrap_or("error");
    json!({
        "error": kind,
        "message": format!("{:#}", err),
    })
}
