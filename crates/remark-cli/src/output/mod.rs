//! Output formatting for remark.
//!
//! Provides text and JSON output formats for CLI output.

use anyhow::Result;
use serde::Serialize;
use std::io::{self, Write};

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format - machine-readable output
    Json,
    /// Plain text format - one line per record, replies indented beneath
    #[default]
    Text,
}

/// Formatter that can output data in text or JSON format
#[derive(Debug, Clone)]
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Create a new formatter with the specified output format
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Format data according to the configured output format
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(data)?),
            OutputFormat::Text => {
                let json_value = serde_json::to_value(data)?;
                let mut lines = Vec::new();
                render_text(&json_value, 0, &mut lines);
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format and print data to stdout
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails
    pub fn print<T: Serialize>(&self, data: &T) -> Result<()> {
        let output = self.format(data)?;
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{output}")?;
        Ok(())
    }

    /// Format and print a list with a custom empty message
    ///
    /// For JSON format, wraps the array in a named object with a count field.
    /// For text, prints `empty_message` when there is nothing to show.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails
    pub fn print_list<T: Serialize>(
        &self,
        data: &[T],
        empty_message: &str,
        collection_name: &str,
    ) -> Result<()> {
        let output = self.format_list(data, empty_message, collection_name)?;
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{output}")?;
        Ok(())
    }

    fn format_list<T: Serialize>(
        &self,
        data: &[T],
        empty_message: &str,
        collection_name: &str,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let mut envelope = serde_json::Map::new();
                envelope.insert(collection_name.to_string(), serde_json::to_value(data)?);
                envelope.insert("count".to_string(), serde_json::json!(data.len()));
                Ok(serde_json::to_string_pretty(&serde_json::Value::Object(
                    envelope,
                ))?)
            }
            OutputFormat::Text if data.is_empty() => Ok(empty_message.to_string()),
            OutputFormat::Text => self.format(&data),
        }
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(OutputFormat::default())
    }
}

/// Keys rendered first and without a label.
const ID_KEYS: [&str; 3] = ["project_id", "comment_id", "id"];

/// Render a JSON value as concise text lines.
///
/// Objects become one line. Arrays of objects nested inside an object
/// (replies) are rendered as further lines, indented one level.
fn render_text(value: &serde_json::Value, depth: usize, lines: &mut Vec<String>) {
    match value {
        serde_json::Value::Object(map) => {
            let mut parts = Vec::new();
            let mut children = Vec::new();

            for key in &ID_KEYS {
                if let Some(val) = map.get(*key) {
                    parts.push(render_field_value(val));
                }
            }

            for (key, val) in map {
                if ID_KEYS.contains(&key.as_str()) {
                    continue;
                }
                match val {
                    serde_json::Value::Array(arr) if arr.is_empty() => {}
                    serde_json::Value::Null => {}
                    serde_json::Value::Array(arr) if arr.iter().all(serde_json::Value::is_object) => {
                        children.extend(arr);
                    }
                    _ => parts.push(format!("{}:{}", key, render_field_value(val))),
                }
            }

            lines.push(format!("{}{}", "  ".repeat(depth), parts.join("  ")));
            for child in children {
                render_text(child, depth + 1, lines);
            }
        }
        serde_json::Value::Array(arr) => {
            for item in arr {
                render_text(item, depth, lines);
            }
        }
        _ => lines.push(format!("{}{}", "  ".repeat(depth), render_field_value(value))),
    }
}

/// Render a single field value as concise text
fn render_field_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => {
            if s.contains(' ') || s.contains('\n') {
                format!("\"{}\"", s.replace('\n', "\\n"))
            } else {
                s.clone()
            }
        }
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(render_field_value).collect();
            format!("[{}]", items.join(","))
        }
        serde_json::Value::Object(map) => {
            let parts: Vec<String> = map
                .iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| format!("{}:{}", k, render_field_value(v)))
                .collect();
            format!("{{{}}}", parts.join(","))
        }
    }
}
