//! Editing-API batch output
//!
//! Serializes the compiled requests as the JSON body of one batch update
//! call. The array order is the application order and must be kept by
//! whatever delivers the batch.
//!
//! Options:
//! - `document-id`: adds `documentId` to the body.
//! - `compact`: single-line output instead of pretty-printed JSON.

pub mod serializer;

use crate::error::ConvertError;
use crate::format::Format;
use crate::ir::requests::Request;
use std::collections::HashMap;

pub use serializer::{request_to_json, to_batch};

#[derive(Debug, Default, Clone, Copy)]
pub struct DocsJsonFormat;

impl Format for DocsJsonFormat {
    fn name(&self) -> &str {
        "docs-json"
    }

    fn description(&self) -> &str {
        "Batch update body for the rich-text editing API"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, requests: &[Request]) -> Result<String, ConvertError> {
        self.serialize_with_options(requests, &HashMap::new())
    }

    fn serialize_with_options(
        &self,
        requests: &[Request],
        options: &HashMap<String, String>,
    ) -> Result<String, ConvertError> {
        for key in options.keys() {
            if !matches!(key.as_str(), "document-id" | "compact") {
                return Err(ConvertError::NotSupported(format!(
                    "Format 'docs-json' does not support parameter '{key}'"
                )));
            }
        }

        let document_id = options.get("document-id").map(String::as_str);
        let batch = to_batch(requests, document_id);
        let mut out = if options.get("compact").is_some_and(|v| v == "true") {
            serde_json::to_string(&batch)?
        } else {
            serde_json::to_string_pretty(&batch)?
        };
        out.push('\n');
        Ok(out)
    }
}
