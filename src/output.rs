//! JSON rendering of the outline artifact.

use crate::error::{Error, Result};
use crate::model::OutlineResult;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize an outline result to JSON. The result is validated first;
/// a structurally invalid result serializes as the empty result.
pub fn to_json(result: &OutlineResult, format: JsonFormat) -> Result<String> {
    let result = result.clone().sanitized();

    let serialized = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(&result),
        JsonFormat::Compact => serde_json::to_string(&result),
    };

    serialized.map_err(|e| Error::Serialize(e.to_string()))
}
