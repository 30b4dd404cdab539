//! Deserialization helpers shared by the state and corpus types.

use std::sync::Arc;

use serde::{Deserialize, Deserializer};

/// Deserializes an optional string, treating `""` as absent.
pub(crate) fn non_empty_text<'de, D>(deserializer: D) -> Result<Option<Arc<str>>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = Option::<String>::deserialize(deserializer)?;
    Ok(text.filter(|t| !t.is_empty()).map(Arc::from))
}

/// Deserializes an optional path, treating `""` and the `"None"` sentinel
/// written by the dataset exporter as absent.
pub(crate) fn recorded_path<'de, D>(deserializer: D) -> Result<Option<Arc<str>>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = non_empty_text(deserializer)?;
    Ok(text.filter(|t| &**t != "None"))
}
