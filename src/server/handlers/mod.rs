//! Handler module declarations and re-exports

pub mod layout;
pub mod rules;

pub use layout::*;
pub use rules::*;

use serde::de::DeserializeOwned;

/// Decode request params, producing a client-facing message on failure
pub(crate) fn parse_params<T: DeserializeOwned>(
    params: Option<serde_json::Value>,
) -> Result<T, String> {
    let params = params.ok_or_else(|| "Missing params".to_string())?;
    serde_json::from_value(params).map_err(|e| format!("Invalid params: {}", e))
}
