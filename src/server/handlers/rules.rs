//! Rules handlers: GetRules, SetRules, LoadRules, GetSitePlan

use super::parse_params;
use crate::server::protocol::{error_codes, Response};
use crate::server::state::ServerState;
use crate::site::LayoutRules;
use serde::Deserialize;
use tracing::{info, warn};

/// Handle GetRules request - returns the active rules
pub fn handle_get_rules(state: &ServerState, id: Option<serde_json::Value>) -> Response {
    Response::success(id, serde_json::json!({
        "rules": state.rules,
        "source": state.rules_path,
    }))
}

/// Handle SetRules request - overrides any subset of rule fields.
///
/// The merged rules are validated as a whole; on error nothing changes.
pub fn handle_set_rules(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    let overrides = match params {
        Some(serde_json::Value::Object(map)) => map,
        _ => {
            return Response::error(id, error_codes::INVALID_PARAMS,
                "Invalid params: expected an object of rule fields".to_string());
        }
    };

    let mut merged = match serde_json::to_value(&state.rules) {
        Ok(serde_json::Value::Object(map)) => map,
        _ => {
            return Response::error(id, error_codes::INTERNAL_ERROR,
                "Failed to encode current rules".to_string());
        }
    };

    for (key, value) in overrides {
        if !merged.contains_key(&key) {
            return Response::error(id, error_codes::INVALID_PARAMS,
                format!("Unknown rule: {}", key));
        }
        merged.insert(key, value);
    }

    let rules: LayoutRules = match serde_json::from_value(serde_json::Value::Object(merged)) {
        Ok(rules) => rules,
        Err(e) => {
            return Response::error(id, error_codes::INVALID_PARAMS,
                format!("Invalid params: {}", e));
        }
    };

    if let Err(e) = rules.validate() {
        warn!("Rejected rules override: {:#}", e);
        return Response::error(id, error_codes::INVALID_PARAMETERS, format!("{:#}", e));
    }

    info!("Rules updated: {:?}", rules);
    state.rules = rules;
    state.rules_path = None;
    state.clear_result();

    Response::success(id, serde_json::json!({ "rules": state.rules }))
}

/// Handle LoadRules request - replaces the rules with a JSON file
pub fn handle_load_rules(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize)]
    struct LoadRulesParams {
        file_path: String,
    }

    let params: LoadRulesParams = match parse_params(params) {
        Ok(p) => p,
        Err(message) => return Response::error(id, error_codes::INVALID_PARAMS, message),
    };

    info!("Loading rules from {}", params.file_path);

    match LayoutRules::from_json_file(&params.file_path) {
        Ok(rules) => {
            state.rules = rules;
            state.rules_path = Some(params.file_path);
            state.clear_result();
            Response::success(id, serde_json::json!({
                "rules": state.rules,
                "source": state.rules_path,
            }))
        }
        Err(e) => {
            warn!("Failed to load rules: {:#}", e);
            Response::error(id, error_codes::RULES_LOAD_FAILED, format!("{:#}", e))
        }
    }
}

/// Handle GetSitePlan request - site, setback and plaza rectangles for drawing
pub fn handle_get_site_plan(state: &ServerState, id: Option<serde_json::Value>) -> Response {
    Response::success(id, serde_json::json!(state.rules.site_plan()))
}
