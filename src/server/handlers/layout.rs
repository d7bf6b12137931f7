//! Layout handlers: GenerateLayout, Optimize, GetLayout, AuditLayout, SetSeed

use super::parse_params;
use crate::server::protocol::{error_codes, Response};
use crate::server::state::ServerState;
use crate::site::{
    audit_layout, compute_statistics, generate_layout, optimize, optimize_parallel, score,
    seeded_rng, Building, Layout, LayoutRequest, OptimizeSettings, OptimizedLayout,
    DEFAULT_MAX_PLACEMENT_TRIES,
};
use rand::Rng;
use serde::Deserialize;
use std::time::Instant;
use tracing::{info, warn};

const NO_FEASIBLE_LAYOUT_MESSAGE: &str =
    "Could not find a valid layout. Try reducing the building count or increasing optimization depth.";

fn default_max_attempts() -> usize {
    DEFAULT_MAX_PLACEMENT_TRIES
}

fn default_attempts() -> usize {
    OptimizeSettings::default().attempts
}

/// Result payload shared by GenerateLayout, Optimize and GetLayout
fn layout_payload(result: &OptimizedLayout, request: &LayoutRequest) -> serde_json::Value {
    serde_json::json!({
        "buildings": result.layout.buildings(),
        "stats": result.stats,
        "score": result.score,
        "attempt": result.attempt,
        "seed": result.seed,
        "fulfilment": result.fulfilment(request),
    })
}

/// Handle GenerateLayout request - runs a single placement attempt
pub fn handle_generate_layout(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize)]
    struct GenerateParams {
        num_a: usize,
        num_b: usize,
        tower_b_width: f64,
        #[serde(default = "default_max_attempts")]
        max_attempts: usize,
        #[serde(default)]
        seed: Option<u64>,
    }

    let params: GenerateParams = match parse_params(params) {
        Ok(p) => p,
        Err(message) => return Response::error(id, error_codes::INVALID_PARAMS, message),
    };

    let request = LayoutRequest::new(params.num_a, params.num_b, params.tower_b_width);
    let seed = params.seed.unwrap_or_else(|| state.rng.gen());
    let start = Instant::now();

    let layout = match generate_layout(&request, &state.rules, params.max_attempts, &mut seeded_rng(seed)) {
        Ok(layout) => layout,
        Err(e) => {
            warn!("Rejected GenerateLayout request: {:#}", e);
            return Response::error(id, error_codes::INVALID_PARAMETERS, format!("{:#}", e));
        }
    };

    let stats = compute_statistics(&layout, &state.rules);
    let result = OptimizedLayout {
        score: score(&stats),
        layout,
        stats,
        attempt: 0,
        seed,
    };

    info!("GenerateLayout placed {} buildings in {:.2?}", result.layout.len(), start.elapsed());

    let payload = layout_payload(&result, &request);
    state.store_result(request, result);
    Response::success(id, payload)
}

/// Handle Optimize request - runs the multi-attempt search and keeps the best
pub fn handle_optimize(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize)]
    struct OptimizeParams {
        num_a: usize,
        num_b: usize,
        tower_b_width: f64,
        #[serde(default = "default_attempts")]
        attempts: usize,
        #[serde(default = "default_max_attempts")]
        max_attempts: usize,
        #[serde(default)]
        seed: Option<u64>,
        #[serde(default)]
        parallel: bool,
    }

    let params: OptimizeParams = match parse_params(params) {
        Ok(p) => p,
        Err(message) => return Response::error(id, error_codes::INVALID_PARAMS, message),
    };

    let request = LayoutRequest::new(params.num_a, params.num_b, params.tower_b_width);
    let settings = OptimizeSettings {
        attempts: params.attempts,
        max_placement_tries: params.max_attempts,
    };

    info!(
        "Optimize: {} A, {} B (width {}), {} attempts{}",
        request.num_a,
        request.num_b,
        request.tower_b_width,
        settings.attempts,
        if params.parallel { ", parallel" } else { "" }
    );

    let start = Instant::now();
    let mut run_rng = params.seed.map(seeded_rng);
    let rng = match run_rng.as_mut() {
        Some(rng) => rng,
        None => &mut state.rng,
    };

    let outcome = if params.parallel {
        optimize_parallel(&request, &state.rules, &settings, rng)
    } else {
        optimize(&request, &state.rules, &settings, rng)
    };

    let best = match outcome {
        Ok(Some(best)) if !best.layout.is_empty() => best,
        Ok(_) => {
            warn!("Optimize found no usable layout");
            return Response::error(id, error_codes::NO_FEASIBLE_LAYOUT,
                NO_FEASIBLE_LAYOUT_MESSAGE.to_string());
        }
        Err(e) => {
            warn!("Rejected Optimize request: {:#}", e);
            return Response::error(id, error_codes::INVALID_PARAMETERS, format!("{:#}", e));
        }
    };

    let elapsed = start.elapsed();
    let mut payload = layout_payload(&best, &request);
    payload["elapsed_ms"] = serde_json::json!(elapsed.as_secs_f64() * 1000.0);

    state.store_result(request, best);
    Response::success(id, payload)
}

/// Handle GetLayout request - returns the last generated or optimized layout
pub fn handle_get_layout(state: &ServerState, id: Option<serde_json::Value>) -> Response {
    match (&state.last_result, &state.last_request) {
        (Some(result), Some(request)) => Response::success(id, layout_payload(result, request)),
        _ => Response::error(id, error_codes::NO_LAYOUT,
            "No layout generated. Call GenerateLayout or Optimize first.".to_string()),
    }
}

/// Handle AuditLayout request - checks the given buildings, or the last layout
pub fn handle_audit_layout(
    state: &ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize, Default)]
    struct AuditParams {
        #[serde(default)]
        buildings: Option<Vec<Building>>,
    }

    let params: AuditParams = match params {
        Some(p) => match serde_json::from_value(p) {
            Ok(p) => p,
            Err(e) => {
                return Response::error(id, error_codes::INVALID_PARAMS,
                    format!("Invalid params: {}", e));
            }
        },
        None => AuditParams::default(),
    };

    if let Some(buildings) = &params.buildings {
        let malformed = buildings.iter().position(|b| {
            ![b.x, b.y, b.width, b.height].iter().all(|v| v.is_finite())
                || b.width <= 0.0
                || b.height <= 0.0
        });
        if let Some(index) = malformed {
            return Response::error(id, error_codes::INVALID_PARAMS,
                format!("Invalid params: building {} needs finite coordinates and positive size", index));
        }
    }

    let layout = match (params.buildings, &state.last_result) {
        (Some(buildings), _) => Layout::from_buildings(buildings),
        (None, Some(result)) => result.layout.clone(),
        (None, None) => {
            return Response::error(id, error_codes::NO_LAYOUT,
                "No layout to audit. Pass buildings or generate a layout first.".to_string());
        }
    };

    let violations = audit_layout(&layout, &state.rules);
    let hard_violations = violations.iter().filter(|v| v.is_hard()).count();

    Response::success(id, serde_json::json!({
        "building_count": layout.len(),
        "compliant": violations.is_empty(),
        "hard_violation_count": hard_violations,
        "violations": violations,
        "stats": compute_statistics(&layout, &state.rules),
    }))
}

/// Handle SetSeed request - makes the session RNG reproducible
pub fn handle_set_seed(
    state: &mut ServerState,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> Response {
    #[derive(Deserialize)]
    struct SeedParams {
        seed: u64,
    }

    let params: SeedParams = match parse_params(params) {
        Ok(p) => p,
        Err(message) => return Response::error(id, error_codes::INVALID_PARAMS, message),
    };

    state.reseed(params.seed);
    Response::success(id, serde_json::json!({ "status": "ok", "seed": params.seed }))
}
