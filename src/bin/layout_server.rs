use site_planner::server::{dispatch, error_codes, Request, Response, ServerState, SHUTDOWN_METHOD};
use std::io::{self, BufRead, Write};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Logs go to stderr; stdout carries protocol traffic only
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    init_logging();
    info!("Starting site layout server...");

    let mut state = ServerState::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                error!("Error reading stdin: {}", e);
                continue;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let (response, shutdown) = match serde_json::from_str::<Request>(&line) {
            Ok(request) => {
                let method = request.method.clone();
                let response = dispatch(&mut state, request);
                if response.is_error() {
                    warn!("{} returned an error", method);
                }
                (response, method == SHUTDOWN_METHOD)
            }
            Err(e) => {
                warn!("Failed to parse request: {}", e);
                let response = Response::error(None, error_codes::PARSE_ERROR,
                    format!("Failed to parse request: {}", e));
                (response, false)
            }
        };

        if let Err(e) = writeln!(stdout, "{}", response.to_json_line()).and_then(|_| stdout.flush()) {
            error!("Failed to write response: {}", e);
            break;
        }

        if shutdown {
            break;
        }
    }

    info!("Shutting down...");
}
