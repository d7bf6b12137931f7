//! Session state for the layout server

use crate::site::{
    entropy_rng, seeded_rng, LayoutRequest, LayoutRng, LayoutRules, OptimizedLayout,
};

/// In-memory state: active rules, session RNG and the last result
pub struct ServerState {
    pub rules: LayoutRules,
    /// File the active rules were loaded from, if any
    pub rules_path: Option<String>,
    pub rng: LayoutRng,
    pub last_request: Option<LayoutRequest>,
    pub last_result: Option<OptimizedLayout>,
}

impl ServerState {
    pub fn new() -> Self {
        Self::with_rng(entropy_rng())
    }

    /// State whose session RNG is reproducible
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(seeded_rng(seed))
    }

    fn with_rng(rng: LayoutRng) -> Self {
        Self {
            rules: LayoutRules::default(),
            rules_path: None,
            rng,
            last_request: None,
            last_result: None,
        }
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = seeded_rng(seed);
    }

    pub fn store_result(&mut self, request: LayoutRequest, result: OptimizedLayout) {
        self.last_request = Some(request);
        self.last_result = Some(result);
    }

    /// Forget the last result, e.g. after the rules change under it
    pub fn clear_result(&mut self) {
        self.last_request = None;
        self.last_result = None;
    }

    pub fn has_layout(&self) -> bool {
        self.last_result.is_some()
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}
