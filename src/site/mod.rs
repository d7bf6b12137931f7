//! Site layout generation and validation
//!
//! Places two kinds of rectangular towers on a site with a setback, a
//! minimum building gap and a central no-build plaza, then scores repeated
//! randomized attempts against a proximity ("mix") rule.
//!
//! # Submodules
//! - `geometry` - Rectangle primitives and gap distance
//! - `rules` - Tunable zoning rules and derived site rectangles
//! - `building` - Building, category and layout records
//! - `spatial` - R-tree index over placed footprints
//! - `checks` - Boundary, plaza and spacing predicates
//! - `placement` - Randomized placement search for one attempt
//! - `compliance` - Mix rule and layout statistics
//! - `audit` - Full rule audit of an existing layout
//! - `rng` - Seeded random sources
//! - `optimizer` - Multi-attempt search and scoring

mod geometry;
mod rules;
mod building;
mod spatial;
mod checks;
mod placement;
mod compliance;
mod audit;
mod rng;
mod optimizer;

pub use geometry::{Rect, rect_distance};
pub use rules::{LayoutRules, SitePlan};
pub use building::{Building, Category, Layout};
pub use spatial::{FootprintIndex, IndexedFootprint};
pub use checks::{
    clear_of_buildings, clear_of_plaza, is_valid_position, within_setback, SiteOccupancy,
};
pub use placement::{generate_layout, LayoutRequest, DEFAULT_MAX_PLACEMENT_TRIES};
pub use compliance::{
    check_mix_rule, compute_statistics, find_mix_violations, Fulfilment, MixViolation,
    Statistics,
};
pub use audit::{audit_layout, RuleViolation};
pub use rng::{attempt_seeds, entropy_rng, seeded_rng, LayoutRng, DEFAULT_SEED};
pub use optimizer::{
    optimize, optimize_parallel, score, OptimizeSettings, OptimizedLayout, MIX_RULE_BONUS,
    MIX_VIOLATION_PENALTY,
};
