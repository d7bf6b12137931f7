//! Generative site planner
//!
//! Places category A and category B towers on a rectangular site so that
//! every building respects the boundary setback, the minimum gap to other
//! buildings and the central no-build plaza, then searches over randomized
//! attempts for the layout with the most floor area that also keeps every
//! tower A within reach of a tower B.
//!
//! # Example
//! ```
//! use site_planner::{optimize, seeded_rng, LayoutRequest, LayoutRules, OptimizeSettings};
//!
//! let rules = LayoutRules::default();
//! let request = LayoutRequest::new(2, 1, 40.0);
//! let best = optimize(&request, &rules, &OptimizeSettings::with_attempts(5), &mut seeded_rng(7))?
//!     .expect("at least one attempt ran");
//! assert!(best.stats.count_a <= 2 && best.stats.count_b <= 1);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod server;
pub mod site;

pub use site::*;
