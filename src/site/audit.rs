//! Full rule audit of an existing layout
//!
//! Checks every building against setback, plaza and spacing rules, plus the
//! mix rule, and reports each violation individually. Works on any layout,
//! including ones edited or supplied by a client.

use super::building::Layout;
use super::checks::{clear_of_plaza, within_setback};
use super::compliance::find_mix_violations;
use super::rules::LayoutRules;
use super::spatial::FootprintIndex;
use rayon::prelude::*;
use serde::Serialize;
use std::time::Instant;
use tracing::debug;

/// A single rule violation found by [`audit_layout`]
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RuleViolation {
    /// Building crosses the setback line
    Setback { building_index: usize },
    /// Building touches or overlaps the plaza
    Plaza { building_index: usize },
    /// Two buildings closer than the building gap
    Spacing {
        building_a: usize,
        building_b: usize,
        distance: f64,
        required: f64,
    },
    /// Tower A without a tower B in reach
    Mix {
        building_index: usize,
        nearest_b_distance: Option<f64>,
        required: f64,
    },
}

impl RuleViolation {
    /// Hard violations can never appear in a generated layout; mix violations can
    pub fn is_hard(&self) -> bool {
        !matches!(self, RuleViolation::Mix { .. })
    }
}

/// Audit a layout against all rules.
///
/// Per-building results come back in layout order; spacing pairs are
/// reported once, from the lower index.
pub fn audit_layout(layout: &Layout, rules: &LayoutRules) -> Vec<RuleViolation> {
    let start = Instant::now();
    let interior = rules.interior();
    let plaza = rules.plaza();
    let gap = rules.building_gap;
    let buildings = layout.buildings();
    let index = FootprintIndex::from_buildings(buildings);

    let mut violations: Vec<RuleViolation> = buildings
        .par_iter()
        .enumerate()
        .flat_map_iter(|(i, building)| {
            let footprint = building.footprint();
            let mut found = Vec::new();

            if !within_setback(&footprint, &interior) {
                found.push(RuleViolation::Setback { building_index: i });
            }
            if !clear_of_plaza(&footprint, &plaza) {
                found.push(RuleViolation::Plaza { building_index: i });
            }

            let mut too_close: Vec<(usize, f64)> = index
                .near(&footprint, gap)
                .filter(|other| other.index > i)
                .map(|other| (other.index, footprint.distance(&other.footprint)))
                .filter(|(_, distance)| *distance < gap)
                .collect();
            too_close.sort_unstable_by_key(|(j, _)| *j);

            found.extend(too_close.into_iter().map(|(j, distance)| RuleViolation::Spacing {
                building_a: i,
                building_b: j,
                distance,
                required: gap,
            }));
            found
        })
        .collect();

    violations.extend(find_mix_violations(layout, rules).into_iter().map(|v| {
        RuleViolation::Mix {
            building_index: v.building_index,
            nearest_b_distance: v.nearest_b_distance,
            required: rules.mix_rule_dist,
        }
    }));

    debug!(
        "Audit of {} buildings: {} violations in {:?}",
        buildings.len(),
        violations.len(),
        start.elapsed()
    );

    violations
}
