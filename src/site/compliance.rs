//! Mix rule evaluation and layout statistics

use super::building::{Category, Layout};
use super::placement::LayoutRequest;
use super::rules::LayoutRules;
use serde::{Deserialize, Serialize};

/// A tower A with no tower B inside the mix-rule distance
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MixViolation {
    /// Index of the isolated tower A in the layout
    pub building_index: usize,
    /// Distance to the closest tower B, `None` when the layout has no B
    pub nearest_b_distance: Option<f64>,
}

/// Aggregate figures for one layout
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub count_a: usize,
    pub count_b: usize,
    pub total_area: f64,
    pub mix_ok: bool,
    pub violations: usize,
}

/// Placed versus requested counts per category
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Fulfilment {
    pub placed_a: usize,
    pub requested_a: usize,
    pub placed_b: usize,
    pub requested_b: usize,
}

impl Fulfilment {
    pub fn of(request: &LayoutRequest, stats: &Statistics) -> Self {
        Self {
            placed_a: stats.count_a,
            requested_a: request.num_a,
            placed_b: stats.count_b,
            requested_b: request.num_b,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.placed_a >= self.requested_a && self.placed_b >= self.requested_b
    }

    pub fn missing(&self) -> usize {
        self.requested_a.saturating_sub(self.placed_a) + self.requested_b.saturating_sub(self.placed_b)
    }
}

/// List every tower A that has no tower B within `mix_rule_dist`
pub fn find_mix_violations(layout: &Layout, rules: &LayoutRules) -> Vec<MixViolation> {
    let towers_b: Vec<_> = layout.of_category(Category::B).map(|(_, b)| b).collect();

    layout
        .of_category(Category::A)
        .filter_map(|(index, a)| {
            let nearest = towers_b
                .iter()
                .map(|b| a.distance_to(b))
                .min_by(f64::total_cmp);
            match nearest {
                Some(d) if d <= rules.mix_rule_dist => None,
                _ => Some(MixViolation {
                    building_index: index,
                    nearest_b_distance: nearest,
                }),
            }
        })
        .collect()
}

/// Mix rule verdict: `(satisfied, violation count)`.
///
/// A layout without tower A trivially passes; one with A but no B fails on
/// every A.
pub fn check_mix_rule(layout: &Layout, rules: &LayoutRules) -> (bool, usize) {
    let violations = find_mix_violations(layout, rules).len();
    (violations == 0, violations)
}

pub fn compute_statistics(layout: &Layout, rules: &LayoutRules) -> Statistics {
    let (mix_ok, violations) = check_mix_rule(layout, rules);
    Statistics {
        count_a: layout.count(Category::A),
        count_b: layout.count(Category::B),
        total_area: layout.total_area(),
        mix_ok,
        violations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::building::Building;
    use crate::site::geometry::Rect;

    fn tower(x: f64, y: f64, category: Category) -> Building {
        let (w, h) = match category {
            Category::A => (30.0, 20.0),
            Category::B => (40.0, 20.0),
        };
        Building::new(Rect::new(x, y, w, h), category)
    }

    #[test]
    fn test_no_tower_a_is_vacuously_satisfied() {
        let rules = LayoutRules::default();
        assert_eq!(check_mix_rule(&Layout::new(), &rules), (true, 0));

        let only_b = Layout::from_buildings(vec![
            tower(10.0, 10.0, Category::B),
            tower(150.0, 110.0, Category::B),
        ]);
        assert_eq!(check_mix_rule(&only_b, &rules), (true, 0));
    }

    #[test]
    fn test_no_tower_b_fails_every_a() {
        let rules = LayoutRules::default();
        let only_a = Layout::from_buildings(vec![
            tower(10.0, 10.0, Category::A),
            tower(60.0, 10.0, Category::A),
            tower(10.0, 100.0, Category::A),
        ]);
        assert_eq!(check_mix_rule(&only_a, &rules), (false, 3));

        let violations = find_mix_violations(&only_a, &rules);
        assert!(violations.iter().all(|v| v.nearest_b_distance.is_none()));
    }

    #[test]
    fn test_mix_distance_is_inclusive() {
        let rules = LayoutRules::default();
        // A spans x 10..40, B starts at 100: gap exactly 60
        let at_limit = Layout::from_buildings(vec![
            tower(10.0, 10.0, Category::A),
            tower(100.0, 10.0, Category::B),
        ]);
        assert_eq!(check_mix_rule(&at_limit, &rules), (true, 0));

        let beyond = Layout::from_buildings(vec![
            tower(10.0, 10.0, Category::A),
            tower(100.5, 10.0, Category::B),
        ]);
        assert_eq!(check_mix_rule(&beyond, &rules), (false, 1));
        let v = &find_mix_violations(&beyond, &rules)[0];
        assert_eq!(v.building_index, 0);
        assert_eq!(v.nearest_b_distance, Some(60.5));
    }

    #[test]
    fn test_statistics_and_fulfilment() {
        let rules = LayoutRules::default();
        let layout = Layout::from_buildings(vec![
            tower(10.0, 10.0, Category::A),
            tower(55.0, 10.0, Category::B),
            tower(160.0, 110.0, Category::A),
        ]);
        let stats = compute_statistics(&layout, &rules);
        assert_eq!(stats.count_a, 2);
        assert_eq!(stats.count_b, 1);
        assert_eq!(stats.total_area, 2000.0);
        assert!(!stats.mix_ok);
        assert_eq!(stats.violations, 1);
        assert_eq!(compute_statistics(&layout, &rules), stats);

        let fulfilment = Fulfilment::of(&LayoutRequest::new(2, 2, 40.0), &stats);
        assert!(!fulfilment.is_complete());
        assert_eq!(fulfilment.missing(), 1);
    }
}
