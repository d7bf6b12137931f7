//! Placement constraint checks
//!
//! Boundary, plaza and spacing predicates, plus the index-backed
//! occupancy tracker used while a layout is being built.

use super::building::Building;
use super::geometry::Rect;
use super::rules::LayoutRules;
use super::spatial::FootprintIndex;
use std::borrow::Borrow;

/// Candidate lies inside the setback interior
pub fn within_setback(candidate: &Rect, interior: &Rect) -> bool {
    interior.contains(candidate)
}

/// Candidate does not touch or overlap the plaza
pub fn clear_of_plaza(candidate: &Rect, plaza: &Rect) -> bool {
    !candidate.intersects(plaza)
}

/// Candidate keeps at least `gap` from every listed footprint
pub fn clear_of_buildings<I>(candidate: &Rect, others: I, gap: f64) -> bool
where
    I: IntoIterator,
    I::Item: Borrow<Rect>,
{
    others
        .into_iter()
        .all(|other| candidate.distance(other.borrow()) >= gap)
}

/// Check whether `candidate` may join `placed`.
///
/// Boundary first, then plaza, then spacing; the first failure rejects.
pub fn is_valid_position(
    candidate: &Rect,
    placed: &[Building],
    plaza: &Rect,
    rules: &LayoutRules,
) -> bool {
    if !within_setback(candidate, &rules.interior()) {
        return false;
    }
    if !clear_of_plaza(candidate, plaza) {
        return false;
    }
    clear_of_buildings(
        candidate,
        placed.iter().map(Building::footprint),
        rules.building_gap,
    )
}

/// Occupied footprints of a layout under construction.
///
/// Runs the same checks as [`is_valid_position`], but the spacing test only
/// visits R-tree neighbours inside the gap envelope.
#[derive(Clone, Debug)]
pub struct SiteOccupancy {
    interior: Rect,
    plaza: Rect,
    gap: f64,
    index: FootprintIndex,
    placed: usize,
}

impl SiteOccupancy {
    pub fn new(rules: &LayoutRules) -> Self {
        Self {
            interior: rules.interior(),
            plaza: rules.plaza(),
            gap: rules.building_gap,
            index: FootprintIndex::new(),
            placed: 0,
        }
    }

    pub fn interior(&self) -> &Rect {
        &self.interior
    }

    pub fn admits(&self, candidate: &Rect) -> bool {
        if !within_setback(candidate, &self.interior) {
            return false;
        }
        if !clear_of_plaza(candidate, &self.plaza) {
            return false;
        }
        clear_of_buildings(
            candidate,
            self.index.near(candidate, self.gap).map(|e| &e.footprint),
            self.gap,
        )
    }

    pub fn occupy(&mut self, footprint: Rect) {
        self.index.insert(self.placed, footprint);
        self.placed += 1;
    }

    pub fn len(&self) -> usize {
        self.placed
    }

    pub fn is_empty(&self) -> bool {
        self.placed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::building::Category;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn placed_a(x: f64, y: f64) -> Building {
        Building::new(Rect::new(x, y, 30.0, 20.0), Category::A)
    }

    #[test]
    fn test_boundary_rule() {
        let rules = LayoutRules::default();
        let plaza = rules.plaza();
        assert!(is_valid_position(&Rect::new(10.0, 10.0, 30.0, 20.0), &[], &plaza, &rules));
        assert!(is_valid_position(&Rect::new(160.0, 110.0, 30.0, 20.0), &[], &plaza, &rules));
        assert!(!is_valid_position(&Rect::new(9.9, 10.0, 30.0, 20.0), &[], &plaza, &rules));
        assert!(!is_valid_position(&Rect::new(160.1, 110.0, 30.0, 20.0), &[], &plaza, &rules));
    }

    #[test]
    fn test_plaza_touch_is_rejected() {
        let rules = LayoutRules::default();
        let plaza = rules.plaza();
        // Right edge lands exactly on the plaza's left edge (x = 80)
        let touching = Rect::new(50.0, 60.0, 30.0, 20.0);
        assert!(!is_valid_position(&touching, &[], &plaza, &rules));

        let clear = Rect::new(49.0, 60.0, 30.0, 20.0);
        assert!(is_valid_position(&clear, &[], &plaza, &rules));
    }

    #[test]
    fn test_spacing_rule_at_threshold() {
        let rules = LayoutRules::default();
        let plaza = rules.plaza();
        let placed = vec![placed_a(10.0, 10.0)];

        // Exactly building_gap away is allowed
        assert!(is_valid_position(&Rect::new(55.0, 10.0, 10.0, 10.0), &placed, &plaza, &rules));
        assert!(!is_valid_position(&Rect::new(54.9, 10.0, 10.0, 10.0), &placed, &plaza, &rules));
    }

    #[test]
    fn test_clear_of_buildings_accepts_owned_and_borrowed() {
        let candidate = Rect::new(55.0, 10.0, 10.0, 10.0);
        let placed = [placed_a(10.0, 10.0), placed_a(100.0, 10.0)];
        let footprints: Vec<Rect> = placed.iter().map(Building::footprint).collect();

        assert!(clear_of_buildings(&candidate, placed.iter().map(Building::footprint), 15.0));
        assert!(clear_of_buildings(&candidate, &footprints, 15.0));
        assert!(!clear_of_buildings(&candidate, &footprints, 15.1));
        assert!(clear_of_buildings(&candidate, std::iter::empty::<Rect>(), 1e9));
    }

    #[test]
    fn test_occupancy_agrees_with_slice_check() {
        let rules = LayoutRules::default();
        let plaza = rules.plaza();
        let mut rng = StdRng::seed_from_u64(0x5175_0001);
        let mut occupancy = SiteOccupancy::new(&rules);
        let mut placed: Vec<Building> = Vec::new();

        for _ in 0..4000 {
            let w = rng.gen_range(5.0..40.0);
            let h = rng.gen_range(5.0..40.0);
            let candidate = Rect::new(rng.gen_range(0.0..200.0), rng.gen_range(0.0..140.0), w, h);

            let expected = is_valid_position(&candidate, &placed, &plaza, &rules);
            assert_eq!(occupancy.admits(&candidate), expected, "disagreement on {:?}", candidate);

            if expected {
                occupancy.occupy(candidate);
                placed.push(Building::new(candidate, Category::B));
            }
        }
        assert_eq!(occupancy.len(), placed.len());
        assert!(!occupancy.is_empty());
    }
}
