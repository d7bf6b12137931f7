//! Randomized placement search
//!
//! Greedy sequential placement: towers are shuffled, then each one gets a
//! bounded number of random candidate positions. Accepted buildings are never
//! moved; a tower whose tries run out is skipped.

use super::building::{Building, Category, Layout};
use super::checks::SiteOccupancy;
use super::geometry::Rect;
use super::rules::LayoutRules;
use anyhow::{ensure, Context};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Random candidate positions tried per building before it is skipped
pub const DEFAULT_MAX_PLACEMENT_TRIES: usize = 1500;

/// How many towers of each kind to place, and how wide tower B is
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutRequest {
    pub num_a: usize,
    pub num_b: usize,
    pub tower_b_width: f64,
}

impl LayoutRequest {
    pub fn new(num_a: usize, num_b: usize, tower_b_width: f64) -> Self {
        Self { num_a, num_b, tower_b_width }
    }

    pub fn target(&self, category: Category) -> usize {
        match category {
            Category::A => self.num_a,
            Category::B => self.num_b,
        }
    }

    /// Nominal (unrotated) width and height of a category
    pub fn dims(&self, category: Category, rules: &LayoutRules) -> (f64, f64) {
        match category {
            Category::A => (rules.tower_a_dims[0], rules.tower_a_dims[1]),
            Category::B => (self.tower_b_width, rules.tower_b_height),
        }
    }

    /// Upper bound on how many towers of one category the site can hold.
    ///
    /// Two footprints `gap` apart are separated by at least `gap / √2` on
    /// one axis, so footprints grown by half that are pairwise disjoint and
    /// lie inside the interior grown by the same margin.
    pub fn capacity(&self, category: Category, rules: &LayoutRules) -> usize {
        let (w, h) = self.dims(category, rules);
        let margin = rules.building_gap / std::f64::consts::SQRT_2;
        let interior = rules.interior();
        let usable = (interior.width + margin) * (interior.height + margin);
        let per_tower = (w + margin) * (h + margin);
        (usable / per_tower).ceil() as usize
    }

    /// Fail fast on requests the search cannot meaningfully run
    pub fn validate(&self, rules: &LayoutRules) -> anyhow::Result<()> {
        rules.validate()?;
        let total = self.num_a.checked_add(self.num_b).with_context(|| {
            format!(
                "Building count overflows (num_a = {}, num_b = {})",
                self.num_a, self.num_b
            )
        })?;
        ensure!(
            total > 0,
            "At least one building must be requested (num_a = {}, num_b = {})",
            self.num_a,
            self.num_b
        );
        ensure!(
            self.tower_b_width.is_finite() && self.tower_b_width > 0.0,
            "Tower B width must be a positive number, got {}",
            self.tower_b_width
        );

        let interior = rules.interior();
        for category in [Category::A, Category::B] {
            let target = self.target(category);
            if target == 0 {
                continue;
            }
            let (w, h) = self.dims(category, rules);
            ensure!(
                w <= interior.width && h <= interior.height,
                "Tower {} ({}x{}) does not fit the {}x{} buildable area",
                category,
                w,
                h,
                interior.width,
                interior.height
            );
            let capacity = self.capacity(category, rules);
            ensure!(
                target <= capacity,
                "Requested {} towers {} but the site holds at most {}",
                target,
                category,
                capacity
            );
        }
        Ok(())
    }

    /// Shuffled placement order: `num_a` A tags and `num_b` B tags
    pub fn placement_order<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Category> {
        let mut order: Vec<Category> = std::iter::repeat(Category::A)
            .take(self.num_a)
            .chain(std::iter::repeat(Category::B).take(self.num_b))
            .collect();
        order.shuffle(rng);
        order
    }
}

/// Run one placement attempt.
///
/// Returns the buildings that could be placed within `max_tries` random
/// candidates each; the layout may hold fewer buildings than requested.
pub fn generate_layout<R: Rng + ?Sized>(
    request: &LayoutRequest,
    rules: &LayoutRules,
    max_tries: usize,
    rng: &mut R,
) -> anyhow::Result<Layout> {
    request.validate(rules)?;
    ensure!(max_tries > 0, "max_tries must be at least 1");

    let mut occupancy = SiteOccupancy::new(rules);
    let mut layout = Layout::new();
    let mut skipped = 0usize;

    for category in request.placement_order(rng) {
        let dims = request.dims(category, rules);
        match place_one(&occupancy, dims, max_tries, rng) {
            Some(footprint) => {
                occupancy.occupy(footprint);
                layout.push(Building::new(footprint, category));
            }
            None => {
                skipped += 1;
                trace!("Tower {} skipped after {} tries", category, max_tries);
            }
        }
    }

    debug!(
        "Placed {}/{} towers ({} A, {} B), {} skipped",
        layout.len(),
        request.num_a + request.num_b,
        layout.count(Category::A),
        layout.count(Category::B),
        skipped
    );

    Ok(layout)
}

/// Sample candidates for one building until one is admitted or tries run out
fn place_one<R: Rng + ?Sized>(
    occupancy: &SiteOccupancy,
    (width, height): (f64, f64),
    max_tries: usize,
    rng: &mut R,
) -> Option<Rect> {
    let interior = *occupancy.interior();
    // Clamped: an exact fit can round the upper bound below the lower one
    let x_range = interior.min_x()..=(interior.max_x() - width).max(interior.min_x());
    let y_range = interior.min_y()..=(interior.max_y() - height).max(interior.min_y());

    for _ in 0..max_tries {
        let x = rng.gen_range(x_range.clone());
        let y = rng.gen_range(y_range.clone());

        let nominal = Rect::new(x, y, width, height);
        let candidate = if rng.gen_bool(0.5) { nominal.rotated() } else { nominal };

        // Sampling bounds assumed the unrotated size
        if candidate.max_x() > interior.max_x() || candidate.max_y() > interior.max_y() {
            continue;
        }

        if occupancy.admits(&candidate) {
            return Some(candidate);
        }
    }

    None
}
