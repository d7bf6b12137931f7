//! Site rules and derived site geometry
//!
//! Contains the tunable zoning constants and the rectangles derived from
//! them (site, setback interior, plaza).

use super::geometry::Rect;
use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Zoning rules applied to every layout.
///
/// Missing fields in a JSON document fall back to the reference values, so
/// `{"building_gap": 20}` is a complete rules file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutRules {
    pub site_width: f64,
    pub site_height: f64,
    /// Setback from every site edge
    pub boundary_buffer: f64,
    /// Minimum clear distance between two buildings
    pub building_gap: f64,
    /// Side of the square no-build plaza at the site center
    pub plaza_size: f64,
    /// Maximum distance from a tower A to its nearest tower B
    pub mix_rule_dist: f64,
    /// Nominal (width, height) of tower A
    pub tower_a_dims: [f64; 2],
    /// Height of tower B; its width is chosen per request
    pub tower_b_height: f64,
}

impl Default for LayoutRules {
    fn default() -> Self {
        Self {
            site_width: 200.0,
            site_height: 140.0,
            boundary_buffer: 10.0,
            building_gap: 15.0,
            plaza_size: 40.0,
            mix_rule_dist: 60.0,
            tower_a_dims: [30.0, 20.0],
            tower_b_height: 20.0,
        }
    }
}

impl LayoutRules {
    /// Load rules from a JSON file, then validate them
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rules file {}", path.display()))?;
        let rules: LayoutRules = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse rules file {}", path.display()))?;
        rules.validate()?;
        Ok(rules)
    }

    /// Reject rules that would make the search degenerate
    pub fn validate(&self) -> anyhow::Result<()> {
        let fields = [
            ("site_width", self.site_width),
            ("site_height", self.site_height),
            ("boundary_buffer", self.boundary_buffer),
            ("building_gap", self.building_gap),
            ("plaza_size", self.plaza_size),
            ("mix_rule_dist", self.mix_rule_dist),
            ("tower_a_dims[0]", self.tower_a_dims[0]),
            ("tower_a_dims[1]", self.tower_a_dims[1]),
            ("tower_b_height", self.tower_b_height),
        ];
        for (name, value) in fields {
            ensure!(value.is_finite(), "{} must be finite, got {}", name, value);
            ensure!(value >= 0.0, "{} must not be negative, got {}", name, value);
        }

        ensure!(
            self.site_width > 0.0 && self.site_height > 0.0,
            "Site must have positive size, got {}x{}",
            self.site_width,
            self.site_height
        );
        ensure!(
            self.tower_a_dims[0] > 0.0 && self.tower_a_dims[1] > 0.0,
            "Tower A dimensions must be positive, got {}x{}",
            self.tower_a_dims[0],
            self.tower_a_dims[1]
        );
        ensure!(
            self.tower_b_height > 0.0,
            "Tower B height must be positive, got {}",
            self.tower_b_height
        );

        let interior = self.interior();
        ensure!(
            interior.width > 0.0 && interior.height > 0.0,
            "Boundary buffer {} leaves no buildable area on a {}x{} site",
            self.boundary_buffer,
            self.site_width,
            self.site_height
        );
        Ok(())
    }

    pub fn site(&self) -> Rect {
        Rect::new(0.0, 0.0, self.site_width, self.site_height)
    }

    /// Buildable area: the site inset by the boundary buffer on every side
    pub fn interior(&self) -> Rect {
        self.site().expanded(-self.boundary_buffer)
    }

    /// The no-build square centered on the site
    pub fn plaza(&self) -> Rect {
        Rect::centered(self.site().center(), self.plaza_size, self.plaza_size)
    }

    pub fn site_plan(&self) -> SitePlan {
        SitePlan {
            site: self.site(),
            setback: self.interior(),
            plaza: self.plaza(),
        }
    }
}

/// Static site geometry handed to renderers
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SitePlan {
    pub site: Rect,
    /// Setback line (inner edge of the boundary buffer)
    pub setback: Rect,
    pub plaza: Rect,
}
