//! Building and layout records

use super::geometry::Rect;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Building archetype
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Fixed-size tower that needs a tower B nearby
    A,
    /// Tower with a per-request width
    B,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::A => "A",
            Category::B => "B",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A placed building
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub category: Category,
}

impl Building {
    pub fn new(footprint: Rect, category: Category) -> Self {
        Self {
            x: footprint.x,
            y: footprint.y,
            width: footprint.width,
            height: footprint.height,
            category,
        }
    }

    pub fn footprint(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn distance_to(&self, other: &Building) -> f64 {
        self.footprint().distance(&other.footprint())
    }
}

/// Buildings placed by one generation attempt, in acceptance order
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    buildings: Vec<Building>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing building list, e.g. one supplied by a client for auditing
    pub fn from_buildings(buildings: Vec<Building>) -> Self {
        Self { buildings }
    }

    pub(crate) fn push(&mut self, building: Building) {
        self.buildings.push(building);
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    /// Buildings of one category with their layout indices
    pub fn of_category(&self, category: Category) -> impl Iterator<Item = (usize, &Building)> {
        self.buildings
            .iter()
            .enumerate()
            .filter(move |(_, b)| b.category == category)
    }

    pub fn count(&self, category: Category) -> usize {
        self.of_category(category).count()
    }

    pub fn total_area(&self) -> f64 {
        self.buildings.iter().map(Building::area).sum()
    }
}
