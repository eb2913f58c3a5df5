//! Radius schedules keyed on territory size and competitor distance.

/// Size class of a territory, from its larger dimension in miles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    /// Under 20 miles.
    Compact,
    /// 20 to under 40 miles.
    Medium,
    /// 40 to under 60 miles.
    Wide,
    /// 60 miles and up.
    VeryWide,
}

impl SizeTier {
    #[must_use]
    pub fn from_size(size_miles: f64) -> Self {
        if size_miles < 20.0 {
            SizeTier::Compact
        } else if size_miles < 40.0 {
            SizeTier::Medium
        } else if size_miles < 60.0 {
            SizeTier::Wide
        } else {
            SizeTier::VeryWide
        }
    }

    /// Repeating radius cycle, in miles.
    #[must_use]
    pub const fn schedule(self) -> [u32; 3] {
        match self {
            SizeTier::Compact => [1, 3, 5],
            SizeTier::Medium => [3, 5, 10],
            SizeTier::Wide => [5, 10, 15],
            SizeTier::VeryWide => [10, 15, 25],
        }
    }

    /// Human-readable coverage label used in export summaries.
    #[must_use]
    pub const fn coverage_strategy(self) -> &'static str {
        match self {
            SizeTier::Compact => "Dense (small territory)",
            SizeTier::Medium => "Medium coverage",
            SizeTier::Wide => "Wide coverage",
            SizeTier::VeryWide => "Very wide coverage",
        }
    }
}

/// First `count` radii of the size tier's repeating schedule.
#[must_use]
pub fn select_radii(territory_size_miles: f64, count: usize) -> Vec<u32> {
    SizeTier::from_size(territory_size_miles)
        .schedule()
        .into_iter()
        .cycle()
        .take(count)
        .collect()
}

/// Exclusion radius around a competing clinic `distance_miles` away.
#[must_use]
pub fn competitor_radius(distance_miles: f64) -> u32 {
    if distance_miles < 10.0 {
        5
    } else if distance_miles < 20.0 {
        10
    } else if distance_miles < 30.0 {
        15
    } else {
        25
    }
}
