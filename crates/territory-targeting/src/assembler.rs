//! Builds a [`TargetingDocument`] for one territory.
//!
//! The export runs in two phases:
//!
//! 1. **Plan** (pure): bounding box and size tier, competitor selection,
//!    interior and exterior sampling, radius assignment.
//! 2. **Resolve** (async): one paced address lookup per planned circle, in
//!    document order (competitors, inclusions, boundary exclusions).
//!
//! The document is only returned after every lookup has finished. Dropping
//! the future returned by [`generate_targeting`] cancels the run and nothing
//! escapes.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;
use territory_core::{validate_ring, GeoPoint, SiblingTerritory, Territory};
use territory_geo::{
    boundary_vertex_anchors, competitor_radius, distance_miles, drive_time_minutes,
    sample_exterior, sample_interior, select_radii, BoundingBox, SamplerConfig, SizeTier,
    TerritoryExtent,
};

use crate::document::{
    distinct_radii, round_tenth, CustomLocation, LocationSet, TargetingDocument,
    TargetingSummary, TerritoryInfo,
};
use crate::error::TargetingError;
use crate::pacing::{resolve_or_fallback, Pacer};
use crate::ports::{AddressResolver, SiblingSource};

/// Fallback for sampled circles whose address could not be resolved.
pub const ADDRESS_NOT_FOUND: &str = "Address not found";

/// Radius given to every boundary vertex anchor.
const VERTEX_EXCLUSION_RADIUS_MILES: u32 = 25;

/// How boundary exclusions are placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoundaryStrategy {
    /// Rejection-sampled points just outside the boundary, tiered radii.
    #[default]
    Sampled,
    /// Every n-th boundary vertex far enough from the center, fixed 25 mi
    /// radius.
    Vertices,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TargetingConfig {
    /// Siblings within this estimated drive time become competitor
    /// exclusions.
    pub max_drive_minutes: f64,
    /// Pause between address lookups.
    pub lookup_delay: Duration,
    pub sampler: SamplerConfig,
    pub boundary_strategy: BoundaryStrategy,
}

impl Default for TargetingConfig {
    fn default() -> Self {
        Self {
            max_drive_minutes: 40.0,
            lookup_delay: Duration::from_millis(100),
            sampler: SamplerConfig::default(),
            boundary_strategy: BoundaryStrategy::Sampled,
        }
    }
}

/// A sibling close enough to compete for the same audience.
#[derive(Debug, Clone, PartialEq)]
pub struct Competitor {
    pub sibling: SiblingTerritory,
    pub location: GeoPoint,
    pub distance_miles: f64,
    pub drive_time_minutes: f64,
    pub radius: u32,
}

impl Competitor {
    /// `"<name>, <state>"`, or just the name when the state is unknown.
    #[must_use]
    pub fn fallback_address(&self) -> String {
        match self.sibling.state.as_deref() {
            Some(state) if !state.trim().is_empty() => format!("{}, {state}", self.sibling.name),
            _ => self.sibling.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedCircle {
    pub point: GeoPoint,
    pub radius: u32,
}

/// Everything the export needs except addresses.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetingPlan {
    pub extent: TerritoryExtent,
    pub size_tier: SizeTier,
    pub competitors: Vec<Competitor>,
    pub inclusions: Vec<PlannedCircle>,
    pub boundary_exclusions: Vec<PlannedCircle>,
    pub boundary_strategy: BoundaryStrategy,
}

/// The territory's boundary ring, or [`TargetingError::NoBoundary`].
///
/// # Errors
///
/// Fails when the boundary is absent, has an invalid vertex, or has fewer
/// than 3 distinct vertices.
pub fn require_boundary(territory: &Territory) -> Result<&[GeoPoint], TargetingError> {
    let no_boundary = || TargetingError::NoBoundary {
        territory_id: territory.id.clone(),
    };
    let ring = territory.boundary.as_deref().ok_or_else(no_boundary)?;
    validate_ring(ring).map_err(|e| {
        tracing::debug!(territory_id = %territory.id, error = %e, "boundary ring rejected");
        no_boundary()
    })?;
    Ok(ring)
}

/// Siblings within `max_drive_minutes` of `territory`, in input order.
///
/// Drive time uses the target territory's metro type. The territory itself
/// (matched by id) and siblings without a valid location are skipped.
#[must_use]
pub fn find_competitors(
    territory: &Territory,
    siblings: &[SiblingTerritory],
    max_drive_minutes: f64,
) -> Vec<Competitor> {
    siblings
        .iter()
        .filter(|s| s.id != territory.id)
        .filter_map(|sibling| {
            let Some(location) = sibling.location().filter(GeoPoint::is_valid) else {
                tracing::debug!(sibling_id = %sibling.id, "sibling has no usable location; skipping");
                return None;
            };
            let distance = distance_miles(territory.center, location);
            let drive_time = drive_time_minutes(distance, territory.metro_type);
            (drive_time <= max_drive_minutes).then(|| Competitor {
                sibling: sibling.clone(),
                location,
                distance_miles: distance,
                drive_time_minutes: drive_time,
                radius: competitor_radius(distance),
            })
        })
        .collect()
}

/// Runs the pure planning phase.
///
/// # Errors
///
/// Returns [`TargetingError::NoBoundary`] when the territory has no usable
/// boundary ring.
pub fn plan_targeting<R: Rng>(
    territory: &Territory,
    siblings: &[SiblingTerritory],
    config: &TargetingConfig,
    rng: &mut R,
) -> Result<TargetingPlan, TargetingError> {
    let ring = require_boundary(territory)?;
    let bounds = BoundingBox::from_ring(ring).ok_or_else(|| TargetingError::NoBoundary {
        territory_id: territory.id.clone(),
    })?;
    let extent = bounds.extent(territory.center);
    let size_tier = SizeTier::from_size(extent.size_miles);

    let competitors = find_competitors(territory, siblings, config.max_drive_minutes);

    let interior = sample_interior(
        ring,
        territory.center,
        extent.size_miles,
        &config.sampler,
        rng,
    );
    let inclusions = with_tier_radii(interior.iter().map(|s| s.point), extent.size_miles);

    let boundary_exclusions = match config.boundary_strategy {
        BoundaryStrategy::Sampled => {
            let exterior = sample_exterior(ring, &config.sampler, rng);
            with_tier_radii(exterior.iter().map(|s| s.point), extent.size_miles)
        }
        BoundaryStrategy::Vertices => boundary_vertex_anchors(ring, territory.center)
            .into_iter()
            .map(|point| PlannedCircle {
                point,
                radius: VERTEX_EXCLUSION_RADIUS_MILES,
            })
            .collect(),
    };

    if inclusions.len() < config.sampler.target {
        tracing::debug!(
            territory_id = %territory.id,
            inclusions = inclusions.len(),
            target = config.sampler.target,
            "interior sampling came up short"
        );
    }

    Ok(TargetingPlan {
        extent,
        size_tier,
        competitors,
        inclusions,
        boundary_exclusions,
        boundary_strategy: config.boundary_strategy,
    })
}

fn with_tier_radii(
    points: impl ExactSizeIterator<Item = GeoPoint>,
    territory_size_miles: f64,
) -> Vec<PlannedCircle> {
    let radii = select_radii(territory_size_miles, points.len());
    points
        .zip(radii)
        .map(|(point, radius)| PlannedCircle { point, radius })
        .collect()
}

/// Generates the full targeting document for `territory`.
///
/// Fails fast on a missing boundary before any collaborator is called. A
/// sibling source failure aborts the run. Address lookup failures fall back
/// to placeholder labels and never abort.
///
/// # Errors
///
/// Returns [`TargetingError::NoBoundary`] or [`TargetingError::Siblings`].
pub async fn generate_targeting<S, A, R>(
    territory: &Territory,
    siblings: &S,
    resolver: &A,
    config: &TargetingConfig,
    rng: &mut R,
) -> Result<TargetingDocument, TargetingError>
where
    S: SiblingSource + ?Sized,
    A: AddressResolver,
    R: Rng,
{
    require_boundary(territory)?;

    let siblings = siblings.siblings().await?;
    let plan = plan_targeting(territory, &siblings, config, rng)?;

    tracing::info!(
        territory_id = %territory.id,
        siblings = siblings.len(),
        competitors = plan.competitors.len(),
        inclusions = plan.inclusions.len(),
        boundary_exclusions = plan.boundary_exclusions.len(),
        "targeting plan ready; resolving addresses"
    );

    let mut pacer = Pacer::new(config.lookup_delay);

    let mut competitor_locations = Vec::with_capacity(plan.competitors.len());
    for competitor in &plan.competitors {
        let address = resolve_or_fallback(resolver, &mut pacer, competitor.location, || {
            competitor.fallback_address()
        })
        .await;
        competitor_locations.push(competitor_location(competitor, address));
    }

    let mut inclusions = Vec::with_capacity(plan.inclusions.len());
    for (i, circle) in plan.inclusions.iter().enumerate() {
        let address = resolve_or_fallback(resolver, &mut pacer, circle.point, || {
            ADDRESS_NOT_FOUND.to_string()
        })
        .await;
        inclusions.push(CustomLocation::new(
            format!("Inclusion {}", i + 1),
            address,
            circle.point,
            circle.radius,
        ));
    }

    let boundary_label = match plan.boundary_strategy {
        BoundaryStrategy::Sampled => "Boundary Exclusion",
        BoundaryStrategy::Vertices => "Boundary exclusion",
    };
    let mut boundary_locations = Vec::with_capacity(plan.boundary_exclusions.len());
    for (i, circle) in plan.boundary_exclusions.iter().enumerate() {
        let address = resolve_or_fallback(resolver, &mut pacer, circle.point, || {
            ADDRESS_NOT_FOUND.to_string()
        })
        .await;
        boundary_locations.push(CustomLocation::new(
            format!("{boundary_label} {}", i + 1),
            address,
            circle.point,
            circle.radius,
        ));
    }

    let document = build_document(
        territory,
        &plan,
        inclusions,
        competitor_locations,
        boundary_locations,
        Utc::now(),
    );

    tracing::info!(
        territory_id = %territory.id,
        total_inclusions = document.summary.total_inclusions,
        total_exclusions = document.summary.total_exclusions,
        lookups = pacer.calls(),
        "targeting document generated"
    );
    Ok(document)
}

fn competitor_location(competitor: &Competitor, address: String) -> CustomLocation {
    let mut location = CustomLocation::new(
        format!("Competing Clinic: {}", competitor.sibling.name),
        address,
        competitor.location,
        competitor.radius,
    );
    location.distance_miles = Some(round_tenth(competitor.distance_miles));
    location.estimated_drive_time_min = Some(whole_minutes(competitor.drive_time_minutes));
    location
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_minutes(minutes: f64) -> u32 {
    // Competitors are capped by the drive-time threshold, so this fits.
    minutes.round().max(0.0) as u32
}

/// Assembles the document from resolved locations.
///
/// Exclusions list competitors first, then boundary exclusions.
#[must_use]
pub fn build_document(
    territory: &Territory,
    plan: &TargetingPlan,
    inclusions: Vec<CustomLocation>,
    competitors: Vec<CustomLocation>,
    boundary: Vec<CustomLocation>,
    generated_at: DateTime<Utc>,
) -> TargetingDocument {
    let competing_clinics_excluded = competitors.len();
    let boundary_exclusions = boundary.len();

    let mut exclusions = competitors;
    exclusions.extend(boundary);

    let summary = TargetingSummary {
        total_inclusions: inclusions.len(),
        total_exclusions: exclusions.len(),
        competing_clinics_excluded,
        boundary_exclusions,
        inclusion_radii_used: distinct_radii(&inclusions),
        exclusion_radii_used: distinct_radii(&exclusions),
        coverage_strategy: plan.size_tier.coverage_strategy().to_string(),
    };

    TargetingDocument {
        clinic_id: territory.id.clone(),
        clinic_name: territory.name.clone(),
        generated_at,
        geo_locations: LocationSet {
            custom_locations: inclusions,
        },
        excluded_geo_locations: LocationSet {
            custom_locations: exclusions,
        },
        territory_info: TerritoryInfo {
            center_latitude: territory.center.lat,
            center_longitude: territory.center.lng,
            territory_width_miles: round_tenth(plan.extent.width_miles),
            territory_height_miles: round_tenth(plan.extent.height_miles),
            territory_size_miles: round_tenth(plan.extent.size_miles),
        },
        summary,
    }
}

#[cfg(test)]
#[path = "assembler_test.rs"]
mod tests;
