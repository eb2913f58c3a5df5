//! Geometry for clinic territory targeting.
//!
//! Great-circle distance, ring containment and simplification, drive-time
//! estimates, randomized inclusion/exclusion sampling, and the radius
//! schedules applied to sampled points. Everything here is pure computation.

pub mod distance;
pub mod drive_time;
pub mod polygon;
pub mod radius;
pub mod sampling;
pub mod simplify;

pub use distance::{distance_miles, EARTH_RADIUS_MILES};
pub use drive_time::{average_speed_mph, drive_time_minutes};
pub use polygon::{point_in_polygon, BoundingBox, TerritoryExtent};
pub use radius::{competitor_radius, select_radii, SizeTier};
pub use sampling::{
    boundary_vertex_anchors, nearest_vertex_miles, sample_exterior, sample_interior,
    spread_by_spacing, SamplePoint, SamplerConfig,
};
pub use simplify::{perpendicular_distance, simplify, simplify_to_target};
