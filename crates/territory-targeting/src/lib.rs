//! Ad-targeting export for clinic territories.
//!
//! [`generate_targeting`] turns a territory boundary into a
//! [`TargetingDocument`]: interior inclusion circles, competitor and
//! boundary exclusion circles, and summary statistics. Address lookup and
//! the list of sibling clinics come from caller-supplied [`AddressResolver`]
//! and [`SiblingSource`] implementations.

pub mod assembler;
pub mod document;
pub mod error;
pub mod pacing;
pub mod ports;

pub use assembler::{
    build_document, find_competitors, generate_targeting, plan_targeting, require_boundary,
    BoundaryStrategy, Competitor, PlannedCircle, TargetingConfig, TargetingPlan,
    ADDRESS_NOT_FOUND,
};
pub use document::{
    export_file_name, CustomLocation, LocationSet, TargetingDocument, TargetingSummary,
    TerritoryInfo, DISTANCE_UNIT,
};
pub use error::{ResolveError, SiblingSourceError, TargetingError};
pub use pacing::{resolve_or_fallback, Pacer};
pub use ports::{AddressResolver, NoAddressResolver, SiblingSource};
