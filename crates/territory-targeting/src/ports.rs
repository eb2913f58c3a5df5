//! Collaborators the assembler depends on but does not implement.

use std::future::Future;

use territory_core::{GeoPoint, SiblingTerritory};

use crate::error::{ResolveError, SiblingSourceError};

/// Reverse geocoder: coordinates to a street address.
///
/// `Ok(None)` means the provider had no match. Both that and `Err` are
/// treated as "use the fallback label" by the assembler.
pub trait AddressResolver {
    fn resolve(
        &self,
        point: GeoPoint,
    ) -> impl Future<Output = Result<Option<String>, ResolveError>> + Send;
}

/// Snapshot of every other clinic, read once per export run.
pub trait SiblingSource {
    fn siblings(
        &self,
    ) -> impl Future<Output = Result<Vec<SiblingTerritory>, SiblingSourceError>> + Send;
}

/// Resolver for offline runs: never finds an address.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAddressResolver;

impl AddressResolver for NoAddressResolver {
    async fn resolve(&self, _point: GeoPoint) -> Result<Option<String>, ResolveError> {
        Ok(None)
    }
}

/// An in-memory list already loaded by the caller.
impl SiblingSource for [SiblingTerritory] {
    async fn siblings(&self) -> Result<Vec<SiblingTerritory>, SiblingSourceError> {
        Ok(self.to_vec())
    }
}

impl SiblingSource for Vec<SiblingTerritory> {
    async fn siblings(&self) -> Result<Vec<SiblingTerritory>, SiblingSourceError> {
        Ok(self.clone())
    }
}
