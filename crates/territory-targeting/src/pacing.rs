//! Fixed-delay pacing for outbound address lookups.
//!
//! Address providers throttle aggressively, so every lookup after the first
//! in a run waits `delay` before it is issued. A [`Pacer`] is owned by one
//! export run; nothing is shared between runs.

use std::time::Duration;

use territory_core::GeoPoint;

use crate::ports::AddressResolver;

#[derive(Debug)]
pub struct Pacer {
    delay: Duration,
    calls: u32,
}

impl Pacer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay, calls: 0 }
    }

    /// Number of times [`Pacer::ready`] has been awaited.
    #[must_use]
    pub fn calls(&self) -> u32 {
        self.calls
    }

    /// Waits until the next call may be issued.
    ///
    /// Returns immediately on the first call and when the delay is zero.
    pub async fn ready(&mut self) {
        if self.calls > 0 && !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.calls = self.calls.saturating_add(1);
    }
}

/// Resolves `point` to an address, paced by `pacer`.
///
/// A lookup error or an empty answer yields `fallback`; neither aborts the
/// run.
pub async fn resolve_or_fallback<A>(
    resolver: &A,
    pacer: &mut Pacer,
    point: GeoPoint,
    fallback: impl FnOnce() -> String,
) -> String
where
    A: AddressResolver,
{
    pacer.ready().await;
    match resolver.resolve(point).await {
        Ok(Some(address)) if !address.trim().is_empty() => address,
        Ok(_) => {
            tracing::debug!(lat = point.lat, lng = point.lng, "no address found; using fallback");
            fallback()
        }
        Err(e) => {
            tracing::warn!(
                lat = point.lat,
                lng = point.lng,
                error = %e,
                "address lookup failed; using fallback"
            );
            fallback()
        }
    }
}
