//! `simplify` command: print a reduced boundary as a GeoJSON Polygon.

use territory_core::{ClinicRecord, GeoPoint};
use territory_geo::simplify_to_target;

use crate::find_record;

pub(crate) fn run_simplify(
    records: &[ClinicRecord],
    clinic_id: &str,
    target: usize,
) -> anyhow::Result<()> {
    let record = find_record(records, clinic_id)?;
    let ring = record
        .boundary()
        .map_err(|e| anyhow::anyhow!("clinic '{clinic_id}' has no usable boundary: {e}"))?;

    let simplified = simplify_to_target(&ring, target);
    tracing::info!(
        clinic_id,
        before = ring.len(),
        after = simplified.len(),
        target,
        "boundary simplified"
    );
    println!("{}", serde_json::to_string_pretty(&polygon_geometry(&simplified))?);
    Ok(())
}

/// GeoJSON Polygon with `[lng, lat]` positions, closed if the ring is open.
fn polygon_geometry(ring: &[GeoPoint]) -> serde_json::Value {
    let mut positions: Vec<[f64; 2]> = ring.iter().map(|p| [p.lng, p.lat]).collect();
    if let Some(first) = ring.first().filter(|first| ring.last() != Some(*first)) {
        positions.push([first.lng, first.lat]);
    }
    serde_json::json!({
        "type": "Polygon",
        "coordinates": [positions],
    })
}
