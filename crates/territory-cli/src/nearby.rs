//! `nearby` command: competitor candidates for one clinic, without address
//! lookups.

use territory_core::{AppConfig, ClinicRecord, SiblingTerritory};
use territory_targeting::{find_competitors, Competitor};

use crate::find_record;

pub(crate) fn run_nearby(
    config: &AppConfig,
    records: &[ClinicRecord],
    clinic_id: &str,
) -> anyhow::Result<()> {
    let record = find_record(records, clinic_id)?;
    let territory = record
        .territory()
        .ok_or_else(|| anyhow::anyhow!("clinic '{clinic_id}' has no valid center coordinates"))?;
    let siblings: Vec<SiblingTerritory> = records.iter().map(ClinicRecord::sibling).collect();

    let competitors = find_competitors(&territory, &siblings, config.max_drive_minutes);
    if competitors.is_empty() {
        println!(
            "no clinics within {} minutes of {}",
            config.max_drive_minutes, territory.name
        );
        return Ok(());
    }
    for competitor in &competitors {
        println!("{}", format_competitor(competitor));
    }
    Ok(())
}

fn format_competitor(competitor: &Competitor) -> String {
    format!(
        "{:<32} {:>6.1} mi {:>4.0} min  radius {} mi",
        competitor.sibling.name,
        competitor.distance_miles,
        competitor.drive_time_minutes,
        competitor.radius
    )
}
