use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};

use crate::model::{RoleId, Worker};
use crate::schedule::MonthlySchedule;

/// Import de travailleurs depuis CSV : header `name,email,rating,roles`
/// (`roles` = liste d'ids séparés par `;`, ex. `1;3`).
pub fn import_workers_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Worker>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        let email = rec.get(1).context("missing email")?.trim();
        if name.is_empty() || email.is_empty() {
            bail!("invalid worker row (empty)");
        }
        let rating: u8 = rec
            .get(2)
            .context("missing rating")?
            .trim()
            .parse()
            .with_context(|| format!("invalid rating for {email}"))?;
        let mut worker = Worker::new(name, email, rating)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("invalid worker row for {email}"))?;
        if let Some(roles) = rec.get(3) {
            let roles = roles.trim();
            if !roles.is_empty() {
                worker.role_ids = parse_role_ids(roles)
                    .with_context(|| format!("invalid roles value for {email}"))?;
            }
        }
        out.push(worker);
    }
    Ok(out)
}

fn parse_role_ids(raw: &str) -> anyhow::Result<Vec<RoleId>> {
    raw.split(';')
        .filter(|chunk| !chunk.trim().is_empty())
        .map(|chunk| {
            chunk
                .trim()
                .parse::<u32>()
                .map(RoleId)
                .with_context(|| format!("invalid role id: {chunk}"))
        })
        .collect()
}

/// Export JSON du planning (jolie mise en forme)
pub fn export_schedule_json<P: AsRef<Path>>(
    path: P,
    schedule: &MonthlySchedule,
) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(schedule)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV du planning, une ligne par affectation et par place vacante :
/// header `Date,Day,Shift,Time,Role,Worker,Status`.
///
/// Pure projection du planning ; `Day` est le nom anglais du jour.
pub fn export_schedule_csv<P: AsRef<Path>>(
    path: P,
    schedule: &MonthlySchedule,
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["Date", "Day", "Shift", "Time", "Role", "Worker", "Status"])?;
    for (date, shifts) in &schedule.days {
        let date_str = date.to_string();
        let day = date.format("%A").to_string();
        for shift in shifts {
            let time = format!(
                "{} - {}",
                shift.start.format("%H:%M"),
                shift.end.format("%H:%M")
            );
            for assigned in &shift.assigned_workers {
                w.write_record([
                    date_str.as_str(),
                    day.as_str(),
                    shift.name.as_str(),
                    time.as_str(),
                    assigned.role_name.as_str(),
                    assigned.worker_name.as_str(),
                    "Assigned",
                ])?;
            }
            for unfilled in &shift.unfilled_positions {
                w.write_record([
                    date_str.as_str(),
                    day.as_str(),
                    shift.name.as_str(),
                    time.as_str(),
                    unfilled.role_name.as_str(),
                    "UNFILLED",
                    "Needs Assignment",
                ])?;
            }
        }
    }
    w.flush()?;
    Ok(())
}
