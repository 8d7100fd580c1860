use crate::model::{Day, Roster, Shift, Worker};
use crate::scheduler::Ledger;
use crate::storage::Plan;
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import d'employés depuis CSV: header `id,name,max_hours_per_week[,unavailable_days]`
///
/// Les jours indisponibles sont séparés par `;` ou `|` (ex. `monday;friday`).
pub fn import_workers_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Worker>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let id = parse_u32(rec.get(0).context("missing id")?, "id")?;
        let name = rec.get(1).context("missing name")?.trim();
        if name.is_empty() {
            bail!("invalid worker row {id} (empty name)");
        }
        let cap = parse_u32(
            rec.get(2).context("missing max_hours_per_week")?,
            "max_hours_per_week",
        )?;
        let days = match rec.get(3) {
            Some(raw) => parse_days(raw).with_context(|| format!("unavailable_days for worker {id}"))?,
            None => Vec::new(),
        };
        out.push(Worker::new(id, name, cap, days)?);
    }
    Ok(out)
}

/// Import de créneaux: header `id,day,start_hour,duration_hours,required_workers`
pub fn import_shifts_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Shift>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let id = parse_u32(rec.get(0).context("missing id")?, "id")?;
        let day: Day = rec.get(1).context("missing day")?.parse()?;
        let start = rec.get(2).context("missing start_hour")?.trim();
        let start: u8 = start
            .parse()
            .with_context(|| format!("start_hour for shift {id}: {start}"))?;
        let duration = parse_u32(rec.get(3).context("missing duration_hours")?, "duration_hours")?;
        let required = parse_u32(
            rec.get(4).context("missing required_workers")?,
            "required_workers",
        )?;
        let shift = Shift::new(id, day, start, duration, required)
            .with_context(|| format!("invalid shift row {id}"))?;
        out.push(shift);
    }
    Ok(out)
}

fn parse_u32(raw: &str, field: &str) -> anyhow::Result<u32> {
    let raw = raw.trim();
    raw.parse()
        .with_context(|| format!("{field}: expected a non-negative integer, got {raw:?}"))
}

fn parse_days(raw: &str) -> anyhow::Result<Vec<Day>> {
    raw.split([';', '|'])
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| chunk.parse::<Day>().map_err(anyhow::Error::from))
        .collect()
}

/// Export CSV des affectations: header `shift_id,day,start_hour,end_hour,worker_id,worker_name`
pub fn export_assignments_csv<P: AsRef<Path>>(
    path: P,
    roster: &Roster,
    ledger: &Ledger,
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record([
        "shift_id",
        "day",
        "start_hour",
        "end_hour",
        "worker_id",
        "worker_name",
    ])?;

    let mut shifts: Vec<&Shift> = roster.shifts().iter().collect();
    shifts.sort_by_key(|s| s.week_order());

    let mut sid = itoa::Buffer::new();
    let mut start = itoa::Buffer::new();
    let mut end = itoa::Buffer::new();
    let mut wid = itoa::Buffer::new();
    for s in shifts {
        for worker_id in ledger.assigned_workers_for(s.id()) {
            let name = roster
                .find_worker(*worker_id)
                .map(Worker::name)
                .unwrap_or("");
            w.write_record([
                sid.format(s.id().get()),
                s.day().as_str(),
                start.format(s.start_hour()),
                end.format(s.end_hour()),
                wid.format(worker_id.get()),
                name,
            ])?;
        }
    }
    w.flush()?;
    Ok(())
}

/// Export JSON du plan (jolie mise en forme)
pub fn export_plan_json<P: AsRef<Path>>(path: P, plan: &Plan) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(plan)?;
    fs::write(path, s)?;
    Ok(())
}
