//! CSV export for the current and optimized load profiles.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::sim::profile::LoadProfilePoint;

/// Column header for load profile export.
const HEADER: &str = "minute,time,band,current_w,optimized_w,current_cost,optimized_cost";

/// Exports both load profiles side by side to a CSV file at the given path.
///
/// # Errors
///
/// Returns a `PlannerError` if file creation or writing fails.
pub fn export_profile_csv(
    current: &[LoadProfilePoint],
    optimized: &[LoadProfilePoint],
    path: &Path,
) -> Result<()> {
    let file = File::create(path)?;
    write_profile_csv(current, optimized, BufWriter::new(file))
}

/// Writes one row per sample of the two profiles to any writer.
///
/// The profiles are paired by sample index; rows stop at the shorter one.
/// Output is deterministic for identical inputs.
///
/// # Errors
///
/// Returns a `PlannerError` if writing fails.
pub fn write_profile_csv(
    current: &[LoadProfilePoint],
    optimized: &[LoadProfilePoint],
    writer: impl Write,
) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for (c, o) in current.iter().zip(optimized) {
        wtr.write_record(&[
            c.minute.to_string(),
            c.time.clone(),
            c.band.to_string(),
            format!("{:.2}", c.total_watts),
            format!("{:.2}", o.total_watts),
            format!("{:.4}", c.cost),
            format!("{:.4}", o.cost),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
