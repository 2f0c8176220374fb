//! Comparison snapshots: the device list plus the headline savings.
//!
//! A snapshot never stores the computed state; loading one yields devices to
//! feed back into [`crate::sim::aggregate::recompute`].

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::validate_devices;
use crate::devices::{DeviceEntry, FuelReferences, SelectedDevice};
use crate::error::{PlannerError, Result};
use crate::sim::aggregate::MultiDeviceState;
use crate::tariff::Tariff;

/// Serialized comparison: devices and optimized savings against scenario A.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComparisonSnapshot {
    pub devices: Vec<DeviceEntry>,
    pub monthly_savings: f64,
    pub annual_savings: f64,
}

impl ComparisonSnapshot {
    /// Captures `devices` with the savings of their computed `state`.
    pub fn capture(devices: &[SelectedDevice], state: &MultiDeviceState) -> Self {
        Self {
            devices: devices.iter().map(SelectedDevice::to_entry).collect(),
            monthly_savings: state.savings.monthly_vs_baseline,
            annual_savings: state.savings.annual_vs_baseline,
        }
    }

    /// Rebuilds the device list for recomputation.
    pub fn restore(&self, tariff: &Tariff, fuels: &FuelReferences) -> Vec<SelectedDevice> {
        self.devices
            .iter()
            .map(|entry| SelectedDevice::from_entry(entry, tariff, fuels))
            .collect()
    }

    /// # Errors
    ///
    /// Returns a `PlannerError` if serialization or writing fails.
    pub fn write_json(&self, writer: impl Write) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Parses a snapshot and validates its device entries.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::Json` if the input is not a snapshot, or
    /// `PlannerError::Config` if an entry is out of range.
    pub fn read_json(reader: impl Read) -> Result<Self> {
        let snapshot: Self = serde_json::from_reader(reader)?;
        let errors = validate_devices(&snapshot.devices);
        if !errors.is_empty() {
            return Err(PlannerError::Config(errors));
        }
        Ok(snapshot)
    }

    /// Writes the snapshot as pretty-printed JSON to `path`.
    ///
    /// # Errors
    ///
    /// Returns a `PlannerError` if file creation or writing fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_json(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Reads a snapshot from `path`.
    ///
    /// # Errors
    ///
    /// Returns a `PlannerError` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        Self::read_json(BufReader::new(File::open(path)?))
    }
}
