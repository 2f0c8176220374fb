//! Appliance reference data and the user-configured device record.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::fuel::{AlternativeFuel, FuelKind, FuelReferences};
use crate::tariff::{Tariff, TimeBlocks};

/// Broad appliance category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceCategory {
    Cooking,
    Heating,
    Refrigeration,
    Lighting,
    #[default]
    Other,
}

/// Intra-hour power-draw shape of an appliance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadProfileType {
    /// Rated power for the whole active period.
    #[default]
    Continuous,
    /// Short high-frequency duty cycle, e.g. an induction burner.
    Pulsing,
    /// Compressor-style on/standby cycle, e.g. a refrigerator.
    Cycling,
}

impl fmt::Display for LoadProfileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Continuous => "continuous",
            Self::Pulsing => "pulsing",
            Self::Cycling => "cycling",
        })
    }
}

/// Immutable catalog appliance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Catalog identifier (not unique within a household list).
    pub id: String,
    pub name: String,
    pub category: DeviceCategory,
    /// Rated power in watts.
    pub watts: f64,
    pub profile: LoadProfileType,
    /// Whether the appliance replaces a non-electric fuel (cooking devices).
    pub requires_alternative_fuel: bool,
}

impl Device {
    /// Creates a catalog device; cooking devices require a fuel baseline.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: DeviceCategory,
        watts: f64,
        profile: LoadProfileType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            watts,
            profile,
            requires_alternative_fuel: category == DeviceCategory::Cooking,
        }
    }

    /// Rated power in kilowatts.
    pub fn kw(&self) -> f64 {
        self.watts / 1000.0
    }
}

/// A catalog device bound to a schedule, a daily duration, and optional
/// fuel baseline and meal count. The unit the aggregator works over.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedDevice {
    /// Per-instance identity; the same catalog device may appear twice.
    pub instance_id: String,
    pub device: Device,
    pub blocks: TimeBlocks,
    /// Hours of operation per day.
    pub duration_hours: f64,
    pub fuel: Option<AlternativeFuel>,
    pub meals_per_day: Option<u32>,
}

impl SelectedDevice {
    /// Creates a selected device with a freshly generated instance id.
    pub fn new(device: Device, blocks: TimeBlocks, duration_hours: f64) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), device, blocks, duration_hours)
    }

    /// Creates a selected device with a caller-supplied instance id.
    pub fn with_id(
        instance_id: impl Into<String>,
        device: Device,
        blocks: TimeBlocks,
        duration_hours: f64,
    ) -> Self {
        Self {
            instance_id: instance_id.into(),
            device,
            blocks,
            duration_hours,
            fuel: None,
            meals_per_day: None,
        }
    }

    #[must_use]
    pub fn with_fuel(mut self, fuel: AlternativeFuel) -> Self {
        self.fuel = Some(fuel);
        self
    }

    #[must_use]
    pub fn with_meals(mut self, meals_per_day: u32) -> Self {
        self.meals_per_day = Some(meals_per_day);
        self
    }

    /// Rebuilds a selected device from its serialized entry.
    ///
    /// A missing id is generated; fuel values missing from the entry come
    /// from `fuels`.
    pub fn from_entry(entry: &DeviceEntry, tariff: &Tariff, fuels: &FuelReferences) -> Self {
        let device = Device {
            id: entry.catalog_id.clone().unwrap_or_else(|| entry.name.clone()),
            name: entry.name.clone(),
            category: entry.category,
            watts: entry.watts,
            profile: entry.profile,
            requires_alternative_fuel: entry.category == DeviceCategory::Cooking,
        };
        let blocks = TimeBlocks::from_selected_hours(&entry.hours, tariff);
        let mut selected = match &entry.id {
            Some(id) => Self::with_id(id.clone(), device, blocks, entry.duration_hours),
            None => Self::new(device, blocks, entry.duration_hours),
        };
        selected.fuel = entry
            .fuel
            .map(|f| fuels.resolve(f.kind, f.cost_per_unit, f.daily_consumption));
        selected.meals_per_day = entry.meals_per_day;
        selected
    }

    /// Serializable form with every optional value made explicit.
    pub fn to_entry(&self) -> DeviceEntry {
        DeviceEntry {
            id: Some(self.instance_id.clone()),
            catalog_id: Some(self.device.id.clone()),
            name: self.device.name.clone(),
            category: self.device.category,
            watts: self.device.watts,
            profile: self.device.profile,
            hours: self.blocks.selected_hours(),
            duration_hours: self.duration_hours,
            meals_per_day: self.meals_per_day,
            fuel: self.fuel.map(|f| FuelEntry {
                kind: f.kind,
                cost_per_unit: Some(f.cost_per_unit),
                daily_consumption: Some(f.daily_consumption),
            }),
        }
    }
}

/// Fuel baseline as written in configuration or a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FuelEntry {
    pub kind: FuelKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_per_unit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_consumption: Option<f64>,
}

/// Serialized shape of a [`SelectedDevice`]: selected hours instead of the
/// full block set, since bands are re-derived from the tariff on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub category: DeviceCategory,
    pub watts: f64,
    #[serde(default)]
    pub profile: LoadProfileType,
    #[serde(default)]
    pub hours: Vec<u8>,
    pub duration_hours: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meals_per_day: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel: Option<FuelEntry>,
}
