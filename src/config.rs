//! TOML-based household configuration and preset definitions.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::calc::emissions::EmissionFactors;
use crate::devices::{
    DeviceCategory, DeviceEntry, FuelEntry, FuelKind, FuelReference, FuelReferences,
    LoadProfileType, SelectedDevice,
};
use crate::sim::profile::ProfileSettings;
use crate::sim::types::PlannerConfig;
use crate::tariff::{HOURS_PER_DAY, RateBand, Tariff};

/// Top-level household configuration parsed from TOML.
///
/// All sections have defaults; an empty document is a valid household with
/// no devices. Load from TOML with [`HouseholdConfig::from_toml_file`] or
/// start from a preset with [`HouseholdConfig::from_preset`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HouseholdConfig {
    /// Band rates and hour ranges.
    #[serde(default)]
    pub tariff: Tariff,
    /// Emission factors and tree absorption constant.
    #[serde(default)]
    pub emissions: EmissionFactors,
    /// Fuel reference overrides, merged over the built-in table.
    #[serde(default)]
    pub fuels: BTreeMap<FuelKind, FuelReference>,
    /// Load profile resolution.
    #[serde(default)]
    pub profile: ProfileSettings,
    /// Selected devices.
    #[serde(default)]
    pub devices: Vec<DeviceEntry>,
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("config error: {field} — {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"devices[0].watts"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn entry(
    id: &str,
    name: &str,
    category: DeviceCategory,
    watts: f64,
    profile: LoadProfileType,
    hours: &[u8],
    duration_hours: f64,
) -> DeviceEntry {
    DeviceEntry {
        id: Some(id.to_string()),
        catalog_id: Some(id.to_string()),
        name: name.to_string(),
        category,
        watts,
        profile,
        hours: hours.to_vec(),
        duration_hours,
        meals_per_day: None,
        fuel: None,
    }
}

impl HouseholdConfig {
    /// Returns the demo household: a mixed kitchen and home list with an
    /// LPG-cooking baseline.
    pub fn demo() -> Self {
        let stove = DeviceEntry {
            meals_per_day: Some(3),
            fuel: Some(FuelEntry {
                kind: FuelKind::Lpg,
                cost_per_unit: None,
                daily_consumption: None,
            }),
            ..entry(
                "induction-stove",
                "Induction stove",
                DeviceCategory::Cooking,
                2000.0,
                LoadProfileType::Pulsing,
                &[6, 12, 18],
                2.0,
            )
        };
        let rice_cooker = DeviceEntry {
            meals_per_day: Some(2),
            fuel: Some(FuelEntry {
                kind: FuelKind::Charcoal,
                cost_per_unit: None,
                daily_consumption: Some(0.5),
            }),
            ..entry(
                "rice-cooker",
                "Rice cooker",
                DeviceCategory::Cooking,
                700.0,
                LoadProfileType::Continuous,
                &[7, 19],
                1.0,
            )
        };
        Self {
            devices: vec![
                stove,
                rice_cooker,
                entry(
                    "fridge",
                    "Refrigerator",
                    DeviceCategory::Refrigeration,
                    150.0,
                    LoadProfileType::Cycling,
                    &(0..24).collect::<Vec<u8>>(),
                    24.0,
                ),
                entry(
                    "water-heater",
                    "Water heater",
                    DeviceCategory::Heating,
                    3000.0,
                    LoadProfileType::Continuous,
                    &[6, 7],
                    1.5,
                ),
                entry(
                    "lights",
                    "Lighting",
                    DeviceCategory::Lighting,
                    120.0,
                    LoadProfileType::Continuous,
                    &[18, 19, 20, 21, 22],
                    5.0,
                ),
            ],
            ..Self::default()
        }
    }

    /// Returns the evening-peak preset: the demo devices, every flexible one
    /// scheduled in peak hours.
    pub fn evening_peak() -> Self {
        let mut cfg = Self::demo();
        let tariff = cfg.tariff.clone();
        let peak_hours: Vec<u8> = (0..HOURS_PER_DAY as u8)
            .filter(|&h| tariff.rate_for_hour(h) == RateBand::Peak)
            .collect();
        for device in &mut cfg.devices {
            if device.hours.len() < HOURS_PER_DAY {
                let needed = (device.duration_hours.ceil() as usize).clamp(1, peak_hours.len());
                device.hours = peak_hours[..needed].to_vec();
            }
        }
        cfg
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["demo", "evening_peak"];

    /// Loads a household from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "demo" => Ok(Self::demo()),
            "evening_peak" => Ok(Self::evening_peak()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a household from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("household", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a household from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Calculation constants injected into every computation.
    pub fn engine_config(&self) -> PlannerConfig {
        PlannerConfig {
            tariff: self.tariff.clone(),
            emissions: self.emissions.clone(),
            profile: self.profile,
        }
    }

    /// Built-in fuel references with this household's overrides applied.
    pub fn fuel_references(&self) -> FuelReferences {
        let mut refs = FuelReferences::default();
        for (kind, reference) in &self.fuels {
            refs.insert(*kind, *reference);
        }
        refs
    }

    /// Resolves the `[[devices]]` entries. Only meaningful on a
    /// configuration that passed [`HouseholdConfig::validate`].
    pub fn selected_devices(&self) -> Vec<SelectedDevice> {
        let refs = self.fuel_references();
        self.devices
            .iter()
            .map(|entry| SelectedDevice::from_entry(entry, &self.tariff, &refs))
            .collect()
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        self.validate_tariff(&mut errors);
        self.validate_emissions(&mut errors);
        self.validate_profile(&mut errors);

        for (kind, reference) in &self.fuels {
            check_non_negative(
                &mut errors,
                format!("fuels.{kind}.cost_per_unit"),
                reference.cost_per_unit,
            );
            check_non_negative(
                &mut errors,
                format!("fuels.{kind}.daily_consumption"),
                reference.daily_consumption,
            );
        }

        errors.extend(validate_devices(&self.devices));
        errors
    }

    fn validate_tariff(&self, errors: &mut Vec<ConfigError>) {
        let t = &self.tariff;
        check_non_negative(errors, "tariff.peak_rate".into(), t.peak_rate);
        check_non_negative(errors, "tariff.midpeak_rate".into(), t.midpeak_rate);
        check_non_negative(errors, "tariff.offpeak_rate".into(), t.offpeak_rate);
        if t.offpeak_rate >= t.midpeak_rate {
            errors.push(ConfigError::new(
                "tariff.offpeak_rate",
                "must be < tariff.midpeak_rate",
            ));
        }
        if t.midpeak_rate >= t.peak_rate {
            errors.push(ConfigError::new(
                "tariff.midpeak_rate",
                "must be < tariff.peak_rate",
            ));
        }
        for (i, range) in t.ranges.iter().enumerate() {
            if usize::from(range.end) >= HOURS_PER_DAY {
                errors.push(ConfigError::new(
                    format!("tariff.ranges[{i}].end"),
                    "must be in 0–23",
                ));
            }
            if range.start > range.end {
                errors.push(ConfigError::new(
                    format!("tariff.ranges[{i}].start"),
                    "must be <= end",
                ));
            }
        }
    }

    fn validate_emissions(&self, errors: &mut Vec<ConfigError>) {
        let e = &self.emissions;
        check_non_negative(
            errors,
            "emissions.electricity_kg_per_kwh".into(),
            e.electricity_kg_per_kwh,
        );
        if !(e.tree_absorption_kg_per_year.is_finite() && e.tree_absorption_kg_per_year > 0.0) {
            errors.push(ConfigError::new(
                "emissions.tree_absorption_kg_per_year",
                "must be > 0",
            ));
        }
        for (kind, factor) in &e.fuel_kg_per_unit {
            check_non_negative(errors, format!("emissions.fuel_kg_per_unit.{kind}"), *factor);
        }
    }

    fn validate_profile(&self, errors: &mut Vec<ConfigError>) {
        let p = &self.profile;
        if p.interval_minutes == 0 || 60 % p.interval_minutes != 0 {
            errors.push(ConfigError::new(
                "profile.interval_minutes",
                "must be > 0 and divide 60",
            ));
        }
        if !(1..=30).contains(&p.ramp_minutes) {
            errors.push(ConfigError::new("profile.ramp_minutes", "must be in 1–30"));
        }
    }
}

fn check_non_negative(errors: &mut Vec<ConfigError>, field: String, value: f64) {
    if !(value.is_finite() && value >= 0.0) {
        errors.push(ConfigError::new(field, "must be finite and >= 0"));
    }
}

/// Checks every device entry and rejects repeated instance ids.
pub(crate) fn validate_devices(devices: &[DeviceEntry]) -> Vec<ConfigError> {
    let mut errors = Vec::new();
    let mut seen_ids = BTreeSet::new();
    for (i, device) in devices.iter().enumerate() {
        validate_device(&mut errors, i, device);
        if let Some(id) = &device.id {
            if !seen_ids.insert(id.as_str()) {
                errors.push(ConfigError::new(
                    format!("devices[{i}].id"),
                    format!("duplicate id \"{id}\""),
                ));
            }
        }
    }
    errors
}

fn validate_device(errors: &mut Vec<ConfigError>, i: usize, device: &DeviceEntry) {
    let field = |name: &str| format!("devices[{i}].{name}");

    check_non_negative(errors, field("watts"), device.watts);
    if !(0.0..=24.0).contains(&device.duration_hours) {
        errors.push(ConfigError::new(field("duration_hours"), "must be in [0, 24]"));
    }

    let mut seen = [false; HOURS_PER_DAY];
    for &hour in &device.hours {
        match seen.get_mut(usize::from(hour)) {
            None => errors.push(ConfigError::new(
                field("hours"),
                format!("hour {hour} must be in 0–23"),
            )),
            Some(true) => errors.push(ConfigError::new(
                field("hours"),
                format!("hour {hour} is listed twice"),
            )),
            Some(flag) => *flag = true,
        }
    }

    if device.meals_per_day == Some(0) {
        errors.push(ConfigError::new(field("meals_per_day"), "must be > 0"));
    }
    if let Some(fuel) = &device.fuel {
        if let Some(cost) = fuel.cost_per_unit {
            check_non_negative(errors, field("fuel.cost_per_unit"), cost);
        }
        if let Some(consumption) = fuel.daily_consumption {
            check_non_negative(errors, field("fuel.daily_consumption"), consumption);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_preset_valid() {
        let cfg = HouseholdConfig::demo();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "demo should be valid: {errors:?}");
    }

    #[test]
    fn from_preset_unknown() {
        let err = HouseholdConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert_eq!(e.field, "preset");
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn all_presets_are_valid() {
        for name in HouseholdConfig::PRESETS {
            let cfg = HouseholdConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn evening_peak_moves_flexible_devices_to_peak() {
        let cfg = HouseholdConfig::evening_peak();
        let tariff = Tariff::default();
        for device in cfg.devices.iter().filter(|d| d.hours.len() < HOURS_PER_DAY) {
            assert!(
                device
                    .hours
                    .iter()
                    .all(|&h| tariff.rate_for_hour(h) == RateBand::Peak),
                "{} not in peak: {:?}",
                device.name,
                device.hours
            );
        }
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[tariff]
peak_rate = 25.0
midpeak_rate = 15.0
offpeak_rate = 9.0

[emissions]
electricity_kg_per_kwh = 0.5

[fuels.lpg]
cost_per_unit = 80.0
daily_consumption = 0.3

[profile]
interval_minutes = 5
ramp_minutes = 10

[[devices]]
id = "stove"
name = "Induction stove"
category = "cooking"
watts = 1800.0
profile = "pulsing"
hours = [6, 18]
duration_hours = 1.5
meals_per_day = 3

[devices.fuel]
kind = "lpg"

[[devices]]
name = "Fan"
watts = 60.0
hours = [13, 14, 15]
duration_hours = 3.0
"#;
        let cfg = HouseholdConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.unwrap_or_default();
        assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
        assert_eq!(cfg.tariff.peak_rate, 25.0);
        // ranges kept default
        assert_eq!(cfg.tariff.rate_for_hour(19), RateBand::Peak);
        assert_eq!(cfg.profile.interval_minutes, 5);
        assert_eq!(cfg.devices.len(), 2);

        let devices = cfg.selected_devices();
        let stove_fuel = devices[0].fuel;
        assert_eq!(stove_fuel.map(|f| f.cost_per_unit), Some(80.0));
        assert_eq!(stove_fuel.map(|f| f.daily_consumption), Some(0.3));
        assert_eq!(devices[0].instance_id, "stove");
        assert_eq!(devices[1].device.profile, LoadProfileType::Continuous);
        assert!(!devices[1].instance_id.is_empty());
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[tariff]
peak_rate = 20.0
bogus_field = true
"#;
        assert!(HouseholdConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let cfg = HouseholdConfig::from_toml_str("[profile]\nramp_minutes = 5\n");
        let cfg = cfg.unwrap_or_default();
        assert_eq!(cfg.profile.ramp_minutes, 5);
        assert_eq!(cfg.profile.interval_minutes, 15);
        assert_eq!(cfg.tariff.offpeak_rate, 8.0);
        assert!(cfg.devices.is_empty());
    }

    #[test]
    fn validation_catches_unordered_rates() {
        let mut cfg = HouseholdConfig::default();
        cfg.tariff.offpeak_rate = 30.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "tariff.offpeak_rate"));
    }

    #[test]
    fn validation_catches_bad_interval() {
        let mut cfg = HouseholdConfig::default();
        cfg.profile.interval_minutes = 7;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "profile.interval_minutes"));
    }

    #[test]
    fn validation_catches_bad_hours() {
        let mut cfg = HouseholdConfig::demo();
        cfg.devices[0].hours = vec![3, 3, 24];
        let errors = cfg.validate();
        let hour_errors: Vec<_> = errors.iter().filter(|e| e.field == "devices[0].hours").collect();
        assert_eq!(hour_errors.len(), 2, "{errors:?}");
    }

    #[test]
    fn validation_catches_duration_and_meals() {
        let mut cfg = HouseholdConfig::demo();
        cfg.devices[1].duration_hours = 25.0;
        cfg.devices[1].meals_per_day = Some(0);
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "devices[1].duration_hours"));
        assert!(errors.iter().any(|e| e.field == "devices[1].meals_per_day"));
    }

    #[test]
    fn validation_catches_duplicate_ids() {
        let mut cfg = HouseholdConfig::demo();
        cfg.devices[1].id = cfg.devices[0].id.clone();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "devices[1].id"));
    }

    #[test]
    fn config_error_display() {
        let e = ConfigError::new("profile.ramp_minutes", "must be in 1–30");
        assert_eq!(e.to_string(), "config error: profile.ramp_minutes — must be in 1–30");
    }
}
