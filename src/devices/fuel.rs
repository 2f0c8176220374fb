//! Non-electric baseline fuels and their reference cost/consumption data.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of alternative cooking fuel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelKind {
    Lpg,
    Kerosene,
    Charcoal,
    Firewood,
}

impl FuelKind {
    pub const ALL: [Self; 4] = [Self::Lpg, Self::Kerosene, Self::Charcoal, Self::Firewood];

    /// Unit the fuel is bought and consumed in.
    pub fn unit(self) -> FuelUnit {
        match self {
            Self::Kerosene => FuelUnit::Liter,
            Self::Lpg | Self::Charcoal | Self::Firewood => FuelUnit::Kilogram,
        }
    }
}

impl fmt::Display for FuelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lpg => "lpg",
            Self::Kerosene => "kerosene",
            Self::Charcoal => "charcoal",
            Self::Firewood => "firewood",
        })
    }
}

/// Unit of measure for fuel quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelUnit {
    Kilogram,
    Liter,
}

impl fmt::Display for FuelUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Kilogram => "kg",
            Self::Liter => "L",
        })
    }
}

/// A resolved non-electric baseline for one device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlternativeFuel {
    pub kind: FuelKind,
    /// Price per `unit`.
    pub cost_per_unit: f64,
    pub unit: FuelUnit,
    /// Quantity burned per day, in `unit`.
    pub daily_consumption: f64,
}

impl AlternativeFuel {
    pub fn new(kind: FuelKind, cost_per_unit: f64, daily_consumption: f64) -> Self {
        Self {
            kind,
            cost_per_unit,
            unit: kind.unit(),
            daily_consumption,
        }
    }
}

/// Reference price and typical daily use of one fuel kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FuelReference {
    pub cost_per_unit: f64,
    pub daily_consumption: f64,
}

/// Reference data for every fuel kind, keyed by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FuelReferences(BTreeMap<FuelKind, FuelReference>);

impl Default for FuelReferences {
    fn default() -> Self {
        let table = [
            (FuelKind::Lpg, 75.0, 0.4),
            (FuelKind::Kerosene, 70.0, 0.5),
            (FuelKind::Charcoal, 40.0, 1.0),
            (FuelKind::Firewood, 15.0, 2.0),
        ];
        Self(
            table
                .into_iter()
                .map(|(kind, cost_per_unit, daily_consumption)| {
                    (
                        kind,
                        FuelReference {
                            cost_per_unit,
                            daily_consumption,
                        },
                    )
                })
                .collect(),
        )
    }
}

impl FuelReferences {
    /// Returns the reference entry for `kind`, if any.
    pub fn get(&self, kind: FuelKind) -> Option<&FuelReference> {
        self.0.get(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FuelKind, &FuelReference)> {
        self.0.iter()
    }

    /// Overrides or adds the reference entry for `kind`.
    pub fn insert(&mut self, kind: FuelKind, reference: FuelReference) {
        self.0.insert(kind, reference);
    }

    /// Builds an [`AlternativeFuel`], filling missing values from the table.
    /// Kinds absent from the table default to zero.
    pub fn resolve(
        &self,
        kind: FuelKind,
        cost_per_unit: Option<f64>,
        daily_consumption: Option<f64>,
    ) -> AlternativeFuel {
        let reference = self.get(kind);
        AlternativeFuel::new(
            kind,
            cost_per_unit.unwrap_or_else(|| reference.map_or(0.0, |r| r.cost_per_unit)),
            daily_consumption.unwrap_or_else(|| reference.map_or(0.0, |r| r.daily_consumption)),
        )
    }
}
