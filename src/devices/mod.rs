//! Appliance data model: catalog devices, fuel baselines, and selections.

/// Alternative fuel kinds and reference data.
pub mod fuel;
pub mod types;

// Re-export the main types for convenience
pub use fuel::{AlternativeFuel, FuelKind, FuelReference, FuelReferences, FuelUnit};
pub use types::{
    Device, DeviceCategory, DeviceEntry, FuelEntry, LoadProfileType, SelectedDevice,
};
