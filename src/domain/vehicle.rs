// src/domain/vehicle.rs

use serde::{Deserialize, Serialize};

/// One row of the operator-authored vehicle list.
///
/// `classic_market_url` is a locator for the Classic.com market page; the
/// other columns describe the vehicle itself.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VehicleRow {
    pub name: String,
    pub year: i32,
    pub make: String,
    pub model: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub variant: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub classic_market_url: Option<String>,
}

impl VehicleRow {
    pub fn identity(&self) -> VehicleIdentity {
        VehicleIdentity {
            display_name: self.name.clone(),
            year: self.year,
            make: self.make.clone(),
            model: self.model.clone(),
            variant: self.variant.clone(),
        }
    }
}

/// The label a payload is published under. Only the display name and year
/// are part of the wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleIdentity {
    #[serde(rename = "vehicle_name")]
    pub display_name: String,
    #[serde(rename = "vehicle_year")]
    pub year: i32,
    #[serde(skip)]
    pub make: String,
    #[serde(skip)]
    pub model: String,
    #[serde(skip)]
    pub variant: Option<String>,
}

impl std::fmt::Display for VehicleIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.display_name, self.year)
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}
