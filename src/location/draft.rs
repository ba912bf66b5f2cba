//! Address draft: the unpersisted delivery address form.

use serde::{Deserialize, Serialize};

use crate::error::LocationError;

/// One field of the address form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AddressField {
    FlatNo,
    Street,
    Area,
    Landmark,
}

impl AddressField {
    pub const ALL: [AddressField; 4] = [Self::FlatNo, Self::Street, Self::Area, Self::Landmark];

    /// Placeholder shown in the empty input.
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::FlatNo => "Flat No / Door No",
            Self::Street => "Street",
            Self::Area => "Area",
            Self::Landmark => "Landmark",
        }
    }
}

impl std::fmt::Display for AddressField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::FlatNo => "flatNo",
            Self::Street => "street",
            Self::Area => "area",
            Self::Landmark => "landmark",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for AddressField {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flatNo" | "flat_no" => Ok(Self::FlatNo),
            "street" => Ok(Self::Street),
            "area" => Ok(Self::Area),
            "landmark" => Ok(Self::Landmark),
            other => Err(LocationError::UnknownField {
                name: other.to_string(),
            }),
        }
    }
}

/// In-progress address text. Every field is optional and defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressDraft {
    pub flat_no: String,
    pub street: String,
    pub area: String,
    pub landmark: String,
}

impl AddressDraft {
    pub fn get(&self, field: AddressField) -> &str {
        match field {
            AddressField::FlatNo => &self.flat_no,
            AddressField::Street => &self.street,
            AddressField::Area => &self.area,
            AddressField::Landmark => &self.landmark,
        }
    }

    /// Replace one field, leaving the others untouched.
    pub fn set(&mut self, field: AddressField, value: impl Into<String>) {
        let slot = match field {
            AddressField::FlatNo => &mut self.flat_no,
            AddressField::Street => &mut self.street,
            AddressField::Area => &mut self.area,
            AddressField::Landmark => &mut self.landmark,
        };
        *slot = value.into();
    }

    pub fn is_empty(&self) -> bool {
        AddressField::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    /// Single-line rendering of the non-empty fields.
    pub fn summary(&self) -> String {
        AddressField::ALL
            .iter()
            .map(|f| self.get(*f).trim())
            .filter(|v| !v.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
