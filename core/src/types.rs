//! Domain DTOs for the `/veiculos` collection.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! the live integration tests catch drift between the two crates. Backends in
//! the json-server family emit ids and years either as numbers or strings, so
//! both decode here and ids re-serialize in the form they arrived in.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Backend-assigned vehicle identifier. Opaque to the client: it is only
/// compared for equality and rendered into URL paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VehicleId {
    Number(u64),
    Text(String),
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleId::Number(n) => write!(f, "{n}"),
            VehicleId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for VehicleId {
    fn from(n: u64) -> Self {
        VehicleId::Number(n)
    }
}

impl From<&str> for VehicleId {
    fn from(s: &str) -> Self {
        VehicleId::Text(s.to_string())
    }
}

impl From<String> for VehicleId {
    fn from(s: String) -> Self {
        VehicleId::Text(s)
    }
}

/// Recovers an id from its path form. Canonical decimal text becomes a
/// `Number`; anything else (including leading zeros) stays `Text` so it
/// renders back unchanged.
impl FromStr for VehicleId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<u64>() {
            Ok(n) if n.to_string() == s => VehicleId::Number(n),
            _ => VehicleId::Text(s.to_string()),
        })
    }
}

/// A single vehicle record returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vehicle {
    pub id: VehicleId,
    pub placa: String,
    pub marca: String,
    pub modelo: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub ano: Option<String>,
    #[serde(default)]
    pub cor: Option<String>,
}

impl Vehicle {
    /// Case-insensitive substring match against model, brand and plate.
    /// An empty term matches everything.
    pub fn matches(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let needle = term.to_lowercase();
        [&self.modelo, &self.marca, &self.placa]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Secondary line shown under the model on a listing card.
    pub fn details(&self) -> String {
        format!("{} • {}", self.marca, self.cor.as_deref().unwrap_or(""))
    }

    /// The record's current values as a write payload.
    pub fn to_input(&self) -> VehicleInput {
        VehicleInput {
            placa: self.placa.clone(),
            marca: self.marca.clone(),
            modelo: self.modelo.clone(),
            ano: self.ano.clone().unwrap_or_default(),
            cor: self.cor.clone().unwrap_or_default(),
        }
    }
}

/// Request payload for creating or overwriting a vehicle. Every field is sent
/// as entered; blank optional fields go out as empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VehicleInput {
    pub placa: String,
    pub marca: String,
    pub modelo: String,
    #[serde(default)]
    pub ano: String,
    #[serde(default)]
    pub cor: String,
}

impl VehicleInput {
    /// Plate, brand and model are all non-empty.
    pub fn has_required_fields(&self) -> bool {
        !self.placa.is_empty() && !self.marca.is_empty() && !self.modelo.is_empty()
    }
}

fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    }))
}
