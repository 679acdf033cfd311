//! In-memory `/veiculos` backend for local runs and integration tests.
//!
//! Behaves like a json-server collection: list keeps insertion order, POST
//! assigns a fresh id, PUT overwrites every field, DELETE answers 204.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub placa: String,
    pub marca: String,
    pub modelo: String,
    pub ano: serde_json::Value,
    pub cor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VehicleInput {
    pub placa: String,
    pub marca: String,
    pub modelo: String,
    #[serde(default)]
    pub ano: serde_json::Value,
    #[serde(default)]
    pub cor: Option<String>,
}

impl VehicleInput {
    fn into_vehicle(self, id: String) -> Vehicle {
        Vehicle {
            id,
            placa: self.placa,
            marca: self.marca,
            modelo: self.modelo,
            ano: self.ano,
            cor: self.cor,
        }
    }
}

pub type Db = Arc<RwLock<Vec<Vehicle>>>;

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router pre-loaded with `seed`, in order.
pub fn app_with(seed: Vec<Vehicle>) -> Router {
    let db: Db = Arc::new(RwLock::new(seed));
    Router::new()
        .route("/veiculos", get(list_vehicles).post(create_vehicle))
        .route("/veiculos/{id}", put(update_vehicle).delete(delete_vehicle))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_vehicles(State(db): State<Db>) -> Json<Vec<Vehicle>> {
    Json(db.read().await.clone())
}

async fn create_vehicle(
    State(db): State<Db>,
    Json(input): Json<VehicleInput>,
) -> (StatusCode, Json<Vehicle>) {
    let vehicle = input.into_vehicle(Uuid::new_v4().simple().to_string());
    tracing::info!(id = %vehicle.id, placa = %vehicle.placa, "vehicle created");
    db.write().await.push(vehicle.clone());
    (StatusCode::CREATED, Json(vehicle))
}

async fn update_vehicle(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<VehicleInput>,
) -> Result<Json<Vehicle>, StatusCode> {
    let mut vehicles = db.write().await;
    let slot = vehicles
        .iter_mut()
        .find(|v| v.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    *slot = input.into_vehicle(id);
    tracing::info!(id = %slot.id, "vehicle updated");
    Ok(Json(slot.clone()))
}

async fn delete_vehicle(State(db): State<Db>, Path(id): Path<String>) -> StatusCode {
    let mut vehicles = db.write().await;
    let before = vehicles.len();
    vehicles.retain(|v| v.id != id);
    if vehicles.len() == before {
        return StatusCode::NOT_FOUND;
    }
    tracing::info!(%id, "vehicle deleted");
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vehicle_serializes_to_json() {
        let vehicle = Vehicle {
            id: "1".to_string(),
            placa: "ABC-1234".to_string(),
            marca: "Fiat".to_string(),
            modelo: "Uno".to_string(),
            ano: serde_json::json!("2024"),
            cor: None,
        };
        let json = serde_json::to_value(&vehicle).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["placa"], "ABC-1234");
        assert_eq!(json["ano"], "2024");
        assert!(json["cor"].is_null());
    }

    #[test]
    fn input_optionals_default_to_null() {
        let input: VehicleInput =
            serde_json::from_str(r#"{"placa":"A","marca":"B","modelo":"C"}"#).unwrap();
        assert!(input.ano.is_null());
        assert!(input.cor.is_none());
    }

    #[test]
    fn input_keeps_numeric_year() {
        let input: VehicleInput =
            serde_json::from_str(r#"{"placa":"A","marca":"B","modelo":"C","ano":2019}"#).unwrap();
        assert_eq!(input.ano, 2019);
    }

    #[test]
    fn input_rejects_missing_model() {
        let result: Result<VehicleInput, _> =
            serde_json::from_str(r#"{"placa":"A","marca":"B"}"#);
        assert!(result.is_err());
    }
}
