//! Stateless HTTP request builder and response parser for `/veiculos`.
//!
//! # Design
//! `VehicleClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. The blocking `list`/`create`/`update`/
//! `delete` helpers glue the two halves together through a [`Transport`].

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::types::{Vehicle, VehicleId, VehicleInput};

/// Environment variable read by [`VehicleClient::from_env`].
pub const BASE_URL_ENV: &str = "FLEET_API_URL";

/// Base URL used when [`BASE_URL_ENV`] is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

const COLLECTION: &str = "veiculos";

/// Synchronous, stateless client for the vehicle collection.
#[derive(Debug, Clone)]
pub struct VehicleClient {
    base_url: String,
}

impl VehicleClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build a client from `FLEET_API_URL`, falling back to
    /// `http://localhost:3000`.
    pub fn from_env() -> Self {
        let url = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(&url)
    }

    pub fn build_list_vehicles(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection_url(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_vehicle(&self, input: &VehicleInput) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.collection_url(),
            headers: json_headers(),
            body: Some(encode(input)?),
        })
    }

    pub fn build_update_vehicle(
        &self,
        id: &VehicleId,
        input: &VehicleInput,
    ) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.member_url(id),
            headers: json_headers(),
            body: Some(encode(input)?),
        })
    }

    pub fn build_delete_vehicle(&self, id: &VehicleId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.member_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_vehicles(&self, response: HttpResponse) -> Result<Vec<Vehicle>, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_create_vehicle(&self, response: HttpResponse) -> Result<Vehicle, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_update_vehicle(&self, response: HttpResponse) -> Result<Vehicle, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    /// Succeeds on any 2xx; whatever body the backend sends is ignored.
    pub fn parse_delete_vehicle(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn list(&self, transport: &impl Transport) -> Result<Vec<Vehicle>, ApiError> {
        let response = transport.execute(self.build_list_vehicles())?;
        self.parse_list_vehicles(response)
    }

    pub fn create(
        &self,
        transport: &impl Transport,
        input: &VehicleInput,
    ) -> Result<Vehicle, ApiError> {
        let response = transport.execute(self.build_create_vehicle(input)?)?;
        self.parse_create_vehicle(response)
    }

    pub fn update(
        &self,
        transport: &impl Transport,
        id: &VehicleId,
        input: &VehicleInput,
    ) -> Result<Vehicle, ApiError> {
        let response = transport.execute(self.build_update_vehicle(id, input)?)?;
        self.parse_update_vehicle(response)
    }

    pub fn delete(&self, transport: &impl Transport, id: &VehicleId) -> Result<(), ApiError> {
        let response = transport.execute(self.build_delete_vehicle(id))?;
        self.parse_delete_vehicle(response)
    }

    fn collection_url(&self) -> String {
        format!("{}/{COLLECTION}", self.base_url)
    }

    fn member_url(&self, id: &VehicleId) -> String {
        format!("{}/{COLLECTION}/{id}", self.base_url)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn encode(input: &VehicleInput) -> Result<String, ApiError> {
    serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| {
        tracing::debug!(error = %e, "undecodable vehicle payload");
        ApiError::DeserializationError(e.to_string())
    })
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    match response.status {
        200..=299 => Ok(()),
        404 => Err(ApiError::NotFound),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}
