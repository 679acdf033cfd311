//! View model for the vehicle listing screen.
//!
//! # Design
//! The listing owns a snapshot of the collection. It is replaced wholesale on
//! every focus transition and otherwise only shrinks after the backend
//! confirms a delete. Each network step is split into `begin_*` (returns the
//! request to execute) and `complete_*` (consumes the outcome) so a host with
//! its own async runtime can drive it. `refresh` and `delete` run the same
//! steps through a blocking [`Transport`].

use crate::alert::{Alert, ConfirmPrompt, EmptyState, Prompter, Route};
use crate::client::VehicleClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::types::{Vehicle, VehicleId};

#[derive(Debug, Clone)]
pub struct ListingView {
    client: VehicleClient,
    items: Vec<Vehicle>,
    loading: bool,
    search_term: String,
}

impl ListingView {
    /// A fresh listing starts in the loading state; the first focus
    /// transition fetches the collection.
    pub fn new(client: VehicleClient) -> Self {
        Self {
            client,
            items: Vec::new(),
            loading: true,
            search_term: String::new(),
        }
    }

    pub fn items(&self) -> &[Vehicle] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Items matching the current search term, in collection order.
    pub fn visible(&self) -> Vec<&Vehicle> {
        self.items
            .iter()
            .filter(|v| v.matches(&self.search_term))
            .collect()
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        if self.loading || self.items.iter().any(|v| v.matches(&self.search_term)) {
            return None;
        }
        if self.search_term.is_empty() {
            Some(EmptyState::NoVehicles)
        } else {
            Some(EmptyState::NoMatches)
        }
    }

    /// Focus transition: mark the view as loading and hand back the fetch.
    pub fn begin_load(&mut self) -> HttpRequest {
        self.loading = true;
        self.client.build_list_vehicles()
    }

    /// Apply the fetch outcome. On failure the previous snapshot stays.
    pub fn complete_load(&mut self, outcome: Result<HttpResponse, ApiError>) -> Option<Alert> {
        self.loading = false;
        match outcome.and_then(|response| self.client.parse_list_vehicles(response)) {
            Ok(vehicles) => {
                tracing::debug!(count = vehicles.len(), "vehicle listing refreshed");
                self.items = vehicles;
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load vehicles");
                Some(Alert::LoadFailed)
            }
        }
    }

    pub fn refresh(&mut self, transport: &impl Transport, prompter: &impl Prompter) {
        let request = self.begin_load();
        if let Some(alert) = self.complete_load(transport.execute(request)) {
            prompter.alert(alert);
        }
    }

    /// Route to the edit form for `id`, if it is in the snapshot.
    pub fn open(&self, id: &VehicleId) -> Option<Route> {
        self.items
            .iter()
            .find(|v| &v.id == id)
            .map(|v| Route::Form(Some(v.clone())))
    }

    /// Route to the form in create mode.
    pub fn add(&self) -> Route {
        Route::Form(None)
    }

    /// First half of a delete: the prompt the user must confirm.
    pub fn request_delete(&self, id: VehicleId) -> ConfirmPrompt {
        ConfirmPrompt::delete(id)
    }

    /// Second half of a delete, only after the prompt was confirmed.
    pub fn confirm_delete(&self, prompt: &ConfirmPrompt) -> HttpRequest {
        self.client.build_delete_vehicle(&prompt.target)
    }

    /// Drop `id` from the snapshot once the backend acknowledged the delete.
    pub fn complete_delete(
        &mut self,
        id: &VehicleId,
        outcome: Result<HttpResponse, ApiError>,
    ) -> Option<Alert> {
        match outcome.and_then(|response| self.client.parse_delete_vehicle(response)) {
            Ok(()) => {
                self.items.retain(|v| &v.id != id);
                None
            }
            Err(e) => {
                tracing::warn!(%id, error = %e, "failed to delete vehicle");
                Some(Alert::DeleteFailed)
            }
        }
    }

    /// Full delete flow. Returns whether the vehicle was removed.
    pub fn delete(
        &mut self,
        id: VehicleId,
        transport: &impl Transport,
        prompter: &impl Prompter,
    ) -> bool {
        let prompt = self.request_delete(id);
        if !prompter.confirm(&prompt) {
            return false;
        }
        let request = self.confirm_delete(&prompt);
        match self.complete_delete(&prompt.target, transport.execute(request)) {
            Some(alert) => {
                prompter.alert(alert);
                false
            }
            None => true,
        }
    }
}
