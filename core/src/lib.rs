//! Synchronous client core for the fleet manager front-end.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values for the
//! `/veiculos` collection without touching the network (host-does-IO
//! pattern), and keeps the state of the two screens as plain view models:
//! the searchable listing and the create/edit form.
//!
//! # Design
//! - `VehicleClient` is stateless; it holds only `base_url`.
//! - Every network step is split into `build_*`/`parse_*` on the client and
//!   `begin_*`/`complete_*` on the views, so the I/O boundary is explicit.
//! - Hosts that can block implement [`Transport`] and [`Prompter`] and use
//!   the driver methods (`refresh`, `delete`, `submit`).
//! - Screens never share state. The form hands back a [`Route`] and the
//!   listing refetches on its next focus.

pub mod alert;
pub mod client;
pub mod error;
pub mod form;
pub mod http;
pub mod listing;
pub mod types;

#[cfg(test)]
mod testing;

pub use alert::{Alert, ConfirmPrompt, EmptyState, Prompter, Route};
pub use client::VehicleClient;
pub use error::ApiError;
pub use form::{FormField, FormView, SubmitOutcome};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use listing::ListingView;
pub use types::{Vehicle, VehicleId, VehicleInput};
