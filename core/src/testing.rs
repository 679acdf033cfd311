//! Scripted transport and prompter shared by the view model tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use crate::alert::{Alert, ConfirmPrompt, Prompter};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::types::{Vehicle, VehicleId};

pub(crate) const BASE_URL: &str = "http://fleet.test";

/// Replays queued replies in order and records every request it sees.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    replies: RefCell<VecDeque<Result<HttpResponse, ApiError>>>,
    pub(crate) requests: RefCell<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn reply(self, status: u16, body: &str) -> Self {
        self.replies.borrow_mut().push_back(Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }));
        self
    }

    pub(crate) fn fail(self, reason: &str) -> Self {
        self.replies
            .borrow_mut()
            .push_back(Err(ApiError::Transport(reason.to_string())));
        self
    }

    pub(crate) fn sent(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }
}

impl Transport for ScriptedTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted reply".to_string())))
    }
}

/// Records alerts and answers every confirmation with a fixed choice.
pub(crate) struct RecordingPrompter {
    answer: bool,
    pub(crate) alerts: RefCell<Vec<Alert>>,
    pub(crate) prompts: Cell<usize>,
}

impl RecordingPrompter {
    pub(crate) fn answering(answer: bool) -> Self {
        Self {
            answer,
            alerts: RefCell::new(Vec::new()),
            prompts: Cell::new(0),
        }
    }

    pub(crate) fn shown(&self) -> Vec<Alert> {
        self.alerts.borrow().clone()
    }
}

impl Prompter for RecordingPrompter {
    fn alert(&self, alert: Alert) {
        self.alerts.borrow_mut().push(alert);
    }

    fn confirm(&self, _prompt: &ConfirmPrompt) -> bool {
        self.prompts.set(self.prompts.get() + 1);
        self.answer
    }
}

pub(crate) fn vehicle(id: u64, placa: &str, marca: &str, modelo: &str) -> Vehicle {
    Vehicle {
        id: VehicleId::Number(id),
        placa: placa.to_string(),
        marca: marca.to_string(),
        modelo: modelo.to_string(),
        ano: Some("2020".to_string()),
        cor: Some("Branco".to_string()),
    }
}

pub(crate) fn fleet_json(vehicles: &[Vehicle]) -> String {
    serde_json::to_string(vehicles).unwrap()
}
