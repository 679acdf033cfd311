//! View model for the create/edit form.
//!
//! The form is entered with an optional record: `Some` edits that record,
//! `None` creates a new one. Submission is split into `begin_submit` and
//! `complete_submit` like the listing's network steps, with `submit` as the
//! blocking driver.

use crate::alert::{Alert, Prompter, Route};
use crate::client::VehicleClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::types::{Vehicle, VehicleInput};

/// One editable field of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Placa,
    Marca,
    Modelo,
    Ano,
    Cor,
}

/// Result of applying a submit round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved {
        vehicle: Vehicle,
        alert: Alert,
        route: Route,
    },
    Failed {
        alert: Alert,
    },
}

impl SubmitOutcome {
    pub fn alert(&self) -> Alert {
        match self {
            SubmitOutcome::Saved { alert, .. } | SubmitOutcome::Failed { alert } => *alert,
        }
    }

    pub fn route(&self) -> Option<&Route> {
        match self {
            SubmitOutcome::Saved { route, .. } => Some(route),
            SubmitOutcome::Failed { .. } => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormView {
    client: VehicleClient,
    input: VehicleInput,
    editing: Option<Vehicle>,
}

impl FormView {
    pub fn new(client: VehicleClient) -> Self {
        Self {
            client,
            input: VehicleInput::default(),
            editing: None,
        }
    }

    /// Re-derive the whole form from the record handed over by navigation.
    pub fn enter(&mut self, record: Option<Vehicle>) {
        self.input = record.as_ref().map(Vehicle::to_input).unwrap_or_default();
        self.editing = record;
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// The record being edited, if any.
    pub fn record(&self) -> Option<&Vehicle> {
        self.editing.as_ref()
    }

    pub fn input(&self) -> &VehicleInput {
        &self.input
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Placa => &self.input.placa,
            FormField::Marca => &self.input.marca,
            FormField::Modelo => &self.input.modelo,
            FormField::Ano => &self.input.ano,
            FormField::Cor => &self.input.cor,
        }
    }

    /// Replace a field's text. The year only keeps digits, like a numeric
    /// keypad would.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Placa => self.input.placa = value,
            FormField::Marca => self.input.marca = value,
            FormField::Modelo => self.input.modelo = value,
            FormField::Ano => self.input.ano = value.chars().filter(char::is_ascii_digit).collect(),
            FormField::Cor => self.input.cor = value,
        }
    }

    pub fn heading(&self) -> &'static str {
        if self.is_editing() {
            "Editar Veículo"
        } else {
            "Novo Veículo"
        }
    }

    pub fn subheading(&self) -> &'static str {
        if self.is_editing() {
            "Atualize os dados abaixo"
        } else {
            "Preencha os dados do novo carro"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            "Salvar Alterações"
        } else {
            "Cadastrar Veículo"
        }
    }

    /// Validate and build the save request: PUT to the edited record's id,
    /// or POST to the collection when creating.
    pub fn begin_submit(&self) -> Result<HttpRequest, Alert> {
        if !self.input.has_required_fields() {
            return Err(Alert::MissingRequiredFields);
        }
        let request = match &self.editing {
            Some(record) => self.client.build_update_vehicle(&record.id, &self.input),
            None => self.client.build_create_vehicle(&self.input),
        };
        request.map_err(|e| {
            tracing::warn!(error = %e, "failed to encode vehicle");
            Alert::SaveFailed
        })
    }

    /// Apply the save outcome. Field values are left untouched either way.
    pub fn complete_submit(&self, outcome: Result<HttpResponse, ApiError>) -> SubmitOutcome {
        let saved = outcome.and_then(|response| match self.editing {
            Some(_) => self.client.parse_update_vehicle(response),
            None => self.client.parse_create_vehicle(response),
        });
        match saved {
            Ok(vehicle) => {
                tracing::debug!(id = %vehicle.id, editing = self.is_editing(), "vehicle saved");
                SubmitOutcome::Saved {
                    vehicle,
                    alert: if self.is_editing() {
                        Alert::Updated
                    } else {
                        Alert::Created
                    },
                    route: Route::Listing,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to save vehicle");
                SubmitOutcome::Failed {
                    alert: Alert::SaveFailed,
                }
            }
        }
    }

    /// Full save flow. Returns the route to navigate to on success.
    pub fn submit(&self, transport: &impl Transport, prompter: &impl Prompter) -> Option<Route> {
        let request = match self.begin_submit() {
            Ok(request) => request,
            Err(alert) => {
                prompter.alert(alert);
                return None;
            }
        };
        let outcome = self.complete_submit(transport.execute(request));
        prompter.alert(outcome.alert());
        outcome.route().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use crate::testing::{vehicle, RecordingPrompter, ScriptedTransport, BASE_URL};
    use crate::types::VehicleId;

    fn form() -> FormView {
        FormView::new(VehicleClient::new(BASE_URL))
    }

    fn fill(form: &mut FormView) {
        form.set(FormField::Placa, "ABC-1234");
        form.set(FormField::Marca, "Fiat");
        form.set(FormField::Modelo, "Uno");
        form.set(FormField::Ano, "2024");
        form.set(FormField::Cor, "Prata");
    }

    const CREATED: &str =
        r#"{"id":5,"placa":"ABC-1234","marca":"Fiat","modelo":"Uno","ano":"2024","cor":"Prata"}"#;

    #[test]
    fn entering_without_record_is_create_mode() {
        let form = form();
        assert!(!form.is_editing());
        assert_eq!(form.input(), &VehicleInput::default());
        assert_eq!(form.heading(), "Novo Veículo");
        assert_eq!(form.submit_label(), "Cadastrar Veículo");
    }

    #[test]
    fn entering_with_record_prepopulates_every_field() {
        let mut form = form();
        let record = vehicle(8, "XYZ-9876", "Volkswagen", "Gol");
        form.enter(Some(record.clone()));

        assert!(form.is_editing());
        assert_eq!(form.get(FormField::Placa), "XYZ-9876");
        assert_eq!(form.get(FormField::Marca), "Volkswagen");
        assert_eq!(form.get(FormField::Modelo), "Gol");
        assert_eq!(form.get(FormField::Ano), "2020");
        assert_eq!(form.get(FormField::Cor), "Branco");
        assert_eq!(form.record(), Some(&record));
        assert_eq!(form.heading(), "Editar Veículo");
        assert_eq!(form.subheading(), "Atualize os dados abaixo");
    }

    #[test]
    fn re_entering_rederives_state() {
        let mut form = form();
        form.enter(Some(vehicle(8, "XYZ-9876", "Volkswagen", "Gol")));
        form.set(FormField::Cor, "Azul");

        form.enter(Some(vehicle(9, "QWE-5555", "Chevrolet", "Onix")));
        assert_eq!(form.get(FormField::Placa), "QWE-5555");
        assert_eq!(form.get(FormField::Cor), "Branco");

        form.enter(None);
        assert!(!form.is_editing());
        assert_eq!(form.input(), &VehicleInput::default());
    }

    #[test]
    fn year_keeps_only_digits() {
        let mut form = form();
        form.set(FormField::Ano, "20a2-4");
        assert_eq!(form.get(FormField::Ano), "2024");
    }

    #[test]
    fn missing_required_field_blocks_submit() {
        for missing in [FormField::Placa, FormField::Marca, FormField::Modelo] {
            let mut form = form();
            fill(&mut form);
            form.set(missing, "");

            let transport = ScriptedTransport::default();
            let prompter = RecordingPrompter::answering(true);
            assert_eq!(form.submit(&transport, &prompter), None);
            assert!(transport.sent().is_empty(), "{missing:?}");
            assert_eq!(prompter.shown(), vec![Alert::MissingRequiredFields]);
        }
    }

    #[test]
    fn optional_fields_may_be_blank() {
        let mut form = form();
        fill(&mut form);
        form.set(FormField::Ano, "");
        form.set(FormField::Cor, "");
        assert!(form.begin_submit().is_ok());
    }

    #[test]
    fn create_posts_once_and_routes_to_listing() {
        let mut form = form();
        fill(&mut form);
        let transport = ScriptedTransport::default().reply(201, CREATED);
        let prompter = RecordingPrompter::answering(true);

        assert_eq!(form.submit(&transport, &prompter), Some(Route::Listing));

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, HttpMethod::Post);
        assert_eq!(sent[0].path, format!("{BASE_URL}/veiculos"));
        let body: VehicleInput = serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(&body, form.input());
        assert_eq!(prompter.shown(), vec![Alert::Created]);
    }

    #[test]
    fn edit_puts_once_to_record_id_with_current_values() {
        let mut form = form();
        form.enter(Some(vehicle(8, "XYZ-9876", "Volkswagen", "Gol")));
        form.set(FormField::Cor, "Preto");
        let updated = r#"{"id":8,"placa":"XYZ-9876","marca":"Volkswagen","modelo":"Gol","ano":"2020","cor":"Preto"}"#;
        let transport = ScriptedTransport::default().reply(200, updated);
        let prompter = RecordingPrompter::answering(true);

        assert_eq!(form.submit(&transport, &prompter), Some(Route::Listing));

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, HttpMethod::Put);
        assert_eq!(sent[0].path, format!("{BASE_URL}/veiculos/8"));
        let body: serde_json::Value = serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["cor"], "Preto");
        assert_eq!(body["placa"], "XYZ-9876");
        assert_eq!(prompter.shown(), vec![Alert::Updated]);
    }

    #[test]
    fn failed_save_stays_on_form_with_values() {
        let mut form = form();
        fill(&mut form);
        let before = form.input().clone();
        let transport = ScriptedTransport::default().fail("connection reset");
        let prompter = RecordingPrompter::answering(true);

        assert_eq!(form.submit(&transport, &prompter), None);
        assert_eq!(form.input(), &before);
        assert_eq!(prompter.shown(), vec![Alert::SaveFailed]);
    }

    #[test]
    fn complete_submit_reports_saved_vehicle() {
        let mut form = form();
        fill(&mut form);
        let outcome = form.complete_submit(Ok(HttpResponse {
            status: 201,
            headers: Vec::new(),
            body: CREATED.to_string(),
        }));
        match outcome {
            SubmitOutcome::Saved { vehicle, alert, route } => {
                assert_eq!(vehicle.id, VehicleId::Number(5));
                assert_eq!(alert, Alert::Created);
                assert_eq!(route, Route::Listing);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn rejected_update_is_save_failure() {
        let mut form = form();
        form.enter(Some(vehicle(8, "XYZ-9876", "Volkswagen", "Gol")));
        let outcome = form.complete_submit(Ok(HttpResponse {
            status: 404,
            headers: Vec::new(),
            body: String::new(),
        }));
        assert_eq!(outcome, SubmitOutcome::Failed { alert: Alert::SaveFailed });
        assert_eq!(outcome.route(), None);
    }
}
