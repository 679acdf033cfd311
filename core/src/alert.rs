//! User-facing messages, confirmation prompts and navigation targets.
//!
//! The view models never render anything themselves. They hand these values
//! back to the host, which shows them with the platform's widgets.

use crate::types::{Vehicle, VehicleId};

/// A modal message the host shows to the user.
///
/// Failures only name the operation category that failed; the cause is
/// logged, not shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert {
    LoadFailed,
    SaveFailed,
    DeleteFailed,
    MissingRequiredFields,
    Created,
    Updated,
}

impl Alert {
    pub fn title(self) -> &'static str {
        match self {
            Alert::LoadFailed | Alert::SaveFailed | Alert::DeleteFailed => "Erro",
            Alert::MissingRequiredFields => "Atenção",
            Alert::Created | Alert::Updated => "Sucesso",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Alert::LoadFailed => "Falha ao carregar os dados.",
            Alert::SaveFailed => "Não foi possível salvar.",
            Alert::DeleteFailed => "Não foi possível excluir.",
            Alert::MissingRequiredFields => "Preencha pelo menos Placa, Marca e Modelo.",
            Alert::Created => "Veículo cadastrado!",
            Alert::Updated => "Veículo atualizado!",
        }
    }
}

/// A two-action confirmation the host must resolve before a destructive
/// request is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub target: VehicleId,
    pub title: &'static str,
    pub message: &'static str,
    pub confirm_label: &'static str,
    pub cancel_label: &'static str,
}

impl ConfirmPrompt {
    pub(crate) fn delete(target: VehicleId) -> Self {
        Self {
            target,
            title: "Remover Veículo",
            message: "Essa ação não pode ser desfeita.",
            confirm_label: "Confirmar",
            cancel_label: "Cancelar",
        }
    }
}

/// Where the host should navigate next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Listing,
    /// The form screen; `Some` carries the record to edit, `None` means create.
    Form(Option<Vehicle>),
}

/// What the listing shows when it has nothing to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// The search term filtered everything out.
    NoMatches,
    /// The collection itself is empty.
    NoVehicles,
}

impl EmptyState {
    pub fn title(self) -> &'static str {
        match self {
            EmptyState::NoMatches => "Nenhum resultado para a busca.",
            EmptyState::NoVehicles => "Nenhum veículo encontrado.",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            EmptyState::NoMatches => "Tente outra placa, marca ou modelo.",
            EmptyState::NoVehicles => "Cadastre seu primeiro carro!",
        }
    }
}

/// UI capability the blocking drivers call into.
pub trait Prompter {
    fn alert(&self, alert: Alert);

    /// Show the prompt and block until the user picks an action. `true`
    /// means the destructive action was confirmed.
    fn confirm(&self, prompt: &ConfirmPrompt) -> bool;
}
