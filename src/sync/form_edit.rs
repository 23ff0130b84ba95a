use std::fmt::Debug;

use thiserror::Error;
use tracing::debug;

use crate::external_api::site_api::models::record_id::RecordId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("No form is open")]
    Closed,
    #[error("Unknown field: {0}")]
    UnknownField(String),
    #[error("Required fields are empty: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("Record has no identifier and cannot be edited")]
    MissingId,
}

/// Unsaved field values of a create/edit form.
pub trait Draft: Default + Clone + Debug {
    type Record;

    /// Fields that block submission while blank
    const REQUIRED: &'static [&'static str];

    fn from_record(record: &Self::Record) -> Self;

    fn field(&self, name: &str) -> Option<&str>;

    fn set_field(&mut self, name: &str, value: String) -> Result<(), FormError>;

    fn into_record(self, id: Option<RecordId>) -> Self::Record;

    fn missing_fields(&self) -> Vec<&'static str> {
        Self::REQUIRED
            .iter()
            .copied()
            .filter(|name| self.field(name).map_or(true, |value| value.trim().is_empty()))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum FormEditState<D> {
    #[default]
    Closed,
    CreatingNew(D),
    Editing(RecordId, D),
}

impl<D: Draft> FormEditState<D> {
    pub fn open_create(&mut self) {
        debug!("form: creating new record");
        *self = FormEditState::CreatingNew(D::default());
    }

    pub fn open_edit(&mut self, id: RecordId, record: &D::Record) {
        debug!(%id, "form: editing record");
        *self = FormEditState::Editing(id, D::from_record(record));
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, FormEditState::Closed)
    }

    pub fn draft(&self) -> Option<&D> {
        match self {
            FormEditState::Closed => None,
            FormEditState::CreatingNew(draft) | FormEditState::Editing(_, draft) => Some(draft),
        }
    }

    pub fn target_id(&self) -> Option<&RecordId> {
        match self {
            FormEditState::Editing(id, _) => Some(id),
            _ => None,
        }
    }

    /// Last write wins, there is no conflict detection
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        match self {
            FormEditState::Closed => Err(FormError::Closed),
            FormEditState::CreatingNew(draft) | FormEditState::Editing(_, draft) => {
                draft.set_field(name, value.into())
            }
        }
    }

    /// Record to hand to the store, carrying the target id when editing.
    pub fn submission(&self) -> Result<D::Record, FormError> {
        let draft = self.draft().ok_or(FormError::Closed)?;
        let missing = draft.missing_fields();
        if !missing.is_empty() {
            return Err(FormError::MissingFields(missing));
        }
        Ok(draft.clone().into_record(self.target_id().cloned()))
    }

    /// Drops the draft
    pub fn cancel(&mut self) {
        *self = FormEditState::Closed;
    }
}
