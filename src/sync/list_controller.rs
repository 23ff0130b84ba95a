use std::marker::PhantomData;

use tracing::{info, warn};

use super::fetch_state::{FetchState, FetchTracker, LoadTicket};
use super::form_edit::FormEditState;
use super::Confirmation;
use crate::external_api::site_api::models::record_id::RecordId;
use crate::external_api::ApiError;
use crate::store::{Editable, ResourceStore};

/// Cached list of one resource plus its edit form.
///
/// Mutations are applied locally, confirmed remotely and reconciled by a full
/// refetch whenever the outcome is uncertain. The store is the source of truth.
pub struct ListController<R: Editable, S: ResourceStore<R>> {
    store: S,
    fetch: FetchTracker<Vec<R>>,
    form: FormEditState<R::Draft>,
    submitting: bool,
    _resource: PhantomData<R>,
}

impl<R: Editable, S: ResourceStore<R>> ListController<R, S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            fetch: FetchTracker::new(),
            form: FormEditState::Closed,
            submitting: false,
            _resource: PhantomData,
        }
    }

    pub fn fetch_state(&self) -> &FetchState<Vec<R>> {
        self.fetch.state()
    }

    pub fn form(&self) -> &FormEditState<R::Draft> {
        &self.form
    }

    /// Cached records, empty unless the last load succeeded
    pub fn records(&self) -> &[R] {
        self.fetch.data().map(Vec::as_slice).unwrap_or_default()
    }

    /// Controls stay disabled while a load or a save is in flight
    pub fn is_busy(&self) -> bool {
        self.submitting || self.fetch.is_loading()
    }

    /// First load of the view
    pub async fn mount(&mut self) -> Result<&[R], ApiError> {
        let ticket = self.fetch.mount()?;
        self.load(ticket).await
    }

    /// Manual retry after an error, or reload of a ready list
    pub async fn reload(&mut self) -> Result<&[R], ApiError> {
        let ticket = self.fetch.retry()?;
        self.load(ticket).await
    }

    pub fn unmount(&mut self) {
        self.fetch.cancel();
        self.form.cancel();
    }

    pub fn open_create(&mut self) {
        self.form.open_create();
    }

    pub fn open_edit(&mut self, id: &RecordId) -> Result<(), ApiError> {
        let record = self
            .records()
            .iter()
            .find(|record| record.id() == Some(id))
            .cloned()
            .ok_or_else(|| ApiError::NotFound(id.to_string()))?;
        self.form.open_edit(id.clone(), &record);
        Ok(())
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), ApiError> {
        Ok(self.form.set_field(name, value)?)
    }

    pub fn cancel_edit(&mut self) {
        self.form.cancel();
    }

    /// Upserts the open draft.
    ///
    /// On success the form closes and the list is refetched, on failure the
    /// form stays open with its draft. Returns the id the store assigned.
    pub async fn submit(&mut self) -> Result<Option<RecordId>, ApiError> {
        if self.is_busy() {
            return Err(ApiError::Busy);
        }
        let record = self.form.submission()?;

        self.submitting = true;
        let result = self.store.upsert(&record).await;
        self.submitting = false;

        let id = result?;
        info!(resource = R::NAME, id = ?id, "record saved");
        self.form.cancel();
        self.refresh().await;
        Ok(id)
    }

    /// Removes the record from the cache first, then asks the store.
    ///
    /// When the store refuses, the cache is thrown away and refetched.
    pub async fn delete(&mut self, id: &RecordId, _confirmation: Confirmation) -> Result<(), ApiError> {
        if self.is_busy() {
            return Err(ApiError::Busy);
        }
        if let Some(records) = self.fetch.data_mut() {
            records.retain(|record| record.id() != Some(id));
        }

        self.submitting = true;
        let result = self.store.delete(id).await;
        self.submitting = false;

        if let Err(error) = result {
            warn!(resource = R::NAME, %id, %error, "delete failed, resynchronizing");
            self.refresh().await;
            return Err(error);
        }
        info!(resource = R::NAME, %id, "record deleted");
        Ok(())
    }

    async fn load(&mut self, ticket: LoadTicket) -> Result<&[R], ApiError> {
        match self.store.list().await {
            Ok(records) => {
                self.fetch.succeed(ticket, records)?;
                Ok(self.records())
            }
            Err(error) => {
                self.fetch.fail(ticket, error.message())?;
                Err(error)
            }
        }
    }

    /// Reload from wherever the view currently is. Failures stay visible in the
    /// fetch state with a retry affordance.
    async fn refresh(&mut self) {
        let ticket = match self.fetch.state() {
            FetchState::Idle => self.fetch.mount(),
            FetchState::Loading => return,
            FetchState::Ready(_) | FetchState::Errored(_) => self.fetch.retry(),
        };
        let Ok(ticket) = ticket else { return };
        if let Err(error) = self.load(ticket).await {
            warn!(resource = R::NAME, %error, "refetch failed");
        }
    }
}
