use tracing::info;

use crate::external_api::site_api::models::contact::ContactRequest;
use crate::external_api::site_api::SiteApi;
use crate::external_api::ApiError;
use crate::sync::form_edit::{Draft, FormError};

/// Public contact form. The draft survives a failed send and is cleared after a
/// successful one.
#[derive(Debug, Default)]
pub struct ContactForm {
    draft: ContactRequest,
    sending: bool,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &ContactRequest {
        &self.draft
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), ApiError> {
        Ok(self.draft.set_field(name, value.into())?)
    }

    pub async fn submit(&mut self, api: &SiteApi) -> Result<(), ApiError> {
        if self.sending {
            return Err(ApiError::Busy);
        }
        let missing = self.draft.missing_fields();
        if !missing.is_empty() {
            return Err(FormError::MissingFields(missing).into());
        }

        self.sending = true;
        let result = api.save_contact(&self.draft).await;
        self.sending = false;

        result?;
        info!(service = %self.draft.service, "contact message sent");
        self.draft = ContactRequest::default();
        Ok(())
    }
}
