use serde::{Deserialize, Serialize};

use super::record_id::RecordId;
use crate::sync::form_edit::{Draft, FormError};

/// Body of `saveContact.php`. Phone and service may be empty.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub message: String,
}

impl Draft for ContactRequest {
    type Record = ContactRequest;
    const REQUIRED: &'static [&'static str] = &["name", "email", "message"];

    fn from_record(record: &ContactRequest) -> Self {
        record.clone()
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(&self.name),
            "email" => Some(&self.email),
            "phone" => Some(&self.phone),
            "service" => Some(&self.service),
            "message" => Some(&self.message),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: String) -> Result<(), FormError> {
        match name {
            "name" => self.name = value,
            "email" => self.email = value,
            "phone" => self.phone = value,
            "service" => self.service = value,
            "message" => self.message = value,
            other => return Err(FormError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    fn into_record(self, _id: Option<RecordId>) -> ContactRequest {
        self
    }
}
