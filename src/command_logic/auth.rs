use crate::auth::{CredentialGate, SessionStore};
use crate::constants::Message;
use crate::external_api::ApiError;

pub fn login<S: SessionStore>(gate: &CredentialGate<S>, username: &str, password: &str) -> Result<String, ApiError> {
    if !gate.authenticate(username, password)? {
        return Err(ApiError::Authentication);
    }
    Ok(Message::LoggedIn(username.to_string()).to_formatted_string())
}

pub fn logout<S: SessionStore>(gate: &CredentialGate<S>) -> Result<String, ApiError> {
    gate.logout()?;
    Ok(Message::LoggedOut.to_formatted_string())
}

pub fn status<S: SessionStore>(gate: &CredentialGate<S>) -> Result<String, ApiError> {
    Ok(match gate.session()? {
        Some(session) => {
            let since = session.issued_at.format("%d/%m/%Y %H:%M UTC").to_string();
            Message::SessionActive(since).to_formatted_string()
        }
        None => Message::NoSession.to_formatted_string(),
    })
}
