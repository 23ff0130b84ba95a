use crate::constants::Message;
use crate::contact::ContactForm;
use crate::external_api::site_api::models::contact::ContactRequest;
use crate::external_api::site_api::SiteApi;
use crate::external_api::ApiError;
use crate::utils::contact_quote_link;

pub async fn send_contact(api: &SiteApi, request: ContactRequest) -> Result<String, ApiError> {
    let mut form = ContactForm::new();
    form.set_field("name", request.name)?;
    form.set_field("email", request.email)?;
    form.set_field("phone", request.phone)?;
    form.set_field("service", request.service)?;
    form.set_field("message", request.message)?;
    form.submit(api).await?;
    Ok(Message::ContactSent.to_formatted_string())
}

/// Same message as a WhatsApp link instead of a form submission
pub fn whatsapp_contact(request: &ContactRequest) -> String {
    contact_quote_link(request)
}
