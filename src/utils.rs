use crate::constants::WHATSAPP_PHONE;
use crate::external_api::site_api::models::contact::ContactRequest;

/// Price as MXN currency text, e.g. `$3,100.00`
pub fn format_mxn(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

fn whatsapp_link(message: &str) -> String {
    format!("https://wa.me/{}?text={}", WHATSAPP_PHONE, urlencoding::encode(message))
}

/// WhatsApp link asking for a quote on one plan
pub fn quote_request_link(plan_label: &str) -> String {
    whatsapp_link(&format!(
        "¡Hola! Estoy interesado/a en cotizar el plan \"{plan_label}\". ¿Podrían darme más información?"
    ))
}

/// WhatsApp alternative to sending the contact form
pub fn contact_quote_link(request: &ContactRequest) -> String {
    let service = non_empty_or(&request.service, "General");
    let name = non_empty_or(&request.name, "No especificado");
    let mut message = format!("¡Hola! Me gustaría cotizar el servicio: {service}. Mi nombre es {name}.");
    if !request.message.trim().is_empty() {
        message.push_str(&format!(" Detalles: {}", request.message.trim()));
    }
    whatsapp_link(&message)
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    match value.trim() {
        "" => fallback,
        trimmed => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(3100.0, "$3,100.00")]
    #[case(13000.0, "$13,000.00")]
    #[case(0.0, "$0.00")]
    #[case(999.5, "$999.50")]
    #[case(1234567.891, "$1,234,567.89")]
    #[case(100.0, "$100.00")]
    #[case(-2500.0, "-$2,500.00")]
    fn test_format_mxn(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_mxn(value), expected);
    }

    #[test]
    fn test_quote_request_link() {
        let link = quote_request_link("Landing Page Básica");
        assert!(link.starts_with("https://wa.me/5215539500411?text="));
        assert!(link.contains("Landing%20Page%20B%C3%A1sica"));
        assert!(!link.contains(' '));
    }

    #[test]
    fn test_contact_quote_link_fallbacks() {
        let link = contact_quote_link(&ContactRequest::default());
        let text = link.split_once("?text=").map(|(_, text)| text).unwrap();
        let decoded = urlencoding::decode(text).unwrap();
        assert_eq!(
            decoded,
            "¡Hola! Me gustaría cotizar el servicio: General. Mi nombre es No especificado."
        );
    }

    #[test]
    fn test_contact_quote_link_with_details() {
        let request = ContactRequest {
            name: "Ana".to_string(),
            service: "Otro".to_string(),
            message: "hola".to_string(),
            ..ContactRequest::default()
        };
        let link = contact_quote_link(&request);
        let text = link.split_once("?text=").map(|(_, text)| text).unwrap();
        assert_eq!(
            urlencoding::decode(text).unwrap(),
            "¡Hola! Me gustaría cotizar el servicio: Otro. Mi nombre es Ana. Detalles: hola"
        );
    }
}
