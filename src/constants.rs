pub const CONFIG_DIR: &str = ".config/webfolio";
pub const CONFIG_FILE: &str = "config.json";
pub const SESSION_FILE: &str = "session.json";
pub const LOCAL_STORAGE_DIR: &str = "storage";

pub const API_URL_ENV: &str = "WEBFOLIO_API_URL";
pub const DEFAULT_API_URL: &str = "https://donydonitasss.com/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const GET_PROJECTS_ENDPOINT: &str = "/getProjects.php";
pub const SAVE_PROJECT_ENDPOINT: &str = "/saveProject.php";
pub const DELETE_PROJECT_ENDPOINT: &str = "/deleteProject.php";
pub const GET_PRICING_ENDPOINT: &str = "/getPricing.php";
pub const SAVE_PRICING_ENDPOINT: &str = "/savePricing.php";
pub const SAVE_CONTACT_ENDPOINT: &str = "/saveContact.php";

pub const WHATSAPP_PHONE: &str = "5215539500411";

/// Options of the contact form's service selector
pub const CONTACT_SERVICES: [&str; 8] = [
    "Landing Page Básica",
    "Sitio Informativo Básico",
    "Sitio con Formulario Interactivo",
    "Sitio con Branding Personalizado",
    "E-commerce Básico",
    "Sitio Corporativo con Correos",
    "Plan de Correos Institucionales",
    "Otro",
];

/// Standard message
#[derive(Debug)]
pub enum Message {
    LoggedIn(String),
    LoggedOut,
    SessionActive(String),
    NoSession,
    ProjectSaved(String),
    ProjectDeleted(String),
    ApproveDelete(String),
    PricingSaved,
    ContactSent,
    LoadFailed(String),
}

impl Message {
    pub fn to_formatted_string(&self) -> String {
        match self {
            Message::LoggedIn(user) => format!("Logged in as {}", user),
            Message::LoggedOut => "Logged out".to_string(),
            Message::SessionActive(since) => format!("Admin session active since {}", since),
            Message::NoSession => "Not logged in".to_string(),
            Message::ProjectSaved(id) => format!("Project saved with ID == {}", id),
            Message::ProjectDeleted(id) => format!("Project with ID == {} deleted", id),
            Message::ApproveDelete(name) => {
                format!("Are you sure you want to delete the project '{}' [y/n]? ", name)
            }
            Message::PricingSaved => "Prices updated".to_string(),
            Message::ContactSent => "Message sent! We will get back to you soon.".to_string(),
            Message::LoadFailed(reason) => {
                format!("{}\nRun the command again to retry.", reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("admin", "Logged in as admin")]
    #[case("", "Logged in as ")]
    fn test_logged_in(#[case] input: String, #[case] expected: String) {
        assert_eq!(Message::LoggedIn(input).to_formatted_string(), expected);
    }

    #[rstest]
    #[case("17", "Project saved with ID == 17")]
    #[case("1718000000000", "Project saved with ID == 1718000000000")]
    fn test_project_saved(#[case] id: String, #[case] expected: String) {
        assert_eq!(Message::ProjectSaved(id).to_formatted_string(), expected);
    }

    #[rstest]
    #[case("Escuela", "Are you sure you want to delete the project 'Escuela' [y/n]? ")]
    #[case("", "Are you sure you want to delete the project '' [y/n]? ")]
    #[case("a".repeat(1000), format!("Are you sure you want to delete the project '{}' [y/n]? ", "a".repeat(1000)))]
    fn test_approve_delete(#[case] input: String, #[case] expected: String) {
        assert_eq!(Message::ApproveDelete(input).to_formatted_string(), expected);
    }

    #[test]
    fn test_load_failed_has_retry_hint() {
        let text = Message::LoadFailed("Could not load the list: down".to_string()).to_formatted_string();
        assert!(text.starts_with("Could not load the list: down"));
        assert!(text.ends_with("Run the command again to retry."));
    }

    #[test]
    fn test_contact_services_end_with_other() {
        assert_eq!(CONTACT_SERVICES.last(), Some(&"Otro"));
        assert_eq!(CONTACT_SERVICES.len(), 8);
    }
}
