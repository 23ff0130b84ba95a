use std::io::{BufRead, Write};

use crate::constants::Message;
use crate::external_api::site_api::models::project::Project;
use crate::external_api::site_api::models::record_id::RecordId;
use crate::external_api::ApiError;
use crate::store::ResourceStore;
use crate::sync::list_controller::ListController;
use crate::sync::Confirmation;

/// Field values given on the command line. `None` keeps the current value when editing.
#[derive(Debug, Default, Clone)]
pub struct ProjectFields {
    pub name: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl ProjectFields {
    fn apply<S: ResourceStore<Project>>(self, controller: &mut ListController<Project, S>) -> Result<(), ApiError> {
        let fields = [
            ("name", self.name),
            ("url", self.url),
            ("description", self.description),
            ("image", self.image),
        ];
        for (name, value) in fields {
            if let Some(value) = value {
                controller.set_field(name, value)?;
            }
        }
        Ok(())
    }
}

pub fn render_projects(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "No projects yet".to_string();
    }
    projects
        .iter()
        .map(|project| {
            let id = project.id.as_ref().map(RecordId::as_str).unwrap_or("-");
            format!(
                "[{}] {} ({})\n    {}\n    image: {}",
                id,
                project.name,
                project.visit_url(),
                project.description,
                project.image
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn list_projects<S: ResourceStore<Project>>(store: S) -> Result<String, ApiError> {
    let mut controller = ListController::new(store);
    let projects = controller.mount().await?;
    Ok(render_projects(projects))
}

pub async fn add_project<S: ResourceStore<Project>>(store: S, fields: ProjectFields) -> Result<String, ApiError> {
    let mut controller = ListController::new(store);
    controller.open_create();
    fields.apply(&mut controller)?;
    let id = controller.submit().await?;
    Ok(saved_message(id))
}

pub async fn edit_project<S: ResourceStore<Project>>(
    store: S,
    id: &RecordId,
    fields: ProjectFields,
) -> Result<String, ApiError> {
    let mut controller = ListController::new(store);
    controller.mount().await?;
    controller.open_edit(id)?;
    fields.apply(&mut controller)?;
    let saved = controller.submit().await?;
    Ok(saved_message(saved.or_else(|| Some(id.clone()))))
}

/// Deletes after an explicit confirmation, read from `input` unless `assume_yes`
pub async fn delete_project<S, R, W>(
    store: S,
    id: &RecordId,
    assume_yes: bool,
    input: R,
    output: W,
) -> Result<String, ApiError>
where
    S: ResourceStore<Project>,
    R: BufRead,
    W: Write,
{
    let mut controller = ListController::new(store);
    controller.mount().await?;
    let name = controller
        .records()
        .iter()
        .find(|project| project.id.as_ref() == Some(id))
        .map(|project| project.name.clone())
        .unwrap_or_else(|| id.to_string());

    let confirmation = if assume_yes {
        Confirmation::from_flag()
    } else {
        Confirmation::ask(&Message::ApproveDelete(name).to_formatted_string(), input, output)?
    };
    controller.delete(id, confirmation).await?;
    Ok(Message::ProjectDeleted(id.to_string()).to_formatted_string())
}

fn saved_message(id: Option<RecordId>) -> String {
    let id = id.map(|id| id.to_string()).unwrap_or_else(|| "?".to_string());
    Message::ProjectSaved(id).to_formatted_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external_api::site_api::SiteApi;
    use crate::store::local::LocalStore;
    use crate::store::remote::RemoteStore;
    use crate::sync::form_edit::FormError;
    use mockito::Server;
    use std::io::{BufReader, Cursor};
    use tempfile::TempDir;

    fn full_fields(name: &str) -> ProjectFields {
        ProjectFields {
            name: Some(name.to_string()),
            url: Some("panaderia.example.com".to_string()),
            description: Some("Pan dulce".to_string()),
            image: Some("https://img.example.com/pan.png".to_string()),
        }
    }

    #[test]
    fn test_render_projects() {
        let text = render_projects(&Project::showcase()[..1]);
        assert!(text.starts_with("[1] Escuela DonyDonitasss (https://escuelita.donydonitasss.com)"));
        assert_eq!(render_projects(&[]), "No projects yet");
    }

    #[tokio::test]
    async fn test_add_then_list() {
        let dir = TempDir::new().unwrap();
        let message = add_project(LocalStore::new(dir.path()), full_fields("Panadería")).await.unwrap();
        assert!(message.starts_with("Project saved with ID == "));

        let listing = list_projects(LocalStore::new(dir.path())).await.unwrap();
        assert!(listing.contains("Panadería (https://panaderia.example.com)"));
        assert!(listing.contains("Escuela DonyDonitasss"));
    }

    #[tokio::test]
    async fn test_add_with_missing_fields() {
        let dir = TempDir::new().unwrap();
        let fields = ProjectFields {
            name: Some("Solo nombre".to_string()),
            ..ProjectFields::default()
        };
        let error = add_project(LocalStore::new(dir.path()), fields).await.unwrap_err();
        assert!(matches!(error, ApiError::Form(FormError::MissingFields(_))));
    }

    #[tokio::test]
    async fn test_edit_keeps_id_and_untouched_fields() {
        let dir = TempDir::new().unwrap();
        let fields = ProjectFields {
            name: Some("Escuela Renovada".to_string()),
            ..ProjectFields::default()
        };
        let message = edit_project(LocalStore::new(dir.path()), &RecordId::from(1), fields)
            .await
            .unwrap();
        assert_eq!(message, "Project saved with ID == 1");

        let projects: Vec<Project> = LocalStore::new(dir.path()).list().await.unwrap();
        assert_eq!(projects.len(), 3);
        assert_eq!(projects[0].name, "Escuela Renovada");
        assert_eq!(projects[0].url, "escuelita.donydonitasss.com");
    }

    #[tokio::test]
    async fn test_edit_unknown_id() {
        let dir = TempDir::new().unwrap();
        let result = edit_project(LocalStore::new(dir.path()), &RecordId::from(99), full_fields("x")).await;
        assert!(matches!(result, Err(ApiError::NotFound(id)) if id == "99"));
    }

    #[tokio::test]
    async fn test_delete_with_prompt() {
        let dir = TempDir::new().unwrap();
        let input = BufReader::new(Cursor::new(b"y\n".to_vec()));
        let mut output = Cursor::new(Vec::<u8>::new());

        let message = delete_project(LocalStore::new(dir.path()), &RecordId::from(2), false, input, &mut output)
            .await
            .unwrap();

        assert_eq!(message, "Project with ID == 2 deleted");
        let prompt = String::from_utf8(output.into_inner()).unwrap();
        assert_eq!(
            prompt,
            "Are you sure you want to delete the project 'Invitaciones Digitales' [y/n]? "
        );
        let projects: Vec<Project> = LocalStore::new(dir.path()).list().await.unwrap();
        assert!(projects.iter().all(|project| project.id != Some(RecordId::from(2))));
    }

    #[tokio::test]
    async fn test_delete_declined() {
        let dir = TempDir::new().unwrap();
        let input = BufReader::new(Cursor::new(b"n\n".to_vec()));
        let result = delete_project(LocalStore::new(dir.path()), &RecordId::from(2), false, input, std::io::sink()).await;

        assert!(matches!(result, Err(ApiError::DeleteCancelledByUser)));
        let projects: Vec<Project> = LocalStore::new(dir.path()).list().await.unwrap();
        assert_eq!(projects.len(), 3);
    }

    #[tokio::test]
    async fn test_remote_list_failure() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/getProjects.php")
            .with_status(500)
            .with_header("content-type", "text/html")
            .with_body("<h1>500</h1>")
            .create_async()
            .await;

        let store = RemoteStore::new(SiteApi::mock(&server.url()));
        let error = list_projects(store).await.unwrap_err();
        assert!(matches!(error, ApiError::RemoteFetch(message) if message == "<h1>500</h1>"));
    }
}
