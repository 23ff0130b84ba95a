use serde::{Deserialize, Serialize};

use super::record_id::{deserialize_optional_id, RecordId};
use crate::store::{Editable, Resource};
use crate::sync::form_edit::{Draft, FormError};

/// Portfolio entry
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Project {
    #[serde(
        default,
        deserialize_with = "deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    /// Image URL, or a text description of the image in older entries
    #[serde(default)]
    pub image: String,
}

impl Project {
    /// Link a visitor opens. Entries are often stored as a bare host.
    pub fn visit_url(&self) -> String {
        let url = self.url.trim();
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("https://{url}")
        }
    }

    /// Showcase used until an admin saves the first project
    pub fn showcase() -> Vec<Project> {
        [
            (
                1,
                "Escuela DonyDonitasss",
                "escuelita.donydonitasss.com",
                "Plataforma educativa moderna con gestión de cursos y estudiantes",
                "Educational platform with modern interface showing course management, pink and yellow theme",
            ),
            (
                2,
                "Invitaciones Digitales",
                "invitaciones.donydonitasss.com",
                "Sistema de invitaciones digitales personalizables para eventos especiales",
                "Digital invitation platform with elegant design templates, pink and yellow theme",
            ),
            (
                3,
                "Mobiliaria Premium",
                "mobiliaria.donydonitasss.com",
                "Catálogo online de muebles con experiencia de compra inmersiva",
                "Furniture e-commerce website with premium product showcase, pink and yellow theme",
            ),
        ]
        .into_iter()
        .map(|(id, name, url, description, image)| Project {
            id: Some(RecordId::from(id)),
            name: name.to_string(),
            url: url.to_string(),
            description: description.to_string(),
            image: image.to_string(),
        })
        .collect()
    }
}

impl Resource for Project {
    const NAME: &'static str = "projects";
    const STORAGE_KEY: &'static str = "portfolioProjects";

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn seed() -> Vec<Self> {
        Project::showcase()
    }
}

impl Editable for Project {
    type Draft = ProjectDraft;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectDraft {
    pub name: String,
    pub url: String,
    pub description: String,
    pub image: String,
}

impl Draft for ProjectDraft {
    type Record = Project;
    const REQUIRED: &'static [&'static str] = &["name", "url", "description", "image"];

    fn from_record(record: &Project) -> Self {
        Self {
            name: record.name.clone(),
            url: record.url.clone(),
            description: record.description.clone(),
            image: record.image.clone(),
        }
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(&self.name),
            "url" => Some(&self.url),
            "description" => Some(&self.description),
            "image" => Some(&self.image),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: String) -> Result<(), FormError> {
        match name {
            "name" => self.name = value,
            "url" => self.url = value,
            "description" => self.description = value,
            "image" => self.image = value,
            other => return Err(FormError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    fn into_record(self, id: Option<RecordId>) -> Project {
        Project {
            id,
            name: self.name,
            url: self.url,
            description: self.description,
            image: self.image,
        }
    }
}
