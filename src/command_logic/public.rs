use tracing::warn;

use super::pricing::load_pricing;
use crate::external_api::site_api::models::project::Project;
use crate::external_api::ApiError;
use crate::pricing::{PlanKey, PricingTable};
use crate::store::ResourceStore;
use crate::utils::{format_mxn, quote_request_link};

/// Public plans page. Prices fall back to the defaults when they cannot be loaded.
pub async fn plans<S: ResourceStore<PricingTable>>(store: S) -> String {
    let table = match load_pricing(&store).await {
        Ok(table) => table,
        Err(error) => {
            warn!(%error, "using default prices");
            PricingTable::default()
        }
    };
    render_plans(&table)
}

fn render_plans(table: &PricingTable) -> String {
    PlanKey::ALL
        .iter()
        .map(|key| {
            let popular = if key.is_popular() { "  [Más popular]" } else { "" };
            format!(
                "{}{}\n  Desde {} MXN\n  {}\n  Cotizar: {}",
                key.label(),
                popular,
                format_mxn(table.get(*key)),
                key.description(),
                quote_request_link(key.label())
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Public portfolio showcase
pub async fn portfolio<S: ResourceStore<Project>>(store: S) -> Result<String, ApiError> {
    let projects = store.list().await?;
    if projects.is_empty() {
        return Ok("No projects yet".to_string());
    }
    Ok(projects
        .iter()
        .map(|project| format!("{}\n  {}\n  Visitar: {}", project.name, project.description, project.visit_url()))
        .collect::<Vec<_>>()
        .join("\n\n"))
}
