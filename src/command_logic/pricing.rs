use tracing::info;

use crate::constants::Message;
use crate::external_api::ApiError;
use crate::pricing::{PlanKey, PricingTable};
use crate::store::ResourceStore;
use crate::utils::format_mxn;

pub fn render_pricing(table: &PricingTable) -> String {
    PlanKey::ALL
        .iter()
        .map(|key| format!("{:<34} {:>12}", key.label(), format_mxn(table.get(*key))))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Stored table, or the defaults when the store has no row
pub async fn load_pricing<S: ResourceStore<PricingTable>>(store: &S) -> Result<PricingTable, ApiError> {
    Ok(store.list().await?.into_iter().next().unwrap_or_default())
}

pub async fn show_pricing<S: ResourceStore<PricingTable>>(store: S) -> Result<String, ApiError> {
    Ok(render_pricing(&load_pricing(&store).await?))
}

/// Applies the given prices on top of the stored table and saves all six
pub async fn set_pricing<S: ResourceStore<PricingTable>>(
    store: S,
    updates: &[(PlanKey, f64)],
) -> Result<String, ApiError> {
    let mut table = load_pricing(&store).await?;
    for (key, price) in updates {
        table.set(*key, *price)?;
    }
    store.upsert(&table).await?;
    info!(changed = updates.len(), "pricing saved");
    Ok(format!(
        "{}\n{}",
        Message::PricingSaved.to_formatted_string(),
        render_pricing(&table)
    ))
}
