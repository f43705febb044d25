//! Order commands.

use medusa_storefront::orders::OrderDetailView;
use medusa_storefront::state::AppState;
use medusa_storefront_core::OrderId;

use crate::error::AppError;

/// Print an order's details.
#[allow(clippy::print_stdout)]
pub async fn show(state: &AppState, id: &str) -> Result<(), AppError> {
    let order = state.client().get_order(&OrderId::new(id)).await?;
    let l10n = state.localizer();
    let view = OrderDetailView::new(&order, l10n);

    println!("{}", view.heading);
    if let Some(placed_on) = &view.placed_on {
        println!("{placed_on}");
    }
    println!("{}: {}", l10n.get("status"), view.status);
    println!();
    println!("{}", l10n.get("order-items"));
    for line in &view.items {
        let variant = line
            .variant_title
            .as_deref()
            .map(|v| format!(" ({v})"))
            .unwrap_or_default();
        let total = line.total.as_ref().map(ToString::to_string).unwrap_or_default();
        println!("  {} x{}{variant}  {total}", line.title, line.quantity);
    }
    println!();
    println!("{}", l10n.get("order-summary"));
    for (label, amount) in &view.summary {
        println!("  {label}: {amount}");
    }
    Ok(())
}
