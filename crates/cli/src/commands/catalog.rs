//! Catalog commands.

use medusa_storefront::catalog::{ProductSelection, country_label, region_countries};
use medusa_storefront::state::AppState;
use medusa_storefront_core::ProductId;

use crate::error::AppError;

/// Print a product and the variant resolved from `options`.
#[allow(clippy::print_stdout)]
pub async fn product(state: &AppState, id: &str, options: &[String]) -> Result<(), AppError> {
    let product = state.client().get_product(&ProductId::new(id)).await?;
    let l10n = state.localizer();

    let mut selection = ProductSelection::new(&product);
    for raw in options {
        let (option_id, value) = raw
            .split_once('=')
            .ok_or_else(|| AppError::InvalidOption(raw.clone()))?;
        selection.choose(option_id.trim(), value.trim());
    }

    println!("{}", product.title);
    if let Some(description) = &product.description {
        println!("{description}");
    }
    for option in &product.options {
        let values: Vec<&str> = option.values.iter().map(|v| v.value.as_str()).collect();
        let chosen = selection.chosen(&option.id).unwrap_or("-");
        println!("  {} [{}]: {chosen}", option.title, values.join(", "));
    }

    match selection.selected_variant() {
        Some(variant) => {
            let title = variant.title.as_deref().unwrap_or(variant.id.as_str());
            let price = selection.price().map(|p| p.to_string()).unwrap_or_default();
            let stock = if selection.in_stock() {
                l10n.get("add-to-cart")
            } else {
                l10n.get("out-of-stock")
            };
            println!("{}: {title}  {price}  ({stock})", l10n.get("variant"));
        }
        None if !selection.has_selected_all_options() => {
            tracing::info!("Not every option chosen; pass --option option_id=value");
        }
        None => println!("{}", l10n.get("out-of-stock")),
    }
    Ok(())
}

/// Print one page of collections.
#[allow(clippy::print_stdout)]
pub async fn collections(state: &AppState, limit: u32, offset: u32) -> Result<(), AppError> {
    let page = state.client().list_collections(limit, offset).await?;

    if page.collections.is_empty() {
        println!("{}", state.localizer().get("no-collections-found"));
        return Ok(());
    }
    for collection in &page.collections {
        println!("{}  {}", collection.id, collection.title);
    }
    if page.has_next_page() {
        println!("... {} total, next page at --offset {}", page.count, page.offset + page.limit);
    }
    Ok(())
}

/// Print the countries addresses can be shipped to.
#[allow(clippy::print_stdout)]
pub async fn countries(state: &AppState) -> Result<(), AppError> {
    let regions = state.client().list_regions().await?;
    for country in region_countries(&regions) {
        println!("{}  {}", country.iso_2.to_ascii_uppercase(), country_label(country));
    }
    Ok(())
}
