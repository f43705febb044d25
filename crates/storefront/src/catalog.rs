//! Product variant selection and region countries.

use std::collections::HashMap;

use medusa_storefront_core::Price;

use crate::medusa::{Country, Product, ProductVariant, Region};

/// Option values a shopper has picked on a product page.
#[derive(Debug, Clone)]
pub struct ProductSelection<'p> {
    product: &'p Product,
    chosen: HashMap<String, String>,
}

impl<'p> ProductSelection<'p> {
    #[must_use]
    pub fn new(product: &'p Product) -> Self {
        Self {
            product,
            chosen: HashMap::new(),
        }
    }

    /// Choose `value` for the option `option_id`.
    pub fn choose(&mut self, option_id: impl Into<String>, value: impl Into<String>) {
        self.chosen.insert(option_id.into(), value.into());
    }

    #[must_use]
    pub fn chosen(&self, option_id: &str) -> Option<&str> {
        self.chosen.get(option_id).map(String::as_str)
    }

    /// The variant matching the chosen options.
    ///
    /// A product with one variant resolves to it whatever was chosen.
    #[must_use]
    pub fn selected_variant(&self) -> Option<&'p ProductVariant> {
        match self.product.variants.as_slice() {
            [] => None,
            [only] => Some(only),
            variants => variants
                .iter()
                .find(|variant| option_keymap(variant) == self.chosen),
        }
    }

    /// Whether every product option has a value.
    #[must_use]
    pub fn has_selected_all_options(&self) -> bool {
        self.product
            .options
            .iter()
            .all(|option| self.chosen.get(&option.id).is_some_and(|v| !v.is_empty()))
    }

    /// Whether the selected variant can be added to the cart.
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.selected_variant().is_some_and(variant_in_stock)
    }

    /// Price of the selected variant in the product's region.
    #[must_use]
    pub fn price(&self) -> Option<Price> {
        self.selected_variant()?.calculated_price.as_ref()?.price()
    }
}

fn option_keymap(variant: &ProductVariant) -> HashMap<String, String> {
    variant
        .options
        .iter()
        .filter_map(|opt| Some((opt.option_id.clone()?, opt.value.clone())))
        .collect()
}

/// Untracked inventory and backorders are always available; otherwise the
/// variant needs a positive quantity.
#[must_use]
pub fn variant_in_stock(variant: &ProductVariant) -> bool {
    !variant.manage_inventory
        || variant.allow_backorder
        || variant.inventory_quantity.unwrap_or(0) > 0
}

/// Countries served by any region, sorted by display name, without duplicates.
#[must_use]
pub fn region_countries(regions: &[Region]) -> Vec<&Country> {
    let mut countries: Vec<&Country> = regions.iter().flat_map(|r| &r.countries).collect();
    countries.sort_by(|a, b| country_label(a).cmp(country_label(b)));
    countries.dedup_by(|a, b| a.iso_2.eq_ignore_ascii_case(&b.iso_2));
    countries
}

/// Name to show for a country.
#[must_use]
pub fn country_label(country: &Country) -> &str {
    country
        .display_name
        .as_deref()
        .or(country.name.as_deref())
        .unwrap_or(&country.iso_2)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tee() -> Product {
        serde_json::from_value(json!({
            "id": "prod_1",
            "title": "Tee",
            "options": [
                {"id": "opt_size", "title": "Size", "values": [{"id": "v1", "value": "S"}, {"id": "v2", "value": "M"}]},
                {"id": "opt_color", "title": "Color", "values": [{"id": "v3", "value": "Black"}]}
            ],
            "variants": [
                {
                    "id": "variant_s",
                    "manage_inventory": true,
                    "inventory_quantity": 0,
                    "options": [
                        {"id": "ov1", "value": "S", "option_id": "opt_size"},
                        {"id": "ov2", "value": "Black", "option_id": "opt_color"}
                    ]
                },
                {
                    "id": "variant_m",
                    "manage_inventory": true,
                    "inventory_quantity": 4,
                    "options": [
                        {"id": "ov3", "value": "M", "option_id": "opt_size"},
                        {"id": "ov4", "value": "Black", "option_id": "opt_color"}
                    ],
                    "calculated_price": {"calculated_amount": 25, "currency_code": "eur"}
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_variant_resolves_only_with_all_options() {
        let product = tee();
        let mut selection = ProductSelection::new(&product);
        selection.choose("opt_size", "M");
        assert!(!selection.has_selected_all_options());
        assert!(selection.selected_variant().is_none());

        selection.choose("opt_color", "Black");
        assert!(selection.has_selected_all_options());
        assert_eq!(selection.selected_variant().unwrap().id.as_str(), "variant_m");
        assert!(selection.in_stock());
        assert_eq!(selection.price().unwrap().to_string(), "25.00 EUR");
    }

    #[test]
    fn test_managed_variant_without_quantity_is_out_of_stock() {
        let product = tee();
        let mut selection = ProductSelection::new(&product);
        selection.choose("opt_size", "S");
        selection.choose("opt_color", "Black");
        assert!(!selection.in_stock());
    }

    #[test]
    fn test_single_variant_resolves_directly() {
        let mut product = tee();
        product.variants.truncate(1);
        let selection = ProductSelection::new(&product);
        assert_eq!(selection.selected_variant().unwrap().id.as_str(), "variant_s");
    }

    #[test]
    fn test_stock_rules() {
        let mut variant = tee().variants.remove(0);
        assert!(!variant_in_stock(&variant));
        variant.allow_backorder = true;
        assert!(variant_in_stock(&variant));
        variant.allow_backorder = false;
        variant.manage_inventory = false;
        assert!(variant_in_stock(&variant));
    }

    #[test]
    fn test_region_countries() {
        let regions: Vec<Region> = serde_json::from_value(json!([
            {"id": "reg_1", "name": "Asia", "currency_code": "idr", "countries": [
                {"iso_2": "id", "display_name": "Indonesia"},
                {"iso_2": "sg", "display_name": "Singapore"}
            ]},
            {"id": "reg_2", "name": "EU", "currency_code": "eur", "countries": [
                {"iso_2": "de", "display_name": "Germany"},
                {"iso_2": "ID", "display_name": "Indonesia"}
            ]}
        ]))
        .unwrap();
        let labels: Vec<&str> = region_countries(&regions).into_iter().map(country_label).collect();
        assert_eq!(labels, vec!["Germany", "Indonesia", "Singapore"]);
    }
}
