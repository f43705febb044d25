//! Order detail presentation.

use rust_decimal::Decimal;

use medusa_storefront_core::Price;

use crate::i18n::Localizer;
use crate::medusa::Order;

/// `MMMM D, YYYY h:mm A`, e.g. "March 4, 2025 3:07 PM".
const PLACED_ON_FORMAT: &str = "%B %-d, %Y %-I:%M %p";

/// One line of the order items list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub title: String,
    pub variant_title: Option<String>,
    pub quantity: u32,
    pub total: Option<Price>,
}

/// An order rendered into localized strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetailView {
    pub heading: String,
    pub placed_on: Option<String>,
    pub status: String,
    pub items: Vec<OrderLine>,
    /// Label and amount pairs; discount only appears when non-zero.
    pub summary: Vec<(String, Price)>,
}

impl OrderDetailView {
    #[must_use]
    pub fn new(order: &Order, l10n: &Localizer) -> Self {
        let display_id = order
            .display_id
            .map_or_else(|| "-".to_string(), |id| id.to_string());

        let placed_on = order.created_at.map(|created_at| {
            l10n.format(
                "placed-on",
                &[("datetime", &created_at.format(PLACED_ON_FORMAT).to_string())],
            )
        });

        let price = |amount: Option<Decimal>| {
            amount.and_then(|amount| Price::new(amount, &order.currency_code).ok())
        };

        let items = order
            .items
            .iter()
            .map(|item| OrderLine {
                title: item.product_title.clone().unwrap_or_else(|| item.title.clone()),
                variant_title: item.variant_title.clone(),
                quantity: item.quantity,
                total: price(item.total.or_else(|| Some(item.unit_price * Decimal::from(item.quantity)))),
            })
            .collect();

        let mut summary = Vec::new();
        let mut push = |key: &str, amount: Option<Decimal>| {
            if let Some(p) = price(amount) {
                summary.push((l10n.get(key).to_string(), p));
            }
        };
        push("subtotal", order.subtotal);
        push("shipping", order.shipping_total);
        push("discount", order.discount_total.filter(|d| *d > Decimal::ZERO));
        push("taxes", order.tax_total);
        push("total", order.total);

        Self {
            heading: l10n.format("order-with-id", &[("id", &display_id)]),
            placed_on,
            status: l10n.get(order.fulfillment_status.display_key()).to_string(),
            items,
            summary,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::i18n::Locale;
    use serde_json::json;

    fn order() -> Order {
        serde_json::from_value(json!({
            "id": "order_1",
            "display_id": 1042,
            "currency_code": "usd",
            "created_at": "2025-03-04T15:07:00Z",
            "fulfillment_status": "partially_shipped",
            "items": [
                {"id": "cali_1", "title": "M / Black", "product_title": "Tee", "variant_title": "M / Black", "quantity": 2, "unit_price": 12.5}
            ],
            "subtotal": 25,
            "shipping_total": 5,
            "discount_total": 0,
            "tax_total": 2.5,
            "total": 32.5
        }))
        .unwrap()
    }

    #[test]
    fn test_order_detail_view() {
        let view = OrderDetailView::new(&order(), &Localizer::new(Locale::EnUs));
        assert_eq!(view.heading, "Order # 1042");
        assert_eq!(view.placed_on.as_deref(), Some("Placed on March 4, 2025 3:07 PM"));
        assert_eq!(view.status, "Partially Shipped");
        assert_eq!(view.items[0].title, "Tee");
        assert_eq!(view.items[0].total.as_ref().unwrap().to_string(), "25.00 USD");

        let labels: Vec<&str> = view.summary.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["Subtotal", "Shipping", "Taxes", "Total"]);
    }

    #[test]
    fn test_order_without_display_id_or_date() {
        let mut order = order();
        order.display_id = None;
        order.created_at = None;
        let view = OrderDetailView::new(&order, &Localizer::new(Locale::IdId));
        assert_eq!(view.heading, "Pesanan # -");
        assert!(view.placed_on.is_none());
        assert_eq!(view.status, "Sebagian Dikirim");
    }
}
