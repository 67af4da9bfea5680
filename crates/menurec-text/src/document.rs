//! Synthetic per-item text used as vectorization input.
//!
//! The template encodes name, veg flag, category and price so that items with
//! similar attributes share tokens. It must stay stable for a stored model to
//! remain comparable with freshly built ones.

use menurec_core::types::CatalogItem;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentTemplate {
    currency_symbol: String,
}

impl Default for DocumentTemplate {
    fn default() -> Self {
        Self::new("₹")
    }
}

impl DocumentTemplate {
    pub fn new(currency_symbol: impl Into<String>) -> Self {
        Self { currency_symbol: currency_symbol.into() }
    }

    pub fn render(&self, item: &CatalogItem) -> String {
        format!(
            "{}. This is a {} {} dish priced at {}{}.",
            item.name,
            if item.veg { "Veg" } else { "Non-Veg" },
            item.category,
            self.currency_symbol,
            item.price,
        )
    }

    pub fn render_all(&self, catalog: &[CatalogItem]) -> Vec<String> {
        catalog.iter().map(|item| self.render(item)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_veg_and_whole_price() {
        let item = CatalogItem::new(1, "Veg Biryani", "Rice", true, 120.0);
        assert_eq!(
            DocumentTemplate::default().render(&item),
            "Veg Biryani. This is a Veg Rice dish priced at ₹120."
        );
    }

    #[test]
    fn renders_non_veg_and_fractional_price() {
        let item = CatalogItem::new("dish_7", "Chicken 65", "Snacks", false, 12.5);
        assert_eq!(
            DocumentTemplate::new("$").render(&item),
            "Chicken 65. This is a Non-Veg Snacks dish priced at $12.5."
        );
    }
}
