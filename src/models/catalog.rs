use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BundleType {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
}

/// A purchasable component offered in the component picker.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComponentOption {
    pub id: String,
    pub name: String,
    pub category_id: String,
    pub cost: Decimal,
}

/// Reference data an edit session resolves ids against.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub bundle_types: Vec<BundleType>,
    pub categories: Vec<Category>,
    pub component_options: Vec<ComponentOption>,
}

impl Catalog {
    pub fn bundle_type(&self, id: &str) -> Option<&BundleType> {
        self.bundle_types.iter().find(|b| b.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn component(&self, id: &str) -> Option<&ComponentOption> {
        self.component_options.iter().find(|o| o.id == id)
    }

    pub fn components_in(&self, category_id: &str) -> impl Iterator<Item = &ComponentOption> {
        let category_id = category_id.to_string();
        self.component_options
            .iter()
            .filter(move |o| o.category_id == category_id)
    }
}

/// Order categories by their sort key; categories without one sort as 0.
pub fn sort_categories(categories: &mut [Category]) {
    categories.sort_by_key(|c| c.sort_order.unwrap_or(0));
}
