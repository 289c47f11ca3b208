//! Seed data backing the in-memory mock backend.

pub mod generated;
pub mod reference;

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::models::{Catalog, SkuComponent, SkuDetail, SkuListItem};
use crate::utils::calculations::{amazon_fee, component_cost, extended_cost};
use crate::utils::config::MockDataset;

pub struct PrimaryLine {
    pub category_id: String,
    pub category_name: String,
    pub component_id: String,
    pub component_name: String,
}

/// How a list row without a hand-written detail is expanded into a bundle.
pub struct FallbackTemplate {
    pub bundle_type_id: String,
    pub bundle_type_name: String,
    /// A single line carrying the row's whole cost, or no lines at all.
    pub primary_line: Option<PrimaryLine>,
}

pub struct SeedData {
    pub list: Vec<SkuListItem>,
    pub details: HashMap<String, SkuDetail>,
    pub fallback: FallbackTemplate,
    pub catalog: Catalog,
}

impl SeedData {
    pub fn load(dataset: MockDataset) -> Self {
        match dataset {
            MockDataset::Generated => generated::load(),
            MockDataset::Reference => reference::load(),
        }
    }

    pub fn fallback_detail(&self, item: &SkuListItem, fee_rate: Decimal) -> SkuDetail {
        let components: Vec<SkuComponent> = self
            .fallback
            .primary_line
            .iter()
            .map(|line| SkuComponent {
                id: "c1".to_string(),
                quantity: 1,
                category_id: line.category_id.clone(),
                category_name: line.category_name.clone(),
                component_id: line.component_id.clone(),
                component_name: line.component_name.clone(),
                cost: item.total_cost,
                extended_cost: extended_cost(1, item.total_cost),
            })
            .collect();
        let component_cost = component_cost(&components);

        SkuDetail {
            id: item.id.clone(),
            sku_code: item.sku_code.clone(),
            bundle_type_id: self.fallback.bundle_type_id.clone(),
            bundle_type_name: self.fallback.bundle_type_name.clone(),
            components,
            main_image_url: item.main_image_url.clone(),
            title: item.title.clone(),
            description: None,
            component_cost,
            shipping_fee: item.shipping_fee,
            selling_price: item.selling_price,
            amazon_fee: amazon_fee(item.selling_price, fee_rate),
        }
    }
}
