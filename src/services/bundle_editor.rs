use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::models::{Catalog, SaveSkuRequest, SkuComponent, SkuDetail};
use crate::utils::calculations::{amazon_fee, clamp_money, extended_cost, sum_money};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EditorError {
    #[error("Line '{0}' not found in bundle")]
    LineNotFound(String),

    #[error("Unknown component '{0}'")]
    UnknownComponent(String),

    #[error("Unknown category '{0}'")]
    UnknownCategory(String),

    #[error("Unknown bundle type '{0}'")]
    UnknownBundleType(String),
}

/// One component line being edited. The extended cost is never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct BundleLine {
    pub id: String,
    pub quantity: u32,
    pub category_id: String,
    pub category_name: String,
    pub component_id: String,
    pub component_name: String,
    pub unit_cost: Decimal,
}

impl BundleLine {
    pub fn extended_cost(&self) -> Decimal {
        extended_cost(self.quantity, self.unit_cost)
    }

    fn from_component(component: &SkuComponent) -> Self {
        Self {
            id: component.id.clone(),
            quantity: component.quantity.max(1),
            category_id: component.category_id.clone(),
            category_name: component.category_name.clone(),
            component_id: component.component_id.clone(),
            component_name: component.component_name.clone(),
            unit_cost: clamp_money(component.cost),
        }
    }

    pub fn to_component(&self) -> SkuComponent {
        SkuComponent {
            id: self.id.clone(),
            quantity: self.quantity,
            category_id: self.category_id.clone(),
            category_name: self.category_name.clone(),
            component_id: self.component_id.clone(),
            component_name: self.component_name.clone(),
            cost: self.unit_cost,
            extended_cost: self.extended_cost(),
        }
    }
}

/// Working copy of a bundle for one edit session.
///
/// Header fields and lines are mutated in place; component cost and fee are
/// always derived from the current state.
#[derive(Debug, Clone)]
pub struct BundleEditor {
    id: Option<String>,
    sku_code: String,
    bundle_type_id: String,
    bundle_type_name: String,
    title: String,
    description: Option<String>,
    main_image_url: Option<String>,
    shipping_fee: Decimal,
    selling_price: Decimal,
    lines: Vec<BundleLine>,
    catalog: Catalog,
    fee_rate: Decimal,
}

impl BundleEditor {
    /// Empty bundle. The bundle type defaults to the first one in the catalog.
    pub fn new(catalog: Catalog, fee_rate: Decimal) -> Self {
        let (bundle_type_id, bundle_type_name) = catalog
            .bundle_types
            .first()
            .map(|b| (b.id.clone(), b.name.clone()))
            .unwrap_or_default();

        Self {
            id: None,
            sku_code: String::new(),
            bundle_type_id,
            bundle_type_name,
            title: String::new(),
            description: None,
            main_image_url: None,
            shipping_fee: Decimal::ZERO,
            selling_price: Decimal::ZERO,
            lines: Vec::new(),
            catalog,
            fee_rate,
        }
    }

    /// Hydrate from a looked-up bundle. Stored totals are ignored.
    pub fn from_detail(detail: &SkuDetail, catalog: Catalog, fee_rate: Decimal) -> Self {
        debug!(
            "Opening editor for {} with {} lines",
            detail.id,
            detail.components.len()
        );

        Self {
            id: Some(detail.id.clone()),
            sku_code: detail.sku_code.clone(),
            bundle_type_id: detail.bundle_type_id.clone(),
            bundle_type_name: detail.bundle_type_name.clone(),
            title: detail.title.clone(),
            description: detail.description.clone(),
            main_image_url: detail.main_image_url.clone(),
            shipping_fee: clamp_money(detail.shipping_fee),
            selling_price: clamp_money(detail.selling_price),
            lines: detail.components.iter().map(BundleLine::from_component).collect(),
            catalog,
            fee_rate,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn sku_code(&self) -> &str {
        &self.sku_code
    }

    pub fn bundle_type_id(&self) -> &str {
        &self.bundle_type_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn shipping_fee(&self) -> Decimal {
        self.shipping_fee
    }

    pub fn selling_price(&self) -> Decimal {
        self.selling_price
    }

    pub fn lines(&self) -> &[BundleLine] {
        &self.lines
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn line(&self, line_id: &str) -> Option<&BundleLine> {
        self.lines.iter().find(|l| l.id == line_id)
    }

    pub fn component_cost(&self) -> Decimal {
        sum_money(self.lines.iter().map(BundleLine::extended_cost))
    }

    pub fn amazon_fee(&self) -> Decimal {
        amazon_fee(self.selling_price, self.fee_rate)
    }

    fn next_line_id(&self) -> String {
        let mut n = self.lines.len() + 1;
        loop {
            let candidate = format!("c{}", n);
            if self.line(&candidate).is_none() {
                return candidate;
            }
            n += 1;
        }
    }

    fn line_mut(&mut self, line_id: &str) -> Result<&mut BundleLine, EditorError> {
        self.lines
            .iter_mut()
            .find(|l| l.id == line_id)
            .ok_or_else(|| EditorError::LineNotFound(line_id.to_string()))
    }

    /// Append a line for the first option of the first category, or a blank
    /// line when the catalog has nothing to offer.
    pub fn add_line(&mut self) -> &BundleLine {
        let id = self.next_line_id();
        let line = self
            .catalog
            .categories
            .first()
            .and_then(|category| {
                self.catalog
                    .components_in(&category.id)
                    .next()
                    .map(|option| BundleLine {
                        id: id.clone(),
                        quantity: 1,
                        category_id: category.id.clone(),
                        category_name: category.name.clone(),
                        component_id: option.id.clone(),
                        component_name: option.name.clone(),
                        unit_cost: option.cost,
                    })
            })
            .unwrap_or_else(|| BundleLine {
                id,
                quantity: 1,
                category_id: String::new(),
                category_name: String::new(),
                component_id: String::new(),
                component_name: String::new(),
                unit_cost: Decimal::ZERO,
            });

        self.lines.push(line);
        &self.lines[self.lines.len() - 1]
    }

    pub fn add_component(
        &mut self,
        component_id: &str,
        quantity: u32,
    ) -> Result<&BundleLine, EditorError> {
        let option = self
            .catalog
            .component(component_id)
            .ok_or_else(|| EditorError::UnknownComponent(component_id.to_string()))?;
        let category_name = self.category_name_or_id(&option.category_id);

        let line = BundleLine {
            id: self.next_line_id(),
            quantity: quantity.max(1),
            category_id: option.category_id.clone(),
            category_name,
            component_id: option.id.clone(),
            component_name: option.name.clone(),
            unit_cost: option.cost,
        };

        self.lines.push(line);
        Ok(&self.lines[self.lines.len() - 1])
    }

    pub fn remove_line(&mut self, line_id: &str) -> Result<BundleLine, EditorError> {
        let index = self
            .lines
            .iter()
            .position(|l| l.id == line_id)
            .ok_or_else(|| EditorError::LineNotFound(line_id.to_string()))?;
        Ok(self.lines.remove(index))
    }

    pub fn set_quantity(&mut self, line_id: &str, quantity: u32) -> Result<(), EditorError> {
        self.line_mut(line_id)?.quantity = quantity.max(1);
        Ok(())
    }

    pub fn set_unit_cost(&mut self, line_id: &str, unit_cost: Decimal) -> Result<(), EditorError> {
        self.line_mut(line_id)?.unit_cost = clamp_money(unit_cost);
        Ok(())
    }

    /// Switch a line's category. The component choice and its cost no longer
    /// apply and are cleared.
    pub fn select_category(&mut self, line_id: &str, category_id: &str) -> Result<(), EditorError> {
        let category = self
            .catalog
            .category(category_id)
            .cloned()
            .ok_or_else(|| EditorError::UnknownCategory(category_id.to_string()))?;

        let line = self.line_mut(line_id)?;
        line.category_id = category.id;
        line.category_name = category.name;
        line.component_id.clear();
        line.component_name.clear();
        line.unit_cost = Decimal::ZERO;
        Ok(())
    }

    pub fn select_component(&mut self, line_id: &str, component_id: &str) -> Result<(), EditorError> {
        let option = self
            .catalog
            .component(component_id)
            .cloned()
            .ok_or_else(|| EditorError::UnknownComponent(component_id.to_string()))?;
        let category_name = self.category_name_or_id(&option.category_id);

        let line = self.line_mut(line_id)?;
        if line.category_id != option.category_id {
            line.category_id = option.category_id;
            line.category_name = category_name;
        }
        line.component_id = option.id;
        line.component_name = option.name;
        line.unit_cost = option.cost;
        Ok(())
    }

    /// Options can point at a category the catalog does not list; the raw
    /// id stands in for the name then.
    fn category_name_or_id(&self, category_id: &str) -> String {
        self.catalog
            .category(category_id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| category_id.to_string())
    }

    pub fn set_sku_code(&mut self, code: impl Into<String>) {
        self.sku_code = code.into();
    }

    pub fn set_bundle_type(&mut self, bundle_type_id: &str) -> Result<(), EditorError> {
        let bundle_type = self
            .catalog
            .bundle_type(bundle_type_id)
            .ok_or_else(|| EditorError::UnknownBundleType(bundle_type_id.to_string()))?;
        self.bundle_type_id = bundle_type.id.clone();
        self.bundle_type_name = bundle_type.name.clone();
        Ok(())
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description.filter(|d| !d.is_empty());
    }

    pub fn set_main_image_url(&mut self, url: Option<String>) {
        self.main_image_url = url.filter(|u| !u.is_empty());
    }

    pub fn set_shipping_fee(&mut self, fee: Decimal) {
        self.shipping_fee = clamp_money(fee);
    }

    pub fn set_selling_price(&mut self, price: Decimal) {
        self.selling_price = clamp_money(price);
    }

    /// Current state as a detail, for showing an unsaved bundle.
    pub fn preview(&self) -> SkuDetail {
        let request = self.to_save_request();
        SkuDetail {
            id: request.id.unwrap_or_else(|| "(new)".to_string()),
            sku_code: request.sku_code,
            bundle_type_id: request.bundle_type_id,
            bundle_type_name: request.bundle_type_name,
            components: request.components,
            main_image_url: request.main_image_url,
            title: request.title,
            description: request.description,
            component_cost: request.component_cost,
            shipping_fee: request.shipping_fee,
            selling_price: request.selling_price,
            amazon_fee: request.amazon_fee,
        }
    }

    pub fn to_save_request(&self) -> SaveSkuRequest {
        SaveSkuRequest {
            id: self.id.clone(),
            sku_code: self.sku_code.trim().to_string(),
            bundle_type_id: self.bundle_type_id.clone(),
            bundle_type_name: self.bundle_type_name.clone(),
            components: self.lines.iter().map(BundleLine::to_component).collect(),
            main_image_url: self.main_image_url.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            component_cost: self.component_cost(),
            shipping_fee: self.shipping_fee,
            selling_price: self.selling_price,
            amazon_fee: self.amazon_fee(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BundleType, Category, ComponentOption};
    use crate::utils::calculations::{DEFAULT_AMAZON_FEE_RATE, MAX_MONEY};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn catalog() -> Catalog {
        Catalog {
            bundle_types: vec![
                BundleType { id: "rokinon".to_string(), name: "Rokinon Lens".to_string() },
                BundleType { id: "sigma".to_string(), name: "Sigma Lens".to_string() },
            ],
            categories: vec![
                Category { id: "lens".to_string(), name: "Lens".to_string(), sort_order: Some(1) },
                Category { id: "filter".to_string(), name: "Filter".to_string(), sort_order: Some(2) },
            ],
            component_options: vec![
                ComponentOption {
                    id: "rokinon-16".to_string(),
                    name: "ROKINON 16mm F2.0 Lens".to_string(),
                    category_id: "lens".to_string(),
                    cost: dec("250.00"),
                },
                ComponentOption {
                    id: "uv-77".to_string(),
                    name: "77mm UV Filter".to_string(),
                    category_id: "filter".to_string(),
                    cost: dec("0.335"),
                },
            ],
        }
    }

    fn editor() -> BundleEditor {
        BundleEditor::new(catalog(), DEFAULT_AMAZON_FEE_RATE)
    }

    #[test]
    fn test_new_defaults_to_first_bundle_type() {
        let editor = editor();
        assert_eq!(editor.bundle_type_id(), "rokinon");
        assert!(editor.lines().is_empty());
        assert_eq!(editor.component_cost(), Decimal::ZERO);
        assert_eq!(editor.amazon_fee(), Decimal::ZERO);
    }

    #[test]
    fn test_add_line_uses_first_option_of_first_category() {
        let mut editor = editor();
        let line = editor.add_line().clone();
        assert_eq!(line.id, "c1");
        assert_eq!(line.quantity, 1);
        assert_eq!(line.component_id, "rokinon-16");
        assert_eq!(editor.component_cost(), dec("250.00"));
    }

    #[test]
    fn test_add_line_without_catalog_is_blank() {
        let mut editor = BundleEditor::new(Catalog::default(), DEFAULT_AMAZON_FEE_RATE);
        let line = editor.add_line().clone();
        assert_eq!(line.quantity, 1);
        assert_eq!(line.unit_cost, Decimal::ZERO);
        assert!(line.component_id.is_empty());
        assert_eq!(editor.bundle_type_id(), "");
    }

    #[test]
    fn test_quantity_and_cost_edits_recompute() {
        let mut editor = editor();
        editor.add_component("uv-77", 3).unwrap();
        assert_eq!(editor.component_cost(), dec("1.01"));

        editor.set_quantity("c1", 0).unwrap();
        assert_eq!(editor.line("c1").unwrap().quantity, 1);
        assert_eq!(editor.component_cost(), dec("0.34"));

        editor.set_unit_cost("c1", dec("-5")).unwrap();
        assert_eq!(editor.line("c1").unwrap().unit_cost, Decimal::ZERO);
        assert_eq!(editor.component_cost(), Decimal::ZERO);
    }

    #[test]
    fn test_select_category_clears_component() {
        let mut editor = editor();
        editor.add_component("rokinon-16", 1).unwrap();
        editor.select_category("c1", "filter").unwrap();

        let line = editor.line("c1").unwrap();
        assert_eq!(line.category_name, "Filter");
        assert!(line.component_id.is_empty());
        assert_eq!(line.unit_cost, Decimal::ZERO);

        editor.select_component("c1", "uv-77").unwrap();
        assert_eq!(editor.line("c1").unwrap().unit_cost, dec("0.335"));
    }

    #[test]
    fn test_unknown_ids_are_errors() {
        let mut editor = editor();
        assert_eq!(
            editor.set_quantity("nope", 2),
            Err(EditorError::LineNotFound("nope".to_string()))
        );
        assert!(matches!(
            editor.add_component("missing", 1),
            Err(EditorError::UnknownComponent(_))
        ));
        editor.add_line();
        assert!(matches!(
            editor.select_category("c1", "tripod"),
            Err(EditorError::UnknownCategory(_))
        ));
        assert!(matches!(
            editor.set_bundle_type("canon"),
            Err(EditorError::UnknownBundleType(_))
        ));
    }

    #[test]
    fn test_remove_line_and_fresh_ids() {
        let mut editor = editor();
        editor.add_line();
        editor.add_line();
        editor.remove_line("c1").unwrap();
        let id = editor.add_line().id.clone();
        assert_eq!(id, "c3");
        assert!(editor.remove_line("c1").is_err());
    }

    #[test]
    fn test_from_detail_ignores_stored_totals() {
        let detail = SkuDetail {
            id: "sku-9".to_string(),
            sku_code: "PZ-TEST".to_string(),
            bundle_type_id: "rokinon".to_string(),
            bundle_type_name: "Rokinon Lens".to_string(),
            components: vec![SkuComponent {
                id: "c1".to_string(),
                quantity: 3,
                category_id: "filter".to_string(),
                category_name: "Filter".to_string(),
                component_id: "uv-77".to_string(),
                component_name: "77mm UV Filter".to_string(),
                cost: dec("0.335"),
                extended_cost: dec("999"),
            }],
            main_image_url: None,
            title: "Filter pack".to_string(),
            description: None,
            component_cost: dec("999"),
            shipping_fee: dec("4.50"),
            selling_price: dec("100"),
            amazon_fee: dec("999"),
        };

        let editor = BundleEditor::from_detail(&detail, catalog(), DEFAULT_AMAZON_FEE_RATE);
        let request = editor.to_save_request();
        assert_eq!(request.id.as_deref(), Some("sku-9"));
        assert_eq!(request.components[0].extended_cost, dec("1.01"));
        assert_eq!(request.component_cost, dec("1.01"));
        assert_eq!(request.amazon_fee, dec("9.80"));
        assert_eq!(request.shipping_fee, dec("4.50"));
    }

    #[test]
    fn test_header_setters_clamp_money() {
        let mut editor = editor();
        editor.set_selling_price(dec("-10"));
        editor.set_shipping_fee(dec("-1"));
        editor.set_bundle_type("sigma").unwrap();
        editor.set_sku_code("  NEW-CODE ");
        editor.set_description(Some(String::new()));

        let request = editor.to_save_request();
        assert_eq!(request.selling_price, Decimal::ZERO);
        assert_eq!(request.shipping_fee, Decimal::ZERO);
        assert_eq!(request.bundle_type_name, "Sigma Lens");
        assert_eq!(request.sku_code, "NEW-CODE");
        assert_eq!(request.description, None);
    }

    #[test]
    fn test_huge_unit_cost_saturates() {
        let mut editor = editor();
        editor.add_component("rokinon-16", 2).unwrap();
        editor.set_unit_cost("c1", Decimal::MAX).unwrap();
        editor.set_selling_price(Decimal::MAX);

        assert_eq!(editor.line("c1").unwrap().unit_cost, MAX_MONEY);
        assert_eq!(editor.component_cost(), MAX_MONEY * Decimal::TWO);
        assert_eq!(editor.selling_price(), MAX_MONEY);

        editor.add_component("rokinon-16", u32::MAX).unwrap();
        editor.set_unit_cost("c2", Decimal::MAX).unwrap();
        let _ = editor.to_save_request();
    }

    #[test]
    fn test_option_outside_listed_categories_keeps_category_id() {
        let mut catalog = catalog();
        catalog.component_options.push(ComponentOption {
            id: "strap-1".to_string(),
            name: "Neck Strap".to_string(),
            category_id: "straps".to_string(),
            cost: dec("4.00"),
        });
        let mut editor = BundleEditor::new(catalog, DEFAULT_AMAZON_FEE_RATE);

        let added = editor.add_component("strap-1", 1).unwrap();
        assert_eq!(added.category_id, "straps");
        assert_eq!(added.category_name, "straps");

        editor.add_component("rokinon-16", 1).unwrap();
        editor.select_component("c2", "strap-1").unwrap();
        let line = editor.line("c2").unwrap();
        assert_eq!(line.category_id, "straps");
        assert_eq!(line.category_name, "straps");
        assert_eq!(editor.to_save_request().components[1].category_name, "straps");
    }
}
