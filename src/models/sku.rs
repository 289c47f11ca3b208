use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum SkuStatus {
    #[default]
    Active,
    Inactive,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum FulfilledBy {
    #[default]
    Seller,
    Amazon,
}

impl std::fmt::Display for SkuStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkuStatus::Active => write!(f, "Active"),
            SkuStatus::Inactive => write!(f, "Inactive"),
        }
    }
}

impl std::fmt::Display for FulfilledBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FulfilledBy::Seller => write!(f, "Seller"),
            FulfilledBy::Amazon => write!(f, "Amazon"),
        }
    }
}

pub const DEFAULT_CONDITION: &str = "new-new";

/// One row of the SKU list table.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SkuListItem {
    pub id: String,
    pub sku_code: String,
    pub asin: String,
    pub active: SkuStatus,
    pub fulfilled_by: FulfilledBy,
    pub condition: String,
    pub title: String,
    pub qty: u32,
    pub main_image_url: Option<String>,
    pub total_cost: Decimal,
    pub shipping_fee: Decimal,
    pub selling_price: Decimal,
}

impl SkuListItem {
    /// Flatten a detail into its list row.
    ///
    /// Attributes the detail does not own (asin, status, fulfillment,
    /// condition, stock) come from `base` when the detail replaces an
    /// existing row, and fall back to defaults for brand new records.
    pub fn project(detail: &SkuDetail, base: Option<&SkuListItem>) -> Self {
        Self {
            id: detail.id.clone(),
            sku_code: detail.sku_code.clone(),
            asin: base.map(|b| b.asin.clone()).unwrap_or_default(),
            active: base.map(|b| b.active).unwrap_or_default(),
            fulfilled_by: base.map(|b| b.fulfilled_by).unwrap_or_default(),
            condition: base
                .map(|b| b.condition.clone())
                .unwrap_or_else(|| DEFAULT_CONDITION.to_string()),
            title: detail.title.clone(),
            qty: base.map(|b| b.qty).unwrap_or(0),
            main_image_url: detail.main_image_url.clone(),
            total_cost: detail.component_cost,
            shipping_fee: detail.shipping_fee,
            selling_price: detail.selling_price,
        }
    }

    pub fn matches_search(&self, term_lower: &str) -> bool {
        self.sku_code.to_lowercase().contains(term_lower)
            || self.asin.to_lowercase().contains(term_lower)
            || self.title.to_lowercase().contains(term_lower)
    }
}

/// A single component line of a bundle as it travels on the wire.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SkuComponent {
    pub id: String,
    pub quantity: u32,
    pub category_id: String,
    pub category_name: String,
    pub component_id: String,
    pub component_name: String,
    pub cost: Decimal,
    pub extended_cost: Decimal,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SkuDetail {
    pub id: String,
    pub sku_code: String,
    pub bundle_type_id: String,
    pub bundle_type_name: String,
    pub components: Vec<SkuComponent>,
    pub main_image_url: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub component_cost: Decimal,
    pub shipping_fee: Decimal,
    pub selling_price: Decimal,
    pub amazon_fee: Decimal,
}

// request dto
#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveSkuRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[validate(
        length(min = 1, max = 100, message = "SKU Code must be 1-100 characters"),
        custom = "validate_sku_code"
    )]
    pub sku_code: String,

    #[validate(length(min = 1, message = "Bundle Type is required"))]
    pub bundle_type_id: String,

    pub bundle_type_name: String,

    pub components: Vec<SkuComponent>,

    #[validate(length(max = 50000, message = "Image reference must be less than 50000 characters"))]
    pub main_image_url: Option<String>,

    #[validate(length(max = 500, message = "Title must be less than 500 characters"))]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must be less than 2000 characters"))]
    pub description: Option<String>,

    pub component_cost: Decimal,

    #[validate(custom = "validate_non_negative")]
    pub shipping_fee: Decimal,

    #[validate(custom = "validate_non_negative")]
    pub selling_price: Decimal,

    pub amazon_fee: Decimal,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RenameSkuCodeRequest {
    pub sku_code: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RenameSkuCodeResponse {
    pub sku_code: String,
}

fn validate_sku_code(code: &str) -> Result<(), ValidationError> {
    if code.trim().is_empty() {
        return Err(ValidationError::new("SKU Code is required"));
    }
    Ok(())
}

fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        return Err(ValidationError::new("Amount must not be negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SaveSkuRequest {
        SaveSkuRequest {
            id: None,
            sku_code: "PZ_16M-FX-082619".to_string(),
            bundle_type_id: "rokinon".to_string(),
            bundle_type_name: "Rokinon Lens".to_string(),
            components: Vec::new(),
            main_image_url: None,
            title: "Rokinon 16mm bundle".to_string(),
            description: None,
            component_cost: Decimal::ZERO,
            shipping_fee: Decimal::ZERO,
            selling_price: Decimal::new(38930, 2),
            amazon_fee: Decimal::new(3815, 2),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_blank_code_rejected() {
        let mut req = request();
        req.sku_code = "   ".to_string();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("sku_code"));
    }

    #[test]
    fn test_missing_bundle_type_and_negative_price_rejected() {
        let mut req = request();
        req.bundle_type_id = String::new();
        req.selling_price = Decimal::new(-1, 0);
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("bundle_type_id"));
        assert!(fields.contains_key("selling_price"));
    }

    #[test]
    fn test_project_carries_base_attributes() {
        let detail = SkuDetail {
            id: "sku-1".to_string(),
            sku_code: "NEW-CODE".to_string(),
            bundle_type_id: "rokinon".to_string(),
            bundle_type_name: "Rokinon Lens".to_string(),
            components: Vec::new(),
            main_image_url: None,
            title: "Edited".to_string(),
            description: None,
            component_cost: Decimal::new(1050, 2),
            shipping_fee: Decimal::ZERO,
            selling_price: Decimal::new(20, 0),
            amazon_fee: Decimal::new(196, 2),
        };
        let base = SkuListItem {
            id: "sku-1".to_string(),
            sku_code: "OLD".to_string(),
            asin: "B00I8BICB2".to_string(),
            active: SkuStatus::Inactive,
            fulfilled_by: FulfilledBy::Amazon,
            condition: "used-like-new".to_string(),
            title: "Old".to_string(),
            qty: 7,
            main_image_url: Some("/vite.svg".to_string()),
            total_cost: Decimal::ZERO,
            shipping_fee: Decimal::ZERO,
            selling_price: Decimal::ZERO,
        };

        let row = SkuListItem::project(&detail, Some(&base));
        assert_eq!(row.sku_code, "NEW-CODE");
        assert_eq!(row.asin, "B00I8BICB2");
        assert_eq!(row.active, SkuStatus::Inactive);
        assert_eq!(row.qty, 7);
        assert_eq!(row.total_cost, Decimal::new(1050, 2));
        assert_eq!(row.main_image_url, None);

        let fresh = SkuListItem::project(&detail, None);
        assert_eq!(fresh.asin, "");
        assert_eq!(fresh.active, SkuStatus::Active);
        assert_eq!(fresh.condition, DEFAULT_CONDITION);
    }
}
