use rust_decimal::Decimal;
use std::collections::HashMap;

use super::{FallbackTemplate, PrimaryLine, SeedData};
use crate::models::{
    BundleType, Catalog, Category, ComponentOption, FulfilledBy, SkuComponent, SkuDetail,
    SkuListItem, SkuStatus,
};

const GENERATED_COUNT: usize = 4115;
const PLACEHOLDER_IMAGE: &str = "/vite.svg";

pub fn load() -> SeedData {
    let mut list = vec![
        SkuListItem {
            id: "sku-1".to_string(),
            sku_code: "30-VVJT-YV3Y".to_string(),
            asin: "B00I8BICB2".to_string(),
            active: SkuStatus::Inactive,
            fulfilled_by: FulfilledBy::Seller,
            condition: "new-new".to_string(),
            title: "Sony Alpha a6000 Mirrorless Digital Camera...".to_string(),
            qty: 0,
            main_image_url: Some(PLACEHOLDER_IMAGE.to_string()),
            total_cost: Decimal::new(58084, 2),
            shipping_fee: Decimal::ZERO,
            selling_price: Decimal::from(498),
        },
        SkuListItem {
            id: "sku-2".to_string(),
            sku_code: "31-WWKU-ZW4Z".to_string(),
            asin: "B00I8BICB3".to_string(),
            active: SkuStatus::Active,
            fulfilled_by: FulfilledBy::Seller,
            condition: "new-new".to_string(),
            title: "Canon EOS R5 Full Frame Mirrorless Camera...".to_string(),
            qty: 95,
            main_image_url: Some(PLACEHOLDER_IMAGE.to_string()),
            total_cost: Decimal::from(3200),
            shipping_fee: Decimal::ZERO,
            selling_price: Decimal::from(3899),
        },
    ];
    list.extend(generate_list_items(GENERATED_COUNT, 2));

    let rokinon = rokinon_bundle();
    let mut details = HashMap::new();
    details.insert(rokinon.id.clone(), rokinon);

    SeedData {
        list,
        details,
        fallback: FallbackTemplate {
            bundle_type_id: "rokinon".to_string(),
            bundle_type_name: "Rokinon Lens".to_string(),
            primary_line: Some(PrimaryLine {
                category_id: "lens-rokinon".to_string(),
                category_name: "2. Lens/Rokinon".to_string(),
                component_id: "rokinon-16".to_string(),
                component_name: "ROKINON 16mm F2.0 Lens".to_string(),
            }),
        },
        catalog: catalog(),
    }
}

/// Synthetic rows for exercising pagination and search over a large list.
fn generate_list_items(count: usize, start_index: usize) -> Vec<SkuListItem> {
    (0..count)
        .map(|i| {
            let step = (i % 10) as u8;
            let even = i % 2 == 0;
            let sku_code = format!(
                "{}-{}{}T-{}V{}Y",
                30 + step,
                char::from(86 + step),
                char::from(74 + step),
                char::from(89 + step),
                3 + step
            );
            let title = if i == 0 {
                "Sony Alpha a6000 Mirrorless Digital Camera...".to_string()
            } else {
                format!("SKU Product {} - Camera Lens Bundle...", i + 1)
            };

            SkuListItem {
                id: format!("sku-{}", start_index + i + 1),
                sku_code,
                asin: format!("B00I8BICB{}", step),
                active: if even { SkuStatus::Active } else { SkuStatus::Inactive },
                fulfilled_by: if even { FulfilledBy::Seller } else { FulfilledBy::Amazon },
                condition: if even { "new-new" } else { "used-like-new" }.to_string(),
                title,
                qty: if even { 95 } else { 0 },
                main_image_url: (i < 5).then(|| PLACEHOLDER_IMAGE.to_string()),
                total_cost: Decimal::from(280 + i as i64 * 100),
                shipping_fee: Decimal::ZERO,
                selling_price: Decimal::from(498 + i as i64 * 20),
            }
        })
        .collect()
}

fn rokinon_bundle() -> SkuDetail {
    let line = |id: &str, category_id: &str, category_name: &str, component_id: &str, component_name: &str, cost: Decimal| SkuComponent {
        id: id.to_string(),
        quantity: 1,
        category_id: category_id.to_string(),
        category_name: category_name.to_string(),
        component_id: component_id.to_string(),
        component_name: component_name.to_string(),
        cost,
        extended_cost: cost,
    };

    SkuDetail {
        id: "sku-pz-16m".to_string(),
        sku_code: "PZ_16M-FX-082619".to_string(),
        bundle_type_id: "rokinon".to_string(),
        bundle_type_name: "Rokinon Lens".to_string(),
        components: vec![
            line("c1", "tripod", "9. Tripod/Monopod", "tripod-1", "Spider Tripod", Decimal::from(2)),
            line("c2", "filters", "Filters", "filter-77", "77 FLK", Decimal::from(6)),
            line("c3", "accessories", "Accessories", "cap-keeper", "Cap Keeper", Decimal::new(5, 1)),
            line(
                "c4",
                "lens-rokinon",
                "2. Lens/Rokinon",
                "rokinon-16",
                "ROKINON 16mm F2.0 Ultra Wide Angle Lens (Lens Hood and Pouch incl...)",
                Decimal::from(285),
            ),
        ],
        main_image_url: Some(PLACEHOLDER_IMAGE.to_string()),
        title: "Rokinon 16mm F2.0 Aspherical Wide Angle Lens for Fuji X w/Lens Hood + Protective Lens Case, Spider Flex Tripod & Other Accessory Bundle".to_string(),
        description: None,
        component_cost: Decimal::new(29350, 2),
        shipping_fee: Decimal::ZERO,
        selling_price: Decimal::new(38930, 2),
        amazon_fee: Decimal::new(3815, 2),
    }
}

fn catalog() -> Catalog {
    let bundle_type = |id: &str, name: &str| BundleType {
        id: id.to_string(),
        name: name.to_string(),
    };
    let category = |id: &str, name: &str, sort_order: i32| Category {
        id: id.to_string(),
        name: name.to_string(),
        sort_order: Some(sort_order),
    };
    let option = |id: &str, name: &str, category_id: &str, cost: Decimal| ComponentOption {
        id: id.to_string(),
        name: name.to_string(),
        category_id: category_id.to_string(),
        cost,
    };

    Catalog {
        bundle_types: vec![
            bundle_type("rokinon", "Rokinon Lens"),
            bundle_type("macro", "Macro Lens Bundle"),
            bundle_type("camera", "Camera Kit"),
            bundle_type("accessory", "Accessory Bundle"),
        ],
        categories: vec![
            category("tripod", "9. Tripod/Monopod", 9),
            category("filters", "Filters", 10),
            category("accessories", "Accessories", 11),
            category("lens-rokinon", "2. Lens/Rokinon", 2),
            category("lens-macro", "1. Lens/Macro", 1),
        ],
        component_options: vec![
            option("tripod-1", "Spider Tripod", "tripod", Decimal::from(2)),
            option("filter-77", "77 FLK", "filters", Decimal::from(6)),
            option("cap-keeper", "Cap Keeper", "accessories", Decimal::new(5, 1)),
            option(
                "rokinon-16",
                "ROKINON 16mm F2.0 Ultra Wide Angle Lens (Lens Hood and Pouch incl.)",
                "lens-rokinon",
                Decimal::from(285),
            ),
            option("rokinon-macro", "ROKINON Macro Lens 100mm", "lens-macro", Decimal::from(320)),
        ],
    }
}
