use regex::Regex;
use rust_decimal::Decimal;
use std::collections::HashMap;

use super::{FallbackTemplate, SeedData};
use crate::models::{
    BundleType, Catalog, Category, ComponentOption, FulfilledBy, SkuComponent, SkuDetail,
    SkuListItem, SkuStatus,
};

lazy_static::lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref NON_SLUG: Regex = Regex::new(r"[^a-z0-9-]").unwrap();
}

/// Catalogue rows: (code, asin, active, title, qty, image id, total cost, price).
const SKU_ROWS: &[(&str, &str, bool, &str, u32, &str, i64, i64)] = &[
    ("30-VVJT-YV3Y", "B00I8ICB2", false, "Sony Alpha a6000 Mirrorless Digital Camera...", 0, "1516035069371-29a1b244cc32", 58084, 49800),
    ("3I-H43D-7JG3", "B07GVQTGKR", true, "Canon EOS M50 Mirrorless Digital Camera...", 95, "1502920917128-1aa500764cbd", 53992, 59900),
    ("47-ZEUO-N031", "B01K374P6E", false, "Fuji 16500076 XP90- Compact and portable...", 0, "1581591524425-c7e0978865fc", 0, 13600),
    ("5Y-W4AN-A85F", "B07NC29V2Z", true, "Canon Accessories Canon Extension Grip E...", 10, "1617005082133-548c4dd27f35", 0, 7900),
    ("6P-580G-ANKU", "B011LSPEDC", true, "Canon KP-108IN Ink Paper Set (2) Pack - 2...", 3, "1612815154858-60aa4c59eaa6", 0, 5930),
    ("7K-P92M-XN47", "B08CGK5K4M", true, "Nikon Z5 Full Frame Mirrorless Camera...", 25, "1606986628123-3e3c7c089de6", 129900, 139900),
    ("8M-QR5T-BC12", "B09KLGPF3Y", false, "GoPro HERO10 Black Action Camera Bundle...", 0, "1564466809058-bf4114d55352", 39999, 44900),
    ("9N-WS8V-DE34", "B07WCHJ2YG", true, "DJI Osmo Pocket 2 Creator Combo...", 15, "1473968512647-3e447244af8f", 44900, 49900),
    ("2A-XY6U-FG56", "B08LNLH1PZ", true, "Panasonic Lumix G100 4K Mirrorless Camera...", 8, "1510127034890-ba27508e9f1c", 69799, 74799),
    ("3B-ZA7W-HI78", "B084DN28KF", false, "Olympus OM-D E-M10 Mark IV Mirrorless...", 0, "1495121553079-4c61bcce1894", 79900, 89900),
    ("4C-BC8X-JK90", "B07X47VPRD", true, "Sigma 16mm f/1.4 DC DN Contemporary Lens...", 42, "1617575521317-d2974f3b56d2", 32900, 39900),
    ("5D-CD9Y-LM12", "B08HLWMP81", true, "Tamron 28-75mm f/2.8 Di III VXD G2 Lens...", 18, "1606220588913-b3aacb4d2f46", 87900, 94900),
    ("6E-DE0Z-NP34", "B09PQ9XH3Q", false, "Peak Design Everyday Backpack 30L V2...", 0, "1553062407-98eeb64c6a62", 27995, 29995),
    ("7F-EF1A-QR56", "B07VJFZ8PH", true, "Rode VideoMic Pro+ On-Camera Shotgun...", 31, "1598550476439-6847785fcea6", 24900, 29900),
    ("8G-FG2B-ST78", "B08KSK9G6Y", true, "Manfrotto Befree Advanced Travel Tripod...", 22, "1542567455-cd733f23fbb1", 18988, 21988),
    ("9H-GH3C-UV90", "B07T7PNWHD", false, "SanDisk Extreme PRO 256GB SD Card V30...", 0, "1531525727125-d5eb56e23e58", 3999, 4999),
    ("0I-HI4D-WX12", "B09YQRXQ4S", true, "Godox SL-60W LED Video Light with Softbox...", 14, "1493863641943-9b68992a8d07", 14900, 17900),
    ("1J-IJ5E-YZ34", "B0829VGMXL", true, "Zhiyun Crane M3 3-Axis Gimbal Stabilizer...", 7, "1585771724684-38269d6639fd", 29900, 34900),
    ("2K-JK6F-AB56", "B07VKQCP2L", false, "Atomos Ninja V 5-inch HDR Recording Monitor...", 0, "1574717024653-61fd2cf4d44d", 59900, 69900),
    ("3L-KL7G-CD78", "B08F9NWN9V", true, "Lowepro ProTactic BP 450 AW II Camera Bag...", 19, "1622560480605-d83c853bc5c3", 22995, 27995),
];

const BUNDLE_TYPES: &[&str] = &[
    "Rokinon Lens",
    "Canon Camera",
    "Sony Bundle",
    "Nikon Kit",
    "Fujifilm Set",
    "GoPro Pack",
];

const CATEGORIES: &[&str] = &[
    "1. Camera Body",
    "2. Lens/Rokinon",
    "3. Memory Card",
    "4. Battery",
    "5. Charger",
    "6. Camera Bag",
    "7. Lens Filter",
    "8. Cleaning Kit",
    "9. Tripod/Monopod",
    "Filters",
    "Accessories",
];

/// (name, category, cost in cents)
const COMPONENTS: &[(&str, &str, i64)] = &[
    ("Spider Tripod", "9. Tripod/Monopod", 200),
    ("77 FLK", "Filters", 600),
    ("Cap Keeper", "Accessories", 50),
    ("Lens Hood", "Accessories", 350),
    ("Lens Pouch", "Accessories", 500),
    ("UV Filter 77mm", "Filters", 1200),
    ("ND Filter Set", "Filters", 2400),
    ("Cleaning Kit", "8. Cleaning Kit", 800),
    ("Memory Card 64GB", "3. Memory Card", 1500),
    ("Extra Battery", "4. Battery", 2500),
    ("ROKINON 16mm F2.0 Ultra Wide Angle Lens (Lens Hood and Pouch incl...)", "2. Lens/Rokinon", 28500),
    ("Canon EF 50mm f/1.8 STM Lens", "2. Lens/Rokinon", 12500),
    ("Sony FE 85mm f/1.8 Lens", "2. Lens/Rokinon", 59800),
];

/// (line number, category, component, cost in cents)
const SAMPLE_BUNDLE_LINES: &[(u32, &str, &str, i64)] = &[
    (1, "9. Tripod/Monopod", "Spider Tripod", 200),
    (2, "Filters", "77 FLK", 600),
    (3, "Accessories", "Cap Keeper", 50),
    (4, "2. Lens/Rokinon", "ROKINON 16mm F2.0 Ultra Wide Angle Lens (Lens Hood and Pouch incl...)", 28500),
];

/// Lowercase, dash-separated identifier derived from a display name.
pub fn slug(name: &str) -> String {
    let lowered = name.to_lowercase();
    let dashed = WHITESPACE.replace_all(&lowered, "-");
    NON_SLUG.replace_all(&dashed, "").into_owned()
}

fn image_url(photo_id: &str, size: &str) -> String {
    format!("https://images.unsplash.com/photo-{}?{}&fit=crop", photo_id, size)
}

pub fn load() -> SeedData {
    let list: Vec<SkuListItem> = SKU_ROWS
        .iter()
        .enumerate()
        .map(
            |(i, &(code, asin, active, title, qty, photo, total_cost, price))| SkuListItem {
                id: (i + 1).to_string(),
                sku_code: code.to_string(),
                asin: asin.to_string(),
                active: if active { SkuStatus::Active } else { SkuStatus::Inactive },
                fulfilled_by: FulfilledBy::Seller,
                condition: "new-new".to_string(),
                title: title.to_string(),
                qty,
                main_image_url: Some(image_url(photo, "w=100&h=100")),
                total_cost: Decimal::new(total_cost, 2),
                shipping_fee: Decimal::ZERO,
                selling_price: Decimal::new(price, 2),
            },
        )
        .collect();

    let sample = sample_bundle("1");
    let mut details = HashMap::new();
    details.insert(sample.id.clone(), sample);

    SeedData {
        list,
        details,
        fallback: FallbackTemplate {
            bundle_type_id: slug("Rokinon Lens"),
            bundle_type_name: "Rokinon Lens".to_string(),
            primary_line: None,
        },
        catalog: catalog(),
    }
}

fn sample_bundle(id: &str) -> SkuDetail {
    let components = SAMPLE_BUNDLE_LINES
        .iter()
        .map(|&(n, category, component, cost)| SkuComponent {
            id: format!("c-{}", n),
            quantity: 1,
            category_id: slug(category),
            category_name: category.to_string(),
            component_id: format!("comp-{}", n),
            component_name: component.to_string(),
            cost: Decimal::new(cost, 2),
            extended_cost: Decimal::new(cost, 2),
        })
        .collect();

    SkuDetail {
        id: id.to_string(),
        sku_code: "PZ_16M-FX-082619".to_string(),
        bundle_type_id: slug("Rokinon Lens"),
        bundle_type_name: "Rokinon Lens".to_string(),
        components,
        main_image_url: Some(image_url("1617575521317-d2974f3b56d2", "w=400&h=300")),
        title: "Rokinon 16mm F2.0 Aspherical Wide Angle Lens for Fuji X w/Lens Hood + Protective Lens Case, Spider Flex Tripod & Other Accessory Bundle".to_string(),
        description: None,
        component_cost: Decimal::new(29350, 2),
        shipping_fee: Decimal::ZERO,
        selling_price: Decimal::new(38930, 2),
        amazon_fee: Decimal::new(3812, 2),
    }
}

fn catalog() -> Catalog {
    let id_or = |name: &str, fallback: String| {
        let id = slug(name);
        if id.is_empty() {
            fallback
        } else {
            id
        }
    };

    Catalog {
        bundle_types: BUNDLE_TYPES
            .iter()
            .enumerate()
            .map(|(i, name)| BundleType {
                id: id_or(name, format!("b-{}", i)),
                name: name.to_string(),
            })
            .collect(),
        categories: CATEGORIES
            .iter()
            .enumerate()
            .map(|(i, name)| Category {
                id: id_or(name, format!("cat-{}", i)),
                name: name.to_string(),
                sort_order: Some(i as i32),
            })
            .collect(),
        component_options: COMPONENTS
            .iter()
            .enumerate()
            .map(|(i, &(name, category, cost))| ComponentOption {
                id: format!("opt-{}-{}", i, slug(name)),
                name: name.to_string(),
                category_id: slug(category),
                cost: Decimal::new(cost, 2),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug() {
        assert_eq!(slug("Rokinon Lens"), "rokinon-lens");
        assert_eq!(slug("9. Tripod/Monopod"), "9-tripodmonopod");
        assert_eq!(slug("2. Lens/Rokinon"), "2-lensrokinon");
        assert_eq!(slug("Memory Card 64GB"), "memory-card-64gb");
        assert_eq!(slug("!!!"), "");
    }

    #[test]
    fn test_reference_dataset() {
        let seed = load();
        assert_eq!(seed.list.len(), 20);
        assert_eq!(seed.list[0].id, "1");
        assert_eq!(seed.list[0].active, SkuStatus::Inactive);
        assert_eq!(seed.list[19].selling_price, Decimal::new(27995, 2));
        assert_eq!(seed.catalog.bundle_types[0].id, "rokinon-lens");
        assert_eq!(seed.catalog.categories.len(), 11);
        assert_eq!(seed.catalog.component_options[0].id, "opt-0-spider-tripod");
        assert_eq!(seed.catalog.component_options[0].category_id, "9-tripodmonopod");

        let sample = &seed.details["1"];
        assert_eq!(sample.components.len(), 4);
        assert_eq!(sample.components[3].category_id, "2-lensrokinon");
    }
}
