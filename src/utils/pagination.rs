use std::cmp::Ordering;

use crate::models::{PaginatedResponse, SkuListItem, SortField, SortOrder};

pub const DEFAULT_MAX_PAGE_SIZE: u32 = 100;

pub fn clamp_page_size(page_size: u32, max_page_size: u32) -> u32 {
    page_size.clamp(1, max_page_size.max(1))
}

pub fn total_pages(total: usize, page_size: u32) -> usize {
    let page_size = page_size.max(1) as usize;
    total.div_ceil(page_size).max(1)
}

/// Slice one 1-indexed page out of `items`. Pages past the end, and page 0,
/// come back empty.
pub fn paginate<T: Clone>(items: &[T], page: u32, page_size: u32) -> PaginatedResponse<T> {
    let total = items.len();
    let size = page_size.max(1) as usize;
    let records = match (page as usize).checked_sub(1) {
        Some(index) => items
            .iter()
            .skip(index.saturating_mul(size))
            .take(size)
            .cloned()
            .collect(),
        None => Vec::new(),
    };

    PaginatedResponse {
        records,
        total,
        page,
        page_size,
        total_pages: total_pages(total, page_size),
    }
}

/// Case-insensitive substring search over code, asin and title.
pub fn filter_by_search(items: Vec<SkuListItem>, search: Option<&str>) -> Vec<SkuListItem> {
    let term = match search.map(str::trim) {
        Some(term) if !term.is_empty() => term.to_lowercase(),
        _ => return items,
    };

    items
        .into_iter()
        .filter(|item| item.matches_search(&term))
        .collect()
}

/// Stable sort, so equal keys keep their merged order.
pub fn sort_items(items: &mut [SkuListItem], field: SortField, order: SortOrder) {
    items.sort_by(|a, b| {
        let ordering = compare_by(a, b, field);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

fn compare_by(a: &SkuListItem, b: &SkuListItem, field: SortField) -> Ordering {
    match field {
        SortField::SkuCode => a.sku_code.to_lowercase().cmp(&b.sku_code.to_lowercase()),
        SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortField::Qty => a.qty.cmp(&b.qty),
        SortField::TotalCost => a.total_cost.cmp(&b.total_cost),
        SortField::SellingPrice => a.selling_price.cmp(&b.selling_price),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FulfilledBy, SkuStatus};
    use rust_decimal::Decimal;

    fn item(id: &str, code: &str, title: &str, price: i64) -> SkuListItem {
        SkuListItem {
            id: id.to_string(),
            sku_code: code.to_string(),
            asin: format!("B0{}", id),
            active: SkuStatus::Active,
            fulfilled_by: FulfilledBy::Seller,
            condition: "new-new".to_string(),
            title: title.to_string(),
            qty: 0,
            main_image_url: None,
            total_cost: Decimal::ZERO,
            shipping_fee: Decimal::ZERO,
            selling_price: Decimal::from(price),
        }
    }

    #[test]
    fn test_page_math_for_five_records() {
        let items: Vec<u32> = (1..=5).collect();

        let first = paginate(&items, 1, 2);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.total, 5);
        assert_eq!(first.records, vec![1, 2]);

        let last = paginate(&items, 3, 2);
        assert_eq!(last.records, vec![5]);

        let past_end = paginate(&items, 4, 2);
        assert!(past_end.records.is_empty());
        assert_eq!(past_end.total_pages, 3);
        assert_eq!(past_end.page, 4);
    }

    #[test]
    fn test_page_zero_is_empty() {
        let items: Vec<u32> = (1..=5).collect();
        assert!(paginate(&items, 0, 2).records.is_empty());
    }

    #[test]
    fn test_empty_collection_has_one_page() {
        let items: Vec<u32> = Vec::new();
        let page = paginate(&items, 1, 10);
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 1);
        assert!(page.records.is_empty());
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let items: Vec<u32> = (1..=5).collect();
        assert!(paginate(&items, u32::MAX, 100).records.is_empty());
    }

    #[test]
    fn test_clamp_page_size() {
        assert_eq!(clamp_page_size(0, 100), 1);
        assert_eq!(clamp_page_size(10, 100), 10);
        assert_eq!(clamp_page_size(500, 100), 100);
    }

    #[test]
    fn test_search_is_case_insensitive_and_trimmed() {
        let items = vec![
            item("1", "PZ_16M-FX", "Rokinon 16mm F2.0 Aspherical Wide Angle Lens", 389),
            item("2", "31-WWKU-ZW4Z", "Canon EOS R5", 3899),
        ];

        let found = filter_by_search(items.clone(), Some("  ROKINON "));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "1");

        let by_code = filter_by_search(items.clone(), Some("wwku"));
        assert_eq!(by_code[0].id, "2");

        let by_asin = filter_by_search(items.clone(), Some("b02"));
        assert_eq!(by_asin[0].id, "2");

        assert_eq!(filter_by_search(items.clone(), Some("   ")).len(), 2);
        assert_eq!(filter_by_search(items.clone(), None).len(), 2);
        assert!(filter_by_search(items, Some("nikon")).is_empty());
    }

    #[test]
    fn test_sort_items() {
        let mut items = vec![
            item("1", "B", "beta", 20),
            item("2", "a", "alpha", 10),
            item("3", "C", "gamma", 20),
        ];

        sort_items(&mut items, SortField::SkuCode, SortOrder::Asc);
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1", "3"]);

        sort_items(&mut items, SortField::SellingPrice, SortOrder::Desc);
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3", "2"]);
    }
}
