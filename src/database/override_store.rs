use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::models::{SkuDetail, SkuListItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideKind {
    /// Record exists only here; listed ahead of the base collection.
    Created,
    /// Record replaces the base record with the same id.
    Overridden,
}

#[derive(Debug, Clone)]
pub struct OverrideEntry {
    pub kind: OverrideKind,
    pub detail: SkuDetail,
    pub list_item: SkuListItem,
    pub saved_at: DateTime<Utc>,
}

/// Records created or edited during this session, keyed by id in first-save
/// order.
#[derive(Debug, Default)]
pub struct OverrideStore {
    entries: IndexMap<String, OverrideEntry>,
}

impl OverrideStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&OverrideEntry> {
        self.entries.get(id)
    }

    pub fn detail(&self, id: &str) -> Option<&SkuDetail> {
        self.entries.get(id).map(|entry| &entry.detail)
    }

    /// Insert or replace a record. A replaced record keeps its original
    /// position.
    pub fn upsert(&mut self, kind: OverrideKind, detail: SkuDetail, list_item: SkuListItem) {
        let entry = OverrideEntry {
            kind,
            detail,
            list_item,
            saved_at: Utc::now(),
        };
        self.entries.insert(entry.detail.id.clone(), entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Created records first, then the base with overridden rows swapped in.
    pub fn merge_with_base(&self, base: &[SkuListItem]) -> Vec<SkuListItem> {
        let created = self
            .entries
            .values()
            .filter(|entry| entry.kind == OverrideKind::Created)
            .map(|entry| entry.list_item.clone());

        let from_base = base.iter().map(|item| match self.entries.get(&item.id) {
            Some(entry) if entry.kind == OverrideKind::Overridden => entry.list_item.clone(),
            _ => item.clone(),
        });

        created.chain(from_base).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FulfilledBy, SkuStatus};
    use rust_decimal::Decimal;

    fn row(id: &str, title: &str) -> SkuListItem {
        SkuListItem {
            id: id.to_string(),
            sku_code: format!("CODE-{}", id),
            asin: String::new(),
            active: SkuStatus::Active,
            fulfilled_by: FulfilledBy::Seller,
            condition: "new-new".to_string(),
            title: title.to_string(),
            qty: 0,
            main_image_url: None,
            total_cost: Decimal::ZERO,
            shipping_fee: Decimal::ZERO,
            selling_price: Decimal::ZERO,
        }
    }

    fn detail(id: &str, title: &str) -> SkuDetail {
        SkuDetail {
            id: id.to_string(),
            sku_code: format!("CODE-{}", id),
            bundle_type_id: "rokinon".to_string(),
            bundle_type_name: "Rokinon Lens".to_string(),
            components: Vec::new(),
            main_image_url: None,
            title: title.to_string(),
            description: None,
            component_cost: Decimal::ZERO,
            shipping_fee: Decimal::ZERO,
            selling_price: Decimal::ZERO,
            amazon_fee: Decimal::ZERO,
        }
    }

    fn base() -> Vec<SkuListItem> {
        vec![row("a", "Alpha"), row("b", "Beta"), row("c", "Gamma")]
    }

    #[test]
    fn test_empty_store_returns_base() {
        let store = OverrideStore::new();
        assert_eq!(store.merge_with_base(&base()), base());
        assert!(store.is_empty());
    }

    #[test]
    fn test_override_replaces_single_record() {
        let mut store = OverrideStore::new();
        store.upsert(OverrideKind::Overridden, detail("b", "Beta v2"), row("b", "Beta v2"));

        let merged = store.merge_with_base(&base());
        assert_eq!(merged.len(), 3);
        let matches: Vec<&SkuListItem> = merged.iter().filter(|i| i.id == "b").collect();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].title, "Beta v2");
        assert_eq!(merged[1].id, "b");
    }

    #[test]
    fn test_created_records_are_prepended_in_save_order() {
        let mut store = OverrideStore::new();
        store.upsert(OverrideKind::Created, detail("x", "First"), row("x", "First"));
        store.upsert(OverrideKind::Created, detail("y", "Second"), row("y", "Second"));
        store.upsert(OverrideKind::Created, detail("x", "First again"), row("x", "First again"));

        let merged = store.merge_with_base(&base());
        let ids: Vec<&str> = merged.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["x", "y", "a", "b", "c"]);
        assert_eq!(merged[0].title, "First again");
        assert_eq!(store.len(), 2);
    }
}
