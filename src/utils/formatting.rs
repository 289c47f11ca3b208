use console::style;
use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

use crate::models::{
    BundleType, Category, ComponentOption, PaginatedResponse, SkuComponent, SkuDetail,
    SkuListItem, SkuStatus,
};
use crate::utils::calculations::format_currency;

#[derive(Tabled)]
struct SkuTableRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "SKU Code")]
    sku_code: String,
    #[tabled(rename = "ASIN")]
    asin: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Fulfilled By")]
    fulfilled_by: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Qty")]
    qty: u32,
    #[tabled(rename = "Total Cost")]
    total_cost: String,
    #[tabled(rename = "Shipping")]
    shipping_fee: String,
    #[tabled(rename = "Price")]
    selling_price: String,
}

#[derive(Tabled)]
struct ComponentTableRow {
    #[tabled(rename = "Line")]
    id: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Component")]
    component: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Unit Cost")]
    cost: String,
    #[tabled(rename = "Extended")]
    extended_cost: String,
}

#[derive(Tabled)]
struct ComponentOptionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category_id: String,
    #[tabled(rename = "Cost")]
    cost: String,
}

#[derive(Tabled)]
struct BundleTypeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Order")]
    sort_order: String,
}

pub fn format_sku_table(items: &[SkuListItem]) -> String {
    if items.is_empty() {
        return String::new();
    }

    let rows: Vec<SkuTableRow> = items
        .iter()
        .map(|item| SkuTableRow {
            id: item.id.clone(),
            sku_code: item.sku_code.clone(),
            asin: if item.asin.is_empty() {
                "-".to_string()
            } else {
                item.asin.clone()
            },
            status: format_status(item.active),
            fulfilled_by: item.fulfilled_by.to_string(),
            title: truncate(&item.title, 40),
            qty: item.qty,
            total_cost: format_currency(item.total_cost),
            shipping_fee: format_currency(item.shipping_fee),
            selling_price: format_currency(item.selling_price),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Alignment::left())
        .modify(Columns::new(6..), Alignment::right());

    table.to_string()
}

pub fn format_page_footer<T>(page: &PaginatedResponse<T>) -> String {
    format!(
        "Page {} of {} ({} records, {} per page)",
        style(page.page).cyan(),
        style(page.total_pages).cyan(),
        style(page.total).bold(),
        page.page_size
    )
}

pub fn format_component_table(components: &[SkuComponent]) -> String {
    let rows: Vec<ComponentTableRow> = components
        .iter()
        .map(|c| ComponentTableRow {
            id: c.id.clone(),
            category: dash_if_empty(&c.category_name),
            component: dash_if_empty(&c.component_name),
            quantity: c.quantity,
            cost: format_currency(c.cost),
            extended_cost: format_currency(c.extended_cost),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Alignment::left())
        .modify(Columns::new(3..), Alignment::right());

    table.to_string()
}

pub fn format_sku_detail(detail: &SkuDetail) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}: {}\n", style("ID").bold(), style(&detail.id).cyan()));
    output.push_str(&format!(
        "{}: {}\n",
        style("SKU Code").bold(),
        style(&detail.sku_code).green()
    ));
    output.push_str(&format!(
        "{}: {} ({})\n",
        style("Bundle Type").bold(),
        detail.bundle_type_name,
        style(&detail.bundle_type_id).dim()
    ));
    output.push_str(&format!("{}: {}\n", style("Title").bold(), detail.title));

    if let Some(description) = &detail.description {
        output.push_str(&format!(
            "{}: {}\n",
            style("Description").bold(),
            style(description).dim()
        ));
    }

    if let Some(url) = &detail.main_image_url {
        output.push_str(&format!("{}: {}\n", style("Image").bold(), truncate(url, 80)));
    }

    if detail.components.is_empty() {
        output.push_str(&format!("{}\n", style("No component lines").yellow()));
    } else {
        output.push_str(&format_component_table(&detail.components));
        output.push('\n');
    }

    output.push_str(&format!(
        "{}: {}\n",
        style("Component Cost").bold(),
        style(format_currency(detail.component_cost)).yellow()
    ));
    output.push_str(&format!(
        "{}: {}\n",
        style("Shipping Fee").bold(),
        format_currency(detail.shipping_fee)
    ));
    output.push_str(&format!(
        "{}: {}\n",
        style("Selling Price").bold(),
        style(format_currency(detail.selling_price)).green()
    ));
    output.push_str(&format!(
        "{}: {}\n",
        style("Amazon Fee").bold(),
        format_currency(detail.amazon_fee)
    ));

    output
}

pub fn format_bundle_types(bundle_types: &[BundleType]) -> String {
    let rows: Vec<BundleTypeRow> = bundle_types
        .iter()
        .map(|b| BundleTypeRow {
            id: b.id.clone(),
            name: b.name.clone(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

pub fn format_categories(categories: &[Category]) -> String {
    let rows: Vec<CategoryRow> = categories
        .iter()
        .map(|c| CategoryRow {
            id: c.id.clone(),
            name: c.name.clone(),
            sort_order: c
                .sort_order
                .map(|o| o.to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

pub fn format_component_options(options: &[ComponentOption]) -> String {
    let rows: Vec<ComponentOptionRow> = options
        .iter()
        .map(|o| ComponentOptionRow {
            id: o.id.clone(),
            name: o.name.clone(),
            category_id: o.category_id.clone(),
            cost: format_currency(o.cost),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::single(3), Alignment::right());
    table.to_string()
}

fn format_status(status: SkuStatus) -> String {
    match status {
        SkuStatus::Active => style("Active").green().to_string(),
        SkuStatus::Inactive => style("Inactive").dim().to_string(),
    }
}

fn dash_if_empty(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

/// Shorten to `max` characters, marking the cut with "...".
pub fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let kept: String = value.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}
