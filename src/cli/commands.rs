use anyhow::{Context, Result};
use console::{style, Emoji};
use dialoguer::{theme::ColorfulTheme, Input};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::{
    cli::args::*,
    models::ListQuery,
    services::{BundleEditor, EditorError, SkuService, SkuServiceError},
    utils::{
        calculations::{coerce_money, coerce_quantity},
        config::Config,
        export::export_items,
        formatting::{
            format_bundle_types, format_categories, format_component_options,
            format_page_footer, format_sku_detail, format_sku_table,
        },
    },
};

static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "");
static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️ ", "");
static INFO: Emoji<'_, '_> = Emoji("ℹ️ ", "");
static PACKAGE: Emoji<'_, '_> = Emoji("📦 ", "");

pub struct CliApp {
    sku_service: Arc<SkuService>,
}

impl CliApp {
    pub fn new(config: &Config) -> Result<Self> {
        let sku_service = SkuService::from_config(config)
            .context("Failed to initialize SKU backend")?;

        Ok(Self {
            sku_service: Arc::new(sku_service),
        })
    }

    pub async fn run(&self, args: Args) -> Result<()> {
        match args.command {
            Commands::List { page, page_size, search, sort_by, desc } => {
                self.handle_list(page, page_size, search, sort_by, desc).await
            }
            Commands::Show { id } => self.handle_show(&id).await,
            Commands::Create { edit } => self.handle_create(edit).await,
            Commands::Edit { id, edit } => self.handle_edit(&id, edit).await,
            Commands::Rename { id, code } => self.handle_rename(&id, code).await,
            Commands::BundleTypes => self.handle_bundle_types().await,
            Commands::Categories => self.handle_categories().await,
            Commands::Components { category } => self.handle_components(category).await,
            Commands::Export { format, output, search, all } => {
                self.handle_export(format, output, search, all).await
            }
        }
    }

    async fn handle_list(
        &self,
        page: u32,
        page_size: Option<u32>,
        search: Option<String>,
        sort_by: Option<SortColumn>,
        desc: bool,
    ) -> Result<()> {
        let mut query = ListQuery::new(page, page_size.unwrap_or(0));
        if let Some(search) = search {
            query = query.with_search(search);
        }
        if let Some(column) = sort_by {
            query = query.with_sort(column.field(), sort_order(desc));
        }

        match self.sku_service.list_skus(query).await {
            Ok(response) => {
                if response.records.is_empty() {
                    println!("{} No SKUs found", INFO);
                } else {
                    println!("{}", format_sku_table(&response.records));
                }
                println!("{}", format_page_footer(&response));
            }
            Err(e) => {
                println!("{} Failed to list SKUs: {}", CROSS, style(&e).red());
                error!("Failed to list SKUs: {}", e);
            }
        }

        Ok(())
    }

    async fn handle_show(&self, id: &str) -> Result<()> {
        match self.sku_service.get_sku(id).await {
            Ok(Some(detail)) => {
                println!("{} {}", PACKAGE, style("SKU Details").bold().cyan());
                println!("{}", format_sku_detail(&detail));
            }
            Ok(None) => {
                println!("{} SKU '{}' not found", WARNING, style(id).yellow());
            }
            Err(e) => {
                println!("{} Failed to load SKU: {}", CROSS, style(&e).red());
                error!("Failed to load SKU {}: {}", id, e);
            }
        }

        Ok(())
    }

    async fn handle_create(&self, edit: EditArgs) -> Result<()> {
        let editor = self
            .sku_service
            .new_editor()
            .await
            .context("Failed to load bundle catalog")?;
        self.apply_and_save(editor, edit).await
    }

    async fn handle_edit(&self, id: &str, edit: EditArgs) -> Result<()> {
        let editor = match self.sku_service.edit_sku(id).await {
            Ok(Some(editor)) => editor,
            Ok(None) => {
                println!("{} SKU '{}' not found", WARNING, style(id).yellow());
                return Ok(());
            }
            Err(e) => {
                println!("{} Failed to load SKU: {}", CROSS, style(&e).red());
                error!("Failed to load SKU {}: {}", id, e);
                return Ok(());
            }
        };
        self.apply_and_save(editor, edit).await
    }

    async fn apply_and_save(&self, mut editor: BundleEditor, edit: EditArgs) -> Result<()> {
        if let Err(e) = apply_edits(&mut editor, &edit) {
            println!("{} {}", CROSS, style(&e).red());
            warn!("Edit rejected: {}", e);
            return Ok(());
        }

        if edit.dry_run {
            println!("{} {}", INFO, style("Dry run, nothing saved").bold().yellow());
            println!("{}", format_sku_detail(&editor.preview()));
            return Ok(());
        }

        match self.sku_service.save_sku(editor.to_save_request()).await {
            Ok(saved) => {
                println!("{} SKU saved successfully!", CHECKMARK);
                println!("{}", format_sku_detail(&saved));
                info!("SKU saved: {}", saved.id);
            }
            Err(SkuServiceError::ValidationError { message }) => {
                println!("{} {}", CROSS, style(message).red());
            }
            Err(e) => {
                println!("{} {}", CROSS, style(&e).red());
                error!("{}", e);
            }
        }

        Ok(())
    }

    async fn handle_rename(&self, id: &str, code: Option<String>) -> Result<()> {
        let new_code = match code {
            Some(code) => code,
            None => {
                let current = match self.sku_service.get_sku(id).await {
                    Ok(Some(detail)) => detail.sku_code,
                    Ok(None) => {
                        println!("{} SKU '{}' not found", WARNING, style(id).yellow());
                        return Ok(());
                    }
                    Err(e) => {
                        println!("{} Failed to load SKU: {}", CROSS, style(&e).red());
                        return Ok(());
                    }
                };

                let theme = ColorfulTheme::default();
                Input::with_theme(&theme)
                    .with_prompt("New SKU Code")
                    .with_initial_text(current)
                    .validate_with(|input: &String| -> Result<(), &str> {
                        if input.trim().is_empty() {
                            Err("SKU Code is required")
                        } else {
                            Ok(())
                        }
                    })
                    .interact_text()?
            }
        };

        match self.sku_service.rename_sku_code(id, &new_code).await {
            Ok(response) => {
                println!(
                    "{} SKU code updated to {}",
                    CHECKMARK,
                    style(&response.sku_code).green()
                );
            }
            Err(e) => {
                println!("{} {}", CROSS, style(&e).red());
            }
        }

        Ok(())
    }

    async fn handle_bundle_types(&self) -> Result<()> {
        match self.sku_service.list_bundle_types().await {
            Ok(types) => println!("{}", format_bundle_types(&types)),
            Err(e) => println!("{} Failed to load bundle types: {}", CROSS, style(&e).red()),
        }
        Ok(())
    }

    async fn handle_categories(&self) -> Result<()> {
        match self.sku_service.list_categories().await {
            Ok(categories) => println!("{}", format_categories(&categories)),
            Err(e) => println!("{} Failed to load categories: {}", CROSS, style(&e).red()),
        }
        Ok(())
    }

    async fn handle_components(&self, category: Option<String>) -> Result<()> {
        match self.sku_service.list_component_options(category.as_deref()).await {
            Ok(options) if options.is_empty() => println!("{} No components found", INFO),
            Ok(options) => println!("{}", format_component_options(&options)),
            Err(e) => println!("{} Failed to load components: {}", CROSS, style(&e).red()),
        }
        Ok(())
    }

    async fn handle_export(
        &self,
        format: ExportFormatArg,
        output: Option<PathBuf>,
        search: Option<String>,
        all: bool,
    ) -> Result<()> {
        let items = if all {
            self.sku_service.list_all_skus(search).await?
        } else {
            let mut query = ListQuery::new(1, 0);
            query.search = search;
            self.sku_service.list_skus(query).await?.records
        };

        export_items(&items, format.into(), output.as_deref())
            .context("Failed to export SKUs")?;

        if let Some(path) = output {
            println!(
                "{} Exported {} SKUs to {}",
                CHECKMARK,
                items.len(),
                style(path.display()).cyan()
            );
        }

        Ok(())
    }
}

/// Apply header flags and line operations to the editor.
pub fn apply_edits(editor: &mut BundleEditor, edit: &EditArgs) -> Result<(), EditorError> {
    if let Some(code) = &edit.code {
        editor.set_sku_code(code.as_str());
    }
    if let Some(bundle_type) = &edit.bundle_type {
        editor.set_bundle_type(bundle_type)?;
    }
    if let Some(title) = &edit.title {
        editor.set_title(title.as_str());
    }
    if edit.description.is_some() {
        editor.set_description(edit.description.clone());
    }
    if edit.image.is_some() {
        editor.set_main_image_url(edit.image.clone());
    }
    if let Some(fee) = &edit.shipping_fee {
        editor.set_shipping_fee(coerce_money(fee));
    }
    if let Some(price) = &edit.selling_price {
        editor.set_selling_price(coerce_money(price));
    }

    for raw in &edit.add {
        let (component, qty) = parse_component_arg(raw);
        editor.add_component(component, qty.map(coerce_quantity).unwrap_or(1))?;
    }
    if edit.add_line {
        editor.add_line();
    }
    for line in &edit.remove {
        editor.remove_line(line.trim())?;
    }

    for (line, category) in edit.category.iter().filter_map(|raw| parse_assignment(raw)) {
        editor.select_category(line, category)?;
    }
    for (line, component) in edit.component.iter().filter_map(|raw| parse_assignment(raw)) {
        editor.select_component(line, component)?;
    }
    for (line, qty) in edit.qty.iter().filter_map(|raw| parse_assignment(raw)) {
        editor.set_quantity(line, coerce_quantity(qty))?;
    }
    for (line, cost) in edit.cost.iter().filter_map(|raw| parse_assignment(raw)) {
        editor.set_unit_cost(line, coerce_money(cost))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::repositories::MockSkuRepository;
    use crate::utils::config::MockDataset;
    use rust_decimal::Decimal;

    fn service() -> SkuService {
        SkuService::new(
            Arc::new(MockSkuRepository::new(MockDataset::Generated)),
            &Config::default(),
        )
    }

    #[tokio::test]
    async fn test_apply_edits_coerces_numbers() {
        let service = service();
        let mut editor = service.edit_sku("sku-pz-16m").await.unwrap().unwrap();

        let edit = EditArgs {
            qty: vec!["c2=abc".to_string()],
            cost: vec!["c1=-4".to_string()],
            selling_price: Some("oops".to_string()),
            ..Default::default()
        };
        apply_edits(&mut editor, &edit).unwrap();

        assert_eq!(editor.line("c2").unwrap().quantity, 1);
        assert_eq!(editor.line("c1").unwrap().unit_cost, Decimal::ZERO);
        assert_eq!(editor.selling_price(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_apply_edits_unknown_line() {
        let service = service();
        let mut editor = service.new_editor().await.unwrap();

        let edit = EditArgs {
            remove: vec!["c9".to_string()],
            ..Default::default()
        };
        assert_eq!(
            apply_edits(&mut editor, &edit),
            Err(EditorError::LineNotFound("c9".to_string()))
        );
    }
}
