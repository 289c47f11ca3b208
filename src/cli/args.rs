use clap::{Parser, Subcommand, ValueEnum};
use std::fmt;
use std::path::PathBuf;

use crate::models::{SortField, SortOrder};
use crate::utils::export::ExportFormat;

#[derive(Parser)]
#[command(name = "sku-admin")]
#[command(about = "Manage SKU bundles: browse, edit component lines and track cost")]
#[command(version)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Load environment variables from this file instead of .env
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List SKUs, one page at a time
    List {
        #[arg(short, long, default_value_t = 1)]
        page: u32,
        /// Records per page (defaults to DEFAULT_PAGE_SIZE)
        #[arg(long)]
        page_size: Option<u32>,
        /// Match against SKU code, ASIN or title
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long)]
        sort_by: Option<SortColumn>,
        /// Sort descending
        #[arg(long, requires = "sort_by")]
        desc: bool,
    },
    /// Show a SKU with its component lines
    Show {
        id: String,
    },
    /// Create a new SKU bundle
    Create {
        #[command(flatten)]
        edit: EditArgs,
    },
    /// Edit an existing SKU bundle
    Edit {
        id: String,
        #[command(flatten)]
        edit: EditArgs,
    },
    /// Change the SKU code of a record
    Rename {
        id: String,
        /// New code; prompted for when omitted
        #[arg(short, long)]
        code: Option<String>,
    },
    /// List bundle types
    BundleTypes,
    /// List component categories
    Categories,
    /// List purchasable components
    Components {
        /// Only components in this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Export the SKU list
    Export {
        #[arg(short, long, default_value_t = ExportFormatArg::Csv)]
        format: ExportFormatArg,
        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long)]
        search: Option<String>,
        /// Export every page instead of the first one
        #[arg(short, long)]
        all: bool,
    },
}

/// Header fields and line operations shared by `create` and `edit`.
///
/// Line operations run in this order: additions, removals, then per-line
/// changes (category, component, quantity, cost).
#[derive(clap::Args, Debug, Default)]
pub struct EditArgs {
    #[arg(long)]
    pub code: Option<String>,
    #[arg(long)]
    pub bundle_type: Option<String>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub image: Option<String>,
    #[arg(long)]
    pub shipping_fee: Option<String>,
    #[arg(long)]
    pub selling_price: Option<String>,

    /// Add a line for a component: COMPONENT[:QTY]
    #[arg(long = "add", value_name = "COMPONENT[:QTY]")]
    pub add: Vec<String>,
    /// Add a line with the default component
    #[arg(long)]
    pub add_line: bool,
    #[arg(long = "remove", value_name = "LINE")]
    pub remove: Vec<String>,
    #[arg(long = "category", value_name = "LINE=CATEGORY")]
    pub category: Vec<String>,
    #[arg(long = "component", value_name = "LINE=COMPONENT")]
    pub component: Vec<String>,
    #[arg(long = "qty", value_name = "LINE=QTY")]
    pub qty: Vec<String>,
    #[arg(long = "cost", value_name = "LINE=COST")]
    pub cost: Vec<String>,

    /// Print the recomputed bundle without saving
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SortColumn {
    Code,
    Title,
    Qty,
    Cost,
    Price,
}

impl SortColumn {
    pub fn field(self) -> SortField {
        match self {
            SortColumn::Code => SortField::SkuCode,
            SortColumn::Title => SortField::Title,
            SortColumn::Qty => SortField::Qty,
            SortColumn::Cost => SortField::TotalCost,
            SortColumn::Price => SortField::SellingPrice,
        }
    }
}

pub fn sort_order(desc: bool) -> SortOrder {
    if desc {
        SortOrder::Desc
    } else {
        SortOrder::Asc
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportFormatArg {
    Csv,
    Json,
}

impl fmt::Display for ExportFormatArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormatArg::Csv => write!(f, "csv"),
            ExportFormatArg::Json => write!(f, "json"),
        }
    }
}

impl From<ExportFormatArg> for ExportFormat {
    fn from(arg: ExportFormatArg) -> Self {
        match arg {
            ExportFormatArg::Csv => ExportFormat::Csv,
            ExportFormatArg::Json => ExportFormat::Json,
        }
    }
}

/// Split `LINE=VALUE`.
pub fn parse_assignment(raw: &str) -> Option<(&str, &str)> {
    let (line, value) = raw.split_once('=')?;
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    Some((line, value.trim()))
}

/// Split `COMPONENT[:QTY]`; a missing quantity is 1.
pub fn parse_component_arg(raw: &str) -> (&str, Option<&str>) {
    match raw.rsplit_once(':') {
        Some((component, qty)) => (component.trim(), Some(qty.trim())),
        None => (raw.trim(), None),
    }
}
