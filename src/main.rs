use std::path::Path;

use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use catering_quote_rs::catalog::{
    load_cart, open_catalog, save_cart, CartEdit, CartEditor, CatalogManager,
};
use catering_quote_rs::cli::{Cli, Command};
use catering_quote_rs::error::{CostingError, Result};
use catering_quote_rs::interface::{
    display_item_list, display_item_price, display_quote, prompt_cart_line, prompt_catalog_item,
    prompt_edit_action, prompt_markup, prompt_quantity, prompt_yes_no, write_quote_csv,
    EditAction,
};
use catering_quote_rs::models::GroupedCartLine;
use catering_quote_rs::pricing::{group_cart_lines, summarize, PricingConfig, DEFAULT_MARKUP_PCT};

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "catering_quote_rs=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();
    let config = PricingConfig {
        vat_rate: cli.vat_rate,
    };

    if !cli.vat_rate.is_finite() {
        return Err(CostingError::InvalidInput(format!(
            "VAT rate must be a finite percentage, got {}",
            cli.vat_rate
        )));
    }

    match command {
        Command::Quote { csv } => cmd_quote(&cli.catalog, &cli.cart, csv.as_deref()),
        Command::Items => cmd_items(&cli.catalog, &config),
        Command::Price { query } => cmd_price(&cli.catalog, &query, &config),
        Command::Edit => cmd_edit(&cli.catalog, &cli.cart),
    }
}

/// Price the cart and print the quote.
fn cmd_quote(catalog_path: &Path, cart_path: &Path, csv_path: Option<&Path>) -> Result<()> {
    let manager = open_catalog(catalog_path)?;
    let rows = load_cart(cart_path)?;

    let lines = manager.resolve_cart(&rows);
    let grouped = group_cart_lines(&lines);
    let summary = summarize(&grouped);
    debug!(rows = rows.len(), lines = grouped.len(), "Priced cart");

    if summary.unresolved_lines > 0 {
        warn!(
            unresolved = summary.unresolved_lines,
            "Some cart lines could not be priced"
        );
    }

    display_quote(&grouped, &summary);

    if let Some(path) = csv_path {
        write_quote_csv(&grouped, &summary, path)?;
        println!("Quote exported to {}", path.display());
    }

    Ok(())
}

/// List all catalog items.
fn cmd_items(catalog_path: &Path, config: &PricingConfig) -> Result<()> {
    let manager = open_catalog(catalog_path)?;
    display_item_list(&manager.all_items(), config);
    Ok(())
}

/// Show the price of a single item.
fn cmd_price(catalog_path: &Path, query: &str, config: &PricingConfig) -> Result<()> {
    let manager = open_catalog(catalog_path)?;

    let item = match manager.item_by_id(query) {
        Some(item) => item,
        None => manager
            .find_by_name(query)
            .into_iter()
            .next()
            .ok_or_else(|| CostingError::ItemNotFound(query.to_string()))?,
    };

    display_item_price(&item, config);
    Ok(())
}

/// Prompt for the details of one editor action.
///
/// Returns `Ok(None)` when the user cancels, or when the action is `Finish`.
fn prompt_edit(
    action: EditAction,
    manager: &CatalogManager,
    grouped: &[GroupedCartLine],
) -> Result<Option<CartEdit>> {
    let edit = match action {
        EditAction::AddItem => {
            let Some(item) = prompt_catalog_item(manager)? else {
                return Ok(None);
            };
            CartEdit::Add {
                item_type: item.item_type(),
                item_id: item.id().to_string(),
                quantity: prompt_quantity(1)?,
                markup_pct: prompt_markup(DEFAULT_MARKUP_PCT)?,
            }
        }
        EditAction::ChangeQuantity => {
            let Some(index) = prompt_cart_line(grouped)? else {
                return Ok(None);
            };
            let line = grouped[index].clone();
            let quantity = prompt_quantity(line.quantity)?;
            CartEdit::SetQuantity { line, quantity }
        }
        EditAction::ChangeMarkup => {
            let Some(index) = prompt_cart_line(grouped)? else {
                return Ok(None);
            };
            let line = &grouped[index];
            CartEdit::SetMarkup {
                ids: line.raw_line_ids.clone(),
                markup_pct: prompt_markup(line.markup_pct())?,
            }
        }
        EditAction::RemoveLine => {
            let Some(index) = prompt_cart_line(grouped)? else {
                return Ok(None);
            };
            CartEdit::Remove {
                ids: grouped[index].raw_line_ids.clone(),
            }
        }
        EditAction::Finish => return Ok(None),
    };
    Ok(Some(edit))
}

/// Interactive cart editing session.
///
/// Invalid input is reported and the session continues, so earlier edits can
/// still be saved.
fn cmd_edit(catalog_path: &Path, cart_path: &Path) -> Result<()> {
    let manager = open_catalog(catalog_path)?;
    let mut editor = CartEditor::new(load_cart(cart_path)?);
    let mut changed = false;

    loop {
        let grouped = group_cart_lines(&manager.resolve_cart(editor.rows()));
        display_quote(&grouped, &summarize(&grouped));

        let action = prompt_edit_action()?;
        if action == EditAction::Finish {
            break;
        }

        let result = prompt_edit(action, &manager, &grouped)
            .and_then(|edit| edit.map(|e| editor.apply(e)).transpose());

        match result {
            Ok(Some(_)) => changed = true,
            Ok(None) => {}
            Err(CostingError::InvalidInput(msg)) => println!("Not applied: {}", msg),
            Err(e) => return Err(e),
        }
    }

    if changed && prompt_yes_no("Save cart?", true)? {
        save_cart(cart_path, editor.rows())?;
        println!("Cart saved.");
    }

    Ok(())
}
