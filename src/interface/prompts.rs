use dialoguer::{Confirm, Input, Select};

use crate::catalog::CatalogManager;
use crate::error::{CostingError, Result};
use crate::interface::render::format_markup;
use crate::models::{CatalogItem, GroupedCartLine};

/// Actions offered by the interactive cart editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    AddItem,
    ChangeQuantity,
    ChangeMarkup,
    RemoveLine,
    Finish,
}

impl EditAction {
    const ALL: [EditAction; 5] = [
        EditAction::AddItem,
        EditAction::ChangeQuantity,
        EditAction::ChangeMarkup,
        EditAction::RemoveLine,
        EditAction::Finish,
    ];

    fn label(&self) -> &'static str {
        match self {
            EditAction::AddItem => "Add item",
            EditAction::ChangeQuantity => "Change quantity",
            EditAction::ChangeMarkup => "Change markup",
            EditAction::RemoveLine => "Remove line",
            EditAction::Finish => "Finish",
        }
    }
}

/// Prompt for the next editor action.
pub fn prompt_edit_action() -> Result<EditAction> {
    let labels: Vec<&str> = EditAction::ALL.iter().map(|a| a.label()).collect();
    let selection = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(EditAction::ALL[selection])
}

/// Prompt for a catalog item by id or name, with fuzzy matching.
///
/// Returns `None` when the user gives up.
pub fn prompt_catalog_item(manager: &CatalogManager) -> Result<Option<CatalogItem>> {
    loop {
        let input: String = Input::new()
            .with_prompt("Item id or name (or press Enter to cancel)")
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }

        let candidates = manager.find_by_name(input);

        if candidates.is_empty() {
            println!("No matching item found for '{}'", input);
            continue;
        }

        if candidates.len() == 1 {
            let item = &candidates[0];
            let confirm = Confirm::new()
                .with_prompt(format!("Use '{}' ({})?", item.name(), item.item_type()))
                .default(true)
                .interact()?;

            if confirm {
                return Ok(Some(item.clone()));
            }
            continue;
        }

        // Multiple matches - let user select
        let mut options: Vec<String> = candidates
            .iter()
            .take(5)
            .map(|i| format!("{} ({})", i.name(), i.item_type()))
            .collect();
        let shown = options.len();
        options.push("None of these".to_string());

        let selection = Select::new()
            .with_prompt("Which did you mean?")
            .items(&options)
            .default(0)
            .interact()?;

        if selection < shown {
            return Ok(Some(candidates[selection].clone()));
        }
    }
}

/// Parse a markup percentage. Negative values are accepted as discounts.
pub fn parse_markup(input: &str) -> Result<f64> {
    let markup: f64 = input
        .trim()
        .parse()
        .map_err(|_| CostingError::InvalidInput(format!("'{}' is not a number", input.trim())))?;

    if !markup.is_finite() {
        return Err(CostingError::InvalidInput("Markup must be finite".to_string()));
    }
    Ok(markup)
}

/// Parse a unit count.
pub fn parse_quantity(input: &str) -> Result<u32> {
    input
        .trim()
        .parse()
        .map_err(|_| CostingError::InvalidInput(format!("'{}' is not a valid quantity", input.trim())))
}

/// Prompt for a markup percentage, asking again until the input parses.
pub fn prompt_markup(default: f64) -> Result<f64> {
    let input: String = Input::new()
        .with_prompt("Markup (%)")
        .default(format!("{}", default))
        .validate_with(|input: &String| parse_markup(input).map(|_| ()))
        .interact_text()?;

    let markup = parse_markup(&input)?;
    if markup < 0.0 {
        println!("Note: negative markup acts as a discount.");
    }

    Ok(markup)
}

/// Prompt for a unit count, asking again until the input parses.
pub fn prompt_quantity(default: u32) -> Result<u32> {
    let input: String = Input::new()
        .with_prompt("Quantity")
        .default(default.to_string())
        .validate_with(|input: &String| parse_quantity(input).map(|_| ()))
        .interact_text()?;

    parse_quantity(&input)
}

/// Prompt for one of the grouped cart lines.
pub fn prompt_cart_line(lines: &[GroupedCartLine]) -> Result<Option<usize>> {
    if lines.is_empty() {
        println!("Cart is empty.");
        return Ok(None);
    }

    let mut options: Vec<String> = lines
        .iter()
        .map(|l| {
            format!(
                "{} x {} ({})",
                l.quantity,
                l.name.as_deref().unwrap_or(l.item_id()),
                format_markup(l.markup_pct())
            )
        })
        .collect();
    options.push("Cancel".to_string());

    let selection = Select::new()
        .with_prompt("Which line?")
        .items(&options)
        .default(0)
        .interact()?;

    Ok((selection < lines.len()).then_some(selection))
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
