use std::collections::HashSet;

use tracing::debug;
use uuid::Uuid;

use crate::error::{CostingError, Result};
use crate::models::{CartRow, GroupedCartLine, ItemType};

/// One batch change to the cart rows.
#[derive(Debug, Clone, PartialEq)]
pub enum CartEdit {
    Add {
        item_type: ItemType,
        item_id: String,
        markup_pct: f64,
        quantity: u32,
    },
    SetQuantity {
        line: GroupedCartLine,
        quantity: u32,
    },
    SetMarkup {
        ids: Vec<String>,
        markup_pct: f64,
    },
    Remove {
        ids: Vec<String>,
    },
}

/// In-memory cart rows with the batch operations the cart store accepts.
///
/// Rows are physical units; quantities only exist in the grouped view.
#[derive(Debug, Clone, Default)]
pub struct CartEditor {
    rows: Vec<CartRow>,
}

impl CartEditor {
    pub fn new(rows: Vec<CartRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[CartRow] {
        &self.rows
    }

    /// Apply one edit. Returns how many rows were added, removed or changed.
    ///
    /// A rejected edit leaves the rows untouched.
    pub fn apply(&mut self, edit: CartEdit) -> Result<usize> {
        match edit {
            CartEdit::Add {
                item_type,
                item_id,
                markup_pct,
                quantity,
            } => Ok(self
                .add_units(item_type, &item_id, markup_pct, quantity)?
                .len()),
            CartEdit::SetQuantity { line, quantity } => {
                Ok(self.set_quantity(&line, quantity)?.len())
            }
            CartEdit::SetMarkup { ids, markup_pct } => self.update_markup(&ids, markup_pct),
            CartEdit::Remove { ids } => Ok(self.remove_rows(&ids)),
        }
    }

    /// Append `count` new rows for an item. Returns the new row ids.
    pub fn add_units(
        &mut self,
        item_type: ItemType,
        item_id: &str,
        markup_pct: f64,
        count: u32,
    ) -> Result<Vec<String>> {
        validate_markup(markup_pct)?;

        let ids: Vec<String> = (0..count).map(|_| Uuid::new_v4().to_string()).collect();
        for id in &ids {
            self.rows.push(CartRow {
                id: id.clone(),
                item_type,
                item_id: item_id.to_string(),
                markup_pct,
            });
        }

        debug!(item = %item_id, count, "Added cart rows");
        Ok(ids)
    }

    /// Remove rows by id. Returns how many were removed.
    pub fn remove_rows(&mut self, ids: &[String]) -> usize {
        let targets: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let before = self.rows.len();
        self.rows.retain(|r| !targets.contains(r.id.as_str()));
        before - self.rows.len()
    }

    /// Bring a grouped line to `quantity` units by adding or removing rows.
    ///
    /// Removal takes the last-listed raw rows first. Returns the ids of rows
    /// added or removed.
    pub fn set_quantity(&mut self, line: &GroupedCartLine, quantity: u32) -> Result<Vec<String>> {
        let current = line.raw_line_ids.len() as u32;

        if quantity > current {
            return self.add_units(
                line.item_type,
                line.item_id(),
                line.markup_pct(),
                quantity - current,
            );
        }

        let surplus = (current - quantity) as usize;
        let removed: Vec<String> = line.raw_line_ids.iter().rev().take(surplus).cloned().collect();
        self.remove_rows(&removed);
        Ok(removed)
    }

    /// Set the markup on the given rows. Returns how many rows changed.
    pub fn update_markup(&mut self, ids: &[String], markup_pct: f64) -> Result<usize> {
        validate_markup(markup_pct)?;

        let targets: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let mut updated = 0;
        for row in self.rows.iter_mut().filter(|r| targets.contains(r.id.as_str())) {
            row.markup_pct = markup_pct;
            updated += 1;
        }
        Ok(updated)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Markup must be a finite number. Negative values are allowed (discounts).
fn validate_markup(markup_pct: f64) -> Result<()> {
    if markup_pct.is_finite() {
        Ok(())
    } else {
        Err(CostingError::InvalidInput(format!(
            "markup must be a finite percentage, got {}",
            markup_pct
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CartLine, CatalogItem, ServiceRecord};
    use crate::pricing::group_cart_lines;

    fn grouped(editor: &CartEditor) -> Vec<GroupedCartLine> {
        let service = CatalogItem::Service(ServiceRecord {
            id: "waiter".to_string(),
            name: "Waiter".to_string(),
            price_net: 20.0,
        });
        let lines: Vec<CartLine> = editor
            .rows()
            .iter()
            .map(|r| CartLine::from_row(r, Some(service.clone())))
            .collect();
        group_cart_lines(&lines)
    }

    #[test]
    fn test_add_units() {
        let mut editor = CartEditor::default();
        let ids = editor.add_units(ItemType::Service, "waiter", 10.0, 3).unwrap();
        assert_eq!(ids.len(), 3);
        assert_eq!(editor.len(), 3);
        assert_eq!(grouped(&editor)[0].quantity, 3);
    }

    #[test]
    fn test_add_units_rejects_nan_markup() {
        let mut editor = CartEditor::default();
        let result = editor.add_units(ItemType::Service, "waiter", f64::NAN, 1);
        assert!(matches!(result, Err(CostingError::InvalidInput(_))));
        assert!(editor.is_empty());
    }

    #[test]
    fn test_set_quantity_grows_and_shrinks() {
        let mut editor = CartEditor::default();
        editor.add_units(ItemType::Service, "waiter", 0.0, 2).unwrap();

        let line = grouped(&editor).remove(0);
        let added = editor.set_quantity(&line, 5).unwrap();
        assert_eq!(added.len(), 3);
        assert_eq!(grouped(&editor)[0].quantity, 5);

        let line = grouped(&editor).remove(0);
        let removed = editor.set_quantity(&line, 1).unwrap();
        assert_eq!(removed.len(), 4);
        assert_eq!(editor.len(), 1);
        assert_eq!(editor.rows()[0].id, line.raw_line_ids[0]);
    }

    #[test]
    fn test_update_markup_splits_group() {
        let mut editor = CartEditor::default();
        let ids = editor.add_units(ItemType::Service, "waiter", 10.0, 3).unwrap();

        let changed = editor.update_markup(&ids[..1], 20.0).unwrap();
        assert_eq!(changed, 1);

        let groups = grouped(&editor);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].quantity, 1);
        assert_eq!(groups[0].markup_pct(), 20.0);
        assert_eq!(groups[1].quantity, 2);
    }

    #[test]
    fn test_rejected_edit_keeps_earlier_edits() {
        let mut editor = CartEditor::default();
        let added = editor
            .apply(CartEdit::Add {
                item_type: ItemType::Service,
                item_id: "waiter".to_string(),
                markup_pct: 10.0,
                quantity: 2,
            })
            .unwrap();
        assert_eq!(added, 2);
        let before = editor.rows().to_vec();

        let result = editor.apply(CartEdit::SetMarkup {
            ids: before.iter().map(|r| r.id.clone()).collect(),
            markup_pct: f64::INFINITY,
        });
        assert!(matches!(result, Err(CostingError::InvalidInput(_))));
        assert_eq!(editor.rows(), before.as_slice());

        // The session can carry on after the rejected edit
        let line = grouped(&editor).remove(0);
        assert_eq!(editor.apply(CartEdit::SetQuantity { line, quantity: 3 }).unwrap(), 1);
        assert_eq!(editor.len(), 3);
    }

    #[test]
    fn test_apply_remove() {
        let mut editor = CartEditor::default();
        let ids = editor.add_units(ItemType::Service, "waiter", 0.0, 2).unwrap();
        assert_eq!(editor.apply(CartEdit::Remove { ids }).unwrap(), 2);
        assert!(editor.is_empty());
    }

    #[test]
    fn test_remove_rows() {
        let mut editor = CartEditor::default();
        let ids = editor.add_units(ItemType::Service, "waiter", 0.0, 2).unwrap();
        assert_eq!(editor.remove_rows(&ids), 2);
        assert!(editor.is_empty());
    }
}
