//! Ordered pantry inventory with stable entry identities.
//!
//! Position in the sequence is meaningful (it is what the user sees), so
//! entries live in a `Vec` in display order. Each entry also carries an
//! [`EntryId`] assigned when it enters the inventory; edits and removals can
//! address entries by id, which stays valid while positions shift.

use thiserror::Error;

use crate::models::{EntryId, InventoryEntry, InventoryField};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InventoryError {
    #[error("Inventory entry not found: {0}")]
    UnknownEntry(EntryId),

    #[error("Inventory position {index} out of range (length {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    entries: Vec<(EntryId, InventoryEntry)>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = InventoryEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|entry| (EntryId::new(), entry))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &InventoryEntry)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }

    /// Snapshot of the entries in display order, as sent over the wire.
    pub fn to_entries(&self) -> Vec<InventoryEntry> {
        self.entries.iter().map(|(_, entry)| entry.clone()).collect()
    }

    pub fn get(&self, id: EntryId) -> Option<&InventoryEntry> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, entry)| entry)
    }

    /// Current position of `id`; changes whenever an earlier entry is removed.
    pub fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|(entry_id, _)| *entry_id == id)
    }

    pub fn id_at(&self, index: usize) -> Option<EntryId> {
        self.entries.get(index).map(|(id, _)| *id)
    }

    pub fn entry_at(&self, index: usize) -> Option<&InventoryEntry> {
        self.entries.get(index).map(|(_, entry)| entry)
    }

    /// Appends without any key check; duplicate item names are allowed here.
    pub fn push(&mut self, entry: InventoryEntry) -> EntryId {
        let id = EntryId::new();
        self.entries.push((id, entry));
        id
    }

    /// Reconciles `detected` into this inventory.
    ///
    /// Each detected entry, left to right, overwrites the quantity of the
    /// first entry with the same item name, or is appended if none exists.
    /// Later detections see earlier ones, so for duplicate detected keys the
    /// last one wins.
    pub fn merge(&mut self, detected: &[InventoryEntry]) {
        for found in detected {
            match self
                .entries
                .iter_mut()
                .find(|(_, entry)| entry.item == found.item)
            {
                Some((_, entry)) => entry.quantity = found.quantity.clone(),
                None => {
                    self.push(found.clone());
                }
            }
        }
    }

    pub fn edit(
        &mut self,
        id: EntryId,
        field: InventoryField,
        value: impl Into<String>,
    ) -> Result<(), InventoryError> {
        let index = self.position(id).ok_or(InventoryError::UnknownEntry(id))?;
        self.edit_at(index, field, value)
    }

    pub fn edit_at(
        &mut self,
        index: usize,
        field: InventoryField,
        value: impl Into<String>,
    ) -> Result<(), InventoryError> {
        let len = self.entries.len();
        let (_, entry) = self
            .entries
            .get_mut(index)
            .ok_or(InventoryError::IndexOutOfRange { index, len })?;
        match field {
            InventoryField::Item => entry.item = value.into(),
            InventoryField::Quantity => entry.quantity = value.into(),
        }
        Ok(())
    }

    pub fn remove(&mut self, id: EntryId) -> Result<InventoryEntry, InventoryError> {
        let index = self.position(id).ok_or(InventoryError::UnknownEntry(id))?;
        self.remove_at(index)
    }

    /// Removes by position; every later entry moves down by one.
    pub fn remove_at(&mut self, index: usize) -> Result<InventoryEntry, InventoryError> {
        if index >= self.entries.len() {
            return Err(InventoryError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index).1)
    }
}

/// Pure reconciliation of a detected list into an existing one.
///
/// See [`Inventory::merge`] for the rule.
pub fn merge_detected(
    existing: &[InventoryEntry],
    detected: &[InventoryEntry],
) -> Vec<InventoryEntry> {
    let mut inventory = Inventory::from_entries(existing.iter().cloned());
    inventory.merge(detected);
    inventory.to_entries()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(item: &str, quantity: &str) -> InventoryEntry {
        InventoryEntry::new(item, quantity)
    }

    #[test]
    fn test_merge_overwrites_in_place_and_appends() {
        let existing = vec![entry("egg", "6")];
        let detected = vec![entry("egg", "12"), entry("milk", "1L")];

        let merged = merge_detected(&existing, &detected);
        assert_eq!(merged, vec![entry("egg", "12"), entry("milk", "1L")]);
    }

    #[test]
    fn test_merge_keeps_positions() {
        let existing = vec![entry("rice", "1kg"), entry("egg", "6"), entry("oil", "1L")];
        let merged = merge_detected(&existing, &[entry("egg", "2")]);

        assert_eq!(
            merged,
            vec![entry("rice", "1kg"), entry("egg", "2"), entry("oil", "1L")]
        );
    }

    #[test]
    fn test_merge_is_idempotent_without_duplicates() {
        let existing = vec![entry("egg", "6"), entry("flour", "2kg")];
        let detected = vec![entry("milk", "1L"), entry("egg", "12")];

        let once = merge_detected(&existing, &detected);
        let twice = merge_detected(&once, &detected);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_merge_duplicate_detected_keys_last_wins() {
        let detected = vec![entry("apple", "3"), entry("apple", "5")];
        let merged = merge_detected(&[], &detected);

        assert_eq!(merged, vec![entry("apple", "5")]);
    }

    #[test]
    fn test_merge_key_is_case_sensitive() {
        let merged = merge_detected(&[entry("Egg", "6")], &[entry("egg", "12")]);
        assert_eq!(merged, vec![entry("Egg", "6"), entry("egg", "12")]);
    }

    #[test]
    fn test_merge_updates_first_of_manual_duplicates() {
        let mut inventory = Inventory::new();
        inventory.push(entry("egg", "6"));
        inventory.push(entry("egg", "2"));

        inventory.merge(&[entry("egg", "10")]);
        assert_eq!(
            inventory.to_entries(),
            vec![entry("egg", "10"), entry("egg", "2")]
        );
    }

    #[test]
    fn test_merge_preserves_ids_of_updated_entries() {
        let mut inventory = Inventory::new();
        let egg = inventory.push(entry("egg", "6"));

        inventory.merge(&[entry("egg", "12"), entry("milk", "1L")]);
        assert_eq!(inventory.get(egg), Some(&entry("egg", "12")));
        assert_eq!(inventory.len(), 2);
    }

    #[test]
    fn test_remove_at_shifts_positions() {
        let mut inventory =
            Inventory::from_entries(vec![entry("a", "1"), entry("b", "2"), entry("c", "3")]);
        let b = inventory.id_at(1).unwrap();

        inventory.remove_at(0).unwrap();

        // what used to be at 1 is now at 0; index 1 now names "c"
        assert_eq!(inventory.entry_at(0), Some(&entry("b", "2")));
        assert_eq!(inventory.entry_at(1), Some(&entry("c", "3")));
        assert_eq!(inventory.position(b), Some(0));
    }

    #[test]
    fn test_edit_by_id_survives_removal() {
        let mut inventory =
            Inventory::from_entries(vec![entry("a", "1"), entry("b", "2"), entry("c", "3")]);
        let c = inventory.id_at(2).unwrap();

        inventory.remove_at(0).unwrap();
        inventory.edit(c, InventoryField::Quantity, "30").unwrap();

        assert_eq!(inventory.get(c), Some(&entry("c", "30")));
        assert_eq!(inventory.entry_at(0), Some(&entry("b", "2")));
    }

    #[test]
    fn test_edit_item_name() {
        let mut inventory = Inventory::from_entries(vec![entry("tomatoe", "4")]);
        inventory.edit_at(0, InventoryField::Item, "tomato").unwrap();
        assert_eq!(inventory.entry_at(0), Some(&entry("tomato", "4")));
    }

    #[test]
    fn test_unknown_id_and_bad_index() {
        let mut inventory = Inventory::from_entries(vec![entry("a", "1")]);
        let a = inventory.id_at(0).unwrap();
        inventory.remove(a).unwrap();

        assert_eq!(
            inventory.remove(a).unwrap_err(),
            InventoryError::UnknownEntry(a)
        );
        assert_eq!(
            inventory
                .edit_at(3, InventoryField::Item, "x")
                .unwrap_err(),
            InventoryError::IndexOutOfRange { index: 3, len: 0 }
        );
    }
}
