use std::fmt;

use serde::{Deserialize, Serialize};

use super::{FreelancerRow, IncomeRow, PermanentRow};

/// Opaque identity of a row, independent of its position in the list.
///
/// Identifiers are assigned in increasing order and are never handed out again
/// after the row they named has been removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowId(u64);

impl RowId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowEntry {
    pub id: RowId,
    pub row: IncomeRow,
}

/// Ordered list of income rows. Insertion order is display order.
///
/// Only built through [`RowList::push`] or [`FromIterator`], so the id
/// counter always stays ahead of every id it has handed out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RowList {
    entries: Vec<RowEntry>,
    next_id: u64,
}

impl RowList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `row` at the end of the list and returns its fresh identity.
    pub fn push(
        &mut self,
        row: impl Into<IncomeRow>,
    ) -> RowId {
        self.next_id += 1;
        let id = RowId(self.next_id);
        self.entries.push(RowEntry {
            id,
            row: row.into(),
        });
        id
    }

    /// Removes the row at `index`, shifting later rows down by one.
    /// Returns `None` when `index` is out of bounds.
    pub fn remove(
        &mut self,
        index: usize,
    ) -> Option<RowEntry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    pub fn get(
        &self,
        index: usize,
    ) -> Option<&RowEntry> {
        self.entries.get(index)
    }

    pub fn get_mut(
        &mut self,
        index: usize,
    ) -> Option<&mut IncomeRow> {
        self.entries.get_mut(index).map(|entry| &mut entry.row)
    }

    /// Current position of the row with identity `id`.
    pub fn position(
        &self,
        id: RowId,
    ) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RowEntry> {
        self.entries.iter()
    }

    pub fn rows(&self) -> impl Iterator<Item = &IncomeRow> {
        self.entries.iter().map(|entry| &entry.row)
    }

    /// Permanent rows only, in list order.
    pub fn permanents(&self) -> impl Iterator<Item = &PermanentRow> {
        self.rows().filter_map(|row| match row {
            IncomeRow::Permanent(row) => Some(row),
            IncomeRow::Freelancer(_) => None,
        })
    }

    /// Freelancer rows only, in list order.
    pub fn freelancers(&self) -> impl Iterator<Item = &FreelancerRow> {
        self.rows().filter_map(|row| match row {
            IncomeRow::Freelancer(row) => Some(row),
            IncomeRow::Permanent(_) => None,
        })
    }
}

impl FromIterator<IncomeRow> for RowList {
    fn from_iter<I: IntoIterator<Item = IncomeRow>>(iter: I) -> Self {
        let mut list = Self::new();
        for row in iter {
            list.push(row);
        }
        list
    }
}

impl<'a> IntoIterator for &'a RowList {
    type Item = &'a RowEntry;
    type IntoIter = std::slice::Iter<'a, RowEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
