//! Admin list-state reconciliation
//!
//! Every admin CRUD screen holds its rows in local memory and reconciles
//! them only from acknowledged server responses: an update is spliced in
//! place, a delete removes the row and closes any detail view showing it.
//! Mutations are never applied optimistically, and the list is not
//! re-synchronized afterwards; a concurrent admin session can leave it
//! stale until the next full reload.

use uuid::Uuid;

use crate::models::{Admission, ContactMessage, Notice};

/// Rows that can live in an admin list
pub trait HasId {
    fn row_id(&self) -> Uuid;
}

impl HasId for Admission {
    fn row_id(&self) -> Uuid {
        self.id
    }
}

impl HasId for ContactMessage {
    fn row_id(&self) -> Uuid {
        self.id
    }
}

impl HasId for Notice {
    fn row_id(&self) -> Uuid {
        self.id
    }
}

/// In-memory list state for one admin CRUD screen
#[derive(Debug, Clone)]
pub struct ListView<T: HasId> {
    rows: Vec<T>,
    open_detail: Option<Uuid>,
}

impl<T: HasId> ListView<T> {
    /// Empty list, nothing loaded yet
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            open_detail: None,
        }
    }

    /// Replace the whole list from a fetch response
    pub fn load(&mut self, rows: Vec<T>) {
        self.rows = rows;
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Open a detail view over an in-memory row; no separate fetch
    pub fn open_detail(&mut self, id: Uuid) -> Option<&T> {
        let row = self.rows.iter().find(|row| row.row_id() == id)?;
        self.open_detail = Some(id);
        Some(row)
    }

    pub fn close_detail(&mut self) {
        self.open_detail = None;
    }

    /// The row currently shown in the detail view, if any
    pub fn detail(&self) -> Option<&T> {
        let id = self.open_detail?;
        self.rows.iter().find(|row| row.row_id() == id)
    }

    /// Splice a server-acknowledged update into the list in place.
    ///
    /// Returns false when the row is no longer present locally.
    pub fn apply_update(&mut self, updated: T) -> bool {
        match self
            .rows
            .iter_mut()
            .find(|row| row.row_id() == updated.row_id())
        {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => false,
        }
    }

    /// Remove a server-acknowledged delete from the list.
    ///
    /// Closes the detail view when it was showing the deleted row.
    pub fn apply_delete(&mut self, id: Uuid) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.row_id() != id);

        if self.open_detail == Some(id) {
            self.open_detail = None;
        }

        self.rows.len() != before
    }
}

impl<T: HasId> Default for ListView<T> {
    fn default() -> Self {
        Self::new()
    }
}
