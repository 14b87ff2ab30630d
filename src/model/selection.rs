//! Contact selection staged for a new campaign

use super::records::RecordId;

/// Ordered set of selected contact ids
///
/// Iteration follows selection order, which is also the order of the
/// `contact_list` sent when the campaign is created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: Vec<RecordId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Flip membership of `id`, returning whether it is now selected
    pub fn toggle(&mut self, id: &RecordId) -> bool {
        if let Some(pos) = self.ids.iter().position(|existing| existing == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id.clone());
            true
        }
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn to_vec(&self) -> Vec<RecordId> {
        self.ids.clone()
    }

    /// Human-readable count shown under the campaign form
    pub fn summary(&self) -> String {
        format!("{} contacts selected.", self.ids.len())
    }
}
