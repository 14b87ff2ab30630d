//! Modal stack for managing overlays
//!
//! Each overlay is an enum variant on a stack instead of a visibility flag.
//! Only the top modal receives input.

use super::form::FormKind;
use super::records::RecordId;

/// Action awaiting a yes/no answer
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmPurpose {
    Quit,
    StartCampaign { id: RecordId, name: String },
    DeleteCampaign { id: RecordId, name: String },
    DeleteContact { id: RecordId, name: String },
    DeleteUser { id: RecordId, name: String },
}

impl ConfirmPurpose {
    pub fn title(&self) -> &'static str {
        match self {
            ConfirmPurpose::Quit => " Quit? ",
            ConfirmPurpose::StartCampaign { .. } => " Start Campaign ",
            ConfirmPurpose::DeleteCampaign { .. } => " Delete Campaign ",
            ConfirmPurpose::DeleteContact { .. } => " Delete Contact ",
            ConfirmPurpose::DeleteUser { .. } => " Delete User ",
        }
    }

    pub fn question(&self) -> String {
        match self {
            ConfirmPurpose::Quit => "Are you sure you want to quit?".to_string(),
            ConfirmPurpose::StartCampaign { name, .. } => {
                format!("Start campaign '{}'? Calls will be placed.", name)
            }
            ConfirmPurpose::DeleteCampaign { name, .. } => format!("Delete campaign '{}'?", name),
            ConfirmPurpose::DeleteContact { name, .. } => format!("Delete contact '{}'?", name),
            ConfirmPurpose::DeleteUser { name, .. } => format!("Delete user '{}'?", name),
        }
    }
}

/// Represents a modal overlay that can be displayed on top of the dashboard
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Create/edit form
    Form(FormKind),
    /// Contact checklist opened from the campaign form
    ContactSelector,
    /// Yes/no confirmation
    Confirm(ConfirmPurpose),
    /// Blocking message
    Alert {
        title: String,
        message: String,
        is_error: bool,
    },
    /// Calls, analytics and version history of one campaign
    CampaignDetail,
    /// Keyboard shortcuts
    Help { scroll_offset: usize },
}

/// A stack of modal overlays
///
/// Modals are rendered from bottom to top, with only the top modal
/// receiving input events.
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Modal> {
        self.stack.last_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Iterate from bottom to top, the order modals are drawn in
    pub fn iter(&self) -> impl Iterator<Item = &Modal> {
        self.stack.iter()
    }

    /// Remove every modal matching `pred`
    pub fn remove_where(&mut self, pred: impl Fn(&Modal) -> bool) {
        self.stack.retain(|m| !pred(m));
    }

    pub fn contains(&self, pred: impl Fn(&Modal) -> bool) -> bool {
        self.stack.iter().any(pred)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(message: &str) -> Modal {
        Modal::Alert {
            title: "t".to_string(),
            message: message.to_string(),
            is_error: false,
        }
    }

    #[test]
    fn test_modal_stack_push_pop() {
        let mut stack = ModalStack::new();
        assert!(stack.top().is_none());

        stack.push(Modal::Form(FormKind::NewCampaign));
        stack.push(Modal::ContactSelector);

        assert_eq!(stack.pop(), Some(Modal::ContactSelector));
        assert_eq!(stack.pop(), Some(Modal::Form(FormKind::NewCampaign)));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_modal_stack_top_mut() {
        let mut stack = ModalStack::new();
        stack.push(Modal::Help { scroll_offset: 0 });

        if let Some(Modal::Help { scroll_offset }) = stack.top_mut() {
            *scroll_offset = 3;
        }

        assert_eq!(stack.top(), Some(&Modal::Help { scroll_offset: 3 }));
    }

    #[test]
    fn test_remove_where_keeps_others_in_order() {
        let mut stack = ModalStack::new();
        stack.push(alert("a"));
        stack.push(Modal::Form(FormKind::NewUser));
        stack.push(alert("b"));

        stack.remove_where(|m| matches!(m, Modal::Form(_)));
        let remaining: Vec<_> = stack.iter().cloned().collect();
        assert_eq!(remaining, vec![alert("a"), alert("b")]);
        assert!(!stack.contains(|m| matches!(m, Modal::Form(_))));
    }

    #[test]
    fn test_confirm_question_names_target() {
        let purpose = ConfirmPurpose::StartCampaign {
            id: RecordId::new("c1"),
            name: "Sale".to_string(),
        };
        assert!(purpose.question().contains("'Sale'"));
    }
}
