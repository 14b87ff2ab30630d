//! Form model
//!
//! A form is an ordered list of single-line string fields, the terminal
//! counterpart of an HTML form serialised with `FormData`.

use super::records::{Contact, NewCampaign, RecordId, User};
use super::selection::SelectionSet;
use serde_json::{Map, Value};

/// What a form submits to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormKind {
    NewCampaign,
    NewContact,
    EditContact(RecordId),
    NewUser,
    EditUser(RecordId),
    ImportContacts,
}

impl FormKind {
    pub fn title(&self) -> &'static str {
        match self {
            FormKind::NewCampaign => " New Campaign ",
            FormKind::NewContact => " New Contact ",
            FormKind::EditContact(_) => " Edit Contact ",
            FormKind::NewUser => " New User ",
            FormKind::EditUser(_) => " Edit User ",
            FormKind::ImportContacts => " Import Contacts (CSV) ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    pub value: String,
    pub required: bool,
}

impl FormField {
    fn optional(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            value: String::new(),
            required: false,
        }
    }

    fn required(key: &'static str, label: &'static str) -> Self {
        Self {
            required: true,
            ..Self::optional(key, label)
        }
    }

    fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub fields: Vec<FormField>,
    pub focus: usize,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self { fields, focus: 0 }
    }

    /// Blank form for `kind`, or one pre-filled from a record when editing
    pub fn for_kind(kind: &FormKind) -> Self {
        match kind {
            FormKind::NewCampaign => Self::campaign(),
            FormKind::NewContact | FormKind::EditContact(_) => Self::contact(),
            FormKind::NewUser | FormKind::EditUser(_) => Self::user(),
            FormKind::ImportContacts => Self::import_path(),
        }
    }

    pub fn campaign() -> Self {
        Self::new(vec![
            FormField::required("campaign_name", "Campaign name"),
            FormField::optional("agent_name", "Agent name"),
            FormField::optional("task", "Task / script"),
        ])
    }

    pub fn contact() -> Self {
        Self::new(vec![
            FormField::optional("name", "Name"),
            FormField::optional("phone_number", "Phone number"),
            FormField::optional("company_name", "Company"),
            FormField::optional("email", "Email"),
            FormField::optional("tags", "Tags"),
        ])
    }

    pub fn user() -> Self {
        Self::new(vec![
            FormField::optional("name", "Name"),
            FormField::optional("email", "Email"),
            FormField::optional("phone_number", "Phone number"),
            FormField::optional("business_name", "Business"),
            FormField::optional("password", "Password"),
        ])
    }

    pub fn import_path() -> Self {
        Self::new(vec![FormField::required("path", "CSV file path")])
    }

    pub fn from_contact(contact: &Contact) -> Self {
        Self::new(vec![
            FormField::optional("name", "Name").with_value(&contact.name),
            FormField::optional("phone_number", "Phone number").with_value(&contact.phone_number),
            FormField::optional("company_name", "Company")
                .with_value(contact.company_name.as_deref().unwrap_or_default()),
            FormField::optional("email", "Email")
                .with_value(contact.email.as_deref().unwrap_or_default()),
            FormField::optional("tags", "Tags")
                .with_value(contact.tags.as_deref().unwrap_or_default()),
        ])
    }

    pub fn from_user(user: &User) -> Self {
        Self::new(vec![
            FormField::optional("name", "Name").with_value(&user.name),
            FormField::optional("email", "Email").with_value(&user.email),
            FormField::optional("phone_number", "Phone number").with_value(&user.phone_number),
            FormField::optional("business_name", "Business")
                .with_value(user.business_name.as_deref().unwrap_or_default()),
        ])
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Editing
    // ─────────────────────────────────────────────────────────────────────────

    pub fn input(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
        }
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn prev_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Empty every field and move focus back to the first one
    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
        self.focus = 0;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Serialisation
    // ─────────────────────────────────────────────────────────────────────────

    pub fn value(&self, key: &str) -> &str {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value.as_str())
            .unwrap_or_default()
    }

    /// Label of the first required field left blank
    pub fn missing_required(&self) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|f| f.required && f.value.trim().is_empty())
            .map(|f| f.label)
    }

    /// Raw field map, every field included as a string
    pub fn to_field_map(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .map(|f| (f.key.to_string(), Value::String(f.value.clone())))
            .collect()
    }

    /// Campaign payload from the form plus the staged selection
    pub fn to_new_campaign(&self, selection: &SelectionSet) -> NewCampaign {
        NewCampaign {
            campaign_name: self.value("campaign_name").trim().to_string(),
            agent_name: self.value("agent_name").to_string(),
            task: self.value("task").to_string(),
            contact_list: selection.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_map_contains_every_field() {
        let mut form = Form::contact();
        form.input('A');
        form.next_field();
        form.input('+');
        form.input('1');

        let map = form.to_field_map();
        assert_eq!(map.len(), 5);
        assert_eq!(map["name"], "A");
        assert_eq!(map["phone_number"], "+1");
        assert_eq!(map["company_name"], "");
    }

    #[test]
    fn test_focus_wraps_both_ways() {
        let mut form = Form::campaign();
        form.prev_field();
        assert_eq!(form.focus, 2);
        form.next_field();
        assert_eq!(form.focus, 0);
    }

    #[test]
    fn test_campaign_payload_uses_selection_order() {
        let mut form = Form::campaign();
        for c in "Sale".chars() {
            form.input(c);
        }
        let mut selection = SelectionSet::new();
        selection.toggle(&RecordId::new("2"));
        selection.toggle(&RecordId::new("1"));

        let payload = form.to_new_campaign(&selection);
        assert_eq!(payload.campaign_name, "Sale");
        assert_eq!(payload.contact_list, vec![RecordId::new("2"), RecordId::new("1")]);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["contact_list"], serde_json::json!([2, 1]));
    }

    #[test]
    fn test_missing_required_and_clear() {
        let mut form = Form::campaign();
        assert_eq!(form.missing_required(), Some("Campaign name"));
        form.input('x');
        assert_eq!(form.missing_required(), None);

        form.next_field();
        form.clear();
        assert_eq!(form.value("campaign_name"), "");
        assert_eq!(form.focus, 0);
    }

    #[test]
    fn test_contact_form_prefill() {
        let contact = Contact {
            id: RecordId::new("4"),
            name: "Bo".to_string(),
            phone_number: "+15550100".to_string(),
            company_name: Some("Acme".to_string()),
            email: None,
            tags: None,
            created_at: None,
        };
        let form = Form::from_contact(&contact);
        assert_eq!(form.value("company_name"), "Acme");
        assert_eq!(form.value("email"), "");
    }
}
