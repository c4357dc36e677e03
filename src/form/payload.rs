//! Form values and the flattened submission payload
//!
//! `FormValues` is the working state of the wizard; `serialize_form` flattens
//! it into the `FormPayload` sent to the server. Checkbox state is normalized
//! to a JSON boolean at this boundary; the legacy `"on"` string is still
//! accepted when restoring old snapshots.

use super::definition::{FieldKind, FormSpec};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A single submitted value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Scalar(String),
    List(Vec<String>),
}

/// Field name to value mapping, as posted to `/api/apply`
pub type FormPayload = BTreeMap<String, Value>;

/// In-progress values for every field, keyed by field name
#[derive(Debug, Clone, Default)]
pub struct FormValues {
    map: HashMap<String, Value>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text value of a field, empty string when unset
    pub fn text(&self, name: &str) -> &str {
        match self.map.get(name) {
            Some(Value::Scalar(s)) => s,
            _ => "",
        }
    }

    pub fn set_text(&mut self, name: &str, value: String) {
        self.map.insert(name.to_string(), Value::Scalar(value));
    }

    pub fn push_char(&mut self, name: &str, c: char) {
        match self.map.get_mut(name) {
            Some(Value::Scalar(s)) => s.push(c),
            _ => {
                self.map
                    .insert(name.to_string(), Value::Scalar(c.to_string()));
            }
        }
    }

    pub fn pop_char(&mut self, name: &str) {
        if let Some(Value::Scalar(s)) = self.map.get_mut(name) {
            s.pop();
        }
    }

    /// Checkbox state; accepts boolean true and the legacy `"on"` scalar
    pub fn is_checked(&self, name: &str) -> bool {
        match self.map.get(name) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Scalar(s)) => s == "on",
            _ => false,
        }
    }

    pub fn set_checked(&mut self, name: &str, checked: bool) {
        self.map.insert(name.to_string(), Value::Bool(checked));
    }

    pub fn toggle_checked(&mut self, name: &str) {
        let next = !self.is_checked(name);
        self.set_checked(name, next);
    }

    /// Selected value of a radio group, if any
    pub fn selected(&self, name: &str) -> Option<&str> {
        match self.map.get(name) {
            Some(Value::Scalar(s)) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    pub fn select(&mut self, name: &str, value: &str) {
        self.map
            .insert(name.to_string(), Value::Scalar(value.to_string()));
    }

    /// Checked option values of a checkbox group, in interaction order
    pub fn group_checked(&self, name: &str) -> &[String] {
        match self.map.get(name) {
            Some(Value::List(values)) => values,
            _ => &[],
        }
    }

    pub fn is_option_checked(&self, name: &str, option: &str) -> bool {
        self.group_checked(name).iter().any(|v| v == option)
    }

    pub fn set_group(&mut self, name: &str, checked: Vec<String>) {
        self.map.insert(name.to_string(), Value::List(checked));
    }

    pub fn toggle_option(&mut self, name: &str, option: &str) {
        let entry = self
            .map
            .entry(name.to_string())
            .or_insert_with(|| Value::List(Vec::new()));
        if !matches!(entry, Value::List(_)) {
            *entry = Value::List(Vec::new());
        }
        if let Value::List(values) = entry {
            if let Some(pos) = values.iter().position(|v| v == option) {
                values.remove(pos);
            } else {
                values.push(option.to_string());
            }
        }
    }
}

/// Flatten the current values into the submission payload.
///
/// Walks every field of the registry in document order. Hidden conditional
/// fields are included: hidden is not disabled in form encoding, and a
/// snapshot has to keep branch values the user may switch back to. Text
/// fields always serialize (possibly empty); checkboxes and radios only
/// when set. A
/// checkbox group with one checked option serializes as a scalar, with
/// several as an ordered list following the registry's option order rather
/// than interaction order.
pub fn serialize_form(spec: &FormSpec, values: &FormValues) -> FormPayload {
    let mut payload = FormPayload::new();

    for field in spec.fields() {
        match &field.kind {
            FieldKind::Text { .. } => {
                payload.insert(
                    field.name.to_string(),
                    Value::Scalar(values.text(field.name).to_string()),
                );
            }
            FieldKind::Checkbox => {
                if values.is_checked(field.name) {
                    payload.insert(field.name.to_string(), Value::Bool(true));
                }
            }
            FieldKind::Radio { .. } => {
                if let Some(selected) = values.selected(field.name) {
                    payload.insert(field.name.to_string(), Value::Scalar(selected.to_string()));
                }
            }
            FieldKind::CheckboxGroup { options } => {
                let checked: Vec<String> = options
                    .iter()
                    .filter(|o| values.is_option_checked(field.name, o.value))
                    .map(|o| o.value.to_string())
                    .collect();
                match checked.len() {
                    0 => {}
                    1 => {
                        payload.insert(
                            field.name.to_string(),
                            Value::Scalar(checked.into_iter().next().unwrap()),
                        );
                    }
                    _ => {
                        payload.insert(field.name.to_string(), Value::List(checked));
                    }
                }
            }
        }
    }

    payload
}
