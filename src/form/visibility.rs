//! Conditional field visibility
//!
//! Visibility is a pure function of the current values, recomputed after
//! restore and after every change. Running it twice with unchanged inputs
//! yields the same set.

use super::definition::{Condition, FormSpec};
use super::payload::FormValues;
use std::collections::HashSet;

/// Names of fields that are currently hidden
pub fn hidden_fields(spec: &FormSpec, values: &FormValues) -> HashSet<&'static str> {
    spec.fields()
        .filter(|field| {
            field
                .shown_when
                .as_ref()
                .is_some_and(|condition| !condition_holds(condition, values))
        })
        .map(|field| field.name)
        .collect()
}

fn condition_holds(condition: &Condition, values: &FormValues) -> bool {
    match condition {
        Condition::CheckboxChecked { group, option } => values.is_option_checked(group, option),
        Condition::RadioIs {
            field,
            value,
            default_when_unset,
        } => match values.selected(field) {
            Some(selected) => selected == *value,
            None => *default_when_unset,
        },
        Condition::FieldEmpty { field } => values.text(field).trim().is_empty(),
    }
}
