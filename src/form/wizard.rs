//! Wizard step controller
//!
//! `WizardState` owns the current step index, the field values and the
//! per-field error slots. Navigation forward is gated by the step validator;
//! navigation backward never is. The state is plain data so the TUI layer is
//! only an adapter around it.

use super::definition::{FieldKind, FieldSpec, FormSpec, Pattern};
use super::payload::{serialize_form, FormValues};
use super::validate::{validate_all, validate_step, ValidationResult};
use super::visibility::hidden_fields;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// The persisted form state: flattened field values plus the step index
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
    #[serde(rename = "currentStep", default)]
    pub current_step: usize,
}

/// Progress display derived from the current step
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub label: String,
    pub section: &'static str,
    pub fraction: f64,
    pub back_enabled: bool,
    pub next_visible: bool,
    pub submit_visible: bool,
}

/// State of the multi-step form
#[derive(Debug, Clone)]
pub struct WizardState {
    spec: FormSpec,
    pub values: FormValues,
    errors: HashMap<String, String>,
    current_step: usize,
    active_field: usize,
}

impl WizardState {
    pub fn new(spec: FormSpec) -> Self {
        Self {
            spec,
            values: FormValues::new(),
            errors: HashMap::new(),
            current_step: 0,
            active_field: 0,
        }
    }

    pub fn spec(&self) -> &FormSpec {
        &self.spec
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn step_count(&self) -> usize {
        self.spec.step_count()
    }

    pub fn section_label(&self) -> &'static str {
        self.spec
            .step(self.current_step)
            .map(|s| s.section)
            .unwrap_or("")
    }

    pub fn progress(&self) -> Progress {
        let total = self.step_count();
        let number = self.current_step + 1;
        Progress {
            label: format!("Step {number} of {total}"),
            section: self.section_label(),
            fraction: number as f64 / total as f64,
            back_enabled: self.current_step > 0,
            next_visible: self.current_step < total - 1,
            submit_visible: self.current_step == total - 1,
        }
    }

    /// Make the given step the only visible one. The index is not clamped
    /// here; callers clamp before handing over an out-of-range value.
    pub fn show_step(&mut self, index: usize) {
        self.current_step = index;
        self.active_field = 0;
    }

    /// Move forward if the active step validates. Returns true when the
    /// step changed.
    pub fn advance(&mut self) -> bool {
        let result = validate_step(&self.spec, &self.values, self.current_step);
        let valid = result.is_valid();
        self.apply_validation(&result);
        if valid && self.current_step < self.step_count() - 1 {
            self.show_step(self.current_step + 1);
            return true;
        }
        false
    }

    /// Move backward unconditionally, stopping at the first step
    pub fn retreat(&mut self) {
        self.show_step(self.current_step.saturating_sub(1));
    }

    /// Validate every step, record all errors and jump to the first failing
    /// step. Returns that step's index, or None when the whole form is valid.
    pub fn validate_full(&mut self) -> Option<usize> {
        let (results, first_invalid) = validate_all(&self.spec, &self.values);
        for result in &results {
            self.apply_validation(result);
        }
        if let Some(step) = first_invalid {
            self.show_step(step);
        }
        first_invalid
    }

    fn apply_validation(&mut self, result: &ValidationResult) {
        for (name, message) in result.errors() {
            self.errors.insert(name.clone(), message.clone());
        }
    }

    /// Error text for a field, empty string when clean
    pub fn error(&self, name: &str) -> &str {
        self.errors.get(name).map(String::as_str).unwrap_or("")
    }

    /// Fields of the current step that are not hidden by a condition
    pub fn visible_fields(&self) -> Vec<&FieldSpec> {
        let hidden = hidden_fields(&self.spec, &self.values);
        self.spec
            .step(self.current_step)
            .map(|step| {
                step.fields
                    .iter()
                    .filter(|f| !hidden.contains(f.name))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Index of the focused field within the visible fields
    pub fn active_field_index(&self) -> usize {
        let count = self.visible_fields().len();
        if count == 0 {
            0
        } else {
            self.active_field.min(count - 1)
        }
    }

    pub fn active_field(&self) -> Option<&FieldSpec> {
        let index = self.active_field_index();
        self.visible_fields().into_iter().nth(index)
    }

    pub fn next_field(&mut self) {
        self.blur_active_field();
        let count = self.visible_fields().len();
        if count > 0 {
            self.active_field = (self.active_field_index() + 1) % count;
        }
    }

    pub fn prev_field(&mut self) {
        self.blur_active_field();
        let count = self.visible_fields().len();
        if count > 0 {
            let current = self.active_field_index();
            self.active_field = if current == 0 { count - 1 } else { current - 1 };
        }
    }

    /// Leaving an Instagram-handle field enforces the leading `@`
    fn blur_active_field(&mut self) {
        let handle_field = self.active_field().and_then(|field| {
            match field.rule.pattern {
                Some((Pattern::InstagramHandle, _)) => Some(field.name),
                _ => None,
            }
        });
        if let Some(name) = handle_field {
            self.normalize_handle(name);
        }
    }

    /// Prepend `@` to a non-empty handle that lacks one
    pub fn normalize_handle(&mut self, name: &str) {
        let value = self.values.text(name).trim().to_string();
        if value.is_empty() {
            return;
        }
        if !value.starts_with('@') {
            self.values.set_text(name, format!("@{value}"));
        }
    }

    /// Capture the persisted snapshot of the current state
    pub fn snapshot(&self) -> Snapshot {
        let payload = serialize_form(&self.spec, &self.values);
        let fields = payload
            .into_iter()
            .map(|(name, value)| {
                let json = serde_json::to_value(value).unwrap_or(serde_json::Value::Null);
                (name, json)
            })
            .collect();
        Snapshot {
            fields,
            current_step: self.current_step,
        }
    }

    /// Restore a previously persisted snapshot. Unknown keys are ignored,
    /// values that do not fit their control are skipped and the step index
    /// is clamped into range.
    pub fn restore_from(&mut self, snapshot: &Snapshot) {
        for (name, json) in &snapshot.fields {
            let Some(field) = self.spec.field(name) else {
                continue;
            };
            match &field.kind {
                FieldKind::Text { .. } => {
                    if let serde_json::Value::String(s) = json {
                        self.values.set_text(field.name, s.clone());
                    }
                }
                FieldKind::Checkbox => {
                    let checked = json == &serde_json::Value::Bool(true)
                        || json == &serde_json::Value::String("on".to_string());
                    self.values.set_checked(field.name, checked);
                }
                FieldKind::Radio { options } => {
                    if let serde_json::Value::String(s) = json {
                        if options.iter().any(|o| o.value == s) {
                            self.values.select(field.name, s);
                        }
                    }
                }
                FieldKind::CheckboxGroup { options } => {
                    let entries: Vec<String> = match json {
                        serde_json::Value::String(s) => vec![s.clone()],
                        serde_json::Value::Array(items) => items
                            .iter()
                            .filter_map(|v| v.as_str().map(str::to_string))
                            .collect(),
                        _ => continue,
                    };
                    let checked: Vec<String> = entries
                        .into_iter()
                        .filter(|v| options.iter().any(|o| o.value == *v))
                        .collect();
                    self.values.set_group(field.name, checked);
                }
            }
        }
        self.show_step(snapshot.current_step.min(self.step_count() - 1));
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new(super::definition::application_form())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wizard() -> WizardState {
        WizardState::default()
    }

    mod step_controller {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_initial_state() {
            let w = wizard();
            assert_eq!(w.current_step(), 0);
            assert_eq!(w.step_count(), 7);
            assert_eq!(w.section_label(), "Brand Information");
        }

        #[test]
        fn test_progress_label_for_every_step() {
            let mut w = wizard();
            for i in 0..w.step_count() {
                w.show_step(i);
                let progress = w.progress();
                assert_eq!(progress.label, format!("Step {} of 7", i + 1));
            }
        }

        #[test]
        fn test_nav_visibility_on_first_and_last_step() {
            let mut w = wizard();
            let progress = w.progress();
            assert!(!progress.back_enabled);
            assert!(progress.next_visible);
            assert!(!progress.submit_visible);

            w.show_step(6);
            let progress = w.progress();
            assert!(progress.back_enabled);
            assert!(!progress.next_visible);
            assert!(progress.submit_visible);
        }

        #[test]
        fn test_progress_fraction_is_complete_on_last_step() {
            let mut w = wizard();
            w.show_step(6);
            assert!((w.progress().fraction - 1.0).abs() < f64::EPSILON);
        }

        #[test]
        fn test_advance_blocked_by_invalid_step() {
            let mut w = wizard();
            assert!(!w.advance());
            assert_eq!(w.current_step(), 0);
            assert!(!w.error("brandName").is_empty());
        }

        #[test]
        fn test_advance_moves_past_valid_step() {
            let mut w = wizard();
            w.values.set_text("brandName", "Atelier North".to_string());
            w.values.set_text("websiteUrl", "atelier-north.com".to_string());
            w.values
                .set_text("contactEmail", "hello@atelier-north.com".to_string());
            assert!(w.advance());
            assert_eq!(w.current_step(), 1);
        }

        #[test]
        fn test_retreat_is_unconditional_and_clamped_at_zero() {
            let mut w = wizard();
            w.show_step(3);
            w.retreat();
            assert_eq!(w.current_step(), 2);
            w.show_step(0);
            w.retreat();
            assert_eq!(w.current_step(), 0);
        }

        #[test]
        fn test_validate_full_jumps_to_first_invalid_step() {
            let mut w = wizard();
            w.show_step(5);
            let first = w.validate_full();
            assert_eq!(first, Some(0));
            assert_eq!(w.current_step(), 0);
        }
    }

    mod field_focus {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_next_field_wraps_over_visible_fields() {
            let mut w = wizard();
            let count = w.visible_fields().len();
            assert_eq!(w.active_field_index(), 0);
            for _ in 0..count {
                w.next_field();
            }
            assert_eq!(w.active_field_index(), 0);
        }

        #[test]
        fn test_prev_field_wraps_to_last() {
            let mut w = wizard();
            let count = w.visible_fields().len();
            w.prev_field();
            assert_eq!(w.active_field_index(), count - 1);
        }

        #[test]
        fn test_hidden_fields_are_not_focusable() {
            let w = wizard();
            // instagramHandle is on the hidden branch by default
            assert!(w.visible_fields().iter().all(|f| f.name != "instagramHandle"));
        }

        #[test]
        fn test_blur_normalizes_instagram_handle() {
            let mut w = wizard();
            w.show_step(5);
            w.values.select("preEventFeature", "yes");
            // Focus brandInstagram and type a handle without the @
            w.next_field();
            w.values.set_text("brandInstagram", "mybrand".to_string());
            w.next_field();
            assert_eq!(w.values.text("brandInstagram"), "@mybrand");
        }

        #[test]
        fn test_normalize_keeps_existing_at() {
            let mut w = wizard();
            w.values.set_text("brandInstagram", "@mybrand".to_string());
            w.normalize_handle("brandInstagram");
            assert_eq!(w.values.text("brandInstagram"), "@mybrand");
        }

        #[test]
        fn test_normalize_ignores_empty_value() {
            let mut w = wizard();
            w.normalize_handle("brandInstagram");
            assert_eq!(w.values.text("brandInstagram"), "");
        }
    }

    mod snapshots {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_roundtrip_restores_values_and_step() {
            let mut w = wizard();
            w.values.set_text("brandName", "Atelier North".to_string());
            w.values.toggle_option("requirements", "rack");
            w.values.toggle_option("requirements", "power");
            w.values.select("packageType", "premium");
            w.values.set_checked("acknowledgement", true);
            w.show_step(4);

            let snapshot = w.snapshot();
            let mut restored = wizard();
            restored.restore_from(&snapshot);

            assert_eq!(restored.current_step(), 4);
            assert_eq!(restored.values.text("brandName"), "Atelier North");
            assert!(restored.values.is_option_checked("requirements", "rack"));
            assert!(restored.values.is_option_checked("requirements", "power"));
            assert_eq!(restored.values.selected("packageType"), Some("premium"));
            assert!(restored.values.is_checked("acknowledgement"));
        }

        #[test]
        fn test_roundtrip_keeps_values_on_hidden_branch() {
            let mut w = wizard();
            w.values.select("websiteType", "instagram");
            w.values.set_text("instagramHandle", "@mybrand".to_string());
            // Switching back hides the handle field but must not erase it
            w.values.select("websiteType", "website");

            let snapshot = w.snapshot();
            let mut restored = wizard();
            restored.restore_from(&snapshot);

            assert_eq!(restored.values.text("instagramHandle"), "@mybrand");
            restored.values.select("websiteType", "instagram");
            assert!(restored
                .visible_fields()
                .iter()
                .any(|f| f.name == "instagramHandle"));
        }

        #[test]
        fn test_restore_clamps_out_of_range_step() {
            let snapshot = Snapshot {
                fields: BTreeMap::new(),
                current_step: 42,
            };
            let mut w = wizard();
            w.restore_from(&snapshot);
            assert_eq!(w.current_step(), 6);
        }

        #[test]
        fn test_restore_ignores_unknown_keys_and_bad_shapes() {
            let mut fields = BTreeMap::new();
            fields.insert("noSuchField".to_string(), serde_json::json!("x"));
            fields.insert("brandName".to_string(), serde_json::json!(12));
            fields.insert("packageType".to_string(), serde_json::json!("gold"));
            let snapshot = Snapshot {
                fields,
                current_step: 0,
            };

            let mut w = wizard();
            w.restore_from(&snapshot);
            assert_eq!(w.values.text("brandName"), "");
            assert_eq!(w.values.selected("packageType"), None);
        }

        #[test]
        fn test_restore_accepts_legacy_on_checkbox() {
            let mut fields = BTreeMap::new();
            fields.insert("acknowledgement".to_string(), serde_json::json!("on"));
            let snapshot = Snapshot {
                fields,
                current_step: 0,
            };

            let mut w = wizard();
            w.restore_from(&snapshot);
            assert!(w.values.is_checked("acknowledgement"));
        }

        #[test]
        fn test_restore_single_group_scalar() {
            let mut fields = BTreeMap::new();
            fields.insert("requirements".to_string(), serde_json::json!("table"));
            let snapshot = Snapshot {
                fields,
                current_step: 0,
            };

            let mut w = wizard();
            w.restore_from(&snapshot);
            assert!(w.values.is_option_checked("requirements", "table"));
        }

        #[test]
        fn test_snapshot_serializes_flat() {
            let mut w = wizard();
            w.values.set_text("brandName", "North".to_string());
            w.show_step(2);

            let json = serde_json::to_value(w.snapshot()).unwrap();
            assert_eq!(json["brandName"], serde_json::json!("North"));
            assert_eq!(json["currentStep"], serde_json::json!(2));
        }

        #[test]
        fn test_snapshot_parses_without_current_step() {
            let snapshot: Snapshot = serde_json::from_str(r#"{"brandName":"North"}"#).unwrap();
            assert_eq!(snapshot.current_step, 0);
        }
    }
}
