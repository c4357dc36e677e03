//! Form domain: registry, values, validation, visibility and the wizard

pub mod definition;
pub mod payload;
pub mod validate;
pub mod visibility;
pub mod wizard;

pub use definition::{application_form, FieldKind, FieldSpec, FormSpec, Pattern};
pub use payload::{serialize_form, FormPayload, FormValues, Value};
pub use validate::{validate_all, validate_step, ValidationResult};
pub use visibility::hidden_fields;
pub use wizard::{Progress, Snapshot, WizardState};
