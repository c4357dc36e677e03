//! Data-driven step validation
//!
//! Rules come from the field registry, so validation is one generic pass
//! instead of hand-written per-step conditionals. Hidden conditional fields
//! are skipped; their error slots are still cleared.

use super::definition::{FieldKind, FormSpec, Pattern};
use super::payload::FormValues;
use super::visibility::hidden_fields;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}$").expect("year regex"));
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

/// Outcome of validating one step: an error slot for every field of the
/// step, where the empty string means "no error"
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    errors: HashMap<String, String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.values().all(|message| message.is_empty())
    }

    /// Error message for a field, empty string when clean or unknown
    pub fn error(&self, name: &str) -> &str {
        self.errors.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn errors(&self) -> &HashMap<String, String> {
        &self.errors
    }

    fn clear(&mut self, name: &str) {
        self.errors.insert(name.to_string(), String::new());
    }

    fn fail(&mut self, name: &str, message: &str) {
        self.errors.insert(name.to_string(), message.to_string());
    }
}

/// Validate one step of the form
pub fn validate_step(spec: &FormSpec, values: &FormValues, step: usize) -> ValidationResult {
    let mut result = ValidationResult::default();
    let Some(step_spec) = spec.step(step) else {
        return result;
    };
    let hidden = hidden_fields(spec, values);

    for field in &step_spec.fields {
        // Previous error text is cleared for every slot, hidden ones included
        result.clear(field.name);
        if hidden.contains(field.name) {
            continue;
        }

        match &field.kind {
            FieldKind::Text { .. } => {
                let value = values.text(field.name).trim();
                if value.is_empty() {
                    if let Some(message) = field.rule.required {
                        result.fail(field.name, message);
                    } else if let Some((min, message)) = field.rule.min_len {
                        if min > 0 {
                            result.fail(field.name, message);
                        }
                    }
                    continue;
                }
                if let Some((min, message)) = field.rule.min_len {
                    if value.chars().count() < min {
                        result.fail(field.name, message);
                        continue;
                    }
                }
                if let Some((pattern, message)) = field.rule.pattern {
                    if !matches_pattern(pattern, value) {
                        result.fail(field.name, message);
                    }
                }
            }
            FieldKind::Checkbox => {
                if let Some(message) = field.rule.required {
                    if !values.is_checked(field.name) {
                        result.fail(field.name, message);
                    }
                }
            }
            FieldKind::Radio { .. } => {
                if let Some(message) = field.rule.required {
                    if values.selected(field.name).is_none() {
                        result.fail(field.name, message);
                    }
                }
            }
            // Checkbox groups are optional across the form
            FieldKind::CheckboxGroup { .. } => {}
        }
    }

    result
}

/// Validate every step; returns the per-step results and the index of the
/// first failing step, if any
pub fn validate_all(
    spec: &FormSpec,
    values: &FormValues,
) -> (Vec<ValidationResult>, Option<usize>) {
    let results: Vec<ValidationResult> = (0..spec.step_count())
        .map(|step| validate_step(spec, values, step))
        .collect();
    let first_invalid = results.iter().position(|r| !r.is_valid());
    (results, first_invalid)
}

fn matches_pattern(pattern: Pattern, value: &str) -> bool {
    match pattern {
        Pattern::Year4 => YEAR_RE.is_match(value),
        Pattern::Email => EMAIL_RE.is_match(value),
        Pattern::InstagramHandle => is_handle(value),
        Pattern::WebsiteOrHandle => {
            is_handle(value) || value.contains("instagram.com") || is_plausible_url(value)
        }
    }
}

/// `@` plus at least one character
fn is_handle(value: &str) -> bool {
    value.starts_with('@') && value.len() > 1
}

/// Accept anything that parses as a URL with a dotted hostname, prepending
/// `https://` when no scheme was given
pub fn is_plausible_url(value: &str) -> bool {
    let with_scheme = if value.starts_with("http") {
        value.to_string()
    } else {
        format!("https://{value}")
    };
    match url::Url::parse(&with_scheme) {
        Ok(parsed) => parsed.host_str().is_some_and(|host| host.contains('.')),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::definition::application_form;

    fn valid_step1_values() -> FormValues {
        let mut values = FormValues::new();
        values.set_text("brandName", "Atelier North".to_string());
        values.set_text("websiteUrl", "atelier-north.com".to_string());
        values.set_text("contactEmail", "hello@atelier-north.com".to_string());
        values
    }

    mod url_plausibility {
        use super::*;

        #[test]
        fn test_accepts_bare_domain() {
            assert!(is_plausible_url("example.com"));
        }

        #[test]
        fn test_accepts_full_url() {
            assert!(is_plausible_url("https://example.com"));
        }

        #[test]
        fn test_rejects_free_text() {
            assert!(!is_plausible_url("not a url"));
        }

        #[test]
        fn test_rejects_dotless_host() {
            assert!(!is_plausible_url("localhost"));
        }

        #[test]
        fn test_handle_accepted_by_combined_pattern() {
            assert!(matches_pattern(Pattern::WebsiteOrHandle, "@somehandle"));
            assert!(matches_pattern(
                Pattern::WebsiteOrHandle,
                "instagram.com/somebrand"
            ));
        }

        #[test]
        fn test_bare_at_fails_handle_check() {
            assert!(!matches_pattern(Pattern::InstagramHandle, "@"));
            assert!(matches_pattern(Pattern::InstagramHandle, "@somehandle"));
        }
    }

    mod step_one {
        use super::*;

        #[test]
        fn test_valid_values_pass() {
            let spec = application_form();
            let result = validate_step(&spec, &valid_step1_values(), 0);
            assert!(result.is_valid(), "errors: {:?}", result.errors());
        }

        #[test]
        fn test_short_brand_name_fails_only_that_field() {
            let spec = application_form();
            let mut values = valid_step1_values();
            values.set_text("brandName", "A".to_string());

            let result = validate_step(&spec, &values, 0);
            assert!(!result.is_valid());
            assert_eq!(
                result.error("brandName"),
                "Brand name must be at least 2 characters."
            );
            assert_eq!(result.error("websiteUrl"), "");
            assert_eq!(result.error("contactEmail"), "");
        }

        #[test]
        fn test_empty_brand_name_fails_length_rule() {
            let spec = application_form();
            let mut values = valid_step1_values();
            values.set_text("brandName", "  ".to_string());

            let result = validate_step(&spec, &values, 0);
            assert_eq!(
                result.error("brandName"),
                "Brand name must be at least 2 characters."
            );
        }

        #[test]
        fn test_bad_year_fails_good_year_passes() {
            let spec = application_form();
            let mut values = valid_step1_values();
            values.set_text("yearEstablished", "199".to_string());
            let result = validate_step(&spec, &values, 0);
            assert_eq!(result.error("yearEstablished"), "Enter a 4-digit year.");

            values.set_text("yearEstablished", "2019".to_string());
            let result = validate_step(&spec, &values, 0);
            assert_eq!(result.error("yearEstablished"), "");
        }

        #[test]
        fn test_year_is_optional() {
            let spec = application_form();
            let result = validate_step(&spec, &valid_step1_values(), 0);
            assert_eq!(result.error("yearEstablished"), "");
        }

        #[test]
        fn test_missing_email_fails() {
            let spec = application_form();
            let mut values = valid_step1_values();
            values.set_text("contactEmail", String::new());
            let result = validate_step(&spec, &values, 0);
            assert_eq!(result.error("contactEmail"), "Enter a valid email address.");
        }

        #[test]
        fn test_malformed_email_fails() {
            let spec = application_form();
            let mut values = valid_step1_values();
            values.set_text("contactEmail", "not an email".to_string());
            let result = validate_step(&spec, &values, 0);
            assert_eq!(result.error("contactEmail"), "Enter a valid email address.");
        }

        #[test]
        fn test_website_accepts_handle() {
            let spec = application_form();
            let mut values = valid_step1_values();
            values.set_text("websiteUrl", "@somehandle".to_string());
            let result = validate_step(&spec, &values, 0);
            assert_eq!(result.error("websiteUrl"), "");
        }

        #[test]
        fn test_hidden_instagram_branch_is_skipped() {
            let spec = application_form();
            // instagramHandle is required but hidden on the website branch
            let result = validate_step(&spec, &valid_step1_values(), 0);
            assert_eq!(result.error("instagramHandle"), "");
        }

        #[test]
        fn test_instagram_branch_requires_handle() {
            let spec = application_form();
            let mut values = valid_step1_values();
            values.select("websiteType", "instagram");

            let result = validate_step(&spec, &values, 0);
            assert_eq!(
                result.error("instagramHandle"),
                "Please provide your Instagram handle."
            );
            // The website input is now the hidden branch
            assert_eq!(result.error("websiteUrl"), "");
        }
    }

    mod choice_steps {
        use super::*;

        #[test]
        fn test_attendance_radio_required() {
            let spec = application_form();
            let mut values = FormValues::new();
            let result = validate_step(&spec, &values, 3);
            assert_eq!(
                result.error("attendance"),
                "Please select your attendance preference."
            );

            values.select("attendance", "in-person");
            let result = validate_step(&spec, &values, 3);
            assert!(result.is_valid());
        }

        #[test]
        fn test_package_radio_required() {
            let spec = application_form();
            let values = FormValues::new();
            let result = validate_step(&spec, &values, 4);
            assert_eq!(result.error("packageType"), "Please select a package type.");
        }

        #[test]
        fn test_acknowledgement_required_on_final_step() {
            let spec = application_form();
            let mut values = FormValues::new();
            let result = validate_step(&spec, &values, 6);
            assert_eq!(
                result.error("acknowledgement"),
                "You must acknowledge this to submit."
            );

            values.set_checked("acknowledgement", true);
            let result = validate_step(&spec, &values, 6);
            assert!(result.is_valid());
        }

        #[test]
        fn test_promo_handle_skipped_when_hidden() {
            let spec = application_form();
            let mut values = FormValues::new();
            values.select("preEventFeature", "no");
            values.set_text("instagramHandle", "@mybrand".to_string());

            let result = validate_step(&spec, &values, 5);
            assert!(result.is_valid(), "errors: {:?}", result.errors());
        }
    }

    mod full_form {
        use super::*;

        #[test]
        fn test_first_invalid_step_reported() {
            let spec = application_form();
            let values = valid_step1_values();
            let (results, first_invalid) = validate_all(&spec, &values);
            assert_eq!(results.len(), 7);
            assert!(results[0].is_valid());
            // Step 2 requires the three identity texts
            assert_eq!(first_invalid, Some(1));
        }

        #[test]
        fn test_all_valid_yields_none() {
            let spec = application_form();
            let mut values = valid_step1_values();
            values.set_text("brandDescription", "Small-batch knitwear.".to_string());
            values.set_text("brandDistinct", "Every piece is hand-finished.".to_string());
            values.set_text("brandWhy", "The collective fits our audience.".to_string());
            values.set_text("productsShowcase", "Scarves, beanies".to_string());
            values.set_text("priceRange", "30-80 EUR".to_string());
            values.set_text("skuCount", "24".to_string());
            values.select("attendance", "in-person");
            values.select("packageType", "standard");
            values.select("preEventFeature", "yes");
            values.set_text("brandInstagram", "@ateliernorth".to_string());
            values.set_checked("acknowledgement", true);

            let (_, first_invalid) = validate_all(&spec, &values);
            assert_eq!(first_invalid, None);
        }
    }
}
