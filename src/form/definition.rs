//! Declarative definition of the application form
//!
//! The whole form is data: steps, fields, validation rules and visibility
//! conditions live in one registry so the validator and the renderer never
//! hard-code per-step logic.

/// One selectable option of a radio or checkbox group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldOption {
    pub value: &'static str,
    pub label: &'static str,
}

impl FieldOption {
    pub const fn new(value: &'static str, label: &'static str) -> Self {
        Self { value, label }
    }
}

/// What kind of control a field is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text { multiline: bool },
    Checkbox,
    CheckboxGroup { options: Vec<FieldOption> },
    Radio { options: Vec<FieldOption> },
}

impl FieldKind {
    /// Options of a radio or checkbox group, empty for other kinds
    pub fn options(&self) -> &[FieldOption] {
        match self {
            FieldKind::CheckboxGroup { options } | FieldKind::Radio { options } => options,
            _ => &[],
        }
    }
}

/// Format rule applied to a non-empty text value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Exactly four digits
    Year4,
    /// Plausible email address
    Email,
    /// Instagram handle: `@` plus at least one character
    InstagramHandle,
    /// `@handle`, an instagram.com link, or a URL with a dotted host
    WebsiteOrHandle,
}

/// Validation rule for a single field, with the messages shown on failure
#[derive(Debug, Clone, Default)]
pub struct FieldRule {
    pub required: Option<&'static str>,
    pub min_len: Option<(usize, &'static str)>,
    pub pattern: Option<(Pattern, &'static str)>,
}

/// Visibility condition for a conditional field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Shown while a specific option of a checkbox group is checked
    CheckboxChecked {
        group: &'static str,
        option: &'static str,
    },
    /// Shown while a radio group has the given value selected;
    /// `default_when_unset` decides the branch before any selection is made
    RadioIs {
        field: &'static str,
        value: &'static str,
        default_when_unset: bool,
    },
    /// Shown while another field is empty
    FieldEmpty { field: &'static str },
}

/// A single form field
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub rule: FieldRule,
    pub shown_when: Option<Condition>,
    /// Character limit for long-text fields, drives the counter display
    pub max_len: Option<usize>,
}

impl FieldSpec {
    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self::with_kind(name, label, FieldKind::Text { multiline: false })
    }

    pub fn textarea(name: &'static str, label: &'static str) -> Self {
        Self::with_kind(name, label, FieldKind::Text { multiline: true })
    }

    pub fn checkbox(name: &'static str, label: &'static str) -> Self {
        Self::with_kind(name, label, FieldKind::Checkbox)
    }

    pub fn checkbox_group(
        name: &'static str,
        label: &'static str,
        options: Vec<FieldOption>,
    ) -> Self {
        Self::with_kind(name, label, FieldKind::CheckboxGroup { options })
    }

    pub fn radio(name: &'static str, label: &'static str, options: Vec<FieldOption>) -> Self {
        Self::with_kind(name, label, FieldKind::Radio { options })
    }

    fn with_kind(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            rule: FieldRule::default(),
            shown_when: None,
            max_len: None,
        }
    }

    pub fn required(mut self, message: &'static str) -> Self {
        self.rule.required = Some(message);
        self
    }

    pub fn min_len(mut self, len: usize, message: &'static str) -> Self {
        self.rule.min_len = Some((len, message));
        self
    }

    pub fn pattern(mut self, pattern: Pattern, message: &'static str) -> Self {
        self.rule.pattern = Some((pattern, message));
        self
    }

    pub fn shown_when(mut self, condition: Condition) -> Self {
        self.shown_when = Some(condition);
        self
    }

    pub fn max_len(mut self, len: usize) -> Self {
        self.max_len = Some(len);
        self
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self.kind, FieldKind::Text { multiline: true })
    }
}

/// One screen of the wizard
#[derive(Debug, Clone)]
pub struct StepSpec {
    pub section: &'static str,
    pub fields: Vec<FieldSpec>,
}

/// The whole form: an ordered sequence of steps
#[derive(Debug, Clone)]
pub struct FormSpec {
    pub steps: Vec<StepSpec>,
}

impl FormSpec {
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn step(&self, index: usize) -> Option<&StepSpec> {
        self.steps.get(index)
    }

    /// All fields in document order
    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.steps.iter().flat_map(|s| s.fields.iter())
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields().find(|f| f.name == name)
    }
}

/// The canonical seven-step collective application form
pub fn application_form() -> FormSpec {
    FormSpec {
        steps: vec![
            StepSpec {
                section: "Brand Information",
                fields: vec![
                    FieldSpec::text("brandName", "Brand name")
                        .min_len(2, "Brand name must be at least 2 characters."),
                    FieldSpec::radio(
                        "websiteType",
                        "Where can we find you online?",
                        vec![
                            FieldOption::new("website", "Website"),
                            FieldOption::new("instagram", "Instagram"),
                        ],
                    ),
                    FieldSpec::text("websiteUrl", "Website URL")
                        .shown_when(Condition::RadioIs {
                            field: "websiteType",
                            value: "website",
                            default_when_unset: true,
                        })
                        .required("Please provide a website or Instagram handle.")
                        .pattern(
                            Pattern::WebsiteOrHandle,
                            "Enter a valid URL or Instagram handle.",
                        ),
                    FieldSpec::text("instagramHandle", "Instagram handle")
                        .shown_when(Condition::RadioIs {
                            field: "websiteType",
                            value: "instagram",
                            default_when_unset: false,
                        })
                        .required("Please provide your Instagram handle.")
                        .pattern(
                            Pattern::InstagramHandle,
                            "Instagram handle should start with @.",
                        ),
                    FieldSpec::text("countryCity", "Country / City"),
                    FieldSpec::text("yearEstablished", "Year established")
                        .pattern(Pattern::Year4, "Enter a 4-digit year."),
                    FieldSpec::text("primaryContact", "Primary contact"),
                    FieldSpec::text("contactEmail", "Contact email")
                        .required("Enter a valid email address.")
                        .pattern(Pattern::Email, "Enter a valid email address."),
                ],
            },
            StepSpec {
                section: "Brand Identity & Alignment",
                fields: vec![
                    FieldSpec::checkbox_group(
                        "brandCategory",
                        "Brand categories",
                        vec![
                            FieldOption::new("apparel", "Apparel"),
                            FieldOption::new("accessories", "Accessories"),
                            FieldOption::new("beauty", "Beauty"),
                            FieldOption::new("homeware", "Homeware"),
                            FieldOption::new("art", "Art & Print"),
                            FieldOption::new("other", "Other"),
                        ],
                    ),
                    FieldSpec::text("brandCategoryOtherText", "Other category").shown_when(
                        Condition::CheckboxChecked {
                            group: "brandCategory",
                            option: "other",
                        },
                    ),
                    FieldSpec::textarea("brandDescription", "Brief brand description")
                        .required("Please add a brief brand description.")
                        .max_len(600),
                    FieldSpec::textarea("brandDistinct", "What makes your brand distinct?")
                        .required("Please share what makes your brand distinct.")
                        .max_len(600),
                    FieldSpec::textarea("brandWhy", "Why do you want to join the collective?")
                        .required("Please share why you want to join the collective.")
                        .max_len(600),
                ],
            },
            StepSpec {
                section: "Products & Showcase",
                fields: vec![
                    FieldSpec::textarea("productsShowcase", "Products to be showcased")
                        .required("Please list the products to be showcased."),
                    FieldSpec::text("priceRange", "Average price range")
                        .required("Please provide an average price range."),
                    FieldSpec::text("skuCount", "Estimated SKU count")
                        .required("Please estimate your SKU count."),
                ],
            },
            StepSpec {
                section: "Participation & Logistics",
                fields: vec![
                    FieldSpec::radio(
                        "attendance",
                        "Attendance preference",
                        vec![
                            FieldOption::new("in-person", "In person"),
                            FieldOption::new("representative", "Send a representative"),
                            FieldOption::new("remote", "Remote only"),
                        ],
                    )
                    .required("Please select your attendance preference."),
                    FieldSpec::checkbox_group(
                        "requirements",
                        "Setup requirements",
                        vec![
                            FieldOption::new("rack", "Clothing rack"),
                            FieldOption::new("table", "Table space"),
                            FieldOption::new("power", "Power outlet"),
                            FieldOption::new("other", "Other"),
                        ],
                    ),
                    FieldSpec::text("requirementsOtherText", "Other requirements").shown_when(
                        Condition::CheckboxChecked {
                            group: "requirements",
                            option: "other",
                        },
                    ),
                ],
            },
            StepSpec {
                section: "Package Selection",
                fields: vec![FieldSpec::radio(
                    "packageType",
                    "Package",
                    vec![
                        FieldOption::new("standard", "Standard Showcase"),
                        FieldOption::new("premium", "Premium Showcase"),
                    ],
                )
                .required("Please select a package type.")],
            },
            StepSpec {
                section: "Promotion & Content",
                fields: vec![
                    FieldSpec::radio(
                        "preEventFeature",
                        "Open to a pre-event feature?",
                        vec![
                            FieldOption::new("yes", "Yes"),
                            FieldOption::new("no", "No"),
                        ],
                    )
                    .required("Please select yes or no."),
                    FieldSpec::text("brandInstagram", "Brand Instagram handle")
                        .shown_when(Condition::FieldEmpty {
                            field: "instagramHandle",
                        })
                        .required("Please provide your Instagram handle.")
                        .pattern(
                            Pattern::InstagramHandle,
                            "Instagram handle should start with @.",
                        ),
                    FieldSpec::text("followerCount", "Approximate follower count"),
                ],
            },
            StepSpec {
                section: "Final Confirmation",
                fields: vec![
                    FieldSpec::checkbox(
                        "acknowledgement",
                        "I confirm the information above is accurate",
                    )
                    .required("You must acknowledge this to submit."),
                    FieldSpec::textarea("additionalNotes", "Additional notes").max_len(600),
                ],
            },
        ],
    }
}
