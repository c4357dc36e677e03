//! Mail relay
//!
//! Formats a submitted application into a plain-text message and forwards
//! it through the Resend transactional email API. The recipient depends on
//! the deployment environment.

use chrono::Utc;
use serde_json::{json, Value};
use thiserror::Error;

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";
const SUBJECT: &str = "1715 Collective — New Application";

const TEST_RECIPIENT: &str = "applications-test@1715collective.com";
const PROD_RECIPIENT: &str = "applications@1715collective.com";

#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail relay is not configured")]
    NotConfigured,
    #[error("mail request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("mail API returned status {0}: {1}")]
    Api(reqwest::StatusCode, String),
}

/// Resend-backed relay; built from `RESEND_API_KEY` and `FROM_EMAIL`
#[derive(Debug, Clone)]
pub struct MailRelay {
    http: reqwest::Client,
    api_key: String,
    from: String,
    production: bool,
}

impl MailRelay {
    /// None when the API key or sender address is missing from the
    /// environment
    pub fn from_env(production: bool) -> Option<Self> {
        let api_key = std::env::var("RESEND_API_KEY").ok()?;
        let from = std::env::var("FROM_EMAIL").ok()?;
        Some(Self {
            http: reqwest::Client::new(),
            api_key,
            from,
            production,
        })
    }

    pub fn recipient(&self) -> &'static str {
        if self.production {
            PROD_RECIPIENT
        } else {
            TEST_RECIPIENT
        }
    }

    /// Forward one application to the configured recipient
    pub async fn send(&self, payload: &serde_json::Map<String, Value>) -> Result<(), MailError> {
        let text = format!(
            "{}\n\nReceived: {}",
            email_body(payload),
            Utc::now().to_rfc3339()
        );
        let request = json!({
            "from": self.from,
            "to": self.recipient(),
            "subject": SUBJECT,
            "text": text,
        });

        let response = self
            .http
            .post(RESEND_ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Api(status, body));
        }
        Ok(())
    }
}

/// Render the application payload as labeled plain-text lines
pub fn email_body(payload: &serde_json::Map<String, Value>) -> String {
    let field = |label: &str, name: &str| format_field(label, payload.get(name));

    // The promo-step handle backfills the line when the applicant chose
    // the website branch and never filled instagramHandle
    let instagram = payload
        .get("instagramHandle")
        .filter(|v| !matches!(v, Value::Null) && !matches!(v, Value::String(s) if s.is_empty()))
        .or_else(|| payload.get("brandInstagram"));

    let lines = [
        "New 1715 Collective Application".to_string(),
        String::new(),
        field("Brand name", "brandName"),
        field("Website type", "websiteType"),
        field("Website URL", "websiteUrl"),
        format_field("Instagram handle", instagram),
        field("Country / City", "countryCity"),
        field("Year established", "yearEstablished"),
        field("Primary contact", "primaryContact"),
        field("Contact email", "contactEmail"),
        String::new(),
        field("Brand categories", "brandCategory"),
        field("Other category", "brandCategoryOtherText"),
        String::new(),
        field("Brand description", "brandDescription"),
        String::new(),
        field("Brand distinct", "brandDistinct"),
        String::new(),
        field("Why 1715", "brandWhy"),
        String::new(),
        field("Products to showcase", "productsShowcase"),
        field("Average price range", "priceRange"),
        field("SKU count", "skuCount"),
        String::new(),
        field("Attendance", "attendance"),
        field("Requirements", "requirements"),
        field("Other requirements", "requirementsOtherText"),
        String::new(),
        field("Package", "packageType"),
        field("Open to pre-event feature", "preEventFeature"),
        field("Brand Instagram handle", "brandInstagram"),
        field("Follower count", "followerCount"),
        String::new(),
        field("Acknowledgement", "acknowledgement"),
        field("Additional notes", "additionalNotes"),
    ];

    lines.join("\n")
}

fn format_field(label: &str, value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => format!("{label}:"),
        Some(Value::String(s)) if s.is_empty() => format!("{label}:"),
        Some(Value::String(s)) => format!("{label}: {s}"),
        Some(Value::Bool(b)) => format!("{label}: {}", if *b { "Yes" } else { "No" }),
        Some(Value::Array(items)) if items.is_empty() => format!("{label}:"),
        Some(Value::Array(items)) => {
            let joined: Vec<String> = items
                .iter()
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect();
            format!("{label}: {}", joined.join(", "))
        }
        Some(other) => format!("{label}: {other}"),
    }
}
