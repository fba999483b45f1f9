use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::form::TokenForm;

pub const MAX_NAME_CHARS: usize = 32;
pub const MAX_SYMBOL_CHARS: usize = 10;
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// Every field the validator reports on.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum FormField {
    Name,
    Symbol,
    Description,
    Image,
    Website,
    Twitter,
    Telegram,
    StreamTitle,
    BuyAmount,
    MaxBaseCost,
}

impl FormField {
    pub const ALL: [FormField; 10] = [
        FormField::Name,
        FormField::Symbol,
        FormField::Description,
        FormField::Image,
        FormField::Website,
        FormField::Twitter,
        FormField::Telegram,
        FormField::StreamTitle,
        FormField::BuyAmount,
        FormField::MaxBaseCost,
    ];
}

/// One validation pass over the form. Every field maps to an error message,
/// the empty string meaning the field is fine. Recomputed in full on every
/// pass, never persisted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    errors: BTreeMap<FormField, String>,
}

impl ValidationReport {
    pub fn message(&self, field: FormField) -> &str {
        self.errors.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Submission is permitted iff every field maps to an empty message.
    pub fn is_clean(&self) -> bool {
        self.errors.values().all(|message| message.is_empty())
    }

    /// Fields with a non-empty message, for surfacing.
    pub fn offending_fields(&self) -> Vec<FormField> {
        self.errors
            .iter()
            .filter(|(_, message)| !message.is_empty())
            .map(|(field, _)| *field)
            .collect()
    }

    fn set(&mut self, field: FormField, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }
}

fn is_valid_url(value: &str) -> bool {
    Url::parse(value).is_ok()
}

/// `^[A-Z0-9]+$` without pulling in a regex engine.
fn is_symbol_charset(symbol: &str) -> bool {
    !symbol.is_empty()
        && symbol
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

fn parses_positive(value: &str) -> bool {
    matches!(value.trim().parse::<f64>(), Ok(v) if v.is_finite() && v > 0.0)
}

/// Validate the whole form. Every rule runs on every pass; nothing
/// short-circuits, so the report always covers every field. No network or
/// side-effecting checks happen here; verifying a stream is actually live
/// is a separate, explicitly user-triggered lookup.
pub fn validate(form: &TokenForm) -> ValidationReport {
    let mut report = ValidationReport::default();
    for field in FormField::ALL {
        report.set(field, "");
    }

    if form.name.trim().is_empty() {
        report.set(FormField::Name, "Token name is required");
    } else if form.name.chars().count() > MAX_NAME_CHARS {
        report.set(FormField::Name, "Token name must be 32 characters or less");
    }

    if form.symbol.trim().is_empty() {
        report.set(FormField::Symbol, "Token symbol is required");
    } else if form.symbol.chars().count() > MAX_SYMBOL_CHARS {
        report.set(
            FormField::Symbol,
            "Token symbol must be 10 characters or less",
        );
    } else if !is_symbol_charset(&form.symbol) {
        report.set(
            FormField::Symbol,
            "Token symbol must contain only uppercase letters and numbers",
        );
    }

    if form.description.trim().is_empty() {
        report.set(FormField::Description, "Token description is required");
    } else if form.description.chars().count() > MAX_DESCRIPTION_CHARS {
        report.set(
            FormField::Description,
            "Token description must be 500 characters or less",
        );
    }

    // The image is required for every submission, independent of the other
    // toggles.
    if form.image.is_none() {
        report.set(FormField::Image, "Please select an image");
    }

    if !form.social_links.website.is_empty() && !is_valid_url(&form.social_links.website) {
        report.set(FormField::Website, "Please enter a valid URL");
    }
    if !form.social_links.twitter.is_empty() && !is_valid_url(&form.social_links.twitter) {
        report.set(FormField::Twitter, "Please enter a valid URL");
    }
    if !form.social_links.telegram.is_empty() && !is_valid_url(&form.social_links.telegram) {
        report.set(FormField::Telegram, "Please enter a valid URL");
    }

    if form.stream_enabled && form.stream.title.trim().is_empty() {
        report.set(FormField::StreamTitle, "Stream title is required");
    }

    if form.first_buy_enabled {
        if !parses_positive(&form.buy_amount) {
            report.set(FormField::BuyAmount, "Please enter a valid amount");
        }
        if !parses_positive(&form.max_base_cost) {
            report.set(
                FormField::MaxBaseCost,
                "Please enter a valid maximum amount",
            );
        }
    }

    report
}
