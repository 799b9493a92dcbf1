// src/application/commands/certificates/fields.rs
//! Field -> validator tables for certificate payloads.
use bigdecimal::{BigDecimal, ToPrimitive};

use crate::{
    application::error::{ApplicationResult, InvalidFields},
    domain::{
        certificate::{Duration, Price},
        validation,
    },
};

/// Candidate certificate values; `None` means "not supplied" (create) or
/// "unchanged" (update).
#[derive(Debug, Clone, Default)]
pub(super) struct CertificateFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<BigDecimal>,
    pub duration: Option<i32>,
    pub tags: Vec<String>,
}

/// Returns `false` when the supplied value is rejected. Absent values pass.
type Rule = fn(&CertificateFields) -> bool;

pub(super) const CREATE_RULES: [(&str, Rule); 5] = [
    ("name", name_ok),
    ("description", description_ok),
    ("price", price_in_range),
    ("duration", duration_ok),
    ("tags", tags_ok),
];

pub(super) const UPDATE_RULES: [(&str, Rule); 5] = [
    ("name", name_ok),
    ("description", description_ok),
    ("duration", duration_ok),
    ("price", price_positive_in_range),
    ("tags", tags_ok),
];

/// Required on create; a missing one is reported with the value `null`.
const REQUIRED: [&str; 4] = ["name", "description", "price", "duration"];

impl CertificateFields {
    fn is_present(&self, field: &str) -> bool {
        match field {
            "name" => self.name.is_some(),
            "description" => self.description.is_some(),
            "price" => self.price.is_some(),
            "duration" => self.duration.is_some(),
            _ => true,
        }
    }

    fn render(&self, field: &str) -> String {
        match field {
            "name" => self.name.clone(),
            "description" => self.description.clone(),
            "price" => self.price.as_ref().map(ToString::to_string),
            "duration" => self.duration.map(|days| days.to_string()),
            "tags" => Some(format!("[{}]", self.tags.join(", "))),
            _ => None,
        }
        .unwrap_or_else(|| "null".to_owned())
    }

    pub(super) fn check_required(&self) -> InvalidFields {
        let mut invalid = InvalidFields::new();
        for field in REQUIRED {
            if !self.is_present(field) {
                invalid.push(field, "null");
            }
        }
        invalid
    }

    /// Runs every rule and reports all offending fields at once.
    pub(super) fn check(&self, rules: &[(&str, Rule)], mut invalid: InvalidFields) -> ApplicationResult<()> {
        for (field, rule) in rules {
            if !invalid.contains(field) && !rule(self) {
                invalid.push(*field, self.render(field));
            }
        }
        invalid.into_result()
    }
}

fn name_ok(fields: &CertificateFields) -> bool {
    fields.name.as_deref().is_none_or(validation::is_name)
}

fn description_ok(fields: &CertificateFields) -> bool {
    fields.description.as_deref().is_none_or(validation::is_description)
}

fn duration_ok(fields: &CertificateFields) -> bool {
    fields
        .duration
        .is_none_or(|days| validation::is_positive_id(days.into()) && Duration::in_range(days))
}

fn price_in_range(fields: &CertificateFields) -> bool {
    fields.price.as_ref().is_none_or(Price::in_range)
}

/// Integer part must be a positive number; 0.50 is rejected.
fn price_positive_in_range(fields: &CertificateFields) -> bool {
    fields.price.as_ref().is_none_or(|price| {
        price
            .with_scale(0)
            .to_i64()
            .is_some_and(validation::is_positive_id)
            && Price::in_range(price)
    })
}

fn tags_ok(fields: &CertificateFields) -> bool {
    validation::tags_valid(fields.tags.iter().map(String::as_str))
}
