// src/domain/validation.rs
//! Pure predicates shared by every planner and command.
//!
//! Nothing in here fails: callers decide whether a rejected value degrades a
//! filter to an empty result or aborts the operation.
use once_cell::sync::Lazy;
use regex::Regex;

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_\s-]+$").expect("name pattern"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_.-]{2,34}@[A-Za-z]{2,10}\.[A-Za-z]{2,4}$")
        .expect("email pattern")
});
static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^20\d{2}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").expect("date pattern")
});

const NAME_LEN: (usize, usize) = (2, 100);
const DESCRIPTION_LEN: (usize, usize) = (3, 300);
const GENERIC_PARAM_LEN: (usize, usize) = (3, 50);

fn len_within(value: &str, (min, max): (usize, usize)) -> bool {
    let len = value.chars().count();
    len >= min && len <= max
}

fn free_text(value: &str, bounds: (usize, usize)) -> bool {
    len_within(value, bounds) && !value.contains(['<', '>'])
}

/// Word character first, then at least one word character, whitespace or dash.
pub fn is_name(value: &str) -> bool {
    len_within(value, NAME_LEN) && NAME_RE.is_match(value)
}

pub fn is_description(value: &str) -> bool {
    free_text(value, DESCRIPTION_LEN)
}

/// Free-text substring filters (`part_of_word`).
pub fn is_generic_param(value: &str) -> bool {
    free_text(value, GENERIC_PARAM_LEN)
}

pub fn is_positive_id(value: i64) -> bool {
    value > 0
}

pub fn is_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// `20YY-MM-DD`; calendar validity (e.g. Feb 30) is checked when parsing.
pub fn is_iso_date(value: &str) -> bool {
    DATE_RE.is_match(value)
}

pub fn tags_valid<'a, I>(names: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    names.into_iter().all(is_name)
}
