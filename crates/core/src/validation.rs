//! Input validation and normalization for cities, posts, events and
//! newsletter subscribers.

use crate::error::CoreError;
use crate::types::Timestamp;

/// Maximum length of a post or event title.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum length of a city display name.
pub const MAX_CITY_NAME_LEN: usize = 100;

/// Maximum length of a post body in characters.
pub const MAX_BODY_LEN: usize = 100_000;

// ---------------------------------------------------------------------------
// Slugs
// ---------------------------------------------------------------------------

/// Generate a URL-safe slug from a display name.
///
/// Lowercases, maps every non-alphanumeric character to a hyphen, collapses
/// runs of hyphens, and trims hyphens from both ends.
pub fn generate_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut prev_hyphen = false;
    for c in name.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            prev_hyphen = false;
        } else if !prev_hyphen {
            slug.push('-');
            prev_hyphen = true;
        }
    }
    slug.trim_matches('-').to_string()
}

/// Validate a slug (non-empty, only lowercase alphanumeric + hyphens).
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("Slug must not be empty".into()));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(CoreError::Validation(
            "Slug must contain only lowercase alphanumeric characters and hyphens".into(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Text fields
// ---------------------------------------------------------------------------

pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_city_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("City name must not be empty".into()));
    }
    if name.chars().count() > MAX_CITY_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "City name must be at most {MAX_CITY_NAME_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_body(body: &str) -> Result<(), CoreError> {
    if body.chars().count() > MAX_BODY_LEN {
        return Err(CoreError::Validation(format!(
            "Body must be at most {MAX_BODY_LEN} characters"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Email
// ---------------------------------------------------------------------------

/// Trim and lowercase an email address, rejecting obviously malformed input.
///
/// This is a shape check only (one `@`, non-empty local part, a dotted
/// domain). Deliverability is the mail provider's concern.
pub fn normalize_email(email: &str) -> Result<String, CoreError> {
    let email = email.trim().to_lowercase();
    let invalid = || CoreError::Validation(format!("Invalid email address '{email}'"));

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') || email.contains(char::is_whitespace) {
        return Err(invalid());
    }
    match domain.split_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() && !domain.ends_with('.') => {}
        _ => return Err(invalid()),
    }
    Ok(email)
}

// ---------------------------------------------------------------------------
// Scheduling
// ---------------------------------------------------------------------------

/// An event must end after it starts.
pub fn validate_schedule(starts_at: Timestamp, ends_at: Option<Timestamp>) -> Result<(), CoreError> {
    if let Some(ends_at) = ends_at {
        if ends_at <= starts_at {
            return Err(CoreError::Validation(
                "Event must end after it starts".into(),
            ));
        }
    }
    Ok(())
}
