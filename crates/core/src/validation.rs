//! User-input validation.
//!
//! Pure, stateless functions returning a [`ValidationReport`] rather than
//! erroring: expected input problems are values the caller renders inline,
//! not exceptions. Password rules come from the configured
//! [`PasswordPolicy`], the single source of truth for them.

use once_cell::sync::Lazy;
use quaero_common::{AppResult, FieldError, config::PasswordPolicy, error::AppError};
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Maximum number of tags on a question.
pub const MAX_TAGS: usize = 5;

/// Outcome of validating one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<FieldError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Convert into a result, mapping failures to a `Validation` error.
    pub fn into_result(self) -> AppResult<()> {
        if self.is_valid {
            Ok(())
        } else {
            Err(AppError::Validation(self.errors))
        }
    }

    /// Merge another report into this one.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.errors.extend(other.errors);
        self.is_valid = self.errors.is_empty();
        self
    }
}

/// Validate a question's title, content, and tags.
#[must_use]
pub fn validate_question(title: &str, content: &str, tags: &[String]) -> ValidationReport {
    let mut errors = Vec::new();

    let title = title.trim();
    if title.is_empty() {
        errors.push(FieldError::new("title", "Title is required"));
    } else if title.chars().count() < 10 {
        errors.push(FieldError::new(
            "title",
            "Title must be at least 10 characters long",
        ));
    } else if title.chars().count() > 200 {
        errors.push(FieldError::new(
            "title",
            "Title must be less than 200 characters",
        ));
    }

    let content = content.trim();
    if content.is_empty() {
        errors.push(FieldError::new("content", "Content is required"));
    } else if content.chars().count() < 20 {
        errors.push(FieldError::new(
            "content",
            "Content must be at least 20 characters long",
        ));
    } else if content.chars().count() > 5000 {
        errors.push(FieldError::new(
            "content",
            "Content must be less than 5000 characters",
        ));
    }

    if tags.len() > MAX_TAGS {
        errors.push(FieldError::new("tags", "Maximum 5 tags allowed"));
    }
    for tag in tags {
        if tag.chars().count() < 2 {
            errors.push(FieldError::new(
                "tags",
                format!("Tag \"{tag}\" must be at least 2 characters long"),
            ));
        } else if tag.chars().count() > 20 {
            errors.push(FieldError::new(
                "tags",
                format!("Tag \"{tag}\" must be less than 20 characters"),
            ));
        }
    }

    ValidationReport::from_errors(errors)
}

/// Validate an answer's content.
#[must_use]
pub fn validate_answer(content: &str) -> ValidationReport {
    let mut errors = Vec::new();

    let content = content.trim();
    if content.is_empty() {
        errors.push(FieldError::new("content", "Answer content is required"));
    } else if content.chars().count() < 10 {
        errors.push(FieldError::new(
            "content",
            "Answer must be at least 10 characters long",
        ));
    } else if content.chars().count() > 10_000 {
        errors.push(FieldError::new(
            "content",
            "Answer must be less than 10,000 characters",
        ));
    }

    ValidationReport::from_errors(errors)
}

/// Validate a comment's content.
#[must_use]
pub fn validate_comment(content: &str) -> ValidationReport {
    let mut errors = Vec::new();

    let content = content.trim();
    if content.is_empty() {
        errors.push(FieldError::new("content", "Comment is required"));
    } else if content.chars().count() < 3 {
        errors.push(FieldError::new(
            "content",
            "Comment must be at least 3 characters long",
        ));
    } else if content.chars().count() > 500 {
        errors.push(FieldError::new(
            "content",
            "Comment must be less than 500 characters",
        ));
    }

    ValidationReport::from_errors(errors)
}

/// Validate an email address.
#[must_use]
pub fn validate_email(email: &str) -> ValidationReport {
    let mut errors = Vec::new();

    if email.trim().is_empty() {
        errors.push(FieldError::new("email", "Email is required"));
    } else if !EMAIL_RE.is_match(email) {
        errors.push(FieldError::new(
            "email",
            "Please enter a valid email address",
        ));
    }

    ValidationReport::from_errors(errors)
}

/// Validate a password against the configured policy.
#[must_use]
pub fn validate_password(password: &str, policy: &PasswordPolicy) -> ValidationReport {
    let mut errors = Vec::new();

    if password.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    } else if password.chars().count() < policy.min_length {
        errors.push(FieldError::new(
            "password",
            format!(
                "Password must be at least {} characters long",
                policy.min_length
            ),
        ));
    } else if policy.require_mixed_case_and_digit {
        let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        if !(has_lower && has_upper && has_digit) {
            errors.push(FieldError::new(
                "password",
                "Password must contain at least one uppercase letter, one lowercase letter, \
                 and one number",
            ));
        }
    }

    ValidationReport::from_errors(errors)
}

/// Validate a display name.
#[must_use]
pub fn validate_name(name: &str) -> ValidationReport {
    let mut errors = Vec::new();

    let name = name.trim();
    if name.is_empty() {
        errors.push(FieldError::new("name", "Name is required"));
    } else if name.chars().count() < 2 {
        errors.push(FieldError::new(
            "name",
            "Name must be at least 2 characters long",
        ));
    } else if name.chars().count() > 50 {
        errors.push(FieldError::new(
            "name",
            "Name must be less than 50 characters",
        ));
    }

    ValidationReport::from_errors(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_short_title_flags_title_only() {
        let content = "x".repeat(30);
        let report = validate_question("short", &content, &[]);

        assert!(!report.is_valid);
        assert!(
            report
                .errors
                .iter()
                .any(|e| e.field == "title" && e.message.contains("at least 10 characters"))
        );
        assert!(report.errors.iter().all(|e| e.field != "content"));
    }

    #[test]
    fn test_valid_question() {
        let report = validate_question(
            "How do I learn Rust properly?",
            "I keep bouncing off the borrow checker and want a structured path.",
            &tags(&["rust", "learning"]),
        );
        assert!(report.is_valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_too_many_tags() {
        let report = validate_question(
            "A perfectly reasonable title",
            "Content that is certainly long enough to pass validation.",
            &tags(&["a1", "b2", "c3", "d4", "e5", "f6"]),
        );
        assert!(!report.is_valid);
        assert!(
            report
                .errors
                .iter()
                .any(|e| e.field == "tags" && e.message == "Maximum 5 tags allowed")
        );
    }

    #[test]
    fn test_tag_length_bounds() {
        let report = validate_question(
            "A perfectly reasonable title",
            "Content that is certainly long enough to pass validation.",
            &tags(&["x", "this-tag-is-way-too-long-here"]),
        );
        let tag_errors: Vec<_> = report.errors.iter().filter(|e| e.field == "tags").collect();
        assert_eq!(tag_errors.len(), 2);
        assert!(tag_errors[0].message.contains("\"x\""));
    }

    #[test]
    fn test_validate_answer_bounds() {
        assert!(!validate_answer("").is_valid);
        assert!(!validate_answer("too short").is_valid);
        assert!(validate_answer("This answer is long enough.").is_valid);
        assert!(!validate_answer(&"x".repeat(10_001)).is_valid);
    }

    #[test]
    fn test_validate_comment_bounds() {
        assert!(!validate_comment("  ").is_valid);
        assert!(!validate_comment("no").is_valid);
        assert!(validate_comment("yes").is_valid);
        assert!(!validate_comment(&"x".repeat(501)).is_valid);
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_valid);

        let report = validate_email("not-an-email");
        assert!(!report.is_valid);
        assert_eq!(report.errors[0].field, "email");
    }

    #[test]
    fn test_validate_email_rejects_whitespace() {
        assert!(!validate_email("us er@example.com").is_valid);
        assert!(!validate_email("user@exam ple.com").is_valid);
        assert!(!validate_email("user@example").is_valid);
    }

    #[test]
    fn test_validate_password_default_policy() {
        let policy = PasswordPolicy::default();

        assert!(validate_password("Abcdef12", &policy).is_valid);
        assert!(!validate_password("short", &policy).is_valid);
        // Long enough but no uppercase
        assert!(!validate_password("abcdef12", &policy).is_valid);
        // Long enough but no digit
        assert!(!validate_password("Abcdefgh", &policy).is_valid);
        assert!(!validate_password("", &policy).is_valid);
    }

    #[test]
    fn test_validate_password_relaxed_policy() {
        let policy = PasswordPolicy {
            min_length: 6,
            require_mixed_case_and_digit: false,
        };
        assert!(validate_password("abc123", &policy).is_valid);
        assert!(!validate_password("abc12", &policy).is_valid);
    }

    #[test]
    fn test_validate_name_bounds() {
        assert!(!validate_name("").is_valid);
        assert!(!validate_name("A").is_valid);
        assert!(validate_name("Al").is_valid);
        assert!(!validate_name(&"x".repeat(51)).is_valid);
    }

    #[test]
    fn test_into_result() {
        assert!(validate_name("Priya Sharma").into_result().is_ok());

        let result = validate_name("").into_result();
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_merge_combines_errors() {
        let merged = validate_name("").merge(validate_email(""));
        assert!(!merged.is_valid);
        assert_eq!(merged.errors.len(), 2);
    }
}
