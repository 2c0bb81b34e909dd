//! Write-boundary validation shared by the request DTOs.
//!
//! DTOs derive [`validator::Validate`]; handlers call [`validate_input`] so
//! every failure surfaces as [`CoreError::Validation`] before any SQL runs.

use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::error::CoreError;

/// Lowest accepted timeline importance.
pub const IMPORTANCE_MIN: i16 = 1;

/// Highest accepted timeline importance.
pub const IMPORTANCE_MAX: i16 = 5;

/// Importance assigned when a timeline event omits it.
pub const DEFAULT_IMPORTANCE: i16 = 3;

/// Reject strings that are empty or whitespace only.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

/// Run the derived validation rules and convert failures into a
/// [`CoreError::Validation`] listing every offending field path.
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input.validate().map_err(|errors| {
        let mut problems = Vec::new();
        collect_problems("", &errors, &mut problems);
        problems.sort();
        CoreError::Validation(problems.join("; "))
    })
}

fn collect_problems(prefix: &str, errors: &ValidationErrors, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for err in list {
                    let detail = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    out.push(format!("{path}: {detail}"));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_problems(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_problems(&format!("{path}[{index}]"), inner, out);
                }
            }
        }
    }
}
