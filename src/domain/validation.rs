//! Request-shape checks shared by the backend services and the gateway

use super::DomainError;
use super::repositories::{
    CommentInput, CreateItemInput, CreateItemRequestInput, CreateUserInput, UpdateItemInput,
    UpdateUserInput,
};

fn require_text(field: &str, value: Option<&str>) -> Result<(), DomainError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(DomainError::Validation(format!("{} must not be blank", field))),
    }
}

fn reject_blank(field: &str, value: Option<&str>) -> Result<(), DomainError> {
    match value {
        Some(v) if v.trim().is_empty() => {
            Err(DomainError::Validation(format!("{} must not be blank", field)))
        }
        _ => Ok(()),
    }
}

/// `local@domain.tld` with no whitespace
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

fn check_email(email: &str) -> Result<(), DomainError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(DomainError::Validation(format!(
            "email '{}' is not a valid address",
            email
        )))
    }
}

pub fn validate_new_user(input: &CreateUserInput) -> Result<(), DomainError> {
    require_text("name", input.name.as_deref())?;
    require_text("email", input.email.as_deref())?;
    if let Some(email) = &input.email {
        check_email(email)?;
    }
    Ok(())
}

pub fn validate_user_update(input: &UpdateUserInput) -> Result<(), DomainError> {
    reject_blank("name", input.name.as_deref())?;
    if let Some(email) = &input.email {
        check_email(email)?;
    }
    Ok(())
}

pub fn validate_new_item(input: &CreateItemInput) -> Result<(), DomainError> {
    require_text("name", input.name.as_deref())?;
    require_text("description", input.description.as_deref())?;
    if input.available.is_none() {
        return Err(DomainError::Validation(
            "available must be present".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_item_update(input: &UpdateItemInput) -> Result<(), DomainError> {
    reject_blank("name", input.name.as_deref())?;
    reject_blank("description", input.description.as_deref())
}

pub fn validate_comment(input: &CommentInput) -> Result<(), DomainError> {
    require_text("text", input.text.as_deref())
}

pub fn validate_item_request(input: &CreateItemRequestInput) -> Result<(), DomainError> {
    require_text("description", input.description.as_deref())
}
