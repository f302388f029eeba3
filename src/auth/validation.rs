//! Input checks that run before anything goes over the wire.
//!
//! Two layers live here. The `check_*` functions are the session manager's
//! own preconditions: coarse, one message each, and a failure means the
//! backend is never called. The `validate_*_form` functions are the stricter
//! per-field rules a front end applies before it even calls the manager.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use super::messages::Messages;
use super::models::{LoginCredentials, RegistrationData, ResetPasswordData};

const MIN_USERNAME_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 6;

static LOGIN_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid login email regex"));
static REGISTER_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("valid registration email regex"));

/// Field name to message; empty means the form is valid.
pub type FieldErrors = BTreeMap<&'static str, &'static str>;

pub fn check_login(credentials: &LoginCredentials, messages: &Messages) -> Result<(), &'static str> {
    if credentials.username.is_empty() || credentials.password.is_empty() {
        return Err(messages.missing_credentials);
    }
    Ok(())
}

pub fn check_registration(data: &RegistrationData, messages: &Messages) -> Result<(), &'static str> {
    if data.email.is_empty() || data.password.is_empty() || data.business_name.is_empty() {
        return Err(messages.missing_registration_fields);
    }
    if data.password != data.confirm_password {
        return Err(messages.password_mismatch);
    }
    Ok(())
}

pub fn check_forgot_password(email: &str, messages: &Messages) -> Result<(), &'static str> {
    if email.is_empty() {
        return Err(messages.missing_email);
    }
    Ok(())
}

pub fn check_reset_password(data: &ResetPasswordData, messages: &Messages) -> Result<(), &'static str> {
    if data.password.is_empty() || data.confirm_password.is_empty() {
        return Err(messages.missing_new_password);
    }
    if data.password != data.confirm_password {
        return Err(messages.password_mismatch);
    }
    Ok(())
}

pub fn validate_login_form(credentials: &LoginCredentials, messages: &Messages) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let username = credentials.username.trim();
    if username.is_empty() {
        errors.insert("username", messages.username_or_email_required);
    } else if username.contains('@') {
        if !LOGIN_EMAIL.is_match(username) {
            errors.insert("username", messages.email_invalid);
        }
    } else if username.chars().count() < MIN_USERNAME_LEN {
        errors.insert("username", messages.username_too_short);
    }

    check_password_field(&credentials.password, messages, &mut errors);
    errors
}

pub fn validate_registration_form(data: &RegistrationData, messages: &Messages) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if data.username.trim().is_empty() {
        errors.insert("username", messages.username_required);
    }

    if data.email.trim().is_empty() {
        errors.insert("email", messages.email_required);
    } else if !REGISTER_EMAIL.is_match(&data.email) {
        errors.insert("email", messages.email_invalid);
    }

    check_password_field(&data.password, messages, &mut errors);

    if data.confirm_password.is_empty() {
        errors.insert("confirm_password", messages.confirm_password_required);
    } else if data.password != data.confirm_password {
        errors.insert("confirm_password", messages.confirm_password_mismatch);
    }

    if data.business_name.trim().is_empty() {
        errors.insert("business_name", messages.missing_registration_fields);
    }
    if data.phone_number.trim().is_empty() {
        errors.insert("phone_number", messages.phone_required);
    }
    if data.pos_type.is_none() {
        errors.insert("pos_type", messages.pos_type_required);
    }

    errors
}

fn check_password_field(password: &str, messages: &Messages, errors: &mut FieldErrors) {
    if password.is_empty() {
        errors.insert("password", messages.password_required);
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.insert("password", messages.password_too_short);
    }
}
