use super::*;
use crate::auth::messages::THAI;
use crate::auth::models::PosType;

fn credentials(username: &str, password: &str) -> LoginCredentials {
    LoginCredentials {
        username: username.to_string(),
        password: password.to_string(),
    }
}

fn registration() -> RegistrationData {
    RegistrationData {
        username: "somchai".into(),
        email: "somchai@example.com".into(),
        password: "secret1".into(),
        confirm_password: "secret1".into(),
        business_name: "Somchai Noodles".into(),
        phone_number: "0812345678".into(),
        pos_type: Some(PosType::Restaurant),
    }
}

// =============================================================
// Session preconditions
// =============================================================

#[test]
fn login_requires_both_fields() {
    assert_eq!(check_login(&credentials("", "pw"), &THAI), Err(THAI.missing_credentials));
    assert_eq!(check_login(&credentials("bob", ""), &THAI), Err(THAI.missing_credentials));
    assert_eq!(check_login(&credentials("bob", "pw"), &THAI), Ok(()));
}

#[test]
fn registration_requires_core_fields() {
    let mut data = registration();
    data.business_name.clear();
    assert_eq!(check_registration(&data, &THAI), Err(THAI.missing_registration_fields));
}

#[test]
fn registration_rejects_mismatched_confirmation() {
    let mut data = registration();
    data.confirm_password = "other".into();
    assert_eq!(check_registration(&data, &THAI), Err(THAI.password_mismatch));
}

#[test]
fn registration_precondition_ignores_optional_fields() {
    let mut data = registration();
    data.username.clear();
    data.phone_number.clear();
    data.pos_type = None;
    assert_eq!(check_registration(&data, &THAI), Ok(()));
}

#[test]
fn forgot_password_requires_email() {
    assert_eq!(check_forgot_password("", &THAI), Err(THAI.missing_email));
    assert_eq!(check_forgot_password("a@b.co", &THAI), Ok(()));
}

#[test]
fn reset_password_checks_presence_then_equality() {
    let mut data = ResetPasswordData {
        token: "t".into(),
        password: String::new(),
        confirm_password: "x".into(),
    };
    assert_eq!(check_reset_password(&data, &THAI), Err(THAI.missing_new_password));

    data.password = "y".into();
    assert_eq!(check_reset_password(&data, &THAI), Err(THAI.password_mismatch));

    data.password = "x".into();
    assert_eq!(check_reset_password(&data, &THAI), Ok(()));
}

// =============================================================
// Login form
// =============================================================

#[test]
fn login_form_accepts_username_and_email() {
    assert!(validate_login_form(&credentials("bob", "secret1"), &THAI).is_empty());
    assert!(validate_login_form(&credentials("bob@shop.co", "secret1"), &THAI).is_empty());
}

#[test]
fn login_form_flags_short_username() {
    let errors = validate_login_form(&credentials("bo", "secret1"), &THAI);
    assert_eq!(errors.get("username"), Some(&THAI.username_too_short));
}

#[test]
fn login_form_flags_malformed_email() {
    let errors = validate_login_form(&credentials("bob@shop", "secret1"), &THAI);
    assert_eq!(errors.get("username"), Some(&THAI.email_invalid));
}

#[test]
fn login_form_flags_blank_username_and_short_password() {
    let errors = validate_login_form(&credentials("   ", "123"), &THAI);
    assert_eq!(errors.get("username"), Some(&THAI.username_or_email_required));
    assert_eq!(errors.get("password"), Some(&THAI.password_too_short));
}

// =============================================================
// Registration form
// =============================================================

#[test]
fn registration_form_valid() {
    assert!(validate_registration_form(&registration(), &THAI).is_empty());
}

#[test]
fn registration_form_collects_every_problem() {
    let data = RegistrationData::default();
    let errors = validate_registration_form(&data, &THAI);
    assert_eq!(errors.get("username"), Some(&THAI.username_required));
    assert_eq!(errors.get("email"), Some(&THAI.email_required));
    assert_eq!(errors.get("password"), Some(&THAI.password_required));
    assert_eq!(errors.get("confirm_password"), Some(&THAI.confirm_password_required));
    assert_eq!(errors.get("phone_number"), Some(&THAI.phone_required));
    assert_eq!(errors.get("pos_type"), Some(&THAI.pos_type_required));
}

#[test]
fn registration_form_flags_mismatch_and_bad_email() {
    let mut data = registration();
    data.email = "not-an-email".into();
    data.confirm_password = "secret2".into();
    let errors = validate_registration_form(&data, &THAI);
    assert_eq!(errors.get("email"), Some(&THAI.email_invalid));
    assert_eq!(errors.get("confirm_password"), Some(&THAI.confirm_password_mismatch));
}
