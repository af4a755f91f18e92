//! Tests for profile validation rules.

use super::*;
use rstest::{fixture, rstest};

#[fixture]
fn valid_user() -> User {
    User::placeholder()
        .with_name("Test User")
        .with_email("test@example.com")
        .with_bio("Test bio")
}

#[rstest]
fn valid_user_has_no_errors(valid_user: User) {
    let errors = validate(&valid_user);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\t\n")]
fn blank_names_are_required(valid_user: User, #[case] name: &str) {
    let errors = validate(&valid_user.with_name(name));
    assert_eq!(errors.get(ProfileField::Name), Some(&FieldError::NameRequired));
    assert_eq!(errors.len(), 1);
}

#[rstest]
#[case("invalid-email")]
#[case("missing-at.example.com")]
#[case("user@")]
#[case("user@example")]
#[case("user@example.c")]
#[case("user@example.c0m")]
#[case("us er@example.com")]
#[case("user@example.com\n")]
#[case("")]
fn malformed_emails_are_rejected(valid_user: User, #[case] email: &str) {
    let errors = validate(&valid_user.with_email(email));
    assert_eq!(errors.get(ProfileField::Email), Some(&FieldError::InvalidEmail));
}

#[rstest]
#[case("test@example.com")]
#[case("first.last+tag@sub.example.co.uk")]
#[case("a_b%c-d@host-name.io")]
fn well_formed_emails_are_accepted(#[case] email: &str) {
    assert!(is_valid_email(email));
}

#[rstest]
fn bio_of_exactly_max_length_passes(valid_user: User) {
    let errors = validate(&valid_user.with_bio("a".repeat(BIO_MAX_CHARS)));
    assert!(errors.is_empty());
}

#[rstest]
fn bio_over_max_length_fails(valid_user: User) {
    let errors = validate(&valid_user.with_bio("a".repeat(BIO_MAX_CHARS + 1)));
    assert_eq!(
        errors.get(ProfileField::Bio),
        Some(&FieldError::BioTooLong { max: BIO_MAX_CHARS })
    );
}

#[rstest]
fn bio_length_counts_characters_not_bytes(valid_user: User) {
    let errors = validate(&valid_user.with_bio("é".repeat(BIO_MAX_CHARS)));
    assert!(errors.is_empty());
}

#[rstest]
fn every_rule_reports_independently() {
    let user = User::placeholder()
        .with_name("")
        .with_email("nope")
        .with_bio("a".repeat(BIO_MAX_CHARS + 1));
    let messages = validate(&user).messages();

    assert_eq!(
        messages.get("name").map(String::as_str),
        Some("Name is required")
    );
    assert_eq!(
        messages.get("email").map(String::as_str),
        Some("Please enter a valid email address")
    );
    assert_eq!(
        messages.get("bio").map(String::as_str),
        Some("Bio must be 500 characters or less")
    );
}

#[rstest]
fn validation_is_deterministic(valid_user: User) {
    let user = valid_user.with_email("bad");
    assert_eq!(validate(&user), validate(&user));
}

#[rstest]
#[case("name", Ok(ProfileField::Name))]
#[case("email", Ok(ProfileField::Email))]
#[case("bio", Ok(ProfileField::Bio))]
#[case("unknown", Err(UnknownProfileField { input: "unknown".to_owned() }))]
#[case("Name", Err(UnknownProfileField { input: "Name".to_owned() }))]
fn field_names_parse_strictly(
    #[case] input: &str,
    #[case] expected: Result<ProfileField, UnknownProfileField>,
) {
    assert_eq!(input.parse::<ProfileField>(), expected);
}

#[rstest]
#[case("abc", 3, true)]
#[case("ab", 3, false)]
#[case("", 0, true)]
fn min_length_helper(#[case] value: &str, #[case] min: usize, #[case] expected: bool) {
    assert_eq!(meets_min_length(value, min), expected);
}
