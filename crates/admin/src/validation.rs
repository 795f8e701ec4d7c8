//! Client-side input checks run before any request is sent.
//!
//! Every function here is pure: it either returns the normalized value that
//! should go over the wire or the first rule the input breaks.

use thiserror::Error;

use ybs_core::{Amount, Email, EmailError};

use crate::models::{NewUser, SettingsUpdate, SystemSettings, UserUpdate};

/// Minimum admin password length accepted by the login form.
pub const MIN_PASSWORD_LENGTH: usize = 6;
/// Largest page size the backend serves.
pub const MAX_PAGE_SIZE: u32 = 100;
/// Upper bound for free-text reasons and reviewer notes.
pub const MAX_NOTE_LENGTH: usize = 1000;

/// A form field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a valid email address")]
    InvalidEmail(#[from] EmailError),

    #[error("Password is required")]
    MissingPassword,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("Page must be 1 or greater")]
    InvalidPage,

    #[error("Page size must be between 1 and {max}")]
    InvalidPageSize { max: u32 },

    #[error("Nothing to update")]
    EmptyUpdate,

    #[error("{0} must not be negative")]
    NegativeAmount(&'static str),

    #[error("Minimum withdrawal cannot exceed maximum withdrawal")]
    WithdrawalRange,

    #[error("Withdrawal fee must be between 0 and 100 percent")]
    FeeOutOfRange,
}

/// Check login form input, returning the parsed email.
///
/// # Errors
///
/// Returns the first failing rule: email shape, then password presence and
/// length.
pub fn validate_login(email: &str, password: &str) -> Result<Email, ValidationError> {
    let email = Email::parse(email)?;
    if password.is_empty() {
        return Err(ValidationError::MissingPassword);
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(email)
}

/// Check page and limit of a paged list request.
///
/// # Errors
///
/// Returns `InvalidPage` for page 0 and `InvalidPageSize` for a limit outside
/// `1..=100`.
pub const fn validate_pagination(page: u32, limit: u32) -> Result<(), ValidationError> {
    if page == 0 {
        return Err(ValidationError::InvalidPage);
    }
    if limit == 0 || limit > MAX_PAGE_SIZE {
        return Err(ValidationError::InvalidPageSize { max: MAX_PAGE_SIZE });
    }
    Ok(())
}

/// Trim a required free-text field such as a rejection reason.
///
/// # Errors
///
/// Returns `MissingField` when blank and `TooLong` past [`MAX_NOTE_LENGTH`].
pub fn require_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    if value.chars().count() > MAX_NOTE_LENGTH {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_NOTE_LENGTH,
        });
    }
    Ok(value.to_string())
}

/// Normalize a new-user form.
///
/// # Errors
///
/// Returns `MissingField` for blank names.
pub fn validate_new_user(user: NewUser) -> Result<NewUser, ValidationError> {
    let first_name = require_name("First name", &user.first_name)?;
    let last_name = require_name("Last name", &user.last_name)?;
    Ok(NewUser {
        first_name,
        last_name,
        phone: non_blank(user.phone),
        referred_by: non_blank(user.referred_by),
        ..user
    })
}

/// Normalize a profile update.
///
/// # Errors
///
/// Returns `EmptyUpdate` when no field is set and `MissingField` when a name
/// is set to blank.
pub fn validate_user_update(update: UserUpdate) -> Result<UserUpdate, ValidationError> {
    if update.is_empty() {
        return Err(ValidationError::EmptyUpdate);
    }
    let first_name = update
        .first_name
        .map(|name| require_name("First name", &name))
        .transpose()?;
    let last_name = update
        .last_name
        .map(|name| require_name("Last name", &name))
        .transpose()?;
    Ok(UserUpdate {
        first_name,
        last_name,
        ..update
    })
}

/// Check a settings update against the settings it would modify.
///
/// # Errors
///
/// Returns the first failing rule: empty update, blank name or email,
/// negative amounts, an inverted withdrawal range, or a fee over 100%.
pub fn validate_settings(
    update: &SettingsUpdate,
    current: &SystemSettings,
) -> Result<(), ValidationError> {
    if update.is_empty() {
        return Err(ValidationError::EmptyUpdate);
    }
    if let Some(name) = &update.platform_name {
        require_name("Platform name", name)?;
    }
    if let Some(email) = &update.support_email {
        Email::parse(email)?;
    }

    let next = update.apply_to(current);
    for (field, amount) in [
        ("Referral bonus", next.referral_bonus),
        ("Minimum withdrawal", next.min_withdrawal),
        ("Maximum withdrawal", next.max_withdrawal),
    ] {
        if amount < Amount::ZERO {
            return Err(ValidationError::NegativeAmount(field));
        }
    }
    if next.min_withdrawal > next.max_withdrawal {
        return Err(ValidationError::WithdrawalRange);
    }
    if next.withdrawal_fee_percent < Amount::ZERO
        || next.withdrawal_fee_percent > Amount::from_minor(10_000)
    {
        return Err(ValidationError::FeeOutOfRange);
    }
    Ok(())
}

fn require_name(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    if value.chars().count() > 100 {
        return Err(ValidationError::TooLong { field, max: 100 });
    }
    Ok(value.to_string())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
