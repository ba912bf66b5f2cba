//! Sign-in, sign-up, and new-user form state.
//!
//! These forms only hold local input. Credentials and OTPs are never sent
//! anywhere; the flow reads just what the next route needs.

use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::navigation::UserType;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

/// Whether `email` looks like an address (drives the field's check icon).
pub fn email_looks_valid(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// Sign-up form with the Customer / Vendor tabs.
#[derive(Debug)]
pub struct SignUpForm {
    user_type: UserType,
    pub user_name: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
    business_name: String,
}

impl Default for SignUpForm {
    fn default() -> Self {
        Self {
            user_type: UserType::default(),
            user_name: String::new(),
            email: String::new(),
            password: SecretString::from(String::new()),
            confirm_password: SecretString::from(String::new()),
            business_name: String::new(),
        }
    }
}

impl SignUpForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_type(&self) -> UserType {
        self.user_type
    }

    /// Switch tabs. Leaving the Vendor tab drops the business name.
    pub fn select_tab(&mut self, user_type: UserType) {
        if user_type == UserType::Customer {
            self.business_name.clear();
        }
        self.user_type = user_type;
    }

    /// Business name; only shown (and kept) on the Vendor tab.
    pub fn business_name(&self) -> Option<&str> {
        match self.user_type {
            UserType::Vendor => Some(&self.business_name),
            UserType::Customer => None,
        }
    }

    /// Set the business name. Ignored on the Customer tab.
    pub fn set_business_name(&mut self, name: impl Into<String>) {
        if self.user_type == UserType::Vendor {
            self.business_name = name.into();
        }
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = SecretString::from(password.into());
    }

    pub fn set_confirm_password(&mut self, password: impl Into<String>) {
        self.confirm_password = SecretString::from(password.into());
    }

    pub fn email_looks_valid(&self) -> bool {
        email_looks_valid(&self.email)
    }

    pub fn passwords_match(&self) -> bool {
        self.password.expose_secret() == self.confirm_password.expose_secret()
    }
}

/// Sign-in form. Requesting an OTP only reveals the code field.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SignInForm {
    pub email: String,
    pub phone_number: String,
    pub otp: String,
    pub otp_visible: bool,
    pub remember_me: bool,
}

impl SignInForm {
    pub fn request_otp(&mut self) {
        self.otp_visible = true;
    }

    pub fn toggle_remember_me(&mut self) {
        self.remember_me = !self.remember_me;
    }
}

/// Details collected from a first-time user before the location screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewUserDetails {
    pub name: String,
    pub email: String,
    pub address: String,
    pub referral_code: String,
}
