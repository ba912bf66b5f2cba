//! Screens: per-screen form state and the flow that moves between them.

pub mod auth;
pub mod flow;

pub use auth::{NewUserDetails, SignInForm, SignUpForm, email_looks_valid};
pub use flow::{ScreenFlow, SignInOutcome};
