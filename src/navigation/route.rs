//! Route identifiers and their parameters.
//!
//! Every screen the app can show is a variant of [`Route`], carrying the
//! params that screen needs. Typed code can only name declared routes; the
//! string boundary ([`RouteName::from_str`], [`Route::from_parts`]) is where
//! an unknown name or a missing param is reported.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NavigationError;
use crate::location::LocationCommit;

/// Who is signing up. Chosen on the sign-up tabs and carried as a route param.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    #[default]
    Customer,
    Vendor,
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer => write!(f, "Customer"),
            Self::Vendor => write!(f, "Vendor"),
        }
    }
}

/// A screen plus its params.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "route", content = "params")]
pub enum Route {
    Onboarding,
    TabNavigator,
    Home {
        /// Delivery location committed on the location screen, if any.
        #[serde(skip_serializing_if = "Option::is_none")]
        delivery: Option<LocationCommit>,
    },
    SignIn,
    SignUp,
    NewPassword,
    ForgotPassword,
    ForgotPasswordSentEmail,
    ConfirmationCode,
    VerifyYourPhoneNumber {
        #[serde(rename = "userType")]
        user_type: UserType,
    },
    SignUpaccountCreated,
    NewUserScreen,
    LocationScreen,
    Menulist {
        category: String,
    },
    Reviews,
    LeaveAReview,
    OrderHistory,
    EditProfile,
    Product,
    Checkout,
    OrderSuccessful,
    OrderFailed,
    TrackYourOrder,
    Promocodes,
    Wallet,
    AddANewCard,
    AddANewAddress,
}

impl Route {
    /// Home without a committed delivery location.
    pub fn home() -> Self {
        Self::Home { delivery: None }
    }

    pub fn name(&self) -> RouteName {
        match self {
            Self::Onboarding => RouteName::Onboarding,
            Self::TabNavigator => RouteName::TabNavigator,
            Self::Home { .. } => RouteName::Home,
            Self::SignIn => RouteName::SignIn,
            Self::SignUp => RouteName::SignUp,
            Self::NewPassword => RouteName::NewPassword,
            Self::ForgotPassword => RouteName::ForgotPassword,
            Self::ForgotPasswordSentEmail => RouteName::ForgotPasswordSentEmail,
            Self::ConfirmationCode => RouteName::ConfirmationCode,
            Self::VerifyYourPhoneNumber { .. } => RouteName::VerifyYourPhoneNumber,
            Self::SignUpaccountCreated => RouteName::SignUpaccountCreated,
            Self::NewUserScreen => RouteName::NewUserScreen,
            Self::LocationScreen => RouteName::LocationScreen,
            Self::Menulist { .. } => RouteName::Menulist,
            Self::Reviews => RouteName::Reviews,
            Self::LeaveAReview => RouteName::LeaveAReview,
            Self::OrderHistory => RouteName::OrderHistory,
            Self::EditProfile => RouteName::EditProfile,
            Self::Product => RouteName::Product,
            Self::Checkout => RouteName::Checkout,
            Self::OrderSuccessful => RouteName::OrderSuccessful,
            Self::OrderFailed => RouteName::OrderFailed,
            Self::TrackYourOrder => RouteName::TrackYourOrder,
            Self::Promocodes => RouteName::Promocodes,
            Self::Wallet => RouteName::Wallet,
            Self::AddANewCard => RouteName::AddANewCard,
            Self::AddANewAddress => RouteName::AddANewAddress,
        }
    }

    /// Build a route from its string name and a JSON params object.
    ///
    /// `params` may be `null` for routes that take none; extra keys are ignored.
    pub fn from_parts(name: &str, params: &serde_json::Value) -> Result<Self, NavigationError> {
        let name: RouteName = name.parse()?;
        let route = match name {
            RouteName::Onboarding => Self::Onboarding,
            RouteName::TabNavigator => Self::TabNavigator,
            RouteName::Home => Self::Home {
                delivery: optional_param(name, params, "delivery")?,
            },
            RouteName::SignIn => Self::SignIn,
            RouteName::SignUp => Self::SignUp,
            RouteName::NewPassword => Self::NewPassword,
            RouteName::ForgotPassword => Self::ForgotPassword,
            RouteName::ForgotPasswordSentEmail => Self::ForgotPasswordSentEmail,
            RouteName::ConfirmationCode => Self::ConfirmationCode,
            RouteName::VerifyYourPhoneNumber => Self::VerifyYourPhoneNumber {
                user_type: required_param(name, params, "userType")?,
            },
            RouteName::SignUpaccountCreated => Self::SignUpaccountCreated,
            RouteName::NewUserScreen => Self::NewUserScreen,
            RouteName::LocationScreen => Self::LocationScreen,
            RouteName::Menulist => Self::Menulist {
                category: required_param(name, params, "category")?,
            },
            RouteName::Reviews => Self::Reviews,
            RouteName::LeaveAReview => Self::LeaveAReview,
            RouteName::OrderHistory => Self::OrderHistory,
            RouteName::EditProfile => Self::EditProfile,
            RouteName::Product => Self::Product,
            RouteName::Checkout => Self::Checkout,
            RouteName::OrderSuccessful => Self::OrderSuccessful,
            RouteName::OrderFailed => Self::OrderFailed,
            RouteName::TrackYourOrder => Self::TrackYourOrder,
            RouteName::Promocodes => Self::Promocodes,
            RouteName::Wallet => Self::Wallet,
            RouteName::AddANewCard => Self::AddANewCard,
            RouteName::AddANewAddress => Self::AddANewAddress,
        };
        Ok(route)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn required_param<T: serde::de::DeserializeOwned>(
    route: RouteName,
    params: &serde_json::Value,
    key: &str,
) -> Result<T, NavigationError> {
    optional_param(route, params, key)?.ok_or_else(|| NavigationError::MissingParam {
        route: route.to_string(),
        param: key.to_string(),
    })
}

fn optional_param<T: serde::de::DeserializeOwned>(
    route: RouteName,
    params: &serde_json::Value,
    key: &str,
) -> Result<Option<T>, NavigationError> {
    match params.get(key) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|e| NavigationError::InvalidParams {
                route: route.to_string(),
                reason: format!("{key}: {e}"),
            }),
    }
}

/// Bare route identifier, without params.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteName {
    Onboarding,
    TabNavigator,
    Home,
    SignIn,
    SignUp,
    NewPassword,
    ForgotPassword,
    ForgotPasswordSentEmail,
    ConfirmationCode,
    VerifyYourPhoneNumber,
    SignUpaccountCreated,
    NewUserScreen,
    LocationScreen,
    Menulist,
    Reviews,
    LeaveAReview,
    OrderHistory,
    EditProfile,
    Product,
    Checkout,
    OrderSuccessful,
    OrderFailed,
    TrackYourOrder,
    Promocodes,
    Wallet,
    AddANewCard,
    AddANewAddress,
}

impl RouteName {
    pub const ALL: [RouteName; 27] = [
        Self::Onboarding,
        Self::TabNavigator,
        Self::Home,
        Self::SignIn,
        Self::SignUp,
        Self::NewPassword,
        Self::ForgotPassword,
        Self::ForgotPasswordSentEmail,
        Self::ConfirmationCode,
        Self::VerifyYourPhoneNumber,
        Self::SignUpaccountCreated,
        Self::NewUserScreen,
        Self::LocationScreen,
        Self::Menulist,
        Self::Reviews,
        Self::LeaveAReview,
        Self::OrderHistory,
        Self::EditProfile,
        Self::Product,
        Self::Checkout,
        Self::OrderSuccessful,
        Self::OrderFailed,
        Self::TrackYourOrder,
        Self::Promocodes,
        Self::Wallet,
        Self::AddANewCard,
        Self::AddANewAddress,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Onboarding => "Onboarding",
            Self::TabNavigator => "TabNavigator",
            Self::Home => "Home",
            Self::SignIn => "SignIn",
            Self::SignUp => "SignUp",
            Self::NewPassword => "NewPassword",
            Self::ForgotPassword => "ForgotPassword",
            Self::ForgotPasswordSentEmail => "ForgotPasswordSentEmail",
            Self::ConfirmationCode => "ConfirmationCode",
            Self::VerifyYourPhoneNumber => "VerifyYourPhoneNumber",
            Self::SignUpaccountCreated => "SignUpaccountCreated",
            Self::NewUserScreen => "NewUserScreen",
            Self::LocationScreen => "LocationScreen",
            Self::Menulist => "Menulist",
            Self::Reviews => "Reviews",
            Self::LeaveAReview => "LeaveAReview",
            Self::OrderHistory => "OrderHistory",
            Self::EditProfile => "EditProfile",
            Self::Product => "Product",
            Self::Checkout => "Checkout",
            Self::OrderSuccessful => "OrderSuccessful",
            Self::OrderFailed => "OrderFailed",
            Self::TrackYourOrder => "TrackYourOrder",
            Self::Promocodes => "Promocodes",
            Self::Wallet => "Wallet",
            Self::AddANewCard => "AddANewCard",
            Self::AddANewAddress => "AddANewAddress",
        }
    }
}

impl std::fmt::Display for RouteName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteName {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| NavigationError::UnknownRoute {
                name: s.to_string(),
            })
    }
}
