//! Navigation: typed routes and the stack that holds them.
//!
//! Screens move forward with `navigate`, swap themselves out with `replace`
//! (sign-up and sign-in toggling), and go back with `go_back`. Route params
//! are the only channel for data between screens.

pub mod navigator;
pub mod route;

pub use navigator::{Frame, Navigator};
pub use route::{Route, RouteName, UserType};
