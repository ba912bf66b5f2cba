//! Flitzy: navigation and address-capture flow core.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod geo;
pub mod location;
pub mod navigation;
pub mod screens;
