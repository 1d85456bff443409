//! Model-based navigation of desktop application UIs.
//!
//! A navigation model is a directed graph of application states whose
//! edges carry action labels such as `click_element(btn_ok)`. Planning
//! picks the route with the fewest transitions; execution resolves each
//! label against an object repository and runs it through a
//! [`connector::connector::Connector`], which talks to a UI-automation
//! driver.

pub mod action;
pub mod cli;
pub mod connector;
pub mod driver;
pub mod element;
pub mod error;
pub mod navigation;
pub mod repository;
pub mod trace;
pub mod wait;
