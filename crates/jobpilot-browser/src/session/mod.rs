//! Page session: a CDP session attached to a single page.

mod cookies;
mod core;
mod dom;
mod input;
mod js;
mod navigation;

pub use core::PageSession;
