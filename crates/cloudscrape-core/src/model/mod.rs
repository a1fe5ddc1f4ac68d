//! Canonical domain types for mesh scraping.

pub mod mac;
pub mod node;
pub mod user;

pub use mac::MacAddress;
pub use node::{Node, NodeKind, NodeStatus};
pub use user::User;
