// Staff module

pub mod models;

pub use models::{Role, User};
