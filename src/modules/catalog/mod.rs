// Service catalog module

pub mod models;

pub use models::Service;
