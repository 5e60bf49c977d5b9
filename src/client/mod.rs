// File: ./src/client/mod.rs
pub mod core;
pub mod oauth;
pub mod session;

pub use crate::client::core::SheetsClient;
pub use crate::client::oauth::{CredentialProvider, InstalledFlow, StaticToken};
pub use crate::client::session::{SheetSession, ValuesApi};
