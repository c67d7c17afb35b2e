#![doc = "The `taskkeep` library crate."]
#![doc = ""]
#![doc = "Credential hashing, bearer-token issuance and verification, the request"]
#![doc = "authorization gate, ownership enforcement, the record store contract and"]
#![doc = "the HTTP routes built on them. The binary (`main.rs`) wires these together."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;

pub use crate::config::{Config, SigningSecret};
pub use crate::error::AppError;
pub use crate::state::AppState;
