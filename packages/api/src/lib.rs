//! # API crate — the Backend Client for Recipe Vault
//!
//! This crate connects the recipe logic in `store` to the hosted Supabase
//! project. It implements the [`store::AuthBackend`] and [`store::RecipeTable`]
//! traits over HTTP and owns everything needed to reach the service.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | GoTrue request/response payloads and session persistence in browser storage |
//! | [`config`] | Project URL and anon key, from build-time variables, the environment, or `recipe-vault.toml` |
//! | [`rest`] | PostgREST / GoTrue URL construction and error-body decoding |
//! | `client` | [`SupabaseClient`], the trait implementations themselves |

pub mod auth;
mod client;
pub mod config;
pub mod rest;

pub use client::SupabaseClient;
pub use config::{ConfigError, SupabaseConfig};
pub use store::{BackendError, Recipe, RecipeBook, Session};
