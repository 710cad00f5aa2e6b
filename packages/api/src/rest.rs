//! URL construction and error-body decoding for the Supabase HTTP endpoints.
//!
//! Table calls go to PostgREST under `/rest/v1/<table>`, authentication calls
//! to GoTrue under `/auth/v1/...`. Both answer failures with a small JSON body
//! whose message field name differs between services and versions; see
//! [`error_message`].

use reqwest::Url;
use serde::Deserialize;
use store::{BackendError, RecipeId};

pub const RECIPES_TABLE: &str = "recipes";

/// `{base}/rest/v1/recipes?select=*&order=created_at.desc`
pub fn select_recipes_url(base: &str) -> Result<Url, BackendError> {
    let mut url = table_url(base, RECIPES_TABLE)?;
    url.query_pairs_mut()
        .append_pair("select", "*")
        .append_pair("order", "created_at.desc");
    Ok(url)
}

/// `{base}/rest/v1/recipes`
pub fn insert_recipe_url(base: &str) -> Result<Url, BackendError> {
    table_url(base, RECIPES_TABLE)
}

/// `{base}/rest/v1/recipes?id=eq.{id}`
pub fn recipe_by_id_url(base: &str, id: &RecipeId) -> Result<Url, BackendError> {
    let mut url = table_url(base, RECIPES_TABLE)?;
    url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));
    Ok(url)
}

pub fn table_url(base: &str, table: &str) -> Result<Url, BackendError> {
    parse(format!("{base}/rest/v1/{table}"))
}

/// `{base}/auth/v1/{path}`, e.g. `signup` or `token`.
pub fn auth_url(base: &str, path: &str) -> Result<Url, BackendError> {
    parse(format!("{base}/auth/v1/{path}"))
}

pub fn sign_in_url(base: &str) -> Result<Url, BackendError> {
    let mut url = auth_url(base, "token")?;
    url.query_pairs_mut().append_pair("grant_type", "password");
    Ok(url)
}

/// `{base}/auth/v1/token?grant_type=refresh_token`
pub fn refresh_url(base: &str) -> Result<Url, BackendError> {
    let mut url = auth_url(base, "token")?;
    url.query_pairs_mut().append_pair("grant_type", "refresh_token");
    Ok(url)
}

fn parse(url: String) -> Result<Url, BackendError> {
    Url::parse(&url).map_err(|e| BackendError::Network(format!("invalid URL {url}: {e}")))
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

/// Pull the human-readable message out of a failure body.
///
/// Falls back to the raw body, then to the bare status code.
pub fn error_message(status: u16, body: &str) -> String {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    parsed
        .msg
        .or(parsed.message)
        .or(parsed.error_description)
        .or(parsed.error)
        .filter(|m| !m.trim().is_empty())
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty() && !trimmed.starts_with('{')).then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| format!("Request failed with status {status}"))
}
