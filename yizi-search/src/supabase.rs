//! Supabase (PostgREST) character store
//!
//! Two read-only query shapes against `{base_url}/rest/v1/{table}`:
//! `character=ilike.%text%` and `radical=eq.N`, both with `limit`.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};
use url::Url;

use yizi_core::{CharacterQuery, CharacterRecord, CharacterStore, QueryError, StoreConfig};

/// Longest error body kept in logs
const MAX_LOGGED_BODY: usize = 500;

/// Error body returned by PostgREST on non-2xx responses
#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: Option<String>,
    code: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

/// Character store backed by a Supabase project
pub struct SupabaseStore {
    client: Client,
    config: StoreConfig,
}

impl SupabaseStore {
    /// Create a store client; the timeout from `config` applies to every request
    pub fn new(config: StoreConfig) -> Result<Self, QueryError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| QueryError::transport(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

/// Build the PostgREST request URL for `query`
pub fn build_url(base_url: &str, table: &str, query: &CharacterQuery) -> Result<Url, QueryError> {
    let endpoint = format!("{}/rest/v1/{}", base_url.trim_end_matches('/'), table);
    let mut url = Url::parse(&endpoint)
        .map_err(|e| QueryError::transport(format!("invalid store URL '{}': {}", endpoint, e)))?;

    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("select", "*");
        match query {
            CharacterQuery::GlyphContains { text, .. } => {
                pairs.append_pair("character", &format!("ilike.%{}%", text));
            }
            CharacterQuery::RadicalEquals { number, .. } => {
                pairs.append_pair("radical", &format!("eq.{}", number));
            }
        }
        pairs.append_pair("limit", &query.limit().to_string());
    }

    Ok(url)
}

/// Turn a non-success response body into a [`QueryError`]
///
/// Only the PostgREST `message` is surfaced; anything else leaves the
/// message empty so the caller falls back to the generic text.
pub fn parse_error_body(status: u16, body: &str) -> QueryError {
    let message = match serde_json::from_str::<PostgrestError>(body) {
        Ok(err) => {
            debug!(
                status,
                code = err.code.as_deref().unwrap_or(""),
                details = err.details.as_deref().unwrap_or(""),
                hint = err.hint.as_deref().unwrap_or(""),
                "store rejected query"
            );
            err.message.filter(|m| !m.trim().is_empty())
        }
        Err(_) => None,
    };
    QueryError::Status { status, message }
}

/// Decode a success body into character records
pub fn decode_records(body: &str) -> Result<Vec<CharacterRecord>, QueryError> {
    serde_json::from_str(body).map_err(|e| QueryError::decode(e.to_string()))
}

fn truncate_for_log(body: &str) -> String {
    if body.len() > MAX_LOGGED_BODY {
        let mut end = MAX_LOGGED_BODY;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}

#[async_trait]
impl CharacterStore for SupabaseStore {
    #[instrument(skip(self), fields(table = %self.config.table))]
    async fn fetch(&self, query: &CharacterQuery) -> Result<Vec<CharacterRecord>, QueryError> {
        let url = build_url(&self.config.url, &self.config.table, query)?;
        debug!(%url, "querying store");

        let response = self
            .client
            .get(url)
            .header("apikey", &self.config.api_key)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| QueryError::transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| QueryError::transport(e.to_string()))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), body = %truncate_for_log(&body), "store query failed");
            return Err(parse_error_body(status.as_u16(), &body));
        }

        let records = decode_records(&body)?;
        debug!(count = records.len(), "store returned records");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn pairs(url: &Url) -> Vec<(String, String)> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_glyph_query_url() {
        let url = build_url(
            "https://demo.supabase.co",
            "characters",
            &CharacterQuery::glyph_contains("永"),
        )
        .unwrap();
        assert_eq!(url.path(), "/rest/v1/characters");
        assert_eq!(
            pairs(&url),
            vec![
                ("select".to_string(), "*".to_string()),
                ("character".to_string(), "ilike.%永%".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_radical_query_url() {
        let url = build_url(
            "https://demo.supabase.co/",
            "chars",
            &CharacterQuery::radical_equals(64),
        )
        .unwrap();
        assert_eq!(url.path(), "/rest/v1/chars");
        assert_eq!(
            pairs(&url),
            vec![
                ("select".to_string(), "*".to_string()),
                ("radical".to_string(), "eq.64".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = build_url("not a url", "characters", &CharacterQuery::radical_equals(1)).unwrap_err();
        assert!(matches!(err, QueryError::Transport { .. }));
    }

    #[test]
    fn test_parse_postgrest_error() {
        let body = r#"{"code":"42P01","details":null,"hint":null,"message":"relation \"public.chars\" does not exist"}"#;
        let err = parse_error_body(404, body);
        assert_eq!(err.message(), Some("relation \"public.chars\" does not exist"));
        assert!(matches!(err, QueryError::Status { status: 404, .. }));
    }

    #[test]
    fn test_unparseable_error_falls_back() {
        let err = parse_error_body(502, "<html>Bad Gateway</html>");
        assert_eq!(err.message(), None);
        assert_eq!(err.user_message(), "查詢時發生錯誤");

        let err = parse_error_body(500, r#"{"message":""}"#);
        assert_eq!(err.message(), None);
    }

    #[test]
    fn test_decode_records() {
        let body = r#"[{"id":1,"chapter":1,"serial":1,"character":"永","radical":85,"video_url":"https://www.youtube.com/watch?v=a"}]"#;
        let records = decode_records(body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].glyph, "永");

        assert!(decode_records("[]").unwrap().is_empty());
        assert!(matches!(decode_records("{}"), Err(QueryError::Decode { .. })));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let body = "永".repeat(400);
        let truncated = truncate_for_log(&body);
        assert!(truncated.ends_with("..."));
        assert!(truncated.len() <= MAX_LOGGED_BODY + 3);
    }

    #[test]
    fn test_new_keeps_config() {
        let config = StoreConfig {
            url: "https://demo.supabase.co".to_string(),
            api_key: "anon".to_string(),
            table: "characters".to_string(),
            timeout: Duration::from_secs(5),
        };
        let store = SupabaseStore::new(config.clone()).unwrap();
        assert_eq!(store.config(), &config);
    }
}
