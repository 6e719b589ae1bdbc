//! Link preview endpoint.
//!
//! `GET /api/link-preview?url=...` fetches the page and extracts title,
//! description meta tag, Open Graph image, and the URL's host. Absent tags
//! come back as empty strings, never as errors. There is no cache: every
//! request re-fetches and re-parses (documented contract).
//!
//! The fetch is bounded (timeout and redirect limit on the shared client,
//! body size cap here) and the target URL is validated first: http(s)
//! schemes only, host required, loopback/private addresses refused unless
//! explicitly allowed in configuration.

use axum::extract::{Query, State};
use axum::Json;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ApiError;
use crate::state::AppState;

/// Maximum preview body size accepted from the remote server.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Query parameters for the preview endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewQuery {
    pub url: Option<String>,
}

/// Extracted page metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewResponse {
    pub title: String,
    pub description: String,
    pub image: String,
    pub domain: String,
}

/// `GET /api/link-preview?url=...`
pub async fn link_preview(
    State(state): State<AppState>,
    Query(query): Query<PreviewQuery>,
) -> Result<Json<PreviewResponse>, ApiError> {
    let raw = query.url.ok_or_else(|| {
        ApiError::BadRequest("Missing required query parameter: url".to_string())
    })?;
    let url = validate_preview_url(&raw, state.config.preview_allow_private)?;

    let html = fetch_page(&state.http, url.clone()).await?;
    let mut preview = extract_metadata(&html);
    preview.domain = url.host_str().unwrap_or_default().to_string();

    tracing::debug!(url = %url, title = %preview.title, "link preview extracted");
    Ok(Json(preview))
}

/// Parse and vet the client-supplied URL before any network egress.
fn validate_preview_url(raw: &str, allow_private: bool) -> Result<Url, ApiError> {
    let url = Url::parse(raw)
        .map_err(|e| ApiError::BadRequest(format!("Invalid url parameter: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::BadRequest(
            "url scheme must be http or https".to_string(),
        ));
    }
    if url.host_str().is_none() {
        return Err(ApiError::BadRequest("url must include a host".to_string()));
    }
    if !allow_private && is_private_host(&url) {
        return Err(ApiError::BadRequest(
            "url targets a loopback or private address".to_string(),
        ));
    }

    Ok(url)
}

/// Literal loopback/private/link-local targets. Hostnames other than
/// "localhost" are not resolved here; this blocks the direct cases.
fn is_private_host(url: &Url) -> bool {
    match url.host() {
        Some(url::Host::Ipv4(ip)) => {
            ip.is_loopback() || ip.is_private() || ip.is_link_local() || ip.is_unspecified()
        }
        Some(url::Host::Ipv6(ip)) => ip.is_loopback() || ip.is_unspecified(),
        Some(url::Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        None => true,
    }
}

/// Fetch the page with the shared bounded client, streaming the body so the
/// size cap bounds memory as well as the final length.
async fn fetch_page(client: &reqwest::Client, url: Url) -> Result<String, ApiError> {
    let mut resp = client
        .get(url)
        .send()
        .await
        .map_err(|e| ApiError::Upstream(e.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(ApiError::Upstream(format!("remote returned {status}")));
    }

    let mut body = Vec::new();
    while let Some(chunk) = resp
        .chunk()
        .await
        .map_err(|e| ApiError::Upstream(e.to_string()))?
    {
        push_capped(&mut body, &chunk)?;
    }

    Ok(String::from_utf8_lossy(&body).into_owned())
}

/// Append a chunk to the body buffer, failing once the running total
/// exceeds [`MAX_BODY_BYTES`]. The download aborts at that point instead
/// of buffering the rest of the response.
fn push_capped(buf: &mut Vec<u8>, chunk: &[u8]) -> Result<(), ApiError> {
    if buf.len() + chunk.len() > MAX_BODY_BYTES {
        return Err(ApiError::Upstream(format!(
            "response body exceeds {MAX_BODY_BYTES} bytes"
        )));
    }
    buf.extend_from_slice(chunk);
    Ok(())
}

/// Extract title, description, and og:image from the document. The caller
/// fills in `domain` from the request URL.
fn extract_metadata(html: &str) -> PreviewResponse {
    let doc = Html::parse_document(html);

    let title_sel = Selector::parse("title").expect("valid selector");
    let desc_sel = Selector::parse(r#"meta[name="description"]"#).expect("valid selector");
    let image_sel = Selector::parse(r#"meta[property="og:image"]"#).expect("valid selector");

    let title = doc
        .select(&title_sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let meta_content = |sel: &Selector| {
        doc.select(sel)
            .next()
            .and_then(|el| el.value().attr("content"))
            .unwrap_or_default()
            .to_string()
    };

    PreviewResponse {
        title,
        description: meta_content(&desc_sel),
        image: meta_content(&image_sel),
        domain: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_PAGE: &str = r#"<!doctype html>
        <html><head>
            <title> Product Launch </title>
            <meta name="description" content="Our spring launch.">
            <meta property="og:image" content="https://cdn.example.com/og.png">
        </head><body><h1>Launch</h1></body></html>"#;

    #[test]
    fn extracts_all_fields() {
        let preview = extract_metadata(FULL_PAGE);
        assert_eq!(preview.title, "Product Launch");
        assert_eq!(preview.description, "Our spring launch.");
        assert_eq!(preview.image, "https://cdn.example.com/og.png");
    }

    #[test]
    fn missing_description_is_empty_string_not_error() {
        let html = "<html><head><title>Bare</title></head><body></body></html>";
        let preview = extract_metadata(html);
        assert_eq!(preview.title, "Bare");
        assert_eq!(preview.description, "");
        assert_eq!(preview.image, "");
    }

    #[test]
    fn titleless_page_yields_empty_title() {
        let preview = extract_metadata("<html><body>plain</body></html>");
        assert_eq!(preview.title, "");
    }

    #[test]
    fn malformed_markup_still_parses() {
        // html5ever error-corrects; extraction must not panic or fail.
        let preview = extract_metadata("<title>Broken<title><p><meta name=description");
        assert_eq!(preview.title, "Broken");
    }

    #[test]
    fn push_capped_accumulates_until_the_cap() {
        let mut buf = Vec::new();
        push_capped(&mut buf, &[0u8; 1024]).unwrap();
        push_capped(&mut buf, &vec![0u8; MAX_BODY_BYTES - 1024]).unwrap();
        assert_eq!(buf.len(), MAX_BODY_BYTES);

        let err = push_capped(&mut buf, &[0u8; 1]).unwrap_err();
        assert!(matches!(err, ApiError::Upstream(_)));
        // The buffer stops growing once the cap is hit.
        assert_eq!(buf.len(), MAX_BODY_BYTES);
    }

    #[test]
    fn validate_accepts_http_and_https() {
        assert!(validate_preview_url("https://example.com/page", false).is_ok());
        assert!(validate_preview_url("http://example.com", false).is_ok());
    }

    #[test]
    fn validate_rejects_other_schemes() {
        for raw in [
            "ftp://example.com/file",
            "javascript:alert(1)",
            "file:///etc/passwd",
        ] {
            let err = validate_preview_url(raw, false).unwrap_err();
            assert!(matches!(err, ApiError::BadRequest(_)), "{raw}");
        }
    }

    #[test]
    fn validate_rejects_unparseable_urls() {
        assert!(validate_preview_url("not a url", false).is_err());
        assert!(validate_preview_url("http://", false).is_err());
    }

    #[test]
    fn validate_rejects_private_targets_by_default() {
        for raw in [
            "http://localhost:5000/admin",
            "http://127.0.0.1/secrets",
            "http://192.168.1.1/router",
            "http://10.0.0.2/internal",
            "http://169.254.169.254/latest/meta-data",
            "http://[::1]/",
        ] {
            let err = validate_preview_url(raw, false).unwrap_err();
            assert!(matches!(err, ApiError::BadRequest(_)), "{raw}");
        }
    }

    #[test]
    fn validate_allows_private_targets_when_opted_in() {
        assert!(validate_preview_url("http://localhost:3000", true).is_ok());
        assert!(validate_preview_url("http://127.0.0.1:8080", true).is_ok());
    }
}
