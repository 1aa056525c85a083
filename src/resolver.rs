//! Manifest resolution: URL derivation, fetch, validation, projection.
//!
//! [`HttpManifestResolver`] takes an untrusted user-supplied base URL,
//! derives the canonical manifest URL, issues a single GET, and validates the
//! response in a fixed order:
//!
//! 1. connection-level failure → [`FetchError::Transport`]
//! 2. non-success HTTP status → [`FetchError::HttpStatus`]
//! 3. body not valid JSON → [`FetchError::Parse`]
//! 4. payload missing `items` or `metadata.site` → [`FetchError::SchemaMismatch`]
//!
//! On success the payload is projected into a typed [`SiteBundle`] — no
//! untyped JSON access survives past this boundary.
//!
//! URL derivation is deliberately minimal: if the input already ends with
//! `/site.json` it is used verbatim, otherwise `/site.json` is appended. No
//! scheme inference, no trailing-slash trimming. The site logo URL is always
//! joined against the caller's original input string, whichever branch fired.

use async_trait::async_trait;

use crate::models::{format_seconds, RawManifest, SiteBundle, SiteMetadata, TITLE_FALLBACK};

/// Canonical manifest path appended to (or expected at the end of) the base URL.
pub const MANIFEST_SUFFIX: &str = "/site.json";

/// Typed failure of a manifest fetch.
///
/// All kinds collapse to the same user-visible outcome in the controller;
/// the distinction exists for diagnostics and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request never produced a response (connection refused, body read
    /// failure, invalid URL).
    Transport(String),
    /// The manifest endpoint answered with a non-success status.
    HttpStatus(u16),
    /// The body could not be parsed as JSON.
    Parse(String),
    /// Valid JSON, but the required `items` / `metadata.site` shape is missing.
    SchemaMismatch(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Transport(e) => write!(f, "transport failure: {}", e),
            FetchError::HttpStatus(code) => write!(f, "HTTP status {}", code),
            FetchError::Parse(e) => write!(f, "manifest parse failure: {}", e),
            FetchError::SchemaMismatch(path) => write!(f, "manifest schema mismatch: {}", path),
        }
    }
}

impl std::error::Error for FetchError {}

/// Source of validated site bundles.
///
/// Seam between the controller and the network so the state machine can be
/// driven by stub sources in tests.
#[async_trait]
pub trait ManifestSource: Send + Sync {
    /// Resolve a user-supplied base URL into a validated [`SiteBundle`].
    async fn resolve(&self, input: &str) -> Result<SiteBundle, FetchError>;
}

/// Derive the manifest URL from a user-supplied base URL.
///
/// Verbatim if `input` already ends with `/site.json`, otherwise appended.
pub fn manifest_url(input: &str) -> String {
    if input.ends_with(MANIFEST_SUFFIX) {
        input.to_string()
    } else {
        format!("{}{}", input, MANIFEST_SUFFIX)
    }
}

/// Parse and validate a manifest body, projecting it into a [`SiteBundle`].
///
/// `input` is the user's original base URL, used for logo URL construction.
/// Pure function — all network concerns live in [`HttpManifestResolver`].
pub fn parse_bundle(input: &str, body: &str) -> Result<SiteBundle, FetchError> {
    let manifest: RawManifest =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    let items = manifest
        .items
        .ok_or_else(|| FetchError::SchemaMismatch("items".to_string()))?;
    let metadata = manifest
        .metadata
        .ok_or_else(|| FetchError::SchemaMismatch("metadata.site".to_string()))?;
    let site = metadata
        .site
        .ok_or_else(|| FetchError::SchemaMismatch("metadata.site".to_string()))?;

    // The theme nodes are not part of the items/metadata.site validation
    // gate, but the projection reads through them, so their absence is still
    // a schema failure rather than a silent default.
    let theme = metadata
        .theme
        .ok_or_else(|| FetchError::SchemaMismatch("metadata.theme".to_string()))?;
    let variables = theme
        .variables
        .ok_or_else(|| FetchError::SchemaMismatch("metadata.theme.variables".to_string()))?;

    Ok(SiteBundle {
        title: manifest
            .title
            .unwrap_or_else(|| TITLE_FALLBACK.to_string()),
        items,
        metadata: SiteMetadata {
            name: site.name,
            description: manifest.description.unwrap_or_default(),
            logo: format!("{}/{}", input, site.logo),
            theme: theme.name,
            theme_color: variables.hex_code,
            created: format_seconds(site.created),
            updated: format_seconds(site.updated),
        },
    })
}

/// [`ManifestSource`] backed by a real HTTP client.
///
/// One GET per resolve, no timeout, no retry, no explicit redirect policy
/// beyond the transport's defaults.
pub struct HttpManifestResolver {
    client: reqwest::Client,
}

impl HttpManifestResolver {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpManifestResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ManifestSource for HttpManifestResolver {
    async fn resolve(&self, input: &str) -> Result<SiteBundle, FetchError> {
        let url = manifest_url(input);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        parse_bundle(input, &body)
    }
}
