//! Core data models for site manifests.
//!
//! Two families of types live here:
//!
//! - **Raw wire types** (`RawManifest`, `RawItem`, ...) — a serde mirror of
//!   the `site.json` shape as it arrives off the network. Structural nodes
//!   (`items`, `metadata`, `metadata.site`, `metadata.theme`,
//!   `metadata.theme.variables`) are `Option` so their absence can be
//!   reported as a schema failure; scalar leaves default when missing.
//! - **Normalized types** (`SiteBundle`, `DisplayItem`, `SiteMetadata`) — the
//!   validated, render-ready projection. Nothing downstream of the decode
//!   boundary touches untyped JSON.
//!
//! Manifest timestamps are Unix seconds, and real-world manifests carry them
//! as either a JSON number or a numeric string. Decoders here accept both;
//! anything unparsable becomes `None` rather than failing the document.

use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder used when a manifest carries no top-level `title`.
pub const TITLE_FALLBACK: &str = "No title found";

/// Raw manifest payload as fetched from `<base>/site.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawManifest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<RawItem>>,
    #[serde(default)]
    pub metadata: Option<RawMetadata>,
}

/// One content item as it appears in the manifest's `items` array.
#[derive(Debug, Clone, Deserialize)]
pub struct RawItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "de_seconds")]
    pub created: Option<i64>,
    #[serde(default, rename = "lastUpdated", deserialize_with = "de_seconds")]
    pub last_updated: Option<i64>,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, deserialize_with = "de_stringish")]
    pub readtime: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// The manifest's `metadata` node.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMetadata {
    #[serde(default)]
    pub site: Option<RawSite>,
    #[serde(default)]
    pub theme: Option<RawTheme>,
}

/// `metadata.site` — identity of the site the manifest describes.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSite {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default, deserialize_with = "de_seconds")]
    pub created: Option<i64>,
    #[serde(default, deserialize_with = "de_seconds")]
    pub updated: Option<i64>,
}

/// `metadata.theme` — the site's active theme.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTheme {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub variables: Option<RawThemeVars>,
}

/// `metadata.theme.variables` — theme variables (only the accent color is used).
#[derive(Debug, Clone, Deserialize)]
pub struct RawThemeVars {
    #[serde(default, rename = "hexCode")]
    pub hex_code: String,
}

/// Validated result of a successful manifest fetch.
///
/// Exists only if the raw payload contained both `items` and `metadata.site`.
#[derive(Debug, Clone)]
pub struct SiteBundle {
    pub title: String,
    pub items: Vec<RawItem>,
    pub metadata: SiteMetadata,
}

/// Render-ready projection of one manifest item.
///
/// `created`/`last_updated` stay raw Unix seconds; formatting to a human date
/// is a rendering concern, computed at display time (see the `card` module).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayItem {
    pub title: String,
    pub description: String,
    pub created: Option<i64>,
    pub last_updated: Option<i64>,
    pub logo: String,
    pub location: String,
    pub readtime: String,
    pub tags: Vec<String>,
}

impl From<RawItem> for DisplayItem {
    fn from(raw: RawItem) -> Self {
        DisplayItem {
            title: raw.title,
            description: raw.description,
            created: raw.created,
            last_updated: raw.last_updated,
            logo: raw.logo,
            location: raw.location,
            readtime: raw.readtime,
            tags: raw.tags,
        }
    }
}

/// Render-ready projection of the manifest's site/theme metadata.
///
/// Derived once per successful fetch and replaced wholesale on every new
/// analysis. `created`/`updated` are already formatted; `logo` is the
/// caller's base input joined with the site's relative logo path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteMetadata {
    pub name: String,
    pub description: String,
    pub logo: String,
    pub theme: String,
    pub theme_color: String,
    pub created: String,
    pub updated: String,
}

/// Format Unix seconds as `M/D/YYYY` (UTC), or empty for missing/invalid.
pub fn format_seconds(secs: Option<i64>) -> String {
    secs.and_then(|s| chrono::DateTime::from_timestamp(s, 0))
        .map(|dt| dt.format("%-m/%-d/%Y").to_string())
        .unwrap_or_default()
}

/// Accept Unix seconds as a JSON number or numeric string.
fn de_seconds<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    })
}

/// Accept a string or number field, normalized to `String`.
fn de_stringish<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}
