//! # Site Lens
//!
//! Fetch a site's `site.json` manifest and render its content items as cards.
//!
//! Site Lens takes an untrusted user-supplied base URL, resolves and
//! validates the site's JSON manifest, projects it into a normalized list of
//! display items plus site metadata, and drives a bounded set of UI states
//! (`idle`, `loading`, `success`, `error`) that a rendering surface consumes
//! as read-only snapshots.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   ┌──────────────────┐   ┌──────────────────┐
//! │ user input │──▶│ SearchController │──▶│ ManifestResolver │
//! │ (query)    │   │  idle/loading/   │   │ GET /site.json   │
//! └────────────┘   │  success/error   │   │ validate+project │
//!                  └────────┬─────────┘   └──────────────────┘
//!                           ▼
//!                  ┌──────────────────┐
//!                  │  RenderSurface   │
//!                  │  (cards, JSON)   │
//!                  └──────────────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Wire-shape decode types and normalized display types |
//! | [`resolver`] | Manifest URL derivation, fetch, validation, projection |
//! | [`controller`] | UI state machine and read-only snapshots |
//! | [`card`] | Rendering contract and the built-in text card renderer |

pub mod card;
pub mod controller;
pub mod models;
pub mod resolver;
