//! Rendering-surface contract and the built-in text card renderer.
//!
//! The controller feeds data in one direction only: a [`Snapshot`] per render
//! pass. Each [`DisplayItem`] exposes its display fields plus two action
//! targets — [`DisplayItem::content_url`] (open the item's content) and
//! [`DisplayItem::source_url`] (open the item's logo/source). A renderer has
//! no callback into controller state.
//!
//! Date formatting happens here, at display time, from the raw second
//! timestamps the items carry.

use crate::controller::{Snapshot, UiState};
use crate::models::{format_seconds, DisplayItem, SiteMetadata};

impl DisplayItem {
    /// Created date formatted for display (`M/D/YYYY`, empty if missing).
    pub fn created_display(&self) -> String {
        format_seconds(self.created)
    }

    /// Last-updated date formatted for display (`M/D/YYYY`, empty if missing).
    pub fn updated_display(&self) -> String {
        format_seconds(self.last_updated)
    }

    /// Target of the "open content" action: the item's `location`.
    pub fn content_url(&self) -> &str {
        &self.location
    }

    /// Target of the "view source" action: the item's `logo`.
    pub fn source_url(&self) -> &str {
        &self.logo
    }
}

/// Consumes read-only controller snapshots and produces a visual
/// representation. Stateless with respect to the controller.
pub trait RenderSurface {
    fn render(&mut self, snapshot: &Snapshot<'_>);
}

/// Plain-text card renderer writing to stdout.
pub struct TextCards;

impl RenderSurface for TextCards {
    fn render(&mut self, snapshot: &Snapshot<'_>) {
        match snapshot.state {
            UiState::Idle => {}
            UiState::Loading => println!("analyzing..."),
            UiState::Error => println!("No results."),
            UiState::Success => {
                if let Some(meta) = snapshot.metadata {
                    print_overview(meta);
                }
                println!("{} — {} item(s)", snapshot.title, snapshot.items.len());
                for item in snapshot.items {
                    println!();
                    print_card(item);
                }
            }
        }
    }
}

fn print_overview(meta: &SiteMetadata) {
    println!("=== {} ===", meta.name);
    if !meta.description.is_empty() {
        println!("description: {}", meta.description);
    }
    println!("logo:        {}", meta.logo);
    println!("theme:       {} ({})", meta.theme, meta.theme_color);
    println!("created:     {}", meta.created);
    println!("updated:     {}", meta.updated);
    println!();
}

fn print_card(item: &DisplayItem) {
    println!("--- {} ---", item.title);
    if !item.description.is_empty() {
        println!("description: {}", item.description);
    }
    println!("created:     {}", item.created_display());
    println!("updated:     {}", item.updated_display());
    println!("readtime:    {} min", item.readtime);
    println!("tags:        {}", item.tags.join(", "));
    println!("open:        {}", item.content_url());
    println!("source:      {}", item.source_url());
}
