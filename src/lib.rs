/*!
# Portfolio Timeline Core

The logic behind a personal portfolio site: typed content records, their
chronological ordering, and the scroll-driven timeline that presents them.

## Overview

Content entries (internships, research, projects, leadership, awards, skills,
interests) carry a free-text timeframe such as `"May 2025 – Aug 2025"` and an
optional structured chronology hint. The resolver turns either into a
comparable key and orders entries newest first. The scroll-sync controller
then presents an ordered list as a horizontal track of panels driven by
vertical page scroll, with next/prev/jump controls and autoplay.

## Architecture

### Content Layer
- **entry**: content records, sections, links, card projection, slugs
- **catalog**: loading JSON content documents and per-section queries
- **config**: site settings, timing knobs, base-path handling

### Ordering Layer
- **chronology**: timeframe parsing and newest-first ordering
- **year_groups**: year buckets and slide navigation across them

### Interaction Layer
- **scroll_sync**: scroll position ↔ horizontal offset and active index
- **rotator**: looping autoplay carousel for the about cards
- **wasm** (feature `wasm`): browser bindings for the above

## Design Highlights

- Parsing is total: unrecognised dates sort last instead of failing
- The controller is a plain state machine; time and platform access are
  passed in, so every transition is testable without a browser
- Scroll work is coalesced to one recomputation per animation frame
- Programmatic seeks hold a settle lock so the scroll they cause does not
  fight the requested index
*/

pub mod catalog;
pub mod chronology;
pub mod config;
pub mod entry;
pub mod rotator;
pub mod scroll_sync;
pub mod year_groups;

#[cfg(feature = "wasm")]
pub mod wasm;

/// Re-export the everyday types to make them easier to use
pub use catalog::{Catalog, ContentError, load_catalog};
pub use chronology::{ChronologyKey, order_newest_first, parse_timeframe, resolve};
pub use config::{Boundary, RotatorConfig, Settings, SyncConfig};
pub use entry::{CardLinks, CardModel, ChronologyHint, ContentEntry, Section, slugify};
pub use rotator::Rotator;
pub use scroll_sync::{
    Measurements, ScrollBehavior, ScrollHost, ScrollSyncController, ScrollSyncState,
    SimulatedViewport,
};
pub use year_groups::{YearCursor, YearGroups};
