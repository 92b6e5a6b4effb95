//! Scroll-driven horizontal timeline.
//!
//! Vertical page scroll inside a section is mapped onto a horizontal offset
//! of a track of panels, and onto the index of the panel in view. Explicit
//! navigation (`next`, `prev`, `go_to`, autoplay) works the other way round:
//! it issues a page scroll to the panel's position and holds a lock so the
//! scroll events caused by that jump do not fight the requested index.
//!
//! The controller owns no platform resources. The host reports events and
//! the current time, answers measurement queries through [`ScrollHost`],
//! and is told whether it must schedule an animation frame.

use crate::config::{Boundary, SyncConfig};
use log::{debug, trace};
use serde::Serialize;
use std::mem;

/// Geometry of the scroll-driven region, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measurements {
    /// Document Y of the top of the section.
    pub section_top: f64,
    /// Full width of the horizontal track.
    pub content_width: f64,
    pub viewport_width: f64,
}

impl Measurements {
    /// Track made of `item_count` panels that are each one viewport wide.
    pub fn for_panels(section_top: f64, item_count: usize, viewport_width: f64) -> Self {
        Measurements {
            section_top,
            content_width: item_count as f64 * viewport_width,
            viewport_width,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

impl ScrollBehavior {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScrollBehavior::Smooth => "smooth",
            ScrollBehavior::Instant => "instant",
        }
    }
}

/// Platform side of the controller: measurement, scroll position,
/// motion preference and the scroll command.
pub trait ScrollHost {
    /// `None` while the section or track is not mounted.
    fn measure(&self) -> Option<Measurements>;
    fn scroll_y(&self) -> f64;
    fn prefers_reduced_motion(&self) -> bool;
    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior);
}

/// Derived state of one mounted timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollSyncState {
    pub section_origin: f64,
    /// Never below 1.
    pub scroll_distance: f64,
    /// Never below 0.
    pub max_offset: f64,
    pub active_index: usize,
    pub is_programmatic_scroll: bool,
    pub is_autoplaying: bool,
}

impl Default for ScrollSyncState {
    fn default() -> Self {
        ScrollSyncState {
            section_origin: 0.0,
            scroll_distance: 1.0,
            max_offset: 0.0,
            active_index: 0,
            is_programmatic_scroll: false,
            is_autoplaying: false,
        }
    }
}

fn finite_or_zero(x: f64) -> f64 {
    if x.is_finite() { x } else { 0.0 }
}

fn clamp01(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

impl ScrollSyncState {
    fn apply_measurements(&mut self, m: &Measurements) {
        self.section_origin = finite_or_zero(m.section_top);
        // 1px of vertical scroll per 1px of horizontal travel
        self.max_offset = finite_or_zero(m.content_width - m.viewport_width).max(0.0);
        self.scroll_distance = self.max_offset.max(1.0);
    }

    /// Fraction of the section scrolled through, in `[0, 1]`.
    pub fn progress_at(&self, scroll_y: f64) -> f64 {
        clamp01((scroll_y - self.section_origin) / self.scroll_distance)
    }

    /// Page scroll position that puts `index` in view.
    pub fn scroll_top_for(&self, index: usize, item_count: usize) -> Option<f64> {
        if item_count <= 1 {
            return None;
        }
        let clamped = index.min(item_count - 1);
        let progress = clamped as f64 / (item_count - 1) as f64;
        Some(self.section_origin + progress * self.scroll_distance)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingSeek {
    target: usize,
    release_at_ms: u64,
}

/// State machine binding page scroll to the active panel.
#[derive(Debug, Clone)]
pub struct ScrollSyncController {
    config: SyncConfig,
    item_count: usize,
    state: ScrollSyncState,
    offset: f64,
    progress: f64,
    mounted: bool,
    frame_pending: bool,
    seek: Option<PendingSeek>,
    next_autoplay_ms: Option<u64>,
}

impl ScrollSyncController {
    pub fn new(item_count: usize, config: SyncConfig) -> Self {
        ScrollSyncController {
            config,
            item_count,
            state: ScrollSyncState::default(),
            offset: 0.0,
            progress: 0.0,
            mounted: false,
            frame_pending: false,
            seek: None,
            next_autoplay_ms: None,
        }
    }

    pub fn state(&self) -> &ScrollSyncState {
        &self.state
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Horizontal translation of the track; zero or negative.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// `None` when there is nothing to show.
    pub fn active_index(&self) -> Option<usize> {
        if self.item_count == 0 {
            None
        } else {
            Some(self.state.active_index)
        }
    }

    pub fn is_autoplaying(&self) -> bool {
        self.state.is_autoplaying
    }

    pub fn is_programmatic_scroll(&self) -> bool {
        self.state.is_programmatic_scroll
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    /// Earliest time at which `tick` has work to do.
    pub fn next_deadline(&self) -> Option<u64> {
        let release = self.seek.map(|s| s.release_at_ms);
        match (release, self.next_autoplay_ms) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Start following the host. Returns true when a frame must be requested.
    pub fn mount(&mut self, host: &impl ScrollHost) -> bool {
        self.mounted = true;
        self.remeasure(host);
        // initial transform, e.g. after a reload mid-page
        self.on_scroll()
    }

    /// Recompute measurements synchronously. Returns true when a frame must
    /// be requested to re-apply the transform.
    pub fn on_resize(&mut self, host: &impl ScrollHost) -> bool {
        if !self.mounted {
            return false;
        }
        self.remeasure(host);
        self.on_scroll()
    }

    /// Content changed length. Index, pending seek and autoplay are brought
    /// back into range.
    pub fn set_item_count(&mut self, item_count: usize, host: &impl ScrollHost) -> bool {
        self.item_count = item_count;
        let last = item_count.saturating_sub(1);
        self.state.active_index = self.state.active_index.min(last);
        if let Some(seek) = self.seek.as_mut() {
            seek.target = seek.target.min(last);
        }
        if item_count <= 1 {
            self.stop_autoplay();
        }
        if !self.mounted {
            return false;
        }
        self.remeasure(host);
        self.on_scroll()
    }

    fn remeasure(&mut self, host: &impl ScrollHost) {
        match host.measure() {
            Some(m) => {
                self.state.apply_measurements(&m);
                trace!(
                    "measured origin={} max_offset={} distance={}",
                    self.state.section_origin, self.state.max_offset, self.state.scroll_distance
                );
            }
            None => debug!("timeline not mounted yet; keeping previous measurements"),
        }
    }

    /// Scroll event. Coalesced: returns true only when no frame is already
    /// outstanding, in which case the host must schedule one.
    pub fn on_scroll(&mut self) -> bool {
        if !self.mounted || self.frame_pending {
            return false;
        }
        self.frame_pending = true;
        true
    }

    /// Animation frame callback. Applies the transform for the live scroll
    /// position. Returns true when the active index changed.
    pub fn on_animation_frame(&mut self, host: &impl ScrollHost, now_ms: u64) -> bool {
        if !self.mounted {
            return false;
        }
        self.frame_pending = false;
        if host.measure().is_none() {
            return false;
        }

        self.progress = self.state.progress_at(host.scroll_y());
        self.offset = -self.progress * self.state.max_offset;

        if self.state.is_programmatic_scroll || self.item_count <= 1 {
            return false;
        }
        let idx = (self.progress * (self.item_count - 1) as f64).round() as usize;
        self.set_active(idx.min(self.item_count - 1), now_ms)
    }

    fn set_active(&mut self, index: usize, now_ms: u64) -> bool {
        if self.state.active_index == index {
            return false;
        }
        self.state.active_index = index;
        if self.state.is_autoplaying {
            self.next_autoplay_ms = Some(now_ms.saturating_add(self.config.autoplay_interval_ms));
        }
        true
    }

    fn manual_behavior(host: &impl ScrollHost) -> ScrollBehavior {
        if host.prefers_reduced_motion() {
            ScrollBehavior::Instant
        } else {
            ScrollBehavior::Smooth
        }
    }

    fn seek_to(
        &mut self,
        index: usize,
        behavior: ScrollBehavior,
        host: &mut impl ScrollHost,
        now_ms: u64,
    ) {
        if host.measure().is_none() {
            debug!("seek to {} skipped; timeline not measured", index);
            return;
        }
        let Some(top) = self.state.scroll_top_for(index, self.item_count) else {
            return;
        };
        let target = index.min(self.item_count - 1);
        let settle_ms = match behavior {
            ScrollBehavior::Smooth => self.config.smooth_settle_ms,
            ScrollBehavior::Instant => self.config.instant_settle_ms,
        };

        self.state.is_programmatic_scroll = true;
        host.scroll_to(top, behavior);
        // a seek issued while another settles replaces it
        self.seek = Some(PendingSeek {
            target,
            release_at_ms: now_ms.saturating_add(settle_ms),
        });
        self.set_active(target, now_ms);
        debug!(
            "seek to {} top={} behavior={} release_at={}",
            target,
            top,
            behavior.as_str(),
            now_ms.saturating_add(settle_ms)
        );
    }

    /// Jump to `index`, clamped into range. No-op with fewer than two items.
    pub fn go_to(&mut self, index: i64, host: &mut impl ScrollHost, now_ms: u64) {
        if !self.mounted || self.item_count <= 1 {
            return;
        }
        let last = (self.item_count - 1) as i64;
        let clamped = index.clamp(0, last) as usize;
        let behavior = Self::manual_behavior(&*host);
        self.seek_to(clamped, behavior, host, now_ms);
    }

    pub fn next(&mut self, host: &mut impl ScrollHost, now_ms: u64) {
        if self.item_count == 0 {
            return;
        }
        let n = self.item_count;
        let current = self.state.active_index;
        let target = match self.config.manual_boundary {
            Boundary::Clamp => (current + 1).min(n - 1),
            Boundary::Wrap => (current + 1) % n,
        };
        self.go_to(target as i64, host, now_ms);
    }

    pub fn prev(&mut self, host: &mut impl ScrollHost, now_ms: u64) {
        if self.item_count == 0 {
            return;
        }
        let n = self.item_count;
        let current = self.state.active_index;
        let target = match self.config.manual_boundary {
            Boundary::Clamp => current.saturating_sub(1),
            Boundary::Wrap => (current + n - 1) % n,
        };
        self.go_to(target as i64, host, now_ms);
    }

    /// Flip autoplay. Stays off under reduced motion or with fewer than two
    /// items. Returns the resulting state.
    pub fn toggle_autoplay(&mut self, host: &impl ScrollHost, now_ms: u64) -> bool {
        if host.prefers_reduced_motion() || self.item_count <= 1 {
            self.stop_autoplay();
            return false;
        }
        if self.state.is_autoplaying {
            self.stop_autoplay();
        } else {
            self.state.is_autoplaying = true;
            self.next_autoplay_ms = Some(now_ms.saturating_add(self.config.autoplay_interval_ms));
        }
        debug!("autoplay {}", if self.state.is_autoplaying { "on" } else { "off" });
        self.state.is_autoplaying
    }

    fn stop_autoplay(&mut self) {
        self.state.is_autoplaying = false;
        self.next_autoplay_ms = None;
    }

    /// Timer pump: releases the seek lock once settled and advances
    /// autoplay when due. Returns true when the active index changed.
    pub fn tick(&mut self, host: &mut impl ScrollHost, now_ms: u64) -> bool {
        if !self.mounted {
            return false;
        }
        let mut changed = false;

        if let Some(seek) = self.seek {
            if now_ms >= seek.release_at_ms {
                self.seek = None;
                self.state.is_programmatic_scroll = false;
                changed |= self.set_active(seek.target.min(self.item_count.saturating_sub(1)), now_ms);
                trace!("seek to {} settled", seek.target);
            }
        }

        if self.state.is_autoplaying {
            if host.prefers_reduced_motion() || self.item_count <= 1 {
                debug!("autoplay forced off");
                self.stop_autoplay();
            } else if self.next_autoplay_ms.is_some_and(|due| now_ms >= due) {
                let before = self.state.active_index;
                let target = (before + 1) % self.item_count;
                self.seek_to(target, ScrollBehavior::Smooth, host, now_ms);
                self.next_autoplay_ms = Some(now_ms.saturating_add(self.config.autoplay_interval_ms));
                changed |= self.state.active_index != before;
            }
        }

        changed
    }

    /// Drop every pending frame, timer and lock. Later events are ignored
    /// until the next `mount`.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.frame_pending = false;
        self.seek = None;
        self.state.is_programmatic_scroll = false;
        self.stop_autoplay();
    }
}

/// A scroll request issued to a [`SimulatedViewport`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollRequest {
    pub top: f64,
    pub behavior: ScrollBehavior,
}

/// In-memory host. Records every scroll command and, when `follow_requests`
/// is set, moves its scroll position to the requested top at once.
#[derive(Debug, Clone, Default)]
pub struct SimulatedViewport {
    pub measurements: Option<Measurements>,
    pub scroll_y: f64,
    pub reduced_motion: bool,
    pub follow_requests: bool,
    pub requests: Vec<ScrollRequest>,
}

impl SimulatedViewport {
    pub fn new(measurements: Measurements) -> Self {
        SimulatedViewport {
            measurements: Some(measurements),
            follow_requests: true,
            ..SimulatedViewport::default()
        }
    }

    /// Host whose measurement targets are not mounted.
    pub fn unmounted() -> Self {
        SimulatedViewport::default()
    }

    pub fn take_requests(&mut self) -> Vec<ScrollRequest> {
        mem::take(&mut self.requests)
    }

    pub fn last_request(&self) -> Option<&ScrollRequest> {
        self.requests.last()
    }
}

impl ScrollHost for SimulatedViewport {
    fn measure(&self) -> Option<Measurements> {
        self.measurements
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        self.requests.push(ScrollRequest { top, behavior });
        if self.follow_requests {
            self.scroll_y = top;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_width_viewport_keeps_denominator_positive() {
        let mut state = ScrollSyncState::default();
        state.apply_measurements(&Measurements {
            section_top: 100.0,
            content_width: 0.0,
            viewport_width: 0.0,
        });
        assert_eq!(state.max_offset, 0.0);
        assert_eq!(state.scroll_distance, 1.0);
        assert_eq!(state.progress_at(1e9), 1.0);
        assert_eq!(state.progress_at(-1e9), 0.0);
    }

    #[test]
    fn non_finite_measurements_are_absorbed() {
        let mut state = ScrollSyncState::default();
        state.apply_measurements(&Measurements {
            section_top: f64::NAN,
            content_width: f64::INFINITY,
            viewport_width: 800.0,
        });
        assert_eq!(state.section_origin, 0.0);
        assert_eq!(state.max_offset, 0.0);
        assert_eq!(state.scroll_distance, 1.0);
    }

    #[test]
    fn scroll_top_for_spreads_items_over_distance() {
        let mut state = ScrollSyncState::default();
        state.apply_measurements(&Measurements::for_panels(200.0, 5, 1000.0));
        assert_eq!(state.scroll_distance, 4000.0);
        assert_eq!(state.scroll_top_for(0, 5), Some(200.0));
        assert_eq!(state.scroll_top_for(2, 5), Some(2200.0));
        assert_eq!(state.scroll_top_for(9, 5), Some(4200.0));
        assert_eq!(state.scroll_top_for(0, 1), None);
    }
}
