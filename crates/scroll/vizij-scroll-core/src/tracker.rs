//! Scroll tracker: raw scroll offsets -> scroll percentage.

use serde::{Deserialize, Serialize};

/// Raw scroll offsets as reported by a browser-like host.
///
/// Hosts report both the document-element and body values; the first
/// non-zero value of each pair is used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollMetrics {
    pub document_scroll_top: f32,
    #[serde(default)]
    pub body_scroll_top: f32,
    pub document_scroll_height: f32,
    #[serde(default)]
    pub body_scroll_height: f32,
    pub client_height: f32,
}

impl ScrollMetrics {
    /// Metrics from a single source (no body fallback).
    pub fn new(scroll_top: f32, scroll_height: f32, client_height: f32) -> Self {
        Self {
            document_scroll_top: scroll_top,
            body_scroll_top: 0.0,
            document_scroll_height: scroll_height,
            body_scroll_height: 0.0,
            client_height,
        }
    }

    pub fn scroll_top(&self) -> f32 {
        first_non_zero(self.document_scroll_top, self.body_scroll_top)
    }

    pub fn scroll_height(&self) -> f32 {
        first_non_zero(self.document_scroll_height, self.body_scroll_height)
    }

    /// `scroll_top / (scroll_height - client_height) * 100`.
    ///
    /// Unclamped. A zero scrollable range yields NaN or an infinity.
    pub fn percentage(&self) -> f32 {
        (self.scroll_top() / (self.scroll_height() - self.client_height)) * 100.0
    }
}

#[inline]
fn first_non_zero(primary: f32, fallback: f32) -> f32 {
    // NaN counts as unset, same as zero.
    if primary != 0.0 && !primary.is_nan() {
        primary
    } else {
        fallback
    }
}

/// The current scroll percentage, passed by value into the dispatcher and the
/// caption fader.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollProgress {
    pub percent: f32,
}

impl ScrollProgress {
    pub fn new(percent: f32) -> Self {
        Self { percent }
    }

    /// Caption bucket: `floor(percent / 5)`. `None` for non-finite input.
    pub fn division(&self) -> Option<i64> {
        let d = (self.percent / 5.0).floor();
        d.is_finite().then_some(d as i64)
    }

    /// Text shown by the development overlay.
    pub fn debug_label(&self) -> String {
        format!("Scroll Progress : {:.2}", self.percent)
    }
}

/// Single writer of [`ScrollProgress`]. Every scroll event overwrites the
/// stored value; there is no smoothing or debouncing.
#[derive(Clone, Debug, Default)]
pub struct ScrollTracker {
    progress: ScrollProgress,
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_scroll(&mut self, metrics: &ScrollMetrics) -> ScrollProgress {
        self.progress = ScrollProgress::new(metrics.percentage());
        if !self.progress.percent.is_finite() {
            log::debug!(
                "scroll percentage is not finite ({}); scrollable range is zero",
                self.progress.percent
            );
        }
        self.progress
    }

    pub fn progress(&self) -> ScrollProgress {
        self.progress
    }

    /// Reset to the top of the page.
    pub fn reset(&mut self) {
        self.progress = ScrollProgress::default();
    }
}
