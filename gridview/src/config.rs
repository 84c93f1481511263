//! Table configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// Per-table configuration.
///
/// Every field has a default, so a partial JSON or TOML document
/// deserializes into a complete config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Delay between the last keystroke and the filter update, in milliseconds.
    /// Zero applies filter input immediately.
    pub debounce_ms: u64,

    /// Page sizes the user may pick from.
    pub page_sizes: Vec<usize>,

    /// Page size a new table starts with. Must be one of `page_sizes`.
    pub default_page_size: usize,

    /// Estimated height of one row, in pixels.
    pub row_height: u32,

    /// Height of the scroll container, in pixels.
    pub container_height: u32,

    /// Rows rendered beyond each edge of the viewport.
    pub overscan: usize,

    /// Minimum fuzzy score for a row to pass the global search.
    pub fuzzy_min_score: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 150,
            page_sizes: vec![10, 20, 30, 40, 50],
            default_page_size: 10,
            row_height: 40,
            container_height: 480,
            overscan: 5,
            fuzzy_min_score: 0,
        }
    }
}

impl TableConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the debounce delay.
    pub fn debounce(mut self, delay: Duration) -> Self {
        self.debounce_ms = delay.as_millis().try_into().unwrap_or(u64::MAX);
        self
    }

    /// Set the allowed page sizes and the starting page size.
    pub fn page_sizes(mut self, sizes: impl Into<Vec<usize>>, default: usize) -> Self {
        self.page_sizes = sizes.into();
        self.default_page_size = default;
        self
    }

    /// Set the estimated row height.
    pub fn row_height(mut self, height: u32) -> Self {
        self.row_height = height;
        self
    }

    /// Set the scroll container height.
    pub fn container_height(mut self, height: u32) -> Self {
        self.container_height = height;
        self
    }

    /// Set the overscan row count.
    pub fn overscan(mut self, rows: usize) -> Self {
        self.overscan = rows;
        self
    }

    /// Set the minimum fuzzy score.
    pub fn fuzzy_min_score(mut self, score: u32) -> Self {
        self.fuzzy_min_score = score;
        self
    }

    /// The debounce delay as a duration.
    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Check the settings are consistent.
    pub fn validate(&self) -> Result<()> {
        if self.page_sizes.is_empty() || self.page_sizes.contains(&0) {
            return Err(GridError::InvalidPageSizes);
        }
        if !self.page_sizes.contains(&self.default_page_size) {
            return Err(GridError::page_size_not_allowed(
                self.default_page_size,
                &self.page_sizes,
            ));
        }
        if self.row_height == 0 {
            return Err(GridError::ZeroRowHeight);
        }
        Ok(())
    }
}
