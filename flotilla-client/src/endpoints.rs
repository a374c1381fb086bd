//! Replica endpoint sets and trial ordering

use flotilla_core::types::EndpointUrl;
use flotilla_core::{Error, Result};
use rand::seq::SliceRandom;

/// An ordered set of functionally-equivalent service URLs
///
/// The set itself is read-only after construction. Each dispatch draws
/// a fresh randomized trial order from it, so load spreads across the
/// replicas without any shared mutable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSet {
    urls: Vec<EndpointUrl>,
}

impl EndpointSet {
    /// Create a set from a collection of URL strings
    pub fn new(urls: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            urls: urls.into_iter().map(Into::into).collect(),
        }
    }

    /// The configured URLs, in configuration order
    pub fn urls(&self) -> &[EndpointUrl] {
        &self.urls
    }

    /// Number of configured endpoints
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Whether the set holds no endpoints
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Draw a fresh uniformly-shuffled trial order
    ///
    /// Fails with [`Error::Configuration`] when the set is empty,
    /// before any network activity takes place.
    pub fn draw_order(&self) -> Result<Vec<EndpointUrl>> {
        if self.urls.is_empty() {
            return Err(Error::Configuration("endpoint set is empty".to_string()));
        }

        let mut order = self.urls.clone();
        order.shuffle(&mut rand::thread_rng());
        Ok(order)
    }
}
