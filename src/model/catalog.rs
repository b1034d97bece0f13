//! Pagination state for the accumulated catalog

use super::track::Track;

/// One page of catalog results.
#[derive(Clone, Debug, Default)]
pub struct CatalogPage {
    /// 1-based page number this result answers.
    pub page: u32,
    pub tracks: Vec<Track>,
    pub has_more: bool,
}

impl CatalogPage {
    /// The page a failed request degrades to.
    pub fn exhausted(page: u32) -> Self {
        Self {
            page,
            tracks: Vec::new(),
            has_more: false,
        }
    }
}

/// Tracks fetched so far plus the bookkeeping needed for infinite scroll.
///
/// At most one page is in flight. A result is only accepted for the page
/// that is currently in flight; anything else is stale and dropped.
#[derive(Clone, Debug)]
pub struct CatalogState {
    pub tracks: Vec<Track>,
    pub loaded_pages: u32,
    pub has_more: bool,
    in_flight: Option<u32>,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self {
            tracks: Vec::new(),
            loaded_pages: 0,
            has_more: true,
            in_flight: None,
        }
    }
}

impl CatalogState {
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// True while the very first page is outstanding (skeleton grid).
    pub fn is_initial_load(&self) -> bool {
        self.in_flight.is_some() && self.tracks.is_empty()
    }

    pub fn in_flight(&self) -> Option<u32> {
        self.in_flight
    }

    /// Reserve the next page for fetching, if one may be requested now.
    pub fn begin_next_page(&mut self) -> Option<u32> {
        if !self.has_more || self.in_flight.is_some() {
            return None;
        }
        let page = self.loaded_pages + 1;
        self.in_flight = Some(page);
        Some(page)
    }

    /// Apply a fetched page. Returns the newly appended tracks, or `None`
    /// when the result was not for the page in flight.
    pub fn apply_page(&mut self, page: CatalogPage) -> Option<&[Track]> {
        if self.in_flight != Some(page.page) {
            tracing::warn!(
                page = page.page,
                in_flight = ?self.in_flight,
                "Discarding stale catalog page"
            );
            return None;
        }

        self.in_flight = None;
        self.loaded_pages = page.page;
        self.has_more = page.has_more;

        let start = self.tracks.len();
        self.tracks.extend(page.tracks);
        Some(&self.tracks[start..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::track::sample_track;

    fn page(number: u32, ids: &[&str], has_more: bool) -> CatalogPage {
        CatalogPage {
            page: number,
            tracks: ids.iter().map(|id| sample_track(id)).collect(),
            has_more,
        }
    }

    #[test]
    fn first_page_is_initial_load() {
        let mut state = CatalogState::default();
        assert!(!state.is_initial_load());
        assert_eq!(state.begin_next_page(), Some(1));
        assert!(state.is_initial_load());

        let added = state.apply_page(page(1, &["a", "b"], true)).unwrap();
        assert_eq!(added.len(), 2);
        assert!(!state.is_loading());
        assert_eq!(state.loaded_pages, 1);
    }

    #[test]
    fn only_one_page_in_flight() {
        let mut state = CatalogState::default();
        assert_eq!(state.begin_next_page(), Some(1));
        assert_eq!(state.begin_next_page(), None);
        state.apply_page(page(1, &["a"], true));
        assert_eq!(state.begin_next_page(), Some(2));
    }

    #[test]
    fn short_page_stops_pagination() {
        let mut state = CatalogState::default();
        state.begin_next_page();
        state.apply_page(page(1, &["a", "b"], false));
        assert!(!state.has_more);
        assert_eq!(state.begin_next_page(), None);
        assert_eq!(state.begin_next_page(), None);
    }

    #[test]
    fn failed_page_stops_pagination_without_losing_tracks() {
        let mut state = CatalogState::default();
        state.begin_next_page();
        state.apply_page(page(1, &["a"], true));
        state.begin_next_page();
        assert!(state.apply_page(CatalogPage::exhausted(2)).is_some());
        assert_eq!(state.tracks.len(), 1);
        assert_eq!(state.begin_next_page(), None);
    }

    #[test]
    fn stale_page_is_discarded() {
        let mut state = CatalogState::default();
        state.begin_next_page();
        assert!(state.apply_page(page(3, &["x"], true)).is_none());
        assert!(state.tracks.is_empty());
        assert_eq!(state.in_flight(), Some(1));
    }
}
