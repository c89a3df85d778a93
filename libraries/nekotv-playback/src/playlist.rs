//! Ordered video item store
//!
//! Owns the queued items and the current position. Pure data structure:
//! no I/O, no failure returns. Out-of-range inputs are clamped and
//! unresolvable references ignored; the empty list is a distinct terminal
//! case rather than "position 0".

use crate::types::VideoItem;
use rand::seq::SliceRandom;
use rand::thread_rng;

/// Ordered playlist with a current position
///
/// Invariant: `position` is in `[0, len - 1]` whenever the list is
/// non-empty. When the list is empty there is no current item and
/// `position` is meaningless (held at 0).
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    items: Vec<VideoItem>,
    position: usize,

    /// Whether non-privileged users may mutate the playlist.
    /// Carried state only; enforcement lives with the server.
    is_open: bool,
}

impl Playlist {
    /// Create a new empty playlist
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            position: 0,
            is_open: true,
        }
    }

    /// Number of queued items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the playlist has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items in playback order
    pub fn items(&self) -> &[VideoItem] {
        &self.items
    }

    /// Current position (only meaningful when non-empty)
    pub fn position(&self) -> usize {
        self.position
    }

    /// Item at the current position, or `None` when empty
    pub fn current_item(&self) -> Option<&VideoItem> {
        self.items.get(self.position)
    }

    /// Item at `index`
    pub fn get(&self, index: usize) -> Option<&VideoItem> {
        self.items.get(index)
    }

    /// Whether any item matches the predicate
    pub fn exists<F>(&self, f: F) -> bool
    where
        F: Fn(&VideoItem) -> bool,
    {
        self.items.iter().any(f)
    }

    /// First index whose item matches the predicate
    pub fn find_index<F>(&self, f: F) -> Option<usize>
    where
        F: Fn(&VideoItem) -> bool,
    {
        self.items.iter().position(f)
    }

    /// Replace all items wholesale, resetting the position to 0
    pub fn set_items(&mut self, items: Vec<VideoItem>) {
        self.items = items;
        self.position = 0;
    }

    /// Set the current position
    ///
    /// Out-of-range values reset to 0: safe default to the first item,
    /// never an error.
    pub fn set_position(&mut self, index: usize) {
        self.position = if index >= self.items.len() { 0 } else { index };
    }

    /// Insert an item
    ///
    /// Appends when `at_end`, otherwise inserts immediately after the
    /// current position. Never changes `position`.
    pub fn add_item(&mut self, item: VideoItem, at_end: bool) {
        if at_end {
            self.items.push(item);
        } else {
            let at = (self.position + 1).min(self.items.len());
            self.items.insert(at, item);
        }
    }

    /// Remove the item at `index`
    ///
    /// Keeps the current item's identity stable where possible: removal
    /// before the position shifts the position down by one; a position
    /// that falls off the end resets to 0.
    pub fn remove_item(&mut self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        if index < self.position {
            self.position -= 1;
        }
        self.items.remove(index);
        if self.position >= self.items.len() {
            self.position = 0;
        }
    }

    /// Move the item at `source_index` to play right after the current item
    ///
    /// The currently-playing item's identity is preserved across the move.
    pub fn set_next_item(&mut self, source_index: usize) {
        if source_index >= self.items.len() {
            return;
        }
        let next = self.items.remove(source_index);
        if source_index < self.position {
            self.position -= 1;
        }
        let at = (self.position + 1).min(self.items.len());
        self.items.insert(at, next);
    }

    /// Advance past the current item, or drop it if it is temporary
    ///
    /// Either way the position wraps to 0 when it falls off the end.
    pub fn skip_current(&mut self) {
        let Some(item) = self.items.get(self.position) else {
            return;
        };
        if item.is_temporary {
            self.items.remove(self.position);
        } else {
            self.position += 1;
        }
        if self.position >= self.items.len() {
            self.position = 0;
        }
    }

    /// Flip an item's temporary flag
    pub fn toggle_temporary(&mut self, index: usize) {
        if let Some(item) = self.items.get_mut(index) {
            item.is_temporary = !item.is_temporary;
        }
    }

    /// Shuffle all items except the current one
    ///
    /// The current item moves to the front and the position follows it,
    /// so whatever is playing keeps playing.
    pub fn shuffle(&mut self) {
        if self.items.len() <= 2 {
            return;
        }
        let current = self.items.remove(self.position);
        self.items.shuffle(&mut thread_rng());
        self.items.insert(0, current);
        self.position = 0;
    }

    /// Remove all items and reset the position
    pub fn clear(&mut self) {
        self.items.clear();
        self.position = 0;
    }

    /// Whether non-privileged users may mutate the playlist
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Set the playlist lock flag
    pub fn set_open(&mut self, open: bool) {
        self.is_open = open;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VideoKind;
    use std::time::Duration;

    fn item(url: &str) -> VideoItem {
        VideoItem {
            id: url.to_string(),
            url: url.to_string(),
            kind: VideoKind::Raw,
            title: url.to_string(),
            author: "anon".to_string(),
            duration: Some(Duration::from_secs(120)),
            is_temporary: false,
        }
    }

    fn temp_item(url: &str) -> VideoItem {
        VideoItem {
            is_temporary: true,
            ..item(url)
        }
    }

    fn playlist(urls: &[&str]) -> Playlist {
        let mut p = Playlist::new();
        p.set_items(urls.iter().map(|u| item(u)).collect());
        p
    }

    #[test]
    fn empty_playlist_has_no_current_item() {
        let p = Playlist::new();
        assert!(p.is_empty());
        assert!(p.current_item().is_none());
    }

    #[test]
    fn set_items_resets_position() {
        let mut p = playlist(&["a", "b", "c"]);
        p.set_position(2);
        p.set_items(vec![item("x"), item("y")]);
        assert_eq!(p.position(), 0);
        assert_eq!(p.current_item().unwrap().url, "x");
    }

    #[test]
    fn set_position_clamps_out_of_range_to_zero() {
        let mut p = playlist(&["a", "b", "c"]);
        p.set_position(2);
        assert_eq!(p.position(), 2);
        p.set_position(3);
        assert_eq!(p.position(), 0);
        p.set_position(usize::MAX);
        assert_eq!(p.position(), 0);
    }

    #[test]
    fn add_at_end_appends() {
        let mut p = playlist(&["a", "b"]);
        p.add_item(item("c"), true);
        assert_eq!(p.items()[2].url, "c");
        assert_eq!(p.position(), 0);
    }

    #[test]
    fn add_not_at_end_inserts_after_current() {
        let mut p = playlist(&["a", "b", "c"]);
        p.set_position(1);
        p.add_item(item("x"), false);
        let urls: Vec<&str> = p.items().iter().map(|i| i.url.as_str()).collect();
        assert_eq!(urls, ["a", "b", "x", "c"]);
        assert_eq!(p.position(), 1);
    }

    #[test]
    fn add_to_empty_list_inserts_single_item() {
        let mut p = Playlist::new();
        p.add_item(item("a"), false);
        assert_eq!(p.len(), 1);
        assert_eq!(p.current_item().unwrap().url, "a");
    }

    #[test]
    fn remove_before_position_decrements_position() {
        let mut p = playlist(&["a", "b", "c"]);
        p.set_position(2);
        p.remove_item(0);
        assert_eq!(p.position(), 1);
        assert_eq!(p.current_item().unwrap().url, "c");
    }

    #[test]
    fn remove_after_position_keeps_position() {
        let mut p = playlist(&["a", "b", "c"]);
        p.set_position(0);
        p.remove_item(2);
        assert_eq!(p.position(), 0);
        assert_eq!(p.current_item().unwrap().url, "a");
    }

    #[test]
    fn remove_at_position_points_at_following_item() {
        let mut p = playlist(&["a", "b", "c"]);
        p.set_position(1);
        p.remove_item(1);
        assert_eq!(p.position(), 1);
        assert_eq!(p.current_item().unwrap().url, "c");
    }

    #[test]
    fn remove_tail_at_position_resets_to_zero() {
        let mut p = playlist(&["a", "b", "c"]);
        p.set_position(2);
        p.remove_item(2);
        assert_eq!(p.position(), 0);
        assert_eq!(p.current_item().unwrap().url, "a");
    }

    #[test]
    fn remove_out_of_range_is_ignored() {
        let mut p = playlist(&["a", "b"]);
        p.remove_item(5);
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn set_next_item_moves_after_current() {
        // [A, B, C] at position 0 -> [A, C, B]
        let mut p = playlist(&["a", "b", "c"]);
        p.set_next_item(2);
        let urls: Vec<&str> = p.items().iter().map(|i| i.url.as_str()).collect();
        assert_eq!(urls, ["a", "c", "b"]);
        assert_eq!(p.position(), 0);
    }

    #[test]
    fn set_next_item_from_before_current_preserves_current() {
        let mut p = playlist(&["a", "b", "c"]);
        p.set_position(2);
        p.set_next_item(0);
        let urls: Vec<&str> = p.items().iter().map(|i| i.url.as_str()).collect();
        assert_eq!(urls, ["b", "c", "a"]);
        assert_eq!(p.current_item().unwrap().url, "c");
    }

    #[test]
    fn skip_advances_position() {
        let mut p = playlist(&["a", "b", "c"]);
        p.skip_current();
        assert_eq!(p.position(), 1);
    }

    #[test]
    fn skip_at_last_wraps_to_zero() {
        let mut p = playlist(&["a", "b", "c"]);
        p.set_position(2);
        p.skip_current();
        assert_eq!(p.position(), 0);
    }

    #[test]
    fn skip_temporary_removes_it_in_place() {
        let mut p = Playlist::new();
        p.set_items(vec![item("a"), temp_item("b"), item("c")]);
        p.set_position(1);
        p.skip_current();
        assert_eq!(p.len(), 2);
        assert_eq!(p.current_item().unwrap().url, "c");
    }

    #[test]
    fn skip_temporary_at_tail_wraps_to_zero() {
        let mut p = Playlist::new();
        p.set_items(vec![item("a"), temp_item("b")]);
        p.set_position(1);
        p.skip_current();
        assert_eq!(p.len(), 1);
        assert_eq!(p.position(), 0);
        assert_eq!(p.current_item().unwrap().url, "a");
    }

    #[test]
    fn skip_on_empty_list_is_a_no_op() {
        let mut p = Playlist::new();
        p.skip_current();
        assert!(p.is_empty());
        assert_eq!(p.position(), 0);
    }

    #[test]
    fn toggle_temporary_flips_flag() {
        let mut p = playlist(&["a"]);
        assert!(!p.items()[0].is_temporary);
        p.toggle_temporary(0);
        assert!(p.items()[0].is_temporary);
        p.toggle_temporary(0);
        assert!(!p.items()[0].is_temporary);
    }

    #[test]
    fn shuffle_keeps_current_item_first() {
        let mut p = playlist(&["a", "b", "c", "d", "e"]);
        p.set_position(2);
        p.shuffle();
        assert_eq!(p.position(), 0);
        assert_eq!(p.current_item().unwrap().url, "c");
        assert_eq!(p.len(), 5);
    }

    #[test]
    fn clear_empties_and_resets() {
        let mut p = playlist(&["a", "b"]);
        p.set_position(1);
        p.clear();
        assert!(p.is_empty());
        assert_eq!(p.position(), 0);
        assert!(p.current_item().is_none());
    }

    #[test]
    fn find_index_returns_first_match() {
        let p = playlist(&["a", "b", "c"]);
        assert_eq!(p.find_index(|i| i.url == "b"), Some(1));
        assert_eq!(p.find_index(|i| i.url == "z"), None);
    }
}
