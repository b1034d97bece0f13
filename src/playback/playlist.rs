//! Append-only playlist and next/previous index arithmetic

use rand::Rng;

use crate::model::Track;

#[derive(Clone, Debug, Default)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    pub fn extend(&mut self, tracks: impl IntoIterator<Item = Track>) {
        self.tracks.extend(tracks);
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn index_of(&self, track: &Track) -> Option<usize> {
        self.tracks.iter().position(|t| t.is_same(track))
    }

    /// Index after `current`, wrapping. A track missing from the playlist
    /// counts as sitting just before the first entry.
    pub fn next_index(&self, current: Option<usize>, shuffle: bool, rng: &mut impl Rng) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }
        if shuffle {
            return Some(rng.random_range(0..self.tracks.len()));
        }
        Some(match current {
            Some(idx) => (idx + 1) % self.tracks.len(),
            None => 0,
        })
    }

    /// Index before `current`, wrapping.
    pub fn previous_index(&self, current: Option<usize>, shuffle: bool, rng: &mut impl Rng) -> Option<usize> {
        let len = self.tracks.len();
        if len == 0 {
            return None;
        }
        if shuffle {
            return Some(rng.random_range(0..len));
        }
        Some(match current {
            Some(idx) => (idx + len - 1) % len,
            None => len - 1,
        })
    }
}
