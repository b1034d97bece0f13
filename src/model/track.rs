//! The catalog track entity

use serde::Deserialize;

/// A track as fetched from the catalog. Never mutated after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artist_name: String,
    pub album_name: Option<String>,
    /// Length in whole seconds as reported by the catalog.
    pub duration: u32,
    pub audio: String,
    pub image: Option<String>,
    pub shareurl: String,
}

impl Track {
    pub fn is_same(&self, other: &Track) -> bool {
        self.id == other.id
    }
}

/// Raw track record as returned by the `tracks` endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct RawTrack {
    id: RawId,
    #[serde(default)]
    name: String,
    #[serde(default)]
    artist_name: String,
    #[serde(default)]
    album_name: Option<String>,
    #[serde(default)]
    duration: RawDuration,
    #[serde(default)]
    audio: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    shareurl: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
enum RawDuration {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl RawDuration {
    fn seconds(&self) -> u32 {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            Self::Missing => 0.0,
        };
        if value.is_finite() && value > 0.0 {
            value.round().min(u32::MAX as f64) as u32
        } else {
            0
        }
    }
}

impl From<RawTrack> for Track {
    fn from(raw: RawTrack) -> Self {
        let id = match raw.id {
            RawId::Text(id) => id,
            RawId::Number(id) => id.to_string(),
        };
        Self {
            id,
            name: raw.name,
            artist_name: raw.artist_name,
            album_name: raw.album_name.filter(|a| !a.trim().is_empty()),
            duration: raw.duration.seconds(),
            audio: raw.audio,
            image: raw.image.filter(|i| !i.trim().is_empty()),
            shareurl: raw.shareurl,
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_track(id: &str) -> Track {
    Track {
        id: id.to_string(),
        name: format!("Song {id}"),
        artist_name: format!("Artist {id}"),
        album_name: None,
        duration: 180,
        audio: format!("https://audio.example/{id}.mp3"),
        image: None,
        shareurl: format!("https://share.example/{id}"),
    }
}
