//! Core types for albumstore

use serde::{Deserialize, Serialize};

/// Album ID type
pub type AlbumId = String;

/// A single catalogue record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Album {
    #[serde(default)]
    pub id: AlbumId,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "artiste")]
    pub artist: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub price: f64,
}

impl Album {
    /// Build a record from a request payload under the given ID
    pub fn from_payload(id: impl Into<AlbumId>, payload: AlbumPayload) -> Self {
        Self {
            id: id.into(),
            title: payload.title,
            artist: payload.artist,
            year: payload.year,
            price: payload.price,
        }
    }

    /// Whether this album has the same title and artist, ignoring case and
    /// surrounding whitespace.
    pub fn same_work(&self, title: &str, artist: &str) -> bool {
        normalize(&self.title) == normalize(title) && normalize(&self.artist) == normalize(artist)
    }
}

/// Album fields supplied by a client; any `id` in the body is ignored
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AlbumPayload {
    pub title: String,
    #[serde(alias = "artiste")]
    pub artist: String,
    pub year: i32,
    pub price: f64,
}

impl AlbumPayload {
    pub fn new(title: impl Into<String>, artist: impl Into<String>, year: i32, price: f64) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            year,
            price,
        }
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}
