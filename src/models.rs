//! Entity records for catalog matching.
//!
//! These are read-only snapshots of what a provider adapter parsed out of
//! its upstream catalog. The matching engine only reads them through these
//! fields; it never constructs, mutates, or persists entities itself.
//!
//! Optional fields carry `#[serde(default)]` so partial provider payloads
//! deserialize without errors.

use serde::{Deserialize, Serialize};

/// An artist as credited by a provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub name: String,
}

impl Artist {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// An album entry from one provider's catalog.
///
/// `provider` + `item_id` identify the entry within that provider only.
/// `upc` is an authoritative cross-provider identifier: two albums sharing
/// a non-empty UPC are the same real-world release by definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub provider: String,
    pub item_id: String,
    #[serde(default)]
    pub upc: Option<String>,
    pub name: String,
    #[serde(default)]
    pub version: String,
    pub artist: Artist,
    #[serde(default)]
    pub year: Option<i32>,
}

/// A track entry from one provider's catalog.
///
/// `isrc` is the track-level authoritative identifier, analogous to the
/// album UPC. `duration` is in seconds; providers report fractional values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub provider: String,
    pub item_id: String,
    #[serde(default)]
    pub isrc: Option<String>,
    pub name: String,
    #[serde(default)]
    pub version: String,
    pub artists: Vec<Artist>,
    /// All albums this track appears on. Empty means the provider only
    /// reported the single `album` field.
    #[serde(default)]
    pub albums: Vec<Album>,
    #[serde(default)]
    pub album: Option<Album>,
    pub duration: f64,
}

impl Track {
    /// The album set to compare against: the `albums` list when non-empty,
    /// otherwise the single `album` field as a zero-or-one element slice.
    pub fn album_set(&self) -> &[Album] {
        if !self.albums.is_empty() {
            &self.albums
        } else {
            self.album.as_slice()
        }
    }
}
