//! catalog-match: deterministic entity matching for music metadata.
//!
//! Given two descriptions of an artist, album, or track from different
//! catalogs, decide whether they refer to the same real-world entity.
//! Authoritative identifiers (provider identity, UPC, ISRC) win outright;
//! everything else falls back to canonicalized field comparison.

pub mod compare;
pub mod dedup;
pub mod models;
pub mod normalize;
pub mod title;

pub use compare::{
    album_lists_match, albums_match, artists_match, tracks_match, DURATION_TOLERANCE_SECS,
};
pub use dedup::{scan_duplicates, ScanReport, TrackIndex};
pub use models::{Album, Artist, Track};
pub use normalize::{canonicalize, sort_name, strings_match};
pub use title::{parse_title_and_version, substitute_version};
