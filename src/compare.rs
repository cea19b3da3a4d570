//! Hierarchical equality rules for artists, albums, and tracks.
//!
//! Album and track equality is an ordered chain of short-circuiting rules:
//! authoritative identifiers first (same catalog entry, then UPC/ISRC),
//! heuristic field comparisons after. Each rule is a named entry in a
//! static table so the precedence is visible in one place and every rule
//! can be exercised on its own.

use crate::models::{Album, Artist, Track};
use crate::normalize::strings_match;

/// Maximum duration difference, in seconds, still treated as "the same
/// recording" when no album overlap confirms a track pair.
pub const DURATION_TOLERANCE_SECS: f64 = 5.0;

/// Outcome of a single rule in a match chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleOutcome {
    /// Authoritative match; stop the chain with a positive verdict.
    Accept,
    /// Definitive mismatch; stop the chain with a negative verdict.
    Reject,
    /// Inconclusive; evaluate the next rule.
    Continue,
}

/// A named short-circuiting predicate in an ordered match chain.
pub struct MatchRule<T> {
    pub name: &'static str,
    pub eval: fn(&T, &T) -> RuleOutcome,
}

/// Run a chain in order. A chain that exhausts every rule without a
/// verdict has passed all heuristics and counts as a match.
fn run_chain<T>(rules: &[MatchRule<T>], left: &T, right: &T) -> bool {
    for rule in rules {
        match (rule.eval)(left, right) {
            RuleOutcome::Accept => return true,
            RuleOutcome::Reject => return false,
            RuleOutcome::Continue => {}
        }
    }
    true
}

// ============================================================================
// Artists
// ============================================================================

/// True iff any pair of artists across the two lists has matching names
/// (non-strict). Either list being empty means no match.
pub fn artists_match(left: &[Artist], right: &[Artist]) -> bool {
    left.iter()
        .any(|l| right.iter().any(|r| strings_match(&l.name, &r.name, false)))
}

// ============================================================================
// Albums
// ============================================================================

fn album_same_catalog_entry(l: &Album, r: &Album) -> RuleOutcome {
    if l.provider == r.provider && l.item_id == r.item_id {
        RuleOutcome::Accept
    } else {
        RuleOutcome::Continue
    }
}

fn album_shared_upc(l: &Album, r: &Album) -> RuleOutcome {
    match (l.upc.as_deref(), r.upc.as_deref()) {
        // UPC is always a 100% accurate match
        (Some(a), Some(b)) if !a.is_empty() && a == b => RuleOutcome::Accept,
        _ => RuleOutcome::Continue,
    }
}

fn album_name(l: &Album, r: &Album) -> RuleOutcome {
    if strings_match(&l.name, &r.name, false) {
        RuleOutcome::Continue
    } else {
        RuleOutcome::Reject
    }
}

fn album_version(l: &Album, r: &Album) -> RuleOutcome {
    if strings_match(&l.version, &r.version, false) {
        RuleOutcome::Continue
    } else {
        RuleOutcome::Reject
    }
}

fn album_artist(l: &Album, r: &Album) -> RuleOutcome {
    if strings_match(&l.artist.name, &r.artist.name, false) {
        RuleOutcome::Continue
    } else {
        RuleOutcome::Reject
    }
}

fn album_year(l: &Album, r: &Album) -> RuleOutcome {
    // missing year matches another missing year, never a defined one
    if l.year == r.year {
        RuleOutcome::Continue
    } else {
        RuleOutcome::Reject
    }
}

/// Album rules in evaluation order: authoritative identity, then the
/// heuristic field comparisons.
pub static ALBUM_RULES: &[MatchRule<Album>] = &[
    MatchRule { name: "same_catalog_entry", eval: album_same_catalog_entry },
    MatchRule { name: "shared_upc", eval: album_shared_upc },
    MatchRule { name: "name", eval: album_name },
    MatchRule { name: "version", eval: album_version },
    MatchRule { name: "artist", eval: album_artist },
    MatchRule { name: "year", eval: album_year },
];

/// True iff the two album records describe the same real-world release.
pub fn albums_match(left: &Album, right: &Album) -> bool {
    run_chain(ALBUM_RULES, left, right)
}

/// True iff any pair across the two album lists matches.
pub fn album_lists_match(left: &[Album], right: &[Album]) -> bool {
    left.iter().any(|l| right.iter().any(|r| albums_match(l, r)))
}

// ============================================================================
// Tracks
// ============================================================================

fn track_same_catalog_entry(l: &Track, r: &Track) -> RuleOutcome {
    if l.provider == r.provider && l.item_id == r.item_id {
        RuleOutcome::Accept
    } else {
        RuleOutcome::Continue
    }
}

fn track_shared_isrc(l: &Track, r: &Track) -> RuleOutcome {
    match (l.isrc.as_deref(), r.isrc.as_deref()) {
        // ISRC is always a 100% accurate match
        (Some(a), Some(b)) if !a.is_empty() && a == b => RuleOutcome::Accept,
        _ => RuleOutcome::Continue,
    }
}

fn track_name(l: &Track, r: &Track) -> RuleOutcome {
    if strings_match(&l.name, &r.name, false) {
        RuleOutcome::Continue
    } else {
        RuleOutcome::Reject
    }
}

fn track_version(l: &Track, r: &Track) -> RuleOutcome {
    if strings_match(&l.version, &r.version, false) {
        RuleOutcome::Continue
    } else {
        RuleOutcome::Reject
    }
}

fn track_artists(l: &Track, r: &Track) -> RuleOutcome {
    if artists_match(&l.artists, &r.artists) {
        RuleOutcome::Continue
    } else {
        RuleOutcome::Reject
    }
}

fn track_album_or_duration(l: &Track, r: &Track) -> RuleOutcome {
    // either a plausible album overlap or a near-identical duration is
    // enough; only both failing rejects the pair
    if album_lists_match(l.album_set(), r.album_set())
        || (l.duration - r.duration).abs() <= DURATION_TOLERANCE_SECS
    {
        RuleOutcome::Continue
    } else {
        RuleOutcome::Reject
    }
}

/// Track rules in evaluation order.
pub static TRACK_RULES: &[MatchRule<Track>] = &[
    MatchRule { name: "same_catalog_entry", eval: track_same_catalog_entry },
    MatchRule { name: "shared_isrc", eval: track_shared_isrc },
    MatchRule { name: "name", eval: track_name },
    MatchRule { name: "version", eval: track_version },
    MatchRule { name: "artists", eval: track_artists },
    MatchRule { name: "album_or_duration", eval: track_album_or_duration },
];

/// True iff the two track records describe the same real-world recording.
pub fn tracks_match(left: &Track, right: &Track) -> bool {
    run_chain(TRACK_RULES, left, right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Album, Artist, Track};

    fn artist(name: &str) -> Artist {
        Artist::new(name)
    }

    fn album(provider: &str, item_id: &str, name: &str, artist_name: &str) -> Album {
        Album {
            provider: provider.to_string(),
            item_id: item_id.to_string(),
            upc: None,
            name: name.to_string(),
            version: String::new(),
            artist: artist(artist_name),
            year: Some(1997),
        }
    }

    fn track(provider: &str, item_id: &str, name: &str, artist_name: &str) -> Track {
        Track {
            provider: provider.to_string(),
            item_id: item_id.to_string(),
            isrc: None,
            name: name.to_string(),
            version: String::new(),
            artists: vec![artist(artist_name)],
            albums: vec![],
            album: Some(album("spotify", "a1", "Album", artist_name)),
            duration: 200.0,
        }
    }

    // ------------------------------------------------------------------
    // artists
    // ------------------------------------------------------------------

    #[test]
    fn test_artists_match_any_pair() {
        let left = vec![artist("Queen"), artist("David Bowie")];
        let right = vec![artist("david bowie")];
        assert!(artists_match(&left, &right));
    }

    #[test]
    fn test_artists_match_fuzzy_names() {
        assert!(artists_match(&[artist("Beyoncé")], &[artist("Beyonce")]));
    }

    #[test]
    fn test_artists_match_empty_lists() {
        assert!(!artists_match(&[], &[artist("Anyone")]));
        assert!(!artists_match(&[artist("Anyone")], &[]));
        assert!(!artists_match(&[], &[]));
    }

    // ------------------------------------------------------------------
    // albums
    // ------------------------------------------------------------------

    #[test]
    fn test_album_same_catalog_entry_wins() {
        let l = album("tidal", "99", "Completely Different", "Nobody");
        let r = album("tidal", "99", "Other Name", "Someone Else");
        assert!(albums_match(&l, &r));
    }

    #[test]
    fn test_album_same_item_id_other_provider_is_not_authoritative() {
        let l = album("tidal", "99", "Name A", "Artist A");
        let r = album("qobuz", "99", "Name B", "Artist B");
        assert!(!albums_match(&l, &r));
    }

    #[test]
    fn test_album_upc_overrides_heuristics() {
        let mut l = album("tidal", "1", "Name A", "Artist A");
        let mut r = album("qobuz", "2", "Name B", "Artist B");
        l.upc = Some("0602547973696".to_string());
        r.upc = Some("0602547973696".to_string());
        r.year = Some(2003);
        assert!(albums_match(&l, &r));
    }

    #[test]
    fn test_album_empty_upc_is_not_authoritative() {
        let mut l = album("tidal", "1", "Name A", "Artist A");
        let mut r = album("qobuz", "2", "Name B", "Artist B");
        l.upc = Some(String::new());
        r.upc = Some(String::new());
        assert!(!albums_match(&l, &r));
    }

    #[test]
    fn test_album_heuristic_match() {
        let l = album("tidal", "1", "OK Computer", "Radiohead");
        let r = album("qobuz", "2", "OK Computer", "radiohead");
        assert!(albums_match(&l, &r));
    }

    #[test]
    fn test_album_name_mismatch_rejects() {
        let l = album("tidal", "1", "OK Computer", "Radiohead");
        let r = album("qobuz", "2", "Kid A", "Radiohead");
        assert!(!albums_match(&l, &r));
    }

    #[test]
    fn test_album_version_mismatch_rejects() {
        let l = album("tidal", "1", "OK Computer", "Radiohead");
        let mut r = album("qobuz", "2", "OK Computer", "Radiohead");
        r.version = "Deluxe Version".to_string();
        assert!(!albums_match(&l, &r));
    }

    #[test]
    fn test_album_year_rules() {
        let l = album("tidal", "1", "OK Computer", "Radiohead");
        let mut r = album("qobuz", "2", "OK Computer", "Radiohead");

        r.year = Some(1998);
        assert!(!albums_match(&l, &r), "differing years must reject");

        r.year = None;
        assert!(!albums_match(&l, &r), "missing vs defined year must reject");

        let mut l2 = l.clone();
        l2.year = None;
        assert!(albums_match(&l2, &r), "two missing years pass");
    }

    #[test]
    fn test_album_match_is_symmetric() {
        let l = album("tidal", "1", "OK Computer", "Radiohead");
        let mut r = album("qobuz", "2", "OK  Computer", "Radiohead");
        r.year = None;
        assert_eq!(albums_match(&l, &r), albums_match(&r, &l));
    }

    #[test]
    fn test_album_lists_match_any_pair() {
        let l = vec![
            album("tidal", "1", "Kid A", "Radiohead"),
            album("tidal", "2", "OK Computer", "Radiohead"),
        ];
        let r = vec![album("qobuz", "9", "OK Computer", "Radiohead")];
        assert!(album_lists_match(&l, &r));
        assert!(!album_lists_match(&l, &[]));
    }

    // ------------------------------------------------------------------
    // tracks
    // ------------------------------------------------------------------

    #[test]
    fn test_track_same_catalog_entry_wins() {
        let l = track("tidal", "t1", "Song A", "Artist A");
        let r = track("tidal", "t1", "Song B", "Artist B");
        assert!(tracks_match(&l, &r));
    }

    #[test]
    fn test_track_isrc_overrides_heuristics() {
        let mut l = track("tidal", "t1", "Song A", "Artist A");
        let mut r = track("qobuz", "t2", "Song B", "Artist B");
        l.isrc = Some("USUM71703861".to_string());
        r.isrc = Some("USUM71703861".to_string());
        r.duration = 90.0;
        assert!(tracks_match(&l, &r));
    }

    #[test]
    fn test_track_empty_isrc_is_not_authoritative() {
        let mut l = track("tidal", "t1", "Song", "Artist");
        let mut r = track("qobuz", "t2", "Song", "Artist");
        l.isrc = Some(String::new());
        r.isrc = Some(String::new());
        // falls through to heuristics, which pass here
        assert!(tracks_match(&l, &r));
    }

    #[test]
    fn test_track_name_mismatch_rejects() {
        let l = track("tidal", "t1", "Song A", "Artist");
        let r = track("qobuz", "t2", "Song B", "Artist");
        assert!(!tracks_match(&l, &r));
    }

    #[test]
    fn test_track_version_mismatch_rejects() {
        let l = track("tidal", "t1", "Song", "Artist");
        let mut r = track("qobuz", "t2", "Song", "Artist");
        r.version = "Live".to_string();
        assert!(!tracks_match(&l, &r));
    }

    #[test]
    fn test_track_empty_versions_match() {
        let l = track("tidal", "t1", "Song", "Artist");
        let r = track("qobuz", "t2", "Song", "Artist");
        assert!(tracks_match(&l, &r));
    }

    #[test]
    fn test_track_artist_mismatch_rejects() {
        let l = track("tidal", "t1", "Song", "Artist A");
        let r = track("qobuz", "t2", "Song", "Artist B");
        assert!(!tracks_match(&l, &r));
    }

    #[test]
    fn test_track_duration_tolerance_boundary() {
        let l = track("tidal", "t1", "Song", "Artist");
        let mut r = track("qobuz", "t2", "Song", "Artist");
        // remove album overlap so only the duration fallback remains
        r.album = Some(album("qobuz", "other", "Other Album", "Artist"));

        r.duration = l.duration + 5.0;
        assert!(tracks_match(&l, &r), "exactly 5 seconds apart matches");

        r.duration = l.duration + 6.0;
        assert!(!tracks_match(&l, &r), "6 seconds apart does not match");
    }

    #[test]
    fn test_track_album_overlap_beats_duration_gap() {
        let l = track("tidal", "t1", "Song", "Artist");
        let mut r = track("qobuz", "t2", "Song", "Artist");
        // same album heuristically, wildly different duration
        r.duration = 500.0;
        assert!(tracks_match(&l, &r));
    }

    #[test]
    fn test_track_albums_list_overrides_single_album() {
        let l = track("tidal", "t1", "Song", "Artist");
        let mut r = track("qobuz", "t2", "Song", "Artist");
        r.duration = 500.0;
        // the non-empty albums list hides the matching single album
        r.albums = vec![album("qobuz", "x", "Unrelated", "Artist")];
        assert!(!tracks_match(&l, &r));
    }

    #[test]
    fn test_track_match_is_symmetric() {
        let l = track("tidal", "t1", "Song", "Artist");
        let mut r = track("qobuz", "t2", "song", "artist");
        r.duration = l.duration + 3.0;
        assert_eq!(tracks_match(&l, &r), tracks_match(&r, &l));
    }

    // ------------------------------------------------------------------
    // individual rules
    // ------------------------------------------------------------------

    #[test]
    fn test_rule_outcomes_in_isolation() {
        let l = album("tidal", "1", "OK Computer", "Radiohead");
        let r = album("qobuz", "2", "Kid A", "Radiohead");
        assert_eq!(album_same_catalog_entry(&l, &r), RuleOutcome::Continue);
        assert_eq!(album_shared_upc(&l, &r), RuleOutcome::Continue);
        assert_eq!(album_name(&l, &r), RuleOutcome::Reject);
        assert_eq!(album_artist(&l, &r), RuleOutcome::Continue);
    }

    #[test]
    fn test_rule_tables_keep_authoritative_rules_first() {
        let album_names: Vec<&str> = ALBUM_RULES.iter().map(|r| r.name).collect();
        assert_eq!(album_names[..2], ["same_catalog_entry", "shared_upc"]);
        let track_names: Vec<&str> = TRACK_RULES.iter().map(|r| r.name).collect();
        assert_eq!(track_names[..2], ["same_catalog_entry", "shared_isrc"]);
    }
}
