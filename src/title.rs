//! Title/version extraction.
//!
//! Providers pack variant information into the track title itself:
//! "Hello World (Radio Edit)", "Song Title feat. Someone (Remix)",
//! "Title (Live) [Remix]". This module splits a raw title into a clean
//! canonical title and a normalized version tag so the comparison rules
//! can treat the two independently.
//!
//! The marker list and both vocabularies are fixed, ordered tables;
//! matching order is part of the contract. Extending them is a data
//! change, not an algorithm change.

/// Split markers, scanned in order against the current (possibly already
/// trimmed) title. The parenthesis markers repeat before the bare dash so
/// text trimmed by an earlier pass is re-split, which catches nested
/// markers like "Title (Live) [Remix]".
static SPLIT_MARKERS: &[&str] = &[" (", " [", " - ", " (", " [", "-"];

/// Parts containing these are noise (artist credits, content flags), not
/// version tags; the title is truncated where they start.
static IGNORE_TAGS: &[&str] = &["feat.", "featuring", "ft.", "with ", " & ", "explicit"];

/// The subset of [`IGNORE_TAGS`] that marks a featured-artist credit.
/// These also cut the title when they occur in the leading segment, where
/// no split marker precedes them ("Song Title feat. Someone"). `"with "`
/// stays out: it is ordinary title vocabulary there ("With Or Without
/// You") and only counts as noise behind a split marker.
static FEATURING_TAGS: &[&str] = &["feat.", "featuring", "ft."];

/// Parts containing these are recorded as the track's version tag.
static VERSION_TAGS: &[&str] = &[
    "version",
    "live",
    "edit",
    "remix",
    "mix",
    "acoustic",
    " instrumental",
    "karaoke",
    "remaster",
    "versie",
    "radio",
    "unplugged",
    "disco",
];

/// Split a raw track title into (canonical title, canonical version tag).
///
/// `fallback_version` is consulted only when the title itself yields no
/// version; the chosen version then runs through [`substitute_version`].
/// Returns `("", "")` for empty input and a best-effort partial result for
/// anything malformed; this is a heuristic text transform, never an error.
pub fn parse_title_and_version(raw_title: &str, fallback_version: Option<&str>) -> (String, String) {
    let mut title = raw_title.to_lowercase();
    let mut version = String::new();

    for marker in SPLIT_MARKERS {
        if !title.contains(marker) {
            continue;
        }
        let parts: Vec<String> = title.split(marker).map(str::to_string).collect();
        for (part_idx, part) in parts.iter().enumerate() {
            let mut part = part.as_str();
            // keep only the content before the first closing bracket
            for closer in [")", "]"] {
                if let Some(idx) = part.find(closer) {
                    part = &part[..idx];
                }
            }
            if let Some(tag) = IGNORE_TAGS.iter().find(|t| part.contains(*t)) {
                let noise = format!("{marker}{part}");
                if let Some(idx) = title.find(&noise) {
                    title.truncate(idx);
                } else if part_idx == 0 && FEATURING_TAGS.contains(tag) {
                    // credit sits in the leading segment, cut at the tag
                    if let Some(idx) = title.find(tag) {
                        title.truncate(idx);
                    }
                }
            }
            if VERSION_TAGS.iter().any(|t| part.contains(t)) {
                version = part.to_string();
                let tagged = format!("{marker}{version}");
                if let Some(idx) = title.find(&tagged) {
                    title.truncate(idx);
                }
            }
        }
    }

    let title = title_case(title.trim());
    let version_source = if version.is_empty() {
        fallback_version.unwrap_or_default().to_string()
    } else {
        version
    };
    let version = title_case(&substitute_version(&version_source));
    (title, version)
}

/// Map a provider version string onto the universal version vocabulary.
///
/// Operates on the lowercased string in a fixed priority order: the
/// edit/edition substitutions first (both applied), then the leading
/// "the " strip, then one mutually exclusive rewrite, first match wins.
pub fn substitute_version(raw: &str) -> String {
    let mut version = raw.to_lowercase();
    if version.contains("edition") || version.contains("edit") {
        version = version.replace(" edition", " version");
        // pad with a trailing space so a terminal " edit" substitutes too
        version.push(' ');
        version = version.replace(" edit ", " version ");
    }
    if let Some(rest) = version.strip_prefix("the ") {
        version = rest.to_string();
    }
    if version.contains("radio mix") {
        version = "radio version".to_string();
    } else if version.contains("video mix") {
        version = "video version".to_string();
    } else if version.contains("spanglish") || version.contains("spanish") {
        version = "spanish version".to_string();
    } else if version.trim_end().ends_with("remaster") {
        version = "remaster".to_string();
    }
    version.trim().to_string()
}

/// Capitalize the first letter of each whitespace-separated word, keeping
/// the input's word boundaries intact.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            out.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            out.push(c);
        }
    }
    out
}
