//! Parallel catalog deduplication scans.
//!
//! Pair-by-pair matching is O(n*m); for whole-catalog scans the candidate
//! set per probe is narrowed first with hash indexes keyed on the canonical
//! track name, the ISRC, and the (provider, item_id) identity. A heuristic
//! track match requires canonically equal names and an authoritative match
//! requires an ISRC or provider-identity hit, so the union of the three
//! buckets never misses a pair `tracks_match` would accept.
//!
//! Pair confirmations are independent pure comparisons, so probes fan out
//! over a rayon thread pool with no coordination.

use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::compare::tracks_match;
use crate::models::Track;
use crate::normalize::canonicalize;

/// Candidate index over one side of a catalog scan.
pub struct TrackIndex<'a> {
    tracks: &'a [Track],
    by_name: FxHashMap<String, Vec<usize>>,
    by_isrc: FxHashMap<&'a str, Vec<usize>>,
    by_catalog: FxHashMap<(&'a str, &'a str), Vec<usize>>,
}

impl<'a> TrackIndex<'a> {
    pub fn build(tracks: &'a [Track]) -> Self {
        let mut by_name: FxHashMap<String, Vec<usize>> = FxHashMap::default();
        let mut by_isrc: FxHashMap<&str, Vec<usize>> = FxHashMap::default();
        let mut by_catalog: FxHashMap<(&str, &str), Vec<usize>> = FxHashMap::default();
        for (idx, track) in tracks.iter().enumerate() {
            by_name.entry(canonicalize(&track.name)).or_default().push(idx);
            if let Some(isrc) = track.isrc.as_deref() {
                if !isrc.is_empty() {
                    by_isrc.entry(isrc).or_default().push(idx);
                }
            }
            by_catalog
                .entry((track.provider.as_str(), track.item_id.as_str()))
                .or_default()
                .push(idx);
        }
        Self { tracks, by_name, by_isrc, by_catalog }
    }

    /// All indexed tracks that could possibly match the probe, deduplicated
    /// and in catalog order.
    pub fn candidates(&self, probe: &Track) -> Vec<usize> {
        let mut out = Vec::new();
        if let Some(bucket) = self.by_name.get(&canonicalize(&probe.name)) {
            out.extend_from_slice(bucket);
        }
        if let Some(isrc) = probe.isrc.as_deref() {
            if !isrc.is_empty() {
                if let Some(bucket) = self.by_isrc.get(isrc) {
                    out.extend_from_slice(bucket);
                }
            }
        }
        if let Some(bucket) = self
            .by_catalog
            .get(&(probe.provider.as_str(), probe.item_id.as_str()))
        {
            out.extend_from_slice(bucket);
        }
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Confirmed matches for one probe.
    pub fn matches(&self, probe: &Track) -> Vec<usize> {
        self.candidates(probe)
            .into_iter()
            .filter(|&idx| tracks_match(probe, &self.tracks[idx]))
            .collect()
    }
}

/// Counters for one deduplication scan, serialized as JSON for phase logs.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ScanReport {
    pub probes: usize,
    pub catalog_size: usize,
    pub candidates_checked: usize,
    pub matches: usize,
    pub elapsed_seconds: f64,
}

impl ScanReport {
    /// Fraction of probes with at least one confirmed duplicate, as a
    /// percentage.
    pub fn match_rate(&self) -> f64 {
        if self.probes == 0 {
            0.0
        } else {
            100.0 * self.matches as f64 / self.probes as f64
        }
    }

    /// Log the report to stderr in JSON format.
    pub fn log_phase(&self, phase: &str) {
        if let Ok(json) = serde_json::to_string_pretty(self) {
            eprintln!("[SCAN:{}]\n{}", phase, json);
        }
    }

    /// Write the report to a JSON file.
    pub fn write_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Scan `probes` against `catalog` and return every confirmed duplicate
/// pair as (probe index, catalog index), along with the scan counters.
///
/// Pairs come back grouped by probe in ascending order; comparisons run in
/// parallel and are order-independent.
pub fn scan_duplicates(probes: &[Track], catalog: &[Track]) -> (Vec<(usize, usize)>, ScanReport) {
    let start = Instant::now();
    let index = TrackIndex::build(catalog);

    let per_probe: Vec<(Vec<usize>, usize)> = probes
        .par_iter()
        .map(|probe| {
            let candidates = index.candidates(probe);
            let checked = candidates.len();
            let hits: Vec<usize> = candidates
                .into_iter()
                .filter(|&idx| tracks_match(probe, &catalog[idx]))
                .collect();
            (hits, checked)
        })
        .collect();

    let mut pairs = Vec::new();
    let mut candidates_checked = 0;
    let mut matched_probes = 0;
    for (probe_idx, (hits, checked)) in per_probe.into_iter().enumerate() {
        candidates_checked += checked;
        if !hits.is_empty() {
            matched_probes += 1;
        }
        pairs.extend(hits.into_iter().map(|hit| (probe_idx, hit)));
    }

    let report = ScanReport {
        probes: probes.len(),
        catalog_size: catalog.len(),
        candidates_checked,
        matches: matched_probes,
        elapsed_seconds: start.elapsed().as_secs_f64(),
    };
    (pairs, report)
}
