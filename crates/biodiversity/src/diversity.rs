//! Diversity statistics over species observations.
//!
//! Pure computation: a list of species names in, richness / Shannon index /
//! top-species table out. No I/O, never fails.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maximum number of entries in the top-species table.
pub const TOP_SPECIES_LIMIT: usize = 20;

/// One row of the top-species table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopSpecies {
    pub species: String,
    pub count: u64,
    /// Fraction of all records this species accounts for, rounded to 4 decimals.
    pub share: f64,
}

/// Biodiversity statistics for a geographic area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiversityMetrics {
    /// Number of distinct species observed.
    pub richness: usize,
    /// Shannon entropy over species frequencies, rounded to 3 decimals.
    pub shannon_index: f64,
    /// Distinct species names, in order of first observation.
    pub species: Vec<String>,
    /// Up to 20 species with the highest occurrence counts.
    pub top_species: Vec<TopSpecies>,
    /// Total number of occurrence records behind the statistics.
    pub total_records: u64,
    /// Present only on simulated (fallback) results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl DiversityMetrics {
    /// An empty result: no records, no species, zero diversity.
    pub fn empty() -> Self {
        Self {
            richness: 0,
            shannon_index: 0.0,
            species: Vec::new(),
            top_species: Vec::new(),
            total_records: 0,
            note: None,
        }
    }

    /// True if this result came from the fallback simulator.
    pub fn is_simulated(&self) -> bool {
        self.note.is_some()
    }
}

/// Compute diversity statistics from a sequence of species names.
///
/// Counts occurrences per distinct name (first-encounter order), derives
/// richness and the Shannon index `-Σ p·ln(p)`, and builds the top-species
/// table sorted by descending count with first-encounter order as the
/// tie-break. An empty input yields [`DiversityMetrics::empty`].
pub fn compute(names: &[String]) -> DiversityMetrics {
    if names.is_empty() {
        return DiversityMetrics::empty();
    }

    // Count per distinct name, preserving first-encounter order.
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, u64)> = Vec::new();
    for name in names {
        match index.get(name.as_str()) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(name.as_str(), counts.len());
                counts.push((name.clone(), 1));
            }
        }
    }

    let total: u64 = counts.iter().map(|(_, c)| c).sum();
    let richness = counts.len();

    let shannon_index = if richness <= 1 {
        0.0
    } else {
        let entropy: f64 = counts
            .iter()
            .map(|&(_, c)| {
                let p = c as f64 / total as f64;
                -p * p.ln()
            })
            .sum();
        round_to(entropy, 3)
    };

    let species: Vec<String> = counts.iter().map(|(name, _)| name.clone()).collect();

    // Stable sort keeps first-encounter order among equal counts.
    let mut ranked = counts;
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(TOP_SPECIES_LIMIT);

    let top_species = ranked
        .into_iter()
        .map(|(name, count)| TopSpecies {
            species: name,
            count,
            share: round_to(count as f64 / total as f64, 4),
        })
        .collect();

    DiversityMetrics {
        richness,
        shannon_index,
        species,
        top_species,
        total_records: total,
        note: None,
    }
}

/// Round a value to `places` decimal places.
pub(crate) fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
