// profile.rs - STR profile and cohort data structures

use std::collections::HashMap;
use std::fmt;

/// Cohort-level completeness and multi-allele metrics
#[derive(Debug, Clone)]
pub struct CohortStatistics {
    pub n_samples: usize,
    pub n_markers: usize,
    pub uncalled: usize,
    pub uncalled_percent: f64,
    pub complete_samples: usize,
    pub multi_allele_calls: usize,
}

/// Allele labels of one marker of one sample.
///
/// Labels keep insertion order and are unique. Whitespace and trailing ".0"
/// artifacts are removed on insert, empty labels are never stored. An empty
/// set means the marker was not called.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlleleSet {
    labels: Vec<String>,
}

impl AlleleSet {
    pub fn new() -> Self {
        Self { labels: Vec::new() }
    }

    /// Normalize one raw allele label; `None` when nothing is left
    pub fn clean_label(raw: &str) -> Option<String> {
        let mut label = raw.trim();
        while let Some(stripped) = label.strip_suffix(".0") {
            label = stripped.trim_end();
        }
        if label.is_empty() {
            None
        } else {
            Some(label.to_string())
        }
    }

    /// Insert a raw label; returns false if it was empty or already present
    pub fn insert(&mut self, raw: &str) -> bool {
        match Self::clean_label(raw) {
            Some(label) if !self.labels.contains(&label) => {
                self.labels.push(label);
                true
            }
            _ => false,
        }
    }

    /// Build from a comma-separated allele list, keeping first-seen order
    pub fn parse_list(value: &str) -> Self {
        let mut set = Self::new();
        for piece in value.split(',') {
            set.insert(piece);
        }
        set
    }

    /// Reorder labels lexicographically
    pub fn sorted(mut self) -> Self {
        self.labels.sort();
        self
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// Size of the intersection with `other`
    pub fn shared_count(&self, other: &AlleleSet) -> usize {
        self.labels.iter().filter(|l| other.contains(l)).count()
    }
}

impl<S: AsRef<str>> FromIterator<S> for AlleleSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for label in iter {
            set.insert(label.as_ref());
        }
        set
    }
}

impl fmt::Display for AlleleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.labels.join(","))
    }
}

/// A single sample's STR profile
#[derive(Debug, Clone, PartialEq)]
pub struct StrProfile {
    pub sample_id: String,
    pub markers: HashMap<String, AlleleSet>,
}

impl StrProfile {
    pub fn new(sample_id: impl Into<String>) -> Self {
        Self {
            sample_id: sample_id.into(),
            markers: HashMap::new(),
        }
    }

    /// Builder used by fixtures and tests: `"9,10"` style allele lists
    pub fn with_marker(mut self, marker: &str, alleles: &str) -> Self {
        self.markers
            .insert(marker.to_string(), AlleleSet::parse_list(alleles));
        self
    }

    pub fn alleles(&self, marker: &str) -> Option<&AlleleSet> {
        self.markers.get(marker)
    }

    /// Markers with at least one allele call
    pub fn called_markers(&self) -> impl Iterator<Item = (&str, &AlleleSet)> {
        self.markers
            .iter()
            .filter(|(_, alleles)| !alleles.is_empty())
            .map(|(marker, alleles)| (marker.as_str(), alleles))
    }
}

/// Canonical collection of profiles with the ordered union of marker names
#[derive(Debug, Default)]
pub struct Cohort {
    pub samples: Vec<StrProfile>,
    pub marker_names: Vec<String>,
}

impl Cohort {
    pub fn new() -> Self {
        Self {
            samples: Vec::new(),
            marker_names: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, sample_id: &str) -> Option<&StrProfile> {
        self.samples.iter().find(|s| s.sample_id == sample_id)
    }

    pub fn sample_ids(&self) -> impl Iterator<Item = &str> {
        self.samples.iter().map(|s| s.sample_id.as_str())
    }

    /// Calculate completeness metrics over all sample × marker cells
    pub fn calculate_statistics(&self) -> CohortStatistics {
        let n_samples = self.samples.len();
        let n_markers = self.marker_names.len();

        let mut uncalled = 0;
        let mut complete_samples = 0;
        let mut multi_allele_calls = 0;

        for sample in &self.samples {
            let missing = self
                .marker_names
                .iter()
                .filter(|marker| sample.alleles(marker).map_or(true, AlleleSet::is_empty))
                .count();
            if missing == 0 {
                complete_samples += 1;
            }
            uncalled += missing;
            multi_allele_calls += sample.markers.values().filter(|a| a.len() > 2).count();
        }

        let total_cells = n_samples * n_markers;
        let uncalled_percent = if total_cells > 0 {
            100.0 * uncalled as f64 / total_cells as f64
        } else {
            0.0
        };

        CohortStatistics {
            n_samples,
            n_markers,
            uncalled,
            uncalled_percent,
            complete_samples,
            multi_allele_calls,
        }
    }

    /// Print cohort statistics
    pub fn print_statistics(&self, phase: &str) {
        let stats = self.calculate_statistics();
        println!("\n📊 === COHORT STATISTICS ({}) ===", phase);
        println!(
            "  📏 Dimensions: {} samples × {} markers = {} total calls",
            stats.n_samples,
            stats.n_markers,
            stats.n_samples * stats.n_markers
        );

        print!(
            "  📊 Uncalled markers: {:.2}% ({} calls)",
            stats.uncalled_percent, stats.uncalled
        );
        if stats.uncalled_percent <= 5.0 {
            println!("  🟢 EXCELLENT");
        } else if stats.uncalled_percent <= 15.0 {
            println!("  🟡 GOOD");
        } else {
            println!("  🟠 HIGH - comparisons will rely on fewer shared markers");
        }

        println!(
            "  ✅ Complete samples: {} ({:.1}%)",
            stats.complete_samples,
            if stats.n_samples > 0 {
                100.0 * stats.complete_samples as f64 / stats.n_samples as f64
            } else {
                0.0
            }
        );
        println!(
            "  🧬 Marker calls with >2 alleles: {}",
            stats.multi_allele_calls
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_label() {
        assert_eq!(AlleleSet::clean_label(" 10.0 "), Some("10".to_string()));
        assert_eq!(AlleleSet::clean_label("10"), Some("10".to_string()));
        assert_eq!(AlleleSet::clean_label("9.3"), Some("9.3".to_string()));
        assert_eq!(AlleleSet::clean_label("30.0.0"), Some("30".to_string()));
        assert_eq!(AlleleSet::clean_label("X"), Some("X".to_string()));
        assert_eq!(AlleleSet::clean_label("  "), None);
        assert_eq!(AlleleSet::clean_label(".0"), None);
    }

    #[test]
    fn test_parse_list_dedups_in_first_seen_order() {
        let set = AlleleSet::parse_list("12, 9,12.0,,9 ,10");
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["12", "9", "10"]);
        assert_eq!(set.to_string(), "12,9,10");

        for label in set.iter() {
            assert!(!label.ends_with(".0"));
            assert!(!label.is_empty());
        }
    }

    #[test]
    fn test_sorted_is_lexicographic() {
        let set = AlleleSet::parse_list("9,10,8").sorted();
        assert_eq!(set.to_string(), "10,8,9");
    }

    #[test]
    fn test_shared_count() {
        let a = AlleleSet::parse_list("9,10,11");
        let b: AlleleSet = ["10", "11", "12"].into_iter().collect();
        assert_eq!(a.shared_count(&b), 2);
        assert_eq!(b.shared_count(&a), 2);
        assert_eq!(a.shared_count(&AlleleSet::new()), 0);
    }

    #[test]
    fn test_called_markers_skips_empty() {
        let profile = StrProfile::new("A")
            .with_marker("TH01", "6,9.3")
            .with_marker("TPOX", "");
        let called: Vec<_> = profile.called_markers().map(|(m, _)| m).collect();
        assert_eq!(called, vec!["TH01"]);
    }

    #[test]
    fn test_statistics() {
        let cohort = Cohort {
            samples: vec![
                StrProfile::new("A")
                    .with_marker("TH01", "6,9.3")
                    .with_marker("TPOX", "8,9,11"),
                StrProfile::new("B")
                    .with_marker("TH01", "7")
                    .with_marker("TPOX", ""),
            ],
            marker_names: vec!["TH01".to_string(), "TPOX".to_string()],
        };

        let stats = cohort.calculate_statistics();
        assert_eq!(stats.n_samples, 2);
        assert_eq!(stats.n_markers, 2);
        assert_eq!(stats.uncalled, 1);
        assert_eq!(stats.complete_samples, 1);
        assert_eq!(stats.multi_allele_calls, 1);
        assert!((stats.uncalled_percent - 25.0).abs() < 1e-9);

        assert!(cohort.get("B").is_some());
        assert!(cohort.get("C").is_none());
    }
}
