// mixing.rs - Flag possible sample mixing from multi-allele markers

use crate::data::StrProfile;

/// Number of markers with more than two alleles
pub fn count_multi_allele_markers(profile: &StrProfile) -> usize {
    profile.markers.values().filter(|a| a.len() > 2).count()
}

/// True when more than `threshold` markers carry three or more alleles
pub fn mixing_check(profile: &StrProfile, threshold: usize) -> bool {
    count_multi_allele_markers(profile) > threshold
}
