//! Aggregate font and indentation statistics for a scan scope.

use std::collections::BTreeMap;

use crate::model::TextElement;

/// Quantize a font size to a 0.1 pt bucket key. PDFs routinely emit
/// 11.999999 and 12.0 for what is visually one size.
fn size_key(size: f32) -> i32 {
    (size * 10.0).round() as i32
}

fn key_size(key: i32) -> f32 {
    key as f32 / 10.0
}

/// Font and indentation statistics over the elements of one scan scope.
///
/// Computed fresh per scope and never mutated afterwards. An empty scope
/// produces an empty profile, which downstream stages treat as "no
/// headings possible" rather than an error.
#[derive(Debug, Clone, Default)]
pub struct FontProfile {
    /// Distinct font sizes, largest first (0.1 pt buckets)
    pub unique_sizes: Vec<f32>,
    /// Frequency per size bucket
    size_counts: BTreeMap<i32, usize>,
    /// 25th percentile of font sizes
    pub p25: f32,
    /// 75th percentile of font sizes
    pub p75: f32,
    /// 90th percentile of font sizes
    pub p90: f32,
    /// Mean font size
    pub mean_size: f32,
    /// Population standard deviation of font sizes
    pub std_size: f32,
    /// Mean left indentation
    pub mean_indent: f32,
    /// Minimum left indentation
    pub min_indent: f32,
    element_count: usize,
}

impl FontProfile {
    /// Build a profile from the elements of a scan scope.
    pub fn from_elements(elements: &[TextElement]) -> Self {
        if elements.is_empty() {
            return Self::default();
        }

        let mut sizes: Vec<f32> = elements.iter().map(|e| e.font_size).collect();
        let indents: Vec<f32> = elements.iter().map(|e| e.indent()).collect();

        let mut size_counts: BTreeMap<i32, usize> = BTreeMap::new();
        for &size in &sizes {
            *size_counts.entry(size_key(size)).or_insert(0) += 1;
        }

        // BTreeMap iterates ascending, so reverse for largest-first
        let unique_sizes: Vec<f32> = size_counts.keys().rev().map(|&k| key_size(k)).collect();

        sizes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let n = sizes.len() as f32;
        let mean_size = sizes.iter().sum::<f32>() / n;
        let variance = sizes.iter().map(|s| (s - mean_size).powi(2)).sum::<f32>() / n;

        let mean_indent = indents.iter().sum::<f32>() / n;
        let min_indent = indents.iter().copied().fold(f32::INFINITY, f32::min);

        Self {
            unique_sizes,
            size_counts,
            p25: percentile(&sizes, 25.0),
            p75: percentile(&sizes, 75.0),
            p90: percentile(&sizes, 90.0),
            mean_size,
            std_size: variance.sqrt(),
            mean_indent,
            min_indent,
            element_count: elements.len(),
        }
    }

    /// Whether the scope had no elements.
    pub fn is_empty(&self) -> bool {
        self.element_count == 0
    }

    /// Number of elements the profile was computed from.
    pub fn element_count(&self) -> usize {
        self.element_count
    }

    /// Rank of a font size among the distinct sizes (0 = largest), by
    /// bucket identity.
    pub fn size_rank(&self, size: f32) -> Option<usize> {
        let target = size_key(size);
        self.unique_sizes
            .iter()
            .position(|&s| size_key(s) == target)
    }

    /// Whether the size is among the `n` largest distinct sizes.
    pub fn is_top_size(&self, size: f32, n: usize) -> bool {
        matches!(self.size_rank(size), Some(rank) if rank < n)
    }

    /// How many elements share this size bucket.
    pub fn size_count(&self, size: f32) -> usize {
        self.size_counts.get(&size_key(size)).copied().unwrap_or(0)
    }
}

/// Percentile with linear interpolation on an ascending-sorted slice.
fn percentile(sorted: &[f32], p: f32) -> f32 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let rank = (p / 100.0) * (sorted.len() - 1) as f32;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = rank - lo as f32;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}
