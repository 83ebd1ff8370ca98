use std::collections::BTreeMap;

use crate::sketch::Histogram;

/// Number of quantile buckets an [`icdf`] table is sampled at.
const ICDF_RESOLUTION: usize = 1000;

/// The empirical CDF of `hist`, mapping each non-empty bin to the fraction of total count at
/// or below it. Empty (or all-zero) histograms yield an empty map.
pub fn cdf(hist: &Histogram) -> BTreeMap<i64, f64> {
    let total: u64 = hist.values().sum();
    let mut out = BTreeMap::new();
    if total == 0 {
        return out;
    }
    let mut running = 0u64;
    for (&bin, &count) in hist {
        running += count;
        out.insert(bin, running as f64 / total as f64);
    }
    out
}

/// The inverse CDF of `hist`, sampled at `q = i / 1000` for `i` in `0..1000`. An empty CDF
/// yields an all-zero table.
pub fn icdf(hist: &Histogram) -> [i64; ICDF_RESOLUTION] {
    let cdf_map = cdf(hist);
    let mut out = [0i64; ICDF_RESOLUTION];
    if cdf_map.is_empty() {
        return out;
    }

    let mut idx = 0usize;
    let mut last_bin = 0i64;
    for (&bin, &fraction) in &cdf_map {
        let upto = ((fraction * ICDF_RESOLUTION as f64).floor() as usize).min(ICDF_RESOLUTION);
        while idx < upto {
            out[idx] = bin;
            idx += 1;
        }
        last_bin = bin;
    }
    while idx < ICDF_RESOLUTION {
        out[idx] = last_bin;
        idx += 1;
    }
    out
}

/// Looks up each quantile in `qs` (expected in `[0, 1)`) against `hist`'s [`icdf`] table.
/// Quantiles outside `[0, 1)` are clamped to the nearest valid index rather than panicking.
pub fn quantile(hist: &Histogram, qs: &[f64]) -> Vec<i64> {
    let table = icdf(hist);
    qs.iter()
        .map(|&q| {
            let raw = (q * ICDF_RESOLUTION as f64).floor();
            let idx = raw.clamp(0.0, (ICDF_RESOLUTION - 1) as f64) as usize;
            table[idx]
        })
        .collect()
}

/// Sum of `|CDF_a(bin) - CDF_b(bin)|` over the bins present in `a`'s CDF.
pub fn cdf_distance(a: &Histogram, b: &Histogram) -> f64 {
    let cdf_a = cdf(a);
    let cdf_b = cdf(b);
    cdf_a
        .iter()
        .map(|(bin, &value_a)| {
            let value_b = cdf_b.get(bin).copied().unwrap_or(0.0);
            (value_a - value_b).abs()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hist(pairs: &[(i64, u64)]) -> Histogram {
        pairs.iter().copied().collect()
    }

    #[test]
    fn empty_histogram_has_empty_cdf() {
        assert!(cdf(&Histogram::new()).is_empty());
    }

    #[test]
    fn cdf_is_monotone_and_ends_at_one() {
        let h = hist(&[(10, 1), (20, 1), (30, 2)]);
        let c = cdf(&h);
        let values: Vec<f64> = c.values().copied().collect();
        assert_eq!(values.last().copied(), Some(1.0));
        for w in values.windows(2) {
            assert!(w[0] <= w[1]);
        }
    }

    #[test]
    fn quantile_top_and_median_align_on_two_bin_histogram() {
        let h = hist(&[(10, 1), (20, 1)]);
        let qs = vec![0.1, 0.5, 0.9];
        let quants = quantile(&h, &qs);
        assert_eq!(quants[1], quants[2]);
        assert!(quants[0] <= quants[1]);
    }

    #[test]
    fn quantile_clamps_out_of_range_inputs() {
        let h = hist(&[(10, 1)]);
        assert_eq!(quantile(&h, &[1.5])[0], quantile(&h, &[0.999])[0]);
        assert_eq!(quantile(&h, &[-1.0])[0], quantile(&h, &[0.0])[0]);
    }

    #[test]
    fn cdf_distance_of_identical_histograms_is_zero() {
        let h = hist(&[(10, 1), (20, 3)]);
        assert_eq!(cdf_distance(&h, &h), 0.0);
    }

    #[test]
    fn cdf_distance_detects_shifted_mass() {
        let a = hist(&[(10, 10)]);
        let b = hist(&[(10, 5), (20, 5)]);
        assert!(cdf_distance(&a, &b) > 0.0);
    }
}
