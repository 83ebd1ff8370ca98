use std::collections::BTreeMap;

/// Exact per-group histories of observed values, kept alongside a sketch under test so its
/// quantile estimates can be checked against ground truth.
#[derive(Clone, Debug, Default)]
pub struct GroundTruth {
    values_by_group: BTreeMap<String, Vec<f64>>,
}

impl GroundTruth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, group: &str, value: f64) {
        self.values_by_group
            .entry(group.to_string())
            .or_default()
            .push(value);
    }

    pub fn groups(&self) -> impl Iterator<Item = &String> {
        self.values_by_group.keys()
    }

    /// The exact `q`-quantile of values observed under `group`, or `None` if the group was
    /// never observed.
    pub fn quantile(&self, group: &str, q: f64) -> Option<f64> {
        let values = self.values_by_group.get(group)?;
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let idx = ((q * sorted.len() as f64).floor() as usize).min(sorted.len() - 1);
        Some(sorted[idx])
    }
}

/// Relative error of an approximate value against its exact counterpart. Zero exact and
/// zero approx count as no error; zero exact and nonzero approx counts as total error.
pub fn rel_error(approx: f64, exact: f64) -> f64 {
    if exact == 0.0 {
        if approx == 0.0 {
            0.0
        } else {
            1.0
        }
    } else {
        (approx - exact).abs() / exact.abs()
    }
}
