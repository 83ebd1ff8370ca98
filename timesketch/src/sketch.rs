use std::collections::BTreeMap;

use sketch_traits::New;

use crate::config::Config;
use crate::interner::Interner;

/// A sparse histogram over integer bins.
pub type Histogram = BTreeMap<i64, u64>;

#[derive(Clone, Debug, Default)]
pub(crate) struct LabelRegister {
    pub(crate) interner: Interner,
    pub(crate) by_time: BTreeMap<i64, BTreeMap<u32, Histogram>>,
}

/// A multi-dimensional time-indexed count sketch.
///
/// Tracks, for each time bucket, an unconditional histogram of observed values (`global`)
/// and, for each mandated or since-encountered label, a conditional histogram keyed by that
/// label's own (shorter) time modulus and interned value. See [`Sketch::point_sketch`] for
/// how the two are combined to answer a query.
#[derive(Clone, Debug)]
pub struct Sketch {
    pub(crate) resolution: f64,
    pub(crate) max_time: i64,
    pub(crate) time_moduli: BTreeMap<String, u64>,
    pub(crate) global: BTreeMap<i64, Histogram>,
    pub(crate) registers: BTreeMap<String, LabelRegister>,
}

/// Projects a real value onto the bin grid of width `resolution`: `floor(v / r) * r`.
///
/// Idempotent on values already on the grid, and floors toward negative infinity for
/// negative inputs.
pub fn project(value: f64, resolution: f64) -> i64 {
    ((value / resolution).floor() * resolution) as i64
}

impl New for Sketch {
    type Config = Config;

    fn new(config: &Self::Config) -> Self {
        let mut sketch = Self {
            resolution: config.resolution,
            max_time: config.max_time,
            time_moduli: BTreeMap::new(),
            global: BTreeMap::new(),
            registers: BTreeMap::new(),
        };
        for label in &config.mandated_labels {
            sketch.ensure_label(label);
        }
        sketch
    }
}

impl Sketch {
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    pub fn max_time(&self) -> i64 {
        self.max_time
    }

    /// Assigns this label a time modulus if it doesn't already have one: a prime strictly
    /// greater than both `floor(sqrt(max_time))` and every modulus already assigned in this
    /// sketch. Returns the (possibly freshly assigned) modulus.
    fn ensure_label(&mut self, label: &str) -> u64 {
        if let Some(&modulus) = self.time_moduli.get(label) {
            return modulus;
        }
        let floor_sqrt_max_time = (self.max_time as f64).sqrt().floor() as u64;
        let lower_bound = self
            .time_moduli
            .values()
            .copied()
            .chain(std::iter::once(floor_sqrt_max_time))
            .max()
            .unwrap_or(floor_sqrt_max_time);
        let modulus = primes::next_prime(lower_bound);
        self.time_moduli.insert(label.to_string(), modulus);
        self.registers
            .entry(label.to_string())
            .or_insert_with(LabelRegister::default);
        modulus
    }

    /// Records `count` observations of `value` at `time`, under every label equality in
    /// `labels`, plus the unconditional global histogram.
    pub fn add(&mut self, labels: &BTreeMap<String, String>, time: i64, value: f64, count: u64) {
        let bin = project(value, self.resolution);
        let t_g = time.rem_euclid(self.max_time);
        *self.global.entry(t_g).or_default().entry(bin).or_insert(0) += count;

        for (label, label_value) in labels {
            let modulus = self.ensure_label(label);
            let t_l = time.rem_euclid(modulus as i64);
            let register = self
                .registers
                .get_mut(label)
                .expect("ensure_label just inserted this label's register");
            let id = register.interner.intern(label_value);
            *register
                .by_time
                .entry(t_l)
                .or_default()
                .entry(id)
                .or_default()
                .entry(bin)
                .or_insert(0) += count;
        }
    }

    /// Approximates the histogram of values seen at `time` conditioned on every label
    /// equality in `labels`, via count-min intersection against the global histogram. Any
    /// label or label value never seen yields an empty histogram.
    pub fn point_sketch(&self, labels: &BTreeMap<String, String>, time: i64) -> Histogram {
        let t_g = time.rem_euclid(self.max_time);
        let mut out = self.global.get(&t_g).cloned().unwrap_or_default();

        for (label, label_value) in labels {
            let modulus = match self.time_moduli.get(label) {
                Some(&m) => m,
                None => return Histogram::new(),
            };
            let register = match self.registers.get(label) {
                Some(r) => r,
                None => return Histogram::new(),
            };
            let id = match register.interner.id(label_value) {
                Some(id) => id,
                None => return Histogram::new(),
            };
            let t_l = time.rem_euclid(modulus as i64);
            let observed = match register.by_time.get(&t_l).and_then(|by_id| by_id.get(&id)) {
                Some(h) => h,
                None => return Histogram::new(),
            };
            for (bin, count) in out.iter_mut() {
                let observed_count = observed.get(bin).copied().unwrap_or(0);
                *count = (*count).min(observed_count);
            }
        }
        out
    }

    /// Sum of [`Sketch::point_sketch`] for the same arguments.
    pub fn count(&self, labels: &BTreeMap<String, String>, time: i64) -> u64 {
        self.point_sketch(labels, time).values().sum()
    }

    /// Sum of every count ever added, read off the unconditional global histogram.
    pub fn total_count(&self) -> u64 {
        self.global.values().flat_map(|h| h.values()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn config() -> Config {
        Config::new(
            10.0,
            1000,
            vec![
                "group".to_string(),
                "instance".to_string(),
                "job".to_string(),
                "service".to_string(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn project_matches_worked_examples() {
        assert_eq!(project(10.4, 10.0), 10);
        assert_eq!(project(45.4, 10.0), 40);
        assert_eq!(project(12.4, 10.0), 10);
    }

    #[test]
    fn project_is_idempotent_on_grid_values() {
        let p = project(45.4, 10.0);
        assert_eq!(project(p as f64, 10.0), p);
    }

    #[test]
    fn scenario_total_count_accumulates() {
        let mut s = Sketch::new(&config());
        s.add(
            &labels(&[("group", "a"), ("instance", "a"), ("job", "c"), ("service", "d")]),
            1,
            10.4,
            1,
        );
        s.add(
            &labels(&[("group", "a"), ("instance", "a"), ("job", "c"), ("service", "d")]),
            1,
            45.4,
            1,
        );
        s.add(
            &labels(&[("group", "a"), ("instance", "a"), ("job", "c"), ("service", "d")]),
            2,
            12.4,
            2,
        );
        s.add(
            &labels(&[("group", "a"), ("instance", "b"), ("job", "d"), ("service", "q")]),
            1,
            10.4,
            1,
        );
        assert_eq!(s.total_count(), 5);

        s.add(&labels(&[("group", "a")]), 1, 1.0, 1);
        assert_eq!(s.total_count(), 6);
    }

    #[test]
    fn scenario_point_sketch_and_count() {
        let mut s = Sketch::new(&config());
        s.add(
            &labels(&[("group", "a"), ("instance", "a"), ("job", "c"), ("service", "d")]),
            1,
            10.4,
            1,
        );
        s.add(
            &labels(&[("group", "a"), ("instance", "a"), ("job", "c"), ("service", "d")]),
            2,
            12.4,
            2,
        );

        let hist = s.point_sketch(
            &labels(&[("group", "a"), ("instance", "a"), ("job", "c"), ("service", "d")]),
            1,
        );
        assert_eq!(hist.get(&10), Some(&1));

        let empty = s.point_sketch(
            &labels(&[("group", "a"), ("instance", "a"), ("job", "c"), ("service", "e")]),
            1,
        );
        assert_eq!(empty.values().sum::<u64>(), 0);

        assert_eq!(
            s.count(
                &labels(&[("group", "a"), ("instance", "a"), ("job", "c"), ("service", "d")]),
                2
            ),
            2
        );
    }

    #[test]
    fn unseen_label_value_yields_empty_histogram() {
        let mut s = Sketch::new(&config());
        s.add(&labels(&[("group", "a")]), 1, 10.0, 1);
        let hist = s.point_sketch(&labels(&[("group", "never-seen")]), 1);
        assert!(hist.values().all(|&c| c == 0));
    }

    #[test]
    fn time_wraps_by_modulo() {
        let mut s = Sketch::new(&config());
        s.add(&labels(&[]), 1, 10.0, 1);
        assert_eq!(s.count(&labels(&[]), 1 + 1000), 1);
    }

    #[test]
    fn labels_in_different_order_get_different_moduli() {
        let a = Config::new(10.0, 1000, vec!["group".to_string(), "job".to_string()]).unwrap();
        let b = Config::new(10.0, 1000, vec!["job".to_string(), "group".to_string()]).unwrap();
        let sa = Sketch::new(&a);
        let sb = Sketch::new(&b);
        assert_ne!(sa.time_moduli["group"], sb.time_moduli["group"]);
    }
}
