use std::collections::BTreeMap;
use std::sync::{Mutex, RwLock};

use timesketch::{Config, New, Sketch};
use ulid::Ulid;

/// A process-wide map of opaque ULID identifiers to sketches.
///
/// Lookups take a read lock on the outer map (read-mostly: most traffic is `/add` and
/// `/quantiles` against existing sketches); each sketch is independently mutex-guarded so
/// concurrent requests against different sketches don't contend with each other.
pub struct Registry {
    sketches: RwLock<BTreeMap<String, Mutex<Sketch>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            sketches: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn create(&self, config: &Config) -> String {
        let id = Ulid::new().to_string();
        let sketch = Sketch::new(config);
        self.sketches
            .write()
            .expect("registry lock poisoned")
            .insert(id.clone(), Mutex::new(sketch));
        id
    }

    pub fn add(
        &self,
        id: &str,
        labels: &BTreeMap<String, String>,
        time: i64,
        value: f64,
        count: u64,
    ) -> bool {
        let sketches = self.sketches.read().expect("registry lock poisoned");
        match sketches.get(id) {
            Some(lock) => {
                lock.lock().expect("sketch lock poisoned").add(labels, time, value, count);
                true
            }
            None => false,
        }
    }

    pub fn quantiles(
        &self,
        id: &str,
        labels: &BTreeMap<String, String>,
        time: i64,
        quants: &[f64],
    ) -> Option<Vec<i64>> {
        let sketches = self.sketches.read().expect("registry lock poisoned");
        sketches.get(id).map(|lock| {
            let sketch = lock.lock().expect("sketch lock poisoned");
            let hist = sketch.point_sketch(labels, time);
            timesketch::quantile(&hist, quants)
        })
    }

    pub fn delete(&self, id: &str) -> bool {
        self.sketches
            .write()
            .expect("registry lock poisoned")
            .remove(id)
            .is_some()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
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

    #[test]
    fn create_add_quantiles_delete_round_trip() {
        let registry = Registry::new();
        let config = Config::new(10.0, 1000, vec!["group".to_string()]).unwrap();
        let id = registry.create(&config);

        assert!(registry.add(&id, &labels(&[("group", "a")]), 1, 10.4, 1));
        assert!(!registry.add("missing", &labels(&[]), 1, 1.0, 1));

        let quants = registry
            .quantiles(&id, &labels(&[("group", "a")]), 1, &[0.5])
            .unwrap();
        assert_eq!(quants, vec![10]);
        assert!(registry.quantiles("missing", &labels(&[]), 1, &[0.5]).is_none());

        assert!(registry.delete(&id));
        assert!(!registry.delete(&id));
    }
}
