use std::collections::BTreeMap;

/// Maps label values to dense, per-label `u32` ids so the conditional histograms stay
/// compact. Each [`crate::Sketch`] label owns an independent interner.
#[derive(Clone, Debug, Default)]
pub(crate) struct Interner {
    ids: BTreeMap<String, u32>,
    values: Vec<String>,
}

impl Interner {
    pub(crate) fn intern(&mut self, value: &str) -> u32 {
        if let Some(&id) = self.ids.get(value) {
            return id;
        }
        let id = self.values.len() as u32;
        self.values.push(value.to_string());
        self.ids.insert(value.to_string(), id);
        id
    }

    pub(crate) fn id(&self, value: &str) -> Option<u32> {
        self.ids.get(value).copied()
    }

    pub(crate) fn value(&self, id: u32) -> &str {
        &self.values[id as usize]
    }

    pub(crate) fn values(&self) -> &[String] {
        &self.values
    }

    pub(crate) fn from_values(values: Vec<String>) -> Self {
        let ids = values
            .iter()
            .enumerate()
            .map(|(i, v)| (v.clone(), i as u32))
            .collect();
        Self { ids, values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_same_value_twice_returns_same_id() {
        let mut interner = Interner::default();
        let a = interner.intern("foo");
        let b = interner.intern("bar");
        let a2 = interner.intern("foo");
        assert_eq!(a, a2);
        assert_ne!(a, b);
        assert_eq!(interner.value(a), "foo");
        assert_eq!(interner.value(b), "bar");
    }

    #[test]
    fn unknown_value_has_no_id() {
        let interner = Interner::default();
        assert_eq!(interner.id("missing"), None);
    }

    #[test]
    fn from_values_round_trips() {
        let values = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let interner = Interner::from_values(values.clone());
        assert_eq!(interner.values(), values.as_slice());
        assert_eq!(interner.id("b"), Some(1));
    }
}
