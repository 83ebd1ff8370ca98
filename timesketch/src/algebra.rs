use std::{error, fmt};

use sketch_traits::Algebra;

use crate::sketch::{LabelRegister, Sketch};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AlgebraError {
    IncompatibleSketches,
    NegativeCount,
}

impl fmt::Display for AlgebraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlgebraError::IncompatibleSketches => write!(f, "sketches are not compatible"),
            AlgebraError::NegativeCount => write!(f, "operation would produce a negative count"),
        }
    }
}

impl error::Error for AlgebraError {}

impl Algebra for Sketch {
    type CombineError = AlgebraError;
    type DiffError = AlgebraError;

    /// `self` and `other` are compatible iff they share a resolution, a `max_time`, and
    /// agree on the modulus of every label present in both. Labels present in only one side
    /// are tolerated.
    fn compatible(&self, other: &Self) -> bool {
        if self.resolution != other.resolution {
            return false;
        }
        if self.max_time != other.max_time {
            return false;
        }
        self.time_moduli.iter().all(|(label, modulus)| {
            other
                .time_moduli
                .get(label)
                .map_or(true, |other_modulus| modulus == other_modulus)
        })
    }

    /// Pointwise sum. Label values are reconciled by their interned *string*, not their id,
    /// since each sketch owns an independent interner.
    fn combine(&self, other: &Self) -> Result<Self, Self::CombineError> {
        if !self.compatible(other) {
            return Err(AlgebraError::IncompatibleSketches);
        }

        let mut out = self.clone();

        for (&time, hist) in &other.global {
            let out_hist = out.global.entry(time).or_default();
            for (&bin, &count) in hist {
                *out_hist.entry(bin).or_insert(0) += count;
            }
        }

        for (label, other_register) in &other.registers {
            if !out.time_moduli.contains_key(label) {
                out.time_moduli
                    .insert(label.clone(), other.time_moduli[label]);
                out.registers.insert(label.clone(), LabelRegister::default());
            }
            let out_register = out.registers.get_mut(label).expect("just ensured");
            for (&time, by_id) in &other_register.by_time {
                for (&id, hist) in by_id {
                    let value = other_register.interner.value(id);
                    let out_id = out_register.interner.intern(value);
                    let out_hist = out_register
                        .by_time
                        .entry(time)
                        .or_default()
                        .entry(out_id)
                        .or_default();
                    for (&bin, &count) in hist {
                        *out_hist.entry(bin).or_insert(0) += count;
                    }
                }
            }
        }

        Ok(out)
    }

    /// Right-cancellation: `self - other`, pointwise over `global` and `registers`. Fails if
    /// any resulting count would be negative, including when `other` has an entry `self`
    /// lacks entirely (treated as subtracting from zero).
    fn diff(&self, other: &Self) -> Result<Self, Self::DiffError> {
        let mut out = self.clone();

        for (&time, hist) in &other.global {
            let out_hist = out.global.entry(time).or_default();
            for (&bin, &count) in hist {
                let entry = out_hist.entry(bin).or_insert(0);
                if *entry < count {
                    return Err(AlgebraError::NegativeCount);
                }
                *entry -= count;
            }
        }

        for (label, other_register) in &other.registers {
            let out_register = out
                .registers
                .get_mut(label)
                .ok_or(AlgebraError::NegativeCount)?;
            for (&time, by_id) in &other_register.by_time {
                for (&id, hist) in by_id {
                    let value = other_register.interner.value(id);
                    let out_id = out_register
                        .interner
                        .id(value)
                        .ok_or(AlgebraError::NegativeCount)?;
                    let out_hist = out_register
                        .by_time
                        .entry(time)
                        .or_default()
                        .entry(out_id)
                        .or_default();
                    for (&bin, &count) in hist {
                        let entry = out_hist.entry(bin).or_insert(0);
                        if *entry < count {
                            return Err(AlgebraError::NegativeCount);
                        }
                        *entry -= count;
                    }
                }
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::config::Config;
    use sketch_traits::New;

    fn labels(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn sample_sketch() -> Sketch {
        let config = Config::new(10.0, 1000, vec!["group".to_string()]).unwrap();
        let mut s = Sketch::new(&config);
        s.add(&labels(&[("group", "a")]), 1, 10.4, 1);
        s.add(&labels(&[("group", "a")]), 1, 45.4, 1);
        s.add(&labels(&[("group", "b")]), 2, 12.4, 2);
        s
    }

    #[test]
    fn compatible_with_self() {
        let s = sample_sketch();
        assert!(s.compatible(&s));
    }

    #[test]
    fn compatible_checks_max_time() {
        let a = Sketch::new(&Config::new(10.0, 1000, vec![]).unwrap());
        let b = Sketch::new(&Config::new(10.0, 2000, vec![]).unwrap());
        assert!(!a.compatible(&b));
    }

    #[test]
    fn combine_with_self_doubles_total_count() {
        let s = sample_sketch();
        let combined = s.combine(&s).unwrap();
        assert_eq!(combined.total_count(), 2 * s.total_count());
    }

    #[test]
    fn diff_with_self_zeroes_total_count() {
        let s = sample_sketch();
        let diffed = s.diff(&s).unwrap();
        assert_eq!(diffed.total_count(), 0);
    }

    #[test]
    fn combine_then_diff_round_trips() {
        let s = sample_sketch();
        let roundtrip = s.combine(&s).unwrap().diff(&s).unwrap();
        assert_eq!(roundtrip.total_count(), s.total_count());
        assert_eq!(
            roundtrip.count(&labels(&[("group", "a")]), 1),
            s.count(&labels(&[("group", "a")]), 1)
        );
    }

    #[test]
    fn diff_rejects_negative_result() {
        let a = sample_sketch();
        let mut b = sample_sketch();
        b.add(&labels(&[("group", "a")]), 1, 10.4, 10);
        assert_eq!(a.diff(&b).unwrap_err(), AlgebraError::NegativeCount);
    }

    #[test]
    fn combine_rejects_incompatible_sketches() {
        let a = Sketch::new(&Config::new(10.0, 1000, vec![]).unwrap());
        let b = Sketch::new(&Config::new(5.0, 1000, vec![]).unwrap());
        assert_eq!(
            a.combine(&b).unwrap_err(),
            AlgebraError::IncompatibleSketches
        );
    }
}
