use std::{error, fmt};

/// The recipe a [`crate::Sketch`] is built from.
///
/// `mandated_labels` are assigned time moduli in list order at construction time, so two
/// peer sketches must be built from `Config`s with the same labels in the same order to stay
/// [compatible](sketch_traits::Algebra::compatible) with one another.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub(crate) resolution: f64,
    pub(crate) max_time: i64,
    pub(crate) mandated_labels: Vec<String>,
}

impl Config {
    pub fn new(
        resolution: f64,
        max_time: i64,
        mandated_labels: Vec<String>,
    ) -> Result<Self, InvalidParameters> {
        if !(resolution > 0.0) {
            return Err(InvalidParameters::NonPositiveResolution);
        }
        if max_time < 1 {
            return Err(InvalidParameters::NonPositiveMaxTime);
        }
        Ok(Self {
            resolution,
            max_time,
            mandated_labels,
        })
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    pub fn max_time(&self) -> i64 {
        self.max_time
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvalidParameters {
    NonPositiveResolution,
    NonPositiveMaxTime,
}

impl fmt::Display for InvalidParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidParameters::NonPositiveResolution => write!(f, "resolution must be positive"),
            InvalidParameters::NonPositiveMaxTime => write!(f, "max_time must be at least 1"),
        }
    }
}

impl error::Error for InvalidParameters {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_resolution() {
        assert_eq!(
            Config::new(0.0, 1000, vec![]).unwrap_err(),
            InvalidParameters::NonPositiveResolution
        );
        assert_eq!(
            Config::new(-1.0, 1000, vec![]).unwrap_err(),
            InvalidParameters::NonPositiveResolution
        );
    }

    #[test]
    fn rejects_non_positive_max_time() {
        assert_eq!(
            Config::new(10.0, 0, vec![]).unwrap_err(),
            InvalidParameters::NonPositiveMaxTime
        );
    }

    #[test]
    fn accepts_valid_parameters() {
        assert!(Config::new(10.0, 1000, vec!["group".to_string()]).is_ok());
    }
}
