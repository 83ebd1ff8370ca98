/// Synthetic value streams to drive accuracy and performance measurements.
use std::fmt;

use rand::prelude::*;

pub trait Stream: fmt::Display {
    fn iter(&self) -> Box<dyn Iterator<Item = (String, f64)>>;
}

fn make_label(u: u32) -> String {
    char::from_u32(u + 0x41).unwrap().to_string()
}

macro_rules! impl_stream {
    ($stream: ty, $name: expr, $gen: expr) => {
        impl fmt::Display for $stream {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, $name)
            }
        }

        impl Stream for $stream {
            fn iter(&self) -> Box<dyn Iterator<Item = (String, f64)>> {
                Box::new(std::iter::from_fn($gen(&self)))
            }
        }
    };
}

/// `num_groups` distinct label values, values drawn uniformly from `[0, value_range)`.
#[derive(Clone, Debug)]
pub struct UniformGroups {
    num_groups: u32,
    value_range: f64,
}

impl UniformGroups {
    pub fn new(num_groups: u32, value_range: f64) -> Self {
        Self {
            num_groups,
            value_range,
        }
    }
}

impl_stream!(UniformGroups, "UniformGroups", |dataset: &UniformGroups| {
    let group_dist = rand::distributions::Uniform::new(0, dataset.num_groups);
    let value_dist = rand::distributions::Uniform::new(0.0, dataset.value_range);
    let mut rng = thread_rng();
    move || Some((make_label(rng.sample(group_dist)), rng.sample(value_dist)))
});

/// `num_groups` distinct label values, values drawn from a normal distribution and clamped
/// to be non-negative (the sketch's value axis has no inherent sign convention).
#[derive(Clone, Debug)]
pub struct NormalGroups {
    num_groups: u32,
    mean: f64,
    std_dev: f64,
}

impl NormalGroups {
    pub fn new(num_groups: u32, mean: f64, std_dev: f64) -> Self {
        Self {
            num_groups,
            mean,
            std_dev,
        }
    }
}

impl_stream!(NormalGroups, "NormalGroups", |dataset: &NormalGroups| {
    let group_dist = rand::distributions::Uniform::new(0, dataset.num_groups);
    let value_dist = rand_distr::Normal::new(dataset.mean, dataset.std_dev).unwrap();
    let mut rng = thread_rng();
    move || {
        Some((
            make_label(rng.sample(group_dist)),
            rng.sample::<f64, _>(value_dist).max(0.0),
        ))
    }
});
