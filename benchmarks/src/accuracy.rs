use std::collections::BTreeMap;

use timesketch::{Config, New, Sketch};

use crate::data::Stream;
use crate::exact::{rel_error, GroundTruth};

const GROUP_LABEL: &str = "group";
const TIME: i64 = 0;
const QUANTILES: [f64; 5] = [0.1, 0.25, 0.5, 0.75, 0.9];

fn one_label(group: &str) -> BTreeMap<String, String> {
    let mut labels = BTreeMap::new();
    labels.insert(GROUP_LABEL.to_string(), group.to_string());
    labels
}

/// Feeds `num_entries` samples from `stream` into both a sketch and an exact ground truth,
/// then reports the mean relative error of the sketch's quantile estimates against the
/// exact ones, across every group and every quantile in [`QUANTILES`].
pub fn run_case(
    num_entries: usize,
    resolution: f64,
    max_time: i64,
    stream: &impl Stream,
    verbose: bool,
) -> f64 {
    let config = Config::new(resolution, max_time, vec![GROUP_LABEL.to_string()]).unwrap();
    let mut sketch = Sketch::new(&config);
    let mut ground_truth = GroundTruth::new();

    for (group, value) in stream.iter().take(num_entries) {
        sketch.add(&one_label(&group), TIME, value, 1);
        ground_truth.insert(&group, value);
    }

    let mut total_error = 0.0;
    let mut num_samples = 0;
    let groups: Vec<String> = ground_truth.groups().cloned().collect();
    for group in &groups {
        let hist = sketch.point_sketch(&one_label(group), TIME);
        for &q in &QUANTILES {
            if let Some(exact) = ground_truth.quantile(group, q) {
                let approx = timesketch::quantile(&hist, &[q])[0] as f64;
                total_error += rel_error(approx, exact);
                num_samples += 1;
            }
        }
    }
    let mean_error = if num_samples > 0 {
        total_error / num_samples as f64
    } else {
        0.0
    };

    if verbose {
        println!(
            "{}: {} entries, {} groups, mean relative quantile error {:.2}%",
            stream,
            num_entries,
            groups.len(),
            mean_error * 100.0,
        );
    }
    mean_error
}

#[test]
fn run_generative_cases() {
    use crate::data::{NormalGroups, UniformGroups};

    run_case(10_000, 1.0, 1000, &UniformGroups::new(4, 100.0), true);
    run_case(10_000, 1.0, 1000, &UniformGroups::new(16, 1000.0), true);
    run_case(10_000, 1.0, 1000, &NormalGroups::new(4, 50.0, 10.0), true);
}
