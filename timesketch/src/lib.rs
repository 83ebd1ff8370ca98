//! A multi-dimensional time-indexed count sketch: approximate per-label-conjunction value
//! histograms over a wrapping time axis, with pointwise combine/diff and a binary codec.

mod algebra;
mod codec;
mod config;
mod dist;
mod interner;
mod sketch;

pub use algebra::AlgebraError;
pub use codec::{DecodeError, EncodeError};
pub use config::{Config, InvalidParameters};
pub use dist::{cdf, cdf_distance, icdf, quantile};
pub use sketch::{project, Histogram, Sketch};

pub use sketch_traits::{Algebra, Codec, New};
