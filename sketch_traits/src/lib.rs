use std::error;

pub trait New {
    type Config;

    fn new(config: &Self::Config) -> Self;
}

/// Pointwise algebra over a sketch type: compatibility, sum, and right-cancellation.
pub trait Algebra: Sized {
    type CombineError: error::Error;
    type DiffError: error::Error;

    /// Whether `self` and `other` can be combined or diffed without surprising results.
    fn compatible(&self, other: &Self) -> bool;

    /// Pointwise sum of two compatible sketches.
    fn combine(&self, other: &Self) -> Result<Self, Self::CombineError>;

    /// Pointwise right-cancellation: `self - other`.
    fn diff(&self, other: &Self) -> Result<Self, Self::DiffError>;
}

pub trait Codec: Sized {
    type EncodeError: error::Error;
    type DecodeError: error::Error;

    fn encode(&self) -> Result<Vec<u8>, Self::EncodeError>;

    fn decode(bytes: &[u8]) -> Result<Self, Self::DecodeError>;
}
