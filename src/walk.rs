//! Randomized orthogonal grid walks and the random-source seam they draw from.

pub mod entropy;
pub mod generator;
