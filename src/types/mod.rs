//! Vector value types and their shared encoding helpers.

pub mod halfvec;
pub(crate) mod message;
pub(crate) mod numeric;
pub mod sparsevec;
pub mod vector;
