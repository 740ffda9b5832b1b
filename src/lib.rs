//! pgvector-codec: wire codecs for the pgvector extension's vector types.
//!
//! Each of [`Vector`], [`HalfVector`] and [`SparseVector`] converts to and
//! from the extension's text form and its compact big-endian binary form
//! through the [`VectorCodec`] trait. Drivers plug in through
//! [`VectorCodec::scan`] / [`VectorCodec::value`], or decode by column oid
//! with a [`TypeRegistry`] built once per connection.
//!
//! ```
//! use pgvector_codec::{SparseVector, Vector, VectorCodec};
//!
//! let vec: Vector = "[1, 2, 3]".parse().unwrap();
//! assert_eq!(vec.to_text(), "[1,2,3]");
//!
//! let sparse = SparseVector::from_map([(2, 2.0), (4, 3.0), (0, 1.0)], 6).unwrap();
//! assert_eq!(sparse.to_string(), "{1:1,3:2,5:3}/6");
//! ```

pub mod codec;
pub mod constants;
pub mod error;
pub mod registry;
pub mod types;

pub use codec::{Format, SqlValue, VectorCodec};
pub use error::{Error, FormatError, InvalidVectorError, ParseError, Result, UnsupportedTypeError};
pub use registry::{AnyVector, CatalogOids, TypeEntry, TypeRegistry, VectorKind};
pub use types::halfvec::HalfVector;
pub use types::sparsevec::SparseVector;
pub use types::vector::Vector;
