//! Wire-format constants matching the pgvector extension's send/recv functions.

// --- Dense and half vectors ---

/// Header of a `vector`/`halfvec` payload: dim(2) + unused(2) = 4 bytes.
pub const VECTOR_HEADER_SIZE: usize = 4;

/// Largest dimension a `vector`/`halfvec` payload can carry (u16 field).
pub const VECTOR_MAX_DIM: usize = u16::MAX as usize;

// --- Sparse vectors ---

/// Header of a `sparsevec` payload: dim(4) + nnz(4) + unused(4) = 12 bytes.
pub const SPARSEVEC_HEADER_SIZE: usize = 12;

// --- Format codes ---

/// Postgres format code for text values.
pub const TEXT_FORMAT_CODE: i16 = 0;

/// Postgres format code for binary values.
pub const BINARY_FORMAT_CODE: i16 = 1;

// --- Catalog ---

/// Looks up the oids of the extension's types and their array forms.
///
/// Each column is NULL when the type is not installed.
pub const CATALOG_QUERY: &str = "SELECT to_regtype('vector')::oid, to_regtype('_vector')::oid, \
     to_regtype('halfvec')::oid, to_regtype('_halfvec')::oid, \
     to_regtype('sparsevec')::oid, to_regtype('_sparsevec')::oid";

/// Size in bytes of a binary `vector` with `dim` dimensions.
#[inline]
pub const fn vector_size(dim: usize) -> usize {
    VECTOR_HEADER_SIZE + dim * std::mem::size_of::<f32>()
}

/// Size in bytes of a binary `halfvec` with `dim` dimensions.
#[inline]
pub const fn halfvec_size(dim: usize) -> usize {
    VECTOR_HEADER_SIZE + dim * std::mem::size_of::<u16>()
}

/// Size in bytes of a binary `sparsevec` with `nnz` stored elements.
#[inline]
pub const fn sparsevec_size(nnz: usize) -> usize {
    SPARSEVEC_HEADER_SIZE + nnz * std::mem::size_of::<u32>() + nnz * std::mem::size_of::<f32>()
}
