//! Immutable lookup from database type oids to vector codecs.
//!
//! The extension's types get their oids at `CREATE EXTENSION` time, so a
//! connection resolves them once with [`CATALOG_QUERY`](crate::constants::CATALOG_QUERY),
//! builds a [`TypeRegistry`] from the row and hands it to whatever decodes
//! column values. The registry is never mutated afterwards.

use std::collections::HashMap;

use crate::codec::{Format, VectorCodec};
use crate::error::{Error, Result, UnsupportedTypeError};
use crate::types::halfvec::HalfVector;
use crate::types::sparsevec::SparseVector;
use crate::types::vector::Vector;

/// The vector types the extension provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VectorKind {
    Vector,
    HalfVector,
    SparseVector,
}

impl VectorKind {
    pub const fn type_name(self) -> &'static str {
        match self {
            VectorKind::Vector => Vector::TYPE_NAME,
            VectorKind::HalfVector => HalfVector::TYPE_NAME,
            VectorKind::SparseVector => SparseVector::TYPE_NAME,
        }
    }
}

/// What a registered oid refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeEntry {
    pub kind: VectorKind,
    /// The oid is the array type (`_vector`, ...) of `kind`.
    pub array: bool,
}

/// One row of the catalog query. `None` means the type is not installed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogOids {
    pub vector: Option<u32>,
    pub vector_array: Option<u32>,
    pub halfvec: Option<u32>,
    pub halfvec_array: Option<u32>,
    pub sparsevec: Option<u32>,
    pub sparsevec_array: Option<u32>,
}

/// Oid to codec table for one connection.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    entries: HashMap<u32, TypeEntry>,
}

impl TypeRegistry {
    /// Build the table from the catalog row.
    ///
    /// `vector` must exist; `halfvec` and `sparsevec` are only present on
    /// newer extension versions and are skipped when missing.
    pub fn from_catalog(oids: CatalogOids) -> Result<Self> {
        if oids.vector.is_none() {
            return Err(Error::MissingType(Vector::TYPE_NAME));
        }

        let candidates = [
            (oids.vector, VectorKind::Vector, false),
            (oids.vector_array, VectorKind::Vector, true),
            (oids.halfvec, VectorKind::HalfVector, false),
            (oids.halfvec_array, VectorKind::HalfVector, true),
            (oids.sparsevec, VectorKind::SparseVector, false),
            (oids.sparsevec_array, VectorKind::SparseVector, true),
        ];

        let mut entries = HashMap::with_capacity(candidates.len());
        for (oid, kind, array) in candidates {
            let Some(oid) = oid else {
                tracing::debug!(type_name = kind.type_name(), array, "type not installed");
                continue;
            };
            tracing::debug!(oid, type_name = kind.type_name(), array, "registered vector type");
            entries.insert(oid, TypeEntry { kind, array });
        }

        Ok(Self { entries })
    }

    pub fn lookup(&self, oid: u32) -> Option<TypeEntry> {
        self.entries.get(&oid).copied()
    }

    /// Oid bound to `kind`, or to its array type when `array` is set.
    pub fn oid_of(&self, kind: VectorKind, array: bool) -> Option<u32> {
        self.entries
            .iter()
            .find(|(_, entry)| entry.kind == kind && entry.array == array)
            .map(|(&oid, _)| oid)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Decode a column value of type `oid` received in `format`.
    ///
    /// Array oids are recognized but not decoded here.
    pub fn decode(&self, oid: u32, format: Format, src: &[u8]) -> Result<AnyVector> {
        let entry = self.lookup(oid).ok_or(Error::UnknownOid(oid))?;
        if entry.array {
            return Err(UnsupportedTypeError { kind: "array" }.into());
        }
        Ok(match entry.kind {
            VectorKind::Vector => AnyVector::Vector(Vector::decode(format, src)?),
            VectorKind::HalfVector => AnyVector::HalfVector(HalfVector::decode(format, src)?),
            VectorKind::SparseVector => AnyVector::SparseVector(SparseVector::decode(format, src)?),
        })
    }
}

/// A decoded value of any of the vector types.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyVector {
    Vector(Vector),
    HalfVector(HalfVector),
    SparseVector(SparseVector),
}

impl AnyVector {
    pub fn kind(&self) -> VectorKind {
        match self {
            AnyVector::Vector(_) => VectorKind::Vector,
            AnyVector::HalfVector(_) => VectorKind::HalfVector,
            AnyVector::SparseVector(_) => VectorKind::SparseVector,
        }
    }

    pub fn encode(&self, format: Format, buf: &mut Vec<u8>) -> Result<()> {
        match self {
            AnyVector::Vector(v) => v.encode(format, buf),
            AnyVector::HalfVector(v) => v.encode(format, buf),
            AnyVector::SparseVector(v) => v.encode(format, buf),
        }
    }
}

impl std::fmt::Display for AnyVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnyVector::Vector(v) => std::fmt::Display::fmt(v, f),
            AnyVector::HalfVector(v) => std::fmt::Display::fmt(v, f),
            AnyVector::SparseVector(v) => std::fmt::Display::fmt(v, f),
        }
    }
}

impl From<Vector> for AnyVector {
    fn from(v: Vector) -> Self {
        AnyVector::Vector(v)
    }
}

impl From<HalfVector> for AnyVector {
    fn from(v: HalfVector) -> Self {
        AnyVector::HalfVector(v)
    }
}

impl From<SparseVector> for AnyVector {
    fn from(v: SparseVector) -> Self {
        AnyVector::SparseVector(v)
    }
}
