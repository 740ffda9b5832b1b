//! Client-side codec for the `sparsevec` type.
//!
//! A sparse vector keeps its declared dimension plus the non-zero elements as
//! parallel index/value arrays. Indices are zero-based and strictly ascending
//! in memory and on the binary wire; the text form `{1:1,3:2}/6` uses
//! one-based indices.

use serde::{Deserialize, Serialize};

use crate::codec::VectorCodec;
use crate::constants::sparsevec_size;
use crate::error::{FormatError, InvalidVectorError, ParseError, Result};
use crate::types::halfvec::HalfVector;
use crate::types::message::{check_unused, send_f32, send_u32, MessageReader};
use crate::types::numeric::{parse_f32, parse_int, push_f32, push_int, trim};
use crate::types::vector::Vector;

/// Sparse vector of 32-bit floats.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SparseVectorParts")]
pub struct SparseVector {
    dimension: u32,
    indices: Vec<u32>,
    values: Vec<f32>,
}

/// Unchecked field layout, validated on the way in.
#[derive(Deserialize)]
struct SparseVectorParts {
    dimension: u32,
    indices: Vec<u32>,
    values: Vec<f32>,
}

impl TryFrom<SparseVectorParts> for SparseVector {
    type Error = InvalidVectorError;

    fn try_from(parts: SparseVectorParts) -> Result<Self, Self::Error> {
        SparseVector::from_parts(parts.dimension, parts.indices, parts.values)
    }
}

/// Check stored indices: in bounds, ascending, no duplicates.
fn check_indices(indices: &[u32], dimension: u32) -> Result<(), InvalidVectorError> {
    for (i, &index) in indices.iter().enumerate() {
        if index >= dimension {
            return Err(InvalidVectorError::IndexOutOfBounds {
                index: index.into(),
                dimension,
            });
        }
        if i > 0 {
            let prev = indices[i - 1];
            if index < prev {
                return Err(InvalidVectorError::Unordered);
            }
            if index == prev {
                return Err(InvalidVectorError::Duplicate(index));
            }
        }
    }
    Ok(())
}

fn check_values(indices: &[u32], values: &[f32]) -> Result<(), InvalidVectorError> {
    match indices.iter().zip(values).find(|&(_, &v)| v == 0.0) {
        Some((&index, _)) => Err(InvalidVectorError::ZeroValue(index)),
        None => Ok(()),
    }
}

impl SparseVector {
    /// Keep the non-zero elements of a dense sequence.
    ///
    /// Elements past `u32::MAX` cannot be addressed on the wire and are
    /// ignored.
    pub fn from_dense(vec: &[f32]) -> Self {
        let dimension = u32::try_from(vec.len()).unwrap_or(u32::MAX);
        let (indices, values) = (0..dimension)
            .zip(vec.iter().copied())
            .filter(|&(_, v)| v != 0.0)
            .unzip();
        Self {
            dimension,
            indices,
            values,
        }
    }

    /// Build from `(index, value)` pairs in any order.
    ///
    /// Zero values are dropped and the rest sorted by index. Repeated or
    /// out-of-range indices are rejected.
    pub fn from_map<I>(elements: I, dimension: u32) -> Result<Self>
    where
        I: IntoIterator<Item = (u32, f32)>,
    {
        let mut elements: Vec<(u32, f32)> = elements.into_iter().collect();
        elements.sort_by_key(|&(index, _)| index);
        // Duplicates are checked before zeros are dropped so `{1:0,1:2}` is caught.
        check_indices(
            &elements.iter().map(|&(index, _)| index).collect::<Vec<_>>(),
            dimension,
        )?;
        let (indices, values) = elements.into_iter().filter(|&(_, v)| v != 0.0).unzip();
        Ok(Self {
            dimension,
            indices,
            values,
        })
    }

    /// Build from already sorted parallel arrays, validating every invariant.
    pub fn from_parts(
        dimension: u32,
        indices: Vec<u32>,
        values: Vec<f32>,
    ) -> Result<Self, InvalidVectorError> {
        if indices.len() != values.len() {
            return Err(InvalidVectorError::LengthMismatch {
                indices: indices.len(),
                values: values.len(),
            });
        }
        check_indices(&indices, dimension)?;
        check_values(&indices, &values)?;
        Ok(Self {
            dimension,
            indices,
            values,
        })
    }

    /// Declared number of dimensions.
    pub fn dimensions(&self) -> u32 {
        self.dimension
    }

    /// Zero-based indices of the stored elements, ascending.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Stored values, parallel to [`indices`](Self::indices).
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Number of stored (non-zero) elements.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Expand into a dense sequence of length `dimension`.
    pub fn to_dense(&self) -> Vec<f32> {
        let mut vec = vec![0.0; self.dimension as usize];
        for (&index, &value) in self.indices.iter().zip(&self.values) {
            vec[index as usize] = value;
        }
        vec
    }
}

impl VectorCodec for SparseVector {
    const TYPE_NAME: &'static str = "sparsevec";

    fn encode_text(&self, buf: &mut String) {
        buf.reserve(13 + self.nnz() * 27);
        buf.push('{');
        for (i, (&index, &value)) in self.indices.iter().zip(&self.values).enumerate() {
            if i > 0 {
                buf.push(',');
            }
            push_int(buf, i64::from(index) + 1);
            buf.push(':');
            push_f32(buf, value);
        }
        buf.push_str("}/");
        push_int(buf, self.dimension.into());
    }

    fn decode_text(s: &str) -> Result<Self> {
        let syntax = || ParseError::InvalidSyntax {
            type_name: Self::TYPE_NAME,
            input: s.to_string(),
        };

        let (body, dim) = trim(s).rsplit_once('/').ok_or_else(syntax)?;
        let dim = parse_int(dim, Self::TYPE_NAME)?;
        let dimension = u32::try_from(dim).map_err(|_| ParseError::InvalidInteger {
            type_name: Self::TYPE_NAME,
            token: dim.to_string(),
        })?;

        let body = trim(body)
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
            .ok_or_else(syntax)?;

        let mut elements = Vec::new();
        if !trim(body).is_empty() {
            for element in body.split(',') {
                let (index, value) = element.split_once(':').ok_or_else(syntax)?;
                // One-based in text
                let index = parse_int(index, Self::TYPE_NAME)?.saturating_sub(1);
                let value = parse_f32(value, Self::TYPE_NAME)?;
                let index = u32::try_from(index)
                    .ok()
                    .filter(|&i| i < dimension)
                    .ok_or(InvalidVectorError::IndexOutOfBounds { index, dimension })?;
                elements.push((index, value));
            }
        }

        Self::from_map(elements, dimension)
    }

    fn encode_binary(&self, buf: &mut Vec<u8>) -> Result<()> {
        buf.reserve(sparsevec_size(self.nnz()));
        send_u32(buf, self.dimension);
        // nnz never exceeds the u32 dimension
        send_u32(buf, self.nnz() as u32);
        send_u32(buf, 0);
        for &index in &self.indices {
            send_u32(buf, index);
        }
        for &value in &self.values {
            send_f32(buf, value);
        }
        Ok(())
    }

    fn decode_binary(buf: &[u8]) -> Result<Self> {
        let mut msg = MessageReader::new(buf, Self::TYPE_NAME);
        let dimension = msg.get_u32()?;
        let nnz = msg.get_u32()?;
        check_unused(Self::TYPE_NAME, msg.get_u32()?)?;

        if nnz > dimension {
            return Err(InvalidVectorError::TooManyElements { nnz, dimension }.into());
        }
        let nnz = nnz as usize;
        let body = nnz
            .checked_mul(std::mem::size_of::<u32>() + std::mem::size_of::<f32>())
            .ok_or(FormatError::Truncated {
                type_name: Self::TYPE_NAME,
                expected: usize::MAX,
                actual: buf.len(),
            })?;
        msg.require(body)?;

        let mut indices = Vec::with_capacity(nnz);
        for _ in 0..nnz {
            indices.push(msg.get_u32()?);
        }
        let mut values = Vec::with_capacity(nnz);
        for _ in 0..nnz {
            values.push(msg.get_f32()?);
        }
        msg.finish()?;

        tracing::trace!(dimension, nnz, "decoded binary sparsevec");
        Ok(Self::from_parts(dimension, indices, values)?)
    }
}

impl From<&Vector> for SparseVector {
    fn from(vec: &Vector) -> Self {
        Self::from_dense(vec.as_slice())
    }
}

impl From<&HalfVector> for SparseVector {
    fn from(vec: &HalfVector) -> Self {
        Self::from_dense(vec.as_slice())
    }
}

impl From<&SparseVector> for Vector {
    fn from(vec: &SparseVector) -> Self {
        Vector::new(vec.to_dense())
    }
}

impl std::fmt::Display for SparseVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl std::str::FromStr for SparseVector {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode_text(s)
    }
}
