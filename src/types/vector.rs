//! Client-side codec for the `vector` type.
//!
//! A `vector` is a fixed-dimension sequence of `f32`. Text form is
//! `[1,2,3]`; binary form is a big-endian `u16` dimension, a reserved `u16`
//! that must be zero, then one IEEE 754 bit pattern per element.

use serde::{Deserialize, Serialize};

use crate::codec::VectorCodec;
use crate::constants::{vector_size, VECTOR_MAX_DIM};
use crate::error::{FormatError, Result};
use crate::types::message::{check_unused, send_f32, send_u16, MessageReader};
use crate::types::numeric::{parse_dense_text, write_dense_text};

/// Dense vector of 32-bit floats.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector {
    vec: Vec<f32>,
}

impl Vector {
    pub fn new(vec: Vec<f32>) -> Self {
        Self { vec }
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.vec
    }

    pub fn to_vec(&self) -> Vec<f32> {
        self.vec.clone()
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.vec
    }

    /// Number of dimensions.
    pub fn dimensions(&self) -> usize {
        self.vec.len()
    }
}

/// Dimension as stored in the `u16` header field of `vector` and `halfvec`.
pub(crate) fn header_dim(type_name: &'static str, len: usize) -> Result<u16, FormatError> {
    u16::try_from(len).map_err(|_| FormatError::TooManyDimensions {
        type_name,
        max: VECTOR_MAX_DIM,
        actual: len,
    })
}

impl VectorCodec for Vector {
    const TYPE_NAME: &'static str = "vector";

    fn encode_text(&self, buf: &mut String) {
        write_dense_text(buf, &self.vec);
    }

    fn decode_text(s: &str) -> Result<Self> {
        Ok(Self::new(parse_dense_text(s, Self::TYPE_NAME)?))
    }

    fn encode_binary(&self, buf: &mut Vec<u8>) -> Result<()> {
        let dim = header_dim(Self::TYPE_NAME, self.vec.len())?;
        buf.reserve(vector_size(self.vec.len()));
        send_u16(buf, dim);
        send_u16(buf, 0);
        for &v in &self.vec {
            send_f32(buf, v);
        }
        Ok(())
    }

    fn decode_binary(buf: &[u8]) -> Result<Self> {
        let mut msg = MessageReader::new(buf, Self::TYPE_NAME);
        let dim = msg.get_u16()? as usize;
        check_unused(Self::TYPE_NAME, msg.get_u16()?.into())?;

        msg.require(dim * std::mem::size_of::<f32>())?;
        let mut vec = Vec::with_capacity(dim);
        for _ in 0..dim {
            vec.push(msg.get_f32()?);
        }
        msg.finish()?;

        tracing::trace!(dim, "decoded binary vector");
        Ok(Self::new(vec))
    }
}

impl From<Vec<f32>> for Vector {
    fn from(vec: Vec<f32>) -> Self {
        Self::new(vec)
    }
}

impl From<&[f32]> for Vector {
    fn from(vec: &[f32]) -> Self {
        Self::new(vec.to_vec())
    }
}

impl From<Vector> for Vec<f32> {
    fn from(vec: Vector) -> Self {
        vec.vec
    }
}

impl std::fmt::Display for Vector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl std::str::FromStr for Vector {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode_text(s)
    }
}
