//! Client-side codec for the `halfvec` type.
//!
//! Elements are held as `f32` in memory and only narrowed to IEEE 754 half
//! precision on the binary wire, so the text form keeps whatever precision
//! was typed in. Binary encoding rounds to nearest-even; decoding widens
//! exactly.

use serde::{Deserialize, Serialize};

use crate::codec::VectorCodec;
use crate::constants::halfvec_size;
use crate::error::Result;
use crate::types::message::{check_unused, send_u16, MessageReader};
use crate::types::numeric::{parse_dense_text, write_dense_text};
use crate::types::vector::{header_dim, Vector};

// ---------------------------------------------------------------------------
// Half-precision conversion
// ---------------------------------------------------------------------------

/// Convert a half-precision float (stored as u16) to f32.
#[inline]
pub fn half_to_f32(h: u16) -> f32 {
    let sign = ((h >> 15) & 1) as u32;
    let exp = ((h >> 10) & 0x1f) as u32;
    let mant = (h & 0x3ff) as u32;

    match exp {
        0 if mant == 0 => f32::from_bits(sign << 31),
        0 => {
            // Subnormal half: shift the mantissa up until the implicit bit appears
            let mut m = mant;
            let mut e: i32 = -14;
            while m & 0x400 == 0 {
                m <<= 1;
                e -= 1;
            }
            m &= 0x3ff;
            let f32_exp = (e + 127) as u32;
            f32::from_bits((sign << 31) | (f32_exp << 23) | (m << 13))
        }
        // Inf keeps a zero mantissa, NaN keeps its payload
        31 => f32::from_bits((sign << 31) | (0xff << 23) | (mant << 13)),
        _ => {
            let f32_exp = exp + 127 - 15;
            f32::from_bits((sign << 31) | (f32_exp << 23) | (mant << 13))
        }
    }
}

/// Convert an f32 to half-precision float (stored as u16), rounding to
/// nearest-even.
#[inline]
pub fn f32_to_half(f: f32) -> u16 {
    let bits = f.to_bits();
    let sign = ((bits >> 31) & 1) as u16;
    let exp = ((bits >> 23) & 0xff) as i32;
    let mant = bits & 0x7fffff;

    if exp == 0xff {
        if mant == 0 {
            (sign << 15) | (0x1f << 10)
        } else {
            // Keep a non-zero mantissa so NaN stays NaN
            (sign << 15) | (0x1f << 10) | ((mant >> 13) as u16).max(1)
        }
    } else if exp > 142 {
        // exp - 127 + 15 > 30
        (sign << 15) | (0x1f << 10)
    } else if exp < 102 {
        // Below half of the smallest subnormal half
        sign << 15
    } else if exp < 113 {
        let full = mant | 0x800000;
        let shift = (113 - exp) as u32;
        let m = (full >> (shift + 13)) as u16;
        let round_bit = (full >> (shift + 12)) & 1;
        let sticky = full & ((1 << (shift + 12)) - 1);
        round_nearest_even((sign << 15) | m, round_bit, sticky)
    } else {
        let half_exp = ((exp - 127 + 15) as u16) & 0x1f;
        let half_mant = (mant >> 13) as u16;
        let round_bit = (mant >> 12) & 1;
        let sticky = mant & 0xfff;
        round_nearest_even((sign << 15) | (half_exp << 10) | half_mant, round_bit, sticky)
    }
}

/// A carry out of the mantissa bumps the exponent, which is the correctly
/// rounded result (up to infinity).
#[inline]
fn round_nearest_even(truncated: u16, round_bit: u32, sticky: u32) -> u16 {
    if round_bit != 0 && (sticky != 0 || truncated & 1 != 0) {
        truncated + 1
    } else {
        truncated
    }
}

// ---------------------------------------------------------------------------
// HalfVector
// ---------------------------------------------------------------------------

/// Vector stored by the database in half precision.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HalfVector {
    vec: Vec<f32>,
}

impl HalfVector {
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

    /// Replace the whole sequence.
    pub fn set_slice(&mut self, vec: Vec<f32>) {
        self.vec = vec;
    }

    pub fn dimensions(&self) -> usize {
        self.vec.len()
    }
}

impl VectorCodec for HalfVector {
    const TYPE_NAME: &'static str = "halfvec";

    fn encode_text(&self, buf: &mut String) {
        write_dense_text(buf, &self.vec);
    }

    fn decode_text(s: &str) -> Result<Self> {
        Ok(Self::new(parse_dense_text(s, Self::TYPE_NAME)?))
    }

    fn encode_binary(&self, buf: &mut Vec<u8>) -> Result<()> {
        let dim = header_dim(Self::TYPE_NAME, self.vec.len())?;
        buf.reserve(halfvec_size(self.vec.len()));
        send_u16(buf, dim);
        send_u16(buf, 0);
        for &v in &self.vec {
            send_u16(buf, f32_to_half(v));
        }
        Ok(())
    }

    fn decode_binary(buf: &[u8]) -> Result<Self> {
        let mut msg = MessageReader::new(buf, Self::TYPE_NAME);
        let dim = msg.get_u16()? as usize;
        check_unused(Self::TYPE_NAME, msg.get_u16()?.into())?;

        msg.require(dim * std::mem::size_of::<u16>())?;
        let mut vec = Vec::with_capacity(dim);
        for _ in 0..dim {
            vec.push(half_to_f32(msg.get_u16()?));
        }
        msg.finish()?;

        tracing::trace!(dim, "decoded binary halfvec");
        Ok(Self::new(vec))
    }
}

impl From<Vec<f32>> for HalfVector {
    fn from(vec: Vec<f32>) -> Self {
        Self::new(vec)
    }
}

impl From<&[f32]> for HalfVector {
    fn from(vec: &[f32]) -> Self {
        Self::new(vec.to_vec())
    }
}

impl From<Vector> for HalfVector {
    fn from(vec: Vector) -> Self {
        Self::new(vec.into_vec())
    }
}

impl From<HalfVector> for Vector {
    fn from(vec: HalfVector) -> Self {
        Vector::new(vec.vec)
    }
}

impl std::fmt::Display for HalfVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl std::str::FromStr for HalfVector {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode_text(s)
    }
}
