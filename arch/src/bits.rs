use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Bit pattern of a known width, most significant bit first.
///
/// Serialized as a bit string (`"0101010"`), the notation the descriptor
/// tables are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Bits {
    val: u64,
    width: usize,
}

impl Bits {
    /// `val` encoded in at least `width` bits.
    ///
    /// A value too large for `width` keeps all of its significant bits, so a
    /// word built from it comes out wider than the field layout allows.
    pub fn new(val: u64, width: usize) -> Self {
        let need = (u64::BITS - val.leading_zeros()) as usize;
        Bits {
            val,
            width: width.max(need),
        }
    }

    /// Bit-string literal for static tables. Any character other than `1`
    /// counts as `0`.
    pub fn lit(s: &str) -> Self {
        Bits {
            val: s.bytes().fold(0, |acc, c| acc << 1 | (c == b'1') as u64),
            width: s.len(),
        }
    }

    pub fn val(&self) -> u64 {
        self.val
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Append `tail` after the current least significant bit.
    pub fn push(&mut self, tail: Bits) {
        self.val = self.val.checked_shl(tail.width as u32).unwrap_or(0) | tail.val;
        self.width += tail.width;
    }

    /// `width` bits starting `offset` bits from the most significant end.
    pub fn slice(&self, offset: usize, width: usize) -> Bits {
        let shift = self.width.saturating_sub(offset + width) as u32;
        let mask = 1u64.checked_shl(width as u32).map_or(u64::MAX, |m| m - 1);
        Bits {
            val: self.val.checked_shr(shift).unwrap_or(0) & mask,
            width,
        }
    }

    /// Whether the leading bits equal `prefix`.
    pub fn starts_with(&self, prefix: &Bits) -> bool {
        prefix.width <= self.width && self.slice(0, prefix.width) == *prefix
    }
}

impl fmt::Display for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.width == 0 {
            return Ok(());
        }
        write!(f, "{:0>width$b}", self.val, width = self.width)
    }
}

impl FromStr for Bits {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() > u64::BITS as usize || !s.bytes().all(|c| c == b'0' || c == b'1') {
            return Err(Error::ParseBits(s.to_string()));
        }
        Ok(Bits::lit(s))
    }
}

impl TryFrom<String> for Bits {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Bits> for String {
    fn from(bits: Bits) -> Self {
        bits.to_string()
    }
}
