// Copyright (C) Microsoft Corporation. All rights reserved.

//! OpenPGP multi-precision integers.

use super::*;

/// Largest integer carried on the wire, in bits.
pub const MPI_MAX_BITS: usize = 16384;

/// Largest integer carried on the wire, in bytes.
pub const MPI_MAX_BYTES: usize = MPI_MAX_BITS / 8;

/// Big-endian integer with an explicit length, bounded by [`MPI_MAX_BYTES`].
///
/// Leading zero bytes may be stored but are not part of the value: two
/// MPIs compare equal when their values are equal.
#[derive(Clone)]
pub struct Mpi {
    buf: [u8; MPI_MAX_BYTES],
    len: usize,
}

impl Mpi {
    /// Creates an empty (zero-length) MPI.
    pub const fn new() -> Self {
        Self {
            buf: [0u8; MPI_MAX_BYTES],
            len: 0,
        }
    }

    /// Creates an MPI holding a copy of `bytes`.
    ///
    /// # Arguments
    ///
    /// * `bytes` - Big-endian integer bytes.
    ///
    /// # Returns
    ///
    /// * `Result<Mpi, CryptoError>` - The MPI, or `CryptoError::Generic` if
    ///   `bytes` is longer than [`MPI_MAX_BYTES`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() > MPI_MAX_BYTES {
            tracing::error!(len = bytes.len(), "MPI exceeds maximum wire size");
            return Err(CryptoError::Generic);
        }
        let mut mpi = Self::new();
        mpi.buf[..bytes.len()].copy_from_slice(bytes);
        mpi.len = bytes.len();
        Ok(mpi)
    }

    /// Stored bytes, including any leading zeros.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Stored length in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Value bytes with leading zeros stripped.
    pub fn value(&self) -> &[u8] {
        let bytes = self.as_bytes();
        let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
        &bytes[start..]
    }

    /// Number of significant bits in the value.
    pub fn bits(&self) -> usize {
        match self.value().first() {
            Some(&top) => (self.value().len() - 1) * 8 + (8 - top.leading_zeros() as usize),
            None => 0,
        }
    }

    /// Returns the value left-padded with zeros to exactly `size` bytes, or
    /// `None` if the value does not fit.
    pub fn to_padded(&self, size: usize) -> Option<Vec<u8>> {
        let value = self.value();
        if value.len() > size {
            return None;
        }
        let mut out = vec![0u8; size];
        out[size - value.len()..].copy_from_slice(value);
        Some(out)
    }

    /// Encodes the MPI in OpenPGP framing: a two-octet big-endian bit count
    /// followed by the minimal big-endian value bytes.
    pub fn to_wire(&self) -> Vec<u8> {
        let value = self.value();
        // bits() <= MPI_MAX_BITS, which fits in u16
        let bits = self.bits() as u16;
        let mut out = Vec::with_capacity(2 + value.len());
        out.extend_from_slice(&bits.to_be_bytes());
        out.extend_from_slice(value);
        out
    }

    /// Parses one OpenPGP-framed MPI from the front of `data`.
    ///
    /// # Returns
    ///
    /// * `Result<(Mpi, usize), CryptoError>` - The MPI and the number of
    ///   bytes consumed, or `CryptoError::Generic` if `data` is truncated
    ///   or the bit count exceeds [`MPI_MAX_BITS`].
    pub fn from_wire(data: &[u8]) -> Result<(Self, usize), CryptoError> {
        let Some((hdr, rest)) = data.split_first_chunk::<2>() else {
            tracing::error!("MPI header truncated");
            return Err(CryptoError::Generic);
        };
        let bits = u16::from_be_bytes(*hdr) as usize;
        if bits > MPI_MAX_BITS {
            tracing::error!(bits, "MPI bit count exceeds maximum");
            return Err(CryptoError::Generic);
        }
        let len = bits.div_ceil(8);
        if rest.len() < len {
            tracing::error!(len, available = rest.len(), "MPI body truncated");
            return Err(CryptoError::Generic);
        }
        let mpi = Self::from_bytes(&rest[..len])?;
        if mpi.bits() != bits {
            tracing::debug!(
                declared = bits,
                actual = mpi.bits(),
                "MPI bit count does not match value"
            );
        }
        Ok((mpi, 2 + len))
    }
}

impl Default for Mpi {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Mpi {
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

impl Eq for Mpi {}

impl std::fmt::Debug for Mpi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mpi").field("bits", &self.bits()).finish()
    }
}

impl TryFrom<&[u8]> for Mpi {
    type Error = CryptoError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}
