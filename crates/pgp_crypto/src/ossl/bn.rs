// Copyright (C) Microsoft Corporation. All rights reserved.

//! Big-number wrapper with explicit ownership.

use foreign_types::ForeignType;
use foreign_types::ForeignTypeRef;
use openssl::bn::BigNum;
use openssl::bn::BigNumRef;

use super::*;

/// A native big number that is either owned, borrowed or absent.
///
/// Owned values are freed when the wrapper is dropped; borrowed values are
/// never freed and cannot outlive the structure they were borrowed from.
/// The wrapper is move-only: [`Bn::take`] moves the value out and leaves
/// the source empty.
#[derive(Default)]
pub enum Bn<'a> {
    /// No value.
    #[default]
    Empty,

    /// Value owned by this wrapper.
    Owned(BigNum),

    /// Read-only value owned elsewhere.
    Borrowed(&'a BigNumRef),
}

impl<'a> Bn<'a> {
    /// Creates an empty wrapper.
    pub fn empty() -> Self {
        Bn::Empty
    }

    /// Takes ownership of a raw native handle. A null handle gives an empty
    /// wrapper.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a valid `BIGNUM` that no one else frees.
    #[allow(unsafe_code)]
    pub unsafe fn from_raw(ptr: *mut openssl_sys::BIGNUM) -> Bn<'static> {
        if ptr.is_null() {
            Bn::Empty
        } else {
            // SAFETY: the caller hands over sole ownership of a valid BIGNUM.
            Bn::Owned(unsafe { BigNum::from_ptr(ptr) })
        }
    }

    /// Borrows a value owned elsewhere.
    pub fn borrowed(bn: &'a BigNumRef) -> Self {
        Bn::Borrowed(bn)
    }

    /// Copies an MPI into a newly allocated native integer.
    ///
    /// # Returns
    ///
    /// * `Result<Bn, CryptoError>` - The owned value, or
    ///   `CryptoError::Generic` if allocation fails.
    pub fn from_mpi(mpi: &Mpi) -> Result<Bn<'static>, CryptoError> {
        let bn = BigNum::from_slice(mpi.as_bytes()).map_err(|openssl_error_stack| {
            tracing::error!(?openssl_error_stack, "failed to convert MPI");
            CryptoError::Generic
        })?;
        Ok(Bn::Owned(bn))
    }

    /// Returns `true` if no value is held.
    pub fn is_empty(&self) -> bool {
        matches!(self, Bn::Empty)
    }

    /// Returns `true` if the value is owned by this wrapper.
    pub fn is_owned(&self) -> bool {
        matches!(self, Bn::Owned(_))
    }

    /// Read access to the value.
    pub fn get(&self) -> Option<&BigNumRef> {
        match self {
            Bn::Empty => None,
            Bn::Owned(bn) => Some(bn),
            Bn::Borrowed(bn) => Some(bn),
        }
    }

    /// Write access to the value. Only owned values are writable.
    pub fn get_mut(&mut self) -> Option<&mut BigNumRef> {
        match self {
            Bn::Owned(bn) => Some(bn),
            _ => None,
        }
    }

    /// Raw handle for passing into provider calls; null when empty.
    pub fn as_ptr(&self) -> *const openssl_sys::BIGNUM {
        match self.get() {
            Some(bn) => bn.as_ptr() as *const _,
            None => std::ptr::null(),
        }
    }

    /// Replaces the held value, releasing any previously owned one.
    pub fn set(&mut self, bn: BigNum) {
        *self = Bn::Owned(bn);
    }

    /// Moves the value out, leaving this wrapper empty.
    pub fn take(&mut self) -> Bn<'a> {
        std::mem::take(self)
    }

    /// Releases ownership of the value. Borrowed values are copied.
    ///
    /// # Returns
    ///
    /// * `Result<BigNum, CryptoError>` - The value, or `CryptoError::Generic`
    ///   if the wrapper is empty or the copy fails.
    pub fn into_owned(self) -> Result<BigNum, CryptoError> {
        match self {
            Bn::Empty => Err(CryptoError::Generic),
            Bn::Owned(bn) => Ok(bn),
            Bn::Borrowed(bn) => bn.to_owned().map_err(|openssl_error_stack| {
                tracing::error!(?openssl_error_stack);
                CryptoError::Generic
            }),
        }
    }

    /// Length of the value in bytes; zero when empty.
    pub fn byte_len(&self) -> usize {
        self.get().map_or(0, |bn| bn.num_bytes() as usize)
    }

    /// Big-endian value bytes; empty when the wrapper is empty.
    pub fn to_vec(&self) -> Vec<u8> {
        self.get().map_or_else(Vec::new, |bn| bn.to_vec())
    }

    /// Converts the value to wire format.
    ///
    /// # Returns
    ///
    /// * `Result<Mpi, CryptoError>` - The MPI, or `CryptoError::Generic` if
    ///   the wrapper is empty or the value exceeds [`MPI_MAX_BYTES`].
    pub fn to_mpi(&self) -> Result<Mpi, CryptoError> {
        let Some(bn) = self.get() else {
            tracing::error!("converting empty big number");
            return Err(CryptoError::Generic);
        };
        let len = bn.num_bytes() as usize;
        if len > MPI_MAX_BYTES {
            tracing::error!(len, "big number exceeds maximum MPI size");
            return Err(CryptoError::Generic);
        }
        Mpi::from_bytes(&bn.to_vec())
    }
}

impl<'a> From<&'a BigNumRef> for Bn<'a> {
    fn from(bn: &'a BigNumRef) -> Self {
        Bn::Borrowed(bn)
    }
}

impl From<BigNum> for Bn<'_> {
    fn from(bn: BigNum) -> Self {
        Bn::Owned(bn)
    }
}

impl std::fmt::Debug for Bn<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Bn::Empty => "Empty",
            Bn::Owned(_) => "Owned",
            Bn::Borrowed(_) => "Borrowed",
        };
        f.debug_struct("Bn")
            .field("kind", &kind)
            .field("bytes", &self.byte_len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_bn_mpi_round_trip() {
        let values: [&[u8]; 5] = [
            &[0x01],
            &[0x7f, 0xff],
            &[0x80, 0x00, 0x00, 0x01],
            &[0x5a; 521],
            &[0xff; MPI_MAX_BYTES],
        ];
        for value in values {
            let mpi = Mpi::from_bytes(value).unwrap();
            let bn = Bn::from_mpi(&mpi).unwrap();
            assert_eq!(bn.byte_len(), value.len());
            assert_eq!(bn.to_mpi().unwrap(), mpi);
            assert_eq!(bn.to_vec(), value);
        }
    }

    #[test]
    fn test_bn_mpi_leading_zeros() {
        let mpi = Mpi::from_bytes(&[0x00, 0x00, 0x12, 0x34]).unwrap();
        let out = Bn::from_mpi(&mpi).unwrap().to_mpi().unwrap();
        assert_eq!(out, mpi);
        assert_eq!(out.as_bytes(), &[0x12, 0x34]);
    }

    #[test]
    fn test_bn_to_mpi_too_large() {
        let mut big = vec![0u8; MPI_MAX_BYTES + 1];
        big[0] = 0x01;
        let bn = Bn::from(BigNum::from_slice(&big).unwrap());
        assert_eq!(bn.byte_len(), MPI_MAX_BYTES + 1);
        assert_eq!(bn.to_mpi().unwrap_err(), CryptoError::Generic);
    }

    #[test]
    fn test_bn_empty() {
        let bn = Bn::empty();
        assert!(bn.is_empty());
        assert!(bn.as_ptr().is_null());
        assert_eq!(bn.byte_len(), 0);
        assert_eq!(bn.to_mpi().unwrap_err(), CryptoError::Generic);
        assert_eq!(bn.into_owned().unwrap_err(), CryptoError::Generic);
    }

    #[test]
    fn test_bn_take_leaves_source_empty() {
        let mut src = Bn::from(BigNum::from_u32(0x1234).unwrap());
        let dst = src.take();
        assert!(src.is_empty());
        assert!(dst.is_owned());
        assert_eq!(dst.to_vec(), vec![0x12, 0x34]);
    }

    #[test]
    fn test_bn_borrowed_is_not_freed() {
        let owner = BigNum::from_u32(0xabcd).unwrap();
        {
            let borrowed = Bn::borrowed(&owner);
            assert!(!borrowed.is_owned());
            assert_eq!(borrowed.as_ptr(), owner.as_ptr() as *const _);
            assert_eq!(borrowed.to_mpi().unwrap().as_bytes(), &[0xab, 0xcd]);
        }
        // still valid after the borrow is dropped
        assert_eq!(owner.to_vec(), vec![0xab, 0xcd]);
    }

    #[test]
    fn test_bn_borrowed_into_owned_copies() {
        let owner = BigNum::from_u32(7).unwrap();
        let copy = Bn::borrowed(&owner).into_owned().unwrap();
        assert_ne!(copy.as_ptr(), owner.as_ptr());
        assert_eq!(copy, owner);
    }

    #[test]
    #[allow(unsafe_code)]
    fn test_bn_from_raw() {
        // SAFETY: BN_new returns a fresh BIGNUM which the wrapper now owns.
        let mut bn = unsafe { Bn::from_raw(openssl_sys::BN_new()) };
        assert!(bn.is_owned());
        bn.get_mut().unwrap().add_word(5).unwrap();
        assert_eq!(bn.to_vec(), vec![5]);

        // SAFETY: null is accepted and yields an empty wrapper.
        let null = unsafe { Bn::from_raw(std::ptr::null_mut()) };
        assert!(null.is_empty());
    }

    #[test]
    fn test_bn_set_replaces_value() {
        let owner = BigNum::from_u32(1).unwrap();
        let mut bn = Bn::borrowed(&owner);
        assert!(bn.get_mut().is_none());
        bn.set(BigNum::from_u32(2).unwrap());
        assert!(bn.is_owned());
        assert_eq!(bn.to_vec(), vec![2]);
    }
}
