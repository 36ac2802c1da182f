// Copyright (C) Microsoft Corporation. All rights reserved.

//! Randomness capability consumed by signing, encryption and key generation.

cfg_if::cfg_if! {
    if #[cfg(feature = "use-openssl")] {
        mod rand_ossl;
    } else if #[cfg(feature = "use-symcrypt")] {
        mod rand_symcrypt;
    }
}

use super::*;

/// Random number generator backed by the active provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rng {}

/// Trait for RNG operations.
///
/// Algorithm components take `&dyn RngOp` so that callers can substitute
/// their own source.
pub trait RngOp {
    /// Fills `buf` with cryptographically secure random bytes.
    ///
    /// # Arguments
    ///
    /// * `buf` - The buffer to fill with random bytes.
    ///
    /// # Returns
    ///
    /// * `Result<(), CryptoError>` - Returns `Ok(())` on success,
    ///   or `Err(CryptoError::RngError)` if random number generation fails.
    fn rand_bytes(&self, buf: &mut [u8]) -> Result<(), CryptoError>;
}

#[cfg(test)]
pub(crate) use counting::CountingRng;


#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_rand_bytes() {
        let rng = Rng {};
        let mut buf = [0u8; 1024];
        assert!(rng.rand_bytes(&mut buf).is_ok());
        // all zeros is vanishingly unlikely
        assert_ne!(buf, [0u8; 1024]);
    }

    #[test]
    fn test_rand_bytes_empty() {
        let rng = Rng {};
        let mut buf = [0u8; 0];
        assert!(rng.rand_bytes(&mut buf).is_ok());
    }

    #[test]
    fn test_counting_rng() {
        let rng = CountingRng::default();
        let mut buf = [0u8; 16];
        rng.rand_bytes(&mut buf).unwrap();
        rng.rand_bytes(&mut buf).unwrap();
        assert_eq!(rng.calls(), 2);
    }
}
