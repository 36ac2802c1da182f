// Copyright (C) Microsoft Corporation. All rights reserved.

//! Scratch contexts for modular arithmetic.
//!
//! The general arithmetic scratch is [`openssl::bn::BigNumContext`]; the
//! reciprocal and Montgomery contexts below have no binding in the
//! `openssl` crate.

#![allow(unsafe_code)]

use std::ptr::NonNull;

use foreign_types::ForeignTypeRef;
use openssl::bn::BigNumContextRef;
use openssl::bn::BigNumRef;

use super::*;

/// Precomputed reciprocal of a modulus for repeated modular multiplication.
pub struct RecpCtx {
    ptr: NonNull<ffi::BN_RECP_CTX>,
}

impl RecpCtx {
    /// Allocates a context and precomputes the reciprocal of `modulus`.
    ///
    /// # Returns
    ///
    /// * `Result<RecpCtx, CryptoError>` - The context, or
    ///   `CryptoError::Generic` if allocation or setup fails.
    pub fn new(modulus: &BigNumRef, ctx: &mut BigNumContextRef) -> Result<Self, CryptoError> {
        // SAFETY: BN_RECP_CTX_new has no preconditions.
        let ptr = NonNull::new(unsafe { ffi::BN_RECP_CTX_new() }).ok_or_else(|| {
            tracing::error!("BN_RECP_CTX_new failed");
            CryptoError::Generic
        })?;
        let recp = Self { ptr };
        // SAFETY: all handles are valid for the duration of the call.
        let ret = unsafe { ffi::BN_RECP_CTX_set(recp.as_ptr(), modulus.as_ptr(), ctx.as_ptr()) };
        if ret != 1 {
            tracing::error!(openssl_error_stack = ?ErrorStack::get(), "BN_RECP_CTX_set failed");
            return Err(CryptoError::Generic);
        }
        Ok(recp)
    }

    /// Raw handle for passing into provider calls.
    pub fn as_ptr(&self) -> *mut ffi::BN_RECP_CTX {
        self.ptr.as_ptr()
    }

    /// Computes `r = x * y mod m`, where `m` is the modulus this context was
    /// built for.
    pub fn mod_mul(
        &self,
        r: &mut BigNumRef,
        x: &BigNumRef,
        y: &BigNumRef,
        ctx: &mut BigNumContextRef,
    ) -> Result<(), CryptoError> {
        // SAFETY: all handles are valid for the duration of the call.
        let ret = unsafe {
            ffi::BN_mod_mul_reciprocal(
                r.as_ptr(),
                x.as_ptr(),
                y.as_ptr(),
                self.as_ptr(),
                ctx.as_ptr(),
            )
        };
        if ret != 1 {
            tracing::error!(openssl_error_stack = ?ErrorStack::get(), "BN_mod_mul_reciprocal failed");
            return Err(CryptoError::Generic);
        }
        Ok(())
    }
}

impl Drop for RecpCtx {
    fn drop(&mut self) {
        // SAFETY: the context was allocated by BN_RECP_CTX_new and is freed once.
        unsafe { ffi::BN_RECP_CTX_free(self.as_ptr()) };
    }
}

/// Montgomery form of a modulus for repeated modular exponentiation.
pub struct MontCtx<'m> {
    ptr: NonNull<ffi::BN_MONT_CTX>,
    modulus: &'m BigNumRef,
}

impl<'m> MontCtx<'m> {
    /// Allocates a context for the odd `modulus`.
    ///
    /// # Returns
    ///
    /// * `Result<MontCtx, CryptoError>` - The context, or
    ///   `CryptoError::Generic` if allocation or setup fails (for example
    ///   when `modulus` is even).
    pub fn new(modulus: &'m BigNumRef, ctx: &mut BigNumContextRef) -> Result<Self, CryptoError> {
        // SAFETY: BN_MONT_CTX_new has no preconditions.
        let ptr = NonNull::new(unsafe { ffi::BN_MONT_CTX_new() }).ok_or_else(|| {
            tracing::error!("BN_MONT_CTX_new failed");
            CryptoError::Generic
        })?;
        let mont = Self { ptr, modulus };
        // SAFETY: all handles are valid for the duration of the call.
        let ret = unsafe { ffi::BN_MONT_CTX_set(mont.as_ptr(), modulus.as_ptr(), ctx.as_ptr()) };
        if ret != 1 {
            tracing::error!(openssl_error_stack = ?ErrorStack::get(), "BN_MONT_CTX_set failed");
            return Err(CryptoError::Generic);
        }
        Ok(mont)
    }

    /// Raw handle for passing into provider calls.
    pub fn as_ptr(&self) -> *mut ffi::BN_MONT_CTX {
        self.ptr.as_ptr()
    }

    /// Computes `r = a ^ p mod m`.
    pub fn mod_exp(
        &self,
        r: &mut BigNumRef,
        a: &BigNumRef,
        p: &BigNumRef,
        ctx: &mut BigNumContextRef,
    ) -> Result<(), CryptoError> {
        // SAFETY: all handles are valid for the duration of the call.
        let ret = unsafe {
            ffi::BN_mod_exp_mont(
                r.as_ptr(),
                a.as_ptr(),
                p.as_ptr(),
                self.modulus.as_ptr(),
                ctx.as_ptr(),
                self.as_ptr(),
            )
        };
        if ret != 1 {
            tracing::error!(openssl_error_stack = ?ErrorStack::get(), "BN_mod_exp_mont failed");
            return Err(CryptoError::Generic);
        }
        Ok(())
    }
}

impl Drop for MontCtx<'_> {
    fn drop(&mut self) {
        // SAFETY: the context was allocated by BN_MONT_CTX_new and is freed once.
        unsafe { ffi::BN_MONT_CTX_free(self.as_ptr()) };
    }
}

#[cfg(test)]
mod tests {
    use openssl::bn::BigNum;
    use openssl::bn::BigNumContext;
    use test_log::test;

    use super::*;

    #[test]
    fn test_recp_mod_mul() {
        let mut ctx = BigNumContext::new().unwrap();
        let m = BigNum::from_u32(1_000_003).unwrap();
        let recp = RecpCtx::new(&m, &mut ctx).unwrap();

        let x = BigNum::from_u32(987_654).unwrap();
        let y = BigNum::from_u32(123_456).unwrap();
        let mut r = BigNum::new().unwrap();
        recp.mod_mul(&mut r, &x, &y, &mut ctx).unwrap();

        let mut expected = BigNum::new().unwrap();
        expected.mod_mul(&x, &y, &m, &mut ctx).unwrap();
        assert_eq!(r, expected);
    }

    #[test]
    fn test_mont_mod_exp() {
        let mut ctx = BigNumContext::new().unwrap();
        let m = BigNum::from_u32(1_000_003).unwrap();
        let mont = MontCtx::new(&m, &mut ctx).unwrap();

        let a = BigNum::from_u32(2).unwrap();
        let p = BigNum::from_u32(65_537).unwrap();
        let mut r = BigNum::new().unwrap();
        mont.mod_exp(&mut r, &a, &p, &mut ctx).unwrap();

        let mut expected = BigNum::new().unwrap();
        expected.mod_exp(&a, &p, &m, &mut ctx).unwrap();
        assert_eq!(r, expected);
    }

    #[test]
    fn test_mont_even_modulus_rejected() {
        let mut ctx = BigNumContext::new().unwrap();
        let m = BigNum::from_u32(1_000_000).unwrap();
        assert_eq!(
            MontCtx::new(&m, &mut ctx).err(),
            Some(CryptoError::Generic)
        );
    }
}
