// Copyright (C) Microsoft Corporation. All rights reserved.

//! Structured parameter assembly for provider key construction.

#![allow(unsafe_code)]

use std::ffi::CStr;
use std::marker::PhantomData;
use std::ptr::NonNull;

use super::*;

/// Accumulates named values into a parameter list.
///
/// OpenSSL keeps pointers to pushed values until [`ParamBld::to_param`]
/// runs, so every pushed value is borrowed for the builder's lifetime.
pub struct ParamBld<'a> {
    ptr: NonNull<ffi::OSSL_PARAM_BLD>,
    _values: PhantomData<&'a [u8]>,
}

impl<'a> ParamBld<'a> {
    /// Allocates an empty builder.
    pub fn new() -> Result<Self, CryptoError> {
        // SAFETY: OSSL_PARAM_BLD_new has no preconditions.
        let ptr = NonNull::new(unsafe { ffi::OSSL_PARAM_BLD_new() }).ok_or_else(|| {
            tracing::error!("OSSL_PARAM_BLD_new failed");
            CryptoError::Generic
        })?;
        Ok(Self {
            ptr,
            _values: PhantomData,
        })
    }

    /// Raw handle for passing into provider calls.
    pub fn as_ptr(&self) -> *mut ffi::OSSL_PARAM_BLD {
        self.ptr.as_ptr()
    }

    /// Pushes a big-number value. Fails if `bn` is empty.
    pub fn push_bn(&mut self, name: &'static CStr, bn: &'a Bn<'_>) -> Result<(), CryptoError> {
        if bn.is_empty() {
            tracing::error!(?name, "pushing empty big number");
            return Err(CryptoError::Generic);
        }
        // SAFETY: `bn` outlives the builder; the name is NUL-terminated.
        let ret = unsafe { ffi::OSSL_PARAM_BLD_push_BN(self.as_ptr(), name.as_ptr(), bn.as_ptr()) };
        Self::check(ret, name)
    }

    /// Pushes a UTF-8 string value.
    pub fn push_utf8(&mut self, name: &'static CStr, value: &'a CStr) -> Result<(), CryptoError> {
        // SAFETY: `value` outlives the builder; a zero size means NUL-terminated.
        let ret = unsafe {
            ffi::OSSL_PARAM_BLD_push_utf8_string(self.as_ptr(), name.as_ptr(), value.as_ptr(), 0)
        };
        Self::check(ret, name)
    }

    /// Pushes an opaque byte-string value.
    pub fn push_octets(&mut self, name: &'static CStr, value: &'a [u8]) -> Result<(), CryptoError> {
        // SAFETY: `value` outlives the builder and is valid for `value.len()` bytes.
        let ret = unsafe {
            ffi::OSSL_PARAM_BLD_push_octet_string(
                self.as_ptr(),
                name.as_ptr(),
                value.as_ptr().cast(),
                value.len(),
            )
        };
        Self::check(ret, name)
    }

    /// Finalizes the pushed values into an owned parameter list.
    pub fn to_param(&mut self) -> Result<Param, CryptoError> {
        // SAFETY: the builder handle is valid.
        let ptr = NonNull::new(unsafe { ffi::OSSL_PARAM_BLD_to_param(self.as_ptr()) })
            .ok_or_else(|| {
                tracing::error!(openssl_error_stack = ?ErrorStack::get(), "OSSL_PARAM_BLD_to_param failed");
                CryptoError::Generic
            })?;
        Ok(Param { ptr })
    }

    fn check(ret: std::ffi::c_int, name: &CStr) -> Result<(), CryptoError> {
        if ret != 1 {
            tracing::error!(?name, openssl_error_stack = ?ErrorStack::get(), "failed to push parameter");
            return Err(CryptoError::Generic);
        }
        Ok(())
    }
}

impl Drop for ParamBld<'_> {
    fn drop(&mut self) {
        // SAFETY: the builder was allocated by OSSL_PARAM_BLD_new and is freed once.
        unsafe { ffi::OSSL_PARAM_BLD_free(self.as_ptr()) };
    }
}

/// Finalized parameter list; owns copies of every pushed value.
pub struct Param {
    ptr: NonNull<ffi::OSSL_PARAM>,
}

impl Param {
    /// Raw handle for passing into provider calls.
    pub fn as_ptr(&self) -> *mut ffi::OSSL_PARAM {
        self.ptr.as_ptr()
    }
}

impl Drop for Param {
    fn drop(&mut self) {
        // SAFETY: the list was allocated by OSSL_PARAM_BLD_to_param and is freed once.
        unsafe { ffi::OSSL_PARAM_free(self.as_ptr()) };
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_param_bld_push_all_kinds() {
        let bn = Bn::from_mpi(&Mpi::from_bytes(&[0x01, 0x00, 0x01]).unwrap()).unwrap();
        let octets = [0x04u8, 0x01, 0x02];
        let mut bld = ParamBld::new().unwrap();
        bld.push_bn(c"e", &bn).unwrap();
        bld.push_utf8(c"group", c"prime256v1").unwrap();
        bld.push_octets(c"pub", &octets).unwrap();
        let param = bld.to_param().unwrap();
        assert!(!param.as_ptr().is_null());
    }

    #[test]
    fn test_param_bld_empty_bn_rejected() {
        let empty = Bn::empty();
        let mut bld = ParamBld::new().unwrap();
        assert_eq!(bld.push_bn(c"priv", &empty), Err(CryptoError::Generic));
        // builder stays usable after a failed push
        assert!(bld.to_param().is_ok());
    }
}
