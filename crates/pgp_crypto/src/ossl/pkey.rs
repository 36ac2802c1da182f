// Copyright (C) Microsoft Corporation. All rights reserved.

//! Asymmetric key objects built from parameter lists.

#![allow(unsafe_code)]

use std::ffi::CStr;

use foreign_types::ForeignType;
use foreign_types::ForeignTypeRef;
use openssl::pkey::PKey;
use openssl::pkey::PKeyRef;
use openssl::pkey_ctx::PkeyCtx;

use super::*;

/// Which parts of a key a parameter list describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySelection {
    /// Domain parameters only.
    Parameters,

    /// Domain parameters and public key.
    PublicKey,

    /// Domain parameters, public and private key.
    KeyPair,
}

impl KeySelection {
    fn as_raw(self) -> std::ffi::c_int {
        match self {
            KeySelection::Parameters => ffi::EVP_PKEY_KEY_PARAMETERS,
            KeySelection::PublicKey => ffi::EVP_PKEY_PUBLIC_KEY,
            KeySelection::KeyPair => ffi::EVP_PKEY_KEYPAIR,
        }
    }
}

/// Builds a key object of the named algorithm (`"EC"`, `"DSA"`, ...) from
/// a parameter list.
///
/// The type parameter is the caller's claim about what the key holds; it
/// must match `selection`.
///
/// # Returns
///
/// * `Result<PKey<T>, CryptoError>` - The key, or `CryptoError::Generic`
///   if the provider rejects the parameters.
pub fn pkey_from_params<T>(
    algorithm: &CStr,
    params: &Param,
    selection: KeySelection,
) -> Result<PKey<T>, CryptoError> {
    let ctx = new_ctx_from_name(algorithm)?;
    // SAFETY: the context handle is valid.
    if unsafe { ffi::EVP_PKEY_fromdata_init(ctx.as_ptr()) } != 1 {
        tracing::error!(openssl_error_stack = ?ErrorStack::get(), "EVP_PKEY_fromdata_init failed");
        return Err(CryptoError::Generic);
    }
    let mut raw: *mut openssl_sys::EVP_PKEY = std::ptr::null_mut();
    // SAFETY: the context and parameter list are valid; `raw` receives a new key.
    let ret = unsafe {
        ffi::EVP_PKEY_fromdata(ctx.as_ptr(), &mut raw, selection.as_raw(), params.as_ptr())
    };
    if ret != 1 || raw.is_null() {
        tracing::error!(?algorithm, openssl_error_stack = ?ErrorStack::get(), "EVP_PKEY_fromdata failed");
        return Err(CryptoError::Generic);
    }
    // SAFETY: EVP_PKEY_fromdata returned a new key that we now own.
    Ok(unsafe { PKey::from_ptr(raw) })
}

/// Runs the provider's consistency check on `pkey`.
///
/// [`KeySelection::KeyPair`] checks the full pair, [`KeySelection::PublicKey`]
/// only the public part and [`KeySelection::Parameters`] only the domain
/// parameters.
///
/// # Returns
///
/// * `Result<(), CryptoError>` - `CryptoError::BadParameters` if the check
///   fails, `CryptoError::Generic` if no check context can be created.
pub fn pkey_check<T>(pkey: &PKeyRef<T>, selection: KeySelection) -> Result<(), CryptoError> {
    let ctx = PkeyCtx::new(pkey).map_err(|openssl_error_stack| {
        tracing::error!(?openssl_error_stack, "failed to create check context");
        CryptoError::Generic
    })?;
    // SAFETY: the context handle is valid.
    let ret = unsafe {
        match selection {
            KeySelection::KeyPair => ffi::EVP_PKEY_check(ctx.as_ptr()),
            KeySelection::PublicKey => ffi::EVP_PKEY_public_check(ctx.as_ptr()),
            KeySelection::Parameters => ffi::EVP_PKEY_param_check(ctx.as_ptr()),
        }
    };
    if ret != 1 {
        tracing::debug!(?selection, openssl_error_stack = ?ErrorStack::get(), "key check failed");
        return Err(CryptoError::BadParameters);
    }
    Ok(())
}

fn new_ctx_from_name(algorithm: &CStr) -> Result<PkeyCtx<()>, CryptoError> {
    // SAFETY: the name is NUL-terminated; null selects the default library context.
    let raw = unsafe {
        ffi::EVP_PKEY_CTX_new_from_name(std::ptr::null_mut(), algorithm.as_ptr(), std::ptr::null())
    };
    if raw.is_null() {
        tracing::error!(?algorithm, openssl_error_stack = ?ErrorStack::get(), "EVP_PKEY_CTX_new_from_name failed");
        return Err(CryptoError::Generic);
    }
    // SAFETY: the context was just allocated and is now owned by the wrapper.
    Ok(unsafe { PkeyCtx::from_ptr(raw) })
}
