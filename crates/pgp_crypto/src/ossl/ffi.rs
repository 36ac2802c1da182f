// Copyright (C) Microsoft Corporation. All rights reserved.

//! OpenSSL 3 entry points without a binding in the `openssl` crate.

#![allow(non_camel_case_types)]
#![allow(unsafe_code)]

use std::ffi::c_char;
use std::ffi::c_int;
use std::ffi::c_void;

use openssl_sys::BIGNUM;
use openssl_sys::BN_CTX;
use openssl_sys::EVP_PKEY;
use openssl_sys::EVP_PKEY_CTX;

#[repr(C)]
pub struct BN_RECP_CTX {
    _private: [u8; 0],
}

#[repr(C)]
pub struct BN_MONT_CTX {
    _private: [u8; 0],
}

#[repr(C)]
pub struct OSSL_PARAM_BLD {
    _private: [u8; 0],
}

#[repr(C)]
pub struct OSSL_PARAM {
    _private: [u8; 0],
}

pub const EVP_PKEY_KEY_PARAMETERS: c_int = 0x84;
pub const EVP_PKEY_PUBLIC_KEY: c_int = 0x86;
pub const EVP_PKEY_KEYPAIR: c_int = 0x87;

extern "C" {
    pub fn BN_RECP_CTX_new() -> *mut BN_RECP_CTX;
    pub fn BN_RECP_CTX_free(recp: *mut BN_RECP_CTX);
    pub fn BN_RECP_CTX_set(recp: *mut BN_RECP_CTX, rdiv: *const BIGNUM, ctx: *mut BN_CTX) -> c_int;
    pub fn BN_mod_mul_reciprocal(
        r: *mut BIGNUM,
        x: *const BIGNUM,
        y: *const BIGNUM,
        recp: *mut BN_RECP_CTX,
        ctx: *mut BN_CTX,
    ) -> c_int;

    pub fn BN_MONT_CTX_new() -> *mut BN_MONT_CTX;
    pub fn BN_MONT_CTX_free(mont: *mut BN_MONT_CTX);
    pub fn BN_MONT_CTX_set(mont: *mut BN_MONT_CTX, modulus: *const BIGNUM, ctx: *mut BN_CTX)
        -> c_int;
    pub fn BN_mod_exp_mont(
        r: *mut BIGNUM,
        a: *const BIGNUM,
        p: *const BIGNUM,
        m: *const BIGNUM,
        ctx: *mut BN_CTX,
        m_ctx: *mut BN_MONT_CTX,
    ) -> c_int;

    pub fn OSSL_PARAM_BLD_new() -> *mut OSSL_PARAM_BLD;
    pub fn OSSL_PARAM_BLD_free(bld: *mut OSSL_PARAM_BLD);
    pub fn OSSL_PARAM_BLD_push_BN(
        bld: *mut OSSL_PARAM_BLD,
        key: *const c_char,
        bn: *const BIGNUM,
    ) -> c_int;
    pub fn OSSL_PARAM_BLD_push_utf8_string(
        bld: *mut OSSL_PARAM_BLD,
        key: *const c_char,
        buf: *const c_char,
        bsize: usize,
    ) -> c_int;
    pub fn OSSL_PARAM_BLD_push_octet_string(
        bld: *mut OSSL_PARAM_BLD,
        key: *const c_char,
        buf: *const c_void,
        bsize: usize,
    ) -> c_int;
    pub fn OSSL_PARAM_BLD_to_param(bld: *mut OSSL_PARAM_BLD) -> *mut OSSL_PARAM;
    pub fn OSSL_PARAM_free(params: *mut OSSL_PARAM);

    pub fn EVP_PKEY_CTX_new_from_name(
        libctx: *mut c_void,
        name: *const c_char,
        propquery: *const c_char,
    ) -> *mut EVP_PKEY_CTX;
    pub fn EVP_PKEY_fromdata_init(ctx: *mut EVP_PKEY_CTX) -> c_int;
    pub fn EVP_PKEY_fromdata(
        ctx: *mut EVP_PKEY_CTX,
        ppkey: *mut *mut EVP_PKEY,
        selection: c_int,
        params: *mut OSSL_PARAM,
    ) -> c_int;
    pub fn EVP_PKEY_check(ctx: *mut EVP_PKEY_CTX) -> c_int;
    pub fn EVP_PKEY_public_check(ctx: *mut EVP_PKEY_CTX) -> c_int;
    pub fn EVP_PKEY_param_check(ctx: *mut EVP_PKEY_CTX) -> c_int;
}
