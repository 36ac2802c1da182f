// Copyright (C) Microsoft Corporation. All rights reserved.

//! Ownership wrappers for OpenSSL resources.
//!
//! Every native resource used by the OpenSSL algorithm components lives in
//! one of these types and is released exactly once when it goes out of
//! scope, on success and error paths alike.
//!
//! - [`Bn`]: owned, borrowed or empty big number, with MPI conversion
//! - [`RecpCtx`], [`MontCtx`]: modular reciprocal and Montgomery scratch
//! - [`ParamBld`], [`Param`]: named key-parameter assembly
//! - [`pkey_from_params`], [`pkey_check`]: key objects built from parameters
//!
//! Types the `openssl` crate already wraps are used as-is: `BigNum`,
//! `BigNumContext` (general arithmetic scratch), `PKey`, `PkeyCtx` and
//! `MdCtx` (message-digest scratch).

mod bn;
mod ctx;
pub mod ffi;
mod param;
mod pkey;

pub use bn::*;
pub use ctx::*;
use openssl::error::ErrorStack;
pub use param::*;
pub use pkey::*;

use crate::CryptoError;
use crate::Mpi;
use crate::MPI_MAX_BYTES;
