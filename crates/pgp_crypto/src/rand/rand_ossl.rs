// Copyright (C) Microsoft Corporation. All rights reserved.

use super::*;

impl RngOp for Rng {
    fn rand_bytes(&self, buf: &mut [u8]) -> Result<(), CryptoError> {
        openssl::rand::rand_bytes(buf).map_err(|openssl_error_stack| {
            tracing::error!(?openssl_error_stack);
            CryptoError::RngError
        })
    }
}
