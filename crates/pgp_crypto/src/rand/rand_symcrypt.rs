// Copyright (C) Microsoft Corporation. All rights reserved.

use super::*;

impl RngOp for Rng {
    fn rand_bytes(&self, buf: &mut [u8]) -> Result<(), CryptoError> {
        symcrypt::symcrypt_random(buf);
        Ok(())
    }
}
