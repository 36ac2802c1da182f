// Copyright (C) Microsoft Corporation. All rights reserved.

//! DER form of `(r, s)` signatures.
//!
//! OpenPGP carries ECDSA and DSA signatures as two MPIs while providers
//! exchange them as `SEQUENCE { INTEGER r, INTEGER s }`.

use super::*;

#[derive(asn1::Asn1Read, asn1::Asn1Write)]
struct DerSignature<'a> {
    r: asn1::BigInt<'a>,
    s: asn1::BigInt<'a>,
}

/// Encodes `(r, s)` as a DER sequence of two positive integers.
pub(crate) fn encode_rs(r: &Mpi, s: &Mpi) -> Result<Vec<u8>, CryptoError> {
    let r_enc = asn1_uint(r);
    let s_enc = asn1_uint(s);
    let sig = DerSignature {
        r: asn1::BigInt::new(&r_enc).ok_or(CryptoError::Generic)?,
        s: asn1::BigInt::new(&s_enc).ok_or(CryptoError::Generic)?,
    };
    asn1::write_single(&sig).map_err(|error| {
        tracing::error!(?error, "failed to encode DER signature");
        CryptoError::Generic
    })
}

/// Decodes a DER sequence of two integers into `(r, s)`.
///
/// Both components are converted before anything is returned, so a failure
/// never yields half a signature.
pub(crate) fn decode_rs(der: &[u8]) -> Result<(Mpi, Mpi), CryptoError> {
    let sig = asn1::parse_single::<DerSignature<'_>>(der).map_err(|error| {
        tracing::error!(?error, "failed to parse DER signature");
        CryptoError::Generic
    })?;
    let r = mpi_from_asn1(&sig.r)?;
    let s = mpi_from_asn1(&sig.s)?;
    Ok((r, s))
}

// Minimal two's complement form of a non-negative value.
fn asn1_uint(mpi: &Mpi) -> Vec<u8> {
    let value = mpi.value();
    match value.first() {
        None => vec![0x00],
        Some(&top) if top & 0x80 != 0 => {
            let mut v = Vec::with_capacity(value.len() + 1);
            v.push(0x00);
            v.extend_from_slice(value);
            v
        }
        Some(_) => value.to_vec(),
    }
}

fn mpi_from_asn1(int: &asn1::BigInt<'_>) -> Result<Mpi, CryptoError> {
    let bytes = int.as_bytes();
    if bytes.first().is_some_and(|&b| b & 0x80 != 0) {
        tracing::error!("negative integer in DER signature");
        return Err(CryptoError::Generic);
    }
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    Mpi::from_bytes(&bytes[start..])
}
