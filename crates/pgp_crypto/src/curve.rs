// Copyright (C) Microsoft Corporation. All rights reserved.

//! Elliptic curves usable for OpenPGP ECDSA keys.

use std::ffi::CStr;

use super::*;

/// Elliptic curve identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcCurve {
    /// NIST P-256
    NistP256,

    /// NIST P-384
    NistP384,

    /// NIST P-521
    NistP521,

    /// SECG secp256k1
    Secp256k1,

    /// Brainpool P-256 r1
    BrainpoolP256r1,

    /// Brainpool P-384 r1
    BrainpoolP384r1,

    /// Brainpool P-512 r1
    BrainpoolP512r1,
}

struct CurveDesc {
    curve: EcCurve,
    oid: &'static [u8],
    bits: usize,
    native_name: &'static CStr,
    name: &'static str,
}

static CURVES: [CurveDesc; 7] = [
    CurveDesc {
        curve: EcCurve::NistP256,
        oid: &[0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07],
        bits: 256,
        native_name: c"prime256v1",
        name: "NIST P-256",
    },
    CurveDesc {
        curve: EcCurve::NistP384,
        oid: &[0x2b, 0x81, 0x04, 0x00, 0x22],
        bits: 384,
        native_name: c"secp384r1",
        name: "NIST P-384",
    },
    CurveDesc {
        curve: EcCurve::NistP521,
        oid: &[0x2b, 0x81, 0x04, 0x00, 0x23],
        bits: 521,
        native_name: c"secp521r1",
        name: "NIST P-521",
    },
    CurveDesc {
        curve: EcCurve::Secp256k1,
        oid: &[0x2b, 0x81, 0x04, 0x00, 0x0a],
        bits: 256,
        native_name: c"secp256k1",
        name: "secp256k1",
    },
    CurveDesc {
        curve: EcCurve::BrainpoolP256r1,
        oid: &[0x2b, 0x24, 0x03, 0x03, 0x02, 0x08, 0x01, 0x01, 0x07],
        bits: 256,
        native_name: c"brainpoolP256r1",
        name: "brainpoolP256r1",
    },
    CurveDesc {
        curve: EcCurve::BrainpoolP384r1,
        oid: &[0x2b, 0x24, 0x03, 0x03, 0x02, 0x08, 0x01, 0x01, 0x0b],
        bits: 384,
        native_name: c"brainpoolP384r1",
        name: "brainpoolP384r1",
    },
    CurveDesc {
        curve: EcCurve::BrainpoolP512r1,
        oid: &[0x2b, 0x24, 0x03, 0x03, 0x02, 0x08, 0x01, 0x01, 0x0d],
        bits: 512,
        native_name: c"brainpoolP512r1",
        name: "brainpoolP512r1",
    },
];

impl EcCurve {
    /// Every curve in the table.
    pub const ALL: [EcCurve; 7] = [
        EcCurve::NistP256,
        EcCurve::NistP384,
        EcCurve::NistP521,
        EcCurve::Secp256k1,
        EcCurve::BrainpoolP256r1,
        EcCurve::BrainpoolP384r1,
        EcCurve::BrainpoolP512r1,
    ];

    fn desc(self) -> &'static CurveDesc {
        match self {
            EcCurve::NistP256 => &CURVES[0],
            EcCurve::NistP384 => &CURVES[1],
            EcCurve::NistP521 => &CURVES[2],
            EcCurve::Secp256k1 => &CURVES[3],
            EcCurve::BrainpoolP256r1 => &CURVES[4],
            EcCurve::BrainpoolP384r1 => &CURVES[5],
            EcCurve::BrainpoolP512r1 => &CURVES[6],
        }
    }

    /// Looks up a curve by the OID bytes carried in an OpenPGP key packet.
    ///
    /// # Returns
    ///
    /// * `Result<EcCurve, CryptoError>` - The curve, or
    ///   `CryptoError::BadParameters` for an unknown OID.
    pub fn from_oid(oid: &[u8]) -> Result<Self, CryptoError> {
        CURVES
            .iter()
            .find(|desc| desc.oid == oid)
            .map(|desc| desc.curve)
            .ok_or_else(|| {
                tracing::debug!(?oid, "unknown curve OID");
                CryptoError::BadParameters
            })
    }

    /// OID bytes (without the DER tag and length).
    pub fn oid(self) -> &'static [u8] {
        self.desc().oid
    }

    /// Field size in bits.
    pub fn bits(self) -> usize {
        self.desc().bits
    }

    /// Field size in bytes.
    pub fn bytes(self) -> usize {
        self.bits().div_ceil(8)
    }

    /// Length of an uncompressed `04 || x || y` public point.
    pub fn point_len(self) -> usize {
        1 + 2 * self.bytes()
    }

    /// Group name understood by the native provider.
    pub fn native_name(self) -> &'static CStr {
        self.desc().native_name
    }

    /// Human-readable name as used by OpenPGP tooling.
    pub fn name(self) -> &'static str {
        self.desc().name
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_curve_oid_lookup() {
        for curve in EcCurve::ALL {
            assert_eq!(EcCurve::from_oid(curve.oid()).unwrap(), curve);
        }
        assert_eq!(
            EcCurve::from_oid(&[0x2b, 0x06, 0x01]),
            Err(CryptoError::BadParameters)
        );
    }

    #[test]
    fn test_curve_sizes() {
        assert_eq!(EcCurve::NistP256.point_len(), 65);
        assert_eq!(EcCurve::NistP521.bytes(), 66);
        assert_eq!(EcCurve::NistP521.point_len(), 133);
        assert_eq!(EcCurve::BrainpoolP512r1.bytes(), 64);
        assert_eq!(EcCurve::NistP256.native_name(), c"prime256v1");
        assert_eq!(EcCurve::NistP384.name(), "NIST P-384");
    }
}
