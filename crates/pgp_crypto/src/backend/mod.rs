// Copyright (C) Microsoft Corporation. All rights reserved.

//! Identity of the linked cryptography provider.

cfg_if::cfg_if! {
    if #[cfg(feature = "use-openssl")] {
        mod backend_ossl;
        use backend_ossl as imp;
    } else if #[cfg(feature = "use-symcrypt")] {
        mod backend_symcrypt;
        use backend_symcrypt as imp;
    }
}

use std::sync::LazyLock;

/// Returned when the provider version cannot be determined.
pub const UNKNOWN_VERSION: &str = "unknown";

static BACKEND_VERSION: LazyLock<String> = LazyLock::new(imp::version);

/// Name of the linked provider.
pub fn backend_name() -> &'static str {
    imp::NAME
}

/// Version of the linked provider.
///
/// Computed on first use and cached for the lifetime of the process. Falls
/// back to [`UNKNOWN_VERSION`] when the provider's version cannot be parsed.
pub fn backend_version() -> &'static str {
    BACKEND_VERSION.as_str()
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_backend_version_stable() {
        let first = backend_version();
        assert!(!first.is_empty());
        for _ in 0..4 {
            assert_eq!(backend_version(), first);
        }
        // cached value, same allocation
        assert!(std::ptr::eq(first, backend_version()));
    }

    #[test]
    fn test_backend_version_concurrent_first_use() {
        let versions = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8).map(|_| scope.spawn(backend_version)).collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect::<Vec<_>>()
        });
        assert!(versions.iter().all(|v| *v == versions[0]));
    }

    #[cfg(feature = "use-openssl")]
    #[test]
    fn test_backend_name_openssl() {
        assert_eq!(backend_name(), "OpenSSL");
        assert_ne!(backend_version(), UNKNOWN_VERSION);
    }

    #[cfg(feature = "use-symcrypt")]
    #[test]
    fn test_backend_name_symcrypt() {
        assert_eq!(backend_name(), "SymCrypt");
        assert_ne!(backend_version(), UNKNOWN_VERSION);
    }
}
