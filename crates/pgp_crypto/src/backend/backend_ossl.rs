// Copyright (C) Microsoft Corporation. All rights reserved.

use regex::Regex;

use super::UNKNOWN_VERSION;

pub(super) const NAME: &str = "OpenSSL";

// "OpenSSL 3.0.13 30 Jan 2024", "OpenSSL 1.1.1l  24 Aug 2021",
// "OpenSSL 3.2.0-alpha2 ..."
const BANNER_PATTERN: &str =
    r"OpenSSL (([0-9]+\.[0-9]+\.[0-9]+)[a-z]*(-beta[0-9]+)*(-alpha[0-9]+)*(-dev)*) ";

pub(super) fn version() -> String {
    parse_banner(openssl::version::version())
}

fn parse_banner(banner: &str) -> String {
    let re = match Regex::new(BANNER_PATTERN) {
        Ok(re) => re,
        Err(error) => {
            tracing::error!(?error, "failed to compile version pattern");
            return UNKNOWN_VERSION.to_string();
        }
    };
    match re.captures(banner).and_then(|caps| caps.get(1)) {
        Some(version) => version.as_str().to_string(),
        None => {
            tracing::debug!(banner, "unrecognized OpenSSL version banner");
            UNKNOWN_VERSION.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_parse_banner() {
        assert_eq!(parse_banner("OpenSSL 3.0.13 30 Jan 2024"), "3.0.13");
        assert_eq!(parse_banner("OpenSSL 1.1.1l  24 Aug 2021"), "1.1.1l");
        assert_eq!(
            parse_banner("OpenSSL 3.2.0-alpha2 7 Jun 2023"),
            "3.2.0-alpha2"
        );
        assert_eq!(parse_banner("OpenSSL 3.0.0-beta1 17 Jun 2021"), "3.0.0-beta1");
        assert_eq!(parse_banner("OpenSSL 3.4.0-dev "), "3.4.0-dev");
    }

    #[test]
    fn test_parse_banner_unknown() {
        assert_eq!(parse_banner("LibreSSL 3.3.6"), UNKNOWN_VERSION);
        assert_eq!(parse_banner("OpenSSL 3.0"), UNKNOWN_VERSION);
        assert_eq!(parse_banner(""), UNKNOWN_VERSION);
    }

    #[test]
    fn test_version_matches_linked_library() {
        let version = version();
        assert!(openssl::version::version().contains(&version));
    }
}
