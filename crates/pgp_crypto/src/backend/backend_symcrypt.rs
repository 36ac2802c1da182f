// Copyright (C) Microsoft Corporation. All rights reserved.

pub(super) const NAME: &str = "SymCrypt";

pub(super) fn version() -> String {
    format!(
        "{}.{}.{}",
        symcrypt_sys::SYMCRYPT_CODE_VERSION_API,
        symcrypt_sys::SYMCRYPT_CODE_VERSION_MINOR,
        symcrypt_sys::SYMCRYPT_CODE_VERSION_PATCH
    )
}
