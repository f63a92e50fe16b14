//! Mnemonic entry points

use std::os::raw::c_char;
use std::ptr;

use quill_core::{Mnemonic, PrivateKey};

use crate::error::ErrorCode;
use crate::util::cstr_from_ptr;

/// Generate a new 12-word mnemonic.
///
/// The returned handle must be freed with [`quill_mnemonic_free`].
#[no_mangle]
pub extern "C" fn quill_mnemonic_generate_12() -> *mut Mnemonic {
    Box::into_raw(Box::new(Mnemonic::generate_12()))
}

/// Generate a new 24-word mnemonic.
///
/// The returned handle must be freed with [`quill_mnemonic_free`].
#[no_mangle]
pub extern "C" fn quill_mnemonic_generate_24() -> *mut Mnemonic {
    Box::into_raw(Box::new(Mnemonic::generate_24()))
}

/// Parse a mnemonic from a whitespace-separated phrase.
///
/// # Safety
/// - `string` must be a valid nul-terminated C string.
/// - `mnemonic_out` must be non-null and writable.
#[no_mangle]
pub unsafe extern "C" fn quill_mnemonic_from_string(
    string: *const c_char,
    mnemonic_out: *mut *mut Mnemonic,
) -> ErrorCode {
    assert!(!mnemonic_out.is_null());

    let string = unsafe { cstr_from_ptr(string) };

    let mnemonic = ffi_try!(string.parse::<Mnemonic>());

    unsafe { ptr::write(mnemonic_out, Box::into_raw(Box::new(mnemonic))) };

    ErrorCode::Ok
}

/// Format the phrase as a single space-separated string.
///
/// The string must be freed with [`quill_string_free`](crate::quill_string_free).
///
/// # Safety
/// - `mnemonic` must be a valid handle.
#[no_mangle]
pub unsafe extern "C" fn quill_mnemonic_to_string(mnemonic: *mut Mnemonic) -> *mut c_char {
    assert!(!mnemonic.is_null());

    let mnemonic = unsafe { &*mnemonic };

    std::ffi::CString::new(mnemonic.to_string())
        .expect("word lists contain no interior nul")
        .into_raw()
}

/// Whether the phrase was parsed under the legacy scheme.
///
/// # Safety
/// - `mnemonic` must be a valid handle.
#[no_mangle]
pub unsafe extern "C" fn quill_mnemonic_is_legacy(mnemonic: *mut Mnemonic) -> bool {
    assert!(!mnemonic.is_null());

    unsafe { &*mnemonic }.is_legacy()
}

/// Recover a private key from the phrase.
///
/// # Safety
/// - `mnemonic` must be a valid handle.
/// - `passphrase` must be a valid nul-terminated C string (empty for
///   none).
/// - `key_out` must be non-null and writable.
#[no_mangle]
pub unsafe extern "C" fn quill_mnemonic_to_private_key(
    mnemonic: *mut Mnemonic,
    passphrase: *const c_char,
    key_out: *mut *mut PrivateKey,
) -> ErrorCode {
    assert!(!mnemonic.is_null());
    assert!(!key_out.is_null());

    let mnemonic = unsafe { &*mnemonic };
    let passphrase = unsafe { cstr_from_ptr(passphrase) };

    let key = ffi_try!(mnemonic.to_private_key(&passphrase));

    unsafe { ptr::write(key_out, Box::into_raw(Box::new(key))) };

    ErrorCode::Ok
}

/// Recover a private key under the legacy scheme.
///
/// # Safety
/// - `mnemonic` must be a valid handle.
/// - `key_out` must be non-null and writable.
#[no_mangle]
pub unsafe extern "C" fn quill_mnemonic_to_legacy_private_key(
    mnemonic: *mut Mnemonic,
    key_out: *mut *mut PrivateKey,
) -> ErrorCode {
    assert!(!mnemonic.is_null());
    assert!(!key_out.is_null());

    let mnemonic = unsafe { &*mnemonic };

    let key = ffi_try!(mnemonic.to_legacy_private_key());

    unsafe { ptr::write(key_out, Box::into_raw(Box::new(key))) };

    ErrorCode::Ok
}

/// Release a mnemonic handle.
///
/// # Safety
/// - `mnemonic` must be a valid handle and must not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn quill_mnemonic_free(mnemonic: *mut Mnemonic) {
    if mnemonic.is_null() {
        return;
    }

    // safety: per the contract, `mnemonic` came from `Box::into_raw`.
    drop(unsafe { Box::from_raw(mnemonic) });
}
