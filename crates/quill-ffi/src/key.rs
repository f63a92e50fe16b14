//! Private and public key entry points
//!
//! Keys are opaque handles. Every constructor output must eventually be
//! returned through the matching `_free`; passing a handle to a function
//! documented as taking ownership transfers that responsibility.

use std::os::raw::c_char;
use std::ptr;

use libc::size_t;
use quill_core::{PrivateKey, PublicKey};

use crate::error::ErrorCode;
use crate::util::{cstr_from_ptr, make_bytes, slice_from_buffer};

/// Generate a new Ed25519 private key with a fresh chain code.
///
/// The returned handle must be freed with [`quill_private_key_free`].
#[no_mangle]
pub extern "C" fn quill_private_key_generate_ed25519() -> *mut PrivateKey {
    Box::into_raw(Box::new(PrivateKey::generate_ed25519()))
}

/// Generate a new ECDSA(secp256k1) private key.
///
/// The returned handle must be freed with [`quill_private_key_free`].
#[no_mangle]
pub extern "C" fn quill_private_key_generate_ecdsa() -> *mut PrivateKey {
    Box::into_raw(Box::new(PrivateKey::generate_ecdsa()))
}

/// Parse a private key from bytes (raw Ed25519 seed or DER).
///
/// On success writes a handle to `key_out`; it must be freed with
/// [`quill_private_key_free`].
///
/// # Safety
/// - `bytes` must be valid for reads of `bytes_size`.
/// - `key_out` must be non-null and writable.
#[no_mangle]
pub unsafe extern "C" fn quill_private_key_from_bytes(
    bytes: *const u8,
    bytes_size: size_t,
    key_out: *mut *mut PrivateKey,
) -> ErrorCode {
    assert!(!key_out.is_null());

    let bytes = unsafe { slice_from_buffer(bytes, bytes_size) };

    let key = ffi_try!(PrivateKey::from_bytes(bytes));

    unsafe { ptr::write(key_out, Box::into_raw(Box::new(key))) };

    ErrorCode::Ok
}

/// Parse a private key from a hex string (raw or DER form, optional
/// `0x` prefix).
///
/// # Safety
/// - `string` must be a valid nul-terminated C string.
/// - `key_out` must be non-null and writable.
#[no_mangle]
pub unsafe extern "C" fn quill_private_key_from_string(
    string: *const c_char,
    key_out: *mut *mut PrivateKey,
) -> ErrorCode {
    assert!(!key_out.is_null());

    let string = unsafe { cstr_from_ptr(string) };

    let key = ffi_try!(string.parse::<PrivateKey>());

    unsafe { ptr::write(key_out, Box::into_raw(Box::new(key))) };

    ErrorCode::Ok
}

/// Parse a private key from PEM text; `password` may be null for
/// unencrypted PEM and is required for `ENCRYPTED PRIVATE KEY` input.
///
/// # Safety
/// - `pem` must be a valid nul-terminated C string, `password` null or
///   likewise valid.
/// - `key_out` must be non-null and writable.
#[no_mangle]
pub unsafe extern "C" fn quill_private_key_from_pem(
    pem: *const c_char,
    password: *const c_char,
    key_out: *mut *mut PrivateKey,
) -> ErrorCode {
    assert!(!key_out.is_null());

    let pem = unsafe { cstr_from_ptr(pem) };

    let key = if password.is_null() {
        ffi_try!(PrivateKey::from_pem(&pem))
    } else {
        let password = unsafe { cstr_from_ptr(password) };
        ffi_try!(PrivateKey::from_pem_with_password(&pem, password.as_bytes()))
    };

    unsafe { ptr::write(key_out, Box::into_raw(Box::new(key))) };

    ErrorCode::Ok
}

/// Serialize a private key as PKCS#8 DER; returns the buffer length.
///
/// The buffer must be freed with [`quill_bytes_free`](crate::quill_bytes_free).
///
/// # Safety
/// - `key` must be a valid handle.
/// - `buf` must be non-null and writable.
#[no_mangle]
pub unsafe extern "C" fn quill_private_key_to_bytes_der(
    key: *mut PrivateKey,
    buf: *mut *mut u8,
) -> size_t {
    assert!(!key.is_null());
    assert!(!buf.is_null());

    let key = unsafe { &*key };

    unsafe { make_bytes(key.to_bytes_der(), buf) }
}

/// Serialize a private key's raw 32-byte scalar; returns the length.
///
/// # Safety
/// - same contract as [`quill_private_key_to_bytes_der`].
#[no_mangle]
pub unsafe extern "C" fn quill_private_key_to_bytes_raw(
    key: *mut PrivateKey,
    buf: *mut *mut u8,
) -> size_t {
    assert!(!key.is_null());
    assert!(!buf.is_null());

    let key = unsafe { &*key };

    unsafe { make_bytes(key.to_bytes_raw(), buf) }
}

/// Format a private key as a DER hex string.
///
/// The string must be freed with [`quill_string_free`](crate::quill_string_free).
///
/// # Safety
/// - `key` must be a valid handle.
#[no_mangle]
pub unsafe extern "C" fn quill_private_key_to_string(key: *mut PrivateKey) -> *mut c_char {
    assert!(!key.is_null());

    let key = unsafe { &*key };

    std::ffi::CString::new(key.to_string())
        .expect("hex contains no interior nul")
        .into_raw()
}

/// The public key paired with this private key.
///
/// The returned handle must be freed with [`quill_public_key_free`].
///
/// # Safety
/// - `key` must be a valid handle.
#[no_mangle]
pub unsafe extern "C" fn quill_private_key_get_public_key(key: *mut PrivateKey) -> *mut PublicKey {
    assert!(!key.is_null());

    let key = unsafe { &*key };

    Box::into_raw(Box::new(key.public_key()))
}

/// Whether the key is Ed25519.
///
/// # Safety
/// - `key` must be a valid handle.
#[no_mangle]
pub unsafe extern "C" fn quill_private_key_is_ed25519(key: *mut PrivateKey) -> bool {
    assert!(!key.is_null());

    unsafe { &*key }.is_ed25519()
}

/// Whether the key is ECDSA(secp256k1).
///
/// # Safety
/// - `key` must be a valid handle.
#[no_mangle]
pub unsafe extern "C" fn quill_private_key_is_ecdsa(key: *mut PrivateKey) -> bool {
    assert!(!key.is_null());

    unsafe { &*key }.is_ecdsa()
}

/// Whether the key supports hierarchical derivation.
///
/// # Safety
/// - `key` must be a valid handle.
#[no_mangle]
pub unsafe extern "C" fn quill_private_key_is_derivable(key: *mut PrivateKey) -> bool {
    assert!(!key.is_null());

    unsafe { &*key }.is_derivable()
}

/// Sign `message`; writes the signature and returns its length.
///
/// The signature must be freed with [`quill_bytes_free`](crate::quill_bytes_free).
///
/// # Safety
/// - `key` must be a valid handle.
/// - `message` must be valid for reads of `message_size`.
/// - `buf` must be non-null and writable.
#[no_mangle]
pub unsafe extern "C" fn quill_private_key_sign(
    key: *mut PrivateKey,
    message: *const u8,
    message_size: size_t,
    buf: *mut *mut u8,
) -> size_t {
    assert!(!key.is_null());
    assert!(!buf.is_null());

    let key = unsafe { &*key };
    let message = unsafe { slice_from_buffer(message, message_size) };

    unsafe { make_bytes(key.sign(message), buf) }
}

/// Derive a hardened child key.
///
/// # Safety
/// - `key` must be a valid handle.
/// - `key_out` must be non-null and writable.
#[no_mangle]
pub unsafe extern "C" fn quill_private_key_derive(
    key: *mut PrivateKey,
    index: i32,
    key_out: *mut *mut PrivateKey,
) -> ErrorCode {
    assert!(!key.is_null());
    assert!(!key_out.is_null());

    let key = unsafe { &*key };

    let child = ffi_try!(key.derive(index));

    unsafe { ptr::write(key_out, Box::into_raw(Box::new(child))) };

    ErrorCode::Ok
}

/// Derive a child key under the legacy scheme.
///
/// # Safety
/// - same contract as [`quill_private_key_derive`].
#[no_mangle]
pub unsafe extern "C" fn quill_private_key_legacy_derive(
    key: *mut PrivateKey,
    index: i64,
    key_out: *mut *mut PrivateKey,
) -> ErrorCode {
    assert!(!key.is_null());
    assert!(!key_out.is_null());

    let key = unsafe { &*key };

    let child = ffi_try!(key.legacy_derive(index));

    unsafe { ptr::write(key_out, Box::into_raw(Box::new(child))) };

    ErrorCode::Ok
}

/// Release a private key handle.
///
/// # Safety
/// - `key` must be a valid handle and must not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn quill_private_key_free(key: *mut PrivateKey) {
    if key.is_null() {
        return;
    }

    // safety: per the contract, `key` came from `Box::into_raw`.
    drop(unsafe { Box::from_raw(key) });
}

/// Parse a public key from bytes (raw point or DER).
///
/// # Safety
/// - `bytes` must be valid for reads of `bytes_size`.
/// - `key_out` must be non-null and writable.
#[no_mangle]
pub unsafe extern "C" fn quill_public_key_from_bytes(
    bytes: *const u8,
    bytes_size: size_t,
    key_out: *mut *mut PublicKey,
) -> ErrorCode {
    assert!(!key_out.is_null());

    let bytes = unsafe { slice_from_buffer(bytes, bytes_size) };

    let key = ffi_try!(PublicKey::from_bytes(bytes));

    unsafe { ptr::write(key_out, Box::into_raw(Box::new(key))) };

    ErrorCode::Ok
}

/// Serialize a public key as DER; returns the buffer length.
///
/// # Safety
/// - `key` must be a valid handle.
/// - `buf` must be non-null and writable.
#[no_mangle]
pub unsafe extern "C" fn quill_public_key_to_bytes_der(
    key: *mut PublicKey,
    buf: *mut *mut u8,
) -> size_t {
    assert!(!key.is_null());
    assert!(!buf.is_null());

    let key = unsafe { &*key };

    unsafe { make_bytes(key.to_bytes_der(), buf) }
}

/// Serialize a public key's raw point encoding; returns the length.
///
/// # Safety
/// - same contract as [`quill_public_key_to_bytes_der`].
#[no_mangle]
pub unsafe extern "C" fn quill_public_key_to_bytes_raw(
    key: *mut PublicKey,
    buf: *mut *mut u8,
) -> size_t {
    assert!(!key.is_null());
    assert!(!buf.is_null());

    let key = unsafe { &*key };

    unsafe { make_bytes(key.to_bytes_raw(), buf) }
}

/// Format a public key as a DER hex string.
///
/// The string must be freed with [`quill_string_free`](crate::quill_string_free).
///
/// # Safety
/// - `key` must be a valid handle.
#[no_mangle]
pub unsafe extern "C" fn quill_public_key_to_string(key: *mut PublicKey) -> *mut c_char {
    assert!(!key.is_null());

    let key = unsafe { &*key };

    std::ffi::CString::new(key.to_string())
        .expect("hex contains no interior nul")
        .into_raw()
}

/// Verify `signature` over `message` with this key.
///
/// Returns [`ErrorCode::SignatureVerify`] for wrong or malformed
/// signatures; this is an ordinary failure, not a crash.
///
/// # Safety
/// - `key` must be a valid handle.
/// - `message` and `signature` must be valid for reads of their sizes.
#[no_mangle]
pub unsafe extern "C" fn quill_public_key_verify(
    key: *mut PublicKey,
    message: *const u8,
    message_size: size_t,
    signature: *const u8,
    signature_size: size_t,
) -> ErrorCode {
    assert!(!key.is_null());

    let key = unsafe { &*key };
    let message = unsafe { slice_from_buffer(message, message_size) };
    let signature = unsafe { slice_from_buffer(signature, signature_size) };

    ffi_try!(key.verify(message, signature));

    ErrorCode::Ok
}

/// The 20-byte EVM address for an ECDSA public key.
///
/// Returns the address length (20) after writing the buffer, or 0 for
/// Ed25519 keys, for which the address form is not applicable — 0 is not
/// an error and the last-error slot is untouched.
///
/// # Safety
/// - `key` must be a valid handle.
/// - `buf` must be non-null and writable.
#[no_mangle]
pub unsafe extern "C" fn quill_public_key_to_evm_address(
    key: *mut PublicKey,
    buf: *mut *mut u8,
) -> size_t {
    assert!(!key.is_null());
    assert!(!buf.is_null());

    let key = unsafe { &*key };

    match key.to_evm_address() {
        Some(address) => unsafe { make_bytes(address.to_bytes(), buf) },
        None => 0,
    }
}

/// Release a public key handle.
///
/// # Safety
/// - `key` must be a valid handle and must not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn quill_public_key_free(key: *mut PublicKey) {
    if key.is_null() {
        return;
    }

    // safety: per the contract, `key` came from `Box::into_raw`.
    drop(unsafe { Box::from_raw(key) });
}
