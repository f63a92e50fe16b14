//! Digest and KDF passthroughs

use libc::size_t;

use crate::util::{make_bytes, slice_from_buffer};

/// SHA-2 with a 256-bit output.
///
/// Writes the digest to `result_out` and returns its length. The digest
/// must be freed with [`quill_bytes_free`](crate::quill_bytes_free).
///
/// # Safety
/// - `bytes` must be valid for reads of `bytes_size`.
/// - `result_out` must be non-null and writable.
#[no_mangle]
pub unsafe extern "C" fn quill_crypto_sha2_256_digest(
    bytes: *const u8,
    bytes_size: size_t,
    result_out: *mut *mut u8,
) -> size_t {
    assert!(!result_out.is_null());

    let bytes = unsafe { slice_from_buffer(bytes, bytes_size) };
    let digest = quill_core::crypto::sha256(bytes);

    unsafe { make_bytes(digest.to_vec(), result_out) }
}

/// SHA-2 with a 384-bit output.
///
/// # Safety
/// - same contract as [`quill_crypto_sha2_256_digest`].
#[no_mangle]
pub unsafe extern "C" fn quill_crypto_sha2_384_digest(
    bytes: *const u8,
    bytes_size: size_t,
    result_out: *mut *mut u8,
) -> size_t {
    assert!(!result_out.is_null());

    let bytes = unsafe { slice_from_buffer(bytes, bytes_size) };
    let digest = quill_core::crypto::sha384(bytes);

    unsafe { make_bytes(digest.to_vec(), result_out) }
}

/// Keccak-256.
///
/// # Safety
/// - same contract as [`quill_crypto_sha2_256_digest`].
#[no_mangle]
pub unsafe extern "C" fn quill_crypto_keccak256_digest(
    bytes: *const u8,
    bytes_size: size_t,
    result_out: *mut *mut u8,
) -> size_t {
    assert!(!result_out.is_null());

    let bytes = unsafe { slice_from_buffer(bytes, bytes_size) };
    let digest = quill_core::crypto::keccak256(bytes);

    unsafe { make_bytes(digest.to_vec(), result_out) }
}

/// HMAC variant selector for [`quill_crypto_pbkdf2`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub enum Pbkdf2Variant {
    HmacSha256 = 0,
    HmacSha384,
    HmacSha512,
}

impl From<Pbkdf2Variant> for quill_core::crypto::Pbkdf2Variant {
    fn from(variant: Pbkdf2Variant) -> Self {
        match variant {
            Pbkdf2Variant::HmacSha256 => Self::HmacSha256,
            Pbkdf2Variant::HmacSha384 => Self::HmacSha384,
            Pbkdf2Variant::HmacSha512 => Self::HmacSha512,
        }
    }
}

/// PBKDF2 with the selected HMAC variant.
///
/// Writes exactly `key_length` derived bytes to `result_out` and returns
/// `key_length`. The buffer must be freed with
/// [`quill_bytes_free`](crate::quill_bytes_free).
///
/// # Safety
/// - `password` must be valid for reads of `password_size`, `salt` for
///   `salt_size`.
/// - `result_out` must be non-null and writable.
#[no_mangle]
pub unsafe extern "C" fn quill_crypto_pbkdf2(
    variant: Pbkdf2Variant,
    password: *const u8,
    password_size: size_t,
    salt: *const u8,
    salt_size: size_t,
    rounds: u32,
    key_length: size_t,
    result_out: *mut *mut u8,
) -> size_t {
    assert!(!result_out.is_null());

    let password = unsafe { slice_from_buffer(password, password_size) };
    let salt = unsafe { slice_from_buffer(salt, salt_size) };

    let key = quill_core::crypto::pbkdf2(variant.into(), password, salt, rounds, key_length);

    unsafe { make_bytes(key, result_out) }
}
