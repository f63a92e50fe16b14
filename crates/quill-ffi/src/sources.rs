//! Transaction-sources entry points

use std::ptr;

use libc::size_t;
use quill_core::{PublicKey, Signer, TransactionSources};

use crate::error::ErrorCode;
use crate::util::{make_bytes, slice_from_buffer};

/// Borrow an array of signer handles.
///
/// # Safety
/// - `signers` must point to `signers_size` valid signer handles (null is
///   allowed when the size is zero).
unsafe fn signers_from_buffer(
    signers: *const *mut Signer,
    signers_size: size_t,
) -> Vec<Signer> {
    if signers.is_null() {
        assert_eq!(signers_size, 0, "fatal error: null signer array with non-zero size");
        return Vec::new();
    }

    let handles = unsafe { std::slice::from_raw_parts(signers, signers_size) };

    handles
        .iter()
        .map(|&signer| {
            assert!(!signer.is_null());
            // safety: each element is a valid signer handle; cloning
            // shares the underlying capability without consuming it.
            unsafe { &*signer }.clone()
        })
        .collect()
}

/// Build sources from an unsigned payload and sign with `signers` in
/// order. The signer handles stay owned by the caller.
///
/// On success writes a handle to `sources_out`; it must be freed with
/// [`quill_sources_free`].
///
/// # Safety
/// - `payload` must be valid for reads of `payload_size`.
/// - `signers` must point to `signers_size` valid signer handles.
/// - `sources_out` must be non-null and writable.
#[no_mangle]
pub unsafe extern "C" fn quill_sources_from_bytes(
    payload: *const u8,
    payload_size: size_t,
    signers: *const *mut Signer,
    signers_size: size_t,
    sources_out: *mut *mut TransactionSources,
) -> ErrorCode {
    assert!(!sources_out.is_null());

    let payload = unsafe { slice_from_buffer(payload, payload_size) };
    let signers = unsafe { signers_from_buffer(signers, signers_size) };

    let sources = ffi_try!(TransactionSources::from_bytes(payload, &signers));

    unsafe { ptr::write(sources_out, Box::into_raw(Box::new(sources))) };

    ErrorCode::Ok
}

/// Re-hydrate sources previously serialized with
/// [`quill_sources_to_bytes`].
///
/// # Safety
/// - `bytes` must be valid for reads of `bytes_size`.
/// - `sources_out` must be non-null and writable.
#[no_mangle]
pub unsafe extern "C" fn quill_sources_from_signed_bytes(
    bytes: *const u8,
    bytes_size: size_t,
    sources_out: *mut *mut TransactionSources,
) -> ErrorCode {
    assert!(!sources_out.is_null());

    let bytes = unsafe { slice_from_buffer(bytes, bytes_size) };

    let sources = ffi_try!(TransactionSources::from_signed_bytes(bytes));

    unsafe { ptr::write(sources_out, Box::into_raw(Box::new(sources))) };

    ErrorCode::Ok
}

/// Sign with each signer and write a new sources handle; the input
/// handle is untouched and both must eventually be freed.
///
/// On failure no handle is written; the partially-signed progress is
/// reported through the last-error channel.
///
/// # Safety
/// - `sources` must be a valid handle.
/// - `signers` must point to `signers_size` valid signer handles.
/// - `sources_out` must be non-null and writable.
#[no_mangle]
pub unsafe extern "C" fn quill_sources_sign(
    sources: *mut TransactionSources,
    signers: *const *mut Signer,
    signers_size: size_t,
    sources_out: *mut *mut TransactionSources,
) -> ErrorCode {
    assert!(!sources.is_null());
    assert!(!sources_out.is_null());

    let sources = unsafe { &*sources };
    let signers = unsafe { signers_from_buffer(signers, signers_size) };

    let signed = ffi_try!(sources.sign_with(&signers));

    unsafe { ptr::write(sources_out, Box::into_raw(Box::new(signed))) };

    ErrorCode::Ok
}

/// Sign with exactly one signer; same contract as [`quill_sources_sign`].
///
/// # Safety
/// - `sources` and `signer` must be valid handles.
/// - `sources_out` must be non-null and writable.
#[no_mangle]
pub unsafe extern "C" fn quill_sources_sign_single(
    sources: *mut TransactionSources,
    signer: *mut Signer,
    sources_out: *mut *mut TransactionSources,
) -> ErrorCode {
    assert!(!sources.is_null());
    assert!(!signer.is_null());
    assert!(!sources_out.is_null());

    let sources = unsafe { &*sources };
    let signer = unsafe { &*signer };

    let signed = ffi_try!(sources.sign_single(signer));

    unsafe { ptr::write(sources_out, Box::into_raw(Box::new(signed))) };

    ErrorCode::Ok
}

/// Serialize payload plus signatures into the final wire bytes; returns
/// the buffer length.
///
/// The buffer must be freed with [`quill_bytes_free`](crate::quill_bytes_free).
///
/// # Safety
/// - `sources` must be a valid handle.
/// - `buf` must be non-null and writable.
#[no_mangle]
pub unsafe extern "C" fn quill_sources_to_bytes(
    sources: *mut TransactionSources,
    buf: *mut *mut u8,
) -> size_t {
    assert!(!sources.is_null());
    assert!(!buf.is_null());

    let sources = unsafe { &*sources };

    unsafe { make_bytes(sources.to_bytes(), buf) }
}

/// Check that a signature attributed to `public_key` exists and verifies
/// against the canonical signing bytes.
///
/// # Safety
/// - `sources` and `public_key` must be valid handles.
#[no_mangle]
pub unsafe extern "C" fn quill_sources_verify(
    sources: *mut TransactionSources,
    public_key: *mut PublicKey,
) -> ErrorCode {
    assert!(!sources.is_null());
    assert!(!public_key.is_null());

    let sources = unsafe { &*sources };
    let public_key = unsafe { &*public_key };

    ffi_try!(sources.verify(public_key));

    ErrorCode::Ok
}

/// Release a sources handle.
///
/// # Safety
/// - `sources` must be a valid handle and must not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn quill_sources_free(sources: *mut TransactionSources) {
    if sources.is_null() {
        return;
    }

    // safety: per the contract, `sources` came from `Box::into_raw`.
    drop(unsafe { Box::from_raw(sources) });
}

#[cfg(test)]
mod tests {
    use quill_core::{PrivateKey, Signer, TransactionSources};

    use super::{
        quill_sources_free, quill_sources_from_bytes, quill_sources_sign_single,
        quill_sources_to_bytes, quill_sources_verify,
    };
    use crate::error::ErrorCode;
    use crate::util::quill_bytes_free;

    #[test]
    fn test_sign_and_finalize_through_the_boundary() {
        let payload = b"payload";

        let mut sources: *mut TransactionSources = std::ptr::null_mut();
        let code = unsafe {
            quill_sources_from_bytes(
                payload.as_ptr(),
                payload.len(),
                std::ptr::null(),
                0,
                &mut sources,
            )
        };
        assert_eq!(code, ErrorCode::Ok);

        let key = PrivateKey::generate_ed25519();
        let signer = Box::into_raw(Box::new(Signer::private_key(key.clone())));

        let mut signed: *mut TransactionSources = std::ptr::null_mut();
        let code = unsafe { quill_sources_sign_single(sources, signer, &mut signed) };
        assert_eq!(code, ErrorCode::Ok);

        let public_key = Box::into_raw(Box::new(key.public_key()));
        let code = unsafe { quill_sources_verify(signed, public_key) };
        assert_eq!(code, ErrorCode::Ok);

        let mut buf = std::ptr::null_mut();
        let size = unsafe { quill_sources_to_bytes(signed, &mut buf) };
        assert!(size > payload.len());
        unsafe { quill_bytes_free(buf, size) };

        drop(unsafe { Box::from_raw(signer) });
        drop(unsafe { Box::from_raw(public_key) });
        unsafe { quill_sources_free(sources) };
        unsafe { quill_sources_free(signed) };
    }

    #[test]
    fn test_empty_payload_reports_request_parse() {
        let mut sources: *mut TransactionSources = std::ptr::null_mut();

        let code = unsafe {
            quill_sources_from_bytes(std::ptr::null(), 0, std::ptr::null(), 0, &mut sources)
        };

        assert_eq!(code, ErrorCode::RequestParse);
        assert!(sources.is_null());
    }
}
