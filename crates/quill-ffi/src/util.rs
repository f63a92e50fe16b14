//! Buffer and string marshaling helpers
//!
//! Every byte buffer or string handed across the boundary is owned by
//! this library until the caller releases it through the paired free
//! function. Callers must never apply a generic `free`, and must never
//! use a value after releasing it.

use std::borrow::Cow;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::{ptr, slice};

/// Hand a byte buffer to the caller, transferring ownership until it is
/// returned via [`quill_bytes_free`].
///
/// # Safety
/// - `buf` must be non-null and writable.
pub(crate) unsafe fn make_bytes<T>(bytes: T, buf: *mut *mut u8) -> libc::size_t
where
    T: Into<Box<[u8]>>,
{
    let bytes = Box::leak(bytes.into());
    let len = bytes.len();

    // safety: the caller promises `buf` is valid for writes.
    unsafe {
        ptr::write(buf, bytes.as_mut_ptr());
    }

    len
}

/// Like `slice::from_raw_parts`, but a null `buf` with zero `buf_size`
/// is an empty slice rather than undefined behavior.
///
/// # Safety
/// - see [`slice::from_raw_parts`]; the non-null requirement is relaxed
///   only for the zero-length case.
pub(crate) unsafe fn slice_from_buffer<'a>(buf: *const u8, buf_size: usize) -> &'a [u8] {
    match (buf.is_null(), buf_size) {
        (true, 0) => &[],
        (true, _) => panic!("fatal error: null buffer with non-zero size"),
        (false, _) => unsafe { slice::from_raw_parts(buf, buf_size) },
    }
}

/// Borrow a C string as UTF-8 text.
///
/// # Safety
/// - `ptr` must be a valid nul-terminated C string.
pub(crate) unsafe fn cstr_from_ptr<'a>(ptr: *const c_char) -> Cow<'a, str> {
    assert!(!ptr.is_null());

    // safety: the caller promises a valid nul-terminated string.
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy()
}

/// Release a byte buffer produced by this library.
///
/// # Safety
/// - `buf` must have been returned through an out-parameter of this
///   library with the matching `size`, and must not be used afterwards.
/// - a null `buf` with zero `size` is a no-op.
#[no_mangle]
pub unsafe extern "C" fn quill_bytes_free(buf: *mut u8, size: libc::size_t) {
    if buf.is_null() {
        assert_eq!(size, 0, "fatal error: null buffer with non-zero size");
        return;
    }

    // safety: per the contract, `buf`/`size` came from `make_bytes`.
    drop(unsafe { Box::from_raw(slice::from_raw_parts_mut(buf, size)) });
}

/// Release a string produced by this library.
///
/// # Safety
/// - `string` must have been returned by a function of this library and
///   must not be used afterwards. Null is a no-op.
#[no_mangle]
pub unsafe extern "C" fn quill_string_free(string: *mut c_char) {
    if string.is_null() {
        return;
    }

    // safety: per the contract, `string` came from `CString::into_raw`.
    drop(unsafe { CString::from_raw(string) });
}
