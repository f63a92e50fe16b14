//! Callback-backed signers
//!
//! An external signer is a `{context, sign, release}` triple supplied by
//! the caller: `sign` produces a signature for the paired public key,
//! `release` frees whatever `context` refers to. The release hook runs
//! exactly once — when the last reference to the signer is dropped — on
//! every exit path, including the failure path of a signing operation
//! that used the signer.

use std::os::raw::c_void;

use libc::size_t;
use quill_core::{PrivateKey, PublicKey, Signer};

/// Produce a signature over `message`.
///
/// The callback writes a pointer to the signature and its length to the
/// out-parameters and returns 0 on success, non-zero on failure. The
/// signature memory stays owned by the callback's context and must
/// remain valid until the next invocation (the library copies it out
/// before returning).
pub type SignCallback = unsafe extern "C" fn(
    context: *mut c_void,
    message: *const u8,
    message_size: size_t,
    signature_out: *mut *const u8,
    signature_size_out: *mut size_t,
) -> i32;

/// Release the signer's context. May be null when nothing needs release.
pub type ReleaseCallback = unsafe extern "C" fn(context: *mut c_void);

struct CallbackContext {
    context: *mut c_void,
    sign: SignCallback,
    release: Option<ReleaseCallback>,
}

// The caller promises the context may be used from any thread the core
// signs on, and that the signer is not invoked concurrently with itself.
unsafe impl Send for CallbackContext {}
unsafe impl Sync for CallbackContext {}

impl CallbackContext {
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, String> {
        let mut signature: *const u8 = std::ptr::null();
        let mut signature_size: size_t = 0;

        // safety: the callback contract covers the raw pointers.
        let status = unsafe {
            (self.sign)(
                self.context,
                message.as_ptr(),
                message.len(),
                &mut signature,
                &mut signature_size,
            )
        };

        if status != 0 {
            return Err(format!("external signer reported status {status}"));
        }

        if signature.is_null() {
            return Err("external signer returned no signature".to_owned());
        }

        // copy out before the context may reuse the buffer.
        let signature = unsafe { std::slice::from_raw_parts(signature, signature_size) };

        Ok(signature.to_vec())
    }
}

impl Drop for CallbackContext {
    fn drop(&mut self) {
        if let Some(release) = self.release {
            // safety: the release hook is invoked exactly once, here.
            unsafe { release(self.context) };
        }
    }
}

/// Wrap a private key handle as a signer.
///
/// Takes ownership of `key`; do not free it afterwards. The returned
/// handle must be freed with [`quill_signer_free`].
///
/// # Safety
/// - `key` must be a valid private key handle.
#[no_mangle]
pub unsafe extern "C" fn quill_signer_from_private_key(key: *mut PrivateKey) -> *mut Signer {
    assert!(!key.is_null());

    // safety: ownership of `key` transfers to the signer.
    let key = unsafe { Box::from_raw(key) };

    Box::into_raw(Box::new(Signer::private_key(*key)))
}

/// Wrap caller-supplied callbacks as a signer for `public_key`.
///
/// Copies the public key; the `public_key` handle stays owned by the
/// caller. `release`, when non-null, runs exactly once when the signer
/// is freed.
///
/// # Safety
/// - `public_key` must be a valid public key handle.
/// - `sign` must follow the [`SignCallback`] contract for as long as the
///   signer is alive.
#[no_mangle]
pub unsafe extern "C" fn quill_signer_callback(
    public_key: *mut PublicKey,
    context: *mut c_void,
    sign: SignCallback,
    release: Option<ReleaseCallback>,
) -> *mut Signer {
    assert!(!public_key.is_null());

    let public_key = unsafe { *public_key };

    let callback = CallbackContext { context, sign, release };

    let signer = Signer::arbitrary(public_key, move |message| {
        callback.sign(message).map_err(Into::into)
    });

    Box::into_raw(Box::new(signer))
}

/// The public key a signer signs for.
///
/// The returned handle must be freed with
/// [`quill_public_key_free`](crate::quill_public_key_free).
///
/// # Safety
/// - `signer` must be a valid handle.
#[no_mangle]
pub unsafe extern "C" fn quill_signer_get_public_key(signer: *mut Signer) -> *mut PublicKey {
    assert!(!signer.is_null());

    let signer = unsafe { &*signer };

    Box::into_raw(Box::new(signer.public_key()))
}

/// Release a signer handle, running its release hook if it has one and
/// no signing operation still holds a reference.
///
/// # Safety
/// - `signer` must be a valid handle and must not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn quill_signer_free(signer: *mut Signer) {
    if signer.is_null() {
        return;
    }

    // safety: per the contract, `signer` came from `Box::into_raw`.
    drop(unsafe { Box::from_raw(signer) });
}

#[cfg(test)]
mod tests {
    use std::os::raw::c_void;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use libc::size_t;
    use quill_core::PrivateKey;

    use super::{quill_signer_callback, quill_signer_free, quill_signer_from_private_key};

    static RELEASES: AtomicUsize = AtomicUsize::new(0);

    unsafe extern "C" fn fixed_sign(
        _context: *mut c_void,
        _message: *const u8,
        _message_size: size_t,
        signature_out: *mut *const u8,
        signature_size_out: *mut size_t,
    ) -> i32 {
        static SIGNATURE: [u8; 4] = [1, 2, 3, 4];

        unsafe {
            *signature_out = SIGNATURE.as_ptr();
            *signature_size_out = SIGNATURE.len();
        }

        0
    }

    unsafe extern "C" fn count_release(_context: *mut c_void) {
        RELEASES.fetch_add(1, Ordering::SeqCst);
    }

    #[test]
    fn test_release_hook_runs_once_on_free() {
        let public_key =
            Box::into_raw(Box::new(PrivateKey::generate_ed25519().public_key()));

        let before = RELEASES.load(Ordering::SeqCst);

        let signer = unsafe {
            quill_signer_callback(
                public_key,
                std::ptr::null_mut(),
                fixed_sign,
                Some(count_release),
            )
        };

        unsafe { quill_signer_free(signer) };

        assert_eq!(RELEASES.load(Ordering::SeqCst), before + 1);

        drop(unsafe { Box::from_raw(public_key) });
    }

    #[test]
    fn test_private_key_signer_takes_ownership() {
        let key = Box::into_raw(Box::new(PrivateKey::generate_ed25519()));

        let signer = unsafe { quill_signer_from_private_key(key) };

        // `key` must not be freed here; the signer owns it now.
        unsafe { quill_signer_free(signer) };
    }
}
