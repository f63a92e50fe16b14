//! The thread-local last-error channel
//!
//! Every fallible `extern "C"` entry point reports a coarse [`ErrorCode`]
//! as its return value and stashes the full error in a thread-local slot
//! at the moment of failure. The caller reads the slot *immediately*
//! after a failing call, on the same thread, via [`quill_error_message`]
//! and [`quill_error_details`].
//!
//! The slot is overwritten by the next fallible call on the same thread;
//! reading it after a call that returned [`ErrorCode::Ok`] is undefined
//! (it may hold a stale error or nothing). Callers that share a thread
//! must serialize their call/read pairs.

use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use quill_core::Error;

thread_local! {
    static LAST_ERROR: RefCell<Option<Error>> = const { RefCell::new(None) };
}

/// Return early with an [`ErrorCode`] if the expression fails, recording
/// the error in the thread-local slot.
macro_rules! ffi_try {
    ($expr:expr) => {{
        match $expr {
            Ok(it) => it,
            Err(error) => {
                return $crate::error::ErrorCode::new(error);
            }
        }
    }};
}

/// Replace the most recently recorded error for this thread.
pub(crate) fn set_last_error(error: Error) {
    log::debug!("core operation failed: {error}");

    LAST_ERROR.with(|slot| {
        slot.borrow_mut().replace(error);
    });
}

/// Coarse classification of any fallible boundary call.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[repr(C)]
pub enum ErrorCode {
    Ok = 0,
    KeyParse,
    KeyDerive,
    SignatureVerify,
    MnemonicParse,
    MnemonicEntropy,
    Signer,
    RequestParse,
    BadEntityId,
    GrpcStatus,
    PreCheckStatus,
    MaxPaymentExceeded,
}

impl ErrorCode {
    pub(crate) fn new(error: Error) -> Self {
        let code = match &error {
            Error::KeyParse(_) => Self::KeyParse,
            Error::KeyDerive(_) => Self::KeyDerive,
            Error::SignatureVerify(_) => Self::SignatureVerify,
            Error::MnemonicParse(_) => Self::MnemonicParse,
            Error::MnemonicEntropy(_) => Self::MnemonicEntropy,
            Error::Signer { .. } => Self::Signer,
            Error::RequestParse(_) => Self::RequestParse,
            Error::BadEntityId { .. } => Self::BadEntityId,
            Error::GrpcStatus(_) => Self::GrpcStatus,
            Error::PreCheckStatus { .. } => Self::PreCheckStatus,
            Error::MaxPaymentExceeded { .. } => Self::MaxPaymentExceeded,
            // the enum is non-exhaustive; treat anything new as a request
            // level failure rather than aborting.
            _ => Self::RequestParse,
        };

        set_last_error(error);

        code
    }
}

/// Structured detail for the last error, when the kind carries one.
#[repr(C)]
pub enum ErrorDetails {
    /// The last error had no structured detail (or there was no error).
    None,
    /// Status code reported by the transport.
    GrpcStatus { status: i32 },
    /// Precheck status plus the transaction it applies to.
    ///
    /// `transaction_id` is null when no id was assigned; otherwise it
    /// must be freed with [`quill_string_free`](crate::quill_string_free).
    PreCheckStatus {
        status: i32,
        transaction_id: *mut c_char,
    },
    /// A query cost exceeded the allowed payment.
    MaxPaymentExceeded { max: i64, actual: i64 },
    /// An entity identifier failed its checksum validation.
    BadEntityId {
        shard: u64,
        realm: u64,
        num: u64,
        present_checksum: [u8; 5],
        expected_checksum: [u8; 5],
    },
}

impl From<Error> for ErrorDetails {
    fn from(error: Error) -> Self {
        match error {
            Error::GrpcStatus(status) => Self::GrpcStatus { status },
            Error::PreCheckStatus { status, transaction_id } => Self::PreCheckStatus {
                status,
                transaction_id: transaction_id
                    .and_then(|id| CString::new(id).ok())
                    .map_or(ptr::null_mut(), CString::into_raw),
            },
            Error::MaxPaymentExceeded { max, actual } => Self::MaxPaymentExceeded { max, actual },
            Error::BadEntityId { shard, realm, num, present_checksum, expected_checksum } => {
                Self::BadEntityId { shard, realm, num, present_checksum, expected_checksum }
            }
            _ => Self::None,
        }
    }
}

/// English-language text describing the last error on this thread, or
/// null when none has been recorded.
///
/// The returned string must be freed with
/// [`quill_string_free`](crate::quill_string_free); it must not be passed
/// to a generic `free`.
#[no_mangle]
pub extern "C" fn quill_error_message() -> *mut c_char {
    LAST_ERROR.with(|slot| {
        if let Some(error) = &*slot.borrow() {
            return CString::new(error.to_string())
                .unwrap_or_default()
                .into_raw();
        }

        ptr::null_mut()
    })
}

/// Take the structured detail of the last error on this thread.
///
/// Consumes the slot: a second read before the next failure returns
/// [`ErrorDetails::None`].
#[no_mangle]
pub extern "C" fn quill_error_details() -> ErrorDetails {
    LAST_ERROR.with(|slot| match slot.borrow_mut().take() {
        Some(error) => ErrorDetails::from(error),
        None => ErrorDetails::None,
    })
}
