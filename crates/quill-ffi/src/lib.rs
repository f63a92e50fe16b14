//! Quill FFI
//!
//! C-callable boundary over [`quill_core`]: opaque handles for keys,
//! mnemonics, signers and transaction sources, plus the thread-local
//! last-error channel.
//!
//! # Ownership rules
//!
//! - Every handle returned by a constructor must be released through its
//!   paired `*_free` function, exactly once, unless a function documented
//!   as *taking ownership* consumed it first.
//! - Every byte buffer or string written to an out-parameter is owned by
//!   this library; release it with [`quill_bytes_free`] /
//!   [`quill_string_free`], never with a generic `free`.
//! - No value may be used after it has been released.
//!
//! # Errors
//!
//! Fallible entry points return an [`ErrorCode`](error::ErrorCode) and
//! record the full error in a thread-local slot at the point of failure.
//! Read it with [`quill_error_message`](error::quill_error_message) /
//! [`quill_error_details`](error::quill_error_details) immediately after
//! the failing call, on the same thread; the slot is meaningless after a
//! call that succeeded.

#[macro_use]
mod error;

mod crypto;
mod key;
mod mnemonic;
mod signer;
mod sources;
mod util;

pub use crate::crypto::*;
pub use crate::error::{quill_error_details, quill_error_message, ErrorCode, ErrorDetails};
pub use crate::key::*;
pub use crate::mnemonic::*;
pub use crate::signer::*;
pub use crate::sources::*;
pub use crate::util::{quill_bytes_free, quill_string_free};
