//! Commerce error types.

use thiserror::Error;

/// Failures reported by an external cart store or product catalog.
///
/// These are surfaced to the caller as-is; nothing in this crate retries
/// them or rolls back earlier steps.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached or the call did not complete.
    #[error("Store unavailable: {0}")]
    Transport(String),

    /// The store answered with a non-success status.
    #[error("Store returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The addressed cart line does not exist.
    #[error("Cart line not found: {0}")]
    NotFound(String),

    /// An update carried a stale version token.
    #[error("Cart line {id} was modified concurrently (expected version {expected}, found {found})")]
    Conflict { id: String, expected: u64, found: u64 },

    /// The store's response could not be decoded.
    #[error("Failed to decode store response: {0}")]
    Decode(String),
}

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// A cart store or catalog call failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Checkout stopped partway; earlier deletions stay in effect.
    #[error("Checkout interrupted after removing {deleted} of {total} line(s): {source}")]
    CheckoutInterrupted {
        deleted: usize,
        total: usize,
        #[source]
        source: StoreError,
    },

    /// Email address failed validation.
    #[error("Please enter a valid email address.")]
    InvalidEmail(String),

    /// Login is restricted to a single demo address.
    #[error("For demo, please use the sample email: {expected}")]
    EmailNotAllowed { expected: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in cart calculation")]
    Overflow,
}
