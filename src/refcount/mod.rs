//! Reference counting of active launcher processes.
//!
//! The router service is shared by every running `ccr code` session. Each
//! session holds one reference for as long as its child process is alive, and
//! the service is only shut down once the count drops back to zero.
//!
//! # Counters
//!
//! - [`FileReferenceCount`] keeps the count in a small text file so that
//!   separate launcher processes (and the router itself) observe one value.
//! - [`MemoryReferenceCount`] keeps it in-process.
//!
//! # RAII Guards
//!
//! A reference is taken with [`ActiveReference::acquire`] and given back when
//! the guard is released or dropped, so every exit path decrements exactly once.

mod counter;
mod guard;


// Re-export public API
pub use counter::{FileReferenceCount, MemoryReferenceCount, ReferenceCounter};
pub use guard::ActiveReference;
