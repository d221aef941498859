#![forbid(unsafe_code)]

//! Change notification for Folio form state.
//!
//! Each form field keeps its value, error and touched flag in an
//! [`Observable`]. Anything that wants to follow a field (a rendered input,
//! a summary banner) registers a callback and holds on to the returned
//! [`Subscription`]; letting go of it ends the registration. The engine wraps
//! each operation in a [`BatchScope`] so that a single `set_value` which also
//! revalidates and touches the field reaches observers as one settled state.
//!
//! Everything here is single-threaded. Values sit behind `Rc<RefCell<..>>`,
//! callbacks are held weakly and pruned when notification finds them dead,
//! and pending batch work lives in a thread-local.
//!
//! # Guarantees
//!
//! - The version moves by one for every `set` or `update` that changes the
//!   value, and never otherwise. "Changes" is decided by `T: PartialEq`.
//! - Callbacks fire in the order they were registered, with no borrow held,
//!   so they may read or write observables.
//! - Once a [`Subscription`] is gone its callback is never called again.
//! - Inside a batch, reads see new values straight away while callbacks wait
//!   for the outermost scope to close; each observable reports once per round
//!   of the flush, with whatever value it holds then.
//!
//! # Example
//!
//! ```rust
//! use folio_reactive::{BatchScope, Observable};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let count = Observable::new(0);
//! let seen = Rc::new(Cell::new(0));
//! let seen_cb = Rc::clone(&seen);
//! let _sub = count.subscribe(move |v| seen_cb.set(*v));
//!
//! {
//!     let _batch = BatchScope::new();
//!     count.set(1);
//!     count.set(2);
//!     assert_eq!(seen.get(), 0);
//! }
//! assert_eq!(seen.get(), 2);
//! ```

pub mod batch;
pub mod observable;

pub use batch::{BatchScope, is_batching};
pub use observable::{Observable, Subscription};
