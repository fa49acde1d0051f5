#![no_std]
//! Generic bus ownership manager for shared peripheral access.
//!
//! A bus is either lent by the caller, in which case it is handed back rather
//! than freed, or allocated through a [`BusTransport`] and owned until it is
//! released. Ownership is tracked explicitly instead of being inferred from
//! where the handle lives.

mod manager;
mod transport;

pub use manager::{BusManager, Ownership, Released};
pub use transport::BusTransport;
