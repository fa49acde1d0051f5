#![no_std]
#![doc = include_str!("../README.md")]

// Modules
mod config;
mod peripheral;
mod pins;
mod platform;
mod shared;
mod shield;

// Flatten
pub use config::*;
pub use peripheral::*;
pub use pins::*;
pub use platform::*;
pub use shared::*;
pub use shield::*;

pub use bus_manager::{BusTransport, Ownership, Released};
