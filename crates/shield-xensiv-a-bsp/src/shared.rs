//! Shield behind a blocking mutex, for firmware that keeps a single shield in
//! a `static` and reaches it from several tasks.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::platform::ShieldPlatform;
use crate::shield::Shield;

/// A shield shared between tasks or interrupt handlers.
///
/// Build one with `Mutex::new(RefCell::new(shield))` and reach it through
/// [`with_shield`].
pub type SharedShield<M, P> = Mutex<M, RefCell<Shield<P>>>;

/// Run `f` with exclusive access to the shared shield.
///
/// # Panics
///
/// Panics if called re-entrantly from within `f` for the same shield.
pub fn with_shield<M: RawMutex, P: ShieldPlatform, R>(
    shared: &SharedShield<M, P>,
    f: impl FnOnce(&mut Shield<P>) -> R,
) -> R {
    shared.lock(|cell| {
        let mut shield = cell.borrow_mut();
        f(&mut *shield)
    })
}
