use crate::transport::BusTransport;

/// Who is responsible for freeing the active bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ownership {
    /// Allocated by the manager through its transport; freed on release.
    Owned,
    /// Supplied by the caller; handed back on release, never freed.
    Borrowed,
}

/// Outcome of [`BusManager::release`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a borrowed bus is handed back here and dropped if ignored"]
pub enum Released<B> {
    /// Nothing was held.
    Idle,
    /// An owned bus was freed through the transport.
    Freed,
    /// The caller's bus, handed back untouched.
    Returned(B),
}

impl<B> Released<B> {
    /// Ownership of the bus that was released, `None` if the manager was idle.
    pub fn ownership(&self) -> Option<Ownership> {
        match self {
            Released::Idle => None,
            Released::Freed => Some(Ownership::Owned),
            Released::Returned(_) => Some(Ownership::Borrowed),
        }
    }

    /// The caller's bus, if one was handed back.
    pub fn into_bus(self) -> Option<B> {
        match self {
            Released::Returned(bus) => Some(bus),
            _ => None,
        }
    }
}

/// Phase state machine for the bus lifecycle.
enum Phase<B> {
    /// No bus is held.
    Idle,
    /// Bus allocated through the transport.
    Owned(B),
    /// Bus lent by the caller until release.
    Borrowed(B),
}

/// Generic bus ownership manager.
///
/// Holds at most one bus at a time. The bus is either adopted from the
/// caller with [`adopt`](Self::adopt) or allocated with
/// [`bring_up`](Self::bring_up), and stays in place until
/// [`release`](Self::release). Release frees a bus allocated here and hands
/// an adopted one back to the caller. Dropping the manager releases the bus.
pub struct BusManager<T: BusTransport> {
    transport: T,
    resources: T::Resources,
    phase: Phase<T::Bus>,
}

impl<T: BusTransport> BusManager<T> {
    /// Create an idle manager that allocates buses on `resources`.
    pub const fn new(transport: T, resources: T::Resources) -> Self {
        Self { transport, resources, phase: Phase::Idle }
    }

    /// Use a bus lent by the caller until the next release.
    ///
    /// Any bus already held is released first. A previously adopted bus is
    /// dropped at that point; call [`release`](Self::release) beforehand to
    /// get it back.
    pub fn adopt(&mut self, bus: T::Bus) -> &mut T::Bus {
        let _ = self.release();
        self.phase = Phase::Borrowed(bus);
        match &mut self.phase {
            Phase::Borrowed(bus) => bus,
            _ => unreachable!(),
        }
    }

    /// Allocate and configure a bus of our own.
    ///
    /// Any bus already held is released first. If allocation fails the
    /// manager stays idle. If allocation succeeds but configuration fails,
    /// the bus is still held as owned so that [`release`](Self::release)
    /// frees it; the configuration error is returned.
    pub fn bring_up(
        &mut self,
        config: &T::Config,
    ) -> Result<&mut T::Bus, T::Error> {
        let _ = self.release();

        let mut bus = self.transport.init(&self.resources)?;
        let result = self.transport.configure(&mut bus, config);
        self.phase = Phase::Owned(bus);
        result?;

        match &mut self.phase {
            Phase::Owned(bus) => Ok(bus),
            _ => unreachable!(),
        }
    }

    /// Adopt `external` if given, otherwise allocate our own bus.
    pub fn resolve(
        &mut self,
        external: Option<T::Bus>,
        config: &T::Config,
    ) -> Result<&mut T::Bus, T::Error> {
        match external {
            Some(bus) => Ok(self.adopt(bus)),
            None => self.bring_up(config),
        }
    }

    /// Let go of the current bus.
    ///
    /// An owned bus is freed through the transport, a borrowed one is handed
    /// back. The manager is idle afterwards; calling this repeatedly is
    /// harmless.
    pub fn release(&mut self) -> Released<T::Bus> {
        match core::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Idle => Released::Idle,
            Phase::Owned(bus) => {
                self.transport.free(bus);
                Released::Freed
            }
            Phase::Borrowed(bus) => Released::Returned(bus),
        }
    }

    /// Returns the bus in use, whichever side owns it.
    pub fn bus(&self) -> Option<&T::Bus> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Owned(bus) | Phase::Borrowed(bus) => Some(bus),
        }
    }

    /// Mutable access to the bus in use.
    pub fn bus_mut(&mut self) -> Option<&mut T::Bus> {
        match &mut self.phase {
            Phase::Idle => None,
            Phase::Owned(bus) | Phase::Borrowed(bus) => Some(bus),
        }
    }

    /// Returns `None` when idle.
    pub fn ownership(&self) -> Option<Ownership> {
        match self.phase {
            Phase::Idle => None,
            Phase::Owned(_) => Some(Ownership::Owned),
            Phase::Borrowed(_) => Some(Ownership::Borrowed),
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }
}

impl<T: BusTransport> Drop for BusManager<T> {
    fn drop(&mut self) {
        let _ = self.release();
    }
}
