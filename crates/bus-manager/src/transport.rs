/// Abstracts bus allocation, configuration and release.
///
/// Implementors wrap a HAL's bus driver. The manager calls [`init`] and
/// [`configure`] when it allocates its own bus, and [`free`] only for a bus
/// it allocated.
///
/// [`init`]: BusTransport::init
/// [`configure`]: BusTransport::configure
/// [`free`]: BusTransport::free
pub trait BusTransport {
    /// The bus handle shared by the devices on it.
    type Bus;
    /// Pins and frame settings needed to allocate the bus.
    type Resources;
    /// Runtime settings applied after allocation (clock rate, role).
    type Config;
    /// Error reported by the underlying HAL.
    type Error: core::fmt::Debug;

    /// Allocate a bus on the given resources.
    fn init(
        &mut self,
        resources: &Self::Resources,
    ) -> Result<Self::Bus, Self::Error>;

    /// Apply runtime settings to an allocated bus.
    fn configure(
        &mut self,
        bus: &mut Self::Bus,
        config: &Self::Config,
    ) -> Result<(), Self::Error>;

    /// Release a bus previously returned by [`init`](Self::init).
    fn free(&mut self, bus: Self::Bus);
}
