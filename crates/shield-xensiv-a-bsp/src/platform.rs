//! Collaborators the shield is brought up through.
//!
//! The bus transports come from the kit's HAL, the sensor and display traits
//! are implemented by thin adapters over each chip's driver. All of them
//! report one error type, [`ShieldPlatform::Error`], which the shield passes
//! back to the caller untouched.

use bus_manager::BusTransport;
use embedded_hal::digital::PinState;
use embedded_hal::i2c::SevenBitAddress;

use crate::config::{DataBusConfig, SerialBusConfig, SerialBusSetup};
use crate::pins::{DataBusPins, DisplayPins, KitPin, PdmPins};

/// A sensor on the shared data bus.
pub trait DataBusSensor<Bus> {
    type Error;

    /// Probe and initialise the sensor at `address`.
    fn init(
        &mut self,
        bus: &mut Bus,
        address: SevenBitAddress,
    ) -> Result<(), Self::Error>;

    /// Return the sensor to its uninitialised state.
    fn free(&mut self);
}

/// The motion sensor needs a configuration profile loaded after init.
pub trait MotionSensor<Bus>: DataBusSensor<Bus> {
    /// Load the driver's default configuration into the sensor.
    fn apply_default_config(&mut self) -> Result<(), Self::Error>;
}

/// A display on the shared serial bus.
pub trait SerialBusDisplay<Bus> {
    type Error;

    fn init(
        &mut self,
        bus: &mut Bus,
        pins: &DisplayPins,
    ) -> Result<(), Self::Error>;

    fn free(&mut self);
}

/// Output drive of a GPIO.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriveMode {
    Strong,
    OpenDrainLow,
    OpenDrainHigh,
}

/// Digital output control.
pub trait OutputControl {
    type Error;

    /// Configure `pin` as an output driven to `initial`.
    fn configure_output(
        &mut self,
        pin: KitPin,
        drive: DriveMode,
        initial: PinState,
    ) -> Result<(), Self::Error>;

    /// Return `pin` to its reset state.
    fn free(&mut self, pin: KitPin);
}

/// PDM to PCM audio capture.
pub trait AudioCapture {
    /// Handle of a running capture block.
    type Capture;
    /// Capture configuration supplied by the application.
    type Config;
    /// Audio clock supplied by the application.
    type Clock;
    type Error;

    fn init(
        &mut self,
        pins: &PdmPins,
        clock: &mut Self::Clock,
        config: &Self::Config,
    ) -> Result<Self::Capture, Self::Error>;

    fn free(&mut self, capture: Self::Capture);
}

/// Binds the collaborators of one kit together.
///
/// Implemented by a marker type; the instances themselves are handed to the
/// shield in [`ShieldParts`].
pub trait ShieldPlatform {
    /// Error shared by every collaborator.
    type Error: core::fmt::Debug;

    type DataBus: BusTransport<
        Resources = DataBusPins,
        Config = DataBusConfig,
        Error = Self::Error,
    >;
    type SerialBus: BusTransport<
        Resources = SerialBusSetup,
        Config = SerialBusConfig,
        Error = Self::Error,
    >;
    type Gpio: OutputControl<Error = Self::Error>;
    type Audio: AudioCapture<Error = Self::Error>;

    type Humidity: DataBusSensor<
        <Self::DataBus as BusTransport>::Bus,
        Error = Self::Error,
    >;
    type Motion: MotionSensor<
        <Self::DataBus as BusTransport>::Bus,
        Error = Self::Error,
    >;
    type Magnetometer: DataBusSensor<
        <Self::DataBus as BusTransport>::Bus,
        Error = Self::Error,
    >;
    type Pressure: DataBusSensor<
        <Self::DataBus as BusTransport>::Bus,
        Error = Self::Error,
    >;
    type Co2: DataBusSensor<
        <Self::DataBus as BusTransport>::Bus,
        Error = Self::Error,
    >;
    type Display: SerialBusDisplay<
        <Self::SerialBus as BusTransport>::Bus,
        Error = Self::Error,
    >;
}

/// Data bus handle of a platform.
pub type DataBus<P> =
    <<P as ShieldPlatform>::DataBus as BusTransport>::Bus;
/// Serial bus handle of a platform.
pub type SerialBus<P> =
    <<P as ShieldPlatform>::SerialBus as BusTransport>::Bus;
/// Audio capture handle of a platform.
pub type Capture<P> =
    <<P as ShieldPlatform>::Audio as AudioCapture>::Capture;
pub type AudioConfig<P> =
    <<P as ShieldPlatform>::Audio as AudioCapture>::Config;
pub type AudioClock<P> =
    <<P as ShieldPlatform>::Audio as AudioCapture>::Clock;

/// Collaborator instances of one shield.
pub struct ShieldParts<P: ShieldPlatform> {
    pub data_bus: P::DataBus,
    pub serial_bus: P::SerialBus,
    pub gpio: P::Gpio,
    pub audio: P::Audio,
    pub humidity: P::Humidity,
    pub motion: P::Motion,
    pub magnetometer: P::Magnetometer,
    pub pressure: P::Pressure,
    pub co2: P::Co2,
    pub display: P::Display,
}
