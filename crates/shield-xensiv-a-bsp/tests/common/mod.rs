#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use embedded_hal::digital::PinState;
use embedded_hal::i2c::SevenBitAddress;
use shield_xensiv_a_bsp::{
    AudioCapture, BusTransport, DataBusConfig, DataBusPins, DataBusSensor,
    DisplayPins, DriveMode, KitPin, MotionSensor, OutputControl, PdmPins,
    SerialBusConfig, SerialBusDisplay, SerialBusSetup, ShieldParts,
    ShieldPlatform,
};

// ---------------------------------------------------------------------------
// Call log
// ---------------------------------------------------------------------------

/// Every collaborator call the shield can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    DataBusInit,
    DataBusConfigure,
    DataBusFree,
    SerialBusInit,
    SerialBusConfigure,
    SerialBusFree,
    HumidityInit,
    HumidityFree,
    MotionInit,
    MotionConfig,
    MotionFree,
    MagnetometerInit,
    MagnetometerFree,
    PressureInit,
    PressureFree,
    AudioInit,
    AudioFree,
    DisplayInit,
    DisplayFree,
    GpioOutput(KitPin, DriveMode, PinState),
    GpioFree(KitPin),
    Co2Init,
    Co2Free,
}

/// Error carrying the call that was told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError(pub Call);

/// Shared call log and failure injection for all mocks of one shield.
#[derive(Clone, Default)]
pub struct Harness {
    calls: Arc<Mutex<Vec<Call>>>,
    fail_on: Arc<Mutex<Option<Call>>>,
}

impl Harness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next matching call fail.
    pub fn fail_on(&self, call: Call) {
        *self.fail_on.lock().unwrap() = Some(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: Call) -> usize {
        self.calls().iter().filter(|c| **c == call).count()
    }

    /// Calls made after the first occurrence of `call`.
    pub fn calls_after(&self, call: Call) -> Vec<Call> {
        let calls = self.calls();
        match calls.iter().position(|c| *c == call) {
            Some(i) => calls[i + 1..].to_vec(),
            None => Vec::new(),
        }
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: Call) -> Result<(), MockError> {
        self.calls.lock().unwrap().push(call);
        let mut fail_on = self.fail_on.lock().unwrap();
        if *fail_on == Some(call) {
            *fail_on = None;
            return Err(MockError(call));
        }
        Ok(())
    }

    /// Free calls cannot fail.
    fn record_free(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn parts(&self) -> ShieldParts<MockPlatform> {
        ShieldParts {
            data_bus: MockDataBus { harness: self.clone() },
            serial_bus: MockSerialBus { harness: self.clone() },
            gpio: MockGpio { harness: self.clone() },
            audio: MockAudio { harness: self.clone() },
            humidity: MockSensor::new(
                self,
                Call::HumidityInit,
                Call::HumidityFree,
            ),
            motion: MockMotion {
                sensor: MockSensor::new(
                    self,
                    Call::MotionInit,
                    Call::MotionFree,
                ),
                configured: false,
            },
            magnetometer: MockSensor::new(
                self,
                Call::MagnetometerInit,
                Call::MagnetometerFree,
            ),
            pressure: MockSensor::new(
                self,
                Call::PressureInit,
                Call::PressureFree,
            ),
            co2: MockSensor::new(self, Call::Co2Init, Call::Co2Free),
            display: MockDisplay {
                harness: self.clone(),
                pins: None,
                bus_id: None,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Buses
// ---------------------------------------------------------------------------

/// Bus ids of buses allocated by the mock transports.
pub const OWNED_I2C_ID: u32 = 100;
pub const OWNED_SPI_ID: u32 = 200;

#[derive(Debug, PartialEq, Eq)]
pub struct MockI2c {
    pub id: u32,
    pub frequency_hz: u32,
}

#[derive(Debug, PartialEq, Eq)]
pub struct MockSpi {
    pub id: u32,
    pub frame_bits: u8,
    pub frequency_hz: u32,
}

pub struct MockDataBus {
    harness: Harness,
}

impl BusTransport for MockDataBus {
    type Bus = MockI2c;
    type Resources = DataBusPins;
    type Config = DataBusConfig;
    type Error = MockError;

    fn init(&mut self, _pins: &DataBusPins) -> Result<MockI2c, MockError> {
        self.harness.record(Call::DataBusInit)?;
        Ok(MockI2c { id: OWNED_I2C_ID, frequency_hz: 0 })
    }

    fn configure(
        &mut self,
        bus: &mut MockI2c,
        config: &DataBusConfig,
    ) -> Result<(), MockError> {
        self.harness.record(Call::DataBusConfigure)?;
        bus.frequency_hz = config.frequency_hz;
        Ok(())
    }

    fn free(&mut self, _bus: MockI2c) {
        self.harness.record_free(Call::DataBusFree);
    }
}

pub struct MockSerialBus {
    harness: Harness,
}

impl BusTransport for MockSerialBus {
    type Bus = MockSpi;
    type Resources = SerialBusSetup;
    type Config = SerialBusConfig;
    type Error = MockError;

    fn init(&mut self, setup: &SerialBusSetup) -> Result<MockSpi, MockError> {
        self.harness.record(Call::SerialBusInit)?;
        Ok(MockSpi {
            id: OWNED_SPI_ID,
            frame_bits: setup.format.frame_bits,
            frequency_hz: 0,
        })
    }

    fn configure(
        &mut self,
        bus: &mut MockSpi,
        config: &SerialBusConfig,
    ) -> Result<(), MockError> {
        self.harness.record(Call::SerialBusConfigure)?;
        bus.frequency_hz = config.frequency_hz;
        Ok(())
    }

    fn free(&mut self, _bus: MockSpi) {
        self.harness.record_free(Call::SerialBusFree);
    }
}

// ---------------------------------------------------------------------------
// Drivers
// ---------------------------------------------------------------------------

pub struct MockSensor {
    harness: Harness,
    init_call: Call,
    free_call: Call,
    /// Address and bus of the last successful init.
    pub address: Option<SevenBitAddress>,
    pub bus_id: Option<u32>,
}

impl MockSensor {
    fn new(harness: &Harness, init_call: Call, free_call: Call) -> Self {
        Self {
            harness: harness.clone(),
            init_call,
            free_call,
            address: None,
            bus_id: None,
        }
    }
}

impl DataBusSensor<MockI2c> for MockSensor {
    type Error = MockError;

    fn init(
        &mut self,
        bus: &mut MockI2c,
        address: SevenBitAddress,
    ) -> Result<(), MockError> {
        self.harness.record(self.init_call)?;
        self.address = Some(address);
        self.bus_id = Some(bus.id);
        Ok(())
    }

    fn free(&mut self) {
        self.harness.record_free(self.free_call);
        self.address = None;
        self.bus_id = None;
    }
}

pub struct MockMotion {
    pub sensor: MockSensor,
    pub configured: bool,
}

impl DataBusSensor<MockI2c> for MockMotion {
    type Error = MockError;

    fn init(
        &mut self,
        bus: &mut MockI2c,
        address: SevenBitAddress,
    ) -> Result<(), MockError> {
        self.sensor.init(bus, address)
    }

    fn free(&mut self) {
        self.sensor.free();
        self.configured = false;
    }
}

impl MotionSensor<MockI2c> for MockMotion {
    fn apply_default_config(&mut self) -> Result<(), MockError> {
        self.sensor.harness.record(Call::MotionConfig)?;
        self.configured = true;
        Ok(())
    }
}

pub struct MockDisplay {
    harness: Harness,
    pub pins: Option<DisplayPins>,
    pub bus_id: Option<u32>,
}

impl SerialBusDisplay<MockSpi> for MockDisplay {
    type Error = MockError;

    fn init(
        &mut self,
        bus: &mut MockSpi,
        pins: &DisplayPins,
    ) -> Result<(), MockError> {
        self.harness.record(Call::DisplayInit)?;
        self.pins = Some(*pins);
        self.bus_id = Some(bus.id);
        Ok(())
    }

    fn free(&mut self) {
        self.harness.record_free(Call::DisplayFree);
        self.pins = None;
        self.bus_id = None;
    }
}

pub struct MockGpio {
    harness: Harness,
}

impl OutputControl for MockGpio {
    type Error = MockError;

    fn configure_output(
        &mut self,
        pin: KitPin,
        drive: DriveMode,
        initial: PinState,
    ) -> Result<(), MockError> {
        self.harness.record(Call::GpioOutput(pin, drive, initial))
    }

    fn free(&mut self, pin: KitPin) {
        self.harness.record_free(Call::GpioFree(pin));
    }
}

// ---------------------------------------------------------------------------
// Audio
// ---------------------------------------------------------------------------

pub struct MockPdmConfig {
    pub sample_rate_hz: u32,
}

pub struct MockClock {
    pub frequency_hz: u32,
    pub users: u32,
}

#[derive(Debug)]
pub struct MockCapture {
    pub pins: PdmPins,
    pub sample_rate_hz: u32,
}

pub struct MockAudio {
    harness: Harness,
}

impl AudioCapture for MockAudio {
    type Capture = MockCapture;
    type Config = MockPdmConfig;
    type Clock = MockClock;
    type Error = MockError;

    fn init(
        &mut self,
        pins: &PdmPins,
        clock: &mut MockClock,
        config: &MockPdmConfig,
    ) -> Result<MockCapture, MockError> {
        self.harness.record(Call::AudioInit)?;
        clock.users += 1;
        Ok(MockCapture { pins: *pins, sample_rate_hz: config.sample_rate_hz })
    }

    fn free(&mut self, _capture: MockCapture) {
        self.harness.record_free(Call::AudioFree);
    }
}

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

pub struct MockPlatform;

impl ShieldPlatform for MockPlatform {
    type Error = MockError;
    type DataBus = MockDataBus;
    type SerialBus = MockSerialBus;
    type Gpio = MockGpio;
    type Audio = MockAudio;
    type Humidity = MockSensor;
    type Motion = MockMotion;
    type Magnetometer = MockSensor;
    type Pressure = MockSensor;
    type Co2 = MockSensor;
    type Display = MockDisplay;
}

pub fn external_i2c() -> MockI2c {
    MockI2c { id: 1, frequency_hz: 100_000 }
}

pub fn external_spi() -> MockSpi {
    MockSpi { id: 2, frame_bits: 8, frequency_hz: 8_000_000 }
}

pub fn audio_inputs() -> (MockPdmConfig, MockClock) {
    (
        MockPdmConfig { sample_rate_hz: 16_000 },
        MockClock { frequency_hz: 24_576_000, users: 0 },
    )
}
