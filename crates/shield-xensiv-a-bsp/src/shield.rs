use bus_manager::{BusManager, Ownership, Released};
use embedded_hal::digital::PinState;

use crate::config::ShieldConfig;
use crate::peripheral::{InitializedSet, Peripheral, Stage};
use crate::platform::{
    AudioCapture, AudioClock, AudioConfig, Capture, DataBus, DataBusSensor,
    DriveMode, MotionSensor, OutputControl, SerialBus, SerialBusDisplay,
    ShieldParts, ShieldPlatform,
};

/// Tags a collaborator error with the stage that produced it.
fn at<E>(stage: Stage) -> impl FnOnce(E) -> (Stage, E) {
    move |err| (stage, err)
}

/// Caller buses handed back by [`Shield::free`].
pub struct ReturnedBuses<P: ShieldPlatform> {
    pub data_bus: Option<DataBus<P>>,
    pub serial_bus: Option<SerialBus<P>>,
}

impl<P: ShieldPlatform> ReturnedBuses<P> {
    const fn none() -> Self {
        Self { data_bus: None, serial_bus: None }
    }

    pub fn is_empty(&self) -> bool {
        self.data_bus.is_none() && self.serial_bus.is_none()
    }
}

/// Brings the shield peripherals up and tears them down again.
///
/// The shield owns one instance of every sensor and display driver, plus the
/// HAL collaborators it needs. Buses are either lent by the caller or
/// allocated and owned by the shield. Teardown frees owned buses and keeps
/// lent ones aside until [`free`](Self::free) hands them back.
///
/// Dropping the shield tears down whatever is still started.
pub struct Shield<P: ShieldPlatform> {
    config: ShieldConfig,
    data_bus: BusManager<P::DataBus>,
    serial_bus: BusManager<P::SerialBus>,
    returned: ReturnedBuses<P>,
    gpio: P::Gpio,
    audio: P::Audio,
    capture: Option<Capture<P>>,
    humidity: P::Humidity,
    motion: P::Motion,
    magnetometer: P::Magnetometer,
    pressure: P::Pressure,
    co2: P::Co2,
    display: P::Display,
    initialized: InitializedSet,
    failed_stage: Option<Stage>,
}

impl<P: ShieldPlatform> Shield<P> {
    /// Create a shield with the settings it is wired for.
    pub fn new(parts: ShieldParts<P>) -> Self {
        Self::with_config(parts, ShieldConfig::default())
    }

    pub fn with_config(parts: ShieldParts<P>, config: ShieldConfig) -> Self {
        Self {
            data_bus: BusManager::new(parts.data_bus, config.data_bus_pins),
            serial_bus: BusManager::new(
                parts.serial_bus,
                config.serial_bus_setup,
            ),
            returned: ReturnedBuses::none(),
            gpio: parts.gpio,
            audio: parts.audio,
            capture: None,
            humidity: parts.humidity,
            motion: parts.motion,
            magnetometer: parts.magnetometer,
            pressure: parts.pressure,
            co2: parts.co2,
            display: parts.display,
            initialized: InitializedSet::new(),
            failed_stage: None,
            config,
        }
    }

    /// Bring up every peripheral on the shield.
    ///
    /// `data_bus` and `serial_bus` are lent to the shield as is when given;
    /// otherwise the shield allocates and configures its own. Lent buses come
    /// back from [`free`](Self::free). The microphone is brought up only when
    /// both `audio_config` and `audio_clock` are given.
    ///
    /// Stages run in a fixed order and the first failure stops the chain.
    /// Everything started up to that point is torn down and the
    /// collaborator's error is returned unchanged; [`failed_stage`] tells
    /// which stage produced it. Lent buses stay with the shield until the
    /// next [`free`](Self::free). A shield that is already up is torn down
    /// before bring-up starts.
    ///
    /// [`failed_stage`]: Self::failed_stage
    pub fn init(
        &mut self,
        data_bus: Option<DataBus<P>>,
        serial_bus: Option<SerialBus<P>>,
        audio_config: Option<&AudioConfig<P>>,
        audio_clock: Option<&mut AudioClock<P>>,
    ) -> Result<(), P::Error> {
        if self.is_up() {
            #[cfg(feature = "defmt")]
            defmt::debug!("Shield already up, tearing down before init");
            self.tear_down();
        }
        self.failed_stage = None;

        match self.bring_up(data_bus, serial_bus, audio_config, audio_clock) {
            Ok(()) => {
                #[cfg(feature = "defmt")]
                defmt::info!("Shield up: {}", self.initialized);
                Ok(())
            }
            Err((stage, err)) => {
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "Shield bring-up failed at {}: {:?}",
                    stage,
                    defmt::Debug2Format(&err)
                );
                self.failed_stage = Some(stage);
                self.tear_down();
                Err(err)
            }
        }
    }

    fn bring_up(
        &mut self,
        data_bus: Option<DataBus<P>>,
        serial_bus: Option<SerialBus<P>>,
        audio_config: Option<&AudioConfig<P>>,
        audio_clock: Option<&mut AudioClock<P>>,
    ) -> Result<(), (Stage, P::Error)> {
        let addresses = self.config.addresses;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "Data bus external: {}, serial bus external: {}",
            data_bus.is_some(),
            serial_bus.is_some()
        );

        let i2c = self
            .data_bus
            .resolve(data_bus, &self.config.data_bus)
            .map_err(at(Stage::DataBus))?;
        let spi = self
            .serial_bus
            .resolve(serial_bus, &self.config.serial_bus)
            .map_err(at(Stage::SerialBus))?;

        self.humidity
            .init(i2c, addresses.humidity)
            .map_err(at(Stage::Humidity))?;
        self.initialized.insert(Peripheral::Humidity);

        // Tracked before the profile is loaded so a failed load still frees it.
        self.motion.init(i2c, addresses.motion).map_err(at(Stage::Motion))?;
        self.initialized.insert(Peripheral::Motion);
        self.motion
            .apply_default_config()
            .map_err(at(Stage::MotionConfig))?;

        self.magnetometer
            .init(i2c, addresses.magnetometer)
            .map_err(at(Stage::Magnetometer))?;
        self.initialized.insert(Peripheral::Magnetometer);

        self.pressure
            .init(i2c, addresses.pressure)
            .map_err(at(Stage::Pressure))?;
        self.initialized.insert(Peripheral::Pressure);

        match (audio_config, audio_clock) {
            (Some(config), Some(clock)) => {
                let capture = self
                    .audio
                    .init(&self.config.pdm_pins, clock, config)
                    .map_err(at(Stage::AudioCapture))?;
                self.capture = Some(capture);
                self.initialized.insert(Peripheral::AudioCapture);
            }
            _ => {
                #[cfg(feature = "defmt")]
                defmt::debug!("No audio config or clock, skipping microphone");
            }
        }

        self.display
            .init(spi, &self.config.display_pins)
            .map_err(at(Stage::Display))?;
        self.initialized.insert(Peripheral::Display);

        self.gpio
            .configure_output(
                self.config.co2_power_pin,
                DriveMode::Strong,
                PinState::High,
            )
            .map_err(at(Stage::Co2Power))?;
        self.initialized.insert(Peripheral::Co2Power);

        self.co2.init(i2c, addresses.co2).map_err(at(Stage::Co2))?;
        self.initialized.insert(Peripheral::Co2);

        Ok(())
    }

    /// Tear down every started peripheral, free owned buses and hand lent
    /// buses back.
    ///
    /// Safe to call at any time, any number of times. Buses lent to an init
    /// that failed are returned by the first call after it.
    pub fn free(&mut self) -> ReturnedBuses<P> {
        self.tear_down();
        core::mem::replace(&mut self.returned, ReturnedBuses::none())
    }

    fn tear_down(&mut self) {
        let started = self.initialized;
        self.initialized.clear();

        for peripheral in started.iter() {
            #[cfg(feature = "defmt")]
            defmt::trace!("Tearing down {}", peripheral);
            match peripheral {
                Peripheral::Humidity => self.humidity.free(),
                Peripheral::Motion => self.motion.free(),
                Peripheral::Magnetometer => self.magnetometer.free(),
                Peripheral::Pressure => self.pressure.free(),
                Peripheral::AudioCapture => {
                    if let Some(capture) = self.capture.take() {
                        self.audio.free(capture);
                    }
                }
                Peripheral::Display => self.display.free(),
                Peripheral::Co2 => self.co2.free(),
                Peripheral::Co2Power => {
                    self.gpio.free(self.config.co2_power_pin)
                }
            }
        }

        let data = self.data_bus.release();
        let serial = self.serial_bus.release();
        #[cfg(feature = "defmt")]
        {
            if data.ownership().is_some() || serial.ownership().is_some() {
                defmt::debug!(
                    "Released data bus {:?}, serial bus {:?}",
                    data.ownership(),
                    serial.ownership()
                );
            }
        }
        if let Released::Returned(bus) = data {
            self.returned.data_bus = Some(bus);
        }
        if let Released::Returned(bus) = serial {
            self.returned.serial_bus = Some(bus);
        }
    }

    fn is_up(&self) -> bool {
        !self.initialized.is_empty()
            || self.data_bus.is_active()
            || self.serial_bus.is_active()
    }

    /// The data bus in use, shared by the humidity sensor and the other I2C
    /// sensors. `None` until [`init`](Self::init) resolves a bus and after
    /// teardown.
    pub fn humidity_bus(&mut self) -> Option<&mut DataBus<P>> {
        self.data_bus.bus_mut()
    }

    /// The serial bus in use by the display.
    pub fn serial_bus(&mut self) -> Option<&mut SerialBus<P>> {
        self.serial_bus.bus_mut()
    }

    pub fn humidity(&mut self) -> &mut P::Humidity {
        &mut self.humidity
    }

    /// The motion sensor, whether or not it was brought up.
    pub fn motion(&mut self) -> &mut P::Motion {
        &mut self.motion
    }

    /// The magnetometer, whether or not it was brought up.
    pub fn magnetometer(&mut self) -> &mut P::Magnetometer {
        &mut self.magnetometer
    }

    /// The pressure sensor, whether or not it was brought up.
    pub fn pressure(&mut self) -> &mut P::Pressure {
        &mut self.pressure
    }

    /// The CO2 sensor, whether or not it was brought up.
    pub fn co2(&mut self) -> &mut P::Co2 {
        &mut self.co2
    }

    pub fn display(&mut self) -> &mut P::Display {
        &mut self.display
    }

    /// The microphone capture block, only while it is started.
    pub fn audio_capture(&mut self) -> Option<&mut Capture<P>> {
        if self.initialized.contains(Peripheral::AudioCapture) {
            self.capture.as_mut()
        } else {
            None
        }
    }

    pub fn initialized(&self) -> &InitializedSet {
        &self.initialized
    }

    pub fn is_started(&self, peripheral: Peripheral) -> bool {
        self.initialized.contains(peripheral)
    }

    pub fn data_bus_ownership(&self) -> Option<Ownership> {
        self.data_bus.ownership()
    }

    pub fn serial_bus_ownership(&self) -> Option<Ownership> {
        self.serial_bus.ownership()
    }

    /// Stage of the most recent failed [`init`](Self::init); cleared by the
    /// next init.
    pub fn failed_stage(&self) -> Option<Stage> {
        self.failed_stage
    }

    pub fn config(&self) -> &ShieldConfig {
        &self.config
    }
}

impl<P: ShieldPlatform> Drop for Shield<P> {
    fn drop(&mut self) {
        self.tear_down();
    }
}
