//! Fixed bring-up settings of the shield.
//!
//! [`ShieldConfig::default`] reproduces the settings the shield is designed
//! for; the fields are public so a board with different wiring or bus speed
//! can override them.

use embedded_hal::i2c::SevenBitAddress;
use embedded_hal::spi::{Mode, MODE_0};

use crate::pins::{
    DataBusPins, DisplayPins, KitPin, PdmPins, SerialBusPins, DATA_BUS_PINS,
    DISPLAY_PINS, PDM_PINS, PIN_CO2_PWR_EN, SERIAL_BUS_PINS,
};

/// I2C clock used when the shield allocates its own data bus.
pub const DATA_BUS_FREQUENCY_HZ: u32 = 400_000;
/// SPI clock used when the shield allocates its own serial bus.
pub const SERIAL_BUS_FREQUENCY_HZ: u32 = 1_200_000;
/// SPI transfer bits per frame.
pub const BITS_PER_FRAME: u8 = 8;

/// SHT35 humidity sensor, default address.
pub const HUMIDITY_ADDRESS: SevenBitAddress = 0x44;
/// BMI270 motion sensor, secondary address (SDO pulled high).
pub const MOTION_ADDRESS: SevenBitAddress = 0x69;
/// BMM350 magnetometer, default address.
pub const MAGNETOMETER_ADDRESS: SevenBitAddress = 0x14;
/// DPS368 pressure sensor, alternate address.
pub const PRESSURE_ADDRESS: SevenBitAddress = 0x76;
/// PAS CO2 sensor.
pub const CO2_ADDRESS: SevenBitAddress = 0x28;

/// Role of the MCU on the data bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusRole {
    Controller,
    Target { address: SevenBitAddress },
}

/// Runtime settings applied to a data bus the shield allocates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataBusConfig {
    pub role: BusRole,
    pub frequency_hz: u32,
}

impl Default for DataBusConfig {
    fn default() -> Self {
        Self {
            role: BusRole::Controller,
            frequency_hz: DATA_BUS_FREQUENCY_HZ,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitOrder {
    MsbFirst,
    LsbFirst,
}

/// Frame format of the serial bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialBusFormat {
    pub frame_bits: u8,
    pub mode: Mode,
    pub bit_order: BitOrder,
}

impl Default for SerialBusFormat {
    fn default() -> Self {
        Self {
            frame_bits: BITS_PER_FRAME,
            mode: MODE_0,
            bit_order: BitOrder::MsbFirst,
        }
    }
}

/// Everything a serial bus transport needs to allocate the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialBusSetup {
    pub pins: SerialBusPins,
    pub format: SerialBusFormat,
}

impl Default for SerialBusSetup {
    fn default() -> Self {
        Self { pins: SERIAL_BUS_PINS, format: SerialBusFormat::default() }
    }
}

/// Runtime settings applied to a serial bus the shield allocates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialBusConfig {
    pub frequency_hz: u32,
}

impl Default for SerialBusConfig {
    fn default() -> Self {
        Self { frequency_hz: SERIAL_BUS_FREQUENCY_HZ }
    }
}

/// I2C addresses of the sensors on the data bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorAddresses {
    pub humidity: SevenBitAddress,
    pub motion: SevenBitAddress,
    pub magnetometer: SevenBitAddress,
    pub pressure: SevenBitAddress,
    pub co2: SevenBitAddress,
}

impl Default for SensorAddresses {
    fn default() -> Self {
        Self {
            humidity: HUMIDITY_ADDRESS,
            motion: MOTION_ADDRESS,
            magnetometer: MAGNETOMETER_ADDRESS,
            pressure: PRESSURE_ADDRESS,
            co2: CO2_ADDRESS,
        }
    }
}

/// Bring-up settings for the whole shield.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ShieldConfig {
    pub data_bus_pins: DataBusPins,
    pub data_bus: DataBusConfig,
    pub serial_bus_setup: SerialBusSetup,
    pub serial_bus: SerialBusConfig,
    pub addresses: SensorAddresses,
    pub display_pins: DisplayPins,
    pub pdm_pins: PdmPins,
    /// Output that powers the CO2 sensor; driven high during bring-up.
    pub co2_power_pin: KitPin,
}

impl Default for ShieldConfig {
    fn default() -> Self {
        Self {
            data_bus_pins: DATA_BUS_PINS,
            data_bus: DataBusConfig::default(),
            serial_bus_setup: SerialBusSetup::default(),
            serial_bus: SerialBusConfig::default(),
            addresses: SensorAddresses::default(),
            display_pins: DISPLAY_PINS,
            pdm_pins: PDM_PINS,
            co2_power_pin: PIN_CO2_PWR_EN,
        }
    }
}
