//! Shield signal to kit header mapping.
//!
//! Signals are named by the kit header pin they land on. Translating a
//! [`KitPin`] into a silicon pin is left to the kit's HAL.

/// Header pins of the kit that the shield connects to.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KitPin {
    /// Dedicated I2C clock header pin.
    I2cScl,
    /// Dedicated I2C data header pin.
    I2cSda,
    /// Dedicated SPI clock header pin.
    SpiClk,
    SpiMiso,
    SpiMosi,
    SpiCs,
    D2,
    D4,
    D5,
    D6,
    D7,
    D9,
    A0,
    A1,
    A2,
    A3,
    A4,
    A5,
    J2_2,
    J2_4,
    J2_6,
    J2_8,
    J2_10,
    J2_12,
}

// Humidity, motion, magnetometer, pressure and CO2 sensors share one I2C bus.

/// Shared I2C SCL signal.
pub const PIN_I2C_SCL: KitPin = KitPin::I2cScl;
/// Shared I2C SDA signal.
pub const PIN_I2C_SDA: KitPin = KitPin::I2cSda;

// TFT display and radar sensor share the SPI bus.

/// SPI SCK signal.
pub const PIN_SPI_SCK: KitPin = KitPin::SpiClk;
/// SPI MISO signal.
pub const PIN_SPI_MISO: KitPin = KitPin::SpiMiso;
/// SPI MOSI signal.
pub const PIN_SPI_MOSI: KitPin = KitPin::SpiMosi;
/// SPI chip select.
pub const PIN_SPI_CS: KitPin = KitPin::SpiCs;
/// SPI chip select selection signal.
pub const PIN_SPI_CS_SEL0: KitPin = KitPin::D9;

/// Sensor interrupt signal.
pub const PIN_SEN_INT: KitPin = KitPin::D7;

/// Radar sensor selection.
pub const PIN_RADAR_SEL: KitPin = KitPin::D6;
/// Radar GPIO1 / presence detect.
pub const PIN_RADAR_GPIO1: KitPin = KitPin::D5;
/// Radar GPIO2 / target detect.
pub const PIN_RADAR_GPIO2: KitPin = KitPin::D4;
/// Radar shield open drain LED.
pub const PIN_RS_OD_LED: KitPin = KitPin::J2_12;
pub const PIN_RADAR_ADC1: KitPin = KitPin::J2_2;
pub const PIN_RADAR_ADC2: KitPin = KitPin::J2_4;
pub const PIN_RADAR_RST: KitPin = KitPin::A2;
pub const PIN_RADAR_INT: KitPin = KitPin::A1;

/// Main reset, shared with the TFT display.
pub const PIN_MAIN_RST: KitPin = KitPin::D2;

/// Magnetometer interrupt.
pub const PIN_MAG_INT: KitPin = KitPin::J2_10;
/// Motion sensor interrupt 1.
pub const PIN_IMU_INT_1: KitPin = KitPin::J2_6;
/// Motion sensor interrupt 2.
pub const PIN_IMU_INT_2: KitPin = KitPin::J2_8;

/// PDM microphone data.
pub const PIN_PDM_DATA: KitPin = KitPin::A5;
/// PDM microphone clock.
pub const PIN_PDM_CLK: KitPin = KitPin::A4;

/// PAS CO2 power enable.
pub const PIN_CO2_PWR_EN: KitPin = KitPin::A3;

/// TFT display data/command select.
pub const PIN_SPI_DC_DS: KitPin = KitPin::A0;

/// Pins of the shared I2C bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataBusPins {
    pub sda: KitPin,
    pub scl: KitPin,
}

/// Pins of the shared SPI bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialBusPins {
    pub mosi: KitPin,
    pub miso: KitPin,
    pub sclk: KitPin,
    pub cs: KitPin,
}

/// Control pins of the TFT display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayPins {
    /// Data/command select.
    pub dc: KitPin,
    /// Reset.
    pub rst: KitPin,
}

/// Pins of the PDM microphone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PdmPins {
    pub data: KitPin,
    pub clk: KitPin,
}

pub const DATA_BUS_PINS: DataBusPins =
    DataBusPins { sda: PIN_I2C_SDA, scl: PIN_I2C_SCL };

pub const SERIAL_BUS_PINS: SerialBusPins = SerialBusPins {
    mosi: PIN_SPI_MOSI,
    miso: PIN_SPI_MISO,
    sclk: PIN_SPI_SCK,
    cs: PIN_SPI_CS,
};

pub const DISPLAY_PINS: DisplayPins =
    DisplayPins { dc: PIN_SPI_DC_DS, rst: PIN_MAIN_RST };

pub const PDM_PINS: PdmPins =
    PdmPins { data: PIN_PDM_DATA, clk: PIN_PDM_CLK };
