/// Peripherals the shield brings up and may later tear down.
///
/// Declaration order is teardown order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Peripheral {
    Humidity,
    Motion,
    Magnetometer,
    Pressure,
    AudioCapture,
    Display,
    /// CO2 sensor. Torn down before its power line.
    Co2,
    /// CO2 power enable output.
    Co2Power,
}

impl Peripheral {
    pub const COUNT: usize = 8;

    /// Every peripheral, in teardown order.
    pub const TEARDOWN_ORDER: [Peripheral; Self::COUNT] = [
        Peripheral::Humidity,
        Peripheral::Motion,
        Peripheral::Magnetometer,
        Peripheral::Pressure,
        Peripheral::AudioCapture,
        Peripheral::Display,
        Peripheral::Co2,
        Peripheral::Co2Power,
    ];

    const fn index(self) -> usize {
        self as usize
    }
}

/// Bring-up stages, in the order they run.
///
/// Used to attribute a failed bring-up, since the error itself is passed
/// through from the collaborator as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stage {
    DataBus,
    SerialBus,
    Humidity,
    Motion,
    MotionConfig,
    Magnetometer,
    Pressure,
    AudioCapture,
    Display,
    Co2Power,
    Co2,
}

/// Record of which peripherals are currently started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InitializedSet {
    started: [bool; Peripheral::COUNT],
}

impl InitializedSet {
    pub const fn new() -> Self {
        Self { started: [false; Peripheral::COUNT] }
    }

    pub fn insert(&mut self, peripheral: Peripheral) {
        self.started[peripheral.index()] = true;
    }

    pub fn contains(&self, peripheral: Peripheral) -> bool {
        self.started[peripheral.index()]
    }

    pub fn clear(&mut self) {
        self.started = [false; Peripheral::COUNT];
    }

    pub fn is_empty(&self) -> bool {
        !self.started.iter().any(|s| *s)
    }

    pub fn len(&self) -> usize {
        self.started.iter().filter(|s| **s).count()
    }

    /// Started peripherals, in teardown order.
    pub fn iter(&self) -> impl Iterator<Item = Peripheral> + '_ {
        Peripheral::TEARDOWN_ORDER
            .into_iter()
            .filter(|p| self.contains(*p))
    }
}
