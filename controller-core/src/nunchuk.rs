//! Wii Nunchuk auxiliary analog source (I2C).
//!
//! The wire protocol is handled by the `wii-ext` blocking driver. This
//! source attaches the driver once a device answers on the bus, and drops
//! back to probing the bus when a read fails. Only the stick feeds the
//! snapshot.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use wii_ext::blocking_impl::nunchuk::Nunchuk;

use controller_proto::ANALOG_NEUTRAL;

use crate::input::InputSource;
use crate::types::InputState;

/// Fixed 7-bit I2C address of every Nunchuk.
pub const NUNCHUK_ADDRESS: u8 = 0x52;

/// Error type for auxiliary device operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AuxError {
    /// Bus transaction failed (device absent or NACK).
    Bus,
    /// The driver failed to initialise and kept the bus.
    Lost,
}

enum Link<I, D> {
    /// No driver attached; the bus is probed each poll.
    Detached(I, D),
    Attached(Nunchuk<I, D>),
    Lost,
}

/// Nunchuk input source.
///
/// Reports `connected = false` with the stick at rest whenever the device
/// cannot be read.
pub struct NunchukInput<I, D> {
    link: Link<I, D>,
}

impl<I: I2c, D: DelayNs> NunchukInput<I, D> {
    #[must_use]
    pub const fn new(i2c: I, delay: D) -> Self {
        Self {
            link: Link::Detached(i2c, delay),
        }
    }

    /// Whether a driver is attached to a responding device.
    pub fn is_attached(&self) -> bool {
        matches!(self.link, Link::Attached(_))
    }

    /// Read the stick position, attaching the driver first if needed.
    pub fn read_stick(&mut self) -> Result<(u8, u8), AuxError> {
        let (link, result) = match core::mem::replace(&mut self.link, Link::Lost) {
            Link::Detached(mut i2c, delay) => {
                if i2c.read(NUNCHUK_ADDRESS, &mut [0u8; 1]).is_err() {
                    (Link::Detached(i2c, delay), Err(AuxError::Bus))
                } else {
                    match Nunchuk::new(i2c, delay) {
                        Ok(driver) => read_attached(driver),
                        Err(_) => (Link::Lost, Err(AuxError::Lost)),
                    }
                }
            }
            Link::Attached(driver) => read_attached(driver),
            Link::Lost => (Link::Lost, Err(AuxError::Lost)),
        };
        self.link = link;
        result
    }
}

fn read_attached<I: I2c, D: DelayNs>(
    mut driver: Nunchuk<I, D>,
) -> (Link<I, D>, Result<(u8, u8), AuxError>) {
    match driver.read() {
        Ok(reading) => {
            let stick = (recentre(reading.joystick_x), recentre(reading.joystick_y));
            (Link::Attached(driver), Ok(stick))
        }
        Err(_) => {
            let (i2c, delay) = driver.destroy();
            (Link::Detached(i2c, delay), Err(AuxError::Bus))
        }
    }
}

/// Map a calibrated offset back onto the 0..=255 axis centred at 128.
fn recentre(offset: i8) -> u8 {
    (i16::from(offset) + i16::from(ANALOG_NEUTRAL)).clamp(0, 255) as u8
}

impl<I: I2c, D: DelayNs> InputSource for NunchukInput<I, D> {
    fn merge_into(&mut self, inputs: &mut InputState) {
        match self.read_stick() {
            Ok((x, y)) => {
                inputs.analog.connected = true;
                inputs.analog.stick_x = x;
                inputs.analog.stick_y = y;
            }
            Err(_) => {
                inputs.analog.connected = false;
                inputs.analog.stick_x = ANALOG_NEUTRAL;
                inputs.analog.stick_y = ANALOG_NEUTRAL;
            }
        }
    }
}
