//! # Control Bus
//!
//! The TLV320AIC23B control port is write-only. With the MODE pin tied high it
//! accepts a 16-bit word on a three-wire serial interface: a 7-bit register
//! address followed by 9 bits of register data, both MSB first, latched into
//! the chip on the rising edge of CS. With MODE tied low the same word is sent
//! as two bytes over I²C.
//!
//! [`BitBang`] implements the three-wire interface on plain GPIO lines, and
//! [`I2cBus`] implements the I²C variant. Both are used through the
//! [`ControlBus`] trait.

use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::blocking::i2c;
use embedded_hal::digital::v2::OutputPin;

//
// Public Types
//

/// Something that can push one register write to the CODEC.
///
/// There is no acknowledgement on this bus. An `Ok` result only means that the
/// host managed to drive the transaction, not that the chip accepted it.
pub trait ControlBus {
    /// The error raised by the underlying hardware.
    type Error;

    /// Send `data` to the register at `address`.
    ///
    /// Only the low 7 bits of `address` and the low 9 bits of `data` are
    /// sent. Callers are expected to have masked them already.
    fn transmit(&mut self, address: u8, data: u16) -> Result<(), Self::Error>;
}

/// Timing of the bit-banged bus.
///
/// Every line transition is followed by a busy-wait of `settle_us`
/// microseconds, so one bit takes three settle periods and one transaction
/// takes `2 + 3 * 16` of them. The chip needs roughly 80 ns of clock-high and
/// clock-low time and 20 ns of data setup, so the minimum of 1 µs is plenty on
/// any host whose delay implementation is honest.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    settle_us: u32,
}

/// Identifies which line failed while bit-banging.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError<CsE, SclkE, SdinE> {
    /// Error driving the chip-select line
    ChipSelect(CsE),
    /// Error driving the serial clock line
    Clock(SclkE),
    /// Error driving the serial data line
    Data(SdinE),
}

/// A three-wire control bus, bit-banged on three GPIO outputs.
///
/// This object holds no state between transactions apart from the lines
/// themselves. Mutual exclusion comes from `&mut self`: one transaction always
/// runs to completion, with CS framing intact, before the next can start.
pub struct BitBang<CS, SCLK, SDIN, D> {
    cs: CS,
    sclk: SCLK,
    sdin: SDIN,
    delay: D,
    timing: Timing,
}

/// The TLV230AIC23B has one of two I²C addresses, depending on whether the CS
/// pin is pulled high or low.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusAddress {
    /// The address when the CS pin is high
    CsHigh = 0x1B,
    /// The address when the CS pin is low
    CsLow = 0x1A,
}

/// A control bus over I²C, for boards with the MODE pin tied low.
pub struct I2cBus<I2C> {
    i2c: I2C,
    bus_address: u8,
}

//
// Public Data
//

/// Number of address bits in one transaction.
pub const ADDRESS_BITS: u32 = 7;

/// Number of data bits in one transaction.
pub const DATA_BITS: u32 = 9;

//
// Private Types
//

type PinError<CS, SCLK, SDIN> = BusError<
    <CS as OutputPin>::Error,
    <SCLK as OutputPin>::Error,
    <SDIN as OutputPin>::Error,
>;

//
// impls on Public Types
//

impl<T> ControlBus for &mut T
where
    T: ControlBus + ?Sized,
{
    type Error = T::Error;

    fn transmit(&mut self, address: u8, data: u16) -> Result<(), Self::Error> {
        (**self).transmit(address, data)
    }
}

impl Timing {
    /// The shortest settle time we allow.
    pub const MIN_SETTLE_US: u32 = 1;

    /// Settle for 1 µs after every edge.
    pub const DEFAULT: Timing = Timing {
        settle_us: Self::MIN_SETTLE_US,
    };

    /// Build a timing configuration. Values below [`Timing::MIN_SETTLE_US`]
    /// are raised to it.
    pub const fn new(settle_us: u32) -> Timing {
        Timing {
            settle_us: if settle_us < Self::MIN_SETTLE_US {
                Self::MIN_SETTLE_US
            } else {
                settle_us
            },
        }
    }

    /// The delay after each line transition, in microseconds.
    pub const fn settle_us(&self) -> u32 {
        self.settle_us
    }
}

impl Default for Timing {
    fn default() -> Timing {
        Timing::DEFAULT
    }
}

impl<CS, SCLK, SDIN, D> BitBang<CS, SCLK, SDIN, D>
where
    CS: OutputPin,
    SCLK: OutputPin,
    SDIN: OutputPin,
    D: DelayUs<u32>,
{
    /// Take ownership of the three lines and a delay source, using
    /// [`Timing::DEFAULT`].
    ///
    /// The lines are parked idle: CS high, SCLK low, SDIN low.
    pub fn new(
        cs: CS,
        sclk: SCLK,
        sdin: SDIN,
        delay: D,
    ) -> Result<Self, PinError<CS, SCLK, SDIN>> {
        Self::with_timing(cs, sclk, sdin, delay, Timing::DEFAULT)
    }

    /// As [`BitBang::new`], with an explicit [`Timing`].
    pub fn with_timing(
        mut cs: CS,
        mut sclk: SCLK,
        mut sdin: SDIN,
        delay: D,
        timing: Timing,
    ) -> Result<Self, PinError<CS, SCLK, SDIN>> {
        cs.set_high().map_err(BusError::ChipSelect)?;
        sclk.set_low().map_err(BusError::Clock)?;
        sdin.set_low().map_err(BusError::Data)?;
        Ok(BitBang {
            cs,
            sclk,
            sdin,
            delay,
            timing,
        })
    }

    /// Change the bus timing.
    pub fn set_timing(&mut self, timing: Timing) {
        self.timing = timing;
    }

    /// Get the bus timing.
    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Give back the lines and the delay source.
    pub fn release(self) -> (CS, SCLK, SDIN, D) {
        (self.cs, self.sclk, self.sdin, self.delay)
    }

    fn settle(&mut self) {
        self.delay.delay_us(self.timing.settle_us);
    }

    /// Clock out the low `bits` bits of `word`, MSB first.
    ///
    /// The chip samples SDIN on the rising edge of SCLK.
    fn clock_out(&mut self, word: u16, bits: u32) -> Result<(), PinError<CS, SCLK, SDIN>> {
        for bit in (0..bits).rev() {
            if word & (1 << bit) != 0 {
                self.sdin.set_high().map_err(BusError::Data)?;
            } else {
                self.sdin.set_low().map_err(BusError::Data)?;
            }
            self.settle();
            self.sclk.set_high().map_err(BusError::Clock)?;
            self.settle();
            self.sclk.set_low().map_err(BusError::Clock)?;
            self.settle();
        }
        Ok(())
    }
}

impl<CS, SCLK, SDIN, D> ControlBus for BitBang<CS, SCLK, SDIN, D>
where
    CS: OutputPin,
    SCLK: OutputPin,
    SDIN: OutputPin,
    D: DelayUs<u32>,
{
    type Error = PinError<CS, SCLK, SDIN>;

    fn transmit(&mut self, address: u8, data: u16) -> Result<(), Self::Error> {
        self.cs.set_low().map_err(BusError::ChipSelect)?;
        self.settle();
        let shifted = self
            .clock_out(u16::from(address), ADDRESS_BITS)
            .and_then(|_| self.clock_out(data, DATA_BITS));
        if let Err(e) = shifted {
            // Close the frame so the next transaction starts clean. The chip
            // will latch whatever partial word it saw.
            let _ = self.cs.set_high();
            self.settle();
            return Err(e);
        }
        // Rising CS latches the word
        self.cs.set_high().map_err(BusError::ChipSelect)?;
        self.settle();
        Ok(())
    }
}

impl From<BusAddress> for u8 {
    fn from(addr: BusAddress) -> u8 {
        addr as u8
    }
}

impl<I2C> I2cBus<I2C> {
    /// Wrap an I²C bus, talking to the CODEC at the given address.
    pub fn new(i2c: I2C, bus_address: BusAddress) -> I2cBus<I2C> {
        I2cBus {
            i2c,
            bus_address: bus_address.into(),
        }
    }

    /// Give back the I²C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> ControlBus for I2cBus<I2C>
where
    I2C: i2c::Write,
{
    type Error = I2C::Error;

    fn transmit(&mut self, address: u8, data: u16) -> Result<(), Self::Error> {
        // Same 16 bits as the serial bus, just split into two bytes
        let byte1 = ((address & 0x7F) << 1) | ((data >> 8) & 1) as u8;
        let byte2 = (data & 0xFF) as u8;
        self.i2c.write(self.bus_address, &[byte1, byte2])
    }
}

//
// Tests
//

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use core::cell::RefCell;
    use core::convert::Infallible;
    use std::vec::Vec;

    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    enum Line {
        Cs,
        Sclk,
        Sdin,
    }

    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    enum Event {
        Set(Line, bool),
        Delay(u32),
    }

    type Trace = RefCell<Vec<Event>>;

    struct Pin<'a> {
        line: Line,
        trace: &'a Trace,
    }

    impl OutputPin for Pin<'_> {
        type Error = Infallible;

        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.trace.borrow_mut().push(Event::Set(self.line, false));
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.trace.borrow_mut().push(Event::Set(self.line, true));
            Ok(())
        }
    }

    /// Records a level change, then fails on the next high.
    struct BrokenPin<'a> {
        trace: &'a Trace,
    }

    impl OutputPin for BrokenPin<'_> {
        type Error = ();

        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.trace.borrow_mut().push(Event::Set(Line::Sdin, false));
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            Err(())
        }
    }

    struct Delay<'a> {
        trace: &'a Trace,
    }

    impl DelayUs<u32> for Delay<'_> {
        fn delay_us(&mut self, us: u32) {
            self.trace.borrow_mut().push(Event::Delay(us));
        }
    }

    fn make_bus(trace: &Trace, timing: Timing) -> BitBang<Pin<'_>, Pin<'_>, Pin<'_>, Delay<'_>> {
        let bus = BitBang::with_timing(
            Pin {
                line: Line::Cs,
                trace,
            },
            Pin {
                line: Line::Sclk,
                trace,
            },
            Pin {
                line: Line::Sdin,
                trace,
            },
            Delay { trace },
            timing,
        )
        .unwrap();
        trace.borrow_mut().clear();
        bus
    }

    /// Replay a trace and return the SDIN level seen at each rising SCLK edge,
    /// grouped into CS frames.
    fn frames(events: &[Event]) -> Vec<Vec<bool>> {
        let mut frames = Vec::new();
        let mut current = Vec::new();
        let mut cs = true;
        let mut sdin = false;
        for event in events {
            match *event {
                Event::Set(Line::Cs, level) => {
                    if !cs && level {
                        frames.push(core::mem::take(&mut current));
                    }
                    cs = level;
                }
                Event::Set(Line::Sdin, level) => sdin = level,
                Event::Set(Line::Sclk, true) if !cs => current.push(sdin),
                _ => {}
            }
        }
        frames
    }

    fn to_word(bits: &[bool]) -> u16 {
        bits.iter().fold(0, |acc, &bit| (acc << 1) | u16::from(bit))
    }

    #[test]
    fn new_parks_lines_idle() {
        let trace = Trace::default();
        let _bus = BitBang::new(
            Pin {
                line: Line::Cs,
                trace: &trace,
            },
            Pin {
                line: Line::Sclk,
                trace: &trace,
            },
            Pin {
                line: Line::Sdin,
                trace: &trace,
            },
            Delay { trace: &trace },
        )
        .unwrap();
        assert_eq!(
            *trace.borrow(),
            [
                Event::Set(Line::Cs, true),
                Event::Set(Line::Sclk, false),
                Event::Set(Line::Sdin, false),
            ]
        );
    }

    #[test]
    fn sixteen_pulses_address_then_data_msb_first() {
        let trace = Trace::default();
        let mut bus = make_bus(&trace, Timing::DEFAULT);
        bus.transmit(0x04, 0x011).unwrap();
        let frames = frames(&trace.borrow());
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].len(), 16);
        // Address 4 is 0b000_0100, data 0x011 is 0b0_0001_0001
        assert_eq!(to_word(&frames[0][..7]), 0x04);
        assert_eq!(to_word(&frames[0][7..]), 0x011);
        assert_eq!(to_word(&frames[0]), (0x04 << 9) | 0x011);
        assert!(frames[0][4]);
        assert!(frames[0][15]);
    }

    #[test]
    fn chip_select_frames_every_pulse() {
        let trace = Trace::default();
        let mut bus = make_bus(&trace, Timing::DEFAULT);
        bus.transmit(0x7F, 0x1FF).unwrap();
        let events = trace.borrow();
        let cs_low = events
            .iter()
            .position(|e| *e == Event::Set(Line::Cs, false))
            .unwrap();
        let cs_high = events
            .iter()
            .position(|e| *e == Event::Set(Line::Cs, true))
            .unwrap();
        let pulses: Vec<usize> = events
            .iter()
            .enumerate()
            .filter(|(_, e)| **e == Event::Set(Line::Sclk, true))
            .map(|(i, _)| i)
            .collect();
        let last_fall = events
            .iter()
            .rposition(|e| *e == Event::Set(Line::Sclk, false))
            .unwrap();
        assert_eq!(pulses.len(), 16);
        assert!(pulses.iter().all(|&i| cs_low < i && i < cs_high));
        assert!(last_fall < cs_high);
        assert_eq!(cs_low, 0);
    }

    #[test]
    fn every_transition_is_followed_by_the_settle_delay() {
        let trace = Trace::default();
        let mut bus = make_bus(&trace, Timing::new(7));
        bus.transmit(0x08, 0x0A5).unwrap();
        let events = trace.borrow();
        // CS low, 16 * (SDIN, SCLK high, SCLK low), CS high
        assert_eq!(events.len(), 2 * (2 + 3 * 16));
        for pair in events.chunks(2) {
            assert!(matches!(pair[0], Event::Set(_, _)));
            assert_eq!(pair[1], Event::Delay(7));
        }
    }

    #[test]
    fn wide_values_are_truncated_to_field_width() {
        let trace = Trace::default();
        let mut bus = make_bus(&trace, Timing::DEFAULT);
        bus.transmit(0x85, 0xFE03).unwrap();
        let frames = frames(&trace.borrow());
        assert_eq!(frames[0].len(), 16);
        assert_eq!(to_word(&frames[0][..7]), 0x05);
        assert_eq!(to_word(&frames[0][7..]), 0x003);
    }

    #[test]
    fn transactions_are_independent() {
        let trace = Trace::default();
        let mut bus = make_bus(&trace, Timing::DEFAULT);
        bus.transmit(0x00, 0x017).unwrap();
        bus.transmit(0x00, 0x017).unwrap();
        let frames = frames(&trace.borrow());
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0], frames[1]);
    }

    #[test]
    fn timing_is_clamped() {
        assert_eq!(Timing::new(0).settle_us(), Timing::MIN_SETTLE_US);
        assert_eq!(Timing::new(150).settle_us(), 150);
        assert_eq!(Timing::default(), Timing::DEFAULT);

        let trace = Trace::default();
        let mut bus = make_bus(&trace, Timing::DEFAULT);
        bus.set_timing(Timing::new(3));
        assert_eq!(bus.timing().settle_us(), 3);
        bus.transmit(0, 0).unwrap();
        assert!(trace.borrow().contains(&Event::Delay(3)));
        assert!(!trace.borrow().contains(&Event::Delay(1)));
    }

    #[test]
    fn data_line_failure_releases_chip_select() {
        let trace = Trace::default();
        let mut bus = BitBang::new(
            Pin {
                line: Line::Cs,
                trace: &trace,
            },
            Pin {
                line: Line::Sclk,
                trace: &trace,
            },
            BrokenPin { trace: &trace },
            Delay { trace: &trace },
        )
        .unwrap();
        // Address 0x40 needs SDIN high on the very first bit
        assert_eq!(bus.transmit(0x40, 0), Err(BusError::Data(())));
        let events = trace.borrow();
        let n = events.len();
        assert_eq!(events[n - 2], Event::Set(Line::Cs, true));
        assert_eq!(events[n - 1], Event::Delay(Timing::MIN_SETTLE_US));
        assert!(!events.contains(&Event::Set(Line::Sclk, true)));
    }

    #[derive(Default)]
    struct I2c {
        writes: Vec<(u8, Vec<u8>)>,
    }

    impl i2c::Write for I2c {
        type Error = Infallible;

        fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
            self.writes.push((address, bytes.to_vec()));
            Ok(())
        }
    }

    #[test]
    fn i2c_packs_ninth_bit_into_first_byte() {
        let mut bus = I2cBus::new(I2c::default(), BusAddress::CsLow);
        bus.transmit(0x08, 0x181).unwrap();
        bus.transmit(0x02, 0x0F9).unwrap();
        let i2c = bus.release();
        assert_eq!(i2c.writes[0], (0x1A, std::vec![0x11, 0x81]));
        assert_eq!(i2c.writes[1], (0x1A, std::vec![0x04, 0xF9]));
    }

    #[test]
    fn i2c_uses_selected_address() {
        let mut bus = I2cBus::new(I2c::default(), BusAddress::CsHigh);
        bus.transmit(0x09, 0x001).unwrap();
        assert_eq!(bus.release().writes[0].0, 0x1B);
    }
}

//
// End of file
//
