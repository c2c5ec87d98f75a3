//! # TLV230AIC23B Bit-Banged Driver
//!
//! This is driver for the Texas Instruments TLV320AIC23B audio CODEC /
//! amplifier.
//!
//! Specifically, this driver is for setting the registers in the TLV230AIC23B
//! over its three-wire serial control port, bit-banged on GPIO lines - this
//! driver does not handle the digital audio interface (I²S, or similar). An
//! I²C transport is also provided, for boards with the MODE pin tied low.
//!
//! The [`Codec`] object must cache the register contents because the
//! TLV320AIC23B only has a *write-only* interface and you cannot read back any
//! register contents. Each setter changes one field in the cached register and
//! immediately sends the whole register to the chip.
//!
//! # Example
//!
//! You might setup the Codec like this:
//!
//! ```rust
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::v2::OutputPin;
//! # struct Pin;
//! # impl OutputPin for Pin {
//! #     type Error = Infallible;
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct Delay;
//! # impl embedded_hal::blocking::delay::DelayUs<u32> for Delay {
//! #     fn delay_us(&mut self, _us: u32) {}
//! # }
//! # let (cs, sclk, sdin, delay) = (Pin, Pin, Pin, Delay);
//! use tlv320aic23_bitbang::{BitBang, Codec, Timing};
//!
//! let bus = BitBang::with_timing(cs, sclk, sdin, delay, Timing::new(2)).unwrap();
//! let mut codec = Codec::init(bus).unwrap();
//! codec.set_dac_select(true).unwrap();
//! codec.set_dac_mute(false).unwrap();
//! codec.set_bypass(false).unwrap();
//! codec.set_line_left_mute(true).unwrap();
//! codec.set_headphone_left_volume(100).unwrap();
//! codec.configure_sample_rate(tlv320aic23_bitbang::CONFIG_USB_44K1).unwrap();
//! codec.set_data_format(tlv320aic23_bitbang::DataFormat::I2s).unwrap();
//! codec.bus_enable().unwrap();
//! assert_eq!(
//!     codec.read(tlv320aic23_bitbang::Register::LeftChannelHeadphoneVolumeControl),
//!     0x1E4
//! );
//! ```

#![no_std]
#![deny(unsafe_code)]
#![deny(missing_docs)]

pub mod bus;
pub mod codec;
pub mod config;
pub mod register;

pub use bus::{BitBang, BusAddress, BusError, ControlBus, I2cBus, Timing};
pub use codec::Codec;
pub use config::{
    AudioInput, ClockMode, ConfigParams, DataFormat, Deemphasis, InputBitLength, LrPhase,
    LrSwap, Mode, SidetoneLevel, CONFIG_USB_32K, CONFIG_USB_44K1, CONFIG_USB_48K,
    CONFIG_USB_88K2, CONFIG_USB_8K, CONFIG_USB_96K,
};
pub use register::{Field, InvalidRegister, Register, DEFAULT_REGISTERS, NUM_REGISTERS};

//
// End of file
//
