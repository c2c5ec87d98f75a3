//! # Field Values
//!
//! Named values for the fields that take more than an on/off flag. All of
//! these convert into `u16`, so they can be passed straight to the
//! [`Codec`](crate::Codec) setters.

//
// Public Types
//

/// The level of sidetone that is added, when sidetone is enabled.
///
/// Sidetone is when audio input is routed directly to audio output. This is
/// useful when using a microphone and headphones as it allows you to hear
/// yourself more clearly.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SidetoneLevel {
    /// Sidetone at -6dB
    Minus6 = 0b000,
    /// Sidetone at -9dB
    Minus9 = 0b001,
    /// Sidetone at -12dB
    Minus12 = 0b010,
    /// Sidetone at -18dB
    Minus18 = 0b011,
    /// Sidetone at +0dB
    ZeroDb = 0b100,
}

/// Audio input devices available
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AudioInput {
    /// Select the line input
    LineInput = 0,
    /// Select the microphone input
    Microphone = 1,
}

/// De-emphasis filter applied to the DAC
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Deemphasis {
    /// No de-emphasis
    Disabled = 0b00,
    /// De-emphasis for 32 kHz material
    Rate32k = 0b01,
    /// De-emphasis for 44.1 kHz material
    Rate44k1 = 0b10,
    /// De-emphasis for 48 kHz material
    Rate48k = 0b11,
}

/// Whether the TLV230AIC23B generates or receives clock signals.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// TLV230AIC23B receives the BCLK and LRCLK signals. The documentation uses
    /// an archaic term beginning with S.
    Target = 0,
    /// TLV230AIC23B generates the BCLK and LRCLK signals. The documentation
    /// uses the archaic term beginning with M.
    Controller = 1,
}

/// The size, in bits, of each sample
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputBitLength {
    /// 16-bit samples
    B16 = 0b00,
    /// 20-bit samples
    B20 = 0b01,
    /// 24-bit samples
    B24 = 0b10,
    /// 32-bit samples
    B32 = 0b11,
}

/// How the data is sent over the digital bus
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataFormat {
    /// MSB First, Right Aligned
    Right = 0b00,
    /// MSB First, Left Aligned
    Left = 0b01,
    /// I²S Format (i.e. MSB first, `left-1` aligned)
    I2s = 0b10,
    /// DSP Format (frame sync followed by two data words)
    Dsp = 0b11,
}

/// Swap the left and right DAC outputs
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LrSwap {
    /// Don't swap left and right
    Disabled = 0,
    /// Swap Left and Right
    Enabled = 1,
}

/// Control whether LRClk is active high or low
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LrPhase {
    /// Right Channel when LRCIN is high
    RightOnHigh = 0,
    /// Right Channel when LRCIN is low
    RightOnLow = 1,
}

/// What sort of master clock is attached
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockMode {
    /// Normal mode, MCLK is 256fs or 384fs
    Normal = 0,
    /// USB mode, MCLK is 12 MHz
    Usb = 1,
}

/// Describes a specific configuration in terms of MCLK, ADC Sample Rate, and
/// DAC Sample Rate
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigParams {
    /// True if you want to divive the clock input by 2.
    pub clk_in_div_2: bool,
    /// True if you want to divive the clock output by 2.
    pub clk_out_div_2: bool,
    /// Whether a 12 MHz "USB" clock is attached, or a normal audio crystal
    pub clock_mode: ClockMode,
    /// Sample Rate Control
    ///
    /// Take the value from the tables in Datasheet section 3.3.2
    pub src: u8,
    /// Base Oversampling Rate
    ///
    /// Take the value from the tables in Datasheet section 3.3.2
    pub bosr: u8,
}

//
// Public Data
//

/// Configuration for USB Mode (12 MHz), ADC @ 96 kHz, DAC @ 96 kHz
///
/// See datasheet section 3.3.2
pub const CONFIG_USB_96K: ConfigParams = usb(0b0111, 0);

/// Configuration for USB Mode (12 MHz), ADC @ 88.2 kHz, DAC @ 88.2 kHz
///
/// See datasheet section 3.3.2
pub const CONFIG_USB_88K2: ConfigParams = usb(0b1111, 1);

/// Configuration for USB Mode (12 MHz), ADC @ 48 kHz, DAC @ 48 kHz
///
/// See datasheet section 3.3.2
pub const CONFIG_USB_48K: ConfigParams = usb(0b0000, 0);

/// Configuration for USB Mode (12 MHz), ADC @ 44.1 kHz, DAC @ 44.1 kHz
///
/// See datasheet section 3.3.2
pub const CONFIG_USB_44K1: ConfigParams = usb(0b1000, 1);

/// Configuration for USB Mode (12 MHz), ADC @ 32 kHz, DAC @ 32 kHz
///
/// See datasheet section 3.3.2
pub const CONFIG_USB_32K: ConfigParams = usb(0b0110, 0);

/// Configuration for USB Mode (12 MHz), ADC @ 8 kHz, DAC @ 8 kHz
///
/// See datasheet section 3.3.2
pub const CONFIG_USB_8K: ConfigParams = usb(0b0011, 0);

//
// Private Functions
//

const fn usb(src: u8, bosr: u8) -> ConfigParams {
    ConfigParams {
        clk_in_div_2: false,
        clk_out_div_2: false,
        clock_mode: ClockMode::Usb,
        src,
        bosr,
    }
}

//
// impls on Public Types
//

macro_rules! field_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for u16 {
                fn from(value: $t) -> u16 {
                    value as u16
                }
            }
        )*
    };
}

field_value!(
    SidetoneLevel,
    AudioInput,
    Deemphasis,
    Mode,
    InputBitLength,
    DataFormat,
    LrSwap,
    LrPhase,
    ClockMode,
);

//
// Tests
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_convert_to_field_bits() {
        assert_eq!(u16::from(SidetoneLevel::ZeroDb), 0b100);
        assert_eq!(u16::from(Deemphasis::Rate44k1), 0b10);
        assert_eq!(u16::from(DataFormat::Dsp), 0b11);
        assert_eq!(u16::from(Mode::Controller), 1);
        assert_eq!(u16::from(ClockMode::Normal), 0);
    }

    #[test]
    fn usb_configs_use_usb_clock() {
        for params in [
            CONFIG_USB_96K,
            CONFIG_USB_88K2,
            CONFIG_USB_48K,
            CONFIG_USB_44K1,
            CONFIG_USB_32K,
            CONFIG_USB_8K,
        ] {
            assert_eq!(params.clock_mode, ClockMode::Usb);
            assert!(params.src <= 0b1111);
            assert!(params.bosr <= 1);
        }
    }
}

//
// End of file
//
