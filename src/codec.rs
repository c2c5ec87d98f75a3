//! # Register Model
//!
//! The [`Codec`] object must cache the register contents because the
//! TLV320AIC23B only has a *write-only* interface and you cannot read back any
//! register contents. Every setter updates one field in the cached word and
//! then sends the whole word, because the chip only takes whole-register
//! writes.

use crate::bus::ControlBus;
use crate::config::{ConfigParams, DataFormat, InputBitLength, LrPhase, LrSwap, Mode};
use crate::register::{self, Field, InvalidRegister, Register, NUM_REGISTERS, WORD_MASK};

//
// Public Types
//

/// Represents the state inside our TLV230AIC23B chip.
///
/// The only way to get one is [`Codec::init`], so a `Codec` always holds a
/// register cache that matches what was last sent to the chip.
pub struct Codec<B> {
    bus: B,
    register_cache: [u16; NUM_REGISTERS],
}

//
// Private Macros
//

/// One setter per [`Field`], each a masked write of that field.
///
/// Numeric fields take a plain `u16`; flag and enum fields take anything that
/// converts into one.
macro_rules! field_setters {
    ($($(#[$meta:meta])* $name:ident($value:ty) => $field:ident;)*) => {
        $(
            $(#[$meta])*
            ///
            /// Only the low bits that fit the field are used. Sends the
            /// updated register to the chip.
            pub fn $name(&mut self, value: $value) -> Result<(), B::Error> {
                self.write_field(register::$field, value.into())
            }
        )*
    };
}

//
// impls on Public Types
//

impl<B> Codec<B>
where
    B: ControlBus,
{
    /// Set every register to [`register::DEFAULT_REGISTERS`] and send them to
    /// the chip, lowest address first.
    pub fn init(bus: B) -> Result<Codec<B>, B::Error> {
        let mut codec = Codec {
            bus,
            register_cache: register::DEFAULT_REGISTERS,
        };
        #[cfg(feature = "defmt")]
        defmt::info!("Initialising TLV230AIC23B");
        codec.sync()?;
        Ok(codec)
    }

    /// Software-reset the chip, then set it up again exactly as
    /// [`Codec::init`] does.
    pub fn reset(&mut self) -> Result<(), B::Error> {
        #[cfg(feature = "defmt")]
        defmt::info!("Resetting TLV230AIC23B");
        self.bus.transmit(register::RESET_ADDRESS, 0)?;
        self.register_cache = register::DEFAULT_REGISTERS;
        self.sync()
    }

    /// Transfer all registers from the cache to the actual chip.
    ///
    /// Useful if the chip lost power, or an earlier write failed.
    pub fn sync(&mut self) -> Result<(), B::Error> {
        for register in Register::ALL {
            let word = self.register_cache[register.index()];
            self.send(register, word)?;
        }
        Ok(())
    }

    /// Get the cached value of a register. Does not touch the bus.
    pub fn read(&self, register: Register) -> u16 {
        self.register_cache[register.index()]
    }

    /// Get the cached value of a register, by numeric address.
    ///
    /// Addresses outside `0..10` are rejected.
    pub fn read_address(&self, address: u8) -> Result<u16, InvalidRegister> {
        Register::try_from(address).map(|register| self.read(register))
    }

    /// Get the cached value of a single field, shifted down to bit 0.
    pub fn field(&self, field: Field) -> u16 {
        field.extract(self.read(field.register()))
    }

    /// The whole register cache, indexed by address.
    pub fn registers(&self) -> &[u16; NUM_REGISTERS] {
        &self.register_cache
    }

    /// Replace one field of a register, keeping every other bit, and send the
    /// new word to the chip.
    pub fn write_field(&mut self, field: Field, value: u16) -> Result<(), B::Error> {
        let word = field.insert(self.read(field.register()), value);
        self.write_register(field.register(), word)
    }

    field_setters! {
        /// Left/right line simultaneous volume/mute update.
        set_line_left_simultaneous(impl Into<u16>) => LINE_LEFT_SIMULTANEOUS;
        /// Left line input mute.
        set_line_left_mute(impl Into<u16>) => LINE_LEFT_MUTE;
        /// Left line input volume.
        ///
        /// * A value of 0 is -34.5 db
        /// * A value of 23 is 0 dB
        /// * A value of 31 is +12 db
        ///
        /// There is 1.5 dB per step.
        set_line_input_left_volume(u16) => LINE_LEFT_VOLUME;
        /// Right/left line simultaneous volume/mute update.
        set_line_right_simultaneous(impl Into<u16>) => LINE_RIGHT_SIMULTANEOUS;
        /// Right line input mute.
        set_line_right_mute(impl Into<u16>) => LINE_RIGHT_MUTE;
        /// Right line input volume. See [`Codec::set_line_input_left_volume`].
        set_line_input_right_volume(u16) => LINE_RIGHT_VOLUME;
        /// Left/right headphone simultaneous volume/mute update.
        set_headphone_left_simultaneous(impl Into<u16>) => HEADPHONE_LEFT_SIMULTANEOUS;
        /// Left headphone zero-cross detect.
        set_headphone_left_zero_cross(impl Into<u16>) => HEADPHONE_LEFT_ZERO_CROSS;
        /// Left headphone volume.
        ///
        /// * A value of 127 is +6 dB
        /// * A value of 121 is 0 dB
        /// * A value of 48 or below is muted
        ///
        /// There is 1 dB per step.
        set_headphone_left_volume(u16) => HEADPHONE_LEFT_VOLUME;
        /// Right/left headphone simultaneous volume/mute update.
        set_headphone_right_simultaneous(impl Into<u16>) => HEADPHONE_RIGHT_SIMULTANEOUS;
        /// Right headphone zero-cross detect.
        set_headphone_right_zero_cross(impl Into<u16>) => HEADPHONE_RIGHT_ZERO_CROSS;
        /// Right headphone volume. See [`Codec::set_headphone_left_volume`].
        set_headphone_right_volume(u16) => HEADPHONE_RIGHT_VOLUME;
        /// Sidetone level. See [`SidetoneLevel`](crate::SidetoneLevel).
        set_sidetone_level(impl Into<u16>) => SIDETONE_LEVEL;
        /// Whether sidetone is added to the analog output.
        set_sidetone_enable(impl Into<u16>) => SIDETONE_ENABLE;
        /// Whether the DAC is heard at the analog output.
        set_dac_select(impl Into<u16>) => DAC_SELECT;
        /// Route the line input straight to the line output.
        set_bypass(impl Into<u16>) => BYPASS;
        /// Which input feeds the ADC. See [`AudioInput`](crate::AudioInput).
        set_input_select(impl Into<u16>) => INPUT_SELECT;
        /// Microphone mute.
        set_mic_mute(impl Into<u16>) => MIC_MUTE;
        /// Microphone +20 dB boost.
        set_mic_boost(impl Into<u16>) => MIC_BOOST;
        /// DAC soft mute.
        set_dac_mute(impl Into<u16>) => DAC_MUTE;
        /// De-emphasis filter. See [`Deemphasis`](crate::Deemphasis).
        set_deemphasis(impl Into<u16>) => DEEMPHASIS;
        /// ADC high-pass filter.
        set_adc_highpass(impl Into<u16>) => ADC_HIGHPASS;
        /// Whether the chip drives the clocks. See [`Mode`].
        set_interface_mode(impl Into<u16>) => INTERFACE_MODE;
        /// Swap the DAC left and right channels. See [`LrSwap`].
        set_lr_swap(impl Into<u16>) => LR_SWAP;
        /// Phase of LRCIN. See [`LrPhase`].
        set_lr_phase(impl Into<u16>) => LR_PHASE;
        /// Sample width. See [`InputBitLength`].
        set_input_length(impl Into<u16>) => INPUT_LENGTH;
        /// Digital audio data format. See [`DataFormat`].
        set_data_format(impl Into<u16>) => DATA_FORMAT;
        /// Divide CLKOUT by 2.
        set_clock_out_divide(impl Into<u16>) => CLOCK_OUT_DIVIDE;
        /// Divide MCLK by 2 on the way in.
        set_clock_in_divide(impl Into<u16>) => CLOCK_IN_DIVIDE;
        /// Sample rate code. Take the value from the tables in datasheet
        /// section 3.3.2.
        set_sample_rate(u16) => SAMPLE_RATE;
        /// Base oversampling rate.
        set_oversampling(impl Into<u16>) => OVERSAMPLING;
        /// USB or normal clock mode. See [`ClockMode`](crate::ClockMode).
        set_clock_mode(impl Into<u16>) => CLOCK_MODE;
    }

    /// Write the all-ones word to the power register.
    ///
    /// Writes [`register::POWER_ON_WORD`] over whatever was in the power
    /// register before. Register 6 holds power-*down* bits, so this sets the
    /// power-down bit of every block (bits 0 to 7).
    pub fn power_on(&mut self) -> Result<(), B::Error> {
        self.write_register(Register::PowerDownControl, register::POWER_ON_WORD)
    }

    /// Write the all-zeros word to the power register.
    ///
    /// Writes [`register::POWER_OFF_WORD`] over whatever was in the power
    /// register before. With every power-down bit clear, every block is left
    /// running.
    pub fn power_off(&mut self) -> Result<(), B::Error> {
        self.write_register(Register::PowerDownControl, register::POWER_OFF_WORD)
    }

    /// Turn the digital audio interface on.
    pub fn bus_enable(&mut self) -> Result<(), B::Error> {
        self.write_field(register::INTERFACE_ACTIVE, 1)
    }

    /// Turn the digital audio interface off.
    pub fn bus_disable(&mut self) -> Result<(), B::Error> {
        self.write_field(register::INTERFACE_ACTIVE, 0)
    }

    /// Configure the TLV230AIC23B for a specific DAC and ADC sample rate, given
    /// a specific MCLK frequency, in a single write.
    ///
    /// Look up the appropriate settings for your current MCLK crystal frequency
    /// in the datasheet. Some useful consts for [`ConfigParams`] are provided.
    pub fn configure_sample_rate(&mut self, params: ConfigParams) -> Result<(), B::Error> {
        let word = [
            (register::CLOCK_OUT_DIVIDE, u16::from(params.clk_out_div_2)),
            (register::CLOCK_IN_DIVIDE, u16::from(params.clk_in_div_2)),
            (register::SAMPLE_RATE, u16::from(params.src)),
            (register::OVERSAMPLING, u16::from(params.bosr)),
            (register::CLOCK_MODE, u16::from(params.clock_mode)),
        ]
        .iter()
        .fold(self.read(Register::SampleRateControl), |word, (field, value)| {
            field.insert(word, *value)
        });
        self.write_register(Register::SampleRateControl, word)
    }

    /// Configure the digital audio interface format in a single write.
    pub fn configure_interface(
        &mut self,
        mode: Mode,
        lr_swap: LrSwap,
        lr_phase: LrPhase,
        word_length: InputBitLength,
        format: DataFormat,
    ) -> Result<(), B::Error> {
        let word = [
            (register::INTERFACE_MODE, u16::from(mode)),
            (register::LR_SWAP, u16::from(lr_swap)),
            (register::LR_PHASE, u16::from(lr_phase)),
            (register::INPUT_LENGTH, u16::from(word_length)),
            (register::DATA_FORMAT, u16::from(format)),
        ]
        .iter()
        .fold(
            self.read(Register::DigitalAudioInterfaceFormat),
            |word, (field, value)| field.insert(word, *value),
        );
        self.write_register(Register::DigitalAudioInterfaceFormat, word)
    }

    /// Give back the bus. The chip keeps its settings.
    pub fn release(self) -> B {
        self.bus
    }

    /// Store a whole word in the cache, then send it.
    ///
    /// The cache is updated even if the send fails, so a later
    /// [`Codec::sync`] pushes the intended state.
    fn write_register(&mut self, register: Register, word: u16) -> Result<(), B::Error> {
        let word = word & WORD_MASK;
        self.register_cache[register.index()] = word;
        self.send(register, word)
    }

    fn send(&mut self, register: Register, word: u16) -> Result<(), B::Error> {
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "Setting TLV230AIC23B 0x{:02x} to 0x{:03x}",
            register.address(),
            word
        );
        self.bus.transmit(register.address(), word)
    }
}

//
// Tests
//


//
// End of file
//
