//! # Registers and Fields
//!
//! The TLV320AIC23B has ten 9-bit control registers. Each register packs one
//! or more fields; a [`Field`] says which register it lives in and which bits
//! it occupies. Fields in the same register never overlap.

//
// Public Types
//

/// The set of registers in the TLV230AIC23B
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Left line input volume, mute and simultaneous update
    LeftLineInputChannelVolumeControl = 0,
    /// Right line input volume, mute and simultaneous update
    RightLineInputChannelVolumeControl = 1,
    /// Left headphone volume, zero-cross and simultaneous update
    LeftChannelHeadphoneVolumeControl = 2,
    /// Right headphone volume, zero-cross and simultaneous update
    RightChannelHeadphoneVolumeControl = 3,
    /// Sidetone, DAC select, bypass, input select and microphone controls
    AnalogAudioPathControl = 4,
    /// DAC soft mute, de-emphasis and ADC high-pass filter
    DigitalAudioPathControl = 5,
    /// Power down bits for each block
    PowerDownControl = 6,
    /// Clock mode, channel swap and phase, word length and data format
    DigitalAudioInterfaceFormat = 7,
    /// Clock dividers, sample rate and oversampling
    SampleRateControl = 8,
    /// Digital audio interface on/off
    DigitalInterfaceActivation = 9,
}

/// Returned when a number does not name one of the ten control registers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidRegister(pub u8);

/// Where a configuration field lives: a register plus a run of bits in it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Field {
    register: Register,
    shift: u8,
    width: u8,
}

//
// Public Data
//

/// How many control registers the chip has.
pub const NUM_REGISTERS: usize = 10;

/// The bits that actually get sent in a register word.
pub const WORD_MASK: u16 = 0x1FF;

/// The words written by [`Codec::init`](crate::Codec::init), indexed by
/// register address.
///
/// * Line inputs at 0 dB, unmuted, no simultaneous update
/// * Headphones at 0 dB, zero-cross on, simultaneous update on
/// * DAC selected, microphone boost on, everything else off
/// * No de-emphasis, DAC unmuted, ADC high-pass filter on
/// * Power-down register clear, so no block is held in power-down
/// * Controller mode, 16-bit I²S
/// * USB clock mode, 48 kHz, CLKOUT divided by 2
/// * Digital interface active
pub const DEFAULT_REGISTERS: [u16; NUM_REGISTERS] = [
    0x017, 0x017, 0x1F9, 0x1F9, 0x011, 0x000, 0x000, 0x043, 0x081, 0x001,
];

/// The word written to [`Register::PowerDownControl`] by
/// [`Codec::power_on`](crate::Codec::power_on). Every power-down bit (0 to 7)
/// is set.
pub const POWER_ON_WORD: u16 = 0x0FF;

/// The word written to [`Register::PowerDownControl`] by
/// [`Codec::power_off`](crate::Codec::power_off). Every power-down bit is
/// clear.
pub const POWER_OFF_WORD: u16 = 0x000;

/// Left/right line simultaneous volume/mute update (LRS)
pub const LINE_LEFT_SIMULTANEOUS: Field =
    Field::new(Register::LeftLineInputChannelVolumeControl, 8, 1);
/// Left line input mute (LIM)
pub const LINE_LEFT_MUTE: Field = Field::new(Register::LeftLineInputChannelVolumeControl, 7, 1);
/// Left line input volume (LIV)
pub const LINE_LEFT_VOLUME: Field = Field::new(Register::LeftLineInputChannelVolumeControl, 0, 5);

/// Right/left line simultaneous volume/mute update (RLS)
pub const LINE_RIGHT_SIMULTANEOUS: Field =
    Field::new(Register::RightLineInputChannelVolumeControl, 8, 1);
/// Right line input mute (RIM)
pub const LINE_RIGHT_MUTE: Field = Field::new(Register::RightLineInputChannelVolumeControl, 7, 1);
/// Right line input volume (RIV)
pub const LINE_RIGHT_VOLUME: Field =
    Field::new(Register::RightLineInputChannelVolumeControl, 0, 5);

/// Left/right headphone simultaneous volume/mute update (LRS)
pub const HEADPHONE_LEFT_SIMULTANEOUS: Field =
    Field::new(Register::LeftChannelHeadphoneVolumeControl, 8, 1);
/// Left headphone zero-cross detect (LZC)
pub const HEADPHONE_LEFT_ZERO_CROSS: Field =
    Field::new(Register::LeftChannelHeadphoneVolumeControl, 7, 1);
/// Left headphone volume (LHV)
pub const HEADPHONE_LEFT_VOLUME: Field =
    Field::new(Register::LeftChannelHeadphoneVolumeControl, 0, 7);

/// Right/left headphone simultaneous volume/mute update (RLS)
pub const HEADPHONE_RIGHT_SIMULTANEOUS: Field =
    Field::new(Register::RightChannelHeadphoneVolumeControl, 8, 1);
/// Right headphone zero-cross detect (RZC)
pub const HEADPHONE_RIGHT_ZERO_CROSS: Field =
    Field::new(Register::RightChannelHeadphoneVolumeControl, 7, 1);
/// Right headphone volume (RHV)
pub const HEADPHONE_RIGHT_VOLUME: Field =
    Field::new(Register::RightChannelHeadphoneVolumeControl, 0, 7);

/// Sidetone attenuation (STA[2:0])
pub const SIDETONE_LEVEL: Field = Field::new(Register::AnalogAudioPathControl, 6, 3);
/// Sidetone enable (STE)
pub const SIDETONE_ENABLE: Field = Field::new(Register::AnalogAudioPathControl, 5, 1);
/// DAC select (DAC)
pub const DAC_SELECT: Field = Field::new(Register::AnalogAudioPathControl, 4, 1);
/// Line input bypass (BYP)
pub const BYPASS: Field = Field::new(Register::AnalogAudioPathControl, 3, 1);
/// ADC input select (INSEL)
pub const INPUT_SELECT: Field = Field::new(Register::AnalogAudioPathControl, 2, 1);
/// Microphone mute (MICM)
pub const MIC_MUTE: Field = Field::new(Register::AnalogAudioPathControl, 1, 1);
/// Microphone +20 dB boost (MICB)
pub const MIC_BOOST: Field = Field::new(Register::AnalogAudioPathControl, 0, 1);

/// DAC soft mute (DACM)
pub const DAC_MUTE: Field = Field::new(Register::DigitalAudioPathControl, 3, 1);
/// De-emphasis control (DEEMP)
pub const DEEMPHASIS: Field = Field::new(Register::DigitalAudioPathControl, 1, 2);
/// ADC high-pass filter (ADCHP)
pub const ADC_HIGHPASS: Field = Field::new(Register::DigitalAudioPathControl, 0, 1);

/// Controller/target mode (MS)
pub const INTERFACE_MODE: Field = Field::new(Register::DigitalAudioInterfaceFormat, 6, 1);
/// DAC left/right swap (LRSWAP)
pub const LR_SWAP: Field = Field::new(Register::DigitalAudioInterfaceFormat, 5, 1);
/// DAC left/right phase (LRP)
pub const LR_PHASE: Field = Field::new(Register::DigitalAudioInterfaceFormat, 4, 1);
/// Input word length (IWL)
pub const INPUT_LENGTH: Field = Field::new(Register::DigitalAudioInterfaceFormat, 2, 2);
/// Data format (FOR)
pub const DATA_FORMAT: Field = Field::new(Register::DigitalAudioInterfaceFormat, 0, 2);

/// Clock output divider (CLKOUT)
pub const CLOCK_OUT_DIVIDE: Field = Field::new(Register::SampleRateControl, 7, 1);
/// Clock input divider (CLKIN)
pub const CLOCK_IN_DIVIDE: Field = Field::new(Register::SampleRateControl, 6, 1);
/// Sample rate control (SR[3:0])
pub const SAMPLE_RATE: Field = Field::new(Register::SampleRateControl, 2, 4);
/// Base oversampling rate (BOSR)
pub const OVERSAMPLING: Field = Field::new(Register::SampleRateControl, 1, 1);
/// Clock mode select, normal or USB (USB/N)
pub const CLOCK_MODE: Field = Field::new(Register::SampleRateControl, 0, 1);

/// Digital interface activation (ACT)
pub const INTERFACE_ACTIVE: Field = Field::new(Register::DigitalInterfaceActivation, 0, 1);

/// Every field the driver knows about, grouped by register.
pub const FIELDS: [Field; 33] = [
    LINE_LEFT_SIMULTANEOUS,
    LINE_LEFT_MUTE,
    LINE_LEFT_VOLUME,
    LINE_RIGHT_SIMULTANEOUS,
    LINE_RIGHT_MUTE,
    LINE_RIGHT_VOLUME,
    HEADPHONE_LEFT_SIMULTANEOUS,
    HEADPHONE_LEFT_ZERO_CROSS,
    HEADPHONE_LEFT_VOLUME,
    HEADPHONE_RIGHT_SIMULTANEOUS,
    HEADPHONE_RIGHT_ZERO_CROSS,
    HEADPHONE_RIGHT_VOLUME,
    SIDETONE_LEVEL,
    SIDETONE_ENABLE,
    DAC_SELECT,
    BYPASS,
    INPUT_SELECT,
    MIC_MUTE,
    MIC_BOOST,
    DAC_MUTE,
    DEEMPHASIS,
    ADC_HIGHPASS,
    INTERFACE_MODE,
    LR_SWAP,
    LR_PHASE,
    INPUT_LENGTH,
    DATA_FORMAT,
    CLOCK_OUT_DIVIDE,
    CLOCK_IN_DIVIDE,
    SAMPLE_RATE,
    OVERSAMPLING,
    CLOCK_MODE,
    INTERFACE_ACTIVE,
];

//
// Private Data
//

/// Writing any value here resets the chip.
pub(crate) const RESET_ADDRESS: u8 = 15;

// Every mask must be computable without overflow
const _: () = {
    let mut i = 0;
    while i < FIELDS.len() {
        assert!(FIELDS[i].fits_in_word());
        i += 1;
    }
};

//
// impls on Public Types
//

impl Register {
    /// All registers, in address order.
    pub const ALL: [Register; NUM_REGISTERS] = [
        Register::LeftLineInputChannelVolumeControl,
        Register::RightLineInputChannelVolumeControl,
        Register::LeftChannelHeadphoneVolumeControl,
        Register::RightChannelHeadphoneVolumeControl,
        Register::AnalogAudioPathControl,
        Register::DigitalAudioPathControl,
        Register::PowerDownControl,
        Register::DigitalAudioInterfaceFormat,
        Register::SampleRateControl,
        Register::DigitalInterfaceActivation,
    ];

    /// The 7-bit bus address of this register.
    pub const fn address(self) -> u8 {
        self as u8
    }

    /// Position of this register in the shadow table.
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl From<Register> for u8 {
    fn from(register: Register) -> u8 {
        register.address()
    }
}

impl TryFrom<u8> for Register {
    type Error = InvalidRegister;

    fn try_from(address: u8) -> Result<Register, InvalidRegister> {
        Register::ALL
            .get(usize::from(address))
            .copied()
            .ok_or(InvalidRegister(address))
    }
}

impl Field {
    /// Describe a field of `width` bits starting at bit `shift`.
    ///
    /// Fields only come from the table in this module, which is checked at
    /// compile time with [`Field::fits_in_word`].
    pub(crate) const fn new(register: Register, shift: u8, width: u8) -> Field {
        Field {
            register,
            shift,
            width,
        }
    }

    /// Whether the field has at least one bit and lies inside a 9-bit word.
    pub const fn fits_in_word(self) -> bool {
        self.width >= 1 && (self.shift as u16 + self.width as u16) <= 9
    }

    /// The register holding this field.
    pub const fn register(self) -> Register {
        self.register
    }

    /// Bit position of the field's LSB.
    pub const fn shift(self) -> u8 {
        self.shift
    }

    /// Number of bits in the field.
    pub const fn width(self) -> u8 {
        self.width
    }

    /// The field's bits, in register position.
    pub const fn mask(self) -> u16 {
        ((1 << self.width) - 1) << self.shift
    }

    /// Replace this field's bits in `word` with the low bits of `value`.
    ///
    /// Bits of `value` that don't fit in the field are dropped, and bits of
    /// `word` outside the field are kept.
    pub const fn insert(self, word: u16, value: u16) -> u16 {
        let low_bits = (1 << self.width) - 1;
        (word & !self.mask()) | ((value & low_bits) << self.shift)
    }

    /// Pull this field's value out of `word`.
    pub const fn extract(self, word: u16) -> u16 {
        (word & self.mask()) >> self.shift
    }
}

//
// Tests
//


//
// End of file
//
