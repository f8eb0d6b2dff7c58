//! Form parameters: raw submission, defaults and validation.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use image::Rgb;
use qrcode::EcLevel;
use serde::Deserialize;

use crate::theme::Theme;

pub const DEFAULT_PAYLOAD: &str = "https://streamlit.io";
pub const MODULE_SIZE_RANGE: RangeInclusive<u32> = 1..=20;
pub const BORDER_RANGE: RangeInclusive<u32> = 1..=10;
pub const DEFAULT_MODULE_SIZE: u32 = 10;
pub const DEFAULT_BORDER: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("{field} must be a colour like #1E1E1E, got '{value}'")]
    InvalidColor { field: &'static str, value: String },

    #[error("unknown error correction level '{0}'")]
    UnknownTier(String),
}

/// A `#RRGGBB` colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor([u8; 3]);

impl HexColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    pub fn to_rgb(self) -> Rgb<u8> {
        Rgb(self.0)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", hex::encode_upper(self.0))
    }
}

impl FromStr for HexColor {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().strip_prefix('#').ok_or(hex::FromHexError::InvalidStringLength)?;
        let mut rgb = [0u8; 3];
        hex::decode_to_slice(digits, &mut rgb)?;
        Ok(Self(rgb))
    }
}

/// Error correction tier, lowest redundancy first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EcTier {
    #[default]
    Low,
    Medium,
    Quartile,
    High,
}

impl EcTier {
    pub const ALL: [EcTier; 4] = [EcTier::Low, EcTier::Medium, EcTier::Quartile, EcTier::High];

    pub fn letter(self) -> &'static str {
        match self {
            EcTier::Low => "L",
            EcTier::Medium => "M",
            EcTier::Quartile => "Q",
            EcTier::High => "H",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EcTier::Low => "Low (L)",
            EcTier::Medium => "Medium (M)",
            EcTier::Quartile => "Quartile (Q)",
            EcTier::High => "High (H)",
        }
    }

    pub fn ec_level(self) -> EcLevel {
        match self {
            EcTier::Low => EcLevel::L,
            EcTier::Medium => EcLevel::M,
            EcTier::Quartile => EcLevel::Q,
            EcTier::High => EcLevel::H,
        }
    }
}

impl FromStr for EcTier {
    type Err = ParamError;

    /// Accepts either the letter (`Q`) or the full label (`Quartile (Q)`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        EcTier::ALL
            .into_iter()
            .find(|tier| s.eq_ignore_ascii_case(tier.letter()) || s == tier.label())
            .ok_or_else(|| ParamError::UnknownTier(s.to_string()))
    }
}

/// Raw form body of `POST /generate`.
///
/// Also used to re-render the controls, so it keeps the submitted strings
/// as-is rather than the parsed values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenerateForm {
    #[serde(default)]
    pub data: String,
    pub fill_color: String,
    pub back_color: String,
    pub error_correction: String,
    pub box_size: u32,
    pub border: u32,
}

impl GenerateForm {
    /// Control values for a page that has not been submitted yet.
    pub fn defaults(theme: Theme) -> Self {
        Self {
            data: DEFAULT_PAYLOAD.to_string(),
            fill_color: theme.default_fill().to_string(),
            back_color: theme.default_back().to_string(),
            error_correction: EcTier::default().letter().to_string(),
            box_size: DEFAULT_MODULE_SIZE,
            border: DEFAULT_BORDER,
        }
    }

    /// Validate every field against its own range. There are no cross-field
    /// checks.
    pub fn collect(&self) -> Result<QrParams, ParamError> {
        Ok(QrParams {
            data: self.data.clone(),
            fill: parse_color("fill_color", &self.fill_color)?,
            back: parse_color("back_color", &self.back_color)?,
            tier: self.error_correction.parse()?,
            module_size: check_range("box_size", self.box_size, MODULE_SIZE_RANGE)?,
            border: check_range("border", self.border, BORDER_RANGE)?,
        })
    }
}

/// Validated parameters handed to the encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrParams {
    pub data: String,
    pub fill: HexColor,
    pub back: HexColor,
    pub tier: EcTier,
    pub module_size: u32,
    pub border: u32,
}

fn parse_color(field: &'static str, value: &str) -> Result<HexColor, ParamError> {
    value.parse().map_err(|_| ParamError::InvalidColor {
        field,
        value: value.to_string(),
    })
}

fn check_range(field: &'static str, value: u32, range: RangeInclusive<u32>) -> Result<u32, ParamError> {
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(ParamError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}
