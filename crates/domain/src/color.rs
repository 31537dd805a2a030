use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const BLACK: Self = Self([0, 0, 0, 255]);
    pub const WHITE: Self = Self([255, 255, 255, 255]);

    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }

    /// Parses `#rrggbb`, `rrggbb` or `#rgb` as an opaque color.
    pub fn parse_hex(input: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidColor(input.to_string());
        let digits = input.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if !digits.is_ascii() {
            return Err(invalid());
        }

        let channel = |text: &str| u8::from_str_radix(text, 16).map_err(|_| invalid());
        match digits.len() {
            6 => Ok(Self::opaque(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                let short = |index: usize| channel(&digits[index..index + 1]).map(|v| v * 17);
                Ok(Self::opaque(short(0)?, short(1)?, short(2)?))
            }
            _ => Err(invalid()),
        }
    }

    pub fn to_hex(self) -> String {
        let [r, g, b, _] = self.0;
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// `0x00RRGGBB`, the framebuffer layout used by the window shell.
    pub fn to_u32(self) -> u32 {
        let [r, g, b, _] = self.0;
        (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
    }

    pub fn alpha(self) -> u8 {
        self.0[3]
    }
}

impl Display for Rgba {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Rgba {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value)
    }
}

impl From<Rgba> for String {
    fn from(value: Rgba) -> Self {
        value.to_hex()
    }
}
