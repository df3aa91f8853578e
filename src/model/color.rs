// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Palaver-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Palaver and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Option text color. `#ffffff` is the "no override" default.
///
/// Stored as RGB and shown as `#rrggbb`. The CFG file carries it as a decimal triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::WHITE
    }

    /// Parses `#rrggbb` (the leading `#` is optional, digits are case-insensitive).
    pub fn from_hex(raw: &str) -> Result<Self, ColorError> {
        let digits = raw.trim().strip_prefix('#').unwrap_or(raw.trim());
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(raw.to_owned()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ColorError::InvalidHex(raw.to_owned()))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Parses a decimal triple such as `255, 153, 0`.
    pub fn from_triple(raw: &str) -> Result<Self, ColorError> {
        let mut channels = raw.split(',').map(str::trim);
        let mut next = || -> Result<u8, ColorError> {
            channels
                .next()
                .and_then(|value| value.parse::<u8>().ok())
                .ok_or_else(|| ColorError::InvalidTriple(raw.to_owned()))
        };
        let color = Self::rgb(next()?, next()?, next()?);
        if channels.next().is_some() {
            return Err(ColorError::InvalidTriple(raw.to_owned()));
        }
        Ok(color)
    }

    /// Accepts either encoding, as found in hand-edited CFG files.
    pub fn parse_lenient(raw: &str) -> Result<Self, ColorError> {
        if raw.contains(',') {
            Self::from_triple(raw)
        } else {
            Self::from_hex(raw)
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_triple(&self) -> String {
        format!("{}, {}, {}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_lenient(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("invalid hex color {0:?} (expected #rrggbb)")]
    InvalidHex(String),
    #[error("invalid color triple {0:?} (expected r, g, b in 0..=255)")]
    InvalidTriple(String),
}
