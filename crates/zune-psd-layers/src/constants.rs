/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![allow(clippy::upper_case_acronyms)]

/// `8BPS`, start of every photoshop document
pub const PSD_IDENTIFIER_BE: u32 = 0x38425053;

/// `8BIM`, the signature shared by layer records and tagged blocks
pub const SIGNATURE_8BIM: [u8; 4] = *b"8BIM";

/// `8B64`, tagged block signature used by large documents
pub const SIGNATURE_8B64: [u8; 4] = *b"8B64";

/// Size of a global layer mask record excluding its filler
pub(crate) const GLOBAL_MASK_INFO_SIZE: u64 = 13;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ColorModes {
    Bitmap = 0,
    Grayscale = 1,
    IndexedColor = 2,
    RGB = 3,
    CYMK = 4,
    MultiChannel = 7,
    DuoTone = 8,
    LabColor = 9
}

impl ColorModes {
    pub fn from_int(int: u16) -> Option<ColorModes> {
        use crate::constants::ColorModes::{
            Bitmap, DuoTone, Grayscale, IndexedColor, LabColor, MultiChannel, CYMK, RGB
        };

        match int {
            0 => Some(Bitmap),
            1 => Some(Grayscale),
            2 => Some(IndexedColor),
            3 => Some(RGB),
            4 => Some(CYMK),
            7 => Some(MultiChannel),
            8 => Some(DuoTone),
            9 => Some(LabColor),
            _ => None
        }
    }
}

/// Compression applied to a channel's pixel payload
///
/// Only [`Raw`](Self::Raw) and [`PackBits`](Self::PackBits) payloads are
/// extracted, the zip variants are recognised but their bytes are left
/// in the stream.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CompressionMethod {
    Raw,
    PackBits,
    Zip,
    ZipPrediction,
    /// A compression code the format does not define
    Unsupported(u16)
}

impl CompressionMethod {
    pub const fn from_int(int: u16) -> CompressionMethod {
        match int {
            0 => Self::Raw,
            1 => Self::PackBits,
            2 => Self::Zip,
            3 => Self::ZipPrediction,
            _ => Self::Unsupported(int)
        }
    }

    pub const fn to_int(self) -> u16 {
        match self {
            Self::Raw => 0,
            Self::PackBits => 1,
            Self::Zip => 2,
            Self::ZipPrediction => 3,
            Self::Unsupported(int) => int
        }
    }

    /// Whether we know how to pull the payload out of the stream
    pub const fn is_extractable(self) -> bool {
        matches!(self, Self::Raw | Self::PackBits)
    }
}

/// Blend mode keys photoshop writes into layer records.
///
/// Anything not in here is still stored, but we warn about it.
pub const BLEND_MODE_KEYS: [[u8; 4]; 28] = [
    *b"pass", // pass through, groups only
    *b"norm", // normal
    *b"diss", // dissolve
    *b"dark", // darken
    *b"mul ", // multiply
    *b"idiv", // color burn
    *b"lbrn", // linear burn
    *b"dkCl", // darker color
    *b"lite", // lighten
    *b"scrn", // screen
    *b"div ", // color dodge
    *b"lddg", // linear dodge
    *b"lgCl", // lighter color
    *b"over", // overlay
    *b"sLit", // soft light
    *b"hLit", // hard light
    *b"vLit", // vivid light
    *b"lLit", // linear light
    *b"pLit", // pin light
    *b"hMix", // hard mix
    *b"diff", // difference
    *b"smud", // exclusion
    *b"fsub", // subtract
    *b"fdiv", // divide
    *b"hue ", // hue
    *b"sat ", // saturation
    *b"colr", // color
    *b"lum "  // luminosity
];

pub fn is_known_blend_mode(key: &[u8; 4]) -> bool {
    BLEND_MODE_KEYS.contains(key)
}

/// How a layer interacts with the one beneath it
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Clipping {
    Base = 0,
    NonBase = 1
}

impl Clipping {
    pub fn from_int(int: u8) -> Option<Clipping> {
        match int {
            0 => Some(Self::Base),
            1 => Some(Self::NonBase),
            _ => None
        }
    }
}

/// Kind of a section divider (`lsct`) block
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SectionDivider {
    Other,
    OpenFolder,
    ClosedFolder,
    /// Hidden layer closing a group
    BoundingDivider,
    Unknown(u32)
}

impl SectionDivider {
    pub const fn from_int(int: u32) -> SectionDivider {
        match int {
            0 => Self::Other,
            1 => Self::OpenFolder,
            2 => Self::ClosedFolder,
            3 => Self::BoundingDivider,
            _ => Self::Unknown(int)
        }
    }
}

/// Tagged block keys we know how to interpret.
pub mod keys {
    /// Unicode layer name
    pub const UNICODE_NAME: [u8; 4] = *b"luni";
    /// Layer id
    pub const LAYER_ID: [u8; 4] = *b"lyid";
    /// Section divider setting
    pub const SECTION_DIVIDER: [u8; 4] = *b"lsct";
    /// Nested section divider setting
    pub const NESTED_SECTION_DIVIDER: [u8; 4] = *b"lsdk";
    /// Fill opacity
    pub const FILL_OPACITY: [u8; 4] = *b"iOpa";
}
