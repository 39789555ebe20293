/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};

use zune_core::bytestream::ZByteIoError;

use crate::constants::{PSD_IDENTIFIER_BE, SIGNATURE_8BIM};
use crate::warnings::PsdWarning;

/// PSDDecodeErrors that can occur during PSD decoding
///
/// These abort decoding, recoverable problems are reported
/// as [`PsdWarning`]s instead.
pub enum PSDDecodeErrors {
    WrongMagicBytes(u32),
    UnsupportedFileType(u16),
    UnsupportedBitDepth(u16),
    /// A layer record did not carry `8BIM` where it should.
    ///
    /// The cursor is out of sync with the layer records and nothing after
    /// `offset` can be trusted.
    BadLayerSignature {
        offset: u64,
        found:  [u8; 4]
    },
    /// Supported dimension, found dimension
    LargeDimensions(usize, usize),
    ZeroDimensions,
    /// A recoverable problem escalated because strict mode is on
    Strict(PsdWarning),
    Generic(&'static str),
    IoErrors(ZByteIoError)
}

impl PSDDecodeErrors {
    /// Byte offset the error was detected at, when known
    pub fn offset(&self) -> Option<u64> {
        match self {
            PSDDecodeErrors::BadLayerSignature { offset, .. } => Some(*offset),
            PSDDecodeErrors::Strict(warning) => Some(warning.offset()),
            _ => None
        }
    }
}

impl Debug for PSDDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            PSDDecodeErrors::Generic(reason) => {
                writeln!(f, "{reason}")
            }
            PSDDecodeErrors::WrongMagicBytes(bytes) => {
                writeln!(
                    f,
                    "Expected {:?} but found  {:?}, not a PSD image",
                    PSD_IDENTIFIER_BE.to_be_bytes(),
                    bytes.to_be_bytes()
                )
            }
            PSDDecodeErrors::UnsupportedFileType(version) => {
                writeln!(
                    f,
                    "Unsupported file version {version:?}, known versions are 1",
                )
            }
            PSDDecodeErrors::UnsupportedBitDepth(depth) => {
                writeln!(
                    f,
                    "Unsupported bit depth {depth:?}, supported depths are 1, 8, 16 and 32",
                )
            }
            PSDDecodeErrors::BadLayerSignature { offset, found } => {
                writeln!(
                    f,
                    "Invalid layer record signature at offset {offset}, expected {:?} but found {:?}",
                    SIGNATURE_8BIM, found
                )
            }
            PSDDecodeErrors::LargeDimensions(supported, found) => {
                writeln!(
                    f,
                    "Too large dimensions, supported {supported} but found {found}",
                )
            }
            PSDDecodeErrors::ZeroDimensions => {
                writeln!(f, "Zero found where not expected")
            }
            PSDDecodeErrors::Strict(warning) => {
                writeln!(f, "Strict mode: {warning:?}")
            }
            PSDDecodeErrors::IoErrors(e) => {
                writeln!(f, "I/O error :{:?}", e)
            }
        }
    }
}

impl Display for PSDDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PSDDecodeErrors {}

impl From<&'static str> for PSDDecodeErrors {
    fn from(r: &'static str) -> Self {
        Self::Generic(r)
    }
}

impl From<ZByteIoError> for PSDDecodeErrors {
    fn from(r: ZByteIoError) -> Self {
        Self::IoErrors(r)
    }
}
