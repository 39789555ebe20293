/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Recoverable problems found while decoding.
//!
//! Photoshop (and everything else writing PSDs) keeps adding record shapes,
//! so most surprises are reported here and decoding carries on with the
//! cursor moved past the offending bytes by their declared length.
use alloc::vec::Vec;
use core::fmt::{Debug, Display, Formatter};

use zune_core::log::warn;

use crate::constants::CompressionMethod;
use crate::errors::PSDDecodeErrors;

/// A recoverable problem, with the byte offset it was found at.
#[derive(Clone, Eq, PartialEq)]
pub enum PsdWarning {
    /// Blend mode key not in [`BLEND_MODE_KEYS`](crate::constants::BLEND_MODE_KEYS),
    /// stored as is.
    UnknownBlendMode { offset: u64, key: [u8; 4] },
    /// Clipping value other than base (0) or non-base (1)
    UnknownClipping { offset: u64, value: u8 },
    /// Layer mask record size other than 0, 20 or 36, the record was skipped
    InvalidMaskSize { offset: u64, size: u32 },
    /// Known compression whose payload we do not extract
    UnsupportedCompression {
        offset:      u64,
        compression: CompressionMethod
    },
    /// Compression code the format does not define
    UnknownCompression { offset: u64, value: u16 },
    /// Channel box beyond the configured limits, its payload was skipped
    LargeChannel {
        offset: u64,
        width:  usize,
        height: usize
    }
}

impl PsdWarning {
    pub const fn offset(&self) -> u64 {
        match self {
            PsdWarning::UnknownBlendMode { offset, .. }
            | PsdWarning::UnknownClipping { offset, .. }
            | PsdWarning::InvalidMaskSize { offset, .. }
            | PsdWarning::UnsupportedCompression { offset, .. }
            | PsdWarning::UnknownCompression { offset, .. }
            | PsdWarning::LargeChannel { offset, .. } => *offset
        }
    }
}

impl Debug for PsdWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            PsdWarning::UnknownBlendMode { offset, key } => {
                write!(
                    f,
                    "Unknown blend mode {:?} at offset {offset}",
                    core::str::from_utf8(key).unwrap_or("<non-ascii>")
                )
            }
            PsdWarning::UnknownClipping { offset, value } => {
                write!(f, "Unknown clipping {value} at offset {offset}")
            }
            PsdWarning::InvalidMaskSize { offset, size } => {
                write!(
                    f,
                    "Invalid layer mask size {size} at offset {offset}, expected 0, 20 or 36"
                )
            }
            PsdWarning::UnsupportedCompression {
                offset,
                compression
            } => {
                write!(
                    f,
                    "Compression {compression:?} at offset {offset} is not yet supported"
                )
            }
            PsdWarning::UnknownCompression { offset, value } => {
                write!(f, "Unknown compression type {value} at offset {offset}")
            }
            PsdWarning::LargeChannel {
                offset,
                width,
                height
            } => {
                write!(
                    f,
                    "Channel at offset {offset} is {width}x{height}, larger than the configured limits"
                )
            }
        }
    }
}

impl Display for PsdWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Sink every decoding routine reports warnings into.
#[derive(Default)]
pub struct Diagnostics {
    warnings: Vec<PsdWarning>,
    strict:   bool
}

impl Diagnostics {
    pub fn new(strict: bool) -> Diagnostics {
        Diagnostics {
            warnings: Vec::new(),
            strict
        }
    }

    /// Record a warning.
    ///
    /// Returns an error only when strict mode is on, in that case the
    /// warning is recorded and escalated.
    pub fn report(&mut self, warning: PsdWarning) -> Result<(), PSDDecodeErrors> {
        warn!("{:?}", warning);
        self.warnings.push(warning.clone());

        if self.strict {
            return Err(PSDDecodeErrors::Strict(warning));
        }
        Ok(())
    }

    pub fn warnings(&self) -> &[PsdWarning] {
        &self.warnings
    }

    pub fn take(&mut self) -> Vec<PsdWarning> {
        core::mem::take(&mut self.warnings)
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }
}
