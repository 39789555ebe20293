/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Layer mask and blending ranges sub-records of a layer record
use alloc::vec::Vec;

use zune_core::bytestream::{ZByteReaderTrait, ZReader};

use crate::errors::PSDDecodeErrors;
use crate::layer_record::LayerBox;
use crate::utils::absorb_remainder;
use crate::warnings::{Diagnostics, PsdWarning};

/// Where a layer mask is and how to interpret it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LayerMask {
    pub bounds:          LayerBox,
    /// Color outside of `bounds`, 0 or 255
    pub default_color:   u8,
    pub flags:           u8,
    /// Only present on 36 byte records
    pub real_flags:      Option<u8>,
    /// Only present on 36 byte records
    pub real_background: Option<u8>
}

impl LayerMask {
    /// Position is relative to the layer
    pub const fn is_relative(&self) -> bool {
        self.flags & 1 != 0
    }

    pub const fn is_disabled(&self) -> bool {
        self.flags & 2 != 0
    }

    /// Invert the mask when blending
    pub const fn is_inverted(&self) -> bool {
        self.flags & 4 != 0
    }
}

/// Read the layer mask / adjustment layer data.
///
/// Returns `None` for an empty record and for records with a size we do not
/// understand, the latter are skipped entirely.
pub fn read_layer_mask<T: ZByteReaderTrait>(
    stream: &mut ZReader<T>, diagnostics: &mut Diagnostics
) -> Result<Option<LayerMask>, PSDDecodeErrors> {
    let offset = stream.position()?;
    let size = stream.get_u32_be_err()?;
    let start = offset + 4;

    match size {
        0 => Ok(None),
        20 | 36 => {
            let bounds = LayerBox::read(stream)?;
            let default_color = stream.read_u8_err()?;
            let flags = stream.read_u8_err()?;

            let (real_flags, real_background) = if size == 36 {
                (Some(stream.read_u8_err()?), Some(stream.read_u8_err()?))
            } else {
                (None, None)
            };
            // padding for 20, reserved bytes for 36
            absorb_remainder(stream, start, u64::from(size))?;

            Ok(Some(LayerMask {
                bounds,
                default_color,
                flags,
                real_flags,
                real_background
            }))
        }
        _ => {
            diagnostics.report(PsdWarning::InvalidMaskSize { offset, size })?;
            absorb_remainder(stream, start, u64::from(size))?;
            Ok(None)
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ChannelRange {
    pub start: u16,
    pub end:   u16
}

/// Source and destination range of one blend-if slider pair
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct RangePair {
    pub source:      ChannelRange,
    pub destination: ChannelRange
}

impl RangePair {
    fn read<T: ZByteReaderTrait>(stream: &mut ZReader<T>) -> Result<RangePair, PSDDecodeErrors> {
        let source = ChannelRange {
            start: stream.get_u16_be_err()?,
            end:   stream.get_u16_be_err()?
        };
        let destination = ChannelRange {
            start: stream.get_u16_be_err()?,
            end:   stream.get_u16_be_err()?
        };
        Ok(RangePair {
            source,
            destination
        })
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BlendingRanges {
    /// Gray (composite) ranges, absent when the record is empty
    pub composite:   Option<RangePair>,
    pub per_channel: Vec<RangePair>
}

pub fn read_blending_ranges<T: ZByteReaderTrait>(
    stream: &mut ZReader<T>
) -> Result<BlendingRanges, PSDDecodeErrors> {
    let length = stream.get_u32_be_err()?;
    let start = stream.position()?;

    let mut ranges = BlendingRanges::default();

    if length == 0 {
        return Ok(ranges);
    }
    ranges.composite = Some(RangePair::read(stream)?);

    for _ in 0..(length / 8).saturating_sub(1) {
        ranges.per_channel.push(RangePair::read(stream)?);
    }
    absorb_remainder(stream, start, u64::from(length))?;

    Ok(ranges)
}
