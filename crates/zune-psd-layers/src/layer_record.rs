/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Layer records
//!
//! One record per layer, each stating its geometry, channels and how it
//! blends, followed by a length prefixed block of extra data holding the
//! mask, blending ranges, name and tagged blocks.
use alloc::string::String;
use alloc::vec::Vec;

use zune_core::bytestream::{ZByteReaderTrait, ZReader};
use zune_core::log::trace;

use crate::constants::{is_known_blend_mode, Clipping, SectionDivider, SIGNATURE_8BIM};
use crate::errors::PSDDecodeErrors;
use crate::mask::{read_blending_ranges, read_layer_mask, BlendingRanges, LayerMask};
use crate::options::NameEncoding;
use crate::tagged_blocks::{self, read_tagged_blocks, TaggedBlock};
use crate::utils::{absorb_remainder, consumed_since, read_bytes, read_i16, read_i32, read_tag};
use crate::warnings::{Diagnostics, PsdWarning};

/// A rectangle as photoshop stores it, edges not validated.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct LayerBox {
    pub top:    i32,
    pub left:   i32,
    pub bottom: i32,
    pub right:  i32
}

impl LayerBox {
    pub(crate) fn read<T: ZByteReaderTrait>(
        stream: &mut ZReader<T>
    ) -> Result<LayerBox, PSDDecodeErrors> {
        Ok(LayerBox {
            top:    read_i32(stream)?,
            left:   read_i32(stream)?,
            bottom: read_i32(stream)?,
            right:  read_i32(stream)?
        })
    }

    /// `right - left`, negative for inverted boxes
    pub const fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    /// `bottom - top`, negative for inverted boxes
    pub const fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    /// Width and height with inverted extents treated as empty
    pub fn extent(&self) -> (usize, usize) {
        let width = usize::try_from(self.width()).unwrap_or(0);
        let height = usize::try_from(self.height()).unwrap_or(0);
        (width, height)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ChannelInfo {
    /// 0.. color channels, -1 transparency, -2 user mask, -3 real user mask
    pub id:     i16,
    /// Bytes of channel data, including the two byte compression tag
    pub length: u32
}

impl ChannelInfo {
    pub const fn is_color(&self) -> bool {
        self.id >= 0
    }

    pub const fn is_transparency(&self) -> bool {
        self.id == -1
    }

    pub const fn is_user_mask(&self) -> bool {
        self.id == -2
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LayerRecord {
    pub bounds:          LayerBox,
    pub channels:        Vec<ChannelInfo>,
    /// Stored verbatim, see [`BLEND_MODE_KEYS`](crate::constants::BLEND_MODE_KEYS)
    pub blend_mode:      [u8; 4],
    pub opacity:         u8,
    pub clipping:        u8,
    pub flags:           u8,
    pub mask:            Option<LayerMask>,
    pub blending_ranges: BlendingRanges,
    /// Pascal string name, see [`LayerRecord::display_name`] for the unicode one
    pub name:            String,
    pub tagged_blocks:   Vec<TaggedBlock>
}

impl LayerRecord {
    pub const fn width(&self) -> i32 {
        self.bounds.width()
    }

    pub const fn height(&self) -> i32 {
        self.bounds.height()
    }

    pub fn blend_mode_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.blend_mode).ok()
    }

    pub fn clipping(&self) -> Option<Clipping> {
        Clipping::from_int(self.clipping)
    }

    pub const fn is_transparency_protected(&self) -> bool {
        self.flags & 1 != 0
    }

    pub const fn is_visible(&self) -> bool {
        self.flags & 2 == 0
    }

    /// Only meaningful when bit 3 is set
    pub const fn is_pixel_data_irrelevant(&self) -> bool {
        self.flags & 8 != 0 && self.flags & 16 != 0
    }

    /// Unicode name when present, the pascal string name otherwise
    pub fn display_name(&self) -> String {
        tagged_blocks::unicode_name(&self.tagged_blocks).unwrap_or_else(|| self.name.clone())
    }

    pub fn layer_id(&self) -> Option<u32> {
        tagged_blocks::layer_id(&self.tagged_blocks)
    }

    pub fn section_divider(&self) -> Option<SectionDivider> {
        tagged_blocks::section_divider(&self.tagged_blocks)
    }

    pub fn fill_opacity(&self) -> Option<u8> {
        tagged_blocks::fill_opacity(&self.tagged_blocks)
    }
}

/// Read a single layer record.
///
/// Ends exactly `extra data length` bytes after the extra data length
/// field, no matter how much of it the sub records understood.
pub fn read_layer_record<T: ZByteReaderTrait>(
    stream: &mut ZReader<T>, encoding: NameEncoding, diagnostics: &mut Diagnostics
) -> Result<LayerRecord, PSDDecodeErrors> {
    let bounds = LayerBox::read(stream)?;

    let num_channels = stream.get_u16_be_err()?;
    let mut channels = Vec::with_capacity(usize::from(num_channels));

    for _ in 0..num_channels {
        let id = read_i16(stream)?;
        let length = stream.get_u32_be_err()?;
        channels.push(ChannelInfo { id, length });
    }

    let signature_offset = stream.position()?;
    let signature = read_tag(stream)?;

    if signature != SIGNATURE_8BIM {
        return Err(PSDDecodeErrors::BadLayerSignature {
            offset: signature_offset,
            found:  signature
        });
    }

    let blend_offset = stream.position()?;
    let blend_mode = read_tag(stream)?;

    if !is_known_blend_mode(&blend_mode) {
        diagnostics.report(PsdWarning::UnknownBlendMode {
            offset: blend_offset,
            key:    blend_mode
        })?;
    }

    let opacity = stream.read_u8_err()?;
    let clipping = stream.read_u8_err()?;
    let flags = stream.read_u8_err()?;
    // filler
    stream.read_u8_err()?;

    if Clipping::from_int(clipping).is_none() {
        diagnostics.report(PsdWarning::UnknownClipping {
            offset: blend_offset + 5,
            value:  clipping
        })?;
    }

    let extra_length = stream.get_u32_be_err()?;
    let start = stream.position()?;

    let mask = read_layer_mask(stream, diagnostics)?;
    let blending_ranges = read_blending_ranges(stream)?;

    // pascal string, padded to a single byte not four.
    let name_length = stream.read_u8_err()?;
    let name = encoding.decode(&read_bytes(stream, usize::from(name_length))?);

    let remaining = i64::from(extra_length) - consumed_since(stream, start)? as i64;
    let tagged_blocks = read_tagged_blocks(stream, remaining)?;

    absorb_remainder(stream, start, u64::from(extra_length))?;

    trace!(
        "Layer {:?}: {:?}, {} channels",
        name,
        bounds,
        channels.len()
    );

    Ok(LayerRecord {
        bounds,
        channels,
        blend_mode,
        opacity,
        clipping,
        flags,
        mask,
        blending_ranges,
        name,
        tagged_blocks
    })
}
