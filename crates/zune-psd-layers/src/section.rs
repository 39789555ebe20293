/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The layer and mask information section
//!
//! ```text
//! u32 length
//!     u32 layer info length
//!         i16 layer count
//!         layer records
//!         channel image data, per layer
//!     global layer mask info
//!     tagged blocks
//! ```
//! Every length is honoured, bytes we do not understand are skipped.
use alloc::vec::Vec;

use zune_core::bytestream::{ZByteReaderTrait, ZReader};
use zune_core::log::trace;

use crate::channel_data::{read_layer_channels, ChannelPixels};
use crate::errors::PSDDecodeErrors;
use crate::global_mask::{read_global_mask_info, GlobalMaskInfo};
use crate::layer_record::{read_layer_record, LayerRecord};
use crate::options::LayerDecoderOptions;
use crate::tagged_blocks::{read_tagged_blocks, TaggedBlock};
use crate::utils::{absorb_remainder, consumed_since};
use crate::warnings::Diagnostics;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LayerSection {
    /// Declared length of the layer info
    pub length:             u32,
    /// Raw layer count.
    ///
    /// Negative when the first alpha channel of the merged image holds
    /// its transparency, the magnitude is the number of layers.
    pub layer_count:        i16,
    /// Layer records, bottom most first
    pub layers:             Vec<LayerRecord>,
    /// Pixels of each layer, `channel_image_data[i]` belongs to `layers[i]`
    pub channel_image_data: Vec<Vec<ChannelPixels>>
}

impl LayerSection {
    /// Whether the first alpha channel holds the merged image transparency
    pub const fn has_merged_alpha(&self) -> bool {
        self.layer_count < 0
    }

    /// Layer records paired with their pixel data
    pub fn iter(&self) -> impl Iterator<Item = (&LayerRecord, &[ChannelPixels])> {
        self.layers
            .iter()
            .zip(self.channel_image_data.iter().map(|x| x.as_slice()))
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LayerAndMaskSection {
    pub layers:           LayerSection,
    pub global_mask_info: Option<GlobalMaskInfo>,
    /// Document wide tagged blocks
    pub tagged_blocks:    Vec<TaggedBlock>
}

/// Read layer info, records first then all of their pixel data.
pub fn read_layer_section<T: ZByteReaderTrait>(
    stream: &mut ZReader<T>, options: &LayerDecoderOptions, depth: u16,
    diagnostics: &mut Diagnostics
) -> Result<LayerSection, PSDDecodeErrors> {
    let length = stream.get_u32_be_err()?;
    let start = stream.position()?;

    if length == 0 {
        return Ok(LayerSection::default());
    }

    let layer_count = stream.get_u16_be_err()? as i16;
    let count = usize::from(layer_count.unsigned_abs());

    trace!("Layer info length: {}", length);
    trace!("Layer count: {}", layer_count);

    let mut layers = Vec::with_capacity(count);

    for _ in 0..count {
        layers.push(read_layer_record(
            stream,
            options.get_name_encoding(),
            diagnostics
        )?);
    }

    let mut channel_image_data = Vec::with_capacity(count);

    for layer in &layers {
        channel_image_data.push(read_layer_channels(
            stream,
            layer,
            depth,
            options,
            diagnostics
        )?);
    }
    absorb_remainder(stream, start, u64::from(length))?;

    Ok(LayerSection {
        length,
        layer_count,
        layers,
        channel_image_data
    })
}

/// Read the whole layer and mask information section.
///
/// The stream is left exactly at the end of the section as declared by its
/// length, whatever trailing data it carries.
pub fn read_layer_and_mask_section<T: ZByteReaderTrait>(
    stream: &mut ZReader<T>, options: &LayerDecoderOptions, depth: u16,
    diagnostics: &mut Diagnostics
) -> Result<LayerAndMaskSection, PSDDecodeErrors> {
    let length = stream.get_u32_be_err()?;
    let start = stream.position()?;

    trace!("Layer and mask info length: {}", length);

    if length == 0 {
        return Ok(LayerAndMaskSection::default());
    }

    let layers = read_layer_section(stream, options, depth, diagnostics)?;

    let remaining = i64::from(length) - consumed_since(stream, start)? as i64;
    // older writers end the section right after the layer info
    let global_mask_info = if remaining >= 4 {
        read_global_mask_info(stream)?
    } else {
        None
    };

    let remaining = i64::from(length) - consumed_since(stream, start)? as i64;
    let tagged_blocks = read_tagged_blocks(stream, remaining)?;

    absorb_remainder(stream, start, u64::from(length))?;

    Ok(LayerAndMaskSection {
        layers,
        global_mask_info,
        tagged_blocks
    })
}
