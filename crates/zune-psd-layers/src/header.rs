/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use zune_core::bytestream::{ZByteReaderTrait, ZReader};
use zune_core::log::trace;

use crate::constants::{ColorModes, PSD_IDENTIFIER_BE};
use crate::errors::PSDDecodeErrors;
use crate::options::LayerDecoderOptions;

/// File wide information from the start of the document
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PsdHeader {
    /// Channels of the merged image, alpha included
    pub channel_count: u16,
    pub width:         usize,
    pub height:        usize,
    /// Bits per channel, 1, 8, 16 or 32
    pub depth:         u16,
    pub color_mode:    u16
}

impl PsdHeader {
    pub fn color_mode(&self) -> Option<ColorModes> {
        ColorModes::from_int(self.color_mode)
    }
}

/// Read the file header, then skip color mode data and image resources.
///
/// On success the stream sits at the layer and mask information section.
pub fn read_header<T: ZByteReaderTrait>(
    stream: &mut ZReader<T>, options: &LayerDecoderOptions
) -> Result<PsdHeader, PSDDecodeErrors> {
    // Check identifier
    let magic = stream.get_u32_be_err()?;

    if magic != PSD_IDENTIFIER_BE {
        return Err(PSDDecodeErrors::WrongMagicBytes(magic));
    }

    //  file version
    let version = stream.get_u16_be_err()?;

    if version != 1 {
        return Err(PSDDecodeErrors::UnsupportedFileType(version));
    }
    // Skip 6 reserved bytes
    stream.skip(6)?;

    let channel_count = stream.get_u16_be_err()?;

    let height = stream.get_u32_be_err()? as usize;
    let width = stream.get_u32_be_err()? as usize;

    if width > options.get_max_width() {
        return Err(PSDDecodeErrors::LargeDimensions(
            options.get_max_width(),
            width
        ));
    }

    if height > options.get_max_height() {
        return Err(PSDDecodeErrors::LargeDimensions(
            options.get_max_height(),
            height
        ));
    }

    if width == 0 || height == 0 || channel_count == 0 {
        return Err(PSDDecodeErrors::ZeroDimensions);
    }

    let depth = stream.get_u16_be_err()?;

    if !matches!(depth, 1 | 8 | 16 | 32) {
        return Err(PSDDecodeErrors::UnsupportedBitDepth(depth));
    }

    let color_mode = stream.get_u16_be_err()?;

    // skip mode data
    let bytes = stream.get_u32_be_err()? as usize;
    stream.skip(bytes)?;

    // skip image resources
    let bytes = stream.get_u32_be_err()? as usize;
    stream.skip(bytes)?;

    trace!("Image width:{}", width);
    trace!("Image height:{}", height);
    trace!("Channels: {}", channel_count);
    trace!("Bit depth : {}", depth);
    trace!("Color mode: {:?}", ColorModes::from_int(color_mode));

    Ok(PsdHeader {
        channel_count,
        width,
        height,
        depth,
        color_mode
    })
}
