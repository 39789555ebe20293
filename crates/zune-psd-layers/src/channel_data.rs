/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Channel image data
//!
//! Pixel payloads are pulled out of the stream still compressed,
//! decompression is left to the caller.
use alloc::vec::Vec;

use zune_core::bytestream::{ZByteReaderTrait, ZReader};
use zune_core::log::trace;

use crate::constants::CompressionMethod;
use crate::errors::PSDDecodeErrors;
use crate::layer_record::{ChannelInfo, LayerRecord};
use crate::options::LayerDecoderOptions;
use crate::utils::{absorb_remainder, read_bytes, row_bytes};
use crate::warnings::{Diagnostics, PsdWarning};

/// Compressed pixels of one channel
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChannelPixels {
    pub compression: CompressionMethod,
    /// Compressed size of every row for PackBits data, empty otherwise
    pub row_lengths: Vec<u16>,
    /// Payload, only uncompressed for [`CompressionMethod::Raw`].
    ///
    /// Empty for compressions whose payload we do not extract.
    pub bytes:       Vec<u8>
}

impl ChannelPixels {
    fn empty(compression: CompressionMethod) -> ChannelPixels {
        ChannelPixels {
            compression,
            row_lengths: Vec::new(),
            bytes: Vec::new()
        }
    }
}

fn exceeds_limits(width: usize, height: usize, options: &LayerDecoderOptions) -> bool {
    width > options.get_max_width() || height > options.get_max_height()
}

fn read_row_lengths<T: ZByteReaderTrait>(
    stream: &mut ZReader<T>, height: usize
) -> Result<Vec<u16>, PSDDecodeErrors> {
    let mut lengths = Vec::with_capacity(height);
    for _ in 0..height {
        lengths.push(stream.get_u16_be_err()?);
    }
    Ok(lengths)
}

fn packed_size(row_lengths: &[u16]) -> usize {
    row_lengths.iter().map(|x| usize::from(*x)).sum()
}

/// Report a compression we will not extract, returns its empty entry.
fn skip_compression(
    compression: CompressionMethod, offset: u64, diagnostics: &mut Diagnostics
) -> Result<ChannelPixels, PSDDecodeErrors> {
    let warning = match compression {
        CompressionMethod::Unsupported(value) => PsdWarning::UnknownCompression { offset, value },
        _ => PsdWarning::UnsupportedCompression {
            offset,
            compression
        }
    };
    diagnostics.report(warning)?;

    Ok(ChannelPixels::empty(compression))
}

/// Read the pixel data of every channel in `record`, in channel order.
///
/// Each channel ends exactly where its declared length says it does.
/// `depth` is the document bit depth, it sizes uncompressed rows.
/// Channels whose box is larger than the configured limits are reported
/// and skipped instead of read.
pub fn read_layer_channels<T: ZByteReaderTrait>(
    stream: &mut ZReader<T>, record: &LayerRecord, depth: u16, options: &LayerDecoderOptions,
    diagnostics: &mut Diagnostics
) -> Result<Vec<ChannelPixels>, PSDDecodeErrors> {
    let mut channels = Vec::with_capacity(record.channels.len());

    for channel in &record.channels {
        let (width, height) = channel_extent(record, channel);

        let start = stream.position()?;
        let compression = CompressionMethod::from_int(stream.get_u16_be_err()?);

        let pixels = if !compression.is_extractable() {
            skip_compression(compression, start, diagnostics)?
        } else if exceeds_limits(width, height, options) {
            // the declared length still tells us where the next channel is
            diagnostics.report(PsdWarning::LargeChannel {
                offset: start,
                width,
                height
            })?;
            ChannelPixels::empty(compression)
        } else {
            read_channel_payload(stream, compression, width, height, depth)?
        };
        absorb_remainder(stream, start, u64::from(channel.length))?;

        channels.push(pixels);
    }
    Ok(channels)
}

/// Raw or PackBits payload of a channel whose tag was just read
fn read_channel_payload<T: ZByteReaderTrait>(
    stream: &mut ZReader<T>, compression: CompressionMethod, width: usize, height: usize,
    depth: u16
) -> Result<ChannelPixels, PSDDecodeErrors> {
    if compression == CompressionMethod::PackBits {
        let row_lengths = read_row_lengths(stream, height)?;
        let bytes = read_bytes(stream, packed_size(&row_lengths))?;

        return Ok(ChannelPixels {
            compression,
            row_lengths,
            bytes
        });
    }
    let size = row_bytes(width, depth).saturating_mul(height);

    Ok(ChannelPixels {
        compression,
        row_lengths: Vec::new(),
        bytes: read_bytes(stream, size)?
    })
}

/// The user mask is sized by the mask box, everything else by the layer
fn channel_extent(record: &LayerRecord, channel: &ChannelInfo) -> (usize, usize) {
    match &record.mask {
        Some(mask) if channel.is_user_mask() => mask.bounds.extent(),
        _ => record.bounds.extent()
    }
}

/// Read the merged image at the end of the document.
///
/// There is one compression tag for all channels, and for PackBits all row
/// length tables come before the first channel's payload.
pub fn read_image_data<T: ZByteReaderTrait>(
    stream: &mut ZReader<T>, width: usize, height: usize, channel_count: usize, depth: u16,
    diagnostics: &mut Diagnostics
) -> Result<Vec<ChannelPixels>, PSDDecodeErrors> {
    let offset = stream.position()?;
    let compression = CompressionMethod::from_int(stream.get_u16_be_err()?);

    trace!("Image data compression: {:?}", compression);

    let mut channels = Vec::with_capacity(channel_count);

    match compression {
        CompressionMethod::Raw => {
            let size = row_bytes(width, depth).saturating_mul(height);

            for _ in 0..channel_count {
                channels.push(ChannelPixels {
                    compression,
                    row_lengths: Vec::new(),
                    bytes: read_bytes(stream, size)?
                });
            }
        }
        CompressionMethod::PackBits => {
            let mut tables = Vec::with_capacity(channel_count);
            for _ in 0..channel_count {
                tables.push(read_row_lengths(stream, height)?);
            }
            for row_lengths in tables {
                let bytes = read_bytes(stream, packed_size(&row_lengths))?;

                channels.push(ChannelPixels {
                    compression,
                    row_lengths,
                    bytes
                });
            }
        }
        _ => {
            let empty = skip_compression(compression, offset, diagnostics)?;
            channels.resize(channel_count, empty);
        }
    }
    Ok(channels)
}
