/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A PSD layer reader.
//!
//! Walks a photoshop document up to and including its merged image data,
//! producing the layer tree with each channel's pixels still compressed.
use alloc::vec::Vec;

use zune_core::bytestream::{ZByteReaderTrait, ZReader};
use zune_core::log::trace;

use crate::channel_data::{read_image_data, ChannelPixels};
use crate::errors::PSDDecodeErrors;
use crate::header::{read_header, PsdHeader};
use crate::options::LayerDecoderOptions;
use crate::section::{read_layer_and_mask_section, LayerAndMaskSection};
use crate::warnings::{Diagnostics, PsdWarning};

/// Depth assumed for channel data when no header has been read
const DEFAULT_DEPTH: u16 = 8;

/// Everything [`PsdLayerDecoder::decode`] extracts from a document
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PsdDocument {
    pub header:         PsdHeader,
    pub layer_and_mask: LayerAndMaskSection,
    /// Merged image channels
    pub image_data:     Vec<ChannelPixels>,
    /// Recoverable problems found on the way
    pub warnings:       Vec<PsdWarning>
}

/// A Photoshop PSD layer reader.
///
/// Reads the layer and mask information section, and optionally the
/// header before it and the merged image after it, without decompressing
/// any pixels.
///
/// # Example
/// ```
/// use zune_psd_layers::zune_core::bytestream::ZCursor;
/// use zune_psd_layers::PsdLayerDecoder;
///
/// // a section with nothing in it
/// let data = [0_u8; 4];
/// let mut decoder = PsdLayerDecoder::new(ZCursor::new(&data[..]));
/// let section = decoder.decode_layer_and_mask_info().unwrap();
///
/// assert!(section.layers.layers.is_empty());
/// assert!(decoder.warnings().is_empty());
/// ```
pub struct PsdLayerDecoder<T>
where
    T: ZByteReaderTrait
{
    stream:      ZReader<T>,
    options:     LayerDecoderOptions,
    header:      Option<PsdHeader>,
    diagnostics: Diagnostics
}

impl<T> PsdLayerDecoder<T>
where
    T: ZByteReaderTrait
{
    /// Create a new decoder reading from `data`
    ///
    /// # Arguments
    /// - data: Data source, either a whole document or one positioned at
    ///   the layer and mask information section
    pub fn new(data: T) -> PsdLayerDecoder<T> {
        Self::new_with_options(data, LayerDecoderOptions::default())
    }

    /// Creates a new decoder with options that influence decoding routines
    pub fn new_with_options(data: T, options: LayerDecoderOptions) -> PsdLayerDecoder<T> {
        PsdLayerDecoder {
            stream: ZReader::new(data),
            options,
            header: None,
            diagnostics: Diagnostics::new(options.get_strict_mode())
        }
    }

    /// Decode the document header and skip to the layer and mask section
    ///
    /// Does nothing if headers were already decoded.
    pub fn decode_headers(&mut self) -> Result<(), PSDDecodeErrors> {
        if self.header.is_some() {
            return Ok(());
        }
        self.header = Some(read_header(&mut self.stream, &self.options)?);
        Ok(())
    }

    /// Decode the layer and mask information section at the current position.
    ///
    /// For a whole document call [`decode_headers`](Self::decode_headers) first,
    /// otherwise the source must already be positioned at the section.
    /// Channel rows are sized for the header's bit depth, or 8 bits when no
    /// header was read.
    pub fn decode_layer_and_mask_info(&mut self) -> Result<LayerAndMaskSection, PSDDecodeErrors> {
        let depth = self.depth();

        let section = read_layer_and_mask_section(
            &mut self.stream,
            &self.options,
            depth,
            &mut self.diagnostics
        )?;

        trace!("Layers decoded: {}", section.layers.layers.len());
        trace!("Document tagged blocks: {}", section.tagged_blocks.len());

        Ok(section)
    }

    /// Decode merged image channels at the current position.
    ///
    /// The merged image carries no lengths of its own, so its shape comes
    /// from the caller, usually the document header.
    pub fn decode_image_data(
        &mut self, width: usize, height: usize, channel_count: usize
    ) -> Result<Vec<ChannelPixels>, PSDDecodeErrors> {
        if width > self.options.get_max_width() {
            return Err(PSDDecodeErrors::LargeDimensions(
                self.options.get_max_width(),
                width
            ));
        }
        if height > self.options.get_max_height() {
            return Err(PSDDecodeErrors::LargeDimensions(
                self.options.get_max_height(),
                height
            ));
        }
        let depth = self.depth();

        read_image_data(
            &mut self.stream,
            width,
            height,
            channel_count,
            depth,
            &mut self.diagnostics
        )
    }

    /// Decode a whole document
    ///
    /// Header, layer and mask information and the merged image, in file order.
    pub fn decode(&mut self) -> Result<PsdDocument, PSDDecodeErrors> {
        self.decode_headers()?;

        let header = self.header.ok_or(PSDDecodeErrors::Generic(
            "Headers missing after decoding"
        ))?;

        let layer_and_mask = self.decode_layer_and_mask_info()?;
        let image_data = self.decode_image_data(
            header.width,
            header.height,
            usize::from(header.channel_count)
        )?;

        Ok(PsdDocument {
            header,
            layer_and_mask,
            image_data,
            warnings: self.diagnostics.take()
        })
    }

    /// Warnings collected so far
    ///
    /// [`decode`](Self::decode) moves these into the returned document.
    pub fn warnings(&self) -> &[PsdWarning] {
        self.diagnostics.warnings()
    }

    /// Document header or None if the headers haven't been decoded
    pub const fn header(&self) -> Option<PsdHeader> {
        self.header
    }

    /// Get image width and height respectively or None if the
    /// headers haven't been decoded
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.header.map(|header| (header.width, header.height))
    }

    fn depth(&self) -> u16 {
        self.header
            .map(|header| header.depth)
            .unwrap_or(DEFAULT_DEPTH)
    }
}
