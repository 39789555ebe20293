/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A Photoshop PSD layer reader
//!
//! This crate reads the layer and mask information section of a `.psd`
//! document. That is the layer records with their masks, blending ranges,
//! names and tagged blocks, the per layer channel image data, the global
//! layer mask info and the document level tagged blocks.
//!
//! Channel pixels are returned as they are stored, raw or PackBits
//! compressed bytes with their row table, nothing is decompressed.
//!
//! ## Lengths win
//! Every structure in the section is length prefixed, and the reader trusts
//! those lengths over its own understanding of the contents. Bytes it does
//! not understand are skipped, so unknown or newer data never throws the
//! cursor off.
//!
//! Problems that can be stepped over, an unknown blend mode, an odd mask
//! size, a compression we don't extract, are collected as [`PsdWarning`]s.
//! Problems that can't, a bad layer signature or truncated data, are
//! [`PSDDecodeErrors`].
//!
//! # Example
//! - Reading a psd file
//! ```no_run
//! use zune_psd_layers::errors::PSDDecodeErrors;
//! use zune_psd_layers::zune_core::bytestream::ZCursor;
//! use zune_psd_layers::PsdLayerDecoder;
//!
//! fn main() -> Result<(), PSDDecodeErrors> {
//!     let data = std::fs::read("image.psd").unwrap();
//!     let mut decoder = PsdLayerDecoder::new(ZCursor::new(&data[..]));
//!     let document = decoder.decode()?;
//!
//!     for (layer, channels) in document.layer_and_mask.layers.iter() {
//!         println!("{} has {} channels", layer.display_name(), channels.len());
//!     }
//!     for warning in &document.warnings {
//!         println!("{warning}");
//!     }
//!     Ok(())
//! }
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;
pub extern crate zune_core;

pub use channel_data::ChannelPixels;
pub use constants::{Clipping, ColorModes, CompressionMethod, SectionDivider};
pub use decoder::{PsdDocument, PsdLayerDecoder};
pub use errors::PSDDecodeErrors;
pub use global_mask::GlobalMaskInfo;
pub use header::PsdHeader;
pub use layer_record::{ChannelInfo, LayerBox, LayerRecord};
pub use mask::{BlendingRanges, ChannelRange, LayerMask, RangePair};
pub use options::{LayerDecoderOptions, NameEncoding};
pub use section::{LayerAndMaskSection, LayerSection};
pub use tagged_blocks::TaggedBlock;
pub use warnings::{Diagnostics, PsdWarning};

pub mod channel_data;
pub mod constants;
pub mod decoder;
pub mod errors;
pub mod global_mask;
pub mod header;
pub mod layer_record;
pub mod mask;
pub mod options;
pub mod section;
pub mod tagged_blocks;
mod utils;
pub mod warnings;
