/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::ffi::OsString;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use zune_psd_layers::{
    ChannelInfo, ChannelPixels, LayerAndMaskSection, LayerRecord, PsdHeader, PsdWarning,
    TaggedBlock
};

/// Everything we print for one input file
pub struct Summary<'a> {
    file:       OsString,
    header:     Option<PsdHeader>,
    section:    &'a LayerAndMaskSection,
    image_data: &'a [ChannelPixels],
    warnings:   &'a [PsdWarning]
}

impl<'a> Summary<'a> {
    pub fn new(
        file: OsString, header: Option<PsdHeader>, section: &'a LayerAndMaskSection,
        image_data: &'a [ChannelPixels], warnings: &'a [PsdWarning]
    ) -> Summary<'a> {
        Summary {
            file,
            header,
            section,
            image_data,
            warnings
        }
    }
}

impl<'a> Serialize for Summary<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("Summary", 8)?;

        state.serialize_field("file", &self.file.to_string_lossy())?;
        state.serialize_field("header", &self.header.as_ref().map(Header))?;
        state.serialize_field("layer_count", &self.section.layers.layer_count)?;
        state.serialize_field(
            "merged_alpha",
            &self.section.layers.has_merged_alpha()
        )?;

        let layers: Vec<Layer> = self
            .section
            .layers
            .iter()
            .map(|(record, pixels)| Layer { record, pixels })
            .collect();
        state.serialize_field("layers", &layers)?;

        let global_mask = self.section.global_mask_info.map(|info| {
            serde_json::json!({
                "color_space": info.color_space,
                "components": info.components,
                "opacity": info.opacity,
                "kind": info.kind
            })
        });
        state.serialize_field("global_mask", &global_mask)?;
        state.serialize_field("tagged_blocks", &Blocks(&self.section.tagged_blocks))?;

        let image_data: Vec<Channel> = self
            .image_data
            .iter()
            .map(|pixels| Channel { info: None, pixels })
            .collect();
        state.serialize_field("image_data", &image_data)?;

        let warnings: Vec<String> = self.warnings.iter().map(|x| x.to_string()).collect();
        state.serialize_field("warnings", &warnings)?;

        state.end()
    }
}

struct Header<'a>(&'a PsdHeader);

impl<'a> Serialize for Header<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("Header", 5)?;

        state.serialize_field("width", &self.0.width)?;
        state.serialize_field("height", &self.0.height)?;
        state.serialize_field("channels", &self.0.channel_count)?;
        state.serialize_field("depth", &self.0.depth)?;
        state.serialize_field(
            "color_mode",
            &self.0.color_mode().map(|x| format!("{x:?}"))
        )?;

        state.end()
    }
}

struct Layer<'a> {
    record: &'a LayerRecord,
    pixels: &'a [ChannelPixels]
}

impl<'a> Serialize for Layer<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let record = self.record;
        let mut state = serializer.serialize_struct("Layer", 14)?;

        state.serialize_field("name", &record.display_name())?;
        state.serialize_field("layer_id", &record.layer_id())?;
        let bounds = record.bounds;
        state.serialize_field(
            "bounds",
            &[bounds.top, bounds.left, bounds.bottom, bounds.right]
        )?;
        state.serialize_field("width", &record.width())?;
        state.serialize_field("height", &record.height())?;
        state.serialize_field(
            "blend_mode",
            &String::from_utf8_lossy(&record.blend_mode)
        )?;
        state.serialize_field("opacity", &record.opacity)?;
        state.serialize_field("fill_opacity", &record.fill_opacity())?;
        state.serialize_field(
            "clipping",
            &record.clipping().map(|x| format!("{x:?}"))
        )?;
        state.serialize_field("visible", &record.is_visible())?;
        state.serialize_field(
            "section_divider",
            &record.section_divider().map(|x| format!("{x:?}"))
        )?;

        let mask = record.mask.as_ref().map(|mask| {
            serde_json::json!({
                "bounds": [mask.bounds.top, mask.bounds.left, mask.bounds.bottom, mask.bounds.right],
                "default_color": mask.default_color,
                "disabled": mask.is_disabled()
            })
        });
        state.serialize_field("mask", &mask)?;

        let channels: Vec<Channel> = record
            .channels
            .iter()
            .zip(self.pixels)
            .map(|(info, pixels)| Channel {
                info: Some(info),
                pixels
            })
            .collect();
        state.serialize_field("channels", &channels)?;
        state.serialize_field("tagged_blocks", &Blocks(&record.tagged_blocks))?;

        state.end()
    }
}

struct Channel<'a> {
    info:   Option<&'a ChannelInfo>,
    pixels: &'a ChannelPixels
}

impl<'a> Serialize for Channel<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("Channel", 7)?;

        state.serialize_field("id", &self.info.map(|x| x.id))?;
        state.serialize_field("kind", &self.info.map(channel_kind))?;
        state.serialize_field("length", &self.info.map(|x| x.length))?;
        state.serialize_field(
            "compression",
            &format!("{:?}", self.pixels.compression)
        )?;
        state.serialize_field("compression_code", &self.pixels.compression.to_int())?;
        state.serialize_field("rows", &self.pixels.row_lengths.len())?;
        state.serialize_field("bytes", &self.pixels.bytes.len())?;

        state.end()
    }
}

fn channel_kind(info: &ChannelInfo) -> &'static str {
    if info.is_color() {
        "color"
    } else if info.is_transparency() {
        "transparency"
    } else if info.is_user_mask() {
        "user mask"
    } else {
        "real user mask"
    }
}

/// Block keys and sizes, payloads are left out
struct Blocks<'a>(&'a [TaggedBlock]);

impl<'a> Serialize for Blocks<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        serializer.collect_seq(self.0.iter().map(|block| {
            serde_json::json!({
                "signature": String::from_utf8_lossy(&block.signature),
                "key": String::from_utf8_lossy(&block.key),
                "length": block.payload.len()
            })
        }))
    }
}
