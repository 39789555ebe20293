/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Builders for synthetic documents
#![allow(dead_code)]

pub fn block(signature: &[u8; 4], key: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(signature);
    out.extend_from_slice(key);
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(payload);
    out
}

/// A `luni` payload
pub fn unicode_name(name: &str) -> Vec<u8> {
    let units: Vec<u16> = name.encode_utf16().collect();
    let mut out = (units.len() as u32).to_be_bytes().to_vec();
    for unit in units {
        out.extend_from_slice(&unit.to_be_bytes());
    }
    out
}

pub struct Record {
    pub bounds:     [i32; 4],
    pub channels:   Vec<(i16, u32)>,
    pub signature:  [u8; 4],
    pub blend_mode: [u8; 4],
    pub name:       Vec<u8>,
    pub blocks:     Vec<u8>
}

impl Default for Record {
    fn default() -> Self {
        Record {
            bounds:     [0, 0, 10, 10],
            channels:   vec![(0, 102)],
            signature:  *b"8BIM",
            blend_mode: *b"norm",
            name:       b"Background".to_vec(),
            blocks:     Vec::new()
        }
    }
}

impl Record {
    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for v in self.bounds {
            out.extend_from_slice(&v.to_be_bytes());
        }
        out.extend_from_slice(&(self.channels.len() as u16).to_be_bytes());
        for (id, length) in &self.channels {
            out.extend_from_slice(&id.to_be_bytes());
            out.extend_from_slice(&length.to_be_bytes());
        }
        out.extend_from_slice(&self.signature);
        out.extend_from_slice(&self.blend_mode);
        // opacity, clipping, flags, filler
        out.extend_from_slice(&[255, 0, 0, 0]);

        // no mask, no blending ranges
        let mut extra = vec![0; 8];
        extra.push(self.name.len() as u8);
        extra.extend_from_slice(&self.name);
        extra.extend_from_slice(&self.blocks);

        out.extend_from_slice(&(extra.len() as u32).to_be_bytes());
        out.extend(extra);
        out
    }
}

/// Raw channel, tag included
pub fn raw_channel(fill: u8, size: usize) -> Vec<u8> {
    let mut out = 0_u16.to_be_bytes().to_vec();
    out.extend(std::iter::repeat(fill).take(size));
    out
}

pub struct Section {
    pub layer_count:   i16,
    pub records:       Vec<Vec<u8>>,
    pub channel_data:  Vec<u8>,
    /// Inside the layer info, after the channel data
    pub layer_padding: Vec<u8>,
    pub global_mask:   Vec<u8>,
    pub blocks:        Vec<u8>,
    /// Inside the section, after the tagged blocks
    pub trailing:      Vec<u8>
}

impl Default for Section {
    fn default() -> Self {
        Section {
            layer_count:   1,
            records:       vec![Record::default().build()],
            channel_data:  raw_channel(0x7F, 100),
            layer_padding: Vec::new(),
            global_mask:   0_u32.to_be_bytes().to_vec(),
            blocks:        Vec::new(),
            trailing:      Vec::new()
        }
    }
}

impl Section {
    pub fn build(&self) -> Vec<u8> {
        let mut layer_info = self.layer_count.to_be_bytes().to_vec();
        for record in &self.records {
            layer_info.extend_from_slice(record);
        }
        layer_info.extend_from_slice(&self.channel_data);
        layer_info.extend_from_slice(&self.layer_padding);

        let mut body = (layer_info.len() as u32).to_be_bytes().to_vec();
        body.extend(layer_info);
        body.extend_from_slice(&self.global_mask);
        body.extend_from_slice(&self.blocks);
        body.extend_from_slice(&self.trailing);

        let mut out = (body.len() as u32).to_be_bytes().to_vec();
        out.extend(body);
        out
    }
}

/// A 13 byte global mask info record followed by `filler` zeros
pub fn global_mask(filler: usize) -> Vec<u8> {
    let mut out = ((13 + filler) as u32).to_be_bytes().to_vec();
    for v in [0_u16, 65535, 0, 0, 0, 50] {
        out.extend_from_slice(&v.to_be_bytes());
    }
    out.push(1);
    out.extend(std::iter::repeat(0).take(filler));
    out
}

/// Header of an 8 bit RGB document, color mode data and resources empty
pub fn header(width: u32, height: u32, channels: u16) -> Vec<u8> {
    let mut out = b"8BPS".to_vec();
    out.extend_from_slice(&1_u16.to_be_bytes());
    out.extend_from_slice(&[0; 6]);
    out.extend_from_slice(&channels.to_be_bytes());
    out.extend_from_slice(&height.to_be_bytes());
    out.extend_from_slice(&width.to_be_bytes());
    out.extend_from_slice(&8_u16.to_be_bytes());
    out.extend_from_slice(&3_u16.to_be_bytes());
    out.extend_from_slice(&0_u32.to_be_bytes());
    out.extend_from_slice(&0_u32.to_be_bytes());
    out
}

/// A one pixel raw merged image, lets a test see where the section ended
pub fn sentinel() -> Vec<u8> {
    let mut out = 0_u16.to_be_bytes().to_vec();
    out.push(0x42);
    out
}
