/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Options influencing layer decoding
use alloc::string::String;

/// Text encoding of the pascal string layer names.
///
/// Photoshop writes these in the system code page of whoever saved the file,
/// the unicode name lives in a `luni` tagged block.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum NameEncoding {
    /// Each byte maps to the code point of the same value
    #[default]
    Latin1,
    /// Invalid sequences are replaced with `U+FFFD`
    Utf8
}

impl NameEncoding {
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            NameEncoding::Latin1 => bytes.iter().map(|x| char::from(*x)).collect(),
            NameEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

/// Options respected by [`PsdLayerDecoder`](crate::PsdLayerDecoder)
#[derive(Debug, Copy, Clone)]
pub struct LayerDecoderOptions {
    max_width:     usize,
    max_height:    usize,
    strict_mode:   bool,
    name_encoding: NameEncoding
}

impl Default for LayerDecoderOptions {
    fn default() -> Self {
        LayerDecoderOptions {
            // photoshop refuses to create anything larger
            max_width:     30_000,
            max_height:    30_000,
            strict_mode:   false,
            name_encoding: NameEncoding::Latin1
        }
    }
}

impl LayerDecoderOptions {
    /// Maximum width of the document and of any layer or mask box,
    /// larger boxes are rejected before their channels are read.
    pub const fn get_max_width(&self) -> usize {
        self.max_width
    }

    pub const fn get_max_height(&self) -> usize {
        self.max_height
    }

    /// Whether recoverable problems abort decoding
    pub const fn get_strict_mode(&self) -> bool {
        self.strict_mode
    }

    pub const fn get_name_encoding(&self) -> NameEncoding {
        self.name_encoding
    }

    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    /// Turn every warning into a hard error.
    ///
    /// Warnings are still collected, the first one stops decoding.
    pub fn set_strict_mode(mut self, yes: bool) -> Self {
        self.strict_mode = yes;
        self
    }

    pub fn set_name_encoding(mut self, encoding: NameEncoding) -> Self {
        self.name_encoding = encoding;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin1_maps_high_bytes() {
        assert_eq!(NameEncoding::Latin1.decode(&[b'C', 0xE9]), "Cé");
    }

    #[test]
    fn utf8_replaces_invalid() {
        assert_eq!(NameEncoding::Utf8.decode(&[0xC3, 0xA9]), "é");
        assert_eq!(NameEncoding::Utf8.decode(&[0xFF]), "\u{FFFD}");
    }
}
