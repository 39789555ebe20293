/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use zune_psd_layers::zune_core::bytestream::ZCursor;
use zune_psd_layers::{
    CompressionMethod, LayerAndMaskSection, LayerDecoderOptions, PSDDecodeErrors,
    PsdLayerDecoder, PsdWarning, SectionDivider
};

mod common;

use common::{block, global_mask, header, raw_channel, sentinel, unicode_name, Record, Section};

/// Decode a section followed by the sentinel pixel, checking the
/// section ended exactly where its length said
fn decode_section(section: &[u8]) -> (LayerAndMaskSection, Vec<PsdWarning>) {
    let mut data = section.to_vec();
    data.extend(sentinel());

    let mut decoder = PsdLayerDecoder::new(ZCursor::new(&data[..]));
    let decoded = decoder.decode_layer_and_mask_info().unwrap();
    let warnings = decoder.warnings().to_vec();

    let pixel = decoder.decode_image_data(1, 1, 1).unwrap();
    assert_eq!(pixel[0].bytes, [0x42], "section did not end at its declared length");

    (decoded, warnings)
}

#[test]
fn single_raw_layer() {
    let data = Section::default().build();
    let (section, warnings) = decode_section(&data);

    let layers = &section.layers;
    assert_eq!(layers.layer_count, 1);
    assert_eq!(layers.layers.len(), 1);
    assert_eq!(layers.channel_image_data.len(), 1);

    let (layer, channels) = layers.iter().next().unwrap();
    assert_eq!(layer.width(), 10);
    assert_eq!(layer.height(), 10);
    assert_eq!(layer.name, "Background");
    assert_eq!(channels[0].compression, CompressionMethod::Raw);
    assert_eq!(channels[0].bytes.len(), 100);

    assert!(section.global_mask_info.is_none());
    assert!(section.tagged_blocks.is_empty());
    assert!(warnings.is_empty());
}

#[test]
fn layer_tagged_blocks() {
    let mut blocks = block(b"8BIM", b"lyid", &[0, 0, 0, 12]);
    blocks.extend(block(b"8BIM", b"luni", &unicode_name("abc")));
    blocks.extend(block(b"8BIM", b"lsct", &[0, 0, 0, 1]));

    let record = Record {
        blocks,
        ..Default::default()
    };
    let data = Section {
        records: vec![record.build()],
        ..Default::default()
    }
    .build();

    let (section, _) = decode_section(&data);
    let layer = &section.layers.layers[0];

    assert_eq!(layer.tagged_blocks.len(), 3);
    assert_eq!(layer.tagged_blocks[0].key_str(), Some("lyid"));
    assert_eq!(layer.tagged_blocks[1].payload.len(), 10);
    assert_eq!(layer.layer_id(), Some(12));
    assert_eq!(layer.display_name(), "abc");
    assert_eq!(layer.section_divider(), Some(SectionDivider::OpenFolder));
}

#[test]
fn records_come_before_channel_data() {
    let first = Record {
        bounds: [0, 0, 2, 2],
        channels: vec![(0, 6), (-1, 6)],
        name: b"one".to_vec(),
        ..Default::default()
    };
    let second = Record {
        bounds: [5, 5, 6, 8],
        channels: vec![(0, 5)],
        name: b"two".to_vec(),
        ..Default::default()
    };
    let mut channel_data = raw_channel(1, 4);
    channel_data.extend(raw_channel(2, 4));
    channel_data.extend(raw_channel(3, 3));

    let data = Section {
        layer_count: 2,
        records: vec![first.build(), second.build()],
        channel_data,
        ..Default::default()
    }
    .build();

    let (section, _) = decode_section(&data);
    let layers: Vec<_> = section.layers.iter().collect();

    assert_eq!(layers.len(), 2);
    assert_eq!(layers[0].0.name, "one");
    assert_eq!(layers[0].1.len(), 2);
    assert_eq!(layers[0].1[1].bytes, [2; 4]);
    assert_eq!(layers[1].0.name, "two");
    assert_eq!(layers[1].1[0].bytes, [3; 3]);
}

#[test]
fn packbits_layer_channel() {
    let record = Record {
        bounds: [0, 0, 3, 4],
        channels: vec![(0, 2 + 6 + 7)],
        ..Default::default()
    };
    let mut channel_data = 1_u16.to_be_bytes().to_vec();
    for length in [2_u16, 2, 3] {
        channel_data.extend_from_slice(&length.to_be_bytes());
    }
    channel_data.extend_from_slice(&[0xFD, 0x11, 0xFD, 0x22, 0x01, 0x33, 0x44]);

    let data = Section {
        records: vec![record.build()],
        channel_data,
        ..Default::default()
    }
    .build();

    let (section, _) = decode_section(&data);
    let pixels = &section.layers.channel_image_data[0][0];

    assert_eq!(pixels.compression, CompressionMethod::PackBits);
    assert_eq!(pixels.row_lengths, [2, 2, 3]);
    assert_eq!(pixels.bytes.len(), 7);
}

#[test]
fn negative_layer_count_keeps_sign() {
    let data = Section {
        layer_count: -1,
        ..Default::default()
    }
    .build();

    let (section, _) = decode_section(&data);

    assert_eq!(section.layers.layer_count, -1);
    assert!(section.layers.has_merged_alpha());
    assert_eq!(section.layers.layers.len(), 1);
}

#[test]
fn empty_section() {
    let data = 0_u32.to_be_bytes();
    let (section, warnings) = decode_section(&data);

    assert_eq!(section, LayerAndMaskSection::default());
    assert!(warnings.is_empty());
}

#[test]
fn empty_layer_info_with_document_blocks() {
    let mut body = 0_u32.to_be_bytes().to_vec();
    body.extend(global_mask(0));
    body.extend(block(b"8BIM", b"Patt", &[1, 2, 3, 4]));

    let mut data = (body.len() as u32).to_be_bytes().to_vec();
    data.extend(body);

    let (section, _) = decode_section(&data);

    assert_eq!(section.layers.layer_count, 0);
    assert!(section.layers.layers.is_empty());
    assert!(section.global_mask_info.is_some());
    assert_eq!(section.tagged_blocks.len(), 1);
}

#[test]
fn global_mask_and_document_blocks() {
    let mut blocks = block(b"8BIM", b"Patt", &[0; 6]);
    blocks.extend(block(b"8B64", b"lnk2", &[9; 12]));

    let data = Section {
        global_mask: global_mask(5),
        blocks,
        ..Default::default()
    }
    .build();

    let (section, _) = decode_section(&data);
    let info = section.global_mask_info.unwrap();

    assert_eq!(info.components, [65535, 0, 0, 0]);
    assert_eq!(info.opacity, 50);
    assert_eq!(info.kind, 1);

    assert_eq!(section.tagged_blocks.len(), 2);
    assert_eq!(&section.tagged_blocks[1].signature, b"8B64");
    assert_eq!(section.tagged_blocks[1].payload, [9; 12]);
}

#[test]
fn unknown_trailing_bytes_are_skipped() {
    let data = Section {
        layer_padding: vec![0; 3],
        blocks: block(b"8BIM", b"Patt", &[0; 2]),
        trailing: vec![0xEE; 11],
        ..Default::default()
    }
    .build();

    let (section, _) = decode_section(&data);

    assert_eq!(section.layers.layers.len(), 1);
    assert_eq!(section.tagged_blocks.len(), 1);
}

#[test]
fn channel_length_wins_over_payload() {
    let record = Record {
        channels: vec![(0, 110)],
        ..Default::default()
    };
    let mut channel_data = raw_channel(5, 100);
    channel_data.extend_from_slice(&[0xAA; 8]);

    let data = Section {
        records: vec![record.build()],
        channel_data,
        ..Default::default()
    }
    .build();

    let (section, _) = decode_section(&data);

    assert_eq!(section.layers.channel_image_data[0][0].bytes, [5; 100]);
}

#[test]
fn unknown_blend_mode_is_a_warning() {
    let record = Record {
        blend_mode: *b"what",
        ..Default::default()
    };
    let data = Section {
        records: vec![record.build()],
        ..Default::default()
    }
    .build();

    let (section, warnings) = decode_section(&data);

    assert_eq!(&section.layers.layers[0].blend_mode, b"what");
    assert_eq!(warnings.len(), 1);
    // section length, layer info length, count, box, channel count, one channel, 8BIM
    assert_eq!(
        warnings[0],
        PsdWarning::UnknownBlendMode {
            offset: 4 + 4 + 2 + 16 + 2 + 6 + 4,
            key:    *b"what"
        }
    );
}

#[test]
fn zip_channel_is_a_warning() {
    let mut channel_data = 2_u16.to_be_bytes().to_vec();
    channel_data.extend_from_slice(&[0x78; 100]);

    let data = Section {
        channel_data,
        ..Default::default()
    }
    .build();

    let (section, warnings) = decode_section(&data);
    let pixels = &section.layers.channel_image_data[0][0];

    assert_eq!(pixels.compression, CompressionMethod::Zip);
    assert!(pixels.bytes.is_empty());
    assert!(matches!(
        warnings[..],
        [PsdWarning::UnsupportedCompression {
            compression: CompressionMethod::Zip,
            ..
        }]
    ));
}

#[test]
fn huge_layer_is_skipped_with_warning() {
    let record = Record {
        bounds: [0, 0, 10, 100_000],
        ..Default::default()
    };
    let data = Section {
        records: vec![record.build()],
        ..Default::default()
    }
    .build();

    let (section, warnings) = decode_section(&data);

    assert!(section.layers.channel_image_data[0][0].bytes.is_empty());
    assert!(matches!(
        warnings[..],
        [PsdWarning::LargeChannel {
            width: 100_000,
            height: 10,
            ..
        }]
    ));
}

#[test]
fn huge_zip_layer_does_not_stop_decoding() {
    let wide = Record {
        bounds: [0, 0, 10, 40_000],
        channels: vec![(0, 10)],
        ..Default::default()
    };
    let small = Record {
        name: b"small".to_vec(),
        ..Default::default()
    };
    let mut channel_data = 2_u16.to_be_bytes().to_vec();
    channel_data.extend_from_slice(&[0x78; 8]);
    channel_data.extend(raw_channel(6, 100));

    let data = Section {
        layer_count: 2,
        records: vec![wide.build(), small.build()],
        channel_data,
        ..Default::default()
    }
    .build();

    let (section, warnings) = decode_section(&data);

    assert_eq!(section.layers.layers.len(), 2);
    assert_eq!(section.layers.layers[0].width(), 40_000);
    assert_eq!(section.layers.channel_image_data[1][0].bytes, [6; 100]);
    assert!(matches!(
        warnings[..],
        [PsdWarning::UnsupportedCompression {
            compression: CompressionMethod::Zip,
            ..
        }]
    ));
}

#[test]
fn limits_are_configurable() {
    let data = Section::default().build();
    let options = LayerDecoderOptions::default()
        .set_max_width(4)
        .set_max_height(4);

    let mut decoder = PsdLayerDecoder::new_with_options(ZCursor::new(&data[..]), options);
    let section = decoder.decode_layer_and_mask_info().unwrap();

    assert!(section.layers.channel_image_data[0][0].bytes.is_empty());
    assert!(matches!(
        decoder.warnings(),
        [PsdWarning::LargeChannel {
            width: 10,
            height: 10,
            ..
        }]
    ));
}

#[test]
fn strict_mode_escalates_warnings() {
    let record = Record {
        blend_mode: *b"what",
        ..Default::default()
    };
    let data = Section {
        records: vec![record.build()],
        ..Default::default()
    }
    .build();

    let options = LayerDecoderOptions::default().set_strict_mode(true);
    let mut decoder = PsdLayerDecoder::new_with_options(ZCursor::new(&data[..]), options);
    let err = decoder.decode_layer_and_mask_info().unwrap_err();

    assert!(matches!(
        err,
        PSDDecodeErrors::Strict(PsdWarning::UnknownBlendMode { .. })
    ));
    assert_eq!(err.offset(), Some(38));
    assert_eq!(decoder.warnings().len(), 1);
}

#[test]
fn decoding_is_repeatable() {
    let mut blocks = block(b"8BIM", b"lyid", &[0, 0, 0, 1]);
    blocks.extend(block(b"8BIM", b"iOpa", &[128, 0, 0, 0]));

    let record = Record {
        blocks,
        ..Default::default()
    };
    let data = Section {
        records: vec![record.build()],
        global_mask: global_mask(3),
        blocks: block(b"8BIM", b"Lr16", &[0; 4]),
        ..Default::default()
    }
    .build();

    let first = PsdLayerDecoder::new(ZCursor::new(&data[..]))
        .decode_layer_and_mask_info()
        .unwrap();
    let second = PsdLayerDecoder::new(ZCursor::new(&data[..]))
        .decode_layer_and_mask_info()
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(first.layers.layers[0].fill_opacity(), Some(128));
}

#[test]
fn whole_document() {
    let mut data = header(2, 3, 3);
    data.extend(Section::default().build());
    data.extend(raw_channel(0, 0));
    for fill in [1, 2, 3] {
        data.extend(std::iter::repeat(fill).take(6));
    }

    let mut decoder = PsdLayerDecoder::new(ZCursor::new(&data[..]));
    let document = decoder.decode().unwrap();

    assert_eq!(decoder.dimensions(), Some((2, 3)));
    assert_eq!(document.header.channel_count, 3);
    assert_eq!(document.layer_and_mask.layers.layers.len(), 1);
    assert_eq!(document.image_data.len(), 3);
    assert_eq!(document.image_data[2].bytes, [3; 6]);
    assert!(document.warnings.is_empty());
}

#[test]
fn whole_document_collects_warnings() {
    let record = Record {
        blend_mode: *b"what",
        ..Default::default()
    };
    let mut data = header(1, 1, 1);
    data.extend(
        Section {
            records: vec![record.build()],
            ..Default::default()
        }
        .build()
    );
    data.extend(sentinel());

    let document = PsdLayerDecoder::new(ZCursor::new(&data[..]))
        .decode()
        .unwrap();

    assert_eq!(document.warnings.len(), 1);
    assert_eq!(document.image_data[0].bytes, [0x42]);
}
