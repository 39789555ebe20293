/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::ArgMatches;
use zune_psd_layers::{LayerDecoderOptions, NameEncoding};

pub mod global_options;

pub fn get_decoder_options(options: &ArgMatches) -> LayerDecoderOptions {
    let max_width = options
        .get_one::<usize>("max-width")
        .copied()
        .unwrap_or(30000);
    let max_height = options
        .get_one::<usize>("max-height")
        .copied()
        .unwrap_or(30000);
    let strict_mode = options.get_flag("strict");

    let encoding = if options.get_flag("utf8-names") {
        NameEncoding::Utf8
    } else {
        NameEncoding::Latin1
    };

    LayerDecoderOptions::default()
        .set_max_height(max_height)
        .set_max_width(max_width)
        .set_strict_mode(strict_mode)
        .set_name_encoding(encoding)
}
