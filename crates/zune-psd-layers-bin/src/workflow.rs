/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::ffi::OsStr;
use std::fmt::{Debug, Formatter};

use clap::ArgMatches;
use log::{info, warn};
use zune_psd_layers::zune_core::bytestream::ZCursor;
use zune_psd_layers::{LayerDecoderOptions, PSDDecodeErrors, PsdLayerDecoder};

use crate::cmd_parsers::global_options::CmdOptions;
use crate::serde::Summary;

pub enum CliErrors {
    Io(std::io::Error),
    Decode(PSDDecodeErrors),
    Json(serde_json::Error),
    NoInput
}

impl Debug for CliErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CliErrors::Io(e) => writeln!(f, "I/O error: {e}"),
            CliErrors::Decode(e) => writeln!(f, "{e:?}"),
            CliErrors::Json(e) => writeln!(f, "Could not serialize summary: {e}"),
            CliErrors::NoInput => writeln!(f, "No input files")
        }
    }
}

impl From<std::io::Error> for CliErrors {
    fn from(e: std::io::Error) -> Self {
        CliErrors::Io(e)
    }
}

impl From<PSDDecodeErrors> for CliErrors {
    fn from(e: PSDDecodeErrors) -> Self {
        CliErrors::Decode(e)
    }
}

impl From<serde_json::Error> for CliErrors {
    fn from(e: serde_json::Error) -> Self {
        CliErrors::Json(e)
    }
}

/// Decode every input file and print its summary
pub(crate) fn dump_input_files(
    args: &ArgMatches, cmd_opts: &CmdOptions, decoder_opts: LayerDecoderOptions
) -> Result<(), CliErrors> {
    let inputs = args.get_raw("in").ok_or(CliErrors::NoInput)?;

    for in_file in inputs {
        info!("Reading {:?}", in_file);

        let data = std::fs::read(in_file)?;
        let json = dump_file(in_file, &data, cmd_opts, decoder_opts)?;

        println!("{json}");
    }
    Ok(())
}

fn dump_file(
    in_file: &OsStr, data: &[u8], cmd_opts: &CmdOptions, decoder_opts: LayerDecoderOptions
) -> Result<String, CliErrors> {
    let mut decoder = PsdLayerDecoder::new_with_options(ZCursor::new(data), decoder_opts);

    let (header, section, image_data, warnings) = if cmd_opts.section_only {
        let section = decoder.decode_layer_and_mask_info()?;
        let warnings = decoder.warnings().to_vec();
        (None, section, Vec::new(), warnings)
    } else {
        let document = decoder.decode()?;
        (
            Some(document.header),
            document.layer_and_mask,
            document.image_data,
            document.warnings
        )
    };

    if !warnings.is_empty() {
        warn!("{:?}: {} warnings", in_file, warnings.len());
    }

    let summary = Summary::new(
        in_file.to_os_string(),
        header,
        &section,
        &image_data,
        &warnings
    );

    let json = if cmd_opts.compact {
        serde_json::to_string(&summary)?
    } else {
        serde_json::to_string_pretty(&summary)?
    };
    Ok(json)
}
