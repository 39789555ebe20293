/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::{value_parser, Arg, ArgAction, Command};

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("zune-psd-layers")
        .about("Print the layer and mask information of PSD files as json")
        .arg(Arg::new("in")
            .short('i')
            .help("Input file to read data from")
            .long("input")
            .action(ArgAction::Append)
            .required(true))
        .arg(Arg::new("section-only")
            .long("section-only")
            .action(ArgAction::SetTrue)
            .help("Input starts at the layer and mask information section")
            .long_help("Treat input files as a bare layer and mask information section,\nno file header, color mode data or image resources before it and no merged image after it"))
        .arg(Arg::new("compact")
            .long("compact")
            .action(ArgAction::SetTrue)
            .help("Print json on a single line"))
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display information about the decoding options"))
        .arg(Arg::new("strict")
            .long("strict")
            .action(ArgAction::SetTrue)
            .help_heading("ADVANCED")
            .help("Treat recoverable problems as errors"))
        .arg(Arg::new("utf8-names")
            .long("utf8-names")
            .action(ArgAction::SetTrue)
            .help_heading("ADVANCED")
            .help("Decode pascal layer names as utf8 instead of latin-1"))
        .arg(Arg::new("max-width")
            .long("max-width")
            .help_heading("ADVANCED")
            .help("Maximum width of a layer, larger layers are refused")
            .value_parser(value_parser!(usize))
            .default_value("30000"))
        .arg(Arg::new("max-height")
            .long("max-height")
            .help_heading("ADVANCED")
            .help("Maximum height of a layer, larger layers are refused")
            .value_parser(value_parser!(usize))
            .default_value("30000"))
}
