/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use zune_core::bytestream::{ZByteReaderTrait, ZReader};

use crate::constants::GLOBAL_MASK_INFO_SIZE;
use crate::errors::PSDDecodeErrors;
use crate::utils::absorb_remainder;

/// Global layer mask info
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct GlobalMaskInfo {
    /// Overlay color space
    pub color_space: u16,
    pub components:  [u16; 4],
    /// 0 = transparent, 100 = opaque
    pub opacity:     u16,
    /// 0 = color selected, 1 = color protected, 128 = per layer
    pub kind:        u8
}

/// Read the global layer mask info, `None` when the record is empty.
pub fn read_global_mask_info<T: ZByteReaderTrait>(
    stream: &mut ZReader<T>
) -> Result<Option<GlobalMaskInfo>, PSDDecodeErrors> {
    let length = stream.get_u32_be_err()?;
    let start = stream.position()?;

    if length == 0 {
        return Ok(None);
    }

    let color_space = stream.get_u16_be_err()?;
    let mut components = [0; 4];
    for component in components.iter_mut() {
        *component = stream.get_u16_be_err()?;
    }
    let opacity = stream.get_u16_be_err()?;
    let kind = stream.read_u8_err()?;

    // filler
    absorb_remainder(stream, start, u64::from(length).max(GLOBAL_MASK_INFO_SIZE))?;

    Ok(Some(GlobalMaskInfo {
        color_space,
        components,
        opacity,
        kind
    }))
}
