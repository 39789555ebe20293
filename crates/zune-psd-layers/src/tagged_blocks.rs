/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Tagged blocks, a.k.a additional layer information.
//!
//! Self delimited `(signature, key, length, payload)` records used by the
//! format for almost every feature added after version 1. We keep them as
//! opaque payloads and provide lookups for the few keys worth interpreting.
use alloc::string::String;
use alloc::vec::Vec;

use zune_core::bytestream::{ZByteReaderTrait, ZReader};
use zune_core::log::trace;

use crate::constants::{keys, SectionDivider, SIGNATURE_8B64, SIGNATURE_8BIM};
use crate::errors::PSDDecodeErrors;
use crate::utils::{read_bytes, read_tag};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TaggedBlock {
    /// `8BIM` or `8B64`
    pub signature: [u8; 4],
    pub key:       [u8; 4],
    pub payload:   Vec<u8>
}

impl TaggedBlock {
    /// Key as a string, if it is valid utf8
    pub fn key_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.key).ok()
    }

    fn u32_at(&self, offset: usize) -> Option<u32> {
        let bytes = self.payload.get(offset..offset + 4)?;
        Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

/// Read tagged blocks until at least `budget` bytes have been consumed
/// or the next four bytes are not a block signature.
///
/// The budget is only checked between blocks, the last block may run past
/// it. When the signature does not match, the stream is rewound to where the
/// signature started.
pub fn read_tagged_blocks<T: ZByteReaderTrait>(
    stream: &mut ZReader<T>, budget: i64
) -> Result<Vec<TaggedBlock>, PSDDecodeErrors> {
    let mut blocks = Vec::new();
    let start = stream.position()?;
    let mut consumed = 0_i64;

    while consumed < budget {
        match read_tagged_block(stream)? {
            Some(block) => blocks.push(block),
            None => break
        }
        consumed = (stream.position()? - start) as i64;
    }
    Ok(blocks)
}

fn read_tagged_block<T: ZByteReaderTrait>(
    stream: &mut ZReader<T>
) -> Result<Option<TaggedBlock>, PSDDecodeErrors> {
    let before = stream.position()?;
    // trailing bytes too short to hold a signature are padding
    let signature = match read_tag(stream) {
        Ok(signature) => signature,
        Err(_) => {
            let after = stream.position()?;
            stream.rewind(after.saturating_sub(before) as usize)?;
            return Ok(None);
        }
    };

    if signature != SIGNATURE_8BIM && signature != SIGNATURE_8B64 {
        stream.rewind(4)?;
        return Ok(None);
    }
    let key = read_tag(stream)?;
    let length = stream.get_u32_be_err()? as usize;

    trace!(
        "Tagged block {:?}, {} bytes",
        core::str::from_utf8(&key),
        length
    );

    let payload = read_bytes(stream, length)?;

    Ok(Some(TaggedBlock {
        signature,
        key,
        payload
    }))
}

/// First block carrying `key`
pub fn find_block<'a>(blocks: &'a [TaggedBlock], key: &[u8; 4]) -> Option<&'a TaggedBlock> {
    blocks.iter().find(|block| &block.key == key)
}

/// Name stored in a `luni` block.
///
/// A u32 count of UTF-16 big endian code units followed by the units.
pub fn unicode_name(blocks: &[TaggedBlock]) -> Option<String> {
    let block = find_block(blocks, &keys::UNICODE_NAME)?;
    let count = block.u32_at(0)? as usize;
    let units = block.payload.get(4..)?;

    let decoded: Vec<u16> = units
        .chunks_exact(2)
        .take(count)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();

    let name = String::from_utf16_lossy(&decoded);
    // some writers include the terminator in the count
    Some(String::from(name.trim_end_matches('\0')))
}

/// Layer id from a `lyid` block
pub fn layer_id(blocks: &[TaggedBlock]) -> Option<u32> {
    find_block(blocks, &keys::LAYER_ID)?.u32_at(0)
}

/// Group structure from a `lsct` block, falling back to `lsdk`
pub fn section_divider(blocks: &[TaggedBlock]) -> Option<SectionDivider> {
    let block = find_block(blocks, &keys::SECTION_DIVIDER)
        .or_else(|| find_block(blocks, &keys::NESTED_SECTION_DIVIDER))?;

    Some(SectionDivider::from_int(block.u32_at(0)?))
}

/// Fill opacity from an `iOpa` block
pub fn fill_opacity(blocks: &[TaggedBlock]) -> Option<u8> {
    find_block(blocks, &keys::FILL_OPACITY)?
        .payload
        .first()
        .copied()
}
