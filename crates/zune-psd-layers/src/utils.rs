/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Small reading helpers on top of [`ZReader`]
use alloc::vec::Vec;

use zune_core::bytestream::{ZByteIoError, ZByteReaderTrait, ZReader};

/// Largest piece we allocate before the stream proves it has the bytes
const READ_CHUNK_SIZE: usize = 1 << 16;

#[inline]
pub(crate) fn read_i16<T: ZByteReaderTrait>(
    stream: &mut ZReader<T>
) -> Result<i16, ZByteIoError> {
    Ok(stream.get_u16_be_err()? as i16)
}

#[inline]
pub(crate) fn read_i32<T: ZByteReaderTrait>(
    stream: &mut ZReader<T>
) -> Result<i32, ZByteIoError> {
    Ok(stream.get_u32_be_err()? as i32)
}

/// Read a four byte key or signature
#[inline]
pub(crate) fn read_tag<T: ZByteReaderTrait>(
    stream: &mut ZReader<T>
) -> Result<[u8; 4], ZByteIoError> {
    let mut buf = [0; 4];
    stream.read_exact_bytes(&mut buf)?;
    Ok(buf)
}

/// Read exactly `length` bytes.
///
/// Lengths come straight from the file, so memory grows with what
/// the stream actually delivers instead of what the header claims.
pub(crate) fn read_bytes<T: ZByteReaderTrait>(
    stream: &mut ZReader<T>, length: usize
) -> Result<Vec<u8>, ZByteIoError> {
    let mut out = Vec::with_capacity(length.min(READ_CHUNK_SIZE));
    let mut remaining = length;

    while remaining > 0 {
        let take = remaining.min(READ_CHUNK_SIZE);
        let start = out.len();

        out.resize(start + take, 0);
        stream.read_exact_bytes(&mut out[start..])?;

        remaining -= take;
    }
    Ok(out)
}

/// Bytes consumed since `origin`
#[inline]
pub(crate) fn consumed_since<T: ZByteReaderTrait>(
    stream: &mut ZReader<T>, origin: u64
) -> Result<u64, ZByteIoError> {
    Ok(stream.position()?.saturating_sub(origin))
}

/// Move to the end of a record that started at `origin` and declared
/// `declared_length` bytes.
///
/// Whatever the record's fields did not consume is skipped. If they consumed
/// more than declared we stay where we are, the stream never moves backwards.
///
/// Returns the position after the record.
pub(crate) fn absorb_remainder<T: ZByteReaderTrait>(
    stream: &mut ZReader<T>, origin: u64, declared_length: u64
) -> Result<u64, ZByteIoError> {
    let end = origin.saturating_add(declared_length);
    let position = stream.position()?;

    if end > position {
        stream.skip(usize::try_from(end - position)?)?;
        return Ok(end);
    }
    Ok(position)
}

/// Bytes in one row of a channel `width` samples wide
pub(crate) fn row_bytes(width: usize, depth: u16) -> usize {
    match depth {
        1 => width.div_ceil(8),
        16 => width.saturating_mul(2),
        32 => width.saturating_mul(4),
        _ => width
    }
}

#[cfg(test)]
mod tests {
    use zune_core::bytestream::{ZCursor, ZReader};

    use super::*;

    #[test]
    fn absorb_skips_forward() {
        let data = [0_u8; 32];
        let mut stream = ZReader::new(ZCursor::new(&data[..]));

        stream.skip(3).unwrap();
        let end = absorb_remainder(&mut stream, 0, 10).unwrap();

        assert_eq!(end, 10);
        assert_eq!(stream.position().unwrap(), 10);
    }

    #[test]
    fn absorb_never_moves_backwards() {
        let data = [0_u8; 32];
        let mut stream = ZReader::new(ZCursor::new(&data[..]));

        stream.skip(20).unwrap();
        let end = absorb_remainder(&mut stream, 4, 8).unwrap();

        assert_eq!(end, 20);
        assert_eq!(stream.position().unwrap(), 20);
    }

    #[test]
    fn signed_reads() {
        let data = [0xFF, 0xFE, 0xFF, 0xFF, 0xFF, 0xF6];
        let mut stream = ZReader::new(ZCursor::new(&data[..]));

        assert_eq!(read_i16(&mut stream).unwrap(), -2);
        assert_eq!(read_i32(&mut stream).unwrap(), -10);
    }

    #[test]
    fn read_bytes_fails_on_short_stream() {
        let data = [1_u8; 5];
        let mut stream = ZReader::new(ZCursor::new(&data[..]));

        assert!(read_bytes(&mut stream, 6).is_err());
    }

    #[test]
    fn row_bytes_follow_depth() {
        assert_eq!(row_bytes(10, 8), 10);
        assert_eq!(row_bytes(10, 16), 20);
        assert_eq!(row_bytes(10, 1), 2);
    }
}
