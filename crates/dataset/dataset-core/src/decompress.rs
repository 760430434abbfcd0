//! Payload decompression: gzip and Unix `compress` (.Z).

use std::io::{Cursor, Read};

use dataset_spi::{DatasetError, Result};
use flate2::read::MultiGzDecoder;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const LZW_MAGIC: [u8; 2] = [0x1f, 0x9d];

/// Compression detected from a payload's leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Gzip,
    Lzw,
    None,
}

impl Compression {
    pub fn sniff(data: &[u8]) -> Self {
        match data.get(..2) {
            Some(m) if m == GZIP_MAGIC => Compression::Gzip,
            Some(m) if m == LZW_MAGIC => Compression::Lzw,
            _ => Compression::None,
        }
    }
}

/// Streaming gzip decoder. Concatenated members are read as one stream.
pub fn gunzip<R: Read>(reader: R) -> MultiGzDecoder<R> {
    MultiGzDecoder::new(reader)
}

/// Readable view of a payload, decoding gzip on the fly.
///
/// `.Z` payloads are decoded up front since the format has no streaming reader.
pub fn reader_for(data: &[u8]) -> Result<Box<dyn Read + '_>> {
    Ok(match Compression::sniff(data) {
        Compression::Gzip => Box::new(gunzip(data)),
        Compression::Lzw => Box::new(Cursor::new(uncompress_lzw(data)?)),
        Compression::None => Box::new(data),
    })
}

/// Decode a payload whose compression is detected by magic number.
pub fn decompress_auto(data: Vec<u8>) -> Result<Vec<u8>> {
    match Compression::sniff(&data) {
        Compression::Gzip => {
            let mut out = Vec::new();
            gunzip(data.as_slice())
                .read_to_end(&mut out)
                .map_err(|e| DatasetError::Decompress(e.to_string()))?;
            Ok(out)
        }
        Compression::Lzw => uncompress_lzw(&data),
        Compression::None => Ok(data),
    }
}

/// Skip the rest of the current code group after a width change or CLEAR.
///
/// `compress` emits codes in groups of `bits` bytes and pads the group when
/// the code width changes.
fn flush_group(pos: &mut usize, chunk: &mut usize, len: usize) {
    *pos = (*pos + *chunk).min(len);
    *chunk = 0;
}

fn bad_code() -> DatasetError {
    DatasetError::Decompress("invalid lzw code".to_string())
}

/// Decode a Unix `compress` (.Z) payload.
pub fn uncompress_lzw(data: &[u8]) -> Result<Vec<u8>> {
    if data.len() < 3 || data[..2] != LZW_MAGIC {
        return Err(DatasetError::Decompress("missing compress header".to_string()));
    }
    let flags = data[2];
    if flags & 0x60 != 0 {
        return Err(DatasetError::Decompress("unknown compress flags".to_string()));
    }
    let mut max_bits = u32::from(flags & 0x1f);
    if !(9..=16).contains(&max_bits) {
        return Err(DatasetError::Decompress(format!(
            "unsupported code width {}",
            max_bits
        )));
    }
    // 9 is recorded for streams that actually use 10
    if max_bits == 9 {
        max_bits = 10;
    }
    let block_mode = flags & 0x80 != 0;

    let len = data.len();
    let mut pos = 3;
    let mut out = Vec::with_capacity(len * 3);
    if pos == len {
        return Ok(out);
    }

    // The first code is a literal and creates no table entry.
    let mut prev = usize::from(data[pos]);
    let mut last_literal = data[pos];
    pos += 1;
    if pos == len {
        return Err(bad_code());
    }
    let second = data[pos];
    pos += 1;
    if second & 1 != 0 {
        return Err(bad_code());
    }
    out.push(last_literal);

    let mut rem = u32::from(second >> 1);
    let mut left: u32 = 7;
    let mut bits: u32 = 9;
    let mut mask: usize = 0x1ff;
    let mut end: usize = if block_mode { 256 } else { 255 };
    let mut chunk: usize = bits as usize - 2;

    let mut prefix = vec![0u16; 1 << 16];
    let mut suffix = vec![0u8; 1 << 16];
    let mut stack: Vec<u8> = Vec::with_capacity(1 << 16);

    loop {
        if end >= mask && bits < max_bits {
            flush_group(&mut pos, &mut chunk, len);
            left = 0;
            rem = 0;
            bits += 1;
            mask = (mask << 1) | 1;
        }

        if chunk == 0 {
            chunk = bits as usize;
        }
        let mut code = rem as usize;
        if pos == len {
            break;
        }
        let mut last = data[pos];
        pos += 1;
        code += usize::from(last) << left;
        left += 8;
        chunk -= 1;
        if bits > left {
            if pos == len {
                return Err(bad_code());
            }
            last = data[pos];
            pos += 1;
            code += usize::from(last) << left;
            left += 8;
            chunk -= 1;
        }
        code &= mask;
        left -= bits;
        rem = u32::from(last) >> (8 - left);

        if code == 256 && block_mode {
            flush_group(&mut pos, &mut chunk, len);
            left = 0;
            rem = 0;
            bits = 9;
            mask = 0x1ff;
            end = 255;
            continue;
        }

        let current = code;
        if code > end {
            // KwKwK: the code being defined right now
            if code != end + 1 || prev > end {
                return Err(bad_code());
            }
            stack.push(last_literal);
            code = prev;
        }

        while code >= 256 {
            stack.push(suffix[code]);
            code = usize::from(prefix[code]);
        }
        stack.push(code as u8);
        last_literal = code as u8;

        if end < mask {
            end += 1;
            prefix[end] = prev as u16;
            suffix[end] = last_literal;
        }
        prev = current;

        out.extend(stack.drain(..).rev());
    }

    Ok(out)
}
