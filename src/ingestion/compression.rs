//! Transparent decompression of source files.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};

use flate2::read::MultiGzDecoder;
use serde::{Deserialize, Serialize};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// How the source bytes are compressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compression {
    /// Sniff the gzip magic bytes; fall back to plain text.
    #[default]
    Auto,
    /// Always decode as gzip.
    Gzip,
    /// Read bytes as-is.
    None,
}

/// Wrap `file` in the decoder selected by `compression`.
pub fn decoder(file: File, compression: Compression) -> io::Result<Box<dyn Read>> {
    let mut buffered = BufReader::new(file);
    let gzip = match compression {
        Compression::Gzip => true,
        Compression::None => false,
        Compression::Auto => is_gzip(&mut buffered)?,
    };

    if gzip {
        Ok(Box::new(MultiGzDecoder::new(buffered)))
    } else {
        Ok(Box::new(buffered))
    }
}

/// Peek at the buffered head of the stream without consuming it.
fn is_gzip<R: BufRead>(reader: &mut R) -> io::Result<bool> {
    let head = reader.fill_buf()?;
    Ok(head.starts_with(&GZIP_MAGIC))
}

#[cfg(test)]
mod tests {
    use super::is_gzip;
    use std::io::{BufRead, Cursor};

    #[test]
    fn sniffs_gzip_magic_without_consuming() {
        let mut gz = Cursor::new(vec![0x1f, 0x8b, 0x08, 0x00]);
        assert!(is_gzip(&mut gz).unwrap());
        assert_eq!(gz.fill_buf().unwrap().len(), 4);

        let mut plain = Cursor::new(b"lat,lng\n".to_vec());
        assert!(!is_gzip(&mut plain).unwrap());

        let mut empty = Cursor::new(Vec::<u8>::new());
        assert!(!is_gzip(&mut empty).unwrap());
    }
}
