// crates/geobed-core/src/loader/common_io.rs
use crate::error::{GeoError, Result};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Opens a file for buffered reading, mapping a missing file to
/// [`GeoError::NotFound`].
pub fn open_file(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| {
        GeoError::NotFound(format!("Dataset not found at {}: {}", path.display(), e))
    })?;
    Ok(BufReader::new(file))
}

/// Opens a file and transparently gunzips it when it starts with the gzip
/// magic. Returns a generic reader so the caller doesn't care about the
/// compression.
pub fn open_stream(path: &Path) -> Result<Box<dyn BufRead>> {
    let mut reader = open_file(path)?;
    if reader.fill_buf()?.starts_with(&GZIP_MAGIC) {
        Ok(Box::new(BufReader::new(GzDecoder::new(reader))))
    } else {
        Ok(Box::new(reader))
    }
}

/// Feeds every line (without its terminator) to `f`.
///
/// Lines that are not UTF-8 are decoded as Latin-1, which is what the MaxMind
/// feed actually ships.
pub fn for_each_line<R: BufRead>(mut reader: R, mut f: impl FnMut(&str)) -> Result<()> {
    let mut buf = Vec::with_capacity(256);
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        while matches!(buf.last(), Some(b'\n' | b'\r')) {
            buf.pop();
        }
        match std::str::from_utf8(&buf) {
            Ok(line) => f(line),
            Err(_) => {
                let line: String = buf.iter().map(|&b| b as char).collect();
                f(&line)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn splits_lines_and_strips_terminators() {
        let mut lines = Vec::new();
        for_each_line(Cursor::new("a\r\nb\n\nc"), |l| lines.push(l.to_string())).unwrap();
        assert_eq!(lines, ["a", "b", "", "c"]);
    }

    #[test]
    fn latin1_lines_are_decoded() {
        let mut lines = Vec::new();
        for_each_line(Cursor::new(b"S\xe3o Paulo\n".to_vec()), |l| {
            lines.push(l.to_string())
        })
        .unwrap();
        assert_eq!(lines, ["São Paulo"]);
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = open_stream(Path::new("/definitely/not/here.txt")).err().unwrap();
        assert!(matches!(err, GeoError::NotFound(_)));
    }
}
