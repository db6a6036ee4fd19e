//! Character input sources.
//!
//! The analysis buffer is refilled through [`CharSource`], which
//! decouples segmentation from how text arrives. [`StrSource`] wraps
//! in-memory text; [`Utf8Reader`] decodes a byte stream incrementally,
//! carrying multi-byte sequences split across reads.

use std::io::{self, Read};

/// A pull source of decoded characters.
pub trait CharSource {
    /// Read as many characters as possible into `buf`, returning how
    /// many were written. Zero means end of input.
    fn read_chars(&mut self, buf: &mut [char]) -> io::Result<usize>;
}

/// A source over an in-memory string.
pub struct StrSource {
    chars: Vec<char>,
    pos: usize,
}

impl StrSource {
    pub fn new(text: &str) -> Self {
        StrSource {
            chars: text.chars().collect(),
            pos: 0,
        }
    }
}

impl CharSource for StrSource {
    fn read_chars(&mut self, buf: &mut [char]) -> io::Result<usize> {
        let n = buf.len().min(self.chars.len() - self.pos);
        buf[..n].copy_from_slice(&self.chars[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// An incremental UTF-8 decoder over any byte reader.
pub struct Utf8Reader<R: Read> {
    inner: R,
    /// Undecoded bytes carried from the previous read.
    buf: Vec<u8>,
    len: usize,
    eof: bool,
}

impl<R: Read> Utf8Reader<R> {
    pub fn new(inner: R) -> Self {
        Utf8Reader {
            inner,
            buf: vec![0; 4096],
            len: 0,
            eof: false,
        }
    }
}

impl<R: Read> CharSource for Utf8Reader<R> {
    fn read_chars(&mut self, buf: &mut [char]) -> io::Result<usize> {
        let mut written = 0;
        while written < buf.len() {
            if !self.eof && self.len < self.buf.len() {
                let read = self.inner.read(&mut self.buf[self.len..])?;
                if read == 0 {
                    self.eof = true;
                }
                self.len += read;
            }
            if self.len == 0 {
                break;
            }

            // Decode the longest valid prefix of the byte buffer.
            let (valid, incomplete) = match std::str::from_utf8(&self.buf[..self.len]) {
                Ok(s) => (s, false),
                Err(e) => {
                    let valid_up_to = e.valid_up_to();
                    if e.error_len().is_some() {
                        return Err(io::Error::new(
                            io::ErrorKind::InvalidData,
                            "invalid UTF-8 in input stream",
                        ));
                    }
                    // A sequence is split across reads; decode up to
                    // it and carry the tail.
                    let s = std::str::from_utf8(&self.buf[..valid_up_to])
                        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "utf-8"))?;
                    (s, true)
                }
            };

            if valid.is_empty() {
                if self.eof {
                    if incomplete {
                        return Err(io::Error::new(
                            io::ErrorKind::InvalidData,
                            "truncated UTF-8 sequence at end of input",
                        ));
                    }
                    break;
                }
                continue;
            }

            let mut consumed = 0;
            for c in valid.chars() {
                if written == buf.len() {
                    break;
                }
                buf[written] = c;
                written += 1;
                consumed += c.len_utf8();
            }
            self.buf.copy_within(consumed..self.len, 0);
            self.len -= consumed;

            if self.eof && self.len == 0 {
                break;
            }
            if self.eof && written == buf.len() {
                break;
            }
            if self.eof && incomplete && self.len > 0 && written < buf.len() {
                // Only the carried tail remains and it cannot complete.
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "truncated UTF-8 sequence at end of input",
                ));
            }
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_str_source_reads_in_chunks() {
        let mut src = StrSource::new("中文abc");
        let mut buf = ['\0'; 3];
        assert_eq!(src.read_chars(&mut buf).unwrap(), 3);
        assert_eq!(&buf, &['中', '文', 'a']);
        assert_eq!(src.read_chars(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], &['b', 'c']);
        assert_eq!(src.read_chars(&mut buf).unwrap(), 0);
    }

    /// A reader that yields its bytes one at a time, forcing every
    /// multi-byte sequence to split across reads.
    struct TrickleReader {
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for TrickleReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.pos == self.bytes.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.bytes[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    #[test]
    fn test_utf8_reader_plain() {
        let mut src = Utf8Reader::new("hello 世界".as_bytes());
        let mut buf = ['\0'; 16];
        let n = src.read_chars(&mut buf).unwrap();
        assert_eq!(&buf[..n], &['h', 'e', 'l', 'l', 'o', ' ', '世', '界']);
        assert_eq!(src.read_chars(&mut buf).unwrap(), 0);
    }

    #[test]
    fn test_utf8_reader_split_sequences() {
        let reader = TrickleReader {
            bytes: "中华人民".as_bytes().to_vec(),
            pos: 0,
        };
        let mut src = Utf8Reader::new(reader);
        let mut buf = ['\0'; 8];
        let n = src.read_chars(&mut buf).unwrap();
        assert_eq!(&buf[..n], &['中', '华', '人', '民']);
    }

    #[test]
    fn test_utf8_reader_invalid_bytes() {
        let mut src = Utf8Reader::new(&[0x61, 0xff, 0x62][..]);
        let mut buf = ['\0'; 8];
        let err = src.read_chars(&mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_utf8_reader_truncated_tail() {
        // First two bytes of a three-byte sequence.
        let mut src = Utf8Reader::new(&[0xe4, 0xb8][..]);
        let mut buf = ['\0'; 8];
        let err = src.read_chars(&mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
