//! Parse NBT bytes into a [`Document`].
//!
//! Parsing only checks structure: tags must be known, lengths must be
//! non-negative and the input must not run out. Whether a compound has the
//! keys a player needs is left to [`crate::extract`].

use std::io::{Cursor, Read};

use byteorder::{BigEndian, ReadBytesExt};
use flate2::read::GzDecoder;
use log::debug;

use crate::error::{Error, Result};
use crate::{Document, Node, Tag};

/// Maximum depth of nested compounds and lists, the same limit the game
/// applies when it reads NBT.
pub const MAX_DEPTH: usize = 512;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Parse an uncompressed NBT document held in memory.
pub fn from_bytes(bytes: &[u8]) -> Result<Document> {
    from_reader(bytes)
}

/// Parse an uncompressed NBT document from a reader.
pub fn from_reader<R: Read>(reader: R) -> Result<Document> {
    Parser::new(reader).document()
}

/// Parse an NBT document that may or may not be GZip compressed. Player
/// files on disk are compressed, NBT embedded elsewhere often is not.
pub fn from_reader_maybe_gzip<R: Read>(mut reader: R) -> Result<Document> {
    let mut magic = Vec::with_capacity(GZIP_MAGIC.len());
    (&mut reader)
        .take(GZIP_MAGIC.len() as u64)
        .read_to_end(&mut magic)?;

    let compressed = magic == GZIP_MAGIC;
    let reader = Cursor::new(magic).chain(reader);

    if compressed {
        debug!("input is gzip compressed");
        from_reader(GzDecoder::new(reader))
    } else {
        from_reader(reader)
    }
}

struct Parser<R: Read> {
    reader: R,
    depth: usize,
}

impl<R: Read> Parser<R> {
    fn new(reader: R) -> Self {
        Self { reader, depth: 0 }
    }

    fn document(&mut self) -> Result<Document> {
        let tag = match self.reader.read_u8() {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                return Err(Error::no_root_compound())
            }
            Err(e) => return Err(e.into()),
        };

        let tag = u8_to_tag(tag)?;
        if tag == Tag::End {
            return Err(Error::no_root_compound());
        }

        let name = self.read_size_prefixed_string()?;
        let root = self.read_payload(tag)?;

        Ok(Document { name, root })
    }

    fn read_size_prefixed_string(&mut self) -> Result<String> {
        let len = self.reader.read_u16::<BigEndian>()? as usize;

        let mut buf = vec![0; len];
        self.reader.read_exact(&mut buf[..])?;

        Ok(cesu8::from_java_cesu8(&buf[..])
            .map_err(|_| Error::nonunicode(&buf[..]))?
            .into_owned())
    }

    fn read_size(&mut self) -> Result<usize> {
        let size = self.reader.read_i32::<BigEndian>()?;
        usize::try_from(size).map_err(|_| Error::bespoke(format!("negative size: {}", size)))
    }

    fn read_payload(&mut self, tag: Tag) -> Result<Node> {
        Ok(match tag {
            Tag::Byte => Node::Byte(self.reader.read_i8()?),
            Tag::Short => Node::Short(self.reader.read_i16::<BigEndian>()?),
            Tag::Int => Node::Int(self.reader.read_i32::<BigEndian>()?),
            Tag::Long => Node::Long(self.reader.read_i64::<BigEndian>()?),
            Tag::Float => Node::Float(self.reader.read_f32::<BigEndian>()?),
            Tag::Double => Node::Double(self.reader.read_f64::<BigEndian>()?),
            Tag::String => Node::String(self.read_size_prefixed_string()?),
            Tag::ByteArray => {
                let size = self.read_size()?;
                let mut buf = Vec::new();
                (&mut self.reader).take(size as u64).read_to_end(&mut buf)?;
                if buf.len() != size {
                    return Err(Error::unexpected_eof());
                }
                Node::ByteArray(buf.into_iter().map(|b| b as i8).collect())
            }
            Tag::IntArray => {
                let size = self.read_size()?;
                let mut buf = Vec::new();
                for _ in 0..size {
                    buf.push(self.reader.read_i32::<BigEndian>()?);
                }
                Node::IntArray(buf)
            }
            Tag::LongArray => {
                let size = self.read_size()?;
                let mut buf = Vec::new();
                for _ in 0..size {
                    buf.push(self.reader.read_i64::<BigEndian>()?);
                }
                Node::LongArray(buf)
            }
            Tag::List => {
                let element_tag = u8_to_tag(self.reader.read_u8()?)?;
                let size = self.read_size()?;

                if element_tag == Tag::End && size > 0 {
                    return Err(Error::bespoke("list of end tags with non-zero size"));
                }

                self.enter()?;
                let mut elements = Vec::new();
                for _ in 0..size {
                    elements.push(self.read_payload(element_tag)?);
                }
                self.leave();

                Node::List(element_tag, elements)
            }
            Tag::Compound => {
                self.enter()?;
                let mut map = std::collections::HashMap::new();
                loop {
                    let tag = u8_to_tag(self.reader.read_u8()?)?;
                    if tag == Tag::End {
                        break;
                    }

                    let name = self.read_size_prefixed_string()?;
                    let value = self.read_payload(tag)?;
                    map.insert(name, value);
                }
                self.leave();

                Node::Compound(map)
            }
            Tag::End => return Err(Error::bespoke("unexpected end tag")),
        })
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(Error::too_deep(MAX_DEPTH));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }
}

fn u8_to_tag(tag: u8) -> Result<Tag> {
    Tag::try_from(tag).map_err(|_| Error::invalid_tag(tag))
}
