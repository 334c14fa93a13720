//! Block reader.

use std::io::{self, Read, Seek, SeekFrom, Write};

use tracing::{debug, trace};

use crate::block::{Block, BlockData, BlockHeader, BlockType, KEYWORD_LEN, chunk_sizes};
use crate::{BinError, BinResult, Endian};

/// Byte length of the header record body.
const HEADER_LEN: i32 = 16;

/// Values per line in [`BlockReader::dump_all`].
const DUMP_PER_LINE: usize = 10;

/// Sequential reader over a blocked binary stream.
///
/// The stream position always sits on a block header between calls to
/// [`read_next_block`](Self::read_next_block). After [`read_key`](Self::read_key)
/// the caller must consume the payload with the matching `read_*` method.
pub struct BlockReader<R> {
    inner: R,
    endian: Endian,
    keyword: String,
}

impl<R: Read + Seek> BlockReader<R> {
    /// Probe the byte order from the first length marker and rewind.
    ///
    /// An empty stream is accepted and yields no blocks.
    pub fn new(mut inner: R) -> BinResult<Self> {
        let mut probe = [0_u8; 4];
        let got = read_up_to(&mut inner, &mut probe).map_err(|e| BinError::on_read("", e))?;
        let endian = match got {
            0 => Endian::Big,
            4 => Endian::detect(probe).ok_or_else(|| {
                BinError::format(format!(
                    "leading record marker {:02x?} is not a block header in either byte order",
                    probe
                ))
            })?,
            n => {
                return Err(BinError::format(format!(
                    "stream too short for a record marker ({n} bytes)"
                )));
            }
        };
        inner
            .seek(SeekFrom::Start(0))
            .map_err(|e| BinError::on_read("", e))?;
        debug!(?endian, "detected byte order");
        Ok(Self::with_endian(inner, endian))
    }
}

impl<R: Read> BlockReader<R> {
    /// Use a known byte order and skip the probe.
    pub fn with_endian(inner: R, endian: Endian) -> Self {
        Self {
            inner,
            endian,
            keyword: String::new(),
        }
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Read the next block header, or `None` at a clean end of stream.
    pub fn read_key(&mut self) -> BinResult<Option<BlockHeader>> {
        let mut lead = [0_u8; 4];
        let got = read_up_to(&mut self.inner, &mut lead)
            .map_err(|e| BinError::on_read(&self.keyword, e))?;
        match got {
            0 => return Ok(None),
            4 => {}
            _ => {
                return Err(BinError::format(format!(
                    "truncated header record after keyword '{}'",
                    self.keyword
                )));
            }
        }
        let marker = self.decode_i32(lead);
        if marker != HEADER_LEN {
            return Err(BinError::format(format!(
                "header record length {marker}, expected {HEADER_LEN}"
            )));
        }

        let mut name = [0_u8; KEYWORD_LEN];
        self.read_exact(&mut name)?;
        let count = self.read_i32()?;
        let mut tag = [0_u8; 4];
        self.read_exact(&mut tag)?;
        self.expect_marker(HEADER_LEN, "header")?;

        let keyword = ascii(&name)?.trim_end().to_string();
        let tag = ascii(&tag)?;
        self.keyword.clone_from(&keyword);

        let kind = BlockType::from_tag(&tag).map_err(|_| BinError::UnsupportedType {
            tag,
            keyword: keyword.clone(),
        })?;
        let count = usize::try_from(count).map_err(|_| {
            BinError::format(format!("negative element count {count} for '{keyword}'"))
        })?;
        trace!(%keyword, count, %kind, "block header");
        Ok(Some(BlockHeader {
            keyword,
            count,
            kind,
        }))
    }

    /// Read a whole block, header and payload.
    pub fn read_next_block(&mut self) -> BinResult<Option<Block>> {
        let Some(header) = self.read_key()? else {
            return Ok(None);
        };
        let data = self.read_data(&header)?;
        debug!(keyword = %header.keyword, count = header.count, kind = %header.kind, "read block");
        Ok(Some(Block {
            keyword: header.keyword,
            data,
        }))
    }

    /// Payload for a header just returned by [`read_key`](Self::read_key).
    pub fn read_data(&mut self, header: &BlockHeader) -> BinResult<BlockData> {
        let n = header.count;
        Ok(match header.kind {
            BlockType::Char => BlockData::Char(self.read_chars(n)?),
            BlockType::Inte => BlockData::Inte(self.read_ints(n)?),
            BlockType::Real => BlockData::Real(self.read_reals(n)?),
            BlockType::Doub => BlockData::Doub(self.read_doubles(n)?),
            BlockType::Logi => BlockData::Logi(self.read_logicals(n)?),
            BlockType::Mess => BlockData::Mess,
        })
    }

    pub fn read_chars(&mut self, count: usize) -> BinResult<Vec<String>> {
        let raw = self.read_array(count, BlockType::Char, |r, _| {
            let mut buf = [0_u8; KEYWORD_LEN];
            r.read_exact(&mut buf)?;
            Ok(buf)
        })?;
        raw.iter().map(|b| ascii(b)).collect()
    }

    pub fn read_ints(&mut self, count: usize) -> BinResult<Vec<i32>> {
        self.read_array(count, BlockType::Inte, |r, e| e.read_i32(r))
    }

    pub fn read_reals(&mut self, count: usize) -> BinResult<Vec<f32>> {
        self.read_array(count, BlockType::Real, |r, e| e.read_f32(r))
    }

    pub fn read_doubles(&mut self, count: usize) -> BinResult<Vec<f64>> {
        self.read_array(count, BlockType::Doub, |r, e| e.read_f64(r))
    }

    pub fn read_logicals(&mut self, count: usize) -> BinResult<Vec<bool>> {
        self.read_array(count, BlockType::Logi, |r, e| Ok(e.read_i32(r)? != 0))
    }

    /// Write one `keyword count type` line per block.
    pub fn list_all<W: Write>(&mut self, out: &mut W) -> BinResult<()> {
        while let Some(header) = self.read_key()? {
            self.skip_data(&header)?;
            writeln!(out, "{header}").map_err(|e| BinError::on_write(&header.keyword, e))?;
        }
        Ok(())
    }

    /// Like [`list_all`](Self::list_all), followed by the values of each block.
    pub fn dump_all<W: Write>(&mut self, out: &mut W) -> BinResult<()> {
        while let Some(header) = self.read_key()? {
            let data = self.read_data(&header)?;
            let io = |e: io::Error| BinError::on_write(&header.keyword, e);
            writeln!(out, "{header}").map_err(io)?;
            for start in (0..data.len()).step_by(DUMP_PER_LINE) {
                let end = (start + DUMP_PER_LINE).min(data.len());
                let line: Vec<String> = (start..end).map(|i| data.format_value(i)).collect();
                writeln!(out, "  {}", line.join(" ")).map_err(io)?;
            }
        }
        Ok(())
    }

    /// Iterate over the remaining blocks. Iteration stops after the first error.
    pub fn blocks(&mut self) -> Blocks<'_, R> {
        Blocks {
            reader: self,
            done: false,
        }
    }

    fn skip_data(&mut self, header: &BlockHeader) -> BinResult<()> {
        let size = header.kind.element_size();
        for n in chunk_sizes(header.count, header.kind) {
            let bytes = record_len(n, size)?;
            self.expect_marker(bytes, "data")?;
            let copied = io::copy(&mut (&mut self.inner).take(bytes as u64), &mut io::sink())
                .map_err(|e| BinError::on_read(&self.keyword, e))?;
            if copied != bytes as u64 {
                return Err(self.truncated());
            }
            self.expect_marker(bytes, "data")?;
        }
        Ok(())
    }

    fn read_array<T>(
        &mut self,
        count: usize,
        kind: BlockType,
        mut read_one: impl FnMut(&mut R, Endian) -> io::Result<T>,
    ) -> BinResult<Vec<T>> {
        let mut out = Vec::with_capacity(count);
        let size = kind.element_size();
        for n in chunk_sizes(count, kind) {
            let bytes = record_len(n, size)?;
            self.expect_marker(bytes, "data")?;
            for _ in 0..n {
                let v = read_one(&mut self.inner, self.endian)
                    .map_err(|e| BinError::on_read(&self.keyword, e))?;
                out.push(v);
            }
            self.expect_marker(bytes, "data")?;
        }
        Ok(out)
    }

    fn expect_marker(&mut self, expected: i32, what: &str) -> BinResult<()> {
        let got = self.read_i32()?;
        if got != expected {
            return Err(BinError::format(format!(
                "{what} record marker {got} in keyword '{}', expected {expected}",
                self.keyword
            )));
        }
        Ok(())
    }

    fn read_i32(&mut self) -> BinResult<i32> {
        self.endian
            .read_i32(&mut self.inner)
            .map_err(|e| BinError::on_read(&self.keyword, e))
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> BinResult<()> {
        self.inner
            .read_exact(buf)
            .map_err(|e| BinError::on_read(&self.keyword, e))
    }

    fn decode_i32(&self, bytes: [u8; 4]) -> i32 {
        match self.endian {
            Endian::Big => i32::from_be_bytes(bytes),
            Endian::Little => i32::from_le_bytes(bytes),
        }
    }

    fn truncated(&self) -> BinError {
        BinError::format(format!("unexpected end of file in keyword '{}'", self.keyword))
    }
}

/// Iterator returned by [`BlockReader::blocks`].
pub struct Blocks<'a, R> {
    reader: &'a mut BlockReader<R>,
    done: bool,
}

impl<R: Read> Iterator for Blocks<'_, R> {
    type Item = BinResult<Block>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.read_next_block() {
            Ok(Some(block)) => Some(Ok(block)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> std::iter::FusedIterator for Blocks<'_, R> {}

fn record_len(n: usize, size: usize) -> BinResult<i32> {
    i32::try_from(n * size).map_err(|_| BinError::format("record length overflows i32"))
}

fn ascii(bytes: &[u8]) -> BinResult<String> {
    if !bytes.is_ascii() {
        return Err(BinError::format(format!(
            "non-ASCII bytes {bytes:02x?} in character field"
        )));
    }
    Ok(bytes.iter().map(|&b| b as char).collect())
}

/// Fill `buf` as far as the stream allows; returns the number of bytes read.
fn read_up_to<R: Read + ?Sized>(r: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match r.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn be_record(body: &[u8]) -> Vec<u8> {
        let mut out = (body.len() as i32).to_be_bytes().to_vec();
        out.extend_from_slice(body);
        out.extend_from_slice(&(body.len() as i32).to_be_bytes());
        out
    }

    fn header(keyword: &str, count: i32, tag: &str) -> Vec<u8> {
        let mut body = crate::pad8(keyword).into_bytes();
        body.extend_from_slice(&count.to_be_bytes());
        body.extend_from_slice(tag.as_bytes());
        be_record(&body)
    }

    #[test]
    fn empty_stream_has_no_blocks() {
        let mut reader = BlockReader::new(Cursor::new(Vec::new())).unwrap();
        assert!(reader.read_next_block().unwrap().is_none());
    }

    #[test]
    fn reads_int_block() {
        let mut bytes = header("DIMENS", 2, "INTE");
        let mut body = Vec::new();
        body.extend_from_slice(&3_i32.to_be_bytes());
        body.extend_from_slice(&(-1_i32).to_be_bytes());
        bytes.extend(be_record(&body));

        let mut reader = BlockReader::new(Cursor::new(bytes)).unwrap();
        let block = reader.read_next_block().unwrap().unwrap();
        assert_eq!(block.keyword, "DIMENS");
        assert_eq!(block.data, BlockData::Inte(vec![3, -1]));
        assert!(reader.read_next_block().unwrap().is_none());
    }

    #[test]
    fn logicals_treat_any_nonzero_as_true() {
        let mut bytes = header("FLAGS", 3, "LOGI");
        let mut body = Vec::new();
        for v in [0_i32, 1, -1] {
            body.extend_from_slice(&v.to_be_bytes());
        }
        bytes.extend(be_record(&body));
        let mut reader = BlockReader::new(Cursor::new(bytes)).unwrap();
        let block = reader.read_next_block().unwrap().unwrap();
        assert_eq!(block.data, BlockData::Logi(vec![false, true, true]));
    }

    #[test]
    fn unknown_tag_reports_keyword() {
        let bytes = header("WEIRD", 1, "X008");
        let mut reader = BlockReader::new(Cursor::new(bytes)).unwrap();
        match reader.read_next_block().unwrap_err() {
            BinError::UnsupportedType { tag, keyword } => {
                assert_eq!(tag, "X008");
                assert_eq!(keyword, "WEIRD");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn truncated_payload_is_format_error() {
        let mut bytes = header("PARAMS", 2, "REAL");
        bytes.extend_from_slice(&8_i32.to_be_bytes());
        bytes.extend_from_slice(&1.0_f32.to_be_bytes());
        let mut reader = BlockReader::new(Cursor::new(bytes)).unwrap();
        assert!(matches!(
            reader.read_next_block().unwrap_err(),
            BinError::Format { .. }
        ));
    }

    #[test]
    fn wrong_chunk_marker_is_format_error() {
        let mut bytes = header("NUMS", 1, "INTE");
        bytes.extend_from_slice(&8_i32.to_be_bytes());
        bytes.extend_from_slice(&1_i32.to_be_bytes());
        bytes.extend_from_slice(&8_i32.to_be_bytes());
        let mut reader = BlockReader::new(Cursor::new(bytes)).unwrap();
        assert!(matches!(
            reader.read_next_block().unwrap_err(),
            BinError::Format { .. }
        ));
    }

    #[test]
    fn negative_count_is_rejected() {
        let bytes = header("BAD", -4, "INTE");
        let mut reader = BlockReader::new(Cursor::new(bytes)).unwrap();
        assert!(matches!(
            reader.read_key().unwrap_err(),
            BinError::Format { .. }
        ));
    }

    #[test]
    fn blocks_iterator_stops_after_error() {
        let mut bytes = header("SEQHDR", 0, "MESS");
        bytes.extend(header("OOPS", 1, "ABCD"));
        bytes.extend(header("SEQHDR", 0, "MESS"));
        let mut reader = BlockReader::new(Cursor::new(bytes)).unwrap();
        let results: Vec<_> = reader.blocks().collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }
}
