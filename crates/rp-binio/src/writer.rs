//! Block writer. Output is always big-endian.

use std::io::Write;

use tracing::debug;

use crate::block::{Block, BlockData, BlockType, chunk_sizes, pad8};
use crate::{BinError, BinResult, Endian};

const ENDIAN: Endian = Endian::Big;

pub struct BlockWriter<W: Write> {
    inner: W,
}

impl<W: Write> BlockWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Write the wrapped 16 byte header record.
    pub fn write_key(&mut self, keyword: &str, count: i32, kind: BlockType) -> BinResult<()> {
        if count < 0 {
            return Err(BinError::invalid(format!(
                "negative element count {count} for '{keyword}'"
            )));
        }
        let name = pad8(keyword);
        check_ascii(keyword, &name)?;
        let io = |e: std::io::Error| BinError::on_write(keyword, e);
        ENDIAN.write_i32(&mut self.inner, 16).map_err(io)?;
        self.inner.write_all(name.as_bytes()).map_err(io)?;
        ENDIAN.write_i32(&mut self.inner, count).map_err(io)?;
        self.inner.write_all(kind.tag().as_bytes()).map_err(io)?;
        ENDIAN.write_i32(&mut self.inner, 16).map_err(io)?;
        Ok(())
    }

    /// Write the first `count` elements of `data`, split into records.
    pub fn write_data(&mut self, keyword: &str, data: &BlockData, count: i32) -> BinResult<()> {
        let count = usize::try_from(count).map_err(|_| {
            BinError::invalid(format!("negative element count {count} for '{keyword}'"))
        })?;
        if count > data.len() {
            return Err(BinError::invalid(format!(
                "'{keyword}' asks for {count} values but only {} were supplied",
                data.len()
            )));
        }
        match data {
            BlockData::Char(v) => {
                let padded: Vec<String> = v[..count].iter().map(|s| pad8(s)).collect();
                for s in &padded {
                    check_ascii(keyword, s)?;
                }
                self.write_array(keyword, BlockType::Char, &padded, |w, s| {
                    w.write_all(s.as_bytes())
                })
            }
            BlockData::Inte(v) => {
                self.write_array(keyword, BlockType::Inte, &v[..count], |w, &x| {
                    ENDIAN.write_i32(w, x)
                })
            }
            BlockData::Real(v) => {
                self.write_array(keyword, BlockType::Real, &v[..count], |w, &x| {
                    ENDIAN.write_f32(w, x)
                })
            }
            BlockData::Doub(v) => {
                self.write_array(keyword, BlockType::Doub, &v[..count], |w, &x| {
                    ENDIAN.write_f64(w, x)
                })
            }
            BlockData::Logi(v) => {
                self.write_array(keyword, BlockType::Logi, &v[..count], |w, &x| {
                    ENDIAN.write_i32(w, i32::from(x))
                })
            }
            BlockData::Mess => Ok(()),
        }
    }

    /// Header and payload in one go.
    pub fn write_block(&mut self, block: &Block) -> BinResult<()> {
        let count = i32::try_from(block.count()).map_err(|_| {
            BinError::invalid(format!("too many values for '{}'", block.keyword))
        })?;
        self.write_key(&block.keyword, count, block.kind())?;
        self.write_data(&block.keyword, &block.data, count)?;
        debug!(keyword = %block.keyword, count, kind = %block.kind(), "wrote block");
        Ok(())
    }

    pub fn flush(&mut self) -> BinResult<()> {
        self.inner.flush().map_err(|e| BinError::on_write("", e))
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    fn write_array<T>(
        &mut self,
        keyword: &str,
        kind: BlockType,
        values: &[T],
        mut write_one: impl FnMut(&mut W, &T) -> std::io::Result<()>,
    ) -> BinResult<()> {
        let size = kind.element_size();
        let io = |e: std::io::Error| BinError::on_write(keyword, e);
        let mut offset = 0;
        for n in chunk_sizes(values.len(), kind) {
            let bytes = i32::try_from(n * size)
                .map_err(|_| BinError::invalid("record length overflows i32"))?;
            ENDIAN.write_i32(&mut self.inner, bytes).map_err(io)?;
            for v in &values[offset..offset + n] {
                write_one(&mut self.inner, v).map_err(io)?;
            }
            ENDIAN.write_i32(&mut self.inner, bytes).map_err(io)?;
            offset += n;
        }
        Ok(())
    }
}

fn check_ascii(keyword: &str, s: &str) -> BinResult<()> {
    if s.is_ascii() {
        Ok(())
    } else {
        Err(BinError::invalid(format!(
            "non-ASCII character value '{s}' in '{keyword}'"
        )))
    }
}
