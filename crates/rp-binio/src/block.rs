//! Block model: type tags, payloads and the chunking rule.

use std::fmt;
use std::str::FromStr;

use crate::{BinError, BinResult};

/// Width of keywords and CHAR elements.
pub const KEYWORD_LEN: usize = 8;

/// Elements per record for numeric and logical data.
pub const NUMERIC_CHUNK: usize = 1000;

/// Elements per record for CHAR data.
pub const CHAR_CHUNK: usize = 105;

/// Pad with blanks or truncate to exactly 8 characters.
///
/// Keywords and CHAR values are fixed width in the file; this is the single
/// place where that normalization happens.
pub fn pad8(s: &str) -> String {
    let mut out: String = s.chars().take(KEYWORD_LEN).collect();
    while out.chars().count() < KEYWORD_LEN {
        out.push(' ');
    }
    out
}

/// Data type of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    Char,
    Inte,
    Real,
    Doub,
    Logi,
    Mess,
}

impl BlockType {
    /// Parse a 4 character type tag. Unknown tags are rejected here so the
    /// rest of the codec only deals with the closed set.
    pub fn from_tag(tag: &str) -> BinResult<Self> {
        match tag {
            "CHAR" => Ok(BlockType::Char),
            "INTE" => Ok(BlockType::Inte),
            "REAL" => Ok(BlockType::Real),
            "DOUB" => Ok(BlockType::Doub),
            "LOGI" => Ok(BlockType::Logi),
            "MESS" => Ok(BlockType::Mess),
            other => Err(BinError::UnsupportedType {
                tag: other.to_string(),
                keyword: String::new(),
            }),
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            BlockType::Char => "CHAR",
            BlockType::Inte => "INTE",
            BlockType::Real => "REAL",
            BlockType::Doub => "DOUB",
            BlockType::Logi => "LOGI",
            BlockType::Mess => "MESS",
        }
    }

    /// Bytes per element on disk.
    pub fn element_size(self) -> usize {
        match self {
            BlockType::Char | BlockType::Doub => 8,
            BlockType::Inte | BlockType::Real | BlockType::Logi => 4,
            BlockType::Mess => 0,
        }
    }

    /// Maximum elements per record.
    pub fn chunk_limit(self) -> usize {
        match self {
            BlockType::Char => CHAR_CHUNK,
            _ => NUMERIC_CHUNK,
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for BlockType {
    type Err = BinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::from_tag(s)
    }
}

/// Element counts of the records a payload of `count` elements is split into.
///
/// All records but the last hold exactly `kind.chunk_limit()` elements. MESS
/// blocks and empty payloads have no records.
pub fn chunk_sizes(count: usize, kind: BlockType) -> impl Iterator<Item = usize> {
    let limit = kind.chunk_limit();
    let records = if kind == BlockType::Mess {
        0
    } else {
        count.div_ceil(limit)
    };
    (0..records).map(move |i| (count - i * limit).min(limit))
}

/// Header of a block as stored in the 16 byte header record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockHeader {
    /// Keyword with trailing blanks removed.
    pub keyword: String,
    pub count: usize,
    pub kind: BlockType,
}

impl fmt::Display for BlockHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", pad8(&self.keyword), self.count, self.kind)
    }
}

/// Typed payload of a block.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockData {
    /// Fixed width 8 character strings, as stored (blank padded).
    Char(Vec<String>),
    Inte(Vec<i32>),
    Real(Vec<f32>),
    Doub(Vec<f64>),
    Logi(Vec<bool>),
    Mess,
}

impl BlockData {
    pub fn kind(&self) -> BlockType {
        match self {
            BlockData::Char(_) => BlockType::Char,
            BlockData::Inte(_) => BlockType::Inte,
            BlockData::Real(_) => BlockType::Real,
            BlockData::Doub(_) => BlockType::Doub,
            BlockData::Logi(_) => BlockType::Logi,
            BlockData::Mess => BlockType::Mess,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            BlockData::Char(v) => v.len(),
            BlockData::Inte(v) => v.len(),
            BlockData::Real(v) => v.len(),
            BlockData::Doub(v) => v.len(),
            BlockData::Logi(v) => v.len(),
            BlockData::Mess => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_chars(&self) -> Option<&[String]> {
        match self {
            BlockData::Char(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_ints(&self) -> Option<&[i32]> {
        match self {
            BlockData::Inte(v) => Some(v),
            _ => None,
        }
    }

    /// Numeric payloads widened to `f64`; `None` for CHAR/LOGI/MESS.
    pub fn to_f64_vec(&self) -> Option<Vec<f64>> {
        match self {
            BlockData::Inte(v) => Some(v.iter().map(|&x| x as f64).collect()),
            BlockData::Real(v) => Some(v.iter().map(|&x| x as f64).collect()),
            BlockData::Doub(v) => Some(v.clone()),
            _ => None,
        }
    }

    /// Element `i` formatted for text dumps.
    pub fn format_value(&self, i: usize) -> String {
        match self {
            BlockData::Char(v) => v[i].clone(),
            BlockData::Inte(v) => v[i].to_string(),
            BlockData::Real(v) => v[i].to_string(),
            BlockData::Doub(v) => v[i].to_string(),
            BlockData::Logi(v) => if v[i] { "T" } else { "F" }.to_string(),
            BlockData::Mess => String::new(),
        }
    }
}

/// A keyword together with its payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub keyword: String,
    pub data: BlockData,
}

impl Block {
    pub fn new(keyword: impl Into<String>, data: BlockData) -> Self {
        Self {
            keyword: keyword.into(),
            data,
        }
    }

    pub fn kind(&self) -> BlockType {
        self.data.kind()
    }

    pub fn count(&self) -> usize {
        self.data.len()
    }

    pub fn header(&self) -> BlockHeader {
        BlockHeader {
            keyword: self.keyword.trim_end().to_string(),
            count: self.count(),
            kind: self.kind(),
        }
    }
}
