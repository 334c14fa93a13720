//! rp-binio: reader/writer for the blocked binary record format used by
//! reservoir simulators for restart, summary and grid files.
//!
//! A file is a sequence of blocks. Each block is a 16 byte header record
//! (8 character keyword, element count, 4 character type tag) followed by the
//! payload split into records of at most 1000 numeric or 105 character
//! elements. Every record is framed by its byte length before and after the
//! body, as Fortran unformatted I/O does.
//!
//! Files are always written big-endian; on read the byte order is detected
//! from the first length marker.

pub mod block;
pub mod endian;
pub mod error;
pub mod reader;
pub mod writer;

pub use block::{Block, BlockData, BlockHeader, BlockType, chunk_sizes, pad8};
pub use endian::Endian;
pub use error::{BinError, BinResult};
pub use reader::{BlockReader, Blocks};
pub use writer::BlockWriter;
