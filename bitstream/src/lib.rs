//! Bit cursor primitives for TagPro replay logs.
//!
//! This crate provides [`BitReader`] and [`BitWriter`] for the three codes the
//! replay logs are built from: fixed-width fields, unary tallies, and the
//! byte-aligning "footer" varint.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Permissive reads** - Reading past the buffer yields zero bits; the
//!   reader has no error path and never panics.
//! - **No domain knowledge** - This crate knows nothing about players, maps or
//!   splats.
//!
//! # Example
//!
//! ```
//! use bitstream::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bit(true);
//! writer.write_tally(3);
//! writer.write_footer(300).unwrap();
//!
//! let bytes = writer.finish();
//!
//! let mut reader = BitReader::new(&bytes);
//! assert!(reader.read_bit());
//! assert_eq!(reader.read_tally(), 3);
//! assert_eq!(reader.read_footer(), 300);
//! assert!(reader.is_end());
//! ```

mod error;
pub mod footer;
mod reader;
mod writer;

pub use error::{BitError, BitResult};
pub use reader::BitReader;
pub use writer::BitWriter;
