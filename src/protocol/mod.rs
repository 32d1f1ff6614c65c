//! Text notation for positions.
//!
//! Positions are exchanged as single-line strings so games can be seeded from
//! the command line and recorded compactly in self-play output.

pub mod position;

pub use position::{
    check_encodable, encode_position, parse_position, Position, PositionError, DEFAULT_POSITION,
    RESERVED,
};
