//! Image pipeline: catalog listing, fetch with timeout, grid split,
//! and the bundled fallback.

pub mod catalog;
pub mod fallback;
pub mod fetch;
pub mod split;

pub use fetch::fetch_pieces;
pub use split::Piece;
