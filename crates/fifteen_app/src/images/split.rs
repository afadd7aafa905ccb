//! Image slicing: one picture becomes 16 puzzle pieces.

use image::{DynamicImage, GenericImageView, RgbaImage};
use tracing::instrument;

use fifteen_core::{PieceSet, SIDE};

/// One slice of the puzzle picture.
///
/// This is the opaque piece handle the core session carries. The
/// terminal front end cannot blit the pixels themselves, so each piece
/// also carries its average color for cell rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    /// The slice's pixels.
    pub image: RgbaImage,
    /// Average RGB of the slice.
    pub average: [u8; 3],
}

fn average_color(image: &RgbaImage) -> [u8; 3] {
    let mut sums = [0u64; 3];
    let mut count = 0u64;
    for pixel in image.pixels() {
        sums[0] += pixel.0[0] as u64;
        sums[1] += pixel.0[1] as u64;
        sums[2] += pixel.0[2] as u64;
        count += 1;
    }
    if count == 0 {
        return [0; 3];
    }
    [
        (sums[0] / count) as u8,
        (sums[1] / count) as u8,
        (sums[2] / count) as u8,
    ]
}

/// Splits a picture into a 4x4 grid of 16 pieces in row-major order,
/// so piece value v is the slice at `(row = v / 4, col = v % 4)`.
#[instrument(skip(source), fields(width = source.width(), height = source.height()))]
pub fn split_into_grid(source: &DynamicImage) -> PieceSet<Piece> {
    let piece_width = (source.width() / SIDE as u32).max(1);
    let piece_height = (source.height() / SIDE as u32).max(1);

    let mut pieces = Vec::with_capacity(SIDE * SIDE);
    for row in 0..SIDE as u32 {
        for col in 0..SIDE as u32 {
            let slice = source
                .crop_imm(col * piece_width, row * piece_height, piece_width, piece_height)
                .to_rgba8();
            let average = average_color(&slice);
            pieces.push(Piece {
                image: slice,
                average,
            });
        }
    }
    PieceSet::new(pieces).expect("4x4 split always yields 16 pieces")
}
