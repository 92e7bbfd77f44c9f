//! Fixed 8x8 pictures: dice faces, spirit-level edges and the level marker.

use super::{Frame, Rgb, GREEN, OFF, SIZE, WHITE};

/// Dot masks for faces 1–6 (index 0 is face 1). Each dot is a 2x2 block.
#[rustfmt::skip]
const DICE_MASKS: [[[u8; SIZE]; SIZE]; 6] = [
    [
        [0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 1, 1, 0, 0, 0],
        [0, 0, 0, 1, 1, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0],
    ],
    [
        [0, 0, 0, 0, 0, 0, 0, 0],
        [0, 1, 1, 0, 0, 0, 0, 0],
        [0, 1, 1, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 1, 1, 0],
        [0, 0, 0, 0, 0, 1, 1, 0],
        [0, 0, 0, 0, 0, 0, 0, 0],
    ],
    [
        [0, 0, 0, 0, 0, 0, 0, 0],
        [0, 1, 1, 0, 0, 0, 0, 0],
        [0, 1, 1, 0, 0, 0, 0, 0],
        [0, 0, 0, 1, 1, 0, 0, 0],
        [0, 0, 0, 1, 1, 0, 0, 0],
        [0, 0, 0, 0, 0, 1, 1, 0],
        [0, 0, 0, 0, 0, 1, 1, 0],
        [0, 0, 0, 0, 0, 0, 0, 0],
    ],
    [
        [0, 0, 0, 0, 0, 0, 0, 0],
        [0, 1, 1, 0, 0, 1, 1, 0],
        [0, 1, 1, 0, 0, 1, 1, 0],
        [0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0],
        [0, 1, 1, 0, 0, 1, 1, 0],
        [0, 1, 1, 0, 0, 1, 1, 0],
        [0, 0, 0, 0, 0, 0, 0, 0],
    ],
    [
        [0, 0, 0, 0, 0, 0, 0, 0],
        [0, 1, 1, 0, 0, 1, 1, 0],
        [0, 1, 1, 0, 0, 1, 1, 0],
        [0, 0, 0, 1, 1, 0, 0, 0],
        [0, 0, 0, 1, 1, 0, 0, 0],
        [0, 1, 1, 0, 0, 1, 1, 0],
        [0, 1, 1, 0, 0, 1, 1, 0],
        [0, 0, 0, 0, 0, 0, 0, 0],
    ],
    [
        [0, 0, 0, 0, 0, 0, 0, 0],
        [0, 1, 1, 0, 0, 1, 1, 0],
        [0, 1, 1, 0, 0, 1, 1, 0],
        [0, 1, 1, 0, 0, 1, 1, 0],
        [0, 1, 1, 0, 0, 1, 1, 0],
        [0, 1, 1, 0, 0, 1, 1, 0],
        [0, 1, 1, 0, 0, 1, 1, 0],
        [0, 0, 0, 0, 0, 0, 0, 0],
    ],
];

/// White dots on black for `face` in 1..=6.
pub fn dice_face(face: u8) -> Option<Frame> {
    let index = usize::from(face).checked_sub(1)?;
    DICE_MASKS
        .get(index)
        .map(|mask| Frame::from_mask(mask, WHITE, OFF))
}

/// A matrix edge, used by the spirit level to show which side is low.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

/// A single lit edge on an otherwise dark matrix.
pub fn edge_frame(edge: Edge, colour: Rgb) -> Frame {
    let mut frame = Frame::default();
    let last = SIZE - 1;
    for i in 0..SIZE {
        let (x, y) = match edge {
            Edge::Top => (i, 0),
            Edge::Bottom => (i, last),
            Edge::Left => (0, i),
            Edge::Right => (last, i),
        };
        frame.put(x, y, colour);
    }
    frame
}

/// Four green pixels in the centre.
pub fn level_frame() -> Frame {
    let mut frame = Frame::default();
    for (x, y) in [(3, 3), (4, 3), (3, 4), (4, 4)] {
        frame.put(x, y, GREEN);
    }
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::CYAN;

    #[test]
    fn dice_faces_have_four_pixels_per_dot() {
        for face in 1..=6u8 {
            let frame = dice_face(face).unwrap();
            assert_eq!(frame.lit_count(), usize::from(face) * 4, "face {face}");
        }
    }

    #[test]
    fn dice_face_out_of_range_is_none() {
        assert!(dice_face(0).is_none());
        assert!(dice_face(7).is_none());
    }

    #[test]
    fn edges_light_eight_pixels_on_the_right_side() {
        let top = edge_frame(Edge::Top, CYAN);
        assert_eq!(top.lit_count(), 8);
        assert!((0..8).all(|x| top.get(x, 0) == Some(CYAN)));

        let right = edge_frame(Edge::Right, CYAN);
        assert!((0..8).all(|y| right.get(7, y) == Some(CYAN)));
        assert_eq!(right.get(0, 0), Some(OFF));
    }

    #[test]
    fn level_marker_is_centre_square() {
        let f = level_frame();
        assert_eq!(f.lit_count(), 4);
        assert_eq!(f.get(3, 3), Some(GREEN));
        assert_eq!(f.get(4, 4), Some(GREEN));
    }
}
