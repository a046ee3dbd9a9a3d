//! Sender avatars: a letter on a colored disc.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const PALETTE: [Rgb; 8] = [
    Rgb(0x00, 0x7A, 0xFF), // blue
    Rgb(0x34, 0xC7, 0x59), // green
    Rgb(0x58, 0x56, 0xD6), // indigo
    Rgb(0xFF, 0x95, 0x00), // orange
    Rgb(0xFF, 0x2D, 0x55), // pink
    Rgb(0xAF, 0x52, 0xDE), // purple
    Rgb(0xFF, 0x3B, 0x30), // red
    Rgb(0x5A, 0xC8, 0xFA), // teal
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Avatar {
    pub initial: char,
    pub color: Rgb,
}

impl Avatar {
    pub fn for_sender(sender: &str) -> Self {
        Self {
            initial: initial(sender),
            color: PALETTE[color_index(sender)],
        }
    }
}

/// Sum of the sender's code points modulo the palette size.
pub fn color_index(sender: &str) -> usize {
    let sum: u64 = sender.chars().map(|c| u64::from(u32::from(c))).sum();
    (sum % PALETTE.len() as u64) as usize
}

pub fn initial(sender: &str) -> char {
    sender
        .chars()
        .find(|c| c.is_alphanumeric())
        .and_then(|c| c.to_uppercase().next())
        .unwrap_or('?')
}
