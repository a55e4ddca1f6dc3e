//! Input adapters

use super::{InputSource, END_OF_INPUT};
use crate::memory::Cell;
use std::io::{self, BufReader, Read};

/// Reads one Unicode scalar value per call
///
/// Reader-backed input is decoded lazily as UTF-8; malformed sequences come out as
/// `U+FFFD`.
pub struct TextInput {
    chars: Box<dyn Iterator<Item = char> + Send>,
}

impl TextInput {
    pub fn from_text(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        TextInput {
            chars: Box::new(chars.into_iter()),
        }
    }

    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        TextInput {
            chars: Box::new(Utf8Chars {
                bytes: BufReader::new(reader).bytes(),
                pending: None,
            }),
        }
    }
}

impl InputSource for TextInput {
    fn read(&mut self) -> Cell {
        self.chars.next().map_or(END_OF_INPUT, |c| c as Cell)
    }
}

struct Utf8Chars<R> {
    bytes: io::Bytes<R>,
    /// Byte that ended a truncated sequence; it starts the next character
    pending: Option<u8>,
}

impl<R: Read> Utf8Chars<R> {
    fn next_byte(&mut self) -> Option<u8> {
        match self.pending.take() {
            Some(byte) => Some(byte),
            None => self.bytes.next()?.ok(),
        }
    }
}

impl<R: Read> Iterator for Utf8Chars<R> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        let first = self.next_byte()?;
        let width = utf8_width(first);

        let mut buf = [first, 0, 0, 0];
        for slot in buf.iter_mut().take(width).skip(1) {
            match self.next_byte() {
                Some(byte) if is_continuation(byte) => *slot = byte,
                Some(byte) => {
                    self.pending = Some(byte);
                    return Some(char::REPLACEMENT_CHARACTER);
                }
                None => return Some(char::REPLACEMENT_CHARACTER),
            }
        }

        let decoded = std::str::from_utf8(&buf[..width])
            .ok()
            .and_then(|s| s.chars().next());
        Some(decoded.unwrap_or(char::REPLACEMENT_CHARACTER))
    }
}

fn is_continuation(byte: u8) -> bool {
    (0x80..=0xBF).contains(&byte)
}

fn utf8_width(first: u8) -> usize {
    match first {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

/// Reads one byte per call
pub struct BinaryInput {
    bytes: Box<dyn Iterator<Item = u8> + Send>,
}

impl BinaryInput {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        BinaryInput {
            bytes: Box::new(bytes.to_vec().into_iter()),
        }
    }

    /// Read errors end the input just like end of file
    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        BinaryInput {
            bytes: Box::new(BufReader::new(reader).bytes().map_while(Result::ok)),
        }
    }
}

impl InputSource for BinaryInput {
    fn read(&mut self) -> Cell {
        self.bytes.next().map_or(END_OF_INPUT, Cell::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_text_input_from_text() {
        let mut input = TextInput::from_text("Aé");
        assert_eq!(input.read(), 65);
        assert_eq!(input.read(), 'é' as Cell);
        assert_eq!(input.read(), END_OF_INPUT);
        assert_eq!(input.read(), END_OF_INPUT);
    }

    #[test]
    fn test_text_input_decodes_utf8_stream() {
        let mut input = TextInput::from_reader(Cursor::new("hé€".as_bytes().to_vec()));
        assert_eq!(input.read(), 'h' as Cell);
        assert_eq!(input.read(), 'é' as Cell);
        assert_eq!(input.read(), '€' as Cell);
        assert_eq!(input.read(), END_OF_INPUT);
    }

    #[test]
    fn test_text_input_replaces_malformed_bytes() {
        let mut input = TextInput::from_reader(Cursor::new(vec![0xFF, b'a']));
        assert_eq!(input.read(), char::REPLACEMENT_CHARACTER as Cell);
        assert_eq!(input.read(), 'a' as Cell);
    }

    #[test]
    fn test_truncated_sequence_keeps_following_chars() {
        let mut input = TextInput::from_reader(Cursor::new(vec![0xC3, b'a', b'b']));
        assert_eq!(input.read(), char::REPLACEMENT_CHARACTER as Cell);
        assert_eq!(input.read(), 'a' as Cell);
        assert_eq!(input.read(), 'b' as Cell);
        assert_eq!(input.read(), END_OF_INPUT);

        // A new lead byte cuts the sequence short too
        let mut input = TextInput::from_reader(Cursor::new(vec![0xE2, 0x82, 0xC3, 0xA9]));
        assert_eq!(input.read(), char::REPLACEMENT_CHARACTER as Cell);
        assert_eq!(input.read(), 'é' as Cell);
        assert_eq!(input.read(), END_OF_INPUT);

        // Input ending mid-sequence
        let mut input = TextInput::from_reader(Cursor::new(vec![b'x', 0xF0, 0x9F]));
        assert_eq!(input.read(), 'x' as Cell);
        assert_eq!(input.read(), char::REPLACEMENT_CHARACTER as Cell);
        assert_eq!(input.read(), END_OF_INPUT);
    }

    #[test]
    fn test_binary_input() {
        let mut input = BinaryInput::from_bytes(&[0xC3, 0xA9]);
        assert_eq!(input.read(), 0xC3);
        assert_eq!(input.read(), 0xA9);
        assert_eq!(input.read(), END_OF_INPUT);
    }

    #[test]
    fn test_binary_input_from_reader() {
        let mut input = BinaryInput::from_reader(Cursor::new(vec![1u8, 2]));
        assert_eq!(input.read(), 1);
        assert_eq!(input.read(), 2);
        assert_eq!(input.read(), END_OF_INPUT);
    }
}
