//! Note telemetry over a byte sink.

use theremin::playback::Note;

/// Fire-and-forget byte output. No flow control, no acknowledgment.
pub trait SerialSink {
    fn write_byte(&mut self, byte: u8);
}

impl<T: SerialSink + ?Sized> SerialSink for &mut T {
    fn write_byte(&mut self, byte: u8) {
        (**self).write_byte(byte)
    }
}

/// Send one telemetry line: the note character, then `\n`.
///
/// Silence sends the newline alone.
pub fn send_note<S: SerialSink + ?Sized>(serial: &mut S, note: Note) {
    if let Some(c) = note.as_ascii() {
        serial.write_byte(c);
    }
    serial.write_byte(b'\n');
}
