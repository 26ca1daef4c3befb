/*
Note Stack
==========

Tracks which keys are held so a monophonic voice can fall back to the
previous note when the current one is released (last-note priority).

    press C, press E, press G     stack: [C, E, G]   sounding: G
    release E                     stack: [C, G]      sounding: G
    release G                     stack: [C]         sounding: C
    release C                     stack: []          → amp envelope releases

Entries are note ids 0..=127 plus the GATE sentinel (128) pushed by gate
events, so a held gate behaves like one more key.

Storage is a fixed array; nothing allocates. Removing an entry shifts the
tail left by one, keeping the remaining order intact. If the same id is
present twice, `note_off` removes the OLDEST copy.
*/

/// Id pushed by `gate_on`. Outside the MIDI note range.
pub const GATE: u8 = 128;
/// Maximum number of held entries.
pub const CAPACITY: usize = 256;

#[derive(Debug, Clone)]
pub struct NoteStack {
    notes: [u8; CAPACITY],
    len: usize,
}

impl NoteStack {
    pub const fn new() -> Self {
        Self {
            notes: [0; CAPACITY],
            len: 0,
        }
    }

    /// Push `id` on top. Returns `false` and stores nothing when full.
    pub fn note_on(&mut self, id: u8) -> bool {
        if self.len == CAPACITY {
            return false;
        }
        self.notes[self.len] = id;
        self.len += 1;
        true
    }

    /// Remove the oldest occurrence of `id`; no-op if absent.
    pub fn note_off(&mut self, id: u8) {
        if let Some(index) = self.held().iter().position(|&n| n == id) {
            self.notes.copy_within(index + 1..self.len, index);
            self.len -= 1;
        }
    }

    pub fn gate_on(&mut self) -> bool {
        self.note_on(GATE)
    }

    pub fn gate_off(&mut self) {
        self.note_off(GATE)
    }

    /// Most recently pushed id still held.
    pub fn last(&self) -> Option<u8> {
        self.held().last().copied()
    }

    pub fn size(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Held ids, oldest first.
    pub fn held(&self) -> &[u8] {
        &self.notes[..self.len]
    }
}

impl Default for NoteStack {
    fn default() -> Self {
        Self::new()
    }
}

/// Equal-tempered MIDI note to Hz, A4 (69) = 440 Hz.
pub fn midi_note_to_freq(note: u8) -> f32 {
    440.0 * 2.0_f32.powf((note as f32 - 69.0) / 12.0)
}
