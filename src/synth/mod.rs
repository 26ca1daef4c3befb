// Purpose: the playable voice, its notes and its parameter surface
// This layer sits above the dsp primitives and owns one of each

pub mod error;
pub mod message;
pub mod notes;
pub mod params;
pub mod voice;
