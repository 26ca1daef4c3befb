//! Real-world scenario benchmarks.
//!
//! These run the complete knot voice the way a host would: one `render` call
//! per buffer, with control messages applied in between.

mod voice;

pub use voice::bench_voice;
