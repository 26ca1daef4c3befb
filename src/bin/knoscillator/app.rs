//! Audio output: one knot voice inside a cpal stream, fed over an rtrb queue.

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Producer, RingBuffer};
use tracing::{error, info, warn};

use knoscillator::{synth::message::VoiceMessage, KnotSynth, CHANNELS, MAX_BLOCK_SIZE, SAMPLE_RATE};

const QUEUE_CAPACITY: usize = 256;

/// A running output stream and the sending half of its control queue.
pub struct Player {
    _stream: cpal::Stream,
    tx: Producer<VoiceMessage>,
}

impl Player {
    /// Open the default device at 48 kHz stereo and start playing.
    pub fn start() -> EyreResult<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;

        let config = cpal::StreamConfig {
            channels: CHANNELS as cpal::ChannelCount,
            sample_rate: cpal::SampleRate(SAMPLE_RATE),
            buffer_size: cpal::BufferSize::Default,
        };

        let mut synth = KnotSynth::new();
        synth
            .init(config.sample_rate.0, config.channels as u32)
            .wrap_err("knot voice rejected the stream format")?;

        let (tx, mut rx) = RingBuffer::<VoiceMessage>::new(QUEUE_CAPACITY);
        let block = MAX_BLOCK_SIZE * CHANNELS as usize;

        let name = device.name().unwrap_or_default();
        info!(device = %name, sample_rate = SAMPLE_RATE, "opening output stream");

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _| {
                    synth.drain_messages(&mut rx);
                    for chunk in data.chunks_mut(block) {
                        let frames = chunk.len() / CHANNELS as usize;
                        synth.render(chunk, frames);
                    }
                },
                |err| error!("audio stream error: {err}"),
                None,
            )
            .wrap_err("failed to build a 48 kHz stereo output stream")?;

        stream.play().wrap_err("failed to start output stream")?;

        Ok(Self {
            _stream: stream,
            tx,
        })
    }

    pub fn send(&mut self, msg: VoiceMessage) {
        if self.tx.push(msg).is_err() {
            warn!(?msg, "control queue full, dropping message");
        }
    }
}
