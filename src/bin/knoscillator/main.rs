//! knoscillator - plays a short legato phrase on the knot voice
//!
//! Run with: cargo run --release
//! Set RUST_LOG=debug to see parameter changes.

mod app;

use std::{thread, time::Duration};

use app::Player;
use knoscillator::synth::{message::VoiceMessage, params::Param};
use tracing::info;

/// (note, beats) pairs; each note is pressed before the previous is released.
const PHRASE: [(u8, u32); 8] = [
    (48, 2),
    (55, 1),
    (60, 1),
    (63, 2),
    (62, 1),
    (58, 1),
    (55, 2),
    (48, 4),
];
const BEAT: Duration = Duration::from_millis(400);
const SWEEP_STEPS: u32 = 8;

fn set(player: &mut Player, param: Param, value: i32) {
    player.send(VoiceMessage::SetParameter {
        index: param as u8,
        value,
    });
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt::init();

    let mut player = Player::start()?;

    set(&mut player, Param::KnotP, 3);
    set(&mut player, Param::KnotQ, 2);
    set(&mut player, Param::FmDepth, 15);
    set(&mut player, Param::LfoType, 5);
    set(&mut player, Param::LfoMorph, 30);
    set(&mut player, Param::AmpAttack, 2);
    set(&mut player, Param::AmpRelease, 25);

    info!("playing phrase, press Ctrl+C to stop early");

    let mut previous: Option<u8> = None;
    for (step, &(note, beats)) in PHRASE.iter().enumerate() {
        player.send(VoiceMessage::NoteOn { note, velocity: 100 });
        if let Some(prev) = previous {
            player.send(VoiceMessage::NoteOff { note: prev });
        }
        previous = Some(note);

        // sweep morph and rotation across the held note
        let span = BEAT * beats;
        for i in 0..SWEEP_STEPS {
            let t = (step as u32 * SWEEP_STEPS + i) as f32
                / (PHRASE.len() as u32 * SWEEP_STEPS) as f32;
            set(&mut player, Param::Morph, (t * 100.0) as i32);
            set(&mut player, Param::RotRate, 6 + (t * 40.0) as i32);
            thread::sleep(span / SWEEP_STEPS);
        }
    }

    player.send(VoiceMessage::AllNoteOff);
    thread::sleep(Duration::from_secs(2));
    Ok(())
}
