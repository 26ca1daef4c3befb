use std::f32::consts::PI;

use tracing::{debug, info, trace, warn};

use crate::{
    dsp::{
        advance_phase,
        noise::NOISE_DIM,
        oscillator::phase_step,
        shared_noise_field, Cartesian, Envelope, EnvelopeState, EulerPhase, KnotOscillator, Lfo,
        LfoBank, LfoShape, NoiseField, Rotation3D, SineOscillator, SmoothedValue,
    },
    synth::{
        error::InitError,
        message::{MessageReceiver, VoiceMessage},
        notes::{midi_note_to_freq, NoteStack, GATE},
        params::{
            fm_ratio, lerp, lfo_rate_hz, percent, percent_to_seconds, rotation_rate_hz, Param,
            PARAM_COUNT, PARAM_SPECS,
        },
    },
    CHANNELS, SAMPLE_RATE,
};

/*
Knot Voice
==========

One monophonic voice. Every sample it traces a point along a 3-D knot, spins
it, roughens it with noise and looks at it through a pinhole camera. The
camera's horizontal axis is the left channel, the vertical axis the right.

Signal Path
-----------

    mod env ──┬──────────────► FM depth ──┐
              └──► morph                  │
    LFO ──────┬──► pitch bend ──► freq ───┼──► FM carrier ──► phase offset
              └──► morph                  │                        │
                                          ▼                        ▼
                                    knot oscillator ◄──────────────┘
                                          │
                                     Euler rotation
                                          │
                                   noise perturbation
                                          │
                                 perspective projection ◄── vol × amp env
                                          │
                                     (left, right)


Control Rate vs Sample Rate
---------------------------

Envelope times, LFO rate, rotation rates and the morph glide are read from
the parameter table ONCE at the top of each `render` call. Changing a time
mid-segment therefore only changes the rest of that segment.

Everything else runs per sample, in this order:

    1. mod envelope, LFO
    2. pitch bend:  b = lfo × depth
                    b < 0 → lerp(1, ½, −b)     b ≥ 0 → lerp(1, 2, b)
    3. retune FM carrier (note × ratio × bend) and knot (note × bend)
    4. fm = sin(carrier) × clamp(FM DEPTH + env × ENV FM) × 2
    5. morph = clamp(smoothed + lfo × LFO MORPH + env × ENV MORPH)
    6. point = knot(θ + fm), rotated by the current angles
    7. noise:  n = field(x, y),  o = n × NOISE × ¼
               x' = x(1+o) + cos(w + nπ)·o
               y' = y(1+o) + sin(w + nπ)·o
               z' = z(1+o)
       w is a wobble phase running at half the note frequency
    8. project: s = vol × amp / (z' + 6),  left = x'·s,  right = y'·s
    9. advance rotation and wobble phases

The knot and carrier advance inside their own `generate`. All radian
accumulators use the carry rule from `oscillator::advance_phase`.


Projection Bound
----------------

The knot stays within radius 3 and rotation preserves length, so without
noise z + 6 ≥ 3 and |x|, |y| ≤ 3. Each channel is then bounded by vol × amp.
With full noise the offset o is at most ¼, which keeps z' + 6 above 2.


Notes
-----

Held keys live on a `NoteStack`. Pressing a key retunes immediately, sets
the velocity and opens the amp gate; a gate that is already open stays open
(legato). The modulation envelope restarts on every press, peaking at the
key's velocity. Releasing a key falls back to the newest key still held, or
releases the amp envelope if none remain. The GATE sentinel plays the NOTE parameter.
*/

/// Camera distance for the perspective divide.
pub const ZOOM: f32 = 6.0;
/// Peak phase offset from the FM carrier, in radians.
pub const FM_MAX_INDEX: f32 = 2.0;
/// Noise perturbation at 100 %.
pub const NOISE_SCALE: f32 = 0.25;
/// Power-on rotation pose (radians about X, Y, Z).
pub const REST_ANGLES: [f32; 3] = [1.0, 1.0, 0.0];

/// Monophonic knot synthesizer voice.
pub struct KnotSynth {
    sample_rate: f32,
    params: [i32; PARAM_COUNT],
    notes: NoteStack,
    frequency: f32,
    vol: f32,

    knot: KnotOscillator,
    carrier: SineOscillator,
    wobble: f32,
    angles: EulerPhase,
    rotation: Rotation3D,
    lfo: LfoBank,
    env: Envelope,
    amp: Envelope,
    morph: SmoothedValue,
    noise: &'static NoiseField<NOISE_DIM>,
}

impl KnotSynth {
    /// A voice at the fixed sample rate with every parameter at its default.
    pub fn new() -> Self {
        let sample_rate = SAMPLE_RATE as f32;
        let params = PARAM_SPECS.map(|spec| spec.default);

        let mut synth = Self {
            sample_rate,
            params,
            notes: NoteStack::new(),
            frequency: 0.0,
            vol: 0.0,
            knot: KnotOscillator::new(sample_rate),
            carrier: SineOscillator::new(sample_rate),
            wobble: 0.0,
            angles: EulerPhase::default(),
            rotation: Rotation3D::identity(),
            lfo: LfoBank::new(sample_rate),
            env: Envelope::modulation(sample_rate),
            amp: Envelope::amplitude(sample_rate),
            morph: SmoothedValue::default(),
            noise: shared_noise_field(),
        };

        for param in Param::ALL {
            synth.apply(param);
        }
        synth.reset();
        synth
    }

    /// Accept the host's audio format, or reject it without touching any state.
    pub fn init(&mut self, sample_rate: u32, channels: u32) -> Result<(), InitError> {
        if sample_rate != SAMPLE_RATE {
            let err = InitError::SampleRate {
                actual: sample_rate,
            };
            warn!(code = err.code(), "{err}");
            return Err(err);
        }
        if channels != CHANNELS {
            let err = InitError::Geometry { channels };
            warn!(code = err.code(), "{err}");
            return Err(err);
        }

        self.reset();
        info!(sample_rate, channels, "knot voice initialized");
        Ok(())
    }

    pub fn teardown(&mut self) {
        trace!("teardown");
    }

    /// Back to the power-on state: silent, no notes held, rest pose.
    ///
    /// Parameter values are kept.
    pub fn reset(&mut self) {
        self.notes.clear();
        self.vol = 0.0;
        self.frequency = midi_note_to_freq(self.param(Param::Note) as u8);

        self.env.reset();
        self.amp.reset();
        self.knot.reset();
        self.carrier.reset();
        self.lfo.set_phase(0.0);
        self.wobble = 0.0;

        let [x, y, z] = REST_ANGLES;
        self.angles.x = x;
        self.angles.y = y;
        self.angles.z = z;
        self.rotation.set_euler(x, y, z);

        self.morph.reset(percent(self.param(Param::Morph)));
        self.update_control();
        debug!("voice reset");
    }

    pub fn resume(&mut self) {
        trace!("resume");
    }

    pub fn suspend(&mut self) {
        trace!("suspend");
    }

    /// Apply every pending control message.
    ///
    /// Call from the audio thread before `render`.
    pub fn drain_messages<R: MessageReceiver + ?Sized>(&mut self, rx: &mut R) {
        while let Some(msg) = rx.pop() {
            self.handle_message(msg);
        }
    }

    pub fn handle_message(&mut self, msg: VoiceMessage) {
        match msg {
            VoiceMessage::NoteOn { note, velocity } => self.note_on(note, velocity),
            VoiceMessage::NoteOff { note } => self.note_off(note),
            VoiceMessage::GateOn { velocity } => self.gate_on(velocity),
            VoiceMessage::GateOff => self.gate_off(),
            VoiceMessage::AllNoteOff => self.all_note_off(),
            VoiceMessage::SetParameter { index, value } => self.set_parameter(index, value),
        }
    }

    // Notes ------------------------------------------------------------------

    pub fn note_on(&mut self, note: u8, velocity: u8) {
        self.press(note.min(127), velocity);
    }

    pub fn note_off(&mut self, note: u8) {
        self.notes.note_off(note.min(127));
        self.release();
    }

    pub fn gate_on(&mut self, velocity: u8) {
        self.press(GATE, velocity);
    }

    pub fn gate_off(&mut self) {
        self.notes.gate_off();
        self.release();
    }

    pub fn all_note_off(&mut self) {
        self.notes.clear();
        self.amp.gate(false);
    }

    fn press(&mut self, id: u8, velocity: u8) {
        // a full stack keeps sounding the new key, it just won't be returned to
        if !self.notes.note_on(id) {
            debug!(note = id, "note stack full, key will not be returned to");
        }
        self.retune(id);
        self.vol = velocity.min(127) as f32 / 127.0;
        self.amp.gate(true);
        self.env.trigger(true, self.vol);
    }

    fn release(&mut self) {
        match self.notes.last() {
            Some(id) => self.retune(id),
            None => self.amp.gate(false),
        }
    }

    fn retune(&mut self, id: u8) {
        let note = if id == GATE {
            self.param(Param::Note) as u8
        } else {
            id
        };
        self.frequency = midi_note_to_freq(note);
    }

    // Parameters -------------------------------------------------------------

    /// Store a parameter, clamped to its range. Unknown indices are ignored.
    pub fn set_parameter(&mut self, index: u8, value: i32) {
        let Some(param) = Param::from_index(index) else {
            debug!(index, value, "ignoring unknown parameter");
            return;
        };
        self.params[param.index()] = param.spec().clamp(value);
        self.apply(param);
    }

    /// Current value, or 0 for unknown indices.
    pub fn parameter_value(&self, index: u8) -> i32 {
        Param::from_index(index).map_or(0, |param| self.param(param))
    }

    /// Display string for enumerated parameters.
    pub fn parameter_str_value(&self, index: u8, value: i32) -> Option<&'static str> {
        Param::from_index(index).and_then(|param| param.str_value(value))
    }

    #[inline]
    fn param(&self, param: Param) -> i32 {
        self.params[param.index()]
    }

    /// Changes that take effect immediately; the rest are picked up by
    /// `update_control` at the next buffer.
    fn apply(&mut self, param: Param) {
        match param {
            Param::Note => {
                if self.notes.last() == Some(GATE) {
                    self.retune(GATE);
                }
            }
            Param::KnotP | Param::KnotQ => {
                self.knot
                    .set_pq(self.param(Param::KnotP), self.param(Param::KnotQ));
            }
            Param::LfoType => {
                let shape =
                    LfoShape::from_index(self.param(Param::LfoType)).unwrap_or(LfoShape::Sine);
                if shape != self.lfo.shape() {
                    debug!(shape = shape.label(), "switching lfo");
                    self.lfo.select(shape);
                }
            }
            _ => {}
        }
    }

    fn update_control(&mut self) {
        self.env
            .set_attack(percent_to_seconds(self.param(Param::EnvAttack)));
        self.env
            .set_decay(percent_to_seconds(self.param(Param::EnvDecay)));

        self.amp
            .set_attack(percent_to_seconds(self.param(Param::AmpAttack)));
        self.amp
            .set_decay(percent_to_seconds(self.param(Param::AmpDecay)));
        self.amp.set_sustain(percent(self.param(Param::AmpSustain)));
        self.amp
            .set_release(percent_to_seconds(self.param(Param::AmpRelease)));

        self.lfo.set_frequency(lfo_rate_hz(self.param(Param::LfoRate)));

        self.angles.set_rate(
            rotation_rate_hz(self.param(Param::RotRate)),
            self.sample_rate,
            [
                percent(self.param(Param::RotX)),
                percent(self.param(Param::RotY)),
                percent(self.param(Param::RotZ)),
            ],
        );

        self.morph.update(percent(self.param(Param::Morph)));
    }

    // Render -----------------------------------------------------------------

    /// Fill `frames` interleaved stereo frames, overwriting `out`.
    ///
    /// A buffer shorter than `2 × frames` is filled as far as it goes.
    pub fn render(&mut self, out: &mut [f32], frames: usize) {
        self.update_control();

        let frames = frames.min(out.len() / CHANNELS as usize);

        let ratio = fm_ratio(self.param(Param::FmRatio));
        let fm_depth = percent(self.param(Param::FmDepth));
        let env_fm = percent(self.param(Param::EnvFm));
        let lfo_pitch = percent(self.param(Param::LfoPitch));
        let lfo_morph = percent(self.param(Param::LfoMorph));
        let env_morph = percent(self.param(Param::EnvMorph));
        let noise_depth = percent(self.param(Param::Noise)) * NOISE_SCALE;
        let morph = self.morph.value();

        for frame in out[..frames * 2].chunks_exact_mut(2) {
            let env = self.env.generate();
            let lfo = self.lfo.generate();

            let freq = self.frequency * pitch_bend(lfo * lfo_pitch);
            self.carrier.set_frequency(freq * ratio);
            self.knot.set_frequency(freq);

            let depth = (fm_depth + env * env_fm).clamp(0.0, 1.0);
            let fm = self.carrier.generate() * depth * FM_MAX_INDEX;

            self.knot
                .set_morph((morph + lfo * lfo_morph + env * env_morph).clamp(0.0, 1.0));
            let point = self.knot.generate(fm);

            self.rotation
                .set_euler(self.angles.x, self.angles.y, self.angles.z);
            let point = self.perturb(self.rotation.process(point), noise_depth);

            let scale = self.vol * self.amp.generate() / (point.z + ZOOM);
            frame[0] = point.x * scale;
            frame[1] = point.y * scale;

            self.angles.advance();
            self.wobble = advance_phase(self.wobble, phase_step(freq * 0.5, self.sample_rate));
        }
    }

    #[inline]
    fn perturb(&self, p: Cartesian, depth: f32) -> Cartesian {
        let n = self.noise.sample(p.x, p.y);
        let o = n * depth;
        let (sin_w, cos_w) = (self.wobble + n * PI).sin_cos();
        Cartesian::new(
            p.x * (1.0 + o) + cos_w * o,
            p.y * (1.0 + o) + sin_w * o,
            p.z * (1.0 + o),
        )
    }

    // Introspection ----------------------------------------------------------

    /// Frequency of the sounding note before pitch bend.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn held_notes(&self) -> &[u8] {
        self.notes.held()
    }

    pub fn amp_state(&self) -> EnvelopeState {
        self.amp.state()
    }

    pub fn lfo_shape(&self) -> LfoShape {
        self.lfo.shape()
    }

    /// Current rotation angles about X, Y and Z.
    pub fn angles(&self) -> [f32; 3] {
        [self.angles.x, self.angles.y, self.angles.z]
    }

    pub fn is_sounding(&self) -> bool {
        self.amp.is_active()
    }
}

impl Default for KnotSynth {
    fn default() -> Self {
        Self::new()
    }
}

/// Frequency multiplier for a bipolar bend amount in [-1, 1]: one octave
/// down at -1, one octave up at +1.
#[inline]
pub fn pitch_bend(amount: f32) -> f32 {
    if amount < 0.0 {
        lerp(1.0, 0.5, -amount)
    } else {
        lerp(1.0, 2.0, amount)
    }
}
