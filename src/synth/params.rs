//! The voice's dense, zero-based parameter index space.
//!
//! Hosts deliver every value as an integer. Most are percentages; two are
//! enumerations shown to the user by name (`FM RATIO`, `LFO TYPE`).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::LfoShape;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Param {
    Note = 0,
    KnotP,
    KnotQ,
    Morph,
    FmRatio,
    FmDepth,
    LfoType,
    LfoRate,
    LfoPitch,
    LfoMorph,
    RotRate,
    RotX,
    RotY,
    RotZ,
    Noise,
    EnvAttack,
    EnvDecay,
    EnvMorph,
    EnvFm,
    AmpAttack,
    AmpDecay,
    AmpSustain,
    AmpRelease,
}

pub const PARAM_COUNT: usize = 23;

impl Param {
    pub const ALL: [Param; PARAM_COUNT] = [
        Param::Note,
        Param::KnotP,
        Param::KnotQ,
        Param::Morph,
        Param::FmRatio,
        Param::FmDepth,
        Param::LfoType,
        Param::LfoRate,
        Param::LfoPitch,
        Param::LfoMorph,
        Param::RotRate,
        Param::RotX,
        Param::RotY,
        Param::RotZ,
        Param::Noise,
        Param::EnvAttack,
        Param::EnvDecay,
        Param::EnvMorph,
        Param::EnvFm,
        Param::AmpAttack,
        Param::AmpDecay,
        Param::AmpSustain,
        Param::AmpRelease,
    ];

    pub fn from_index(index: u8) -> Option<Param> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn spec(self) -> &'static ParamSpec {
        &PARAM_SPECS[self.index()]
    }

    /// Display string for enumerated parameters, `None` for the rest.
    ///
    /// Out-of-table values show the first entry.
    pub fn str_value(self, value: i32) -> Option<&'static str> {
        match self {
            Param::FmRatio => Some(fm_ratio_entry(value).0),
            Param::LfoType => Some(LfoShape::from_index(value).unwrap_or(LfoShape::Sine).label()),
            _ => None,
        }
    }
}

/// Static metadata for one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub min: i32,
    pub max: i32,
    pub default: i32,
}

impl ParamSpec {
    const fn new(name: &'static str, min: i32, max: i32, default: i32) -> Self {
        Self {
            name,
            min,
            max,
            default,
        }
    }

    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }
}

pub const PARAM_SPECS: [ParamSpec; PARAM_COUNT] = [
    ParamSpec::new("NOTE", 0, 127, 60),
    ParamSpec::new("KNOT P", 1, 16, 2),
    ParamSpec::new("KNOT Q", 1, 16, 1),
    ParamSpec::new("MORPH", 0, 100, 0),
    ParamSpec::new("FM RATIO", 0, 10, 4),
    ParamSpec::new("FM DEPTH", 0, 100, 0),
    ParamSpec::new("LFO TYPE", 0, 5, 0),
    ParamSpec::new("LFO RATE", 0, 100, 30),
    ParamSpec::new("LFO PITCH", 0, 100, 0),
    ParamSpec::new("LFO MORPH", 0, 100, 0),
    ParamSpec::new("ROT RATE", 0, 100, 6),
    ParamSpec::new("ROT X", 0, 100, 100),
    ParamSpec::new("ROT Y", 0, 100, 100),
    ParamSpec::new("ROT Z", 0, 100, 100),
    ParamSpec::new("NOISE", 0, 100, 0),
    ParamSpec::new("ENV ATK", 0, 100, 0),
    ParamSpec::new("ENV DCY", 0, 100, 20),
    ParamSpec::new("ENV MORPH", 0, 100, 0),
    ParamSpec::new("ENV FM", 0, 100, 0),
    ParamSpec::new("AMP ATK", 0, 100, 0),
    ParamSpec::new("AMP DCY", 0, 100, 0),
    ParamSpec::new("AMP SUS", 0, 100, 100),
    ParamSpec::new("AMP REL", 0, 100, 10),
];

/// FM carrier to note frequency ratios, with their display labels.
pub const FM_RATIOS: [(&str, f32); 11] = [
    ("1/4", 1.0 / 4.0),
    ("1/3", 1.0 / 3.0),
    ("1/2", 1.0 / 2.0),
    ("2/3", 2.0 / 3.0),
    ("1/1", 1.0),
    ("3/2", 3.0 / 2.0),
    ("2/1", 2.0),
    ("3/1", 3.0),
    ("4/1", 4.0),
    ("5/1", 5.0),
    ("7/1", 7.0),
];

fn fm_ratio_entry(value: i32) -> (&'static str, f32) {
    usize::try_from(value)
        .ok()
        .and_then(|i| FM_RATIOS.get(i).copied())
        .unwrap_or(FM_RATIOS[0])
}

pub fn fm_ratio(value: i32) -> f32 {
    fm_ratio_entry(value).1
}

/// Longest envelope segment reachable from a 100 % setting, in seconds.
pub const ENVELOPE_MAX_SECONDS: f32 = 4.0;
pub const LFO_MIN_HZ: f32 = 0.05;
pub const LFO_MAX_HZ: f32 = 20.0;
pub const ROTATION_MAX_HZ: f32 = 1.0;

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn percent(value: i32) -> f32 {
    value as f32 / 100.0
}

pub fn percent_to_seconds(value: i32) -> f32 {
    lerp(0.0, ENVELOPE_MAX_SECONDS, percent(value))
}

/// Exponential sweep so the slow end gets as much travel as the fast end.
pub fn lfo_rate_hz(value: i32) -> f32 {
    LFO_MIN_HZ * (LFO_MAX_HZ / LFO_MIN_HZ).powf(percent(value))
}

pub fn rotation_rate_hz(value: i32) -> f32 {
    lerp(0.0, ROTATION_MAX_HZ, percent(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_enum_order() {
        assert_eq!(Param::ALL.len(), PARAM_SPECS.len());
        for (i, param) in Param::ALL.iter().enumerate() {
            assert_eq!(param.index(), i);
            assert_eq!(Param::from_index(i as u8), Some(*param));
        }
        assert_eq!(Param::from_index(PARAM_COUNT as u8), None);
        assert_eq!(Param::AmpRelease.spec().name, "AMP REL");
    }

    #[test]
    fn defaults_are_within_range() {
        for spec in &PARAM_SPECS {
            assert!(spec.min <= spec.default && spec.default <= spec.max, "{}", spec.name);
        }
        assert_eq!(Param::FmRatio.spec().max as usize, FM_RATIOS.len() - 1);
        assert_eq!(Param::LfoType.spec().max as usize, LfoShape::ALL.len() - 1);
    }

    #[test]
    fn enumerated_labels() {
        assert_eq!(Param::FmRatio.str_value(4), Some("1/1"));
        assert_eq!(Param::FmRatio.str_value(10), Some("7/1"));
        assert_eq!(Param::FmRatio.str_value(99), Some("1/4"));
        assert_eq!(Param::FmRatio.str_value(-1), Some("1/4"));
        assert_eq!(Param::LfoType.str_value(4), Some("S&H"));
        assert_eq!(Param::LfoType.str_value(17), Some("SINE"));
        assert_eq!(Param::Morph.str_value(50), None);
    }

    #[test]
    fn ratio_lookup_falls_back_to_first() {
        assert_eq!(fm_ratio(6), 2.0);
        assert_eq!(fm_ratio(11), 0.25);
        assert_eq!(fm_ratio(-3), 0.25);
    }

    #[test]
    fn rate_mappings() {
        assert!((lfo_rate_hz(0) - LFO_MIN_HZ).abs() < 1e-6);
        assert!((lfo_rate_hz(100) - LFO_MAX_HZ).abs() < 1e-3);
        assert!(lfo_rate_hz(30) < lfo_rate_hz(31));
        assert_eq!(rotation_rate_hz(0), 0.0);
        assert!((rotation_rate_hz(50) - 0.5).abs() < 1e-6);
        assert_eq!(percent_to_seconds(0), 0.0);
        assert!((percent_to_seconds(25) - 1.0).abs() < 1e-6);
    }
}
