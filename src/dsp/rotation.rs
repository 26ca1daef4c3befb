use std::f32::consts::TAU;

use crate::dsp::{cartesian::Cartesian, oscillator::advance_phase};

/*
Euler Rotation
==============

The knot is spun in space before it is projected, so the stereo image keeps
moving even while the note holds. Three angles, one per axis, each advance
by their own step every sample.

Composition order is fixed: the point is rotated about X first, then Y, then
Z:

    R = Rz(γ) · Ry(β) · Rx(α)

         ┌                                                ┐
         │ cβcγ    sαsβcγ − cαsγ    cαsβcγ + sαsγ │
    R =  │ cβsγ    sαsβsγ + cαcγ    cαsβsγ − sαcγ │
         │ −sβ     sαcβ             cαcβ          │
         └                                                ┘

    (cα = cos α, sβ = sin β, ...)

The matrix is rebuilt every sample because the angles never stop moving.
Gimbal lock does not matter here: the angles sweep continuously, they are
never dialled in to a particular pose.

A rotation matrix is orthonormal, so |R·p| = |p|. The knot's magnitude bound
holds after rotation for ANY angles.
*/

/// 3×3 rotation matrix built from Euler angles.
#[derive(Debug, Clone, Copy)]
pub struct Rotation3D {
    m: [[f32; 3]; 3],
}

impl Rotation3D {
    pub fn identity() -> Self {
        Self {
            m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Rebuild the matrix for angles (radians) about X, Y and Z.
    #[inline]
    pub fn set_euler(&mut self, x: f32, y: f32, z: f32) {
        let (sa, ca) = x.sin_cos();
        let (sb, cb) = y.sin_cos();
        let (sg, cg) = z.sin_cos();

        self.m = [
            [cb * cg, sa * sb * cg - ca * sg, ca * sb * cg + sa * sg],
            [cb * sg, sa * sb * sg + ca * cg, ca * sb * sg - sa * cg],
            [-sb, sa * cb, ca * cb],
        ];
    }

    #[inline]
    pub fn process(&self, p: Cartesian) -> Cartesian {
        let m = &self.m;
        Cartesian::new(
            m[0][0] * p.x + m[0][1] * p.y + m[0][2] * p.z,
            m[1][0] * p.x + m[1][1] * p.y + m[1][2] * p.z,
            m[2][0] * p.x + m[2][1] * p.y + m[2][2] * p.z,
        )
    }
}

impl Default for Rotation3D {
    fn default() -> Self {
        Self::identity()
    }
}

/// Three angle accumulators, one per axis, each with its own step.
///
/// Angles wrap with the carry rule from `oscillator::advance_phase`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EulerPhase {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    step_x: f32,
    step_y: f32,
    step_z: f32,
}

impl EulerPhase {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x,
            y,
            z,
            ..Default::default()
        }
    }

    /// Per-axis steps from a base rotation rate and axis multipliers in [0, 1].
    pub fn set_rate(&mut self, base_hz: f32, sample_rate: f32, multipliers: [f32; 3]) {
        let base_step = base_hz * TAU / sample_rate;
        let [mx, my, mz] = multipliers.map(|m| m.clamp(0.0, 1.0));
        self.step_x = base_step * mx;
        self.step_y = base_step * my;
        self.step_z = base_step * mz;
    }

    pub fn steps(&self) -> [f32; 3] {
        [self.step_x, self.step_y, self.step_z]
    }

    #[inline]
    pub fn advance(&mut self) {
        self.x = advance_phase(self.x, self.step_x);
        self.y = advance_phase(self.y, self.step_y);
        self.z = advance_phase(self.z, self.step_z);
    }
}
