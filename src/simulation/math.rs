//! Interpolation and clamping helpers shared by the solver and the
//! scene spawner
//!
//! `mix` is the usual lerp; the `_vec2` variants apply componentwise

use super::states::NVec2;

/// Blend between `a` and `b` by `amount` (0 = a, 1 = b)
pub fn mix(a: f64, b: f64, amount: f64) -> f64 {
    (1.0 - amount) * a + amount * b
}

/// Componentwise mix of two vectors
pub fn mix_vec2(a: NVec2, b: NVec2, amount: f64) -> NVec2 {
    NVec2::new(mix(a.x, b.x, amount), mix(a.y, b.y, amount))
}

/// Componentwise clamp of `v` into the box `[min_v, max_v]`
pub fn clamp_vec2(v: NVec2, min_v: NVec2, max_v: NVec2) -> NVec2 {
    NVec2::new(v.x.clamp(min_v.x, max_v.x), v.y.clamp(min_v.y, max_v.y))
}
