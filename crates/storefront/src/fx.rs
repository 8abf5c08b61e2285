//! Decorative visual effect parameters.
//!
//! The ambient orb field and the card tilt are pure parameter math with no
//! data dependency on the cart or catalog; they can be generated and
//! tested without any rendering environment. The orb field is produced
//! server-side per page render and emitted as CSS custom properties; the
//! cursor follower and spark timing live in `static/fx.js`, where pointer
//! events exist. The whole layer is gated by `FxConfig` so the storefront
//! runs identically with effects off.

use rand::Rng;

/// Number of ambient orbs per field.
pub const ORB_COUNT: usize = 9;

/// Maximum card tilt in degrees.
pub const MAX_TILT_DEG: f64 = 12.0;

/// Capability switch for the decorative layer.
#[derive(Debug, Clone, Copy)]
pub struct FxConfig {
    /// Render the ambient orb field and ship the cursor FX script.
    pub enabled: bool,
}

impl Default for FxConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// One ambient background orb, expressed as CSS custom property values.
///
/// Positions are percentages of the viewport so the server does not need
/// to know the client's pixel dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct Orb {
    /// Diameter in pixels, 104..=260.
    pub size_px: u32,
    /// Starting position as a percentage of the viewport.
    pub x_pct: f64,
    pub y_pct: f64,
    /// Drift amplitude in pixels, signed.
    pub x_drift_px: i32,
    pub y_drift_px: i32,
    /// Animation duration in seconds, 18..=32.
    pub duration_s: f64,
    /// Negative delay so the field starts mid-animation.
    pub delay_s: f64,
    /// Opacity, 0.25..=0.60.
    pub opacity: f64,
}

/// Generate an orb field with the given RNG.
pub fn orb_field<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Orb> {
    (0..count)
        .map(|_| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let size_px = ((rng.random::<f64>() * 0.6 + 0.4) * 260.0).round() as u32;
            Orb {
                size_px,
                x_pct: round2(rng.random::<f64>() * 100.0),
                y_pct: round2(rng.random::<f64>() * 100.0),
                x_drift_px: rng.random_range(-120..=120),
                y_drift_px: rng.random_range(-140..=140),
                duration_s: round1(rng.random::<f64>() * 14.0 + 18.0),
                delay_s: round2(rng.random::<f64>() * -20.0),
                opacity: round2(rng.random::<f64>() * 0.35 + 0.25),
            }
        })
        .collect()
}

/// Card tilt for a pointer at `(dx, dy)` from the card center, where
/// `half_w`/`half_h` are the card's half-extents in pixels.
///
/// Returns `(rotate_x, rotate_y)` in degrees, clamped to
/// [`MAX_TILT_DEG`]. A pointer at the center yields no tilt; a pointer
/// past the card edge clamps rather than over-rotating.
#[must_use]
pub fn tilt(dx: f64, dy: f64, half_w: f64, half_h: f64) -> (f64, f64) {
    if half_w <= 0.0 || half_h <= 0.0 {
        return (0.0, 0.0);
    }

    let rx = (dy / half_h) * -MAX_TILT_DEG;
    let ry = (dx / half_w) * MAX_TILT_DEG;
    (
        rx.clamp(-MAX_TILT_DEG, MAX_TILT_DEG),
        ry.clamp(-MAX_TILT_DEG, MAX_TILT_DEG),
    )
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orb_field_yields_parameters_within_their_envelopes() {
        let mut rng = rand::rng();
        let field = orb_field(&mut rng, ORB_COUNT);
        assert_eq!(field.len(), ORB_COUNT);

        for orb in &field {
            assert!((104..=260).contains(&orb.size_px), "size {}", orb.size_px);
            assert!((0.0..=100.0).contains(&orb.x_pct));
            assert!((0.0..=100.0).contains(&orb.y_pct));
            assert!((-120..=120).contains(&orb.x_drift_px));
            assert!((-140..=140).contains(&orb.y_drift_px));
            assert!((18.0..=32.0).contains(&orb.duration_s));
            assert!((-20.0..=0.0).contains(&orb.delay_s));
            assert!((0.25..=0.60).contains(&orb.opacity));
        }
    }

    #[test]
    fn tilt_is_zero_at_center_and_clamped_at_the_edges() {
        assert_eq!(tilt(0.0, 0.0, 150.0, 200.0), (0.0, 0.0));

        // Pointer at the right edge: full positive Y rotation.
        let (_, ry) = tilt(150.0, 0.0, 150.0, 200.0);
        assert!((ry - MAX_TILT_DEG).abs() < f64::EPSILON);

        // Pointer at the bottom edge: full negative X rotation.
        let (rx, _) = tilt(0.0, 200.0, 150.0, 200.0);
        assert!((rx + MAX_TILT_DEG).abs() < f64::EPSILON);

        // Pointer far past the card never exceeds the clamp.
        let (rx, ry) = tilt(10_000.0, -10_000.0, 150.0, 200.0);
        assert!(rx <= MAX_TILT_DEG && rx >= -MAX_TILT_DEG);
        assert!(ry <= MAX_TILT_DEG && ry >= -MAX_TILT_DEG);
    }

    #[test]
    fn degenerate_card_extents_do_not_divide_by_zero() {
        assert_eq!(tilt(40.0, 40.0, 0.0, 0.0), (0.0, 0.0));
    }
}
