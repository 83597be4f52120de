//! Keyboard and touch mapping onto the input latch.

use log::warn;

use starfield_core::constants::{KEY_LEFT, KEY_RIGHT, KEY_THRUST};
use starfield_core::types::InputLatch;

/// Apply a key press or release. Returns false for unmapped key codes, which
/// leave the latch untouched.
pub fn apply_key(latch: &mut InputLatch, key_code: u32, pressed: bool) -> bool {
    match key_code {
        KEY_LEFT => latch.left = pressed,
        KEY_RIGHT => latch.right = pressed,
        KEY_THRUST => latch.thrust = pressed,
        other => {
            warn!("Ignoring unmapped key code {other}");
            return false;
        }
    }
    true
}

/// Replace the latch from the set of active touches.
///
/// Any touch on the left half steers left, any on the right half steers right,
/// and touching both halves at once thrusts. A touch exactly on the midline
/// counts for neither.
pub fn apply_touches(latch: &mut InputLatch, touch_xs: &[f64], viewport_width: f64) {
    let middle = viewport_width / 2.0;
    latch.left = touch_xs.iter().any(|&x| x < middle);
    latch.right = touch_xs.iter().any(|&x| x > middle);
    latch.thrust = latch.left && latch.right;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys() {
        let mut latch = InputLatch::default();
        assert!(apply_key(&mut latch, 37, true));
        assert!(apply_key(&mut latch, 38, true));
        assert_eq!(
            latch,
            InputLatch {
                left: true,
                right: false,
                thrust: true
            }
        );

        assert!(apply_key(&mut latch, 37, false));
        assert!(apply_key(&mut latch, 39, true));
        assert!(!latch.left);
        assert!(latch.right);
    }

    #[test]
    fn test_unmapped_key_is_ignored() {
        let mut latch = InputLatch {
            left: true,
            right: false,
            thrust: false,
        };
        let before = latch;
        assert!(!apply_key(&mut latch, 40, true));
        assert!(!apply_key(&mut latch, 32, false));
        assert_eq!(latch, before);
    }

    #[test]
    fn test_touch_halves() {
        let mut latch = InputLatch::default();

        apply_touches(&mut latch, &[100.0], 1280.0);
        assert!(latch.left && !latch.right && !latch.thrust);

        apply_touches(&mut latch, &[1000.0], 1280.0);
        assert!(!latch.left && latch.right && !latch.thrust);

        apply_touches(&mut latch, &[100.0, 1000.0], 1280.0);
        assert!(latch.left && latch.right && latch.thrust);

        apply_touches(&mut latch, &[], 1280.0);
        assert_eq!(latch, InputLatch::default());
    }

    #[test]
    fn test_touch_on_midline_counts_for_neither() {
        let mut latch = InputLatch::default();
        apply_touches(&mut latch, &[640.0], 1280.0);
        assert_eq!(latch, InputLatch::default());
    }
}
