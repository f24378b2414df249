//! # Type mask
//!
//! Builds the setpoint type mask telling the FCU which fields of a command to disregard.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use comms_if::fcu::TypeMask;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Build the mask for a waypoint given which of its quantities are present.
///
/// Each absent quantity sets all three of its per-axis ignore bits. The fields themselves are
/// still sent (as zero) so the receiver must honour the mask rather than infer validity from the
/// values.
pub fn build_mask(has_position: bool, has_velocity: bool, has_acceleration: bool) -> TypeMask {
    let mut mask = TypeMask::empty();

    if !has_position {
        mask |= TypeMask::IGNORE_POSITION;
    }
    if !has_velocity {
        mask |= TypeMask::IGNORE_VELOCITY;
    }
    if !has_acceleration {
        mask |= TypeMask::IGNORE_ACCEL;
    }

    mask
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_all_present() {
        assert_eq!(build_mask(true, true, true).bits(), 0);
    }

    #[test]
    fn test_none_present() {
        assert_eq!(build_mask(false, false, false).bits(), 0b111_111_111);
    }

    #[test]
    fn test_quantities_independent() {
        for i in 0..8u8 {
            let (p, v, a) = (i & 1 != 0, i & 2 != 0, i & 4 != 0);
            let mask = build_mask(p, v, a);

            assert_eq!(mask.contains(TypeMask::IGNORE_POSITION), !p);
            assert_eq!(mask.contains(TypeMask::IGNORE_VELOCITY), !v);
            assert_eq!(mask.contains(TypeMask::IGNORE_ACCEL), !a);

            // Only the bits of the absent quantities are ever set
            assert_eq!(
                mask,
                build_mask(p, true, true) | build_mask(true, v, true) | build_mask(true, true, a)
            );
            assert!(!mask.intersects(
                TypeMask::FORCE | TypeMask::IGNORE_YAW | TypeMask::IGNORE_YAW_RATE
            ));
        }
    }
}
