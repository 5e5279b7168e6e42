// Polar joystick input to differential track commands
//
// The 24 encoded stick angles form a clock face: 0 = right, 6 = up,
// 12 = left, 18 = down, counted counter-clockwise. Each track resolves its
// rotation sense and an unscaled power from the angle alone. Within one
// quadrant of the angle opposite a track's forward motion the power
// interpolates linearly down toward that point, which blends straight
// driving into arcs of shrinking radius; at the exact left/right angles the
// senses oppose at full power, pivoting the vehicle in place. Deflection
// magnitude then scales both powers, so stick throw sets overall speed
// without changing the turn geometry.

use crate::gamepad::dabble::{DIRECTION_COUNT, MAX_RADIUS};

// Cardinal stick angles
const DIR_RIGHT: u8 = 0;
const DIR_UP: u8 = 6;
const DIR_LEFT: u8 = 12;
const DIR_DOWN: u8 = 18;

/// Direction units spanned by one 90-degree quadrant
const QUADRANT_SPAN: u8 = 6;

const FULL_POWER: f64 = 100.0;

/// Rotation sense commanded for one track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sense {
    Forward,
    Backward,
    #[default]
    Idle,
}

/// Power command for one track: rotation sense plus percent in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackCommand {
    pub sense: Sense,
    pub power: f64,
}

impl TrackCommand {
    fn forward(power: f64) -> Self {
        Self {
            sense: Sense::Forward,
            power,
        }
    }

    fn backward(power: f64) -> Self {
        Self {
            sense: Sense::Backward,
            power,
        }
    }
}

/// Command pair for the left and right tracks
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackCommands {
    pub left: TrackCommand,
    pub right: TrackCommand,
}

/// Map a joystick reading to per-track commands.
///
/// A centered stick (radius 0) idles both tracks regardless of direction.
/// Directions at or above [`DIRECTION_COUNT`] wrap around rather than
/// trusting the transmitter.
pub fn joystick_to_tracks(direction: u8, radius: u8) -> TrackCommands {
    if radius == 0 {
        return TrackCommands::default();
    }

    let direction = direction % DIRECTION_COUNT;
    let scale = f64::from(radius) / f64::from(MAX_RADIUS);

    let mut left = left_track(direction);
    let mut right = right_track(direction);
    left.power *= scale;
    right.power *= scale;

    TrackCommands { left, right }
}

/// Left track: forward over the right half of the clock face, backward over
/// the left half, with the interpolated dip centered on straight-left.
fn left_track(direction: u8) -> TrackCommand {
    if (DIR_UP..DIR_LEFT).contains(&direction) {
        TrackCommand::forward(FULL_POWER * quadrant_fraction(DIR_LEFT - direction))
    } else if direction > DIR_LEFT && direction <= DIR_DOWN {
        TrackCommand::backward(FULL_POWER * quadrant_fraction(direction - DIR_LEFT))
    } else if direction < DIR_UP {
        TrackCommand::forward(FULL_POWER)
    } else {
        // Straight left (full-power pivot) or the down-right quadrant.
        TrackCommand::backward(FULL_POWER)
    }
}

/// Right track: the mirror image, with the dip centered on straight-right.
fn right_track(direction: u8) -> TrackCommand {
    if direction > DIR_RIGHT && direction <= DIR_UP {
        TrackCommand::forward(FULL_POWER * quadrant_fraction(direction - DIR_RIGHT))
    } else if direction >= DIR_DOWN {
        TrackCommand::backward(FULL_POWER * quadrant_fraction(DIRECTION_COUNT - direction))
    } else if direction == DIR_RIGHT {
        // Straight right: full-power pivot.
        TrackCommand::backward(FULL_POWER)
    } else if direction <= DIR_LEFT {
        TrackCommand::forward(FULL_POWER)
    } else {
        // Between straight-left and straight-down.
        TrackCommand::backward(FULL_POWER)
    }
}

fn quadrant_fraction(units: u8) -> f64 {
    f64::from(units) / f64::from(QUADRANT_SPAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Mirrors the mapper's own scaling order so comparisons stay exact.
    fn scaled(power: f64, radius: u8) -> f64 {
        power * (f64::from(radius) / f64::from(MAX_RADIUS))
    }

    #[test]
    fn test_centered_stick_idles_both_tracks() {
        for direction in 0..DIRECTION_COUNT {
            let commands = joystick_to_tracks(direction, 0);
            assert_eq!(commands.left.sense, Sense::Idle);
            assert_eq!(commands.left.power, 0.0);
            assert_eq!(commands.right.sense, Sense::Idle);
            assert_eq!(commands.right.power, 0.0);
        }
    }

    #[test]
    fn test_straight_up_drives_both_tracks_forward() {
        for radius in 1..=MAX_RADIUS {
            let commands = joystick_to_tracks(6, radius);
            assert_eq!(commands.left.sense, Sense::Forward);
            assert_eq!(commands.right.sense, Sense::Forward);
            assert_eq!(commands.left.power, scaled(100.0, radius));
            assert_eq!(commands.right.power, scaled(100.0, radius));
        }
    }

    #[test]
    fn test_straight_down_drives_both_tracks_backward() {
        let commands = joystick_to_tracks(18, 7);
        assert_eq!(commands.left.sense, Sense::Backward);
        assert_eq!(commands.right.sense, Sense::Backward);
        assert_eq!(commands.left.power, 100.0);
        assert_eq!(commands.right.power, 100.0);
    }

    #[test]
    fn test_straight_right_pivots_in_place() {
        for radius in 1..=MAX_RADIUS {
            let commands = joystick_to_tracks(0, radius);
            assert_eq!(commands.left.sense, Sense::Forward);
            assert_eq!(commands.right.sense, Sense::Backward);
            assert_eq!(commands.left.power, scaled(100.0, radius));
            assert_eq!(commands.right.power, scaled(100.0, radius));
        }
    }

    #[test]
    fn test_straight_left_pivots_in_place() {
        let commands = joystick_to_tracks(12, 7);
        assert_eq!(commands.left.sense, Sense::Backward);
        assert_eq!(commands.right.sense, Sense::Forward);
        assert_eq!(commands.left.power, 100.0);
        assert_eq!(commands.right.power, 100.0);
    }

    #[test]
    fn test_up_left_arc_slows_left_track() {
        // Halfway between up and left: the left track drops to half power
        // while the right track keeps driving at full.
        let commands = joystick_to_tracks(9, 7);
        assert_eq!(commands.left.sense, Sense::Forward);
        assert_eq!(commands.left.power, 50.0);
        assert_eq!(commands.right.sense, Sense::Forward);
        assert_eq!(commands.right.power, 100.0);
    }

    #[test]
    fn test_up_right_arc_slows_right_track() {
        let commands = joystick_to_tracks(3, 7);
        assert_eq!(commands.left.sense, Sense::Forward);
        assert_eq!(commands.left.power, 100.0);
        assert_eq!(commands.right.sense, Sense::Forward);
        assert_eq!(commands.right.power, 50.0);
    }

    #[test]
    fn test_down_left_arc_slows_left_track() {
        let commands = joystick_to_tracks(15, 7);
        assert_eq!(commands.left.sense, Sense::Backward);
        assert_eq!(commands.left.power, 50.0);
        assert_eq!(commands.right.sense, Sense::Backward);
        assert_eq!(commands.right.power, 100.0);
    }

    #[test]
    fn test_down_right_arc_slows_right_track() {
        let commands = joystick_to_tracks(21, 7);
        assert_eq!(commands.left.sense, Sense::Backward);
        assert_eq!(commands.left.power, 100.0);
        assert_eq!(commands.right.sense, Sense::Backward);
        assert_eq!(commands.right.power, 50.0);
    }

    #[test]
    fn test_powers_stay_in_range() {
        for direction in 0..DIRECTION_COUNT {
            for radius in 0..=MAX_RADIUS {
                let commands = joystick_to_tracks(direction, radius);
                for power in [commands.left.power, commands.right.power] {
                    assert!(
                        (0.0..=100.0).contains(&power),
                        "direction {direction} radius {radius}: power {power} out of range"
                    );
                }
            }
        }
    }

    #[test]
    fn test_power_scales_monotonically_with_radius() {
        for direction in 0..DIRECTION_COUNT {
            let mut previous = (0.0, 0.0);
            for radius in 0..=MAX_RADIUS {
                let commands = joystick_to_tracks(direction, radius);
                assert!(
                    commands.left.power >= previous.0,
                    "direction {direction}: left power dropped at radius {radius}"
                );
                assert!(
                    commands.right.power >= previous.1,
                    "direction {direction}: right power dropped at radius {radius}"
                );
                previous = (commands.left.power, commands.right.power);
            }
        }
    }

    #[test]
    fn test_sense_ignores_radius() {
        // The turn geometry is set by direction alone; radius only scales.
        for direction in 0..DIRECTION_COUNT {
            let full = joystick_to_tracks(direction, 7);
            for radius in 1..7 {
                let partial = joystick_to_tracks(direction, radius);
                assert_eq!(partial.left.sense, full.left.sense);
                assert_eq!(partial.right.sense, full.right.sense);
            }
        }
    }

    #[test]
    fn test_out_of_range_direction_wraps() {
        assert_eq!(joystick_to_tracks(24, 7), joystick_to_tracks(0, 7));
        assert_eq!(joystick_to_tracks(31, 7), joystick_to_tracks(7, 7));
    }
}
