use crate::section::SectionGroup;
use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::f64::consts::TAU;
use strum::{Display as StrumDisplay, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SpinDirection {
    #[default]
    #[strum(serialize = "Clockwise", serialize = "cw")]
    Clockwise,
    #[strum(
        serialize = "CounterClockwise",
        serialize = "counter-clockwise",
        serialize = "ccw"
    )]
    CounterClockwise,
}

impl SpinDirection {
    /// Clockwise is positive angle increase.
    pub fn sign(self) -> f64 {
        match self {
            Self::Clockwise => 1.0,
            Self::CounterClockwise => -1.0,
        }
    }
}

/// Absolute rotation angle at which a spin settles on the target section.
///
/// Sections are laid out clockwise from the pointer at the top, so the wheel
/// must turn by the negated landing point to bring it under the pointer. The
/// result is congruent mod 2π to that landing rotation and differs from
/// `current_angle` by at least `min_rotate_circles` full turns in the
/// requested direction.
///
/// `offset` selects the landing point inside the target section; 0 lands on
/// the edge at which the pointer enters the section, 1 on the opposite edge.
/// Values outside `[0, 1)` land outside the section and are the caller's
/// responsibility.
///
/// # Panics
///
/// Panics if `target_index` is out of range for the group.
pub fn end_rotation(
    group: &SectionGroup,
    target_index: usize,
    direction: SpinDirection,
    current_angle: f64,
    min_rotate_circles: u32,
    offset: f64,
) -> f64 {
    assert!(
        target_index < group.len(),
        "target index {target_index} out of range for {} sections",
        group.len()
    );

    let landing =
        group.leading_angle(target_index) + (1.0 - offset) * group.sweep(target_index);
    let target = -landing;

    let sign = direction.sign();
    // Smallest rotation from the current angle that reaches the target in
    // the requested direction, in [0, 2π).
    let delta = (sign * (target - current_angle)).rem_euclid(TAU);

    current_angle + sign * (delta + f64::from(min_rotate_circles) * TAU)
}
