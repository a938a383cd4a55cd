use embassy_time::Duration;

use crate::{
    Rgb,
    effect::{ColorShift, Effect},
    time::Timestamp,
};

/// One cross-fade step of a looping color sequence
#[derive(Debug, Clone, Copy)]
pub(crate) struct ColorStep {
    pub(crate) shift: ColorShift,
    pub(crate) duration: Duration,
}

impl ColorStep {
    pub(crate) const fn fade(start: Rgb, target: Rgb, millis: u64) -> Self {
        Self {
            shift: ColorShift::new(start, target),
            duration: Duration::from_millis(millis),
        }
    }
}

/// Play `steps` back to back, forever, starting at `mode_start`
///
/// Each step is evaluated as its own [`ColorShift`] whose start is placed at
/// the step boundary, so the effect stays a pure function of time.
pub(crate) fn play_loop(steps: &[ColorStep], cycle_time: Timestamp, mode_start: Timestamp) -> Rgb {
    let total: u64 = steps.iter().map(|step| step.duration.as_millis()).sum();
    if total == 0 {
        return steps.last().map_or(Rgb::default(), |step| step.shift.target);
    }

    let mut offset = cycle_time.elapsed_since(mode_start).as_millis() % total;
    for step in steps {
        let length = step.duration.as_millis();
        if offset < length {
            let step_start = cycle_time.wrapping_sub(Duration::from_millis(offset));
            return step.shift.evaluate(cycle_time, step_start, step.duration).value;
        }
        offset -= length;
    }

    Rgb::default()
}
