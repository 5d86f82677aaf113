//! Step-aligned dimension resolution under a pixel budget.

use tracing::debug;

/// Upper bound on budget-shrinking passes in [`resolve_within_budget`].
pub const MAX_SHRINK_ITERATIONS: u64 = 1 << 16;

/// Largest budget the resolver works with; larger budgets are clamped so
/// resolved sides and their area stay in range.
pub const MAX_BUDGET: u64 = 1 << 62;

/// Rounds `value` to the nearest multiple of `step`.
///
/// Halfway values round up: a remainder below `step / 2` (integer division)
/// rounds down, anything else rounds up. Catalog membership at half-step
/// boundaries depends on this.
pub fn round_to_step(value: u64, step: u64) -> u64 {
    let step = step.max(1);
    let remainder = value % step;
    if remainder == 0 {
        return value;
    }
    if remainder < step / 2 {
        value - remainder
    } else {
        value.saturating_add(step - remainder)
    }
}

/// Rounds `value` up to the next multiple of `step`.
pub fn round_up_to_step(value: u64, step: u64) -> u64 {
    let step = step.max(1);
    let remainder = value % step;
    if remainder == 0 { value } else { value.saturating_add(step - remainder) }
}

/// Rounds `value` down to the previous multiple of `step`.
pub fn round_down_to_step(value: u64, step: u64) -> u64 {
    let step = step.max(1);
    value - value % step
}

/// Step-aligned dimensions closest to the `ratio_width:ratio_height` shape
/// for a `budget` pixel area.
///
/// The dominant axis comes from `sqrt(budget * aspect)`; the other axis is
/// scaled from it with the exact integer ratio. Square ratios resolve the
/// height first. The result may exceed `budget`; see
/// [`resolve_within_budget`].
pub fn nearest_aspect_dimensions(
    ratio_width: u64,
    ratio_height: u64,
    budget: u64,
    step: u64,
) -> (u64, u64) {
    if ratio_width == 0 || ratio_height == 0 {
        return (0, 0);
    }
    let budget = budget.min(MAX_BUDGET) as f64;
    let (width, height) = if ratio_width > ratio_height {
        let aspect = ratio_width as f64 / ratio_height as f64;
        let width = round_to_step((budget * aspect).sqrt() as u64, step);
        (width, scale_side(width, ratio_height, ratio_width))
    } else {
        let aspect = ratio_height as f64 / ratio_width as f64;
        let height = round_to_step((budget * aspect).sqrt() as u64, step);
        (scale_side(height, ratio_width, ratio_height), height)
    };
    (round_to_step(width, step), round_to_step(height, step))
}

/// `side * numerator / denominator`, floored, without intermediate overflow
fn scale_side(side: u64, numerator: u64, denominator: u64) -> u64 {
    let scaled = side as u128 * numerator as u128 / denominator as u128;
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

/// Whether `width * height` exceeds `budget`; an area past `u64` always does
fn exceeds(width: u64, height: u64, budget: u64) -> bool {
    width.checked_mul(height).is_none_or(|area| area > budget)
}

/// Resolves the ratio to step-aligned dimensions whose area fits `budget`.
///
/// Rounding can push the area over the budget, so the working budget shrinks
/// by `step²` per pass until the area fits. Returns `None` if that does not
/// happen within [`MAX_SHRINK_ITERATIONS`] passes.
pub fn resolve_within_budget(
    ratio_width: u64,
    ratio_height: u64,
    budget: u64,
    step: u64,
) -> Option<(u64, u64)> {
    let step = step.max(1);
    let budget = budget.min(MAX_BUDGET);
    let shrink = step.saturating_mul(step);
    let (mut width, mut height) = nearest_aspect_dimensions(ratio_width, ratio_height, budget, step);
    let mut iterations: u64 = 0;
    while exceeds(width, height, budget) {
        iterations += 1;
        if iterations > MAX_SHRINK_ITERATIONS {
            debug!(ratio_width, ratio_height, budget, "dimension resolution did not converge");
            return None;
        }
        let working = budget.saturating_sub(shrink.saturating_mul(iterations));
        (width, height) = nearest_aspect_dimensions(ratio_width, ratio_height, working, step);
    }
    Some((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_to_step(1024, 64), 1024);
        assert_eq!(round_to_step(1055, 64), 1024);
        // exactly half a step rounds up
        assert_eq!(round_to_step(1056, 64), 1088);
        assert_eq!(round_to_step(1057, 64), 1088);
        assert_eq!(round_to_step(17, 0), 17);
    }

    #[test]
    fn test_directional_rounding() {
        assert_eq!(round_up_to_step(1025, 64), 1088);
        assert_eq!(round_up_to_step(1024, 64), 1024);
        assert_eq!(round_down_to_step(1087, 64), 1024);
        assert_eq!(round_down_to_step(1088, 64), 1088);
    }

    #[test]
    fn test_square_budget() {
        assert_eq!(nearest_aspect_dimensions(1, 1, 1_048_576, 64), (1024, 1024));
        assert_eq!(resolve_within_budget(1, 1, 1_048_576, 64), Some((1024, 1024)));
    }

    #[test]
    fn test_widescreen() {
        assert_eq!(resolve_within_budget(16, 9, 1_048_576, 64), Some((1344, 768)));
        assert_eq!(resolve_within_budget(9, 16, 1_048_576, 64), Some((768, 1344)));
    }

    #[test]
    fn test_shrinks_when_rounding_overflows_budget() {
        // 8:5 first rounds to 1280x832, which is over a 1 MiB budget
        let (w, h) = nearest_aspect_dimensions(8, 5, 1_048_576, 64);
        assert!(w * h > 1_048_576);

        let (w, h) = resolve_within_budget(8, 5, 1_048_576, 64).unwrap();
        assert!(w * h <= 1_048_576);
        assert_eq!((w % 64, h % 64), (0, 0));
    }

    #[test]
    fn test_huge_budget_is_clamped() {
        assert_eq!(resolve_within_budget(1, 1, u64::MAX, 64), Some((1 << 31, 1 << 31)));
        let (w, h) = nearest_aspect_dimensions(u32::MAX as u64, 1, u64::MAX, 64);
        assert!(w > h);
        assert_eq!(round_to_step(u64::MAX, 64), u64::MAX);
        assert!(exceeds(u64::MAX, 2, u64::MAX));
    }

    #[test]
    fn test_degenerate_ratio() {
        assert_eq!(nearest_aspect_dimensions(0, 3, 1_000, 8), (0, 0));
        assert_eq!(resolve_within_budget(0, 3, 1_000, 8), Some((0, 0)));
    }
}
