//! Constants that shape the model regardless of per-request configuration.
//! These mirror the fixed values named in the scheduling contract; unlike
//! `maxConsecutiveShiftsWorked` or `targetOffDays` they are not accepted as
//! request overrides.

/// Longest run of the same shift type (Morning/Afternoon/Night) a
/// non-government nurse may work back to back.
pub const MAX_CONSECUTIVE_SAME_SHIFT: i32 = 2;

/// Longest run of consecutive off days a non-government nurse may have.
pub const MAX_CONSECUTIVE_OFF_DAYS: i32 = 2;

/// Window, in days, over which the minimum-off-days-in-window rule is
/// evaluated. Carried from the source system for parity; `MIN_OFF_DAYS_IN_WINDOW`
/// is zero, so this window currently has no observable effect on the model,
/// but both constants are kept so a future non-zero minimum only requires a
/// constant change in one place.
pub const WINDOW_SIZE_FOR_MIN_OFF: i32 = 7;
pub const MIN_OFF_DAYS_IN_WINDOW: i32 = 0;

/// Soft-penalty weights, see SPEC_FULL.md §4.5.
pub const WEIGHT_END_OF_MONTH_AT_MAX_CONSECUTIVE: i32 = 35;
pub const WEIGHT_OFF_DAY_SHORTFALL: i32 = 50;
pub const WEIGHT_TOTAL_SHIFT_IMBALANCE: i32 = 30;
pub const WEIGHT_OFF_DAY_IMBALANCE: i32 = 30;
pub const WEIGHT_SHIFT_TYPE_IMBALANCE: i32 = 15;
pub const WEIGHT_NIGHT_AFTERNOON_DOUBLE_COUNT: i32 = 10;
pub const WEIGHT_NIGHT_TO_MORNING_TRANSITION: i32 = 5;
pub const WEIGHT_PERMANENT_SOFT_VIOLATION: i32 = 15;
pub const WEIGHT_MONTHLY_SOFT_BASE: i32 = 15;
pub const WEIGHT_MONTHLY_SOFT_HIGH_PRIORITY_BONUS: i32 = 15;
pub const WEIGHT_MONTHLY_SOFT_CARRY_OVER_BONUS: i32 = 5;

/// Request-level defaults (used when the incoming payload omits the field).
pub const DEFAULT_REQUIRED_NURSES_MORNING: i32 = 2;
pub const DEFAULT_REQUIRED_NURSES_AFTERNOON: i32 = 3;
pub const DEFAULT_REQUIRED_NURSES_NIGHT: i32 = 2;
pub const DEFAULT_MAX_CONSECUTIVE_SHIFTS_WORKED: i32 = 6;
pub const DEFAULT_TARGET_OFF_DAYS: i32 = 8;
pub const DEFAULT_SOLVER_TIME_LIMIT_SECONDS: f64 = 60.0;

/// Carry-over threshold table f(k) from SPEC_FULL.md §4.8, for weekday
/// monthly requests: minimum number of matching weekdays that must be off
/// for the request to count as fulfilled, given `k` occurrences of that
/// weekday in the window. Intentionally non-monotone-interpolated
/// (f(3) == f(2)); see SPEC_FULL.md §9 open question / decision.
pub fn weekday_fulfillment_threshold(k: u32) -> u32 {
    match k {
        0 => 0,
        1 => 1,
        2 => 2,
        3 => 2,
        4 => 3,
        _ => 4,
    }
}
