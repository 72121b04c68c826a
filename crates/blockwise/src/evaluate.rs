//! The schedule evaluator: a small temporal state machine over an ordered
//! event list.
//!
//! [`generate_timeline`] resolves each entry's date expression lazily, in
//! source order; [`evaluate`] walks that timeline and decides whether the
//! block is active at the evaluation instant. No state persists between
//! calls.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::trace;

use crate::block::{Action, ScheduleEntry};
use crate::error::{BlockError, Result};
use crate::resolve::DateResolver;

/// One resolved timeline entry: the action and, for timed entries, the
/// absolute instant at which it takes effect.
pub type TimelineEntry = (Action, Option<DateTime<Utc>>);

/// The evaluator's verdict for one schedule at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduleState {
    /// Whether the block is active at the evaluation instant.
    pub active: bool,
    /// When the last effective event took effect; `None` when no event has
    /// applied, or when the last effective event was untimed.
    pub last_effective: Option<DateTime<Utc>>,
}

/// Resolve a schedule into a lazy timeline of [`TimelineEntry`] items.
///
/// Untimed entries pass through as `(action, None)` without touching the
/// resolver. Timed entries resolve against `relative_base` and `timezone`.
/// `relative_base` is **not** advanced between entries: every expression
/// resolves against the same fixed base, by design. Chaining is only
/// supported *within* one expression, via the resolver's `->` operator.
///
/// # Errors
///
/// A yielded [`BlockError::UnresolvableDate`] names the expression that
/// failed; it is not per-entry recoverable.
pub fn generate_timeline<'a, R: DateResolver + ?Sized>(
    schedule: &'a [ScheduleEntry],
    resolver: &'a R,
    relative_base: DateTime<Utc>,
    timezone: Option<&'a str>,
) -> impl Iterator<Item = Result<TimelineEntry>> + 'a {
    schedule.iter().map(move |entry| match &entry.date_expression {
        None => Ok((entry.action, None)),
        Some(expression) => resolver
            .resolve(expression, Some(relative_base), timezone)
            .map(|instant| (entry.action, Some(instant)))
            .ok_or_else(|| BlockError::UnresolvableDate(expression.clone())),
    })
}

/// Walk the timeline and report the active state at `evaluation_instant`.
///
/// Rules, in walk order:
///
/// - an untimed entry always takes effect when reached (`last_effective`
///   becomes `None`) and does not halt the walk;
/// - a timed entry strictly in the future halts the walk without applying
///   (the list is time-ordered by convention, so nothing later applies
///   either);
/// - a timed entry at or before the instant takes effect; when it lands
///   exactly on the instant the walk halts after applying it, so later
///   same-instant entries are never processed.
///
/// Because the timeline is lazy, entries past the halting point are never
/// resolved; an unresolvable expression there does not fail evaluation.
///
/// An empty schedule, or one with only future events, yields the initial
/// `(false, None)` state.
///
/// # Examples
///
/// ```
/// use blockwise::{evaluate, Action, NaturalDateResolver, ScheduleEntry};
/// use chrono::{TimeZone, Utc};
///
/// let schedule = vec![
///     ScheduleEntry { action: Action::Set, date_expression: Some("9:00 am".into()) },
///     ScheduleEntry { action: Action::End, date_expression: Some("11:00 am".into()) },
/// ];
/// let base = Utc.with_ymd_and_hms(2025, 8, 14, 0, 0, 0).unwrap();
/// let at = Utc.with_ymd_and_hms(2025, 8, 14, 10, 0, 0).unwrap();
///
/// let state = evaluate(&schedule, &NaturalDateResolver, base, at, None).unwrap();
/// assert!(state.active);
/// ```
pub fn evaluate<R: DateResolver + ?Sized>(
    schedule: &[ScheduleEntry],
    resolver: &R,
    relative_base: DateTime<Utc>,
    evaluation_instant: DateTime<Utc>,
    timezone: Option<&str>,
) -> Result<ScheduleState> {
    let mut active = false;
    let mut last_effective = None;

    for entry in generate_timeline(schedule, resolver, relative_base, timezone) {
        let (action, instant) = entry?;
        match instant {
            None => {
                active = action == Action::Set;
                last_effective = None;
            }
            Some(t) => {
                if t > evaluation_instant {
                    break;
                }
                active = action == Action::Set;
                last_effective = Some(t);
                if t == evaluation_instant {
                    // Same-instant events are a hard stop after applying once.
                    break;
                }
            }
        }
    }

    trace!(active, ?last_effective, "evaluated schedule");
    Ok(ScheduleState {
        active,
        last_effective,
    })
}
