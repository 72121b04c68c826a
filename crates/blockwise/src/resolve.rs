//! Date expression resolution.
//!
//! The evaluator does not interpret date expressions itself; it goes through
//! the [`DateResolver`] capability so hosts can inject their own parser. The
//! built-in [`NaturalDateResolver`] resolves a practical subset of
//! human-written expressions deterministically: if an expression cannot be
//! parsed unambiguously it fails rather than guessing.
//!
//! All functions take explicit inputs (no system clock access) — the caller
//! provides the reference instant, keeping resolution testable.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;

/// Token separating the segments of a chained expression.
pub const CHAIN_OPERATOR: &str = "->";

/// Capability for turning a date expression into an absolute instant.
///
/// `reference` is the instant relative expressions resolve against; `None`
/// means only absolute expressions can succeed. `timezone` is an IANA name
/// or a UTC-offset identifier (`UTC+8`); `None` means UTC. A failure of any
/// kind — unparseable expression, unknown timezone — is `None`.
///
/// Implementations must honor the [`CHAIN_OPERATOR`]: each `->`-separated
/// segment resolves relative to the prior segment's result, left to right.
/// An empty expression, or any segment that fails, fails the whole
/// resolution.
pub trait DateResolver {
    fn resolve(
        &self,
        expression: &str,
        reference: Option<DateTime<Utc>>,
        timezone: Option<&str>,
    ) -> Option<DateTime<Utc>>;
}

/// The built-in resolver.
///
/// # Supported expressions
///
/// **Absolute**: RFC 3339, ISO `YYYY-MM-DD`, and calendar dates with an
/// explicit year (`Aug 1 2025`, `1 Aug 2025`, `Aug 14 2025 at 9:00 am`,
/// `Aug 1 2025 UTC+8` — a trailing offset overrides the zone for that
/// segment). These work without a reference instant.
///
/// **Anchored**: `now`, `today`, `tomorrow`, `yesterday`, optionally with a
/// time (`tomorrow at 2pm`, `tomorrow morning`).
///
/// **Weekday-relative**: `next friday`, `this monday`, `last tuesday`,
/// optionally with a time (`next tuesday at 2pm`).
///
/// **Period-relative**: `next week`, `last month`, `next year` — the start
/// of the period, with ISO weeks (Monday).
///
/// **Offsets**: `in 2 hours`, `30 minutes ago`, `a week from now`, and
/// compact durations (`+2h`, `-1d12h`).
///
/// **Time-only**: `9:00 am`, `14:00`, `noon`, `midnight` — interpreted on
/// the reference instant's local date.
///
/// **Chains**: `Aug 1 2025 -> in 2 days -> in 3 hours`.
///
/// Expressions are case-insensitive; interior articles (`the`, `a`, `an`)
/// are ignored. Returned instants are normalized to UTC.
///
/// # Examples
///
/// ```
/// use blockwise::{DateResolver, NaturalDateResolver};
/// use chrono::{TimeZone, Utc};
///
/// let base = Utc.with_ymd_and_hms(2025, 8, 14, 0, 0, 0).unwrap();
/// let resolved = NaturalDateResolver
///     .resolve("Aug 1 2025 -> in 2 days", Some(base), None)
///     .unwrap();
/// assert_eq!(resolved, Utc.with_ymd_and_hms(2025, 8, 3, 0, 0, 0).unwrap());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalDateResolver;

impl DateResolver for NaturalDateResolver {
    fn resolve(
        &self,
        expression: &str,
        reference: Option<DateTime<Utc>>,
        timezone: Option<&str>,
    ) -> Option<DateTime<Utc>> {
        match parse_zone(timezone.unwrap_or("UTC"))? {
            Zone::Named(tz) => resolve_chain(expression, reference, &tz),
            Zone::Fixed(offset) => resolve_chain(expression, reference, &offset),
        }
    }
}

/// A timezone identifier: an IANA name, or a fixed `UTC±H[:MM]` offset.
enum Zone {
    Named(Tz),
    Fixed(FixedOffset),
}

fn parse_zone(s: &str) -> Option<Zone> {
    let s = s.trim();
    if let Ok(tz) = s.parse::<Tz>() {
        return Some(Zone::Named(tz));
    }
    parse_utc_offset(s).map(Zone::Fixed)
}

/// Parse `UTC`, `UTC+8`, `UTC-05:30`, `GMT+1` into a fixed offset.
fn parse_utc_offset(s: &str) -> Option<FixedOffset> {
    let upper = s.to_ascii_uppercase();
    let rest = upper
        .strip_prefix("UTC")
        .or_else(|| upper.strip_prefix("GMT"))?;
    if rest.is_empty() {
        return FixedOffset::east_opt(0);
    }
    let (sign, rest) = match rest.as_bytes().first()? {
        b'+' => (1, &rest[1..]),
        b'-' => (-1, &rest[1..]),
        _ => return None,
    };
    let (hours, minutes): (i32, i32) = match rest.split_once(':') {
        Some((h, m)) => (h.parse().ok()?, m.parse().ok()?),
        None => (rest.parse().ok()?, 0),
    };
    if hours > 14 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Resolve a chained expression, each segment relative to the previous
/// segment's result.
fn resolve_chain<T: TimeZone>(
    expression: &str,
    reference: Option<DateTime<Utc>>,
    tz: &T,
) -> Option<DateTime<Utc>> {
    if expression.trim().is_empty() {
        return None;
    }

    let mut reference = reference;
    let mut resolved = None;
    for segment in expression.split(CHAIN_OPERATOR) {
        let segment = segment.trim();
        if segment.is_empty() {
            return None;
        }
        let instant = resolve_segment(segment, reference, tz)?;
        reference = Some(instant);
        resolved = Some(instant);
    }
    resolved
}

fn resolve_segment<T: TimeZone>(
    segment: &str,
    reference: Option<DateTime<Utc>>,
    tz: &T,
) -> Option<DateTime<Utc>> {
    // Machine-formatted passthroughs first, before lowercasing touches them.
    if let Some(dt) = try_passthrough_rfc3339(segment) {
        return Some(dt);
    }
    if let Some(dt) = try_passthrough_iso_date(segment, tz) {
        return Some(dt);
    }

    let normalized = normalize_expression(segment);
    if let Some(dt) = try_calendar_date(&normalized, tz) {
        return Some(dt);
    }

    // Everything below is relative and needs an anchor.
    let anchor = reference?;
    let local = anchor.with_timezone(tz);

    try_anchored(&normalized, &local, tz)
        .or_else(|| try_combined_weekday_time(&normalized, &local, tz))
        .or_else(|| try_combined_anchor_time(&normalized, &local, tz))
        .or_else(|| try_weekday_relative(&normalized, &local, tz))
        .or_else(|| try_period_relative(&normalized, &local, tz))
        .or_else(|| try_natural_offset(&normalized, &anchor))
        .or_else(|| try_duration_offset(&normalized, &anchor))
        .or_else(|| try_time_of_day_named(&normalized, &local, tz))
        .or_else(|| try_explicit_time(&normalized, &local, tz))
}

// ── Expression parsers ──────────────────────────────────────────────────────

/// Normalize: trim, lowercase, strip interior articles, collapse spaces.
/// A leading "a"/"an" is kept — it matters for "a week from now".
fn normalize_expression(s: &str) -> String {
    let s = s.trim().to_lowercase();
    let s = s.replace(" the ", " ").replace(" a ", " ").replace(" an ", " ");
    let s = s.strip_prefix("the ").unwrap_or(&s);

    let mut result = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch == ' ' {
            if !prev_space {
                result.push(' ');
            }
            prev_space = true;
        } else {
            result.push(ch);
            prev_space = false;
        }
    }
    result.trim().to_string()
}

fn try_passthrough_rfc3339(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

/// `YYYY-MM-DD` → start of that day in the resolution zone.
fn try_passthrough_iso_date<T: TimeZone>(s: &str, tz: &T) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    localize(date.and_hms_opt(0, 0, 0)?, tz)
}

/// Calendar dates with an explicit year: `aug 1 2025`, `1 aug 2025`,
/// `aug 14 2025 at 9:00 am`, `aug 1 2025 utc+8`.
fn try_calendar_date<T: TimeZone>(s: &str, tz: &T) -> Option<DateTime<Utc>> {
    let mut tokens: Vec<&str> = s
        .split_whitespace()
        .map(|t| t.trim_matches(','))
        .filter(|t| !t.is_empty())
        .collect();

    // A trailing offset token overrides the resolution zone for this segment.
    let offset = tokens.last().and_then(|t| parse_utc_offset(t));
    if offset.is_some() {
        tokens.pop();
    }

    let mut time = None;
    if let Some(at_idx) = tokens.iter().position(|t| *t == "at") {
        time = Some(parse_time_string(&tokens[at_idx + 1..].join(" "))?);
        tokens.truncate(at_idx);
    } else if tokens.len() == 5 {
        time = Some(parse_time_string(&tokens[3..].join(" "))?);
        tokens.truncate(3);
    } else if tokens.len() == 4 {
        time = Some(parse_time_string(tokens[3])?);
        tokens.truncate(3);
    }

    let &[a, b, y] = tokens.as_slice() else {
        return None;
    };
    let year: i32 = y.parse().ok()?;
    let (month, day) = if let Some(month) = parse_month(a) {
        (month, parse_day(b)?)
    } else if let Some(month) = parse_month(b) {
        (month, parse_day(a)?)
    } else {
        return None;
    };

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let naive = date.and_time(time.unwrap_or(NaiveTime::MIN));
    match offset {
        Some(offset) => offset
            .from_local_datetime(&naive)
            .single()
            .map(|dt| dt.with_timezone(&Utc)),
        None => localize(naive, tz),
    }
}

/// `now`, `today`, `tomorrow`, `yesterday`.
fn try_anchored<T: TimeZone>(s: &str, local: &DateTime<T>, tz: &T) -> Option<DateTime<Utc>> {
    match s {
        "now" => Some(local.with_timezone(&Utc)),
        "today" => localize(local.date_naive().and_hms_opt(0, 0, 0)?, tz),
        "tomorrow" => localize(local.date_naive().succ_opt()?.and_hms_opt(0, 0, 0)?, tz),
        "yesterday" => localize(local.date_naive().pred_opt()?.and_hms_opt(0, 0, 0)?, tz),
        _ => None,
    }
}

/// The date that `next`/`this`/`last <weekday>` lands on. "next" is always
/// in the future and "last" always in the past, even from the same weekday.
fn weekday_target_date<T: TimeZone>(
    modifier: &str,
    weekday: Weekday,
    local: &DateTime<T>,
) -> Option<NaiveDate> {
    let current = local.weekday();
    let target = weekday.num_days_from_monday() as i64;
    let today = current.num_days_from_monday() as i64;

    let date = match modifier {
        "next" => {
            let ahead = (target - today + 7) % 7;
            local.date_naive() + Duration::days(if ahead == 0 { 7 } else { ahead })
        }
        "this" => local.date_naive() + Duration::days(target - today),
        "last" => {
            let back = (today - target + 7) % 7;
            local.date_naive() - Duration::days(if back == 0 { 7 } else { back })
        }
        _ => return None,
    };
    Some(date)
}

/// `next monday`, `this friday`, `last wednesday` → start of that day.
fn try_weekday_relative<T: TimeZone>(
    s: &str,
    local: &DateTime<T>,
    tz: &T,
) -> Option<DateTime<Utc>> {
    let (modifier, rest) = s.split_once(' ')?;
    let weekday = parse_weekday(rest)?;
    let date = weekday_target_date(modifier, weekday, local)?;
    localize(date.and_hms_opt(0, 0, 0)?, tz)
}

/// `next tuesday at 2pm`, `next friday evening`.
fn try_combined_weekday_time<T: TimeZone>(
    s: &str,
    local: &DateTime<T>,
    tz: &T,
) -> Option<DateTime<Utc>> {
    let mut parts = s.splitn(3, ' ');
    let modifier = parts.next()?;
    if !matches!(modifier, "next" | "this" | "last") {
        return None;
    }
    let weekday = parse_weekday(parts.next()?)?;
    let time_part = parts.next()?;

    let time = match time_part.strip_prefix("at ") {
        Some(t) => named_time(t).or_else(|| parse_time_string(t)),
        None => named_time(time_part),
    }?;
    let date = weekday_target_date(modifier, weekday, local)?;
    localize(date.and_time(time), tz)
}

/// `tomorrow at 2pm`, `today at noon`, `tomorrow morning`.
fn try_combined_anchor_time<T: TimeZone>(
    s: &str,
    local: &DateTime<T>,
    tz: &T,
) -> Option<DateTime<Utc>> {
    let (anchor, time_part) = s.split_once(' ')?;
    let date = match anchor {
        "today" => local.date_naive(),
        "tomorrow" => local.date_naive().succ_opt()?,
        "yesterday" => local.date_naive().pred_opt()?,
        _ => return None,
    };
    let time = match time_part.strip_prefix("at ") {
        Some(t) => named_time(t).or_else(|| parse_time_string(t)),
        None => named_time(time_part).or_else(|| parse_time_string(time_part)),
    }?;
    localize(date.and_time(time), tz)
}

/// `next week`, `last month`, `next year` → start of the period. Weeks are
/// ISO (Monday-start).
fn try_period_relative<T: TimeZone>(
    s: &str,
    local: &DateTime<T>,
    tz: &T,
) -> Option<DateTime<Utc>> {
    let date = match s {
        "next week" => {
            let until = 7 - local.weekday().num_days_from_monday() as i64;
            local.date_naive() + Duration::days(until)
        }
        "last week" => {
            let since = local.weekday().num_days_from_monday() as i64;
            local.date_naive() - Duration::days(since + 7)
        }
        "next month" => {
            let (y, m) = if local.month() == 12 {
                (local.year() + 1, 1)
            } else {
                (local.year(), local.month() + 1)
            };
            NaiveDate::from_ymd_opt(y, m, 1)?
        }
        "last month" => {
            let (y, m) = if local.month() == 1 {
                (local.year() - 1, 12)
            } else {
                (local.year(), local.month() - 1)
            };
            NaiveDate::from_ymd_opt(y, m, 1)?
        }
        "next year" => NaiveDate::from_ymd_opt(local.year() + 1, 1, 1)?,
        "last year" => NaiveDate::from_ymd_opt(local.year() - 1, 1, 1)?,
        _ => return None,
    };
    localize(date.and_hms_opt(0, 0, 0)?, tz)
}

/// `in 2 hours`, `30 minutes ago`, `a week from now`.
fn try_natural_offset(s: &str, anchor: &DateTime<Utc>) -> Option<DateTime<Utc>> {
    if let Some(rest) = s.strip_prefix("in ") {
        let (n, unit) = parse_count_and_unit(rest)?;
        return shift(anchor, n.checked_mul(unit.seconds())?);
    }
    if let Some(rest) = s.strip_suffix(" ago") {
        let (n, unit) = parse_count_and_unit(rest)?;
        return shift(anchor, n.checked_mul(unit.seconds())?.checked_neg()?);
    }
    if let Some(rest) = s.strip_suffix(" from now") {
        let (n, unit) = parse_count_and_unit_with_article(rest)?;
        return shift(anchor, n.checked_mul(unit.seconds())?);
    }
    None
}

/// Offset `anchor` by whole seconds; absurd magnitudes fail instead of
/// overflowing.
fn shift(anchor: &DateTime<Utc>, seconds: i64) -> Option<DateTime<Utc>> {
    anchor.checked_add_signed(Duration::try_seconds(seconds)?)
}

/// Compact signed durations: `+2h`, `-1d12h`, `+1w`.
fn try_duration_offset(s: &str, anchor: &DateTime<Utc>) -> Option<DateTime<Utc>> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1i64, &s[1..]),
        b'-' => (-1i64, &s[1..]),
        _ => return None,
    };
    if rest.is_empty() {
        return None;
    }

    let mut total = 0i64;
    let mut digits = String::new();
    for ch in rest.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }
        if digits.is_empty() {
            return None;
        }
        let n: i64 = digits.parse().ok()?;
        digits.clear();
        let factor = match ch {
            'w' => 604_800,
            'd' => 86_400,
            'h' => 3_600,
            'm' => 60,
            's' => 1,
            _ => return None,
        };
        total = total.checked_add(n.checked_mul(factor)?)?;
    }
    if !digits.is_empty() {
        return None;
    }
    shift(anchor, total.checked_mul(sign)?)
}

/// `morning`, `noon`, `midnight`, ... on the reference instant's local date.
fn try_time_of_day_named<T: TimeZone>(
    s: &str,
    local: &DateTime<T>,
    tz: &T,
) -> Option<DateTime<Utc>> {
    localize(local.date_naive().and_time(named_time(s)?), tz)
}

/// `2pm`, `9:00 am`, `14:00` on the reference instant's local date.
fn try_explicit_time<T: TimeZone>(s: &str, local: &DateTime<T>, tz: &T) -> Option<DateTime<Utc>> {
    localize(local.date_naive().and_time(parse_time_string(s)?), tz)
}

// ── Parsing helpers ─────────────────────────────────────────────────────────

fn localize<T: TimeZone>(naive: NaiveDateTime, tz: &T) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

fn parse_weekday(s: &str) -> Option<Weekday> {
    match s {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" | "tues" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" | "thurs" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

fn parse_month(s: &str) -> Option<u32> {
    match s {
        "january" | "jan" => Some(1),
        "february" | "feb" => Some(2),
        "march" | "mar" => Some(3),
        "april" | "apr" => Some(4),
        "may" => Some(5),
        "june" | "jun" => Some(6),
        "july" | "jul" => Some(7),
        "august" | "aug" => Some(8),
        "september" | "sep" | "sept" => Some(9),
        "october" | "oct" => Some(10),
        "november" | "nov" => Some(11),
        "december" | "dec" => Some(12),
        _ => None,
    }
}

fn parse_day(s: &str) -> Option<u32> {
    s.parse().ok().filter(|day| (1..=31).contains(day))
}

fn named_time(s: &str) -> Option<NaiveTime> {
    match s {
        "morning" | "start of business" | "sob" => NaiveTime::from_hms_opt(9, 0, 0),
        "noon" | "lunch" => NaiveTime::from_hms_opt(12, 0, 0),
        "afternoon" => NaiveTime::from_hms_opt(13, 0, 0),
        "end of day" | "end of business" | "eob" => NaiveTime::from_hms_opt(17, 0, 0),
        "evening" => NaiveTime::from_hms_opt(18, 0, 0),
        "night" => NaiveTime::from_hms_opt(21, 0, 0),
        "midnight" => NaiveTime::from_hms_opt(0, 0, 0),
        _ => None,
    }
}

/// `2pm`, `2:30pm`, `9:00 am`, `14:00`, `14:30:00`.
fn parse_time_string(s: &str) -> Option<NaiveTime> {
    let s = s.trim();

    if let Ok(t) = NaiveTime::parse_from_str(s, "%H:%M:%S") {
        return Some(t);
    }
    if let Ok(t) = NaiveTime::parse_from_str(s, "%H:%M") {
        return Some(t);
    }

    let compact = s.replace(' ', "");
    let (digits, is_pm) = if let Some(rest) = compact.strip_suffix("pm") {
        (rest, true)
    } else if let Some(rest) = compact.strip_suffix("am") {
        (rest, false)
    } else {
        return None;
    };

    let mut parts = digits.split(':');
    let hour: u32 = parts.next()?.parse().ok()?;
    let minute: u32 = parts.next().map_or(Some(0), |m| m.parse().ok())?;
    let second: u32 = parts.next().map_or(Some(0), |m| m.parse().ok())?;

    let hour24 = match (hour, is_pm) {
        (12, true) => 12,
        (12, false) => 0,
        (h, true) => h + 12,
        (h, false) => h,
    };
    NaiveTime::from_hms_opt(hour24, minute, second)
}

#[derive(Debug, Clone, Copy)]
enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
}

impl TimeUnit {
    fn parse(s: &str) -> Option<TimeUnit> {
        match s {
            "second" | "seconds" | "sec" | "secs" => Some(TimeUnit::Seconds),
            "minute" | "minutes" | "min" | "mins" => Some(TimeUnit::Minutes),
            "hour" | "hours" | "hr" | "hrs" => Some(TimeUnit::Hours),
            "day" | "days" => Some(TimeUnit::Days),
            "week" | "weeks" | "wk" | "wks" => Some(TimeUnit::Weeks),
            _ => None,
        }
    }

    fn seconds(self) -> i64 {
        match self {
            TimeUnit::Seconds => 1,
            TimeUnit::Minutes => 60,
            TimeUnit::Hours => 3_600,
            TimeUnit::Days => 86_400,
            TimeUnit::Weeks => 604_800,
        }
    }
}

/// `2 hours`, `30 minutes`.
fn parse_count_and_unit(s: &str) -> Option<(i64, TimeUnit)> {
    let (n, unit) = s.split_once(' ')?;
    Some((n.trim().parse().ok()?, TimeUnit::parse(unit.trim())?))
}

/// Like [`parse_count_and_unit`] but also accepts `a week` / `an hour`.
fn parse_count_and_unit_with_article(s: &str) -> Option<(i64, TimeUnit)> {
    if let Some(unit) = s.strip_prefix("a ").or_else(|| s.strip_prefix("an ")) {
        return Some((1, TimeUnit::parse(unit.trim())?));
    }
    parse_count_and_unit(s)
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone as _;

    // Thursday, August 14, 2025, 00:00:00 UTC
    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 14, 0, 0, 0).unwrap()
    }

    fn resolve(expression: &str) -> Option<DateTime<Utc>> {
        NaturalDateResolver.resolve(expression, Some(anchor()), None)
    }

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_calendar_date_month_first() {
        assert_eq!(resolve("Aug 1 2025"), Some(utc(2025, 8, 1, 0, 0)));
    }

    #[test]
    fn test_calendar_date_day_first() {
        assert_eq!(resolve("1 Aug 2025"), Some(utc(2025, 8, 1, 0, 0)));
    }

    #[test]
    fn test_calendar_date_with_comma_and_full_month() {
        assert_eq!(resolve("August 1, 2025"), Some(utc(2025, 8, 1, 0, 0)));
    }

    #[test]
    fn test_calendar_date_with_time() {
        assert_eq!(
            resolve("Aug 14 2025 at 9:00 AM"),
            Some(utc(2025, 8, 14, 9, 0))
        );
        assert_eq!(resolve("Aug 14 2025 9:00 am"), Some(utc(2025, 8, 14, 9, 0)));
        assert_eq!(resolve("Aug 14 2025 2pm"), Some(utc(2025, 8, 14, 14, 0)));
    }

    #[test]
    fn test_calendar_date_with_offset_suffix() {
        // Midnight UTC+8 is 16:00 the previous day in UTC.
        assert_eq!(resolve("Aug 1 2025 UTC+8"), Some(utc(2025, 7, 31, 16, 0)));
    }

    #[test]
    fn test_calendar_date_resolves_without_reference() {
        let resolved = NaturalDateResolver.resolve("Aug 1 2025", None, None);
        assert_eq!(resolved, Some(utc(2025, 8, 1, 0, 0)));
    }

    #[test]
    fn test_relative_without_reference_fails() {
        assert_eq!(NaturalDateResolver.resolve("tomorrow", None, None), None);
    }

    #[test]
    fn test_rfc3339_passthrough() {
        assert_eq!(
            resolve("2025-06-15T10:00:00-04:00"),
            Some(utc(2025, 6, 15, 14, 0))
        );
    }

    #[test]
    fn test_iso_date_in_zone() {
        let resolved =
            NaturalDateResolver.resolve("2025-08-14", Some(anchor()), Some("Asia/Taipei"));
        // Midnight in Taipei is 16:00 the previous day in UTC.
        assert_eq!(resolved, Some(utc(2025, 8, 13, 16, 0)));
    }

    #[test]
    fn test_time_only_lands_on_reference_date() {
        assert_eq!(resolve("9:00 AM"), Some(utc(2025, 8, 14, 9, 0)));
        assert_eq!(resolve("14:00"), Some(utc(2025, 8, 14, 14, 0)));
        assert_eq!(resolve("2:30pm"), Some(utc(2025, 8, 14, 14, 30)));
    }

    #[test]
    fn test_time_only_in_zone() {
        let resolved =
            NaturalDateResolver.resolve("9:00 AM", Some(anchor()), Some("Asia/Taipei"));
        // The anchor is already Aug 14 in Taipei; 9:00 local is 1:00 UTC.
        assert_eq!(resolved, Some(utc(2025, 8, 14, 1, 0)));
    }

    #[test]
    fn test_fixed_offset_timezone_identifier() {
        let resolved = NaturalDateResolver.resolve("9:00 AM", Some(anchor()), Some("UTC+8"));
        assert_eq!(resolved, Some(utc(2025, 8, 14, 1, 0)));
    }

    #[test]
    fn test_unknown_timezone_fails() {
        assert_eq!(
            NaturalDateResolver.resolve("9:00 AM", Some(anchor()), Some("Not/AZone")),
            None
        );
    }

    #[test]
    fn test_named_times() {
        assert_eq!(resolve("noon"), Some(utc(2025, 8, 14, 12, 0)));
        assert_eq!(resolve("midnight"), Some(utc(2025, 8, 14, 0, 0)));
        assert_eq!(resolve("eob"), Some(utc(2025, 8, 14, 17, 0)));
    }

    #[test]
    fn test_anchored() {
        assert_eq!(resolve("now"), Some(anchor()));
        assert_eq!(resolve("today"), Some(utc(2025, 8, 14, 0, 0)));
        assert_eq!(resolve("tomorrow"), Some(utc(2025, 8, 15, 0, 0)));
        assert_eq!(resolve("yesterday"), Some(utc(2025, 8, 13, 0, 0)));
    }

    #[test]
    fn test_anchored_with_time() {
        assert_eq!(
            resolve("tomorrow at 10:30am"),
            Some(utc(2025, 8, 15, 10, 30))
        );
        assert_eq!(resolve("today at noon"), Some(utc(2025, 8, 14, 12, 0)));
        assert_eq!(resolve("tomorrow morning"), Some(utc(2025, 8, 15, 9, 0)));
    }

    #[test]
    fn test_weekday_relative() {
        // The anchor is a Thursday.
        assert_eq!(resolve("next friday"), Some(utc(2025, 8, 15, 0, 0)));
        assert_eq!(resolve("next thursday"), Some(utc(2025, 8, 21, 0, 0)));
        assert_eq!(resolve("this monday"), Some(utc(2025, 8, 11, 0, 0)));
        assert_eq!(resolve("last thursday"), Some(utc(2025, 8, 7, 0, 0)));
    }

    #[test]
    fn test_weekday_with_time() {
        assert_eq!(
            resolve("next tuesday at 2pm"),
            Some(utc(2025, 8, 19, 14, 0))
        );
        assert_eq!(resolve("next friday evening"), Some(utc(2025, 8, 15, 18, 0)));
    }

    #[test]
    fn test_period_relative() {
        // ISO weeks: the anchor's week starts Mon Aug 11.
        assert_eq!(resolve("next week"), Some(utc(2025, 8, 18, 0, 0)));
        assert_eq!(resolve("last week"), Some(utc(2025, 8, 4, 0, 0)));
        assert_eq!(resolve("next month"), Some(utc(2025, 9, 1, 0, 0)));
        assert_eq!(resolve("last month"), Some(utc(2025, 7, 1, 0, 0)));
        assert_eq!(resolve("next year"), Some(utc(2026, 1, 1, 0, 0)));
    }

    #[test]
    fn test_natural_offsets() {
        assert_eq!(resolve("in 2 hours"), Some(utc(2025, 8, 14, 2, 0)));
        assert_eq!(resolve("in 3 days"), Some(utc(2025, 8, 17, 0, 0)));
        assert_eq!(resolve("30 minutes ago"), Some(utc(2025, 8, 13, 23, 30)));
        assert_eq!(resolve("a week from now"), Some(utc(2025, 8, 21, 0, 0)));
    }

    #[test]
    fn test_duration_offsets() {
        assert_eq!(resolve("+2h"), Some(utc(2025, 8, 14, 2, 0)));
        assert_eq!(resolve("-1d12h"), Some(utc(2025, 8, 12, 12, 0)));
    }

    #[test]
    fn test_overflowing_offsets_fail() {
        assert_eq!(resolve("in 9000000000000000 hours"), None);
        assert_eq!(resolve("9000000000000000 hours ago"), None);
        assert_eq!(resolve("a week from now -> in 9223372036854775807 weeks"), None);
        assert_eq!(resolve("+9000000000000000h"), None);
        assert_eq!(resolve("-9223372036854775807s"), None);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(resolve("Next FRIDAY at 2PM"), Some(utc(2025, 8, 15, 14, 0)));
    }

    #[test]
    fn test_chain_resolves_left_to_right() {
        assert_eq!(
            resolve("Aug 1 2025 -> in 2 days -> in 3 hours"),
            Some(utc(2025, 8, 3, 3, 0))
        );
    }

    #[test]
    fn test_chain_anchors_follow_segment_results() {
        // "tomorrow" resolves against Aug 1, not against the original anchor.
        assert_eq!(
            resolve("Aug 1 2025 -> tomorrow -> 9:00 am"),
            Some(utc(2025, 8, 2, 9, 0))
        );
    }

    #[test]
    fn test_chain_with_failing_segment_fails() {
        assert_eq!(resolve("Aug 1 2025 -> gobbledygook"), None);
        assert_eq!(resolve("Aug 1 2025 ->"), None);
    }

    #[test]
    fn test_empty_expression_fails() {
        assert_eq!(resolve(""), None);
        assert_eq!(resolve("   "), None);
    }

    #[test]
    fn test_unparseable_fails() {
        assert_eq!(resolve("every 6 months"), None);
        assert_eq!(resolve("gobbledygook"), None);
    }
}
