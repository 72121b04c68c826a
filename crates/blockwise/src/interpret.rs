//! Per-field interpretation: one [`Field`] → one typed attribute update.
//!
//! Dispatch is on the key after trimming and lowercasing; the raw key's
//! casing and whitespace only survive into error messages. Values keep their
//! casing and whitespace except where a field's semantics say otherwise.

use std::collections::BTreeSet;

use crate::block::{Action, ScheduleEntry};
use crate::error::{BlockError, Result};
use crate::tokenize::Field;

/// One block attribute produced from one field. Folding a sequence of
/// updates is last-write-wins per attribute: a later field with the same
/// normalized key fully replaces the earlier value, never merges with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Title(String),
    Notes(String),
    Tags(BTreeSet<String>),
    Tasks(Vec<String>),
    Timezone(String),
    Schedule(Vec<ScheduleEntry>),
}

/// Interpret a single field into its attribute update.
///
/// Pure: interpreting the same field twice yields the same update.
///
/// # Per-key behavior
///
/// - `title`, `notes` — value passed through unmodified (no trim)
/// - `tags` — comma-separated, pieces trimmed, empties dropped, collected
///   into a set (case preserved)
/// - `tasks` — newline-separated, blank lines dropped, remaining lines kept
///   verbatim in order
/// - `timezone` — trimmed and stored as-is
/// - `schedule` — see [`parse_schedule`]
///
/// # Errors
///
/// [`BlockError::InvalidKey`] naming the original un-normalized key, or
/// [`BlockError::InvalidAction`] from schedule parsing.
pub fn interpret(field: &Field) -> Result<FieldUpdate> {
    match field.key.trim().to_lowercase().as_str() {
        "title" => Ok(FieldUpdate::Title(field.value.clone())),
        "notes" => Ok(FieldUpdate::Notes(field.value.clone())),
        "tags" => Ok(FieldUpdate::Tags(
            field
                .value
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect(),
        )),
        "tasks" => Ok(FieldUpdate::Tasks(
            field
                .value
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(str::to_string)
                .collect(),
        )),
        "timezone" => Ok(FieldUpdate::Timezone(field.value.trim().to_string())),
        "schedule" => Ok(FieldUpdate::Schedule(parse_schedule(&field.value)?)),
        _ => Err(BlockError::InvalidKey(field.key.clone())),
    }
}

/// Parse a schedule value into ordered entries.
///
/// Each non-blank line is trimmed and split at the first whitespace: the
/// leading token is the action (exactly `set` or `end`, case-sensitive), the
/// trimmed remainder is the date expression. No remainder means the entry is
/// untimed.
pub fn parse_schedule(value: &str) -> Result<Vec<ScheduleEntry>> {
    value
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let (token, remainder) = match line.split_once(char::is_whitespace) {
                Some((token, rest)) => (token, rest.trim()),
                None => (line, ""),
            };
            let action = match token {
                "set" => Action::Set,
                "end" => Action::End,
                other => return Err(BlockError::InvalidAction(other.to_string())),
            };
            let date_expression = (!remainder.is_empty()).then(|| remainder.to_string());
            Ok(ScheduleEntry {
                action,
                date_expression,
            })
        })
        .collect()
}
