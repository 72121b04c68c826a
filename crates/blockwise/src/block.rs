//! The block record and the full text → [`Block`] parse pipeline.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::error::{BlockError, Result};
use crate::evaluate::{evaluate, ScheduleState};
use crate::interpret::{interpret, FieldUpdate};
use crate::resolve::DateResolver;
use crate::tokenize::tokenize;
use crate::vars::substitute;

/// What a schedule event does when it takes effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Activates the block.
    Set,
    /// Deactivates the block.
    End,
}

/// One schedule event: an action and an optional date expression.
///
/// Source order is significant and preserved. `date_expression: None` means
/// the event is always in effect once the evaluator reaches it (no temporal
/// gate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry {
    pub action: Action,
    pub date_expression: Option<String>,
}

/// One schedulable unit of work, parsed from block text.
///
/// Built once per parse and immutable thereafter. `title` and `schedule` are
/// required; the rest default to absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    /// Required. Kept verbatim, including surrounding whitespace.
    pub title: String,
    pub notes: Option<String>,
    /// Unique, order-irrelevant, case preserved.
    pub tags: Option<BTreeSet<String>>,
    /// Ordered, lines kept verbatim.
    pub tasks: Option<Vec<String>>,
    /// IANA name or UTC-offset identifier, passed to the date resolver.
    pub timezone: Option<String>,
    /// Required, may be empty.
    pub schedule: Vec<ScheduleEntry>,
}

impl Block {
    /// Parse block text into a [`Block`].
    ///
    /// Variable substitution runs over the whole text first, then the text is
    /// tokenized and every field's update is folded into a partial record
    /// where a later field with the same normalized key fully replaces the
    /// earlier value (last-occurrence-wins, field-by-field).
    ///
    /// # Errors
    ///
    /// Any tokenizer, interpreter, or substitution error, plus
    /// [`BlockError::MissingRequiredField`] when `title` or `schedule` never
    /// appeared.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use blockwise::Block;
    ///
    /// let block = Block::parse(
    ///     "title: Standup\nschedule: \"\"\"\nset 9:00 am\nend 9:15 am\n\"\"\"",
    ///     &HashMap::new(),
    /// )
    /// .unwrap();
    /// assert_eq!(block.title, " Standup");
    /// assert_eq!(block.schedule.len(), 2);
    /// ```
    pub fn parse(text: &str, variables: &HashMap<String, String>) -> Result<Block> {
        let text = substitute(text, variables)?;

        let mut partial = PartialBlock::default();
        for field in tokenize(&text) {
            partial.apply(interpret(&field?)?);
        }

        let block = partial.finish()?;
        debug!(
            title = block.title.trim(),
            entries = block.schedule.len(),
            "parsed block"
        );
        Ok(block)
    }

    /// Evaluate this block's schedule at `evaluation_instant`, resolving date
    /// expressions against `relative_base` in the block's own timezone.
    pub fn is_active_at<R: DateResolver + ?Sized>(
        &self,
        resolver: &R,
        relative_base: DateTime<Utc>,
        evaluation_instant: DateTime<Utc>,
    ) -> Result<ScheduleState> {
        evaluate(
            &self.schedule,
            resolver,
            relative_base,
            evaluation_instant,
            self.timezone.as_deref(),
        )
    }
}

/// Accumulator for folding field updates. Each setter overwrites its slot;
/// the field set is fixed, so no dynamic map is needed.
#[derive(Debug, Default)]
struct PartialBlock {
    title: Option<String>,
    notes: Option<String>,
    tags: Option<BTreeSet<String>>,
    tasks: Option<Vec<String>>,
    timezone: Option<String>,
    schedule: Option<Vec<ScheduleEntry>>,
}

impl PartialBlock {
    fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Title(value) => self.title = Some(value),
            FieldUpdate::Notes(value) => self.notes = Some(value),
            FieldUpdate::Tags(value) => self.tags = Some(value),
            FieldUpdate::Tasks(value) => self.tasks = Some(value),
            FieldUpdate::Timezone(value) => self.timezone = Some(value),
            FieldUpdate::Schedule(value) => self.schedule = Some(value),
        }
    }

    fn finish(self) -> Result<Block> {
        Ok(Block {
            title: self
                .title
                .ok_or(BlockError::MissingRequiredField("title"))?,
            schedule: self
                .schedule
                .ok_or(BlockError::MissingRequiredField("schedule"))?,
            notes: self.notes,
            tags: self.tags,
            tasks: self.tasks,
            timezone: self.timezone,
        })
    }
}
