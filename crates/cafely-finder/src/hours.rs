//! Interpreter for the OSM `opening_hours` tag.
//!
//! Handles the subset of the syntax cafés use in practice: `24/7`, weekday
//! selectors (`Mo-Fr`, `Sa,Su`, wrapping `Fr-Mo`), time spans including
//! overnight ones (`18:00-02:00`, `22:00-26:00`) and open ends (`18:00+`),
//! the `open`/`off`/`closed`/`unknown` modifiers, quoted comments, `;`
//! (overriding) and `, ` (additional) rule separators. Holiday selectors
//! (`PH`, `SH`) never match. Month, week and date selectors are reported as
//! unsupported.
//!
//! Interpretation never fails: anything unparseable degrades to
//! [`HoursStatus::NoData`] with the reason in [`OpeningHours::error`].

use std::fmt::Display;
use std::sync::LazyLock;

use chrono::{DateTime, Datelike, Local, NaiveTime, TimeDelta, TimeZone, Timelike};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MINUTES_PER_DAY: i64 = 1_440;
/// Latest accepted span end, `48:00`.
const MAX_SPAN_END: i64 = 2 * MINUTES_PER_DAY;
/// Transitions further away than this are reported as not computable.
const LOOKAHEAD_MINUTES: i64 = 7 * MINUTES_PER_DAY;

const WEEKDAY_CODES: [&str; 7] = ["mo", "tu", "we", "th", "fr", "sa", "su"];

static WEEKDAY_LIST_GAP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(Mo|Tu|We|Th|Fr|Sa|Su|PH|SH)\s*,\s*(Mo|Tu|We|Th|Fr|Sa|Su|PH|SH)\b")
        .expect("valid regex")
});
static TIME_LIST_GAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d|\+)\s*,\s*(\d)").expect("valid regex"));
static TIME_RANGE_GAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)\s*-\s*(\d)").expect("valid regex"));
static ADDITIONAL_RULE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s+").expect("valid regex"));
static TIME_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}):(\d{2})(?:-(\d{1,2}):(\d{2})|(\+))$").expect("valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoursStatus {
    #[serde(rename = "Open now")]
    OpenNow,
    #[serde(rename = "Closed")]
    Closed,
    #[serde(rename = "No data")]
    NoData,
}

impl HoursStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            HoursStatus::OpenNow => "Open now",
            HoursStatus::Closed => "Closed",
            HoursStatus::NoData => "No data",
        }
    }
}

impl Display for HoursStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of interpreting an `opening_hours` value at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningHours {
    /// The tag value as received.
    pub raw: Option<String>,
    pub is_open_now: Option<bool>,
    pub status: HoursStatus,
    /// RFC 3339 instant of the next open/closed transition, when one falls
    /// within the coming week.
    pub next_change: Option<String>,
    /// Why the value could not be interpreted.
    pub error: Option<String>,
}

impl OpeningHours {
    fn no_data(raw: Option<&str>, error: Option<String>) -> Self {
        Self {
            raw: raw.map(str::to_owned),
            is_open_now: None,
            status: HoursStatus::NoData,
            next_change: None,
            error,
        }
    }
}

/// Interpret `raw` against the current local time.
#[must_use]
pub fn interpret(raw: Option<&str>) -> OpeningHours {
    interpret_at(raw, &Local::now())
}

/// Interpret `raw` against `now`, in `now`'s time zone.
#[must_use]
pub fn interpret_at<Tz>(raw: Option<&str>, now: &DateTime<Tz>) -> OpeningHours
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let Some(value) = raw.filter(|s| !s.trim().is_empty()) else {
        return OpeningHours::no_data(raw, None);
    };

    let schedule = match parse_schedule(value) {
        Ok(schedule) => schedule,
        Err(err) => {
            tracing::debug!(opening_hours = value, error = %err, "unparseable opening_hours");
            return OpeningHours::no_data(raw, Some(err.to_string()));
        }
    };

    let weekday = now.weekday().num_days_from_monday() as usize;
    let now_minute = i64::from(now.hour()) * 60 + i64::from(now.minute());
    let (is_open, change_minute) = schedule.evaluate(weekday, now_minute);

    let next_change = change_minute.and_then(|minute| {
        let midnight = now.date_naive().and_time(NaiveTime::MIN);
        let naive = midnight.checked_add_signed(TimeDelta::minutes(minute))?;
        now.timezone()
            .from_local_datetime(&naive)
            .earliest()
            .map(|instant| instant.to_rfc3339())
    });

    OpeningHours {
        raw: Some(value.to_owned()),
        is_open_now: Some(is_open),
        status: if is_open {
            HoursStatus::OpenNow
        } else {
            HoursStatus::Closed
        },
        next_change,
        error: None,
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum HoursParseError {
    #[error("unterminated comment")]
    UnterminatedComment,

    #[error("unsupported selector \"{0}\"")]
    Unsupported(String),

    #[error("invalid time span \"{0}\"")]
    InvalidTime(String),

    #[error("more than one {what} in rule \"{rule}\"")]
    Duplicate { what: &'static str, rule: String },

    #[error("no rule applies to regular weekdays")]
    NoApplicableRules,
}

/// Minutes from the start of the rule's day; `end` may pass midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    start: i64,
    end: i64,
}

const FULL_DAY: Span = Span {
    start: 0,
    end: MINUTES_PER_DAY,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleState {
    Open,
    Closed,
}

#[derive(Debug)]
struct Rule {
    days: [bool; 7],
    spans: Option<Vec<Span>>,
    state: RuleState,
}

/// Open spans per weekday, Monday first.
#[derive(Debug, Default, PartialEq, Eq)]
struct WeekSchedule {
    days: [Vec<Span>; 7],
}

impl WeekSchedule {
    fn apply(&mut self, rule: &Rule, additional: bool) {
        let spans = match rule.state {
            RuleState::Closed => Vec::new(),
            RuleState::Open => rule.spans.clone().unwrap_or_else(|| vec![FULL_DAY]),
        };

        for (day, selected) in rule.days.iter().enumerate() {
            if !selected {
                continue;
            }
            match (additional, rule.state, rule.spans.as_deref()) {
                (true, RuleState::Open, _) => self.days[day].extend_from_slice(&spans),
                (true, RuleState::Closed, Some(closed)) => {
                    self.days[day] = subtract_spans(&self.days[day], closed);
                }
                _ => self.days[day].clone_from(&spans),
            }
        }
    }

    /// Open state at `now_minute` of the day `weekday` (0 = Monday), and the
    /// minute offset from that day's midnight of the next transition.
    fn evaluate(&self, weekday: usize, now_minute: i64) -> (bool, Option<i64>) {
        // Yesterday is included so overnight spans reach into today.
        let mut intervals: Vec<(i64, i64)> = Vec::new();
        for offset in -1i64..=8 {
            let day = (weekday as i64 + offset).rem_euclid(7) as usize;
            let base = offset * MINUTES_PER_DAY;
            intervals.extend(
                self.days[day]
                    .iter()
                    .map(|span| (base + span.start, base + span.end)),
            );
        }
        intervals.sort_unstable();

        let mut merged: Vec<(i64, i64)> = Vec::with_capacity(intervals.len());
        for (start, end) in intervals {
            match merged.last_mut() {
                Some(last) if start <= last.1 => last.1 = last.1.max(end),
                _ => merged.push((start, end)),
            }
        }

        let horizon = now_minute + LOOKAHEAD_MINUTES;
        if let Some(&(_, end)) = merged
            .iter()
            .find(|(start, end)| *start <= now_minute && now_minute < *end)
        {
            return (true, (end <= horizon).then_some(end));
        }

        let next_open = merged
            .iter()
            .map(|(start, _)| *start)
            .find(|start| *start > now_minute && *start <= horizon);
        (false, next_open)
    }
}

/// Removes every `closed` span from `open`, splitting spans that straddle one.
fn subtract_spans(open: &[Span], closed: &[Span]) -> Vec<Span> {
    let mut remaining = open.to_vec();
    for cut in closed {
        remaining = remaining
            .into_iter()
            .flat_map(|span| {
                if cut.end <= span.start || span.end <= cut.start {
                    return vec![span];
                }
                let before = Span {
                    start: span.start,
                    end: cut.start,
                };
                let after = Span {
                    start: cut.end,
                    end: span.end,
                };
                [before, after]
                    .into_iter()
                    .filter(|piece| piece.start < piece.end)
                    .collect()
            })
            .collect();
    }
    remaining
}

fn parse_schedule(raw: &str) -> Result<WeekSchedule, HoursParseError> {
    let text = strip_comments(raw)?;
    let text = normalise_lists(&text);

    let mut schedule = WeekSchedule::default();
    let mut applied = false;

    for normal_rule in text.split(';').flat_map(|part| part.split("||")) {
        let normal_rule = normal_rule.trim();
        if normal_rule.is_empty() {
            continue;
        }
        for (index, part) in ADDITIONAL_RULE_SEPARATOR.split(normal_rule).enumerate() {
            if let Some(rule) = parse_rule(part.trim())? {
                schedule.apply(&rule, index > 0);
                applied = true;
            }
        }
    }

    if applied {
        Ok(schedule)
    } else {
        Err(HoursParseError::NoApplicableRules)
    }
}

fn strip_comments(raw: &str) -> Result<String, HoursParseError> {
    let mut out = String::with_capacity(raw.len());
    let mut in_comment = false;
    for c in raw.chars() {
        if c == '"' {
            in_comment = !in_comment;
        } else if !in_comment {
            out.push(c);
        }
    }
    if in_comment {
        return Err(HoursParseError::UnterminatedComment);
    }
    Ok(out)
}

/// Closes up `Mo, We`, `08:00 - 12:00` and `08:00-12:00, 13:00-18:00` so
/// that a remaining comma-plus-space always separates additional rules.
fn normalise_lists(text: &str) -> String {
    let ranges = TIME_RANGE_GAP.replace_all(text, "$1-$2");
    let mut current = TIME_LIST_GAP.replace_all(&ranges, "$1,$2").into_owned();
    loop {
        let next = WEEKDAY_LIST_GAP.replace_all(&current, "$1,$2").into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Parses one rule. Returns `None` for rules that only select holidays.
fn parse_rule(rule: &str) -> Result<Option<Rule>, HoursParseError> {
    if rule.is_empty() {
        return Ok(None);
    }

    let mut days: Option<([bool; 7], bool)> = None;
    let mut spans: Option<Vec<Span>> = None;
    let mut state: Option<RuleState> = None;

    let duplicate = |what: &'static str| HoursParseError::Duplicate {
        what,
        rule: rule.to_owned(),
    };

    for token in rule.split_whitespace() {
        let token = token.trim_end_matches(':');
        if token.is_empty() {
            continue;
        }

        if token == "24/7" {
            if days.is_some() || spans.is_some() {
                return Err(duplicate("selector"));
            }
            days = Some(([true; 7], false));
            spans = Some(vec![FULL_DAY]);
        } else if let Some(modifier) = parse_modifier(token) {
            if state.replace(modifier).is_some() {
                return Err(duplicate("modifier"));
            }
        } else if let Some(selected) = parse_weekdays(token) {
            if days.replace(selected).is_some() {
                return Err(duplicate("weekday selector"));
            }
        } else if let Some(parsed) = parse_time_spans(token)? {
            if spans.replace(parsed).is_some() {
                return Err(duplicate("time selector"));
            }
        } else {
            return Err(HoursParseError::Unsupported(token.to_owned()));
        }
    }

    let days = match days {
        None => [true; 7],
        Some((selected, has_holiday)) => {
            if !selected.iter().any(|d| *d) && has_holiday {
                return Ok(None);
            }
            selected
        }
    };

    Ok(Some(Rule {
        days,
        spans,
        state: state.unwrap_or(RuleState::Open),
    }))
}

fn parse_modifier(token: &str) -> Option<RuleState> {
    match token.to_ascii_lowercase().as_str() {
        "open" => Some(RuleState::Open),
        "off" | "closed" | "unknown" => Some(RuleState::Closed),
        _ => None,
    }
}

fn weekday_index(code: &str) -> Option<usize> {
    let lower = code.to_ascii_lowercase();
    WEEKDAY_CODES.iter().position(|c| *c == lower)
}

fn is_holiday(code: &str) -> bool {
    code.eq_ignore_ascii_case("ph") || code.eq_ignore_ascii_case("sh")
}

/// Parses `Mo-Fr,Su,PH` into selected weekdays and a holiday flag.
fn parse_weekdays(token: &str) -> Option<([bool; 7], bool)> {
    let mut selected = [false; 7];
    let mut has_holiday = false;

    for item in token.split(',') {
        if is_holiday(item) {
            has_holiday = true;
            continue;
        }
        match item.split_once('-') {
            Some((from, to)) => {
                let from = weekday_index(from)?;
                let to = weekday_index(to)?;
                let mut day = from;
                loop {
                    selected[day] = true;
                    if day == to {
                        break;
                    }
                    day = (day + 1) % 7;
                }
            }
            None => selected[weekday_index(item)?] = true,
        }
    }

    Some((selected, has_holiday))
}

/// Parses `08:00-12:00,13:00-18:00`. Returns `Ok(None)` when the token is
/// not shaped like a time selector at all.
fn parse_time_spans(token: &str) -> Result<Option<Vec<Span>>, HoursParseError> {
    if !token.starts_with(|c: char| c.is_ascii_digit()) {
        return Ok(None);
    }

    let mut spans = Vec::new();
    for item in token.split(',') {
        let caps = TIME_SPAN
            .captures(item)
            .ok_or_else(|| HoursParseError::InvalidTime(item.to_owned()))?;

        let minute_of = |h: usize, m: usize| -> Option<i64> {
            let hours: i64 = caps.get(h)?.as_str().parse().ok()?;
            let minutes: i64 = caps.get(m)?.as_str().parse().ok()?;
            (minutes < 60).then_some(hours * 60 + minutes)
        };

        let start = minute_of(1, 2)
            .filter(|s| *s < MINUTES_PER_DAY)
            .ok_or_else(|| HoursParseError::InvalidTime(item.to_owned()))?;

        let end = if caps.get(5).is_some() {
            MINUTES_PER_DAY
        } else {
            let mut end = minute_of(3, 4)
                .filter(|e| *e <= MAX_SPAN_END)
                .ok_or_else(|| HoursParseError::InvalidTime(item.to_owned()))?;
            if end <= start {
                end += MINUTES_PER_DAY;
            }
            end
        };

        spans.push(Span { start, end });
    }

    Ok(Some(spans))
}

#[cfg(test)]
#[path = "hours_test.rs"]
mod tests;
