//! Recorded hint traces, replayed through a router for tuning and debugging.
//!
//! One event per line: `<offset_ms> <kind> [payload]`, where `kind` is
//! `interaction`, `launch` or a raw hint number. Blank lines and `#` comments
//! are ignored.

use std::time::{Duration, Instant};

use crate::{
    error::{Error, Result},
    perf::BoostBackend,
    power::{HintStatus, PowerHint, PowerHintRouter, POWER_HINT_INTERACTION, POWER_HINT_LAUNCH},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceEvent {
    pub offset: Duration,
    pub hint: PowerHint,
}

fn parse_kind(tok: &str) -> Option<u32> {
    match tok {
        "interaction" => Some(POWER_HINT_INTERACTION),
        "launch" => Some(POWER_HINT_LAUNCH),
        _ => tok
            .strip_prefix("0x")
            .map_or_else(|| tok.parse().ok(), |hex| u32::from_str_radix(hex, 16).ok()),
    }
}

pub fn parse_line(line: &str, lineno: usize) -> Result<Option<TraceEvent>> {
    let line = line.split('#').next().unwrap_or("").trim();
    if line.is_empty() {
        return Ok(None);
    }

    let bad = |reason: String| Error::InvalidEvent { line: lineno, reason };
    let mut toks = line.split_whitespace();

    let offset = toks
        .next()
        .and_then(|t| t.parse::<u64>().ok())
        .ok_or_else(|| bad(format!("bad offset in {:?}", line)))?;
    let kind_tok = toks.next().ok_or_else(|| bad("missing hint kind".to_string()))?;
    let kind = parse_kind(kind_tok).ok_or_else(|| bad(format!("unknown hint {:?}", kind_tok)))?;
    let payload = match toks.next() {
        Some(t) => Some(t.parse::<i32>().map_err(|_| bad(format!("bad payload {:?}", t)))?),
        None => None,
    };
    if let Some(extra) = toks.next() {
        return Err(bad(format!("trailing token {:?}", extra)));
    }

    Ok(Some(TraceEvent {
        offset: Duration::from_millis(offset),
        hint: PowerHint::from_raw(kind, payload),
    }))
}

pub fn parse_trace(text: &str) -> Result<Vec<TraceEvent>> {
    let mut out = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if let Some(ev) = parse_line(line, i + 1)? {
            out.push(ev);
        }
    }
    Ok(out)
}

/// Feeds `events` to the router with timestamps relative to `start`.
pub fn replay<B: BoostBackend>(
    router: &PowerHintRouter<B>,
    events: &[TraceEvent],
    start: Instant,
) -> Vec<(TraceEvent, HintStatus)> {
    events
        .iter()
        .map(|ev| (*ev, router.dispatch_at(ev.hint, start + ev.offset)))
        .collect()
}
