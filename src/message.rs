use std::time::Duration;

use chrono::{DateTime, Utc};

struct Unit {
    millis: u128,
    singular: &'static str,
    plural: &'static str,
}

const SECOND: u128 = 1_000;
const MINUTE: u128 = 60 * SECOND;
const HOUR: u128 = 60 * MINUTE;
const DAY: u128 = 24 * HOUR;

const UNITS: [Unit; 7] = [
    Unit {
        millis: 365 * DAY,
        singular: "yr",
        plural: "yr",
    },
    Unit {
        millis: 30 * DAY,
        singular: "mo",
        plural: "mo",
    },
    Unit {
        millis: DAY,
        singular: "day",
        plural: "days",
    },
    Unit {
        millis: HOUR,
        singular: "hr",
        plural: "hr",
    },
    Unit {
        millis: MINUTE,
        singular: "min",
        plural: "min",
    },
    Unit {
        millis: SECOND,
        singular: "sec",
        plural: "sec",
    },
    Unit {
        millis: 1,
        singular: "ms",
        plural: "ms",
    },
];

impl Unit {
    fn render(&self, count: u128) -> String {
        let label = if count == 1 { self.singular } else { self.plural };
        format!("{count} {label}")
    }
}

/// Renders a finished span as its two largest non-zero units, largest first:
/// "3 min 12 sec", "1 hr 5 sec", "2 days". A zero span is "0 ms".
pub fn time_span(elapsed: Duration) -> String {
    let mut remaining = elapsed.as_millis();
    let mut parts = Vec::with_capacity(2);
    for unit in &UNITS {
        let count = remaining / unit.millis;
        remaining %= unit.millis;
        if count > 0 {
            parts.push(unit.render(count));
            if parts.len() == 2 {
                break;
            }
        }
    }

    if parts.is_empty() {
        return UNITS[UNITS.len() - 1].render(0);
    }
    parts.join(" ")
}

/// Wall-clock time from build start until `now`. Clock skew never yields a
/// negative span.
pub fn elapsed_since(started_at: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (now - started_at).to_std().unwrap_or(Duration::ZERO)
}

pub fn compose(build_number: u64, verb: &str, elapsed: Duration) -> String {
    format!("Build #{build_number} {verb} in {}", time_span(elapsed))
}
