//! Date parsing and display helpers shared by the CLI and the TUI.

use chrono::{Datelike, Duration, Local, NaiveDate};

use crate::fields::Field;
use crate::task::Task;

/// Wire format of `dueDay`.
pub const DUE_FORMAT: &str = "%Y-%m-%d";

/// Parse human-readable due date input.
///
/// Supports:
/// - "today", "tomorrow", "yesterday"
/// - "monday", "next monday", "this friday", etc.
/// - "eow" / "end of week", "eom" / "end of month"
/// - "in 3d", "in 2w", "in 1m"
/// - "YYYY-MM-DD"
pub fn parse_due_input(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();

    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return Some(today + Duration::days(1)),
        "yesterday" => return Some(today - Duration::days(1)),
        "end of week" | "eow" => {
            let (_, end) = start_end_of_week(today);
            return Some(end);
        }
        "end of month" | "eom" => {
            let (year, month) = if today.month() == 12 {
                (today.year() + 1, 1)
            } else {
                (today.year(), today.month() + 1)
            };
            let first_of_next = NaiveDate::from_ymd_opt(year, month, 1)?;
            return Some(first_of_next - Duration::days(1));
        }
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("in ") {
        let rest = rest.trim();
        let split = rest.char_indices().last().map_or(0, |(idx, _)| idx);
        let (count, unit) = rest.split_at(split);
        if let Ok(n) = count.trim().parse::<i64>() {
            // Offsets past chrono's range are treated as unparseable.
            let offset = match unit {
                "d" => Duration::try_days(n),
                "w" => Duration::try_weeks(n),
                // Approximate: 30 days per month
                "m" => n.checked_mul(30).and_then(Duration::try_days),
                _ => None,
            };
            if let Some(offset) = offset {
                return today.checked_add_signed(offset);
            }
            if matches!(unit, "d" | "w" | "m") {
                return None;
            }
        }
    }

    const WEEKDAYS: [(&str, &str); 7] = [
        ("monday", "mon"),
        ("tuesday", "tue"),
        ("wednesday", "wed"),
        ("thursday", "thu"),
        ("friday", "fri"),
        ("saturday", "sat"),
        ("sunday", "sun"),
    ];
    let (next, name) = match s.strip_prefix("next ") {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix("this ").unwrap_or(&s)),
    };
    if let Some(target) = WEEKDAYS.iter().position(|(long, short)| name == *long || name == *short) {
        let current = today.weekday().num_days_from_monday() as i64;
        let mut ahead = (target as i64 + 7 - current) % 7;
        if next {
            ahead += 7;
        }
        return Some(today + Duration::days(ahead));
    }

    NaiveDate::parse_from_str(&s, DUE_FORMAT).ok()
}

/// Monday and Sunday of the ISO week containing `today`.
pub fn start_end_of_week(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let weekday = today.weekday().num_days_from_monday() as i64;
    let start = today - Duration::days(weekday);
    (start, start + Duration::days(6))
}

/// Relative hint for a due day ("today", "tomorrow", "in 3d", "2d late").
/// Values that are not ISO dates are shown unchanged.
pub fn format_due_relative(due_day: &str, today: NaiveDate) -> String {
    if due_day.is_empty() {
        return "-".into();
    }
    let Ok(due) = NaiveDate::parse_from_str(due_day, DUE_FORMAT) else {
        return due_day.to_string();
    };
    let days = (due - today).num_days();
    match days {
        0 => "today".into(),
        1 => "tomorrow".into(),
        d if d > 1 => format!("in {d}d"),
        d => format!("{}d late", -d),
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}

/// Print tasks as a table.
pub fn print_table(tasks: &[Task]) {
    println!(
        "{:<8} {:<12} {:<10} {:<6} {:<8} {:<14} {}",
        "ID", "Due", "When", "Finish", "Priority", "Category", "Title"
    );
    let today = Local::now().date_naive();
    for t in tasks {
        let id = t.id.as_ref().map(|id| id.to_string()).unwrap_or_else(|| "-".into());
        println!(
            "{:<8} {:<12} {:<10} {:<6} {:<8} {:<14} {}",
            truncate(&id, 8),
            truncate(or_dash(&t.fields.due_day), 12),
            format_due_relative(&t.fields.due_day, today),
            or_dash(&t.fields.finish),
            or_dash(&t.fields.priority),
            truncate(or_dash(&t.fields.category), 14),
            t.fields.title,
        );
    }
}

/// Print one task as a card.
pub fn print_card(task: &Task) {
    let id = task.id.as_ref().map(|id| id.to_string()).unwrap_or_else(|| "-".into());
    println!("Task #{id}");
    for field in Field::ALL {
        println!("  {:<9} {}", format!("{}:", field.label()), or_dash(task.fields.get(field)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_keywords_and_offsets() {
        // 2024-01-03 is a Wednesday.
        let today = day(2024, 1, 3);
        assert_eq!(parse_due_input("today", today), Some(today));
        assert_eq!(parse_due_input("Tomorrow", today), Some(day(2024, 1, 4)));
        assert_eq!(parse_due_input("in 3d", today), Some(day(2024, 1, 6)));
        assert_eq!(parse_due_input("in 2w", today), Some(day(2024, 1, 17)));
        assert_eq!(parse_due_input("eow", today), Some(day(2024, 1, 7)));
        assert_eq!(parse_due_input("eom", today), Some(day(2024, 1, 31)));
        assert_eq!(parse_due_input("eom", day(2024, 12, 5)), Some(day(2024, 12, 31)));
    }

    #[test]
    fn out_of_range_offsets_are_rejected() {
        let today = day(2024, 1, 3);
        assert_eq!(parse_due_input("in -3d", today), Some(day(2023, 12, 31)));
        assert_eq!(parse_due_input("in 100000000d", today), None);
        assert_eq!(parse_due_input("in -100000000d", today), None);
        assert_eq!(parse_due_input("in 9223372036854775807d", today), None);
        assert_eq!(parse_due_input("in 100000000000000w", today), None);
        assert_eq!(parse_due_input("in 400000000000000000m", today), None);
        assert_eq!(parse_due_input("in -400000000000000000m", today), None);
    }

    #[test]
    fn parses_weekdays() {
        let today = day(2024, 1, 3);
        assert_eq!(parse_due_input("friday", today), Some(day(2024, 1, 5)));
        assert_eq!(parse_due_input("wed", today), Some(today));
        assert_eq!(parse_due_input("next wed", today), Some(day(2024, 1, 10)));
        assert_eq!(parse_due_input("this mon", today), Some(day(2024, 1, 8)));
    }

    #[test]
    fn parses_iso_and_rejects_garbage() {
        let today = day(2024, 1, 3);
        assert_eq!(parse_due_input("2024-02-02", today), Some(day(2024, 2, 2)));
        assert_eq!(parse_due_input("someday", today), None);
        assert_eq!(parse_due_input("in xd", today), None);
    }

    #[test]
    fn relative_due_display() {
        let today = day(2024, 1, 3);
        assert_eq!(format_due_relative("", today), "-");
        assert_eq!(format_due_relative("2024-01-03", today), "today");
        assert_eq!(format_due_relative("2024-01-04", today), "tomorrow");
        assert_eq!(format_due_relative("2024-01-10", today), "in 7d");
        assert_eq!(format_due_relative("2024-01-01", today), "2d late");
        assert_eq!(format_due_relative("next week", today), "next week");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate("short", 8), "short");
        assert_eq!(truncate("much too long", 5), "much…");
    }
}
