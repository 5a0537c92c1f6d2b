/**
 * Prompt Builder
 *
 * Builds the system instruction sent with every user prompt. The text embeds
 * the current day in the reference timezone (UTC+7), the next two days, a
 * pre-resolved table of weekday names, the JSON schema the model must emit,
 * and rules for Indonesian and English relative dates.
 *
 * The builder is a pure function of the instant it is given. Its output is
 * only read by the model, never parsed here.
 */

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc, Weekday};

use crate::shared::dates::today_in_reference;

/// Weekdays in the order the week is counted (Monday first)
const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Indonesian weekday name
pub fn indonesian_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Senin",
        Weekday::Tue => "Selasa",
        Weekday::Wed => "Rabu",
        Weekday::Thu => "Kamis",
        Weekday::Fri => "Jumat",
        Weekday::Sat => "Sabtu",
        Weekday::Sun => "Minggu",
    }
}

/// English weekday name
pub fn english_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Resolve a bare weekday name against `today`
///
/// A weekday still ahead in the current (Monday-first) week resolves within
/// this week. One that has already passed, or today's own weekday, rolls over
/// to next week, so the result is always 1 to 7 days after `today`.
///
/// ```text
/// today = Sunday 2025-03-02, "Saturday" -> 2025-03-08 (+6)
/// today = Wednesday 2025-03-05, "Friday" -> 2025-03-07 (+2)
/// today = Wednesday 2025-03-05, "Monday" -> 2025-03-10 (+5)
/// today = Wednesday 2025-03-05, "Wednesday" -> 2025-03-12 (+7)
/// ```
pub fn resolve_weekday(today: NaiveDate, target: Weekday) -> NaiveDate {
    let today_idx = today.weekday().num_days_from_monday();
    let target_idx = target.num_days_from_monday();
    let offset = if target_idx > today_idx {
        target_idx - today_idx
    } else {
        7 - (today_idx - target_idx)
    };
    plus_days(today, u64::from(offset))
}

fn plus_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(date)
}

fn describe(date: NaiveDate) -> String {
    let day = date.weekday();
    format!(
        "{} ({}), {}",
        indonesian_name(day),
        english_name(day),
        date.format("%Y-%m-%d")
    )
}

const SCHEMA: &str = r#"{
  "type": "activity" | "note" | "none",
  "message": string,
  "warnings": string[],
  "activities": [
    {
      "title": string,
      "description": string | null,
      "type": "task" | "schedule",
      "date": "YYYY-MM-DD",
      "startTime": "HH:MM" | null,
      "endTime": "HH:MM" | null,
      "priority": "low" | "medium" | "high" | null,
      "linkUrl": string | null,
      "status": "pending"
    }
  ],
  "notes": [
    {
      "title": string,
      "content": string,
      "relatedDate": "YYYY-MM-DD" | null,
      "isPinned": false
    }
  ]
}"#;

/// Build the system instruction for the instant `now`
pub fn build_system_instruction(now: DateTime<Utc>) -> String {
    let today = today_in_reference(now);
    let tomorrow = plus_days(today, 1);
    let day_after = plus_days(today, 2);
    let today_iso = today.format("%Y-%m-%d");
    let tomorrow_iso = tomorrow.format("%Y-%m-%d");
    let day_after_iso = day_after.format("%Y-%m-%d");

    let weekday_table = WEEK
        .iter()
        .map(|&day| {
            format!(
                "- \"{}\" / \"{}\" -> {}",
                indonesian_name(day),
                english_name(day),
                resolve_weekday(today, day).format("%Y-%m-%d")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are a personal planner assistant for an Indonesian user.
Read the user's message (Indonesian or English) and turn it into structured planning data.
Reply with ONE valid JSON object only. No explanation, no markdown, no code fences.

Today is {today_desc}
Tomorrow is {tomorrow_desc}
The day after tomorrow is {day_after_desc}
All dates are in the Asia/Jakarta timezone (UTC+7).

Date resolution rules:
- "besok" / "tomorrow" -> {tomorrow_iso}
- "lusa" / "the day after tomorrow" -> {day_after_iso}
- "hari ini" / "today" -> {today_iso}
- A bare day name means the next occurrence of that day within this week (weeks start on Monday).
  If that day has already passed this week, or is today, it means next week's day (1 to 7 days ahead).
  Use the resolved dates below; do not compute day offsets yourself:
{weekday_table}
- With no day or time mentioned, use {today_iso}.
- Always write dates as YYYY-MM-DD.

The JSON object must follow this schema exactly:
{schema}

Field rules:
- "type":
    "activity" -> the user mentions tasks, schedules or plans; fill activities[] and leave notes [] empty
    "note"     -> the user vents, reflects or shares feelings without a plan; fill notes[] and leave activities [] empty
    "none"     -> off-topic or unclear; leave both arrays empty and explain in warnings[]
- "message": a short warm reply in Bahasa Indonesia (1-2 sentences)
- "warnings": friendly Indonesian strings about anything unclear (may be [])
- activities[].type: "schedule" for appointments, meetings, classes, events ("jadwal", "acara"); "task" for personal work, chores, studying, exercise ("tugas", "todo")
- activities[].startTime / endTime: 24-hour "HH:MM" (13:00, not 01:00), or null when not mentioned
- activities[].endTime: when missing, startTime plus one hour; null when startTime is null
- activities[].priority: exam or deadline -> "high", social or routine -> "medium", leisure -> "low", otherwise null
- activities[].status: always "pending"
- activities[].linkUrl: null unless the user gives a URL
- notes[].relatedDate: YYYY-MM-DD or null
- notes[].isPinned: always false
- Never include "source" or "userId"; the server sets them."#,
        today_desc = describe(today),
        tomorrow_desc = describe(tomorrow),
        day_after_desc = describe(day_after),
        schema = SCHEMA,
    )
}
