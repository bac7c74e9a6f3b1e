//! Plain-text report export.

use chrono::{DateTime, Datelike, FixedOffset, Offset, Utc};

use crate::engine::{AnalysisReport, AttributeRating, PositionMatch};
use crate::player::PlayerIdentity;

pub const REPORT_TITLE: &str = "=== YOUTH POSITION FINDER - ANALYSIS REPORT ===";
pub const REPORT_FOOTER: &str = "© 2025 YouthPositionFinder";

/// Report dates are calendar dates in Western Indonesia Time (WIB, UTC+7).
pub const REPORT_UTC_OFFSET_SECS: i32 = 7 * 3600;

/// The fixed offset report dates are rendered in.
pub fn report_offset() -> FixedOffset {
    FixedOffset::east_opt(REPORT_UTC_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Render the downloadable text report for one analysis.
///
/// Lines are joined with `\n` and there is no trailing newline. A section
/// whose list is empty keeps a single blank line under its heading.
pub fn render_text_report(identity: &PlayerIdentity, report: &AnalysisReport<'_>) -> String {
    let (primary_name, primary_confidence, primary_score) = match &report.primary {
        Some(primary) => (primary.name(), primary.confidence, primary.score),
        None => ("N/A", 0, 0.0),
    };

    let alternatives = report
        .alternatives
        .iter()
        .enumerate()
        .map(|(i, alt)| format!("{}. {} ({}%)", i + 1, alt.name(), alt.confidence))
        .collect::<Vec<_>>()
        .join("\n");

    let profile = report
        .player_profile
        .axes()
        .iter()
        .map(|(axis, value)| format!("- {}: {}/100", axis.label(), value))
        .collect::<Vec<_>>()
        .join("\n");

    let lines = [
        REPORT_TITLE.to_string(),
        String::new(),
        format!("Nama: {}", identity.name),
        format!("Usia: {} tahun", identity.age),
        format!("Jenis Kelamin: {}", identity.gender),
        format!("Tanggal Analisis: {}", format_short_date(&identity.timestamp, &report_offset())),
        String::new(),
        format!("PRIMARY POSITION: {}", primary_name),
        format!("Confidence Score: {}%", primary_confidence),
        format!("Match Score: {}/100", primary_score),
        String::new(),
        "ALTERNATIVE POSITIONS:".to_string(),
        alternatives,
        String::new(),
        "PLAYER PROFILE:".to_string(),
        profile,
        String::new(),
        "STRENGTHS:".to_string(),
        rating_lines(&report.strengths),
        String::new(),
        "AREAS FOR IMPROVEMENT:".to_string(),
        rating_lines(&report.weaknesses),
        String::new(),
        "DEVELOPMENT AREAS:".to_string(),
        report.development_areas.join("\n"),
        String::new(),
        REPORT_FOOTER.to_string(),
    ];

    lines.join("\n")
}

fn rating_lines(ratings: &[AttributeRating]) -> String {
    ratings
        .iter()
        .map(|r| format!("- {}: {}/5", r.attribute, r.value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `d/m/yyyy` without zero padding, as the calendar date at `offset`.
pub fn format_short_date(timestamp: &DateTime<Utc>, offset: &FixedOffset) -> String {
    let local = timestamp.with_timezone(offset);
    format!("{}/{}/{}", local.day(), local.month(), local.year())
}

/// Render the primary position's development plan and the alternatives.
///
/// This is the coach-facing detail view: description, key attributes,
/// typical weaknesses, the phased training program and the development
/// path, followed by each alternative with its description.
pub fn render_position_details(report: &AnalysisReport<'_>) -> String {
    let mut lines = Vec::new();

    match &report.primary {
        Some(primary) => {
            let rule = primary.rule;
            lines.push(format!("PRIMARY POSITION: {}", primary.name()));
            lines.push(match_summary(primary));
            lines.push(rule.description.clone());
            lines.push(String::new());

            lines.push("KEY ATTRIBUTES:".to_string());
            lines.extend(rule.key_attributes.iter().map(|a| format!("- {}", a)));
            lines.push(String::new());

            lines.push("TYPICAL WEAKNESSES:".to_string());
            lines.extend(rule.weaknesses.iter().map(|w| format!("- {}", w)));
            lines.push(String::new());

            lines.push("TRAINING PROGRAM:".to_string());
            for (i, phase) in report.training_program().iter().enumerate() {
                lines.push(format!("{}. Week {}: {}", i + 1, phase.weeks, phase.focus));
                lines.extend(phase.drills.iter().map(|d| format!("   - {}", d)));
            }
            lines.push(String::new());

            lines.push("DEVELOPMENT PATH:".to_string());
            lines.push(rule.development_path.clone());
        }
        None => {
            lines.push("PRIMARY POSITION: N/A".to_string());
            lines.push("No position meets its primary requirements.".to_string());
        }
    }

    if !report.alternatives.is_empty() {
        lines.push(String::new());
        lines.push("ALTERNATIVE POSITIONS:".to_string());
        for (i, alt) in report.alternatives.iter().enumerate() {
            lines.push(format!("{}. {}", i + 1, alt.name()));
            lines.push(format!("   {}", match_summary(alt)));
            lines.push(format!("   {}", alt.rule.description));
        }
    }

    lines.join("\n")
}

fn match_summary(m: &PositionMatch<'_>) -> String {
    format!("Match Score: {}/100 | Confidence: {}% | {}", m.score, m.confidence, m.recommendation)
}

/// `YPF-Report-<name>-<unix millis>.txt`.
///
/// Path separators and other characters that are not valid in file names on
/// common platforms are replaced with `_`.
pub fn report_file_name(identity: &PlayerIdentity, now: DateTime<Utc>) -> String {
    let name: String = identity
        .name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("YPF-Report-{}-{}.txt", name, now.timestamp_millis())
}
