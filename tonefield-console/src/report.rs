//! # Report Formatting
//!
//! Plain-text views of an analysis and of stored hit points.

use std::fmt::Write;

use tonefield_core::StrikeAnalysis;
use tonefield_core::note;
use tonefield_core::record::HitPointRecord;
use tonefield_core::{Dimension, StrikeLocation};

/// Multi-line summary of an analysis for the terminal.
pub fn render_analysis(analysis: &StrikeAnalysis, note_name: Option<&str>) -> String {
    let mut out = String::new();
    let error = &analysis.error;
    let target = &analysis.resolution.target;
    let coord = analysis.resolution.coordinate;
    let plan = &analysis.plan;

    if let Some(name) = note_name {
        let label = note::key_index(name)
            .and_then(note::note_by_index)
            .map(|n| format!("{} ({:.2} Hz)", n.name, n.frequency))
            .unwrap_or_else(|| name.to_string());
        let _ = writeln!(out, "Note:        {label}");
    }
    let _ = writeln!(
        out,
        "Reading:     tonic {:+.2} Hz, octave {:+.2} Hz, fifth {:+.2} Hz",
        error.tonic, error.octave, error.fifth
    );
    let _ = writeln!(out, "Target:      {}", describe_target(target.primary, target.auxiliary));
    let _ = writeln!(out, "Coordinate:  ({:.3}, {:.3})", coord.x, coord.y);
    let _ = writeln!(
        out,
        "Location:    {}",
        StrikeLocation::from_raw(analysis.primary_error())
    );
    let _ = writeln!(
        out,
        "Plan:        {:.1} x {} ({})",
        plan.force, plan.count, plan.hammering_type
    );
    out
}

/// One line per stored hit point.
pub fn render_record_line(record: &HitPointRecord) -> String {
    let mut line = format!(
        "{}  {}  {:<6} {:<8} ({:.3}, {:.3})  {:.1} x {}",
        record.id,
        record.created_at.format("%Y-%m-%d %H:%M"),
        record.primary_target,
        record.location,
        record.coordinate_x,
        record.coordinate_y,
        record.strength,
        record.hit_count,
    );
    if record.was_adjusted() {
        let _ = write!(
            line,
            " (recommended {:.1} x {})",
            record.recommended_force, record.recommended_count
        );
    }
    if let Some(note) = &record.note {
        let _ = write!(line, "  [{note}]");
    }
    if !record.intent.is_empty() {
        let _ = write!(line, "  {}", record.intent);
    }
    line
}

fn describe_target(primary: Dimension, auxiliary: Option<Dimension>) -> String {
    match auxiliary {
        Some(aux) => format!("{primary} + {aux}"),
        None => primary.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonefield_core::record::HitPointEntry;
    use tonefield_core::{FixedSide, Side, Tonefield, TuningError};

    fn analysis(tonic: f64, octave: f64, fifth: f64) -> StrikeAnalysis {
        Tonefield::default()
            .analyze(&TuningError::new(tonic, octave, fifth), &mut FixedSide(Side::Positive))
            .unwrap()
    }

    #[test]
    fn analysis_report_shows_plan_and_target() {
        let text = render_analysis(&analysis(0.0, 0.0, 17.7), Some("A4"));
        assert!(text.contains("A4 (440.00 Hz)"));
        assert!(text.contains("Target:      fifth\n"));
        assert!(text.contains("(0.600, 0.000)"));
        assert!(text.contains("37.8 x 2 (PRESS)"));
        assert!(text.contains("Location:    external"));
    }

    #[test]
    fn compound_target_is_labelled() {
        let text = render_analysis(&analysis(-10.0, 0.0, -6.0), None);
        assert!(text.contains("tonic + fifth"));
        assert!(text.contains("internal"));
        assert!(!text.contains("Note:"));
    }

    #[test]
    fn record_line_marks_adjustments() {
        let record = HitPointRecord::new(
            &analysis(-3.0, 0.0, 0.0),
            HitPointEntry {
                intent: "raise tonic".into(),
                hit_count: Some(2),
                ..Default::default()
            },
        )
        .unwrap();
        let line = render_record_line(&record);
        assert!(line.contains("(recommended"));
        assert!(line.ends_with("raise tonic"));
    }
}
