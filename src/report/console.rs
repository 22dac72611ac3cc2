use crate::grounding::grounding_model::{CandidateScore, Grounding, MatchTier};
use crate::report::report_model::GroundingReport;

// ============================================================================
// Console reporter: formatted terminal output
// ============================================================================

/// Format a grounding report for terminal output.
///
/// Produces output like:
/// ```text
/// === Grounding: 3 visual elements ===
///
/// ✓ BOUND    vis_1 "Email" -> //form/input[1] (0.982, fused)
/// ✗ UNBOUND  vis_2 "Country" (dropdown)
///
/// === Results: 1 bound, 1 unbound (2 total) ===
/// ```
pub fn format_console_report(report: &GroundingReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Grounding: {} visual elements ===\n\n", report.total));

    for result in &report.elements {
        let element = &result.element;
        let label = element.label_text.as_deref().unwrap_or("<no label>");

        match &result.grounding {
            Grounding::Bound {
                locator,
                confidence,
                tier,
            } => {
                out.push_str(&format!(
                    "\u{2713} BOUND    {} \"{}\" -> {} ({:.3}, {})\n",
                    element.id,
                    label,
                    locator,
                    confidence,
                    tier_name(*tier)
                ));
            }
            Grounding::Unbound => {
                out.push_str(&format!(
                    "\u{2717} UNBOUND  {} \"{}\" ({:?})\n",
                    element.id,
                    label,
                    element.matching_kind()
                ));
            }
        }
    }

    for dup in &report.duplicates {
        out.push_str(&format!(
            "    [WARN] {} bound by {}\n",
            dup.locator,
            dup.element_ids.join(", ")
        ));
    }

    out.push_str(&format!(
        "\n=== Results: {} bound, {} unbound ({} total)",
        report.bound, report.unbound, report.total
    ));

    if let Some(ms) = report.duration_ms {
        out.push_str(&format!(" in {}ms", ms));
    }

    out.push_str(" ===\n");

    out
}

/// Tabular breakdown of `explain()` output.
pub fn format_candidate_table(scores: &[CandidateScore]) -> String {
    let mut out = String::new();
    out.push_str("idx  vis  compat  iou    text   fused  fallback  locator\n");

    for s in scores {
        out.push_str(&format!(
            "{:<4} {:<4} {:<7} {:.3}  {:.3}  {}  {}     {}\n",
            s.index,
            yes_no(s.visible),
            yes_no(s.compatible),
            s.iou,
            s.text_similarity,
            opt_score(s.fused),
            opt_score(s.fallback),
            s.locator
        ));
    }

    out
}

pub fn tier_name(tier: MatchTier) -> &'static str {
    match tier {
        MatchTier::Fused => "fused",
        MatchTier::GeometricFallback => "geometric-fallback",
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

fn opt_score(score: Option<f64>) -> String {
    score.map(|s| format!("{:.3}", s)).unwrap_or_else(|| "  -  ".to_string())
}
