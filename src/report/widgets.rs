use serde::Serialize;

use crate::stats::lookup::{PLACEHOLDER, clamp_percent, format_number, format_percent};
use crate::stats::{HistogramBucket, Kpi, KpiKind, OutcomeRates, RankedItem};

pub const BAR_WIDTH: usize = 40;

pub fn render_kpi(kpi: &Kpi) -> String {
    let value = match kpi.kind {
        KpiKind::Count => format_number(kpi.value, 0),
        KpiKind::Score => format_number(kpi.value, 1),
        KpiKind::Percent => format_percent(kpi.value),
    };
    format!("{:<16} {}", kpi.label, value)
}

/// Outcome shares ready for a stacked bar; always sums to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarSegments {
    pub approved: f64,
    pub rejected: f64,
    pub hired: f64,
    pub pending: f64,
}

/// Clamps each rate into `[0,100]`; when they overflow together, rescales the
/// three proportionally so the bar never exceeds 100. The rest is pending.
pub fn segment_rates(rates: &OutcomeRates) -> BarSegments {
    let approved = rates.approval_rate.map(clamp_percent).unwrap_or(0.0);
    let rejected = rates.rejection_rate.map(clamp_percent).unwrap_or(0.0);
    let hired = rates.hire_rate.map(clamp_percent).unwrap_or(0.0);

    let sum = approved + rejected + hired;
    let (approved, rejected, hired) = if sum > 100.0 {
        let factor = 100.0 / sum;
        (approved * factor, rejected * factor, hired * factor)
    } else {
        (approved, rejected, hired)
    };
    let pending = (100.0 - (approved + rejected + hired)).max(0.0);

    BarSegments {
        approved,
        rejected,
        hired,
        pending,
    }
}

pub fn render_segmented_bar(rates: &OutcomeRates, width: usize) -> String {
    if rates.is_empty() {
        return PLACEHOLDER.to_string();
    }
    let seg = segment_rates(rates);
    let cells = |share: f64| ((share / 100.0) * width as f64).round() as usize;

    let mut bar = String::with_capacity(width + 2);
    bar.push('[');
    let mut used = 0usize;
    for (share, glyph) in [(seg.approved, '+'), (seg.hired, '*'), (seg.rejected, 'x')] {
        let n = cells(share).min(width - used);
        bar.extend(std::iter::repeat_n(glyph, n));
        used += n;
    }
    bar.extend(std::iter::repeat_n('.', width - used));
    bar.push(']');

    format!(
        "{bar} approved {:.1}% | hired {:.1}% | rejected {:.1}% | pending {:.1}%",
        seg.approved, seg.hired, seg.rejected, seg.pending
    )
}

/// Relative bar heights in `[0,1]`. The `max(1, ..)` floor keeps an all-empty
/// histogram at zero height instead of dividing by zero.
pub fn bar_heights(buckets: &[HistogramBucket]) -> Vec<f64> {
    let max = buckets.iter().map(|b| b.count).fold(0.0f64, f64::max).max(1.0);
    buckets.iter().map(|b| b.count / max).collect()
}

pub fn render_histogram(buckets: &[HistogramBucket], width: usize) -> Vec<String> {
    if buckets.is_empty() {
        return vec![format!("  {PLACEHOLDER}")];
    }
    let label_width = buckets.iter().map(|b| b.label.chars().count()).max().unwrap_or(0);
    buckets
        .iter()
        .zip(bar_heights(buckets))
        .map(|(bucket, height)| {
            let n = (height * width as f64).round() as usize;
            format!(
                "  {:>label_width$} | {:<width$} {}",
                bucket.label,
                "#".repeat(n),
                bucket.count
            )
        })
        .collect()
}

/// Hardest entries first, as produced by `rank_by_difficulty`.
pub fn render_difficulty_list(items: &[RankedItem], limit: usize) -> Vec<String> {
    if items.is_empty() {
        return vec![format!("  {PLACEHOLDER}")];
    }
    items
        .iter()
        .take(limit)
        .enumerate()
        .map(|(idx, item)| {
            let mut line = format!(
                "  {:>2}. {:<32} avg {}",
                idx + 1,
                item.name,
                format_number(item.avg_score, 1)
            );
            if let Some(n) = item.responses {
                line.push_str(&format!(" ({n} responses)"));
            }
            line
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/widgets.rs"]
mod tests;
