use chrono::NaiveDate;

use crate::word_bank::ProgressPoint;

/// Bar labels and heights for the weekly XP chart. Dates that parse are labelled by weekday.
pub fn xp_bars(points: &[ProgressPoint]) -> Vec<(String, u64)> {
    points
        .iter()
        .map(|p| {
            let label = NaiveDate::parse_from_str(&p.date, "%Y-%m-%d")
                .map(|d| d.format("%a").to_string())
                .unwrap_or_else(|_| p.date.clone());
            (label, p.xp as u64)
        })
        .collect()
}

/// XP gained and accuracy change from the first to the last point
pub fn weekly_change(points: &[ProgressPoint]) -> Option<(i64, i64)> {
    let (first, last) = (points.first()?, points.last()?);
    Some((
        last.xp as i64 - first.xp as i64,
        last.accuracy as i64 - first.accuracy as i64,
    ))
}

/// Human label for the last practice day relative to `today`
pub fn practiced_label(last: Option<NaiveDate>, today: NaiveDate) -> String {
    match last.map(|d| (today - d).num_days()) {
        None => "not yet".to_string(),
        Some(0) => "today".to_string(),
        Some(1) => "yesterday".to_string(),
        Some(n) if n > 1 => format!("{n} days ago"),
        Some(_) => "today".to_string(),
    }
}
