// Descriptive statistics per condition.
//
// Matches pandas `groupby(...).agg(['mean', 'std', 'count'])`: missing values
// are skipped, std is the sample standard deviation (n - 1), and labels come
// out sorted. Rows with a missing label are dropped like NaN group keys.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::is_missing;

/// Mean, sample standard deviation, and count of the present values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    /// `None` when no values are present.
    pub mean: Option<f64>,
    /// `None` when fewer than two values are present.
    pub std: Option<f64>,
    pub count: usize,
}

/// A summary for one label (usually a condition).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledSummary {
    pub label: String,
    #[serde(flatten)]
    pub summary: Summary,
}

/// Summarize values, skipping `None` and NaN.
pub fn describe<I>(values: I) -> Summary
where
    I: IntoIterator<Item = Option<f64>>,
{
    let present: Vec<f64> = values
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .collect();
    describe_present(&present)
}

fn describe_present(values: &[f64]) -> Summary {
    let count = values.len();
    if count == 0 {
        return Summary {
            mean: None,
            std: None,
            count,
        };
    }

    let mean = values.iter().sum::<f64>() / count as f64;
    let std = (count >= 2).then(|| {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (count - 1) as f64).sqrt()
    });

    Summary {
        mean: Some(mean),
        std,
        count,
    }
}

/// Summaries per label, sorted by label. A label whose values are all
/// missing still appears, with count 0.
pub fn summarize_by<'a, L, V>(labels: L, values: V) -> Vec<LabeledSummary>
where
    L: IntoIterator<Item = &'a str>,
    V: IntoIterator<Item = Option<f64>>,
{
    group_values(labels, values)
        .into_iter()
        .map(|(label, vals)| LabeledSummary {
            label,
            summary: describe_present(&vals),
        })
        .collect()
}

/// Present values bucketed by label, sorted by label. Missing labels are
/// skipped.
pub fn group_values<'a, L, V>(labels: L, values: V) -> BTreeMap<String, Vec<f64>>
where
    L: IntoIterator<Item = &'a str>,
    V: IntoIterator<Item = Option<f64>>,
{
    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for (label, value) in labels.into_iter().zip(values) {
        if is_missing(label) {
            continue;
        }
        let bucket = groups.entry(label.to_string()).or_default();
        if let Some(v) = value.filter(|v| !v.is_nan()) {
            bucket.push(v);
        }
    }
    groups
}
