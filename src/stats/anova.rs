// One-way ANOVA across conditions.
//
// Tests whether mean similarity differs between experimental conditions,
// with the same conventions as scipy's `f_oneway`.

use anyhow::Result;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, FisherSnedecor};

/// Result of a one-way ANOVA.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Anova {
    pub f_statistic: f64,
    pub p_value: f64,
    pub df_between: usize,
    pub df_within: usize,
}

/// One-way ANOVA over groups of observations.
///
/// Empty groups are ignored. Returns `None` when fewer than two groups
/// remain or there are no within-group degrees of freedom. When every group
/// is constant, F is +inf (p = 0) if the means differ and NaN if they don't.
pub fn one_way_anova(groups: &[Vec<f64>]) -> Result<Option<Anova>> {
    let groups: Vec<&Vec<f64>> = groups.iter().filter(|g| !g.is_empty()).collect();
    let k = groups.len();
    let n: usize = groups.iter().map(|g| g.len()).sum();

    if k < 2 || n <= k {
        return Ok(None);
    }

    let grand_mean = groups.iter().flat_map(|g| g.iter()).sum::<f64>() / n as f64;

    let mut ss_between = 0.0;
    let mut ss_within = 0.0;
    for g in &groups {
        let mean = g.iter().sum::<f64>() / g.len() as f64;
        ss_between += g.len() as f64 * (mean - grand_mean).powi(2);
        ss_within += g.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    }

    let df_between = k - 1;
    let df_within = n - k;

    let (f_statistic, p_value) = if ss_within == 0.0 {
        if ss_between == 0.0 {
            (f64::NAN, f64::NAN)
        } else {
            (f64::INFINITY, 0.0)
        }
    } else {
        let f = (ss_between / df_between as f64) / (ss_within / df_within as f64);
        let dist = FisherSnedecor::new(df_between as f64, df_within as f64)
            .map_err(|e| anyhow::anyhow!("Invalid F distribution: {}", e))?;
        (f, dist.sf(f))
    };

    Ok(Some(Anova {
        f_statistic,
        p_value,
        df_between,
        df_within,
    }))
}
