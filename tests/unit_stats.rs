// Unit tests for summary statistics and ANOVA.
//
// Expected values were checked against pandas `agg(['mean', 'std', 'count'])`
// and `scipy.stats.f_oneway`.

use ideaspace::stats::{describe, one_way_anova, summarize_by};

// ============================================================
// describe / summarize_by
// ============================================================

#[test]
fn describe_matches_pandas_sample_std() {
    // pd.Series([0.1, 0.2, 0.6]).std() == 0.26457513110645903
    let s = describe([Some(0.1), Some(0.2), Some(0.6)]);
    assert_eq!(s.count, 3);
    assert!((s.mean.unwrap() - 0.3).abs() < 1e-12);
    assert!((s.std.unwrap() - 0.264_575_131_106_459).abs() < 1e-12);
}

#[test]
fn describe_counts_only_present_values() {
    let s = describe([None, Some(1.0), None]);
    assert_eq!(s.count, 1);
    assert_eq!(s.std, None);
}

#[test]
fn summarize_by_groups_and_sorts() {
    let labels = ["human", "ai", "human", "ai", "control"];
    let values = [Some(0.2), Some(0.6), Some(0.4), Some(0.8), None];
    let out = summarize_by(labels, values);

    assert_eq!(out.len(), 3);
    assert_eq!(out[0].label, "ai");
    assert!((out[0].summary.mean.unwrap() - 0.7).abs() < 1e-12);
    assert_eq!(out[1].label, "control");
    assert_eq!(out[1].summary.count, 0);
    assert_eq!(out[1].summary.mean, None);
    assert_eq!(out[2].label, "human");
    assert!((out[2].summary.mean.unwrap() - 0.3).abs() < 1e-12);
}

// ============================================================
// one_way_anova
// ============================================================

#[test]
fn anova_three_groups() {
    // scipy.stats.f_oneway([1, 2, 3, 4], [2, 3, 4, 5], [6, 7, 8, 9])
    // F = 16.8, df = (2, 9), p ~= 0.0009
    let groups = vec![
        vec![1.0, 2.0, 3.0, 4.0],
        vec![2.0, 3.0, 4.0, 5.0],
        vec![6.0, 7.0, 8.0, 9.0],
    ];
    let out = one_way_anova(&groups).unwrap().unwrap();
    assert!((out.f_statistic - 16.8).abs() < 1e-9);
    assert_eq!((out.df_between, out.df_within), (2, 9));
    assert!(out.p_value > 0.0 && out.p_value < 0.01);
}

#[test]
fn anova_p_value_decreases_with_separation() {
    let close = one_way_anova(&[vec![1.0, 2.0, 3.0], vec![1.5, 2.5, 3.5]])
        .unwrap()
        .unwrap();
    let far = one_way_anova(&[vec![1.0, 2.0, 3.0], vec![5.0, 6.0, 7.0]])
        .unwrap()
        .unwrap();
    assert!(far.p_value < close.p_value);
    assert!(far.f_statistic > close.f_statistic);
}

#[test]
fn anova_single_group_is_none() {
    assert!(one_way_anova(&[vec![0.1, 0.2, 0.3]]).unwrap().is_none());
}
