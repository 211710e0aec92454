use super::*;
use crate::analyser::logic::outliers::count_outliers;

#[test]
fn test_single_extreme_value_is_flagged() -> Result<()> {
    let mut values: Vec<f64> = (0..30).map(|i| f64::from(i % 5) + 1.0).collect();
    values.push(100.0);
    let df = df!(
        "amount" => &values,
        "label" => &vec!["x"; values.len()]
    )?;

    let report = detect_outliers(&df)?;
    assert_eq!(report.get("amount"), Some(&1));
    assert!(!report.contains_key("label"));
    Ok(())
}

fn series(values: &[f64]) -> Series {
    Series::new("v".into(), values)
}

#[test]
fn test_small_sample_cannot_reach_threshold() -> Result<()> {
    // With five values the largest possible |z| is 2.
    assert_eq!(count_outliers(&series(&[1.0, 2.0, 3.0, 4.0, 100.0]))?, 0);
    Ok(())
}

#[test]
fn test_constant_column_has_no_outliers() -> Result<()> {
    assert_eq!(count_outliers(&series(&[5.0, 5.0, 5.0, 5.0]))?, 0);
    assert_eq!(count_outliers(&series(&[]))?, 0);

    let df = df!("c" => &[5, 5, 5, 5])?;
    assert!(detect_outliers(&df)?.is_empty());
    Ok(())
}

#[test]
fn test_missing_values_are_ignored() -> Result<()> {
    let mut values: Vec<Option<f64>> = (0..40).map(|i| Some(10.0 + f64::from(i % 3))).collect();
    values.push(None);
    values.push(Some(500.0));
    let df = df!("v" => &values, "flag" => &vec![true; values.len()])?;

    let report = detect_outliers(&df)?;
    assert_eq!(report.len(), 1);
    assert_eq!(report["v"], 1);
    Ok(())
}

#[test]
fn test_nan_does_not_hide_outliers() -> Result<()> {
    let mut values: Vec<f64> = (0..30).map(|i| f64::from(i % 5) + 1.0).collect();
    values.push(f64::NAN);
    values.push(100.0);
    let df = df!("amount" => &values)?;

    let report = detect_outliers(&df)?;
    assert_eq!(report.get("amount"), Some(&1));
    Ok(())
}
