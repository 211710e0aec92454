use super::*;

#[test]
fn test_phone_patterns() {
    assert!(is_valid_phone("+91-9876543210"));
    assert!(is_valid_phone("+91 9876543210"));
    assert!(is_valid_phone("+919876543210"));
    assert!(is_valid_phone("9876543210"));
    assert!(!is_valid_phone("5876543210"));
    assert!(!is_valid_phone("987654321"));
    assert!(!is_valid_phone("98765432100"));
    assert!(!is_valid_phone("+1-9876543210"));
    assert!(!is_valid_phone(""));
}

#[test]
fn test_email_patterns() {
    assert!(is_valid_email("a.b@example.com"));
    assert!(is_valid_email("first-last@mail.example.co"));
    assert!(!is_valid_email("not-an-email"));
    assert!(!is_valid_email("a@b"));
    assert!(!is_valid_email("a b@example.com"));
    assert!(!is_valid_email(""));
}

#[test]
fn test_phone_flag_column() -> Result<()> {
    let df = df!("phone" => &[Some("+91-9876543210"), Some("5876543210"), Some(""), None])?;

    let flagged = validate_phone_numbers(&df, "phone")?;
    assert_eq!(flagged.width(), 2);
    let flags: Vec<Option<bool>> = flagged
        .column("valid_phone")?
        .as_materialized_series()
        .bool()?
        .into_iter()
        .collect();
    assert_eq!(flags, vec![Some(true), Some(false), Some(false), Some(false)]);

    // Source column is left as it was.
    assert_eq!(strings(&flagged, "phone")?, strings(&df, "phone")?);
    Ok(())
}

#[test]
fn test_numeric_phone_column() -> Result<()> {
    let df = df!("phone" => &[9_876_543_210i64, 1_234_567_890])?;
    let flagged = validate_phone_numbers(&df, "phone")?;
    let flags: Vec<Option<bool>> = flagged
        .column("valid_phone")?
        .as_materialized_series()
        .bool()?
        .into_iter()
        .collect();
    assert_eq!(flags, vec![Some(true), Some(false)]);
    Ok(())
}

#[test]
fn test_email_rerun_overwrites_flag() -> Result<()> {
    let df = df!("email" => &[Some("a.b@example.com"), Some("not-an-email"), None])?;

    let once = validate_email_addresses(&df, "email")?;
    let twice = validate_email_addresses(&once, "email")?;
    assert_eq!(twice.width(), 2);
    assert!(twice.equals_missing(&once));

    let flags: Vec<Option<bool>> = twice
        .column("valid_email")?
        .as_materialized_series()
        .bool()?
        .into_iter()
        .collect();
    assert_eq!(flags, vec![Some(true), Some(false), Some(false)]);
    Ok(())
}

#[test]
fn test_validator_unknown_column() -> Result<()> {
    let df = df!("email" => &["a@b.io"])?;
    assert!(validate_email_addresses(&df, "mail").is_err());
    Ok(())
}
