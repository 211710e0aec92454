use super::*;

#[test]
fn test_trim_whitespace_preserves_missing() -> Result<()> {
    let df = df!(
        "name" => &[Some("  Alice  "), Some("Bob\t"), None],
        "untouched" => &[Some(" x "), Some(" y "), Some(" z ")]
    )?;

    let cleaned = trim_whitespace(&df, &["name".to_owned()])?;
    assert_eq!(
        strings(&cleaned, "name")?,
        vec![Some("Alice".to_owned()), Some("Bob".to_owned()), None]
    );
    assert_eq!(strings(&cleaned, "untouched")?, strings(&df, "untouched")?);
    Ok(())
}

#[test]
fn test_trim_coerces_numbers_to_text() -> Result<()> {
    let df = df!("code" => &[Some(7i64), None])?;
    let cleaned = trim_whitespace(&df, &["code".to_owned()])?;
    assert_eq!(cleaned.column("code")?.dtype(), &DataType::String);
    assert_eq!(strings(&cleaned, "code")?, vec![Some("7".to_owned()), None]);
    Ok(())
}

#[test]
fn test_case_normalisation() -> Result<()> {
    let df = df!("city" => &["Sydney", "mELBOURNE"])?;
    let cols = ["city".to_owned()];

    let lower = normalise_case(&df, &cols, TextCase::Lower)?;
    assert_eq!(
        strings(&lower, "city")?,
        vec![Some("sydney".to_owned()), Some("melbourne".to_owned())]
    );

    let upper = normalise_case(&df, &cols, TextCase::Upper)?;
    assert_eq!(
        strings(&upper, "city")?,
        vec![Some("SYDNEY".to_owned()), Some("MELBOURNE".to_owned())]
    );

    let again = normalise_case(&upper, &cols, TextCase::Upper)?;
    assert!(again.equals_missing(&upper));
    Ok(())
}

#[test]
fn test_capitalise_words() -> Result<()> {
    assert_eq!(title_case("jOHN  doe"), "John  Doe");
    assert_eq!(title_case("o'neil"), "O'neil");

    let df = df!("name" => &[Some("mary ann SMITH"), None])?;
    let once = capitalise_words(&df, &["name".to_owned()])?;
    assert_eq!(
        strings(&once, "name")?,
        vec![Some("Mary Ann Smith".to_owned()), None]
    );

    let twice = capitalise_words(&once, &["name".to_owned()])?;
    assert!(twice.equals_missing(&once));
    Ok(())
}

#[test]
fn test_text_ops_reject_unknown_columns() -> Result<()> {
    let df = df!("name" => &["a"])?;
    let err = trim_whitespace(&df, &["name".to_owned(), "nmae".to_owned()]).unwrap_err();
    assert!(matches!(err, crate::error::ScourError::UnknownColumn(ref c) if c == "nmae"));
    Ok(())
}

#[test]
fn test_strip_titles() -> Result<()> {
    let df = df!(
        "name" => &[
            Some("Dr. Jane Smith"),
            Some("mrs Jane Smith"),
            Some("MR.John"),
            Some("Shri Ram Kumar"),
            Some("Jane Dr. Smith"),
            Some("Drake Bell"),
            Some("Ms. Dr. Who"),
            None,
        ]
    )?;

    let cleaned = strip_titles(&df, "name")?;
    assert_eq!(
        strings(&cleaned, "name")?,
        vec![
            Some("Jane Smith".to_owned()),
            Some("Jane Smith".to_owned()),
            Some("John".to_owned()),
            Some("Ram Kumar".to_owned()),
            Some("Jane Dr. Smith".to_owned()),
            Some("Drake Bell".to_owned()),
            Some("Dr. Who".to_owned()),
            None
        ]
    );
    assert!(strip_titles(&df, "title").is_err());
    Ok(())
}

#[test]
fn test_repeated_column_in_list_is_cleaned_once() -> Result<()> {
    let df = df!("city" => &[Some(" Pune "), None])?;
    let cleaned = trim_whitespace(&df, &["city".to_owned(), "city".to_owned()])?;
    assert_eq!(strings(&cleaned, "city")?, vec![Some("Pune".to_owned()), None]);
    Ok(())
}

#[test]
fn test_remove_duplicates_keeps_first_in_order() -> Result<()> {
    let df = df!(
        "email" => &[Some("a@x.io"), Some("b@x.io"), Some("a@x.io"), None, None],
        "row" => &[1, 2, 3, 4, 5]
    )?;

    let deduped = remove_duplicates(&df, &["email".to_owned()])?;
    assert_eq!(deduped.height(), 3);

    let rows: Vec<Option<i32>> = deduped
        .column("row")?
        .as_materialized_series()
        .i32()?
        .into_iter()
        .collect();
    assert_eq!(rows, vec![Some(1), Some(2), Some(4)]);
    Ok(())
}

#[test]
fn test_remove_duplicates_retained_keys_distinct() -> Result<()> {
    let df = df!(
        "first" => &["ann", "ann", "bob", "ann", "bob"],
        "last" => &["lee", "lee", "lee", "kim", "lee"]
    )?;
    let key = ["first".to_owned(), "last".to_owned()];

    let deduped = remove_duplicates(&df, &key)?;
    assert!(deduped.height() <= df.height());
    assert_eq!(deduped.height(), 3);

    let first = strings(&deduped, "first")?;
    let last = strings(&deduped, "last")?;
    let pairs: std::collections::HashSet<_> = first.iter().zip(last.iter()).collect();
    assert_eq!(pairs.len(), deduped.height());
    Ok(())
}

#[test]
fn test_remove_duplicates_needs_key() -> Result<()> {
    let df = df!("a" => &[1, 1])?;
    assert!(remove_duplicates(&df, &[]).is_err());
    Ok(())
}
