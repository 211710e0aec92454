use super::*;

#[test]
fn test_csv_header_and_missing_cells() -> Result<()> {
    let df = df!(
        "name" => &[Some("Ann"), None],
        "age" => &[Some(31i64), None]
    )?;

    let text = String::from_utf8(csv_bytes(&df)?)?;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec!["name,age", "Ann,31", ","]);
    Ok(())
}

#[test]
fn test_export_and_reload() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("out").join("cleaned.csv");

    let df = df!(
        "id" => &[1i64, 2, 3],
        "email" => &["a@x.io", "b@x.io", "c@x.io"]
    )?;
    export_csv(&df, &path)?;
    assert!(path.exists());

    let reloaded = load_csv(&path)?;
    assert_eq!(reloaded.shape(), (3, 2));
    assert_eq!(strings(&reloaded, "email")?, strings(&df, "email")?);
    Ok(())
}

#[test]
fn test_load_rejects_other_extensions() {
    assert!(load_csv(std::path::Path::new("data.parquet")).is_err());
}
