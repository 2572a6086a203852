use marks_analysis::ingestion::csv::{load_csv_from_bytes, load_csv_from_path, load_csv_from_reader};
use marks_analysis::types::{DataType, Value};

#[test]
fn load_csv_from_path_happy_path() {
    let ds = load_csv_from_path("tests/fixtures/sample_marks.csv").unwrap();

    assert_eq!(ds.row_count(), 6);
    let names: Vec<&str> = ds.schema.field_names().collect();
    assert_eq!(
        names,
        vec!["StudentID", "Name", "Class", "Section", "Math", "Science", "English"]
    );
    assert_eq!(
        ds.rows[0],
        vec![
            Value::Int64(1),
            Value::Utf8("Aarav Shah".to_string()),
            Value::Utf8("X".to_string()),
            Value::Utf8("A".to_string()),
            Value::Int64(88),
            Value::Int64(92),
            Value::Int64(79),
        ]
    );
    // Kabir has no Science mark.
    assert_eq!(ds.rows[2][5], Value::Null);
    assert_eq!(ds.schema.fields[5].data_type, DataType::Int64);
}

#[test]
fn load_csv_synthesizes_identity_and_trims_headers() {
    let ds = load_csv_from_path("tests/fixtures/scores_only.csv").unwrap();

    let names: Vec<&str> = ds.schema.field_names().collect();
    assert_eq!(names, vec!["StudentID", "Name", "Math", "Science"]);
    let ids: Vec<Value> = ds.column("StudentID").cloned().collect();
    assert_eq!(ids, vec![Value::Int64(1), Value::Int64(2), Value::Int64(3)]);
    assert_eq!(ds.rows[2][1], Value::Utf8("Student 3".to_string()));
}

#[test]
fn load_csv_keeps_existing_name_column() {
    let input = "Name,Math\nAda,80\n";
    let ds = load_csv_from_bytes(input.as_bytes()).unwrap();
    let names: Vec<&str> = ds.schema.field_names().collect();
    assert_eq!(names, vec!["StudentID", "Name", "Math"]);
    assert_eq!(ds.rows[0][1], Value::Utf8("Ada".to_string()));
}

#[test]
fn load_csv_from_reader_infers_float_scores() {
    let input = "StudentID,Name,Math\n1,Ada,80.5\n2,Grace,70\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let ds = load_csv_from_reader(&mut rdr).unwrap();
    assert_eq!(ds.schema.fields[2].data_type, DataType::Float64);
    assert_eq!(ds.rows[1][2], Value::Float64(70.0));
}

#[test]
fn load_csv_errors_on_overlong_rows() {
    let err = load_csv_from_path("tests/fixtures/ragged.csv").unwrap_err();
    assert!(err.is_parse_error());
    assert!(err.to_string().contains("line 3: expected at most 3 fields, found 4"));
}

#[test]
fn load_csv_pads_short_rows_with_missing_cells() {
    let input = "StudentID,Name,Math,Science\n1,Ada,80,70\n2,Grace,50\n";
    let ds = load_csv_from_bytes(input.as_bytes()).unwrap();
    assert_eq!(ds.row_count(), 2);
    assert_eq!(ds.rows[1][2], Value::Int64(50));
    assert_eq!(ds.rows[1][3], Value::Null);
    assert_eq!(ds.schema.fields[3].data_type, DataType::Int64);
}

#[test]
fn load_csv_errors_on_invalid_utf8() {
    let bytes: &[u8] = b"StudentID,Name\n1,\xff\xfe\n";
    let err = load_csv_from_bytes(bytes).unwrap_err();
    assert!(err.is_parse_error());
}

#[test]
fn load_csv_errors_on_empty_input() {
    let err = load_csv_from_bytes(b"").unwrap_err();
    assert!(err.is_parse_error());
    assert!(err.to_string().contains("no header row"));
}

#[test]
fn load_csv_header_only_gives_empty_dataset() {
    let ds = load_csv_from_bytes(b"Name,Math\n").unwrap();
    assert!(ds.is_empty());
    assert!(ds.schema.contains("StudentID"));
}
