use std::sync::{Arc, Mutex};

use marks_analysis::ingestion::{
    load_from_path, load_upload, CompositeObserver, FileObserver, LoadContext, LoadObserver,
    LoadOptions, LoadSeverity, LoadStats, LogObserver, StdErrObserver, TableFormat,
};
use marks_analysis::AnalysisError;

#[derive(Default)]
struct RecordingObserver {
    events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl LoadObserver for RecordingObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        self.events.lock().unwrap().push(format!(
            "success:{:?}:{}x{}",
            ctx.format, stats.rows, stats.columns
        ));
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, _error: &AnalysisError) {
        self.events
            .lock()
            .unwrap()
            .push(format!("failure:{:?}:{severity:?}", ctx.format));
    }

    fn on_alert(&self, _ctx: &LoadContext, severity: LoadSeverity, _error: &AnalysisError) {
        self.events
            .lock()
            .unwrap()
            .push(format!("alert:{severity:?}"));
    }
}

fn options_with(obs: &Arc<RecordingObserver>) -> LoadOptions {
    LoadOptions {
        observer: Some(obs.clone() as Arc<dyn LoadObserver>),
        ..Default::default()
    }
}

#[test]
fn success_is_reported_with_shape() {
    let obs = Arc::new(RecordingObserver::default());
    let ds = load_from_path("tests/fixtures/sample_marks.csv", &options_with(&obs)).unwrap();
    assert_eq!(ds.row_count(), 6);
    assert_eq!(obs.events(), vec!["success:Csv:6x7"]);
}

#[test]
fn missing_file_is_critical_and_alerts() {
    let obs = Arc::new(RecordingObserver::default());
    let err = load_from_path("tests/fixtures/does_not_exist.csv", &options_with(&obs))
        .unwrap_err();
    assert!(!err.is_parse_error());
    assert_eq!(
        obs.events(),
        vec!["failure:Csv:Critical", "alert:Critical"]
    );
}

#[test]
fn malformed_csv_is_an_error_below_default_alert_threshold() {
    let obs = Arc::new(RecordingObserver::default());
    let err = load_from_path("tests/fixtures/ragged.csv", &options_with(&obs)).unwrap_err();
    assert!(err.is_parse_error());
    assert_eq!(obs.events(), vec!["failure:Csv:Error"]);
}

#[test]
fn lowered_threshold_alerts_on_parse_errors() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = LoadOptions {
        alert_at_or_above: LoadSeverity::Error,
        ..options_with(&obs)
    };
    let _ = load_from_path("tests/fixtures/ragged.csv", &opts).unwrap_err();
    assert_eq!(obs.events(), vec!["failure:Csv:Error", "alert:Error"]);
}

#[test]
fn upload_format_comes_from_file_name() {
    let bytes = std::fs::read("tests/fixtures/scores_only.csv").unwrap();

    let ds = load_upload("Marks.CSV", &bytes, &LoadOptions::default()).unwrap();
    assert_eq!(ds.row_count(), 3);

    let err = load_upload("marks.txt", &bytes, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, AnalysisError::UnsupportedFormat { .. }));

    let forced = LoadOptions {
        format: Some(TableFormat::Csv),
        ..Default::default()
    };
    assert_eq!(load_upload("marks.txt", &bytes, &forced).unwrap(), ds);
}

#[test]
fn composite_fans_out_to_every_observer() {
    let first = Arc::new(RecordingObserver::default());
    let second = Arc::new(RecordingObserver::default());
    let observers: Vec<Arc<dyn LoadObserver>> =
        vec![first.clone(), second.clone(), Arc::new(LogObserver)];
    let composite = CompositeObserver::new(observers);
    let opts = LoadOptions {
        observer: Some(Arc::new(composite)),
        ..Default::default()
    };

    load_from_path("tests/fixtures/scores_only.csv", &opts).unwrap();
    assert_eq!(first.events(), vec!["success:Csv:3x4"]);
    assert_eq!(second.events(), first.events());
}

#[test]
fn file_observer_appends_one_line_per_event() {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let log_path = std::env::temp_dir().join(format!("marks-analysis-load-{nanos}.log"));
    let observers: Vec<Arc<dyn LoadObserver>> =
        vec![Arc::new(FileObserver::new(&log_path)), Arc::new(StdErrObserver)];
    let opts = LoadOptions {
        observer: Some(Arc::new(CompositeObserver::new(observers))),
        ..Default::default()
    };

    load_from_path("tests/fixtures/scores_only.csv", &opts).unwrap();
    let _ = load_from_path("tests/fixtures/does_not_exist.csv", &opts).unwrap_err();

    let text = std::fs::read_to_string(&log_path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains(" ok format=Csv"));
    assert!(lines[0].ends_with("source=tests/fixtures/scores_only.csv rows=3 columns=4"));
    assert!(lines[1].contains(" fail severity=Critical"));
    assert!(lines[2].contains(" ALERT severity=Critical"));

    let _ = std::fs::remove_file(&log_path);
}
