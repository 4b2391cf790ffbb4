use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use poleplace_control::PlantState;

/// Log file the server appends to, relative to its working directory.
pub const DEFAULT_LOG_PATH: &str = "data.csv";

/// Destination for per-session `Vo,V1` records.
///
/// Failures are reported to the caller, which treats logging as best effort.
pub trait LogSink {
    fn append(&mut self, state: &PlantState) -> io::Result<()>;
}

impl<S: LogSink + ?Sized> LogSink for &mut S {
    fn append(&mut self, state: &PlantState) -> io::Result<()> {
        (**self).append(state)
    }
}

impl<S: LogSink + ?Sized> LogSink for Box<S> {
    fn append(&mut self, state: &PlantState) -> io::Result<()> {
        (**self).append(state)
    }
}

/// One CSV line: `Vo,V1` with six decimals and a trailing newline.
pub fn format_record(state: &PlantState) -> String {
    format!("{:.6},{:.6}\n", state.vo, state.v1)
}

/// Appends records to a CSV file.
///
/// The file is opened (created if missing), appended and closed on every
/// record, so no handle is held between sessions. The file is never truncated
/// or rotated and grows without bound.
#[derive(Debug, Clone)]
pub struct CsvFileSink {
    path: PathBuf,
}

impl Default for CsvFileSink {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_PATH)
    }
}

impl CsvFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for CsvFileSink {
    fn append(&mut self, state: &PlantState) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(format_record(state).as_bytes())
    }
}

/// Keeps records in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[String] {
        &self.records
    }

    /// All records as they would appear in the CSV file.
    pub fn contents(&self) -> String {
        self.records.concat()
    }
}

impl LogSink for MemorySink {
    fn append(&mut self, state: &PlantState) -> io::Result<()> {
        self.records.push(format_record(state));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unique_temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "poleplace-{tag}-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("time should be after epoch")
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
        dir
    }

    #[test]
    fn record_format_has_six_decimals() {
        assert_eq!(
            format_record(&PlantState::new(1.0, -0.04)),
            "1.000000,-0.040000\n"
        );
        assert_eq!(
            format_record(&PlantState::new(0.0, 0.0)),
            "0.000000,0.000000\n"
        );
    }

    #[test]
    fn csv_sink_appends_and_creates() {
        let dir = unique_temp_dir("csv");
        let path = dir.join("data.csv");
        let mut sink = CsvFileSink::new(&path);

        sink.append(&PlantState::new(1.0, 0.0)).unwrap();
        sink.append(&PlantState::new(-5.12, 0.04)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "1.000000,0.000000\n-5.120000,0.040000\n");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn csv_sink_keeps_existing_lines() {
        let dir = unique_temp_dir("csv-existing");
        let path = dir.join("data.csv");
        std::fs::write(&path, "old,line\n").unwrap();

        CsvFileSink::new(&path)
            .append(&PlantState::new(0.5, 0.5))
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "old,line\n0.500000,0.500000\n");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn csv_sink_reports_open_failure() {
        let dir = unique_temp_dir("csv-missing");
        let mut sink = CsvFileSink::new(dir.join("no-such-dir").join("data.csv"));
        assert!(sink.append(&PlantState::default()).is_err());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn default_path_is_relative_data_csv() {
        assert_eq!(CsvFileSink::default().path(), Path::new("data.csv"));
    }

    fn append_through<S: LogSink>(mut sink: S, state: PlantState) {
        sink.append(&state).unwrap();
    }

    #[test]
    fn boxed_sinks_forward_appends() {
        let mut boxed = Box::new(MemorySink::new());
        append_through(&mut boxed, PlantState::new(1.0, 0.0));
        assert_eq!(boxed.records(), ["1.000000,0.000000\n"]);

        let dir = unique_temp_dir("csv-boxed");
        let path = dir.join("data.csv");
        let dynamic: Box<dyn LogSink> = Box::new(CsvFileSink::new(&path));
        append_through(dynamic, PlantState::new(-1.0, 0.5));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "-1.000000,0.500000\n"
        );

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn memory_sink_collects_records() {
        let mut sink = MemorySink::new();
        sink.append(&PlantState::new(1.0, 2.0)).unwrap();
        append_through(&mut sink, PlantState::new(3.0, 4.0));
        assert_eq!(sink.records().len(), 2);
        assert_eq!(
            sink.contents(),
            "1.000000,2.000000\n3.000000,4.000000\n"
        );
    }
}
