//! Dataset export: flat CSV table or JSON Lines
//!
//! The whole dataset is in memory before writing starts. A failure part way
//! through (disk full, closed pipe) is returned to the caller and can leave a
//! truncated file behind; nothing is cleaned up.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use super::{Dataset, DatasetError};

/// Header row of the CSV table
pub const CSV_HEADER: &str = "sample_id,timestamp,acc_x,acc_y,acc_z,gyro_x,gyro_y,gyro_z,label";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum OutputFormat {
    /// Comma-separated table with a header row
    #[default]
    #[serde(rename = "csv")]
    Csv,
    /// One JSON object per row
    #[serde(rename = "jsonl")]
    #[value(name = "jsonl")]
    JsonLines,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::JsonLines => write!(f, "jsonl"),
        }
    }
}

/// Where the table goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// `-` selects stdout, anything else is a file path
    pub fn from_path(path: &Path) -> Self {
        if path.as_os_str() == "-" {
            OutputTarget::Stdout
        } else {
            OutputTarget::File(path.to_path_buf())
        }
    }
}

impl std::fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputTarget::Stdout => write!(f, "<stdout>"),
            OutputTarget::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Write the table as CSV, rows ordered by sample id then timestep.
///
/// Floats use Rust's shortest round-trip form with a decimal point
/// (`0.0`, `0.01`, `1.99`).
pub fn write_csv<W: Write>(dataset: &Dataset, mut writer: W) -> Result<(), DatasetError> {
    writeln!(writer, "{CSV_HEADER}")?;
    for row in dataset.rows() {
        writeln!(
            writer,
            "{},{:?},{:?},{:?},{:?},{:?},{:?},{:?},{}",
            row.sample_id,
            row.timestamp,
            row.acc_x,
            row.acc_y,
            row.acc_z,
            row.gyro_x,
            row.gyro_y,
            row.gyro_z,
            row.label,
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Write one JSON object per row.
pub fn write_json_lines<W: Write>(dataset: &Dataset, mut writer: W) -> Result<(), DatasetError> {
    for row in dataset.rows() {
        serde_json::to_writer(&mut writer, &row)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Write `dataset` to `target` in `format`.
pub fn export(
    dataset: &Dataset,
    target: &OutputTarget,
    format: OutputFormat,
) -> Result<(), DatasetError> {
    match target {
        OutputTarget::Stdout => {
            let stdout = io::stdout();
            write_format(dataset, BufWriter::new(stdout.lock()), format)?;
        }
        OutputTarget::File(path) => {
            let file = File::create(path)?;
            write_format(dataset, BufWriter::new(file), format)?;
        }
    }

    info!(
        target = %target,
        format = %format,
        rows = dataset.row_count(),
        "Dataset written"
    );
    Ok(())
}

fn write_format<W: Write>(
    dataset: &Dataset,
    writer: W,
    format: OutputFormat,
) -> Result<(), DatasetError> {
    match format {
        OutputFormat::Csv => write_csv(dataset, writer),
        OutputFormat::JsonLines => write_json_lines(dataset, writer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WaveformParams;
    use crate::dataset::{BatchAssembler, GenerationPlan, SilentProgress};
    use crate::types::GeneratorKind;

    fn small_dataset() -> Dataset {
        BatchAssembler::new(WaveformParams::default())
            .seed(Some(8))
            .progress(SilentProgress)
            .run(
                &GenerationPlan::new()
                    .with(GeneratorKind::Smooth, 1)
                    .with(GeneratorKind::SmoothToIrregular, 1),
            )
            .unwrap()
    }

    #[test]
    fn test_csv_header_and_row_count() {
        let ds = small_dataset();
        let mut buf = Vec::new();
        write_csv(&ds, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines.len(), 1 + 400);
        assert!(lines[1].starts_with("0,0.0,"));
        assert!(lines[1].ends_with(",liso"));
        assert!(lines[2].starts_with("0,0.01,"));
        assert!(lines[200].starts_with("0,1.99,"));
        assert!(lines[201].starts_with("1,0.0,"));
        assert!(lines[400].ends_with(",irregular"));
    }

    #[test]
    fn test_csv_values_round_trip_exactly() {
        let ds = small_dataset();
        let mut buf = Vec::new();
        write_csv(&ds, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let fields: Vec<&str> = text.lines().nth(1).unwrap().split(',').collect();
        assert_eq!(fields.len(), 9);
        let acc_z: f64 = fields[4].parse().unwrap();
        assert_eq!(acc_z, ds.samples()[0].signal.row(0).unwrap()[2]);
    }

    #[test]
    fn test_json_lines_rows() {
        let ds = small_dataset();
        let mut buf = Vec::new();
        write_json_lines(&ds, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(text.lines().count(), 400);
        let last: serde_json::Value = serde_json::from_str(text.lines().last().unwrap()).unwrap();
        assert_eq!(last["sample_id"], 1);
        assert_eq!(last["label"], "irregular");
        assert_eq!(last["timestamp"], 1.99);
    }

    #[test]
    fn test_target_from_dash_is_stdout() {
        assert_eq!(OutputTarget::from_path(Path::new("-")), OutputTarget::Stdout);
        assert_eq!(
            OutputTarget::from_path(Path::new("out.csv")),
            OutputTarget::File(PathBuf::from("out.csv"))
        );
    }

    #[test]
    fn test_write_failure_is_reported() {
        struct FullDisk;
        impl Write for FullDisk {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "no space left on device"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let err = write_csv(&small_dataset(), FullDisk).unwrap_err();
        assert!(matches!(err, DatasetError::Io(_)));
    }
}
