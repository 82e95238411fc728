//! Output sinks for qualifying papers.
//!
//! Papers are either written as CSV with a fixed six-column header or printed
//! to the console as one block of named fields per paper.

use crate::error::Result;
use crate::models::{PaperRecord, PaperRow, PAPER_COLUMNS};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Destination for a run's papers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    /// CSV file at the given path
    Csv(PathBuf),
    /// Standard output
    Console,
}

impl OutputSink {
    /// CSV when a path is given, console otherwise
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map(OutputSink::Csv).unwrap_or(OutputSink::Console)
    }

    /// Write `papers` to this sink in order.
    pub fn emit(&self, papers: &[PaperRecord]) -> Result<()> {
        match self {
            OutputSink::Csv(path) => save_csv(path, papers),
            OutputSink::Console => {
                let stdout = std::io::stdout();
                let mut out = stdout.lock();
                print_papers(&mut out, papers)?;
                out.flush()?;
                Ok(())
            }
        }
    }
}

/// Save papers to a CSV file, header included even when there are none.
pub fn save_csv(path: &Path, papers: &[PaperRecord]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(file, papers)?;
    info!(path = %path.display(), rows = papers.len(), "Saved CSV");
    Ok(())
}

/// Write the header and one row per paper to `writer`.
pub fn write_csv<W: Write>(writer: W, papers: &[PaperRecord]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(PAPER_COLUMNS)?;
    for paper in papers {
        wtr.serialize(PaperRow::from(paper))?;
    }

    wtr.flush()?;
    Ok(())
}

/// Printable block of `Column: value` lines for one paper
pub fn render_paper(paper: &PaperRecord) -> String {
    let row = PaperRow::from(paper);
    PAPER_COLUMNS
        .iter()
        .zip(row.values())
        .map(|(column, value)| format!("{}: {}", column, value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print every paper as a block, separated by blank lines.
pub fn print_papers<W: Write>(out: &mut W, papers: &[PaperRecord]) -> Result<()> {
    for paper in papers {
        writeln!(out, "{}\n", render_paper(paper))?;
    }
    Ok(())
}
