use super::dialect::{strip_bom, Dialect};
use super::rows::RowTransformer;
use crate::cell::SubstitutionMode;
use crate::error::{NameSwapError, Result};
use crate::names::{NameSource, SubstitutionTable};
use csv::StringRecord;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of processing one input file
#[derive(Debug)]
pub struct FileOutcome {
    pub input: PathBuf,
    /// Number of data rows written
    pub result: Result<usize>,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// `<dir>/<prefix>-<file name>` for an input at `<dir>/<file name>`
pub fn output_path(input: &Path, prefix: &str) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}-{}", prefix, name))
}

/// Read just the header row of a delimited file
pub fn read_headers(path: &Path) -> Result<Vec<String>> {
    let data = fs::read(path)?;
    let data = strip_bom(&data);
    let mut reader = Dialect::sniff(data).reader_builder().from_reader(data);
    Ok(reader.headers()?.iter().map(String::from).collect())
}

/// Columns kept from the input: blank header names are dropped along with
/// their cells
struct Layout {
    kept: Vec<usize>,
    fieldnames: Vec<String>,
    /// Field count of the original header
    width: usize,
}

impl Layout {
    fn from_headers(headers: &StringRecord) -> Self {
        let kept: Vec<usize> = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !h.trim().is_empty())
            .map(|(i, _)| i)
            .collect();
        let fieldnames = kept.iter().map(|&i| headers[i].to_string()).collect();
        Self {
            kept,
            fieldnames,
            width: headers.len(),
        }
    }

    /// Kept cells of `record`, padding short rows with empty cells
    fn project(&self, record: &StringRecord) -> Vec<String> {
        self.kept
            .iter()
            .map(|&i| record.get(i).unwrap_or("").to_string())
            .collect()
    }
}

/// Streams input files through a [`RowTransformer`], sharing one
/// substitution table across every file.
pub struct FileProcessor<S: NameSource> {
    table: SubstitutionTable<S>,
    columns: Vec<String>,
    prefix: String,
    mode: SubstitutionMode,
}

impl<S: NameSource> FileProcessor<S> {
    pub fn new(
        table: SubstitutionTable<S>,
        columns: Vec<String>,
        prefix: &str,
        mode: SubstitutionMode,
    ) -> Self {
        Self {
            table,
            columns,
            prefix: prefix.to_string(),
            mode,
        }
    }

    pub fn table(&self) -> &SubstitutionTable<S> {
        &self.table
    }

    pub fn into_table(self) -> SubstitutionTable<S> {
        self.table
    }

    /// Process every file in order. A failing file is reported and skipped.
    pub fn process_all(&mut self, files: &[PathBuf]) -> Vec<FileOutcome> {
        files
            .iter()
            .map(|input| {
                let output = output_path(input, &self.prefix);
                print!("Processing {} -> {} | ", input.display(), output.display());
                let result = self.process_file(input, &output);
                match &result {
                    Ok(_) => println!("Success"),
                    Err(NameSwapError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                        println!("Error: file not found. Skipping")
                    }
                    Err(e) => println!("Error: {}", e),
                }
                FileOutcome {
                    input: input.clone(),
                    result,
                }
            })
            .collect()
    }

    /// Rewrite `input` into `output`. On failure no output file is left behind.
    pub fn process_file(&mut self, input: &Path, output: &Path) -> Result<usize> {
        let data = fs::read(input)?;
        let data = strip_bom(&data);
        let dialect = Dialect::sniff(data);
        log::debug!("{}: detected dialect {:?}", input.display(), dialect);

        let mut reader = dialect.reader_builder().from_reader(data);
        let headers = reader.headers()?.clone();
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(NameSwapError::NoHeaders);
        }

        let layout = Layout::from_headers(&headers);
        if layout.kept.len() < layout.width {
            log::info!(
                "{}: dropping {} column(s) with empty header",
                input.display(),
                layout.width - layout.kept.len()
            );
        }

        let transformer =
            RowTransformer::for_headers(&layout.fieldnames, &self.columns, self.mode);
        if !transformer.has_targets() {
            return Err(NameSwapError::NoTargetColumns);
        }

        let written =
            self.write_renamed(&mut reader, input, output, &dialect, &layout, &transformer);
        if written.is_err() && output.exists() {
            if let Err(e) = fs::remove_file(output) {
                log::warn!("Could not remove partial output {}: {}", output.display(), e);
            }
        }
        written
    }

    fn write_renamed(
        &mut self,
        reader: &mut csv::Reader<&[u8]>,
        input: &Path,
        output: &Path,
        dialect: &Dialect,
        layout: &Layout,
        transformer: &RowTransformer,
    ) -> Result<usize> {
        let mut writer = dialect.writer_builder().from_path(output)?;
        writer.write_record(&layout.fieldnames)?;

        let mut rows = 0;
        let mut record = StringRecord::new();
        while reader.read_record(&mut record)? {
            if record.len() > layout.width {
                log::warn!(
                    "{}: line {} has {} fields but the header has {}; extra fields are dropped",
                    input.display(),
                    record.position().map(|p| p.line()).unwrap_or(0),
                    record.len(),
                    layout.width
                );
            }
            let mut row = layout.project(&record);
            transformer.apply(&mut self.table, &mut row);
            writer.write_record(&row)?;
            rows += 1;
        }

        writer.flush()?;
        Ok(rows)
    }
}
