//! Delimiter and quoting detection from a sample of file content

use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};

/// Bytes of input inspected when detecting the dialect
pub const SAMPLE_SIZE: usize = 1024;

/// Delimiters tried, in order of preference
const CANDIDATE_DELIMITERS: [u8; 5] = [b',', b';', b'\t', b'|', b':'];

/// Used for files whose header holds no candidate delimiter, so that commas
/// and spaces inside the one column never split a cell
pub const SINGLE_COLUMN_DELIMITER: u8 = 0x1f;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Layout conventions of a delimited file, reused when writing its output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    pub delimiter: u8,
    pub quote_all: bool,
    pub crlf: bool,
}

impl Default for Dialect {
    /// Plain comma-separated values with minimal quoting
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote_all: false,
            crlf: false,
        }
    }
}

impl Dialect {
    /// Guess the dialect from the start of `data`
    pub fn sniff(data: &[u8]) -> Self {
        let sample = sample_lines(data);
        let lines: Vec<&[u8]> = sample
            .split(|&b| b == b'\n')
            .map(|l| l.strip_suffix(b"\r").unwrap_or(l))
            .filter(|l| !l.is_empty())
            .collect();

        let delimiter = match detect_delimiter(&lines) {
            Some(d) => d,
            None if lines.is_empty() => b',',
            None => {
                log::debug!("No delimiter in header, reading as a single column");
                SINGLE_COLUMN_DELIMITER
            }
        };

        Self {
            delimiter,
            quote_all: sample.contains(&b'"'),
            crlf: sample.windows(2).any(|w| w == b"\r\n"),
        }
    }

    pub fn reader_builder(&self) -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder.delimiter(self.delimiter).flexible(true);
        builder
    }

    pub fn writer_builder(&self) -> WriterBuilder {
        let mut builder = WriterBuilder::new();
        builder
            .delimiter(self.delimiter)
            .flexible(true)
            .quote_style(if self.quote_all {
                QuoteStyle::Always
            } else {
                QuoteStyle::Necessary
            })
            .terminator(if self.crlf {
                Terminator::CRLF
            } else {
                Terminator::Any(b'\n')
            });
        builder
    }
}

/// Drop a leading UTF-8 byte order mark
pub fn strip_bom(data: &[u8]) -> &[u8] {
    data.strip_prefix(UTF8_BOM).unwrap_or(data)
}

/// First [`SAMPLE_SIZE`] bytes, cut back to the last complete line if the
/// sample ends mid-line
fn sample_lines(data: &[u8]) -> &[u8] {
    if data.len() <= SAMPLE_SIZE {
        return data;
    }
    let sample = &data[..SAMPLE_SIZE];
    match sample.iter().rposition(|&b| b == b'\n') {
        Some(pos) => &sample[..pos],
        None => sample,
    }
}

/// Occurrences of `delimiter` outside double-quoted sections
fn count_unquoted(line: &[u8], delimiter: u8) -> usize {
    let mut in_quotes = false;
    let mut count = 0;
    for &b in line {
        if b == b'"' {
            in_quotes = !in_quotes;
        } else if b == delimiter && !in_quotes {
            count += 1;
        }
    }
    count
}

fn detect_delimiter(lines: &[&[u8]]) -> Option<u8> {
    if lines.is_empty() {
        return None;
    }

    // A delimiter that splits every line into the same number of fields wins
    for &candidate in &CANDIDATE_DELIMITERS {
        let first = count_unquoted(lines[0], candidate);
        if first > 0 && lines.iter().all(|l| count_unquoted(l, candidate) == first) {
            return Some(candidate);
        }
    }

    // Otherwise the most frequent one that also occurs in the header line.
    // Reversed so ties go to the earlier candidate.
    CANDIDATE_DELIMITERS
        .iter()
        .rev()
        .filter(|&&d| count_unquoted(lines[0], d) > 0)
        .map(|&d| (d, lines.iter().map(|l| count_unquoted(l, d)).sum::<usize>()))
        .max_by_key(|&(_, total)| total)
        .map(|(d, _)| d)
}
