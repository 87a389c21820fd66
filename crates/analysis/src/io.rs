//! Loading mutation-call CSV files.
//!
//! File names encode the sample, e.g. `Ara-1_500gen_762B.csv` is strain
//! `Ara-1` at generation 500 with file id `762B`. Columns are
//! `seq_id, position, ref_base, new_base, new_cov, ref_cov, total_cov,
//! frequency` after a header row.

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, warn};
use regex::Regex;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::errors::ObservedDataError;
use crate::observed::{MutationCall, ObservedFile};

/// Strain, generation and file id, matched anywhere in a file name.
pub const FILE_NAME_PATTERN: &str = r"(?i)(Ara[+-]\d+)_(\d+)gen_(\w+)";

/// Sample identity parsed from a file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileName {
    pub strain: String,
    pub generation: usize,
    pub file_id: String,
}

/// Reader for mutation-call files.
#[derive(Debug, Clone)]
pub struct ObservedReader {
    pattern: Regex,
}

impl ObservedReader {
    pub fn new() -> Result<Self, ObservedDataError> {
        Ok(Self {
            pattern: Regex::new(FILE_NAME_PATTERN)?,
        })
    }

    /// Parse strain, generation and file id from `name`.
    pub fn parse_file_name(&self, name: &str) -> Option<FileName> {
        let caps = self.pattern.captures(name)?;
        Some(FileName {
            strain: caps.get(1)?.as_str().to_string(),
            generation: caps.get(2)?.as_str().parse().ok()?,
            file_id: caps.get(3)?.as_str().to_string(),
        })
    }

    /// Read all well-formed calls from CSV text with a header row.
    ///
    /// Rows with an empty `seq_id`, a non-integer `position` or a
    /// non-numeric `frequency` are dropped. Returns the calls and the number
    /// of dropped rows.
    pub fn read_calls<R: Read>(&self, reader: R) -> Result<(Vec<MutationCall>, usize), csv::Error> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut calls = Vec::new();
        let mut dropped = 0;
        for record in rdr.records() {
            match parse_call(&record?) {
                Some(call) => calls.push(call),
                None => dropped += 1,
            }
        }
        Ok((calls, dropped))
    }

    /// Parse a file's name and contents.
    pub fn read_file<R: Read>(&self, name: &str, reader: R) -> Result<ObservedFile, ObservedDataError> {
        let parsed = self
            .parse_file_name(name)
            .ok_or_else(|| ObservedDataError::FileName(name.to_string()))?;

        let (calls, dropped) = self.read_calls(reader).map_err(|source| ObservedDataError::Csv {
            name: name.to_string(),
            source,
        })?;
        if dropped > 0 {
            warn!("{name}: skipped {dropped} malformed rows");
        }
        debug!(
            "{name}: {} calls for {} at generation {}",
            calls.len(),
            parsed.strain,
            parsed.generation
        );

        Ok(ObservedFile {
            name: name.to_string(),
            strain: parsed.strain,
            generation: parsed.generation,
            file_id: parsed.file_id,
            calls,
        })
    }

    /// Load one file from disk.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<ObservedFile, ObservedDataError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file = File::open(path).map_err(|source| ObservedDataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.read_file(&name, file)
    }

    /// Load several files. Files whose names cannot be parsed are skipped
    /// with a warning; any other failure aborts.
    pub fn load_files<P: AsRef<Path>>(
        &self,
        paths: impl IntoIterator<Item = P>,
    ) -> Result<Vec<ObservedFile>, ObservedDataError> {
        let mut files = Vec::new();
        for path in paths {
            match self.load_file(path) {
                Ok(file) => files.push(file),
                Err(ObservedDataError::FileName(name)) => {
                    warn!("Could not parse file name: {name}");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(files)
    }
}

fn parse_call(record: &StringRecord) -> Option<MutationCall> {
    let seq_id = record.get(0).filter(|s| !s.is_empty())?;
    let position = record.get(1)?.parse().ok()?;
    let frequency = record
        .get(7)?
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())?;

    let text = |idx: usize| record.get(idx).unwrap_or_default().to_string();
    let count = |idx: usize| record.get(idx).and_then(|s| s.parse().ok());

    Some(MutationCall {
        seq_id: seq_id.to_string(),
        position,
        ref_base: text(2),
        new_base: text(3),
        new_cov: count(4),
        ref_cov: count(5),
        total_cov: count(6),
        frequency,
    })
}
