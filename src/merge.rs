use crate::cli::Args;
use anyhow::{Context, Result};
use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Value written for a key the file never mentions
pub const MISSING_VALUE: &str = "0";

#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("cannot read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(
        "{}:{line}: expected `<key> <value>`, found {tokens} field(s)",
        .path.display()
    )]
    Parse {
        path: PathBuf,
        line: usize,
        tokens: usize,
    },
}

/// Parse `<key> <value>` lines; a repeated key keeps its last value
pub fn parse_pairs<R: BufRead>(
    path: &Path,
    reader: R,
) -> Result<HashMap<String, String>, MergeError> {
    let mut values = HashMap::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| MergeError::Io {
            path: path.to_owned(),
            source,
        })?;

        let mut fields = line.split_ascii_whitespace();
        match (fields.next(), fields.next(), fields.next()) {
            (None, _, _) => continue,
            (Some(key), Some(value), None) => {
                values.insert(key.to_owned(), value.to_owned());
            }
            _ => {
                return Err(MergeError::Parse {
                    path: path.to_owned(),
                    line: idx + 1,
                    tokens: line.split_ascii_whitespace().count(),
                });
            }
        }
    }

    Ok(values)
}

/// One input file and the pairs it holds
#[derive(Debug)]
pub struct ResultFile {
    pub path: PathBuf,
    pub values: HashMap<String, String>,
}

impl ResultFile {
    pub fn read(path: &Path) -> Result<Self, MergeError> {
        let file = File::open(path).map_err(|source| MergeError::Io {
            path: path.to_owned(),
            source,
        })?;
        let values = parse_pairs(path, BufReader::new(file))?;
        let result = Self {
            path: path.to_owned(),
            values,
        };
        debug!(
            path = %result.path.display(),
            pairs = result.values.len(),
            "read result file"
        );

        Ok(result)
    }

    fn get(&self, key: &str) -> &str {
        self.values.get(key).map_or(MISSING_VALUE, String::as_str)
    }
}

/// Union of keys across files, one column per file
#[derive(Debug)]
pub struct Table {
    keys: BTreeSet<String>,
    files: Vec<ResultFile>,
}

impl Table {
    pub fn new(files: Vec<ResultFile>) -> Self {
        let keys = files
            .iter()
            .flat_map(|f| f.values.keys().cloned())
            .collect();
        Self { keys, files }
    }

    /// Read every file in order, failing on the first bad one
    pub fn from_files(paths: &[PathBuf]) -> Result<Self, MergeError> {
        let files = paths
            .iter()
            .map(|p| ResultFile::read(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(files))
    }

    pub fn write_tsv<W: Write>(&self, w: &mut W) -> io::Result<()> {
        for key in &self.keys {
            w.write_all(key.as_bytes())?;
            for file in &self.files {
                write!(w, "\t{}", file.get(key))?;
            }
            writeln!(w)?;
        }
        Ok(())
    }
}

pub fn run(args: Args) -> Result<()> {
    // Nothing reaches stdout unless every file parsed.
    let table = Table::from_files(&args.files)?;
    debug!(
        rows = table.keys.len(),
        columns = table.files.len(),
        "merged result files"
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    table
        .write_tsv(&mut out)
        .and_then(|()| out.flush())
        .context("failed to write table")?;

    Ok(())
}
