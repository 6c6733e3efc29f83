use crate::error::AggregatorError;
use crate::Result;

use csv::{ReaderBuilder, StringRecord};
use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

/// Columns copied from the source table into the dataset, in output order.
pub const PASSTHROUGH_COLUMNS: [&str; 6] = [
    "vote_average",
    "vote_count",
    "belongs_to_collection",
    "genres",
    "production_companies",
    "spoken_languages",
];

/// The movie metadata table the dataset is built from.
#[derive(Debug)]
pub struct MoviesTable {
    rows: Vec<StringRecord>,
    id_index: usize,
    passthrough: [usize; PASSTHROUGH_COLUMNS.len()],
}

impl MoviesTable {
    pub fn from_path(path: impl AsRef<Path>, id_column: &str) -> Result<MoviesTable> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Self::from_reader(file, id_column, path)
    }

    /// `source` only names the table in errors.
    pub fn from_reader<R: Read>(reader: R, id_column: &str, source: &Path) -> Result<MoviesTable> {
        let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = rdr.headers()?.clone();

        let position = |column: &str| {
            headers
                .iter()
                .position(|header| header.trim() == column)
                .ok_or_else(|| AggregatorError::MissingColumn {
                    column: column.to_owned(),
                    path: PathBuf::from(source),
                })
        };

        let id_index = position(id_column)?;
        let mut passthrough = [0; PASSTHROUGH_COLUMNS.len()];
        for (index, column) in PASSTHROUGH_COLUMNS.iter().enumerate() {
            passthrough[index] = position(column)?;
        }

        let rows = rdr.records().collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(MoviesTable {
            rows,
            id_index,
            passthrough,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn truncate(&mut self, limit: usize) {
        self.rows.truncate(limit);
    }

    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    /// Ragged rows that stop before the identifier column yield an empty identifier.
    pub fn identifier<'a>(&self, row: &'a StringRecord) -> &'a str {
        row.get(self.id_index).map(str::trim).unwrap_or("")
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(|row| self.identifier(row))
    }

    pub fn passthrough<'a>(&'a self, row: &'a StringRecord) -> impl Iterator<Item = &'a str> + 'a {
        self.passthrough
            .iter()
            .map(move |&index| row.get(index).unwrap_or(""))
    }
}
