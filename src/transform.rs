use crate::sources::movies_csv::PASSTHROUGH_COLUMNS;
use crate::sources::{Movie, MoviesTable};
use crate::{Enrichment, Result};

use std::{collections::HashMap, fs::File, io::Write, path::Path};
use time::{format_description::FormatItem, macros::format_description};

const RELEASED_OUTPUT_FORMAT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

pub const MOVIE_COLUMNS: [&str; 16] = [
    "imdbID",
    "Title",
    "Year",
    "Rated",
    "Budget",
    "Domestic Gross",
    "Opening Weekend",
    "imdbRating",
    "imdbVotes",
    "Rotten Tomatoes Score",
    "Metascore",
    "Runtime",
    "Director",
    "Actors",
    "Released",
    "Awards",
];

#[derive(Debug, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<Vec<String>>,
}

impl Dataset {
    pub fn headers() -> impl Iterator<Item = &'static str> {
        MOVIE_COLUMNS.into_iter().chain(PASSTHROUGH_COLUMNS)
    }

    /// Joins every table row to the enrichment of its own identifier, so one
    /// failed lookup never shifts the rows that follow it.
    pub fn assemble(table: &MoviesTable, enrichments: &HashMap<String, Enrichment>) -> Result<Dataset> {
        let mut rows = Vec::with_capacity(table.len());

        for row in table.rows() {
            let imdb_id = table.identifier(row);
            let mut cells = match enrichments.get(imdb_id) {
                Some(Enrichment::Enriched(movie)) => Self::movie_cells(imdb_id, movie)?,
                _ => Self::empty_cells(imdb_id),
            };
            cells.extend(table.passthrough(row).map(ToOwned::to_owned));
            rows.push(cells);
        }

        Ok(Dataset { rows })
    }

    fn movie_cells(imdb_id: &str, movie: &Movie) -> Result<Vec<String>> {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        let released = match movie.released {
            Some(released) => released.format(RELEASED_OUTPUT_FORMAT)?,
            None => String::new(),
        };

        Ok(vec![
            imdb_id.to_owned(),
            text(&movie.title),
            text(&movie.year),
            text(&movie.rated),
            text(&movie.box_office.budget),
            text(&movie.box_office.domestic_gross),
            text(&movie.box_office.opening_weekend),
            text(&movie.imdb_rating),
            text(&movie.imdb_votes),
            movie
                .rotten_tomatoes_score
                .map(|score| score.to_string())
                .unwrap_or_default(),
            text(&movie.metascore),
            text(&movie.runtime),
            text(&movie.director),
            text(&movie.actors),
            released,
            text(&movie.awards),
        ])
    }

    fn empty_cells(imdb_id: &str) -> Vec<String> {
        let mut cells = vec![String::new(); MOVIE_COLUMNS.len()];
        cells[0] = imdb_id.to_owned();
        cells
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn write<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(Self::headers())?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;

        Ok(())
    }

    pub fn write_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        self.write(file)
    }
}
