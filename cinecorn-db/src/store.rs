//! The catalog store: sole owner of the schema and all writes.
//!
//! [`CatalogStore`] borrows a caller-owned connection. It starts out
//! [`StoreState::Uninitialized`] and becomes [`StoreState::Ready`] after
//! [`CatalogStore::initialize`]; writes are rejected before that.

use cinecorn_catalog::types::{ArtworkPaths, Movie, MovieRecord, Role};
use rusqlite::Connection;

use crate::operations::{self, InsertOutcome, OperationError};
use crate::queries;
use crate::schema::{self, InitOutcome, SchemaError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Uninitialized,
    Ready,
}

/// Counts of what [`CatalogStore::persist_record`] wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistOutcome {
    pub movie_inserted: bool,
    pub people_added: usize,
    pub links_added: usize,
    pub genres_added: usize,
    pub duplicates: usize,
}

pub struct CatalogStore<'conn> {
    conn: &'conn Connection,
    state: StoreState,
}

impl<'conn> CatalogStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            state: StoreState::Uninitialized,
        }
    }

    /// Create the schema if needed and mark the store ready. Idempotent.
    pub fn initialize(&mut self) -> Result<InitOutcome, SchemaError> {
        let outcome = schema::initialize(self.conn)?;
        self.state = StoreState::Ready;
        Ok(outcome)
    }

    pub fn state(&self) -> StoreState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == StoreState::Ready
    }

    /// The underlying connection, for read queries.
    pub fn connection(&self) -> &'conn Connection {
        self.conn
    }

    pub fn add_movie(&self, movie: &Movie) -> Result<bool, OperationError> {
        self.ensure_ready()?;
        Ok(operations::add_movie(self.conn, movie)?.is_inserted())
    }

    pub fn add_person(&self, pid: &str, name: &str) -> Result<bool, OperationError> {
        self.ensure_ready()?;
        Ok(operations::add_person(self.conn, pid, name)?.is_inserted())
    }

    pub fn add_directs(&self, pid: &str, mid: &str) -> Result<bool, OperationError> {
        self.ensure_ready()?;
        Ok(operations::add_directs(self.conn, pid, mid)?.is_inserted())
    }

    pub fn add_acts(&self, pid: &str, mid: &str) -> Result<bool, OperationError> {
        self.ensure_ready()?;
        Ok(operations::add_acts(self.conn, pid, mid)?.is_inserted())
    }

    pub fn add_genre(&self, mid: &str, genre: &str) -> Result<bool, OperationError> {
        self.ensure_ready()?;
        Ok(operations::add_genre(self.conn, mid, genre)?.is_inserted())
    }

    /// Whether a file has already been cataloged.
    pub fn contains(&self, filename: &str) -> Result<bool, OperationError> {
        self.ensure_ready()?;
        queries::movie_exists(self.conn, filename)
    }

    /// Write a movie together with its people, credits, and genres.
    ///
    /// Everything is written in one transaction. If the movie row itself is a
    /// duplicate, nothing else is written.
    pub fn persist_record(
        &self,
        filename: &str,
        record: &MovieRecord,
        artwork: &ArtworkPaths,
    ) -> Result<PersistOutcome, OperationError> {
        self.ensure_ready()?;

        let movie = Movie::from_record(filename, record, artwork);
        let tx = self.conn.unchecked_transaction()?;
        let mut outcome = PersistOutcome::default();

        if operations::add_movie(&tx, &movie)? == InsertOutcome::Duplicate {
            outcome.duplicates += 1;
            tx.commit()?;
            return Ok(outcome);
        }
        outcome.movie_inserted = true;

        for (role, pid, name) in record.people() {
            let person = operations::add_person(&tx, pid, name)?;
            tally(&mut outcome.people_added, &mut outcome.duplicates, person);
            let link = match role {
                Role::Actor => operations::add_acts(&tx, pid, &record.mid)?,
                Role::Director => operations::add_directs(&tx, pid, &record.mid)?,
            };
            tally(&mut outcome.links_added, &mut outcome.duplicates, link);
        }

        for genre in &record.genres {
            let tagged = operations::add_genre(&tx, &record.mid, genre)?;
            tally(&mut outcome.genres_added, &mut outcome.duplicates, tagged);
        }

        tx.commit()?;
        log::debug!(
            "Persisted '{}' ({}): {} people, {} credits, {} genres",
            filename,
            record.mid,
            outcome.people_added,
            outcome.links_added,
            outcome.genres_added,
        );
        Ok(outcome)
    }

    fn ensure_ready(&self) -> Result<(), OperationError> {
        match self.state {
            StoreState::Ready => Ok(()),
            StoreState::Uninitialized => Err(OperationError::NotInitialized),
        }
    }
}

fn tally(added: &mut usize, duplicates: &mut usize, outcome: InsertOutcome) {
    match outcome {
        InsertOutcome::Inserted => *added += 1,
        InsertOutcome::Duplicate => *duplicates += 1,
    }
}
