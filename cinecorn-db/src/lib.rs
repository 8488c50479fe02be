//! SQLite persistence layer for the movie catalog.
//!
//! Provides schema creation, insert-only write operations, and query APIs
//! backed by SQLite (via rusqlite with bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;
pub mod store;

pub use operations::{
    InsertOutcome, OperationError, add_acts, add_directs, add_genre, add_movie, add_person,
};
pub use queries::{
    CatalogStats, IndexLetter, cast_for_movie, catalog_stats, directors_for_movie,
    find_movie_by_filename, find_movie_by_mid, genres_for_movie, index_letters, list_movies,
    movie_exists,
};
pub use schema::{
    InitOutcome, SchemaError, initialize, open_database, open_memory, open_read_only, table_names,
};
pub use store::{CatalogStore, PersistOutcome, StoreState};
