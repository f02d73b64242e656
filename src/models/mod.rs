//! Data models for the Bibliothèque server

pub mod bibliographic;
pub mod book;
pub mod storage;

// Re-export commonly used types
pub use bibliographic::{BibliographicRecord, Placement};
pub use book::{Book, BookQuery, BookStatus, CreateBook, UpdateBook};
pub use storage::{CreatePlacard, CreateShelf, Placard, Shelf, StorageType};
