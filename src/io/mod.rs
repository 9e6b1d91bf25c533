//! Readers and writers for the formats the command-line tool exchanges.
//! The districting engine itself works purely on in-memory structures.

pub mod csv;
pub mod geojson;
pub mod json;
