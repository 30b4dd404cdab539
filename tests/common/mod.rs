//! Shared test helpers for integration tests.

use std::io::Cursor;

use leantree_augment::corpus::CorpusReader;

/// Loads a fixture file from the `tests/fixtures/` directory.
///
/// # Panics
///
/// Panics if the file cannot be read.
pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{name}"))
        .unwrap_or_else(|e| panic!("failed to read fixture {name}: {e}"))
}

/// Opens a fixture corpus as an in-memory reader named after the file.
pub fn fixture_corpus(name: &str) -> CorpusReader<Cursor<String>> {
    CorpusReader::new(format!("tests/fixtures/{name}"), Cursor::new(load_fixture(name)))
}
