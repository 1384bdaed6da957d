/// Unit tests of the public API that need no database file
mod basic_tests;
mod wire_format;
