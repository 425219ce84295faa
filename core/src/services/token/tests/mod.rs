//! Unit tests for the token codec
