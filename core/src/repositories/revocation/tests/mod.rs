//! Tests for the revocation store
