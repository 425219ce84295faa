//! Tests for the fixed-window rate limiter
