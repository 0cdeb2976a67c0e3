//! Unit tests for notifier adapters
