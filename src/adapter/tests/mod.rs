//! Adapter tests against in-memory collaborators, grouped by operation.
