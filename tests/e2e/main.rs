//! E2E test suite entry point.

mod shareable_link_workflow;
