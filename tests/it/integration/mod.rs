//! Integration tests: file loading through view, render and export.

mod cli_workflow_tests;
