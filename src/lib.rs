//! PageGrab - terminal client for a page analysis backend.
//!
//! The backend scrapes a web page and answers with the code blocks and
//! linked files it found. This crate consumes that contract: the
//! [`controller::AnalysisController`] drives the analyze and download
//! flows against a [`backend::Backend`] and renders into injected
//! [`view::AnalysisView`] and [`view::Notifier`] implementations.

pub mod backend;
pub mod cli;
pub mod config;
pub mod controller;
pub mod models;
pub mod session;
pub mod view;
