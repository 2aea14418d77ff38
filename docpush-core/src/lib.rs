#![doc = "docpush-core: core pipeline library for docpush."]

//! Block model, markup parsing, batched upload and result notification for
//! publishing lightweight-markup documents into a remote document store.
//! Vendor HTTP glue lives in the `docpush` binary crate.
//!
//! # Usage
//! Add this as a dependency for the pipeline, contracts and settings; supply
//! concrete [`contract::DocumentStore`] and [`contract::Notifier`]
//! implementations (or the exported mocks) to [`publish::publish`].

pub mod batch;
pub mod block;
pub mod config;
pub mod contract;
pub mod markup;
pub mod notify;
pub mod publish;
