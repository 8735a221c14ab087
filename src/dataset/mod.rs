// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Dataset assembly
//!
//! Turns crawl outputs and payload lists into labelled feature rows and
//! writes them as CSV. The header is the first row's keys; a row with any
//! other key list fails the whole write.

pub mod assembler;
pub mod payloads;
pub mod pipeline;
pub mod sources;
pub mod writer;

pub use assembler::{assemble, extract_page, ClassLabel};
pub use payloads::{generate_payloads, load_payloads, payload_record, payload_records, Payload, XssType};
pub use pipeline::{extract_all, generate, GenerateOptions, GenerateReport};
pub use sources::{
    archive_jobs, load_archive_items, load_walk_records, walk_jobs, PageJob, WalkRecord,
    XSS_CATEGORIES,
};
pub use writer::{check_schema, write_csv, write_records};
