//! Run summary reporting
//!
//! This module collects the counters of a harvest run and prints them once
//! the run is over.

use crate::discussion::{DiagnosticKind, StreamReport};
use std::fmt;
use std::path::PathBuf;

/// Where a run's discussion links came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOrigin {
    /// A single link given on the command line
    SingleLink,
    /// The structured topic list of a competition forum
    ForumApi,
    /// The rendered site-wide listing page
    Listing,
    /// The rendered listing page of a competition
    CompetitionListing,
    /// Every source came back empty
    Nothing,
}

impl fmt::Display for LinkOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LinkOrigin::SingleLink => "single link",
            LinkOrigin::ForumApi => "forum topic list",
            LinkOrigin::Listing => "listing page",
            LinkOrigin::CompetitionListing => "competition listing page",
            LinkOrigin::Nothing => "none",
        };
        f.write_str(label)
    }
}

/// Counters of one harvest run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub origin: LinkOrigin,

    /// Links handed to the resolution stream
    pub links_collected: usize,

    /// Resolution counters and per-link diagnostics
    pub stream: StreamReport,

    /// Documents written under a new name
    pub created: usize,

    /// Existing documents overwritten in place
    pub updated: usize,

    /// Records that resolved but could not be written
    pub save_failures: usize,

    /// Every written document, in write order
    pub saved_paths: Vec<PathBuf>,
}

impl RunSummary {
    pub fn new(origin: LinkOrigin, links_collected: usize) -> Self {
        Self {
            origin,
            links_collected,
            stream: StreamReport::default(),
            created: 0,
            updated: 0,
            save_failures: 0,
            saved_paths: Vec::new(),
        }
    }

    pub fn saved(&self) -> usize {
        self.created + self.updated
    }

    /// True when every collected link ended up on disk
    pub fn is_clean(&self) -> bool {
        self.stream.skipped == 0 && self.save_failures == 0
    }
}

/// Prints the run summary to stdout
pub fn print_summary(summary: &RunSummary) {
    println!("=== Harvest Summary ===\n");

    println!("Links:");
    println!("  Source: {}", summary.origin);
    println!("  Collected: {}", summary.links_collected);
    println!();

    let stream = &summary.stream;
    println!("Resolution:");
    println!("  Via API: {}", stream.via_api);
    println!("  Via HTML: {}", stream.via_html);
    println!("  Skipped: {}", stream.skipped);
    println!("  Empty bodies: {}", stream.empty_bodies);
    println!();

    println!("Documents:");
    println!("  Created: {}", summary.created);
    println!("  Updated: {}", summary.updated);
    println!("  Save failures: {}", summary.save_failures);
    println!();

    let skipped: Vec<_> = stream.of_kind(DiagnosticKind::Skipped).collect();
    if !skipped.is_empty() {
        println!("Skipped Links ({}):", skipped.len());
        for diag in skipped {
            println!("  - {}: {}", diag.url, diag.detail);
        }
        println!();
    }

    let empty: Vec<_> = stream.of_kind(DiagnosticKind::EmptyBody).collect();
    if !empty.is_empty() {
        println!("Empty Bodies ({}):", empty.len());
        for diag in empty {
            println!("  - {}", diag.url);
        }
        println!();
    }

    let rate = if summary.links_collected > 0 {
        (summary.saved() as f64 / summary.links_collected as f64) * 100.0
    } else {
        0.0
    };
    println!(
        "Saved: {:.1}% ({} / {} links)",
        rate,
        summary.saved(),
        summary.links_collected
    );
}
