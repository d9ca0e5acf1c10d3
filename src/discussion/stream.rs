//! Ordered, paced resolution of many links
//!
//! The stream resolves one link at a time in input order. A failing link is
//! logged and skipped; it never ends the stream.

use crate::api::Endpoints;
use crate::discussion::resolver::{resolve, ResolvedDiscussion};
use crate::discussion::Source;
use crate::http::Session;
use crate::url::extract_id;
use std::time::Duration;

/// What kind of irregularity a diagnostic records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// The API tier failed and the HTML tier took over
    ApiFallback,
    /// The link had no topic id, so the API tier was never tried
    NoTopicId,
    /// Both tiers failed; no record was produced
    Skipped,
    /// A record was produced with an empty body
    EmptyBody,
}

/// A per-link irregularity observed while streaming
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub url: String,
    pub detail: String,
}

/// Counters and diagnostics of a finished stream
#[derive(Debug, Clone, Default)]
pub struct StreamReport {
    /// Links taken from the input
    pub attempted: usize,
    pub via_api: usize,
    pub via_html: usize,
    pub skipped: usize,
    pub empty_bodies: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl StreamReport {
    /// Diagnostics of one kind, in the order they occurred
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.kind == kind)
    }
}

/// Lazily resolves links in order, pausing between emissions
///
/// The stream owns the session for its lifetime; links and cookies are
/// consumed once, so a stream cannot be restarted.
///
/// # Example
///
/// ```no_run
/// # async fn demo(session: forum_scribe::http::Session, endpoints: forum_scribe::api::Endpoints) {
/// use forum_scribe::ResolutionStream;
/// use std::time::Duration;
///
/// let urls = vec!["https://www.kaggle.com/discussion/1".to_string()];
/// let mut stream = ResolutionStream::new(session, endpoints, urls, Duration::from_millis(500));
/// while let Some(resolved) = stream.next().await {
///     println!("{}", resolved.record.title);
/// }
/// let (_session, report) = stream.finish();
/// println!("{} skipped", report.skipped);
/// # }
/// ```
pub struct ResolutionStream {
    session: Session,
    endpoints: Endpoints,
    urls: std::vec::IntoIter<String>,
    pacing: Duration,
    emitted: bool,
    report: StreamReport,
}

impl ResolutionStream {
    pub fn new(
        session: Session,
        endpoints: Endpoints,
        urls: Vec<String>,
        pacing: Duration,
    ) -> Self {
        Self {
            session,
            endpoints,
            urls: urls.into_iter(),
            pacing,
            emitted: false,
            report: StreamReport::default(),
        }
    }

    /// Links not yet taken from the input
    pub fn remaining(&self) -> usize {
        self.urls.len()
    }

    /// Resolves links until one yields a record
    ///
    /// The pause after an emission is taken here, before the next link is
    /// resolved, and only if a link remains.
    pub async fn next(&mut self) -> Option<ResolvedDiscussion> {
        loop {
            let url = self.urls.next()?;

            if self.emitted && !self.pacing.is_zero() {
                tokio::time::sleep(self.pacing).await;
            }
            self.emitted = false;
            self.report.attempted += 1;

            if extract_id(&url).is_none() {
                tracing::warn!("No topic id detected in {}; using HTML parser", url);
                self.record(DiagnosticKind::NoTopicId, &url, "no /discussion/<id> segment");
            }

            match resolve(&mut self.session, &self.endpoints, &url).await {
                Ok(resolved) => {
                    if let Some(reason) = &resolved.api_failure {
                        self.record(DiagnosticKind::ApiFallback, &url, reason);
                    }
                    match resolved.source {
                        Source::Api => self.report.via_api += 1,
                        Source::Html => self.report.via_html += 1,
                    }
                    if !resolved.record.has_body() {
                        tracing::warn!("Empty content for {}", url);
                        self.report.empty_bodies += 1;
                        self.record(DiagnosticKind::EmptyBody, &url, "resolved body is empty");
                    }
                    self.emitted = true;
                    return Some(resolved);
                }
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", url, e.reason);
                    self.report.skipped += 1;
                    self.record(DiagnosticKind::Skipped, &url, &e.reason);
                }
            }
        }
    }

    /// Ends the stream, handing back the session and the report
    pub fn finish(self) -> (Session, StreamReport) {
        (self.session, self.report)
    }

    fn record(&mut self, kind: DiagnosticKind, url: &str, detail: &str) {
        self.report.diagnostics.push(Diagnostic {
            kind,
            url: url.to_string(),
            detail: detail.to_string(),
        });
    }
}
