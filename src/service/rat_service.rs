use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::info;

use crate::error::RatError;
use crate::models::rat::{RAT_EMBED_TITLE, RatReport};

/// Shuffled rotation over rat links. Each link is served once per cycle and the
/// order is reshuffled when a cycle runs out.
#[derive(Debug, Clone, Default)]
pub struct RatDeck {
    links: Vec<String>,
    order: Vec<usize>,
    cursor: usize,
}

impl RatDeck {
    pub fn new(links: Vec<String>) -> Self {
        Self {
            links,
            order: Vec::new(),
            cursor: 0,
        }
    }

    /// One link per non-blank line.
    pub fn parse(content: &str) -> Self {
        Self::new(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn load(path: &Path) -> Result<Self, RatError> {
        let content = fs::read_to_string(path).map_err(|source| RatError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let deck = Self::parse(&content);
        info!(path = %path.display(), rats = deck.len(), "loaded rat list");
        Ok(deck)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn next_rat<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&str> {
        if self.links.is_empty() {
            return None;
        }
        if self.cursor >= self.order.len() {
            self.order = (0..self.links.len()).collect();
            self.order.shuffle(rng);
            self.cursor = 0;
        }
        let index = self.order[self.cursor];
        self.cursor += 1;
        Some(self.links[index].as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    NotARat,
    AlreadyReported,
    Filed(String),
}

/// Links reported since the process started.
#[derive(Debug, Default)]
pub struct ReportLog {
    reported: HashSet<String>,
    reports: Vec<RatReport>,
}

impl ReportLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a report for the embed of a reported message. `embed_title` and
    /// `image_url` come from the message's first embed, if any.
    pub fn file(
        &mut self,
        embed_title: Option<&str>,
        image_url: Option<&str>,
        reported_by: &str,
        now: DateTime<Utc>,
    ) -> ReportOutcome {
        let (Some(RAT_EMBED_TITLE), Some(link)) = (embed_title, image_url) else {
            return ReportOutcome::NotARat;
        };
        if !self.reported.insert(link.to_string()) {
            return ReportOutcome::AlreadyReported;
        }
        let report = RatReport::new(link, reported_by, now);
        let id = report.id.clone();
        self.reports.push(report);
        ReportOutcome::Filed(id)
    }

    /// Drops a report so the same link can be reported again.
    pub fn forget(&mut self, id: &str) -> Option<RatReport> {
        let index = self.reports.iter().position(|report| report.id == id)?;
        let report = self.reports.remove(index);
        self.reported.remove(&report.link);
        Some(report)
    }
}
