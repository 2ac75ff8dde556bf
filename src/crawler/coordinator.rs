//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates:
//! - Seeding and draining the frontier
//! - Dispatching fetches to worker tasks
//! - Extracting and persisting page text
//! - Classifying discovered links and feeding them back to the frontier
//!
//! The coordinator task is the only owner of the frontier. Worker tasks get a
//! target, do the network and disk work, and hand back a `PageOutcome`.

use crate::config::Config;
use crate::content::PageDocument;
use crate::crawler::fetcher::{FetchError, Fetcher};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::parse_page;
use crate::output::CrawlReport;
use crate::storage::{open_storage, Storage, StorageError};
use crate::url::{normalize_url, CrawlTarget, UrlClassifier};
use crate::ScribeError;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::JoinSet;
use url::Url;

/// Result of processing one dispatched target
#[derive(Debug)]
pub enum PageOutcome {
    /// Page fetched, extracted and written
    Saved {
        target: CrawlTarget,
        path: PathBuf,
        links: Vec<Url>,
    },

    /// Fetch failed; the page contributes nothing
    FetchFailed {
        target: CrawlTarget,
        error: FetchError,
    },

    /// Page fetched but could not be written; its links are dropped too
    StoreFailed {
        target: CrawlTarget,
        error: StorageError,
    },
}

/// Shared handles a worker task needs to process one page
#[derive(Clone)]
struct PageContext {
    fetcher: Fetcher,
    storage: Arc<Mutex<dyn Storage>>,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    base_url: Url,
    classifier: UrlClassifier,
    frontier: Frontier,
    context: PageContext,
}

impl Coordinator {
    /// Creates a coordinator writing pages to the configured output directory
    pub fn new(config: Config) -> Result<Self, ScribeError> {
        let storage = open_storage(&config.output)?;
        Self::with_storage(config, storage)
    }

    /// Creates a coordinator writing pages to the given store
    pub fn with_storage<S>(config: Config, storage: S) -> Result<Self, ScribeError>
    where
        S: Storage + 'static,
    {
        let base_url = normalize_url(&config.crawler.base_url)?;
        let classifier =
            UrlClassifier::new(&base_url, config.crawler.excluded_extensions.as_slice());
        let fetcher = Fetcher::new(&config)?;
        let storage: Arc<Mutex<dyn Storage>> = Arc::new(Mutex::new(storage));

        Ok(Self {
            config: Arc::new(config),
            base_url,
            classifier,
            frontier: Frontier::new(),
            context: PageContext { fetcher, storage },
        })
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Runs the crawl to completion
    ///
    /// Returns an error only for coordinator-level failures (seeding twice,
    /// broken state machine). Individual page failures are logged and
    /// counted in the report.
    pub async fn run(&mut self) -> Result<CrawlReport, ScribeError> {
        let mut report = CrawlReport::start(self.base_url.as_str());
        let workers = self.config.crawler.workers.max(1) as usize;

        tracing::info!("Starting to scrape {}", self.base_url);
        self.frontier.seed(CrawlTarget::from(self.base_url.clone()))?;

        let start_time = std::time::Instant::now();
        let mut pages_done: u64 = 0;
        let mut tasks: JoinSet<PageOutcome> = JoinSet::new();

        loop {
            // Fill free worker slots; visited is marked here, before the spawn
            while tasks.len() < workers {
                let Some(target) = self.frontier.next_target() else {
                    break;
                };
                tracing::info!("Scraping: {}", target);
                tasks.spawn(process_page(self.context.clone(), target));
            }

            // Empty queue and no task left to produce links: done
            let Some(joined) = tasks.join_next().await else {
                break;
            };
            self.frontier.complete();
            pages_done += 1;

            match joined {
                Ok(outcome) => self.handle_outcome(outcome, &mut report),
                Err(e) => {
                    tracing::error!("Page task aborted: {}", e);
                    report.pages_failed += 1;
                }
            }

            if pages_done % 10 == 0 {
                let rate = pages_done as f64 / start_time.elapsed().as_secs_f64();
                tracing::info!(
                    "Progress: {} pages done, {} queued, {} in flight, {:.2} pages/sec",
                    pages_done,
                    self.frontier.queue_len(),
                    self.frontier.in_flight(),
                    rate
                );
            }
        }

        self.frontier.finish()?;

        report.visited = self.frontier.visited_sorted();
        report.finished_at = Some(chrono::Utc::now());

        tracing::info!(
            "Scraping completed: {} pages saved, {} failed in {:?}",
            report.pages_saved,
            report.pages_failed + report.store_failures,
            start_time.elapsed()
        );

        Ok(report)
    }

    /// Applies one page outcome to the frontier and the report
    fn handle_outcome(&mut self, outcome: PageOutcome, report: &mut CrawlReport) {
        match outcome {
            PageOutcome::Saved {
                target,
                path,
                links,
            } => {
                tracing::info!("Saved: {}", path.display());
                report.pages_saved += 1;
                let queued = self.handle_discovered_links(&target, links);
                report.links_discovered += queued;
            }

            PageOutcome::FetchFailed { target, error } => {
                tracing::warn!("Error scraping {} ({}): {}", target, error.kind(), error);
                report.pages_failed += 1;
            }

            PageOutcome::StoreFailed { target, error } => {
                tracing::error!("Failed to save {}: {}", target, error);
                report.store_failures += 1;
            }
        }
    }

    /// Queues every in-scope, unseen link found on a page
    ///
    /// Returns the number of links newly added to the frontier.
    fn handle_discovered_links(&mut self, from: &CrawlTarget, links: Vec<Url>) -> u64 {
        let mut queued = 0;

        for link in links {
            if !self.classifier.is_in_scope(&link) {
                tracing::trace!("Out of scope link on {}: {}", from, link);
                continue;
            }

            if self.frontier.enqueue(CrawlTarget::from(link)) {
                queued += 1;
            }
        }

        tracing::debug!("Queued {} new links from {}", queued, from);
        queued
    }
}

/// Fetches, extracts and persists one page
///
/// Extraction and save succeed together or the page yields no links. Links
/// are resolved against the dispatched URL, not the post-redirect one.
async fn process_page(context: PageContext, target: CrawlTarget) -> PageOutcome {
    let page = match context.fetcher.fetch(target.url()).await {
        Ok(page) => page,
        Err(error) => return PageOutcome::FetchFailed { target, error },
    };

    tracing::debug!(
        "Fetched {} ({} {})",
        page.final_url,
        page.status_code,
        page.content_type.as_deref().unwrap_or("no content-type")
    );

    let parsed = parse_page(&page.body, target.url());
    let document = PageDocument::new(target.as_str(), parsed.text);

    // fs::write blocks; keep it off the runtime worker threads
    let storage = context.storage;
    let saved = tokio::task::spawn_blocking(move || {
        storage
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .save(&document)
    })
    .await
    .unwrap_or_else(|e| Err(StorageError::Task(e)));

    match saved {
        Ok(path) => PageOutcome::Saved {
            target,
            path,
            links: parsed.links,
        },
        Err(error) => PageOutcome::StoreFailed { target, error },
    }
}

/// Runs the main crawl operation
///
/// # Example
///
/// ```no_run
/// use site_scribe::config::Config;
/// use site_scribe::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = run_crawl(Config::default()).await?;
/// println!("saved {} pages", report.pages_saved);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<CrawlReport, ScribeError> {
    let mut coordinator = Coordinator::new(config)?;
    coordinator.run().await
}
