use log::{debug, info};
use rand::seq::SliceRandom;

use crate::errors::WikiError;
use crate::services::FileService;
use crate::types::SearchOutcome;

/// Service for title search and random picks
pub struct SearchService {
    file_service: FileService,
}

impl SearchService {
    /// Create a new search service
    pub fn new(file_service: FileService) -> Self {
        Self { file_service }
    }

    /// Search entry titles for a case-insensitive substring
    pub fn search(&self, query: &str) -> Result<SearchOutcome, WikiError> {
        let query = query.trim();
        if query.is_empty() {
            debug!("Empty search query received");
            return Ok(SearchOutcome::Empty);
        }

        info!("Starting search for query: '{}'", query);
        let start_time = std::time::Instant::now();

        let entries = self.file_service.list_entries()?;
        let outcome = match_titles(&entries, query);

        let duration = start_time.elapsed();
        match &outcome {
            SearchOutcome::Exact(title) => info!("Search matched entry '{}' exactly", title),
            SearchOutcome::Results(results) => {
                info!("Search completed in {:?}ms, found {} results", duration.as_millis(), results.len())
            }
            SearchOutcome::Empty => {}
        }
        Ok(outcome)
    }

    /// Pick a random entry title
    pub fn random_entry(&self) -> Result<Option<String>, WikiError> {
        let entries = self.file_service.list_entries()?;
        let choice = entries.choose(&mut rand::thread_rng()).cloned();
        debug!("Random entry picked from {} entries: {:?}", entries.len(), choice);
        Ok(choice)
    }
}

fn match_titles(entries: &[String], query: &str) -> SearchOutcome {
    let query_lower = query.to_lowercase();

    if let Some(exact) = entries.iter().find(|title| title.to_lowercase() == query_lower) {
        return SearchOutcome::Exact(exact.clone());
    }

    let results = entries
        .iter()
        .filter(|title| title.to_lowercase().contains(&query_lower))
        .cloned()
        .collect();
    SearchOutcome::Results(results)
}
