use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::cache::{CacheEntry, CacheStore, Verdict};
use super::{Oracle, Partition};
use crate::chunk::chunks;
use crate::config::Config;
use crate::error::Result;
use crate::TypoFinding;

/// One reported issue for a submitted word, in the Yandex Speller wire shape.
#[derive(Debug, Deserialize)]
struct SpellIssue {
    #[serde(default, rename = "s")]
    suggestions: Vec<String>,
}

/// Last stage of the cascade: asks the external spelling service about
/// whatever the local oracles could not resolve, and feeds every verdict
/// back into the cache store so later runs stay local.
pub struct RemoteSpellerOracle {
    client: Client,
    url: String,
    batch_size: usize,
    store: Arc<CacheStore>,
}

impl RemoteSpellerOracle {
    pub fn new(config: &Config, store: Arc<CacheStore>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.remote_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            url: config.speller_url.clone(),
            batch_size: config.chunk_size,
            store,
        })
    }

    /// One request per batch: each word goes out as its own `text` parameter,
    /// the service answers with one issue list per word, empty meaning clean.
    fn check_batch(&self, words: &[String]) -> Result<Vec<Vec<SpellIssue>>> {
        let params: Vec<(&str, &str)> = words.iter().map(|w| ("text", w.as_str())).collect();
        let response = self
            .client
            .post(&self.url)
            .form(&params)
            .send()?
            .error_for_status()?;
        Ok(response.json()?)
    }
}

impl Oracle for RemoteSpellerOracle {
    fn name(&self) -> &'static str {
        "remote-speller"
    }

    fn classify(&self, words: &[String]) -> Result<Partition> {
        let mut partition = Partition::default();
        for batch in chunks(words, self.batch_size)? {
            match self.check_batch(batch) {
                Ok(verdicts) => {
                    debug!(words = batch.len(), "spelling service answered");
                    absorb_verdicts(batch, verdicts, &mut partition, &self.store);
                }
                // A failed batch degrades to unresolved; the run goes on.
                Err(error) => {
                    warn!(
                        %error,
                        words = batch.len(),
                        "spelling service unavailable, leaving batch unresolved"
                    );
                    partition.unknown.extend(batch.iter().cloned());
                }
            }
        }
        self.store.flush()?;
        Ok(partition)
    }
}

fn absorb_verdicts(
    words: &[String],
    verdicts: Vec<Vec<SpellIssue>>,
    partition: &mut Partition,
    store: &CacheStore,
) {
    let mut verdicts = verdicts.into_iter();
    for word in words {
        match verdicts.next() {
            Some(issues) if issues.is_empty() => {
                store.insert(
                    word,
                    CacheEntry {
                        status: Verdict::Correct,
                        suggestions: Vec::new(),
                    },
                );
                partition.sure_correct.push(word.clone());
            }
            Some(issues) => {
                let suggestions: Vec<String> = issues
                    .into_iter()
                    .flat_map(|issue| issue.suggestions)
                    .collect();
                store.insert(
                    word,
                    CacheEntry {
                        status: Verdict::Typo,
                        suggestions: suggestions.clone(),
                    },
                );
                partition.sure_with_typo_info.push(TypoFinding {
                    original: word.clone(),
                    possible_options: suggestions,
                });
            }
            // The service said nothing about this word at all.
            None => partition.unknown.push(word.clone()),
        }
    }
}
