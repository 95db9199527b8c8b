pub mod cache;
pub mod remote;
pub mod vocabulary;

use tracing::debug;

use crate::chunk::chunks;
use crate::error::Result;
use crate::{TypoFinding, TypoReport};

/// Three-way split produced by a single oracle over one batch of words.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    pub sure_correct: Vec<String>,
    pub sure_with_typo_info: Vec<TypoFinding>,
    pub unknown: Vec<String>,
}

/// A classification stage: resolves what it can, forwards the rest.
pub trait Oracle {
    fn name(&self) -> &'static str;

    fn classify(&self, words: &[String]) -> Result<Partition>;
}

/// Drives the oracles in waterfall order over bounded chunks of the
/// candidate set. Each stage only ever sees the residue of the previous
/// one, so a word is resolved by at most one oracle per run.
pub struct Cascade {
    oracles: Vec<Box<dyn Oracle>>,
    chunk_size: usize,
}

impl Cascade {
    pub fn new(oracles: Vec<Box<dyn Oracle>>, chunk_size: usize) -> Self {
        Self { oracles, chunk_size }
    }

    pub fn run(&self, words: &[String]) -> Result<TypoReport> {
        let mut report = TypoReport::default();
        for outer_chunk in chunks(words, self.chunk_size)? {
            let mut residue: Vec<String> = outer_chunk.to_vec();
            for oracle in &self.oracles {
                if residue.is_empty() {
                    break;
                }
                let partition = oracle.classify(&residue)?;
                debug!(
                    oracle = oracle.name(),
                    correct = partition.sure_correct.len(),
                    typos = partition.sure_with_typo_info.len(),
                    unknown = partition.unknown.len(),
                    "oracle classified chunk"
                );
                report.typos.extend(partition.sure_with_typo_info);
                residue = partition.unknown;
            }
            report.unresolved.extend(residue);
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::vocabulary::VocabularyOracle;
    use super::*;
    use crate::config::Config;
    use std::io::Write;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    /// Flags a fixed set of words as typos, confirms everything else.
    struct StubSpeller {
        typos: Vec<(String, Vec<String>)>,
    }

    impl Oracle for StubSpeller {
        fn name(&self) -> &'static str {
            "stub-speller"
        }

        fn classify(&self, batch: &[String]) -> Result<Partition> {
            let mut partition = Partition::default();
            for word in batch {
                match self.typos.iter().find(|(typo, _)| typo == word) {
                    Some((_, options)) => partition.sure_with_typo_info.push(TypoFinding {
                        original: word.clone(),
                        possible_options: options.clone(),
                    }),
                    None => partition.sure_correct.push(word.clone()),
                }
            }
            Ok(partition)
        }
    }

    /// Stands in for the remote oracle in tests that must not reach it.
    struct UnreachableOracle;

    impl Oracle for UnreachableOracle {
        fn name(&self) -> &'static str {
            "unreachable"
        }

        fn classify(&self, _batch: &[String]) -> Result<Partition> {
            panic!("this oracle must not be consulted");
        }
    }

    fn vocabulary_with(entries: &[&str]) -> VocabularyOracle {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# test section").unwrap();
        for entry in entries {
            writeln!(file, "{entry}").unwrap();
        }
        let config = Config {
            vocabulary_path: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let oracle = VocabularyOracle::load(&config).unwrap();
        drop(file);
        oracle
    }

    #[test]
    fn vocabulary_word_is_never_a_typo() {
        let cascade = Cascade::new(
            vec![
                Box::new(vocabulary_with(&["привет"])),
                Box::new(StubSpeller {
                    typos: vec![("привет".into(), vec![])],
                }),
            ],
            10,
        );
        let report = cascade.run(&words(&["привет"])).unwrap();
        assert!(report.typos.is_empty());
        assert!(report.unresolved.is_empty());
    }

    #[test]
    fn residue_threads_through_the_waterfall() {
        let cascade = Cascade::new(
            vec![
                Box::new(vocabulary_with(&["привет"])),
                Box::new(StubSpeller {
                    typos: vec![("превет".into(), vec!["привет".into()])],
                }),
            ],
            10,
        );
        let report = cascade.run(&words(&["привет", "превет"])).unwrap();
        assert_eq!(
            report.typos,
            vec![TypoFinding {
                original: "превет".into(),
                possible_options: vec!["привет".into()],
            }]
        );
        assert!(report.unresolved.is_empty());
    }

    #[test]
    fn later_oracle_is_skipped_once_residue_is_empty() {
        let cascade = Cascade::new(
            vec![
                Box::new(vocabulary_with(&["париж", "лондон"])),
                Box::new(UnreachableOracle),
            ],
            10,
        );
        let report = cascade.run(&words(&["париж", "лондон"])).unwrap();
        assert!(report.typos.is_empty());
    }

    #[test]
    fn cached_typo_never_reaches_the_remote_oracle() {
        use super::cache::{CacheEntry, CacheOracle, CacheStore, Verdict};
        use std::sync::Arc;

        let store = Arc::new(CacheStore::open(None).unwrap());
        store.insert(
            "превет",
            CacheEntry {
                status: Verdict::Typo,
                suggestions: vec!["привет".into()],
            },
        );
        let cascade = Cascade::new(
            vec![Box::new(CacheOracle::new(store)), Box::new(UnreachableOracle)],
            10,
        );
        let report = cascade.run(&words(&["превет"])).unwrap();
        assert_eq!(
            report.typos,
            vec![TypoFinding {
                original: "превет".into(),
                possible_options: vec!["привет".into()],
            }]
        );
    }

    #[test]
    fn leftover_words_surface_as_unresolved() {
        let cascade = Cascade::new(vec![Box::new(vocabulary_with(&["париж"]))], 10);
        let report = cascade.run(&words(&["париж", "ландон"])).unwrap();
        assert!(report.typos.is_empty());
        assert_eq!(report.unresolved, words(&["ландон"]));
    }

    #[test]
    fn findings_accumulate_across_outer_chunks_in_order() {
        let cascade = Cascade::new(
            vec![Box::new(StubSpeller {
                typos: vec![
                    ("aab".into(), vec!["abb".into()]),
                    ("ccd".into(), vec!["cdd".into()]),
                ],
            })],
            1,
        );
        let report = cascade.run(&words(&["aab", "bbb", "ccd"])).unwrap();
        let found: Vec<&str> = report.typos.iter().map(|t| t.original.as_str()).collect();
        assert_eq!(found, vec!["aab", "ccd"]);
    }

    #[test]
    fn invalid_chunk_size_aborts_before_processing() {
        let cascade = Cascade::new(vec![Box::new(UnreachableOracle)], 0);
        assert!(cascade.run(&words(&["слово"])).is_err());
    }
}
