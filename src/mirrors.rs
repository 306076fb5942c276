//! Mirror selection.
//!
//! Candidates are probed in order and the first one that answers becomes the
//! session's mirror. The choice is never revisited: a new selector is needed to
//! probe again.

use crate::source_utils::PageFetcher;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MirrorError {
    #[error("No mirrors configured")]
    NoMirrorsConfigured,

    #[error("None of the {tried} configured mirrors are reachable, check your connection")]
    AllMirrorsUnreachable { tried: usize },
}

#[derive(Debug, Clone, Default)]
pub struct MirrorSelector {
    candidates: Vec<String>,
    selected: Option<String>,
}

impl MirrorSelector {
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            candidates: candidates.into_iter().map(normalize_mirror).collect(),
            selected: None,
        }
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Mirror chosen by the first successful probe, if any
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Replace the candidate list. An already selected mirror stays selected.
    pub fn set_candidates<I, S>(&mut self, candidates: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.candidates = candidates.into_iter().map(normalize_mirror).collect();
    }

    /// Return the session mirror, probing candidates on the first call.
    pub async fn select<F>(&mut self, fetcher: &F) -> Result<&str, MirrorError>
    where
        F: PageFetcher + ?Sized,
    {
        if self.selected.is_none() {
            let mirror = self.probe(fetcher).await?;
            log::info!("Using mirror {}", mirror);
            self.selected = Some(mirror);
        }
        Ok(self.selected.as_deref().unwrap_or_default())
    }

    async fn probe<F>(&self, fetcher: &F) -> Result<String, MirrorError>
    where
        F: PageFetcher + ?Sized,
    {
        if self.candidates.is_empty() {
            return Err(MirrorError::NoMirrorsConfigured);
        }

        for mirror in &self.candidates {
            match fetcher.fetch(mirror).await {
                Ok(_) => return Ok(mirror.clone()),
                Err(e) => log::warn!("Mirror {} is not responding: {}", mirror, e),
            }
        }

        Err(MirrorError::AllMirrorsUnreachable {
            tried: self.candidates.len(),
        })
    }
}

fn normalize_mirror<S: Into<String>>(mirror: S) -> String {
    let mirror = mirror.into();
    mirror.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_utils::FetchError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Answers only for URLs containing "up"; records every probe
    #[derive(Default)]
    struct ProbeRecorder {
        probed: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl PageFetcher for ProbeRecorder {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.probed.lock().unwrap().push(url.to_string());
            if url.contains("up") {
                Ok("<html></html>".to_string())
            } else {
                Err(FetchError::Transport(format!("{} is down", url)))
            }
        }
    }

    #[tokio::test]
    async fn test_no_mirrors_configured() {
        let fetcher = ProbeRecorder::default();
        let mut selector = MirrorSelector::new(Vec::<String>::new());

        let err = selector.select(&fetcher).await.unwrap_err();
        assert_eq!(err, MirrorError::NoMirrorsConfigured);
        assert!(fetcher.probed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_all_mirrors_unreachable() {
        let fetcher = ProbeRecorder::default();
        let mut selector = MirrorSelector::new(["down1", "down2"]);

        let err = selector.select(&fetcher).await.unwrap_err();
        assert_eq!(err, MirrorError::AllMirrorsUnreachable { tried: 2 });
        assert_eq!(*fetcher.probed.lock().unwrap(), vec!["down1", "down2"]);
        assert!(selector.selected().is_none());
    }

    #[tokio::test]
    async fn test_falls_back_and_memoizes() {
        let fetcher = ProbeRecorder::default();
        let mut selector = MirrorSelector::new(["down1", "up2", "up3"]);

        assert_eq!(selector.select(&fetcher).await.unwrap(), "up2");
        assert_eq!(selector.select(&fetcher).await.unwrap(), "up2");

        // Second call must not probe anything
        assert_eq!(*fetcher.probed.lock().unwrap(), vec!["down1", "up2"]);
    }

    #[tokio::test]
    async fn test_set_candidates_keeps_selection() {
        let fetcher = ProbeRecorder::default();
        let mut selector = MirrorSelector::new(["up1"]);
        selector.select(&fetcher).await.unwrap();

        selector.set_candidates(["up9"]);
        assert_eq!(selector.candidates(), ["up9".to_string()]);
        assert_eq!(selector.select(&fetcher).await.unwrap(), "up1");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let selector = MirrorSelector::new(["https://libgen.is/", " https://libgen.rs "]);
        assert_eq!(selector.candidates(), ["https://libgen.is", "https://libgen.rs"]);
    }
}
