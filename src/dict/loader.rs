use crate::controller::{Controller, Surface};
use crate::engine::dictionary::{Dictionary, DictionaryError};
use crate::engine::SpellEngine;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Pinned so the dictionary never changes under a running deployment
pub const DEFAULT_BASE_URL: &str = "https://cdn.jsdelivr.net/npm/typo-js@1.2.1/dictionaries";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to fetch {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid {locale} dictionary")]
    Dictionary {
        locale: String,
        #[source]
        source: DictionaryError,
    },
}

/// Where the affix file and word list come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionarySource {
    /// `<base_url>/<locale>/<locale>.aff` and `.dic`
    Remote { base_url: String },
    /// `<dir>/<locale>.aff` and `.dic`
    Local { dir: PathBuf },
}

impl Default for DictionarySource {
    fn default() -> Self {
        DictionarySource::Remote {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl DictionarySource {
    /// Location of the `.aff` and `.dic` resources, in that order
    pub fn locations(&self, locale: &str) -> (String, String) {
        match self {
            DictionarySource::Remote { base_url } => {
                let base = base_url.trim_end_matches('/');
                (
                    format!("{}/{}/{}.aff", base, locale, locale),
                    format!("{}/{}/{}.dic", base, locale, locale),
                )
            }
            DictionarySource::Local { dir } => (
                dir.join(format!("{}.aff", locale)).display().to_string(),
                dir.join(format!("{}.dic", locale)).display().to_string(),
            ),
        }
    }
}

/// Fetch the affix file and word list concurrently. Both must succeed.
pub async fn fetch(
    source: &DictionarySource,
    locale: &str,
) -> Result<(String, String), LoadError> {
    let (aff, dic) = source.locations(locale);

    match source {
        DictionarySource::Remote { .. } => {
            let client = reqwest::Client::new();
            tokio::try_join!(fetch_text(&client, &aff), fetch_text(&client, &dic))
        }
        DictionarySource::Local { .. } => {
            tokio::try_join!(read_text(Path::new(&aff)), read_text(Path::new(&dic)))
        }
    }
}

/// Fetch both resources and build the built-in engine from them.
///
/// The engine generates up to `max_suggestions` suggestions per word.
pub async fn load(
    source: &DictionarySource,
    locale: &str,
    max_suggestions: usize,
) -> Result<Box<dyn SpellEngine>, LoadError> {
    let (aff, dic) = fetch(source, locale).await?;

    let dictionary = Dictionary::from_hunspell(locale, &aff, &dic)
        .map_err(|source| LoadError::Dictionary {
            locale: locale.to_string(),
            source,
        })?
        .with_suggestion_limit(max_suggestions);

    Ok(Box::new(dictionary))
}

/// Gate the input while the dictionary loads, then hand the outcome to the controller.
///
/// A failure is final for the session; checks stay no-ops.
pub async fn initialize<S: Surface>(
    controller: &mut Controller<S>,
    source: &DictionarySource,
    locale: &str,
) {
    controller.begin_loading();
    tracing::debug!(?source, locale, "loading dictionary");
    let result = load(source, locale, controller.max_suggestions()).await;
    controller.finish_loading(result);
}

async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String, LoadError> {
    let fetch_error = |source| LoadError::Fetch {
        url: url.to_string(),
        source,
    };

    let response = client.get(url).send().await.map_err(fetch_error)?;
    if !response.status().is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    response.text().await.map_err(fetch_error)
}

async fn read_text(path: &Path) -> Result<String, LoadError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })
}
