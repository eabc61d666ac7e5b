use std::time::Duration;

use ureq::Agent;
use url::Url;

use crate::config::ServerSettings;
use crate::library::AudioItem;

use super::error::ApiError;
use super::types::{GenerateRequest, parse_generated, parse_library};

/// Operations the client needs from the backend.
///
/// Implemented over HTTP by [`HttpService`]; tests swap in fakes.
pub trait AudioService: Send + Sync {
    /// List previously generated audio, in server order.
    fn fetch_library(&self) -> Result<Vec<AudioItem>, ApiError>;

    /// Ask the generation service to turn `url` into audio.
    ///
    /// Returns the raw `audio_url` from the response, which may be empty.
    fn generate(&self, url: &str) -> Result<String, ApiError>;

    /// Download the media behind a library path.
    fn fetch_media(&self, path: &str) -> Result<Vec<u8>, ApiError>;

    /// Absolute URL of a media path.
    fn media_url(&self, path: &str) -> Result<Url, ApiError>;
}

pub struct HttpService {
    agent: Agent,
    base: Url,
    library_path: String,
    generate_path: String,
    max_media_bytes: u64,
}

impl HttpService {
    pub fn new(settings: &ServerSettings) -> Result<Self, ApiError> {
        let base = parse_base(&settings.base_url)?;

        let mut agent = Agent::config_builder();
        if let Some(secs) = settings.timeout_secs {
            agent = agent.timeout_global(Some(Duration::from_secs(secs)));
        }

        Ok(Self {
            agent: agent.build().into(),
            base,
            library_path: settings.library_path.clone(),
            generate_path: settings.generate_path.clone(),
            max_media_bytes: settings.max_media_bytes,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }
}

impl AudioService for HttpService {
    fn fetch_library(&self) -> Result<Vec<AudioItem>, ApiError> {
        let url = resolve(&self.base, &self.library_path)?;
        log::debug!("GET {url}");

        let mut resp = self.agent.get(url.as_str()).call()?;
        let body = resp.body_mut().read_to_string()?;
        parse_library(&body)
    }

    fn generate(&self, url: &str) -> Result<String, ApiError> {
        let endpoint = resolve(&self.base, &self.generate_path)?;
        log::debug!("POST {endpoint} for {url}");

        let mut resp = self
            .agent
            .post(endpoint.as_str())
            .send_json(GenerateRequest { url })?;
        let body = resp.body_mut().read_to_string()?;
        parse_generated(&body)
    }

    fn fetch_media(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        let url = resolve(&self.base, path)?;
        log::debug!("GET {url}");

        let mut resp = self.agent.get(url.as_str()).call()?;
        let bytes = resp
            .body_mut()
            .with_config()
            .limit(self.max_media_bytes)
            .read_to_vec()?;
        Ok(bytes)
    }

    fn media_url(&self, path: &str) -> Result<Url, ApiError> {
        resolve(&self.base, path)
    }
}

/// Parse the service base URL, making sure relative joins stay under its path.
pub fn parse_base(raw: &str) -> Result<Url, ApiError> {
    let raw = raw.trim();
    let mut url = Url::parse(raw).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl(format!("{raw}: not a base url")));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Join an endpoint or media path onto `base`.
///
/// Leading slashes are ignored so a base mounted under a sub-path keeps it.
/// Absolute URLs are returned unchanged.
pub fn resolve(base: &Url, path: &str) -> Result<Url, ApiError> {
    base.join(path.trim_start_matches('/'))
        .map_err(|e| ApiError::InvalidUrl(format!("{path}: {e}")))
}
