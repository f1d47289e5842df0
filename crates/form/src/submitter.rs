use {
    async_trait::async_trait,
    formrelay_config::FormConfig,
    formrelay_parser::SubmissionRequest,
    reqwest::StatusCode,
    tracing::{debug, warn},
};

use crate::{
    error::{Context, Error, Result},
    mapping::FieldMapping,
};

/// Delivers a parsed submission to the external collector.
///
/// A single attempt: `Ok(())` means the collector accepted the submission,
/// any error means it did not.
#[async_trait]
pub trait FormSubmitter: Send + Sync {
    async fn submit(&self, request: &SubmissionRequest) -> Result<()>;
}

/// Submits to an HTTP form endpoint with a form-encoded POST.
pub struct HttpFormSubmitter {
    client: reqwest::Client,
    endpoint: Option<String>,
    mapping: FieldMapping,
}

impl HttpFormSubmitter {
    #[must_use]
    pub fn new(endpoint: Option<String>, mapping: FieldMapping) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint, mapping)
    }

    #[must_use]
    pub fn with_client(
        client: reqwest::Client,
        endpoint: Option<String>,
        mapping: FieldMapping,
    ) -> Self {
        let endpoint = endpoint
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
        Self {
            client,
            endpoint,
            mapping,
        }
    }

    /// Build a submitter from the `[form]` config section.
    ///
    /// A missing URL is accepted (submissions will then fail); a present but
    /// malformed URL is rejected.
    pub fn from_config(config: &FormConfig) -> Result<Self> {
        if let Some(raw) = config.url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
            let url = url::Url::parse(raw).with_context(|| format!("invalid form URL '{raw}'"))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(Error::message(format!(
                    "form URL must use http or https, got '{}'",
                    url.scheme()
                )));
            }
        }
        Ok(Self::new(
            config.url.clone(),
            FieldMapping::from(&config.fields),
        ))
    }

    #[must_use]
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    #[must_use]
    pub fn mapping(&self) -> &FieldMapping {
        &self.mapping
    }
}

#[async_trait]
impl FormSubmitter for HttpFormSubmitter {
    async fn submit(&self, request: &SubmissionRequest) -> Result<()> {
        let Some(endpoint) = self.endpoint.as_deref() else {
            warn!("no form URL configured; set FORM_URL or form.url");
            return Err(Error::NotConfigured);
        };

        let payload = self.mapping.payload(request);
        let resp = self.client.post(endpoint).form(&payload).send().await?;

        let status = resp.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "form endpoint rejected submission");
            return Err(Error::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        debug!(fields = payload.len(), "form submission accepted");
        Ok(())
    }
}
