use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::{Client, Method, StatusCode, Url};

use crate::{
    dao::{models::FeatureFlags, profile_store::ProfileStore, storage::PersistenceResult},
    theme::builder::ThemeVariableSet,
};

use super::{
    config::ProfileApiConfig,
    error::{ProfileDaoError, ProfileResult},
    models::{CompanyDocument, ThemePatch},
};

/// [`ProfileStore`] backed by the company profile REST API.
#[derive(Clone)]
pub struct HttpProfileStore {
    client: Client,
    base_url: Arc<Url>,
    token: Option<Arc<str>>,
}

impl HttpProfileStore {
    /// Build a store for the API described by `config`.
    pub fn new(config: ProfileApiConfig) -> ProfileResult<Self> {
        let base_url =
            Url::parse(config.base_url.trim()).map_err(|source| ProfileDaoError::InvalidBaseUrl {
                url: config.base_url.clone(),
                source,
            })?;
        if base_url.cannot_be_a_base() {
            return Err(ProfileDaoError::UnsupportedBaseUrl {
                url: config.base_url,
            });
        }

        let client = Client::builder()
            .build()
            .map_err(|source| ProfileDaoError::ClientBuilder { source })?;

        Ok(Self {
            client,
            base_url: Arc::new(base_url),
            token: config.token.map(Arc::from),
        })
    }

    /// `{base_url}/companies/{company_id}` with the id escaped as a single path segment.
    fn company_url(&self, company_id: &str) -> Url {
        let mut url = Url::clone(&self.base_url);
        // base urls are checked in `new`, so segments are always available
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("companies").push(company_id);
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, url);
        match self.token {
            Some(ref token) => builder.bearer_auth(token.as_ref()),
            None => builder,
        }
    }

    async fn patch_theme(&self, company_id: &str, theme: &ThemeVariableSet) -> ProfileResult<()> {
        let url = self.company_url(company_id);
        let path = url.path().to_string();
        let response = self
            .request(Method::PATCH, url)
            .json(&ThemePatch { theme })
            .send()
            .await
            .map_err(|source| ProfileDaoError::RequestSend {
                path: path.clone(),
                source,
            })?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(ProfileDaoError::NotFound {
                company_id: company_id.to_string(),
            }),
            status if status.is_success() => Ok(()),
            status => Err(ProfileDaoError::RequestStatus { path, status }),
        }
    }

    async fn get_company(&self, company_id: &str) -> ProfileResult<CompanyDocument> {
        let url = self.company_url(company_id);
        let path = url.path().to_string();
        let response = self
            .request(Method::GET, url)
            .send()
            .await
            .map_err(|source| ProfileDaoError::RequestSend {
                path: path.clone(),
                source,
            })?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(ProfileDaoError::NotFound {
                company_id: company_id.to_string(),
            }),
            status if status.is_success() => response
                .json::<CompanyDocument>()
                .await
                .map_err(|source| ProfileDaoError::DecodeResponse { path, source }),
            status => Err(ProfileDaoError::RequestStatus { path, status }),
        }
    }
}

impl ProfileStore for HttpProfileStore {
    fn save_theme(
        &self,
        company_id: &str,
        theme: ThemeVariableSet,
    ) -> BoxFuture<'static, PersistenceResult<()>> {
        let store = self.clone();
        let company_id = company_id.to_string();
        Box::pin(async move {
            store
                .patch_theme(&company_id, &theme)
                .await
                .map_err(Into::into)
        })
    }

    fn load_features(&self, company_id: &str) -> BoxFuture<'static, PersistenceResult<FeatureFlags>> {
        let store = self.clone();
        let company_id = company_id.to_string();
        Box::pin(async move {
            let document = store.get_company(&company_id).await?;
            Ok(document.features)
        })
    }
}
