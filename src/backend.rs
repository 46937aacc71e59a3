//! Contentful-backed resource backend.
//!
//! Lifecycle: a backend starts without a client and only becomes ready once
//! `init` is given `clientParams`. Each `init` merges the supplied schema
//! options onto the options currently in effect, so repeated calls accumulate
//! rather than resetting to defaults.
//!
//! The namespace passed to `read` is not used to scope the query: every entry
//! of the configured content type is returned for every namespace.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::client::{ClientError, ClientParams, ContentClient, ContentEntry, ContentfulClient, EntriesQuery};
use crate::error::{BackendError, Result};
use crate::mapper::{map_entries, ResourceMap};
use crate::module::{BackendModule, InitOptions, ReadCallback, Services};
use crate::options::{merge, BackendOptions, ContentSchemaOptions};

/// Builds a content client from the caller's client parameters.
pub type Connector =
    Arc<dyn Fn(&ClientParams) -> std::result::Result<Arc<dyn ContentClient>, ClientError> + Send + Sync>;

#[derive(Clone)]
enum ClientState {
    Uninitialized,
    Ready(Arc<dyn ContentClient>),
}

/// Point-in-time copy of the backend state a single read runs against.
#[derive(Clone)]
struct Pipeline {
    state: ClientState,
    options: ContentSchemaOptions,
}

impl Pipeline {
    async fn fetch(&self, language: &str) -> Result<Vec<ContentEntry>> {
        let client = match &self.state {
            ClientState::Ready(client) => client,
            ClientState::Uninitialized => return Err(BackendError::UninitializedClient),
        };

        let query = EntriesQuery {
            content_type: self.options.content_type.clone(),
            locale: language.to_string(),
        };
        let collection = client.get_entries(&query).await?;

        debug!(
            "Fetched {} '{}' entries for {}",
            collection.items.len(),
            query.content_type,
            language
        );
        Ok(collection.items)
    }

    async fn load(&self, language: &str) -> Result<ResourceMap> {
        let entries = self.fetch(language).await?;
        map_entries(
            &entries,
            &self.options.entry_key_accessor,
            &self.options.entry_value_accessor,
        )
    }
}

pub struct ContentfulBackend {
    connector: Connector,
    options: ContentSchemaOptions,
    state: ClientState,
}

impl ContentfulBackend {
    /// Create an uninitialized backend that connects to Contentful over HTTP.
    pub fn new() -> Self {
        Self::with_connector(|params| {
            let client = ContentfulClient::new(params)?;
            Ok(Arc::new(client) as Arc<dyn ContentClient>)
        })
    }

    /// Create an uninitialized backend that builds its client with `connector`.
    pub fn with_connector<F>(connector: F) -> Self
    where
        F: Fn(&ClientParams) -> std::result::Result<Arc<dyn ContentClient>, ClientError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            connector: Arc::new(connector),
            options: Self::default_options(),
            state: ClientState::Uninitialized,
        }
    }

    pub fn default_options() -> ContentSchemaOptions {
        ContentSchemaOptions::default()
    }

    /// Options currently in effect.
    pub fn options(&self) -> &ContentSchemaOptions {
        &self.options
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ClientState::Ready(_))
    }

    /// Apply `backend_options`: build a new client when client parameters are
    /// present, then merge the schema options onto the current ones.
    ///
    /// A client construction failure leaves the backend untouched.
    pub fn configure(&mut self, backend_options: &BackendOptions) -> Result<()> {
        match &backend_options.client_params {
            Some(params) => {
                let client = (self.connector)(params).map_err(BackendError::ClientConstruction)?;
                self.state = ClientState::Ready(client);
            }
            None if !self.is_ready() => {
                warn!("Backend initialized without clientParams; reads will fail until a client is configured");
            }
            None => {}
        }

        self.options = merge(&self.options, backend_options);
        Ok(())
    }

    /// Query every entry of the configured content type for `language`.
    pub async fn fetch(&self, language: &str) -> Result<Vec<ContentEntry>> {
        self.pipeline().fetch(language).await
    }

    /// Fetch and map the resources for `language`. `namespace` does not
    /// affect the query.
    pub async fn load(&self, language: &str, namespace: &str) -> Result<ResourceMap> {
        debug!("Loading resources for {}/{}", language, namespace);
        self.pipeline().load(language).await
    }

    fn pipeline(&self) -> Pipeline {
        Pipeline {
            state: self.state.clone(),
            options: self.options.clone(),
        }
    }
}

impl Default for ContentfulBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl BackendModule for ContentfulBackend {
    type Options = BackendOptions;

    fn init(
        &mut self,
        _services: &Services,
        backend_options: BackendOptions,
        framework_options: &InitOptions,
    ) -> Result<()> {
        self.configure(&backend_options)?;

        if framework_options.debug {
            info!(
                "Contentful backend configured: content_type={}, key={}, value={}",
                self.options.content_type,
                self.options.entry_key_accessor,
                self.options.entry_value_accessor
            );
        }
        Ok(())
    }

    fn read(&self, language: &str, namespace: &str, callback: ReadCallback) -> JoinHandle<()> {
        let pipeline = self.pipeline();
        let language = language.to_string();
        let namespace = namespace.to_string();

        tokio::spawn(async move {
            match pipeline.load(&language).await {
                Ok(resources) => {
                    info!(
                        "Loaded {} translations for {}/{}",
                        resources.len(),
                        language,
                        namespace
                    );
                    callback(None, Some(resources));
                }
                Err(e) => {
                    warn!("Failed to load translations for {}/{}: {}", language, namespace, e);
                    callback(Some(e), None);
                }
            }
        })
    }
}
