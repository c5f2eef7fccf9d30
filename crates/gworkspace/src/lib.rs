//! Google Workspace REST client
//!
//! Resolves a named or inline connection, authenticates it once, and hands
//! out per-product facades that share the resulting token.

pub mod auth;
pub mod common;
pub mod config;
pub mod google;

use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info};

pub use auth::{Authenticator, BearerToken, ServiceAccountAuthenticator, StaticTokenAuthenticator};
pub use common::{WorkspaceError, WorkspaceResult};
pub use config::{ConfigMap, ConfigSource, ConnectionDescriptor, ConnectionResolver, JsonConfigSource};
pub use google::{
    params, Calendar, ClientOptions, Directory, Drive, Exclusions, Gmail, GoogleClient, LicenseManager,
    Params, ResponseEnvelope, ResponseLogger, ResponseStatus, Rest, Sheets, TracingLogger, Vault,
};

use google::{ConnectionContext, ReqwestTransport, Transport};

/// Entry point: one resolved connection, one token, any number of facades
pub struct ApiClient {
    connection: ConnectionDescriptor,
    authenticator: Arc<dyn Authenticator>,
    transport: Arc<dyn Transport>,
    logger: Arc<dyn ResponseLogger>,
    options: ClientOptions,
    token: OnceCell<BearerToken>,
}

impl ApiClient {
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Resolve `connection_key` (or `default.connection`) from the default
    /// configuration file with the service-account authenticator.
    pub fn connect(connection_key: Option<&str>) -> WorkspaceResult<Self> {
        let mut builder = Self::builder();
        if let Some(key) = connection_key {
            builder = builder.connection(key);
        }
        builder.build()
    }

    pub fn connection(&self) -> &ConnectionDescriptor {
        &self.connection
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Authenticate the connection, reusing the token after the first call
    pub async fn authenticate(&self) -> WorkspaceResult<&BearerToken> {
        self.token
            .get_or_try_init(|| async move {
                info!(connection = %self.connection.display_key(), "Authenticating Google connection");
                self.authenticator.authenticate(&self.connection).await
            })
            .await
    }

    /// Authenticated dispatcher shared by every facade of this client
    pub async fn google_client(&self) -> WorkspaceResult<GoogleClient> {
        let token = self.authenticate().await?.clone();
        let context = Arc::new(ConnectionContext {
            connection: self.connection.clone(),
            token,
        });

        Ok(GoogleClient::with_transport(context, self.transport.clone())
            .with_logger(self.logger.clone())
            .with_options(self.options.clone()))
    }

    pub async fn directory(&self) -> WorkspaceResult<Directory> {
        Ok(Directory::new(self.google_client().await?))
    }

    pub async fn calendar(&self) -> WorkspaceResult<Calendar> {
        Ok(Calendar::new(self.google_client().await?))
    }

    pub async fn gmail(&self) -> WorkspaceResult<Gmail> {
        Ok(Gmail::new(self.google_client().await?))
    }

    pub async fn drive(&self) -> WorkspaceResult<Drive> {
        Ok(Drive::new(self.google_client().await?))
    }

    pub async fn sheets(&self) -> WorkspaceResult<Sheets> {
        Ok(Sheets::new(self.google_client().await?))
    }

    pub async fn vault(&self) -> WorkspaceResult<Vault> {
        Ok(Vault::new(self.google_client().await?))
    }

    pub async fn license_manager(&self) -> WorkspaceResult<LicenseManager> {
        Ok(LicenseManager::new(self.google_client().await?))
    }

    pub async fn rest(&self) -> WorkspaceResult<Rest> {
        Ok(Rest::new(self.google_client().await?))
    }
}

/// Collaborators left unset fall back to the file-backed configuration,
/// the service-account authenticator, `reqwest` and `tracing`.
#[derive(Default)]
pub struct ApiClientBuilder {
    connection_key: Option<String>,
    inline_config: Option<ConfigMap>,
    source: Option<Arc<dyn ConfigSource>>,
    authenticator: Option<Arc<dyn Authenticator>>,
    transport: Option<Arc<dyn Transport>>,
    logger: Option<Arc<dyn ResponseLogger>>,
    options: ClientOptions,
}

impl ApiClientBuilder {
    /// Named connection under `connections.<key>`
    pub fn connection(mut self, key: impl Into<String>) -> Self {
        self.connection_key = Some(key.into());
        self
    }

    /// Inline connection map; when non-empty it wins over any key
    pub fn inline_config(mut self, config: ConfigMap) -> Self {
        self.inline_config = Some(config);
        self
    }

    pub fn config_source(mut self, source: Arc<dyn ConfigSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = Some(authenticator);
        self
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn logger(mut self, logger: Arc<dyn ResponseLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    /// Resolve and validate the connection. Authentication is deferred to
    /// the first facade request.
    pub fn build(self) -> WorkspaceResult<ApiClient> {
        let logger = self.logger.unwrap_or_else(|| Arc::new(TracingLogger));
        let has_inline = self.inline_config.as_ref().is_some_and(|c| !c.is_empty());

        let source: Arc<dyn ConfigSource> = match self.source {
            Some(source) => source,
            None if has_inline => Arc::new(JsonConfigSource::empty()),
            None => Arc::new(JsonConfigSource::load_default()?),
        };

        let connection = ConnectionResolver::new(source)
            .with_logger(logger.clone())
            .resolve(self.connection_key.as_deref(), self.inline_config.as_ref())?;
        debug!(connection = %connection.display_key(), "Resolved Google connection");

        let authenticator: Arc<dyn Authenticator> = match self.authenticator {
            Some(authenticator) => authenticator,
            None => Arc::new(ServiceAccountAuthenticator::new()?),
        };
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new()?),
        };

        Ok(ApiClient {
            connection,
            authenticator,
            transport,
            logger,
            options: self.options,
            token: OnceCell::new(),
        })
    }
}
