//! MongoDB client handle for the listings collection.
//!
//! One handle is created at startup and cloned into every adapter. The
//! driver client behind it is built on first use and then shared; the driver
//! pools connections internally.
//!
//! # Design
//!
//! - Building the client parses the URI, which for `mongodb+srv://` includes
//!   an SRV lookup. A failed build is not cached, so the next operation
//!   retries it and the process keeps serving while the store is unreachable.
//! - The Stable API (v1, strict) is requested for every client.

use std::sync::Arc;
use std::time::Duration;

use mongodb::bson::Document;
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Collection};
use tokio::sync::OnceCell;

/// Errors raised while building the store client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The connection string could not be parsed or resolved.
    #[error("invalid document store connection string: {message}")]
    InvalidUri { message: String },

    /// The client could not be constructed from the parsed options.
    #[error("failed to build document store client: {message}")]
    Build { message: String },
}

impl StoreError {
    /// Create an invalid-URI error with the given message.
    pub fn invalid_uri(message: impl Into<String>) -> Self {
        Self::InvalidUri {
            message: message.into(),
        }
    }

    /// Create a build error with the given message.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Connection settings for the listings store.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use shareplate::outbound::persistence::StoreConfig;
///
/// let config = StoreConfig::new("mongodb://localhost:27017")
///     .with_database("SharePlate-DB")
///     .with_collection("foodData")
///     .with_connect_timeout(Duration::from_secs(5));
/// assert_eq!(config.collection(), "foodData");
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    uri: String,
    database: String,
    collection: String,
    connect_timeout: Duration,
}

impl StoreConfig {
    /// Default database name.
    pub const DEFAULT_DATABASE: &'static str = "SharePlate-DB";
    /// Default collection name.
    pub const DEFAULT_COLLECTION: &'static str = "foodData";

    /// Create a configuration for `uri` with default names and a 10 second
    /// connect/server-selection timeout.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: Self::DEFAULT_DATABASE.to_owned(),
            collection: Self::DEFAULT_COLLECTION.to_owned(),
            connect_timeout: Duration::from_secs(10),
        }
    }

    /// Set the database name.
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Set the collection name.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Set the connect and server-selection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Database name.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }
}

/// Shared, lazily connected handle to the listings collection.
///
/// # Example
///
/// ```
/// use shareplate::outbound::persistence::{MongoStore, StoreConfig};
///
/// // No network traffic happens until the first operation.
/// let store = MongoStore::new(StoreConfig::new("mongodb+srv://u:p@cluster.invalid/"));
/// assert_eq!(store.config().collection(), "foodData");
/// ```
#[derive(Clone, Debug)]
pub struct MongoStore {
    config: StoreConfig,
    handle: Arc<OnceCell<StoreHandle>>,
}

#[derive(Debug)]
struct StoreHandle {
    client: Client,
    listings: Collection<Document>,
}

impl MongoStore {
    /// Create a handle for `config` without contacting the store.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            handle: Arc::new(OnceCell::new()),
        }
    }

    /// Connection settings.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The driver client, built on first use.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidUri`] when the connection string cannot
    /// be parsed (including SRV lookups for `mongodb+srv://` URIs) and
    /// [`StoreError::Build`] when the driver rejects the options.
    pub async fn client(&self) -> Result<&Client, StoreError> {
        Ok(&self.handle().await?.client)
    }

    /// The listings collection, built on first use.
    ///
    /// # Errors
    ///
    /// Same as [`MongoStore::client`].
    pub async fn listings(&self) -> Result<&Collection<Document>, StoreError> {
        Ok(&self.handle().await?.listings)
    }

    async fn handle(&self) -> Result<&StoreHandle, StoreError> {
        self.handle
            .get_or_try_init(|| build_handle(&self.config))
            .await
    }
}

async fn build_handle(config: &StoreConfig) -> Result<StoreHandle, StoreError> {
    let mut options = ClientOptions::parse(&config.uri)
        .await
        .map_err(|err| StoreError::invalid_uri(err.to_string()))?;
    options.app_name = Some("shareplate".to_owned());
    options.connect_timeout = Some(config.connect_timeout);
    options.server_selection_timeout = Some(config.connect_timeout);
    options.server_api = Some(
        ServerApi::builder()
            .version(ServerApiVersion::V1)
            .strict(true)
            .deprecation_errors(true)
            .build(),
    );

    let client =
        Client::with_options(options).map_err(|err| StoreError::build(err.to_string()))?;
    let listings = client
        .database(&config.database)
        .collection::<Document>(&config.collection);
    Ok(StoreHandle { client, listings })
}
