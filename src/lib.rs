//! Resource backend that loads translations from Contentful.
//!
//! ```rust,ignore
//! use contentful_i18n_backend::{
//!     BackendModule, BackendOptions, ClientParams, ContentfulBackend, InitOptions, Services,
//! };
//!
//! let mut backend = ContentfulBackend::new();
//! backend.init(&Services, BackendOptions::new(ClientParams::new("space", "token")), &InitOptions::default())?;
//! let resources = backend.load("en", "common").await?;
//! ```

pub mod backend;
pub mod client;
pub mod error;
pub mod mapper;
pub mod module;
pub mod options;

pub use backend::ContentfulBackend;
pub use client::{ClientError, ClientParams, ContentClient, ContentEntry, ContentfulClient, EntriesQuery, EntryCollection};
pub use error::BackendError;
pub use mapper::{map_entries, ResourceMap};
pub use module::{BackendModule, InitOptions, ModuleType, ReadCallback, Services};
pub use options::{merge, BackendOptions, ContentSchemaOptions};
