//! Write-only transport seam for shipping built templates to a game client.
//!
//! The actual client connection lives outside this crate; here we define the
//! interface, a name-keyed registry for frontends to select a transport, and
//! a logging stand-in that accepts everything.

use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::codec::{Codec, CodecError};
use crate::model::Template;

/// Outcome of handing a template to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendStatus {
    Delivered,
    /// The transport refused the payload without failing outright.
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("transport `{0}` is not registered")]
    Unknown(String),
    #[error("transport connection failed: {0}")]
    Connection(String),
}

/// Pushes a built wire string to a running client.
pub trait Transport: Send + Sync {
    fn send(&self, code: &str, display_name: &str) -> Result<SendStatus, TransportError>;
    fn name(&self) -> &'static str;
}

/// Registry of transports; callers select by name.
#[derive(Default)]
pub struct TransportRegistry {
    transports: HashMap<String, Box<dyn Transport>>,
}

impl TransportRegistry {
    pub fn new() -> Self {
        Self { transports: HashMap::new() }
    }

    pub fn register<T: Transport + 'static>(&mut self, transport: T) -> &mut Self {
        self.transports.insert(transport.name().to_string(), Box::new(transport));
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn Transport> {
        self.transports.get(name).map(|t| &**t)
    }

    /// Sorted transport names, for error messages and help output.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.transports.keys().cloned().collect();
        names.sort();
        names
    }
}

/// A transport that logs the payload and reports success. Useful until a real
/// client connection is configured, and as a default for tests.
pub struct LogTransport;

impl Transport for LogTransport {
    fn send(&self, code: &str, display_name: &str) -> Result<SendStatus, TransportError> {
        info!("would ship template `{display_name}` ({} wire bytes)", code.len());
        Ok(SendStatus::Delivered)
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

/// Registry pre-populated with the logging stand-in.
pub fn default_transport_registry() -> TransportRegistry {
    let mut registry = TransportRegistry::new();
    registry.register(LogTransport);
    registry
}

/// Metadata shipped alongside a built template so the receiving side can
/// label and attribute it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingEnvelope {
    pub author: String,
    pub name: String,
    pub version: u32,
    pub code: String,
    pub created_at: String,
}

impl ShippingEnvelope {
    pub fn new(template: &Template, code: impl Into<String>) -> Self {
        Self {
            author: template.author.clone(),
            name: template.name(),
            version: 1,
            code: code.into(),
            created_at: Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ShipError {
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Convenience path: encode `template` and push it through `transport`.
pub fn build_and_send(
    template: &Template,
    codec: &Codec<'_>,
    transport: &dyn Transport,
) -> Result<SendStatus, ShipError> {
    let code = codec.encode(template)?;
    Ok(transport.send(&code, &template.name())?)
}
