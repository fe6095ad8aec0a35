use anyhow::{anyhow, Context, Result};
use weave_core::catalog::EmptyCatalog;
use weave_core::codec::Codec;
use weave_core::transport::{default_transport_registry, SendStatus, ShippingEnvelope};

use crate::read_code_input;

/// Ship an already-built wire string through a registered transport.
pub fn send_command(
    code: Option<String>,
    input: Option<String>,
    transport_name: String,
) -> Result<()> {
    let code = read_code_input(code, input)?;

    // Decode only to recover the display name; the payload ships as-is.
    let codec = Codec::new(&EmptyCatalog);
    let template = codec.decode(&code).context("Failed to decode template")?;

    let registry = default_transport_registry();
    let transport = registry.get(&transport_name).ok_or_else(|| {
        anyhow!(
            "Unknown transport `{transport_name}`. Available: {}",
            registry.names().join(", ")
        )
    })?;

    let envelope = ShippingEnvelope::new(&template, code.clone());
    match transport.send(&code, &template.name()).context("Transport failed")? {
        SendStatus::Delivered => {
            println!("Sent template `{}` via `{}`:", template.name(), transport.name());
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
        SendStatus::Rejected(reason) => {
            println!("Transport `{}` rejected the template: {reason}", transport.name());
        }
    }

    Ok(())
}
