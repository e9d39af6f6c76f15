//! Mutation observer installation and the binding event pump.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::cdp::error::CdpError;
use crate::cdp::protocol::{BindingCalled, CdpResponse};
use crate::mutation::{MUTATION_BINDING, MutationHub, OBSERVER_SCRIPT};

use super::core::PageSession;

impl PageSession {
    /// Install the page mutation observer and forward its reports to `hub`.
    ///
    /// The observer is registered for every new document as well, so it
    /// survives navigations. Calling this twice only reinstalls the script.
    pub async fn install_mutation_observer(&self, hub: Arc<MutationHub>) -> Result<(), CdpError> {
        self.call("Runtime.addBinding", Some(json!({ "name": MUTATION_BINDING })))
            .await?;
        self.call(
            "Page.addScriptToEvaluateOnNewDocument",
            Some(json!({ "source": OBSERVER_SCRIPT })),
        )
        .await?;
        self.evaluate(OBSERVER_SCRIPT).await?;

        if let Some(events) = self.take_events() {
            let pump = tokio::spawn(pump_mutations(events, hub));
            *self.pump.lock() = Some(pump);
        }

        debug!("Mutation observer installed for session {}", self.session_id());
        Ok(())
    }
}

/// Forward mutation binding payloads until the session's event channel ends.
pub(super) async fn pump_mutations(
    mut events: mpsc::UnboundedReceiver<CdpResponse>,
    hub: Arc<MutationHub>,
) {
    while let Some(event) = events.recv().await {
        if let Some(description) = binding_payload(&event) {
            trace!("Mutation reported: {}", description);
            hub.publish(&description);
        }
    }
    debug!("Mutation pump stopped");
}

/// Payload of a mutation binding call, if `event` is one.
pub(super) fn binding_payload(event: &CdpResponse) -> Option<String> {
    if event.method.as_deref() != Some("Runtime.bindingCalled") {
        return None;
    }
    let binding: BindingCalled = serde_json::from_value(event.params.clone()?).ok()?;
    (binding.name == MUTATION_BINDING && !binding.payload.is_empty()).then_some(binding.payload)
}
