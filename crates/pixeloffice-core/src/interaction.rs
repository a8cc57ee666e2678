//! Click interactions.
//!
//! Clicking an agent posts `{agent_id, role, action}` to the interaction
//! endpoint. At most one request per agent is in flight; clicks on a busy
//! agent are dropped.

use hecs::Entity;
use pixeloffice_logic::types::Role;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

use crate::api::{Reply, Transport, TransportError, INTERACT_PATH};
use crate::components::Identity;

pub const CLICK_ACTION: &str = "CLICK";

/// Interaction request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionRequest {
    pub agent_id: String,
    pub role: Role,
    pub action: String,
}

/// A request handed to the host. Must be settled to free the agent.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct PendingInteraction {
    pub entity: Entity,
    pub request: InteractionRequest,
}

/// Tracks which agents have a request in flight.
#[derive(Debug, Default)]
pub struct InteractionTracker {
    busy: HashSet<Entity>,
}

impl InteractionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an agent busy. `None` if it already was.
    pub fn begin(&mut self, entity: Entity, identity: &Identity) -> Option<PendingInteraction> {
        if !self.busy.insert(entity) {
            log::debug!("{} ({}) is busy, click ignored", identity.name, identity.id);
            return None;
        }
        Some(PendingInteraction {
            entity,
            request: InteractionRequest {
                agent_id: identity.id.clone(),
                role: identity.role,
                action: CLICK_ACTION.to_string(),
            },
        })
    }

    /// Free the agent and log the outcome.
    pub fn settle(&mut self, pending: PendingInteraction, result: &Result<Reply, TransportError>) {
        self.busy.remove(&pending.entity);
        let id = &pending.request.agent_id;
        match result {
            Ok(reply) if reply.is_success() => {
                log::info!("Interaction with agent {}: {}", id, reply.body)
            }
            Ok(reply) => log::warn!(
                "Interaction with agent {} rejected with status {}",
                id,
                reply.status
            ),
            Err(e) => log::warn!("Interaction with agent {} failed: {}", id, e),
        }
    }

    pub fn is_busy(&self, entity: Entity) -> bool {
        self.busy.contains(&entity)
    }

    pub fn busy_count(&self) -> usize {
        self.busy.len()
    }

    pub fn clear(&mut self) {
        self.busy.clear();
    }
}

/// Perform a pending request through `transport`.
pub fn dispatch<T: Transport + ?Sized>(
    pending: &PendingInteraction,
    transport: &mut T,
) -> Result<Reply, TransportError> {
    let body: Value = serde_json::to_value(&pending.request)?;
    transport.post_json(INTERACT_PATH, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hecs::World;
    use serde_json::json;

    fn identity() -> Identity {
        Identity {
            id: "5".into(),
            role: Role::NewGradBa,
            name: "David".into(),
        }
    }

    struct Echo(Vec<Value>);

    impl Transport for Echo {
        fn post_json(&mut self, path: &str, body: &Value) -> Result<Reply, TransportError> {
            assert_eq!(path, INTERACT_PATH);
            self.0.push(body.clone());
            Ok(Reply::ok(json!({"message": "Hi"})))
        }
    }

    struct Offline;

    impl Transport for Offline {
        fn post_json(&mut self, _: &str, _: &Value) -> Result<Reply, TransportError> {
            Err(TransportError::Connection("refused".into()))
        }
    }

    #[test]
    fn second_click_while_busy_is_ignored() {
        let mut world = World::new();
        let e = world.spawn((identity(),));
        let mut tracker = InteractionTracker::new();

        let pending = tracker.begin(e, &identity()).unwrap();
        assert!(tracker.is_busy(e));
        assert!(tracker.begin(e, &identity()).is_none());

        let result = dispatch(&pending, &mut Echo(Vec::new()));
        tracker.settle(pending, &result);
        assert!(!tracker.is_busy(e));
        assert!(tracker.begin(e, &identity()).is_some());
    }

    #[test]
    fn request_body_uses_wire_names() {
        let mut world = World::new();
        let e = world.spawn((identity(),));
        let mut tracker = InteractionTracker::new();
        let pending = tracker.begin(e, &identity()).unwrap();

        let mut echo = Echo(Vec::new());
        dispatch(&pending, &mut echo).unwrap();
        assert_eq!(
            echo.0[0],
            json!({"agent_id": "5", "role": "NEW_GRAD_BA", "action": "CLICK"})
        );
    }

    #[test]
    fn failure_still_clears_busy() {
        let mut world = World::new();
        let e = world.spawn((identity(),));
        let mut tracker = InteractionTracker::new();
        let pending = tracker.begin(e, &identity()).unwrap();

        let result = dispatch(&pending, &mut Offline);
        assert!(result.is_err());
        tracker.settle(pending, &result);
        assert_eq!(tracker.busy_count(), 0);
    }
}
