//! The process-wide container handle.

use super::{Concrete, Container};
use parking_lot::RwLock;
use rivet_core::{Instance, Value};
use tracing::debug;

/// Class name a container is exposed under when resolved from itself.
pub const CONTAINER_CLASS: &str = "rivet::Container";

/// Interface name the installed container is also reachable through.
pub const CONTAINER_INTERFACE: &str = "rivet::ContainerInterface";

/// Binding id the installed container is reachable through.
const SELF_ID: &str = "app";

static CURRENT: RwLock<Option<Container>> = parking_lot::const_rwlock(None);

impl Container {
    /// Create a container, make it the process-wide one, and bind it to itself.
    ///
    /// The container resolves as `"app"`, [`CONTAINER_CLASS`] and
    /// [`CONTAINER_INTERFACE`]. The self-binding is a transient factory so the
    /// container never holds a strong reference to itself.
    pub fn install() -> Container {
        let container = Container::new();
        container.bind_self_reference();
        Self::set_current(&container);
        container
    }

    fn bind_self_reference(&self) {
        self.bind(
            SELF_ID,
            Concrete::factory(|c, _| Ok(Value::Object(Instance::new(CONTAINER_CLASS, c.clone())))),
        );
        self.alias(SELF_ID, CONTAINER_CLASS);
        self.alias(SELF_ID, CONTAINER_INTERFACE);
    }

    /// The process-wide container, installing one on first use.
    pub fn current() -> Container {
        if let Some(container) = CURRENT.read().as_ref() {
            return container.clone();
        }
        let mut slot = CURRENT.write();
        slot.get_or_insert_with(|| {
            debug!("Installing process-wide container");
            let container = Container::new();
            container.bind_self_reference();
            container
        })
        .clone()
    }

    /// Replace the process-wide container.
    pub fn set_current(container: &Container) {
        debug!("Process-wide container replaced");
        *CURRENT.write() = Some(container.clone());
    }

    /// Whether this handle is the process-wide container.
    pub fn is_current(&self) -> bool {
        CURRENT.read().as_ref().is_some_and(|c| c.ptr_eq(self))
    }
}
