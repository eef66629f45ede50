use std::collections::BTreeMap;

use filedger_records::{FileRegistry, RecordResult};

use crate::handler;
use crate::response::Response;

/// A handler for one named operation. Returns the success payload.
pub type Handler = fn(&FileRegistry, &[String]) -> RecordResult<Vec<u8>>;

/// Maps operation names to handlers.
#[derive(Clone, Default)]
pub struct Router {
    routes: BTreeMap<&'static str, Handler>,
}

impl Router {
    /// An empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// A router with every file operation registered.
    pub fn with_file_operations() -> Self {
        Self::new()
            .route(handler::INIT_FILE, handler::init_file)
            .route(handler::DELETE_FILE, handler::delete_file)
            .route(handler::QUERY_FILE, handler::query_file)
            .route(handler::READ_FILE, handler::read_file)
            .route(handler::FIND_BY_HASH, handler::find_by_hash)
    }

    /// Register `handler` under `name`, replacing any previous handler.
    pub fn route(mut self, name: &'static str, handler: Handler) -> Self {
        self.routes.insert(name, handler);
        self
    }

    /// Registered operation names, sorted.
    pub fn operations(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.routes.keys().copied()
    }

    /// Instantiation hook. There is no state to prepare.
    pub fn init(&self, _registry: &FileRegistry) -> Response {
        Response::success(Vec::new())
    }

    /// Run `function` with `args`.
    pub fn invoke(&self, registry: &FileRegistry, function: &str, args: &[String]) -> Response {
        tracing::info!(function, args = args.len(), "invoke is running");
        let Some(handler) = self.routes.get(function) else {
            tracing::warn!(function, "invoke did not find function");
            return Response::error("Received unknown function invocation");
        };
        match handler(registry, args) {
            Ok(payload) => Response::success(payload),
            Err(err) => {
                tracing::debug!(function, error = %err, "invocation failed");
                Response::error(err.to_string())
            }
        }
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("operations", &self.routes.keys().collect::<Vec<_>>())
            .finish()
    }
}
