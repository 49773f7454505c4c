use crate::clients::ProductClient;
use crate::config::AppConfig;
use tracing::{error, info};

/// The runtime orchestrator for the inventory service.
///
/// `InventorySystem` is responsible for:
/// - **Lifecycle Management**: starting and stopping the product actor
/// - **Dependency Wiring**: handing out clients bound to the running actor
///
/// # Example
///
/// ```ignore
/// let system = InventorySystem::new(&AppConfig::default());
///
/// let id = system.product_client.create_product(params).await?;
/// system.product_client.decrease_stock(id, None).await?;
///
/// // Gracefully shut down when done
/// system.shutdown().await?;
/// ```
pub struct InventorySystem {
    /// Client for interacting with the Product actor
    pub product_client: ProductClient,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl InventorySystem {
    /// Creates the product actor and spawns it. Must be called inside a Tokio runtime.
    pub fn new(config: &AppConfig) -> Self {
        let (product_actor, product_client) = crate::product_actor::new(config.channel_capacity);

        // Product has no dependencies (Context = ())
        let product_handle = tokio::spawn(product_actor.run(()));

        Self {
            product_client: ProductClient::new(product_client),
            handles: vec![product_handle],
        }
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping this system's client closes the channel once every clone handed out
    /// elsewhere (e.g. to the HTTP router) is gone too. Each actor then drains its queue and
    /// exits. Returns an error if an actor task panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.product_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
