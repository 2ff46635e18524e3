use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Domain events emitted by the services after a successful commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Product events
    ProductCreated(i64),
    ProductUpdated(i64),
    ProductDeleted(i64),
    StockAdjusted {
        product_id: i64,
        previous: i32,
        current: i32,
        reason: String,
    },

    // Reconciliation events
    ReconciliationSubmitted(i64),
    ReconciliationApproved {
        record_id: i64,
        product_id: i64,
    },
    ReconciliationRejected(i64),

    // Order events
    SupplyOrderSaved {
        order_id: i64,
        document_number: String,
    },
    SupplyOrderDeleted(i64),
    PurchaseOrderSaved {
        order_id: i64,
        document_number: String,
    },
    PurchaseOrderDeleted(i64),
    OutboundOrderDispatched {
        order_id: i64,
        order_number: String,
        dispatch_date: NaiveDate,
    },
    OutboundOrderDeleted(i64),

    // Party events
    SupplierCreated(i64),
    BeneficiaryCreated(i64),
    UserCreated(i64),
}

/// Cloneable handle for publishing events onto the internal channel.
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

/// Consumes events from the channel until all senders are dropped.
///
/// The loop only logs today; downstream consumers (notifications,
/// audit trail) hook in here.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    info!("Starting event processing loop");

    while let Some(event) = rx.recv().await {
        match &event {
            Event::StockAdjusted {
                product_id,
                previous,
                current,
                reason,
            } => {
                info!(
                    product_id,
                    previous, current, reason, "stock level adjusted"
                );
                if *current == 0 {
                    warn!(product_id, "product stock depleted");
                }
            }
            Event::OutboundOrderDispatched {
                order_id,
                order_number,
                dispatch_date,
            } => {
                info!(
                    order_id,
                    %order_number,
                    %dispatch_date,
                    "outbound order dispatched"
                );
            }
            other => {
                let payload = serde_json::to_string(other).unwrap_or_default();
                debug!(%payload, "event");
            }
        }
    }

    info!("Event processing loop stopped");
}
