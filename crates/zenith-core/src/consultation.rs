//! Booked discovery calls (`consultations` table). Rows are written by the
//! scheduling integration; the site only reads them.

use crate::error::Result;
use crate::store::{Order, Query, Row, Store};

pub const TABLE: &str = "consultations";

/// All consultations, latest `scheduled_at` first.
pub async fn list(store: &dyn Store) -> Result<Vec<Row>> {
    store
        .select(TABLE, &Query::new().order(Order::desc("scheduled_at")))
        .await
}
