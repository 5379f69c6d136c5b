//! Shared workbook with an exclusive section
//!
//! Every read-modify-write sequence (edit, recalculation, correction) runs
//! while holding the workbook lock, so two corrections cannot interleave and
//! leave a torn bundle behind.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard};

use crate::errors::{DealsheetError, Result};

use super::memory::Sheet;

/// A sheet shared between tasks
#[derive(Debug, Clone)]
pub struct Workbook {
    sheet: Arc<Mutex<Sheet>>,
    lock_timeout: Duration,
}

impl Workbook {
    pub fn new(sheet: Sheet, lock_timeout: Duration) -> Self {
        Workbook {
            sheet: Arc::new(Mutex::new(sheet)),
            lock_timeout,
        }
    }

    /// Enter the exclusive section.
    ///
    /// # Errors
    /// * `Timeout` - If the lock is not acquired within the configured timeout
    pub async fn exclusive(&self) -> Result<MutexGuard<'_, Sheet>> {
        match tokio::time::timeout(self.lock_timeout, self.sheet.lock()).await {
            Ok(guard) => Ok(guard),
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.lock_timeout.as_millis() as u64,
                    "workbook lock not acquired"
                );
                Err(DealsheetError::Timeout(format!(
                    "workbook lock not acquired within {}ms",
                    self.lock_timeout.as_millis()
                )))
            }
        }
    }

    /// Consistent copy of the sheet taken under the lock
    pub async fn snapshot(&self) -> Result<Sheet> {
        let guard = self.exclusive().await?;
        Ok(guard.clone())
    }
}
