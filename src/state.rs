use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::chart::SelectedPoint;

/// Shared application state, passed to all route handlers via `axum::extract::State`.
pub struct AppState {
    pub pool: PgPool,

    /// The chart point the operator last clicked. Empty at startup,
    /// overwritten on each click, never cleared.
    selection: RwLock<Option<SelectedPoint>>,
}

impl AppState {
    pub fn new(pool: PgPool) -> Arc<Self> {
        Arc::new(Self {
            pool,
            selection: RwLock::new(None),
        })
    }

    /// Transition `no-selection -> selection(x, y, label)`; a later click
    /// replaces the previous selection.
    pub async fn record_click(&self, point: SelectedPoint) {
        *self.selection.write().await = Some(point);
    }

    pub async fn selection(&self) -> Option<SelectedPoint> {
        self.selection.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn test_state() -> Arc<AppState> {
        // Lazy pool: never actually connects in these tests.
        let pool = db::lazy_pool("postgres://reader:pw@localhost:5432/bonds", 1).unwrap();
        AppState::new(pool)
    }

    fn point(label: &str, y: f64) -> SelectedPoint {
        SelectedPoint {
            x: "2030-06-15".parse().unwrap(),
            y,
            label: label.to_string(),
        }
    }

    #[tokio::test]
    async fn selection_starts_empty() {
        let state = test_state();
        assert_eq!(state.selection().await, None);
    }

    #[tokio::test]
    async fn click_sets_and_a_later_click_replaces_the_selection() {
        let state = test_state();

        state.record_click(point("US1234567890", 3.6)).await;
        assert_eq!(state.selection().await, Some(point("US1234567890", 3.6)));

        state.record_click(point("US0987654321", 4.1)).await;
        assert_eq!(state.selection().await, Some(point("US0987654321", 4.1)));
    }
}
