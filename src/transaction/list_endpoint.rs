use axum::{Json, extract::State};

use crate::{
    Error,
    transaction::{SQLiteTransactionStore, Transaction, TransactionService},
};

/// A route handler for listing every transaction, newest first.
pub async fn list_transactions_endpoint(
    State(service): State<TransactionService<SQLiteTransactionStore>>,
) -> Result<Json<Vec<Transaction>>, Error> {
    service.list().map(Json)
}

#[cfg(test)]
mod tests {
    use axum::{Router, routing::get};
    use axum_test::TestServer;
    use rusqlite::Connection;

    use crate::{
        AppState, BudgetConfig, endpoints,
        transaction::{CreateTransaction, Transaction},
    };

    use super::list_transactions_endpoint;

    fn get_test_server() -> (AppState, TestServer) {
        let state = AppState::new(
            Connection::open_in_memory().unwrap(),
            BudgetConfig::default(),
        )
        .unwrap();
        let app = Router::new()
            .route(endpoints::TRANSACTIONS_API, get(list_transactions_endpoint))
            .with_state(state.clone());
        let server = TestServer::try_new(app).expect("Could not create test server.");

        (state, server)
    }

    #[tokio::test]
    async fn lists_nothing_for_empty_store() {
        let (_, server) = get_test_server();

        let response = server.get(endpoints::TRANSACTIONS_API).await;

        response.assert_status_ok();
        assert!(response.json::<Vec<Transaction>>().is_empty());
    }

    #[tokio::test]
    async fn lists_newest_first() {
        let (state, server) = get_test_server();
        let older = state
            .transactions
            .create(CreateTransaction::new(1.0, "2024-01-01", "other", "Older"))
            .unwrap();
        let newer = state
            .transactions
            .create(CreateTransaction::new(2.0, "2024-06-01", "other", "Newer"))
            .unwrap();

        let response = server.get(endpoints::TRANSACTIONS_API).await;

        response.assert_status_ok();
        assert_eq!(response.json::<Vec<Transaction>>(), vec![newer, older]);
    }
}
