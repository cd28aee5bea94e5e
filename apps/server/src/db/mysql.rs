//! MySQL implementation of the procedure gateway via SeaORM.
//!
//! Each call opens its own connection and closes it afterwards; transaction
//! scopes hold a single connection until commit or drop.

use async_trait::async_trait;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection,
    DatabaseTransaction, DbErr, FromQueryResult, JsonValue, RuntimeErr, SqlErr, Statement,
    TransactionTrait,
};
use tracing::{debug, warn};

use super::{
    GatewayError, GatewayResult, Param, ProcedureCall, ProcedureErrorKind, ProcedureGateway,
    ProcedureTransaction, ResultSet,
};
use crate::config::DatabaseSettings;

/// Gateway that connects per call using the configured settings.
#[derive(Clone)]
pub struct MySqlGateway {
    url: String,
}

impl MySqlGateway {
    pub fn new(settings: &DatabaseSettings) -> Self {
        Self {
            url: settings.url(),
        }
    }

    async fn connect(&self) -> GatewayResult<DatabaseConnection> {
        let mut options = ConnectOptions::new(self.url.clone());
        options
            .max_connections(1)
            .min_connections(0)
            .sqlx_logging(false);

        Database::connect(options)
            .await
            .map_err(|e| GatewayError::Connectivity(e.to_string()))
    }
}

impl std::fmt::Debug for MySqlGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MySqlGateway([REDACTED])")
    }
}

fn to_value(param: Param) -> sea_orm::Value {
    match param {
        Param::Int(v) => v.into(),
        Param::Text(v) => v.into(),
        Param::Date(v) => v.into(),
    }
}

fn build_statement(call: ProcedureCall) -> Statement {
    let sql = call.statement();
    let values: Vec<sea_orm::Value> = call.params.into_iter().map(to_value).collect();
    Statement::from_sql_and_values(DatabaseBackend::MySql, sql, values)
}

/// The store's own message, without the driver's wrapper text.
fn store_message(err: &DbErr) -> String {
    let runtime = match err {
        DbErr::Query(e) | DbErr::Exec(e) => e,
        DbErr::Custom(message) => return message.clone(),
        other => return other.to_string(),
    };
    match runtime {
        RuntimeErr::SqlxError(e) => e
            .as_database_error()
            .map(|db| db.message().to_string())
            .unwrap_or_else(|| err.to_string()),
        RuntimeErr::Internal(message) => message.clone(),
        #[allow(unreachable_patterns)]
        _ => err.to_string(),
    }
}

/// Map a driver error onto the gateway taxonomy.
fn classify(err: DbErr) -> GatewayError {
    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => GatewayError::Connectivity(err.to_string()),
        other => {
            let message = store_message(&other);
            let kind = match other.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => ProcedureErrorKind::Duplicate,
                _ => ProcedureErrorKind::from_message(&message),
            };
            GatewayError::Procedure { kind, message }
        }
    }
}

async fn run<C: ConnectionTrait>(conn: &C, call: ProcedureCall) -> GatewayResult<ResultSet> {
    debug!(
        procedure = call.name,
        params = call.params.len(),
        "Invoking stored procedure"
    );

    let rows = JsonValue::find_by_statement(build_statement(call))
        .all(conn)
        .await
        .map_err(classify)?;

    Ok(rows
        .into_iter()
        .filter_map(|row| match row {
            JsonValue::Object(map) => Some(map),
            _ => None,
        })
        .collect())
}

async fn close(conn: DatabaseConnection) {
    if let Err(e) = conn.close().await {
        warn!("Failed to close database connection: {}", e);
    }
}

#[async_trait]
impl ProcedureGateway for MySqlGateway {
    async fn ping(&self) -> GatewayResult<()> {
        let conn = self.connect().await?;
        let stmt = Statement::from_string(DatabaseBackend::MySql, "SELECT 1".to_owned());
        let result = conn.query_one_raw(stmt).await.map_err(classify);
        close(conn).await;
        result.map(|_| ())
    }

    async fn invoke(&self, call: ProcedureCall) -> GatewayResult<ResultSet> {
        let conn = self.connect().await?;
        let result = run(&conn, call).await;
        close(conn).await;
        result
    }

    async fn begin(&self) -> GatewayResult<Box<dyn ProcedureTransaction>> {
        let conn = self.connect().await?;
        let txn = conn.begin().await.map_err(classify)?;
        Ok(Box::new(MySqlTransaction { conn, txn }))
    }
}

/// Open transaction plus the connection that owns it.
struct MySqlTransaction {
    conn: DatabaseConnection,
    txn: DatabaseTransaction,
}

#[async_trait]
impl ProcedureTransaction for MySqlTransaction {
    async fn invoke(&mut self, call: ProcedureCall) -> GatewayResult<ResultSet> {
        run(&self.txn, call).await
    }

    async fn commit(self: Box<Self>) -> GatewayResult<()> {
        let MySqlTransaction { conn, txn } = *self;
        let result = txn.commit().await.map_err(classify);
        close(conn).await;
        result
    }
}
