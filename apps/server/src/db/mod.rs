//! Procedure gateway: the only path from the server to the relational store.
//!
//! Every operation is a named stored procedure invoked with positional
//! parameters. Rows come back as JSON objects keyed by column name so they can
//! be relayed to callers unchanged or decoded into typed rows.

pub mod mysql;
pub mod procedures;
pub mod rows;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{Map, Value};

pub use mysql::MySqlGateway;

/// A single result row: column name to scalar.
pub type Row = Map<String, Value>;

/// Rows produced by one procedure call.
pub type ResultSet = Vec<Row>;

/// Positional procedure parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Int(i64),
    Text(Option<String>),
    Date(NaiveDate),
}

impl From<i64> for Param {
    fn from(v: i64) -> Self {
        Param::Int(v)
    }
}

impl From<&str> for Param {
    fn from(v: &str) -> Self {
        Param::Text(Some(v.to_string()))
    }
}

impl From<String> for Param {
    fn from(v: String) -> Self {
        Param::Text(Some(v))
    }
}

impl From<Option<String>> for Param {
    fn from(v: Option<String>) -> Self {
        Param::Text(v)
    }
}

impl From<NaiveDate> for Param {
    fn from(v: NaiveDate) -> Self {
        Param::Date(v)
    }
}

impl Param {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Param::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Param::Text(v) => v.as_deref(),
            _ => None,
        }
    }
}

/// A named stored procedure with its positional arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureCall {
    pub name: &'static str,
    pub params: Vec<Param>,
}

impl ProcedureCall {
    pub fn new(name: &'static str, params: Vec<Param>) -> Self {
        Self { name, params }
    }

    /// `CALL name(?, ?, ...)` with one placeholder per parameter.
    pub fn statement(&self) -> String {
        let placeholders = vec!["?"; self.params.len()].join(", ");
        format!("CALL {}({})", self.name, placeholders)
    }
}

/// Classification of a store-side rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcedureErrorKind {
    InvalidCredentials,
    UserNotFound,
    Duplicate,
    Other,
}

impl ProcedureErrorKind {
    /// Classify an application-raised procedure message.
    ///
    /// This is the single place where message text is inspected.
    pub fn from_message(message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("invalid credentials") {
            Self::InvalidCredentials
        } else if lower.contains("user not found") {
            Self::UserNotFound
        } else if lower.contains("duplicate") || lower.contains("already exists") {
            Self::Duplicate
        } else {
            Self::Other
        }
    }
}

/// Gateway failures, tagged once at the store boundary.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GatewayError {
    /// Store unreachable or credentials rejected.
    #[error("Database connection failed: {0}")]
    Connectivity(String),

    /// The procedure call itself failed.
    #[error("{message}")]
    Procedure {
        kind: ProcedureErrorKind,
        message: String,
    },

    /// A step of a transactional sequence failed; the whole sequence was rolled back.
    #[error("{procedure} failed at step {step}, changes rolled back: {source}")]
    SequenceAborted {
        step: usize,
        procedure: &'static str,
        #[source]
        source: Box<GatewayError>,
    },
}

impl GatewayError {
    pub fn procedure(message: impl Into<String>) -> Self {
        let message = message.into();
        GatewayError::Procedure {
            kind: ProcedureErrorKind::from_message(&message),
            message,
        }
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Access to the stored procedures of the relational store.
#[async_trait]
pub trait ProcedureGateway: Send + Sync {
    /// Liveness probe (`SELECT 1`).
    async fn ping(&self) -> GatewayResult<()>;

    /// Execute one procedure on its own connection.
    async fn invoke(&self, call: ProcedureCall) -> GatewayResult<ResultSet>;

    /// Open a transaction scope for a multi-step write.
    async fn begin(&self) -> GatewayResult<Box<dyn ProcedureTransaction>>;
}

/// A transaction scope over one connection.
///
/// Dropping the scope without calling [`ProcedureTransaction::commit`] rolls
/// back every call made through it.
#[async_trait]
pub trait ProcedureTransaction: Send {
    async fn invoke(&mut self, call: ProcedureCall) -> GatewayResult<ResultSet>;

    async fn commit(self: Box<Self>) -> GatewayResult<()>;
}

/// Runs calls inside a transaction, numbering steps for error reporting.
pub struct Sequence {
    tx: Box<dyn ProcedureTransaction>,
    step: usize,
}

impl Sequence {
    pub async fn begin(gateway: &dyn ProcedureGateway) -> GatewayResult<Self> {
        Ok(Self {
            tx: gateway.begin().await?,
            step: 0,
        })
    }

    /// Invoke the next step. A failure drops the transaction (rolling back)
    /// and reports which step failed.
    pub async fn step(&mut self, call: ProcedureCall) -> GatewayResult<ResultSet> {
        self.step += 1;
        let procedure = call.name;
        self.tx
            .invoke(call)
            .await
            .map_err(|source| GatewayError::SequenceAborted {
                step: self.step,
                procedure,
                source: Box::new(source),
            })
    }

    pub async fn commit(self) -> GatewayResult<()> {
        self.tx.commit().await
    }
}
