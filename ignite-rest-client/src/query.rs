//! Query types and the paged query cursor.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use ignite_rest_core::command::{
    CMD_QUERY_CLOSE, CMD_QUERY_EXECUTE, CMD_QUERY_FETCH, CMD_QUERY_FIELDS_EXECUTE,
};
use ignite_rest_core::{Command, FieldMetadata, IgniteError, QueryPage, Result};

use crate::connection::RestConnection;

/// Default number of items fetched per page.
const DEFAULT_PAGE_SIZE: u32 = 1024;

/// The kind of a query, with kind-specific fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryKind {
    /// Full cache scan.
    Scan,
    /// SQL query returning entries of the given type.
    Sql {
        /// Type whose entries the query returns.
        return_type: String,
    },
    /// SQL query returning individual fields.
    SqlFields,
}

/// A query to run against a cache, configured before execution.
#[derive(Debug, Clone)]
pub struct Query {
    text: String,
    page_size: u32,
    args: Vec<Value>,
    kind: QueryKind,
}

impl Query {
    /// Creates a SQL query returning entries of `return_type`.
    pub fn sql(text: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            page_size: DEFAULT_PAGE_SIZE,
            args: Vec::new(),
            kind: QueryKind::Sql {
                return_type: return_type.into(),
            },
        }
    }

    /// Creates a SQL fields query.
    pub fn sql_fields(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            page_size: DEFAULT_PAGE_SIZE,
            args: Vec::new(),
            kind: QueryKind::SqlFields,
        }
    }

    /// Creates a full-scan query.
    pub fn scan() -> Self {
        Self {
            text: String::new(),
            page_size: DEFAULT_PAGE_SIZE,
            args: Vec::new(),
            kind: QueryKind::Scan,
        }
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the positional arguments, replacing any previously configured.
    pub fn with_args(mut self, args: Vec<Value>) -> Self {
        self.args = args;
        self
    }

    /// Appends one positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Returns the query text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the page size.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns the positional arguments.
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Returns the query kind.
    pub fn kind(&self) -> &QueryKind {
        &self.kind
    }
}

#[derive(Serialize)]
struct ArgBody<'a> {
    arg: &'a [Value],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CursorState {
    Uninitialized,
    Paging,
    Finished,
}

/// A handle tracking paged retrieval progress for one query execution.
///
/// The cursor starts uninitialized, moves to paging after the first fetch,
/// and finishes when the server signals the last page or the cursor is
/// closed. Bulk fetch ([`get_all`](Self::get_all)) and manual paging
/// ([`next_page`](Self::next_page)) are mutually exclusive per cursor.
#[derive(Debug)]
pub struct QueryCursor {
    connection: Arc<RestConnection>,
    cache_name: String,
    query: Query,
    state: CursorState,
    query_id: i64,
    page: Vec<Value>,
    fields_metadata: Option<Vec<FieldMetadata>>,
}

impl QueryCursor {
    pub(crate) fn new(connection: Arc<RestConnection>, cache_name: String, query: Query) -> Self {
        Self {
            connection,
            cache_name,
            query,
            state: CursorState::Uninitialized,
            query_id: 0,
            page: Vec::new(),
            fields_metadata: None,
        }
    }

    /// Fetches the next page of results.
    ///
    /// The first call issues the query-execute command; subsequent calls
    /// fetch by cursor id. Calling this after the last page was returned is
    /// a cursor-state error raised without a network round trip.
    pub async fn next_page(&mut self) -> Result<&[Value]> {
        let command = match self.state {
            CursorState::Finished => {
                return Err(IgniteError::CursorState(
                    "all pages were already returned".to_string(),
                ))
            }
            CursorState::Uninitialized => self.execute_command()?,
            CursorState::Paging => self.fetch_command(),
        };

        self.run(&command).await?;
        Ok(&self.page)
    }

    /// Fetches every remaining page and returns the concatenated items.
    ///
    /// Valid only on a cursor that has never been advanced manually; mixing
    /// bulk fetch with manual paging is ambiguous and rejected. All pages
    /// are drained, so there is no need to call [`close`](Self::close)
    /// afterwards.
    pub async fn get_all(&mut self) -> Result<Vec<Value>> {
        if self.state != CursorState::Uninitialized {
            return Err(IgniteError::CursorState(
                "get_all cannot be called after next_page".to_string(),
            ));
        }

        let mut items = Vec::new();
        loop {
            let command = match self.state {
                CursorState::Uninitialized => self.execute_command()?,
                _ => self.fetch_command(),
            };
            self.run(&command).await?;
            items.append(&mut self.page);

            if self.state == CursorState::Finished {
                return Ok(items);
            }
        }
    }

    /// Releases the server-side cursor.
    ///
    /// A no-op on a cursor that was never initialized or is already
    /// finished; idempotent.
    pub async fn close(&mut self) -> Result<()> {
        match self.state {
            CursorState::Uninitialized | CursorState::Finished => Ok(()),
            CursorState::Paging => {
                let command = Command::new(CMD_QUERY_CLOSE)
                    .param("cacheName", &self.cache_name)
                    .param("qryId", self.query_id);
                self.connection.execute(&command).await?;
                self.state = CursorState::Finished;
                self.page.clear();
                Ok(())
            }
        }
    }

    /// Returns true once the server has signalled the last page (or the
    /// cursor was closed).
    pub fn is_finished(&self) -> bool {
        self.state == CursorState::Finished
    }

    /// Returns the items of the current page.
    pub fn page(&self) -> &[Value] {
        &self.page
    }

    /// Returns the fields metadata captured from the first response.
    pub fn fields_metadata(&self) -> &[FieldMetadata] {
        self.fields_metadata.as_deref().unwrap_or(&[])
    }

    async fn run(&mut self, command: &Command) -> Result<()> {
        let payload = self.connection.execute(command).await?;
        let page: QueryPage = serde_json::from_value(payload)
            .map_err(|e| IgniteError::Protocol(format!("malformed query page: {e}")))?;

        if self.fields_metadata.is_none() {
            self.fields_metadata = Some(page.fields_metadata);
        }
        self.query_id = page.query_id;
        self.page = page.items;
        self.state = if page.last {
            CursorState::Finished
        } else {
            CursorState::Paging
        };
        Ok(())
    }

    fn execute_command(&self) -> Result<Command> {
        let command = match self.query.kind() {
            QueryKind::Sql { return_type } => Command::new(CMD_QUERY_EXECUTE)
                .param("cacheName", &self.cache_name)
                .param("qry", self.query.text())
                .param("psz", self.query.page_size())
                .param("type", return_type),
            // Scan rides the fields-execute path; there is no dedicated
            // scan command in this REST surface.
            QueryKind::SqlFields | QueryKind::Scan => Command::new(CMD_QUERY_FIELDS_EXECUTE)
                .param("cacheName", &self.cache_name)
                .param("qry", self.query.text())
                .param("psz", self.query.page_size()),
        };
        command.post_json(&ArgBody {
            arg: self.query.args(),
        })
    }

    fn fetch_command(&self) -> Command {
        Command::new(CMD_QUERY_FETCH)
            .param("cacheName", &self.cache_name)
            .param("qryId", self.query_id)
            .param("psz", self.query.page_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::connection::{expand_address_specs, RestConnection};
    use serde_json::json;

    fn cursor(query: Query) -> QueryCursor {
        // Port 1 is never probed by these tests; only synchronous state
        // checks run.
        let config = ClientConfig::builder().address("127.0.0.1:1").build().unwrap();
        let endpoint = expand_address_specs(config.address_specs())
            .unwrap()
            .remove(0);
        let connection = RestConnection::open(endpoint, &config).unwrap();
        QueryCursor::new(Arc::new(connection), "test-cache".to_string(), query)
    }

    #[test]
    fn test_sql_query_builder() {
        let query = Query::sql("select * from Person where salary > ?", "Person")
            .with_page_size(2)
            .arg(1000);

        assert_eq!(query.page_size(), 2);
        assert_eq!(query.args(), [json!(1000)]);
        assert_eq!(
            query.kind(),
            &QueryKind::Sql {
                return_type: "Person".to_string()
            }
        );
    }

    #[test]
    fn test_execute_command_for_sql_kind() {
        let cursor = cursor(Query::sql("select * from Person", "Person").with_page_size(2));
        let command = cursor.execute_command().unwrap();
        assert_eq!(command.name(), CMD_QUERY_EXECUTE);
        assert_eq!(command.post_body(), Some(r#"{"arg":[]}"#));
        assert!(command.query_string().contains("type=Person"));
        assert!(command.query_string().contains("psz=2"));
    }

    #[test]
    fn test_execute_command_for_fields_kind() {
        let cursor = cursor(Query::sql_fields("select name from Person").arg("a").arg(7));
        let command = cursor.execute_command().unwrap();
        assert_eq!(command.name(), CMD_QUERY_FIELDS_EXECUTE);
        assert_eq!(command.post_body(), Some(r#"{"arg":["a",7]}"#));
        assert!(!command.query_string().contains("type="));
    }

    #[test]
    fn test_scan_rides_fields_execute() {
        let cursor = cursor(Query::scan());
        let command = cursor.execute_command().unwrap();
        assert_eq!(command.name(), CMD_QUERY_FIELDS_EXECUTE);
    }

    #[test]
    fn test_fetch_command_carries_cursor_id() {
        let mut cursor = cursor(Query::sql_fields("select 1").with_page_size(2));
        cursor.query_id = 99;
        let command = cursor.fetch_command();
        assert_eq!(
            command.query_string(),
            "cmd=qryfetch&cacheName=test-cache&qryId=99&psz=2"
        );
    }

    #[tokio::test]
    async fn test_get_all_rejected_after_next_page() {
        let mut cursor = cursor(Query::sql_fields("select 1"));
        cursor.state = CursorState::Paging;

        match cursor.get_all().await {
            Err(IgniteError::CursorState(message)) => {
                assert!(message.contains("after next_page"));
            }
            other => panic!("expected cursor state error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_next_page_rejected_when_finished() {
        let mut cursor = cursor(Query::sql_fields("select 1"));
        cursor.state = CursorState::Finished;

        assert!(matches!(
            cursor.next_page().await,
            Err(IgniteError::CursorState(_))
        ));
    }

    #[tokio::test]
    async fn test_close_is_a_no_op_before_initialization() {
        let mut cursor = cursor(Query::sql_fields("select 1"));
        cursor.close().await.unwrap();
        assert!(!cursor.is_finished());
    }

    #[tokio::test]
    async fn test_close_is_idempotent_when_finished() {
        let mut cursor = cursor(Query::sql_fields("select 1"));
        cursor.state = CursorState::Finished;
        cursor.close().await.unwrap();
        cursor.close().await.unwrap();
        assert!(cursor.is_finished());
    }

    #[test]
    fn test_fields_metadata_empty_before_first_page() {
        let cursor = cursor(Query::sql_fields("select 1"));
        assert!(cursor.fields_metadata().is_empty());
        assert!(cursor.page().is_empty());
        assert!(!cursor.is_finished());
    }
}
