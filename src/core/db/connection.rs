/// Connection Provider Module
///
/// Opens the single PostgreSQL session used for the whole invocation. The
/// connection is an explicitly owned handle: it is created once at startup,
/// handed to the `StudentStore`, and closed exactly once when the program
/// finishes. There is no pool and no shared global state.
use crate::config::ConnectionSettings;
use crate::core::Result;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;
use tracing::debug;

/// Builds the connect options for the given settings.
fn options_for(settings: &ConnectionSettings) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .username(&settings.user)
        .password(&settings.password)
        .database(&settings.database)
}

/// Opens one session against the configured server.
///
/// Mutations are never left to implicit autocommit: every write issued over
/// this connection runs inside an explicit transaction scope owned by the
/// repository. Failure to connect is surfaced to the caller, which treats it
/// as fatal; nothing downstream runs without a session.
pub async fn connect(settings: &ConnectionSettings) -> Result<PgConnection> {
    debug!(
        "connecting to {}:{}/{} as {}",
        settings.host, settings.port, settings.database, settings.user
    );
    let conn = PgConnection::connect_with(&options_for(settings)).await?;
    debug!("connection established");
    Ok(conn)
}
