//! Database connection utilities.

use switchy_database::Database;
use switchy_database_connection::Credentials;

/// Connects to the `PostgreSQL` database at the given URL.
///
/// Configures a 60-second `statement_timeout` so stalled statements fail
/// with an error instead of hanging indefinitely.
///
/// # Errors
///
/// Returns an error if the URL cannot be parsed or the connection fails.
pub async fn connect(database_url: &str) -> Result<Box<dyn Database>, Box<dyn std::error::Error>> {
    // Strip query parameters (e.g., ?sslmode=require&channel_binding=require)
    // that the Credentials parser doesn't understand. TLS is handled by the
    // native-tls connector automatically.
    let url_base = database_url.split('?').next().unwrap_or(database_url);

    let creds = Credentials::from_url(url_base)?;
    let db = switchy_database_connection::init_postgres_raw_native_tls(creds).await?;

    db.exec_raw("SET statement_timeout = '60s'").await?;

    Ok(db)
}
