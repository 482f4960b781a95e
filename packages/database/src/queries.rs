//! Queries for farm lead rows.
//!
//! Spatial inserts use `exec_raw_params()` with `PostGIS` functions; the
//! point is rendered as well-known text and interpreted as SRID 4326
//! geography.

use farmstop_database_models::NewFarmLead;
use moosicbox_json_utils::database::ToValue as _;
use switchy_database::{Database, DatabaseValue};

use crate::DbError;

/// Looks up the ID of a farm row with the given name.
///
/// Returns `None` when no row matches. The match is exact and
/// case-sensitive.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn find_farm_id_by_name(db: &dyn Database, name: &str) -> Result<Option<i32>, DbError> {
    let rows = db
        .query_raw_params(
            "SELECT id FROM farms WHERE name = $1",
            &[DatabaseValue::String(name.to_string())],
        )
        .await?;

    let Some(row) = rows.first() else {
        return Ok(None);
    };

    let id: i32 = row.to_value("id").map_err(|e| DbError::Conversion {
        message: format!("Failed to parse farm id: {e}"),
    })?;

    Ok(Some(id))
}

/// Inserts a new farm row for a geocoded lead.
///
/// Every seeded row gets the fixed `type` `'lead'` and `status`
/// `'unclaimed'`. The location is stored as SRID 4326 geography, with
/// longitude before latitude per WKT point order.
///
/// # Errors
///
/// Returns [`DbError`] if the contact blob cannot be serialized or the
/// insert fails.
pub async fn insert_farm_lead(db: &dyn Database, lead: &NewFarmLead) -> Result<(), DbError> {
    let contact = serde_json::to_string(&lead.contact).map_err(|e| DbError::Conversion {
        message: format!("Failed to serialize contact for {}: {e}", lead.name),
    })?;

    db.exec_raw_params(
        "INSERT INTO farms (name, type, status, products, contact, location)
         VALUES ($1, 'lead', 'unclaimed', $2::text[], $3::jsonb,
                 ST_GeomFromText($4, 4326)::geography)",
        &[
            DatabaseValue::String(lead.name.clone()),
            DatabaseValue::String(pg_text_array(&lead.products)),
            DatabaseValue::String(contact),
            DatabaseValue::String(point_wkt(lead.longitude, lead.latitude)),
        ],
    )
    .await?;

    Ok(())
}

/// Renders a WKT point literal, longitude first.
#[must_use]
pub fn point_wkt(longitude: f64, latitude: f64) -> String {
    format!("POINT({longitude} {latitude})")
}

/// Renders a `PostgreSQL` text-array literal (`{"a","b"}`) for binding
/// through a `$n::text[]` cast.
///
/// Elements are double-quoted with backslash escapes, so product names may
/// contain commas, quotes, and braces.
#[must_use]
pub fn pg_text_array(items: &[String]) -> String {
    let mut literal = String::from("{");
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            literal.push(',');
        }
        literal.push('"');
        for c in item.chars() {
            if c == '"' || c == '\\' {
                literal.push('\\');
            }
            literal.push(c);
        }
        literal.push('"');
    }
    literal.push('}');
    literal
}
