//! Mapping from declared field types to Postgres column types.

/// Map a declared data type to a concrete column type.
///
/// Input is trimmed and lowercased; unknown or empty values fall back to
/// a bounded text column rather than failing.
pub fn map_data_type(raw: &str) -> &'static str {
    match raw.trim().to_lowercase().as_str() {
        "text" | "varchar" | "string" => "VARCHAR(255)",
        "number" | "integer" | "int" => "INTEGER",
        "decimal" | "numeric" => "NUMERIC(14,2)",
        "boolean" | "bool" => "BOOLEAN",
        "date" => "DATE",
        "datetime" | "timestamp" => "TIMESTAMPTZ",
        "json" | "jsonb" => "JSONB",
        "lookup" | "reference" => "BIGINT",
        _ => "VARCHAR(255)",
    }
}
