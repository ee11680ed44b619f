//! CREATE TABLE generation from declared table metadata.

pub mod naming;
pub mod types;

use thiserror::Error;

use crate::models::TableDefinition;
use types::map_data_type;

/// Audit columns appended to every generated table.
const WHO_COLUMNS: [(&str, &str); 4] = [
    ("Created_By", "VARCHAR(255)"),
    ("Created_At", "TIMESTAMPTZ NOT NULL DEFAULT now()"),
    ("Updated_By", "VARCHAR(255)"),
    ("Updated_At", "TIMESTAMPTZ NOT NULL DEFAULT now()"),
];

/// Rejected table metadata. Identifiers and default expressions are
/// interpolated into executed DDL, so anything outside the strict grammar
/// is refused rather than escaped.
#[derive(Debug, Error, PartialEq)]
pub enum DdlError {
    #[error("invalid table name {0:?}: identifiers must match [A-Za-z_][A-Za-z0-9_]*")]
    InvalidTableName(String),
    #[error("invalid parent table {0:?}: identifiers must match [A-Za-z_][A-Za-z0-9_]*")]
    InvalidParentTable(String),
    #[error("invalid field name {0:?}: identifiers must match [A-Za-z_][A-Za-z0-9_]*")]
    InvalidFieldName(String),
    #[error("unsafe default value {value:?} for field {field:?}")]
    UnsafeDefault { field: String, value: String },
}

/// Whether a name satisfies the identifier grammar accepted in DDL.
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Whether a default expression is safe to embed verbatim. Statement
/// separators, comment tokens, and unbalanced single quotes are refused.
fn is_safe_default(s: &str) -> bool {
    !s.contains(';')
        && !s.contains("--")
        && !s.contains("/*")
        && s.matches('\'').count() % 2 == 0
}

/// Generate the full CREATE TABLE DDL for one declared table.
///
/// Returns `Ok(None)` when the definition has no table name. Emits the
/// primary key, declared columns, parent and project foreign keys, audit
/// columns, a table comment, and project/parent indexes, in that order.
pub fn generate_table_sql(
    def: &TableDefinition,
    project_id: i64,
) -> Result<Option<String>, DdlError> {
    let table_name = match def.table_name.as_deref() {
        Some(name) if !name.is_empty() => name,
        _ => return Ok(None),
    };
    if !is_identifier(table_name) {
        return Err(DdlError::InvalidTableName(table_name.to_string()));
    }

    let parent = def.parent_table.as_deref().filter(|p| !p.is_empty());
    if let Some(parent) = parent {
        if !is_identifier(parent) {
            return Err(DdlError::InvalidParentTable(parent.to_string()));
        }
    }

    let mut sql = format!("CREATE TABLE IF NOT EXISTS {table_name} (\n");
    sql.push_str("    ID BIGSERIAL PRIMARY KEY,\n");

    for field in &def.field_definitions {
        let field_name = match field.field_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => continue,
        };
        if !is_identifier(field_name) {
            return Err(DdlError::InvalidFieldName(field_name.to_string()));
        }

        let data_type = map_data_type(field.data_type.as_deref().unwrap_or("text"));
        let constraints = field.constraints.as_deref().unwrap_or("").to_lowercase();
        let not_null = if constraints.contains("not null") || constraints.contains("required") {
            " NOT NULL"
        } else {
            ""
        };

        let default_clause = match field.default_value.as_deref().filter(|v| !v.is_empty()) {
            Some(value) => {
                if !is_safe_default(value) {
                    return Err(DdlError::UnsafeDefault {
                        field: field_name.to_string(),
                        value: value.to_string(),
                    });
                }
                format!(" DEFAULT {value}")
            }
            None => String::new(),
        };

        sql.push_str(&format!(
            "    {field_name} {data_type}{not_null}{default_clause},\n"
        ));
    }

    if let Some(parent) = parent {
        sql.push_str(&format!(
            "    {parent}_ID BIGINT REFERENCES {parent}(ID) ON DELETE CASCADE,\n"
        ));
    }
    sql.push_str("    Project_ID BIGINT REFERENCES Project(ID) ON DELETE CASCADE,\n");

    for (i, (column, column_type)) in WHO_COLUMNS.iter().enumerate() {
        let separator = if i + 1 < WHO_COLUMNS.len() { "," } else { "" };
        sql.push_str(&format!("    {column} {column_type}{separator}\n"));
    }
    sql.push_str(");\n");

    sql.push_str(&format!(
        "COMMENT ON TABLE {table_name} IS 'Auto-generated table for project {project_id} based on declared table metadata.';\n"
    ));

    let lower = table_name.to_lowercase();
    sql.push_str(&format!(
        "CREATE INDEX IF NOT EXISTS idx_{lower}_project ON {table_name}(Project_ID);\n"
    ));
    if let Some(parent) = parent {
        sql.push_str(&format!(
            "CREATE INDEX IF NOT EXISTS idx_{lower}_parent ON {table_name}({parent}_ID);\n"
        ));
    }

    Ok(Some(sql))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldDefinition;

    fn field(name: &str) -> FieldDefinition {
        FieldDefinition {
            field_name: Some(name.to_string()),
            ..Default::default()
        }
    }

    fn table(name: &str, fields: Vec<FieldDefinition>) -> TableDefinition {
        TableDefinition {
            table_name: Some(name.to_string()),
            field_definitions: fields,
            ..Default::default()
        }
    }

    #[test]
    fn missing_table_name_generates_nothing() {
        let def = TableDefinition::default();
        assert_eq!(generate_table_sql(&def, 1), Ok(None));
    }

    #[test]
    fn empty_table_still_gets_pk_fk_and_audit_columns() {
        let sql = generate_table_sql(&table("Foo", vec![]), 1)
            .unwrap()
            .unwrap();
        assert!(sql.contains("CREATE TABLE IF NOT EXISTS Foo"));
        assert!(sql.contains("ID BIGSERIAL PRIMARY KEY"));
        assert!(sql.contains("Project_ID BIGINT REFERENCES Project(ID) ON DELETE CASCADE"));
        assert!(sql.contains("Created_By VARCHAR(255)"));
        assert!(sql.contains("Created_At TIMESTAMPTZ NOT NULL DEFAULT now()"));
        assert!(sql.contains("Updated_By VARCHAR(255)"));
        assert!(sql.contains("Updated_At TIMESTAMPTZ NOT NULL DEFAULT now()"));
        assert!(sql.contains("COMMENT ON TABLE Foo IS 'Auto-generated table for project 1"));
        assert!(sql.contains("CREATE INDEX IF NOT EXISTS idx_foo_project ON Foo(Project_ID)"));
    }

    #[test]
    fn nameless_fields_are_skipped() {
        let def = table(
            "Foo",
            vec![FieldDefinition::default(), field("Amount")],
        );
        let sql = generate_table_sql(&def, 1).unwrap().unwrap();
        // One data column between the primary key and the Project FK.
        let body = sql
            .split("PRIMARY KEY,\n")
            .nth(1)
            .unwrap()
            .split("    Project_ID")
            .next()
            .unwrap();
        assert_eq!(body.lines().count(), 1);
        assert!(body.contains("Amount VARCHAR(255)"));
    }

    #[test]
    fn constraint_text_controls_not_null() {
        for constraints in ["NOT NULL", "not null", "this field is required"] {
            let mut f = field("Amount");
            f.constraints = Some(constraints.to_string());
            let sql = generate_table_sql(&table("Foo", vec![f]), 1)
                .unwrap()
                .unwrap();
            assert!(sql.contains("Amount VARCHAR(255) NOT NULL"), "{constraints}");
        }

        let mut f = field("Amount");
        f.constraints = Some("must be positive".to_string());
        let sql = generate_table_sql(&table("Foo", vec![f]), 1)
            .unwrap()
            .unwrap();
        assert!(sql.contains("Amount VARCHAR(255),"));
    }

    #[test]
    fn default_value_is_emitted_after_not_null() {
        let mut f = field("Qty");
        f.data_type = Some("integer".to_string());
        f.constraints = Some("required".to_string());
        f.default_value = Some("0".to_string());
        let sql = generate_table_sql(&table("Foo", vec![f]), 1)
            .unwrap()
            .unwrap();
        assert!(sql.contains("Qty INTEGER NOT NULL DEFAULT 0,"));
    }

    #[test]
    fn parent_table_adds_fk_column_and_index() {
        let mut def = table("LineItem", vec![]);
        def.parent_table = Some("Invoice".to_string());
        let sql = generate_table_sql(&def, 1).unwrap().unwrap();
        assert!(sql.contains("Invoice_ID BIGINT REFERENCES Invoice(ID) ON DELETE CASCADE"));
        assert!(
            sql.contains("CREATE INDEX IF NOT EXISTS idx_lineitem_parent ON LineItem(Invoice_ID)")
        );

        let sql = generate_table_sql(&table("LineItem", vec![]), 1)
            .unwrap()
            .unwrap();
        assert!(!sql.contains("Invoice_ID"));
        assert!(!sql.contains("idx_lineitem_parent"));
    }

    #[test]
    fn hostile_identifiers_are_rejected() {
        let def = table("Foo; DROP TABLE Project", vec![]);
        assert!(matches!(
            generate_table_sql(&def, 1),
            Err(DdlError::InvalidTableName(_))
        ));

        let def = table("Foo", vec![field("bad-name")]);
        assert!(matches!(
            generate_table_sql(&def, 1),
            Err(DdlError::InvalidFieldName(_))
        ));

        let mut def = table("Foo", vec![]);
        def.parent_table = Some("Parent(ID)".to_string());
        assert!(matches!(
            generate_table_sql(&def, 1),
            Err(DdlError::InvalidParentTable(_))
        ));
    }

    #[test]
    fn hostile_defaults_are_rejected() {
        for value in ["0; DROP TABLE Project", "1 -- comment", "'unbalanced"] {
            let mut f = field("Amount");
            f.default_value = Some(value.to_string());
            assert!(
                matches!(
                    generate_table_sql(&table("Foo", vec![f]), 1),
                    Err(DdlError::UnsafeDefault { .. })
                ),
                "{value}"
            );
        }

        // Legitimate expressions still pass.
        for value in ["now()", "'active'", "0"] {
            let mut f = field("Amount");
            f.default_value = Some(value.to_string());
            assert!(generate_table_sql(&table("Foo", vec![f]), 1).is_ok(), "{value}");
        }
    }
}
