//! Declarative schema for the library database.
//!
//! Tables are described as data and rendered to `CREATE TABLE IF NOT
//! EXISTS` statements, so schema creation stays idempotent and the layout
//! is visible in one place.

use rusqlite::Connection;

use crate::error::Result;

/// Schema definition for the library database
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub tables: Vec<TableDefinition>,
}

impl Schema {
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    pub fn add_table(mut self, table: TableDefinition) -> Self {
        self.tables.push(table);
        self
    }

    /// Create every table that does not exist yet
    pub fn create_all(&self, conn: &Connection) -> Result<()> {
        let batch: String = self.tables.iter().map(TableDefinition::to_sql).collect();
        conn.execute_batch(&batch)?;
        Ok(())
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableDefinition {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
    pub foreign_keys: Vec<ForeignKey>,
}

impl TableDefinition {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            columns: Vec::new(),
            foreign_keys: Vec::new(),
        }
    }

    pub fn with_column(
        mut self,
        name: &str,
        data_type: DataType,
        constraints: &[ColumnConstraint],
    ) -> Self {
        self.columns.push(ColumnDefinition {
            name: name.to_string(),
            data_type,
            constraints: constraints.to_vec(),
        });
        self
    }

    pub fn with_foreign_key(mut self, column: &str, foreign_table: &str, foreign_column: &str) -> Self {
        self.foreign_keys.push(ForeignKey {
            column: column.to_string(),
            foreign_table: foreign_table.to_string(),
            foreign_column: foreign_column.to_string(),
        });
        self
    }

    fn to_sql(&self) -> String {
        let mut clauses: Vec<String> = self.columns.iter().map(ColumnDefinition::to_sql).collect();
        for fk in &self.foreign_keys {
            clauses.push(format!(
                "FOREIGN KEY({}) REFERENCES {}({})",
                fk.column, fk.foreign_table, fk.foreign_column
            ));
        }
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({});\n",
            self.name,
            clauses.join(", ")
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    pub name: String,
    pub data_type: DataType,
    pub constraints: Vec<ColumnConstraint>,
}

impl ColumnDefinition {
    fn to_sql(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.data_type.as_sql());
        for constraint in &self.constraints {
            sql.push(' ');
            sql.push_str(constraint.as_sql());
        }
        sql
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DataType {
    Integer,
    Text,
}

impl DataType {
    fn as_sql(self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::Text => "TEXT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnConstraint {
    PrimaryKey,
    NotNull,
}

impl ColumnConstraint {
    fn as_sql(self) -> &'static str {
        match self {
            Self::PrimaryKey => "PRIMARY KEY",
            Self::NotNull => "NOT NULL",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKey {
    pub column: String,
    pub foreign_table: String,
    pub foreign_column: String,
}

/// The two-table layout: `books` holds the catalog, `borrowed` holds one
/// row per student with an active loan.
pub fn library_schema() -> Schema {
    use ColumnConstraint::{NotNull, PrimaryKey};

    Schema::new()
        .add_table(
            TableDefinition::new("books")
                .with_column("book_id", DataType::Text, &[PrimaryKey])
                .with_column("title", DataType::Text, &[NotNull])
                .with_column("author", DataType::Text, &[NotNull])
                .with_column("copies", DataType::Integer, &[NotNull]),
        )
        .add_table(
            TableDefinition::new("borrowed")
                .with_column("student_name", DataType::Text, &[PrimaryKey])
                .with_column("book_id", DataType::Text, &[NotNull])
                .with_foreign_key("book_id", "books", "book_id"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_idempotent_create_statements() {
        let schema = library_schema();
        let sql: String = schema.tables.iter().map(TableDefinition::to_sql).collect();
        assert!(sql.contains("CREATE TABLE IF NOT EXISTS books (book_id TEXT PRIMARY KEY"));
        assert!(sql.contains("copies INTEGER NOT NULL"));
        assert!(sql.contains("FOREIGN KEY(book_id) REFERENCES books(book_id)"));
    }

    #[test]
    fn create_all_can_run_twice() {
        let conn = Connection::open_in_memory().unwrap();
        let schema = library_schema();
        schema.create_all(&conn).unwrap();
        schema.create_all(&conn).unwrap();
    }
}
