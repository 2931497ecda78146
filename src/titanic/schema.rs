//! Destination table layout

pub const DATABASE: &str = "default";
pub const TABLE_NAME: &str = "Titanic";
pub const QUALIFIED_TABLE: &str = "default.Titanic";
/// Read by the join query, never written
pub const PORTS_TABLE: &str = "default.Ports";

pub struct Column {
    pub name: &'static str,
    pub sql_type: &'static str,
}

const fn column(name: &'static str, sql_type: &'static str) -> Column {
    Column { name, sql_type }
}

/// Column order is the insert order of [`super::Passenger::values`]
pub const COLUMNS: [Column; 12] = [
    column("PassengerId", "INT"),
    column("Survived", "INT"),
    column("Pclass", "INT"),
    column("Name", "STRING"),
    column("Sex", "STRING"),
    column("Age", "DOUBLE"),
    column("SibSp", "INT"),
    column("Parch", "INT"),
    column("Ticket", "STRING"),
    column("Fare", "DOUBLE"),
    column("Cabin", "STRING"),
    column("Embarked", "STRING"),
];

/// Returns one row when the table exists, none otherwise
pub fn show_table_statement() -> String {
    format!("SHOW TABLES IN {} LIKE '{}'", DATABASE, TABLE_NAME)
}

pub fn create_table_statement() -> String {
    let columns: Vec<String> = COLUMNS
        .iter()
        .map(|c| format!("    {} {}", c.name, c.sql_type))
        .collect();
    format!("CREATE TABLE {} (\n{}\n)", QUALIFIED_TABLE, columns.join(",\n"))
}
