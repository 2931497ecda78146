//! Fixed report queries over the Titanic and Ports tables

use crate::report::ReportQuery;

/// Passengers joined to their embarkation port
pub const JOIN_QUERY: ReportQuery = ReportQuery {
    name: "JOIN Query Result",
    sql: "SELECT t.PassengerId, t.Name, t.Sex, t.Age, t.Embarked, p.PortName, p.Country \
          FROM default.Titanic t \
          JOIN default.Ports p ON t.Embarked = p.PortCode",
    columns: &[
        "PassengerId",
        "Name",
        "Sex",
        "Age",
        "Embarked",
        "PortName",
        "Country",
    ],
};

/// Average age per passenger class
pub const AGGREGATE_QUERY: ReportQuery = ReportQuery {
    name: "AGGREGATE Query Result",
    sql: "SELECT Pclass, AVG(Age) AS AverageAge FROM default.Titanic GROUP BY Pclass",
    columns: &["Pclass", "AverageAge"],
};

/// Every passenger, most expensive fare first
pub const SORT_QUERY: ReportQuery = ReportQuery {
    name: "SORT Query Result",
    sql: "SELECT PassengerId, Name, Fare FROM default.Titanic ORDER BY Fare DESC",
    columns: &["PassengerId", "Name", "Fare"],
};

/// Report sections, in the order they are written
pub const REPORT_QUERIES: [ReportQuery; 3] = [JOIN_QUERY, AGGREGATE_QUERY, SORT_QUERY];
