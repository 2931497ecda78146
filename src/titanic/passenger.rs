//! Passenger records and the CSV row parser

use crate::client::SqlValue;
use crate::error::EtlError;
use crate::etl::Transformer;
use crate::storage::CsvRow;
use eyre::Result;

/// One row of the Titanic passenger list
#[derive(Clone, Debug, PartialEq)]
pub struct Passenger {
    pub passenger_id: i32,
    pub survived: i32,
    pub pclass: i32,
    pub name: String,
    pub sex: String,
    pub age: Option<f64>,
    pub sib_sp: i32,
    pub parch: i32,
    pub ticket: String,
    pub fare: f64,
    pub cabin: String,
    pub embarked: String,
}

impl Passenger {
    /// Cells in table column order
    pub fn values(&self) -> [SqlValue; 12] {
        [
            self.passenger_id.into(),
            self.survived.into(),
            self.pclass.into(),
            self.name.as_str().into(),
            self.sex.as_str().into(),
            self.age.into(),
            self.sib_sp.into(),
            self.parch.into(),
            self.ticket.as_str().into(),
            self.fare.into(),
            self.cabin.as_str().into(),
            self.embarked.as_str().into(),
        ]
    }
}

/// Coerces header-addressed CSV rows into [`Passenger`]s
///
/// Integer columns must parse as integers and `Fare` as a float. `Age` is
/// `None` when the field is empty. The first bad field fails the row.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use csv::StringRecord;
/// use titanic_etl::etl::Transformer;
/// use titanic_etl::storage::CsvRow;
/// use titanic_etl::titanic::PassengerParser;
///
/// let headers = Arc::new(StringRecord::from(vec![
///     "PassengerId", "Survived", "Pclass", "Name", "Sex", "Age",
///     "SibSp", "Parch", "Ticket", "Fare", "Cabin", "Embarked",
/// ]));
/// let record = StringRecord::from(vec![
///     "6", "0", "3", "Moran, Mr. James", "male", "",
///     "0", "0", "330877", "8.4583", "", "Q",
/// ]);
///
/// let passenger = PassengerParser.transform(CsvRow::new(headers, record, 7)).unwrap();
/// assert_eq!(passenger.age, None);
/// assert_eq!(passenger.fare, 8.4583);
/// ```
pub struct PassengerParser;

impl Transformer for PassengerParser {
    type Input = CsvRow;
    type Output = Passenger;

    fn transform(&self, row: Self::Input) -> Result<Self::Output> {
        Ok(Passenger {
            passenger_id: int(&row, "PassengerId")?,
            survived: int(&row, "Survived")?,
            pclass: int(&row, "Pclass")?,
            name: text(&row, "Name")?,
            sex: text(&row, "Sex")?,
            age: optional_float(&row, "Age")?,
            sib_sp: int(&row, "SibSp")?,
            parch: int(&row, "Parch")?,
            ticket: text(&row, "Ticket")?,
            fare: float(&row, "Fare")?,
            cabin: text(&row, "Cabin")?,
            embarked: text(&row, "Embarked")?,
        })
    }
}

fn text(row: &CsvRow, column: &'static str) -> Result<String> {
    Ok(row.field(column)?.to_string())
}

fn int(row: &CsvRow, column: &'static str) -> Result<i32> {
    let raw = row.field(column)?;
    raw.trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| parse_error(row, column, raw, e.to_string()))
}

fn float(row: &CsvRow, column: &'static str) -> Result<f64> {
    let raw = row.field(column)?;
    raw.trim()
        .parse()
        .map_err(|e: std::num::ParseFloatError| parse_error(row, column, raw, e.to_string()))
}

fn optional_float(row: &CsvRow, column: &'static str) -> Result<Option<f64>> {
    if row.field(column)?.is_empty() {
        return Ok(None);
    }
    float(row, column).map(Some)
}

fn parse_error(row: &CsvRow, column: &'static str, raw: &str, reason: String) -> eyre::Report {
    EtlError::Parse {
        line: row.line(),
        column,
        value: raw.to_string(),
        reason,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv::StringRecord;
    use std::sync::Arc;

    const HEADER: [&str; 12] = [
        "PassengerId",
        "Survived",
        "Pclass",
        "Name",
        "Sex",
        "Age",
        "SibSp",
        "Parch",
        "Ticket",
        "Fare",
        "Cabin",
        "Embarked",
    ];

    fn row(fields: [&str; 12]) -> CsvRow {
        CsvRow::new(
            Arc::new(StringRecord::from(HEADER.to_vec())),
            StringRecord::from(fields.to_vec()),
            2,
        )
    }

    fn braund() -> [&'static str; 12] {
        [
            "1",
            "0",
            "3",
            "Braund, Mr. Owen Harris",
            "male",
            "22",
            "1",
            "0",
            "A/5 21171",
            "7.25",
            "",
            "S",
        ]
    }

    #[test]
    fn test_parse_full_row() {
        let passenger = PassengerParser.transform(row(braund())).unwrap();
        assert_eq!(
            passenger,
            Passenger {
                passenger_id: 1,
                survived: 0,
                pclass: 3,
                name: "Braund, Mr. Owen Harris".to_string(),
                sex: "male".to_string(),
                age: Some(22.0),
                sib_sp: 1,
                parch: 0,
                ticket: "A/5 21171".to_string(),
                fare: 7.25,
                cabin: String::new(),
                embarked: "S".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_age_is_null() {
        let mut fields = braund();
        fields[5] = "";
        let passenger = PassengerParser.transform(row(fields)).unwrap();
        assert_eq!(passenger.age, None);

        let values = passenger.values();
        assert_eq!(values[5], SqlValue::Null);
        assert_eq!(values[9], SqlValue::Float(7.25));
        assert_eq!(
            crate::client::tuple(&values),
            "(1, 0, 3, 'Braund, Mr. Owen Harris', 'male', NULL, 1, 0, 'A/5 21171', 7.25, '', 'S')"
        );
    }

    #[test]
    fn test_fractional_age() {
        let mut fields = braund();
        fields[5] = "0.42";
        let passenger = PassengerParser.transform(row(fields)).unwrap();
        assert_eq!(passenger.age, Some(0.42));
    }

    #[test]
    fn test_bad_integer_fails() {
        let mut fields = braund();
        fields[2] = "first";
        let err = PassengerParser.transform(row(fields)).unwrap_err();
        match err.downcast_ref::<EtlError>() {
            Some(EtlError::Parse {
                line,
                column,
                value,
                ..
            }) => {
                assert_eq!(*line, 2);
                assert_eq!(*column, "Pclass");
                assert_eq!(value, "first");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_empty_fare_fails() {
        let mut fields = braund();
        fields[9] = "";
        let err = PassengerParser.transform(row(fields)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EtlError>(),
            Some(EtlError::Parse { column: "Fare", .. })
        ));
    }

    #[test]
    fn test_missing_header_column_fails() {
        let headers = Arc::new(StringRecord::from(vec!["PassengerId", "Survived"]));
        let record = StringRecord::from(vec!["1", "0"]);
        let err = PassengerParser
            .transform(CsvRow::new(headers, record, 2))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EtlError>(),
            Some(EtlError::MissingColumn("Pclass"))
        ));
    }
}
