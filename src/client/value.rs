//! SQL literal rendering for inline `VALUES` lists

/// A single typed cell destined for an `INSERT ... VALUES` tuple
#[derive(Clone, Debug, PartialEq)]
pub enum SqlValue {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl std::fmt::Display for SqlValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) if v.is_finite() && is_extreme(*v) => write!(f, "{:E}", v),
            Self::Float(v) if v.is_finite() => write!(f, "{}", v),
            Self::Float(v) => write!(f, "CAST('{}' AS DOUBLE)", v),
            Self::Text(s) => {
                write!(f, "'")?;
                for c in s.chars() {
                    match c {
                        '\\' => write!(f, "\\\\")?,
                        '\'' => write!(f, "\\'")?,
                        c => write!(f, "{}", c)?,
                    }
                }
                write!(f, "'")
            }
        }
    }
}

/// Magnitudes whose plain decimal form would not fit a `DECIMAL(38)` literal
fn is_extreme(v: f64) -> bool {
    let magnitude = v.abs();
    magnitude != 0.0 && !(1e-6..1e15).contains(&magnitude)
}

/// Render a row as a parenthesised tuple: `(1, 'a', NULL)`
pub fn tuple(values: &[SqlValue]) -> String {
    let cells: Vec<String> = values.iter().map(ToString::to_string).collect();
    format!("({})", cells.join(", "))
}
