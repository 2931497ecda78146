//! Shared fixtures: an in-memory SQL warehouse and a tiny HTTP responder

#![allow(dead_code)]

use eyre::Result;
use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::Path;
use std::sync::{Arc, Mutex};
use titanic_etl::{QueryResult, SqlConnector, SqlSession};

pub const TITANIC_HEADER: &str =
    "PassengerId,Survived,Pclass,Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked";

/// Header plus `data_rows` passengers, newline terminated
pub fn titanic_csv(data_rows: usize) -> String {
    let mut csv = format!("{}\n", TITANIC_HEADER);
    for id in 1..=data_rows {
        csv.push_str(&format!(
            "{},{},{},\"Passenger, Mr. Number {}\",male,{},0,0,A/5 {},{}.25,,S\n",
            id,
            id % 2,
            id % 3 + 1,
            id,
            20 + id,
            21170 + id,
            id
        ));
    }
    csv
}

pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

#[derive(Default)]
struct WarehouseState {
    table_exists: bool,
    rows: usize,
    sessions: usize,
    statements: Vec<String>,
    responses: HashMap<String, Vec<Vec<Option<String>>>>,
    failing: Vec<String>,
}

/// Understands just enough of the pipeline's SQL to track the Titanic table
#[derive(Clone, Default)]
pub struct MockWarehouse {
    state: Arc<Mutex<WarehouseState>>,
}

impl MockWarehouse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table() -> Self {
        let warehouse = Self::new();
        warehouse.state.lock().unwrap().table_exists = true;
        warehouse
    }

    /// Rows returned for an exact SELECT statement
    pub fn respond(&self, sql: &str, rows: Vec<Vec<Option<&str>>>) {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(|c| c.map(str::to_string)).collect())
            .collect();
        self.state
            .lock()
            .unwrap()
            .responses
            .insert(sql.to_string(), rows);
    }

    /// Fail every statement containing `fragment`
    pub fn fail(&self, fragment: &str) {
        self.state.lock().unwrap().failing.push(fragment.to_string());
    }

    pub fn statements(&self) -> Vec<String> {
        self.state.lock().unwrap().statements.clone()
    }

    pub fn row_count(&self) -> usize {
        self.state.lock().unwrap().rows
    }

    pub fn table_exists(&self) -> bool {
        self.state.lock().unwrap().table_exists
    }

    pub fn sessions(&self) -> usize {
        self.state.lock().unwrap().sessions
    }
}

pub struct MockSession {
    state: Arc<Mutex<WarehouseState>>,
}

impl SqlConnector for MockWarehouse {
    type Session = MockSession;

    fn connect(&self) -> Result<Self::Session> {
        self.state.lock().unwrap().sessions += 1;
        Ok(MockSession {
            state: self.state.clone(),
        })
    }
}

impl SqlSession for MockSession {
    async fn execute(&self, statement: &str) -> Result<QueryResult> {
        let mut state = self.state.lock().unwrap();
        state.statements.push(statement.to_string());

        if state.failing.iter().any(|f| statement.contains(f.as_str())) {
            eyre::bail!("statement failed: {}", statement);
        }

        let rows = if statement.starts_with("SHOW TABLES") {
            match state.table_exists {
                true => vec![vec![
                    Some("default".to_string()),
                    Some("titanic".to_string()),
                    Some("false".to_string()),
                ]],
                false => Vec::new(),
            }
        } else if statement.starts_with("CREATE TABLE") {
            if state.table_exists {
                eyre::bail!("[TABLE_OR_VIEW_ALREADY_EXISTS] default.Titanic");
            }
            state.table_exists = true;
            Vec::new()
        } else if statement.starts_with("INSERT INTO") {
            if !state.table_exists {
                eyre::bail!("[TABLE_OR_VIEW_NOT_FOUND] default.Titanic");
            }
            state.rows += statement.lines().filter(|l| l.starts_with('(')).count();
            Vec::new()
        } else {
            state.responses.get(statement).cloned().unwrap_or_default()
        };

        Ok(QueryResult {
            columns: Vec::new(),
            rows,
        })
    }
}

/// Requests seen by a responder: request line, headers and body, verbatim
pub type RequestLog = Arc<Mutex<Vec<String>>>;

/// Serve one canned HTTP response per connection, in order, then stop
///
/// Returns the URL to request.
pub fn serve(responses: Vec<(u16, String)>) -> String {
    let (base, _) = respond_in_order("text/csv", responses);
    format!("{}/titanic.csv", base)
}

/// Like [`serve`] with JSON bodies, for standing in for the warehouse API
///
/// Returns the base URL and the log of requests received.
pub fn serve_json(responses: Vec<(u16, serde_json::Value)>) -> (String, RequestLog) {
    let responses = responses
        .into_iter()
        .map(|(status, body)| (status, body.to_string()))
        .collect();
    respond_in_order("application/json", responses)
}

fn respond_in_order(
    content_type: &'static str,
    responses: Vec<(u16, String)>,
) -> (String, RequestLog) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let log = RequestLog::default();
    let seen = log.clone();

    std::thread::spawn(move || {
        for (status, body) in responses {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };

            seen.lock().unwrap().push(read_request(&mut stream));

            let reason = match status {
                200 => "OK",
                403 => "Forbidden",
                404 => "Not Found",
                _ => "Error",
            };
            let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                reason,
                content_type,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    (format!("http://{}", addr), log)
}

/// Read the head and, when `Content-Length` says so, the body
fn read_request(stream: &mut TcpStream) -> String {
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];

    let head_end = loop {
        if let Some(pos) = request.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return String::from_utf8_lossy(&request).into_owned(),
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    };

    let head = String::from_utf8_lossy(&request[..head_end]).to_lowercase();
    let body_len = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|len| len.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while request.len() < head_end + body_len {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }

    String::from_utf8_lossy(&request).into_owned()
}
