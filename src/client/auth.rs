use eyre::Result;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

pub enum Auth {
    /// Personal access token sent as `Authorization: Bearer <token>`
    Bearer(String),
    /// Don't use any authentication
    None,
}

impl Auth {
    /// Default headers for a client using this authentication
    pub fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Self::Bearer(token) = self {
            let mut value: HeaderValue = format!("Bearer {}", token).parse()?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }
}

impl std::fmt::Display for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bearer(_) => write!(f, "Bearer"),
            Self::None => write!(f, "None"),
        }
    }
}
