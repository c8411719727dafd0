//! Outbound response headers.

/// Errors from header parsing and emission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeaderError {
    #[error("malformed header line: {0:?}")]
    Malformed(String),

    #[error("invalid header name: {0:?}")]
    InvalidName(String),

    #[error("invalid header value for {name}: {value:?}")]
    InvalidValue { name: String, value: String },
}

/// A parsed raw header line such as `esi-enabled: 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHeader {
    /// Header name as written.
    pub name: String,
    /// Header value with surrounding whitespace removed.
    pub value: String,
    line: String,
}

impl RawHeader {
    /// Create a header from a name and value, formatted as `Name: value`.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        let line = format!("{}: {}", name, value);
        Self { name, value, line }
    }

    /// Parse a `Name: value` line. The value may be empty.
    pub fn parse(raw: &str) -> Result<Self, HeaderError> {
        let (name, value) = raw
            .split_once(':')
            .ok_or_else(|| HeaderError::Malformed(raw.to_string()))?;

        let name = name.trim();
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(HeaderError::Malformed(raw.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            value: value.trim().to_string(),
            line: raw.to_string(),
        })
    }

    /// The line exactly as it was given.
    pub fn line(&self) -> &str {
        &self.line
    }
}

impl std::fmt::Display for RawHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.line)
    }
}

/// Write access to the headers of the outbound response.
pub trait HeaderSink {
    /// Set a header from a raw `Name: value` line, replacing any header
    /// of the same name.
    fn set_raw_header(&mut self, raw: &str) -> Result<(), HeaderError>;
}

impl<T: HeaderSink + ?Sized> HeaderSink for &mut T {
    fn set_raw_header(&mut self, raw: &str) -> Result<(), HeaderError> {
        (**self).set_raw_header(raw)
    }
}

/// Collected outbound headers for the current response cycle.
///
/// Raw lines are kept verbatim; a header replaces any earlier one with
/// the same name (case-insensitive).
#[derive(Debug, Clone, Default)]
pub struct ResponseContext {
    headers: Vec<RawHeader>,
}

impl ResponseContext {
    /// Create an empty response context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a header, replacing an existing one of the same name.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.insert(RawHeader::new(name, value));
    }

    fn insert(&mut self, header: RawHeader) {
        match self
            .headers
            .iter_mut()
            .find(|h| h.name.eq_ignore_ascii_case(&header.name))
        {
            Some(existing) => *existing = header,
            None => self.headers.push(header),
        }
    }

    /// Get a header value by name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// All headers in the order they were first set.
    pub fn headers(&self) -> &[RawHeader] {
        &self.headers
    }

    /// Headers as the raw lines they were set with.
    pub fn raw_lines(&self) -> Vec<String> {
        self.headers.iter().map(|h| h.line().to_string()).collect()
    }

    /// Number of headers set.
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Whether no headers have been set.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

impl HeaderSink for ResponseContext {
    fn set_raw_header(&mut self, raw: &str) -> Result<(), HeaderError> {
        self.insert(RawHeader::parse(raw)?);
        Ok(())
    }
}
