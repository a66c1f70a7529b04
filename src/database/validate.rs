use std::collections::HashMap;

/// Field-level validation failures collected before touching the database
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: HashMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        // First failure for a field wins
        self.fields.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.add(field, message);
        }
    }

    pub fn non_empty(&mut self, field: &str, value: &str) {
        self.check(!value.trim().is_empty(), field, "must not be empty");
    }

    pub fn http_url(&mut self, field: &str, value: &str) {
        if !is_http_url(value) {
            self.add(field, "must be an absolute http(s) URL");
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn into_map(self) -> HashMap<String, String> {
        self.fields
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut fields: Vec<_> = self.fields.iter().collect();
        fields.sort();
        let parts: Vec<String> = fields.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
        write!(f, "{}", parts.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

pub fn is_http_url(value: &str) -> bool {
    match url::Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host().is_some(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_only_absolute_http_urls() {
        assert!(is_http_url("https://www.youtube.com/watch?v=abc"));
        assert!(is_http_url("http://tickets.example.com/show/1"));
        assert!(!is_http_url("ftp://example.com/file"));
        assert!(!is_http_url("/relative/path"));
        assert!(!is_http_url("javascript:alert(1)"));
    }

    #[test]
    fn keeps_first_message_per_field() {
        let mut errors = ValidationErrors::new();
        errors.non_empty("title", "  ");
        errors.add("title", "second");
        assert_eq!(errors.get("title"), Some("must not be empty"));
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn empty_collection_is_ok() {
        let mut errors = ValidationErrors::new();
        errors.non_empty("title", "Song");
        errors.http_url("url", "https://example.com");
        assert!(errors.into_result().is_ok());
    }
}
