use std::{
    fmt,
    fmt::{Debug, Display},
};

/// A wrapper that keeps secret values out of logs and debug output.
#[derive(Clone, Default)]
pub struct Secret<T>
where T: Clone + Default
{
    value: T,
}

impl<T: Clone + Default> Secret<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn reveal(&self) -> &T {
        &self.value
    }
}

impl Secret<String> {
    /// A truncated, non-reversible preview of the secret for audit logs. Never log the full value.
    pub fn preview(&self) -> String {
        if self.value.chars().count() <= 8 {
            "****".to_string()
        } else {
            let head: String = self.value.chars().take(8).collect();
            format!("{head}…")
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl<T: Clone + Default> Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}

impl<T: Clone + Default> Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn secrets_never_leak_via_format() {
        let secret = Secret::new("rzp_test_1234567890".to_string());
        assert_eq!(format!("{secret}"), "****");
        assert_eq!(format!("{secret:?}"), "****");
    }

    #[test]
    fn preview_truncates() {
        let secret = Secret::new("rzp_test_1234567890".to_string());
        assert_eq!(secret.preview(), "rzp_test…");
        let short = Secret::new("abc".to_string());
        assert_eq!(short.preview(), "****");
    }
}
