/// Where and as whom to connect.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectTarget {
    pub host: String,
    pub port: u16,
    pub bot_id: i64,
    pub verify_key: String,
}

impl ConnectTarget {
    pub fn new(host: impl Into<String>, port: u16, bot_id: i64, verify_key: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            bot_id,
            verify_key: verify_key.into(),
        }
    }

    /// `ws://{host}:{port}/all?verifyKey={key}&qq={bot_id}`
    pub fn url(&self) -> String {
        format!(
            "ws://{}:{}/all?verifyKey={}&qq={}",
            self.host,
            self.port,
            quote_plus(&self.verify_key),
            self.bot_id
        )
    }
}

// Keep the key out of logs.
impl std::fmt::Debug for ConnectTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectTarget")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("bot_id", &self.bot_id)
            .field("verify_key", &"<redacted>")
            .finish()
    }
}

/// Form-style query escaping: space becomes `+`, unreserved bytes pass
/// through, everything else is `%XX` per UTF-8 byte.
pub fn quote_plus(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(char::from(byte));
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_plus_escapes_reserved_bytes() {
        assert_eq!(quote_plus("abc-_.~123"), "abc-_.~123");
        assert_eq!(quote_plus("a b"), "a+b");
        assert_eq!(quote_plus("k&y=1/2+3"), "k%26y%3D1%2F2%2B3");
        assert_eq!(quote_plus("é"), "%C3%A9");
    }

    #[test]
    fn url_carries_key_and_bot_id() {
        let target = ConnectTarget::new("localhost", 8080, 123456, "INITKEY a&b");
        assert_eq!(
            target.url(),
            "ws://localhost:8080/all?verifyKey=INITKEY+a%26b&qq=123456"
        );
    }

    #[test]
    fn debug_hides_verify_key() {
        let target = ConnectTarget::new("h", 1, 2, "secret");
        assert!(!format!("{target:?}").contains("secret"));
    }
}
