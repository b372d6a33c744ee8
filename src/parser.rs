use crate::profile::PatternProfile;

/// Fields captured from one access log line. Borrowed from the line itself and dropped
/// once the line has been triaged.
#[derive(Debug, PartialEq)]
pub struct ParsedLine<'a> {
    pub remote_addr: Option<&'a str>,
    pub identity: Option<&'a str>,
    pub user_id: Option<&'a str>,
    pub datetime: Option<&'a str>,
    pub request: Option<&'a str>,
    pub status: &'a str,
    pub size: Option<&'a str>,
    pub response_time: Option<&'a str>,
    pub user_agent: Option<&'a str>,
}

impl<'a> ParsedLine<'a> {
    /// Numeric status, `None` when it does not fit an HTTP status code.
    pub fn status_code(&self) -> Option<u16> {
        self.status.parse().ok()
    }
}

/// Applies the profile's line pattern once. `None` means the line does not have the
/// shape this profile expects.
pub fn parse_line<'a>(line: &'a str, profile: &PatternProfile) -> Option<ParsedLine<'a>> {
    let captures = profile.line_pattern.captures(line)?;
    let field = |name| captures.name(name).map(|m| m.as_str());

    Some(ParsedLine {
        remote_addr: field("remote_addr"),
        identity: field("identity"),
        user_id: field("user_id"),
        datetime: field("datetime"),
        request: field("request"),
        status: field("status")?,
        size: field("size"),
        response_time: field("response_time"),
        user_agent: field("user_agent"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::resolve;

    #[test]
    fn parse_one_sp_line() {
        let log_line = "49.206.4.211 - - [29/Oct/2018:07:35:39 -0700] \"GET /schedule/m_search?s=1 HTTP/1.1\" 200 14643 \"http://google.com\" \"Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:64.0) Gecko/20100101 Firefox/64.0\"";
        let parsed = parse_line(log_line, resolve("fukuoka", "sp").unwrap()).unwrap();

        assert_eq!(Some("49.206.4.211"), parsed.remote_addr);
        assert_eq!(Some("29/Oct/2018:07:35:39 -0700"), parsed.datetime);
        assert_eq!(Some("GET /schedule/m_search?s=1 HTTP/1.1"), parsed.request);
        assert_eq!(Some(200), parsed.status_code());
        assert_eq!(Some("14643"), parsed.size);
        assert_eq!(None, parsed.response_time);
        assert_eq!(
            Some("Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:64.0) Gecko/20100101 Firefox/64.0"),
            parsed.user_agent
        );
    }

    #[test]
    fn parse_one_pc_line() {
        let log_line = "10.0.0.12 - alice [03/Mar/2019:23:59:59 +0900] \"POST /route/nsresult HTTP/1.0\" 404 - 1532 \"-\" \"curl/7.58.0\"";
        let parsed = parse_line(log_line, resolve("fukuoka", "pc").unwrap()).unwrap();

        assert_eq!(Some("-"), parsed.identity);
        assert_eq!(Some("alice"), parsed.user_id);
        assert_eq!(Some(404), parsed.status_code());
        assert_eq!(Some("-"), parsed.size);
        assert_eq!(Some("1532"), parsed.response_time);
        assert_eq!(Some("curl/7.58.0"), parsed.user_agent);
    }

    #[test]
    fn control_byte_request_still_matches() {
        let log_line = "77.72.83.87 - - [12/Jan/2019:10:50:43 +0000] \"\x03\" 400 226 \"-\" \"-\"";
        let parsed = parse_line(log_line, resolve("fukuoka", "sp").unwrap()).unwrap();

        assert_eq!(Some("\x03"), parsed.request);
        assert_eq!(Some(400), parsed.status_code());
    }

    #[test]
    fn oversized_status_still_matches() {
        let log_line = "203.0.113.5 - - [10/Feb/2024:08:00:00 +0900] \"GET / HTTP/1.1\" 70000 512 \"-\" \"UA\"";
        let parsed = parse_line(log_line, resolve("fukuoka", "sp").unwrap()).unwrap();

        assert_eq!("70000", parsed.status);
        assert_eq!(None, parsed.status_code());
    }

    #[test]
    fn truncated_line_does_not_match() {
        let profile = resolve("fukuoka", "sp").unwrap();

        assert_eq!(None, parse_line("77.72.83.87 - - [12/Jan/2019:10:5", profile));
        assert_eq!(None, parse_line("", profile));
        assert_eq!(None, parse_line("\x16\x03\x01", profile));
    }

    #[test]
    fn sp_pattern_rejects_pc_lines() {
        let log_line = "10.0.0.12 - - [03/Mar/2019:23:59:59 +0900] \"GET / HTTP/1.0\" 200 512 87 \"-\" \"curl/7.58.0\"";

        assert_eq!(None, parse_line(log_line, resolve("fukuoka", "sp").unwrap()));
        assert!(parse_line(log_line, resolve("fukuoka", "pc").unwrap()).is_some());
    }
}
