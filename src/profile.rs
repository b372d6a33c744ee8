//! Per-site pattern sets.
//!
//! A [`PatternProfile`] bundles everything needed to read one kind of access log: the
//! line regex with its named fields, the index paths and the trigger lists used to
//! classify requests. Profiles are looked up by `(server_name, server_type)`; supporting a
//! new site or platform means adding an entry to the table below.

use regex::Regex;

use crate::error::ConfigError;

/// Site names accepted on the command line. Not every one has a profile yet.
pub const SERVER_NAMES: &[&str] = &["fukuoka", "zentanbus"];

/// `sp` covers feature phones as well as smartphones.
pub const SERVER_TYPES: &[&str] = &["pc", "sp"];

pub struct PatternProfile {
    pub server_name: &'static str,
    pub server_type: &'static str,
    pub line_pattern: Regex,
    pub index_paths: Vec<&'static str>,
    pub route_triggers: Vec<Regex>,
    pub diagram_triggers: Vec<Regex>,
    pub fare_triggers: Vec<Regex>,
}

impl PatternProfile {
    fn new(
        server_name: &'static str,
        server_type: &'static str,
        line_pattern: &str,
        index_paths: &[&'static str],
        route: &[&str],
        diagram: &[&str],
        fare: &[&str],
    ) -> PatternProfile {
        PatternProfile {
            server_name,
            server_type,
            line_pattern: Regex::new(line_pattern).unwrap(),
            index_paths: index_paths.to_vec(),
            route_triggers: compile_all(route),
            diagram_triggers: compile_all(diagram),
            fare_triggers: compile_all(fare),
        }
    }
}

fn compile_all(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| Regex::new(p).unwrap()).collect()
}

lazy_static! {
    static ref PROFILES: Vec<PatternProfile> = vec![
        PatternProfile::new(
            "fukuoka",
            "sp",
            r#"(?P<remote_addr>[\d\.]{7,})\s-\s-\s(?:\[(?P<datetime>[^\[\]]+)\])\s"(?P<request>[^"]+)"\s(?P<status>\d+)\s(?P<size>\d+)\s"(?:[^"]+)"\s"(?P<user_agent>[^"]+)""#,
            &["/"],
            &["/schedule/m_search", "/schedule/m_search_detail", "/mobilet"],
            &["/schedule/m_eki_diagram_k", "/schedule/m_eki_diagram_n"],
            &["/fare/fare_index"],
        ),
        PatternProfile::new(
            "fukuoka",
            "pc",
            r#"(?P<remote_addr>[\d\.]{7,})\s(?P<identity>[\w.-]+)\s(?P<user_id>[\w.-]+|"+)\s(?:\[(?P<datetime>[^\[\]]+)\])\s"(?P<request>[^"]+)"\s(?P<status>\d+)\s(?P<size>\d+|-)\s(?P<response_time>\d+)\s"(?:[^"]+)"\s"(?P<user_agent>[^"]+)""#,
            &["/"],
            &["route", "nsresult"],
            &["diagram"],
            &["fare"],
        ),
    ];
}

/// Looks up the profile for a site/platform pair.
pub fn resolve(
    server_name: &str,
    server_type: &str,
) -> Result<&'static PatternProfile, ConfigError> {
    PROFILES
        .iter()
        .find(|p| p.server_name == server_name && p.server_type == server_type)
        .ok_or_else(|| ConfigError::UnknownProfile {
            server_name: server_name.to_string(),
            server_type: server_type.to_string(),
        })
}
