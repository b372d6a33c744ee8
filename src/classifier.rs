use std::ops::AddAssign;

use regex::Regex;

use crate::profile::PatternProfile;

/// Per-request category flags, or running totals once summed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    pub effective: u64,
    pub route: u64,
    pub diagram: u64,
    pub fare: u64,
}

impl AddAssign for Counts {
    fn add_assign(&mut self, other: Counts) {
        self.effective += other.effective;
        self.route += other.route;
        self.diagram += other.diagram;
        self.fare += other.fare;
    }
}

/// Second whitespace-separated token of `METHOD PATH PROTOCOL`.
pub fn request_path(request: &str) -> Option<&str> {
    request.split_whitespace().nth(1)
}

fn any_match(triggers: &[Regex], path: &str) -> bool {
    triggers.iter().any(|trigger| trigger.is_match(path))
}

/// Classifies a request path. Categories are independent; a path can be both a route
/// search and a fare search.
pub fn classify_path(path: &str, profile: &PatternProfile) -> Counts {
    let mut counts = Counts::default();

    if profile.index_paths.iter().any(|index| *index == path) {
        counts.effective = 1;
    }
    if any_match(&profile.route_triggers, path) {
        counts.route = 1;
        counts.effective = 1;
    }
    if any_match(&profile.diagram_triggers, path) {
        counts.diagram = 1;
        counts.effective = 1;
    }
    if any_match(&profile.fare_triggers, path) {
        counts.fare = 1;
        counts.effective = 1;
    }

    counts
}

/// Classifies a raw request field. A request without a path yields all zeros.
pub fn classify(request: &str, profile: &PatternProfile) -> Counts {
    match request_path(request) {
        Some(path) => classify_path(path, profile),
        None => Counts::default(),
    }
}
