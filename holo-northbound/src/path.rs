//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::sync::LazyLock as Lazy;

use regex::Regex;

use crate::error::StructuralError;

// Instance path identifying a single data node.
//
// Absolute paths start at a top-level node
// (`/holo-sanity:runner/one-list/ldata[number='1']/name`), while relative
// paths start at the node holding the path and use ".." to move up, as in
// YANG leafref paths.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InstancePath {
    pub absolute: bool,
    pub segments: Vec<PathSegment>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PathSegment {
    Parent,
    Node {
        module: Option<String>,
        name: String,
        keys: Vec<(String, String)>,
    },
}

static SEGMENT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:([A-Za-z_][A-Za-z0-9_.-]*):)?([A-Za-z_][A-Za-z0-9_.-]*)((?:\[.*\])*)$",
    )
    .unwrap()
});
static PREDICATE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"\[ *(?:[A-Za-z_][A-Za-z0-9_.-]*:)?([A-Za-z_][A-Za-z0-9_.-]*) *= *(?:'([^']*)'|"([^"]*)") *\]"#,
    )
    .unwrap()
});

// ===== impl InstancePath =====

impl InstancePath {
    pub fn parse(path: &str) -> Result<InstancePath, StructuralError> {
        let invalid = || StructuralError::InvalidPath(path.to_owned());

        let (absolute, rest) = match path.strip_prefix('/') {
            Some(rest) => (true, rest),
            None => (false, path),
        };
        if rest.is_empty() {
            return Err(invalid());
        }

        let segments = split_segments(rest)
            .ok_or_else(invalid)?
            .into_iter()
            .map(|segment| parse_segment(segment).ok_or_else(invalid))
            .collect::<Result<Vec<_>, _>>()?;
        if absolute && segments.contains(&PathSegment::Parent) {
            return Err(invalid());
        }

        Ok(InstancePath { absolute, segments })
    }
}

impl std::fmt::Display for InstancePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (idx, segment) in self.segments.iter().enumerate() {
            if self.absolute || idx > 0 {
                write!(f, "/")?;
            }
            match segment {
                PathSegment::Parent => write!(f, "..")?,
                PathSegment::Node { module, name, keys } => {
                    if let Some(module) = module {
                        write!(f, "{module}:")?;
                    }
                    write!(f, "{name}")?;
                    for (key, value) in keys {
                        write!(f, "[{key}='{value}']")?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for InstancePath {
    type Err = StructuralError;

    fn from_str(path: &str) -> Result<InstancePath, StructuralError> {
        InstancePath::parse(path)
    }
}

// ===== helper functions =====

// Splits a path on '/' characters that aren't part of a quoted key value.
fn split_segments(path: &str) -> Option<Vec<&str>> {
    let mut segments = vec![];
    let mut quote = None;
    let mut start = 0;
    for (idx, c) in path.char_indices() {
        match (quote, c) {
            (None, '\'' | '"') => quote = Some(c),
            (Some(q), _) if q == c => quote = None,
            (None, '/') => {
                segments.push(&path[start..idx]);
                start = idx + 1;
            }
            _ => (),
        }
    }
    if quote.is_some() {
        return None;
    }
    segments.push(&path[start..]);

    if segments.iter().any(|segment| segment.is_empty()) {
        return None;
    }
    Some(segments)
}

fn parse_segment(segment: &str) -> Option<PathSegment> {
    if segment == ".." {
        return Some(PathSegment::Parent);
    }

    let caps = SEGMENT_REGEX.captures(segment)?;
    let module = caps.get(1).map(|m| m.as_str().to_owned());
    let name = caps.get(2)?.as_str().to_owned();
    let predicates = caps.get(3).map(|m| m.as_str()).unwrap_or_default();

    // Make sure the predicates consist entirely of well-formed key
    // assignments.
    let mut keys = vec![];
    let mut consumed = 0;
    for caps in PREDICATE_REGEX.captures_iter(predicates) {
        let all = caps.get(0)?;
        if all.start() != consumed {
            return None;
        }
        consumed = all.end();
        let key = caps.get(1)?.as_str().to_owned();
        let value = caps.get(2).or_else(|| caps.get(3))?.as_str().to_owned();
        keys.push((key, value));
    }
    if consumed != predicates.len() {
        return None;
    }

    Some(PathSegment::Node { module, name, keys })
}
