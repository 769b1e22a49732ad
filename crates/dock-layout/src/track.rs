use std::collections::HashMap;
use std::fmt;

use crate::LayoutError;

// ──────────────────────────────────────────────
// Track: one column or row size
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Track {
    /// Fixed size in pixels (`60px`).
    Px(f32),
    /// Proportional share of the remaining space (`1fr`).
    Fr(f32),
    /// Sized by content; the solver treats it as `1fr`.
    Auto,
    /// A named size variable with an optional fallback
    /// (`var(--outliner-width, 300px)`).
    Var {
        name: String,
        fallback: Option<Box<Track>>,
    },
}

impl Track {
    pub fn var(name: &str, fallback: Track) -> Self {
        Track::Var {
            name: name.to_string(),
            fallback: Some(Box::new(fallback)),
        }
    }

    /// Resolve variables against `vars`, falling back when a name is undefined.
    pub fn resolve(&self, vars: &SizeVariables) -> Track {
        match self {
            Track::Var { name, fallback } => match vars.get(name) {
                Some(px) => Track::Px(px),
                None => fallback
                    .as_deref()
                    .map(|f| f.resolve(vars))
                    .unwrap_or(Track::Auto),
            },
            other => other.clone(),
        }
    }

    fn is_flexible(&self) -> bool {
        matches!(self, Track::Fr(_) | Track::Auto)
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Track::Px(v) => write!(f, "{}px", v),
            Track::Fr(v) => write!(f, "{}fr", v),
            Track::Auto => write!(f, "auto"),
            Track::Var { name, fallback: Some(fb) } => write!(f, "var({}, {})", name, fb),
            Track::Var { name, fallback: None } => write!(f, "var({})", name),
        }
    }
}

/// Divide one track into two that together take the same space.
/// A variable is replaced by its fallback first: the variable keeps
/// controlling other tracks, not the halves.
pub(crate) fn split_track(track: &Track) -> (Track, Track) {
    match track {
        Track::Px(v) => (Track::Px(v / 2.0), Track::Px(v / 2.0)),
        Track::Fr(v) => (Track::Fr(v / 2.0), Track::Fr(v / 2.0)),
        Track::Auto => (Track::Auto, Track::Auto),
        Track::Var { fallback, .. } => match fallback.as_deref() {
            Some(fb) => split_track(fb),
            None => (Track::Auto, Track::Auto),
        },
    }
}

/// Combine two adjacent tracks whose rows/columns became identical.
pub(crate) fn merge_tracks(a: &Track, b: &Track) -> Track {
    match (a, b) {
        (Track::Px(x), Track::Px(y)) => Track::Px(x + y),
        (Track::Fr(x), Track::Fr(y)) => Track::Fr(x + y),
        _ if a == b => a.clone(),
        _ if a.is_flexible() => a.clone(),
        _ if b.is_flexible() => b.clone(),
        _ => a.clone(),
    }
}

// ──────────────────────────────────────────────
// Track list grammar
// ──────────────────────────────────────────────

pub fn format_tracks(tracks: &[Track]) -> String {
    tracks
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a whitespace-separated track list. Whitespace inside `var(...)`
/// does not separate tracks.
pub fn parse_tracks(text: &str) -> Result<Vec<Track>, LayoutError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for ch in text.chars() {
        match ch {
            '(' => {
                depth += 1;
                current.push(ch);
            }
            ')' => {
                if depth == 0 {
                    return Err(LayoutError::InvalidTrack(text.to_string()));
                }
                depth -= 1;
                current.push(ch);
            }
            c if c.is_whitespace() && depth == 0 => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if depth != 0 {
        return Err(LayoutError::InvalidTrack(text.to_string()));
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens.iter().map(|t| parse_track(t)).collect()
}

pub fn parse_track(token: &str) -> Result<Track, LayoutError> {
    let token = token.trim();
    let invalid = || LayoutError::InvalidTrack(token.to_string());

    if token == "auto" {
        return Ok(Track::Auto);
    }

    if let Some(inner) = token.strip_prefix("var(").and_then(|t| t.strip_suffix(')')) {
        let (name, fallback) = match inner.split_once(',') {
            Some((name, fallback)) => (name.trim(), Some(parse_track(fallback)?)),
            None => (inner.trim(), None),
        };
        if !name.starts_with("--") || name.len() < 3 {
            return Err(invalid());
        }
        return Ok(Track::Var {
            name: name.to_string(),
            fallback: fallback.map(Box::new),
        });
    }

    let number = |s: &str| -> Result<f32, LayoutError> {
        let v: f32 = s.parse().map_err(|_| invalid())?;
        if v.is_finite() && v >= 0.0 {
            Ok(v)
        } else {
            Err(invalid())
        }
    };

    if let Some(v) = token.strip_suffix("px") {
        return Ok(Track::Px(number(v)?));
    }
    if let Some(v) = token.strip_suffix("fr") {
        return Ok(Track::Fr(number(v)?));
    }

    Err(invalid())
}

// ──────────────────────────────────────────────
// SizeVariables
// ──────────────────────────────────────────────

/// Pixel values for named size variables (`--outliner-width` etc.).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SizeVariables {
    values: HashMap<String, f32>,
}

impl SizeVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<f32> {
        self.values.get(name).copied()
    }

    pub fn set(&mut self, name: &str, px: f32) {
        self.values.insert(name.to_string(), px);
    }

    pub fn remove(&mut self, name: &str) {
        self.values.remove(name);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

// ──────────────────────────────────────────────
// Solver
// ──────────────────────────────────────────────

/// Resolve tracks to pixel sizes within `available` pixels. Fixed tracks
/// are taken first; the remainder is shared among `fr` and `auto` tracks.
pub fn track_sizes(tracks: &[Track], available: f32, vars: &SizeVariables) -> Vec<f32> {
    let resolved: Vec<Track> = tracks.iter().map(|t| t.resolve(vars)).collect();

    let fixed: f32 = resolved
        .iter()
        .map(|t| match t {
            Track::Px(v) => *v,
            _ => 0.0,
        })
        .sum();
    let units: f32 = resolved
        .iter()
        .map(|t| match t {
            Track::Fr(v) => *v,
            Track::Auto => 1.0,
            _ => 0.0,
        })
        .sum();
    let remaining = (available - fixed).max(0.0);

    resolved
        .iter()
        .map(|t| match t {
            Track::Px(v) => *v,
            Track::Fr(v) if units > 0.0 => remaining * v / units,
            Track::Auto if units > 0.0 => remaining / units,
            _ => 0.0,
        })
        .collect()
}
