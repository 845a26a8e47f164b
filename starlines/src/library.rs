//! # Pattern library
//!
//! The named shapes a trace can turn out to be. A library is put together once when the game starts and never changes afterwards.
//!
//! Libraries can come from JSON, as a list of `{ "name", "points": [{ "x", "y" }], "description" }` records, or from [PatternLibrary::constellations].

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::LibraryError;
use crate::point::Point;

/// A named shape. Points are kept in drawing order, which only matters for showing the pattern; matching ignores it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Pattern {
    name: String,
    points: Vec<Point>,
    description: String,
}

impl Pattern {
    /// Makes a pattern, refusing ones that list the same star twice or put a star at a negative coordinate.
    ///
    /// A pattern with no stars at all is allowed but can never be matched.
    pub fn new(
        name: impl Into<String>,
        points: Vec<Point>,
        description: impl Into<String>,
    ) -> Result<Self, LibraryError> {
        let name = name.into();
        let mut seen = BTreeSet::new();
        for point in points.iter() {
            if point.x < 0 || point.y < 0 {
                return Err(LibraryError::NegativePoint {
                    pattern: name,
                    point: *point,
                });
            }
            if !seen.insert(*point) {
                return Err(LibraryError::DuplicatePoint {
                    pattern: name,
                    point: *point,
                });
            }
        }
        if points.is_empty() {
            warn!("pattern `{}` has no stars and will never match", name);
        }
        Ok(Self {
            name,
            points,
            description: description.into(),
        })
    }

    /// Only for the built-in constellations, which are checked by tests instead.
    fn from_static(name: &str, points: &[(i32, i32)], description: &str) -> Self {
        Self {
            name: name.to_owned(),
            points: points.iter().copied().map(Point::from).collect(),
            description: description.to_owned(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// What a pattern looks like on disk, before it's been checked.
#[derive(Deserialize)]
struct PatternData {
    name: String,
    points: Vec<Point>,
    #[serde(default)]
    description: String,
}

impl TryFrom<PatternData> for Pattern {
    type Error = LibraryError;

    fn try_from(data: PatternData) -> Result<Self, Self::Error> {
        Pattern::new(data.name, data.points, data.description)
    }
}

/// An ordered set of patterns with unique names. Order decides which pattern wins if a trace could match more than one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PatternLibrary {
    patterns: Vec<Pattern>,
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::constellations()
    }
}

impl PatternLibrary {
    pub fn new(patterns: Vec<Pattern>) -> Result<Self, LibraryError> {
        let mut names = BTreeSet::new();
        for pattern in patterns.iter() {
            if !names.insert(pattern.name()) {
                return Err(LibraryError::DuplicateName(pattern.name().to_owned()));
            }
        }
        Ok(Self { patterns })
    }

    /// Orion, the Big Dipper, Cassiopeia and Leo, on an 8×8 grid.
    pub fn constellations() -> Self {
        Self {
            patterns: vec![
                Pattern::from_static(
                    "Orion",
                    &[(2, 1), (3, 2), (4, 2), (5, 1), (3, 3), (4, 3), (3, 5), (4, 5)],
                    "The Hunter",
                ),
                Pattern::from_static(
                    "Big Dipper",
                    &[(1, 2), (2, 2), (3, 1), (4, 1), (5, 2), (6, 3), (6, 4)],
                    "Part of Ursa Major",
                ),
                Pattern::from_static(
                    "Cassiopeia",
                    &[(1, 3), (2, 2), (3, 3), (4, 2), (5, 3)],
                    "The Queen",
                ),
                Pattern::from_static(
                    "Leo",
                    &[(2, 2), (3, 3), (4, 4), (5, 3), (6, 2), (5, 1)],
                    "The Lion",
                ),
            ],
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, LibraryError> {
        let data: Vec<PatternData> = serde_json::from_str(json)?;
        Self::from_data(data)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, LibraryError> {
        let data: Vec<PatternData> = serde_json::from_reader(reader)?;
        Self::from_data(data)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LibraryError> {
        let path = path.as_ref();
        let library = Self::from_reader(BufReader::new(File::open(path)?))?;
        info!("loaded {} patterns from {}", library.len(), path.display());
        Ok(library)
    }

    fn from_data(data: Vec<PatternData>) -> Result<Self, LibraryError> {
        let patterns = data
            .into_iter()
            .map(Pattern::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(patterns)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pattern> {
        self.patterns.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|pattern| pattern.name() == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.patterns.iter().position(|pattern| pattern.name() == name)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl std::ops::Index<usize> for PatternLibrary {
    type Output = Pattern;

    fn index(&self, idx: usize) -> &Pattern {
        &self.patterns[idx]
    }
}

impl<'a> IntoIterator for &'a PatternLibrary {
    type Item = &'a Pattern;
    type IntoIter = std::slice::Iter<'a, Pattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constellations_are_valid() {
        let library = PatternLibrary::constellations();
        let rebuilt = PatternLibrary::new(
            library
                .iter()
                .map(|p| Pattern::new(p.name(), p.points().to_vec(), p.description()).unwrap())
                .collect(),
        )
        .unwrap();
        assert_eq!(rebuilt, library);
        assert_eq!(
            library.iter().map(Pattern::name).collect::<Vec<_>>(),
            ["Orion", "Big Dipper", "Cassiopeia", "Leo"]
        );
        assert_eq!(library.get("Leo").unwrap().description(), "The Lion");
        assert_eq!(library[0].len(), 8);
    }

    #[test]
    fn duplicate_star_in_pattern() {
        let err = Pattern::new(
            "Loop",
            vec![Point::new(0, 0), Point::new(1, 0), Point::new(0, 0)],
            "",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            LibraryError::DuplicatePoint { ref pattern, point } if pattern == "Loop" && point == Point::new(0, 0)
        ));
    }

    #[test]
    fn negative_coordinates_are_refused() {
        let err = PatternLibrary::from_json_str(
            r#"[{ "name": "Wide", "points": [{ "x": -2147483648, "y": 0 }, { "x": 2147483647, "y": 0 }] }]"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            LibraryError::NegativePoint { ref pattern, point } if pattern == "Wide" && point.x == i32::MIN
        ));
    }

    #[test]
    fn empty_pattern_is_allowed() {
        let pattern = Pattern::new("Void", Vec::new(), "nothing").unwrap();
        assert!(pattern.is_empty());
    }

    #[test]
    fn duplicate_names() {
        let a = Pattern::new("Twin", vec![Point::new(0, 0)], "").unwrap();
        let b = Pattern::new("Twin", vec![Point::new(1, 1)], "").unwrap();
        assert!(matches!(
            PatternLibrary::new(vec![a, b]),
            Err(LibraryError::DuplicateName(name)) if name == "Twin"
        ));
    }

    #[test]
    fn loads_json() {
        let library = PatternLibrary::from_json_str(
            r#"[
                { "name": "Line", "points": [{ "x": 0, "y": 0 }, { "x": 1, "y": 0 }], "description": "Two stars" },
                { "name": "Dot", "points": [{ "x": 3, "y": 3 }] }
            ]"#,
        )
        .unwrap();
        assert_eq!(library.len(), 2);
        assert_eq!(library.position("Dot"), Some(1));
        assert_eq!(library[1].description(), "");
        assert_eq!(library[0].points(), &[Point::new(0, 0), Point::new(1, 0)]);
    }

    #[test]
    fn json_keeps_validation_errors() {
        let err = PatternLibrary::from_json_str(
            r#"[{ "name": "Loop", "points": [{ "x": 0, "y": 0 }, { "x": 0, "y": 0 }] }]"#,
        )
        .unwrap_err();
        assert!(matches!(err, LibraryError::DuplicatePoint { .. }));

        let err = PatternLibrary::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, LibraryError::Json(_)));
    }

    #[test]
    fn serializes_back_to_json() {
        let library = PatternLibrary::constellations();
        let json = serde_json::to_string(&library).unwrap();
        assert_eq!(PatternLibrary::from_json_str(&json).unwrap(), library);
    }

    #[test]
    fn missing_file() {
        let err = PatternLibrary::from_path("does/not/exist.json").unwrap_err();
        assert!(matches!(err, LibraryError::Io(_)));
    }
}
