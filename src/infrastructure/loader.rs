//! Case loaders: the built-in mansion and TOML case files.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Case, Direction, Location, LocationId, LocationTree, SuspectIndex};
use crate::infrastructure::traits::CaseLoader;

/// The reference mansion: seven rooms and five clue bindings.
///
/// ```text
/// Hall
/// ├── Parlor
/// │   ├── Kitchen
/// │   └── Library
/// └── Corridor
///     ├── Bedroom
///     └── Garden
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinCase;

impl CaseLoader for BuiltinCase {
    fn load(&self) -> ApplicationResult<Case> {
        let mut map = LocationTree::new();
        let hall = map.set_root(Location::build("Hall", Some("Muddy footprints"))?)?;
        let parlor = map.attach_left(hall, Location::build("Parlor", Some("Book missing a page"))?)?;
        let corridor = map.attach_right(hall, Location::build("Corridor", None)?)?;
        map.attach_left(parlor, Location::build("Kitchen", Some("Lost key"))?)?;
        map.attach_right(parlor, Location::build("Library", None)?)?;
        map.attach_left(corridor, Location::build("Bedroom", Some("Stained sheet"))?)?;
        map.attach_right(corridor, Location::build("Garden", Some("Lost drawer"))?)?;

        let mut suspects = SuspectIndex::new();
        suspects.put("Muddy footprints", "Gardener");
        suspects.put("Lost drawer", "Gardener");
        suspects.put("Lost key", "Butler");
        suspects.put("Stained sheet", "Butler");
        suspects.put("Book missing a page", "Librarian");

        Ok(Case::new("The Mansion", map, suspects))
    }
}

/// Loads a case from a TOML file.
///
/// ```toml
/// title = "The Mansion"
///
/// [map]
/// name = "Hall"
/// clue = "Muddy footprints"
///
/// [map.left]
/// name = "Parlor"
///
/// [[bindings]]
/// clue = "Muddy footprints"
/// suspect = "Gardener"
/// ```
///
/// Bindings are applied in file order, so a repeated clue keeps its last suspect.
#[derive(Debug, Clone)]
pub struct TomlCaseLoader {
    path: PathBuf,
}

impl TomlCaseLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse case file content; `path` is only used for messages and the default title.
    pub fn parse(content: &str, path: &Path) -> ApplicationResult<Case> {
        let spec: CaseSpec = toml::from_str(content).map_err(|e| ApplicationError::InvalidCaseFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        spec.into_case(path)
    }
}

impl CaseLoader for TomlCaseLoader {
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> ApplicationResult<Case> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| {
            ApplicationError::CaseFileUnreadable {
                path: self.path.clone(),
                source,
            }
        })?;
        Self::parse(&content, &self.path)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CaseSpec {
    title: Option<String>,
    map: LocationSpec,
    #[serde(default)]
    bindings: Vec<BindingSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LocationSpec {
    name: String,
    clue: Option<String>,
    left: Option<Box<LocationSpec>>,
    right: Option<Box<LocationSpec>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BindingSpec {
    clue: String,
    suspect: String,
}

impl CaseSpec {
    fn into_case(self, path: &Path) -> ApplicationResult<Case> {
        let title = self.title.unwrap_or_else(|| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "Untitled case".to_string())
        });

        let mut map = LocationTree::new();
        let mut pending: Vec<(Option<(LocationId, Direction)>, LocationSpec)> = vec![(None, self.map)];
        while let Some((slot, spec)) = pending.pop() {
            let location = Location::build(spec.name, spec.clue.as_deref())?;
            let idx = match slot {
                None => map.set_root(location)?,
                Some((parent, side)) => map.attach(parent, side, location)?,
            };
            if let Some(right) = spec.right {
                pending.push((Some((idx, Direction::Right)), *right));
            }
            if let Some(left) = spec.left {
                pending.push((Some((idx, Direction::Left)), *left));
            }
        }

        let mut suspects = SuspectIndex::new();
        for binding in self.bindings {
            suspects.put(binding.clue, binding.suspect);
        }

        debug!(locations = map.len(), bindings = suspects.len(), "case loaded");
        Ok(Case::new(title, map, suspects))
    }
}
