use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Deserialize, Clone)]
struct RadiusRecord {
    element: String,
    radius: f64,
}

#[derive(Debug, Error)]
pub enum RadiusLibraryError {
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Invalid radius {radius} for element '{element}' in '{path}'")]
    InvalidRadius {
        path: String,
        element: String,
        radius: f64,
    },
    #[error("Radius library '{path}' contains no entries")]
    Empty { path: String },
}

/// Per-element atomic radii, keyed by case-insensitive element symbol.
///
/// The on-disk format is a CSV file with an `element,radius` header. Lines starting with `#`
/// are comments; when an element appears twice, the last entry wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RadiusLibrary {
    radii: HashMap<String, f64>,
}

impl RadiusLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self, RadiusLibraryError> {
        let path_str = path.to_string_lossy().to_string();
        let reader = Self::csv_builder()
            .from_path(path)
            .map_err(|e| RadiusLibraryError::Csv {
                path: path_str.clone(),
                source: e,
            })?;
        Self::collect(reader, &path_str)
    }

    pub fn from_reader(reader: impl Read, source_name: &str) -> Result<Self, RadiusLibraryError> {
        Self::collect(Self::csv_builder().from_reader(reader), source_name)
    }

    fn csv_builder() -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder.comment(Some(b'#')).trim(csv::Trim::All);
        builder
    }

    fn collect<R: Read>(
        mut reader: csv::Reader<R>,
        path: &str,
    ) -> Result<Self, RadiusLibraryError> {
        let mut library = Self::new();
        for result in reader.deserialize::<RadiusRecord>() {
            let record = result.map_err(|e| RadiusLibraryError::Csv {
                path: path.to_string(),
                source: e,
            })?;
            if !record.radius.is_finite() || record.radius < 0.0 {
                return Err(RadiusLibraryError::InvalidRadius {
                    path: path.to_string(),
                    element: record.element,
                    radius: record.radius,
                });
            }
            library.insert(&record.element, record.radius);
        }
        if library.is_empty() {
            return Err(RadiusLibraryError::Empty {
                path: path.to_string(),
            });
        }
        Ok(library)
    }

    pub fn insert(&mut self, element: &str, radius: f64) {
        self.radii.insert(normalize(element), radius);
    }

    pub fn get(&self, element: &str) -> Option<f64> {
        self.radii.get(&normalize(element)).copied()
    }

    pub fn len(&self) -> usize {
        self.radii.len()
    }

    pub fn is_empty(&self) -> bool {
        self.radii.is_empty()
    }
}

fn normalize(element: &str) -> String {
    element.trim().to_ascii_uppercase()
}
