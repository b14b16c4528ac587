//! Loading reference data from the data directory
//!
//! Unit data is required and malformed content is always an error. Spec
//! types, mappings and component types are optional: a missing file logs a
//! warning and yields an empty collection.

use crate::error::{Error, Result};
use crate::model::{ComponentSpecMapping, ComponentType, SpecType};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use specref_units::{merge_groups, Unit, UnitCatalog, UnitGroup};
use std::fs;
use std::path::{Path, PathBuf};

pub const SPEC_TYPES_FILE: &str = "spec-types-master.json";
pub const UNITS_FILE: &str = "global-units-master.json";
pub const MAPPINGS_FILE: &str = "component-spec-mappings.json";
pub const MAPPINGS_CHECKPOINT_FILE: &str = "mappings-checkpoint.json";
pub const DEFAULT_COMPONENT_TYPES_FILE: &str = "component-types.csv";

/// Where the data files live.
#[derive(Clone, Debug)]
pub struct DataSources {
    pub directory: PathBuf,
    /// Component types CSV; relative paths are resolved against `directory`.
    pub component_types_file: PathBuf,
}

impl DataSources {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            component_types_file: PathBuf::from(DEFAULT_COMPONENT_TYPES_FILE),
        }
    }

    pub fn with_component_types_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.component_types_file = file.into();
        self
    }

    fn file(&self, name: &str) -> PathBuf {
        self.directory.join(name)
    }

    fn component_types_path(&self) -> PathBuf {
        if self.component_types_file.is_absolute() {
            self.component_types_file.clone()
        } else {
            self.directory.join(&self.component_types_file)
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpecTypesFile {
    #[serde(default)]
    spec_types: Vec<SpecType>,
}

/// Contents of the units file, with duplicate groups already merged.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitsFile {
    #[serde(default)]
    pub units: Vec<Unit>,
    #[serde(default)]
    pub unit_groups: Vec<UnitGroup>,
}

#[derive(Deserialize)]
struct MappingsFile {
    #[serde(default)]
    mappings: Vec<ComponentSpecMapping>,
}

fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_json<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T> {
    serde_json::from_str(content).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "Optional data file not found");
        return Ok(None);
    }
    read_to_string(path).map(Some)
}

pub fn load_spec_types(sources: &DataSources) -> Result<Vec<SpecType>> {
    let path = sources.file(SPEC_TYPES_FILE);
    let Some(content) = read_optional(&path)? else {
        return Ok(Vec::new());
    };
    let file: SpecTypesFile = parse_json(&path, &content)?;
    Ok(file.spec_types)
}

pub fn load_units(sources: &DataSources) -> Result<UnitsFile> {
    let path = sources.file(UNITS_FILE);
    if !path.exists() {
        return Err(Error::MissingFile(path));
    }
    let content = read_to_string(&path)?;
    let mut file: UnitsFile = parse_json(&path, &content)?;
    file.unit_groups = merge_groups(file.unit_groups);
    Ok(file)
}

pub fn load_unit_catalog(sources: &DataSources) -> Result<UnitCatalog> {
    let file = load_units(sources)?;
    Ok(UnitCatalog::new(file.units, file.unit_groups)?)
}

/// Load mappings, falling back to the checkpoint file when the final file
/// has not been generated yet.
pub fn load_component_spec_mappings(sources: &DataSources) -> Result<Vec<ComponentSpecMapping>> {
    let mut path = sources.file(MAPPINGS_FILE);
    if !path.exists() {
        path = sources.file(MAPPINGS_CHECKPOINT_FILE);
    }
    let Some(content) = read_optional(&path)? else {
        return Ok(Vec::new());
    };
    let file: MappingsFile = parse_json(&path, &content)?;
    Ok(file.mappings)
}

pub fn load_component_types(sources: &DataSources) -> Result<Vec<ComponentType>> {
    let path = sources.component_types_path();
    let Some(content) = read_optional(&path)? else {
        return Ok(Vec::new());
    };
    parse_component_types(&path, &content)
}

/// Columns: id, -, -, -, name, description, parent type id, CSI code.
fn parse_component_types(path: &Path, content: &str) -> Result<Vec<ComponentType>> {
    let csv_error = |line: usize, message: String| Error::Csv {
        path: path.to_path_buf(),
        line,
        message,
    };

    let records = split_csv_records(content).map_err(|(line, message)| csv_error(line, message))?;

    let mut components = Vec::new();
    for record in records.into_iter().skip(1) {
        if record.fields.len() < 8 {
            return Err(csv_error(
                record.line,
                format!("expected at least 8 columns, found {}", record.fields.len()),
            ));
        }

        let field = |n: usize| record.fields[n].clone();
        components.push(ComponentType {
            id: field(0),
            name: field(4),
            description: field(5),
            parent_type_id: field(6),
            csi_code: field(7),
        });
    }

    Ok(components)
}

/// A CSV record and the 1-based line it starts on.
#[derive(Debug, PartialEq)]
pub(crate) struct CsvRecord {
    pub line: usize,
    pub fields: Vec<String>,
}

/// Split CSV text into records, dropping blank lines.
///
/// Double-quoted fields may contain commas, `""` and line breaks. Errors carry
/// the line of the record that failed.
pub(crate) fn split_csv_records(
    content: &str,
) -> std::result::Result<Vec<CsvRecord>, (usize, String)> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, in_quotes) {
            ('"', true) if chars.peek() == Some(&'"') => {
                chars.next();
                field.push('"');
            }
            ('"', true) => in_quotes = false,
            ('"', false) if field.is_empty() => in_quotes = true,
            (',', false) => fields.push(std::mem::take(&mut field)),
            ('\r', false) if chars.peek() == Some(&'\n') => {}
            ('\n', false) => {
                fields.push(std::mem::take(&mut field));
                push_record(&mut records, record_line, std::mem::take(&mut fields));
                line += 1;
                record_line = line;
            }
            ('\n', true) => {
                line += 1;
                field.push('\n');
            }
            (c, _) => field.push(c),
        }
    }

    if in_quotes {
        return Err((record_line, "unterminated quoted field".to_string()));
    }
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        push_record(&mut records, record_line, fields);
    }
    Ok(records)
}

fn push_record(records: &mut Vec<CsvRecord>, line: usize, fields: Vec<String>) {
    let fields: Vec<String> = fields.into_iter().map(|f| f.trim().to_string()).collect();
    if matches!(fields.as_slice(), [only] if only.is_empty()) {
        return;
    }
    records.push(CsvRecord { line, fields });
}

/// Everything the service reads, loaded once and shared read-only.
#[derive(Debug)]
pub struct DataStore {
    pub catalog: UnitCatalog,
    pub spec_types: Vec<SpecType>,
    pub component_types: Vec<ComponentType>,
    pub mappings: Vec<ComponentSpecMapping>,
}

impl DataStore {
    pub fn load(sources: &DataSources) -> Result<Self> {
        let catalog = load_unit_catalog(sources)?;
        let spec_types = load_spec_types(sources)?;
        let component_types = load_component_types(sources)?;
        let mappings = load_component_spec_mappings(sources)?;

        tracing::info!(
            directory = %sources.directory.display(),
            units = catalog.units().len(),
            spec_types = spec_types.len(),
            component_types = component_types.len(),
            mappings = mappings.len(),
            "Reference data loaded"
        );

        Ok(Self {
            catalog,
            spec_types,
            component_types,
            mappings,
        })
    }
}
