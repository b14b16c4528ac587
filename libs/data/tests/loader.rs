//! Loading a data directory from disk

use specref_data::{DataSources, DataStore, Error, UNITS_FILE};
use std::fs;
use std::path::{Path, PathBuf};

struct TempDataDir {
    path: PathBuf,
}

impl TempDataDir {
    fn new() -> Self {
        let path = std::env::temp_dir().join(format!("specref-data-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    fn write(&self, name: &str, content: &str) {
        fs::write(self.path.join(name), content).unwrap();
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDataDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

const UNITS: &str = r#"{
  "units": [
    { "id": "m", "symbol": "m", "name": "Meter", "abbreviations": ["meter"], "unitGroupId": "length" },
    { "id": "ft", "symbol": "ft", "name": "Foot", "abbreviations": ["feet"], "unitGroupId": "length" }
  ],
  "unitGroups": [
    {
      "id": "length", "name": "Length", "description": "Distance", "baseUnitId": "m",
      "unitIds": ["m", "ft"],
      "conversions": [
        { "id": "m-ft", "fromUnitId": "m", "toUnitId": "ft", "multiplier": 3.28084, "equation": "x * 3.28084", "description": "Meters to feet" }
      ]
    }
  ]
}"#;

const SPEC_TYPES: &str = r#"{
  "specTypes": [
    {
      "id": "st-1", "primaryName": "Cooling Capacity", "alternateNames": ["Tonnage"],
      "description": "Rated cooling output", "domain": "HVAC", "valueType": "NUMERIC",
      "primaryUnit": "ton", "allowsArray": false
    }
  ]
}"#;

const MAPPINGS: &str = r#"{
  "mappings": [
    {
      "componentTypeId": "ct-1", "componentTypeName": "Chiller",
      "specTypeId": "st-1", "specTypeName": "Cooling Capacity",
      "category": "PRIMARY_SIZE", "isRequired": true
    }
  ]
}"#;

const COMPONENTS: &str = "id,a,b,c,name,description,parent,csi\n\
                          ct-1,,,,Chiller,Water-cooled chiller,ct-0,23 64 00\n";

#[test]
fn loads_every_file() {
    let dir = TempDataDir::new();
    dir.write(UNITS_FILE, UNITS);
    dir.write("spec-types-master.json", SPEC_TYPES);
    dir.write("component-spec-mappings.json", MAPPINGS);
    dir.write("component-types.csv", COMPONENTS);

    let store = DataStore::load(&DataSources::new(dir.path())).unwrap();
    assert_eq!(store.catalog.units().len(), 2);
    assert_eq!(store.spec_types.len(), 1);
    assert_eq!(store.spec_types[0].alternate_names, vec!["Tonnage"]);
    assert_eq!(store.mappings.len(), 1);
    assert_eq!(store.component_types[0].csi_code, "23 64 00");
}

#[test]
fn missing_units_file_is_fatal() {
    let dir = TempDataDir::new();
    dir.write("spec-types-master.json", SPEC_TYPES);

    let err = DataStore::load(&DataSources::new(dir.path())).unwrap_err();
    assert!(matches!(err, Error::MissingFile(_)));
}

#[test]
fn optional_files_default_to_empty() {
    let dir = TempDataDir::new();
    dir.write(UNITS_FILE, UNITS);

    let store = DataStore::load(&DataSources::new(dir.path())).unwrap();
    assert!(store.spec_types.is_empty());
    assert!(store.mappings.is_empty());
    assert!(store.component_types.is_empty());
}

#[test]
fn mappings_fall_back_to_checkpoint() {
    let dir = TempDataDir::new();
    dir.write(UNITS_FILE, UNITS);
    dir.write("mappings-checkpoint.json", MAPPINGS);

    let store = DataStore::load(&DataSources::new(dir.path())).unwrap();
    assert_eq!(store.mappings.len(), 1);
    assert_eq!(store.mappings[0].component_type_name, "Chiller");
}

#[test]
fn custom_component_types_file() {
    let dir = TempDataDir::new();
    dir.write(UNITS_FILE, UNITS);
    dir.write("components-v2.csv", COMPONENTS);

    let sources = DataSources::new(dir.path()).with_component_types_file("components-v2.csv");
    let store = DataStore::load(&sources).unwrap();
    assert_eq!(store.component_types.len(), 1);
}

#[test]
fn malformed_units_are_rejected() {
    let dir = TempDataDir::new();
    dir.write(UNITS_FILE, "{ not json");

    let err = DataStore::load(&DataSources::new(dir.path())).unwrap_err();
    assert!(matches!(err, Error::Json { .. }));

    let bad_equation = UNITS.replace("x * 3.28084", "x * * 3");
    dir.write(UNITS_FILE, &bad_equation);
    let err = DataStore::load(&DataSources::new(dir.path())).unwrap_err();
    assert!(matches!(err, Error::Catalog(_)));
}
