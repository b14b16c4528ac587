//! Reference data written into each test's data directory

pub const UNITS_JSON: &str = r#"{
  "units": [
    { "id": "u-m", "symbol": "m", "name": "Meter", "abbreviations": ["meter", "meters"], "unitGroupId": "length" },
    { "id": "u-ft", "symbol": "ft", "name": "Foot", "abbreviations": ["feet", "foot"], "unitGroupId": "length" },
    { "id": "u-in", "symbol": "in", "name": "Inch", "abbreviations": ["inch", "inches"], "unitGroupId": "length" },
    { "id": "u-nmi", "symbol": "nmi", "name": "Nautical Mile", "abbreviations": [], "unitGroupId": "length" },
    { "id": "u-gal", "symbol": "gal", "name": "US Gallon", "abbreviations": ["gallon", "gallons"], "unitGroupId": "volume" },
    { "id": "u-l", "symbol": "L", "name": "Liter", "abbreviations": ["liter", "liters"], "unitGroupId": "volume" },
    { "id": "u-m3", "symbol": "m³", "name": "Cubic Meter", "abbreviations": ["m3"], "unitGroupId": "volume" },
    { "id": "u-f", "symbol": "°F", "name": "Fahrenheit", "abbreviations": ["degF"], "unitGroupId": "temperature" },
    { "id": "u-c", "symbol": "°C", "name": "Celsius", "abbreviations": ["degC"], "unitGroupId": "temperature" },
    { "id": "u-ton", "symbol": "ton", "name": "Ton of Refrigeration", "abbreviations": ["tons", "TR"], "unitGroupId": "cooling" },
    { "id": "u-btuh", "symbol": "BTU/h", "name": "BTU per Hour", "abbreviations": ["btuh", "BTUH"], "unitGroupId": "cooling" }
  ],
  "unitGroups": [
    {
      "id": "length", "name": "Length", "description": "Distance", "baseUnitId": "u-m",
      "unitIds": ["u-m", "u-ft", "u-in", "u-nmi"],
      "conversions": [
        { "id": "m-ft", "fromUnitId": "u-m", "toUnitId": "u-ft", "multiplier": 3.28084, "equation": "x * 3.28084", "description": "Meters to feet" },
        { "id": "ft-in", "fromUnitId": "u-ft", "toUnitId": "u-in", "multiplier": 12, "equation": "x * 12", "description": "Feet to inches" }
      ]
    },
    {
      "id": "volume", "name": "Volume", "description": "Volume",
      "unitIds": ["u-gal", "u-l", "u-m3"],
      "conversions": [
        { "id": "gal-l", "fromUnitId": "u-gal", "toUnitId": "u-l", "multiplier": 3.78541, "equation": "x * 3.78541", "description": "Gallons to liters" },
        { "id": "l-m3", "fromUnitId": "u-l", "toUnitId": "u-m3", "multiplier": 0.001, "equation": "x / 1000", "description": "Liters to cubic meters" }
      ]
    },
    {
      "id": "temperature", "name": "Temperature", "description": "Temperature",
      "unitIds": ["u-f", "u-c"],
      "conversions": [
        { "id": "f-c", "fromUnitId": "u-f", "toUnitId": "u-c", "multiplier": 0.5556, "equation": "(x - 32) * 5/9", "description": "Fahrenheit to Celsius" }
      ]
    },
    {
      "id": "cooling", "name": "Cooling Capacity", "description": "Refrigeration capacity",
      "unitIds": ["u-ton", "u-btuh"],
      "conversions": [
        { "id": "ton-btuh", "fromUnitId": "u-ton", "toUnitId": "u-btuh", "multiplier": 12000, "equation": "x * 12000", "description": "Tons to BTU per hour" }
      ]
    }
  ]
}"#;

pub const SPEC_TYPES_JSON: &str = r#"{
  "specTypes": [
    { "id": "st-cap", "primaryName": "Cooling Capacity", "alternateNames": ["Tonnage"], "description": "Rated cooling output", "domain": "HVAC", "valueType": "NUMERIC", "primaryUnit": "ton", "primaryUnitId": "u-ton" },
    { "id": "st-air", "primaryName": "airflow", "alternateNames": ["CFM"], "description": "Supply air volume", "domain": "HVAC", "valueType": "NUMERIC" },
    { "id": "st-volt", "primaryName": "Voltage", "alternateNames": [], "description": "Nominal supply voltage", "domain": "ELECTRICAL", "valueType": "SELECT",
      "valueOptions": [ { "id": "v-480", "specTypeId": "st-volt", "primaryValue": "480V", "alternateNames": ["480"], "description": "480 volt three phase" } ] },
    { "id": "st-pipe", "primaryName": "Pipe Material", "alternateNames": [], "description": "Material of piping", "domain": "PLUMBING", "valueType": "SELECT" },
    { "id": "st-spk", "primaryName": "Sprinkler Type", "alternateNames": [], "description": "Sprinkler head type", "domain": "FIRE_PROTECTION", "valueType": "MULTI_SELECT" }
  ]
}"#;

pub const MAPPINGS_JSON: &str = r#"{
  "mappings": [
    { "componentTypeId": "ct-pump", "componentTypeName": "Pump", "specTypeId": "st-air", "specTypeName": "airflow", "category": "N/A" },
    { "componentTypeId": "ct-chiller", "componentTypeName": "Chiller", "specTypeId": "st-cap", "specTypeName": "Cooling Capacity", "category": "PRIMARY_SIZE", "isRequired": true },
    { "componentTypeId": "ct-chiller", "componentTypeName": "Chiller", "specTypeId": "st-volt", "specTypeName": "Voltage", "category": "N/A" }
  ]
}"#;

pub const COMPONENT_TYPES_CSV: &str = "id,level,path,sort,name,description,parent,csi\n\
ct-chiller,2,a/b,1,Chiller,Water-cooled chiller,ct-hvac,23 64 00\n\
ct-pump,2,a/c,2,\"Pump, inline\",Inline circulator,ct-plumb,22 11 23\n";
