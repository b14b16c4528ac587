use specref_assistant::{build_parser, AssistantSettings, Error, Provider};
use specref_units::Unit;

#[test]
fn auto_without_key_uses_patterns() {
    let parser = build_parser(&AssistantSettings::default()).unwrap();
    assert_eq!(parser.name(), "pattern");

    let settings = AssistantSettings {
        api_key: Some("   ".into()),
        ..Default::default()
    };
    assert_eq!(build_parser(&settings).unwrap().name(), "pattern");
}

#[test]
fn auto_with_key_uses_anthropic() {
    let settings = AssistantSettings {
        api_key: Some("sk-test".into()),
        ..Default::default()
    };
    assert_eq!(build_parser(&settings).unwrap().name(), "anthropic");
}

#[test]
fn explicit_anthropic_requires_key() {
    let settings = AssistantSettings {
        provider: Provider::Anthropic,
        ..Default::default()
    };
    assert!(matches!(build_parser(&settings).err(), Some(Error::MissingApiKey)));
}

#[test]
fn settings_deserialize_with_defaults() {
    let settings: AssistantSettings =
        serde_json::from_str(r#"{"provider": "pattern", "timeout_seconds": 5}"#).unwrap();
    assert_eq!(settings.provider, Provider::Pattern);
    assert_eq!(settings.timeout_seconds, 5);
    assert_eq!(settings.max_tokens, 1024);
}

#[tokio::test]
async fn pattern_parser_handles_unit_named_in() {
    let units = vec![
        Unit {
            id: "in".into(),
            symbol: "in".into(),
            name: "Inch".into(),
            abbreviations: vec!["inch".into()],
            unit_group_id: "length".into(),
        },
        Unit {
            id: "ft".into(),
            symbol: "ft".into(),
            name: "Foot".into(),
            abbreviations: vec!["feet".into()],
            unit_group_id: "length".into(),
        },
    ];

    let parser = build_parser(&AssistantSettings {
        provider: Provider::Pattern,
        ..Default::default()
    })
    .unwrap();
    let parsed = parser.parse("how many in in 2 feet", &units).await.unwrap();
    assert_eq!(parsed.value, 2.0);
    assert_eq!(parsed.from_unit, "feet");
    assert_eq!(parsed.to_unit, "in");
}
