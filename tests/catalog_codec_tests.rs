use std::collections::BTreeMap;

use indoc::indoc;
use localefmt::{CatalogFormat, Error, MessageCatalog, Translations, codec};
use proptest::prelude::*;
use tempfile::TempDir;
use unic_langid::LanguageIdentifier;

const FORMATS: [CatalogFormat; 3] = [CatalogFormat::Json, CatalogFormat::Yaml, CatalogFormat::Toml];

fn key_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_]{0,15}").expect("valid key regex")
}

fn value_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z][A-Za-z0-9 _\\-\\.,!\\?%]{0,29}").expect("valid value regex")
}

fn catalog_strategy() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map(key_strategy(), value_strategy(), 0..8)
}

fn sample() -> MessageCatalog {
    [
        ("hello world!", "你好，世界！"),
        ("hello %s!", "你好，%s！"),
        ("%s has %d cat.", "%s有%d只猫。"),
        ("<b>%s</b>", "<b>%s</b> & more"),
        ("path/to", "a \"quoted\" value"),
    ]
    .into_iter()
    .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn saved_catalog_loads_back_equal(values in catalog_strategy()) {
        let catalog = MessageCatalog::from(values);
        for format in FORMATS {
            let bytes = codec::save_as(&catalog, format).expect("save");
            let decoded = codec::decode(&bytes, format).expect("decode");
            prop_assert_eq!(&decoded, &catalog, "format {}", format);
        }
    }
}

#[test]
fn round_trip_through_files_for_every_extension() {
    let dir = TempDir::new().unwrap();
    for name in ["en.json", "en.yaml", "en.yml", "en.toml", "EN.JSON"] {
        let path = dir.path().join(name);
        codec::save_to_file(&sample(), &path).unwrap();
        let loaded = codec::load(&path).unwrap();
        assert_eq!(loaded, sample(), "{}", name);
    }
}

#[test]
fn json_output_is_indented_and_unescaped() {
    let catalog: MessageCatalog = [("hello", "hello world!")].into_iter().collect();
    let text = String::from_utf8(codec::save(&catalog, "json").unwrap()).unwrap();
    let expected = indoc! {r#"
        {
          "hello": "hello world!"
        }
    "#};
    assert_eq!(text, expected);

    let text = String::from_utf8(codec::save(&sample(), "json").unwrap()).unwrap();
    assert!(text.contains(r#""<b>%s</b>": "<b>%s</b> & more""#));
    assert!(text.contains("path/to"));
    assert!(!text.contains("\\u003c"));
}

#[test]
fn format_names_are_case_insensitive() {
    let catalog = sample();
    assert_eq!(
        codec::save(&catalog, "YAML").unwrap(),
        codec::save_as(&catalog, CatalogFormat::Yaml).unwrap()
    );
    assert!(matches!(codec::save(&catalog, "po"), Err(Error::UnknownFormat(_))));
}

#[test]
fn missing_file_loads_empty() {
    let dir = TempDir::new().unwrap();
    for name in ["zh.json", "zh.yaml", "zh.toml"] {
        let catalog = codec::load(dir.path().join(name)).unwrap();
        assert!(catalog.is_empty());
    }
}

#[test]
fn unsupported_extension_is_an_error_even_if_file_exists() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("en.ini");
    std::fs::write(&path, "hello=world\n").unwrap();

    let err = codec::load(&path).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat(_)));

    let err = codec::save_to_file(&sample(), dir.path().join("en.xml")).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat(_)));
    assert!(!dir.path().join("en.xml").exists());
}

#[test]
fn read_failures_other_than_not_found_propagate() {
    let dir = TempDir::new().unwrap();
    // A directory named like a catalog cannot be read as a file.
    let path = dir.path().join("fr.json");
    std::fs::create_dir(&path).unwrap();
    assert!(matches!(codec::load(&path), Err(Error::Io(_))));
}

#[test]
fn malformed_content_is_an_error() {
    let dir = TempDir::new().unwrap();
    let cases = [
        ("bad.json", "{\"hello\": "),
        ("nested.json", "{\"hello\": {\"x\": \"y\"}}"),
        ("list.yaml", "- hello\n- world\n"),
        ("number.toml", "hello = 1\n"),
    ];
    for (name, content) in cases {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        assert!(codec::load(&path).is_err(), "{} should fail", name);
    }
}

#[test]
fn translations_load_every_catalog_in_a_directory() {
    let dir = TempDir::new().unwrap();
    codec::save_to_file(&sample(), dir.path().join("zh-Hans.json")).unwrap();
    codec::save_to_file(
        &[("hello %s!", "bonjour %s !")].into_iter().collect(),
        dir.path().join("fr.toml"),
    )
    .unwrap();
    codec::save_to_file(
        &[("hello %s!", "hola %s!")].into_iter().collect(),
        dir.path().join("es_MX.yaml"),
    )
    .unwrap();
    std::fs::write(dir.path().join("README.md"), "not a catalog").unwrap();

    let translations = Translations::load_dir(dir.path()).unwrap();
    assert_eq!(translations.len(), 3);
    let mut languages: Vec<&str> = translations.languages().collect();
    languages.sort_unstable();
    assert_eq!(languages, ["es-MX", "fr", "zh-Hans"]);

    let zh: LanguageIdentifier = "zh-Hans".parse().unwrap();
    let fr_ca: LanguageIdentifier = "fr-CA".parse().unwrap();
    let es_mx: LanguageIdentifier = "es-MX".parse().unwrap();
    assert_eq!(
        translations.catalog_for(&zh).unwrap().get("hello world!"),
        Some("你好，世界！")
    );
    assert_eq!(
        translations.catalog_for(&fr_ca).unwrap().get("hello %s!"),
        Some("bonjour %s !")
    );
    assert_eq!(
        translations.catalog_for(&es_mx).unwrap().get("hello %s!"),
        Some("hola %s!")
    );
}

#[test]
fn translations_reject_stems_that_are_not_languages() {
    let dir = TempDir::new().unwrap();
    codec::save_to_file(&sample(), dir.path().join("not a language.json")).unwrap();
    assert!(matches!(
        Translations::load_dir(dir.path()),
        Err(Error::InvalidLanguage(_))
    ));
}
