use std::io::Write;

use carecompanion_core::labels::{humanize, Humanized, LabelCatalog, LabelResolver};

#[test]
fn humanize_replaces_underscores_and_capitalizes() {
    assert_eq!(humanize("opt_hardly_ever"), "Opt hardly ever");
    assert_eq!(humanize("ucla3_q1"), "Ucla3 q1");
    assert_eq!(humanize(""), "");
}

#[test]
fn catalog_resolves_known_keys() {
    let catalog = LabelCatalog::from_json_str(
        r#"{ "opt_often": "Often", "ucla3_q1": "How often do you feel that you lack companionship?" }"#,
    )
    .unwrap();

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.resolve_label("opt_often"), "Often");
    assert_eq!(
        catalog.resolve_label("ucla3_q1"),
        "How often do you feel that you lack companionship?"
    );
}

#[test]
fn catalog_falls_back_to_humanized_key() {
    let catalog = LabelCatalog::from_json_str(r#"{ "blank_entry": "  " }"#).unwrap();

    assert_eq!(catalog.resolve_label("not_in_catalog"), "Not in catalog");
    assert_eq!(catalog.resolve_label("blank_entry"), "Blank entry");
    assert_eq!(Humanized.resolve_label("gds15_q3"), "Gds15 q3");
}

#[test]
fn catalog_loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "opt_yes": "Yes" }}"#).unwrap();

    let catalog = LabelCatalog::from_path(file.path()).unwrap();
    assert_eq!(catalog.resolve_label("opt_yes"), "Yes");
}

#[test]
fn malformed_catalog_is_an_error() {
    assert!(LabelCatalog::from_json_str("[1, 2, 3]").is_err());
}
