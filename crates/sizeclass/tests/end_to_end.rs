#![forbid(unsafe_code)]

//! End-to-end behavior through the public facade.

use std::io::Write as _;

use sizeclass::prelude::*;
use sizeclass::{Absence, BreakpointConfig, ConfigError, load_table};

fn standard() -> BreakpointTable<&'static str> {
    BreakpointTable::new([("mobile", 0), ("tablet", 720), ("desktop", 1200)]).unwrap()
}

#[test]
fn tablet_width_predicates() {
    let table = standard();
    let bp = Resolver::for_width(&table, 800.0);

    assert_eq!(bp.active(), Some(&"tablet"));
    assert!(bp.up(&"mobile").unwrap());
    assert!(bp.up(&"tablet").unwrap());
    assert!(!bp.up(&"desktop").unwrap());
    assert!(bp.down(&"desktop").unwrap());
    assert!(!bp.down(&"mobile").unwrap());
    assert!(bp.between(&"mobile", &"tablet").unwrap());
    assert!(!bp.between(&"desktop", &"mobile").unwrap());
    assert!(bp.is(&["mobile", "tablet"]).unwrap());
    assert!(bp.not(&["desktop"]).unwrap());
}

#[test]
fn free_functions_take_an_explicit_active_name() {
    let table = standard();
    let active = sizeclass::active_breakpoint(&table, 800);
    assert_eq!(active, Some(&"tablet"));

    assert!(sizeclass::up(&table, active, &"mobile").unwrap());
    assert!(sizeclass::down(&table, active, &"tablet").unwrap());
    assert!(sizeclass::between(&table, active, &"tablet", &"desktop").unwrap());
    assert!(sizeclass::is(&table, active, &["tablet"]).unwrap());
    assert!(sizeclass::not(&table, active, &["desktop"]).unwrap());

    let margin = Query::new().at("mobile", 20).at("desktop", 50);
    assert_eq!(sizeclass::resolve(&table, active, &margin), Ok(Some(&20)));
    assert_eq!(sizeclass::resolve(&table, None, &margin), Ok(None));
}

#[test]
fn label_style_across_widths() {
    let table = standard();
    let margin_top = Query::new().at("mobile", 20).at("desktop", 50);
    let background = Query::new().at("mobile", "red").at("tablet", "green");

    let cases = [
        (375.0, 20, "red"),
        (720.0, 20, "green"),
        (1199.0, 20, "green"),
        (1200.0, 50, "green"),
        (2560.0, 50, "green"),
    ];
    for (width, margin, color) in cases {
        let bp = Resolver::for_width(&table, width);
        assert_eq!(bp.resolve(&margin_top), Some(&margin), "width {width}");
        assert_eq!(bp.resolve(&background), Some(&color), "width {width}");
    }
}

#[test]
fn no_forward_fallback_below_first_defined_key() {
    let table = standard();
    let only_desktop = Query::new().at("desktop", 50);
    let bp = Resolver::for_width(&table, 800.0);
    assert_eq!(bp.resolve(&only_desktop), None);
    assert_eq!(
        bp.resolve_explained(&only_desktop),
        Err(Absence::UnresolvedQuery)
    );
}

#[test]
fn width_below_every_threshold() {
    let table = BreakpointTable::new([("compact", 320), ("regular", 768)]).unwrap();
    let bp = Resolver::for_width(&table, 100.0);
    assert_eq!(bp.active(), None);
    assert!(!bp.up(&"compact").unwrap());
    assert!(bp.down(&"compact").unwrap());
    assert_eq!(
        bp.resolve_explained(&Query::new().at("compact", 1)),
        Err(Absence::NoActiveBreakpoint)
    );
}

#[test]
fn unknown_names_are_reported() {
    let table = standard();
    let bp = Resolver::for_width(&table, 800.0);
    let err = bp.up(&"watch").unwrap_err();
    assert!(matches!(err, BreakpointError::UnknownBreakpoint { .. }));
    assert!(err.to_string().contains("watch"));

    let query = Query::new().at("mobile", 1).at("watch", 2);
    assert!(query.validate(&table).is_err());
    assert_eq!(bp.resolve(&query), Some(&1));
}

#[test]
fn provider_drives_scoped_lookups() {
    let width = Observable::new(375.0);
    let provider = BreakpointProvider::new(standard(), &width);
    let background = Query::new().at("mobile", "red").at("tablet", "green");

    let read = || provider.scope(|_| context::value(&background).unwrap());
    assert_eq!(read(), Some("red"));
    width.set(1024.0);
    assert_eq!(read(), Some("green"));
}

#[test]
fn table_from_toml_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[breakpoints]\ndesktop = 1200\nmobile = 0\ntablet = 720").unwrap();

    let table = load_table(file.path()).unwrap();
    let names: Vec<&str> = table.names().iter().map(String::as_str).collect();
    assert_eq!(names, ["mobile", "tablet", "desktop"]);

    let bp = Resolver::for_width(&table, 720.0);
    assert_eq!(bp.active().map(String::as_str), Some("tablet"));
}

#[test]
fn table_from_json_file() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{"breakpoints": {{"small": 0, "large": 900}}}}"#).unwrap();

    let table = load_table(file.path()).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.threshold(&"large".to_string()).unwrap(), 900.0);
}

#[test]
fn empty_config_is_rejected() {
    let config = BreakpointConfig {
        breakpoints: Default::default(),
    };
    assert!(matches!(config.into_table(), Err(ConfigError::Validation(_))));
}
