//! End-to-end extraction tests
//!
//! These tests run whole Java compilation units through the extractor and
//! check the produced change documents.

use apichanges::config::ExtractionConfig;
use apichanges::{ApiChangeExtractor, ClassLabel, ExtractError};
use pretty_assertions::assert_eq;

const BASE: &str = "https://cs.android.com/android/platform/frameworks/base/LocationManager.java";

const LOCATION_MANAGER: &str = r#"/*
 * Copyright (C) 2024 The Android Open Source Project
 */
package android.location;

import android.content.Context;
import android.os.Bundle;
import java.util.List;
import java.util.Map;
import java.util.concurrent.Executor;
import static java.lang.Math.max;

/**
 * Not a method: void fake(int x) { }
 */
public class LocationManager<T extends Comparable<T>> {
    // private int commented(int a) { }
    public LocationManager(Context context) {
    }

    @Deprecated
    public Location getLastKnownLocation(String provider) {
        return null;
    }

    public <E> List<E> query(Map<String, List<E>> filters, int... ids)
            throws IOException, SecurityException {
        return null;
    }

    public T best(T[] candidates) {
        return candidates[0];
    }

    private void notify(Executor executor, Bundle extras) {
        if (executor != null) {
            executor.execute(task);
        }
    }
}
"#;

fn link(line: usize) -> String {
    format!("{};l={}", BASE, line)
}

#[test]
fn test_extracts_every_declaration_in_order() {
    let doc = ApiChangeExtractor::new().extract(LOCATION_MANAGER, BASE).unwrap();

    assert_eq!(doc.name, "LocationManager");

    let code: Vec<&str> = doc.implemented_methods.iter().map(|r| r.code.as_str()).collect();
    assert_eq!(
        code,
        vec![
            "LocationManager(Context context)",
            "Location getLastKnownLocation(String provider)",
            "List<E> query(Map<String, List<E>> filters, int... ids)",
            "T best(T[] candidates)",
            "void notify(Executor executor, Bundle extras)",
        ]
    );

    let code_long: Vec<&str> = doc
        .implemented_methods
        .iter()
        .map(|r| r.code_long.as_str())
        .collect();
    assert_eq!(
        code_long,
        vec![
            "LocationManager(android.content.Context)",
            "android.location.Location getLastKnownLocation(java.lang.String)",
            "java.util.List query(java.util.Map, int[])",
            "java.lang.Comparable best(java.lang.Comparable[])",
            "notify(java.util.concurrent.Executor, android.os.Bundle)",
        ]
    );

    let links: Vec<String> = doc.implemented_methods.iter().map(|r| r.link.clone()).collect();
    assert_eq!(links, vec![link(18), link(22), link(26), link(31), link(35)]);
}

#[test]
fn test_data_descriptors() {
    let doc = ApiChangeExtractor::new().extract(LOCATION_MANAGER, BASE).unwrap();
    let records = &doc.implemented_methods;

    // constructor and void return nothing
    assert!(records[0].data_returned.is_empty());
    assert!(records[4].data_returned.is_empty());

    let returned = &records[1].data_returned[0];
    assert_eq!(returned.data_type, "android.location.Location");
    assert!(!returned.possibly_sensitive);

    let transmitted = &records[2].data_transmitted;
    assert_eq!(transmitted.len(), 2);
    assert_eq!(transmitted[0].data_type, "java.util.Map");
    assert_eq!(transmitted[1].data_type, "int[]");
    for descriptor in transmitted {
        let destinations = descriptor.destinations.as_ref().unwrap();
        assert_eq!(destinations.len(), 1);
        assert_eq!(destinations[0].resource, "Application code");
        assert!(!destinations[0].accessible_to_third_parties);
    }
}

#[test]
fn test_json_shape() {
    let doc = ApiChangeExtractor::new()
        .extract("package p; import a.b.Foo; class C { public Foo m(int x) { } }", "https://x")
        .unwrap();
    let json = serde_json::to_value(&doc).unwrap();

    assert_eq!(json["name"], "C");
    let record = &json["implemented_methods"][0];
    assert_eq!(record["code"], "Foo m(int x)");
    assert_eq!(record["code_long"], "a.b.Foo m(int)");
    assert_eq!(record["link"], "https://x;l=1");
    assert_eq!(record["class"], "Non-Sensitive");
    assert_eq!(record["category"], serde_json::Value::Null);
    assert_eq!(record["change_type"], "Addition");
    assert_eq!(record["data_returned"][0]["type"], "a.b.Foo");
    assert_eq!(record["data_returned"][0]["possibly_sensitive"], false);
    assert!(record["data_returned"][0].get("destinations").is_none());
    assert_eq!(record["data_transmitted"][0]["type"], "int");
    assert_eq!(record["data_transmitted"][0]["possibly_sensitive"], true);
    assert_eq!(
        record["data_transmitted"][0]["destinations"][0]["resource"],
        "Application code"
    );
}

#[test]
fn test_interface_only_source() {
    let source = "package android.view;\n\npublic interface OnClickListener {\n    void onClick(View v);\n}\n";
    let doc = ApiChangeExtractor::new().extract(source, BASE).unwrap();
    assert_eq!(doc.name, "UnknownClass");
    assert!(doc.implemented_methods.is_empty());
}

#[test]
fn test_abstract_declarations_are_skipped_without_body() {
    let source = "abstract class Shape {\n    abstract double area();\n    double twice() { return 2 * area(); }\n}";
    let doc = ApiChangeExtractor::new().extract(source, BASE).unwrap();
    assert_eq!(doc.implemented_methods.len(), 1);
    assert_eq!(doc.implemented_methods[0].code, "double twice()");
    assert!(doc.implemented_methods[0].data_returned[0].possibly_sensitive);
}

#[test]
fn test_empty_source_and_base_url() {
    let extractor = ApiChangeExtractor::new();
    assert!(matches!(extractor.extract("", BASE), Err(ExtractError::EmptySource)));
    assert!(matches!(
        extractor.extract(LOCATION_MANAGER, ""),
        Err(ExtractError::MissingBaseUrl)
    ));
}

#[test]
fn test_string_literals_and_unicode_names() {
    let source = "class Ünï {\n  String s = \"void fake() {\";\n  Ünï() {}\n  void é(char c) {}\n}";
    let doc = ApiChangeExtractor::new().extract(source, BASE).unwrap();

    assert_eq!(doc.name, "Ünï");
    let code_long: Vec<&str> = doc
        .implemented_methods
        .iter()
        .map(|r| r.code_long.as_str())
        .collect();
    assert_eq!(code_long, vec!["Ünï()", "é(char)"]);
    assert_eq!(doc.implemented_methods[1].link, link(4));
}

#[test]
fn test_config_aliases_apply() {
    let mut config = ExtractionConfig::default();
    config
        .aliases
        .insert("Parcel".to_string(), "android.os.Parcel".to_string());

    let doc = ApiChangeExtractor::from_config(&config)
        .extract("package p;\nclass C {\n  void write(Parcel out) {}\n}", BASE)
        .unwrap();
    assert_eq!(doc.implemented_methods[0].code_long, "write(android.os.Parcel)");
    assert_eq!(doc.implemented_methods[0].class_label, ClassLabel::NonSensitive);
}
