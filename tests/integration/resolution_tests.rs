//! Name resolution tests against real-looking compilation unit headers

use apichanges::parser::{ImportTable, SourceUnit};
use apichanges::{resolve, NameResolver, ResolveOptions};

fn imports(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_resolution_precedence() {
    let imports = imports(&["android.os.Bundle", "android.view.*", "java.util.*"]);
    let package = Some("com.example.app");
    let class = Some("MainActivity");

    assert_eq!(resolve("int", &imports, package, class), "int");
    assert_eq!(resolve("void", &imports, package, class), "");
    assert_eq!(resolve("Bundle", &imports, package, class), "android.os.Bundle");
    // unknown names go to the first wildcard
    assert_eq!(resolve("View", &imports, package, class), "android.view.View");
    assert_eq!(resolve("List", &imports, package, class), "android.view.List");
}

#[test]
fn test_without_wildcards() {
    let imports = imports(&["android.os.Bundle"]);
    let package = Some("com.example.app");

    assert_eq!(resolve("MainActivity", &imports, package, Some("MainActivity")), "com.example.app.MainActivity");
    assert_eq!(resolve("String", &imports, package, None), "java.lang.String");
    assert_eq!(resolve("HashMap", &imports, package, None), "java.util.HashMap");
    assert_eq!(resolve("Helper", &imports, package, None), "com.example.app.Helper");
    assert_eq!(resolve("Helper", &imports, None, None), "Helper");
}

#[test]
fn test_resolver_from_parsed_header() {
    let unit = SourceUnit::new(
        "package android.app;\n\
         import android.content.Intent;\n\
         import java.util.List;\n\
         import java.util.Map;\n\
         public class Notification<K extends Comparable<K>, V> { }\n",
    );
    let table = ImportTable::from_cleaned(unit.cleaned());
    let options = ResolveOptions::default();
    let resolver = NameResolver::new(&table, &options);

    assert_eq!(resolver.resolve_type("Intent[]").resolved_name, "android.content.Intent[]");
    assert_eq!(resolver.resolve_type("Map<String, Intent>").resolved_name, "java.util.Map");
    assert_eq!(resolver.resolve_type("Map.Entry<K, V>").resolved_name, "java.util.Map.Entry");
    assert_eq!(resolver.resolve_type("K").resolved_name, "java.lang.Comparable");
    assert_eq!(resolver.resolve_type("V...").resolved_name, "java.lang.Object[]");
    assert_eq!(resolver.resolve_type("java.io.File").resolved_name, "java.io.File");

    let short = resolver.resolve_type("List < Intent >");
    assert_eq!(short.short_name, "List");
    assert_eq!(short.resolved_name, "java.util.List");
}

#[test]
fn test_builtins_before_wildcards_option() {
    let unit = SourceUnit::new("package p;\nimport android.os.*;\nclass C {}\n");
    let table = ImportTable::from_cleaned(unit.cleaned());

    let default = ResolveOptions::default();
    assert_eq!(NameResolver::new(&table, &default).resolve("String"), "android.os.String");

    let builtins_first = ResolveOptions {
        builtins_before_wildcards: true,
        ..Default::default()
    };
    let resolver = NameResolver::new(&table, &builtins_first);
    assert_eq!(resolver.resolve("String"), "java.lang.String");
    assert_eq!(resolver.resolve("Parcel"), "android.os.Parcel");
}
