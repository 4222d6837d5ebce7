//! Well-known types that need no import

/// Short name to qualified name for commonly used platform types
pub const BUILTIN_TYPES: &[(&str, &str)] = &[
    // java.lang
    ("String", "java.lang.String"),
    ("Object", "java.lang.Object"),
    ("CharSequence", "java.lang.CharSequence"),
    ("Integer", "java.lang.Integer"),
    ("Long", "java.lang.Long"),
    ("Short", "java.lang.Short"),
    ("Byte", "java.lang.Byte"),
    ("Float", "java.lang.Float"),
    ("Double", "java.lang.Double"),
    ("Boolean", "java.lang.Boolean"),
    ("Character", "java.lang.Character"),
    ("Number", "java.lang.Number"),
    ("Void", "java.lang.Void"),
    ("Class", "java.lang.Class"),
    ("Enum", "java.lang.Enum"),
    ("Iterable", "java.lang.Iterable"),
    ("Runnable", "java.lang.Runnable"),
    ("Thread", "java.lang.Thread"),
    ("Throwable", "java.lang.Throwable"),
    ("Exception", "java.lang.Exception"),
    ("RuntimeException", "java.lang.RuntimeException"),
    ("IllegalArgumentException", "java.lang.IllegalArgumentException"),
    ("IllegalStateException", "java.lang.IllegalStateException"),
    ("SecurityException", "java.lang.SecurityException"),
    ("StringBuilder", "java.lang.StringBuilder"),
    ("Comparable", "java.lang.Comparable"),
    ("AutoCloseable", "java.lang.AutoCloseable"),
    // java.util
    ("List", "java.util.List"),
    ("ArrayList", "java.util.ArrayList"),
    ("Map", "java.util.Map"),
    ("HashMap", "java.util.HashMap"),
    ("Set", "java.util.Set"),
    ("HashSet", "java.util.HashSet"),
    ("Collection", "java.util.Collection"),
    ("Iterator", "java.util.Iterator"),
    ("Optional", "java.util.Optional"),
    ("UUID", "java.util.UUID"),
    ("Locale", "java.util.Locale"),
    // java.io
    ("InputStream", "java.io.InputStream"),
    ("OutputStream", "java.io.OutputStream"),
    ("File", "java.io.File"),
    ("FileDescriptor", "java.io.FileDescriptor"),
    ("IOException", "java.io.IOException"),
];

pub fn lookup(short_name: &str) -> Option<&'static str> {
    BUILTIN_TYPES
        .iter()
        .find(|(short, _)| *short == short_name)
        .map(|(_, qualified)| *qualified)
}
