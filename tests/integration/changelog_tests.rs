//! Change-log loading, filtering, statistics and FlowDroid export

use apichanges::analysis::{CategoryStatistics, UNKNOWN_CATEGORY};
use apichanges::report::render_flowdroid;
use apichanges::{ChangeFilter, ChangeLog, ChangeLogError, ClassLabel};
use std::io::Write;

const CHANGES: &str = r#"[
  {
    "package": "android.telephony",
    "changed_classes": [
      {
        "name": "TelephonyManager",
        "implemented_methods": [
          {
            "code": "String getImei()",
            "code_long": "java.lang.String getImei()",
            "link": "https://cs.android.com/TelephonyManager.java;l=120",
            "class": "Sensitive Source",
            "categories": ["Device or other IDs"],
            "change_type": "Changed",
            "data_returned": [
              { "type": "java.lang.String", "description": "IMEI", "possibly_sensitive": true }
            ],
            "data_transmitted": []
          },
          {
            "code": "void setLine(String number)",
            "code_long": "setLine(java.lang.String)",
            "link": "https://cs.android.com/TelephonyManager.java;l=150",
            "class": "Sensitive Sink",
            "categories": [],
            "change_type": "Addition",
            "data_returned": [],
            "data_transmitted": [
              {
                "type": "java.lang.String",
                "description": "number",
                "possibly_sensitive": true,
                "destinations": [{ "resource": "Carrier", "accesible_to_third_parties": true }]
              }
            ]
          }
        ]
      }
    ],
    "added_interfaces": [
      {
        "name": "SmsListener",
        "implemented_methods": [
          {
            "code": "void onSms(String body)",
            "code_long": "onSms(java.lang.String)",
            "class": "Non-Sensitive",
            "category": "Messages",
            "change_type": "Addition"
          }
        ]
      }
    ]
  },
  {
    "package": "android.telephony",
    "added_classes": [
      {
        "name": "TelephonyManager",
        "implemented_methods": [
          {
            "code": "String getImei()",
            "code_long": "java.lang.String getImei()",
            "class": "Sensitive Sink",
            "category": "Device or other IDs",
            "change_type": "Addition"
          }
        ]
      }
    ]
  }
]"#;

fn load() -> ChangeLog {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CHANGES.as_bytes()).unwrap();
    ChangeLog::load(file.path()).unwrap()
}

#[test]
fn test_load_and_flatten() {
    let entries = load().entries();
    assert_eq!(entries.len(), 4);

    let owners: Vec<&str> = entries.iter().map(|e| e.owner.as_str()).collect();
    assert_eq!(
        owners,
        vec!["TelephonyManager", "TelephonyManager", "SmsListener", "TelephonyManager"]
    );

    // empty category list reads as no category
    assert_eq!(entries[1].record.category, None);
    let destination = &entries[1].record.data_transmitted[0]
        .destinations
        .as_ref()
        .unwrap()[0];
    assert!(destination.accessible_to_third_parties);
}

#[test]
fn test_missing_file() {
    let err = ChangeLog::load(std::path::Path::new("/no/such/changes.json")).unwrap_err();
    assert!(matches!(err, ChangeLogError::Read { .. }));
}

#[test]
fn test_filters_combine() {
    let entries = load().entries();

    let filter = ChangeFilter {
        change_type: Some("Addition".into()),
        class_label: Some(ClassLabel::SensitiveSink),
        category: None,
    };
    let codes: Vec<&str> = filter
        .apply(&entries)
        .into_iter()
        .map(|e| e.record.code.as_str())
        .collect();
    assert_eq!(codes, vec!["void setLine(String number)", "String getImei()"]);

    let messages = ChangeFilter {
        category: Some("Messages".into()),
        ..Default::default()
    };
    assert_eq!(messages.apply(&entries).len(), 1);
}

#[test]
fn test_statistics() {
    let entries = load().entries();
    let stats = CategoryStatistics::from_entries(&entries);

    assert_eq!(stats.total(), 4);
    assert_eq!(stats.count(ClassLabel::SensitiveSource, "Device or other IDs"), 1);
    assert_eq!(stats.count(ClassLabel::SensitiveSink, "Device or other IDs"), 1);
    assert_eq!(stats.count(ClassLabel::SensitiveSink, UNKNOWN_CATEGORY), 1);
    assert_eq!(stats.count(ClassLabel::NonSensitive, "Messages"), 1);
    assert_eq!(stats.label_total(ClassLabel::SensitiveSink), 2);
}

#[test]
fn test_flowdroid_merges_source_and_sink() {
    let entries = load().entries();
    assert_eq!(
        render_flowdroid(&entries),
        "<android.telephony.TelephonyManager: java.lang.String getImei()> -> _BOTH_\n\
         <android.telephony.TelephonyManager: setLine(java.lang.String)> -> _SINK_"
    );
}
