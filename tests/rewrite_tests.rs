use pathrewrite::rewrite::{
    extract_path, QueryValue, RequestParams, RewriteTable, RewriteTarget,
};
use std::fs;
use tempfile::TempDir;

fn write_rules(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write rules");
    path
}

fn request_for(url: &str) -> RequestParams {
    let segments: Vec<&str> = url.split('/').filter(|s| !s.is_empty()).collect();
    let mut params = RequestParams::new();
    params.insert("path".to_string(), QueryValue::from(segments));
    params
}

#[test]
fn test_load_yaml_rules() {
    let dir = TempDir::new().unwrap();
    let path = write_rules(
        &dir,
        "rewrites.yaml",
        r#"
rules:
  - path: /docs
    end: false
    to: /documentation
  - path: /blog/:blogId
    to: [blog]
"#,
    );

    let table = RewriteTable::load(&path).unwrap();
    assert_eq!(table.len(), 2);

    let rewrite = table.resolve("/docs/intro").unwrap();
    assert_eq!(rewrite.rule_index, 0);
    assert_eq!(rewrite.target, &RewriteTarget::Path("/documentation".to_string()));
}

#[test]
fn test_load_json_rules_with_camel_case_option() {
    let dir = TempDir::new().unwrap();
    let path = write_rules(
        &dir,
        "rewrites.json",
        r#"{"rules": [{"path": "/Style", "caseSensitive": true, "to": ["styleguide"]}]}"#,
    );

    let table = RewriteTable::load(&path).unwrap();
    assert!(table.resolve("/Style").is_some());
    assert!(table.resolve("/style").is_none());
}

#[test]
fn test_load_toml_rules() {
    let dir = TempDir::new().unwrap();
    let path = write_rules(
        &dir,
        "rewrites.toml",
        r#"
[[rules]]
path = "/user/:id"
to = ["profile"]

[[rules]]
path = "/files/*"
to = "/storage"
"#,
    );

    let table = RewriteTable::load(&path).unwrap();
    let rules: Vec<_> = table.rules().collect();
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0].pattern.path, "/user/:id");
    assert!(rules[0].pattern.is_end());
    assert!(!rules[0].pattern.is_case_sensitive());

    let rewrite = table.resolve("/files/a/b").unwrap();
    assert_eq!(rewrite.rule_index, 1);
    assert_eq!(rewrite.matched.wildcard(), Some("a/b"));
}

#[test]
fn test_load_rejects_unknown_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_rules(&dir, "rewrites.ini", "rules = nothing");

    let err = RewriteTable::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("unsupported rewrite rule file"));
}

#[test]
fn test_load_reports_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = RewriteTable::load(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(format!("{err:#}").contains("failed to read rewrite rules"));
}

#[test]
fn test_load_reports_invalid_yaml() {
    let dir = TempDir::new().unwrap();
    let path = write_rules(&dir, "broken.yml", "rules: [ {path: /a");
    let err = RewriteTable::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("invalid YAML"));
}

#[test]
fn test_rewrite_params_merges_matched_values() {
    let dir = TempDir::new().unwrap();
    let path = write_rules(
        &dir,
        "rewrites.yaml",
        r#"
rules:
  - path: /blog/:blogId
    to: [blog]
"#,
    );
    let table = RewriteTable::load(&path).unwrap();

    let mut request = request_for("/blog/my%20post");
    request.insert("utm".to_string(), QueryValue::from("mail"));

    let rewritten = table.apply(&request);
    assert_eq!(rewritten.get("blogId"), Some(&QueryValue::from("my post")));
    assert_eq!(rewritten.get("utm"), Some(&QueryValue::from("mail")));
    assert_eq!(rewritten.get("path"), Some(&QueryValue::from(vec!["blog"])));
    assert_eq!(extract_path(&rewritten), "/blog");
}

#[test]
fn test_unmatched_request_passes_through() {
    let table = RewriteTable::new(Vec::new()).unwrap();
    assert!(table.is_empty());

    let request = request_for("/anything/at/all");
    assert!(table.rewrite_params(&request).is_none());
    assert_eq!(table.apply(&request), request);
}
