use ark_resolver::core::ark::ArkIdentifier;
use ark_resolver::core::error::{ErrorClass, ResolverError};
use ark_resolver::core::mapper::{Mapper, MetadataFormat};
use ark_resolver::plugins::json_file::{self, JsonFileMapper};
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_table(dir: &Path, shoulder: &str, table: &serde_json::Value) {
    fs::write(
        dir.join(format!("{}.json", shoulder)),
        serde_json::to_string_pretty(table).unwrap(),
    )
    .unwrap();
}

fn ark(raw: &str) -> ArkIdentifier {
    ArkIdentifier::parse(raw).expect("valid ark")
}

#[test]
fn test_missing_backing_file_is_unavailable() {
    let tmp = tempdir().unwrap();
    let err = JsonFileMapper::new(tmp.path(), "12345", "ex0").unwrap_err();
    assert!(matches!(err, ResolverError::MapperUnavailable(_)));
}

#[test]
fn test_directory_named_like_backing_file_is_unavailable() {
    let tmp = tempdir().unwrap();
    fs::create_dir(tmp.path().join("ex0.json")).unwrap();
    let err = JsonFileMapper::new(tmp.path(), "12345", "ex0").unwrap_err();
    assert!(matches!(err, ResolverError::MapperUnavailable(_)));
}

#[test]
fn test_backing_file_named_after_shoulder() {
    let tmp = tempdir().unwrap();
    write_table(tmp.path(), "example0", &json!({}));
    let mapper = JsonFileMapper::new(tmp.path(), "77298", "example0").unwrap();
    assert_eq!(mapper.file_path(), tmp.path().join("example0.json"));
    assert_eq!(
        json_file::backing_file_path(tmp.path(), "ex1"),
        tmp.path().join("ex1.json")
    );
}

#[test]
fn test_responsibility_requires_authority_and_shoulder() {
    let tmp = tempdir().unwrap();
    write_table(tmp.path(), "ex1", &json!({}));
    let mapper = JsonFileMapper::new(tmp.path(), "12345", "ex1").unwrap();

    assert!(mapper.is_responsible_for(&ark("ark:/12345/ex1abc")));
    assert!(mapper.is_responsible_for(&ark("ark:/12345/e-x1abc")));
    assert!(!mapper.is_responsible_for(&ark("ark:/12346/ex1abc")));
    assert!(!mapper.is_responsible_for(&ark("ark:/12345/ex2abc")));
    assert!(!mapper.is_responsible_for(&ark("ark:/12345/ex10abc")));
}

#[test]
fn test_unknown_local_id_in_empty_table() {
    let tmp = tempdir().unwrap();
    write_table(tmp.path(), "ex0", &json!({}));
    let mapper = JsonFileMapper::new(tmp.path(), "12345", "ex0").unwrap();

    for raw in ["ark:/12345/ex0abc", "ark:/12345/ex0", "ark:/12345/ex0x/y.z"] {
        let err = mapper.resolve_url(&ark(raw)).unwrap_err();
        assert!(
            matches!(err, ResolverError::UnknownIdentifier(_)),
            "{}: {:?}",
            raw,
            err
        );
        assert_eq!(err.class(), ErrorClass::NotFound);
    }
}

#[test]
fn test_resolve_url_and_metadata() {
    let tmp = tempdir().unwrap();
    write_table(
        tmp.path(),
        "example0",
        &json!({
            "abc": { "url": "https://example.org/x", "meta": { "title": "T" } }
        }),
    );
    let mapper = JsonFileMapper::new(tmp.path(), "77298", "example0").unwrap();
    let id = ark("ark:/77298/example0abc");

    assert_eq!(mapper.resolve_url(&id).unwrap(), "https://example.org/x");
    assert_eq!(
        mapper.resolve_metadata(&id, MetadataFormat::RdfJson).unwrap(),
        json!({ "title": "T", "@id": "ark:/77298/example0abc" })
    );
}

#[test]
fn test_metadata_id_is_overwritten_with_canonical_form() {
    let tmp = tempdir().unwrap();
    write_table(
        tmp.path(),
        "ex1",
        &json!({
            "a/b.c": { "url": "https://example.org/abc", "meta": { "@id": "stale", "n": 1 } }
        }),
    );
    let mapper = JsonFileMapper::new(tmp.path(), "12345", "ex1").unwrap();

    let doc = mapper
        .resolve_metadata(&ark("ark:/12345/ex-1a//b..c/"), MetadataFormat::RdfJson)
        .unwrap();
    assert_eq!(doc["@id"], "ark:/12345/ex1a/b.c");
    assert_eq!(doc["n"], 1);
}

#[test]
fn test_percent_escapes_match_uppercase_keys() {
    let tmp = tempdir().unwrap();
    write_table(
        tmp.path(),
        "ex1",
        &json!({ "a%2Fb": { "url": "https://example.org/slash", "meta": {} } }),
    );
    let mapper = JsonFileMapper::new(tmp.path(), "12345", "ex1").unwrap();
    assert_eq!(
        mapper.resolve_url(&ark("ark:/12345/ex1a%2fb")).unwrap(),
        "https://example.org/slash"
    );
}

#[test]
fn test_authority_mismatch_is_internal() {
    let tmp = tempdir().unwrap();
    write_table(
        tmp.path(),
        "ex1",
        &json!({ "abc": { "url": "https://example.org/x", "meta": {} } }),
    );
    let mapper = JsonFileMapper::new(tmp.path(), "12345", "ex1").unwrap();
    let foreign = ark("ark:/99999/ex1abc");

    let err = mapper.resolve_url(&foreign).unwrap_err();
    assert!(matches!(err, ResolverError::AuthorityMismatch { .. }));
    assert_eq!(err.class(), ErrorClass::Internal);

    let err = mapper
        .resolve_metadata(&foreign, MetadataFormat::RdfJson)
        .unwrap_err();
    assert!(matches!(err, ResolverError::AuthorityMismatch { .. }));
}

#[test]
fn test_erc_format_unsupported() {
    let tmp = tempdir().unwrap();
    write_table(
        tmp.path(),
        "ex1",
        &json!({ "abc": { "url": "https://example.org/x", "meta": {} } }),
    );
    let mapper = JsonFileMapper::new(tmp.path(), "12345", "ex1").unwrap();
    let err = mapper
        .resolve_metadata(&ark("ark:/12345/ex1abc"), MetadataFormat::ErcAnvl)
        .unwrap_err();
    assert!(matches!(err, ResolverError::UnsupportedFormat(name) if name == "erc-anvl"));
}

#[test]
fn test_corrupt_backing_file_is_not_unknown_identifier() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("ex1.json"), "{ \"abc\": ").unwrap();
    let mapper = JsonFileMapper::new(tmp.path(), "12345", "ex1").unwrap();

    let err = mapper.resolve_url(&ark("ark:/12345/ex1abc")).unwrap_err();
    assert!(matches!(err, ResolverError::BackingStoreCorrupt { .. }));
    assert_eq!(err.class(), ErrorClass::Internal);
    assert!(err.to_string().contains("ex1.json"));
}

#[test]
fn test_non_utf8_backing_file_is_corrupt() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("ex1.json"), b"{\"abc\": \xff\xfe}").unwrap();
    let mapper = JsonFileMapper::new(tmp.path(), "12345", "ex1").unwrap();

    let err = mapper.resolve_url(&ark("ark:/12345/ex1abc")).unwrap_err();
    assert!(
        matches!(err, ResolverError::BackingStoreCorrupt { .. }),
        "{:?}",
        err
    );
    assert_eq!(err.class(), ErrorClass::Internal);
}

#[test]
fn test_metadata_checks_run_before_reading_backing_file() {
    let tmp = tempdir().unwrap();
    write_table(tmp.path(), "ex1", &json!({}));
    let mapper = JsonFileMapper::new(tmp.path(), "12345", "ex1").unwrap();
    fs::remove_file(mapper.file_path()).unwrap();

    let err = mapper
        .resolve_metadata(&ark("ark:/99999/ex1abc"), MetadataFormat::ErcAnvl)
        .unwrap_err();
    assert!(matches!(err, ResolverError::AuthorityMismatch { .. }));

    let err = mapper
        .resolve_metadata(&ark("ark:/12345/ex1abc"), MetadataFormat::ErcAnvl)
        .unwrap_err();
    assert!(matches!(err, ResolverError::UnsupportedFormat(_)));

    let err = mapper
        .resolve_metadata(&ark("ark:/12345/ex1abc"), MetadataFormat::RdfJson)
        .unwrap_err();
    assert!(matches!(err, ResolverError::IoError(_)));
}

#[test]
fn test_wrong_record_shape_is_corrupt() {
    let tmp = tempdir().unwrap();
    write_table(
        tmp.path(),
        "ex1",
        &json!({ "abc": { "url": "https://example.org/x", "meta": "not an object" } }),
    );
    let mapper = JsonFileMapper::new(tmp.path(), "12345", "ex1").unwrap();
    let err = mapper.resolve_url(&ark("ark:/12345/ex1zzz")).unwrap_err();
    assert!(matches!(err, ResolverError::BackingStoreCorrupt { .. }));
}

#[test]
fn test_each_lookup_rereads_backing_file() {
    let tmp = tempdir().unwrap();
    write_table(tmp.path(), "ex1", &json!({}));
    let mapper = JsonFileMapper::new(tmp.path(), "12345", "ex1").unwrap();
    let id = ark("ark:/12345/ex1abc");

    assert!(matches!(
        mapper.resolve_url(&id),
        Err(ResolverError::UnknownIdentifier(_))
    ));

    write_table(
        tmp.path(),
        "ex1",
        &json!({ "abc": { "url": "https://example.org/new", "meta": {} } }),
    );
    assert_eq!(mapper.resolve_url(&id).unwrap(), "https://example.org/new");
}

#[test]
fn test_backing_file_removed_after_construction_is_io_error() {
    let tmp = tempdir().unwrap();
    write_table(tmp.path(), "ex1", &json!({}));
    let mapper = JsonFileMapper::new(tmp.path(), "12345", "ex1").unwrap();
    fs::remove_file(mapper.file_path()).unwrap();

    let err = mapper.resolve_url(&ark("ark:/12345/ex1abc")).unwrap_err();
    assert!(matches!(err, ResolverError::IoError(_)));
    assert_eq!(err.class(), ErrorClass::Internal);
}

#[test]
fn test_configured_scope_is_normalized() {
    let tmp = tempdir().unwrap();
    write_table(tmp.path(), "example0", &json!({}));
    let mapper = JsonFileMapper::new(tmp.path(), "77298", "exam-ple0").unwrap();
    assert_eq!(mapper.scope().shoulder, "example0");
    assert!(mapper.is_responsible_for(&ark("ark:/77298/example0abc")));
}
