use std::io::Write;

use tempfile::NamedTempFile;

use super::*;

const SAMPLE_CSV: &str = "\
Domain,Name,MBFC Fact,MBFC Bias,Media Bias/Fact Check
FakeNews.example,Fake News Daily,Very Low,Questionable,https://mediabiasfactcheck.com/fake-news-daily/
,No Domain Row,Low,Right,
fakenews.example,Duplicate Row,Mixed,Left,
rumors.test,Rumor Mill,Low,Conspiracy,
";

fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write csv");
    file
}

#[test]
fn test_extract_domain() {
    assert_eq!(
        extract_domain("https://www.BBC.com/news/world-1"),
        Some("bbc.com".to_string())
    );
    assert_eq!(
        extract_domain("http://news.example.org:8080/a?b=c"),
        Some("news.example.org".to_string())
    );
    assert_eq!(extract_domain("not a url"), None);
    assert_eq!(extract_domain("mailto:someone@example.com"), None);
}

#[test]
fn test_from_reader_lowercases_and_keeps_first() {
    let dataset = ReliabilityDataset::from_reader(SAMPLE_CSV.as_bytes(), "inline").expect("parses");

    assert_eq!(dataset.len(), 2);
    let record = dataset.lookup("fakenews.example").expect("listed");
    assert_eq!(record.name.as_deref(), Some("Fake News Daily"));
    assert_eq!(record.mbfc_fact.as_deref(), Some("Very Low"));
}

#[test]
fn test_lookup_is_case_insensitive_and_ignores_www() {
    let dataset = ReliabilityDataset::from_reader(SAMPLE_CSV.as_bytes(), "inline").expect("parses");

    assert!(dataset.is_listed("FAKENEWS.example"));
    assert!(dataset.is_listed("www.rumors.test"));
    assert!(!dataset.is_listed("bbc.com"));
}

#[test]
fn test_source_reliability() {
    let dataset = ReliabilityDataset::from_reader(SAMPLE_CSV.as_bytes(), "inline").expect("parses");

    assert_eq!(dataset.source_reliability("rumors.test"), 0.0);
    assert_eq!(dataset.source_reliability("reuters.com"), 1.0);
    assert_eq!(ReliabilityDataset::empty().source_reliability("rumors.test"), 1.0);
}

#[test]
fn test_missing_optional_columns() {
    let dataset = ReliabilityDataset::from_reader("Domain\nonly.test\n".as_bytes(), "inline")
        .expect("parses");

    let record = dataset.lookup("only.test").expect("listed");
    assert_eq!(record.name, None);
    assert_eq!(record.review_url, None);
}

#[test]
fn test_missing_domain_column_is_an_error() {
    let err = ReliabilityDataset::from_reader("Name,Other\nA,B\n".as_bytes(), "bad.csv")
        .expect_err("no Domain column");
    assert!(matches!(err, DatasetError::MissingDomainColumn { .. }));
}

#[test]
fn test_record_serializes_with_column_names() {
    let dataset = ReliabilityDataset::from_reader(SAMPLE_CSV.as_bytes(), "inline").expect("parses");
    let value = serde_json::to_value(dataset.lookup("rumors.test").expect("listed"))
        .expect("serializes");

    assert_eq!(value["Name"], "Rumor Mill");
    assert_eq!(value["MBFC Bias"], "Conspiracy");
    assert!(value.get("Domain").is_none());
}

#[test]
fn test_load_merges_files_and_skips_missing() {
    let first = write_csv(SAMPLE_CSV);
    let second = write_csv("Domain,Name\nrumors.test,Shadowed\nextra.test,Extra\n");
    let missing = first.path().with_extension("does-not-exist");

    let dataset = ReliabilityDataset::load(&[first.path(), missing.as_path(), second.path()])
        .expect("loads");

    assert_eq!(dataset.len(), 3);
    assert_eq!(
        dataset.lookup("rumors.test").and_then(|r| r.name.as_deref()),
        Some("Rumor Mill")
    );
    assert!(dataset.is_listed("extra.test"));
}

#[test]
fn test_load_with_no_files_is_empty() {
    let paths: [&str; 0] = [];
    let dataset = ReliabilityDataset::load(&paths).expect("loads");
    assert!(dataset.is_empty());
}
