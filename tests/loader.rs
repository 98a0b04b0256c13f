use reposcore::error::ScoreError;
use reposcore::loader::{load_commits, parse_count, read_commits};
use reposcore::model::CommitRecord;
use std::fs;
use tempfile::tempdir;

const HEADER: &str = "timestamp,username,repository,files,additions,deletions\n";

fn load(body: &str) -> Vec<CommitRecord> {
    let text = format!("{HEADER}{body}");
    read_commits(text.as_bytes(), false).unwrap()
}

#[test]
fn decodes_rows_in_field_order() {
    let commits = load("1614554706,user1,repo1,3,10,5\n1614554707,user2,repo2,1,0,2\n");
    assert_eq!(commits.len(), 2);
    assert_eq!(
        commits[0],
        CommitRecord {
            timestamp: "1614554706".to_string(),
            username: "user1".to_string(),
            repository: "repo1".to_string(),
            files_changed: 3,
            additions: 10,
            deletions: 5,
        }
    );
    assert_eq!(commits[1].repository, "repo2");
}

#[test]
fn malformed_counts_become_zero() {
    let commits = load("t,u,repoA,abc,5,x\n");
    assert_eq!(commits.len(), 1);
    let c = &commits[0];
    assert_eq!((c.files_changed, c.additions, c.deletions), (0, 5, 0));
    assert!((c.score_contribution() - 1.05).abs() < 1e-9);
}

#[test]
fn parse_count_rejects_non_integers() {
    assert_eq!(parse_count("42"), 42);
    assert_eq!(parse_count("+7"), 7);
    assert_eq!(parse_count(""), 0);
    assert_eq!(parse_count("1.5"), 0);
    assert_eq!(parse_count(" 5"), 0);
    assert_eq!(parse_count("-3"), 0);
    assert_eq!(parse_count("99999999999999999999999"), 0);
}

#[test]
fn header_is_skipped_without_validation() {
    let commits = read_commits("a,b,c,1,2,3\nt,u,r,4,5,6\n".as_bytes(), false).unwrap();
    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].files_changed, 4);
}

#[test]
fn header_only_input_is_empty() {
    assert!(load("").is_empty());
    assert!(read_commits("".as_bytes(), false).unwrap().is_empty());
}

#[test]
fn quoted_fields_keep_commas() {
    let commits = load("t,\"Doe, Jane\",\"org,repo\",1,2,3\n");
    assert_eq!(commits[0].username, "Doe, Jane");
    assert_eq!(commits[0].repository, "org,repo");
}

#[test]
fn unequal_row_lengths_abort_the_load() {
    let text = format!("{HEADER}t,u,r,1,2,3\nt,u,r,1,2\n");
    let err = read_commits(text.as_bytes(), false).unwrap_err();
    assert!(matches!(err, ScoreError::Csv(_)), "unexpected error: {err}");
}

#[test]
fn short_rows_abort_the_load() {
    let err = read_commits("a,b,c\nt,u,r\n".as_bytes(), false).unwrap_err();
    match err {
        ScoreError::MissingField { expected, found, .. } => {
            assert_eq!(expected, 6);
            assert_eq!(found, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn invalid_utf8_aborts_the_load() {
    let mut bytes = HEADER.as_bytes().to_vec();
    bytes.extend_from_slice(b"t,u,\xff\xfe,1,2,3\n");
    assert!(read_commits(bytes.as_slice(), false).is_err());
}

#[test]
fn parallel_decoding_matches_sequential() {
    let body: String = (0..500)
        .map(|i| format!("{i},user{},repo{},{},{},{}\n", i % 7, i % 13, i % 5, i, i * 2))
        .collect();
    let text = format!("{HEADER}{body}");
    let mut sequential = read_commits(text.as_bytes(), false).unwrap();
    let mut parallel = read_commits(text.as_bytes(), true).unwrap();
    sequential.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    parallel.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    assert_eq!(sequential, parallel);
}

#[test]
fn load_commits_reads_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("commits.csv");
    fs::write(&path, format!("{HEADER}t,u,repo1,1,1,1\n")).unwrap();
    let commits = load_commits(&path, true).unwrap();
    assert_eq!(commits.len(), 1);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let err = load_commits(dir.path().join("nope.csv"), false).unwrap_err();
    assert!(matches!(err, ScoreError::Io(_)));
}

#[test]
fn unterminated_quote_aborts_the_load() {
    let text = format!("{HEADER}t,u,r,1,2,\"3\nt2,u2,r2,4,5,6\n");
    let err = read_commits(text.as_bytes(), false).unwrap_err();
    match err {
        ScoreError::Quote { line, .. } => assert_eq!(line, 2),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn bare_quote_in_unquoted_field_aborts_the_load() {
    let text = format!("{HEADER}t,u,re\"po,1,2,3\n");
    let err = read_commits(text.as_bytes(), true).unwrap_err();
    assert!(matches!(err, ScoreError::Quote { .. }), "unexpected error: {err}");
}

#[test]
fn text_after_closing_quote_aborts_the_load() {
    let text = format!("{HEADER}t,u,\"repo\"x,1,2,3\n");
    assert!(matches!(
        read_commits(text.as_bytes(), false),
        Err(ScoreError::Quote { .. })
    ));
}

#[test]
fn escaped_quotes_and_quoted_newlines_are_accepted() {
    let commits = load("t,\"say \"\"hi\"\"\",\"multi\nline\",1,2,3\r\nt,u,r,0,0,0\r\n");
    assert_eq!(commits.len(), 2);
    assert_eq!(commits[0].username, "say \"hi\"");
    assert_eq!(commits[0].repository, "multi\nline");
    assert_eq!(commits[0].deletions, 3);
}
