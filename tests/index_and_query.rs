//! Integration test: builds a small document corpus on disk, runs a full
//! `Session::bootstrap` -> index -> persist -> reload -> query round trip,
//! and checks ANY/ALL retrieval against it.

use mauka_index_lib::config::IndexConfig;
use mauka_index_lib::query::QueryMode;
use mauka_index_lib::session::Session;
use mauka_index_lib::text_source::{FilesystemTextSource, TextSource};

fn write_corpus(dir: &std::path::Path) {
    std::fs::write(dir.join("red_car.txt"), "the red car is fast").unwrap();
    std::fs::write(dir.join("blue_car.txt"), "the blue car is slow").unwrap();
    std::fs::write(dir.join("red_boat.txt"), "the red boat floats").unwrap();
}

fn test_config(dir: &std::path::Path) -> IndexConfig {
    let mut config = IndexConfig::default();
    config.paths.documents_dir = dir.to_path_buf();
    config.paths.index_dir = dir.join("index_data");
    config
}

#[test]
fn full_build_persist_reload_and_query_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    write_corpus(dir.path());
    let config = test_config(dir.path());
    let text_source = FilesystemTextSource::new(dir.path());

    {
        let mut session = Session::bootstrap(config.clone()).unwrap();
        for entry in std::fs::read_dir(dir.path()).unwrap() {
            let entry = entry.unwrap();
            if !entry.path().is_file() {
                continue;
            }
            let doc_id = entry.file_name().to_str().unwrap().to_string();
            let text = text_source.fetch(&doc_id).unwrap();
            let words = session.tokenize(&text);
            session.index_document(&doc_id, &words).unwrap();
        }
    }

    // Reopen from the persisted files: a fresh process would see this.
    let mut session = Session::bootstrap(config).unwrap();

    let query_words = session.tokenize("red car");
    let any_results = session
        .search(&text_source, &query_words, QueryMode::Any)
        .unwrap();
    assert_eq!(any_results.len(), 3, "all three docs mention red or car");

    let all_results = session
        .search(&text_source, &query_words, QueryMode::All)
        .unwrap();
    assert_eq!(all_results, vec!["red_car.txt".to_string()]);

    let submarine_words = session.tokenize("submarine");
    let none_results = session
        .search(&text_source, &submarine_words, QueryMode::Any)
        .unwrap();
    assert!(none_results.is_empty());
}

#[test]
fn repeated_queries_increase_rank_and_shift_any_mode_ordering() {
    let dir = tempfile::tempdir().unwrap();
    write_corpus(dir.path());
    let config = test_config(dir.path());
    let text_source = FilesystemTextSource::new(dir.path());

    let mut session = Session::bootstrap(config).unwrap();
    for entry in std::fs::read_dir(dir.path()).unwrap() {
        let entry = entry.unwrap();
        if !entry.path().is_file() {
            continue;
        }
        let doc_id = entry.file_name().to_str().unwrap().to_string();
        let text = text_source.fetch(&doc_id).unwrap();
        let words = session.tokenize(&text);
        session.index_document(&doc_id, &words).unwrap();
    }

    // Looking up "boat" repeatedly raises its rank above "car"'s.
    let boat_words = session.tokenize("boat");
    for _ in 0..5 {
        session
            .search(&text_source, &boat_words, QueryMode::Any)
            .unwrap();
    }

    let query_words = session.tokenize("red boat car");
    let results = session
        .search(&text_source, &query_words, QueryMode::Any)
        .unwrap();
    assert_eq!(results.first(), Some(&"red_boat.txt".to_string()));
}
