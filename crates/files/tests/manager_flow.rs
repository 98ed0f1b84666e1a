use filetally_files::{FileManager, FilesError};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

async fn manager_with_files(files: &[(&str, &str)]) -> (TempDir, FileManager) {
    let temp = TempDir::new().expect("tempdir");
    for (name, content) in files {
        tokio::fs::write(temp.path().join(name), content)
            .await
            .expect("seed file");
    }
    let manager = FileManager::new(temp.path()).expect("manager");
    (temp, manager)
}

#[tokio::test]
async fn list_returns_only_text_files_sorted() {
    let (_temp, manager) = manager_with_files(&[
        ("zeta.txt", "z"),
        ("alpha.md", "a"),
        ("binary.bin", "b"),
        ("code.rs", "fn main() {}"),
    ])
    .await;

    assert_eq!(
        manager.list_files().expect("list"),
        vec!["alpha.md".to_string(), "zeta.txt".to_string()]
    );
}

#[tokio::test]
async fn list_ignores_subdirectories() {
    let temp = TempDir::new().expect("tempdir");
    tokio::fs::create_dir(temp.path().join("nested.txt"))
        .await
        .expect("create dir");
    tokio::fs::write(temp.path().join("real.txt"), "content")
        .await
        .expect("write");

    let manager = FileManager::new(temp.path()).expect("manager");
    assert_eq!(manager.list_files().expect("list"), vec!["real.txt"]);
}

#[tokio::test]
async fn create_then_delete_round_trip() {
    let (_temp, manager) = manager_with_files(&[]).await;

    manager
        .create_file("note.txt", "hello there")
        .await
        .expect("create");
    assert_eq!(manager.list_files().expect("list"), vec!["note.txt"]);

    manager.delete_file("note.txt").await.expect("delete");
    assert!(manager.list_files().expect("list").is_empty());
}

#[tokio::test]
async fn create_overwrites_existing_content() {
    let (temp, manager) = manager_with_files(&[("note.txt", "old")]).await;

    manager.create_file("note.txt", "new").await.expect("create");
    let content = tokio::fs::read_to_string(temp.path().join("note.txt"))
        .await
        .expect("read back");
    assert_eq!(content, "new");
}

#[tokio::test]
async fn delete_missing_file_is_reported() {
    let (_temp, manager) = manager_with_files(&[]).await;

    let err = manager
        .delete_file("ghost.txt")
        .await
        .expect_err("must fail");
    assert!(matches!(err, FilesError::FileNotFound(_)));
}

#[tokio::test]
async fn names_that_escape_the_directory_are_rejected() {
    let (_temp, manager) = manager_with_files(&[]).await;

    for name in ["", "..", "../evil.txt", "/etc/passwd", "sub/file.txt", "."] {
        let err = manager
            .create_file(name, "nope")
            .await
            .expect_err("must reject");
        assert!(matches!(err, FilesError::InvalidFileName(_)), "name {name:?}");
    }
}

#[tokio::test]
async fn nonexistent_directory_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("not-here");
    let err = FileManager::new(&missing).err().expect("must fail");
    assert!(matches!(err, FilesError::InvalidDirectory(_)));
}

#[tokio::test]
async fn dedupe_keeps_the_lexicographically_first_of_each_group() {
    let (_temp, manager) = manager_with_files(&[
        ("c-copy.txt", "same content"),
        ("a-original.txt", "same content"),
        ("b-unique.txt", "different content"),
        ("d-copy.md", "same content"),
    ])
    .await;

    let deleted = manager.delete_duplicates().await.expect("dedupe");
    assert_eq!(deleted, vec!["c-copy.txt".to_string(), "d-copy.md".to_string()]);
    assert_eq!(
        manager.list_files().expect("list"),
        vec!["a-original.txt".to_string(), "b-unique.txt".to_string()]
    );
}

#[tokio::test]
async fn dedupe_on_distinct_files_deletes_nothing() {
    let (_temp, manager) =
        manager_with_files(&[("one.txt", "one"), ("two.txt", "two")]).await;

    assert!(manager.delete_duplicates().await.expect("dedupe").is_empty());
    assert_eq!(manager.list_files().expect("list").len(), 2);
}

#[tokio::test]
async fn keyword_search_matches_substrings_in_text_files_only() {
    let (_temp, manager) = manager_with_files(&[
        ("recipe.txt", "two cups of flour"),
        ("diary.md", "flowers everywhere"),
        ("notes.txt", "nothing relevant"),
        ("data.csv", "flour,sugar"),
    ])
    .await;

    // "flour" is a substring of "flowers"; both text files match, the csv
    // is not a text file and stays invisible.
    assert_eq!(
        manager.keyword_search("flour").await.expect("search"),
        vec!["diary.md".to_string(), "recipe.txt".to_string()]
    );
    assert!(manager
        .keyword_search("cinnamon")
        .await
        .expect("search")
        .is_empty());
}

#[tokio::test]
async fn count_words_renders_word_colon_count() {
    let (_temp, manager) = manager_with_files(&[(
        "story.txt",
        "the cat saw the dog\nThe dog ran.\n",
    )])
    .await;

    let rendered = manager.count_words("story.txt", 4).await.expect("count");
    assert_eq!(
        rendered,
        vec![
            "the: 3".to_string(),
            "dog: 2".to_string(),
            "cat: 1".to_string(),
            "ran: 1".to_string(),
            "saw: 1".to_string(),
        ]
    );
}

#[tokio::test]
async fn count_words_on_missing_file_surfaces_the_counter_error() {
    let (_temp, manager) = manager_with_files(&[]).await;

    let err = manager
        .count_words("absent.txt", 2)
        .await
        .expect_err("must surface");
    assert!(matches!(err, FilesError::CounterError(_)));
}
