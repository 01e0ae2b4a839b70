use forum_core::db::migrations::latest_version;
use forum_core::db::open_db_in_memory;
use forum_core::{ForumRepository, RepoError, SqliteForumRepository};
use rusqlite::Connection;

#[test]
fn list_is_empty_without_questions() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteForumRepository::try_new(&conn).unwrap();

    assert!(repo.list_questions().unwrap().is_empty());
}

#[test]
fn questions_are_listed_in_creation_order_with_zero_answers() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteForumRepository::try_new(&conn).unwrap();

    let id_a = repo.create_question("What is 1 + 1?").unwrap();
    let id_b = repo.create_question("What is 2 + 2?").unwrap();
    let id_c = repo.create_question("What is 3 + 3?").unwrap();
    assert!(id_a < id_b && id_b < id_c);

    let list = repo.list_questions().unwrap();
    assert_eq!(
        list.iter().map(|q| q.id).collect::<Vec<_>>(),
        vec![id_a, id_b, id_c]
    );
    assert_eq!(list[0].text, "What is 1 + 1?");
    assert_eq!(list[1].text, "What is 2 + 2?");
    assert_eq!(list[2].text, "What is 3 + 3?");
    assert!(list.iter().all(|q| q.answer_count == 0));
}

#[test]
fn get_question_returns_record_or_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteForumRepository::try_new(&conn).unwrap();

    let id = repo.create_question("Capital of France?").unwrap();
    let found = repo.get_question(id).unwrap().unwrap();
    assert_eq!(found.id, id);
    assert_eq!(found.text, "Capital of France?");

    assert!(repo.get_question(999_999).unwrap().is_none());
}

#[test]
fn answers_are_linked_ordered_and_counted() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteForumRepository::try_new(&conn).unwrap();

    let question_id = repo.create_question("4 + 4 = ?").unwrap();
    assert_eq!(repo.get_answer_count(question_id).unwrap(), 0);

    let first = repo.create_answer(question_id, "8").unwrap();
    let second = repo.create_answer(question_id, "eight").unwrap();
    assert!(first < second);
    assert_eq!(repo.get_answer_count(question_id).unwrap(), 2);

    let answers = repo.get_answers(question_id).unwrap();
    assert_eq!(
        answers.iter().map(|a| a.id).collect::<Vec<_>>(),
        vec![first, second]
    );
    assert_eq!(
        answers.iter().map(|a| a.text.as_str()).collect::<Vec<_>>(),
        vec!["8", "eight"]
    );
    assert!(answers.iter().all(|a| a.question_id == question_id));
}

#[test]
fn reads_for_unknown_question_are_empty() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteForumRepository::try_new(&conn).unwrap();

    assert!(repo.get_answers(424_242).unwrap().is_empty());
    assert_eq!(repo.get_answer_count(424_242).unwrap(), 0);
}

#[test]
fn list_reflects_answer_count_after_new_answers() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteForumRepository::try_new(&conn).unwrap();

    let q1 = repo.create_question("Q1").unwrap();
    let q2 = repo.create_question("Q2").unwrap();
    let q3 = repo.create_question("Q3").unwrap();

    repo.create_answer(q2, "A").unwrap();
    repo.create_answer(q2, "B").unwrap();

    let list = repo.list_questions().unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(
        list.iter()
            .map(|q| (q.id, q.answer_count))
            .collect::<Vec<_>>(),
        vec![(q1, 0), (q2, 2), (q3, 0)]
    );

    let texts: Vec<String> = repo
        .get_answers(q2)
        .unwrap()
        .into_iter()
        .map(|a| a.text)
        .collect();
    assert_eq!(texts, vec!["A", "B"]);
}

#[test]
fn answer_ids_are_independent_from_question_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteForumRepository::try_new(&conn).unwrap();

    let q1 = repo.create_question("first").unwrap();
    let q2 = repo.create_question("second").unwrap();
    let a1 = repo.create_answer(q2, "only answer").unwrap();

    assert_eq!((q1, q2), (1, 2));
    assert_eq!(a1, 1);
}

#[test]
fn create_answer_for_unknown_question_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteForumRepository::try_new(&conn).unwrap();

    let err = repo.create_answer(77, "orphan").unwrap_err();
    assert!(matches!(err, RepoError::QuestionNotFound(77)));

    let orphans: i64 = conn
        .query_row("SELECT COUNT(*) FROM answers;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(orphans, 0);
}

#[test]
fn store_failures_pass_through_as_db_errors() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteForumRepository::try_new(&conn).unwrap();
    conn.execute_batch("DROP TABLE answers;").unwrap();

    let err = repo.get_answer_count(1).unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
}

#[test]
fn repeated_reads_are_identical() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteForumRepository::try_new(&conn).unwrap();

    let id = repo.create_question("Colour of the sky?").unwrap();
    repo.create_answer(id, "Blue").unwrap();
    repo.create_answer(id, "Depends on the hour").unwrap();

    assert_eq!(repo.list_questions().unwrap(), repo.list_questions().unwrap());
    assert_eq!(repo.get_question(id).unwrap(), repo.get_question(id).unwrap());
    assert_eq!(repo.get_answers(id).unwrap(), repo.get_answers(id).unwrap());
    assert_eq!(
        repo.get_answer_count(id).unwrap(),
        repo.get_answer_count(id).unwrap()
    );
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteForumRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_answers_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("CREATE TABLE questions (id INTEGER PRIMARY KEY, text TEXT NOT NULL);")
        .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteForumRepository::try_new(&conn),
        Err(RepoError::MissingRequiredTable("answers"))
    ));
}

#[test]
fn repository_rejects_connection_missing_question_text_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("CREATE TABLE questions (id INTEGER PRIMARY KEY);")
        .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteForumRepository::try_new(&conn),
        Err(RepoError::MissingRequiredColumn {
            table: "questions",
            column: "text"
        })
    ));
}
