use sql_record_binder::prelude::*;
use sql_record_binder::record_handler;
use sql_record_binder::test_utils::{ScriptedDriver, ScriptedResponse};

#[derive(Debug, Default, Clone, PartialEq)]
struct Pair {
    id: i64,
    name: String,
}

record_handler!(Pair => PairHandler { id, name });

#[derive(Debug, Default, Clone, PartialEq)]
struct Triple {
    id: i64,
    name: String,
    extra: String,
}

record_handler!(Triple => TripleHandler { id, name, extra });

const SELECT: &str = "SELECT id,name FROM t ORDER BY id";

fn connected(driver: ScriptedDriver) -> QueryEngine<ScriptedDriver> {
    let mut engine = QueryEngine::new(driver);
    engine
        .connect(&ConnectOptions::builder("t").user("test").finish())
        .expect("scripted connect");
    engine
}

fn two_rows() -> ScriptedResponse {
    ScriptedResponse::text_rows(2, &[&[Some("1"), Some("a")], &[Some("2"), Some("b")]])
}

#[test]
fn end_to_end_two_rows() -> Result<(), Box<dyn std::error::Error>> {
    let mut driver = ScriptedDriver::new();
    driver.script(SELECT, two_rows());
    let mut engine = connected(driver);

    let mut out: Vec<Pair> = Vec::new();
    let outcome = engine.query(&PairHandler, SELECT, &mut out)?;

    assert_eq!(outcome.records_added, 2);
    assert_eq!(
        out,
        vec![
            Pair {
                id: 1,
                name: "a".into()
            },
            Pair {
                id: 2,
                name: "b".into()
            },
        ]
    );
    assert_eq!(engine.driver().submitted(), &[SELECT.to_string()]);
    Ok(())
}

#[test]
fn mismatched_record_yields_schema_error_and_nothing() {
    let mut driver = ScriptedDriver::new();
    driver.script(SELECT, two_rows());
    let mut engine = connected(driver);

    let mut out: Vec<Triple> = Vec::new();
    let err = engine.query(&TripleHandler, SELECT, &mut out).unwrap_err();
    assert!(matches!(
        err,
        QueryError::SchemaMismatch {
            expected: 3,
            actual: 2
        }
    ));
    assert!(out.is_empty());
    assert_eq!(engine.driver().rows_fetched(), 0);
    assert_eq!(engine.driver().released(), 1);
}

#[test]
fn zero_rows_leave_collection_untouched() -> Result<(), Box<dyn std::error::Error>> {
    let mut driver = ScriptedDriver::new();
    driver.script("SELECT id,name FROM empty", ScriptedResponse::rows(2, vec![]));
    // zero rows never reach the field count check
    driver.script("SELECT a,b,c FROM empty", ScriptedResponse::rows(3, vec![]));
    driver.script("INSERT INTO t VALUES (3, 'c')", ScriptedResponse::statement(1));
    let mut engine = connected(driver);

    let mut out = vec![Pair {
        id: 9,
        name: "existing".into(),
    }];
    let outcome = engine.query(&PairHandler, "SELECT id,name FROM empty", &mut out)?;
    assert!(outcome.has_result_set);
    assert_eq!(outcome.records_added, 0);

    engine.query(&PairHandler, "SELECT a,b,c FROM empty", &mut out)?;

    let outcome = engine.query(&PairHandler, "INSERT INTO t VALUES (3, 'c')", &mut out)?;
    assert!(!outcome.has_result_set);
    assert_eq!(outcome.rows_affected, 1);

    assert_eq!(out.len(), 1);
    assert_eq!(engine.driver().released(), 2);
    Ok(())
}

#[test]
fn failing_row_aborts_but_keeps_prior_records() {
    let sql = "SELECT id,name FROM t";
    let mut driver = ScriptedDriver::new();
    driver.script(
        sql,
        ScriptedResponse::text_rows(
            2,
            &[
                &[Some("1"), Some("a")],
                &[Some("2"), None],
                &[Some("3"), Some("c")],
            ],
        ),
    );
    let mut engine = connected(driver);

    let mut out: Vec<Box<Pair>> = Vec::new();
    let err = engine.query(&PairHandler, sql, &mut out).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RowConversion);
    match err.root() {
        QueryError::FieldConversion { field, index, .. } => {
            assert_eq!(*field, "name");
            assert_eq!(*index, 1);
        }
        other => panic!("unexpected root error: {other}"),
    }
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].id, 1);
    assert_eq!(engine.driver().rows_fetched(), 2);
    assert_eq!(engine.driver().released(), 1);
}

#[test]
fn engine_is_reusable_after_errors() -> Result<(), Box<dyn std::error::Error>> {
    let mut driver = ScriptedDriver::new();
    driver.script("SELEC", ScriptedResponse::error("You have an error in your SQL syntax"));
    driver.script(SELECT, two_rows());
    let mut engine = connected(driver);

    let mut out: Vec<Pair> = Vec::new();
    let err = engine.query(&PairHandler, "SELEC", &mut out).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::QueryExecution);
    assert!(err.to_string().starts_with("SELEC failed; error:"));

    engine.query(&PairHandler, SELECT, &mut out)?;
    engine.query(&PairHandler, SELECT, &mut out)?;
    assert_eq!(out.len(), 4);
    assert_eq!(engine.driver().released(), 2);
    Ok(())
}

#[test]
fn connect_failure_then_retry() -> Result<(), Box<dyn std::error::Error>> {
    let mut driver = ScriptedDriver::failing_connect("Access denied for user 'test'");
    driver.script(SELECT, two_rows());
    let mut engine = QueryEngine::new(driver);

    let err = engine.connect(&ConnectOptions::new("t")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Connection);
    assert!(!engine.is_connected());

    let mut out: Vec<Pair> = Vec::new();
    let err = engine.query(&PairHandler, SELECT, &mut out).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConnectionNotInitialized);

    engine.driver_mut().clear_connect_error();
    engine.connect(&ConnectOptions::new("t"))?;
    engine.query(&PairHandler, SELECT, &mut out)?;
    assert_eq!(out.len(), 2);
    Ok(())
}

#[test]
fn empty_database_name_is_a_config_error() {
    let mut engine = QueryEngine::new(ScriptedDriver::new());
    let err = engine.connect(&ConnectOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
fn gaps_are_skipped_by_default_and_fatal_on_request() -> Result<(), Box<dyn std::error::Error>> {
    let rows = vec![
        Some(sql_record_binder::BufferedRow::from_text(&[Some("1"), Some("a")])),
        None,
        Some(sql_record_binder::BufferedRow::from_text(&[Some("3"), Some("c")])),
    ];
    let mut driver = ScriptedDriver::new();
    driver.script(SELECT, ScriptedResponse::rows(2, rows));

    let mut engine = connected(driver);
    let mut out: Vec<Pair> = Vec::new();
    let outcome = engine.query(&PairHandler, SELECT, &mut out)?;
    assert_eq!(outcome.rows_returned, 3);
    assert_eq!(outcome.rows_skipped, 1);
    assert_eq!(out.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 3]);

    engine.set_fetch_gap_policy(FetchGapPolicy::Fail);
    let mut strict: Vec<Pair> = Vec::new();
    let err = engine.query(&PairHandler, SELECT, &mut strict).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ResultFetch);
    assert_eq!(strict.len(), 1);
    assert_eq!(engine.driver().released(), 2);
    Ok(())
}
