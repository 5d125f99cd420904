mod args;
mod record;
mod seed;
mod table;

use clap::Parser;
use tracing::Level;

use sql_record_binder::QueryEngine;
use sql_record_binder::sqlite::SqliteDriver;

use crate::args::Args;
use crate::record::{Employee, EmployeeHandler};

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let opts = match args.connect_options() {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let mut engine = QueryEngine::new(SqliteDriver::new());
    if engine.connect(&opts).is_err() {
        std::process::exit(1);
    }

    if args.seed {
        if let Err(err) = seed::seed(engine.driver_mut()) {
            eprintln!("failed to seed employees: {err}");
            std::process::exit(1);
        }
    }

    let sql = args.query();
    let mut results: Vec<Employee> = Vec::new();
    if let Err(err) = engine.query(&EmployeeHandler, &sql, &mut results) {
        eprintln!("failed to run query: {sql}: {err}");
        std::process::exit(-1);
    }

    println!("got {} rows:", results.len());
    println!("{}", table::render(&results));
}
