use sql_record_binder::QueryError;
use sql_record_binder::sqlite::SqliteDriver;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS employees (
        emp_no INTEGER PRIMARY KEY,
        birth_date DATE NOT NULL,
        first_name VARCHAR(14) NOT NULL,
        last_name VARCHAR(16) NOT NULL,
        gender TEXT NOT NULL CHECK (gender IN ('M', 'F')),
        hire_date DATE NOT NULL
    );
";

const ROWS: &str = "
    INSERT OR IGNORE INTO employees VALUES
        (10001, '1953-09-02', 'Georgi', 'Facello', 'M', '1986-06-26'),
        (10002, '1964-06-02', 'Bezalel', 'Simmel', 'F', '1985-11-21'),
        (10003, '1959-12-03', 'Parto', 'Bamford', 'M', '1986-08-28'),
        (10004, '1954-05-01', 'Chirstian', 'Koblick', 'M', '1986-12-01'),
        (10005, '1955-01-21', 'Kyoichi', 'Maliniak', 'M', '1989-09-12'),
        (10006, '1953-04-20', 'Anneke', 'Preusig', 'F', '1989-06-02');
";

pub(crate) fn seed(driver: &mut SqliteDriver) -> Result<(), QueryError> {
    driver.execute_batch(SCHEMA)?;
    driver.execute_batch(ROWS)?;
    tracing::info!("seeded employees table");
    Ok(())
}
