use chrono::NaiveDate;
use sql_record_binder::record_handler;

/*
employees
+------------+---------------+
| emp_no     | int           |
| birth_date | date          |
| first_name | varchar(14)   |
| last_name  | varchar(16)   |
| gender     | enum('M','F') |
| hire_date  | date          |
+------------+---------------+
*/
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Employee {
    pub(crate) emp_no: i32,
    pub(crate) birth_date: NaiveDate,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) gender: String,
    pub(crate) hire_date: NaiveDate,
}

record_handler!(Employee => pub(crate) EmployeeHandler {
    emp_no,
    birth_date,
    first_name,
    last_name,
    gender,
    hire_date,
});
