//! Drives a whole interactive session through `run_interactive`.

use income_cli::app;
use income_cli::config::AppConfig;
use income_cli::form::IncomeForm;
use income_core::models::{IncomeRow, PermanentRow};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn session(
    form: &mut IncomeForm,
    script: &str,
) -> String {
    let mut out = Vec::new();
    app::run_interactive(form, script.as_bytes(), &mut out).expect("session should not fail");
    String::from_utf8(out).unwrap()
}

#[test]
fn builds_rows_and_reports_totals() {
    let mut form = IncomeForm::new(&AppConfig::default());

    let output = session(
        &mut form,
        "\
add permanent
set 0 monthly_salary 3000
set 0 year 2024
add freelancer
set 1 hourly_rate 50
set 1 hours_per_day 8
set 1 days_per_year 220
set 1 year 2024
submit
quit
",
    );

    assert!(output.contains("Total: 124000.00 €\nTotal after taxes: 88600.00 €"));
    assert!(output.contains("submitted 2 row(s)"));
    assert!(form.errors().is_empty());
}

#[test]
fn failed_submit_keeps_rows_and_revalidates() {
    let mut form = IncomeForm::new(&AppConfig::default());

    let output = session(
        &mut form,
        "\
add freelancer
set 0 hours_per_day 30
submit
set 0 hours_per_day 8
submit
",
    );

    assert!(output.contains("1 field(s) failed validation:"));
    assert!(output.contains("row 0, hours_per_day: must be at most 24"));
    assert!(output.contains("submitted 1 row(s)"));
    assert_eq!(form.rows().freelancers().next().unwrap().hours_per_day, 8);
}

#[test]
fn remove_keeps_other_rows_and_ids() {
    let mut form = IncomeForm::new(&AppConfig::default());

    session(
        &mut form,
        "\
add permanent
set 0 monthly_salary 1000
add permanent
set 1 monthly_salary 2000
add permanent
set 2 monthly_salary 3000
remove 1
add permanent
",
    );

    let salaries: Vec<_> = form.rows().permanents().map(|row| row.monthly_salary).collect();
    assert_eq!(salaries, vec![dec!(1000), dec!(3000), dec!(0)]);

    let ids: Vec<_> = form.rows().iter().map(|entry| entry.id.get()).collect();
    assert_eq!(ids.len(), 3);
    assert!(!ids[1..].contains(&ids[0]));
    assert!(ids[2] > ids[1]);
}

#[test]
fn invalid_edit_is_rejected_without_change() {
    let mut form = IncomeForm::new(&AppConfig::default());

    let output = session(
        &mut form,
        "\
add permanent
set 0 monthly_salary 3000
set 0 monthly_salary lots
set 0 hourly_rate 50
",
    );

    assert!(output.contains("error: row 0, monthly_salary: must be a number"));
    assert!(output.contains("error: row 0, hourly_rate: does not apply to this kind of income"));
    assert_eq!(
        form.rows().get(0).unwrap().row,
        IncomeRow::Permanent(PermanentRow {
            year: 1900,
            monthly_salary: dec!(3000),
        })
    );
}

#[test]
fn grouped_amounts_are_read_and_decimal_commas_rejected() {
    let mut form = IncomeForm::new(&AppConfig::default());

    let output = session(
        &mut form,
        "\
add permanent
set 0 monthly_salary 2 500
set 0 monthly_salary 3,5
",
    );

    assert!(output.contains("Total: 30000.00 €"));
    assert!(output.contains("error: row 0, monthly_salary: must be a number"));
    assert_eq!(form.rows().permanents().next().unwrap().monthly_salary, dec!(2500));
}

#[test]
fn preloaded_rows_are_shown_on_start() {
    let rows = income_cli::csv_loader::load_from_str(
        "kind,year,monthly_salary\npermanent,2024,3000\n",
    )
    .unwrap();
    let mut form = IncomeForm::with_rows(&AppConfig::default(), rows);

    let output = session(&mut form, "quit\n");

    assert!(output.contains("3000 €/month"));
    assert!(output.contains("Total: 36000.00 €"));
}
