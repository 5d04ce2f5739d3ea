use rowscan::{pack, Column, CursorState, Error, Result, RowCursor, Table, Value};
use time::macros::datetime;

fn observations() -> Result<Table> {
    let mut table = Table::new("Observations");
    table
        .add_column(Column::text("concept"))?
        .add_column(Column::packed_temporal("date"))?
        .add_column(Column::number("low"))?
        .add_column(Column::number("high"))?;
    Ok(table)
}

fn filled(rows: usize) -> Result<Table> {
    let mut table = observations()?;
    let start = datetime!(2008-01-01 00:00);
    for i in 0..rows {
        let at = start + time::Duration::minutes(i as i64);
        table.append_row(vec![
            format!("c{}", i).into(),
            Value::PackedTemporal(rowscan::PackedDateTime::pack(at)?),
            (i as f64 * 1.5 - 7.25).into(),
            (i as f64 * 10.0).into(),
        ])?;
    }
    Ok(table)
}

#[test]
fn single_row_end_to_end() -> Result<()> {
    let mut table = observations()?;
    let date = pack(datetime!(2020-01-01 00:00))?;
    table.append_row(vec![
        "abc".into(),
        Value::PackedTemporal(rowscan::PackedDateTime::from_raw(date)),
        Value::Number(10.0),
        Value::Number(20.0),
    ])?;

    let mut row = table.cursor();
    assert!(row.has_next());
    row.next()?;
    assert_eq!(row.get_text("concept")?, "abc");
    assert_eq!(row.get_packed_temporal("date")?.raw_value(), date);
    assert_eq!(row.get_double("low")?, 10.0);
    assert_eq!(row.get_int("low")?, 10);
    assert_eq!(row.get_double("high")?, 20.0);
    assert_eq!(row.get_date_time("date")?, datetime!(2020-01-01 00:00));
    assert!(!row.has_next());
    Ok(())
}

#[test]
fn cursor_visits_every_row_in_order() -> Result<()> {
    let table = filled(17)?;
    let mut row = RowCursor::new(&table);
    let mut seen = Vec::new();
    while row.has_next() {
        row.next()?;
        seen.push(row.row_number().expect("positioned"));
    }
    assert_eq!(seen, (0..17).collect::<Vec<_>>());
    assert!(!row.has_next());
    assert_eq!(row.state(), CursorState::Iterating);
    Ok(())
}

#[test]
fn next_past_the_end_exhausts() -> Result<()> {
    let table = filled(2)?;
    let mut row = table.cursor();
    row.next()?;
    row.next()?;
    assert_eq!(row.get_text(0)?, "c1");

    assert_eq!(row.next(), Err(Error::NoSuchElement { row_count: 2 }));
    assert_eq!(row.state(), CursorState::Exhausted);
    assert!(!row.has_next());
    assert_eq!(
        row.get_text(0),
        Err(Error::IllegalCursorState {
            state: CursorState::Exhausted
        })
    );
    Ok(())
}

#[test]
fn empty_table_has_no_rows() -> Result<()> {
    let table = observations()?;
    let mut row = table.cursor();
    assert!(!row.has_next());
    assert!(matches!(row.next(), Err(Error::NoSuchElement { .. })));

    let no_columns = Table::new("empty");
    assert!(!no_columns.cursor().has_next());
    Ok(())
}

#[test]
fn accessors_before_start_fail() -> Result<()> {
    let table = filled(3)?;
    let row = table.cursor();
    assert_eq!(row.state(), CursorState::BeforeStart);
    assert_eq!(row.row_number(), None);
    assert_eq!(
        row.get_double("low"),
        Err(Error::IllegalCursorState {
            state: CursorState::BeforeStart
        })
    );
    assert!(row.get_packed_temporal(1).is_err());
    assert!(row.get_date_time("date").is_err());
    Ok(())
}

#[test]
fn name_and_index_accessors_agree() -> Result<()> {
    let table = filled(50)?;
    let mut row = table.cursor();
    while row.has_next() {
        row.next()?;
        for name in table.column_names() {
            let index = table.column_index(name)?;
            assert_eq!(row.get_value(name)?, row.get_value(index)?);
        }
        assert_eq!(row.get_double("low")?, row.get_double(2)?);
        assert_eq!(row.get_int("low")?, row.get_int(2)?);
        assert_eq!(row.get_text("concept")?, row.get_text(0)?);
        assert_eq!(row.get_packed_temporal("date")?, row.get_packed_temporal(1)?);
        let owned = String::from("high");
        assert_eq!(row.get_double(&owned)?, row.get_double(3)?);
    }
    Ok(())
}

#[test]
fn get_int_truncates_toward_zero() -> Result<()> {
    let mut table = Table::new("t");
    table.add_column(Column::number("v"))?;
    for value in [2.9, -2.9, 0.5, -0.5, 1e12, f64::NAN] {
        table.append_row(vec![value.into()])?;
    }
    let mut row = table.cursor();
    let mut ints = Vec::new();
    while row.has_next() {
        row.next()?;
        ints.push(row.get_int("v")?);
    }
    assert_eq!(ints, vec![2, -2, 0, 0, i32::MAX, 0]);
    Ok(())
}

#[test]
fn accessor_errors_name_the_problem() -> Result<()> {
    let table = filled(1)?;
    let mut row = table.cursor();
    row.next()?;
    assert!(matches!(
        row.get_double("nope"),
        Err(Error::UnknownColumn { .. })
    ));
    assert!(matches!(
        row.get_double(9),
        Err(Error::IndexOutOfRange { index: 9, len: 4, .. })
    ));
    assert!(matches!(
        row.get_double("concept"),
        Err(Error::TypeMismatch { .. })
    ));
    assert!(matches!(
        row.get_date_time("low"),
        Err(Error::TypeMismatch { .. })
    ));
    Ok(())
}

#[test]
fn cursors_keep_independent_positions() -> Result<()> {
    let table = filled(5)?;
    let mut first = table.cursor();
    let mut second = table.cursor();

    first.next()?;
    first.next()?;
    first.next()?;
    second.next()?;

    assert_eq!(first.row_number(), Some(2));
    assert_eq!(second.row_number(), Some(0));
    assert_eq!(first.get_text("concept")?, "c2");
    assert_eq!(second.get_text("concept")?, "c0");

    second.next()?;
    assert_eq!(first.row_number(), Some(2));
    assert_eq!(second.row_number(), Some(1));
    Ok(())
}

#[test]
fn cursors_scan_concurrently() -> Result<()> {
    let table = filled(200)?;
    let shared = &table;
    let totals: Vec<f64> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(move || -> Result<f64> {
                    let mut row = shared.cursor();
                    let mut total = 0.0;
                    while row.has_next() {
                        row.next()?;
                        total += row.get_double("high")?;
                    }
                    Ok(total)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("scan thread"))
            .collect::<Result<_>>()
    })?;
    let expected: f64 = (0..200).map(|i| i as f64 * 10.0).sum();
    assert!(totals.iter().all(|&total| total == expected));
    Ok(())
}

#[test]
fn at_and_reset_reposition() -> Result<()> {
    let table = filled(4)?;
    let mut row = table.cursor();
    row.at(3)?;
    assert_eq!(row.get_text("concept")?, "c3");
    assert!(!row.has_next());
    assert!(matches!(row.at(4), Err(Error::IndexOutOfRange { .. })));
    assert_eq!(row.row_number(), Some(3));

    row.reset();
    assert_eq!(row.state(), CursorState::BeforeStart);
    row.next()?;
    assert_eq!(row.get_text(0)?, "c0");
    Ok(())
}
