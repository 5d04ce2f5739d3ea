use rowscan::{Column, Result, Table, TableColumn, Value};
use time::macros::datetime;

fn main() -> Result<()> {
    let mut table = Table::new("Observations");
    table
        .add_column(TableColumn::<String>::new("concept"))?
        .add_column(Column::packed_temporal("date"))?
        .add_column(Column::number("lowValue"))?
        .add_column(Column::number("highValue"))?;

    let mut at = datetime!(2020-01-01 00:00);
    for (concept, low, high) in [("abc", 10.0_f64, 20.0_f64), ("def", -3.75, 4.5)] {
        table.append_row(vec![
            concept.into(),
            Value::PackedTemporal(rowscan::PackedDateTime::pack(at)?),
            low.into(),
            high.into(),
        ])?;
        at += time::Duration::hours(6);
    }

    println!("{}", table.structure());
    println!("{}\n", table.shape());

    let mut row = table.cursor();
    while row.has_next() {
        row.next()?;
        println!(
            "{} {} low={} (int {}) high={}",
            row.get_text("concept")?,
            row.get_packed_temporal(1)?,
            row.get_double("lowValue")?,
            row.get_int("lowValue")?,
            row.get_double(3)?,
        );
    }
    Ok(())
}
