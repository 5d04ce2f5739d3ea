use std::hint::black_box;

use clap::Parser;
use log::info;
use time::macros::format_description;
use time::{Duration, PrimitiveDateTime};

use rowscan::{pack, Column, Result, RowCursor, Table, ValueKind, MAX_YEAR};

/// Builds an observations table and times full scans over it.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of rows to generate
    #[arg(short, long, default_value_t = 5_000_000)]
    rows: usize,

    /// Number of distinct concept strings to sample from
    #[arg(long, default_value_t = 1000)]
    concepts: usize,

    /// Timestamp of the first observation, as YYYY-MM-DDTHH:MM
    #[arg(long, value_parser = parse_start, default_value = "2008-01-01T00:00")]
    start: PrimitiveDateTime,

    /// Full scans per measurement
    #[arg(long, default_value_t = 1)]
    passes: usize,
}

fn parse_start(value: &str) -> std::result::Result<PrimitiveDateTime, String> {
    PrimitiveDateTime::parse(value, format_description!("[year]-[month]-[day]T[hour]:[minute]"))
        .map_err(|err| err.to_string())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    info!("generating {} rows", args.rows);
    let table = observations(&args)?;
    println!("{}", table.structure());
    println!("{}", table.shape());
    println!();

    scan(&table, args.passes, "no op (iteration only)", |_| Ok(()))?;

    println!("\nBy name");
    scan(&table, args.passes, "one get_double()", |row| {
        black_box(row.get_double("lowValue")?);
        Ok(())
    })?;
    scan(&table, args.passes, "one get_int()", |row| {
        black_box(row.get_int("lowValue")?);
        Ok(())
    })?;
    scan(&table, args.passes, "one get_packed_temporal()", |row| {
        black_box(row.get_packed_temporal("date")?.raw_value());
        Ok(())
    })?;
    scan(&table, args.passes, "one get_date_time()", |row| {
        black_box(row.get_date_time("date")?);
        Ok(())
    })?;
    scan(&table, args.passes, "one get_text()", |row| {
        black_box(row.get_text("concept")?);
        Ok(())
    })?;
    scan(&table, args.passes, "four values", |row| {
        black_box(row.get_text("concept")?);
        black_box(row.get_packed_temporal("date")?.raw_value());
        black_box(row.get_double("lowValue")?);
        black_box(row.get_double("highValue")?);
        Ok(())
    })?;

    println!("\nBy index");
    scan(&table, args.passes, "one get_double()", |row| {
        black_box(row.get_double(2)?);
        Ok(())
    })?;
    scan(&table, args.passes, "one get_int()", |row| {
        black_box(row.get_int(2)?);
        Ok(())
    })?;
    scan(&table, args.passes, "one get_packed_temporal()", |row| {
        black_box(row.get_packed_temporal(1)?.raw_value());
        Ok(())
    })?;
    scan(&table, args.passes, "one get_date_time()", |row| {
        black_box(row.get_date_time(1)?);
        Ok(())
    })?;
    scan(&table, args.passes, "one get_text()", |row| {
        black_box(row.get_text(0)?);
        Ok(())
    })?;
    scan(&table, args.passes, "four values", |row| {
        black_box(row.get_text(0)?);
        black_box(row.get_packed_temporal(1)?.raw_value());
        black_box(row.get_double(2)?);
        black_box(row.get_double(3)?);
        Ok(())
    })?;

    println!("Done");
    Ok(())
}

fn observations(args: &Args) -> Result<Table> {
    let mut concept = Column::with_capacity(ValueKind::Text, "concept", args.rows);
    let mut date = Column::with_capacity(ValueKind::PackedTemporal, "date", args.rows);
    let mut low = Column::with_capacity(ValueKind::Number, "lowValue", args.rows);
    let mut high = Column::with_capacity(ValueKind::Number, "highValue", args.rows);

    let concepts: Vec<String> = (0..args.concepts.max(1))
        .map(|i| format!("concept-{:022}", (i as u64).wrapping_mul(2_654_435_761)))
        .collect();

    let mut at = args.start;
    for i in 0..args.rows {
        date.append_raw(pack(at)?)?;
        concept.append_text(concepts[i % concepts.len()].as_str())?;
        low.append_double(spread(i, 7_919))?;
        high.append_double(spread(i, 104_729))?;
        // wrap back to the start rather than run past the packable range
        at = at
            .checked_add(Duration::minutes(1))
            .filter(|next| next.year() <= MAX_YEAR)
            .unwrap_or(args.start);
    }

    let mut table = Table::with_capacity("Observations", 4);
    table
        .add_column(concept)?
        .add_column(date)?
        .add_column(low)?
        .add_column(high)?;
    info!("generated {}", table.shape());
    Ok(table)
}

fn spread(i: usize, prime: usize) -> f64 {
    (i.wrapping_mul(prime) % 1_000_000) as f64 + 0.25
}

fn scan<F>(table: &Table, passes: usize, label: &str, mut visit: F) -> Result<()>
where
    F: FnMut(&RowCursor<'_>) -> Result<()>,
{
    let started = quanta::Instant::now();
    for _ in 0..passes {
        let mut row = table.cursor();
        while row.has_next() {
            row.next()?;
            visit(&row)?;
        }
    }
    println!("{}: {} ms", label, started.elapsed().as_millis());
    Ok(())
}
