use bikeshare_core::{format_thousands, DashboardView};
use tabled::{Table, Tabled};
use tabled::settings::{Style, Color, Modify, Alignment};
use tabled::settings::object::{Columns, Rows};

#[derive(Tabled)]
struct HourRow {
    #[tabled(rename = "Hour")]
    hour: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Casual")]
    casual: String,
    #[tabled(rename = "Registered")]
    registered: String,
}

#[derive(Tabled)]
struct DayTypeRow {
    #[tabled(rename = "Day Type")]
    label: String,
    #[tabled(rename = "Total Borrowings")]
    total: String,
    #[tabled(rename = "Mean")]
    mean: String,
}

pub fn show_summary(view: &DashboardView) {
    match &view.range {
        Some(range) => println!("\x1b[1;36mBike Sharing Usage {}\x1b[0m ({} rows)", range, view.rows),
        None => println!("\x1b[1;36mBike Sharing Usage\x1b[0m ({} rows)", view.rows),
    }

    for notice in &view.notices {
        println!("\x1b[31mError:\x1b[0m {}", notice);
    }

    if let Some(metrics) = &view.metrics {
        println!();
        println!("Total Casual Users:     {}", format_thousands(metrics.casual));
        println!("Total Registered Users: {}", format_thousands(metrics.registered));
    }

    if !view.hourly.is_empty() {
        println!("\n\x1b[1mUsage Distribution by Hour\x1b[0m");
        let rows: Vec<HourRow> = view.hourly.iter().map(|h| HourRow {
            hour: h.label(),
            total: format_thousands(h.total),
            casual: format_thousands(h.casual),
            registered: format_thousands(h.registered),
        }).collect();
        println!("{}", styled(Table::new(rows)));
        if let Some(peak) = view.peak_hour() {
            println!("Busiest hour: {} ({} rentals)", peak.label(), format_thousands(peak.total));
        }
    }

    if !view.holiday.is_empty() {
        println!("\n\x1b[1mBorrowings on Holidays vs Regular Days\x1b[0m");
        let rows: Vec<DayTypeRow> = view.holiday.iter().map(|d| DayTypeRow {
            label: d.label.clone(),
            total: format_thousands(d.total),
            mean: format!("{:.2}", d.mean),
        }).collect();
        println!("{}", styled(Table::new(rows)));
    }
}

fn styled(mut table: Table) -> Table {
    table
        .with(Style::modern())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN)); // Header color
    table
}
