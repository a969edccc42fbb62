use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{stdin, stdout, BufReader, Read, Write};

use crate::application::render::truncate;
use crate::application::{render_html, render_text, AppError, SheetService};
use crate::domain::{
    format_dong, format_measure, format_vnd, parse_dong, parse_vnd, read_amount_to_text, InputMode,
    Orientation, RowUpdate, SettlementRow, SettlementSheet,
};
use crate::io::{export_rows_csv, import_rows_csv};

/// Quyết toán - Vietnamese settlement sheets
#[derive(Parser)]
#[command(name = "quyettoan")]
#[command(about = "Settlement sheets in đồng: grouped amounts, amounts in words, printable output")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Spell out an amount in Vietnamese (e.g. "1.250.000" or "-50")
    Read {
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Group a plain number with "." thousands separators
    Format {
        #[arg(allow_hyphen_values = true)]
        number: String,
    },

    /// Parse Vietnamese formatted text ("1.234,5") back into a number
    Parse {
        #[arg(allow_hyphen_values = true)]
        text: String,
    },

    /// Create a new sheet document
    New {
        /// Sheet file to create
        file: String,

        /// Sheet title
        #[arg(short, long)]
        title: Option<String>,

        /// Recipient ("Kính gửi")
        #[arg(short, long)]
        recipient: Option<String>,

        /// Date of the sheet (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Print in portrait instead of landscape
        #[arg(long)]
        portrait: bool,

        /// Replace the file if it already exists
        #[arg(long)]
        force: bool,
    },

    /// Change header, advance payment and payment details of a sheet
    Set {
        /// Sheet file
        file: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        recipient: Option<String>,

        /// Date of the sheet (YYYY-MM-DD)
        #[arg(long, conflicts_with = "clear_date")]
        date: Option<String>,

        /// Print the date as a blank to fill in by hand
        #[arg(long)]
        clear_date: bool,

        /// Advance already paid (e.g. "2.000.000")
        #[arg(long, allow_hyphen_values = true)]
        advance: Option<String>,

        #[arg(long)]
        bank: Option<String>,

        #[arg(long)]
        account_number: Option<String>,

        #[arg(long)]
        account_holder: Option<String>,

        /// Name of the person drawing up the sheet
        #[arg(long)]
        creator: Option<String>,

        /// Page orientation: landscape, portrait
        #[arg(long)]
        orientation: Option<String>,
    },

    /// Row management commands
    #[command(subcommand)]
    Row(RowCommands),

    /// Show totals and the amount in words
    Summary {
        /// Sheet file
        file: String,
    },

    /// Render a sheet for printing
    Render {
        /// Sheet file
        file: String,

        /// Output format: text, html
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Take the rows from this CSV file instead of the sheet
        #[arg(long)]
        rows: Option<String>,
    },

    /// Export the rows of a sheet to CSV
    Export {
        /// Sheet file
        file: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Import rows from CSV into a sheet
    Import {
        /// Sheet file
        file: String,

        /// Input file (stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,

        /// Append to the existing rows instead of replacing them
        #[arg(long)]
        append: bool,

        /// Preview without saving
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Subcommand)]
pub enum RowCommands {
    /// Append a row
    Add {
        /// Sheet file
        file: String,

        #[command(flatten)]
        fields: RowFields,
    },

    /// List the rows of a sheet
    List {
        /// Sheet file
        file: String,
    },

    /// Change fields of the row at a position (STT)
    Update {
        /// Sheet file
        file: String,

        /// Row position as printed (1-based)
        position: usize,

        #[command(flatten)]
        fields: RowFields,
    },

    /// Remove the row at a position (STT)
    Remove {
        /// Sheet file
        file: String,

        /// Row position as printed (1-based)
        position: usize,
    },

    /// Duplicate the row at a position (STT); the copy follows it
    Duplicate {
        /// Sheet file
        file: String,

        /// Row position as printed (1-based)
        position: usize,
    },
}

/// Row fields shared by `row add` and `row update`. Numbers use Vietnamese
/// notation: "2,5" for 2.5 m, "150.000" for 150000 đồng.
#[derive(clap::Args, Default)]
pub struct RowFields {
    /// Input mode: dim_qty, size_qty, direct, manual
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Description of the work
    #[arg(short, long)]
    pub content: Option<String>,

    /// Length in metres (dim_qty)
    #[arg(long)]
    pub length: Option<String>,

    /// Width in metres (dim_qty)
    #[arg(long)]
    pub width: Option<String>,

    /// Size in metres (size_qty)
    #[arg(long)]
    pub size: Option<String>,

    /// Quantity
    #[arg(short, long)]
    pub quantity: Option<String>,

    /// Unit price in đồng
    #[arg(short, long)]
    pub price: Option<String>,

    /// Total in đồng (manual)
    #[arg(short, long)]
    pub total: Option<String>,
}

impl RowFields {
    fn into_updates(self) -> Result<Vec<RowUpdate>, AppError> {
        let mut updates = Vec::new();
        if let Some(mode) = self.mode {
            let parsed = InputMode::from_str(&mode).ok_or(AppError::InvalidMode(mode))?;
            updates.push(RowUpdate::Mode(parsed));
        }
        if let Some(content) = self.content {
            updates.push(RowUpdate::Content(content));
        }
        if let Some(length) = self.length {
            updates.push(RowUpdate::Length(parse_vnd(&length)));
        }
        if let Some(width) = self.width {
            updates.push(RowUpdate::Width(parse_vnd(&width)));
        }
        if let Some(size) = self.size {
            updates.push(RowUpdate::Size(parse_vnd(&size)));
        }
        if let Some(quantity) = self.quantity {
            updates.push(RowUpdate::Quantity(parse_vnd(&quantity)));
        }
        if let Some(price) = self.price {
            updates.push(RowUpdate::UnitPrice(parse_dong(&price)));
        }
        if let Some(total) = self.total {
            updates.push(RowUpdate::ManualTotal(parse_dong(&total)));
        }
        Ok(updates)
    }
}

/// Set up `env_logger`: warnings by default, debug with `--verbose`.
/// `RUST_LOG` takes precedence when set.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Read { amount } => {
                println!("{}", read_amount_to_text(parse_vnd(&amount)));
            }

            Commands::Format { number } => {
                println!("{}", format_vnd(number.trim().parse::<f64>().ok()));
            }

            Commands::Parse { text } => {
                println!("{}", parse_vnd(&text));
            }

            Commands::New {
                file,
                title,
                recipient,
                date,
                portrait,
                force,
            } => {
                let mut sheet = SettlementSheet::new();
                if let Some(title) = title {
                    sheet = sheet.with_title(title);
                }
                if let Some(recipient) = recipient {
                    sheet.recipient = recipient;
                }
                if let Some(date_str) = date {
                    sheet = sheet.with_date(Some(parse_date(&date_str)?));
                }
                if portrait {
                    sheet = sheet.with_orientation(Orientation::Portrait);
                }

                let service = SheetService::create(&file, sheet, force)?;
                println!(
                    "Created sheet: {} ({})",
                    service.path().display(),
                    service.sheet().formatted_date()
                );
            }

            Commands::Set {
                file,
                title,
                recipient,
                date,
                clear_date,
                advance,
                bank,
                account_number,
                account_holder,
                creator,
                orientation,
            } => {
                let mut service = SheetService::open(&file)?;
                let sheet = service.sheet_mut();
                if let Some(title) = title {
                    sheet.title = title;
                }
                if let Some(recipient) = recipient {
                    sheet.recipient = recipient;
                }
                if let Some(date_str) = date {
                    sheet.date = Some(parse_date(&date_str)?);
                }
                if clear_date {
                    sheet.date = None;
                }
                if let Some(advance) = advance {
                    sheet.advance_amount = parse_dong(&advance);
                }
                if let Some(bank) = bank {
                    sheet.bank_name = bank;
                }
                if let Some(account_number) = account_number {
                    sheet.account_number = account_number;
                }
                if let Some(account_holder) = account_holder {
                    sheet.account_holder = account_holder;
                }
                if let Some(creator) = creator {
                    sheet.creator_name = creator;
                }
                if let Some(orientation) = orientation {
                    sheet.orientation = Orientation::from_str(&orientation).ok_or_else(|| {
                        anyhow::anyhow!(
                            "Invalid orientation '{}'. Valid values: landscape, portrait",
                            orientation
                        )
                    })?;
                }
                service.save()?;
                println!("Updated sheet: {}", file);
            }

            Commands::Row(row_cmd) => run_row_command(row_cmd)?,

            Commands::Summary { file } => {
                let service = SheetService::open(&file)?;
                run_summary_command(&service);
            }

            Commands::Render {
                file,
                format,
                output,
                rows,
            } => {
                let mut service = SheetService::open(&file)?;
                if let Some(csv_path) = rows {
                    let reader = open_input(Some(&csv_path))?;
                    let result = import_rows_csv(reader)?;
                    report_import_errors(&result.errors);
                    service.replace_rows(result.rows);
                }

                let rendered = match format.to_lowercase().as_str() {
                    "text" => render_text(service.sheet()),
                    "html" => render_html(service.sheet()),
                    other => anyhow::bail!("Unknown format '{}'. Use: text, html", other),
                };
                let mut writer = open_output(output.as_deref())?;
                writer.write_all(rendered.as_bytes())?;
                writer.flush()?;
                if let Some(path) = output {
                    eprintln!("Rendered {} to {}", file, path);
                }
            }

            Commands::Export { file, output } => {
                let service = SheetService::open(&file)?;
                let writer = open_output(output.as_deref())?;
                let count = export_rows_csv(writer, service.sheet().rows())?;
                if output.is_some() {
                    eprintln!("Exported {} row(s)", count);
                }
            }

            Commands::Import {
                file,
                input,
                append,
                dry_run,
            } => {
                let mut service = SheetService::open(&file)?;
                let reader = open_input(input.as_deref())?;
                let result = import_rows_csv(reader)?;
                report_import_errors(&result.errors);

                let imported = result.rows.len();
                if dry_run {
                    println!(
                        "Dry run: {} row(s) would be imported, {} rejected",
                        imported,
                        result.errors.len()
                    );
                    return Ok(());
                }

                if append {
                    for row in result.rows {
                        service.add_row(row);
                    }
                } else {
                    service.replace_rows(result.rows);
                }
                service.save()?;
                println!(
                    "Imported {} row(s) into {} ({} rejected)",
                    imported,
                    file,
                    result.errors.len()
                );
            }
        }

        Ok(())
    }
}

fn run_row_command(cmd: RowCommands) -> Result<()> {
    match cmd {
        RowCommands::Add { file, fields } => {
            let mut service = SheetService::open(&file)?;
            let mut row = SettlementRow::default();
            for update in fields.into_updates()? {
                row.apply(update);
            }
            let position = service.add_row(row);
            service.save()?;
            println!("Added row {}", position);
        }

        RowCommands::List { file } => {
            let service = SheetService::open(&file)?;
            println!(
                "{:>4} {:<24} {:<30} {:>15}",
                "STT", "MODE", "CONTENT", "AMOUNT"
            );
            println!("{}", "-".repeat(76));
            for (index, row) in service.sheet().rows().iter().enumerate() {
                println!(
                    "{:>4} {:<24} {:<30} {:>15}",
                    index + 1,
                    row.mode.label(),
                    truncate(&row.content, 30),
                    format_vnd(Some(row.subtotal()))
                );
                if row.mode == InputMode::DimQty {
                    println!(
                        "{:>4} {:<24} {} x {} m, {} m²",
                        "",
                        "",
                        format_measure(row.length),
                        format_measure(row.width),
                        format_measure(row.area())
                    );
                }
            }
        }

        RowCommands::Update {
            file,
            position,
            fields,
        } => {
            let mut service = SheetService::open(&file)?;
            let updates = fields.into_updates()?;
            if updates.is_empty() {
                anyhow::bail!("Nothing to update. Pass at least one field, e.g. --price 150.000");
            }
            service.update_row(position, updates)?;
            service.save()?;
            println!("Updated row {}", position);
        }

        RowCommands::Remove { file, position } => {
            let mut service = SheetService::open(&file)?;
            let removed = service.remove_row(position)?;
            service.save()?;
            println!(
                "Removed row {}: {} ({})",
                position,
                if removed.content.is_empty() {
                    "(no content)"
                } else {
                    removed.content.as_str()
                },
                format_vnd(Some(removed.subtotal()))
            );
        }

        RowCommands::Duplicate { file, position } => {
            let mut service = SheetService::open(&file)?;
            let new_position = service.duplicate_row(position)?;
            service.save()?;
            println!("Duplicated row {} as row {}", position, new_position);
        }
    }
    Ok(())
}

fn run_summary_command(service: &SheetService) {
    let summary = service.summary();
    let sheet = service.sheet();

    println!("Sheet: {}", sheet.title);
    println!("  Date:        {}", sheet.formatted_date());
    println!("  Rows:        {}", summary.row_count);
    println!("  Total:       {}", format_dong(summary.total));
    if sheet.shows_advance() {
        println!("  Advance:     {}", format_dong(summary.advance));
        println!("  Remaining:   {}", format_dong(summary.remaining));
    }
    println!("  In words:    {}", summary.money_text);
}

fn report_import_errors(errors: &[crate::io::ImportError]) {
    for error in errors {
        match &error.field {
            Some(field) => eprintln!("  line {} [{}]: {}", error.line, field, error.error),
            None => eprintln!("  line {}: {}", error.line, error.error),
        }
    }
}

fn open_input(path: Option<&str>) -> Result<Box<dyn Read>> {
    Ok(match path {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("Failed to open input file: {}", path))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(stdin()),
    })
}

fn open_output(path: Option<&str>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    })
}

fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .with_context(|| format!("Invalid date format '{}'. Use YYYY-MM-DD", date_str))
}
