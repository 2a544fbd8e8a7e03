//! Command line front end for the payroll engine.
//!
//! Report output goes to stdout; logs and errors go to stderr.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use payroll_engine::api::{create_router, AppState};
use payroll_engine::calculation::{AttendanceSummary, GrossSalaryResult, PayrollResult};
use payroll_engine::config::{ConfigLoader, PayrollConfig, DEFAULT_CONFIG_PATH};
use payroll_engine::data::{parse_date, DataLoader, PayrollData};
use payroll_engine::error::EngineError;
use payroll_engine::models::Employee;
use payroll_engine::store::EmployeeLookup;

type CliResult<T> = Result<T, Box<dyn Error>>;

#[derive(Debug, Parser)]
#[command(name = "payroll-engine")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Payroll computations over employee and attendance records")]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show an employee's details
    Employee {
        /// Employee number
        id: String,
    },
    /// Show worked hours per date and in total
    Hours {
        /// Employee number
        id: String,
        /// First date of the range, in the configured date format
        #[arg(long)]
        from: String,
        /// Last date of the range, in the configured date format
        #[arg(long)]
        to: String,
        /// Fail if any entry has its logout before its login
        #[arg(long)]
        strict: bool,
    },
    /// Compute gross salary from worked hours
    Gross {
        /// Employee number
        id: String,
        /// First date of the range, in the configured date format
        #[arg(long)]
        from: String,
        /// Last date of the range, in the configured date format
        #[arg(long)]
        to: String,
    },
    /// Compute net salary from the basic salary
    Net {
        /// Employee number
        id: String,
    },
    /// Start the HTTP API
    Serve {
        /// Address to listen on, overriding the configuration
        #[arg(long)]
        bind: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let loader = ConfigLoader::load(&cli.config)?;
    let config = loader.config();
    init_tracing(config);

    let (data, report) = DataLoader::from_config(config).load(&config.data)?;
    if !report.rejected.is_empty() {
        info!(rejected = report.rejected.len(), "Some data rows were skipped");
    }

    let output = Output {
        json: cli.json,
        date_format: config.formats.date.clone(),
    };

    match cli.command {
        Command::Employee { id } => {
            let employee = data
                .employees
                .get(&id)
                .ok_or(EngineError::EmployeeNotFound { employee_id: id })?;
            output.employee(employee)
        }
        Command::Hours {
            id,
            from,
            to,
            strict,
        } => {
            let start = parse_date(&from, &config.formats.date)?;
            let end = parse_date(&to, &config.formats.date)?;
            let summary = data.engine().compute_hours_worked(&id, start, end)?;
            if strict {
                summary.ensure_valid()?;
            }
            output.hours(&summary)
        }
        Command::Gross { id, from, to } => {
            let start = parse_date(&from, &config.formats.date)?;
            let end = parse_date(&to, &config.formats.date)?;
            let gross = data.engine().compute_gross_salary(&id, start, end)?;
            output.gross(&gross)
        }
        Command::Net { id } => {
            let net = data.engine().compute_net_salary(&id)?;
            output.net(&net)
        }
        Command::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            tokio::runtime::Runtime::new()?.block_on(serve(bind, data))
        }
    }
}

/// Installs the stderr subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(config: &PayrollConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.as_str()));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn serve(bind: String, data: PayrollData) -> CliResult<()> {
    let app = create_router(AppState::new(data));
    let listener = tokio::net::TcpListener::bind(&bind).await?;

    info!(address = %bind, "Starting payroll API server");
    axum::serve(listener, app).await?;
    Ok(())
}

struct Output {
    json: bool,
    date_format: String,
}

impl Output {
    fn print_json<T: Serialize>(&self, value: &T) -> CliResult<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    fn employee(&self, employee: &Employee) -> CliResult<()> {
        if self.json {
            return self.print_json(employee);
        }
        println!("Employee Number:  {}", employee.id);
        println!("Employee Name:    {}", employee.full_name);
        println!("Birthday:         {}", employee.birthday);
        println!("Basic Salary:     {}", money(employee.basic_salary));
        println!("Hourly Rate:      {}", money(employee.hourly_rate));
        Ok(())
    }

    fn hours(&self, summary: &AttendanceSummary) -> CliResult<()> {
        if self.json {
            return self.print_json(summary);
        }
        println!(
            "Hours worked by {} from {} to {}",
            summary.employee_id,
            summary.start_date.format(&self.date_format),
            summary.end_date.format(&self.date_format)
        );
        for day in &summary.days {
            println!(
                "  {}  {}-{}  {}",
                day.date.format(&self.date_format),
                day.login.format("%H:%M"),
                day.logout.format("%H:%M"),
                day.worked
            );
        }
        println!("Total Hours Worked: {}", summary.formatted_total());
        for warning in &summary.warnings {
            println!(
                "Excluded {}: {}",
                warning.date.format(&self.date_format),
                warning.message
            );
        }
        Ok(())
    }

    fn gross(&self, gross: &GrossSalaryResult) -> CliResult<()> {
        if self.json {
            return self.print_json(gross);
        }
        println!("Employee Number:  {}", gross.employee_id);
        println!(
            "Period:           {} to {} ({} days)",
            gross.date_range.start.format(&self.date_format),
            gross.date_range.end.format(&self.date_format),
            gross.date_range.num_days()
        );
        println!("Hours Worked:     {}", gross.attendance.formatted_total());
        println!("Hourly Rate:      {}", money(gross.hourly_rate));
        println!("Gross Salary:     {}", money(gross.gross_salary));
        if gross.attendance.has_invalid_entries() {
            println!(
                "Excluded entries: {} (logout before login)",
                gross.attendance.warnings.len()
            );
        }
        Ok(())
    }

    fn net(&self, net: &PayrollResult) -> CliResult<()> {
        if self.json {
            return self.print_json(net);
        }
        if let Some(id) = &net.employee_id {
            println!("Employee Number:  {}", id);
        }
        println!("Basic Salary:     {}", money(net.basic_salary));
        for deduction in &net.deductions {
            println!("  {:<15} {}", deduction.name, money(deduction.amount));
        }
        println!("Total Deductions: {}", money(net.total_deductions));
        println!("Taxable Income:   {}", money(net.taxable_income));
        println!("Withholding Tax:  {}", money(net.withholding_tax));
        println!("Net Salary:       {}", money(net.net_salary));
        Ok(())
    }
}

/// Display rounding only; computations keep full precision.
fn money(amount: Decimal) -> String {
    format!(
        "PHP {:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}
