//! `foilrec` - CLI for airfoil-advisor
//!
//! This binary provides the command-line interface for managing the airfoil
//! catalog, getting recommendations, and comparing airfoils.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::process::ExitCode;

use clap::Parser;

use airfoil_advisor::account::{AccountRules, AccountStore, User};
use airfoil_advisor::catalog::parse_thickness;
use airfoil_advisor::cli::{
    output, AccountCommand, AddAirfoilCommand, AirfoilCommand, Cli, Command, CompareCommand,
    ConfigCommand, Credentials, HistoryCommand, OutputFormat, RecommendCommand,
};
use airfoil_advisor::recommend::top;
use airfoil_advisor::{init_logging, Advisor, Airfoil, Config, Error, Storage};

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("foilrec: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult {
    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::Account(cmd) => handle_account(&config, cmd),
        Command::Airfoil(cmd) => handle_airfoil(&config, cmd),
        Command::Recommend(cmd) => handle_recommend(&config, &cmd),
        Command::Compare(cmd) => handle_compare(&config, &cmd),
        Command::History(cmd) => handle_history(&config, &cmd),
        Command::Guide => {
            print!("{}", output::guide());
            Ok(())
        }
        Command::Status(cmd) => handle_status(&config, cmd.json),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn open_storage(config: &Config) -> Result<Storage, Error> {
    Storage::open(config.database_path())
}

fn login(storage: &Storage, credentials: &Credentials) -> Result<User, Error> {
    storage.authenticate(&credentials.username, &credentials.password)
}

fn handle_account(config: &Config, cmd: AccountCommand) -> CliResult {
    let mut storage = open_storage(config)?;
    match cmd {
        AccountCommand::Register {
            username,
            email,
            password,
        } => {
            let rules = AccountRules::new(&config.accounts)?;
            let account = rules.validate(&storage, &username, &password, &email)?;
            let user = storage.register(&account)?;
            println!("Registered {user}");
        }
        AccountCommand::Login { credentials } => {
            let user = login(&storage, &credentials)?;
            println!("Welcome back, {}!", user.username);
        }
    }
    Ok(())
}

fn handle_airfoil(config: &Config, cmd: AirfoilCommand) -> CliResult {
    let mut advisor = Advisor::with_config(open_storage(config)?, config);
    match cmd {
        AirfoilCommand::Add(add) => {
            let airfoil = build_airfoil(&add)?;
            advisor.add_airfoil(&airfoil)?;
            println!("Added {airfoil}");
        }
        AirfoilCommand::List { format } => {
            let airfoils = advisor.list_airfoils()?;
            match format {
                OutputFormat::Json => println!("{}", output::to_json(&airfoils)?),
                _ if airfoils.is_empty() => println!("The catalog is empty."),
                OutputFormat::Table => print!("{}", output::airfoil_table(&airfoils)),
                OutputFormat::Plain => print!("{}", output::airfoil_lines(&airfoils)),
            }
        }
        AirfoilCommand::Show { name, format } => {
            let airfoil = advisor.airfoil(&name)?;
            match format {
                OutputFormat::Json => println!("{}", output::to_json(&airfoil)?),
                OutputFormat::Plain | OutputFormat::Table => {
                    print!("{}", output::airfoil_detail(&airfoil));
                }
            }
        }
    }
    Ok(())
}

fn build_airfoil(cmd: &AddAirfoilCommand) -> Result<Airfoil, Error> {
    Airfoil::new(
        cmd.name.as_str(),
        cmd.max_cl,
        cmd.min_cd,
        cmd.re_min,
        cmd.re_max,
        cmd.application_type.as_str(),
        parse_thickness(&cmd.thickness)?,
    )
}

fn handle_recommend(config: &Config, cmd: &RecommendCommand) -> CliResult {
    let params = cmd.flight_parameters()?;
    let storage = open_storage(config)?;
    let user = login(&storage, &cmd.credentials)?;

    let mut advisor = Advisor::with_config(storage, config);
    let ranked = advisor.recommend(&user.username, &params)?;
    let ranked = if cmd.all {
        ranked
    } else {
        top(ranked, cmd.top.unwrap_or(config.recommend.top_k))
    };

    match cmd.format {
        OutputFormat::Json => println!("{}", output::to_json(&ranked)?),
        OutputFormat::Table => print!("{}", output::recommendation_table(&params, &ranked)),
        OutputFormat::Plain => print!("{}", output::recommendation_lines(&params, &ranked)),
    }
    Ok(())
}

fn parse_position(text: &str) -> Result<usize, Error> {
    match text.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(Error::validation(
            "selection",
            format!("'{text}' is not a catalog position (1, 2, ...)"),
        )),
    }
}

fn handle_compare(config: &Config, cmd: &CompareCommand) -> CliResult {
    let advisor = Advisor::with_config(open_storage(config)?, config);
    let comparison = if cmd.index {
        advisor.compare_by_index(parse_position(&cmd.first)?, parse_position(&cmd.second)?)?
    } else {
        advisor.compare_by_name(&cmd.first, &cmd.second)?
    };

    match cmd.format {
        OutputFormat::Json => println!("{}", output::to_json(&comparison)?),
        OutputFormat::Plain | OutputFormat::Table => {
            print!("{}", output::comparison_report(&comparison));
        }
    }
    Ok(())
}

fn handle_history(config: &Config, cmd: &HistoryCommand) -> CliResult {
    let storage = open_storage(config)?;
    let user = login(&storage, &cmd.credentials)?;
    let advisor = Advisor::with_config(storage, config);

    let limit = if cmd.all {
        None
    } else {
        Some(cmd.limit.unwrap_or(config.history.recent_limit))
    };
    let history = advisor.history(&user.username, limit)?;

    match cmd.format {
        OutputFormat::Json => println!("{}", output::to_json(&history)?),
        OutputFormat::Table => print!("{}", output::history_table(&history)),
        OutputFormat::Plain => print!("{}", output::history_lines(&history)),
    }
    Ok(())
}

fn handle_status(config: &Config, json: bool) -> CliResult {
    let storage = open_storage(config)?;
    let stats = storage.stats()?;

    if json {
        let status = serde_json::json!({
            "database_path": storage.path(),
            "config_path": Config::default_config_path(),
            "scoring_strategy": config.recommend.strategy,
            "stats": stats,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("foilrec status");
        println!("--------------");
        println!("Database:        {}", storage.path().display());
        println!("Schema version:  {}", stats.schema_version);
        println!("Database size:   {} bytes", stats.db_size_bytes);
        println!("Airfoils:        {}", stats.total_airfoils);
        println!("Users:           {}", stats.total_users);
        println!("Searches:        {}", stats.total_searches);
        if let Some(last) = stats.last_search {
            println!("Last search:     {}", last.format("%Y-%m-%d %H:%M:%S UTC"));
        }
        println!("Scoring:         {}", config.recommend.strategy);
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> CliResult {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:        {}", config.database_path().display());
                println!();
                println!("[Recommend]");
                println!("  Top K:                {}", config.recommend.top_k);
                println!("  Strategy:             {}", config.recommend.strategy);
                println!();
                println!("[Compare]");
                println!("  High lift margin:     {}", config.compare.high_lift_margin);
                println!("  Low drag margin:      {}", config.compare.low_drag_margin);
                println!(
                    "  Thickness margin:     {} pp",
                    config.compare.thickness_margin_points
                );
                println!();
                println!("[Accounts]");
                println!(
                    "  Min username length:  {}",
                    config.accounts.min_username_length
                );
                println!(
                    "  Min password length:  {}",
                    config.accounts.min_password_length
                );
                println!();
                println!("[History]");
                println!("  Recent limit:         {}", config.history.recent_limit);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path))?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}
