use std::io::{BufRead, Write};

use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand};

use crate::auth::{CredentialGate, FileSessionStore};
use crate::command_logic::auth::{login, logout, status};
use crate::command_logic::contact::{send_contact, whatsapp_contact};
use crate::command_logic::pricing::{set_pricing, show_pricing};
use crate::command_logic::projects::{add_project, delete_project, edit_project, list_projects, ProjectFields};
use crate::command_logic::public::{plans, portfolio};
use crate::config::{Config, StorageBackend};
use crate::constants::{Message, CONTACT_SERVICES};
use crate::external_api::site_api::models::contact::ContactRequest;
use crate::external_api::site_api::models::project::Project;
use crate::external_api::site_api::models::record_id::RecordId;
use crate::external_api::site_api::SiteApi;
use crate::external_api::ApiError;
use crate::pricing::{PlanKey, PricingTable};
use crate::store;

#[derive(Parser)]
#[command(
    name = "webfolio",
    version = "0.1.0",
    about = "Portfolio, pricing and contact client for the DonyDonitasss site",
    long_about = None,
    propagate_version = true
)]
pub struct Cli {
    /// Where records are kept, overrides the config file
    #[arg(long, global = true, value_enum)]
    pub storage: Option<StorageBackend>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an admin session
    Login(LoginArgs),
    /// End the admin session
    Logout,
    /// Show whether an admin session is active
    Status,
    /// Manage portfolio projects (admin)
    Projects {
        #[command(subcommand)]
        action: ProjectsCommand,
    },
    /// Manage plan prices (admin)
    Pricing {
        #[command(subcommand)]
        action: PricingCommand,
    },
    /// Show the web plans with current prices
    Plans,
    /// Show the portfolio showcase
    Portfolio,
    /// Send a message through the contact form
    Contact(ContactArgs),
}

#[derive(Args)]
pub struct LoginArgs {
    /// Admin username
    #[arg(long, short, required = true)]
    pub username: String,
    /// Admin password
    #[arg(long, short, required = true)]
    pub password: String,
}

#[derive(Subcommand)]
pub enum ProjectsCommand {
    /// List all projects
    List,
    /// Create a project
    Add(ProjectArgs),
    /// Update a project
    Edit {
        /// Project id
        id: String,
        #[command(flatten)]
        fields: ProjectArgs,
    },
    /// Delete a project
    Delete {
        /// Project id
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Args)]
pub struct ProjectArgs {
    /// Project name
    #[arg(long)]
    pub name: Option<String>,
    /// Site address
    #[arg(long)]
    pub url: Option<String>,
    /// Short description
    #[arg(long)]
    pub description: Option<String>,
    /// Image URL
    #[arg(long)]
    pub image: Option<String>,
}

impl From<ProjectArgs> for ProjectFields {
    fn from(args: ProjectArgs) -> Self {
        Self {
            name: args.name,
            url: args.url,
            description: args.description,
            image: args.image,
        }
    }
}

#[derive(Subcommand)]
pub enum PricingCommand {
    /// Show current prices
    Show,
    /// Change one or more prices
    Set(PriceArgs),
}

#[derive(Args)]
#[group(required = true, multiple = true)]
pub struct PriceArgs {
    #[arg(long, value_parser = validate_price)]
    pub landing_page: Option<f64>,
    #[arg(long, value_parser = validate_price)]
    pub basic_site: Option<f64>,
    #[arg(long, value_parser = validate_price)]
    pub interactive_form_site: Option<f64>,
    #[arg(long, value_parser = validate_price)]
    pub custom_branding_site: Option<f64>,
    #[arg(long, value_parser = validate_price)]
    pub basic_ecommerce: Option<f64>,
    #[arg(long, value_parser = validate_price)]
    pub corporate_site: Option<f64>,
}

impl PriceArgs {
    pub fn updates(&self) -> Vec<(PlanKey, f64)> {
        [
            (PlanKey::LandingPage, self.landing_page),
            (PlanKey::BasicSite, self.basic_site),
            (PlanKey::InteractiveFormSite, self.interactive_form_site),
            (PlanKey::CustomBrandingSite, self.custom_branding_site),
            (PlanKey::BasicEcommerce, self.basic_ecommerce),
            (PlanKey::CorporateSite, self.corporate_site),
        ]
        .into_iter()
        .filter_map(|(key, price)| price.map(|price| (key, price)))
        .collect()
    }
}

#[derive(Args)]
pub struct ContactArgs {
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    /// Service of interest
    #[arg(long, value_parser = PossibleValuesParser::new(CONTACT_SERVICES))]
    pub service: Option<String>,
    #[arg(long, default_value = "")]
    pub message: String,
    /// Print a WhatsApp link instead of sending the form
    #[arg(long)]
    pub whatsapp: bool,
}

impl From<ContactArgs> for ContactRequest {
    fn from(args: ContactArgs) -> Self {
        Self {
            name: args.name,
            email: args.email,
            phone: args.phone,
            service: args.service.unwrap_or_default(),
            message: args.message,
        }
    }
}

fn validate_price(value: &str) -> Result<f64, ApiError> {
    let price: f64 = value.trim().parse().map_err(|_| ApiError::Parse(value.to_string()))?;
    if !price.is_finite() || price < 0.0 {
        return Err(ApiError::InvalidPrice(value.to_string()));
    }
    Ok(price)
}

async fn run<R, W>(command: Commands, config: &Config, input: R, output: W) -> Result<String, ApiError>
where
    R: BufRead,
    W: Write,
{
    let gate = CredentialGate::new(FileSessionStore::new(config.session_path()?));
    match command {
        Commands::Login(args) => login(&gate, &args.username, &args.password),
        Commands::Logout => logout(&gate),
        Commands::Status => status(&gate),
        Commands::Projects { action } => {
            gate.require()?;
            let projects = store::open::<Project>(config)?;
            match action {
                ProjectsCommand::List => list_projects(projects).await,
                ProjectsCommand::Add(args) => add_project(projects, args.into()).await,
                ProjectsCommand::Edit { id, fields } => {
                    edit_project(projects, &RecordId::from(id.as_str()), fields.into()).await
                }
                ProjectsCommand::Delete { id, yes } => {
                    delete_project(projects, &RecordId::from(id.as_str()), yes, input, output).await
                }
            }
        }
        Commands::Pricing { action } => {
            gate.require()?;
            let pricing = store::open::<PricingTable>(config)?;
            match action {
                PricingCommand::Show => show_pricing(pricing).await,
                PricingCommand::Set(args) => set_pricing(pricing, &args.updates()).await,
            }
        }
        Commands::Plans => Ok(plans(store::open::<PricingTable>(config)?).await),
        Commands::Portfolio => portfolio(store::open::<Project>(config)?).await,
        Commands::Contact(args) => {
            let whatsapp = args.whatsapp;
            let request = ContactRequest::from(args);
            if whatsapp {
                return Ok(whatsapp_contact(&request));
            }
            send_contact(&SiteApi::from_config(config)?, request).await
        }
    }
}

/// Runs the command and prints its outcome. Returns `false` when it failed.
pub async fn handle_command(
    cli: Cli,
    mut config: Config,
    stdin: std::io::Stdin,
    stdout: std::io::Stdout,
) -> bool {
    if let Some(storage) = cli.storage {
        config.storage = storage;
    }
    let result = run(cli.command, &config, stdin.lock(), stdout.lock()).await;
    match result {
        Ok(value) => {
            println!("{}", value);
            true
        }
        Err(e @ ApiError::RemoteFetch(_)) => {
            eprintln!("{}", Message::LoadFailed(e.to_string()).to_formatted_string());
            false
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::{BufReader, Cursor};
    use tempfile::TempDir;

    fn local_config(dir: &TempDir) -> Config {
        Config {
            storage: StorageBackend::Local,
            data_dir: Some(dir.path().to_path_buf()),
            ..Config::default()
        }
    }

    async fn run_args(args: &[&str], config: &Config) -> Result<String, ApiError> {
        let cli = Cli::parse_from(args);
        let input = BufReader::new(Cursor::new(b"y\n".to_vec()));
        run(cli.command, config, input, std::io::sink()).await
    }

    #[rstest]
    #[case("-u", "-p")]
    #[case("--username", "--password")]
    fn test_login_command_positive(#[case] user_flag: &str, #[case] password_flag: &str) {
        let args = Cli::parse_from(["webfolio", "login", user_flag, "admin", password_flag, "secret"]);
        match args.command {
            Commands::Login(value) => {
                assert_eq!(value.username, "admin");
                assert_eq!(value.password, "secret");
            }
            _ => panic!("expected login"),
        }
    }

    #[test]
    fn test_global_storage_flag() {
        let args = Cli::parse_from(["webfolio", "portfolio", "--storage", "local"]);
        assert_eq!(args.storage, Some(StorageBackend::Local));
    }

    #[test]
    fn test_pricing_set_collects_updates() {
        let args = Cli::parse_from(["webfolio", "pricing", "set", "--basic-site", "5600", "--corporate-site", "14000.5"]);
        match args.command {
            Commands::Pricing {
                action: PricingCommand::Set(prices),
            } => assert_eq!(
                prices.updates(),
                vec![(PlanKey::BasicSite, 5600.0), (PlanKey::CorporateSite, 14000.5)]
            ),
            _ => panic!("expected pricing set"),
        }
    }

    #[test]
    fn test_pricing_set_requires_a_price() {
        assert!(Cli::try_parse_from(["webfolio", "pricing", "set"]).is_err());
    }

    #[test]
    fn test_contact_rejects_unknown_service() {
        assert!(Cli::try_parse_from(["webfolio", "contact", "--service", "Hosting"]).is_err());
        assert!(Cli::try_parse_from(["webfolio", "contact", "--service", "Otro"]).is_ok());
    }

    #[rstest]
    #[case("0", 0.0)]
    #[case("3100", 3100.0)]
    #[case(" 8400.50 ", 8400.5)]
    fn test_validate_price(#[case] value: &str, #[case] expected: f64) {
        assert_eq!(validate_price(value).unwrap(), expected);
    }

    #[rstest]
    #[case("-1")]
    #[case("NaN")]
    #[case("inf")]
    fn test_validate_price_out_of_range(#[case] value: &str) {
        assert!(matches!(validate_price(value), Err(ApiError::InvalidPrice(_))));
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("$3,100")]
    fn test_validate_price_parse_error(#[case] value: &str) {
        assert!(matches!(validate_price(value), Err(ApiError::Parse(_))));
    }

    #[tokio::test]
    async fn test_admin_commands_require_session() {
        let dir = TempDir::new().unwrap();
        let config = local_config(&dir);
        let result = run_args(&["webfolio", "projects", "list"], &config).await;
        assert!(matches!(result, Err(ApiError::NotAuthenticated)));
        let result = run_args(&["webfolio", "pricing", "show"], &config).await;
        assert!(matches!(result, Err(ApiError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn test_admin_flow_on_local_storage() {
        let dir = TempDir::new().unwrap();
        let config = local_config(&dir);

        run_args(&["webfolio", "login", "-u", "admin", "-p", "adm!nPrueb!ta"], &config)
            .await
            .unwrap();
        run_args(
            &[
                "webfolio", "projects", "add", "--name", "Florería", "--url", "flores.example.com",
                "--description", "Arreglos", "--image", "https://img.example.com/f.png",
            ],
            &config,
        )
        .await
        .unwrap();
        run_args(&["webfolio", "projects", "delete", "1"], &config).await.unwrap();
        run_args(&["webfolio", "pricing", "set", "--landing-page", "3300"], &config)
            .await
            .unwrap();

        let listing = run_args(&["webfolio", "projects", "list"], &config).await.unwrap();
        assert!(listing.contains("Florería"));
        assert!(!listing.contains("Escuela DonyDonitasss"));

        let plans = run_args(&["webfolio", "plans"], &config).await.unwrap();
        assert!(plans.contains("Desde $3,300.00 MXN"));
    }

    #[tokio::test]
    async fn test_contact_whatsapp_link() {
        let dir = TempDir::new().unwrap();
        let link = run_args(&["webfolio", "contact", "--name", "Ana", "--whatsapp"], &local_config(&dir))
            .await
            .unwrap();
        assert!(link.starts_with("https://wa.me/5215539500411?text="));
    }
}
