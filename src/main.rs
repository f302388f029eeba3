mod prompt;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use std::io::IsTerminal;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};

use goodsale_pos::auth::validation::{validate_login_form, validate_registration_form};
use goodsale_pos::auth::{
    classify, FieldErrors, LoginCredentials, PosType, ProfileUpdate, RegistrationData,
    ResetPasswordData,
};
use goodsale_pos::{
    ApiError, AppSettings, HttpBackend, Locale, Messages, SessionManager, SessionStorage,
    SettingsManager, StoredSession, SubscriptionStatus,
};

#[derive(Parser, Debug)]
#[command(name = "goodsale-pos", about = "GOOD SALE POS account and store management")]
struct Cli {
    #[arg(long, env = "GOODSALE_API_URL")]
    base_url: Option<String>,

    #[arg(long, env = "GOODSALE_LOCALE")]
    locale: Option<Locale>,

    /// Settings file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write --base-url and --locale into the settings file
    #[arg(long)]
    save_config: bool,
}

/// One line typed at the prompt.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_help_flag = true, disable_help_subcommand = true)]
struct Shell {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    Login {
        username: String,
    },
    Register(RegisterArgs),
    Logout,
    Whoami,
    ForgotPassword {
        email: String,
    },
    ResetPassword {
        token: String,
    },
    UpdateProfile(ProfileArgs),
    Packages {
        pos_type: PosType,
    },
    Subscribe {
        package_id: String,
    },
    Subscription,
    Stores,
    OpenStore {
        store_id: String,
    },
    CloseStore {
        store_id: String,
    },
    Help,
    #[command(alias = "exit")]
    Quit,
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    business_name: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    pos_type: Option<PosType>,
}

#[derive(Args, Debug)]
struct ProfileArgs {
    #[arg(long)]
    username: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    business_name: Option<String>,
    #[arg(long)]
    phone: Option<String>,
}

const HELP: &str = "\
commands:
  login <username>                     sign in (prompts for password)
  register --username U --email E --business-name B --phone P [--pos-type T]
  logout                               end the session
  whoami                               show the current user
  forgot-password <email>              request a reset link
  reset-password <token>               set a new password (prompts)
  update-profile [--username U] [--email E] [--business-name B] [--phone P]
  packages <restaurant|coffee|grocery> list packages
  subscribe <package-id>               subscribe to a package
  subscription                         show the current subscription
  stores                               list stores
  open-store <id> / close-store <id>   change store status
  quit";

struct App {
    manager: SessionManager<HttpBackend>,
    backend: HttpBackend,
    storage: Option<SessionStorage>,
    input: Lines<BufReader<Stdin>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (settings, settings_path) = load_settings(&cli)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&settings.log_level))
        .init();
    log::debug!("Settings file: {}", settings_path.display());

    let messages = Messages::for_locale(settings.locale);
    let backend = HttpBackend::new(&settings.api.base_url, settings.api.timeout())
        .with_context(|| format!("configuring backend {}", settings.api.base_url))?;
    let manager = SessionManager::new(backend.clone(), messages)
        .with_serialized_operations(settings.session.serialize_operations);

    let storage = if settings.session.persist {
        match SessionStorage::default_location() {
            Ok(storage) => Some(storage),
            Err(e) => {
                log::warn!("Session persistence disabled: {:#}", e);
                None
            }
        }
    } else {
        None
    };

    let mut app = App {
        manager,
        backend,
        storage,
        input: BufReader::new(tokio::io::stdin()).lines(),
    };

    app.restore_session();
    match app.manager.check_auth().await {
        Some(user) => println!("Signed in as {}", user.display_name()),
        None => println!("Not signed in. Type `help` for commands."),
    }

    app.run().await
}

fn load_settings(cli: &Cli) -> Result<(AppSettings, PathBuf)> {
    let mut manager = match &cli.config {
        Some(path) => SettingsManager::at(path)?,
        None => SettingsManager::new()?,
    };
    if cli.save_config {
        manager.update(|s| {
            if let Some(url) = &cli.base_url {
                s.api.base_url = url.clone();
            }
            if let Some(locale) = cli.locale {
                s.locale = locale;
            }
        })?;
    }
    let mut settings = manager.get().clone();
    settings.apply_env(|key| std::env::var(key).ok());
    if let Some(url) = &cli.base_url {
        settings.api.base_url = url.clone();
    }
    if let Some(locale) = cli.locale {
        settings.locale = locale;
    }
    Ok((settings, manager.path().to_path_buf()))
}

impl App {
    async fn run(&mut self) -> Result<()> {
        loop {
            let Some(line) = self.prompt("pos> ").await? else {
                break;
            };
            let words = split_words(&line);
            if words.is_empty() {
                continue;
            }

            let command = match Shell::try_parse_from(&words) {
                Ok(shell) => shell.command,
                Err(e) => {
                    println!("{}", e.render());
                    continue;
                }
            };

            if matches!(command, ShellCommand::Quit) {
                break;
            }
            self.dispatch(command).await?;
        }
        Ok(())
    }

    async fn dispatch(&mut self, command: ShellCommand) -> Result<()> {
        match command {
            ShellCommand::Login { username } => {
                let Some(password) = self.ask_secret("Password: ").await? else {
                    println!("Cancelled");
                    return Ok(());
                };
                let credentials = LoginCredentials { username, password };
                if report_field_errors(&validate_login_form(&credentials, self.manager.messages())) {
                    return Ok(());
                }
                match self.manager.login(&credentials).await {
                    Ok(_) => {
                        self.persist_session();
                        self.print_user();
                    }
                    Err(e) => println!("{}", e),
                }
            }
            ShellCommand::Register(args) => {
                let Some(password) = self.ask_secret("Password: ").await? else {
                    println!("Cancelled");
                    return Ok(());
                };
                let Some(confirm_password) = self.ask_secret("Confirm password: ").await? else {
                    println!("Cancelled");
                    return Ok(());
                };
                let data = RegistrationData {
                    username: args.username,
                    email: args.email,
                    password,
                    confirm_password,
                    business_name: args.business_name,
                    phone_number: args.phone,
                    pos_type: args.pos_type,
                };
                if report_field_errors(&validate_registration_form(&data, self.manager.messages())) {
                    return Ok(());
                }
                match self.manager.register(&data).await {
                    Ok(_) => {
                        self.persist_session();
                        self.print_user();
                        if let Some(pos_type) = data.pos_type {
                            println!("Next: `packages {}` to choose a package", pos_type);
                        }
                    }
                    Err(e) => println!("{}", e),
                }
            }
            ShellCommand::Logout => {
                self.manager.logout().await;
                if let Some(storage) = &self.storage {
                    if let Err(e) = storage.clear() {
                        log::warn!("Failed to clear session: {:#}", e);
                    }
                }
                println!("Signed out");
            }
            ShellCommand::Whoami => {
                let state = self.manager.snapshot();
                println!("Status: {:?}", state.status());
                self.print_user();
            }
            ShellCommand::ForgotPassword { email } => {
                match self.manager.forgot_password(&email).await {
                    Ok(ack) => println!("{}", ack.message.unwrap_or_else(|| "Reset link sent".into())),
                    Err(e) => println!("{}", e),
                }
            }
            ShellCommand::ResetPassword { token } => {
                let Some(password) = self.ask_secret("New password: ").await? else {
                    println!("Cancelled");
                    return Ok(());
                };
                let Some(confirm_password) = self.ask_secret("Confirm password: ").await? else {
                    println!("Cancelled");
                    return Ok(());
                };
                let data = ResetPasswordData {
                    token,
                    password,
                    confirm_password,
                };
                match self.manager.reset_password(&data).await {
                    Ok(ack) => println!("{}", ack.message.unwrap_or_else(|| "Password updated".into())),
                    Err(e) => println!("{}", e),
                }
            }
            ShellCommand::UpdateProfile(args) => {
                let update = ProfileUpdate {
                    username: args.username,
                    email: args.email,
                    business_name: args.business_name,
                    phone_number: args.phone,
                    ..ProfileUpdate::default()
                };
                match self.manager.update_profile(&update).await {
                    Ok(_) => {
                        self.persist_session();
                        self.print_user();
                    }
                    Err(e) => println!("{}", e),
                }
            }
            ShellCommand::Packages { pos_type } => match self.backend.get_packages(pos_type).await {
                Ok(packages) if packages.is_empty() => println!("No packages for {}", pos_type),
                Ok(packages) => {
                    for pkg in packages {
                        let cycle = pkg
                            .duration
                            .map(|d| format!("/{:?}", d).to_lowercase())
                            .unwrap_or_default();
                        println!("[{}] {} - {:.2}{} {}", pkg.id, pkg.name, pkg.price, cycle, pkg.features.join(", "));
                    }
                }
                Err(e) => self.report_api_error(&e, self.manager.messages().packages_load_failed),
            },
            ShellCommand::Subscribe { package_id } => {
                let package_id = serde_json::from_str::<Value>(&package_id)
                    .ok()
                    .filter(Value::is_number)
                    .unwrap_or(Value::String(package_id));
                match self.backend.subscribe(&package_id).await {
                    Ok(Some(sub)) => println!("Subscribed until {}", sub.end_date.format("%Y-%m-%d")),
                    Ok(None) => println!("Subscribed"),
                    Err(e) => self.report_api_error(&e, self.manager.messages().subscribe_failed),
                }
            }
            ShellCommand::Subscription => match self.backend.get_current_subscription().await {
                Ok(sub) => {
                    let status = SubscriptionStatus::of(sub.as_ref(), Utc::now());
                    match (sub, status) {
                        (Some(sub), status) => {
                            println!("{:?} (ends {})", status, sub.end_date.format("%Y-%m-%d"))
                        }
                        (None, _) => println!("No subscription"),
                    }
                }
                Err(e) => self.report_api_error(&e, self.manager.messages().dashboard_load_failed),
            },
            ShellCommand::Stores => match self.backend.load_dashboard().await {
                Ok(dashboard) => {
                    for store in &dashboard.stores {
                        println!(
                            "[{}] {} - {}{}",
                            store.path_id(),
                            store.name,
                            if store.is_open { "open" } else { "closed" },
                            store.pos_type.map(|t| format!(" ({})", t)).unwrap_or_default()
                        );
                    }
                    let status = SubscriptionStatus::of(dashboard.subscription.as_ref(), Utc::now());
                    println!("Subscription: {:?}", status);
                }
                Err(e) => self.report_api_error(&e, self.manager.messages().dashboard_load_failed),
            },
            ShellCommand::OpenStore { store_id } => {
                self.toggle_store(&store_id, false).await;
            }
            ShellCommand::CloseStore { store_id } => {
                self.toggle_store(&store_id, true).await;
            }
            ShellCommand::Help => println!("{}", HELP),
            ShellCommand::Quit => {}
        }
        Ok(())
    }

    async fn toggle_store(&self, store_id: &str, is_open: bool) {
        match self.backend.toggle_store(store_id, is_open).await {
            Ok(_) => println!("Store {} is now {}", store_id, if is_open { "closed" } else { "open" }),
            Err(e) => self.report_api_error(&e, self.manager.messages().store_toggle_failed),
        }
    }

    fn report_api_error(&self, err: &ApiError, default_message: &str) {
        log::warn!("Request failed: {}", err);
        println!("{}", classify(err, default_message, self.manager.messages()));
    }

    fn print_user(&self) {
        match self.manager.user() {
            Some(user) => {
                println!("User: {}", user.display_name());
                if let Some(email) = &user.email {
                    println!("Email: {}", email);
                }
                if let Some(business) = &user.business_name {
                    println!("Business: {}", business);
                }
                if let Some(role) = &user.role {
                    println!("Role: {}", role);
                }
            }
            None => println!("Not signed in"),
        }
    }

    fn restore_session(&self) {
        let Some(storage) = &self.storage else {
            return;
        };
        if !storage.exists() {
            log::debug!("No saved session at {}", storage.path().display());
            return;
        }
        match storage.load() {
            Ok(Some(stored)) if stored.matches(self.backend.base_url()) => {
                if let Some(cookie) = &stored.cookie {
                    self.backend.restore_session_cookie(cookie);
                }
            }
            Ok(Some(_)) => log::info!("Ignoring stored session for a different backend"),
            Ok(None) => {}
            Err(e) => log::warn!("Failed to load session: {:#}", e),
        }
    }

    fn persist_session(&self) {
        let Some(storage) = &self.storage else {
            return;
        };
        let stored = StoredSession::new(
            self.backend.base_url(),
            self.backend.session_cookie(),
            self.manager.user(),
        );
        if let Err(e) = storage.save(&stored) {
            log::warn!("Failed to save session: {:#}", e);
        }
    }

    async fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(label.as_bytes()).await?;
        stdout.flush().await?;
        Ok(self.input.next_line().await?)
    }

    /// Read a password without echoing it. Piped input is read as a plain line.
    async fn ask_secret(&mut self, label: &str) -> Result<Option<String>> {
        if !std::io::stdin().is_terminal() {
            return self.prompt(label).await;
        }
        let label = label.to_string();
        tokio::task::spawn_blocking(move || prompt::read_secret(&label))
            .await
            .context("password prompt")?
    }
}

fn report_field_errors(errors: &FieldErrors) -> bool {
    for (field, message) in errors {
        println!("{}: {}", field, message);
    }
    !errors.is_empty()
}

/// Split a command line on whitespace, keeping double-quoted runs together.
fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_word = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_word = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_word {
                    words.push(std::mem::take(&mut current));
                    has_word = false;
                }
            }
            c => {
                current.push(c);
                has_word = true;
            }
        }
    }
    if has_word {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_words_keeps_quoted_runs() {
        assert_eq!(
            split_words(r#"register --business-name "Somchai Noodles" --phone 081"#),
            vec!["register", "--business-name", "Somchai Noodles", "--phone", "081"]
        );
        assert_eq!(split_words("  login   bob "), vec!["login", "bob"]);
        assert_eq!(split_words(r#"subscribe """#), vec!["subscribe", ""]);
        assert!(split_words("   ").is_empty());
    }

    #[test]
    fn shell_parses_commands() {
        let shell = Shell::try_parse_from(split_words("packages coffee")).unwrap();
        assert!(matches!(shell.command, ShellCommand::Packages { pos_type: PosType::Coffee }));

        let shell = Shell::try_parse_from(split_words("open-store 12")).unwrap();
        assert!(matches!(shell.command, ShellCommand::OpenStore { ref store_id } if store_id == "12"));

        let shell = Shell::try_parse_from(split_words("exit")).unwrap();
        assert!(matches!(shell.command, ShellCommand::Quit));

        assert!(Shell::try_parse_from(split_words("packages bakery")).is_err());
    }

    #[test]
    fn cli_accepts_save_config_with_overrides() {
        let cli = Cli::try_parse_from(["goodsale-pos", "--save-config", "--locale", "en"]).unwrap();
        assert!(cli.save_config);
        assert_eq!(cli.locale, Some(Locale::English));

        let cli = Cli::try_parse_from(["goodsale-pos"]).unwrap();
        assert!(!cli.save_config);
    }
}
