use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use edu_core::pricing::common::format_won;
use edu_core::ProfileField;
use tracing::{debug, info};

use edu_app::app::Session;
use edu_app::components::{Modal, ProfileEditModal};
use edu_app::config::AppConfig;
use edu_app::logging;
use edu_app::navigation::HistoryNavigator;
use edu_app::views::{
    AiPassFlow, CartSection, CartTotals, DetailTab, ProfileSection, ServiceDetail, TabContent,
};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Educational services marketplace.
///
/// Drives the cart, profile, AI pass flow and service detail pages against
/// the bundled catalog and the configured profile store.
#[derive(Debug, Parser)]
#[command(name = "edu", version)]
struct Cli {
    /// TOML config file. Missing file means defaults.
    #[arg(long, default_value = "edu.toml")]
    config: PathBuf,

    /// Store backend (`memory` or `sqlite`). Overrides the config file.
    #[arg(long)]
    backend: Option<String>,

    /// Store connection string.
    /// For SQLite this is a file path (e.g. `edu.db`) or `:memory:`.
    #[arg(long)]
    db: Option<String>,

    /// Log level or EnvFilter directive. Overrides the config file.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the demo cart and the totals of a selection.
    Cart {
        /// Cart line ids to tick, comma separated.
        #[arg(long, value_delimiter = ',')]
        select: Vec<u32>,

        /// Tick every line.
        #[arg(long)]
        all: bool,

        /// Print the purchase payload for the ticked lines.
        #[arg(long)]
        checkout: bool,
    },

    /// Show or change the stored profile.
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Walk the AI pass flow and print the purchase payload.
    Flow {
        /// Detail subject, e.g. `물리학`.
        #[arg(long)]
        subject: Option<String>,

        /// Target as `university:major`; repeatable.
        #[arg(long = "university", value_parser = parse_university)]
        universities: Vec<(String, String)>,

        /// Pass id (1, 2 or 3).
        #[arg(long)]
        pass: Option<u32>,
    },

    /// Show the AI service detail page.
    Detail {
        /// Show the Q&A tab instead of the detail tab.
        #[arg(long)]
        qna: bool,
    },
}

#[derive(Debug, Subcommand)]
enum ProfileAction {
    Show,
    Edit(ProfileEditArgs),
    Clear,
}

#[derive(Debug, Args)]
struct ProfileEditArgs {
    #[arg(long)]
    username: Option<String>,
    #[arg(long)]
    profile_name: Option<String>,
    #[arg(long)]
    profile_color: Option<String>,
    #[arg(long)]
    high_school: Option<String>,
    #[arg(long)]
    grade: Option<String>,
    #[arg(long)]
    score: Option<String>,
    #[arg(long)]
    dream: Option<String>,
}

impl ProfileEditArgs {
    fn edits(self) -> Vec<(ProfileField, String)> {
        [
            (ProfileField::Username, self.username),
            (ProfileField::ProfileName, self.profile_name),
            (ProfileField::ProfileColor, self.profile_color),
            (ProfileField::HighSchool, self.high_school),
            (ProfileField::Grade, self.grade),
            (ProfileField::Score, self.score),
            (ProfileField::Dream, self.dream),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }
}

fn parse_university(s: &str) -> Result<(String, String), String> {
    s.split_once(':')
        .map(|(name, major)| (name.trim().to_string(), major.trim().to_string()))
        .ok_or_else(|| format!("expected 'university:major', got '{s}'"))
}

// ─── commands ────────────────────────────────────────────────────────────────

fn run_cart(
    session: &Session,
    select: &[u32],
    all: bool,
    checkout: bool,
) -> Result<()> {
    let mut cart = CartSection::from_catalog(&session.catalog).context("Failed to load cart")?;
    if all {
        cart.select_all();
    } else {
        for id in select {
            if cart.cart().line(*id).is_none() {
                bail!("cart has no line {id}");
            }
            cart.toggle(*id);
        }
    }

    let view = cart.render();
    for row in &view.rows {
        let mark = if row.selected { "[x]" } else { "[ ]" };
        println!(
            "{mark} {:>3}  {:<24} {:>12} {:>12}",
            row.id, row.title, row.price, row.discounted_price
        );
    }
    println!("총 상품 개수: {}개", view.totals.item_count());
    match &view.totals {
        CartTotals::Computed(summary) => {
            println!("상품 금액: {}", format_won(summary.total));
            println!("결제 예정 금액: {}", format_won(summary.discounted_total));
        }
        CartTotals::Unavailable { message, .. } => println!("{message}"),
    }

    if checkout {
        match cart.checkout_selected().context("Checkout failed")? {
            Some(purchase) => println!("{}", serde_json::to_string_pretty(&purchase)?),
            None => println!("선택된 상품이 없습니다."),
        }
    }
    Ok(())
}

fn print_profile(section: &ProfileSection) {
    match section.render() {
        Some(view) => {
            println!("{} ({}, {})", view.greeting, view.profile_name, view.profile_color);
            println!("{}", view.school_line);
            println!("{}", view.dream);
            println!("탐구력 코인: {} C", view.stats.coin);
            println!("학종메이트와 함께 진행한 탐구수: {}개", view.stats.explorations);
            println!("학종메이트와 함께 한 날: {}일", view.stats.days_together);
        }
        None => match section.status() {
            Some(status) => println!("{}", status.text),
            None => println!("저장된 프로필이 없습니다."),
        },
    }
}

async fn run_profile(
    mut session: Session,
    action: ProfileAction,
) -> Result<()> {
    match action {
        ProfileAction::Show => {
            let mut section = ProfileSection::new(session.profiles);
            section.mount().await.context("Failed to load profile")?;
            print_profile(&section);
        }
        ProfileAction::Edit(args) => {
            // An unreadable record is replaced like a missing one.
            let current = session.readable_profile().await?;
            let mut editor = ProfileEditModal::new(current.unwrap_or_default());
            editor.open();
            for (field, value) in args.edits() {
                editor.set_field(field, value);
            }
            let mut profiles = session.profiles;
            if let Some(profile) = editor.save() {
                profiles
                    .save_profile(profile)
                    .await
                    .context("Failed to save profile")?;
            }

            let mut section = ProfileSection::new(profiles);
            section.mount().await.context("Failed to reload profile")?;
            print_profile(&section);
        }
        ProfileAction::Clear => {
            session.profiles.clear().await.context("Failed to clear profile")?;
            info!("profile cleared");
        }
    }
    Ok(())
}

async fn run_flow(
    mut session: Session,
    subject: Option<String>,
    universities: Vec<(String, String)>,
    pass: Option<u32>,
) -> Result<()> {
    let mut page = AiPassFlow::new(&session.catalog);
    let mut navigator = HistoryNavigator::new();

    let profile = session.readable_profile().await?;
    page.load_dream(profile.as_ref());

    if let Some(subject) = subject {
        page.open_subject_picker();
        if !page.pick_subject(&subject) {
            bail!("'{subject}' is not a subject in the catalog");
        }
        page.confirm_subject();
    }
    page.next(&mut navigator);
    page.next(&mut navigator);
    for (name, major) in universities {
        page.add_university(name, major);
    }
    page.next(&mut navigator);

    if let Some(pass) = pass {
        page.select_pass(pass);
    }
    if page.status().is_none() {
        page.next(&mut navigator);
    }

    if let Some(status) = page.status() {
        bail!("{}", status.text);
    }
    let purchase = navigator
        .take_purchase_state()
        .context("Flow ended without a purchase")?;
    println!("{}", serde_json::to_string_pretty(&purchase)?);
    Ok(())
}

fn run_detail(
    session: &Session,
    qna: bool,
) -> Result<()> {
    let mut page = ServiceDetail::from_catalog(&session.catalog)?;
    if qna {
        page.set_tab(DetailTab::Qna);
    }
    let view = page.render()?;

    println!("{}", view.title);
    println!("정가: {}", format_won(view.price));
    println!("할인가: {}", format_won(view.discounted_price));
    println!("[{}]", view.active_tab.label());
    match view.content {
        TabContent::Detail(text) => println!("{text}"),
        TabContent::Qna(entries) => {
            for entry in entries {
                println!("Q. {}\nA. {}", entry.question, entry.answer);
            }
        }
    }
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(&cli.config)?.with_overrides(cli.backend, cli.db, cli.log_level);

    logging::init_logging(&config.logging.level);
    if let Some(path) = &config.logging.file {
        logging::enable_file_logging(path)?;
    }
    debug!(?config, "configuration loaded");

    let session = Session::open(&config).await?;

    match cli.command {
        Command::Cart {
            select,
            all,
            checkout,
        } => run_cart(&session, &select, all, checkout),
        Command::Profile { action } => run_profile(session, action).await,
        Command::Flow {
            subject,
            universities,
            pass,
        } => run_flow(session, subject, universities, pass).await,
        Command::Detail { qna } => run_detail(&session, qna),
    }
}
