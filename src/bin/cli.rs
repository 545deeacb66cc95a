//! Shelfmark CLI
//!
//! Drives the admin and student portals from the terminal. State is kept
//! in the local storage directory between invocations.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use clap::{Parser, Subcommand};
use shelfmark::{
    config::load_all,
    error::{AppError, Result},
    models::{
        AdminLoginForm, BookId, Borrower, Category, Condition, Config, LoginForm, NewBook,
        RegistrationForm, Role, Seed,
    },
    pipeline::{
        Availability, BorrowerQuery, CatalogQuery, Field, FormKind, SearchScope, can_renew,
        check_field, classify, days_until_due, fine_badge, gamification_level, parse_filter,
        password_strength, ratio_badge, validate::registration_warnings,
    },
    services::{AuthService, Library, Navigation, ReminderKind, navigate},
    storage::{LocalStorage, load_library, load_session, save_library},
};

/// Shelfmark - campus library portals
#[derive(Parser, Debug)]
#[command(name = "shelfmark", version, about = "Campus library admin and student portals")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Storage directory (overrides `[paths] storage_dir`)
    #[arg(long)]
    storage_dir: Option<PathBuf>,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search and sort the catalog
    Catalog {
        /// Text matched against title and author (and tags, or ISBN with --admin)
        #[arg(short, long, default_value = "")]
        search: String,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        condition: Option<String>,

        #[arg(long)]
        tag: Option<String>,

        /// title, author, rating, popularity, newest or available
        #[arg(long)]
        sort: Option<String>,

        /// Use the admin catalog view
        #[arg(long)]
        admin: bool,
    },

    /// List all tags in the catalog
    Tags,

    /// Add a book to the catalog
    AddBook {
        #[arg(long)]
        title: String,

        #[arg(long)]
        author: String,

        #[arg(long)]
        category: Category,

        #[arg(long, default_value_t = 1)]
        quantity: u32,

        #[arg(long, default_value = "Good")]
        condition: Condition,

        /// Comma-separated tags
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,

        #[arg(long, default_value = "")]
        isbn: String,

        #[arg(long, default_value = "")]
        location: String,

        #[arg(long)]
        year: Option<i32>,
    },

    /// Delete one or more books
    DeleteBook {
        #[arg(required = true)]
        ids: Vec<BookId>,
    },

    /// Search the borrower roster
    Borrowers {
        #[arg(short, long, default_value = "")]
        search: String,

        #[arg(long)]
        status: Option<String>,

        #[arg(long)]
        membership: Option<String>,
    },

    /// Sign in to the admin portal
    LoginAdmin { username: String, password: String },

    /// Sign in to the student portal
    Login {
        student_id: String,
        password: String,

        #[arg(long)]
        remember_me: bool,
    },

    /// Register a student account and sign in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        student_id: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        #[arg(long)]
        department: String,
        #[arg(long)]
        year: String,
        #[arg(long)]
        semester: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        accept_terms: bool,
    },

    /// Sign out
    Logout,

    /// Show the stored session
    Session,

    /// Resolve a path through the route guards
    Open { path: String },

    /// Borrow a book (student defaults to the signed-in one)
    Borrow {
        book_id: BookId,
        #[arg(long)]
        student: Option<String>,
    },

    /// Return a loan
    Return {
        record_id: u64,
        #[arg(long)]
        student: Option<String>,
    },

    /// Renew a loan
    Renew {
        record_id: u64,
        #[arg(long)]
        student: Option<String>,
    },

    /// Show a student's loans with due status
    Loans { student: Option<String> },

    /// Show a student's notifications
    Notifications {
        student: Option<String>,

        /// Mark everything as read afterwards
        #[arg(long)]
        mark_read: bool,
    },

    /// Add or remove a book from a student's wishlist
    Wishlist {
        book_id: BookId,
        #[arg(long)]
        student: Option<String>,
    },

    /// Suspend a student account
    Suspend { student: String },

    /// Reactivate a student account
    Activate { student: String },

    /// Clear a student's fines
    WaiveFine { student: String },

    /// Send a return (default) or renewal reminder
    Remind {
        student: String,
        #[arg(long)]
        renewal: bool,
    },

    /// Score a password
    Strength { password: String },

    /// Map reading points to a level
    Level { points: u32 },

    /// Run the real-time check for one form field
    Check {
        /// Field name, e.g. studentId, email, phone, password
        field: Field,
        value: String,

        /// Password to compare against for confirmPassword
        #[arg(long, default_value = "")]
        password: String,

        /// Use registration rules
        #[arg(long)]
        register: bool,
    },

    /// Validate configuration and seed data
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Load saved library state, falling back to the seed.
async fn open_library(storage: &LocalStorage, config: &Arc<Config>, seed: Seed) -> Result<Library> {
    let state = match load_library(storage).await? {
        Some(saved) => saved,
        None => {
            log::debug!("No saved library state; starting from seed data");
            seed
        }
    };
    Ok(Library::new(state, Arc::clone(config)))
}

async fn persist(storage: &LocalStorage, library: &Library) -> Result<()> {
    save_library(storage, &library.snapshot()).await
}

/// Student named on the command line, or the signed-in one.
async fn resolve_student<'a>(
    library: &'a Library,
    storage: &LocalStorage,
    student: Option<String>,
) -> Result<&'a Borrower> {
    let student_id = match student {
        Some(id) => id,
        None => {
            let session = load_session(storage).await?;
            if !(session.is_authenticated && session.user_role == Some(Role::Borrower)) {
                return Err(AppError::validation(
                    "No student signed in; pass --student or run `login` first",
                ));
            }
            session.student().student_id
        }
    };
    library.borrower_by_student_id(&student_id)
}

fn print_loans(borrower: &Borrower, now: DateTime<Utc>, max_renewals: u32) {
    println!(
        "{} ({}) - {} - {}",
        borrower.name,
        borrower.student_id,
        borrower.status,
        fine_badge(borrower.fines)
    );
    for record in &borrower.borrowing_history {
        let timing = if record.is_open() {
            let days = days_until_due(record.due_date, now);
            format!(
                "{} ({} days){}",
                classify(record.due_date, now).label(),
                days,
                if can_renew(record.renewal_count, max_renewals) {
                    ", renewable"
                } else {
                    ""
                }
            )
        } else {
            "returned".to_string()
        };
        println!(
            "  #{:<4} {:<45} due {}  {:<8} {}  fine ₹{}",
            record.id, record.book_title, record.due_date, record.status, timing, record.fine
        );
    }
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = Config::load(&cli.config)
        .map(|c| c.logging.level)
        .unwrap_or_else(|_| "info".to_string());
    init_logging(cli.verbose, &level);

    let (config, seed) = load_all(&cli.config)?;
    let storage_dir = cli
        .storage_dir
        .clone()
        .unwrap_or_else(|| config.paths.storage_dir.clone());
    log::debug!("Using storage directory {}", storage_dir.display());

    let config = Arc::new(config);
    let storage = LocalStorage::new(&storage_dir);
    let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN);
    let now = match cli.date {
        Some(date) => date.and_time(noon).and_utc(),
        None => Utc::now(),
    };
    let today = now.date_naive();

    match cli.command {
        Command::Catalog {
            search,
            category,
            condition,
            tag,
            sort,
            admin,
        } => {
            let library = open_library(&storage, &config, seed).await?;
            let query = CatalogQuery {
                search,
                category: parse_filter(category.as_deref())?,
                condition: parse_filter(condition.as_deref())?,
                tag: tag.filter(|t| !t.eq_ignore_ascii_case("all")),
                sort: parse_filter(sort.as_deref())?,
                scope: if admin {
                    SearchScope::Admin
                } else {
                    SearchScope::Browse
                },
            };
            let hits = library.search_catalog(&query);
            for book in &hits {
                let badge = if admin {
                    ratio_badge(book.available, book.quantity)
                } else {
                    Availability::from_count(book.available).to_string()
                };
                println!(
                    "{:>14}  {:<55} {:<30} {:<24} {:.1}  {}",
                    book.id, book.title, book.author, book.category, book.rating, badge
                );
            }
            println!("{} of {} books", hits.len(), library.books().len());
        }

        Command::Tags => {
            let library = open_library(&storage, &config, seed).await?;
            for tag in library.all_tags() {
                println!("{tag}");
            }
        }

        Command::AddBook {
            title,
            author,
            category,
            quantity,
            condition,
            tags,
            isbn,
            location,
            year,
        } => {
            let mut library = open_library(&storage, &config, seed).await?;
            let form = NewBook {
                title,
                author,
                category: Some(category),
                tags,
                isbn,
                quantity,
                condition,
                location,
                published_year: year.unwrap_or(today.year()),
                ..NewBook::blank(today.year())
            };
            let id = library.add_book(form, now)?.id;
            persist(&storage, &library).await?;
            println!("Added book {id}");
        }

        Command::DeleteBook { ids } => {
            let mut library = open_library(&storage, &config, seed).await?;
            let removed = if let [id] = ids.as_slice() {
                library.delete_book(*id)?;
                1
            } else {
                library.bulk_delete(&ids)?
            };
            persist(&storage, &library).await?;
            println!("Deleted {removed} book(s)");
        }

        Command::Borrowers {
            search,
            status,
            membership,
        } => {
            let mut library = open_library(&storage, &config, seed).await?;
            library.sweep_overdue(now);
            let query = BorrowerQuery {
                search,
                status: parse_filter(status.as_deref())?,
                membership: parse_filter(membership.as_deref())?,
            };
            for b in library.search_roster(&query) {
                println!(
                    "{}  {:<18} {:<28} {:<9} {:<8} {}/{} books  {}",
                    b.student_id,
                    b.name,
                    b.email,
                    b.status,
                    b.membership,
                    b.currently_borrowed,
                    b.max_books_allowed,
                    fine_badge(b.fines)
                );
            }
            let stats = library.stats();
            println!(
                "{} borrowers: {} active, {} inactive, {} suspended, {} premium; ₹{} fines, {} overdue",
                stats.total,
                stats.active,
                stats.inactive,
                stats.suspended,
                stats.premium,
                stats.total_fines,
                stats.total_overdue
            );
            persist(&storage, &library).await?;
        }

        Command::LoginAdmin { username, password } => {
            let auth = AuthService::new(config.auth.clone(), storage);
            auth.login_admin(&AdminLoginForm { username, password }).await?;
            println!("Signed in as admin");
        }

        Command::Login {
            student_id,
            password,
            remember_me,
        } => {
            let auth = AuthService::new(config.auth.clone(), storage);
            let form = LoginForm {
                student_id,
                password,
                remember_me,
            };
            auth.login_borrower(&form).await?;
            println!("Signed in as {}", form.student_id);
        }

        Command::Register {
            name,
            student_id,
            password,
            confirm_password,
            department,
            year,
            semester,
            phone,
            email,
            accept_terms,
        } => {
            let form = RegistrationForm {
                name,
                student_id,
                password,
                confirm_password,
                department,
                year,
                semester,
                phone,
                email,
                accept_terms,
            };
            for (field, message) in registration_warnings(&form).iter() {
                log::warn!("{field}: {message}");
            }
            let auth = AuthService::new(config.auth.clone(), storage);
            auth.register(&form).await?;
            println!("Registered and signed in as {}", form.student_id);
        }

        Command::Logout => {
            AuthService::new(config.auth.clone(), storage).logout().await?;
            println!("Signed out");
        }

        Command::Session => {
            let session = load_session(&storage).await?;
            println!("isAuthenticated: {}", session.is_authenticated);
            println!(
                "userRole: {}",
                session.user_role.map(|r| r.as_str()).unwrap_or("-")
            );
            if let Some(data) = &session.student_data {
                println!("studentData: {}", serde_json::to_string_pretty(data)?);
            }
        }

        Command::Open { path } => {
            let session = load_session(&storage).await?;
            match navigate(&session, &path) {
                Navigation::Render(route) => println!("render {route}"),
                Navigation::Redirect(to) => println!("redirect {to}"),
            }
        }

        Command::Borrow { book_id, student } => {
            let mut library = open_library(&storage, &config, seed).await?;
            let borrower_id = resolve_student(&library, &storage, student).await?.id;
            let record = library.borrow(borrower_id, book_id, now)?;
            persist(&storage, &library).await?;
            println!(
                "Borrowed \"{}\" (loan #{}), due {}",
                record.book_title, record.id, record.due_date
            );
        }

        Command::Return { record_id, student } => {
            let mut library = open_library(&storage, &config, seed).await?;
            let borrower_id = resolve_student(&library, &storage, student).await?.id;
            let record = library.return_book(borrower_id, record_id, now)?;
            persist(&storage, &library).await?;
            println!("Returned \"{}\" - {}", record.book_title, fine_badge(record.fine));
        }

        Command::Renew { record_id, student } => {
            let mut library = open_library(&storage, &config, seed).await?;
            let borrower_id = resolve_student(&library, &storage, student).await?.id;
            library.sweep_overdue(now);
            let record = library.renew(borrower_id, record_id, now)?;
            persist(&storage, &library).await?;
            println!(
                "Renewed \"{}\" until {} ({}/{} renewals)",
                record.book_title, record.due_date, record.renewal_count, config.policy.max_renewals
            );
        }

        Command::Loans { student } => {
            let mut library = open_library(&storage, &config, seed).await?;
            library.sweep_overdue(now);
            persist(&storage, &library).await?;
            let borrower = resolve_student(&library, &storage, student).await?;
            print_loans(borrower, now, config.policy.max_renewals);
        }

        Command::Notifications { student, mark_read } => {
            let mut library = open_library(&storage, &config, seed).await?;
            library.sweep_overdue(now);
            let borrower = resolve_student(&library, &storage, student).await?;
            let borrower_id = borrower.id;
            for n in &borrower.notifications {
                println!(
                    "{} [{}] {} {}",
                    if n.read { " " } else { "*" },
                    n.kind,
                    n.date.map(|d| d.to_string()).unwrap_or_default(),
                    n.message
                );
            }
            println!("{} unread", library.unread_count(borrower_id)?);
            if mark_read {
                library.mark_all_read(borrower_id)?;
            }
            persist(&storage, &library).await?;
        }

        Command::Wishlist { book_id, student } => {
            let mut library = open_library(&storage, &config, seed).await?;
            let borrower_id = resolve_student(&library, &storage, student).await?.id;
            let added = library.toggle_wishlist(borrower_id, book_id)?;
            persist(&storage, &library).await?;
            println!(
                "{} book {book_id}",
                if added { "Wishlisted" } else { "Removed from wishlist:" }
            );
        }

        Command::Suspend { student } => {
            let mut library = open_library(&storage, &config, seed).await?;
            let id = library.borrower_by_student_id(&student)?.id;
            library.suspend(id, today)?;
            persist(&storage, &library).await?;
            println!("Suspended {student}");
        }

        Command::Activate { student } => {
            let mut library = open_library(&storage, &config, seed).await?;
            let id = library.borrower_by_student_id(&student)?.id;
            library.activate(id)?;
            persist(&storage, &library).await?;
            println!("Activated {student}");
        }

        Command::WaiveFine { student } => {
            let mut library = open_library(&storage, &config, seed).await?;
            let id = library.borrower_by_student_id(&student)?.id;
            let waived = library.waive_fine(id)?;
            persist(&storage, &library).await?;
            println!("Waived ₹{waived} for {student}");
        }

        Command::Remind { student, renewal } => {
            let mut library = open_library(&storage, &config, seed).await?;
            let id = library.borrower_by_student_id(&student)?.id;
            let kind = if renewal {
                ReminderKind::Renewal
            } else {
                ReminderKind::Return
            };
            library.send_reminder(id, kind, today)?;
            persist(&storage, &library).await?;
            println!("Reminder sent to {student}");
        }

        Command::Strength { password } => {
            let (score, label) = password_strength(&password);
            println!("{score} {label}");
        }

        Command::Level { points } => {
            let level = gamification_level(points);
            println!("Level {} {} (progress {})", level.level, level.title, level.progress);
        }

        Command::Check {
            field,
            value,
            password,
            register,
        } => {
            let kind = if register {
                FormKind::Register
            } else {
                FormKind::Login
            };
            match check_field(kind, field, &value, &password) {
                Some(message) => println!("{field}: {message}"),
                None => println!("{field}: ok"),
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            // load_all already validated both; report what was loaded
            log::info!(
                "✓ Config OK (loan {} days, renewal {} days, max {} renewals)",
                config.policy.loan_period_days,
                config.policy.renewal_period_days,
                config.policy.max_renewals
            );
            log::info!(
                "✓ Seed OK ({} books, {} borrowers)",
                seed.books.len(),
                seed.borrowers.len()
            );
            if let Some(saved) = load_library(&storage).await? {
                saved
                    .validate()
                    .map_err(|e| AppError::config(format!("Saved library state is invalid: {e}")))?;
                log::info!("✓ Saved library state OK");
            }
            log::info!("All validations passed!");
        }
    }

    Ok(())
}
