use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
mod auth;
use gamershield::crypto::{HashAlgorithm, HashRecord, hash_value, verify_hash};
use gamershield::scorer::QuestionnaireResponse;
use gamershield::{GamerShield, LoginReport, Vault, default_vault};
use std::path::PathBuf;

fn resolve_vault(path: Option<PathBuf>) -> Result<Vault> {
    match path {
        Some(p) => Ok(Vault::new(p)),
        None => default_vault(),
    }
}

#[derive(Debug, Parser)]
#[command(name = "gamershield")]
#[command(
    version,
    about = "Gaming privacy demonstrator: risk assessment and encrypted game-data storage."
)]
struct Cli {
    /// Path to the vault directory
    #[arg(long, global = true, value_name = "PATH", env = "GAMERSHIELD_VAULT")]
    vault: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Runs the secure login demo: encrypts a simulated game-data snapshot
    #[command(arg_required_else_help = true)]
    Login { user: String },

    /// Decrypts and prints a previously stored snapshot
    #[command(arg_required_else_help = true)]
    Unlock { user: String },

    /// Scores a privacy questionnaire and prints recommendations
    #[command(arg_required_else_help = true)]
    Assess {
        /// JSON file with the questionnaire answers
        responses: PathBuf,

        /// Persist the result for this user
        #[arg(long)]
        user: Option<String>,
    },

    /// Computes a salted digest of a value
    #[command(arg_required_else_help = true)]
    Hash {
        value: String,

        #[arg(long, default_value = "blake3")]
        algorithm: String,
    },

    /// Verifies a value against a stored digest and salt
    #[command(arg_required_else_help = true)]
    Verify {
        value: String,
        digest: String,
        salt: String,

        #[arg(long, default_value = "blake3")]
        algorithm: String,
    },

    /// Shows vault statistics
    Info,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    match args.command {
        Commands::Login { user } => {
            let password = auth::read_password()?;
            let shield = GamerShield::open(resolve_vault(args.vault)?);
            match shield.login(&user, password)? {
                LoginReport::Success(success) => {
                    println!("secure login complete for '{user}'");
                    println!("  pseudonymous id:   {}", success.user_id_hash);
                    println!("  detected game:     {}", success.detected_game);
                    println!("  encryption:        {}", success.summary.encryption_algorithm);
                    println!(
                        "  key derivation:    {} ({})",
                        success.summary.key_derivation, success.summary.key_strength
                    );
                    println!(
                        "  hash algorithms:   {}",
                        success.summary.hash_algorithms.join(", ")
                    );
                    println!(
                        "  fields encrypted:  {} ({} sensitive fields hashed)",
                        success.summary.total_fields, success.summary.sensitive_fields_hashed
                    );
                }
                LoginReport::Error { error_message, .. } => {
                    anyhow::bail!("secure login failed: {error_message}");
                }
            }
        }
        Commands::Unlock { user } => {
            let password = auth::read_password()?;
            let shield = GamerShield::open(resolve_vault(args.vault)?);
            let record = shield.unlock(&user, password)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Commands::Assess { responses, user } => {
            let data = std::fs::read_to_string(&responses)
                .with_context(|| format!("failed to read '{}'", responses.display()))?;
            let responses: QuestionnaireResponse = serde_json::from_str(&data)
                .context("failed to parse questionnaire responses")?;

            let shield = GamerShield::open(resolve_vault(args.vault)?);
            let (assessment, recommendations) = shield.assess(user.as_deref(), &responses)?;

            println!(
                "Overall risk: {}/100 ({} risk)",
                assessment.overall, assessment.level
            );
            println!("  Gaming Habits:        {:.1}", assessment.categories.gaming_habits);
            println!("  Account Security:     {:.1}", assessment.categories.account_security);
            println!("  Privacy Awareness:    {:.1}", assessment.categories.privacy_awareness);
            println!(
                "  Data Sharing Control: {:.1}",
                assessment.categories.data_sharing_control
            );

            if recommendations.is_empty() {
                println!("\nNo recommendations; keep it up.");
            } else {
                println!("\nRecommendations:");
                for rec in recommendations {
                    println!("  [{:?}] {}", rec.priority, rec.title);
                    println!("         {}", rec.description);
                }
            }
        }
        Commands::Hash { value, algorithm } => {
            let algorithm: HashAlgorithm = algorithm.parse()?;
            let record = hash_value(&value, algorithm, None)?;
            println!("digest: {}", record.digest);
            println!("salt: {}", record.salt);
            println!("algorithm: {}", record.algorithm);
        }
        Commands::Verify {
            value,
            digest,
            salt,
            algorithm,
        } => {
            let algorithm: HashAlgorithm = algorithm.parse()?;
            let record = HashRecord {
                digest,
                salt,
                algorithm,
            };
            if verify_hash(&value, &record) {
                println!("hash verified");
            } else {
                println!("hash mismatch");
            }
        }
        Commands::Info => {
            let shield = GamerShield::open(resolve_vault(args.vault)?);
            let stats = shield.stats()?;
            println!("vault: {}", shield.vault().root().display());
            println!("  users:         {}", stats.users);
            println!("  envelopes:     {}", stats.envelopes);
            println!("  assessments:   {}", stats.assessments);
            println!("  audit entries: {}", stats.audit_entries);
        }
    }

    Ok(())
}
