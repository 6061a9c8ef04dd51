//! Sitecheck CLI — command-line client for the Sitecheck API.
//!
//! Set SITECHECK_API_TOKEN and SITECHECK_API_URL (default
//! http://localhost:5000). `normalize-date` works offline.

use anyhow::Context;
use clap::{Parser, Subcommand};
use sitecheck_api_client::ApiClient;
use sitecheck_cli::{init_tracing, parse_id_list, print_json};
use sitecheck_core::datetime::{date_portion, normalize_date, DatePolicy};
use sitecheck_core::models::InspectionStatus;
use sitecheck_core::ClientConfig;

#[derive(Parser)]
#[command(name = "sitecheck", about = "Sitecheck API CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a calendar date and verify the date portion survives
    NormalizeDate {
        /// Date in YYYY-MM-DD form
        date: String,
        /// Policy: utc-noon, local-midnight, zone-midnight[:<tz>]
        #[arg(long)]
        policy: Option<String>,
        /// IANA timezone for bare zone-midnight (default: SITECHECK_TIMEZONE)
        #[arg(long)]
        timezone: Option<String>,
    },
    /// Show the user behind the current token
    Whoami,
    /// Workflow operations
    Workflows {
        #[command(subcommand)]
        sub: WorkflowCommands,
    },
    /// Inspection operations
    Inspections {
        #[command(subcommand)]
        sub: InspectionCommands,
    },
    /// Delete test inspections by workflow-name prefix
    Cleanup {
        /// Workflow-name prefix identifying test data
        #[arg(long, default_value = "Test")]
        prefix: String,
        /// Actually delete; without this the matches are only listed
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum WorkflowCommands {
    /// List workflows, optionally for one organization
    List {
        /// Organization id
        #[arg(long)]
        organization: Option<String>,
    },
    /// Get a single workflow by id
    Get {
        id: String,
    },
}

#[derive(Subcommand)]
enum InspectionCommands {
    /// List inspections with optional filters
    List {
        /// Filter by status (pending, approved, rejected, auto-approved, pending-bulk)
        #[arg(long)]
        status: Option<String>,
        /// Filter by workflow id
        #[arg(long)]
        workflow: Option<String>,
        /// Maximum number of items
        #[arg(long, default_value = "20")]
        limit: u32,
        /// Offset for pagination
        #[arg(long, default_value = "0")]
        offset: u32,
    },
    /// Get a single inspection by id
    Get {
        id: String,
    },
    /// Approve an inspection
    Approve {
        id: String,
        /// Approver remarks
        #[arg(long)]
        remarks: Option<String>,
    },
    /// Reject an inspection
    Reject {
        id: String,
        /// Approver remarks
        #[arg(long)]
        remarks: Option<String>,
    },
    /// Queue inspections for bulk approval (comma-separated ids)
    BulkApprove {
        ids: String,
    },
}

fn resolve_policy(
    config: &ClientConfig,
    policy: Option<String>,
    timezone: Option<String>,
) -> anyhow::Result<DatePolicy> {
    let timezone = match timezone {
        Some(name) => name
            .parse::<chrono_tz::Tz>()
            .map_err(|_| anyhow::anyhow!("Unknown timezone: {}", name))?,
        None => config.timezone,
    };

    match policy.as_deref() {
        None => Ok(config.date_policy),
        Some("zone-midnight") => Ok(DatePolicy::ZoneMidnight(timezone)),
        Some(other) => other.parse(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = ClientConfig::from_env()?;

    match cli.command {
        Commands::NormalizeDate {
            date,
            policy,
            timezone,
        } => {
            let policy = resolve_policy(&config, policy, timezone)?;
            let output = normalize_date(&date, policy)?;
            let preserved = date_portion(&output) == date;
            print_json(&serde_json::json!({
                "input": date,
                "policy": policy.to_string(),
                "output": output,
                "datePreserved": preserved,
            }))?;
            if !preserved {
                anyhow::bail!("Date portion drifted: {} -> {}", date, output);
            }
        }
        Commands::Whoami => {
            let client = ApiClient::from_config(&config)?;
            let user = client.current_user().await?;
            print_json(&user)?;
        }
        Commands::Workflows { sub } => {
            let client = ApiClient::from_config(&config)?;
            match sub {
                WorkflowCommands::List { organization } => {
                    let workflows = client.list_workflows(organization.as_deref()).await?;
                    print_json(&workflows)?;
                }
                WorkflowCommands::Get { id } => {
                    let workflow = client.get_workflow(&id).await?;
                    print_json(&workflow)?;
                }
            }
        }
        Commands::Inspections { sub } => {
            let client = ApiClient::from_config(&config)?;
            match sub {
                InspectionCommands::List {
                    status,
                    workflow,
                    limit,
                    offset,
                } => {
                    let status = status
                        .as_deref()
                        .map(str::parse::<InspectionStatus>)
                        .transpose()?;
                    let inspections = client
                        .list_inspections(status, workflow.as_deref(), Some(limit), Some(offset))
                        .await?;
                    print_json(&inspections)?;
                }
                InspectionCommands::Get { id } => {
                    let inspection = client.get_inspection(&id).await?;
                    print_json(&inspection)?;
                }
                InspectionCommands::Approve { id, remarks } => {
                    let inspection = client.approve_inspection(&id, remarks).await?;
                    print_json(&inspection)?;
                }
                InspectionCommands::Reject { id, remarks } => {
                    let inspection = client.reject_inspection(&id, remarks).await?;
                    print_json(&inspection)?;
                }
                InspectionCommands::BulkApprove { ids } => {
                    let ids = parse_id_list(&ids);
                    if ids.is_empty() {
                        anyhow::bail!("No inspection ids given");
                    }
                    let response = client.bulk_approve(ids).await?;
                    print_json(&response)?;
                }
            }
        }
        Commands::Cleanup { prefix, yes } => {
            let client = ApiClient::from_config(&config)?;
            let inspections = client
                .list_inspections(None, None, Some(500), None)
                .await
                .context("Failed to list inspections")?;

            let matches: Vec<_> = inspections
                .into_iter()
                .filter(|i| i.workflow_name.starts_with(&prefix))
                .collect();

            if matches.is_empty() {
                tracing::info!(prefix = %prefix, "No inspections match");
                return Ok(());
            }

            if !yes {
                tracing::info!(
                    count = matches.len(),
                    "Matching inspections (re-run with --yes to delete)"
                );
                let preview: Vec<_> = matches
                    .iter()
                    .map(|i| {
                        serde_json::json!({
                            "id": i.id,
                            "workflowName": i.workflow_name,
                            "status": i.status.to_string(),
                        })
                    })
                    .collect();
                print_json(&preview)?;
                return Ok(());
            }

            let mut deleted = 0usize;
            for inspection in &matches {
                client
                    .delete_inspection(&inspection.id)
                    .await
                    .with_context(|| format!("Failed to delete inspection {}", inspection.id))?;
                tracing::info!(id = %inspection.id, workflow = %inspection.workflow_name, "Deleted");
                deleted += 1;
            }
            print_json(&serde_json::json!({ "deleted": deleted }))?;
        }
    }

    Ok(())
}
