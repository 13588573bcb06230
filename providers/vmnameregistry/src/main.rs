//! VM Name Registry Provider
//!
//! Exposes the VM name registry API as the `vmnameregistry_vmname` resource
//! and the `vmnameregistry_vmname` / `vmnameregistry_vmnames` data sources.
//!
//! Each invocation runs one operation against the registry and prints the
//! resulting state as JSON on stdout. Logs go to stderr.

mod config;
mod data_sources;
mod error;
mod provider;
mod resources;
mod schema;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::ProviderConfig;
use provider::Provider;
use resources::{VmNameConfig, VmNameState, VmNameUpdate};
use serde::Serialize;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vmname_registry_client::DEFAULT_STATUS;

/// VM name registry provider
#[derive(Parser, Debug)]
#[command(name = "vmnameregistry", version, about, long_about = None)]
struct Cli {
    /// Base URL of the registry API
    #[arg(long, env = "VMNAMEREGISTRY_URL")]
    url: Option<String>,

    /// Per-request timeout in seconds (unbounded when unset)
    #[arg(long, env = "VMNAMEREGISTRY_REQUEST_TIMEOUT_SECS")]
    request_timeout_secs: Option<u64>,

    /// Status lookups a listing keeps in flight
    #[arg(long, env = "VMNAMEREGISTRY_LOOKUP_CONCURRENCY", default_value_t = 1)]
    lookup_concurrency: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the provider schema
    Schema,
    /// Read the vmnameregistry_vmname data source
    Lookup {
        vm_name: String,
    },
    /// Read the vmnameregistry_vmnames data source
    List {
        #[arg(long)]
        environment: String,
        #[arg(long)]
        location: Option<String>,
    },
    /// Allocate a new VM name
    Create {
        #[arg(long)]
        environment: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        business_unit: String,
    },
    /// Refresh a VM name from the registry
    Read {
        #[arg(long)]
        environment: String,
        #[arg(long)]
        vm_name: String,
    },
    /// Change status and business unit of a VM name
    Update {
        #[arg(long)]
        environment: String,
        #[arg(long)]
        vm_name: String,
        #[arg(long, default_value = DEFAULT_STATUS)]
        status: String,
        #[arg(long)]
        business_unit: String,
    },
    /// Release a VM name
    Delete {
        #[arg(long)]
        environment: String,
        #[arg(long)]
        vm_name: String,
    },
    /// Import an existing VM name given as environment/vm_name
    Import {
        import_id: String,
    },
}

impl Cli {
    fn provider_config(&self) -> Result<ProviderConfig> {
        let url = self
            .url
            .clone()
            .context("registry URL is required (--url or VMNAMEREGISTRY_URL)")?;

        Ok(ProviderConfig {
            url,
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            lookup_concurrency: self.lookup_concurrency,
        })
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_state<T: Serialize>(state: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(state).context("Failed to serialize state")?;
    println!("{json}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // The schema is static and needs no registry
    let config = cli.provider_config();
    if let Command::Schema = cli.command {
        return print_state(&schema::provider_schema());
    }

    let provider = Provider::configure(&config?)?;
    run(&provider, cli.command).await
}

async fn run(provider: &Provider, command: Command) -> Result<()> {
    match command {
        Command::Schema => print_state(&schema::provider_schema()),
        Command::Lookup { vm_name } => {
            let state = provider.vm_name_data_source().read(&vm_name).await?;
            print_state(&state)
        }
        Command::List { environment, location } => {
            let state = provider
                .vm_names_data_source()
                .read(&environment, location.as_deref())
                .await?;
            print_state(&state)
        }
        Command::Create {
            environment,
            location,
            status,
            business_unit,
        } => {
            let result = provider
                .vm_name_resource()
                .create(&VmNameConfig {
                    environment,
                    location,
                    status,
                    business_unit,
                })
                .await;
            match result {
                Ok(state) => print_state(&state),
                Err(e) => {
                    // The name is allocated; emit it so it can still be tracked
                    if let Some(state) = e.partial_state() {
                        print_state(state)?;
                    }
                    Err(e.into())
                }
            }
        }
        Command::Read { environment, vm_name } => {
            let mut state = VmNameState::existing(environment, vm_name);
            provider.vm_name_resource().read(&mut state).await?;
            if !state.is_present() {
                info!("VM name is absent from the registry");
            }
            print_state(&state)
        }
        Command::Update {
            environment,
            vm_name,
            status,
            business_unit,
        } => {
            let mut state = VmNameState::existing(environment, vm_name);
            provider
                .vm_name_resource()
                .update(&mut state, &VmNameUpdate { status, business_unit })
                .await?;
            print_state(&state)
        }
        Command::Delete { environment, vm_name } => {
            let mut state = VmNameState::existing(environment, vm_name);
            provider.vm_name_resource().delete(&mut state).await?;
            print_state(&state)
        }
        Command::Import { import_id } => {
            let state = provider
                .vm_name_resource()
                .import(&import_id)
                .await
                .with_context(|| format!("Failed to import {import_id}"))?;
            print_state(&state)
        }
    }
}
